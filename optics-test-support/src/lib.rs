//! Shared test utilities used across the optics crates.

pub mod ci;

pub mod tracing {
    //! A `tracing` layer that captures spans and events for assertions.
    //!
    //! Install [`RecordingLayer`] on a registry for the duration of a test and
    //! query it afterwards:
    //!
    //! ```
    //! use optics_test_support::tracing::RecordingLayer;
    //! use tracing_subscriber::layer::SubscriberExt;
    //!
    //! let layer = RecordingLayer::default();
    //! let subscriber = tracing_subscriber::registry().with(layer.clone());
    //! tracing::subscriber::with_default(subscriber, || {
    //!     let span = tracing::info_span!("demo.span", points = 3_u64);
    //!     let _entered = span.enter();
    //!     tracing::info!("inside");
    //! });
    //!
    //! let span = layer.span("demo.span").expect("span recorded");
    //! assert_eq!(span.field("points"), Some("3"));
    //! assert!(layer.has_event(tracing::Level::INFO, "inside"));
    //! ```
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    type Fields = HashMap<String, String>;

    #[derive(Default)]
    struct Journal {
        spans: Vec<SpanRecord>,
        events: Vec<EventRecord>,
    }

    /// Layer that stores closed spans and emitted events in memory.
    ///
    /// Clones share the same journal, so one handle can be moved into the
    /// subscriber while another stays with the test.
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        journal: Arc<Mutex<Journal>>,
    }

    impl RecordingLayer {
        fn journal(&self) -> MutexGuard<'_, Journal> {
            self.journal.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.journal().spans.clone()
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.journal().events.clone()
        }

        /// Returns the first closed span called `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<SpanRecord> {
            self.journal()
                .spans
                .iter()
                .find(|span| span.name == name)
                .cloned()
        }

        /// Returns every event emitted at `level`.
        #[must_use]
        pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
            self.journal()
                .events
                .iter()
                .filter(|event| event.level == level)
                .cloned()
                .collect()
        }

        /// Reports whether an event with `message` was emitted at `level`.
        #[must_use]
        pub fn has_event(&self, level: Level, message: &str) -> bool {
            self.journal()
                .events
                .iter()
                .any(|event| event.level == level && event.message() == Some(message))
        }
    }

    /// A closed span and the fields recorded against it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the callsite metadata.
        pub name: String,
        /// Fields recorded at creation and through later `record` calls.
        pub fields: Fields,
    }

    impl SpanRecord {
        /// Returns the rendered value of `name`, if recorded.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// An emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target, normally the emitting module path.
        pub target: String,
        /// Name of the innermost span active when the event fired.
        pub parent: Option<String>,
        /// Rendered event fields, including `message`.
        pub fields: Fields,
    }

    impl EventRecord {
        /// Returns the event's `message` field.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }

        /// Returns the rendered value of `name`, if recorded.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    struct OpenSpan {
        name: &'static str,
        fields: Fields,
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = Fields::new();
            attrs.record(&mut Renderer(&mut fields));
            span.extensions_mut().insert(OpenSpan {
                name: attrs.metadata().name(),
                fields,
            });
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut Renderer(&mut open.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
                return;
            };
            self.journal().spans.push(SpanRecord {
                name: open.name.to_owned(),
                fields: open.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let mut fields = Fields::new();
            event.record(&mut Renderer(&mut fields));
            let parent = ctx
                .event_span(event)
                .map(|span| span.name().to_owned());
            let metadata = event.metadata();
            self.journal().events.push(EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                parent,
                fields,
            });
        }
    }

    /// Renders every field to a string; numbers and booleans use `Display`.
    struct Renderer<'a>(&'a mut Fields);

    impl Renderer<'_> {
        fn put(&mut self, field: &Field, value: String) {
            self.0.insert(field.name().to_owned(), value);
        }
    }

    impl Visit for Renderer<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.put(field, format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.put(field, value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.put(field, value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.put(field, value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.put(field, value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.put(field, value.to_string());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.put(field, value.to_string());
        }
    }
}
