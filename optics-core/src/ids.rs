//! Index newtypes keeping original point indices apart from positions in the
//! cluster order.

use std::fmt;

/// Index of a point in the input [`crate::DataSource`].
///
/// # Examples
/// ```
/// use optics_core::PointId;
///
/// let id = PointId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(usize);

impl PointId {
    /// Wraps a raw point index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the raw point index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Position of a point within a [`crate::ClusterOrdering`].
///
/// # Examples
/// ```
/// use optics_core::OrderPosition;
///
/// let position = OrderPosition::new(0);
/// assert_eq!(position.get(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderPosition(usize);

impl OrderPosition {
    /// Wraps a raw order position.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(position: usize) -> Self { Self(position) }

    /// Returns the raw order position.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for OrderPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
