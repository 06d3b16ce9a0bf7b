//! Error types for the OPTICS core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DataSource`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DataSourceError {
    /// Requested index was outside the source's bounds.
    #[error("index {index} is out of bounds")]
    OutOfBounds {
        /// The requested row that exceeded the source bounds.
        index: usize,
    },
    /// Compared vectors had different dimensions.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand vector.
        left: usize,
        /// Dimensionality of the right-hand vector.
        right: usize,
    },
    /// Rows must have positive dimension.
    #[error("data source vectors must have positive dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("point {point} has a non-finite coordinate at component {component}")]
    NonFinite {
        /// Row holding the offending value.
        point: usize,
        /// Component index within the row.
        component: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DataSourceError`] variants.
    enum DataSourceErrorCode for DataSourceError {
        /// Requested index was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "DATA_SOURCE_OUT_OF_BOUNDS",
        /// Compared vectors had different dimensions.
        DimensionMismatch => DimensionMismatch { .. } => "DATA_SOURCE_DIMENSION_MISMATCH",
        /// Rows must have positive dimension.
        ZeroDimension => ZeroDimension => "DATA_SOURCE_ZERO_DIMENSION",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "DATA_SOURCE_NON_FINITE",
    }
}

/// Error type produced when configuring or running OPTICS and extracting
/// clusters from its ordering.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OpticsError {
    /// `min_pts` must be at least one.
    #[error("min_pts must be at least 1 (got {got})")]
    InvalidMinPts {
        /// The rejected value.
        got: usize,
    },
    /// `eps` must be a non-negative number.
    #[error("eps must be non-negative and not NaN (got {got})")]
    InvalidEps {
        /// The rejected value.
        got: f64,
    },
    /// The supplied [`crate::DataSource`] contained no items.
    #[error("data source `{data_source}` contains no items")]
    EmptySource {
        /// Identifier for the empty data source.
        data_source: Arc<str>,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// A [`crate::DataSource`] operation failed while computing distances.
    #[error("data source `{data_source}` failed: {error}")]
    DataSource {
        /// Identifier for the data source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying data source error.
        error: DataSourceError,
    },
    /// The data source produced a negative or non-finite distance.
    #[error("distance between {left} and {right} must be finite and non-negative (got {value})")]
    InvalidDistance {
        /// First point of the pair.
        left: usize,
        /// Second point of the pair.
        right: usize,
        /// The rejected distance.
        value: f64,
    },
    /// The flat extraction threshold was negative, NaN or above the ordering's `eps`.
    #[error("eps_cluster must lie in [0, {max}] (got {got})")]
    InvalidClusterEps {
        /// The rejected threshold.
        got: f64,
        /// The `eps` the ordering was computed with.
        max: f64,
    },
    /// The xi steepness fraction was outside the open interval `(0, 1)`.
    #[error("xi must lie strictly between 0 and 1 (got {got})")]
    InvalidXi {
        /// The rejected value.
        got: f64,
    },
    /// Minimum cluster size must be greater than zero.
    #[error("min_cluster_size must be at least 1 (got {got})")]
    InvalidMinClusterSize {
        /// The rejected value.
        got: usize,
    },
    /// A caller-supplied ordering was malformed.
    #[error("invalid cluster ordering: {reason}")]
    InvalidOrdering {
        /// What was wrong with the ordering.
        reason: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`OpticsError`] variants.
    enum OpticsErrorCode for OpticsError {
        /// `min_pts` must be at least one.
        InvalidMinPts => InvalidMinPts { .. } => "OPTICS_INVALID_MIN_PTS",
        /// `eps` must be a non-negative number.
        InvalidEps => InvalidEps { .. } => "OPTICS_INVALID_EPS",
        /// The supplied [`crate::DataSource`] contained no items.
        EmptySource => EmptySource { .. } => "OPTICS_EMPTY_SOURCE",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "OPTICS_BACKEND_UNAVAILABLE",
        /// A [`crate::DataSource`] operation failed while computing distances.
        DataSourceFailure => DataSource { .. } => "OPTICS_DATA_SOURCE_FAILURE",
        /// The data source produced a negative or non-finite distance.
        InvalidDistance => InvalidDistance { .. } => "OPTICS_INVALID_DISTANCE",
        /// The flat extraction threshold was out of range.
        InvalidClusterEps => InvalidClusterEps { .. } => "OPTICS_INVALID_CLUSTER_EPS",
        /// The xi steepness fraction was out of range.
        InvalidXi => InvalidXi { .. } => "OPTICS_INVALID_XI",
        /// Minimum cluster size must be greater than zero.
        InvalidMinClusterSize => InvalidMinClusterSize { .. } => "OPTICS_INVALID_MIN_CLUSTER_SIZE",
        /// A caller-supplied ordering was malformed.
        InvalidOrdering => InvalidOrdering { .. } => "OPTICS_INVALID_ORDERING",
    }
}

impl OpticsError {
    /// Retrieve the inner [`DataSourceErrorCode`] when the error originated in a [`crate::DataSource`].
    #[must_use]
    pub const fn data_source_code(&self) -> Option<DataSourceErrorCode> {
        match self {
            Self::DataSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, OpticsError>;
