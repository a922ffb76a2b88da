use crate::MODULE_NAME;
use http::header::{InvalidHeaderValue, MaxSizeReached};
use microtime_http::filter::FilterError;
use microtime_http::pool::PoolError;
use std::time::SystemTimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("system clock is before the unix epoch: {source}")]
    BeforeEpoch {
        #[from]
        source: SystemTimeError,
    },

    #[error("{secs} seconds since the unix epoch do not fit a signed 64 bit count")]
    OutOfRange { secs: u64 },
}

/// Ways adding the header can fail. Every one of them fails the request with
/// `500 Internal Server Error`.
#[derive(Debug, Error)]
pub enum MicrotimeError {
    #[error("failed to allocate the header value: {source}")]
    Alloc {
        #[from]
        source: PoolError,
    },

    #[error("failed to allocate a header slot: {source}")]
    HeaderSlot {
        #[from]
        source: MaxSizeReached,
    },

    #[error("failed to read the clock: {source}")]
    Clock {
        #[from]
        source: ClockError,
    },

    #[error("formatting returned {written} on len {capacity}")]
    Format { written: usize, capacity: usize },

    #[error("invalid header value: {source}")]
    InvalidValue {
        #[from]
        source: InvalidHeaderValue,
    },
}

impl From<MicrotimeError> for FilterError {
    fn from(e: MicrotimeError) -> Self {
        FilterError::internal(MODULE_NAME, e)
    }
}
