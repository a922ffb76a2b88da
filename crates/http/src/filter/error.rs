use crate::protocol::SendError;
use http::StatusCode;
use std::error::Error;
use thiserror::Error;

/// Failure of a header filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{module}: {source}")]
    Internal {
        module: &'static str,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("failed to write response header: {source}")]
    Send {
        #[from]
        source: SendError,
    },
}

impl FilterError {
    pub fn internal<E: Into<Box<dyn Error + Send + Sync>>>(module: &'static str, source: E) -> Self {
        Self::Internal { module, source: source.into() }
    }

    /// The status the request fails with.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
