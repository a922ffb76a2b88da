//! HTTP response header handling implementation.
//!
//! The header filter chain operates on the head only. The body is produced by
//! the content phase and written after the head has passed through every filter.

use http::Response;

/// Type alias for HTTP response headers.
///
/// This type represents the header portion of an HTTP response, using
/// `http::Response<()>` with an empty body placeholder.
pub type ResponseHead = Response<()>;
