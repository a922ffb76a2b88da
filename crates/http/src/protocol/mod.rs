//! Core HTTP protocol abstractions.
//!
//! - [`RequestHeader`]: wraps the parsed request head
//! - [`ResponseHead`]: the response head handed through the header filter chain
//! - [`HttpError`], [`ParseError`], [`SendError`]: connection level errors

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
