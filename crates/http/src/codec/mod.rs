//! Protocol encoding/decoding for the request and response heads.

mod header;

pub use header::HeaderDecoder;
pub use header::HeaderEncoder;
