//! HTTP header processing module for encoding and decoding headers
//!
//! - [`HeaderDecoder`]: decodes a request head from raw bytes, enforcing size and count limits
//! - [`HeaderEncoder`]: encodes a response head into raw bytes

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
