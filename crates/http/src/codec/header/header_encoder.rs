//! HTTP header encoder implementation for serializing HTTP response headers
//!
//! This module writes the status line and every header of a [`ResponseHead`]
//! into raw bytes. It is the last step of the header filter chain, so whatever
//! the filters left in the header map is exactly what goes on the wire.

use crate::protocol::{ResponseHead, SendError};

use bytes::{BufMut, BytesMut};

use http::Version;
use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;
use tracing::error;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for HTTP response headers implementing the [`Encoder`] trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderEncoder;

impl Encoder<&ResponseHead> for HeaderEncoder {
    type Error = SendError;

    /// Encodes the response head into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP version is not HTTP/1.1
    fn encode(&mut self, item: &ResponseHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let head = item;
        dst.reserve(INIT_HEADER_SIZE);
        match head.version() {
            Version::HTTP_11 => {
                write!(
                    FastWrite(dst),
                    "HTTP/1.1 {} {}\r\n",
                    head.status().as_str(),
                    head.status().canonical_reason().unwrap_or("")
                )?;
            }
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(SendError::UnsupportedVersion(v));
            }
        }

        for (header_name, header_value) in head.headers() {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Response, StatusCode, header};

    #[test]
    fn encode_status_line_and_headers() {
        let head = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_LENGTH, 3)
            .header("X-HTTPSTIME", "1700000000.000123")
            .body(())
            .unwrap();

        let mut dst = BytesMut::new();
        HeaderEncoder.encode(&head, &mut dst).unwrap();

        assert_eq!(&dst[..], &b"HTTP/1.1 200 OK\r\ncontent-length: 3\r\nx-httpstime: 1700000000.000123\r\n\r\n"[..]);
    }

    #[test]
    fn encode_rejects_http_10() {
        let head = Response::builder().version(Version::HTTP_10).body(()).unwrap();
        let mut dst = BytesMut::new();

        let result = HeaderEncoder.encode(&head, &mut dst);
        assert!(matches!(result, Err(SendError::UnsupportedVersion(Version::HTTP_10))));
    }
}
