//! HTTP request header handling implementation.
//!
//! This module wraps the standard `http::Request` type so the rest of the host
//! only ever deals with the header portion of a request.

use http::{HeaderMap, Method, Request, Uri, Version};

/// Represents an HTTP request header.
///
/// This struct wraps a `http::Request<()>`, the body is never read by the host.
#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Returns a reference to the request's URI.
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Returns the request path, used for location lookup.
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// A `HEAD` request gets the full response head but never a body.
    pub fn expects_body(&self) -> bool {
        self.method() != Method::HEAD
    }
}

/// Converts a bodyless request into a RequestHeader.
impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_request_has_no_body() {
        let header = RequestHeader::from(Request::head("/status").body(()).unwrap());
        assert!(!header.expects_body());
        assert_eq!(header.path(), "/status");
    }

    #[test]
    fn get_request_has_body() {
        let header = RequestHeader::from(Request::get("/status?verbose=1").body(()).unwrap());
        assert!(header.expects_body());
        assert_eq!(header.path(), "/status");
        assert_eq!(header.uri().query(), Some("verbose=1"));
    }
}
