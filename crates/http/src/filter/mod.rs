//! The output header filter chain.
//!
//! Every response head passes through a chain of [`HeaderFilter`]s before it
//! is written. Each filter owns the next one and decides what to do before
//! delegating to it. The chain always ends with [`WriteHeaderFilter`], which
//! serializes the head.
//!
//! The chain is built once at startup by
//! [`Modules::header_filter_chain`](crate::module::Modules::header_filter_chain)
//! and shared read-only by every request.

mod error;
mod write_header;

pub use error::FilterError;
pub use write_header::WriteHeaderFilter;

use crate::protocol::ResponseHead;
use crate::request::RequestContext;
use std::fmt;

/// A link of the header filter chain.
pub trait HeaderFilter: Send + Sync {
    /// Processes the response head and passes it on to the next filter.
    ///
    /// # Errors
    ///
    /// A [`FilterError`] stops the chain, the request then fails with
    /// [`FilterError::status`].
    fn filter(&self, req: &mut RequestContext<'_>, head: &mut ResponseHead) -> Result<(), FilterError>;
}

pub type BoxHeaderFilter = Box<dyn HeaderFilter>;

impl<F: HeaderFilter + ?Sized> HeaderFilter for Box<F> {
    #[inline]
    fn filter(&self, req: &mut RequestContext<'_>, head: &mut ResponseHead) -> Result<(), FilterError> {
        (**self).filter(req, head)
    }
}

/// The assembled chain, entered through its top filter.
pub struct HeaderFilterChain {
    top: BoxHeaderFilter,
}

impl HeaderFilterChain {
    pub fn new(top: BoxHeaderFilter) -> Self {
        Self { top }
    }

    /// Runs the whole chain for one response head.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] raised by any filter.
    pub fn run(&self, req: &mut RequestContext<'_>, head: &mut ResponseHead) -> Result<(), FilterError> {
        self.top.filter(req, head)
    }
}

impl Default for HeaderFilterChain {
    fn default() -> Self {
        Self::new(Box::new(WriteHeaderFilter))
    }
}

impl fmt::Debug for HeaderFilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderFilterChain").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::Location;
    use crate::protocol::RequestHeader;
    use http::{Extensions, HeaderValue, Request, Response};

    struct Tag<N> {
        value: &'static str,
        next: N,
    }

    impl<N: HeaderFilter> HeaderFilter for Tag<N> {
        fn filter(&self, req: &mut RequestContext<'_>, head: &mut ResponseHead) -> Result<(), FilterError> {
            head.headers_mut().append("x-tag", HeaderValue::from_static(self.value));
            self.next.filter(req, head)
        }
    }

    struct Fail;

    impl HeaderFilter for Fail {
        fn filter(&self, _req: &mut RequestContext<'_>, _head: &mut ResponseHead) -> Result<(), FilterError> {
            Err(FilterError::internal("fail_module", "always fails"))
        }
    }

    fn request() -> (RequestHeader, Location) {
        (RequestHeader::from(Request::get("/").body(()).unwrap()), Location::new(String::new(), 64, Extensions::new()))
    }

    #[test]
    fn filters_run_in_order_and_end_with_the_writer() {
        let (header, location) = request();
        let mut req = RequestContext::new(&header, &location);
        let mut head = Response::new(());

        let top = Tag { value: "outer", next: Tag { value: "inner", next: WriteHeaderFilter } };
        HeaderFilterChain::new(Box::new(top)).run(&mut req, &mut head).unwrap();

        let tags = head.headers().get_all("x-tag").iter().collect::<Vec<_>>();
        assert_eq!(tags, ["outer", "inner"]);
        assert_eq!(&req.output()[..], &b"HTTP/1.1 200 OK\r\nx-tag: outer\r\nx-tag: inner\r\n\r\n"[..]);
    }

    #[test]
    fn failure_stops_the_chain() {
        let (header, location) = request();
        let mut req = RequestContext::new(&header, &location);
        let mut head = Response::new(());

        let top = Tag { value: "outer", next: Fail };
        let err = HeaderFilterChain::new(Box::new(top)).run(&mut req, &mut head).unwrap_err();

        assert_eq!(err.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "fail_module: always fails");
        assert!(req.output().is_empty());
    }
}
