//! The per-request state handed to every header filter.

use crate::conf::Location;
use crate::pool::RequestPool;
use crate::protocol::RequestHeader;
use bytes::BytesMut;

/// The context of one request.
///
/// It borrows the parsed request header and the location the request matched,
/// and owns the request pool and the output buffer. Dropping the context
/// releases every allocation made for the request.
#[derive(Debug)]
pub struct RequestContext<'req> {
    header: &'req RequestHeader,
    location: &'req Location,
    pool: RequestPool,
    output: BytesMut,
}

impl<'req> RequestContext<'req> {
    pub fn new(header: &'req RequestHeader, location: &'req Location) -> Self {
        Self { header, location, pool: RequestPool::new(location.pool_size()), output: BytesMut::new() }
    }

    pub fn request_header(&self) -> &RequestHeader {
        self.header
    }

    pub fn location(&self) -> &Location {
        self.location
    }

    /// The merged configuration of a module for the matched location.
    pub fn loc_conf<T: Send + Sync + 'static>(&self) -> Option<&'req T> {
        self.location.conf::<T>()
    }

    pub fn pool_mut(&mut self) -> &mut RequestPool {
        &mut self.pool
    }

    /// Bytes already serialized for the response.
    pub fn output(&self) -> &BytesMut {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut BytesMut {
        &mut self.output
    }

    pub fn into_output(self) -> BytesMut {
        self.output
    }
}
