//! Request scoped memory.

use bytes::BytesMut;
use std::mem;
use thiserror::Error;

use crate::ensure;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("request pool exhausted, requested {requested} bytes but only {remaining} remain")]
    Exhausted { requested: usize, remaining: usize },
}

/// A bounded arena owned by a single request.
///
/// Allocations are split off one buffer, so nothing is freed individually.
/// The buffer is only allocated on the first [`alloc`](Self::alloc), requests
/// that never allocate don't pay for it. Everything goes away when the owning
/// [`RequestContext`](crate::request::RequestContext) is dropped.
#[derive(Debug)]
pub struct RequestPool {
    size: usize,
    arena: Option<BytesMut>,
}

impl RequestPool {
    pub fn new(size: usize) -> Self {
        Self { size, arena: None }
    }

    /// Bytes still available for allocation.
    pub fn remaining(&self) -> usize {
        self.arena.as_ref().map_or(self.size, BytesMut::capacity)
    }

    /// Allocates an empty buffer with capacity `len`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] if fewer than `len` bytes remain.
    pub fn alloc(&mut self, len: usize) -> Result<BytesMut, PoolError> {
        let remaining = self.remaining();
        ensure!(len <= remaining, PoolError::Exhausted { requested: len, remaining });

        let size = self.size;
        let arena = self.arena.get_or_insert_with(|| BytesMut::with_capacity(size));
        let rest = arena.split_off(len);
        Ok(mem::replace(arena, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    #[test]
    fn alloc_until_exhausted() {
        let mut pool = RequestPool::new(64);

        let mut buf = pool.alloc(27).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 27);
        buf.put_slice(b"1700000000.000123");
        assert_eq!(pool.remaining(), 37);

        let buf = pool.alloc(37).unwrap();
        assert_eq!(buf.capacity(), 37);
        assert_eq!(pool.remaining(), 0);

        assert_eq!(pool.alloc(1), Err(PoolError::Exhausted { requested: 1, remaining: 0 }));
    }

    #[test]
    fn unused_pool_allocates_nothing() {
        let pool = RequestPool::new(usize::MAX);
        assert_eq!(pool.remaining(), usize::MAX);
        assert!(pool.arena.is_none());
    }

    #[test]
    fn empty_pool() {
        let mut pool = RequestPool::new(0);
        assert!(pool.alloc(0).is_ok());
        assert_eq!(pool.alloc(8), Err(PoolError::Exhausted { requested: 8, remaining: 0 }));
    }
}
