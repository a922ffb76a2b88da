//! Formatting of the header value into a fixed size buffer.

use crate::clock::Timeval;
use crate::error::MicrotimeError;
use bytes::{BufMut, BytesMut};
use std::fmt::{self, Write};

/// Capacity reserved for a header value.
///
/// The widest unsigned 64 bit seconds count with 6 fraction digits. A signed
/// count including its sign never needs more.
pub const MAX_TIMESTAMP_LEN: usize = "18446744073709551614.999999".len();

/// Writes `now` into `buf` without ever growing it past its capacity.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`MicrotimeError::Format`] with the length the full value needed if
/// it does not fit in the capacity of `buf`.
pub fn format_timestamp(now: Timeval, buf: &mut BytesMut) -> Result<usize, MicrotimeError> {
    let capacity = buf.capacity() - buf.len();
    let mut writer = BoundedWriter { buf, capacity, written: 0 };

    write!(writer, "{now}").map_err(|_| MicrotimeError::Format { written: writer.written, capacity })?;

    let written = writer.written;
    if written > capacity {
        return Err(MicrotimeError::Format { written, capacity });
    }
    Ok(written)
}

/// Counts everything written but only keeps what fits.
struct BoundedWriter<'a> {
    buf: &'a mut BytesMut,
    capacity: usize,
    written: usize,
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.written += s.len();
        if self.written <= self.capacity {
            self.buf.put_slice(s.as_bytes());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(secs: i64, micros: u32, capacity: usize) -> (Result<usize, MicrotimeError>, BytesMut) {
        let mut buf = BytesMut::with_capacity(capacity);
        let result = format_timestamp(Timeval::new(secs, micros).unwrap(), &mut buf);
        (result, buf)
    }

    #[test]
    fn format_fits() {
        let (result, buf) = format(1_700_000_000, 123, MAX_TIMESTAMP_LEN);
        assert_eq!(result.unwrap(), 17);
        assert_eq!(&buf[..], b"1700000000.000123");
    }

    #[test]
    fn widest_values_fit() {
        let (result, buf) = format(i64::MAX, 999_999, MAX_TIMESTAMP_LEN);
        assert_eq!(result.unwrap(), buf.len());
        assert_eq!(&buf[..], b"9223372036854775807.999999");

        let (result, buf) = format(i64::MIN, 999_999, MAX_TIMESTAMP_LEN);
        assert_eq!(result.unwrap(), MAX_TIMESTAMP_LEN);
        assert_eq!(&buf[..], b"-9223372036854775808.999999");
    }

    #[test]
    fn exact_capacity_is_accepted() {
        let (result, buf) = format(1_700_000_000, 500_000, 17);
        assert_eq!(result.unwrap(), 17);
        assert_eq!(buf.capacity(), 17);
    }

    #[test]
    fn overflow_reports_needed_length() {
        let (result, _) = format(1_700_000_000, 500_000, 16);
        assert!(matches!(result, Err(MicrotimeError::Format { written: 17, capacity: 16 })));
    }
}
