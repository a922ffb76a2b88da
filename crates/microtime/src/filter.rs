use crate::MODULE_NAME;
use crate::clock::Clock;
use crate::conf::MicrotimeConf;
use crate::error::MicrotimeError;
use crate::timestamp::{MAX_TIMESTAMP_LEN, format_timestamp};
use http::HeaderValue;
use microtime_http::filter::{BoxHeaderFilter, FilterError, HeaderFilter};
use microtime_http::protocol::ResponseHead;
use microtime_http::request::RequestContext;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Adds the current time as a header when the matched location enables it,
/// then always calls the next filter.
pub struct MicrotimeHeaderFilter {
    clock: Arc<dyn Clock>,
    next: BoxHeaderFilter,
}

impl MicrotimeHeaderFilter {
    pub fn new(clock: Arc<dyn Clock>, next: BoxHeaderFilter) -> Self {
        Self { clock, next }
    }

    fn add_header(
        &self,
        req: &mut RequestContext<'_>,
        head: &mut ResponseHead,
        conf: &MicrotimeConf,
    ) -> Result<(), MicrotimeError> {
        let mut value = req.pool_mut().alloc(MAX_TIMESTAMP_LEN)?;
        head.headers_mut().try_reserve(1)?;

        let now = self.clock.now().inspect_err(|e| {
            error!(module = MODULE_NAME, cause = %e, "failed to read the clock");
        })?;

        format_timestamp(now, &mut value).inspect_err(|e| {
            if let MicrotimeError::Format { written, capacity } = e {
                error!(module = MODULE_NAME, written, capacity, "failed to format the timestamp");
            }
        })?;

        let value = HeaderValue::from_maybe_shared(value.freeze())?;
        head.headers_mut().try_append(conf.name().clone(), value)?;

        debug!(
            module = MODULE_NAME,
            header = %conf.name(),
            path = req.request_header().path(),
            location = req.location().prefix(),
            "done"
        );
        Ok(())
    }
}

impl fmt::Debug for MicrotimeHeaderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicrotimeHeaderFilter").field("clock", &self.clock).finish_non_exhaustive()
    }
}

impl HeaderFilter for MicrotimeHeaderFilter {
    fn filter(&self, req: &mut RequestContext<'_>, head: &mut ResponseHead) -> Result<(), FilterError> {
        if let Some(conf) = req.loc_conf::<MicrotimeConf>().filter(|conf| conf.enabled()) {
            self.add_header(req, head, conf)?;
        }

        self.next.filter(req, head)
    }
}
