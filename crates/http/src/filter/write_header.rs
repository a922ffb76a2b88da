use crate::codec::HeaderEncoder;
use crate::filter::{FilterError, HeaderFilter};
use crate::protocol::ResponseHead;
use crate::request::RequestContext;
use tokio_util::codec::Encoder;
use tracing::trace;

/// The last filter of every chain: serializes the head into the request output.
#[derive(Debug, Default, Clone, Copy)]
pub struct WriteHeaderFilter;

impl HeaderFilter for WriteHeaderFilter {
    fn filter(&self, req: &mut RequestContext<'_>, head: &mut ResponseHead) -> Result<(), FilterError> {
        HeaderEncoder.encode(&*head, req.output_mut())?;
        trace!(status = head.status().as_u16(), size = req.output().len(), "wrote response header");
        Ok(())
    }
}
