use crate::MODULE_NAME;
use crate::clock::{Clock, SystemClock};
use crate::conf::{self, MicrotimeConf, MicrotimeLocConf};
use crate::filter::MicrotimeHeaderFilter;
use microtime_http::conf::{Command, ConfError};
use microtime_http::filter::BoxHeaderFilter;
use microtime_http::module::HttpModule;
use std::sync::Arc;

/// The module registering the `header_microtime` directives and header filter.
#[derive(Debug, Clone)]
pub struct MicrotimeModule {
    clock: Arc<dyn Clock>,
}

impl MicrotimeModule {
    /// A module reading the system wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock<C: Clock>(clock: C) -> Self {
        Self { clock: Arc::new(clock) }
    }
}

impl Default for MicrotimeModule {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpModule for MicrotimeModule {
    type LocConf = MicrotimeLocConf;
    type Conf = MicrotimeConf;

    const NAME: &'static str = MODULE_NAME;

    fn commands(&self) -> Vec<Command<Self::LocConf>> {
        conf::commands()
    }

    fn create_loc_conf(&self) -> Self::LocConf {
        MicrotimeLocConf::default()
    }

    fn merge_loc_conf(&self, parent: &Self::LocConf, child: &mut Self::LocConf) -> Result<Self::Conf, ConfError> {
        conf::merge(parent, child)
    }

    fn header_filter(&self, next: BoxHeaderFilter) -> BoxHeaderFilter {
        Box::new(MicrotimeHeaderFilter::new(Arc::clone(&self.clock), next))
    }
}
