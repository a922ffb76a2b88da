//! Adds a response header carrying the current epoch time with microseconds.
//!
//! The header exists for the registered RFC 5785 service described at
//! <http://phk.freebsd.dk/time/20151129.html>. With
//!
//! ```text
//! location /time {
//!     header_microtime on;
//!     header_microtime_name "X-Test-Time";
//! }
//! ```
//!
//! every response under `/time` carries `x-test-time: 1700000000.500000`,
//! seconds and zero-padded microseconds since the unix epoch.

pub mod clock;
pub mod conf;
pub mod error;
pub mod filter;
pub mod module;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock, Timeval};
pub use conf::{DEFAULT_HEADER_NAME, MicrotimeConf, MicrotimeLocConf};
pub use error::{ClockError, MicrotimeError};
pub use filter::MicrotimeHeaderFilter;
pub use module::MicrotimeModule;
pub use timestamp::MAX_TIMESTAMP_LEN;

use microtime_http::conf::{Conf, ConfError, HttpConf};
use microtime_http::module::Modules;
use microtime_http::server::Server;
use std::path::Path;

pub const MODULE_NAME: &str = "header_microtime_module";

/// Loads the configuration at `path` and builds a server running `module`.
///
/// # Errors
///
/// Returns the [`ConfError`] that made the configuration invalid.
pub fn load_server<P: AsRef<Path>>(path: P, module: MicrotimeModule) -> Result<Server, ConfError> {
    let conf = Conf::from_file(path)?;
    build_server(&conf, module)
}

/// Builds a server running `module` from an already parsed configuration.
///
/// # Errors
///
/// Returns the [`ConfError`] that made the configuration invalid.
pub fn build_server(conf: &Conf, module: MicrotimeModule) -> Result<Server, ConfError> {
    let mut modules = Modules::new();
    modules.register(module);

    let http_conf = HttpConf::load(conf, &modules)?;
    Ok(Server::new(http_conf, &modules))
}
