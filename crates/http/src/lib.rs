//! A minimal HTTP/1.1 host runtime built around per-location modules and an
//! output header filter chain.
//!
//! The host owns everything a module needs but should not implement itself:
//!
//! - [`conf`]: the configuration file grammar, location tree and merging
//! - [`module`]: the [`HttpModule`](module::HttpModule) trait modules implement
//! - [`filter`]: the [`HeaderFilter`](filter::HeaderFilter) chain every response head passes through
//! - [`request`]: the per-request context and its memory [`pool`]
//! - [`codec`]: request head decoding and response head encoding
//! - [`server`]: the tokio TCP server
//!
//! # Example
//!
//! ```no_run
//! use microtime_http::conf::{Conf, HttpConf};
//! use microtime_http::module::Modules;
//! use microtime_http::server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let modules = Modules::new();
//!     let conf = HttpConf::load(&Conf::from_file("server.conf")?, &modules)?;
//!     Server::new(conf, &modules).start().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Limitations
//!
//! - HTTP/1.1 responses only, one request per connection
//! - Request bodies are never read
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod conf;
pub mod filter;
pub mod module;
pub mod pool;
pub mod protocol;
pub mod request;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
