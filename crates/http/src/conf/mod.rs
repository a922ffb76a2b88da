//! Configuration file handling.
//!
//! The host reads an nginx-like configuration file made of directives. A
//! directive is a name followed by arguments, terminated either by `;` or by
//! a `{ ... }` block of nested directives:
//!
//! ```text
//! listen 127.0.0.1:8080;
//! header_microtime off;
//!
//! location /api {
//!     header_microtime on;
//!     header_microtime_name "X-Test-Time";
//! }
//! ```
//!
//! [`Conf`] is the parsed but uninterpreted file. [`HttpConf::load`] walks it,
//! hands module directives to the registered [`HttpModule`](crate::module::HttpModule)s
//! and merges every location with its parent.

mod command;
mod error;
mod http_conf;
mod location;
mod parser;

pub use command::Command;
pub use error::ConfError;
pub use http_conf::{DEFAULT_LISTEN, DEFAULT_POOL_SIZE, HttpConf, MAX_POOL_SIZE};
pub use location::{Location, Locations};

use std::path::Path;
use tracing::debug;

/// A single parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    name: String,
    args: Vec<String>,
    line: usize,
    block: Option<Vec<Directive>>,
}

impl Directive {
    pub fn new(name: String, args: Vec<String>, line: usize, block: Option<Vec<Directive>>) -> Self {
        Self { name, args, line, block }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The line of the configuration source the directive starts on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The nested directives, if the directive opened a block.
    pub fn block(&self) -> Option<&[Directive]> {
        self.block.as_deref()
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conf {
    directives: Vec<Directive>,
}

impl Conf {
    /// Parses configuration source text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfError`] on any syntax error.
    pub fn parse(src: &str) -> Result<Self, ConfError> {
        let directives = parser::parse(src)?;
        Ok(Self { directives })
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfError`] if the file can't be read or has a syntax error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| ConfError::io(path, e))?;
        debug!(path = %path.display(), "read configuration file");
        Self::parse(&src)
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}
