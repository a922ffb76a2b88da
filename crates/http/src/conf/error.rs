use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, parsing or merging the configuration.
///
/// Every variant is fatal: a configuration that fails to load never reaches
/// request time.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("failed to read \"{}\": {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("unexpected \"{token}\" in line {line}")]
    UnexpectedToken { token: String, line: usize },

    #[error("unexpected end of file, expecting {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("unknown directive \"{name}\" in line {line}")]
    UnknownDirective { name: String, line: usize },

    #[error("invalid number of arguments in \"{name}\" directive in line {line}")]
    InvalidArgs { name: String, line: usize },

    #[error("directive \"{name}\" has no opening \"{{\" in line {line}")]
    MissingBlock { name: String, line: usize },

    #[error("\"{name}\" directive is duplicate in line {line}")]
    Duplicate { name: String, line: usize },

    #[error("\"{name}\" directive is not allowed here in line {line}")]
    NotAllowed { name: String, line: usize },

    #[error("\"{name}\" ought to be \"on\" or \"off\", not \"{value}\" in line {line}")]
    InvalidFlag { name: String, value: String, line: usize },

    #[error("invalid value \"{value}\" in \"{name}\" directive in line {line}: {reason}")]
    InvalidValue { name: String, value: String, reason: String, line: usize },

    #[error("location \"{location}\" is outside location \"{parent}\" in line {line}")]
    OutsideLocation { location: String, parent: String, line: usize },

    #[error("duplicate location \"{location}\" in line {line}")]
    DuplicateLocation { location: String, line: usize },

    #[error("\"{name}\" could not be merged: {reason}")]
    Merge { name: String, reason: String },

    #[error("in location \"{location}\": {source}")]
    InLocation {
        location: String,
        #[source]
        source: Box<ConfError>,
    },
}

impl ConfError {
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn invalid_args<S: ToString>(name: S, line: usize) -> Self {
        Self::InvalidArgs { name: name.to_string(), line }
    }

    pub fn invalid_value<N: ToString, V: ToString, R: ToString>(name: N, value: V, reason: R, line: usize) -> Self {
        Self::InvalidValue { name: name.to_string(), value: value.to_string(), reason: reason.to_string(), line }
    }

    pub fn merge<N: ToString, R: ToString>(name: N, reason: R) -> Self {
        Self::Merge { name: name.to_string(), reason: reason.to_string() }
    }

    pub(crate) fn in_location<S: ToString>(self, location: S) -> Self {
        Self::InLocation { location: location.to_string(), source: Box::new(self) }
    }
}
