//! Location configuration of the module.
//!
//! ```text
//! header_microtime on|off;              # default off
//! header_microtime_name "<string>";     # default X-HTTPSTIME
//! ```
//!
//! Both directives may appear at server level and in any location, nested
//! locations inherit what they don't set.

use http::HeaderName;
use microtime_http::conf::{Command, ConfError};

pub const DEFAULT_HEADER_NAME: &str = "X-HTTPSTIME";

pub const ENABLED_DIRECTIVE: &str = "header_microtime";
pub const NAME_DIRECTIVE: &str = "header_microtime_name";

/// Directive values of one configuration block, `None` when not set there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicrotimeLocConf {
    enabled: Option<bool>,
    name: Option<String>,
}

impl MicrotimeLocConf {
    pub fn new(enabled: Option<bool>, name: Option<String>) -> Self {
        Self { enabled, name }
    }

    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Resolved configuration of a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicrotimeConf {
    enabled: bool,
    name: HeaderName,
}

impl MicrotimeConf {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn name(&self) -> &HeaderName {
        &self.name
    }
}

pub(crate) fn commands() -> Vec<Command<MicrotimeLocConf>> {
    vec![
        Command::flag(ENABLED_DIRECTIVE, |conf| &mut conf.enabled),
        Command::str(NAME_DIRECTIVE, |conf| &mut conf.name),
    ]
}

/// Resolves `child` against `parent`: a value set in the child wins, then
/// the parent's, then the default (`off`, [`DEFAULT_HEADER_NAME`]).
///
/// `child` is left holding the resolved values.
///
/// # Errors
///
/// Fails if the resolved name is not a valid header name.
pub fn merge(parent: &MicrotimeLocConf, child: &mut MicrotimeLocConf) -> Result<MicrotimeConf, ConfError> {
    let enabled = *child.enabled.get_or_insert(parent.enabled.unwrap_or(false));
    let name = child.name.get_or_insert_with(|| parent.name.clone().unwrap_or_else(|| DEFAULT_HEADER_NAME.to_string()));

    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ConfError::merge(NAME_DIRECTIVE, format!("\"{name}\" is not a valid header name: {e}")))?;

    Ok(MicrotimeConf { enabled, name })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc_conf(enabled: Option<bool>, name: Option<&str>) -> MicrotimeLocConf {
        MicrotimeLocConf::new(enabled, name.map(ToString::to_string))
    }

    #[test]
    fn neither_set_is_off_with_default_name() {
        let mut child = MicrotimeLocConf::default();
        let conf = merge(&MicrotimeLocConf::default(), &mut child).unwrap();

        assert!(!conf.enabled());
        assert_eq!(conf.name(), "x-httpstime");
        assert_eq!(child, loc_conf(Some(false), Some(DEFAULT_HEADER_NAME)));
    }

    #[test]
    fn child_overrides_parent() {
        let mut child = loc_conf(Some(true), None);
        let conf = merge(&loc_conf(Some(false), None), &mut child).unwrap();
        assert!(conf.enabled());

        let mut child = loc_conf(Some(false), None);
        let conf = merge(&loc_conf(Some(true), None), &mut child).unwrap();
        assert!(!conf.enabled());
    }

    #[test]
    fn child_inherits_parent() {
        let mut child = MicrotimeLocConf::default();
        let conf = merge(&loc_conf(Some(true), Some("X-Parent-Time")), &mut child).unwrap();

        assert!(conf.enabled());
        assert_eq!(conf.name(), "x-parent-time");
        assert_eq!(child, loc_conf(Some(true), Some("X-Parent-Time")));
    }

    #[test]
    fn child_name_wins() {
        let mut child = loc_conf(None, Some("X-Test-Time"));
        let conf = merge(&loc_conf(Some(true), Some("X-Parent-Time")), &mut child).unwrap();
        assert_eq!(conf.name(), "x-test-time");
    }

    #[test]
    fn invalid_header_name() {
        let mut child = loc_conf(Some(true), Some("X Test Time"));
        let err = merge(&MicrotimeLocConf::default(), &mut child).unwrap_err();

        assert!(matches!(err, ConfError::Merge { .. }));
        assert!(err.to_string().starts_with(r#""header_microtime_name" could not be merged: "X Test Time" is not a valid header name"#));
    }
}
