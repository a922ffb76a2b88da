use crate::conf::{ConfError, Directive};
use std::fmt;

/// A module directive and the slot of the location configuration it fills.
///
/// Slots are `Option`s: `None` means the directive was not set in this block,
/// so the value is inherited from the enclosing block when merging.
pub struct Command<C> {
    name: &'static str,
    slot: Slot<C>,
}

enum Slot<C> {
    Flag(fn(&mut C) -> &mut Option<bool>),
    Str(fn(&mut C) -> &mut Option<String>),
}

impl<C> Command<C> {
    /// A directive taking exactly one `on` or `off` argument.
    pub fn flag(name: &'static str, slot: fn(&mut C) -> &mut Option<bool>) -> Self {
        Self { name, slot: Slot::Flag(slot) }
    }

    /// A directive taking exactly one string argument.
    pub fn str(name: &'static str, slot: fn(&mut C) -> &mut Option<String>) -> Self {
        Self { name, slot: Slot::Str(slot) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies `directive` to `conf`.
    ///
    /// # Errors
    ///
    /// Fails if the directive has a block, does not have exactly one argument,
    /// was already set in the same block, or a flag is neither `on` nor `off`.
    pub fn set(&self, conf: &mut C, directive: &Directive) -> Result<(), ConfError> {
        let line = directive.line();
        if directive.block().is_some() {
            return Err(ConfError::UnexpectedToken { token: "{".into(), line });
        }

        let [value] = directive.args() else {
            return Err(ConfError::invalid_args(self.name, line));
        };

        match self.slot {
            Slot::Flag(slot) => {
                let slot = slot(conf);
                if slot.is_some() {
                    return Err(ConfError::Duplicate { name: self.name.into(), line });
                }
                *slot = Some(parse_flag(self.name, value, line)?);
            }
            Slot::Str(slot) => {
                let slot = slot(conf);
                if slot.is_some() {
                    return Err(ConfError::Duplicate { name: self.name.into(), line });
                }
                *slot = Some(value.clone());
            }
        }

        Ok(())
    }
}

impl<C> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.slot {
            Slot::Flag(_) => "flag",
            Slot::Str(_) => "str",
        };
        f.debug_struct("Command").field("name", &self.name).field("kind", &kind).finish()
    }
}

fn parse_flag(name: &str, value: &str, line: usize) -> Result<bool, ConfError> {
    if value.eq_ignore_ascii_case("on") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("off") {
        Ok(false)
    } else {
        Err(ConfError::InvalidFlag { name: name.into(), value: value.into(), line })
    }
}
