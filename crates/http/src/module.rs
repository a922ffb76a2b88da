//! Module registration.
//!
//! A module contributes configuration directives, a create/merge pair for its
//! per-location configuration, and optionally a header filter. Modules are
//! registered before the configuration is loaded so their directives can be
//! recognized.

use crate::conf::{Command, ConfError, Directive};
use crate::filter::{BoxHeaderFilter, HeaderFilterChain, WriteHeaderFilter};
use http::Extensions;
use std::fmt;
use tracing::debug;

/// A module of the host.
pub trait HttpModule: Send + Sync + 'static {
    /// Per-block configuration as filled in by directives, every field unset by default.
    type LocConf: Clone + Send + Sync + 'static;

    /// Configuration after merging with the enclosing blocks, read at request time.
    type Conf: Clone + Send + Sync + 'static;

    const NAME: &'static str;

    /// The directives this module understands.
    fn commands(&self) -> Vec<Command<Self::LocConf>>;

    fn create_loc_conf(&self) -> Self::LocConf;

    /// Resolves `child` against its already merged `parent`.
    ///
    /// `child` must be left holding the resolved values so nested locations
    /// inherit them.
    ///
    /// # Errors
    ///
    /// A [`ConfError`] aborts the configuration load.
    fn merge_loc_conf(&self, parent: &Self::LocConf, child: &mut Self::LocConf) -> Result<Self::Conf, ConfError>;

    /// Installs this module's header filter in front of `next`.
    ///
    /// The returned filter must call `next` once it is done.
    fn header_filter(&self, next: BoxHeaderFilter) -> BoxHeaderFilter {
        next
    }
}

/// Object safe view of a [`HttpModule`], storing its configuration in [`Extensions`].
trait ErasedModule: Send + Sync {
    fn name(&self) -> &'static str;

    fn create_in(&self, confs: &mut Extensions);

    fn set_directive(&self, confs: &mut Extensions, directive: &Directive) -> Option<Result<(), ConfError>>;

    fn merge_into(&self, parent: &Extensions, child: &mut Extensions, merged: &mut Extensions) -> Result<(), ConfError>;

    fn install_header_filter(&self, next: BoxHeaderFilter) -> BoxHeaderFilter;
}

impl<M: HttpModule> ErasedModule for M {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn create_in(&self, confs: &mut Extensions) {
        confs.insert(self.create_loc_conf());
    }

    fn set_directive(&self, confs: &mut Extensions, directive: &Directive) -> Option<Result<(), ConfError>> {
        let command = self.commands().into_iter().find(|command| command.name() == directive.name())?;

        if confs.get::<M::LocConf>().is_none() {
            self.create_in(confs);
        }
        let conf = confs.get_mut::<M::LocConf>()?;
        Some(command.set(conf, directive))
    }

    fn merge_into(&self, parent: &Extensions, child: &mut Extensions, merged: &mut Extensions) -> Result<(), ConfError> {
        let parent = parent.get::<M::LocConf>().cloned().unwrap_or_else(|| self.create_loc_conf());

        if child.get::<M::LocConf>().is_none() {
            self.create_in(child);
        }
        let Some(child) = child.get_mut::<M::LocConf>() else {
            return Ok(());
        };

        merged.insert(self.merge_loc_conf(&parent, child)?);
        Ok(())
    }

    fn install_header_filter(&self, next: BoxHeaderFilter) -> BoxHeaderFilter {
        self.header_filter(next)
    }
}

/// The registered modules, in registration order.
#[derive(Default)]
pub struct Modules {
    modules: Vec<Box<dyn ErasedModule>>,
}

impl Modules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<M: HttpModule>(&mut self, module: M) -> &mut Self {
        debug!(module = M::NAME, "register module");
        self.modules.push(Box::new(module));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().map(|module| module.name())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// A fresh, unset configuration of every module.
    pub(crate) fn create_loc_confs(&self) -> Extensions {
        let mut confs = Extensions::new();
        for module in &self.modules {
            module.create_in(&mut confs);
        }
        confs
    }

    /// Offers `directive` to the modules, `None` if no module knows it.
    pub(crate) fn set_directive(&self, confs: &mut Extensions, directive: &Directive) -> Option<Result<(), ConfError>> {
        self.modules.iter().find_map(|module| module.set_directive(confs, directive))
    }

    pub(crate) fn merge_loc_confs(&self, parent: &Extensions, child: &mut Extensions) -> Result<Extensions, ConfError> {
        let mut merged = Extensions::new();
        for module in &self.modules {
            module.merge_into(parent, child, &mut merged)?;
        }
        Ok(merged)
    }

    /// Builds the header filter chain.
    ///
    /// Each module installs its filter in front of the filters installed before
    /// it, so the last registered module runs first and [`WriteHeaderFilter`]
    /// always runs last.
    pub fn header_filter_chain(&self) -> HeaderFilterChain {
        let top = self
            .modules
            .iter()
            .fold(Box::new(WriteHeaderFilter) as BoxHeaderFilter, |next, module| module.install_header_filter(next));
        HeaderFilterChain::new(top)
    }
}

impl fmt::Debug for Modules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
