use crate::conf::{Conf, ConfError, Directive, Location, Locations};
use crate::module::Modules;
use http::Extensions;
use std::net::SocketAddr;
use tracing::debug;

/// Address the server listens on when no `listen` directive is given.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Request pool capacity when no `request_pool_size` directive is given.
pub const DEFAULT_POOL_SIZE: usize = 4 * 1024;

/// Largest accepted `request_pool_size`.
pub const MAX_POOL_SIZE: usize = 1024 * 1024;

/// The loaded server configuration: the listen address plus every location
/// merged with its parents.
#[derive(Debug, Clone)]
pub struct HttpConf {
    listen: SocketAddr,
    locations: Locations,
}

/// A configuration block before merging.
struct RawBlock {
    prefix: String,
    line: usize,
    pool_size: Option<usize>,
    confs: Extensions,
    children: Vec<RawBlock>,
}

impl HttpConf {
    /// Interprets `conf` against the registered `modules`.
    ///
    /// Host directives (`listen`, `request_pool_size`, `location`) are handled
    /// here, every other directive is offered to the modules.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfError`] met while reading a block or merging a location.
    pub fn load(conf: &Conf, modules: &Modules) -> Result<Self, ConfError> {
        let mut listen = None;
        let server = read_block(conf.directives(), modules, String::new(), 0, Some(&mut listen))?;

        let listen = match listen {
            Some(listen) => listen,
            None => DEFAULT_LISTEN.parse().map_err(|e| ConfError::invalid_value("listen", DEFAULT_LISTEN, e, 0))?,
        };

        let mut locations = vec![];
        let server = merge_block(&modules.create_loc_confs(), DEFAULT_POOL_SIZE, server, modules, &mut locations)?;
        debug!(%listen, locations = locations.len(), "loaded http configuration");

        Ok(Self { listen, locations: Locations::new(server, locations) })
    }

    pub fn listen(&self) -> SocketAddr {
        self.listen
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub fn into_locations(self) -> Locations {
        self.locations
    }
}

fn read_block(
    directives: &[Directive],
    modules: &Modules,
    prefix: String,
    line: usize,
    mut listen: Option<&mut Option<SocketAddr>>,
) -> Result<RawBlock, ConfError> {
    let mut block =
        RawBlock { prefix, line, pool_size: None, confs: modules.create_loc_confs(), children: vec![] };

    for directive in directives {
        let name = directive.name();
        let line = directive.line();

        if name == "location" {
            let [child_prefix] = directive.args() else {
                return Err(ConfError::invalid_args(name, line));
            };
            let Some(child_block) = directive.block() else {
                return Err(ConfError::MissingBlock { name: name.into(), line });
            };
            if !child_prefix.starts_with(block.prefix.as_str()) || !child_prefix.starts_with('/') {
                return Err(ConfError::OutsideLocation {
                    location: child_prefix.clone(),
                    parent: block.prefix.clone(),
                    line,
                });
            }
            let child = read_block(child_block, modules, child_prefix.clone(), line, None)?;
            block.children.push(child);
            continue;
        }

        if directive.block().is_some() {
            return Err(ConfError::UnexpectedToken { token: "{".into(), line });
        }

        match name {
            "listen" => {
                let Some(listen) = listen.as_deref_mut() else {
                    return Err(ConfError::NotAllowed { name: name.into(), line });
                };
                let [addr] = directive.args() else {
                    return Err(ConfError::invalid_args(name, line));
                };
                if listen.is_some() {
                    return Err(ConfError::Duplicate { name: name.into(), line });
                }
                *listen = Some(addr.parse().map_err(|e| ConfError::invalid_value(name, addr, e, line))?);
            }
            "request_pool_size" => {
                let [size] = directive.args() else {
                    return Err(ConfError::invalid_args(name, line));
                };
                if block.pool_size.is_some() {
                    return Err(ConfError::Duplicate { name: name.into(), line });
                }
                let pool_size = parse_size(size).ok_or_else(|| {
                    ConfError::invalid_value(name, size, "expected a size such as 512, 4k or 1m", line)
                })?;
                if pool_size > MAX_POOL_SIZE {
                    return Err(ConfError::invalid_value(name, size, "must not exceed 1m", line));
                }
                block.pool_size = Some(pool_size);
            }
            _ => match modules.set_directive(&mut block.confs, directive) {
                Some(result) => result?,
                None => return Err(ConfError::UnknownDirective { name: name.into(), line }),
            },
        }
    }

    Ok(block)
}

/// Merges `block` with its already merged parent and appends every nested
/// location to `locations`.
fn merge_block(
    parent: &Extensions,
    parent_pool_size: usize,
    block: RawBlock,
    modules: &Modules,
    locations: &mut Vec<Location>,
) -> Result<Location, ConfError> {
    let RawBlock { prefix, line, pool_size, mut confs, children } = block;

    let merged = modules.merge_loc_confs(parent, &mut confs).map_err(|e| e.in_location(&prefix))?;
    let pool_size = pool_size.unwrap_or(parent_pool_size);

    for child in children {
        if child.prefix == prefix || locations.iter().any(|location| location.prefix() == child.prefix) {
            return Err(ConfError::DuplicateLocation { location: child.prefix, line: child.line });
        }
        let location = merge_block(&confs, pool_size, child, modules, locations)?;
        debug!(location = location.prefix(), pool_size = location.pool_size(), parent = %prefix, line, "merged location");
        locations.push(location);
    }

    Ok(Location::new(prefix, pool_size, merged))
}

/// Parses sizes such as `512`, `4k` or `1m`.
fn parse_size(size: &str) -> Option<usize> {
    let (digits, unit) = match size.as_bytes().last()? {
        b'k' | b'K' => (&size[..size.len() - 1], 1024),
        b'm' | b'M' => (&size[..size.len() - 1], 1024 * 1024),
        _ => (size, 1),
    };
    digits.parse::<usize>().ok()?.checked_mul(unit)
}
