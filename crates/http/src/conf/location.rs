use http::Extensions;

/// A merged location: its path prefix, host settings and the merged
/// configuration of every registered module.
#[derive(Debug, Clone)]
pub struct Location {
    prefix: String,
    pool_size: usize,
    confs: Extensions,
}

impl Location {
    pub(crate) fn new(prefix: String, pool_size: usize, confs: Extensions) -> Self {
        Self { prefix, pool_size, confs }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Capacity of the memory pool created for each request in this location.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// The merged configuration a module produced for this location.
    pub fn conf<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.confs.get::<T>()
    }
}

/// All merged locations of a server.
///
/// Lookup picks the location with the longest prefix matching the request
/// path and falls back to the server level configuration.
#[derive(Debug, Clone)]
pub struct Locations {
    server: Location,
    // longest prefix first
    locations: Vec<Location>,
}

impl Locations {
    pub(crate) fn new(server: Location, mut locations: Vec<Location>) -> Self {
        locations.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { server, locations }
    }

    pub fn server(&self) -> &Location {
        &self.server
    }

    pub fn find(&self, path: &str) -> &Location {
        self.locations.iter().find(|location| path.starts_with(location.prefix.as_str())).unwrap_or(&self.server)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
