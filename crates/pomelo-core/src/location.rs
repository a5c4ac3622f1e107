use std::io::Read;

use serde::{Deserialize, Serialize};

/// Where a catalogued file came from.
///
/// Opaque to the resolver; carried through to the emitted packages so
/// downstream SBOM serializers can report provenance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// Supplies files to catalogers.
///
/// Implementations locate files (on disk, inside a flattened container
/// image, ...) and hand out readers for them. The POM resolver only ever
/// reads; it never writes through this interface.
pub trait FileResolver {
    /// All locations whose path matches the glob `pattern`.
    fn files_by_glob(&self, pattern: &str) -> miette::Result<Vec<Location>>;

    /// Open a previously returned location for reading.
    fn open(&self, location: &Location) -> miette::Result<Box<dyn Read + Send>>;
}
