//! In-memory cache of parsed POMs for one cataloging run.

use std::collections::HashMap;
use std::sync::RwLock;

use pomelo_core::coordinate::Coordinate;

use crate::pom::Pom;

/// Memoizes parsed POMs by coordinate so parent chains shared between
/// projects are decoded and fetched once.
///
/// The cache is injected through the resolver's call graph; callers that
/// want run-wide sharing construct one at startup. Stores are
/// first-writer-wins so concurrent catalog invocations never diverge on
/// the same artifact.
#[derive(Debug, Default)]
pub struct PomCache {
    inner: RwLock<HashMap<Coordinate, Pom>>,
}

impl PomCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a copy of the cached POM for this coordinate, if present.
    pub fn lookup(&self, coord: &Coordinate) -> Option<Pom> {
        self.inner.read().expect("pom cache poisoned").get(coord).cloned()
    }

    /// Insert a parsed POM under its final coordinate.
    ///
    /// A second store for an existing coordinate is a no-op. Incomplete
    /// coordinates are never cached.
    pub fn store(&self, coord: Coordinate, pom: Pom) {
        if !coord.is_complete() {
            tracing::debug!("refusing to cache incomplete coordinate {coord}");
            return;
        }
        self.inner
            .write()
            .expect("pom cache poisoned")
            .entry(coord)
            .or_insert(pom);
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.inner.read().expect("pom cache poisoned").contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("pom cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
