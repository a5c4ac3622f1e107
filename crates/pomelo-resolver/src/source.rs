//! Where POMs come from during resolution: the shared cache, then the
//! scanned tree, then (optionally) the remote repository.

use std::collections::HashMap;
use std::io::Read;
use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use pomelo_core::config::CatalogerConfig;
use pomelo_core::coordinate::Coordinate;
use pomelo_core::location::{FileResolver, Location};
use pomelo_maven::cache::PomCache;
use pomelo_maven::decode;
use pomelo_maven::fetch;
use pomelo_maven::pom::Pom;
use pomelo_maven::repository::MavenRepository;
use pomelo_util::errors::PomeloError;

/// Layered POM lookup used by the parent walker and the emitter.
///
/// Every POM obtained here lands in the cache keyed by its final
/// coordinate, so repeated walks over shared parent chains hit memory.
pub struct PomSource<'a> {
    cache: &'a PomCache,
    disk: HashMap<Coordinate, Location>,
    files: Option<&'a dyn FileResolver>,
    remote: Option<RemoteRepo>,
    max_depth: i32,
}

struct RemoteRepo {
    client: Client,
    repo: MavenRepository,
    retries: u32,
    cancel: CancellationToken,
}

impl<'a> PomSource<'a> {
    /// A source that only consults the cache.
    pub fn new(cache: &'a PomCache) -> Self {
        Self {
            cache,
            disk: HashMap::new(),
            files: None,
            remote: None,
            max_depth: 0,
        }
    }

    /// Attach the scanned tree: an index from coordinate to on-disk
    /// location, readable through `files`.
    pub fn with_files(
        mut self,
        files: &'a dyn FileResolver,
        disk: HashMap<Coordinate, Location>,
    ) -> Self {
        self.files = Some(files);
        self.disk = disk;
        self
    }

    /// Enable remote fetching per the configuration.
    pub fn with_remote(
        mut self,
        config: &CatalogerConfig,
        cancel: CancellationToken,
    ) -> miette::Result<Self> {
        let client = fetch::build_client(Duration::from_secs(config.fetch_timeout_secs))?;
        self.remote = Some(RemoteRepo {
            client,
            repo: MavenRepository::new(&config.maven_url),
            retries: config.fetch_retries,
            cancel,
        });
        Ok(self)
    }

    /// Cap parent-chain walks. Zero or negative means unbounded.
    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a walk that has already loaded `depth` ancestors must stop.
    pub(crate) fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_depth > 0 && depth >= self.max_depth as usize
    }

    /// Load the POM for a coordinate.
    ///
    /// All failures are non-fatal: they are logged and `None` is
    /// returned, which callers treat as "unavailable".
    pub async fn load(&self, coord: &Coordinate) -> Option<Pom> {
        if let Some(pom) = self.cache.lookup(coord) {
            return Some(pom);
        }

        if let (Some(location), Some(files)) = (self.disk.get(coord), self.files) {
            match read_location(files, location) {
                Ok(pom) => {
                    if let Some(own) = pom.coordinate() {
                        self.cache.store(own, pom.clone());
                    }
                    return Some(pom);
                }
                Err(err) => tracing::warn!("failed to re-read {location}: {err}"),
            }
        }

        if let Some(remote) = &self.remote {
            match fetch::fetch_pom_bytes(
                &remote.client,
                &remote.repo,
                coord,
                remote.retries,
                &remote.cancel,
            )
            .await
            {
                Ok(Some(bytes)) => match decode::decode_pom(&bytes) {
                    Ok(pom) => {
                        if let Some(own) = pom.coordinate() {
                            self.cache.store(own, pom.clone());
                        }
                        return Some(pom);
                    }
                    Err(err) => tracing::warn!("fetched POM {coord} is unusable: {err}"),
                },
                Ok(None) => tracing::debug!("POM {coord} not found in remote repository"),
                Err(err) => tracing::warn!("fetch failed for {coord}: {err}"),
            }
        }

        None
    }
}

/// Read and decode a POM at a location supplied by the file resolver.
pub(crate) fn read_location(files: &dyn FileResolver, location: &Location) -> miette::Result<Pom> {
    let mut reader = files.open(location)?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(PomeloError::Io)?;
    decode::decode_pom(&bytes)
}
