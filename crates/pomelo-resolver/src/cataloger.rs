//! The POM cataloger: drives a `FileResolver` over a scanned tree,
//! resolves every discovered pom.xml, and emits packages plus project
//! descriptors.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use pomelo_core::config::CatalogerConfig;
use pomelo_core::coordinate::Coordinate;
use pomelo_core::license::License;
use pomelo_core::location::{FileResolver, Location};
use pomelo_core::package::{Package, PomProject};
use pomelo_maven::cache::PomCache;
use pomelo_maven::pom::Pom;

use crate::emitter;
use crate::source::{read_location, PomSource};
use crate::walker;

/// Glob pattern matching POM files anywhere in the scanned tree.
pub const POM_GLOB: &str = "**/pom.xml";

/// Everything one catalog run produces.
#[derive(Debug, Default, serde::Serialize)]
pub struct CatalogResult {
    pub packages: Vec<Package>,
    pub projects: Vec<PomProject>,
}

/// Catalog every pom.xml the file resolver can find.
///
/// Each POM is resolved independently; a POM that fails to decode is
/// logged and skipped without affecting the rest of the run. The cache
/// is shared across the run (and across runs, if the caller reuses it).
pub async fn catalog(
    files: &dyn FileResolver,
    config: &CatalogerConfig,
    cache: &PomCache,
    cancel: CancellationToken,
) -> miette::Result<CatalogResult> {
    log_configuration(config);
    if config.use_maven {
        tracing::warn!(
            "use-maven is set but requires an external mvn binary; \
             continuing with textual resolution"
        );
    }

    let locations = files.files_by_glob(POM_GLOB)?;
    tracing::debug!("found {} pom.xml files", locations.len());

    // First pass: decode everything in the tree so parent lookups hit
    // the scanned POMs before the network.
    let mut parsed: Vec<(Location, Pom)> = Vec::new();
    let mut disk: HashMap<Coordinate, Location> = HashMap::new();
    for location in locations {
        match read_location(files, &location) {
            Ok(pom) => {
                if let Some(coord) = pom.coordinate() {
                    cache.store(coord.clone(), pom.clone());
                    disk.entry(coord).or_insert_with(|| location.clone());
                }
                parsed.push((location, pom));
            }
            Err(err) => {
                tracing::warn!("skipping {location}: {err}");
            }
        }
    }

    let mut source = PomSource::new(cache)
        .with_files(files, disk)
        .with_max_depth(config.max_parent_recursive_depth);
    if config.use_network {
        source = source.with_remote(config, cancel)?;
    }

    let mut result = CatalogResult::default();
    for (location, pom) in &parsed {
        let effective = walker::with_parent_properties(&source, pom).await;
        let packages = emitter::emit_packages(&source, &effective, location).await;
        for package in &packages {
            if package.version.is_empty() || package.version.starts_with("${") {
                tracing::info!(
                    "found artifact without version: {}:{}, version: {:?}",
                    package.metadata.group_id,
                    package.name,
                    package.version
                );
            }
        }
        result.packages.extend(packages);
        if let Some(project) = project_descriptor(location, &effective) {
            result.projects.push(project);
        }
    }

    Ok(result)
}

fn project_descriptor(location: &Location, pom: &Pom) -> Option<PomProject> {
    let coordinate = pom.coordinate()?;
    Some(PomProject {
        path: location.path.clone(),
        coordinate,
        name: pom.name.clone(),
        description: pom
            .description
            .as_deref()
            .map(clean_description)
            .filter(|d| !d.is_empty()),
        url: pom.url.clone(),
        licenses: pom
            .licenses
            .iter()
            .filter_map(|license| {
                License::from_fields(
                    license.name.as_deref().unwrap_or(""),
                    license.url.as_deref().unwrap_or(""),
                )
            })
            .collect(),
    })
}

/// Collapse a multi-line `<description>` into single-spaced text.
fn clean_description(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn log_configuration(config: &CatalogerConfig) {
    match toml::to_string(config) {
        Ok(rendered) => tracing::debug!("cataloger config:\n{}", rendered.trim_end()),
        Err(err) => tracing::debug!("cataloger config unavailable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_description_collapses_whitespace() {
        let raw = "  A long description\n\n   spread over\n  several lines.  \n";
        assert_eq!(
            clean_description(raw),
            "A long description spread over several lines."
        );
    }

    #[test]
    fn clean_description_empty_input() {
        assert_eq!(clean_description("\n  \n"), "");
    }
}
