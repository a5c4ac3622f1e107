//! Parent-chain traversal: property merging, managed-version lookup, and
//! license inheritance.
//!
//! A parent chain is linear (each POM names at most one parent), so every
//! walk is an iterative loop over coordinates with a visited set for
//! cycle detection and the configured depth ceiling. Unavailable parents
//! end the walk silently.

use std::collections::{BTreeMap, HashSet};

use pomelo_core::coordinate::Coordinate;
use pomelo_maven::pom::Pom;

use crate::source::PomSource;

/// Copy properties from the parent chain rooted at `start` into `sink`.
///
/// Keys already present in the sink are never overwritten, so the
/// nearest declaration wins and the walk order cannot change the merged
/// result.
pub async fn merge_parent_properties(
    source: &PomSource<'_>,
    start: &Coordinate,
    sink: &mut BTreeMap<String, String>,
) {
    let mut visited: HashSet<Coordinate> = HashSet::new();
    let mut next = Some(start.clone());
    let mut depth = 0usize;

    while let Some(coord) = next.take() {
        if !visited.insert(coord.clone()) {
            break;
        }
        if source.depth_exceeded(depth) {
            tracing::debug!("parent walk for {coord} stopped at depth ceiling {depth}");
            break;
        }
        let Some(pom) = source.load(&coord).await else {
            break;
        };
        for (key, value) in &pom.properties {
            sink.entry(key.clone()).or_insert_with(|| value.clone());
        }
        next = pom.parent_coordinate();
        depth += 1;
    }
}

/// One-shot enrichment: a copy of the POM with the parent chain's
/// properties merged in. The POM's own keys always win.
pub async fn with_parent_properties(source: &PomSource<'_>, pom: &Pom) -> Pom {
    let Some(parent) = pom.parent_coordinate() else {
        return pom.clone();
    };
    let mut merged = BTreeMap::new();
    merge_parent_properties(source, &parent, &mut merged).await;

    let mut enriched = pom.clone();
    for (key, value) in merged {
        enriched.properties.entry(key).or_insert(value);
    }
    enriched
}

/// Find a managed version for `group:artifact`, searching the POM's own
/// `dependencyManagement` and then its ancestors. The nearest
/// declaration wins.
pub async fn find_managed_version(
    source: &PomSource<'_>,
    group_id: &str,
    artifact_id: &str,
    pom: &Pom,
) -> Option<String> {
    if let Some(version) = pom.managed_version(group_id, artifact_id) {
        return Some(version.to_string());
    }

    let mut visited: HashSet<Coordinate> = HashSet::new();
    if let Some(own) = pom.coordinate() {
        visited.insert(own);
    }
    let mut next = pom.parent_coordinate();
    let mut depth = 0usize;

    while let Some(coord) = next.take() {
        if !visited.insert(coord.clone()) {
            break;
        }
        if source.depth_exceeded(depth) {
            break;
        }
        let Some(parent) = source.load(&coord).await else {
            break;
        };
        if let Some(version) = parent.managed_version(group_id, artifact_id) {
            return Some(version.to_string());
        }
        next = parent.parent_coordinate();
        depth += 1;
    }
    None
}

/// License names from the first POM in the chain rooted at `start` that
/// declares a license block.
///
/// The walk inspects the starting coordinate's own POM before moving to
/// ancestors, matching Maven's observed license-inheritance behaviour.
pub async fn collect_licenses(source: &PomSource<'_>, start: &Coordinate) -> Vec<String> {
    let mut visited: HashSet<Coordinate> = HashSet::new();
    let mut next = Some(start.clone());
    let mut depth = 0usize;

    while let Some(coord) = next.take() {
        if !visited.insert(coord.clone()) {
            break;
        }
        if source.depth_exceeded(depth) {
            break;
        }
        let Some(pom) = source.load(&coord).await else {
            break;
        };
        if !pom.licenses.is_empty() {
            return pom
                .licenses
                .iter()
                .filter_map(|license| license.name.clone())
                .collect();
        }
        next = pom.parent_coordinate();
        depth += 1;
    }
    Vec::new()
}
