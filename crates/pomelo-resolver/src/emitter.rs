//! Package emission: one record per `<dependency>` in the effective POM.

use pomelo_core::coordinate::Coordinate;
use pomelo_core::license::License;
use pomelo_core::location::Location;
use pomelo_core::package::{maven_purl, Package, PomProperties};
use pomelo_maven::pom::{Pom, PomDependency};

use crate::properties::{is_resolved, resolve_value};
use crate::source::PomSource;
use crate::walker;

/// Emit one package per dependency, preserving declaration order.
///
/// Dependencies whose artifactId resolves to empty are skipped; every
/// other dependency produces a record, unresolved version or not.
pub async fn emit_packages(
    source: &PomSource<'_>,
    pom: &Pom,
    location: &Location,
) -> Vec<Package> {
    let mut packages = Vec::new();
    for dep in &pom.dependencies {
        if let Some(package) = package_from_dependency(source, pom, dep, location).await {
            packages.push(package);
        }
    }
    packages
}

async fn package_from_dependency(
    source: &PomSource<'_>,
    pom: &Pom,
    dep: &PomDependency,
    location: &Location,
) -> Option<Package> {
    let group_id = resolve_value(pom, &dep.group_id);
    let artifact_id = resolve_value(pom, &dep.artifact_id);
    if artifact_id.is_empty() {
        tracing::debug!("skipping dependency with empty artifactId in {location}");
        return None;
    }
    let scope = dep.scope.as_ref().map(|s| resolve_value(pom, s));

    let version = resolve_version(source, pom, dep, &group_id, &artifact_id).await;

    let mut licenses = Vec::new();
    if is_resolved(&version) {
        let coord = Coordinate::new(&group_id, &artifact_id, &version);
        if coord.is_complete() {
            for name in walker::collect_licenses(source, &coord).await {
                licenses.push(License::named(&name));
            }
        }
    } else {
        tracing::warn!("could not determine version for package {group_id}:{artifact_id}");
    }

    Some(Package {
        name: artifact_id.clone(),
        version: version.clone(),
        licenses,
        purl: maven_purl(&group_id, &artifact_id, &version),
        locations: vec![location.clone()],
        metadata: PomProperties {
            group_id,
            artifact_id,
            scope,
        },
    })
}

/// Resolve a dependency's version through every available channel.
///
/// Order: the declared value, then `dependencyManagement` up the parent
/// chain, then a parent-property merge for references the local
/// properties cannot satisfy. A version that still carries `${...}`
/// after all of that falls back to the source literal, verbatim.
async fn resolve_version(
    source: &PomSource<'_>,
    pom: &Pom,
    dep: &PomDependency,
    group_id: &str,
    artifact_id: &str,
) -> String {
    let mut literal = dep.version.clone().unwrap_or_default();
    let mut version = if literal.is_empty() {
        String::new()
    } else {
        resolve_value(pom, &literal)
    };

    if version.is_empty() {
        if let Some(managed) =
            walker::find_managed_version(source, group_id, artifact_id, pom).await
        {
            version = resolve_value(pom, &managed);
            literal = managed;
        }
    }

    if version.starts_with("${") {
        let enriched = walker::with_parent_properties(source, pom).await;
        version = resolve_value(&enriched, &version);
    }

    if version.contains("${") && !literal.is_empty() {
        return literal;
    }
    version
}
