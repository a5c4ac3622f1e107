use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::license::License;
use crate::location::Location;

/// Metadata carried on every package emitted from a pom.xml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomProperties {
    pub group_id: String,
    pub artifact_id: String,
    pub scope: Option<String>,
}

/// A package record emitted by the POM resolver.
///
/// The version may be an unresolved `${...}` literal when resolution gave
/// up; it is preserved verbatim rather than fabricated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub licenses: Vec<License>,
    pub purl: String,
    pub locations: Vec<Location>,
    pub metadata: PomProperties,
}

/// Top-level descriptor for a catalogued pom.xml project, used by
/// downstream SBOM document assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomProject {
    pub path: String,
    pub coordinate: Coordinate,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub licenses: Vec<License>,
}

/// Build a `pkg:maven/{group}/{artifact}@{version}` package URL.
///
/// Each component is percent-encoded per the purl spec; `.` and `-` are
/// unreserved and pass through.
pub fn maven_purl(group_id: &str, artifact_id: &str, version: &str) -> String {
    format!(
        "pkg:maven/{}/{}@{}",
        urlencoding::encode(group_id),
        urlencoding::encode(artifact_id),
        urlencoding::encode(version),
    )
}
