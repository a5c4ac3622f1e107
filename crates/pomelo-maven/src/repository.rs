//! Maven repository abstraction: URL layout for POM files.

use pomelo_core::config::MAVEN_CENTRAL_URL;
use pomelo_core::coordinate::Coordinate;

/// A remote Maven repository addressed by its base URL.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub url: String,
}

impl MavenRepository {
    /// Build a repository from a base URL, normalizing trailing slashes.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self::new(MAVEN_CENTRAL_URL)
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `org.example:my-lib:1.2.3` becomes `org/example/my-lib/1.2.3`
    pub fn coordinate_path(coord: &Coordinate) -> String {
        format!(
            "{}/{}/{}",
            coord.group_id.replace('.', "/"),
            coord.artifact_id,
            coord.version
        )
    }

    /// URL to the POM file for a given coordinate.
    pub fn pom_url(&self, coord: &Coordinate) -> String {
        format!(
            "{}/{}/{}-{}.pom",
            self.url,
            Self::coordinate_path(coord),
            coord.artifact_id,
            coord.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_path_replaces_dots() {
        let coord = Coordinate::new("org.apache.commons", "commons-lang3", "3.14.0");
        assert_eq!(
            MavenRepository::coordinate_path(&coord),
            "org/apache/commons/commons-lang3/3.14.0"
        );
    }

    #[test]
    fn pom_url_format() {
        let repo = MavenRepository::maven_central();
        let coord = Coordinate::new("org.apache.commons", "commons-lang3", "3.14.0");
        assert_eq!(
            repo.pom_url(&coord),
            "https://repo.maven.apache.org/maven2/org/apache/commons/commons-lang3/3.14.0/commons-lang3-3.14.0.pom"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let repo = MavenRepository::new("https://repo.example.com/maven/");
        assert_eq!(repo.url, "https://repo.example.com/maven");
    }
}
