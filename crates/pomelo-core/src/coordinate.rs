use serde::{Deserialize, Serialize};

/// Maven coordinates uniquely identifying an artifact.
///
/// Equality is string-exact on all three components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        }
    }

    /// Parse `"group:artifact:version"` into a coordinate.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 3 {
            Some(Self::new(parts[0], parts[1], parts[2]))
        } else {
            None
        }
    }

    /// Whether all three components are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.group_id.is_empty() && !self.artifact_id.is_empty() && !self.version.is_empty()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_three_parts() {
        let coord = Coordinate::parse("org.example:lib:1.0.0").unwrap();
        assert_eq!(coord.group_id, "org.example");
        assert_eq!(coord.artifact_id, "lib");
        assert_eq!(coord.version, "1.0.0");
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert!(Coordinate::parse("org.example:lib").is_none());
        assert!(Coordinate::parse("a:b:c:d").is_none());
    }

    #[test]
    fn completeness() {
        assert!(Coordinate::new("g", "a", "1").is_complete());
        assert!(!Coordinate::new("", "a", "1").is_complete());
        assert!(!Coordinate::new("g", "a", "").is_complete());
    }

    #[test]
    fn display_round_trip() {
        let coord = Coordinate::new("org.example", "lib", "2.1");
        assert_eq!(Coordinate::parse(&coord.to_string()), Some(coord));
    }
}
