use serde::{Deserialize, Serialize};

/// A license attached to a project or package.
///
/// Either field may be empty, but never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl License {
    /// Build a license from raw name/url fields, returning `None` when both
    /// are empty.
    pub fn from_fields(name: &str, url: &str) -> Option<Self> {
        if name.is_empty() && url.is_empty() {
            return None;
        }
        Some(Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            url: (!url.is_empty()).then(|| url.to_string()),
        })
    }

    /// A license known only by name, as inherited from a parent POM.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields_rejects_empty_pair() {
        assert!(License::from_fields("", "").is_none());
    }

    #[test]
    fn from_fields_keeps_partial() {
        let lic = License::from_fields("Apache-2.0", "").unwrap();
        assert_eq!(lic.name.as_deref(), Some("Apache-2.0"));
        assert!(lic.url.is_none());

        let lic = License::from_fields("", "https://opensource.org/licenses/MIT").unwrap();
        assert!(lic.name.is_none());
        assert!(lic.url.is_some());
    }
}
