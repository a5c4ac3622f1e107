use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maven Central base URL, the default remote repository.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// Cataloger configuration, loaded from `pomelo.toml`.
///
/// Network use is opt-in: with `use-network = false` (the default) the
/// resolver never leaves the scanned tree and treats every remote parent
/// as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogerConfig {
    /// Allow fetching parent POMs from the remote repository.
    #[serde(default, rename = "use-network")]
    pub use_network: bool,

    /// Use a local `mvn` binary when present. Recognised but the shell-out
    /// itself is handled outside the textual resolver.
    #[serde(default, rename = "use-maven")]
    pub use_maven: bool,

    /// Base URL of the remote Maven repository.
    #[serde(default = "default_maven_url", rename = "maven-url")]
    pub maven_url: String,

    /// Hard ceiling on parent-walk depth. Zero or negative means unbounded.
    #[serde(default = "default_max_depth", rename = "max-parent-recursive-depth")]
    pub max_parent_recursive_depth: i32,

    /// Per-request timeout for remote fetches, in seconds.
    #[serde(default = "default_fetch_timeout", rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Number of attempts for a remote fetch before giving up.
    #[serde(default = "default_fetch_retries", rename = "fetch-retries")]
    pub fetch_retries: u32,
}

fn default_maven_url() -> String {
    MAVEN_CENTRAL_URL.to_string()
}

fn default_max_depth() -> i32 {
    5
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_fetch_retries() -> u32 {
    3
}

impl Default for CatalogerConfig {
    fn default() -> Self {
        Self {
            use_network: false,
            use_maven: false,
            maven_url: default_maven_url(),
            max_parent_recursive_depth: default_max_depth(),
            fetch_timeout_secs: default_fetch_timeout(),
            fetch_retries: default_fetch_retries(),
        }
    }
}

impl CatalogerConfig {
    /// Load configuration from a TOML file, or return defaults if the file
    /// doesn't exist.
    pub fn load(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            pomelo_util::errors::PomeloError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            pomelo_util::errors::PomeloError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Default config file path in the current directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("pomelo.toml")
    }

    /// Whether the parent walk depth is uncapped.
    pub fn depth_unbounded(&self) -> bool {
        self.max_parent_recursive_depth <= 0
    }
}
