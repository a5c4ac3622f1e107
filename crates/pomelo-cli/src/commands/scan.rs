//! Command: scan a directory tree and catalog every pom.xml.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use pomelo_core::config::CatalogerConfig;
use pomelo_maven::cache::PomCache;
use pomelo_resolver::cataloger;
use pomelo_util::errors::PomeloError;
use pomelo_util::progress::{spinner, status, status_warn};

use crate::fs_resolver::DirectoryResolver;

#[allow(clippy::too_many_arguments)]
pub async fn exec(
    root: &Path,
    format: &str,
    use_network: bool,
    maven_url: Option<&str>,
    max_parent_depth: Option<i32>,
    config_path: Option<&Path>,
    verbose: bool,
) -> miette::Result<()> {
    if !root.is_dir() {
        return Err(PomeloError::Generic {
            message: format!("Not a directory: {}", root.display()),
        }
        .into());
    }

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(CatalogerConfig::default_path);
    let mut config = CatalogerConfig::load(&path)?;

    // Flags override the config file.
    if use_network {
        config.use_network = true;
    }
    if let Some(url) = maven_url {
        config.maven_url = url.to_string();
    }
    if let Some(depth) = max_parent_depth {
        config.max_parent_recursive_depth = depth;
    }

    let resolver = DirectoryResolver::new(root);
    let cache = PomCache::new();

    let sp = spinner(&format!("Scanning {}...", root.display()));
    let result = cataloger::catalog(&resolver, &config, &cache, CancellationToken::new()).await?;
    sp.finish_and_clear();

    match format {
        "json" => {
            let rendered =
                serde_json::to_string_pretty(&result).map_err(|e| PomeloError::Generic {
                    message: format!("Failed to serialize result: {e}"),
                })?;
            println!("{rendered}");
        }
        "text" => {
            for package in &result.packages {
                if verbose {
                    let scope = package.metadata.scope.as_deref().unwrap_or("compile");
                    println!(
                        "{}:{} {} ({scope}) {}",
                        package.metadata.group_id, package.name, package.version, package.purl
                    );
                } else {
                    println!("{} {} {}", package.name, package.version, package.purl);
                }
            }
        }
        other => {
            return Err(PomeloError::Generic {
                message: format!("Unknown output format '{other}' (expected text or json)"),
            }
            .into());
        }
    }

    let unresolved = result
        .packages
        .iter()
        .filter(|p| p.version.is_empty() || p.version.starts_with("${"))
        .count();
    if unresolved > 0 {
        status_warn(
            "Warning",
            &format!("{unresolved} package(s) have unresolved versions"),
        );
    }

    status(
        "Cataloged",
        &format!(
            "{} packages from {} projects",
            result.packages.len(),
            result.projects.len()
        ),
    );

    Ok(())
}
