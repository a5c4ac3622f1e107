//! Command: print the effective configuration.

use std::path::Path;

use pomelo_core::config::CatalogerConfig;
use pomelo_util::errors::PomeloError;

pub fn exec(config_path: Option<&Path>) -> miette::Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(CatalogerConfig::default_path);
    let config = CatalogerConfig::load(&path)?;

    let rendered = toml::to_string_pretty(&config).map_err(|e| PomeloError::Generic {
        message: format!("Failed to render configuration: {e}"),
    })?;
    print!("{rendered}");
    Ok(())
}
