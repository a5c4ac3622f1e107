//! Command dispatch and handler modules.

mod config;
mod scan;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scan {
            root,
            format,
            use_network,
            maven_url,
            max_parent_depth,
            config,
        } => {
            scan::exec(
                &root,
                &format,
                use_network,
                maven_url.as_deref(),
                max_parent_depth,
                config.as_deref(),
                cli.verbose,
            )
            .await
        }
        Command::Config { config } => config::exec(config.as_deref()),
    }
}
