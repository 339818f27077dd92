//! Entry point shared by the generator binaries.

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::{AssetKind, CliArgs, PipelineConfig};
use crate::pipeline::Pipeline;

/// Parse flags, set up logging and run the generator for `kind`.
pub fn run(kind: AssetKind) -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let filter = if args.verbose {
        EnvFilter::new("scenery_gen=debug")
    } else {
        EnvFilter::new("scenery_gen=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = PipelineConfig::from_args(kind, args);
    match Pipeline::run(&config) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(%e, asset = %kind, "Generation failed");
            Err(anyhow::anyhow!(e)).with_context(|| format!("{kind} generator failed"))
        }
    }
}
