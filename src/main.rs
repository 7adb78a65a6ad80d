use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod emit;
mod error;
mod extract;
mod javadoc;
mod model;
mod resolve;
mod source;
mod syntax;
mod verify;
mod workflow;

use crate::cli::Args;
use crate::config::GeneratorConfig;
use crate::error::VerifyError;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = GeneratorConfig::from_args(args)?;
    tracing::debug!(
        input_dir = %config.input_dir.display(),
        package = %config.package_name,
        declaration = %config.declaration,
        "starting metadata generation"
    );
    if let Err(err) = workflow::run_generate(&config) {
        if let Some(mismatch) = err.downcast_ref::<VerifyError>() {
            println!("{mismatch}");
            std::process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
