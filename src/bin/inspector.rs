//! vpc-inspector CLI
//!
//! Prints the address ranges of a network that are still free for new subnetworks

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vpc_inspector::{render, ConfigOverrides, Inspector, InspectorConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "vpc-inspector")]
#[command(about = "Compute the free CIDR blocks of a cloud VPC network")]
#[command(version)]
struct Args {
    /// Path to config file (optional when --project and --network are given)
    #[arg(short = 'c', long, default_value = InspectorConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Project id
    #[arg(short = 'p', long)]
    project: Option<String>,

    /// Network name
    #[arg(short = 'n', long)]
    network: Option<String>,

    /// Address space to inspect, e.g. 10.0.0.0/8
    #[arg(long)]
    parent: Option<String>,

    /// Read the inventory from a JSON snapshot instead of the API
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Compute API endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Output format (text, json) [default: text]
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let format: OutputFormat = args.format.parse()?;

    let file = if args.config.exists() {
        info!("Loading config: {:?}", args.config);
        Some(
            InspectorConfig::load(&args.config)
                .await
                .with_context(|| format!("failed to load config {}", args.config.display()))?,
        )
    } else {
        None
    };

    let overrides = ConfigOverrides {
        project: args.project,
        network: args.network,
        parent: args.parent,
        snapshot: args.snapshot,
        endpoint: args.endpoint,
    };
    let config = InspectorConfig::resolve(file, overrides)?;

    info!(
        "Inspecting network {}/{} via {:?}",
        config.project, config.network, config.inventory
    );

    let inspector = Inspector::from_config(config)
        .await
        .context("failed to set up inventory")?;
    let report = inspector.inspect().await.context("inspection failed")?;

    print!("{}", render(&report, format)?);

    Ok(())
}
