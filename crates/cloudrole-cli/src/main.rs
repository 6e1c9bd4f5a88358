//! cloudrole - cloud service deployment helpers
//!
//! ## Commands
//!
//! - `runtime resolve`: Pick the runtime package for a role's requested runtime
//! - `runtime list`: Show the runtimes the manifest offers for a location
//! - `instance snapshot`: Copy role instance records into snapshots

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use cloudrole_core::{
    load_manifest, resolve_in, runtime_catalog, snapshot_file, HttpManifestFetcher, Location,
    ManifestConfig, RuntimeRequest, RuntimeType,
};

#[derive(Parser)]
#[command(name = "cloudrole")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Runtime manifest and role instance tooling for cloud services", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runtime manifest queries
    Runtime {
        #[command(subcommand)]
        action: RuntimeAction,
    },

    /// Role instance operations
    Instance {
        #[command(subcommand)]
        action: InstanceAction,
    },
}

#[derive(Subcommand)]
enum RuntimeAction {
    /// Resolve the package for a requested runtime
    Resolve {
        /// Deployment location (e.g. "North Central US")
        #[arg(short, long)]
        location: Location,

        /// Runtime type (node, iisnode, php, cache, java)
        #[arg(short, long)]
        runtime: RuntimeType,

        /// Requested runtime version (default package when omitted)
        #[arg(long)]
        runtime_version: Option<String>,

        /// Local runtime manifest (default: the published manifest)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// List runtimes and versions offered for a location
    List {
        /// Deployment location (e.g. "North Central US")
        #[arg(short, long)]
        location: Location,

        /// Local runtime manifest (default: the published manifest)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum InstanceAction {
    /// Map role instance records (JSON) into snapshots
    Snapshot {
        /// File holding one role instance or an array of them
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    cloudrole_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Runtime { action } => match action {
            RuntimeAction::Resolve {
                location,
                runtime,
                runtime_version,
                manifest,
            } => {
                cmd_runtime_resolve(location, runtime, runtime_version, manifest.as_deref()).await
            }
            RuntimeAction::List { location, manifest } => {
                cmd_runtime_list(location, manifest.as_deref()).await
            }
        },
        Commands::Instance { action } => match action {
            InstanceAction::Snapshot { input } => cmd_instance_snapshot(&input),
        },
    }
}

/// Resolve one runtime request and print the chosen package
async fn cmd_runtime_resolve(
    location: Location,
    runtime: RuntimeType,
    version: Option<String>,
    manifest: Option<&Path>,
) -> Result<()> {
    let config = ManifestConfig::from_env();
    let fetcher = HttpManifestFetcher::new(&config).context("Failed to create HTTP client")?;
    let index = load_manifest(location, manifest, &config, &fetcher)
        .await
        .context("Failed to load runtime manifest")?;

    let request = RuntimeRequest { runtime, version };
    let resolved = resolve_in(&index, &request)
        .with_context(|| format!("Failed to resolve runtime '{}'", runtime))?;

    if !resolved.matched {
        info!(
            "No {} package matches the requested version; using the default {}",
            runtime, resolved.version
        );
    }
    print_json(&resolved)
}

/// List every runtime the manifest declares for a location
async fn cmd_runtime_list(location: Location, manifest: Option<&Path>) -> Result<()> {
    let config = ManifestConfig::from_env();
    let fetcher = HttpManifestFetcher::new(&config).context("Failed to create HTTP client")?;
    let index = load_manifest(location, manifest, &config, &fetcher)
        .await
        .context("Failed to load runtime manifest")?;

    print_json(&runtime_catalog(&index))
}

/// Snapshot role instances read from a JSON file
fn cmd_instance_snapshot(input: &Path) -> Result<()> {
    let snapshots = snapshot_file(input)
        .with_context(|| format!("Failed to snapshot role instances from {:?}", input))?;
    print_json(&snapshots)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
