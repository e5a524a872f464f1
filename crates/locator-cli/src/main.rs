//! CLI binary for objlocator: resolve relationship-path locators against cluster snapshots.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use locator_core::access::Collaborators;
use locator_core::config::LocatorConfig;
use locator_core::edge::EdgeCatalog;
use locator_core::locator::Scope;
use locator_core::schema;
use locator_store::Cluster;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "objlocator", about = "Locate cluster objects by relationship path")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a locator to exactly one object and print it as JSON
    Locate {
        /// Locator document (JSON)
        #[arg(short, long)]
        locator: PathBuf,

        /// Cluster snapshot (defaults to [snapshot] path in the config)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Namespace to search (defaults to [resolve] namespace in the config)
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Print the oriented traversal steps a locator compiles to
    Plan {
        /// Locator document (JSON)
        #[arg(short, long)]
        locator: PathBuf,

        /// Cluster snapshot providing the kind mapping
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Validate a locator document without touching a cluster
    Check {
        /// Locator document (JSON)
        #[arg(short, long)]
        locator: PathBuf,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = LocatorConfig::load(&project_root)
        .with_context(|| format!("failed to load config under {}", project_root.display()))?;

    match cli.command {
        Commands::Locate {
            locator,
            snapshot,
            namespace,
        } => cmd_locate(&config, &locator, snapshot, namespace),
        Commands::Plan { locator, snapshot } => cmd_plan(&config, &locator, snapshot),
        Commands::Check { locator } => cmd_check(&locator),
    }
}

/// Pick the snapshot file: the flag wins, then the config.
fn snapshot_path(config: &LocatorConfig, flag: Option<PathBuf>) -> Result<PathBuf> {
    flag.or_else(|| config.snapshot.path.clone()).context(
        "no snapshot given. Pass --snapshot or set [snapshot] path in .objlocator/config.toml",
    )
}

fn cmd_locate(
    config: &LocatorConfig,
    locator_path: &Path,
    snapshot: Option<PathBuf>,
    namespace: Option<String>,
) -> Result<()> {
    let locator = schema::load(locator_path)?;
    let cluster = Cluster::open(&snapshot_path(config, snapshot)?)?;

    let namespace = namespace.unwrap_or_else(|| config.resolve.namespace.clone());
    if namespace.trim().is_empty() {
        anyhow::bail!("namespace must not be blank");
    }
    let scope = Scope::new(namespace);

    let walker = cluster.walker();
    let collab = Collaborators {
        kinds: &cluster.kinds,
        store: &cluster.store,
        walker: &walker,
    };
    let found = locator_resolve::locate(&locator, &scope, collab)
        .with_context(|| format!("failed to locate object in namespace {}", scope.namespace))?;

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&found)?
    } else {
        serde_json::to_string(&found)?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_plan(config: &LocatorConfig, locator_path: &Path, snapshot: Option<PathBuf>) -> Result<()> {
    let locator = schema::load(locator_path)?;
    let cluster = Cluster::open(&snapshot_path(config, snapshot)?)?;

    let catalog = EdgeCatalog::build(&locator.edges)?;
    let plan = locator_resolve::compile_plan(
        &locator.path,
        &catalog,
        &locator.start.target,
        &cluster.kinds,
    )?;

    println!("Start: {}", locator.start.target);
    if plan.is_empty() {
        println!("(empty path: the root object is the result)");
    }
    for (i, (step, name)) in plan.steps.iter().zip(&locator.path).enumerate() {
        println!("  {}. {}  [{}]", i + 1, step, name);
    }
    println!("End: {}", plan.end);
    Ok(())
}

fn cmd_check(locator_path: &Path) -> Result<()> {
    let locator = schema::load(locator_path)?;
    schema::validate(&locator)
        .with_context(|| format!("{} is not a valid locator", locator_path.display()))?;

    eprintln!(
        "Locator is valid: {} edge(s) declared, {} hop(s) from {}.",
        locator.edges.len(),
        locator.path.len(),
        locator.start.target
    );
    Ok(())
}
