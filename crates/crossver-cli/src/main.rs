//! Crossver CLI - cross-version test task generation
//!
//! ## Commands
//!
//! - `generate`: Build the task graph and print it (text or JSON manifest)
//! - `units`: List generated unit names in catalog order
//! - `group`: List the units an aggregate group depends on
//! - `unit-name`: Print the unit name derived from a version
//! - `fingerprint`: Print the graph fingerprint

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossver_core::{
    generate, CrossVersionGraph, GenerationConfig, GroupKind, QuickSelection,
    ReleasedVersionsFile, UnitFactory, VersionId,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "crossver")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cross-version test task generation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the task graph
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the JSON manifest instead of a text summary
        #[arg(long)]
        json: bool,
    },

    /// List unit names in catalog order
    Units {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the units an aggregate group depends on
    Group {
        /// Which group to show
        #[arg(value_enum)]
        kind: GroupArg,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the unit name for a version without reading a catalog
    UnitName {
        /// Version identifier, e.g. 7.4.2
        version: String,

        #[command(flatten)]
        naming: NamingArgs,
    },

    /// Print the SHA-256 fingerprint of the generated graph
    Fingerprint {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupArg {
    All,
    Quick,
}

impl From<GroupArg> for GroupKind {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::All => GroupKind::AllVersions,
            GroupArg::Quick => GroupKind::QuickFeedback,
        }
    }
}

#[derive(Args, Clone)]
struct NamingArgs {
    /// Generation config file (TOML)
    #[arg(long, env = "CROSSVER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the unit name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Override the product name used in descriptions
    #[arg(long)]
    product: Option<String>,
}

impl NamingArgs {
    fn resolve(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GenerationConfig::default(),
        };
        if let Some(prefix) = &self.prefix {
            config.unit_prefix = prefix.clone();
        }
        if let Some(product) = &self.product {
            config.product_name = product.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Clone)]
struct SourceArgs {
    /// Released-versions JSON document
    #[arg(short, long, env = "CROSSVER_CATALOG")]
    catalog: PathBuf,

    /// How to pick quick-feedback versions (declared, boundaries, empty)
    #[arg(long, default_value = "declared")]
    quick: QuickSelection,

    #[command(flatten)]
    naming: NamingArgs,
}

fn build_graph(source: &SourceArgs) -> Result<CrossVersionGraph> {
    let config = source.naming.resolve()?;
    let provider = ReleasedVersionsFile::load(&source.catalog)
        .context("Failed to read released versions")?
        .with_quick_selection(source.quick);
    debug!(catalog = %source.catalog.display(), quick = %source.quick, "generating task graph");
    generate(config, provider).context("Failed to generate cross-version tasks")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    crossver_core::init_tracing(cli.log_json, level);

    let output = match cli.command {
        Commands::Generate { source, json } => cmd_generate(&source, json)?,
        Commands::Units { source } => cmd_units(&source)?,
        Commands::Group { kind, source } => cmd_group(kind.into(), &source)?,
        Commands::UnitName { version, naming } => cmd_unit_name(&version, &naming)?,
        Commands::Fingerprint { source } => build_graph(&source)?.fingerprint(),
    };
    println!("{}", output);
    Ok(())
}

fn cmd_generate(source: &SourceArgs, json: bool) -> Result<String> {
    let graph = build_graph(source)?;
    if json {
        return Ok(graph.manifest().to_json_pretty()?);
    }
    Ok(render_summary(&graph))
}

fn cmd_units(source: &SourceArgs) -> Result<String> {
    let graph = build_graph(source)?;
    Ok(graph
        .unit_names()
        .iter()
        .map(|name| name.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn cmd_group(kind: GroupKind, source: &SourceArgs) -> Result<String> {
    let graph = build_graph(source)?;
    Ok(render_group(&graph, kind))
}

fn cmd_unit_name(version: &str, naming: &NamingArgs) -> Result<String> {
    let version = VersionId::parse(version)?;
    let factory = UnitFactory::new(naming.resolve()?);
    Ok(factory.unit_name(&version).to_string())
}

/// Group members in catalog order, one per line.
fn render_group(graph: &CrossVersionGraph, kind: GroupKind) -> String {
    let group = graph.group(kind);
    graph
        .unit_names()
        .iter()
        .filter(|name| group.contains(name))
        .map(|name| name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_summary(graph: &CrossVersionGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generated {} cross-version units", graph.len());
    for unit in graph.units() {
        let marker = if graph.quick_feedback().contains(&unit.name) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "  {} {:<32} {} ({})",
            marker,
            unit.name.as_str(),
            unit.target_version,
            unit.strategy
        );
    }
    for kind in GroupKind::ALL {
        let group = graph.group(kind);
        let _ = writeln!(out, "{}: {} units", group.name, group.len());
    }
    let _ = write!(out, "Fingerprint: {}", graph.fingerprint());
    out
}
