//! bom-reconciler: diff, merge and consolidate software bills of materials.

use anyhow::{Context, Result};
use bom_reconciler::{
    cli,
    config::{self, AppConfig, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bom-reconciler")]
#[command(version)]
#[command(about = "Diff, merge and consolidate CycloneDX bills of materials", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (or changes found without --fail-on-change)
    1  Changes detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Differences between two snapshots
    bom-reconciler diff old.cdx.json new.cdx.json -o diff.json

    # Full classification including unchanged components
    bom-reconciler diff old.cdx.json new.cdx.json --all --format summary

    # Union of two BOMs without duplicates
    bom-reconciler merge a.cdx.json b.cdx.json merged.cdx.json

    # Collapse framework sub-packages with a custom rule table
    bom-reconciler granularity -i bom.cdx.json -o coarse.cdx.json --rules rules.csv")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old BOM
    old: PathBuf,

    /// Path to the new BOM
    new: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include IDENTICAL entries in the report
    #[arg(long)]
    all: bool,

    /// Report format
    #[arg(long, default_value_t = ReportFormat::Json)]
    format: ReportFormat,

    /// Emit JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Exit with code 1 if any difference is found
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `merge` subcommand
#[derive(Parser)]
struct MergeArgs {
    /// First BOM; its components come first in the output
    first: PathBuf,

    /// Second BOM
    second: PathBuf,

    /// Path of the merged BOM
    output: PathBuf,
}

/// Arguments for the `granularity` subcommand
#[derive(Parser)]
struct GranularityArgs {
    /// Input BOM
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Local rule table (component_name;replacement_name;comment;source_url)
    #[arg(long, conflicts_with = "remote_rules")]
    rules: Option<PathBuf>,

    /// URL of a rule table
    #[arg(long)]
    remote_rules: Option<String>,

    /// Use no rules unless --rules or --remote-rules is given
    #[arg(long)]
    no_bundled_rules: bool,

    /// Timeout for --remote-rules in seconds
    #[arg(long, default_value_t = config::DEFAULT_RULES_TIMEOUT_SECS)]
    timeout: u64,

    /// Emit JSON on a single line
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every component of two BOM snapshots
    Diff(DiffArgs),

    /// Merge two BOMs, dropping duplicate components
    Merge(MergeArgs),

    /// Replace fine-grained components by coarse ones
    Granularity(GranularityArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the JSON schema of the configuration file
    ConfigSchema {
        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .bom-reconciler.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Load the config file, layer the CLI overrides on top and validate.
fn effective_config(cli: &Cli, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .output_format(args.format)
                .output_file(args.output.clone())
                .compact(args.compact)
                .include_identical(args.all)
                .fail_on_change(args.fail_on_change)
                .quiet(cli.quiet)
                .build();
            let config = effective_config(&cli, &overrides)?;
            cli::run_diff(&args.old, &args.new, &config)
        }
        Commands::Merge(args) => {
            let overrides = AppConfig::builder().quiet(cli.quiet).build();
            let config = effective_config(&cli, &overrides)?;
            cli::run_merge(&args.first, &args.second, &args.output, &config)
        }
        Commands::Granularity(args) => {
            let mut overrides = AppConfig::builder()
                .granularity_output(args.output.clone())
                .compact(args.compact)
                .rules_file(args.rules.clone())
                .rules_url(args.remote_rules.clone())
                .rules_timeout_secs(args.timeout)
                .quiet(cli.quiet)
                .build();
            overrides.granularity.use_bundled_rules = !args.no_bundled_rules;
            let config = effective_config(&cli, &overrides)?;
            cli::run_granularity(&args.input, &config)
        }
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "bom-reconciler", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to serialize schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { action } => {
            run_config_action(action, &cli)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config_action(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for dir in config::search_dirs() {
                eprintln!("  {}", dir.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".bom-reconciler.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
