use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use credit_scout::config::{get_config_path, load_config, write_default_config};
use credit_scout::social::SocialRecord;
use credit_scout::statement::{read_csv_rows, RawRow, StatementBundle};
use credit_scout::{Engine, InputError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug)]
struct InputArgs {
    /// Balance sheet CSV (columns: account, code, value)
    #[arg(long)]
    balance: PathBuf,

    /// Income statement CSV; its sales line overrides the balance sheet
    #[arg(long)]
    income: Option<PathBuf>,

    /// Cash-flow statement CSV; its operating line overrides the balance sheet
    #[arg(long)]
    cash_flow: Option<PathBuf>,

    /// Social activity record (JSON with profile and posts)
    #[arg(long)]
    social: Option<PathBuf>,

    /// Print the full assessment as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract features and print the risk score
    Score {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Score, then decide on a requested credit amount
    Decide {
        #[command(flatten)]
        input: InputArgs,

        /// Requested credit amount
        #[arg(long)]
        amount: f64,
    },
    /// Write the default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as YAML
    Config,
}

#[derive(Parser, Debug)]
#[command(name = "credit-scout")]
#[command(about = "Small-business credit risk scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/credit-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let rows = read_csv_rows(file).with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read statement rows");
    Ok(rows)
}

fn read_inputs(input: &InputArgs) -> Result<(StatementBundle, SocialRecord)> {
    let bundle = StatementBundle {
        balance: read_rows(&input.balance)?,
        income: input.income.as_deref().map(read_rows).transpose()?,
        cash_flow: input.cash_flow.as_deref().map(read_rows).transpose()?,
    };

    let record = match &input.social {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SocialRecord::from_json(&json)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => SocialRecord::default(),
    };

    Ok((bundle, record))
}

fn run_assessment(engine: &Engine, input: &InputArgs, amount: Option<f64>) -> Result<()> {
    let (bundle, record) = read_inputs(input)?;
    let assessment = engine.analyze(&bundle, &record, amount)?;

    if input.json {
        let json = serde_json::to_string_pretty(&assessment)
            .context("Failed to serialize assessment")?;
        println!("{}", json);
    } else {
        let use_colors = credit_scout::output::should_use_colors();
        println!(
            "{}",
            credit_scout::output::format_assessment(&assessment, use_colors)
        );
    }
    Ok(())
}

/// Input problems get their own exit code; anything else is a plain failure.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    let is_input = error.chain().any(|cause| {
        cause.downcast_ref::<InputError>().is_some()
            || cause.downcast_ref::<std::io::Error>().is_some()
    });
    if is_input {
        EXIT_INPUT
    } else {
        EXIT_FAILURE
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init { force } = cli.command {
        let path = match cli.config.clone() {
            Some(p) => Ok(p),
            None => get_config_path(),
        };
        let path = match path {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    let engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let result = match &cli.command {
        Commands::Score { input } => run_assessment(&engine, input, None),
        Commands::Decide { input, amount } => run_assessment(&engine, input, Some(*amount)),
        Commands::Config => serde_saphyr::to_string(engine.config())
            .map(|yaml| print!("{}", yaml))
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e)),
        Commands::Init { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code_for(&e));
    }

    std::process::exit(EXIT_SUCCESS);
}
