use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stride_core::*;

/// Sample records shown by `stride demo`
const DEMO_DAY_RECORD: &str = "678,0h50m";
const DEMO_TRAINING_RECORD: &str = "3456,Walking,3h00m";

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Step-based activity metrics and calorie reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Body weight in kilograms
    #[arg(long, global = true, allow_negative_numbers = true)]
    weight: Option<f64>,

    /// Body height in meters
    #[arg(long, global = true, allow_negative_numbers = true)]
    height: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report on a daily steps record (`steps,duration`)
    Day {
        /// Record such as "678,0h50m"
        #[arg(allow_hyphen_values = true)]
        record: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report on a training record (`steps,activity,duration`)
    Training {
        /// Record such as "3456,Walking,3h00m"
        #[arg(allow_hyphen_values = true)]
        record: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run both reports on built-in sample records (default)
    Demo,

    /// Write a default configuration file, using --weight/--height as body defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    stride_core::logging::init();

    let cli = Cli::parse();

    let command = match cli.command {
        Some(Commands::Init { force }) => {
            let path = cli.config.unwrap_or_else(Config::default_config_path);
            return cmd_init(&path, cli.weight, cli.height, force);
        }
        command => command,
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let engine = Engine::from_config(&config)?;
    let weight = cli.weight.unwrap_or(config.body.weight_kg);
    let height = cli.height.unwrap_or(config.body.height_m);

    match command {
        Some(Commands::Day { record, json }) => cmd_day(&engine, &record, weight, height, json),
        Some(Commands::Training { record, json }) => {
            cmd_training(&engine, &record, weight, height, json)
        }
        // Demo is also the default when no command is given
        _ => {
            cmd_demo(&engine, weight, height);
            Ok(())
        }
    }
}

fn cmd_init(path: &Path, weight: Option<f64>, height: Option<f64>, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut config = Config::default();
    if let Some(weight) = weight {
        config.body.weight_kg = weight;
    }
    if let Some(height) = height {
        config.body.height_m = height;
    }
    config.validate()?;
    config.save_to(path)?;

    println!("✓ Wrote config to {}", path.display());
    Ok(())
}

fn cmd_day(engine: &Engine, record: &str, weight: f64, height: f64, json: bool) -> Result<()> {
    match engine.day_action(record, weight, height) {
        Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(report) => println!("{}", report),
        Err(e) => {
            // Daily reports degrade to empty output; the reason only goes to the log
            tracing::warn!("Daily steps record {:?} rejected: {}", record, e);
            println!();
        }
    }
    Ok(())
}

fn cmd_training(
    engine: &Engine,
    record: &str,
    weight: f64,
    height: f64,
    json: bool,
) -> Result<()> {
    match engine.training(record, weight, height) {
        Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(report) => println!("{}", report),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn cmd_demo(engine: &Engine, weight: f64, height: f64) {
    println!("=== Daily steps: {} ===", DEMO_DAY_RECORD);
    println!("{}", engine.day_action_report(DEMO_DAY_RECORD, weight, height));
    println!();

    println!("=== Training: {} ===", DEMO_TRAINING_RECORD);
    match engine.training_report(DEMO_TRAINING_RECORD, weight, height) {
        Ok(text) => println!("{}", text),
        Err(e) => println!("Error: {}", e),
    }
}
