//! cheese-plate - CLI tool to assemble cheese plates from a catalog file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cheese_plate::config::PRICE_TOLERANCE;
use cheese_plate::random::{RandomSource, SeededRandom, ThreadRandom};
use cheese_plate::repository::load_catalog;
use cheese_plate::{
    build_plate_action, load_dataset, suggestions_action, validate_catalog, BuildPlateParams,
    ConstructorConfig, JsonFileRepository,
};

/// Assemble cheese plates from a shop catalog.
#[derive(Parser, Debug)]
#[command(name = "cheese-plate")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one plate
    Build {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Favorite category id
        #[arg(short, long)]
        favorite: Option<String>,

        /// Leave mold cheeses out
        #[arg(long)]
        exclude_mold: bool,

        /// Number of cheeses (3-7, default 4 or 5)
        #[arg(short = 'n', long)]
        count: Option<f64>,

        /// Target price for the whole plate
        #[arg(short, long)]
        target_price: Option<f64>,

        /// Accepted gap between plate total and target price
        #[arg(long, default_value_t = PRICE_TOLERANCE)]
        tolerance: i64,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Build ready-made suggestions
    Suggest {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Number of suggestions (1-6)
        #[arg(short = 'n', long)]
        count: Option<f64>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List categories that can be chosen as favorite
    Categories {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Leave mold cheeses out
        #[arg(long)]
        exclude_mold: bool,
    },

    /// Check a catalog for dangling references and odd settings
    Validate {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Build {
            catalog,
            favorite,
            exclude_mold,
            count,
            target_price,
            tolerance,
            seed,
        } => {
            info!("Building plate from {}", catalog.display());
            let repo = JsonFileRepository::new(catalog);
            let params = BuildPlateParams {
                favorite_category_id: favorite,
                exclude_mold,
                cheese_count: count,
                target_price_rub: target_price,
            };
            let config = ConstructorConfig::with_tolerance(tolerance);
            let response = build_plate_action(&repo, params, &config, rng(seed).as_mut());
            print_json(&response)?;
            if !response.ok {
                anyhow::bail!("No plate built");
            }
        }
        Command::Suggest {
            catalog,
            count,
            seed,
        } => {
            let repo = JsonFileRepository::new(catalog);
            let response = suggestions_action(
                &repo,
                count,
                &ConstructorConfig::default(),
                rng(seed).as_mut(),
            );
            info!("Built {} suggestion(s)", response.suggestions.len());
            print_json(&response)?;
            if !response.ok {
                anyhow::bail!("Suggestions failed");
            }
        }
        Command::Categories {
            catalog,
            exclude_mold,
        } => {
            let repo = JsonFileRepository::new(&catalog);
            let dataset = load_dataset(&repo, exclude_mold)
                .with_context(|| format!("Failed to load {}", catalog.display()))?;
            print_json(&dataset.favorite_categories())?;
        }
        Command::Validate { catalog } => {
            let data = load_catalog(&catalog)
                .with_context(|| format!("Failed to load {}", catalog.display()))?;
            let validation = validate_catalog(&data);

            for warning in &validation.warnings {
                warn!("{}", warning);
            }

            for err in &validation.errors {
                error!("{}", err);
            }

            if !validation.passed {
                anyhow::bail!("Validation failed");
            }

            info!("Validation passed");
        }
    }

    Ok(())
}

/// Seeded generator if a seed is given, thread-local otherwise.
fn rng(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
