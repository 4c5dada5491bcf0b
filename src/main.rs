//! Pantry command-line tool.
//!
//! ```bash
//! pantry normalize "Fresh Coriander, chopped"
//! pantry parse "2 1/2 cups flour"
//! pantry match --pantry pantry.json recipe.txt
//! pantry match --pantry pantry.json --ocr scan.txt
//! pantry suggest --pantry pantry.json --meal-type dinner
//! pantry import --pantry pantry.json https://example.com/recipes/soup
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pantry::config::AppConfig;
use pantry::directory::MealDbClient;
use pantry::ingredient_parser::parse_ingredient_line;
use pantry::matcher::match_all;
use pantry::normalize::normalize;
use pantry::ocr_lines::scan_recipe;
use pantry::pantry::{full_pantry_identity, JsonFilePantry, PantryProvider};
use pantry::recipe_proxy::RecipeProxyClient;
use pantry::suggest::{MealType, RecipeSuggester};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pantry",
    version,
    about = "Match recipe ingredients against a pantry inventory"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical comparison key of an ingredient name
    Normalize {
        name: String,
    },

    /// Split an ingredient line into quantity, unit and name
    Parse {
        line: String,
    },

    /// Match ingredient lines (file or stdin, one per line) against a pantry
    Match {
        /// Pantry inventory as a JSON array of items
        #[arg(long)]
        pantry: PathBuf,

        /// Treat the input as raw OCR text and drop headings and step lines
        #[arg(long)]
        ocr: bool,

        /// Recipe title used with --ocr
        #[arg(long, default_value = "Scanned recipe")]
        title: String,

        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Suggest directory recipes that use what the pantry holds
    Suggest {
        /// Pantry inventory as a JSON array of items
        #[arg(long)]
        pantry: PathBuf,

        /// all, breakfast, lunch or dinner
        #[arg(long, default_value_t = MealType::All)]
        meal_type: MealType,
    },

    /// Import a recipe page through the extraction proxy and match it
    Import {
        /// Pantry inventory as a JSON array of items
        #[arg(long)]
        pantry: PathBuf,

        url: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let json = env::var("PANTRY_LOG_JSON").is_ok_and(|value| value == "1" || value.eq_ignore_ascii_case("true"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = AppConfig::from_env();

    match cli.command {
        Command::Normalize { name } => {
            println!("{}", normalize(&name));
        }
        Command::Parse { line } => {
            print_json(&parse_ingredient_line(&line))?;
        }
        Command::Match {
            pantry,
            ocr,
            title,
            file,
        } => {
            let items = JsonFilePantry::new(pantry).snapshot().await?;
            let identity = full_pantry_identity(&items);
            let text = read_input(file.as_deref()).await?;

            if ocr {
                print_json(&scan_recipe(&title, &text, &identity))?;
            } else {
                let lines: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
                print_json(&match_all(&lines, &identity))?;
            }
        }
        Command::Suggest { pantry, meal_type } => {
            info!(base_url = %config.directory.base_url, meal_type = %meal_type, "Suggesting recipes");
            let directory = MealDbClient::new(&config.directory).context("Failed to create directory client")?;
            let suggester = RecipeSuggester::with_config(directory, config.suggest.clone());
            let suggestions = suggester
                .suggest_from_provider(&JsonFilePantry::new(pantry), meal_type)
                .await?;
            print_json(&suggestions)?;
        }
        Command::Import { pantry, url } => {
            let items = JsonFilePantry::new(pantry).snapshot().await?;
            let proxy = RecipeProxyClient::new(&config.proxy).context("Failed to create recipe proxy client")?;
            let recipe = proxy
                .import_recipe(&url, &full_pantry_identity(&items))
                .await
                .with_context(|| format!("Failed to import {url}"))?;
            print_json(&recipe)?;
        }
    }

    Ok(())
}
