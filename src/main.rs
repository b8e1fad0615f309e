mod catalog;
mod config;
mod menu;
mod parser;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "menu_scraper", about = "Drinks catalog extractor for the pub's menu page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the saved menu page and write the drinks catalog as JSON
    Extract {
        /// Saved HTML of the menu page
        #[arg(short, long, default_value = config::DEFAULT_INPUT_PATH)]
        input: PathBuf,
        /// Where to write the catalog
        #[arg(short, long, default_value = config::DEFAULT_OUTPUT_PATH)]
        output: PathBuf,
    },
    /// Show a written catalog grouped by category
    Menu {
        /// Catalog written by `extract`
        #[arg(short, long, default_value = config::DEFAULT_OUTPUT_PATH)]
        file: PathBuf,
        /// Only this category (exact name)
        #[arg(short, long)]
        category: Option<String>,
        /// Only items whose name or category contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { input, output } => {
            let html = menu::read_document(&input)?;
            let items = parser::process_document(&html, config::CATEGORY_TABLES);
            menu::write_catalog(&output, &items)?;
            info!("Wrote {}", output.display());
            println!(
                "Successfully extracted {} drinks to '{}'",
                items.len(),
                output.display()
            );
            Ok(())
        }
        Commands::Menu {
            file,
            category,
            search,
        } => {
            let items = menu::read_catalog(&file)?;
            let filter = catalog::Filter {
                category: category.as_deref(),
                search: search.as_deref(),
            };
            let grouped = catalog::group_by_category(&items, &filter);
            if grouped.is_empty() {
                println!("No drinks found.");
                return Ok(());
            }

            for (category, entries) in &grouped {
                println!("\n{}", category);
                println!("{}", "-".repeat(category.chars().count()));
                for item in entries {
                    println!("  {}", catalog::format_item(item));
                }
            }

            let shown: usize = grouped.values().map(Vec::len).sum();
            println!("\n{} of {} drinks | {} categories", shown, items.len(), grouped.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
