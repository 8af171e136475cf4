use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use planstore::PlanStore;
use planstore::cli::{Cli, Command};
use planstore::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("planstore starting");

    match cli.command {
        Command::List => {
            let store = PlanStore::open(&config.store_path)?;
            let docs = store.list()?;
            if docs.is_empty() {
                println!("No documents found");
            } else {
                for doc in docs {
                    println!("{}", doc);
                }
            }
        }
        Command::Show { doc } => {
            let store = PlanStore::open(&config.store_path)?;
            let content = store.raw(&doc)?;
            println!("{}", content);
        }
        Command::Path { doc } => {
            let store = PlanStore::open(&config.store_path)?;
            println!("{}", store.path(&doc).display());
        }
        Command::Clear { doc } => {
            let store = PlanStore::open(&config.store_path)?;
            store.clear(&doc)?;
            println!("{} Cleared document: {}", "✓".green(), doc.cyan());
        }
    }

    Ok(())
}
