//! CLI argument parsing for planstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ps")]
#[command(author, version, about = "Inspect meetplan's JSON document store", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List documents present in the store
    List,

    /// Print a document's JSON content
    Show {
        /// Document name (settings, teams, schedule)
        #[arg(required = true)]
        doc: String,
    },

    /// Print the file path of a document
    Path {
        /// Document name
        #[arg(required = true)]
        doc: String,
    },

    /// Delete a document
    Clear {
        /// Document name
        #[arg(required = true)]
        doc: String,
    },
}
