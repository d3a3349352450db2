//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// flatcheck: schema-driven flat-file validation
#[derive(Parser)]
#[command(name = "flatcheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the structure catalog definition (JSON)
    #[arg(short = 'C', long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run each file's declared rules and report the findings
    Check {
        /// Files to check
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the grouping keys of a file, or the rows for one key
    Groups {
        /// File to group
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print only the rows for this key
        #[arg(short, long)]
        key: Option<String>,
    },

    /// List the structures defined in the catalog
    Catalog,
}
