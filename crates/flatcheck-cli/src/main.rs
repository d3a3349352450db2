//! flatcheck CLI - schema-driven flat-file validation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { files, json } => commands::check::run(&files, &cli.catalog, json),
        Commands::Groups { file, key } => commands::groups::run(&file, &cli.catalog, key.as_deref()),
        Commands::Catalog => commands::catalog::run(&cli.catalog),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
