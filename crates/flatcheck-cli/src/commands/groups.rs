//! Groups command - show a file's grouping keys or one group's rows.

use std::path::Path;

use colored::Colorize;
use flatcheck::{FlatCheckError, FlatFileParser, StructureCatalog};

pub fn run(
    file: &Path,
    catalog_path: &Path,
    key: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let catalog = StructureCatalog::load(catalog_path)?;

    let filename = file.to_string_lossy();
    let structure = catalog.match_filename(&filename)?.ok_or_else(|| {
        FlatCheckError::NoStructure {
            filename: filename.into_owned(),
        }
    })?;

    let (parsed, _) = FlatFileParser::new().parse_path(file, structure)?;
    let groups = parsed.group_by_key()?;

    match key {
        Some(key) => {
            let rows = groups.rows_for_key(key);
            if rows.is_empty() {
                println!("{} no rows for key '{}'", "note:".yellow(), key);
            }
            for row in rows {
                println!("{}", row.join(&(structure.separator as char).to_string()));
            }
        }
        None => {
            println!(
                "{} groups in {}",
                groups.len().to_string().white().bold(),
                parsed.display_name.cyan()
            );
            for (key, rows) in groups.iter() {
                println!("  {}  {} row(s)", key, rows.len());
            }
        }
    }

    Ok(true)
}
