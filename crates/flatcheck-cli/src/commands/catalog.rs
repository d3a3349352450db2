//! Catalog command - list the loaded structure definitions.

use std::path::Path;

use colored::Colorize;
use flatcheck::StructureCatalog;

pub fn run(catalog_path: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let catalog = StructureCatalog::load(catalog_path)?;

    println!(
        "{} structure(s) in {}",
        catalog.len().to_string().white().bold(),
        catalog_path.display()
    );
    for structure in catalog.iter() {
        println!(
            "  {} pattern '{}' sep '{}'",
            structure.name.cyan().bold(),
            structure.file_pattern,
            structure.separator as char,
        );
        for row in &structure.row_structures {
            println!(
                "    type '{}' key@{} length {} optional {:?}",
                row.row_type, row.key_position, row.length, row.optional_fields
            );
        }
        if !structure.rules.is_empty() {
            println!("    rules: {}", structure.rules.join(", ").yellow());
        }
    }

    Ok(true)
}
