//! Check command - run each file's declared rules and print findings.

use std::path::{Path, PathBuf};

use colored::Colorize;
use flatcheck::{CheckReport, FlatCheck, StructureCatalog};

/// Returns `Ok(true)` when every file passed every rule.
pub fn run(
    files: &[PathBuf],
    catalog_path: &Path,
    json_output: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let catalog = StructureCatalog::load(catalog_path)?;
    let checker = FlatCheck::new(catalog);

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        reports.push(checker.check(file)?);
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    Ok(reports.iter().all(|r| r.summary.passed))
}

fn print_report(report: &CheckReport) {
    let verdict = if report.summary.passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!(
        "{} {} ({}, {} rows, {} rules)",
        verdict,
        report.source.file.white().bold(),
        report.structure.cyan(),
        report.source.row_count,
        report.summary.cases,
    );

    for case in &report.suite.cases {
        for step in &case.steps {
            if step.passed {
                continue;
            }
            println!(
                "  {} [{}] row {}: {}",
                case.name.yellow(),
                step.kind,
                step.row,
                step.message
            );
        }
    }

    if !report.summary.passed {
        println!(
            "  {} failing step(s)",
            report.summary.failures.to_string().red()
        );
    }
}
