//! Batch command-line front end
//!
//! Builds the reference table from a directory of calibration CSV files,
//! loads one strip's patch images, classifies every pad, and prints the
//! report: JSON on stdout for programmatic use, a summary on stderr.

use std::path::{Path, PathBuf};
use std::{env, process};

use stripscan::{
    analyze_strip, image_loader, reference, Catalog, CsvDirectorySource, SqliteStore, StripReport,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut catalog_path: Option<PathBuf> = None;
    let mut csv_dir: Option<PathBuf> = None;
    let mut db_path: Option<PathBuf> = None;
    let mut export_path: Option<PathBuf> = None;
    let mut patch_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" => {
                i += 1;
                catalog_path = Some(expect_value(&args, i, "--catalog"));
            }
            "--calibration" => {
                i += 1;
                csv_dir = Some(expect_value(&args, i, "--calibration"));
            }
            "--db" => {
                i += 1;
                db_path = Some(expect_value(&args, i, "--db"));
            }
            "--export" => {
                i += 1;
                export_path = Some(expect_value(&args, i, "--export"));
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if patch_dir.is_none() {
                    patch_dir = Some(PathBuf::from(arg));
                } else {
                    eprintln!("Error: Multiple patch directories provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let (Some(csv_dir), Some(patch_dir)) = (csv_dir, patch_dir) else {
        print_help(&args[0]);
        process::exit(1);
    };

    let catalog = match catalog_path {
        Some(path) => match Catalog::from_json_file(&path) {
            Ok(catalog) => catalog,
            Err(error) => {
                eprintln!("Failed to load catalog: {}", error);
                process::exit(1);
            }
        },
        None => Catalog::urine_10(),
    };

    let codes: Vec<String> = catalog.pads().iter().map(|p| p.code.clone()).collect();
    let source = match CsvDirectorySource::scan(&csv_dir, &codes) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to scan calibration directory: {}", error);
            process::exit(1);
        }
    };

    let outcome = match reference::build(&catalog, &source) {
        Ok(outcome) => outcome,
        Err(error) => {
            eprintln!("Reference table build failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    };
    for warning in &outcome.warnings {
        eprintln!("Build warning: {}", warning);
    }

    if let Some(db_path) = db_path {
        match SqliteStore::open(&db_path) {
            Ok(mut store) => {
                if let Err(error) = store.replace_all(&outcome.table) {
                    eprintln!("Warning: Failed to persist reference table: {}", error);
                }
            }
            Err(error) => {
                eprintln!("Warning: Failed to open reference database: {}", error);
            }
        }
    }

    let regions = match image_loader::load_patch_dir(&patch_dir) {
        Ok(regions) => regions,
        Err(error) => {
            eprintln!("Failed to load patch images: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    };

    let report = analyze_strip(&catalog, &regions, &outcome.table);
    print_report(&report);

    if let Some(export_path) = export_path {
        match export_csv(&report, &export_path) {
            Ok(()) => eprintln!("Report exported to {}", export_path.display()),
            Err(error) => eprintln!("Warning: CSV export failed: {}", error),
        }
    }
}

fn expect_value(args: &[String], i: usize, flag: &str) -> PathBuf {
    match args.get(i) {
        Some(value) => PathBuf::from(value),
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

fn export_csv(report: &StripReport, path: &Path) -> stripscan::Result<()> {
    let file = std::fs::File::create(path)
        .map_err(|e| stripscan::AnalysisError::calibration_io("Failed to create export file", e))?;
    report.write_csv(file)
}

fn print_report(report: &StripReport) {
    // JSON to stdout for programmatic use
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }

    // Summary to stderr for human reading
    eprintln!();
    eprintln!("===== STRIP RESULTS =====");
    for row in &report.results {
        eprintln!(
            "  Pad {:>2}  {:<18} level {}  {:<12} {:<16} {}",
            row.pad_index,
            row.analyte_name,
            row.level_index,
            row.value_label,
            row.unit,
            row.extracted_color.to_hex()
        );
    }
    if report.results.is_empty() {
        eprintln!("  (no pads classified)");
    }
    if report.has_warnings() {
        eprintln!();
        eprintln!("Warnings:");
        for warning in &report.warnings {
            eprintln!("  {}", warning);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!(
        "Usage: {} --calibration DIR [OPTIONS] <patch_dir>",
        program_name
    );
    eprintln!();
    eprintln!("Classify a multi-pad test strip from per-pad patch images.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --calibration DIR  Directory of per-analyte calibration CSV files (required)");
    eprintln!("  --catalog FILE     Pad catalog JSON (default: built-in 10-pad urine strip)");
    eprintln!("  --db FILE          Persist the built reference table to this SQLite file");
    eprintln!("  --export FILE      Write the report as CSV");
    eprintln!("  --help, -h         Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --calibration patch_csv_files/ images/", program_name);
    eprintln!(
        "  {} --calibration patch_csv_files/ --db lookup.db --export results.csv images/",
        program_name
    );
}
