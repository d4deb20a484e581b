//! Interactive front end
//!
//! A line-oriented shell over the core library mirroring the desktop
//! workflow: pick a catalog, build or load a reference table, analyze a
//! strip's patch directory, export the results. All logic lives in the
//! library; this binary only sequences commands and prints state.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use stripscan::{
    analyze_strip, image_loader, reference, Catalog, CsvDirectorySource, ReferenceTable,
    SqliteStore, StripReport,
};

struct Shell {
    catalog: Catalog,
    table: Option<ReferenceTable>,
    report: Option<StripReport>,
}

impl Shell {
    fn new() -> Self {
        Self {
            catalog: Catalog::urine_10(),
            table: None,
            report: None,
        }
    }

    fn dispatch(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return true;
        };
        let arg = parts.next().map(PathBuf::from);

        match (command, arg) {
            ("catalog", Some(path)) => self.load_catalog(&path),
            ("build", Some(dir)) => self.build(&dir),
            ("save", Some(path)) => self.save(&path),
            ("load", Some(path)) => self.load(&path),
            ("analyze", Some(dir)) => self.analyze(&dir),
            ("export", Some(path)) => self.export(&path),
            ("status", None) => self.status(),
            ("clear", None) => {
                self.table = None;
                self.report = None;
                println!("Cleared reference table and report.");
            }
            ("help", None) => print_help(),
            ("quit", None) | ("exit", None) => return false,
            _ => {
                println!("Unrecognized command. Type 'help' for the command list.");
            }
        }
        true
    }

    fn load_catalog(&mut self, path: &Path) {
        match Catalog::from_json_file(path) {
            Ok(catalog) => {
                println!("Loaded catalog with {} pads.", catalog.pad_count());
                self.catalog = catalog;
                // A catalog swap invalidates anything built against the old one
                self.table = None;
                self.report = None;
            }
            Err(error) => println!("Failed to load catalog: {}", error),
        }
    }

    fn build(&mut self, dir: &Path) {
        let codes: Vec<String> = self.catalog.pads().iter().map(|p| p.code.clone()).collect();
        let source = match CsvDirectorySource::scan(dir, &codes) {
            Ok(source) => source,
            Err(error) => {
                println!("Failed to scan calibration directory: {}", error);
                return;
            }
        };
        match reference::build(&self.catalog, &source) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    println!("Warning: {}", warning);
                }
                println!("Built reference table with {} entries.", outcome.table.len());
                self.table = Some(outcome.table);
            }
            Err(error) => {
                println!("Build failed: {}", error);
                println!("Suggestion: {}", error.user_message());
            }
        }
    }

    fn save(&mut self, path: &Path) {
        let Some(table) = &self.table else {
            println!("No reference table to save. Run 'build' first.");
            return;
        };
        match SqliteStore::open(path) {
            Ok(mut store) => match store.replace_all(table) {
                Ok(()) => println!("Saved {} entries to {}.", table.len(), path.display()),
                Err(error) => println!("Save failed: {}", error),
            },
            Err(error) => println!("Failed to open database: {}", error),
        }
    }

    fn load(&mut self, path: &Path) {
        match SqliteStore::open(path).and_then(|store| store.load()) {
            Ok(table) => {
                println!("Loaded reference table with {} entries.", table.len());
                self.table = Some(table);
            }
            Err(error) => println!("Load failed: {}", error),
        }
    }

    fn analyze(&mut self, dir: &Path) {
        let Some(table) = &self.table else {
            println!("No reference table available. Run 'build' or 'load' first.");
            return;
        };
        let regions = match image_loader::load_patch_dir(dir) {
            Ok(regions) => regions,
            Err(error) => {
                println!("Failed to load patch images: {}", error);
                println!("Suggestion: {}", error.user_message());
                return;
            }
        };
        let report = analyze_strip(&self.catalog, &regions, table);

        for row in &report.results {
            println!(
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
            println!("  (no pads classified)");
        }
        for warning in &report.warnings {
            println!("Warning: {}", warning);
        }
        self.report = Some(report);
    }

    fn export(&mut self, path: &Path) {
        let Some(report) = &self.report else {
            println!("No report to export. Run 'analyze' first.");
            return;
        };
        let file = match std::fs::File::create(path) {
            Ok(file) => file,
            Err(error) => {
                println!("Failed to create export file: {}", error);
                return;
            }
        };
        match report.write_csv(file) {
            Ok(()) => println!("Exported report to {}.", path.display()),
            Err(error) => println!("Export failed: {}", error),
        }
    }

    fn status(&self) {
        println!("Catalog: {} pads", self.catalog.pad_count());
        match &self.table {
            Some(table) => println!("Reference table: {} entries", table.len()),
            None => println!("Reference table: not built"),
        }
        match &self.report {
            Some(report) => println!(
                "Last report: {} results, {} warnings",
                report.results.len(),
                report.warnings.len()
            ),
            None => println!("Last report: none"),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  catalog FILE   Load a pad catalog from JSON (default: 10-pad urine strip)");
    println!("  build DIR      Build the reference table from calibration CSVs in DIR");
    println!("  save FILE      Persist the reference table to a SQLite file");
    println!("  load FILE      Load a previously saved reference table");
    println!("  analyze DIR    Classify the strip whose patch images are in DIR");
    println!("  export FILE    Write the last report as CSV");
    println!("  status         Show catalog/table/report state");
    println!("  clear          Drop the reference table and last report");
    println!("  quit           Exit");
}

fn main() {
    env_logger::init();

    println!("stripscan interactive shell. Type 'help' for commands.");
    let mut shell = Shell::new();

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if !shell.dispatch(line.trim()) {
                    break;
                }
            }
            Err(error) => {
                eprintln!("Input error: {}", error);
                break;
            }
        }
    }
}
