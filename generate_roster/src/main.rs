use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use generate_roster::cli::Cli;
use roster_core::output::OutputDoc;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let raw_text = fs::read_to_string(&cli.input)
        .map_err(|e| format!("cannot read {}: {}", cli.input.display(), e))?;

    let result = match serde_json::from_str::<serde_json::Value>(&raw_text) {
        Ok(value) => generate_roster::solve_document(value, cli.time_limit as f64),
        Err(e) => generate_roster::input_parse_document(&e.to_string()),
    };

    write_atomic(&cli.output, &result)?;
    println!("wrote {}", cli.output.display());
    Ok(())
}

/// Writes the document next to its destination and renames it into place,
/// so a killed process never leaves a truncated file behind.
fn write_atomic(path: &Path, doc: &OutputDoc) -> Result<(), String> {
    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| format!("cannot serialise result: {}", e))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| format!("cannot create temp file in {}: {}", dir.display(), e))?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.write_all(b"\n"))
        .map_err(|e| format!("cannot write result: {}", e))?;
    tmp.persist(path)
        .map_err(|e| format!("cannot move result into place: {}", e))?;
    Ok(())
}
