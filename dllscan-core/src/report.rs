//! Console output - run summary and verbose details.

use std::io::{self, Write};

use crate::builder::ScanOutcome;

/// Formats the one-line summary printed after a successful run.
pub fn summary_line(outcome: &ScanOutcome) -> String {
    let count = outcome.manifest.function_count();
    match &outcome.output {
        Some(path) => format!(
            "Found {} exported functions. JSON written to {}",
            count,
            path.display()
        ),
        None => format!("Found {} exported functions.", count),
    }
}

/// Formats the extra lines shown in verbose mode.
pub fn verbose_lines(outcome: &ScanOutcome) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);
    if let Some(path) = &outcome.output {
        lines.push(format!(
            "Writing {} functions to {}",
            outcome.manifest.function_count(),
            path.display()
        ));
    }
    lines.push(format!(
        "[VERBOSE] File scanned for functions: {}",
        outcome.manifest.source
    ));
    lines.push(format!("[VERBOSE] Export macro: {}", outcome.export_macro));
    if !outcome.skipped_lines.is_empty() {
        let joined: Vec<String> = outcome.skipped_lines.iter().map(|l| l.to_string()).collect();
        lines.push(format!(
            "[VERBOSE] Skipped macro lines without a signature: {}",
            joined.join(", ")
        ));
    }
    lines
}

/// Writes the summary (and verbose details if requested) to `out`.
pub fn write_summary<W: Write>(out: &mut W, outcome: &ScanOutcome, verbose: bool) -> io::Result<()> {
    writeln!(out, "{}", summary_line(outcome))?;
    if verbose {
        for line in verbose_lines(outcome) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Prints the summary to stdout.
pub fn print_summary(outcome: &ScanOutcome, verbose: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_summary(&mut lock, outcome, verbose)
}
