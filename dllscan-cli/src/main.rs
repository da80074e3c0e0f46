//! dllscan CLI - export manifest generator for C/C++ DLL sources.
//!
//! Usage: `dllscan <source.c> <output.json> <schema_version>`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use dllscan_core::{
    init_structured_logging, load_config, load_config_file, parse_schema_version, print_summary,
    ScanConfig, ScanResult, Scanner,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a JSON manifest of DLL-exported functions")]
pub struct Cli {
    /// C/C++ source file to scan
    source: PathBuf,

    /// Where to write the JSON manifest
    output: PathBuf,

    /// Schema version recorded in the manifest (base-10 integer)
    #[arg(allow_hyphen_values = true)]
    schema_version: String,

    /// Print extra details about the scan
    #[arg(long, short)]
    verbose: bool,

    /// Attribute literal the export macro is defined to
    #[arg(long, value_name = "LITERAL")]
    attribute: Option<String>,

    /// Configuration file (defaults to ./dllscan.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn resolve_config(cli: &Cli) -> Result<ScanConfig> {
    let cfg = match &cli.config {
        Some(path) => Some(load_config_file(path)?),
        None => load_config(Path::new("."))?,
    };
    Ok(cfg.unwrap_or_default())
}

/// Wraps a core error with the name of the stage that failed.
fn stage_context<T>(result: ScanResult<T>, subject: &Path) -> Result<T> {
    result.map_err(|e| {
        let stage = e.stage();
        anyhow::Error::new(e).context(format!("{} stage failed for {}", stage, subject.display()))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = resolve_config(&cli).context("Failed to load configuration")?;
    if let Some(attribute) = &cli.attribute {
        config.export_attribute = Some(attribute.clone());
    }
    let verbose = cli.verbose || config.verbose();

    init_structured_logging(verbose);

    let schema_version = stage_context(parse_schema_version(&cli.schema_version), &cli.source)?;

    let outcome = stage_context(
        Scanner::from_config(&config).run(&cli.source, &cli.output, schema_version),
        &cli.source,
    )?;

    print_summary(&outcome, verbose).context("Failed to print summary")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dllscan_core::ScanError;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_three_positionals() {
        let cli = Cli::try_parse_from(["dllscan", "in.c", "out.json", "3"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("in.c"));
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert_eq!(cli.schema_version, "3");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_missing_positional_is_usage_error() {
        assert!(Cli::try_parse_from(["dllscan", "in.c", "out.json"]).is_err());
    }

    #[test]
    fn test_non_numeric_version_reaches_core() {
        let cli = Cli::try_parse_from(["dllscan", "in.c", "out.json", "v2"]).unwrap();
        assert!(parse_schema_version(&cli.schema_version).is_err());
    }

    #[test]
    fn test_stage_context_names_stage() {
        let err = stage_context(parse_schema_version("v2"), Path::new("in.c")).unwrap_err();
        assert_eq!(err.to_string(), "arguments stage failed for in.c");
        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::InvalidSchemaVersion { .. })
        ));

        let missing = Scanner::new().run("/nonexistent/dllscan/in.c", "out.json", 1);
        let err = stage_context(missing, Path::new("/nonexistent/dllscan/in.c")).unwrap_err();
        assert!(err.to_string().starts_with("read stage failed for"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "dllscan", "--verbose", "--attribute", "EXPORT_ATTR", "in.c", "out.json", "-1",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.attribute.as_deref(), Some("EXPORT_ATTR"));
        assert_eq!(cli.schema_version, "-1");
    }
}
