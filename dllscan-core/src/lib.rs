//! dllscan-core: export manifest extraction for C/C++ DLL sources
//!
//! Scans a source file for functions marked with its export macro (the
//! identifier `#define`d to `__declspec(dllexport)`) and produces a JSON
//! manifest of the exported surface for binding generators, docs and ABI
//! audits.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dllscan_core::prelude::*;
//!
//! let outcome = Scanner::new().run("exporter.c", "exports.json", 1)?;
//! for f in &outcome.manifest.exported_functions {
//!     println!("{} {}({})", f.return_type, f.name, f.args);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`detect`]: Export macro detection (pass 1)
//! - [`extract`]: Line-oriented signature extraction (pass 2)
//! - [`manifest`]: Manifest model and JSON rendering
//! - [`builder`]: Pipeline and atomic manifest output
//! - [`clock`]: Injectable timestamp source
//! - [`config`]: `dllscan.toml` loading
//! - [`report`]: Console summaries
//! - [`error`]: Typed error handling

pub mod builder;
pub mod clock;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod logging;
pub mod manifest;
pub mod prelude;
pub mod report;

// Error types
pub use error::{IoResultExt, ScanError, ScanResult};

// Pipeline
pub use builder::{write_manifest, ScanOutcome, Scanner};

// Timestamps
pub use clock::{Clock, FixedClock, LocalClock};

// Configuration
pub use config::{
    load_config, load_config_file, parse_config, OutputConfig, ScanConfig, CONFIG_FILE,
    DEFAULT_EXPORT_ATTRIBUTE, DEFAULT_INDENT,
};

// Passes
pub use detect::detect_export_macro;
pub use extract::{extract_signatures, parse_signature, ExtractionResult, FunctionSignature};
pub use manifest::{parse_schema_version, Manifest};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{print_summary, summary_line, verbose_lines, write_summary};
