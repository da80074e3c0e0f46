//! Manifest model and JSON rendering.
//!
//! Output layout (3-space indent by default):
//!
//! ```text
//! {
//!    "schema_version": 2,
//!    "source": "exporter.c",
//!    "timestamp": "2026-10-19T14:03:07+02:00",
//!    "exported_functions": [
//!       {
//!          "name": "fast_add",
//!          "return_type": "int",
//!          "args": "int a, int b"
//!       }
//!    ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{ScanError, ScanResult};
use crate::extract::FunctionSignature;

/// The public surface of one source file plus run metadata.
///
/// Field order here is the field order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub schema_version: i64,
    /// Source path exactly as given on the command line
    pub source: String,
    pub timestamp: String,
    pub exported_functions: Vec<FunctionSignature>,
}

impl Manifest {
    pub fn new(
        schema_version: i64,
        source: impl Into<String>,
        timestamp: impl Into<String>,
        exported_functions: Vec<FunctionSignature>,
    ) -> Self {
        Self {
            schema_version,
            source: source.into(),
            timestamp: timestamp.into(),
            exported_functions,
        }
    }

    pub fn function_count(&self) -> usize {
        self.exported_functions.len()
    }

    /// Renders the manifest as pretty JSON with a trailing newline.
    pub fn to_json(&self, indent: usize) -> serde_json::Result<String> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::with_capacity(256 + self.exported_functions.len() * 96);
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(serde::ser::Error::custom)
    }
}

/// Parses the schema version argument (base 10, surrounding whitespace allowed).
pub fn parse_schema_version(value: &str) -> ScanResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ScanError::InvalidSchemaVersion {
            value: value.to_string(),
        })
}
