//! Builder pattern API for running a scan.
//!
//! ```rust,ignore
//! use dllscan_core::prelude::*;
//!
//! let outcome = Scanner::new()
//!     .with_attribute("__declspec(dllexport)")
//!     .run("exporter.c", "exports.json", 1)?;
//!
//! println!("{} exported functions", outcome.manifest.function_count());
//! ```
//!
//! The pipeline is strictly sequential: read the source, detect the export
//! macro, extract signatures, then write the manifest. A manifest file only
//! appears once it is complete.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::clock::{Clock, LocalClock};
use crate::config::{ScanConfig, DEFAULT_EXPORT_ATTRIBUTE, DEFAULT_INDENT};
use crate::detect::detect_export_macro;
use crate::error::{IoResultExt, ScanError, ScanResult};
use crate::extract::extract_signatures;
use crate::manifest::Manifest;

/// Configured scan pipeline.
#[derive(Debug, Clone)]
pub struct Scanner<C = LocalClock> {
    /// Attribute literal bound by the export macro
    attribute: String,

    /// Spaces per nesting level in the written manifest
    indent: usize,

    /// Timestamp source
    clock: C,
}

impl Scanner<LocalClock> {
    /// Create a scanner with default settings and the local clock.
    pub fn new() -> Self {
        Self {
            attribute: DEFAULT_EXPORT_ATTRIBUTE.to_string(),
            indent: DEFAULT_INDENT,
            clock: LocalClock,
        }
    }

    /// Create a scanner from loaded configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new()
            .with_attribute(config.export_attribute())
            .with_indent(config.indent())
    }
}

impl Default for Scanner<LocalClock> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a completed scan produced.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Identifier the source binds to the export attribute
    pub export_macro: String,
    /// The manifest (written to `output` if set)
    pub manifest: Manifest,
    /// 1-indexed macro-prefixed lines that were not signatures
    pub skipped_lines: Vec<usize>,
    /// Where the manifest was written, if it was
    pub output: Option<PathBuf>,
}

impl<C: Clock> Scanner<C> {
    /// Set the attribute literal searched for by macro detection.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Set the manifest indentation width.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Replace the timestamp source.
    pub fn with_clock<D: Clock>(self, clock: D) -> Scanner<D> {
        Scanner {
            attribute: self.attribute,
            indent: self.indent,
            clock,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Scan in-memory source text. `source` is recorded in the manifest as-is.
    pub fn scan_source(&self, source: &str, text: &str, schema_version: i64) -> ScanResult<ScanOutcome> {
        // Pass 1: macro detection
        let export_macro = detect_export_macro(text.lines(), &self.attribute)
            .ok_or_else(|| ScanError::macro_not_found(source, &self.attribute))?;

        // Pass 2: signature extraction
        let extraction = extract_signatures(text.lines(), &export_macro);
        debug!(
            export_macro = %export_macro,
            functions = extraction.functions.len(),
            skipped = extraction.skipped_lines.len(),
            "signature extraction finished"
        );

        let manifest = Manifest::new(
            schema_version,
            source,
            self.clock.timestamp(),
            extraction.functions,
        );

        Ok(ScanOutcome {
            export_macro,
            manifest,
            skipped_lines: extraction.skipped_lines,
            output: None,
        })
    }

    /// Read and scan a source file without writing anything.
    pub fn scan_file(&self, input: &Path, schema_version: i64) -> ScanResult<ScanOutcome> {
        let bytes = fs::read(input).input_path(input)?;
        // Source files are not required to be UTF-8; stray bytes never matter to the grammar.
        let text = String::from_utf8_lossy(&bytes);
        self.scan_source(&input.display().to_string(), &text, schema_version)
    }

    /// Full pipeline: scan `input` and write the manifest to `output`.
    ///
    /// Nothing is written unless the scan succeeds.
    pub fn run(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        schema_version: i64,
    ) -> ScanResult<ScanOutcome> {
        let input = input.as_ref();
        let output = output.as_ref();

        let mut outcome = self.scan_file(input, schema_version)?;
        let json = outcome
            .manifest
            .to_json(self.indent)
            .map_err(|e| ScanError::output(output, io::Error::other(e)))?;
        write_manifest(output, &json)?;

        info!(
            source = %input.display(),
            output = %output.display(),
            functions = outcome.manifest.function_count(),
            "manifest written"
        );
        outcome.output = Some(output.to_path_buf());
        Ok(outcome)
    }
}

/// Write the manifest atomically (temp file + rename in the same directory).
///
/// A failed write leaves no partial manifest and no temp file behind.
pub fn write_manifest(path: &Path, contents: &str) -> ScanResult<()> {
    write_via_temp(path, |file| file.write_all(contents.as_bytes()))
}

/// Creates a temp file next to `path`, lets `fill` write it, then renames it
/// over `path`. The temp file is removed if either step fails.
fn write_via_temp<F>(path: &Path, fill: F) -> ScanResult<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ScanError::output(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
            )
        })?;

    // PID + nanosecond timestamp keeps concurrent runs from sharing a temp file
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_path = dir.join(format!(".{}.{}.{}.tmp", file_name, std::process::id(), nanos));

    let mut file = File::create(&temp_path).output_path(path)?;
    let written = fill(&mut file).and_then(|_| file.sync_all());
    drop(file);
    written.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ScanError::output(path, e)
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ScanError::output(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    const SRC: &str = "#define EXPORT __declspec(dllexport)\nEXPORT int add(int a, int b) {\n";

    #[test]
    fn test_builder_defaults() {
        let scanner = Scanner::new();
        assert_eq!(scanner.attribute(), "__declspec(dllexport)");
        assert_eq!(scanner.indent, 3);
    }

    #[test]
    fn test_from_config() {
        let cfg = crate::config::parse_config(
            Path::new("dllscan.toml"),
            "export_attribute = \"DLL_PUBLIC_ATTR\"\n[output]\nindent = 4\n",
        )
        .unwrap();
        let scanner = Scanner::from_config(&cfg);
        assert_eq!(scanner.attribute(), "DLL_PUBLIC_ATTR");
        assert_eq!(scanner.indent, 4);
    }

    #[test]
    fn test_scan_source_uses_clock() {
        let outcome = Scanner::new()
            .with_clock(FixedClock::new("2020-02-02T02:02:02+00:00"))
            .scan_source("mem.c", SRC, 5)
            .unwrap();
        assert_eq!(outcome.export_macro, "EXPORT");
        assert_eq!(outcome.manifest.timestamp, "2020-02-02T02:02:02+00:00");
        assert_eq!(outcome.manifest.schema_version, 5);
        assert_eq!(outcome.manifest.source, "mem.c");
        assert_eq!(outcome.manifest.function_count(), 1);
        assert!(outcome.output.is_none());
    }

    #[test]
    fn test_scan_source_macro_not_found() {
        let err = Scanner::new()
            .scan_source("mem.c", "int main(void) { return 0; }\n", 1)
            .unwrap_err();
        assert!(matches!(err, ScanError::MacroNotFound { .. }));
    }

    #[test]
    fn test_write_manifest_missing_dir() {
        let path = std::env::temp_dir()
            .join("dllscan_no_such_dir_for_write")
            .join("out.json");
        let err = write_manifest(&path, "{}").unwrap_err();
        assert!(matches!(err, ScanError::OutputNotWritable { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_fill_removes_temp_file() {
        let dir = std::env::temp_dir().join(format!("dllscan_fill_fail_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.json");

        let err = write_via_temp(&path, |file| {
            file.write_all(b"{\n   \"schema_version\"")?;
            Err(io::Error::other("no space left on device"))
        })
        .unwrap_err();

        assert!(matches!(err, ScanError::OutputNotWritable { .. }));
        assert!(!path.exists());
        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp file left behind");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_manifest_round_trip() {
        let dir = std::env::temp_dir().join(format!("dllscan_write_ok_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.json");

        write_manifest(&path, "{}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);

        fs::remove_dir_all(&dir).ok();
    }
}
