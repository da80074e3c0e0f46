//! Configuration loading from dllscan.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{ScanError, ScanResult};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "dllscan.toml";

/// Attribute literal marking an exported declaration on Windows toolchains.
pub const DEFAULT_EXPORT_ATTRIBUTE: &str = "__declspec(dllexport)";

/// Spaces per nesting level in the written manifest.
pub const DEFAULT_INDENT: usize = 3;

/// Main configuration structure for dllscan.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ScanConfig {
    /// Attribute literal that binds the export macro.
    pub export_attribute: Option<String>,
    /// Print verbose run details after the summary.
    pub verbose: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct OutputConfig {
    /// Spaces per nesting level.
    pub indent: Option<usize>,
}

impl ScanConfig {
    pub fn export_attribute(&self) -> &str {
        self.export_attribute
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_EXPORT_ATTRIBUTE)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn indent(&self) -> usize {
        self.output
            .as_ref()
            .and_then(|o| o.indent)
            .unwrap_or(DEFAULT_INDENT)
    }
}

/// Parses configuration text. `path` is only used for error context.
pub fn parse_config(path: &Path, content: &str) -> ScanResult<ScanConfig> {
    toml::from_str(content).map_err(|e| ScanError::config(path, e.to_string()))
}

/// Loads configuration from an explicit file. The file must exist.
pub fn load_config_file(path: &Path) -> ScanResult<ScanConfig> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::config(path, e.to_string()))?;
    parse_config(path, &content)
}

/// Loads configuration from `dir/dllscan.toml` if it exists.
pub fn load_config(dir: &Path) -> ScanResult<Option<ScanConfig>> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.export_attribute(), "__declspec(dllexport)");
        assert!(!cfg.verbose());
        assert_eq!(cfg.indent(), 3);
    }

    #[test]
    fn test_parse_full_config() {
        let cfg = parse_config(
            &PathBuf::from("dllscan.toml"),
            r#"
export_attribute = "__attribute__((visibility(\"default\")))"
verbose = true

[output]
indent = 2
"#,
        )
        .unwrap();
        assert_eq!(
            cfg.export_attribute(),
            "__attribute__((visibility(\"default\")))"
        );
        assert!(cfg.verbose());
        assert_eq!(cfg.indent(), 2);
    }

    #[test]
    fn test_empty_attribute_falls_back() {
        let cfg = parse_config(&PathBuf::from("dllscan.toml"), "export_attribute = \"\"").unwrap();
        assert_eq!(cfg.export_attribute(), DEFAULT_EXPORT_ATTRIBUTE);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config(&PathBuf::from("bad.toml"), "verbose = [").unwrap_err();
        assert!(matches!(err, ScanError::Config { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("bad.toml")));
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = std::env::temp_dir().join("dllscan_config_missing_dir_does_not_exist");
        assert_eq!(load_config(&dir).unwrap(), None);
    }
}
