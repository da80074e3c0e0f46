//! Exported function signature extraction.
//!
//! Line-oriented and deliberately crude. A declaration is recognized only when
//! a single line reads
//!
//! ```text
//! <MACRO> <return_type> <name>(<args>) ...
//! ```
//!
//! with the macro at column 0. Multi-token return types (`unsigned int`),
//! signatures split across lines and nested parentheses are not understood.
//! Such lines are skipped, never reported as errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One exported declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function identifier (may carry a leading `*` for `char *name(...)`)
    pub name: String,
    /// First token after the macro, e.g. `int`, `char*`
    pub return_type: String,
    /// Raw text between the parentheses, untouched
    pub args: String,
}

/// Result of scanning one source for exported declarations.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Signatures in source line order
    pub functions: Vec<FunctionSignature>,
    /// 1-indexed lines that start with the macro but did not decompose
    pub skipped_lines: Vec<usize>,
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Decomposes the text following the macro into a signature.
///
/// Grammar:
/// - `return_type`: non-empty run up to space, tab or `(`
/// - at least one whitespace character
/// - `name`: non-empty run up to space or `(`
/// - optional whitespace, `(`, then everything up to the first `)`
pub fn parse_signature(rest: &str) -> Option<FunctionSignature> {
    let rest = rest.trim_start_matches(is_horizontal_space);

    let ret_end = rest
        .find(|c: char| is_horizontal_space(c) || c == '(')
        .unwrap_or(rest.len());
    if ret_end == 0 {
        return None;
    }
    let (return_type, tail) = rest.split_at(ret_end);

    let after_sep = tail.trim_start_matches(|c: char| c.is_ascii_whitespace());
    if after_sep.len() == tail.len() {
        return None;
    }

    let name_end = after_sep
        .find(|c: char| c == ' ' || c == '(')
        .unwrap_or(after_sep.len());
    if name_end == 0 {
        return None;
    }
    let (name, tail) = after_sep.split_at(name_end);

    let tail = tail
        .trim_start_matches(|c: char| c.is_ascii_whitespace())
        .strip_prefix('(')?;
    let close = tail.find(')')?;

    Some(FunctionSignature {
        name: name.to_string(),
        return_type: return_type.to_string(),
        args: tail[..close].to_string(),
    })
}

/// Extracts every exported declaration introduced by `export_macro`.
///
/// Lines must begin with the macro exactly; indented declarations are ignored.
/// Duplicate names are kept as written.
pub fn extract_signatures<'a, I>(lines: I, export_macro: &str) -> ExtractionResult
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = ExtractionResult::default();

    for (index, line) in lines.into_iter().enumerate() {
        let Some(rest) = line.strip_prefix(export_macro) else {
            continue;
        };
        match parse_signature(rest) {
            Some(sig) => result.functions.push(sig),
            None => {
                debug!(line = index + 1, "skipping line without a full signature");
                result.skipped_lines.push(index + 1);
            }
        }
    }

    result
}
