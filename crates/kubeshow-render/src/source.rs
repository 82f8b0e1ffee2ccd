//! Source header parsing and path normalization
//!
//! Rendered documents carry a `# Source: <chart>/<path>` comment naming the
//! template they came from. Selection works on `<path>`, the part after the
//! chart name, always written with `/` separators.

use crate::assemble::SOURCE_PREFIX;

/// Canonical separator for logical paths
pub const CANONICAL_SEPARATOR: char = '/';

/// Return the header value if `line` is a `# Source: ` comment
///
/// The space after the colon is required.
pub fn source_value(line: &str) -> Option<&str> {
    let value = strip_line_ending(line)
        .strip_prefix(SOURCE_PREFIX)?
        .strip_prefix(' ')?;
    Some(value.trim())
}

/// Extract the logical path from a source header value
///
/// `mychart/templates/deployment.yaml` becomes `templates/deployment.yaml`.
/// Returns `None` when there is no chart segment or no path after it.
pub fn logical_path(source: &str) -> Option<String> {
    let source = to_canonical(source.trim());
    let (chart, rest) = source.split_once(CANONICAL_SEPARATOR)?;
    if chart.is_empty() || rest.is_empty() {
        return None;
    }

    let segments: Vec<&str> = rest.split(CANONICAL_SEPARATOR).collect();
    Some(segments.join("/"))
}

/// Convert platform path separators to the canonical `/`
pub fn to_canonical(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == CANONICAL_SEPARATOR {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Drop a trailing `\n` or `\r\n`
pub(crate) fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
