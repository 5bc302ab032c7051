//! JSON and CSV export of the analytics report and the visit log.

mod report;
mod visit_log;

pub use visit_log::*;

/// Escape a field for CSV output (RFC 4180 quoting).
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
