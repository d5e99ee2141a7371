//! Line classification for planning-table exports.
//!
//! Rows in a spreadsheet export carry no type information; their kind has
//! to be recovered by inspecting cell content. Classification is kept
//! separate from interpretation so the parser's state machine and its
//! transitions stay independently testable.

use crate::core::AlertKind;

/// Substrings that identify the column-defining header line.
pub const HEADER_MARKERS: [&str; 3] = ["Week", "Requirements", "Category"];

/// Parser phase. The header transition is one-way: once a header has been
/// seen, lines are never considered header candidates again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsePhase {
    SeekingHeader,
    InBody,
}

/// The closed set of line kinds the parser distinguishes.
#[derive(Clone, Debug, PartialEq)]
pub enum LineKind {
    /// The column-defining header line. Only produced while seeking.
    Header,
    /// Starts a new data category; the same line may also carry values.
    CategoryLabel { name: String },
    /// Starts an alert category; carries one count, never series data.
    AlertCategoryLabel { name: String, kind: AlertKind },
    /// Numeric or blank-labelled cells under the active category.
    DataRow,
    Blank,
}

/// Split one exported line into trimmed cells. Plain comma split: the
/// export format has no quoting or escaping of embedded commas.
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parse a cell as a finite number. Text, empty cells, NaN and the
/// infinities are all rejected.
pub fn parse_finite(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether a header cell identifies a week column: purely ASCII digits,
/// or mentioning "Week".
pub fn is_week_cell(cell: &str) -> bool {
    (!cell.is_empty() && cell.bytes().all(|b| b.is_ascii_digit())) || cell.contains("Week")
}

/// Classify one line of the export.
///
/// While seeking the header, any line containing a header marker is the
/// header; first match wins. In the body the first cell alone decides
/// the kind: non-empty non-numeric text starts a category, everything
/// else is a data row.
pub fn classify_line(line: &str, phase: ParsePhase) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if phase == ParsePhase::SeekingHeader && is_header_line(line) {
        return LineKind::Header;
    }
    let first = line.split(',').next().unwrap_or("").trim();
    if first.is_empty() || parse_finite(first).is_some() {
        return LineKind::DataRow;
    }
    match alert_kind_of(first) {
        Some(kind) => LineKind::AlertCategoryLabel {
            name: first.to_string(),
            kind,
        },
        None => LineKind::CategoryLabel {
            name: first.to_string(),
        },
    }
}

fn is_header_line(line: &str) -> bool {
    HEADER_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Alert categories are recognized by substring, case-insensitively, and
/// bucketed by severity keywords in the same way.
fn alert_kind_of(name: &str) -> Option<AlertKind> {
    let lower = name.to_lowercase();
    if !lower.contains("alert") {
        return None;
    }
    let kind = if lower.contains("critical") {
        AlertKind::Critical
    } else if lower.contains("capacity") {
        AlertKind::Capacity
    } else if lower.contains("supporting") {
        AlertKind::Supporting
    } else {
        AlertKind::General
    };
    Some(kind)
}
