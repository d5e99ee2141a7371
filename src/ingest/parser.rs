//! Planning-table parser.
//!
//! Turns one spreadsheet-exported scenario table into normalized
//! observations and alert counts. The parse is a two-phase state machine:
//! scan a bounded window of leading lines for the header, then walk the
//! body keeping one piece of state, the active category.

use log::debug;

use crate::core::errors::ParseError;
use crate::core::{AlertRecord, Observation, ParsedBatch, WeekColumn};
use crate::ingest::classifier::{
    classify_line, is_week_cell, parse_finite, split_cells, LineKind, ParsePhase,
};

/// The header must appear within this many leading lines; exports carry a
/// few preamble lines at most.
pub const HEADER_SCAN_LIMIT: usize = 20;

/// Category a body row is attributed to.
#[derive(Clone, Debug, PartialEq)]
enum ActiveCategory {
    None,
    Data(String),
    /// Alert categories consume their own line; rows beneath them are not
    /// series data.
    Alert,
}

/// Parse one exported planning table into a batch of observations and
/// alert records for `scenario`.
///
/// Fails only on missing structure (no header, no week columns).
/// Malformed individual cells are skipped where they occur; a
/// structurally valid parse with zero yield returns an empty batch, which
/// callers can detect via [`ParsedBatch::status`].
pub fn parse_scenario_table(text: &str, scenario: &str) -> Result<ParsedBatch, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let (header_index, week_columns) = find_header(&lines)?;

    let mut batch = ParsedBatch::default();
    let mut current = ActiveCategory::None;

    for line in &lines[header_index + 1..] {
        match classify_line(line, ParsePhase::InBody) {
            LineKind::Blank | LineKind::Header => {}
            LineKind::CategoryLabel { name } => {
                // A category line doubles as its own first data row.
                collect_week_values(&mut batch, line, &week_columns, &name, scenario);
                current = ActiveCategory::Data(name);
            }
            LineKind::AlertCategoryLabel { name, kind } => {
                let count = alert_count(line);
                debug!("alert category {name:?}: count {count}");
                batch.alerts.push(AlertRecord {
                    kind,
                    count,
                    scenario: scenario.to_string(),
                });
                current = ActiveCategory::Alert;
            }
            LineKind::DataRow => match &current {
                ActiveCategory::Data(category) => {
                    collect_week_values(&mut batch, line, &week_columns, category, scenario);
                }
                _ => debug!("skipping data row with no active category: {line:?}"),
            },
        }
    }

    Ok(batch)
}

/// Locate the header line within the scan window and extract its week
/// columns.
fn find_header(lines: &[&str]) -> Result<(usize, Vec<WeekColumn>), ParseError> {
    let header_index = lines
        .iter()
        .take(HEADER_SCAN_LIMIT)
        .position(|line| matches!(classify_line(line, ParsePhase::SeekingHeader), LineKind::Header))
        .ok_or(ParseError::HeaderNotFound)?;

    let week_columns: Vec<WeekColumn> = split_cells(lines[header_index])
        .into_iter()
        .enumerate()
        .filter(|(_, cell)| is_week_cell(cell))
        .map(|(index, cell)| WeekColumn {
            index,
            label: cell.to_string(),
        })
        .collect();

    if week_columns.is_empty() {
        return Err(ParseError::NoWeekColumns);
    }
    Ok((header_index, week_columns))
}

/// Emit one observation per week column whose cell parses as a finite
/// number. Everything else in the row is skipped where it stands.
fn collect_week_values(
    batch: &mut ParsedBatch,
    line: &str,
    week_columns: &[WeekColumn],
    category: &str,
    scenario: &str,
) {
    let cells = split_cells(line);
    for column in week_columns {
        let Some(cell) = cells.get(column.index) else {
            continue;
        };
        match parse_finite(cell) {
            Some(value) => batch.observations.push(Observation {
                category: category.to_string(),
                week: column.label.clone(),
                value,
                scenario: scenario.to_string(),
            }),
            None => {
                if !cell.is_empty() {
                    debug!("skipping non-numeric cell {cell:?} under {category:?}");
                }
            }
        }
    }
}

/// The count on an alert line is the first cell after the category cell
/// that parses as a finite number; 0 when none does.
fn alert_count(line: &str) -> u64 {
    split_cells(line)
        .iter()
        .skip(1)
        .find_map(|cell| parse_finite(cell))
        .map(|value| value.max(0.0) as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_count_takes_first_numeric_cell() {
        assert_eq!(alert_count("Critical Alerts,notes,5,9"), 5);
        assert_eq!(alert_count("Critical Alerts"), 0);
        assert_eq!(alert_count("Critical Alerts,,,"), 0);
    }

    #[test]
    fn alert_count_clamps_negatives_to_zero() {
        assert_eq!(alert_count("General Alerts,-3"), 0);
    }

    #[test]
    fn header_scan_window_is_bounded() {
        let mut text = "preamble\n".repeat(HEADER_SCAN_LIMIT);
        text.push_str("Category,1,2\nFill Rate,80,85\n");
        assert_eq!(
            parse_scenario_table(&text, "BASE"),
            Err(ParseError::HeaderNotFound)
        );
    }
}
