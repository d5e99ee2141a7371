pub mod errors;
pub mod metrics;

use serde::{Deserialize, Serialize};

/// One numeric measurement extracted from a planning table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// Category the row belongs to, e.g. "Fill Rate". Never empty.
    pub category: String,
    /// Verbatim column label from the source header, e.g. "12" or "Week 12".
    pub week: String,
    /// Always finite; non-numeric cells never produce an observation.
    pub value: f64,
    /// Name of the planning alternative the source file was loaded under.
    pub scenario: String,
}

impl Observation {
    pub fn new(
        category: impl Into<String>,
        week: impl Into<String>,
        value: f64,
        scenario: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            week: week.into(),
            value,
            scenario: scenario.into(),
        }
    }
}

/// Severity buckets for alert categories.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertKind {
    Critical,
    Capacity,
    Supporting,
    General,
}

impl AlertKind {
    /// Display name used in reports.
    pub fn display_name(&self) -> &str {
        match self {
            AlertKind::Critical => "Critical",
            AlertKind::Capacity => "Capacity",
            AlertKind::Supporting => "Supporting",
            AlertKind::General => "General",
        }
    }
}

/// A count of flagged conditions of one severity, per scenario.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertRecord {
    pub kind: AlertKind,
    pub count: u64,
    pub scenario: String,
}

/// A week-bearing column discovered in the header line.
///
/// `index` is the cell position within the split line; `label` is the
/// verbatim header text for that cell.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekColumn {
    pub index: usize,
    pub label: String,
}

/// Everything extracted from one (file, scenario) parse call.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedBatch {
    pub observations: Vec<Observation>,
    pub alerts: Vec<AlertRecord>,
}

impl ParsedBatch {
    /// Whether the parse yielded anything usable.
    ///
    /// An empty batch is not a failure: the header and week columns were
    /// found, the body just produced no records. Callers should surface
    /// `Empty` to the user as a probable file-format mismatch.
    pub fn status(&self) -> BatchStatus {
        if self.observations.is_empty() && self.alerts.is_empty() {
            BatchStatus::Empty
        } else {
            BatchStatus::Populated
        }
    }
}

/// Distinguishes a structurally valid parse that yielded nothing from one
/// that produced records.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BatchStatus {
    Populated,
    Empty,
}
