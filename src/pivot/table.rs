//! Generic two-dimensional pivot over observations.
//!
//! Unlike the KPI engine, which omits combinations with no matching data,
//! pivot cells for missing combinations hold 0. The divergence is
//! intentional parity with observed product behavior.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::metrics::mean;
use crate::core::Observation;
use crate::ingest::week::compare_week_labels;

/// Observation fields a pivot can group by.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Week,
    Scenario,
}

impl Dimension {
    fn extract<'a>(&self, obs: &'a Observation) -> &'a str {
        match self {
            Dimension::Category => &obs.category,
            Dimension::Week => &obs.week,
            Dimension::Scenario => &obs.scenario,
        }
    }
}

/// Aggregations available to pivots. `Count` tallies matching
/// observations; the rest fold their values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PivotAggregation {
    Average,
    Sum,
    Count,
    Min,
    Max,
}

/// A dense (row x column) table. `cells[i][j]` aggregates the
/// observations matching `(rows[i], cols[j])`; combinations with no
/// matching observations hold 0.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PivotTable {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Cell lookup by axis labels.
    pub fn value(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.rows.iter().position(|r| r == row)?;
        let j = self.cols.iter().position(|c| c == col)?;
        Some(self.cells[i][j])
    }
}

/// Build a pivot table over two observation dimensions.
///
/// Axis labels are ordered week-aware: numeric ordinal when extractable,
/// lexicographic otherwise.
pub fn pivot(
    observations: &[Observation],
    row_dim: Dimension,
    col_dim: Dimension,
    aggregation: PivotAggregation,
) -> PivotTable {
    let rows = axis_labels(observations, row_dim);
    let cols = axis_labels(observations, col_dim);

    let mut buckets: HashMap<(&str, &str), Vec<f64>> = HashMap::new();
    for obs in observations {
        buckets
            .entry((row_dim.extract(obs), col_dim.extract(obs)))
            .or_default()
            .push(obs.value);
    }

    let cells = rows
        .iter()
        .map(|row| {
            cols.iter()
                .map(|col| {
                    buckets
                        .get(&(row.as_str(), col.as_str()))
                        .map(|values| fold_values(values, aggregation))
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    PivotTable { rows, cols, cells }
}

fn axis_labels(observations: &[Observation], dimension: Dimension) -> Vec<String> {
    let mut labels: Vec<String> = observations
        .iter()
        .map(|obs| dimension.extract(obs).to_string())
        .collect();
    labels.sort_by(|a, b| compare_week_labels(a, b));
    labels.dedup();
    labels
}

fn fold_values(values: &[f64], aggregation: PivotAggregation) -> f64 {
    match aggregation {
        PivotAggregation::Average => mean(values),
        PivotAggregation::Sum => values.iter().sum(),
        PivotAggregation::Count => values.len() as f64,
        PivotAggregation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        PivotAggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Observation> {
        vec![
            Observation::new("Fill Rate", "1", 80.0, "BASE"),
            Observation::new("Fill Rate", "2", 90.0, "BASE"),
            Observation::new("Fill Rate", "1", 85.0, "S1"),
            Observation::new("Backlog", "1", 5.0, "BASE"),
        ]
    }

    #[test]
    fn missing_combinations_are_zero_filled() {
        let table = pivot(&sample(), Dimension::Category, Dimension::Scenario, PivotAggregation::Sum);
        // Backlog was never observed under S1.
        assert_eq!(table.value("Backlog", "S1"), Some(0.0));
        assert_eq!(table.value("Backlog", "BASE"), Some(5.0));
        assert_eq!(table.value("Fill Rate", "BASE"), Some(170.0));
    }

    #[test]
    fn count_tallies_matching_observations() {
        let table = pivot(&sample(), Dimension::Category, Dimension::Scenario, PivotAggregation::Count);
        assert_eq!(table.value("Fill Rate", "BASE"), Some(2.0));
        assert_eq!(table.value("Backlog", "S1"), Some(0.0));
    }

    #[test]
    fn week_axis_orders_numerically() {
        let observations = vec![
            Observation::new("Fill Rate", "10", 70.0, "BASE"),
            Observation::new("Fill Rate", "2", 80.0, "BASE"),
        ];
        let table = pivot(
            &observations,
            Dimension::Week,
            Dimension::Scenario,
            PivotAggregation::Average,
        );
        assert_eq!(table.rows, vec!["2".to_string(), "10".to_string()]);
    }

    #[test]
    fn unknown_labels_return_none() {
        let table = pivot(&sample(), Dimension::Category, Dimension::Scenario, PivotAggregation::Sum);
        assert_eq!(table.value("Fill Rate", "S9"), None);
    }
}
