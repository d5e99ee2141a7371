//! Per-week series for one category across scenarios, shaped for chart
//! consumers: one row per week, scenario name -> value.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Serialize;

use crate::core::Observation;
use crate::ingest::week::compare_week_labels;

/// One charted week.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SeriesRow {
    pub week: String,
    pub values: BTreeMap<String, f64>,
}

/// Filter to `category`, group by week, one row per week.
///
/// Within a (week, scenario) pair the last observation wins. Rows are
/// ordered by week ordinal, falling back to lexicographic label order
/// when no ordinal is extractable.
pub fn category_series(observations: &[Observation], category: &str) -> Vec<SeriesRow> {
    let mut rows: Vec<SeriesRow> = Vec::new();
    let mut row_index: HashMap<&str, usize> = HashMap::new();

    for obs in observations.iter().filter(|o| o.category == category) {
        let index = *row_index.entry(obs.week.as_str()).or_insert_with(|| {
            rows.push(SeriesRow {
                week: obs.week.clone(),
                values: BTreeMap::new(),
            });
            rows.len() - 1
        });
        rows[index].values.insert(obs.scenario.clone(), obs.value);
    }

    rows.sort_by(|a, b| compare_week_labels(&a.week, &b.week));
    rows
}
