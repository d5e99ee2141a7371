use crate::core::{AlertKind, AlertRecord, Observation};
use std::collections::BTreeMap;

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percent change from `base` to `new`.
///
/// By convention the change from a zero base is 0, never an error or NaN.
pub fn percent_change(base: f64, new: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    (new - base) / base.abs() * 100.0
}

/// Group observations by (category, scenario), preserving source order
/// within each group.
pub fn group_by_category_scenario(
    observations: &[Observation],
) -> BTreeMap<(&str, &str), Vec<&Observation>> {
    observations.iter().fold(BTreeMap::new(), |mut acc, obs| {
        acc.entry((obs.category.as_str(), obs.scenario.as_str()))
            .or_default()
            .push(obs);
        acc
    })
}

/// Total alert counts per scenario and severity.
pub fn alert_totals(alerts: &[AlertRecord]) -> BTreeMap<String, BTreeMap<AlertKind, u64>> {
    alerts.iter().fold(BTreeMap::new(), |mut acc, alert| {
        *acc.entry(alert.scenario.clone())
            .or_default()
            .entry(alert.kind)
            .or_insert(0) += alert.count;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_matches_sum_over_count() {
        let values = [80.0, 85.0, 90.0];
        assert_eq!(mean(&values), 255.0 / 3.0);
    }

    #[test]
    fn percent_change_from_zero_base_is_zero() {
        assert_eq!(percent_change(0.0, 42.0), 0.0);
        assert_eq!(percent_change(0.0, -42.0), 0.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn percent_change_uses_absolute_base() {
        assert_eq!(percent_change(-50.0, -25.0), 50.0);
        assert_eq!(percent_change(100.0, 120.0), 20.0);
    }

    #[test]
    fn grouping_preserves_source_order() {
        let observations = vec![
            Observation::new("Fill Rate", "1", 80.0, "BASE"),
            Observation::new("Fill Rate", "2", 85.0, "BASE"),
            Observation::new("Backlog", "1", 5.0, "BASE"),
        ];
        let groups = group_by_category_scenario(&observations);
        assert_eq!(groups.len(), 2);
        let fill = &groups[&("Fill Rate", "BASE")];
        assert_eq!(fill[0].value, 80.0);
        assert_eq!(fill[1].value, 85.0);
    }

    #[test]
    fn alert_totals_accumulate_per_kind() {
        let alerts = vec![
            AlertRecord {
                kind: AlertKind::Critical,
                count: 5,
                scenario: "BASE".into(),
            },
            AlertRecord {
                kind: AlertKind::Critical,
                count: 2,
                scenario: "BASE".into(),
            },
            AlertRecord {
                kind: AlertKind::Capacity,
                count: 1,
                scenario: "S1".into(),
            },
        ];
        let totals = alert_totals(&alerts);
        assert_eq!(totals["BASE"][&AlertKind::Critical], 7);
        assert_eq!(totals["S1"][&AlertKind::Capacity], 1);
    }
}
