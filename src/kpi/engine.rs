//! KPI aggregation engine.
//!
//! Collapses normalized observations into per-KPI, per-scenario summary
//! values. The engine never fails: a (KPI, scenario) combination with no
//! matching data is simply absent from the result, which is distinct from
//! a computed zero.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::core::metrics::{group_by_category_scenario, mean, percent_change};
use crate::core::Observation;
use crate::ingest::week::week_ordinal;
use crate::kpi::definitions::{
    Aggregation, KpiDefinition, SignConvention, DEMAND_CATEGORY, SUPPLY_CATEGORY, SUPPLY_VS_DEMAND,
};

/// KPI name -> scenario name -> summary value.
pub type KpiMatrix = BTreeMap<String, BTreeMap<String, f64>>;

/// Apply each KPI definition to the observations, then append the derived
/// supply/demand ratio.
pub fn compute_kpis(observations: &[Observation], definitions: &[KpiDefinition]) -> KpiMatrix {
    let groups = group_by_category_scenario(observations);

    let mut matrix = KpiMatrix::new();
    for definition in definitions {
        let mut per_scenario = BTreeMap::new();
        for ((category, scenario), group) in &groups {
            if *category == definition.source_category {
                per_scenario.insert(scenario.to_string(), aggregate(group, definition.aggregation));
            }
        }
        if !per_scenario.is_empty() {
            matrix.insert(definition.name.clone(), per_scenario);
        }
    }

    if let Some(ratios) = supply_vs_demand(&groups) {
        matrix.insert(SUPPLY_VS_DEMAND.to_string(), ratios);
    }
    matrix
}

/// Collapse one non-empty (category, scenario) group.
fn aggregate(group: &[&Observation], aggregation: Aggregation) -> f64 {
    match aggregation {
        Aggregation::Average => group_mean(group),
        Aggregation::Sum => group.iter().map(|o| o.value).sum(),
        Aggregation::Last => last_by_week(group),
        Aggregation::Min => group.iter().map(|o| o.value).fold(f64::INFINITY, f64::min),
        Aggregation::Max => group
            .iter()
            .map(|o| o.value)
            .fold(f64::NEG_INFINITY, f64::max),
    }
}

fn group_mean(group: &[&Observation]) -> f64 {
    let values: Vec<f64> = group.iter().map(|o| o.value).collect();
    mean(&values)
}

/// Value of the observation with the numerically largest week ordinal.
/// Ties keep insertion order: stable ascending sort, final element wins.
/// Labels without an extractable ordinal sort first.
fn last_by_week(group: &[&Observation]) -> f64 {
    let mut ordered = group.to_vec();
    ordered.sort_by_key(|o| week_ordinal(&o.week).unwrap_or(0));
    ordered.last().map(|o| o.value).unwrap_or(0.0)
}

/// Derived ratio: mean(Available Supply) / mean(Total Demand) per
/// scenario. Written only when both groups are non-empty and the demand
/// mean is non-zero; a zero demand mean omits the entry rather than
/// producing an infinity.
fn supply_vs_demand(
    groups: &BTreeMap<(&str, &str), Vec<&Observation>>,
) -> Option<BTreeMap<String, f64>> {
    let scenarios: BTreeSet<&str> = groups
        .keys()
        .filter(|(category, _)| *category == SUPPLY_CATEGORY || *category == DEMAND_CATEGORY)
        .map(|(_, scenario)| *scenario)
        .collect();

    let mut ratios = BTreeMap::new();
    for scenario in scenarios {
        let supply = groups.get(&(SUPPLY_CATEGORY, scenario));
        let demand = groups.get(&(DEMAND_CATEGORY, scenario));
        if let (Some(supply), Some(demand)) = (supply, demand) {
            let demand_mean = group_mean(demand);
            if demand_mean != 0.0 {
                ratios.insert(scenario.to_string(), group_mean(supply) / demand_mean);
            }
        }
    }
    (!ratios.is_empty()).then_some(ratios)
}

/// Direction of a KPI delta after applying the definition's sign
/// convention.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum DeltaDirection {
    Improved,
    Worsened,
    /// No change, or a balanced KPI where neither direction is good.
    Neutral,
}

/// One KPI compared between a scenario and the baseline.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct KpiDelta {
    pub kpi: String,
    pub scenario: String,
    pub base_value: f64,
    pub value: f64,
    pub change_pct: f64,
    pub direction: DeltaDirection,
}

/// Compare every scenario in the matrix against `baseline`, KPI by KPI.
///
/// KPIs or scenarios absent from the matrix yield no delta; there is
/// nothing meaningful to compare against.
pub fn compare_to_baseline(
    matrix: &KpiMatrix,
    baseline: &str,
    definitions: &[KpiDefinition],
) -> Vec<KpiDelta> {
    let mut deltas = Vec::new();
    for definition in definitions {
        let Some(per_scenario) = matrix.get(&definition.name) else {
            continue;
        };
        let Some(&base_value) = per_scenario.get(baseline) else {
            continue;
        };
        for (scenario, &value) in per_scenario {
            if scenario == baseline {
                continue;
            }
            let change_pct = percent_change(base_value, value);
            deltas.push(KpiDelta {
                kpi: definition.name.clone(),
                scenario: scenario.clone(),
                base_value,
                value,
                change_pct,
                direction: direction_of(change_pct, definition.sign),
            });
        }
    }
    deltas
}

fn direction_of(change_pct: f64, sign: SignConvention) -> DeltaDirection {
    if change_pct == 0.0 {
        return DeltaDirection::Neutral;
    }
    match sign {
        SignConvention::UpIsGood if change_pct > 0.0 => DeltaDirection::Improved,
        SignConvention::UpIsGood => DeltaDirection::Worsened,
        SignConvention::DownIsGood if change_pct < 0.0 => DeltaDirection::Improved,
        SignConvention::DownIsGood => DeltaDirection::Worsened,
        SignConvention::Balanced => DeltaDirection::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::definitions::ValueFormat;

    fn obs(category: &str, week: &str, value: f64, scenario: &str) -> Observation {
        Observation::new(category, week, value, scenario)
    }

    #[test]
    fn last_picks_largest_week_ordinal_not_source_order() {
        let observations = [
            obs("Backlog", "Week 10", 7.0, "BASE"),
            obs("Backlog", "Week 2", 12.0, "BASE"),
        ];
        let refs: Vec<&Observation> = observations.iter().collect();
        assert_eq!(last_by_week(&refs), 7.0);
    }

    #[test]
    fn last_resolves_ties_by_insertion_order() {
        let observations = [
            obs("Backlog", "3", 1.0, "BASE"),
            obs("Backlog", "3", 2.0, "BASE"),
        ];
        let refs: Vec<&Observation> = observations.iter().collect();
        assert_eq!(last_by_week(&refs), 2.0);
    }

    #[test]
    fn balanced_kpis_never_improve_or_worsen() {
        let definition = KpiDefinition::new(
            "Total Demand",
            "Total Demand",
            Aggregation::Sum,
            ValueFormat::Count,
            SignConvention::Balanced,
        );
        let mut matrix = KpiMatrix::new();
        matrix.insert(
            "Total Demand".to_string(),
            BTreeMap::from([("BASE".to_string(), 100.0), ("S1".to_string(), 150.0)]),
        );
        let deltas = compare_to_baseline(&matrix, "BASE", &[definition]);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].direction, DeltaDirection::Neutral);
        assert_eq!(deltas[0].change_pct, 50.0);
    }

    #[test]
    fn down_is_good_inverts_the_reading() {
        let definition = KpiDefinition::new(
            "Backlog",
            "Backlog",
            Aggregation::Last,
            ValueFormat::Count,
            SignConvention::DownIsGood,
        );
        let mut matrix = KpiMatrix::new();
        matrix.insert(
            "Backlog".to_string(),
            BTreeMap::from([("BASE".to_string(), 20.0), ("S1".to_string(), 10.0)]),
        );
        let deltas = compare_to_baseline(&matrix, "BASE", &[definition]);
        assert_eq!(deltas[0].direction, DeltaDirection::Improved);
    }

    #[test]
    fn missing_baseline_yields_no_deltas() {
        let definition = KpiDefinition::new(
            "Fill Rate",
            "Fill Rate",
            Aggregation::Average,
            ValueFormat::Percent,
            SignConvention::UpIsGood,
        );
        let mut matrix = KpiMatrix::new();
        matrix.insert(
            "Fill Rate".to_string(),
            BTreeMap::from([("S1".to_string(), 90.0)]),
        );
        assert!(compare_to_baseline(&matrix, "BASE", &[definition]).is_empty());
    }
}
