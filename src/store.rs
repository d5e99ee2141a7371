//! Session-level collection of parsed scenario batches.
//!
//! The structural sharing in `im` keeps cloning cheap, so a reader takes
//! a whole-set snapshot and later replacements never show through.

use im::OrdMap;

use crate::core::{AlertRecord, Observation, ParsedBatch};

/// Parsed batches keyed by scenario name.
///
/// Loading a batch under a name that is already present replaces that
/// scenario's data wholesale; there is no incremental merge or partial
/// update. Engines receive merged snapshots and never see the map itself.
#[derive(Clone, Debug, Default)]
pub struct ScenarioSet {
    batches: OrdMap<String, ParsedBatch>,
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or wholesale-replace the batch for one scenario.
    pub fn load(&mut self, scenario: impl Into<String>, batch: ParsedBatch) {
        self.batches.insert(scenario.into(), batch);
    }

    pub fn remove(&mut self, scenario: &str) -> Option<ParsedBatch> {
        self.batches.remove(scenario)
    }

    pub fn get(&self, scenario: &str) -> Option<&ParsedBatch> {
        self.batches.get(scenario)
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.batches.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Merged snapshot of all loaded observations, ordered by scenario
    /// name, then source order within each batch.
    pub fn observations(&self) -> Vec<Observation> {
        self.batches
            .values()
            .flat_map(|batch| batch.observations.iter().cloned())
            .collect()
    }

    /// Merged snapshot of all loaded alert records, same ordering.
    pub fn alerts(&self) -> Vec<AlertRecord> {
        self.batches
            .values()
            .flat_map(|batch| batch.alerts.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Observation;

    fn batch_with(value: f64) -> ParsedBatch {
        ParsedBatch {
            observations: vec![Observation::new("Fill Rate", "1", value, "BASE")],
            alerts: vec![],
        }
    }

    #[test]
    fn reloading_a_scenario_replaces_its_batch_wholesale() {
        let mut set = ScenarioSet::new();
        set.load("BASE", batch_with(80.0));
        set.load("BASE", batch_with(95.0));

        assert_eq!(set.len(), 1);
        let observations = set.observations();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].value, 95.0);
    }

    #[test]
    fn snapshots_do_not_see_later_replacements() {
        let mut set = ScenarioSet::new();
        set.load("BASE", batch_with(80.0));

        let snapshot = set.clone();
        set.load("BASE", batch_with(95.0));

        assert_eq!(snapshot.observations()[0].value, 80.0);
        assert_eq!(set.observations()[0].value, 95.0);
    }

    #[test]
    fn observations_merge_in_scenario_name_order() {
        let mut set = ScenarioSet::new();
        set.load("S1", batch_with(70.0));
        set.load("BASE", batch_with(80.0));

        let names: Vec<&str> = set.scenario_names().collect();
        assert_eq!(names, vec!["BASE", "S1"]);
        assert_eq!(set.observations()[0].value, 80.0);
    }
}
