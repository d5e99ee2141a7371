//! Registry of known planning scenarios.
//!
//! Scenarios are reference data: a fixed, small set of named planning
//! alternatives with display metadata. They are never derived from input
//! files. The registry is an immutable lookup table injected wherever
//! scenario metadata is needed, not a global.

use serde::{Deserialize, Serialize};

/// One named planning alternative with fixed display metadata.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    /// Hex display color, e.g. "#4c78a8", used by chart consumers.
    pub color: String,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            color: color.into(),
        }
    }
}

/// Immutable lookup table of the planning alternatives the product knows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// The scenario set the product ships with.
    pub fn builtin() -> Self {
        Self::new(builtin_scenarios())
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }
}

/// Built-in scenario table: the baseline plan plus four alternatives.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("BASE", "Baseline plan", "#4c78a8"),
        Scenario::new("S1", "Expedite critical orders", "#f58518"),
        Scenario::new("S2", "Add weekend shifts", "#54a24b"),
        Scenario::new("S3", "Alternate supplier mix", "#e45756"),
        Scenario::new("S4", "Demand shaping", "#72b7b2"),
    ]
}
