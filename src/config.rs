//! Library configuration: the KPI table and the scenario registry,
//! loadable from a TOML file with built-in defaults for every field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::kpi::definitions::{builtin_definitions, KpiDefinition};
use crate::scenario::{builtin_scenarios, Scenario, ScenarioRegistry};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanmapConfig {
    /// KPI definitions applied by the aggregation engine.
    #[serde(default = "default_kpis")]
    pub kpis: Vec<KpiDefinition>,

    /// Known planning scenarios with display metadata.
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<Scenario>,
}

impl Default for PlanmapConfig {
    fn default() -> Self {
        Self {
            kpis: default_kpis(),
            scenarios: default_scenarios(),
        }
    }
}

impl PlanmapConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PlanmapConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Build the immutable registry handed to scenario-aware callers.
    pub fn registry(&self) -> ScenarioRegistry {
        ScenarioRegistry::new(self.scenarios.clone())
    }

    /// Validate cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), String> {
        for validation in self.collect_validations() {
            validation?;
        }
        Ok(())
    }

    fn collect_validations(&self) -> Vec<Result<(), String>> {
        vec![
            Self::validate_unique("KPI", self.kpis.iter().map(|k| k.name.as_str())),
            Self::validate_unique("scenario", self.scenarios.iter().map(|s| s.name.as_str())),
            self.validate_kpi_fields(),
            self.validate_scenario_colors(),
        ]
    }

    // Pure function: Reject empty and duplicated names
    fn validate_unique<'a>(
        what: &str,
        names: impl Iterator<Item = &'a str>,
    ) -> Result<(), String> {
        let mut seen = std::collections::BTreeSet::new();
        for name in names {
            if name.is_empty() {
                return Err(format!("{} name must not be empty", what));
            }
            if !seen.insert(name) {
                return Err(format!("duplicate {} name: {}", what, name));
            }
        }
        Ok(())
    }

    fn validate_kpi_fields(&self) -> Result<(), String> {
        for kpi in &self.kpis {
            if kpi.source_category.is_empty() {
                return Err(format!("KPI {} has an empty source category", kpi.name));
            }
        }
        Ok(())
    }

    fn validate_scenario_colors(&self) -> Result<(), String> {
        for scenario in &self.scenarios {
            if !Self::is_valid_color(&scenario.color) {
                return Err(format!(
                    "scenario {} has an invalid color: {}",
                    scenario.name, scenario.color
                ));
            }
        }
        Ok(())
    }

    // Pure function: Check a "#rrggbb" hex color
    fn is_valid_color(color: &str) -> bool {
        color.len() == 7
            && color.starts_with('#')
            && color[1..].bytes().all(|b| b.is_ascii_hexdigit())
    }
}

fn default_kpis() -> Vec<KpiDefinition> {
    builtin_definitions()
}

fn default_scenarios() -> Vec<Scenario> {
    builtin_scenarios()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert_eq!(PlanmapConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_toml_falls_back_to_builtin_tables() {
        let config: PlanmapConfig = toml::from_str("").unwrap();
        assert_eq!(config.kpis, builtin_definitions());
        assert_eq!(config.scenarios, builtin_scenarios());
    }

    #[test]
    fn duplicate_kpi_names_are_rejected() {
        let mut config = PlanmapConfig::default();
        let duplicate = config.kpis[0].clone();
        config.kpis.push(duplicate);
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_colors_are_rejected() {
        let mut config = PlanmapConfig::default();
        config.scenarios[0].color = "blue".to_string();
        assert!(config.validate().is_err());
    }
}
