//! Static KPI configuration.
//!
//! A KPI is declarative: which category feeds it, how that category's
//! observations collapse into one number per scenario, how the value is
//! displayed, and which direction of change reads as an improvement.

use serde::{Deserialize, Serialize};

/// Category names feeding the derived supply/demand ratio.
pub const SUPPLY_CATEGORY: &str = "Available Supply";
pub const DEMAND_CATEGORY: &str = "Total Demand";

/// Name of the derived ratio KPI.
pub const SUPPLY_VS_DEMAND: &str = "Supply vs Demand";

/// How one category's observations collapse into a single number.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Average,
    Sum,
    /// Value of the observation with the largest week ordinal.
    Last,
    Min,
    Max,
}

/// Which direction of change reads as an improvement.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    UpIsGood,
    DownIsGood,
    /// Neither direction is inherently good, e.g. raw demand.
    Balanced,
}

/// Display formatting hint for presentation consumers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Percent,
    Count,
    Currency,
    Ratio,
}

/// Declarative description of one summary metric.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KpiDefinition {
    pub name: String,
    /// Observation category this KPI summarizes.
    pub source_category: String,
    pub aggregation: Aggregation,
    pub format: ValueFormat,
    pub sign: SignConvention,
}

impl KpiDefinition {
    pub fn new(
        name: impl Into<String>,
        source_category: impl Into<String>,
        aggregation: Aggregation,
        format: ValueFormat,
        sign: SignConvention,
    ) -> Self {
        Self {
            name: name.into(),
            source_category: source_category.into(),
            aggregation,
            format,
            sign,
        }
    }
}

/// The KPI table the product ships with.
pub fn builtin_definitions() -> Vec<KpiDefinition> {
    use Aggregation::*;
    use SignConvention::*;
    use ValueFormat::*;

    vec![
        KpiDefinition::new("Fill Rate", "Fill Rate", Average, Percent, UpIsGood),
        KpiDefinition::new("On-Time Delivery", "On-Time Delivery", Average, Percent, UpIsGood),
        KpiDefinition::new("Total Demand", DEMAND_CATEGORY, Sum, Count, Balanced),
        KpiDefinition::new("Available Supply", SUPPLY_CATEGORY, Sum, Count, Balanced),
        KpiDefinition::new("Projected Inventory", "Projected Inventory", Last, Count, Balanced),
        KpiDefinition::new("Backlog", "Backlog", Last, Count, DownIsGood),
        KpiDefinition::new("Capacity Utilization", "Capacity Utilization", Average, Percent, Balanced),
        KpiDefinition::new("Plan Cost", "Plan Cost", Sum, Currency, DownIsGood),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let definitions = builtin_definitions();
        let mut names: Vec<_> = definitions.iter().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), definitions.len());
    }

    #[test]
    fn builtin_table_covers_ratio_inputs() {
        let definitions = builtin_definitions();
        assert!(definitions.iter().any(|d| d.source_category == SUPPLY_CATEGORY));
        assert!(definitions.iter().any(|d| d.source_category == DEMAND_CATEGORY));
    }
}
