pub mod definitions;
pub mod engine;

pub use definitions::{
    builtin_definitions, Aggregation, KpiDefinition, SignConvention, ValueFormat, DEMAND_CATEGORY,
    SUPPLY_CATEGORY, SUPPLY_VS_DEMAND,
};
pub use engine::{compare_to_baseline, compute_kpis, DeltaDirection, KpiDelta, KpiMatrix};
