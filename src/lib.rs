// Export modules for library usage
pub mod config;
pub mod core;
pub mod ingest;
pub mod io;
pub mod kpi;
pub mod pivot;
pub mod scenario;
pub mod store;

// Re-export commonly used types
pub use crate::core::errors::ParseError;
pub use crate::core::metrics::{alert_totals, mean, percent_change};
pub use crate::core::{
    AlertKind, AlertRecord, BatchStatus, Observation, ParsedBatch, WeekColumn,
};

pub use crate::config::PlanmapConfig;

pub use crate::ingest::{
    classifier::{classify_line, LineKind, ParsePhase},
    parser::parse_scenario_table,
    week::{compare_week_labels, week_ordinal},
};

pub use crate::kpi::{
    builtin_definitions, compare_to_baseline, compute_kpis, Aggregation, DeltaDirection,
    KpiDefinition, KpiDelta, KpiMatrix, SignConvention, ValueFormat,
};

pub use crate::pivot::{category_series, pivot, Dimension, PivotAggregation, PivotTable, SeriesRow};

pub use crate::scenario::{Scenario, ScenarioRegistry};

pub use crate::store::ScenarioSet;

pub use crate::io::output::{
    build_report, create_writer, OutputFormat, ReportWriter, ScenarioReport,
};
