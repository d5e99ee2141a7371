pub mod series;
pub mod table;

pub use series::{category_series, SeriesRow};
pub use table::{pivot, Dimension, PivotAggregation, PivotTable};
