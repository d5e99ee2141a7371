pub mod output;

pub use output::{build_report, create_writer, OutputFormat, ReportWriter, ScenarioReport};
