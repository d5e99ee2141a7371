use crate::core::metrics::alert_totals;
use crate::core::AlertKind;
use crate::kpi::{compute_kpis, KpiDefinition, KpiMatrix};
use crate::store::ScenarioSet;
use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Snapshot handed to report writers.
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub timestamp: DateTime<Utc>,
    pub scenarios: Vec<String>,
    pub kpis: KpiMatrix,
    pub alerts: BTreeMap<String, BTreeMap<AlertKind, u64>>,
}

/// Aggregate everything currently loaded into a report snapshot.
pub fn build_report(set: &ScenarioSet, definitions: &[KpiDefinition]) -> ScenarioReport {
    let observations = set.observations();
    let alerts = set.alerts();
    ScenarioReport {
        timestamp: Utc::now(),
        scenarios: set.scenario_names().map(str::to_string).collect(),
        kpis: compute_kpis(&observations, definitions),
        alerts: alert_totals(&alerts),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &ScenarioReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ScenarioReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ScenarioReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_kpi_table(report)?;
        self.write_alert_table(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &ScenarioReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Scenario Comparison Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_kpi_table(&mut self, report: &ScenarioReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## KPIs")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| KPI | {} |", report.scenarios.join(" | "))?;
        writeln!(
            self.writer,
            "|-----|{}|",
            report.scenarios.iter().map(|_| "------").collect::<Vec<_>>().join("|")
        )?;
        for (kpi, per_scenario) in &report.kpis {
            let cells: Vec<String> = report
                .scenarios
                .iter()
                .map(|scenario| {
                    per_scenario
                        .get(scenario)
                        .map(|value| format!("{value:.2}"))
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            writeln!(self.writer, "| {} | {} |", kpi, cells.join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_alert_table(&mut self, report: &ScenarioReport) -> anyhow::Result<()> {
        if report.alerts.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Alerts")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Scenario | Severity | Count |")?;
        writeln!(self.writer, "|----------|----------|-------|")?;
        for (scenario, kinds) in &report.alerts {
            for (kind, count) in kinds {
                writeln!(
                    self.writer,
                    "| {} | {} | {} |",
                    scenario,
                    kind.display_name(),
                    count
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ScenarioReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} ({} scenarios loaded)",
            "Scenario Comparison".bold(),
            report.scenarios.len()
        )?;
        for (kpi, per_scenario) in &report.kpis {
            writeln!(self.writer, "  {}", kpi.cyan())?;
            for (scenario, value) in per_scenario {
                writeln!(self.writer, "    {scenario}: {value:.2}")?;
            }
        }
        for (scenario, kinds) in &report.alerts {
            let critical = kinds.get(&AlertKind::Critical).copied().unwrap_or(0);
            let line = format!("  {scenario}: {} alert kinds", kinds.len());
            if critical > 0 {
                writeln!(self.writer, "{} ({} critical)", line.red(), critical)?;
            } else {
                writeln!(self.writer, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Writer factory keyed by output format.
pub fn create_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
