//! Maintenance Report

use std::io;

use jiff::Timestamp;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    equipment::Equipment,
    failures::{DEFAULT_RANKING_LIMIT, EquipmentFailures, top_equipment_failures},
    fleet::FleetStats,
    health::{FleetHealth, HealthStatus},
    policy::MaintenancePolicy,
    reliability::Reliability,
    technicians::{TechnicianSummary, summarize_technicians},
    work_orders::WorkOrder,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Every metric for a tenant at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceReport {
    /// The "now" the report was computed for.
    pub generated_at: Timestamp,

    /// Per-equipment health and the fleet score.
    pub health: FleetHealth,

    /// Work order counters.
    pub stats: FleetStats,

    /// Per-technician summaries.
    pub technicians: Vec<TechnicianSummary>,

    /// Most failing equipment.
    pub failures: Vec<EquipmentFailures>,

    /// Fleet MTBF and MTTR.
    pub reliability: Reliability,
}

impl MaintenanceReport {
    /// Compute every metric from `equipment` and `orders` as seen at `now`.
    pub fn compute(
        equipment: &[Equipment],
        orders: &[WorkOrder],
        now: Timestamp,
        policy: &MaintenancePolicy,
    ) -> Self {
        Self {
            generated_at: now,
            health: FleetHealth::evaluate(equipment, orders, now, policy),
            stats: FleetStats::compute(equipment.len(), orders, now, policy),
            technicians: summarize_technicians(orders, now),
            failures: top_equipment_failures(orders, DEFAULT_RANKING_LIMIT),
            reliability: Reliability::compute(equipment.len(), orders, now, policy),
        }
    }

    /// Render the report as text tables.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        self.write_summary(&mut out)?;
        write_table(&mut out, "Equipment health", self.health_table(), 2..7)?;
        write_table(&mut out, "Technicians", self.technician_table(), 2..7)?;
        write_table(&mut out, "Failure ranking", self.failure_table(), 1..2)?;

        Ok(())
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let stats = &self.stats;
        let reliability = &self.reliability;

        writeln!(out, "Maintenance report at {}", self.generated_at)?;
        writeln!(out)?;
        writeln!(
            out,
            " Equipment: {}  Fleet score: {:.1}  Critical: {}  Warning: {}",
            stats.equipment_count,
            self.health.score,
            self.health.count(HealthStatus::Critical),
            self.health.count(HealthStatus::Warning),
        )?;
        writeln!(
            out,
            " Active orders: {}  Overdue: {}  Completed this month: {} ({:+.1}%)",
            stats.active_orders, stats.overdue_orders, stats.completed_this_month, stats.monthly_trend,
        )?;
        writeln!(
            out,
            " Preventive: {}  Corrective: {}  Avg resolution: {:.1} h",
            stats.split.preventive, stats.split.corrective, stats.average_resolution_hours,
        )?;
        writeln!(
            out,
            " MTBF: {:.1} h  MTTR: {:.1} h  Downtime: {:.1} h",
            reliability.mtbf_hours, reliability.mttr_hours, reliability.total_downtime_hours,
        )?;

        Ok(())
    }

    fn health_table(&self) -> Builder {
        let mut builder = Builder::default();

        builder.push_record([
            "Equipment",
            "Status",
            "Failures",
            "MTBF (days)",
            "Days since maintenance",
            "Next maintenance",
            "Score",
        ]);

        for health in &self.health.equipment {
            builder.push_record([
                health.equipment_name.clone(),
                health.status.to_string(),
                health.failure_count.to_string(),
                format!("{:.1}", health.mtbf_days),
                health.days_since_maintenance.to_string(),
                health.next_maintenance.strftime("%Y-%m-%d").to_string(),
                health.score.to_string(),
            ]);
        }

        builder
    }

    fn technician_table(&self) -> Builder {
        let mut builder = Builder::default();

        builder.push_record([
            "Technician",
            "Tax id",
            "Orders",
            "Open",
            "In progress",
            "Completed",
            "Avg resolution (h)",
        ]);

        for summary in &self.technicians {
            builder.push_record([
                summary.technician.name.clone(),
                summary.technician.tax_id.clone(),
                summary.total_orders.to_string(),
                summary.by_status.open.to_string(),
                summary.by_status.in_progress.to_string(),
                summary.by_status.completed.to_string(),
                format!("{:.1}", summary.average_resolution_hours),
            ]);
        }

        builder
    }

    fn failure_table(&self) -> Builder {
        let mut builder = Builder::default();

        builder.push_record(["Equipment", "Failures"]);

        for entry in &self.failures {
            builder.push_record([entry.equipment_name.clone(), entry.failures.to_string()]);
        }

        builder
    }
}

fn write_table(
    out: &mut impl io::Write,
    title: &str,
    builder: Builder,
    numeric_columns: std::ops::Range<usize>,
) -> Result<(), ReportError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "\n{title}\n{table}")?;

    Ok(())
}
