//! Metric response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm::{
    failures::EquipmentFailures,
    fleet::FleetStats,
    health::{EquipmentHealth, FleetHealth},
    reliability::Reliability,
    report::MaintenanceReport,
    technicians::TechnicianSummary,
};

use crate::wire::HealthStatus;

/// Health of one piece of equipment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EquipmentHealthResponse {
    pub equipment_uuid: Uuid,
    pub equipment_name: String,
    pub status: HealthStatus,
    /// Corrective orders raised against the equipment
    pub failure_count: usize,
    pub days_since_installation: i64,
    pub days_since_maintenance: i64,
    /// Mean days between failures
    pub mtbf_days: f64,
    pub last_maintenance: Option<String>,
    pub next_maintenance: String,
    /// Score from 0 to 100
    pub score: u8,
}

impl From<EquipmentHealth> for EquipmentHealthResponse {
    fn from(health: EquipmentHealth) -> Self {
        EquipmentHealthResponse {
            equipment_uuid: health.equipment_uuid,
            equipment_name: health.equipment_name,
            status: health.status.into(),
            failure_count: health.failure_count,
            days_since_installation: health.days_since_installation,
            days_since_maintenance: health.days_since_maintenance,
            mtbf_days: health.mtbf_days,
            last_maintenance: health.last_maintenance.as_ref().map(ToString::to_string),
            next_maintenance: health.next_maintenance.to_string(),
            score: health.score,
        }
    }
}

/// Health of the whole fleet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FleetHealthResponse {
    pub equipment: Vec<EquipmentHealthResponse>,
    /// Mean equipment score, 0 without equipment
    pub score: f64,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
}

impl From<FleetHealth> for FleetHealthResponse {
    fn from(health: FleetHealth) -> Self {
        FleetHealthResponse {
            healthy: health.count(pcm::health::HealthStatus::Healthy),
            warning: health.count(pcm::health::HealthStatus::Warning),
            critical: health.count(pcm::health::HealthStatus::Critical),
            score: health.score,
            equipment: health.equipment.into_iter().map(Into::into).collect(),
        }
    }
}

/// Dashboard counters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FleetStatsResponse {
    pub equipment_count: usize,
    pub total_orders: usize,
    pub active_orders: usize,
    pub completed_this_month: usize,
    pub completed_last_month: usize,
    pub overdue_orders: usize,
    pub average_resolution_hours: f64,
    pub preventive_orders: usize,
    pub corrective_orders: usize,
    pub preventive_percent: f64,
    /// Month-over-month change in completions, as a percentage
    pub monthly_trend: f64,
}

impl From<FleetStats> for FleetStatsResponse {
    fn from(stats: FleetStats) -> Self {
        FleetStatsResponse {
            equipment_count: stats.equipment_count,
            total_orders: stats.total_orders,
            active_orders: stats.active_orders,
            completed_this_month: stats.completed_this_month,
            completed_last_month: stats.completed_last_month,
            overdue_orders: stats.overdue_orders,
            average_resolution_hours: stats.average_resolution_hours,
            preventive_orders: stats.split.preventive,
            corrective_orders: stats.split.corrective,
            preventive_percent: stats.split.preventive_percent(),
            monthly_trend: stats.monthly_trend,
        }
    }
}

/// Workload of one technician.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TechnicianResponse {
    pub name: String,
    pub tax_id: String,
    pub total_orders: usize,
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub average_resolution_hours: f64,
}

impl From<TechnicianSummary> for TechnicianResponse {
    fn from(summary: TechnicianSummary) -> Self {
        TechnicianResponse {
            name: summary.technician.name,
            tax_id: summary.technician.tax_id,
            total_orders: summary.total_orders,
            open: summary.by_status.open,
            in_progress: summary.by_status.in_progress,
            completed: summary.by_status.completed,
            cancelled: summary.by_status.cancelled,
            average_resolution_hours: summary.average_resolution_hours,
        }
    }
}

/// Corrective order count for one equipment name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FailureResponse {
    pub equipment_name: String,
    pub failures: usize,
}

impl From<EquipmentFailures> for FailureResponse {
    fn from(failures: EquipmentFailures) -> Self {
        FailureResponse {
            equipment_name: failures.equipment_name,
            failures: failures.failures,
        }
    }
}

/// Fleet MTBF and MTTR.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReliabilityResponse {
    pub mtbf_hours: f64,
    pub mttr_hours: f64,
    pub availability_percent: f64,
    pub total_downtime_hours: f64,
    pub completed_failures: usize,
}

impl From<Reliability> for ReliabilityResponse {
    fn from(reliability: Reliability) -> Self {
        ReliabilityResponse {
            availability_percent: reliability.availability_percent(),
            mtbf_hours: reliability.mtbf_hours,
            mttr_hours: reliability.mttr_hours,
            total_downtime_hours: reliability.total_downtime_hours,
            completed_failures: reliability.completed_failures,
        }
    }
}

/// Full maintenance report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReportResponse {
    pub generated_at: String,
    pub health: FleetHealthResponse,
    pub stats: FleetStatsResponse,
    pub technicians: Vec<TechnicianResponse>,
    pub failures: Vec<FailureResponse>,
    pub reliability: ReliabilityResponse,
}

impl From<MaintenanceReport> for ReportResponse {
    fn from(report: MaintenanceReport) -> Self {
        ReportResponse {
            generated_at: report.generated_at.to_string(),
            health: report.health.into(),
            stats: report.stats.into(),
            technicians: report.technicians.into_iter().map(Into::into).collect(),
            failures: report.failures.into_iter().map(Into::into).collect(),
            reliability: report.reliability.into(),
        }
    }
}
