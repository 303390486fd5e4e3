//! PCM prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    equipment::{Equipment, MaintenanceType, UnknownMaintenanceType},
    failures::{EquipmentFailures, rank_equipment_failures, top_equipment_failures},
    fleet::{FleetStats, MaintenanceSplit},
    health::{EquipmentHealth, FleetHealth, HealthStatus, health_score, health_status},
    policy::{MaintenancePolicy, PolicyError},
    reliability::Reliability,
    report::{MaintenanceReport, ReportError},
    technicians::{StatusCounts, TechnicianSummary, summarize_technicians},
    work_orders::{Technician, UnknownWorkOrderStatus, WorkOrder, WorkOrderStatus},
};
