//! Fixtures
//!
//! Builders for equipment and work orders used by tests and benchmarks.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    equipment::{Equipment, MaintenanceType},
    utils::days,
    work_orders::{Technician, WorkOrder, WorkOrderStatus},
};

/// Fixed reference clock used by fixtures: 2025-06-15 12:00 UTC.
///
/// # Errors
///
/// Returns an error if the reference timestamp cannot be parsed.
pub fn now() -> Result<Timestamp, jiff::Error> {
    "2025-06-15T12:00:00Z".parse()
}

/// The timestamp `count` whole days before `now`.
///
/// # Errors
///
/// Returns an error if the result is out of range.
pub fn days_ago(now: Timestamp, count: i64) -> Result<Timestamp, jiff::Error> {
    now.checked_sub(days(count))
}

/// Equipment named `name` installed at `installed_at`.
#[must_use]
pub fn equipment(name: &str, installed_at: Timestamp) -> Equipment {
    Equipment {
        uuid: Uuid::now_v7(),
        name: name.to_string(),
        location: "Plant 1".to_string(),
        maintenance_type: MaintenanceType::Preventive,
        installed_at,
    }
}

/// Start building an open work order of `maintenance_type`.
#[must_use]
pub fn work_order(maintenance_type: MaintenanceType) -> WorkOrderBuilder {
    WorkOrderBuilder {
        order: WorkOrder {
            uuid: Uuid::now_v7(),
            equipment_uuid: Uuid::nil(),
            equipment_name: String::new(),
            technician: Technician {
                name: "Ana Souza".to_string(),
                tax_id: "123.456.789-00".to_string(),
            },
            opened_at: Timestamp::UNIX_EPOCH,
            completed_at: None,
            maintenance_type,
            downtime_hours: 0.0,
            status: WorkOrderStatus::Open,
            notes: None,
        },
    }
}

/// Work order builder.
#[derive(Debug, Clone)]
pub struct WorkOrderBuilder {
    order: WorkOrder,
}

impl WorkOrderBuilder {
    /// Raise the order against `equipment`.
    #[must_use]
    pub fn for_equipment(mut self, equipment: &Equipment) -> Self {
        self.order.equipment_uuid = equipment.uuid;
        self.order.equipment_name.clone_from(&equipment.name);
        self
    }

    /// Reference equipment by id only.
    #[must_use]
    pub fn equipment_uuid(mut self, uuid: Uuid) -> Self {
        self.order.equipment_uuid = uuid;
        self
    }

    /// Set the denormalized equipment name.
    #[must_use]
    pub fn equipment_name(mut self, name: &str) -> Self {
        self.order.equipment_name = name.to_string();
        self
    }

    /// Assign a technician.
    #[must_use]
    pub fn technician(mut self, name: &str, tax_id: &str) -> Self {
        self.order.technician = Technician {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
        };
        self
    }

    /// Set the opening time.
    #[must_use]
    pub fn opened(mut self, opened_at: Timestamp) -> Self {
        self.order.opened_at = opened_at;
        self
    }

    /// Mark the order completed at `completed_at`.
    #[must_use]
    pub fn completed(mut self, completed_at: Timestamp) -> Self {
        self.order.completed_at = Some(completed_at);
        self.order.status = WorkOrderStatus::Completed;
        self
    }

    /// Mark the order in progress.
    #[must_use]
    pub fn in_progress(mut self) -> Self {
        self.order.status = WorkOrderStatus::InProgress;
        self
    }

    /// Mark the order cancelled.
    #[must_use]
    pub fn cancelled(mut self) -> Self {
        self.order.status = WorkOrderStatus::Cancelled;
        self
    }

    /// Record downtime.
    #[must_use]
    pub fn downtime(mut self, hours: f64) -> Self {
        self.order.downtime_hours = hours;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> WorkOrder {
        self.order
    }
}
