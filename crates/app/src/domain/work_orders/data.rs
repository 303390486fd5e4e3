//! Work Order Data

use jiff::Timestamp;
use pcm::{equipment::MaintenanceType, work_orders::WorkOrderStatus};

use crate::domain::{
    equipment::records::EquipmentUuid,
    work_orders::{errors::WorkOrdersServiceError, records::WorkOrderUuid},
};

/// New Work Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkOrder {
    pub uuid: WorkOrderUuid,
    pub details: WorkOrderDetails,
}

/// Editable fields shared by creation and update.
///
/// The equipment name is not part of the input: it is copied from the
/// referenced equipment when the order is written.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderDetails {
    pub equipment_uuid: EquipmentUuid,
    pub technician_name: String,
    pub technician_tax_id: String,
    pub opened_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub maintenance_type: MaintenanceType,
    pub downtime_hours: f64,
    pub status: WorkOrderStatus,
    pub notes: Option<String>,
}

impl WorkOrderDetails {
    /// Check the order's own consistency.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrdersServiceError::Validation`] when the technician is blank, the downtime
    /// is negative or not finite, or the completion date is missing or precedes the opening.
    pub fn validate(&self) -> Result<(), WorkOrdersServiceError> {
        if self.technician_name.trim().is_empty() {
            return Err(WorkOrdersServiceError::Validation(
                "technician name cannot be empty",
            ));
        }

        if !self.downtime_hours.is_finite() || self.downtime_hours < 0.0 {
            return Err(WorkOrdersServiceError::Validation(
                "downtime must be a non-negative number of hours",
            ));
        }

        match (self.status, self.completed_at) {
            (WorkOrderStatus::Completed, None) => Err(WorkOrdersServiceError::Validation(
                "completed orders need a completion date",
            )),
            (_, Some(completed_at)) if completed_at < self.opened_at => {
                Err(WorkOrdersServiceError::Validation(
                    "completion date cannot precede the opening date",
                ))
            }
            _ => Ok(()),
        }
    }
}
