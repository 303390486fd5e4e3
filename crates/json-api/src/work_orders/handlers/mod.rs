//! Work Order Handlers

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::domain::work_orders::data::WorkOrderDetails;

use crate::{
    extensions::*,
    wire::{MaintenanceType, WorkOrderStatus},
};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Editable work order fields, shared by create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WorkOrderDetailsRequest {
    /// Equipment the work is carried out on
    pub equipment_uuid: Uuid,
    pub technician_name: String,
    pub technician_tax_id: String,
    /// RFC 3339 opening timestamp
    pub opened_at: String,
    /// RFC 3339 completion timestamp
    #[serde(default)]
    pub completed_at: Option<String>,
    pub maintenance_type: MaintenanceType,
    #[serde(default)]
    pub downtime_hours: f64,
    #[serde(default = "default_status")]
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> WorkOrderStatus {
    WorkOrderStatus::Open
}

impl TryFrom<WorkOrderDetailsRequest> for WorkOrderDetails {
    type Error = StatusError;

    fn try_from(request: WorkOrderDetailsRequest) -> Result<Self, Self::Error> {
        Ok(WorkOrderDetails {
            equipment_uuid: request.equipment_uuid.into(),
            technician_name: request.technician_name,
            technician_tax_id: request.technician_tax_id,
            opened_at: request
                .opened_at
                .parse::<Timestamp>()
                .or_400("could not parse \"opened_at\"")?,
            completed_at: request
                .completed_at
                .map(|value| value.parse::<Timestamp>())
                .transpose()
                .or_400("could not parse \"completed_at\"")?,
            maintenance_type: request.maintenance_type.into(),
            downtime_hours: request.downtime_hours,
            status: request.status.into(),
            notes: request.notes.filter(|notes| !notes.trim().is_empty()),
        })
    }
}
