//! Get Work Order Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::domain::work_orders::records::WorkOrderRecord;

use crate::{
    extensions::*,
    state::State,
    wire::{MaintenanceType, WorkOrderStatus},
    work_orders::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WorkOrderResponse {
    /// The unique identifier of the work order
    pub uuid: Uuid,

    /// Equipment the work was carried out on
    pub equipment_uuid: Uuid,

    /// Equipment name at the time of the last write
    pub equipment_name: String,

    pub technician_name: String,
    pub technician_tax_id: String,

    /// The date and time the work order was opened
    pub opened_at: String,

    /// The date and time the work was completed
    pub completed_at: Option<String>,

    pub maintenance_type: MaintenanceType,

    /// Hours the equipment was out of service
    pub downtime_hours: f64,

    pub status: WorkOrderStatus,
    pub notes: Option<String>,

    /// The date and time the work order was last updated
    pub updated_at: String,
}

impl From<WorkOrderRecord> for WorkOrderResponse {
    fn from(order: WorkOrderRecord) -> Self {
        WorkOrderResponse {
            uuid: order.uuid.into(),
            equipment_uuid: order.equipment_uuid.into(),
            equipment_name: order.equipment_name,
            technician_name: order.technician_name,
            technician_tax_id: order.technician_tax_id,
            opened_at: order.opened_at.to_string(),
            completed_at: order.completed_at.as_ref().map(ToString::to_string),
            maintenance_type: order.maintenance_type.into(),
            downtime_hours: order.downtime_hours,
            status: order.status.into(),
            notes: order.notes,
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Get Work Order Handler
#[endpoint(
    tags("work-orders"),
    summary = "Get Work Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Work order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Work order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    work_order: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<WorkOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let work_order = state
        .app
        .work_orders
        .get_work_order(tenant, work_order.into_inner().into(), point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(work_order.into()))
}
