//! Equipment Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{equipment::get::EquipmentResponse, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EquipmentListResponse {
    /// The equipment registered for the company
    pub equipment: Vec<EquipmentResponse>,
}

/// Equipment Index Handler
///
/// Returns the company's equipment.
#[endpoint(
    tags("equipment"),
    summary = "List Equipment",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<EquipmentListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let equipment = state
        .app
        .equipment
        .list_equipment(tenant, point_in_time)
        .await
        .or_500("failed to fetch equipment")?;

    Ok(Json(EquipmentListResponse {
        equipment: equipment.into_iter().map(Into::into).collect(),
    }))
}
