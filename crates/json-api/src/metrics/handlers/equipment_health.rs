//! Equipment Health Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    metrics::{errors::into_status_error, responses::FleetHealthResponse},
    state::State,
};

/// Equipment Health Handler
///
/// Health status and score for every piece of equipment, plus the fleet score.
#[endpoint(
    tags("metrics"),
    summary = "Equipment Health",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<FleetHealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let health = state
        .app
        .metrics
        .equipment_health(tenant, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(health.into()))
}
