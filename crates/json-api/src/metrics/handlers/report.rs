//! Maintenance Report Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    metrics::{errors::into_status_error, responses::ReportResponse},
    state::State,
};

/// Maintenance Report Handler
///
/// Health, statistics, technician workload, failure ranking and reliability in one response.
#[endpoint(
    tags("metrics"),
    summary = "Maintenance Report",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let report = state
        .app
        .metrics
        .report(tenant, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(report.into()))
}
