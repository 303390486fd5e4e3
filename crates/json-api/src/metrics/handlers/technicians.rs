//! Technician Summary Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    metrics::{errors::into_status_error, responses::TechnicianResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TechniciansResponse {
    /// Technicians ordered by workload, busiest first
    pub technicians: Vec<TechnicianResponse>,
}

/// Technician Summary Handler
#[endpoint(
    tags("metrics"),
    summary = "Technician Performance",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TechniciansResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let technicians = state
        .app
        .metrics
        .technicians(tenant, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(TechniciansResponse {
        technicians: technicians.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pcm_app::domain::metrics::MockMetricsService;

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, tenant_service};

    use super::{super::tests::sample_report, *};

    fn make_service(metrics: MockMetricsService) -> Service {
        tenant_service(
            Mocks::with_metrics(metrics),
            Router::with_path("metrics/technicians").get(handler),
        )
    }

    #[tokio::test]
    async fn test_technicians_are_summarized() -> TestResult {
        let at: Timestamp = "2025-06-15T12:00:00Z".parse()?;
        let technicians = sample_report(at)?.technicians;

        let mut metrics = MockMetricsService::new();

        metrics
            .expect_technicians()
            .once()
            .withf(|tenant, _| *tenant == TEST_TENANT_UUID)
            .return_once(move |_, _| Ok(technicians));

        metrics.expect_fleet_stats().never();
        metrics.expect_equipment_health().never();
        metrics.expect_report().never();

        let mut res = TestClient::get("http://example.com/metrics/technicians")
            .send(&make_service(metrics))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: TechniciansResponse = res.take_json().await?;
        let ana = body.technicians.first();

        assert_eq!(ana.map(|t| t.name.as_str()), Some("Ana Souza"));
        assert_eq!(ana.map(|t| t.completed), Some(1));
        assert!(
            ana.is_some_and(|t| (t.average_resolution_hours - 24.0).abs() < f64::EPSILON),
            "one day from opening to completion"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_no_work_orders_yields_empty_list() -> TestResult {
        let mut metrics = MockMetricsService::new();

        metrics
            .expect_technicians()
            .once()
            .return_once(|_, _| Ok(vec![]));

        let body: TechniciansResponse = TestClient::get("http://example.com/metrics/technicians")
            .send(&make_service(metrics))
            .await
            .take_json()
            .await?;

        assert!(body.technicians.is_empty());

        Ok(())
    }
}
