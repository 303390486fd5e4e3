//! Fleet Statistics Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    metrics::{errors::into_status_error, responses::FleetStatsResponse},
    state::State,
};

/// Fleet Statistics Handler
///
/// Dashboard counters as seen at `at` (default: now).
#[endpoint(
    tags("metrics"),
    summary = "Fleet Statistics",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<FleetStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let stats = state
        .app
        .metrics
        .fleet_stats(tenant, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pcm_app::domain::{
        equipment::EquipmentServiceError,
        metrics::{MetricsServiceError, MockMetricsService},
    };

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, tenant_service};

    use super::{super::tests::sample_report, *};

    fn make_service(metrics: MockMetricsService) -> Service {
        tenant_service(
            Mocks::with_metrics(metrics),
            Router::with_path("metrics/fleet").get(handler),
        )
    }

    #[tokio::test]
    async fn test_fleet_stats_at_point_in_time() -> TestResult {
        let at: Timestamp = "2025-06-15T12:00:00Z".parse()?;
        let stats = sample_report(at)?.stats;

        let mut metrics = MockMetricsService::new();

        metrics
            .expect_fleet_stats()
            .once()
            .withf(move |tenant, point_in_time| *tenant == TEST_TENANT_UUID && *point_in_time == at)
            .return_once(move |_, _| Ok(stats));

        metrics.expect_equipment_health().never();
        metrics.expect_technicians().never();
        metrics.expect_report().never();

        let mut res = TestClient::get("http://example.com/metrics/fleet?at=2025-06-15T12:00:00Z")
            .send(&make_service(metrics))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: FleetStatsResponse = res.take_json().await?;

        assert_eq!(body.equipment_count, 1);
        assert_eq!(body.total_orders, 1);
        assert_eq!(body.corrective_orders, 1);
        assert_eq!(body.completed_this_month, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_fleet_stats_load_failure_returns_500() -> TestResult {
        let mut metrics = MockMetricsService::new();

        metrics.expect_fleet_stats().once().return_once(|_, _| {
            Err(MetricsServiceError::Equipment(
                EquipmentServiceError::InvalidData,
            ))
        });

        let res = TestClient::get("http://example.com/metrics/fleet")
            .send(&make_service(metrics))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
