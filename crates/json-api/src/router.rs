//! App Router

use salvo::Router;

use crate::{auth, companies, equipment, healthcheck, metrics, sessions, work_orders};

/// Routes reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("companies").post(companies::create::handler))
        .push(Router::with_path("sessions").post(sessions::create::handler))
}

/// Routes scoped to the company behind the bearer token.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("sessions").delete(sessions::delete::handler))
        .push(
            Router::with_path("equipment")
                .get(equipment::index::handler)
                .post(equipment::create::handler)
                .push(
                    Router::with_path("{equipment}")
                        .get(equipment::get::handler)
                        .put(equipment::update::handler)
                        .delete(equipment::delete::handler),
                ),
        )
        .push(
            Router::with_path("work-orders")
                .get(work_orders::index::handler)
                .post(work_orders::create::handler)
                .push(
                    Router::with_path("{work_order}")
                        .get(work_orders::get::handler)
                        .put(work_orders::update::handler)
                        .delete(work_orders::delete::handler),
                ),
        )
        .push(
            Router::with_path("metrics")
                .push(Router::with_path("fleet").get(metrics::fleet::handler))
                .push(
                    Router::with_path("equipment-health").get(metrics::equipment_health::handler),
                )
                .push(Router::with_path("technicians").get(metrics::technicians::handler))
                .push(Router::with_path("report").get(metrics::report::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(inject(Mocks::default().into_state()))
                .push(public_router())
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_tenant_routes_require_bearer_token() -> TestResult {
        let service = make_service();

        for url in [
            "http://example.com/equipment",
            "http://example.com/work-orders",
            "http://example.com/metrics/fleet",
            "http://example.com/metrics/report",
        ] {
            let res = TestClient::get(url).send(&service).await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "{url}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_is_public() -> TestResult {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
