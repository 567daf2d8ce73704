use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use courier_core_health_contracts::{HealthFeatureService, HealthStatus};

use crate::models::ApiHealthStatus;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let status @ HealthStatus { cache, email } = service.get_status().await;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = ApiHealthStatus {
        http: true,
        cache,
        email,
    };

    (code, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use courier_core_contact_contracts::MockContactFeatureService;
    use courier_core_health_contracts::MockHealthFeatureService;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::tests::{body_json, call};

    #[tokio::test]
    async fn healthy() {
        let health = MockHealthFeatureService::new().with_get_status(HealthStatus {
            cache: true,
            email: true,
        });

        let response = call(
            health,
            MockContactFeatureService::new(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"http": true, "cache": true, "email": true})
        );
    }

    #[tokio::test]
    async fn unhealthy() {
        let health = MockHealthFeatureService::new().with_get_status(HealthStatus {
            cache: true,
            email: false,
        });

        let response = call(
            health,
            MockContactFeatureService::new(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"http": true, "cache": true, "email": false})
        );
    }
}
