use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use courier_core_contact_contracts::ContactFeatureService;
use courier_core_health_contracts::HealthFeatureService;
use courier_di::Build;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Name of the contact form field that only bots fill in.
    pub honeypot_field: Arc<str>,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        let listener = TcpListener::bind(addr).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(
                self.contact.into(),
                self.config.honeypot_field,
            ));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, response::Response};
    use courier_core_contact_contracts::MockContactFeatureService;
    use courier_core_health_contracts::MockHealthFeatureService;
    use tower::ServiceExt;

    use super::*;

    pub(crate) const HONEYPOT_FIELD: &str = "covfefe";

    pub(crate) async fn call(
        health: MockHealthFeatureService,
        contact: MockContactFeatureService,
        request: Request<Body>,
    ) -> Response {
        let server = RestServer {
            health,
            contact,
            config: RestServerConfig {
                addr: ([127, 0, 0, 1], 0).into(),
                honeypot_field: HONEYPOT_FIELD.into(),
            },
        };

        server.router().oneshot(request).await.unwrap()
    }

    pub(crate) async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn request_id() {
        let request = Request::get("/unknown").body(Body::empty()).unwrap();

        let response = call(
            MockHealthFeatureService::new(),
            MockContactFeatureService::new(),
            request,
        )
        .await;

        assert_eq!(response.status(), 404);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
