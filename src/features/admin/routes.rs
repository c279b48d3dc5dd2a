use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::core::config::AdminConfig;
use crate::core::middleware::admin_auth_middleware;
use crate::features::admin::handlers;
use crate::features::admin::services::AdminConfigService;

/// Create admin routes (all require the shared-secret bearer token)
pub fn routes(service: Arc<AdminConfigService>, admin: Arc<AdminConfig>) -> Router {
    Router::new()
        .route(
            "/api/admin/config",
            get(handlers::get_config).post(handlers::update_config),
        )
        .route("/api/admin/test-email", post(handlers::send_test_email))
        .route_layer(from_fn_with_state(admin, admin_auth_middleware))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::reports::models::default_recipient_entries;
    use crate::modules::email::EmailGateway;
    use crate::shared::test_helpers::{temp_recipient_store, RecordingMailer};

    const SECRET: &str = "test-admin-secret";

    async fn test_server_with(
        secret: Option<&str>,
        env_fallbacks: HashMap<u8, String>,
        mailer: Arc<RecordingMailer>,
    ) -> TestServer {
        let store = Arc::new(temp_recipient_store(env_fallbacks));
        store.ensure_seeded(default_recipient_entries()).await.unwrap();

        let service = Arc::new(AdminConfigService::new(
            store,
            mailer as Arc<dyn EmailGateway>,
            "noreply@example.org".to_string(),
        ));
        let admin = Arc::new(AdminConfig {
            password: secret.map(|s| s.to_string()),
        });

        TestServer::new(routes(service, admin)).unwrap()
    }

    async fn test_server(secret: Option<&str>) -> TestServer {
        test_server_with(secret, HashMap::new(), Arc::new(RecordingMailer::new())).await
    }

    #[tokio::test]
    async fn test_config_requires_bearer_token() {
        let server = test_server(Some(SECRET)).await;

        server.get("/api/admin/config").await.assert_status_unauthorized();

        server
            .get("/api/admin/config")
            .authorization_bearer("wrong-secret")
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_missing_server_secret_denies_access() {
        let server = test_server(None).await;

        server
            .get("/api/admin/config")
            .authorization_bearer("anything")
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_get_config_returns_seeded_document() {
        let server = test_server(Some(SECRET)).await;

        let response = server
            .get("/api/admin/config")
            .authorization_bearer(SECRET)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["updatedBy"], "System");
        assert_eq!(body["reportEmails"]["3"]["reportName"], "VA&R");
        assert_eq!(body["reportEmails"]["3"]["email"], "");
        assert_eq!(body["reportEmails"].as_object().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_update_config_counts_changes_and_is_idempotent() {
        let server = test_server(Some(SECRET)).await;

        let payload = json!({
            "reportEmails": {
                "3": {
                    "reportName": "VA&R",
                    "fullName": "Veterans Affairs & Rehabilitation",
                    "email": "chairman@example.org"
                }
            },
            "updatedBy": "Clerk"
        });

        let response = server
            .post("/api/admin/config")
            .authorization_bearer(SECRET)
            .json(&payload)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["changedFields"], 1);
        assert_eq!(body["updatedBy"], "Clerk");
        assert_eq!(body["reportEmails"]["3"]["email"], "chairman@example.org");

        // Same payload again: values identical, nothing counts as changed
        let response = server
            .post("/api/admin/config")
            .authorization_bearer(SECRET)
            .json(&payload)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["changedFields"], 0);
    }

    #[tokio::test]
    async fn test_update_config_rejects_malformed_email() {
        let server = test_server(Some(SECRET)).await;

        let payload = json!({
            "reportEmails": {
                "3": {
                    "reportName": "VA&R",
                    "fullName": "Veterans Affairs & Rehabilitation",
                    "email": "not-an-email"
                }
            }
        });

        let response = server
            .post("/api/admin/config")
            .authorization_bearer(SECRET)
            .json(&payload)
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);

        // Nothing was written
        let response = server
            .get("/api/admin/config")
            .authorization_bearer(SECRET)
            .await;
        let body: Value = response.json();
        assert_eq!(body["reportEmails"]["3"]["email"], "");
    }

    #[tokio::test]
    async fn test_send_test_email_uses_active_transport() {
        let mailer = Arc::new(RecordingMailer::new());
        let mut fallbacks = HashMap::new();
        fallbacks.insert(1, "ncsr@example.org # detachment".to_string());
        let server = test_server_with(Some(SECRET), fallbacks, Arc::clone(&mailer)).await;

        let response = server
            .post("/api/admin/test-email")
            .authorization_bearer(SECRET)
            .await;

        response.assert_status_ok();
        let attempts = mailer.attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].to, "ncsr@example.org");
        assert!(attempts[0].subject.starts_with("[TEST]"));
    }

    #[tokio::test]
    async fn test_send_test_email_without_recipient_is_server_fault() {
        let server = test_server(Some(SECRET)).await;

        let response = server
            .post("/api/admin/test-email")
            .authorization_bearer(SECRET)
            .await;

        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
