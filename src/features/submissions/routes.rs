use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::submissions::handlers::upload_report;
use crate::features::submissions::services::SubmissionService;
use crate::shared::constants::MAX_FILE_SIZE;

/// Create routes for the submission feature
pub fn routes(service: Arc<SubmissionService>) -> Router {
    Router::new()
        .route(
            "/api/upload/{id}",
            // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
            post(upload_report).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::features::reports::models::default_recipient_entries;
    use crate::modules::email::EmailGateway;
    use crate::shared::test_helpers::{temp_recipient_store, RecordingMailer};

    async fn test_server(mailer: Arc<RecordingMailer>) -> TestServer {
        let mut fallbacks = HashMap::new();
        fallbacks.insert(3, "var.chairman@example.org".to_string());
        let store = Arc::new(temp_recipient_store(fallbacks));
        store.ensure_seeded(default_recipient_entries()).await.unwrap();

        let service = Arc::new(SubmissionService::new(
            store,
            mailer as Arc<dyn EmailGateway>,
            "noreply@example.org".to_string(),
            "SAL".to_string(),
        ));

        TestServer::new(routes(service)).unwrap()
    }

    fn upload_form(file_name: &str, mime: &str) -> MultipartForm {
        MultipartForm::new()
            .add_text("userName", "Pat Example")
            .add_text("userEmail", "pat@example.org")
            .add_text("userTitle", "Adjutant")
            .add_text("squadronNumber", "42")
            .add_text("districtNumber", "5")
            .add_part(
                "file",
                Part::bytes(vec![0u8; 128])
                    .file_name(file_name)
                    .mime_type(mime),
            )
    }

    #[tokio::test]
    async fn test_upload_happy_path() {
        let mailer = Arc::new(RecordingMailer::new());
        let server = test_server(Arc::clone(&mailer)).await;

        let response = server
            .post("/api/upload/3")
            .multipart(upload_form("monthly.pdf", "application/pdf"))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let file_name = body["fileName"].as_str().unwrap();
        assert!(file_name.starts_with("SAL-SQ42-VAR-"));
        assert!(file_name.ends_with(".pdf"));

        assert_eq!(mailer.attempts().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_missing_field_is_bad_request() {
        let mailer = Arc::new(RecordingMailer::new());
        let server = test_server(Arc::clone(&mailer)).await;

        let form = MultipartForm::new()
            .add_text("userName", "Pat Example")
            .add_part(
                "file",
                Part::bytes(vec![0u8; 128])
                    .file_name("monthly.pdf")
                    .mime_type("application/pdf"),
            );

        let response = server.post("/api/upload/3").multipart(form).await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("userEmail"));
        assert!(mailer.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_upload_unknown_report_id_is_bad_request() {
        let mailer = Arc::new(RecordingMailer::new());
        let server = test_server(mailer).await;

        let response = server
            .post("/api/upload/42")
            .multipart(upload_form("monthly.pdf", "application/pdf"))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_upload_spoofed_content_type_is_rejected() {
        let mailer = Arc::new(RecordingMailer::new());
        let server = test_server(Arc::clone(&mailer)).await;

        let response = server
            .post("/api/upload/3")
            .multipart(upload_form("monthly.pdf", "application/x-msdownload"))
            .await;

        response.assert_status_bad_request();
        assert!(mailer.attempts().is_empty());
    }
}
