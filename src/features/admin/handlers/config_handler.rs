use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::{
    ConfigResponseDto, UpdateConfigDto, UpdateConfigResponseDto,
};
use crate::features::admin::services::AdminConfigService;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Read the recipient configuration
#[utoipa::path(
    get,
    path = "/api/admin/config",
    tag = "admin",
    responses(
        (status = 200, description = "Current configuration", body = ConfigResponseDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(
        ("admin_token" = [])
    )
)]
pub async fn get_config(
    State(service): State<Arc<AdminConfigService>>,
) -> Result<Json<ConfigResponseDto>> {
    Ok(Json(service.config().await?))
}

/// Update the recipient configuration
///
/// Accepts a full or partial `reportEmails` mapping. Every supplied email is
/// validated before anything is written; a single malformed value rejects the
/// whole update.
#[utoipa::path(
    post,
    path = "/api/admin/config",
    tag = "admin",
    request_body = UpdateConfigDto,
    responses(
        (status = 200, description = "Configuration updated", body = UpdateConfigResponseDto),
        (status = 400, description = "Malformed email value", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(
        ("admin_token" = [])
    )
)]
pub async fn update_config(
    State(service): State<Arc<AdminConfigService>>,
    AppJson(dto): AppJson<UpdateConfigDto>,
) -> Result<Json<UpdateConfigResponseDto>> {
    for (report_id, entry) in &dto.report_emails {
        entry.validate().map_err(|e| {
            AppError::Validation(format!("Invalid entry for {}: {}", report_id, e))
        })?;
    }

    Ok(Json(service.update(dto).await?))
}

/// Send a test email through the active transport
#[utoipa::path(
    post,
    path = "/api/admin/test-email",
    tag = "admin",
    responses(
        (status = 200, description = "Test email sent", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Transport misconfigured or send failed", body = ErrorResponse)
    ),
    security(
        ("admin_token" = [])
    )
)]
pub async fn send_test_email(
    State(service): State<Arc<AdminConfigService>>,
) -> Result<Json<MessageResponse>> {
    service.send_test_email().await?;

    Ok(Json(MessageResponse {
        message: "Test email sent successfully".to_string(),
    }))
}
