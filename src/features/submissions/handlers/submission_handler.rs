use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::submissions::dtos::{
    SubmissionFile, SubmissionForm, SubmissionResponseDto, UploadReportDto,
};
use crate::features::submissions::services::{SubmissionError, SubmissionService};
use crate::shared::types::ErrorResponse;

/// Submit a report
///
/// Accepts multipart/form-data with the submitter fields and a single `file`
/// part. On success the response carries the server-derived filename the
/// report was forwarded under.
#[utoipa::path(
    post,
    path = "/api/upload/{id}",
    tag = "submissions",
    params(
        ("id" = String, Path, description = "Report identifier (1-10)")
    ),
    request_body(
        content = UploadReportDto,
        content_type = "multipart/form-data",
        description = "Report upload form",
    ),
    responses(
        (status = 200, description = "Report forwarded", body = SubmissionResponseDto),
        (status = 400, description = "Invalid field or file", body = ErrorResponse),
        (status = 500, description = "Recipient not configured or dispatch failed", body = ErrorResponse)
    )
)]
pub async fn upload_report(
    State(service): State<Arc<SubmissionService>>,
    Path(report_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<SubmissionResponseDto>, AppError> {
    let mut form = SubmissionForm::default();
    let mut file: Option<SubmissionFile> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let original_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file = Some(SubmissionFile {
                    data: data.to_vec(),
                    original_name,
                    content_type,
                });
            }
            "userName" => form.user_name = read_text(field).await?,
            "userEmail" => form.user_email = read_text(field).await?,
            "userTitle" => form.user_title = read_text(field).await?,
            "squadronNumber" => form.squadron_number = read_text(field).await?,
            "districtNumber" => form.district_number = read_text(field).await?,
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file = file.ok_or(SubmissionError::MissingField("file"))?;

    let outcome = service.submit(&report_id, form, file).await?;

    Ok(Json(SubmissionResponseDto {
        success: true,
        file_name: outcome.file_name,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", name, e)))
}
