use axum::Json;

use crate::features::reports::dtos::ReportTypeResponseDto;
use crate::features::reports::models::REPORT_TYPES;

/// List the report directory
///
/// Public endpoint; the upload form renders its report list from this.
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Report directory", body = Vec<ReportTypeResponseDto>)
    ),
    tag = "reports"
)]
pub async fn list_report_types() -> Json<Vec<ReportTypeResponseDto>> {
    Json(REPORT_TYPES.iter().map(ReportTypeResponseDto::from).collect())
}
