use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::submissions::{
    dtos as submissions_dtos, handlers as submissions_handlers,
};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports (public)
        reports_handlers::list_report_types,
        // Submissions (public)
        submissions_handlers::upload_report,
        // Admin
        admin_handlers::get_config,
        admin_handlers::update_config,
        admin_handlers::send_test_email,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Reports
            reports_dtos::ReportTypeResponseDto,
            // Submissions
            submissions_dtos::UploadReportDto,
            submissions_dtos::SubmissionResponseDto,
            // Admin
            admin_dtos::ReportEmailEntryDto,
            admin_dtos::ConfigResponseDto,
            admin_dtos::UpdateConfigDto,
            admin_dtos::UpdateConfigResponseDto,
        )
    ),
    tags(
        (name = "reports", description = "Report directory (public)"),
        (name = "submissions", description = "Report file submissions (public)"),
        (name = "admin", description = "Recipient configuration (bearer token required)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Squadron Reports API",
        version = "0.1.0",
        description = "API documentation for the squadron report portal",
    )
)]
pub struct ApiDoc;

/// Adds the admin bearer security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::Http(
                    HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
