//! OpenAPI document for the REST surface.

use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::api::dto::{
    ApiResponse, ContactInfo, MessageListResponse, Pagination, SubmissionData,
    SubmitMessageRequest,
};
use crate::api::handlers::{admin, contact, system};
use crate::domain::{
    AvailabilityPreference, ContactMessage, DashboardStats, MessageExport, MessageStatus,
    StatusBreakdown,
};
use crate::error::{ErrorBody, ErrorResponse};

/// Path served by the JSON document route.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "folio-desk",
        description = "Contact intake and message triage backend for a portfolio site."
    ),
    paths(
        contact::submit_message,
        contact::contact_info,
        admin::list_messages,
        admin::dashboard_stats,
        admin::update_status,
        admin::delete_message,
        admin::export_messages,
        system::health_handler,
    ),
    components(schemas(
        SubmitMessageRequest,
        SubmissionData,
        ApiResponse<SubmissionData>,
        ContactInfo,
        MessageListResponse,
        Pagination,
        ContactMessage,
        MessageStatus,
        AvailabilityPreference,
        DashboardStats,
        StatusBreakdown,
        MessageExport,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Contact", description = "Public contact form"),
        (name = "Admin", description = "Message triage, statistics and export"),
        (name = "System", description = "Service health"),
    ),
    modifiers(&AdminTokenScheme),
)]
pub struct ApiDoc;

#[derive(Debug)]
struct AdminTokenScheme;

impl utoipa::Modify for AdminTokenScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Value of ADMIN_TOKEN"))
                        .build(),
                ),
            );
        }
    }
}
