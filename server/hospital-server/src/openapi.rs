use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::paths;
use crate::server::AppState;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,

        // Authentication endpoints
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        crate::handlers::auth::update_me,

        // Appointment endpoints
        crate::handlers::appointments::list_appointments,
        crate::handlers::appointments::create_appointment,
        crate::handlers::appointments::update_appointment,
        crate::handlers::appointments::delete_appointment,

        // Doctor directory
        crate::handlers::doctors::list_doctors,
        crate::handlers::doctors::update_doctor,
        crate::handlers::doctors::delete_doctor,

        // Patient records
        crate::handlers::patients::list_records,
        crate::handlers::patients::create_record,
        crate::handlers::patients::update_record,
        crate::handlers::patients::delete_record,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::auth::AuthResponse,
            crate::handlers::patients::CreatePatientRecordRequest,
            crate::handlers::patients::UpdatePatientRecordRequest,
            crate::services::CreateAppointment,
            crate::services::UpdateAppointment,
            crate::error::ApiErrorResponse,
            crate::error::MessageResponse,
            auth_identity::Role,
            auth_identity::User,
            auth_identity::UserSummary,
            auth_identity::SignupRequest,
            auth_identity::LoginRequest,
            auth_identity::ProfileUpdate,
            database_layer::Appointment,
            database_layer::AppointmentView,
            database_layer::PatientRecord,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Signup, login and the current user's profile"),
        (name = "appointments", description = "Appointment booking and management"),
        (name = "doctors", description = "Doctor directory"),
        (name = "patients", description = "Patient records"),
    ),
    info(
        title = "Hospital Engine API",
        description = "Appointments between patients and doctors, with a doctor directory and patient records.",
    ),
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create OpenAPI documentation routes
pub fn create_docs_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new(paths::DOCS).url(paths::OPENAPI_JSON, ApiDoc::openapi()))
}
