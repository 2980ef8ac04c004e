use axum::{extract::State, http::StatusCode, Json};
use database_layer::AppointmentView;
use uuid::Uuid;

use crate::error::{ApiError, MessageResponse};
use crate::middleware::{AuthContext, JsonBody, PathId};
use crate::server::AppState;
use crate::services::{AppointmentPolicy, AppointmentService, CreateAppointment, UpdateAppointment};

fn service(state: &AppState) -> AppointmentService {
    AppointmentService::new(
        state.appointments.clone(),
        AppointmentPolicy::new(state.enforce_ownership()),
    )
}

/// Appointments visible to the caller, ordered by date then time
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "Doctors get their bookings, patients their own", body = Vec<AppointmentView>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "appointments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<AppointmentView>>, ApiError> {
    let appointments = service(&state).list(&auth.actor).await?;
    Ok(Json(appointments))
}

/// Book an appointment; the caller becomes its patient
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointment,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentView),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "appointments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthContext,
    JsonBody(request): JsonBody<CreateAppointment>,
) -> Result<(StatusCode, Json<AppointmentView>), ApiError> {
    let view = service(&state).create(&auth.actor, request).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Change doctor, date, time or description
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = UpdateAppointment,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentView),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a party to this appointment"),
        (status = 404, description = "Appointment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "appointments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    PathId(id): PathId<Uuid>,
    auth: AuthContext,
    JsonBody(request): JsonBody<UpdateAppointment>,
) -> Result<Json<AppointmentView>, ApiError> {
    let view = service(&state).update(&auth.actor, id, request).await?;
    Ok(Json(view))
}

/// Cancel an appointment permanently
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a party to this appointment"),
        (status = 404, description = "Appointment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "appointments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    PathId(id): PathId<Uuid>,
    auth: AuthContext,
) -> Result<Json<MessageResponse>, ApiError> {
    service(&state).delete(&auth.actor, id).await?;
    Ok(Json(MessageResponse::new("Appointment deleted successfully")))
}
