use auth_identity::{ProfileUpdate, User, UserSummary};
use axum::{extract::State, Json};
use uuid::Uuid;

use crate::error::{ApiError, MessageResponse};
use crate::middleware::{AuthContext, JsonBody, PathId};
use crate::server::AppState;

/// All doctors, by name
#[utoipa::path(
    get,
    path = "/api/doctors",
    responses(
        (status = 200, description = "Doctor directory", body = Vec<UserSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "doctors",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_doctors(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    Ok(Json(state.identity.list_doctors().await?))
}

/// Doctors may edit only their own profile
#[utoipa::path(
    put,
    path = "/api/doctors/{id}",
    params(
        ("id" = Uuid, Path, description = "Doctor user ID")
    ),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "Doctor not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "doctors",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_doctor(
    State(state): State<AppState>,
    PathId(id): PathId<Uuid>,
    auth: AuthContext,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = state.identity.update_doctor(&auth.actor, id, update).await?;
    Ok(Json(user))
}

/// Remove a doctor account; their appointments stay in place
#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    params(
        ("id" = Uuid, Path, description = "Doctor user ID")
    ),
    responses(
        (status = 200, description = "Doctor deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Doctor not found")
    ),
    tag = "doctors",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_doctor(
    State(state): State<AppState>,
    PathId(id): PathId<Uuid>,
    auth: AuthContext,
) -> Result<Json<MessageResponse>, ApiError> {
    state.identity.delete_doctor(id).await?;
    tracing::info!(doctor_id = %id, actor_id = %auth.user_id(), request_id = %auth.request_id, "Doctor removed");
    Ok(Json(MessageResponse::new("Doctor deleted")))
}
