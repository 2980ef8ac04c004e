use auth_identity::{LoginRequest, ProfileUpdate, SignupRequest, User};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::middleware::{AuthContext, JsonBody};
use crate::server::AppState;

/// Token plus the user it was issued for
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

fn issue(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let token = state.tokens.issue(&user)?;
    Ok(AuthResponse { token, user })
}

/// Register a doctor or patient account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let user = state.identity.signup(request).await?;
    Ok((StatusCode::CREATED, Json(issue(&state, user)?)))
}

/// Exchange email and password for a token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state.identity.login(&request).await?;
    Ok(Json(issue(&state, user)?))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(State(state): State<AppState>, auth: AuthContext) -> Result<Json<User>, ApiError> {
    Ok(Json(state.identity.profile(auth.user_id()).await?))
}

/// Update the current user's name, email or phone
#[utoipa::path(
    put,
    path = "/api/auth/me",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists"),
        (status = 409, description = "Email already in use")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthContext,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = state.identity.update_profile(auth.user_id(), update).await?;
    Ok(Json(user))
}
