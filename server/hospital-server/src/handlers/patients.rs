use axum::{extract::State, http::StatusCode, Json};
use database_layer::{NewPatientRecord, PatientRecord, PatientRecordPatch};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, MessageResponse};
use crate::middleware::{AuthContext, JsonBody, PathId};
use crate::server::AppState;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_not_blank, validate_range, validate_required};

const MIN_AGE: i32 = 0;
const MAX_AGE: i32 = 120;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientRecordRequest {
    #[serde(default)]
    pub name: String,
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    /// Treating doctor's user id
    #[serde(alias = "doctor")]
    pub doctor_id: Option<Uuid>,
}

impl RequestValidation for CreatePatientRecordRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.name, "Name is required");
        validate_required!(self.gender, "Gender is required");
        validate_field!(self.age, self.age.is_some(), "Age is required");
        if let Some(age) = self.age {
            validate_range!(age, MIN_AGE, MAX_AGE, "Age must be between 0 and 120");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePatientRecordRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    #[serde(alias = "doctor")]
    pub doctor_id: Option<Uuid>,
}

impl RequestValidation for UpdatePatientRecordRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_not_blank!(self.name, "Name cannot be empty");
        validate_not_blank!(self.gender, "Gender cannot be empty");
        if let Some(age) = self.age {
            validate_range!(age, MIN_AGE, MAX_AGE, "Age must be between 0 and 120");
        }
        Ok(())
    }
}

/// All patient records, newest first
#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "Patient records", body = Vec<PatientRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "patients",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_records(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    Ok(Json(state.records.list_records().await?))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientRecordRequest,
    responses(
        (status = 201, description = "Record created", body = PatientRecord),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "patients",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthContext,
    JsonBody(request): JsonBody<CreatePatientRecordRequest>,
) -> Result<(StatusCode, Json<PatientRecord>), ApiError> {
    request.validate()?;

    let record = state
        .records
        .create_record(NewPatientRecord {
            name: request.name.trim().to_string(),
            age: request.age.unwrap_or_default(),
            gender: request.gender.trim().to_string(),
            diagnosis: request.diagnosis,
            treatment: request.treatment,
            doctor_id: request.doctor_id,
        })
        .await?;

    tracing::info!(record_id = %record.id, actor_id = %auth.user_id(), "Patient record created");
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(
        ("id" = Uuid, Path, description = "Patient record ID")
    ),
    request_body = UpdatePatientRecordRequest,
    responses(
        (status = 200, description = "Record updated", body = PatientRecord),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "patients",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_record(
    State(state): State<AppState>,
    PathId(id): PathId<Uuid>,
    _auth: AuthContext,
    JsonBody(request): JsonBody<UpdatePatientRecordRequest>,
) -> Result<Json<PatientRecord>, ApiError> {
    request.validate()?;

    let patch = PatientRecordPatch {
        name: request.name.map(|n| n.trim().to_string()),
        age: request.age,
        gender: request.gender.map(|g| g.trim().to_string()),
        diagnosis: request.diagnosis,
        treatment: request.treatment,
        doctor_id: request.doctor_id,
    };

    Ok(Json(state.records.update_record(id, &patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(
        ("id" = Uuid, Path, description = "Patient record ID")
    ),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "patients",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_record(
    State(state): State<AppState>,
    PathId(id): PathId<Uuid>,
    auth: AuthContext,
) -> Result<Json<MessageResponse>, ApiError> {
    state.records.delete_record(id).await?;
    tracing::info!(record_id = %id, actor_id = %auth.user_id(), "Patient record deleted");
    Ok(Json(MessageResponse::new("Record deleted")))
}
