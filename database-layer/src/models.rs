use auth_identity::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A scheduled meeting between a patient and a doctor.
///
/// `date` and `time` are kept as the strings the client sent
/// (`YYYY-MM-DD`, `HH:MM`); ordering compares them lexically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: String,
    pub time: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An appointment with its doctor and patient expanded to display fields.
///
/// An expansion is `None` only when the referenced user no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor: Option<UserSummary>,
    pub patient: Option<UserSummary>,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: String,
    pub time: String,
    pub description: Option<String>,
}

/// Fields an update may change. The owning patient is not among them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub doctor_id: Option<Uuid>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub doctor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPatientRecord {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub doctor_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct PatientRecordPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub doctor_id: Option<Uuid>,
}
