use auth_identity::Actor;
use database_layer::{AppointmentPatch, AppointmentRepository, AppointmentView};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::AppointmentPolicy;
use crate::validation::RequestValidation;
use crate::validate_not_blank;

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

/// Booking request. Any `patient` field is ignored; the caller is the patient.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateAppointment {
    /// Doctor user id
    pub doctor: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`, 24-hour
    pub time: Option<String>,
    pub description: Option<String>,
    /// Older clients send `reason`; `description` wins when both are present
    pub reason: Option<String>,
}

/// Partial update; absent fields keep their value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAppointment {
    pub doctor: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub reason: Option<String>,
}

impl RequestValidation for UpdateAppointment {
    fn validate(&self) -> Result<(), ApiError> {
        validate_not_blank!(self.date, "Date cannot be empty");
        validate_not_blank!(self.time, "Time cannot be empty");
        Ok(())
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_doctor_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::validation("Invalid doctor id"))
}

impl UpdateAppointment {
    fn into_patch(self) -> Result<AppointmentPatch, ApiError> {
        let doctor_id = present(self.doctor.as_ref()).map(parse_doctor_id).transpose()?;
        Ok(AppointmentPatch {
            doctor_id,
            date: self.date.map(|d| d.trim().to_string()),
            time: self.time.map(|t| t.trim().to_string()),
            description: self.description.or(self.reason),
        })
    }
}

/// Appointment operations with the access policy applied
pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
    policy: AppointmentPolicy,
}

impl AppointmentService {
    pub fn new(repo: Arc<dyn AppointmentRepository>, policy: AppointmentPolicy) -> Self {
        Self { repo, policy }
    }

    pub async fn list(&self, actor: &Actor) -> Result<Vec<AppointmentView>, ApiError> {
        let filter = AppointmentPolicy::list_filter(actor);
        Ok(self.repo.list_appointments(filter).await?)
    }

    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateAppointment,
    ) -> Result<AppointmentView, ApiError> {
        let (Some(doctor), Some(date), Some(time)) = (
            present(request.doctor.as_ref()),
            present(request.date.as_ref()),
            present(request.time.as_ref()),
        ) else {
            return Err(ApiError::validation(MISSING_REQUIRED_FIELDS));
        };

        let doctor_id = parse_doctor_id(doctor)?;
        let description = request
            .description
            .or(request.reason)
            .filter(|d| !d.trim().is_empty());

        let new = AppointmentPolicy::assign_owner(
            actor,
            doctor_id,
            date.to_string(),
            time.to_string(),
            description,
        );
        let view = self.repo.create_appointment(new).await?;

        tracing::info!(
            appointment_id = %view.appointment.id,
            patient_id = %view.appointment.patient_id,
            doctor_id = %view.appointment.doctor_id,
            "Appointment booked"
        );
        Ok(view)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        request: UpdateAppointment,
    ) -> Result<AppointmentView, ApiError> {
        self.authorize(actor, id).await?;

        request.validate()?;
        let patch = request.into_patch()?;
        let view = self.repo.update_appointment(id, &patch).await?;

        tracing::info!(appointment_id = %id, actor_id = %actor.id, "Appointment updated");
        Ok(view)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), ApiError> {
        self.authorize(actor, id).await?;
        self.repo.delete_appointment(id).await?;

        tracing::info!(appointment_id = %id, actor_id = %actor.id, "Appointment deleted");
        Ok(())
    }

    /// Existence first (404), then ownership (403); the body is checked after both
    async fn authorize(&self, actor: &Actor, id: Uuid) -> Result<(), ApiError> {
        let existing = self
            .repo
            .find_appointment(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Appointment"))?;
        self.policy.authorize_modification(actor, &existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth_identity::Role;
    use database_layer::MemoryDatabase;

    fn service(enforce_ownership: bool) -> AppointmentService {
        AppointmentService::new(
            Arc::new(MemoryDatabase::new()),
            AppointmentPolicy::new(enforce_ownership),
        )
    }

    fn patient() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role: Role::Patient,
        }
    }

    fn booking(doctor: Uuid) -> CreateAppointment {
        CreateAppointment {
            doctor: Some(doctor.to_string()),
            date: Some("2025-06-01".to_string()),
            time: Some("09:00".to_string()),
            description: Some("follow-up".to_string()),
            reason: None,
        }
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_the_store() {
        let service = service(true);
        let actor = patient();

        for request in [
            CreateAppointment::default(),
            CreateAppointment {
                date: None,
                ..booking(Uuid::new_v4())
            },
            CreateAppointment {
                time: Some("   ".to_string()),
                ..booking(Uuid::new_v4())
            },
        ] {
            let err = service.create(&actor, request).await.unwrap_err();
            assert_eq!(err.public_message(), MISSING_REQUIRED_FIELDS);
        }
        assert!(service.list(&actor).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_doctor_id_is_a_validation_error() {
        let service = service(true);
        let request = CreateAppointment {
            doctor: Some("not-an-id".to_string()),
            ..booking(Uuid::new_v4())
        };
        let err = service.create(&patient(), request).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn stranger_cannot_update_or_delete_when_ownership_is_enforced() {
        let service = service(true);
        let owner = patient();
        let stranger = patient();
        let created = service
            .create(&owner, booking(Uuid::new_v4()))
            .await
            .unwrap();
        let id = created.appointment.id;

        let update = service
            .update(&stranger, id, UpdateAppointment::default())
            .await;
        assert!(matches!(update, Err(ApiError::Authorization { .. })));

        let delete = service.delete(&stranger, id).await;
        assert!(matches!(delete, Err(ApiError::Authorization { .. })));

        service.delete(&owner, id).await.unwrap();
    }

    #[tokio::test]
    async fn stranger_with_a_blank_field_still_gets_forbidden() {
        let service = service(true);
        let owner = patient();
        let created = service
            .create(&owner, booking(Uuid::new_v4()))
            .await
            .unwrap();

        let blank = || UpdateAppointment {
            date: Some(String::new()),
            ..UpdateAppointment::default()
        };

        let stranger = service
            .update(&patient(), created.appointment.id, blank())
            .await;
        assert!(matches!(stranger, Err(ApiError::Authorization { .. })));

        let missing = service.update(&owner, Uuid::new_v4(), blank()).await;
        assert!(matches!(missing, Err(ApiError::NotFound { .. })));

        let own = service.update(&owner, created.appointment.id, blank()).await;
        assert!(matches!(own, Err(ApiError::Validation { .. })));
    }

    #[test]
    fn description_and_reason_may_both_be_sent() {
        let request: CreateAppointment = serde_json::from_value(serde_json::json!({
            "doctor": Uuid::new_v4(),
            "date": "2025-06-01",
            "time": "09:00",
            "description": "new",
            "reason": "old",
        }))
        .unwrap();
        assert_eq!(request.description.as_deref(), Some("new"));

        let update: UpdateAppointment =
            serde_json::from_value(serde_json::json!({ "reason": "old" })).unwrap();
        assert_eq!(update.into_patch().unwrap().description.as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn anyone_may_update_when_ownership_is_off() {
        let service = service(false);
        let created = service
            .create(&patient(), booking(Uuid::new_v4()))
            .await
            .unwrap();

        let updated = service
            .update(
                &patient(),
                created.appointment.id,
                UpdateAppointment {
                    time: Some("15:45".to_string()),
                    ..UpdateAppointment::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.appointment.time, "15:45");
        assert_eq!(
            updated.appointment.patient_id,
            created.appointment.patient_id
        );
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_either_way() {
        for enforce in [true, false] {
            let service = service(enforce);
            let err = service
                .delete(&patient(), Uuid::new_v4())
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::NotFound { .. }));
        }
    }
}
