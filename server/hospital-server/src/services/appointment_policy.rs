//! Who sees which appointments, who owns a new one, and who may change one.
//!
//! Pure decisions with no I/O; [`AppointmentService`] applies them around
//! the store calls.
//!
//! [`AppointmentService`]: super::AppointmentService

use auth_identity::{Actor, Role};
use database_layer::{Appointment, AppointmentFilter, NewAppointment};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
pub struct AppointmentPolicy {
    enforce_ownership: bool,
}

impl AppointmentPolicy {
    pub fn new(enforce_ownership: bool) -> Self {
        Self { enforce_ownership }
    }

    /// Doctors see the appointments booked with them, patients their own.
    /// There is no unfiltered listing.
    pub fn list_filter(actor: &Actor) -> AppointmentFilter {
        match actor.role {
            Role::Doctor => AppointmentFilter::ByDoctor(actor.id),
            Role::Patient => AppointmentFilter::ByPatient(actor.id),
        }
    }

    /// The creator always becomes the appointment's patient
    pub fn assign_owner(
        actor: &Actor,
        doctor_id: Uuid,
        date: String,
        time: String,
        description: Option<String>,
    ) -> NewAppointment {
        NewAppointment {
            patient_id: actor.id,
            doctor_id,
            date,
            time,
            description,
        }
    }

    /// The booked patient and the assigned doctor are the only parties
    pub fn is_party(actor: &Actor, appointment: &Appointment) -> bool {
        actor.id == appointment.patient_id || actor.id == appointment.doctor_id
    }

    pub fn authorize_modification(
        &self,
        actor: &Actor,
        appointment: &Appointment,
    ) -> Result<(), ApiError> {
        if self.enforce_ownership && !Self::is_party(actor, appointment) {
            tracing::warn!(
                actor_id = %actor.id,
                appointment_id = %appointment.id,
                "Rejected change to another party's appointment"
            );
            return Err(ApiError::authorization(
                "You can only modify your own appointments",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn actor(role: Role) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role,
        }
    }

    fn appointment(patient_id: Uuid, doctor_id: Uuid) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            date: "2025-05-01".to_string(),
            time: "10:00".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn doctors_list_by_doctor_and_patients_by_patient() {
        let doctor = actor(Role::Doctor);
        let patient = actor(Role::Patient);

        assert_eq!(
            AppointmentPolicy::list_filter(&doctor),
            AppointmentFilter::ByDoctor(doctor.id)
        );
        assert_eq!(
            AppointmentPolicy::list_filter(&patient),
            AppointmentFilter::ByPatient(patient.id)
        );
    }

    #[test]
    fn creator_becomes_patient_whatever_their_role() {
        let doctor_id = Uuid::new_v4();
        for role in [Role::Patient, Role::Doctor] {
            let creator = actor(role);
            let new = AppointmentPolicy::assign_owner(
                &creator,
                doctor_id,
                "2025-05-01".to_string(),
                "10:00".to_string(),
                None,
            );
            assert_eq!(new.patient_id, creator.id);
            assert_eq!(new.doctor_id, doctor_id);
        }
    }

    #[test]
    fn parties_may_modify_and_strangers_may_not() {
        let patient = actor(Role::Patient);
        let doctor = actor(Role::Doctor);
        let stranger = actor(Role::Patient);
        let appt = appointment(patient.id, doctor.id);
        let policy = AppointmentPolicy::new(true);

        assert!(policy.authorize_modification(&patient, &appt).is_ok());
        assert!(policy.authorize_modification(&doctor, &appt).is_ok());
        assert!(matches!(
            policy.authorize_modification(&stranger, &appt),
            Err(ApiError::Authorization { .. })
        ));
    }

    #[test]
    fn disabled_ownership_allows_any_actor() {
        let appt = appointment(Uuid::new_v4(), Uuid::new_v4());
        let policy = AppointmentPolicy::new(false);
        assert!(policy
            .authorize_modification(&actor(Role::Patient), &appt)
            .is_ok());
    }
}
