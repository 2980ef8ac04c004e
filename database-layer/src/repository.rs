use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseResult;
use crate::models::*;

/// Which appointments a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentFilter {
    ByDoctor(Uuid),
    ByPatient(Uuid),
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Matching appointments, expanded, ascending by `(date, time)`
    async fn list_appointments(&self, filter: AppointmentFilter)
        -> DatabaseResult<Vec<AppointmentView>>;

    async fn find_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>>;

    /// Persist and return the expanded record in one operation
    async fn create_appointment(&self, appointment: NewAppointment)
        -> DatabaseResult<AppointmentView>;

    async fn update_appointment(
        &self,
        id: Uuid,
        patch: &AppointmentPatch,
    ) -> DatabaseResult<AppointmentView>;

    async fn delete_appointment(&self, id: Uuid) -> DatabaseResult<()>;
}

#[async_trait]
pub trait PatientRecordRepository: Send + Sync {
    /// All records, newest first
    async fn list_records(&self) -> DatabaseResult<Vec<PatientRecord>>;
    async fn find_record(&self, id: Uuid) -> DatabaseResult<Option<PatientRecord>>;
    async fn create_record(&self, record: NewPatientRecord) -> DatabaseResult<PatientRecord>;
    async fn update_record(
        &self,
        id: Uuid,
        patch: &PatientRecordPatch,
    ) -> DatabaseResult<PatientRecord>;
    async fn delete_record(&self, id: Uuid) -> DatabaseResult<()>;
}

/// Liveness of the backing store
#[async_trait]
pub trait StoreHealth: Send + Sync {
    fn backend(&self) -> &'static str;
    async fn ping(&self) -> DatabaseResult<()>;
}
