// In-memory backend for development and tests
use async_trait::async_trait;
use auth_identity::{
    normalize_email, IdentityError, NewUser, ProfileUpdate, Role, User, UserRepository,
    UserSummary,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::*;
use crate::repository::*;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    appointments: Vec<Appointment>,
    records: Vec<PatientRecord>,
}

impl Tables {
    fn summary(&self, id: Uuid) -> Option<UserSummary> {
        self.users.iter().find(|u| u.id == id).map(UserSummary::from)
    }

    fn expand(&self, appointment: &Appointment) -> AppointmentView {
        AppointmentView {
            doctor: self.summary(appointment.doctor_id),
            patient: self.summary(appointment.patient_id),
            appointment: appointment.clone(),
        }
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// All tables behind one lock, so a write and its read-back are atomic
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

fn appointment_not_found(id: Uuid) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "Appointment",
        id,
    }
}

fn record_not_found(id: Uuid) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "Patient record",
        id,
    }
}

#[async_trait]
impl AppointmentRepository for MemoryDatabase {
    async fn list_appointments(
        &self,
        filter: AppointmentFilter,
    ) -> DatabaseResult<Vec<AppointmentView>> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&Appointment> = tables
            .appointments
            .iter()
            .filter(|a| match filter {
                AppointmentFilter::ByDoctor(id) => a.doctor_id == id,
                AppointmentFilter::ByPatient(id) => a.patient_id == id,
            })
            .collect();
        matching.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));

        Ok(matching.into_iter().map(|a| tables.expand(a)).collect())
    }

    async fn find_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> DatabaseResult<AppointmentView> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            date: appointment.date,
            time: appointment.time,
            description: appointment.description,
            created_at: now,
            updated_at: now,
        };
        let view = tables.expand(&appointment);
        tables.appointments.push(appointment);
        Ok(view)
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        patch: &AppointmentPatch,
    ) -> DatabaseResult<AppointmentView> {
        let mut tables = self.tables.write().await;
        let appointment = tables
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| appointment_not_found(id))?;

        if let Some(doctor_id) = patch.doctor_id {
            appointment.doctor_id = doctor_id;
        }
        if let Some(date) = &patch.date {
            appointment.date.clone_from(date);
        }
        if let Some(time) = &patch.time {
            appointment.time.clone_from(time);
        }
        if let Some(description) = &patch.description {
            appointment.description = Some(description.clone());
        }
        appointment.updated_at = Utc::now();

        let updated = appointment.clone();
        Ok(tables.expand(&updated))
    }

    async fn delete_appointment(&self, id: Uuid) -> DatabaseResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.appointments.len();
        tables.appointments.retain(|a| a.id != id);
        if tables.appointments.len() == before {
            return Err(appointment_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl PatientRecordRepository for MemoryDatabase {
    async fn list_records(&self) -> DatabaseResult<Vec<PatientRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.records.iter().rev().cloned().collect())
    }

    async fn find_record(&self, id: Uuid) -> DatabaseResult<Option<PatientRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.records.iter().find(|r| r.id == id).cloned())
    }

    async fn create_record(&self, record: NewPatientRecord) -> DatabaseResult<PatientRecord> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let record = PatientRecord {
            id: Uuid::new_v4(),
            name: record.name,
            age: record.age,
            gender: record.gender,
            diagnosis: record.diagnosis,
            treatment: record.treatment,
            doctor_id: record.doctor_id,
            created_at: now,
            updated_at: now,
        };
        tables.records.push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        id: Uuid,
        patch: &PatientRecordPatch,
    ) -> DatabaseResult<PatientRecord> {
        let mut tables = self.tables.write().await;
        let record = tables
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| record_not_found(id))?;

        if let Some(name) = &patch.name {
            record.name.clone_from(name);
        }
        if let Some(age) = patch.age {
            record.age = age;
        }
        if let Some(gender) = &patch.gender {
            record.gender.clone_from(gender);
        }
        if let Some(diagnosis) = &patch.diagnosis {
            record.diagnosis = Some(diagnosis.clone());
        }
        if let Some(treatment) = &patch.treatment {
            record.treatment = Some(treatment.clone());
        }
        if let Some(doctor_id) = patch.doctor_id {
            record.doctor_id = Some(doctor_id);
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete_record(&self, id: Uuid) -> DatabaseResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.records.len();
        tables.records.retain(|r| r.id != id);
        if tables.records.len() == before {
            return Err(record_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn create_user(&self, user: NewUser) -> auth_identity::Result<User> {
        let mut tables = self.tables.write().await;
        let email = normalize_email(&user.email);
        if tables.email_taken(&email, None) {
            return Err(IdentityError::EmailAlreadyInUse);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email,
            phone: user.phone,
            role: user.role,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> auth_identity::Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> auth_identity::Result<Option<User>> {
        let email = normalize_email(email);
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users_by_role(&self, role: Role) -> auth_identity::Result<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn update_user_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> auth_identity::Result<User> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &update.email {
            if tables.email_taken(&normalize_email(email), Some(id)) {
                return Err(IdentityError::EmailAlreadyInUse);
            }
        }

        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(IdentityError::UserNotFound)?;

        if let Some(name) = &update.name {
            user.name.clone_from(name);
        }
        if let Some(email) = &update.email {
            user.email = normalize_email(email);
        }
        if let Some(phone) = &update.phone {
            user.phone = Some(phone.clone());
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> auth_identity::Result<()> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(IdentityError::UserNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for MemoryDatabase {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> DatabaseResult<()> {
        let _tables = self.tables.read().await;
        Ok(())
    }
}
