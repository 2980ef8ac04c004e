// PostgreSQL backend
use async_trait::async_trait;
use auth_identity::{
    normalize_email, IdentityError, NewUser, ProfileUpdate, Role, User, UserRepository,
    UserSummary,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::*;
use crate::repository::*;

/// Appointment columns plus the joined display fields of both users.
/// Expects the appointment row aliased `a`.
const APPOINTMENT_VIEW_COLUMNS: &str = r#"
    a.id, a.patient_id, a.doctor_id,
    a.scheduled_date AS date, a.scheduled_time AS time,
    a.description, a.created_at, a.updated_at,
    d.name AS doctor_name, d.email AS doctor_email, d.role AS doctor_role,
    p.name AS patient_name, p.email AS patient_email, p.role AS patient_role
"#;

const APPOINTMENT_VIEW_JOINS: &str = r#"
    LEFT JOIN users d ON d.id = a.doctor_id
    LEFT JOIN users p ON p.id = a.patient_id
"#;

const USER_COLUMNS: &str =
    "id, name, email, phone, role, password_hash, created_at, updated_at";

const RECORD_COLUMNS: &str =
    "id, name, age, gender, diagnosis, treatment, doctor_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    patient_id: Uuid,
    doctor_id: Uuid,
    date: String,
    time: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    doctor_name: Option<String>,
    doctor_email: Option<String>,
    doctor_role: Option<String>,
    patient_name: Option<String>,
    patient_email: Option<String>,
    patient_role: Option<String>,
}

fn summary(
    id: Uuid,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
) -> Option<UserSummary> {
    Some(UserSummary {
        id,
        name: name?,
        email: email?,
        role: role?.parse().ok()?,
    })
}

impl From<AppointmentRow> for AppointmentView {
    fn from(row: AppointmentRow) -> Self {
        AppointmentView {
            doctor: summary(row.doctor_id, row.doctor_name, row.doctor_email, row.doctor_role),
            patient: summary(
                row.patient_id,
                row.patient_name,
                row.patient_email,
                row.patient_role,
            ),
            appointment: Appointment {
                id: row.id,
                patient_id: row.patient_id,
                doctor_id: row.doctor_id,
                date: row.date,
                time: row.time,
                description: row.description,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| DatabaseError::QueryFailed(format!("user {}: {e}", row.id)))?;
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            role,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn user_error(error: sqlx::Error) -> IdentityError {
    if is_unique_violation(&error) {
        IdentityError::EmailAlreadyInUse
    } else {
        DatabaseError::from(error).into()
    }
}

/// Repositories backed by PostgreSQL
#[derive(Clone)]
pub struct PgDatabase {
    pool: DatabasePool,
}

impl PgDatabase {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn pg(&self) -> &PgPool {
        self.pool.pool()
    }
}

#[async_trait]
impl AppointmentRepository for PgDatabase {
    async fn list_appointments(
        &self,
        filter: AppointmentFilter,
    ) -> DatabaseResult<Vec<AppointmentView>> {
        let (column, id) = match filter {
            AppointmentFilter::ByDoctor(id) => ("doctor_id", id),
            AppointmentFilter::ByPatient(id) => ("patient_id", id),
        };
        // Byte-wise order, matching the in-memory backend whatever the server locale
        let sql = format!(
            "SELECT {APPOINTMENT_VIEW_COLUMNS} FROM appointments a {APPOINTMENT_VIEW_JOINS}
             WHERE a.{column} = $1
             ORDER BY a.scheduled_date COLLATE \"C\" ASC, a.scheduled_time COLLATE \"C\" ASC, a.created_at ASC"
        );

        let rows = sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(id)
            .fetch_all(self.pg())
            .await?;

        Ok(rows.into_iter().map(AppointmentView::from).collect())
    }

    async fn find_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, patient_id, doctor_id,
                   scheduled_date AS date, scheduled_time AS time,
                   description, created_at, updated_at
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pg())
        .await?;

        Ok(appointment)
    }

    async fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> DatabaseResult<AppointmentView> {
        let sql = format!(
            "WITH a AS (
                INSERT INTO appointments
                    (id, patient_id, doctor_id, scheduled_date, scheduled_time, description)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             )
             SELECT {APPOINTMENT_VIEW_COLUMNS} FROM a {APPOINTMENT_VIEW_JOINS}"
        );

        let row = sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(appointment.patient_id)
            .bind(appointment.doctor_id)
            .bind(&appointment.date)
            .bind(&appointment.time)
            .bind(&appointment.description)
            .fetch_one(self.pg())
            .await?;

        Ok(row.into())
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        patch: &AppointmentPatch,
    ) -> DatabaseResult<AppointmentView> {
        let sql = format!(
            "WITH a AS (
                UPDATE appointments SET
                    doctor_id = COALESCE($2, doctor_id),
                    scheduled_date = COALESCE($3, scheduled_date),
                    scheduled_time = COALESCE($4, scheduled_time),
                    description = COALESCE($5, description),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {APPOINTMENT_VIEW_COLUMNS} FROM a {APPOINTMENT_VIEW_JOINS}"
        );

        let row = sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(id)
            .bind(patch.doctor_id)
            .bind(&patch.date)
            .bind(&patch.time)
            .bind(&patch.description)
            .fetch_optional(self.pg())
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "Appointment",
                id,
            })?;

        Ok(row.into())
    }

    async fn delete_appointment(&self, id: Uuid) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(self.pg())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity: "Appointment",
                id,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PatientRecordRepository for PgDatabase {
    async fn list_records(&self) -> DatabaseResult<Vec<PatientRecord>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM patient_records ORDER BY created_at DESC"
        );
        let records = sqlx::query_as::<_, PatientRecord>(&sql)
            .fetch_all(self.pg())
            .await?;
        Ok(records)
    }

    async fn find_record(&self, id: Uuid) -> DatabaseResult<Option<PatientRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM patient_records WHERE id = $1");
        let record = sqlx::query_as::<_, PatientRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pg())
            .await?;
        Ok(record)
    }

    async fn create_record(&self, record: NewPatientRecord) -> DatabaseResult<PatientRecord> {
        let sql = format!(
            "INSERT INTO patient_records
                (id, name, age, gender, diagnosis, treatment, doctor_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {RECORD_COLUMNS}"
        );
        let record = sqlx::query_as::<_, PatientRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(&record.name)
            .bind(record.age)
            .bind(&record.gender)
            .bind(&record.diagnosis)
            .bind(&record.treatment)
            .bind(record.doctor_id)
            .fetch_one(self.pg())
            .await?;
        Ok(record)
    }

    async fn update_record(
        &self,
        id: Uuid,
        patch: &PatientRecordPatch,
    ) -> DatabaseResult<PatientRecord> {
        let sql = format!(
            "UPDATE patient_records SET
                name = COALESCE($2, name),
                age = COALESCE($3, age),
                gender = COALESCE($4, gender),
                diagnosis = COALESCE($5, diagnosis),
                treatment = COALESCE($6, treatment),
                doctor_id = COALESCE($7, doctor_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, PatientRecord>(&sql)
            .bind(id)
            .bind(&patch.name)
            .bind(patch.age)
            .bind(&patch.gender)
            .bind(&patch.diagnosis)
            .bind(&patch.treatment)
            .bind(patch.doctor_id)
            .fetch_optional(self.pg())
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "Patient record",
                id,
            })
    }

    async fn delete_record(&self, id: Uuid) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM patient_records WHERE id = $1")
            .bind(id)
            .execute(self.pg())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity: "Patient record",
                id,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgDatabase {
    async fn create_user(&self, user: NewUser) -> auth_identity::Result<User> {
        let sql = format!(
            "INSERT INTO users (id, name, email, phone, role, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(normalize_email(&user.email))
            .bind(&user.phone)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .fetch_one(self.pg())
            .await
            .map_err(user_error)?;

        Ok(User::try_from(row)?)
    }

    async fn find_user(&self, id: Uuid) -> auth_identity::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pg())
            .await
            .map_err(user_error)?;

        Ok(row.map(User::try_from).transpose()?)
    }

    async fn find_user_by_email(&self, email: &str) -> auth_identity::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(normalize_email(email))
            .fetch_optional(self.pg())
            .await
            .map_err(user_error)?;

        Ok(row.map(User::try_from).transpose()?)
    }

    async fn list_users_by_role(&self, role: Role) -> auth_identity::Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY name ASC");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(role.as_str())
            .fetch_all(self.pg())
            .await
            .map_err(user_error)?;

        rows.into_iter()
            .map(|row| User::try_from(row).map_err(IdentityError::from))
            .collect()
    }

    async fn update_user_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> auth_identity::Result<User> {
        let sql = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(update.email.as_deref().map(normalize_email))
            .bind(&update.phone)
            .fetch_optional(self.pg())
            .await
            .map_err(user_error)?
            .ok_or(IdentityError::UserNotFound)?;

        Ok(User::try_from(row)?)
    }

    async fn delete_user(&self, id: Uuid) -> auth_identity::Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pg())
            .await
            .map_err(user_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::UserNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for PgDatabase {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> DatabaseResult<()> {
        sqlx::query("SELECT 1").execute(self.pg()).await?;
        Ok(())
    }
}
