//! Behaviour of the in-memory backend: filtering, ordering, expansion and
//! not-found handling. Needs no DATABASE_URL.

use auth_identity::{IdentityError, NewUser, ProfileUpdate, Role, UserRepository};
use database_layer::{
    AppointmentFilter, AppointmentPatch, AppointmentRepository, DatabaseError, MemoryDatabase,
    NewAppointment, NewPatientRecord, PatientRecordPatch, PatientRecordRepository, StoreHealth,
};
use uuid::Uuid;

async fn user(db: &MemoryDatabase, name: &str, role: Role) -> Uuid {
    db.create_user(NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        role,
        password_hash: "hash".to_string(),
    })
    .await
    .unwrap()
    .id
}

fn booking(patient: Uuid, doctor: Uuid, date: &str, time: &str) -> NewAppointment {
    NewAppointment {
        patient_id: patient,
        doctor_id: doctor,
        date: date.to_string(),
        time: time.to_string(),
        description: Some("checkup".to_string()),
    }
}

#[tokio::test]
async fn create_returns_expanded_view() {
    let db = MemoryDatabase::new();
    let patient = user(&db, "Pat", Role::Patient).await;
    let doctor = user(&db, "House", Role::Doctor).await;

    let view = db
        .create_appointment(booking(patient, doctor, "2025-01-10", "10:00"))
        .await
        .unwrap();

    assert_eq!(view.appointment.patient_id, patient);
    assert_eq!(view.doctor.as_ref().unwrap().name, "House");
    assert_eq!(view.doctor.as_ref().unwrap().role, Role::Doctor);
    assert_eq!(view.patient.as_ref().unwrap().email, "pat@example.com");
}

#[tokio::test]
async fn listing_filters_by_role_side_and_orders_by_date_then_time() {
    let db = MemoryDatabase::new();
    let p1 = user(&db, "P1", Role::Patient).await;
    let p2 = user(&db, "P2", Role::Patient).await;
    let d1 = user(&db, "D1", Role::Doctor).await;
    let d2 = user(&db, "D2", Role::Doctor).await;

    db.create_appointment(booking(p1, d1, "2025-02-01", "14:00")).await.unwrap();
    db.create_appointment(booking(p1, d2, "2025-01-15", "09:00")).await.unwrap();
    db.create_appointment(booking(p2, d1, "2025-02-01", "08:30")).await.unwrap();

    let for_p1 = db
        .list_appointments(AppointmentFilter::ByPatient(p1))
        .await
        .unwrap();
    let slots: Vec<(&str, &str)> = for_p1
        .iter()
        .map(|v| (v.appointment.date.as_str(), v.appointment.time.as_str()))
        .collect();
    assert_eq!(slots, vec![("2025-01-15", "09:00"), ("2025-02-01", "14:00")]);

    let for_d1 = db
        .list_appointments(AppointmentFilter::ByDoctor(d1))
        .await
        .unwrap();
    assert_eq!(for_d1.len(), 2);
    assert_eq!(for_d1[0].appointment.patient_id, p2);
    assert_eq!(for_d1[1].appointment.patient_id, p1);

    let for_d2 = db
        .list_appointments(AppointmentFilter::ByDoctor(d2))
        .await
        .unwrap();
    assert_eq!(for_d2.len(), 1);
}

#[tokio::test]
async fn listing_compares_dates_byte_wise() {
    let db = MemoryDatabase::new();
    let patient = user(&db, "Pat", Role::Patient).await;
    let doctor = user(&db, "House", Role::Doctor).await;

    for date in ["b-1", "B-2", "a-3", "A-4"] {
        db.create_appointment(booking(patient, doctor, date, "10:00"))
            .await
            .unwrap();
    }

    let dates: Vec<String> = db
        .list_appointments(AppointmentFilter::ByPatient(patient))
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.appointment.date)
        .collect();
    assert_eq!(dates, vec!["A-4", "B-2", "a-3", "b-1"]);
}

#[tokio::test]
async fn patch_changes_only_named_fields() {
    let db = MemoryDatabase::new();
    let patient = user(&db, "Pat", Role::Patient).await;
    let doctor = user(&db, "House", Role::Doctor).await;
    let created = db
        .create_appointment(booking(patient, doctor, "2025-01-10", "10:00"))
        .await
        .unwrap();

    let updated = db
        .update_appointment(
            created.appointment.id,
            &AppointmentPatch {
                time: Some("11:30".to_string()),
                ..AppointmentPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.appointment.time, "11:30");
    assert_eq!(updated.appointment.date, "2025-01-10");
    assert_eq!(updated.appointment.patient_id, patient);
    assert_eq!(updated.appointment.description.as_deref(), Some("checkup"));
}

#[tokio::test]
async fn unknown_appointment_is_not_found() {
    let db = MemoryDatabase::new();
    let id = Uuid::new_v4();

    let update = db.update_appointment(id, &AppointmentPatch::default()).await;
    assert!(matches!(update, Err(DatabaseError::NotFound { .. })));

    let delete = db.delete_appointment(id).await;
    assert!(delete.unwrap_err().is_not_found());

    assert!(db.find_appointment(id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleted_doctor_leaves_appointment_with_empty_expansion() {
    let db = MemoryDatabase::new();
    let patient = user(&db, "Pat", Role::Patient).await;
    let doctor = user(&db, "House", Role::Doctor).await;
    db.create_appointment(booking(patient, doctor, "2025-01-10", "10:00"))
        .await
        .unwrap();

    db.delete_user(doctor).await.unwrap();

    let views = db
        .list_appointments(AppointmentFilter::ByPatient(patient))
        .await
        .unwrap();
    assert_eq!(views[0].appointment.doctor_id, doctor);
    assert!(views[0].doctor.is_none());
    assert!(views[0].patient.is_some());
}

#[tokio::test]
async fn deleted_appointment_is_gone_for_good() {
    let db = MemoryDatabase::new();
    let patient = user(&db, "Pat", Role::Patient).await;
    let doctor = user(&db, "House", Role::Doctor).await;
    let created = db
        .create_appointment(booking(patient, doctor, "2025-01-10", "10:00"))
        .await
        .unwrap();

    db.delete_appointment(created.appointment.id).await.unwrap();

    assert!(db
        .list_appointments(AppointmentFilter::ByPatient(patient))
        .await
        .unwrap()
        .is_empty());
    assert!(db.delete_appointment(created.appointment.id).await.is_err());
}

#[tokio::test]
async fn user_email_is_unique_ignoring_case() {
    let db = MemoryDatabase::new();
    user(&db, "Pat", Role::Patient).await;

    let duplicate = db
        .create_user(NewUser {
            name: "Other".to_string(),
            email: "PAT@Example.com".to_string(),
            phone: None,
            role: Role::Doctor,
            password_hash: "hash".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(IdentityError::EmailAlreadyInUse)));

    let found = db.find_user_by_email("Pat@EXAMPLE.com").await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn profile_update_cannot_take_another_users_email() {
    let db = MemoryDatabase::new();
    user(&db, "Pat", Role::Patient).await;
    let other = user(&db, "Sam", Role::Patient).await;

    let result = db
        .update_user_profile(
            other,
            &ProfileUpdate {
                email: Some("pat@example.com".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .await;
    assert!(matches!(result, Err(IdentityError::EmailAlreadyInUse)));
}

#[tokio::test]
async fn patient_records_list_newest_first_and_patch() {
    let db = MemoryDatabase::new();
    let first = db
        .create_record(NewPatientRecord {
            name: "First".to_string(),
            age: 40,
            gender: "female".to_string(),
            diagnosis: None,
            treatment: None,
            doctor_id: None,
        })
        .await
        .unwrap();
    db.create_record(NewPatientRecord {
        name: "Second".to_string(),
        age: 12,
        gender: "male".to_string(),
        diagnosis: Some("flu".to_string()),
        treatment: None,
        doctor_id: None,
    })
    .await
    .unwrap();

    let names: Vec<String> = db
        .list_records()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Second", "First"]);

    let patched = db
        .update_record(
            first.id,
            &PatientRecordPatch {
                treatment: Some("rest".to_string()),
                ..PatientRecordPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.treatment.as_deref(), Some("rest"));
    assert_eq!(patched.age, 40);

    db.delete_record(first.id).await.unwrap();
    assert!(db.find_record(first.id).await.unwrap().is_none());
    assert!(db.delete_record(first.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn memory_backend_is_always_healthy() {
    let db = MemoryDatabase::new();
    assert_eq!(db.backend(), "memory");
    db.ping().await.unwrap();
}
