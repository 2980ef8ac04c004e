//! Accounts, doctor directory and patient records through the router

mod common;

use axum::http::{Method, StatusCode};
use common::{app, send, signup};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn signup_login_and_profile() {
    let app = app();
    let account = signup(&app, "Jane", "patient").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "JANE@hospital.test", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], account.id.as_str());
    assert!(body["user"].get("password_hash").is_none());

    let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(&account.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "jane@hospital.test");
    assert_eq!(me["role"], "patient");

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/auth/me",
        Some(&account.token),
        Some(json!({ "phone": "555-0100" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], "555-0100");
    assert_eq!(updated["name"], "Jane");
}

#[tokio::test]
async fn bad_credentials_and_duplicate_email() {
    let app = app();
    signup(&app, "Jane", "patient").await;

    for credentials in [
        json!({ "email": "jane@hospital.test", "password": "wrong-password" }),
        json!({ "email": "nobody@hospital.test", "password": "secret123" }),
    ] {
        let (status, body) =
            send(&app, Method::POST, "/api/auth/login", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Other Jane",
            "email": "Jane@Hospital.test",
            "password": "secret123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_type"], "conflict");
}

#[tokio::test]
async fn signup_rejects_short_passwords_and_bad_emails() {
    let app = app();

    for body in [
        json!({ "name": "Jane", "email": "jane@hospital.test", "password": "123" }),
        json!({ "name": "Jane", "email": "not-an-email", "password": "secret123" }),
        json!({ "name": " ", "email": "jane@hospital.test", "password": "secret123" }),
    ] {
        let (status, _) = send(&app, Method::POST, "/api/auth/signup", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn doctor_directory() {
    let app = app();
    let wilson = signup(&app, "Wilson", "doctor").await;
    let cuddy = signup(&app, "Cuddy", "doctor").await;
    let patient = signup(&app, "Pat", "patient").await;

    let (status, list) = send(&app, Method::GET, "/api/doctors", Some(&patient.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cuddy", "Wilson"]);

    // Only the doctor themself may edit the profile
    let uri = format!("/api/doctors/{}", wilson.id);
    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&cuddy.token),
        Some(json!({ "name": "Not Wilson" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&wilson.token),
        Some(json!({ "name": "James Wilson" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "James Wilson");

    // A patient id is not a doctor
    let uri = format!("/api/doctors/{}", patient.id);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&cuddy.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/doctors/{}", wilson.id);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&cuddy.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, Method::GET, "/api/doctors", Some(&patient.token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn patient_record_crud() {
    let app = app();
    let doctor = signup(&app, "House", "doctor").await;

    let (status, first) = send(
        &app,
        Method::POST,
        "/api/patients",
        Some(&doctor.token),
        Some(json!({
            "name": "John Doe",
            "age": 42,
            "gender": "male",
            "diagnosis": "Flu",
            "doctor": doctor.id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["doctor_id"], doctor.id.as_str());
    assert!(first["treatment"].is_null());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/patients",
        Some(&doctor.token),
        Some(json!({ "name": "Mary Roe", "age": 30, "gender": "female" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = send(&app, Method::GET, "/api/patients", Some(&doctor.token), None).await;
    assert_eq!(list[0]["name"], "Mary Roe");
    assert_eq!(list[1]["name"], "John Doe");

    let uri = format!("/api/patients/{}", first["id"].as_str().unwrap());
    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&doctor.token),
        Some(json!({ "treatment": "Rest" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["treatment"], "Rest");
    assert_eq!(updated["diagnosis"], "Flu");
    assert_eq!(updated["age"], 42);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&doctor.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Record deleted");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&doctor.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patient_record_validation() {
    let app = app();
    let doctor = signup(&app, "House", "doctor").await;

    for body in [
        json!({ "age": 42, "gender": "male" }),
        json!({ "name": "John Doe", "gender": "male" }),
        json!({ "name": "John Doe", "age": 121, "gender": "male" }),
        json!({ "name": "John Doe", "age": -1, "gender": "male" }),
    ] {
        let (status, _) =
            send(&app, Method::POST, "/api/patients", Some(&doctor.token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let uri = format!("/api/patients/{}", Uuid::new_v4());
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&doctor.token),
        Some(json!({ "age": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Patient record not found");
}

#[tokio::test]
async fn health_and_docs_are_public() {
    let app = app();

    let (status, health) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/appointments/{id}").is_some());
}
