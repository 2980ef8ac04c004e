use axum::{
    routing::{get, post, put},
    Router,
};
use crate::{
    handlers::{appointments, auth, doctors, health, patients},
    openapi,
    server::AppState,
};

pub mod paths;

/// Create health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route(paths::HEALTH, get(health::health_check))
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(paths::auth::SIGNUP, post(auth::signup))
        .route(paths::auth::LOGIN, post(auth::login))
        .route(paths::auth::ME, get(auth::me).put(auth::update_me))
}

/// Create appointment routes
pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route(
            paths::appointments::APPOINTMENTS,
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            paths::appointments::APPOINTMENT_BY_ID,
            put(appointments::update_appointment).delete(appointments::delete_appointment),
        )
}

/// Create doctor directory routes
pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route(paths::doctors::DOCTORS, get(doctors::list_doctors))
        .route(
            paths::doctors::DOCTOR_BY_ID,
            put(doctors::update_doctor).delete(doctors::delete_doctor),
        )
}

/// Create patient record routes
pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route(
            paths::patients::PATIENTS,
            get(patients::list_records).post(patients::create_record),
        )
        .route(
            paths::patients::PATIENT_BY_ID,
            put(patients::update_record).delete(patients::delete_record),
        )
}

/// Create all routes
pub fn create_routes() -> Router<AppState> {
    let api = Router::new()
        .merge(auth_routes())
        .merge(appointment_routes())
        .merge(doctor_routes())
        .merge(patient_routes());

    Router::new()
        .merge(health_routes())
        .nest(paths::API, api)
        .merge(openapi::create_docs_routes())
}
