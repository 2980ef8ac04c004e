//! Centralized API route path constants
//!
//! utoipa `#[path(...)]` attributes need string literals, so the handler
//! annotations repeat these values; keep the two in step.

/// Prefix every API route is nested under
pub const API: &str = "/api";

pub const HEALTH: &str = "/health";

/// Authentication endpoints (relative to [`API`])
pub mod auth {
    pub const SIGNUP: &str = "/auth/signup";
    pub const LOGIN: &str = "/auth/login";
    pub const ME: &str = "/auth/me";
}

/// Appointment endpoints (relative to [`API`](super::API))
pub mod appointments {
    pub const APPOINTMENTS: &str = "/appointments";
    pub const APPOINTMENT_BY_ID: &str = "/appointments/:id";
}

pub mod doctors {
    pub const DOCTORS: &str = "/doctors";
    pub const DOCTOR_BY_ID: &str = "/doctors/:id";
}

pub mod patients {
    pub const PATIENTS: &str = "/patients";
    pub const PATIENT_BY_ID: &str = "/patients/:id";
}

/// Documentation
pub const DOCS: &str = "/docs";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
