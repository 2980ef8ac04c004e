//! Storage for appointments, patient records and users
//!
//! Two interchangeable backends implement the repository traits:
//!
//! - [`MemoryDatabase`]: every table behind a single `tokio` lock; used in
//!   development and tests
//! - [`PgDatabase`]: PostgreSQL through `sqlx`, with embedded migrations
//!
//! Both also implement [`auth_identity::UserRepository`], so one value
//! backs the whole server.
//!
//! # Example
//!
//! ```rust
//! use database_layer::{AppointmentFilter, AppointmentRepository, MemoryDatabase, NewAppointment};
//! use uuid::Uuid;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let db = MemoryDatabase::new();
//! let patient = Uuid::new_v4();
//! db.create_appointment(NewAppointment {
//!     patient_id: patient,
//!     doctor_id: Uuid::new_v4(),
//!     date: "2025-03-01".into(),
//!     time: "09:30".into(),
//!     description: None,
//! })
//! .await
//! .unwrap();
//!
//! let mine = db.list_appointments(AppointmentFilter::ByPatient(patient)).await.unwrap();
//! assert_eq!(mine.len(), 1);
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use connection::*;
pub use error::*;
pub use memory::*;
pub use models::*;
pub use postgres::*;
pub use repository::*;
