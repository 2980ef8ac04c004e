use auth_identity::{IdentityConfig, IdentityService, UserRepository};
use axum::extract::FromRef;
use config_engine::Settings;
use database_layer::{
    AppointmentRepository, DatabasePool, MemoryDatabase, PatientRecordRepository, PgDatabase,
    StoreHealth,
};
use error_common::{HospitalError, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::TokenService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub settings: Arc<Settings>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub records: Arc<dyn PatientRecordRepository>,
    pub identity: Arc<IdentityService>,
    pub tokens: Arc<TokenService>,
    pub store: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Build state around one store that backs every repository
    pub fn with_store<S>(settings: Settings, store: S) -> Self
    where
        S: AppointmentRepository
            + PatientRecordRepository
            + UserRepository
            + StoreHealth
            + 'static,
    {
        let store = Arc::new(store);
        let users: Arc<dyn UserRepository> = store.clone();

        Self {
            identity: Arc::new(IdentityService::new(users, IdentityConfig::default())),
            tokens: Arc::new(TokenService::new(&settings.auth)),
            appointments: store.clone(),
            records: store.clone(),
            store,
            settings: Arc::new(settings),
        }
    }

    /// In-memory state, for development and tests
    pub fn in_memory(settings: Settings) -> Self {
        Self::with_store(settings, MemoryDatabase::new())
    }

    /// Connect the backend named by `database.url`, or fall back to memory
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        let Some(url) = settings.database.url.clone() else {
            warn!("database.url not set; using the in-memory store (data is lost on restart)");
            return Ok(Self::in_memory(settings));
        };

        let pool = DatabasePool::new(&url, settings.database.max_connections)
            .await
            .map_err(|e| HospitalError::DatabaseError(e.to_string()))?;

        if settings.database.run_migrations {
            pool.migrate()
                .await
                .map_err(|e| HospitalError::DatabaseError(e.to_string()))?;
        }

        info!("Using PostgreSQL store");
        Ok(Self::with_store(settings, PgDatabase::new(pool)))
    }

    pub fn enforce_ownership(&self) -> bool {
        self.settings.appointments.enforce_ownership
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
