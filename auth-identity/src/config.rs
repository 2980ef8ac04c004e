use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub password_min_length: usize,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            password_min_length: 6,
        }
    }
}
