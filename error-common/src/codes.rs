// Standardized error codes returned alongside API and process errors

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
}

pub mod authentication {
    pub const TOKEN_INVALID: &str = "AUTH_2002";
}

pub mod authorization {
    pub const ACCESS_DENIED: &str = "AUTHZ_3001";
}

pub mod database {
    pub const QUERY_FAILED: &str = "DB_4002";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RES_4404";
    pub const CONFLICT: &str = "RES_4409";
}

pub mod system {
    pub const SERVER_FAILURE: &str = "SYS_5001";
    pub const CONFIGURATION: &str = "SYS_5002";
    pub const INTERNAL: &str = "SYS_5003";
}
