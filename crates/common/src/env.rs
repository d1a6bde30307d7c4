//! Environment/runtime helpers
//!
//! Reads the deployment environment name so startup can toggle
//! development-only surfaces such as the API docs.

/// Variable holding the environment name (`development`, `production`, ...).
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Current environment name, `production` when unset.
pub fn app_env() -> String {
    std::env::var(APP_ENV_VAR)
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "production".to_string())
}

pub fn is_development() -> bool {
    matches!(app_env().as_str(), "development" | "dev")
}
