use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Redirect url {0:?} is not a well-formed http(s) url or site path.")]
    InvalidRedirectUrl(String),
    #[error("Timeout must be a positive whole number, got {0}.")]
    InvalidTimeoutValue(i64),
    #[error("Timeout unit {0:?} must be one of minutes, hours or days.")]
    InvalidTimeoutUnit(String),
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    #[error(transparent)]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl IntoResponse for SettingsError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SettingsError::InvalidRedirectUrl(_)
            | SettingsError::InvalidTimeoutValue(_)
            | SettingsError::InvalidTimeoutUnit(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
            SettingsError::DatabaseError(_) | SettingsError::MigrationError(_) => {
                error!("Settings store failure: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Settings are temporarily unavailable.",
                )
                    .into_response()
            }
        }
    }
}
