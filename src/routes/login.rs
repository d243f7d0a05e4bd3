use super::types::{JWT_COOKIE, LoginRequest, SharedState};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header::{InvalidHeaderValue, SET_COOKIE}},
    response::IntoResponse,
};
use jwt_simple::{algorithms::MACLike, claims::Claims, reexports::coarsetime::Duration};
use thiserror::Error;
use tracing::{info, warn};

pub const SESSION_HOURS: u64 = 2;

#[tracing::instrument(skip_all)]
pub async fn admin_login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, LoginError> {
    let hashed_password =
        PasswordHash::new(&state.admin_password_hash).map_err(|_| LoginError::HashingError)?;
    Argon2::default()
        .verify_password(payload.password.as_bytes(), &hashed_password)
        .map_err(|_| {
            warn!("Rejected administrator login");
            LoginError::InvalidPassword
        })?;

    let claims = Claims::create(Duration::from_hours(SESSION_HOURS)).with_subject("admin");
    let auth = state.jwt_key.authenticate(claims)?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, session_cookie(&auth)?);

    info!("Administrator logged in");
    Ok((StatusCode::OK, headers, "login successful!"))
}

fn session_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if cfg!(feature = "dev") { "" } else { "; Secure" };
    HeaderValue::from_str(&format!(
        "{JWT_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict{secure}",
        SESSION_HOURS * 3600
    ))
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("The password you provided is invalid.")]
    InvalidPassword,
    #[error("An error occurred while hashing.")]
    HashingError,
    #[error(transparent)]
    JwtCreationError(#[from] jwt_simple::Error),
    #[error(transparent)]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            LoginError::InvalidPassword => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
