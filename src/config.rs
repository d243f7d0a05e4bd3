use crate::redirect::marker::MarkerConfig;
use argon2::PasswordHash;
use jwt_simple::algorithms::HS256Key;
use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Which request paths count as the homepage and as administrative views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub homepage_path: String,
    pub admin_prefix: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            homepage_path: "/".to_string(),
            admin_prefix: "/admin".to_string(),
        }
    }
}

pub struct Config {
    pub bind_address: String,
    /// Settings fall back to an in-memory record when unset.
    pub database_url: Option<String>,
    pub jwt_key: HS256Key,
    pub admin_password_hash: String,
    pub routes: RouteConfig,
    pub marker: MarkerConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_key = required("JWT_KEY")?;
        let jwt_key = HS256Key::from_bytes(&hex::decode(jwt_key.trim())?);

        let admin_password_hash = required("ADMIN_PASSWORD_HASH")?;
        PasswordHash::new(&admin_password_hash)
            .map_err(|e| ConfigError::InvalidPasswordHash(e.to_string()))?;

        let defaults = RouteConfig::default();
        let routes = RouteConfig {
            homepage_path: path_var("HOMEPAGE_PATH", defaults.homepage_path)?,
            admin_prefix: path_var("ADMIN_PATH_PREFIX", defaults.admin_prefix)?,
        };
        if routes.admin_prefix.trim_end_matches('/').is_empty() {
            Err(ConfigError::InvalidPath("ADMIN_PATH_PREFIX", routes.admin_prefix.clone()))?
        }

        let defaults = MarkerConfig::default();
        let marker = MarkerConfig {
            name: optional("MARKER_COOKIE_NAME").unwrap_or(defaults.name),
            path: path_var("MARKER_COOKIE_PATH", defaults.path)?,
            domain: optional("MARKER_COOKIE_DOMAIN"),
        };
        if !is_cookie_token(&marker.name) {
            Err(ConfigError::InvalidCookieName(marker.name.clone()))?
        }

        Ok(Config {
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            database_url: optional("DATABASE_URL"),
            jwt_key,
            admin_password_hash,
            routes,
            marker,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    dotenvy::var(name).map_err(|e| ConfigError::MissingVariable(name, e))
}

fn optional(name: &str) -> Option<String> {
    dotenvy::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn path_var(name: &'static str, default: String) -> Result<String, ConfigError> {
    match optional(name) {
        Some(path) if path.starts_with('/') => Ok(path),
        Some(path) => Err(ConfigError::InvalidPath(name, path)),
        None => Ok(default),
    }
}

fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVariable(&'static str, #[source] dotenvy::Error),
    #[error("JWT_KEY must be hex encoded")]
    InvalidJwtKey(#[from] hex::FromHexError),
    #[error("ADMIN_PASSWORD_HASH is not a valid PHC string: {0}")]
    InvalidPasswordHash(String),
    #[error("{0} must be an absolute path, got {1:?}")]
    InvalidPath(&'static str, String),
    #[error("MARKER_COOKIE_NAME {0:?} is not a valid cookie name")]
    InvalidCookieName(String),
}
