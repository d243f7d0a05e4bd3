use crate::{
    config::{Config, RouteConfig},
    redirect::marker::MarkerConfig,
    settings::{Settings, SettingsStore},
};
use jwt_simple::algorithms::HS256Key;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the cookie carrying the administrator session token.
pub const JWT_COOKIE: &str = "jwt";

pub const MISSING_URL_WARNING: &str =
    "No redirect destination is configured. Set redirect_url to enable redirects.";

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: SettingsStore,
    pub jwt_key: HS256Key,
    pub admin_password_hash: String,
    pub routes: RouteConfig,
    pub marker: MarkerConfig,
}

impl AppState {
    pub fn new(config: Config, store: SettingsStore) -> SharedState {
        Arc::new(AppState {
            store,
            jwt_key: config.jwt_key,
            admin_password_hash: config.admin_password_hash,
            routes: config.routes,
            marker: config.marker,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub password: String,
}

/// Settings as shown to administrators, with the missing-url notice.
#[derive(Serialize, Debug)]
pub struct SettingsView {
    pub settings: Settings,
    pub warning: Option<&'static str>,
}

impl From<Settings> for SettingsView {
    fn from(settings: Settings) -> Self {
        let warning = (!settings.is_enabled()).then_some(MISSING_URL_WARNING);
        Self { settings, warning }
    }
}
