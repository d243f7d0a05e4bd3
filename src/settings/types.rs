use super::errors::SettingsError;
use crate::redirect::timeout::TimeoutUnit;
use axum::http::Uri;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_TIMEOUT_VALUE: u32 = 60;

pub const KEY_REDIRECT_URL: &str = "redirect_url";
pub const KEY_TIMEOUT_VALUE: &str = "timeout_value";
pub const KEY_TIMEOUT_UNIT: &str = "timeout_unit";
pub const KEY_ONLY_HOMEPAGE: &str = "only_homepage";

/// Normalized settings snapshot handed to the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Empty when the feature is disabled.
    pub redirect_url: String,
    pub timeout_value: u32,
    pub timeout_unit: TimeoutUnit,
    pub only_homepage: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            redirect_url: String::new(),
            timeout_value: DEFAULT_TIMEOUT_VALUE,
            timeout_unit: TimeoutUnit::Minutes,
            only_homepage: false,
        }
    }
}

impl Settings {
    pub fn is_enabled(&self) -> bool {
        !self.redirect_url.is_empty()
    }
}

/// Settings exactly as persisted: every field is an optional string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    pub redirect_url: Option<String>,
    pub timeout_value: Option<String>,
    pub timeout_unit: Option<String>,
    pub only_homepage: Option<String>,
}

impl RawSettings {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = RawSettings::default();
        for (key, value) in pairs {
            raw.apply(key.as_ref(), value.into());
        }
        raw
    }

    /// Stores `value` under `key`. Unknown keys are ignored.
    pub fn apply(&mut self, key: &str, value: String) {
        match key {
            KEY_REDIRECT_URL => self.redirect_url = Some(value),
            KEY_TIMEOUT_VALUE => self.timeout_value = Some(value),
            KEY_TIMEOUT_UNIT => self.timeout_unit = Some(value),
            KEY_ONLY_HOMEPAGE => self.only_homepage = Some(value),
            _ => {}
        }
    }

    /// Substitutes defaults for anything missing or malformed.
    pub fn normalize(&self) -> Settings {
        Settings {
            redirect_url: self
                .redirect_url
                .as_deref()
                .map(normalize_url)
                .unwrap_or_default(),
            timeout_value: self
                .timeout_value
                .as_deref()
                .map(normalize_timeout)
                .unwrap_or(DEFAULT_TIMEOUT_VALUE),
            timeout_unit: self
                .timeout_unit
                .as_deref()
                .and_then(|unit| unit.parse().ok())
                .unwrap_or_default(),
            only_homepage: self.only_homepage.as_deref().is_some_and(parse_flag),
        }
    }
}

fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    if is_well_formed(url) {
        url.to_string()
    } else {
        warn!("Ignoring malformed redirect url {url:?}");
        String::new()
    }
}

fn normalize_timeout(value: &str) -> u32 {
    match value.trim().parse::<i64>() {
        Ok(v) if v > 0 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => DEFAULT_TIMEOUT_VALUE,
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// An absolute http(s) URL with a host, or a site-relative path.
pub fn is_well_formed(url: &str) -> bool {
    let Ok(uri) = url.parse::<Uri>() else {
        return false;
    };
    match uri.scheme_str() {
        Some("http") | Some("https") => uri.host().is_some_and(|h| !h.is_empty()),
        Some(_) => false,
        None => uri.authority().is_none() && url.starts_with('/'),
    }
}

/// Partial update sent by the administrative surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub timeout_value: Option<i64>,
    #[serde(default)]
    pub timeout_unit: Option<String>,
    #[serde(default)]
    pub only_homepage: Option<bool>,
}

impl SettingsUpdate {
    /// Validates the update and returns the key/value rows to persist.
    pub fn into_pairs(self) -> Result<Vec<(&'static str, String)>, SettingsError> {
        let mut pairs = Vec::with_capacity(4);

        if let Some(url) = self.redirect_url {
            let url = url.trim();
            if !url.is_empty() && !is_well_formed(url) {
                Err(SettingsError::InvalidRedirectUrl(url.to_string()))?
            }
            pairs.push((KEY_REDIRECT_URL, url.to_string()));
        }
        if let Some(value) = self.timeout_value {
            if value < 1 || value > i64::from(u32::MAX) {
                Err(SettingsError::InvalidTimeoutValue(value))?
            }
            pairs.push((KEY_TIMEOUT_VALUE, value.to_string()));
        }
        if let Some(unit) = self.timeout_unit {
            let unit = TimeoutUnit::parse_strict(unit.trim())
                .ok_or_else(|| SettingsError::InvalidTimeoutUnit(unit.clone()))?;
            pairs.push((KEY_TIMEOUT_UNIT, unit.to_string()));
        }
        if let Some(flag) = self.only_homepage {
            pairs.push((KEY_ONLY_HOMEPAGE, if flag { "1" } else { "0" }.to_string()));
        }

        Ok(pairs)
    }
}
