use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, InvalidHeaderValue},
};
use thiserror::Error;
use time::{
    Duration, OffsetDateTime,
    format_description::BorrowedFormatItem,
    macros::{datetime, format_description},
};

/// Value stored in the marker. Only its presence is ever checked.
pub const MARKER_VALUE: &str = "1";

const COOKIE_DATE: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Name and scope of the client-held marker cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerConfig {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            name: "redirected".to_string(),
            path: "/".to_string(),
            domain: None,
        }
    }
}

impl MarkerConfig {
    /// Reads the marker from the request cookies.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        read_cookie(headers, &self.name).map(str::to_owned)
    }

    /// Builds the `Set-Cookie` value that plants the marker until
    /// `now + expiry_seconds`.
    pub fn issue(
        &self,
        expiry_seconds: u64,
        now: OffsetDateTime,
    ) -> Result<HeaderValue, MarkerError> {
        let max_age = i64::try_from(expiry_seconds).unwrap_or(i64::MAX);
        let expires = now
            .checked_add(Duration::seconds(max_age))
            .unwrap_or(datetime!(9999-12-31 23:59:59 UTC));
        let expires = expires.format(COOKIE_DATE)?;

        let mut cookie = format!(
            "{}={MARKER_VALUE}; Expires={expires}; Max-Age={max_age}; Path={}",
            self.name, self.path
        );
        if let Some(domain) = &self.domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        Ok(HeaderValue::from_str(&cookie)?)
    }
}

/// Finds the first cookie called `name` across all `Cookie` headers.
///
/// A bare `name` with no `=` counts as present with an empty value.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .map(str::trim)
        .find_map(|pair| match pair.split_once('=') {
            Some((key, value)) if key.trim() == name => Some(value.trim()),
            None if pair == name => Some(""),
            _ => None,
        })
}

#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("Failed to format marker expiry")]
    Format(#[from] time::error::Format),
    #[error(transparent)]
    InvalidHeader(#[from] InvalidHeaderValue),
}
