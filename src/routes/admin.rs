use super::types::{SettingsView, SharedState};
use crate::settings::{SettingsUpdate, errors::SettingsError};
use axum::{Json, extract::State, response::IntoResponse};
use tracing::info;

#[tracing::instrument(skip_all)]
pub async fn get_settings(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, SettingsError> {
    let settings = state.store.get().await?;
    Ok(Json(SettingsView::from(settings)))
}

#[tracing::instrument(skip(state))]
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<impl IntoResponse, SettingsError> {
    let settings = state.store.set(update).await?;
    info!(
        redirect_url = %settings.redirect_url,
        timeout_value = settings.timeout_value,
        timeout_unit = %settings.timeout_unit,
        only_homepage = settings.only_homepage,
        "Redirect settings updated"
    );
    Ok(Json(SettingsView::from(settings)))
}
