//! View settings handlers

use crate::state::{AppState, ServerEvent, ServerSettings};
use axum::{extract::State, http::StatusCode, Json};

/// Get the persisted view settings
pub async fn get_settings(State(state): State<AppState>) -> Json<ServerSettings> {
    let settings = state.settings.read().await;
    Json(settings.clone())
}

/// Replace the view settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<ServerSettings>,
) -> Result<Json<ServerSettings>, (StatusCode, String)> {
    let mut current = state.settings.write().await;
    let previous = std::mem::replace(&mut *current, settings.clone());

    if let Err(e) = state.save_settings(&current).await {
        *current = previous;
        tracing::error!("Failed to save settings: {}", e);
        return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
    }
    drop(current);

    tracing::info!(
        ignore_filters = settings.ignore_filters,
        sort = ?settings.library_options.sort_by,
        "Updated view settings"
    );
    state.broadcast(ServerEvent::SettingsUpdated);

    Ok(Json(settings))
}
