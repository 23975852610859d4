//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Event name and JSON payload of a server event
pub fn event_payload(event: &ServerEvent) -> (&'static str, String) {
    match event {
        ServerEvent::MangaAdded { id, title } => (
            "manga_added",
            serde_json::json!({ "id": id, "title": title }).to_string(),
        ),
        ServerEvent::MangaRemoved { id } => {
            ("manga_removed", serde_json::json!({ "id": id }).to_string())
        }
        ServerEvent::ChaptersUpdated { id, count } => (
            "chapters_updated",
            serde_json::json!({ "id": id, "count": count }).to_string(),
        ),
        ServerEvent::SettingsUpdated => ("settings_updated", "{}".to_string()),
    }
}

/// SSE endpoint for real-time updates
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(event) => {
            let (event_type, data) = event_payload(&event);
            Some(Ok(Event::default().event(event_type).data(data)))
        }
        Err(_) => None, // Lagged, skip
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
