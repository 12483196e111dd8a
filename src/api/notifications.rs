//! Server-sent notification stream for the admin dashboard

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::AppState;

use super::AdminKey;

/// Live stream of submission notifications.
///
/// Each event is one JSON `NotificationEvent`. Receivers that lag far
/// enough behind to drop events simply miss them; the next poll delta
/// catches the dashboard up.
#[utoipa::path(
    get,
    path = "/admin/notifications/stream",
    tag = "admin",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "SSE stream of notification events", content_type = "text/event-stream"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn notifications_stream(
    State(state): State<AppState>,
    _: AdminKey,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let receiver = state.services.notifications.subscribe();
    let stream = BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(event) => Some(Event::default().event("notification").json_data(&event)),
        // Lagged receiver: drop the missed events and keep streaming
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
