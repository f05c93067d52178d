//! Server-Sent Events (SSE) stream of notifications.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use playhook_app::executors::Dispatch;
use playhook_app::ports::{Notifier, ProcessControl};

use crate::state::AppState;

/// `GET /api/notifications/stream`: SSE stream of notifications.
///
/// Each notification is sent as a JSON `data:` frame whose SSE event name is
/// the notification kind (`info` or `error`). The stream continues until the
/// client disconnects or the bus is closed.
pub async fn stream<P, E, N>(
    State(state): State<AppState<P, E, N>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let receiver = state.notifications.subscribe();
    let notifications = BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(notification) => match serde_json::to_string(&notification) {
            Ok(json) => Some(Ok(Event::default()
                .event(notification.kind.to_string())
                .data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize notification for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE subscriber lagged, some notifications were dropped");
            None
        }
    });

    Sse::new(notifications).keep_alive(KeepAlive::default())
}
