//! WebSocket upgrade handler for the notification push channel.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use reliefhub_core::error::AppError;

use crate::state::AppState;

/// Query parameter for WebSocket authentication (browsers cannot set an
/// Authorization header on the upgrade request).
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// JWT bearer token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, AppError> {
    // Authenticate before the upgrade, same checks as the HTTP resolver.
    let claims = state.jwt_decoder.decode(&query.token)?;
    let user = state
        .users
        .find_by_id(claims.user_id())
        .await?
        .ok_or_else(|| AppError::authentication("Not authorized, user not found"))?;
    if !user.is_active {
        return Err(AppError::account_disabled("Account is deactivated"));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(state, user.id, socket)))
}

/// Forward hub messages to the socket until either side closes.
async fn handle_socket(state: AppState, user_id: Uuid, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (conn_id, mut outbound) = state.hub.register(user_id);

    let forward = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            if ws_tx.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // The channel is push-only; inbound frames other than close are ignored.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    forward.abort();
    state.hub.unregister(user_id, conn_id);
}
