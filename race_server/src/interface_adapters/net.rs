// WebSocket stream of race updates for the presentation layer.

use crate::interface_adapters::protocol::{RaceUpdateDto, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{RaceHandle, RaceUpdate};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::broadcast;
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
}

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let race = state.race.clone();
    let conn_id = NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed);
    ws.on_upgrade(move |socket| {
        handle_socket(socket, race).instrument(info_span!("conn", conn_id))
    })
}

async fn handle_socket(mut socket: WebSocket, race: RaceHandle) {
    info!("race viewer connected");

    // Subscribe before taking the snapshot so nothing falls in between.
    let mut updates = race.subscribe();
    if let Err(e) = send_update(&mut socket, &race.snapshot()).await {
        debug!(error = ?e, "failed to send initial snapshot");
        return;
    }

    if let Err(e) = forward_updates(&mut socket, &mut updates, &race).await {
        debug!(error = ?e, "viewer loop exited with error");
    }

    if let Err(e) = socket.close().await {
        debug!(error = %e, "socket close error");
    }
    info!("race viewer disconnected");
}

async fn forward_updates(
    socket: &mut WebSocket,
    updates: &mut broadcast::Receiver<RaceUpdate>,
    race: &RaceHandle,
) -> Result<(), NetError> {
    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                // Viewers only listen; anything but a close is ignored.
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(NetError::Ws(e)),
            },
            update = updates.recv() => match update {
                Ok(update) => send_update(socket, &update).await?,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Resync strategy: skip ahead to the latest snapshot.
                    warn!(missed, "race updates lagged; sending snapshot");
                    send_update(socket, &race.snapshot()).await?;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    warn!("race updates channel closed; disconnecting viewer");
                    return Ok(());
                }
            },
        }
    }
}

async fn send_update(socket: &mut WebSocket, update: &RaceUpdate) -> Result<(), NetError> {
    let msg = ServerMessage::RaceUpdate(RaceUpdateDto::from(update));
    let txt = serde_json::to_string(&msg).map_err(NetError::Serialization)?;
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)
}
