//! Update feed connection management
//!
//! A [`FeedSession`] owns one streaming connection for as long as the
//! dashboard view is mounted. Each text frame is decoded into an
//! [`UpdateEvent`] and merged into the view's zone store. Unmounting cancels
//! the reader task and deregisters the session under the state lock, so no
//! frame that is still in flight can be applied afterwards.
//!
//! The transport sits behind the [`FeedConnector`] and [`FeedReader`] traits;
//! [`WsConnector`] is the WebSocket implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Result, RoomMonitorError};
use crate::state::{LinkStatus, SessionId, StateHandle};
use crate::zone::UpdateEvent;

/// Decode one inbound text frame
pub fn decode_message(text: &str) -> Result<UpdateEvent> {
    Ok(serde_json::from_str(text)?)
}

/// Receive side of an established feed connection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedReader: Send {
    /// Wait for the next text frame
    ///
    /// Returns `Ok(Some(text))` for a text frame, `Ok(None)` once the peer
    /// has closed the connection, or an error if the connection dropped.
    async fn next_text(&mut self) -> Result<Option<String>>;

    /// Close the connection
    async fn close(&mut self) -> Result<()>;
}

/// Opens feed connections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedConnector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Box<dyn FeedReader>>;
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket implementation of [`FeedReader`]
pub struct WsReader {
    stream: WsStream,
}

#[async_trait]
impl FeedReader for WsReader {
    async fn next_text(&mut self) -> Result<Option<String>> {
        loop {
            match self.stream.next().await {
                None | Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(other)) => {
                    debug!("Ignoring non-text frame ({} bytes)", other.len());
                }
                Some(Err(e)) => return Err(RoomMonitorError::Connection(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.stream
            .close(None)
            .await
            .map_err(|e| RoomMonitorError::Connection(format!("Closing feed: {}", e)))
    }
}

/// Production connector using tokio-tungstenite
#[derive(Debug, Default, Clone)]
pub struct WsConnector;

#[async_trait]
impl FeedConnector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn FeedReader>> {
        debug!("Connecting to feed {}", url);
        let (stream, response) = connect_async(url).await.map_err(|e| {
            RoomMonitorError::Connection(format!("Connecting to {} failed: {}", url, e))
        })?;
        debug!("Feed handshake with {} -> {}", url, response.status());
        Ok(Box::new(WsReader { stream }))
    }
}

/// One mounted feed connection, tied to the lifetime of the dashboard view
#[derive(Debug)]
pub struct FeedSession {
    id: SessionId,
    cancel: CancellationToken,
    state: StateHandle,
    handle: Option<JoinHandle<()>>,
}

impl FeedSession {
    /// Register a new session with the view and start connecting in the
    /// background
    pub async fn mount(
        connector: Arc<dyn FeedConnector>,
        url: impl Into<String>,
        state: StateHandle,
    ) -> Self {
        let url = url.into();
        let id = state.write().await.mount_session();
        info!("Mounting feed session {} for {}", id, url);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_session(
            connector,
            url,
            Arc::clone(&state),
            id,
            cancel.clone(),
        ));

        Self {
            id,
            cancel,
            state,
            handle: Some(handle),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// True once the reader task has exited (connection closed or failed)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Tear the session down and wait for the connection to be released
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        self.state.write().await.unmount_session(self.id);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Feed session {} task failed: {}", self.id, e);
            }
        }
        info!("Feed session {} unmounted", self.id);
    }
}

impl Drop for FeedSession {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Ok(mut view) = self.state.try_write() {
            view.unmount_session(self.id);
        }
    }
}

async fn run_session(
    connector: Arc<dyn FeedConnector>,
    url: String,
    state: StateHandle,
    id: SessionId,
    cancel: CancellationToken,
) {
    let connected = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Feed session {} cancelled before connecting", id);
            state.write().await.unmount_session(id);
            return;
        }
        result = connector.connect(&url) => result,
    };

    let mut reader = match connected {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Feed session {}: {}", id, e);
            state.write().await.set_link(id, LinkStatus::Disconnected);
            return;
        }
    };

    if state.write().await.set_link(id, LinkStatus::Connected) {
        info!("Feed session {} connected to {}", id, url);
    } else {
        debug!("Feed session {} connected after unmount", id);
    }

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Feed session {} cancelled", id);
                state.write().await.unmount_session(id);
                break;
            }
            next = reader.next_text() => next,
        };

        match next {
            Ok(Some(text)) => apply_message(&state, id, &cancel, &text).await,
            Ok(None) => {
                warn!("Feed session {} closed by remote", id);
                state.write().await.set_link(id, LinkStatus::Disconnected);
                break;
            }
            Err(e) => {
                warn!("Feed session {} lost: {}", id, e);
                state.write().await.set_link(id, LinkStatus::Disconnected);
                break;
            }
        }
    }

    if let Err(e) = reader.close().await {
        debug!("Feed session {} close: {}", id, e);
    }
}

async fn apply_message(state: &StateHandle, id: SessionId, cancel: &CancellationToken, text: &str) {
    let event = match decode_message(text) {
        Ok(event) => event,
        Err(e) => {
            debug!("Ignoring malformed feed message {:?}: {}", text, e);
            return;
        }
    };

    let mut view = state.write().await;
    if cancel.is_cancelled() || !view.apply_feed_update(id, event) {
        debug!(
            "Dropping update for zone {} from unmounted session {}",
            event.grid_index, id
        );
        return;
    }
    debug!(
        "Zone {} is now {}",
        event.grid_index,
        if event.is_active { "active" } else { "inactive" }
    );
}
