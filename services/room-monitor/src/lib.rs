//! Room Monitor - live zone status dashboard
//!
//! Mounts a WebSocket update feed, merges zone status events into an
//! in-memory store, and serves the rendered zone grid over HTTP.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod render;
pub mod state;
pub mod video;
pub mod zone;

pub use config::{load_config, Config};
pub use error::{Result, RoomMonitorError};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::feed::{FeedConnector, FeedSession, WsConnector};
use crate::state::StateHandle;
use crate::video::VideoFeed;
use crate::zone::ZoneState;

/// Assembles a [`RoomMonitor`] from configuration and optional overrides
pub struct RoomMonitorBuilder {
    config: Config,
    connector: Option<Arc<dyn FeedConnector>>,
    cancel: Option<CancellationToken>,
}

impl RoomMonitorBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            connector: None,
            cancel: None,
        }
    }

    /// Use a custom feed transport instead of WebSocket
    pub fn with_connector(mut self, connector: Arc<dyn FeedConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Stop the service when `cancel` fires instead of only on ctrl-c
    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Validate configuration and create the dashboard view state
    pub async fn build(self) -> Result<RoomMonitor> {
        self.config.validate()?;

        let zones = ZoneState::with_defaults(&self.config.zones.defaults);
        let video = VideoFeed::new(
            self.config.video.stream_url.clone(),
            self.config.video.width,
            self.config.video.height,
        );
        let state = state::new_state_handle(zones, video);

        Ok(RoomMonitor {
            connector: self
                .connector
                .unwrap_or_else(|| Arc::new(WsConnector) as Arc<dyn FeedConnector>),
            cancel: self.cancel.unwrap_or_default(),
            config: self.config,
            state,
        })
    }
}

/// A built room monitor, ready to start
pub struct RoomMonitor {
    config: Config,
    connector: Arc<dyn FeedConnector>,
    state: StateHandle,
    cancel: CancellationToken,
}

impl RoomMonitor {
    pub fn state(&self) -> StateHandle {
        Arc::clone(&self.state)
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run until cancelled: mount the feed, serve the dashboard, then unmount
    pub async fn start(self) -> Result<()> {
        let session = if self.config.feed.enabled {
            Some(
                FeedSession::mount(
                    Arc::clone(&self.connector),
                    self.config.feed.url.clone(),
                    Arc::clone(&self.state),
                )
                .await,
            )
        } else {
            tracing::info!("Feed disabled, showing default zone state only");
            None
        };

        let cancel_for_signal = self.cancel.clone();
        let signal = tokio::spawn(async move {
            tokio::select! {
                _ = cancel_for_signal.cancelled() => {}
                result = tokio::signal::ctrl_c() => match result {
                    Ok(()) => {
                        tracing::info!("Shutdown signal received");
                        cancel_for_signal.cancel();
                    }
                    Err(e) => tracing::warn!("Failed to listen for ctrl-c: {}", e),
                },
            }
        });

        let dashboard = if self.config.dashboard.enabled {
            let dashboard_port = self.config.dashboard.port;
            let router = dashboard::build_router(
                Arc::clone(&self.state),
                self.config.dashboard.refresh_interval_ms,
            );
            let cancel_for_dashboard = self.cancel.clone();

            Some(tokio::spawn(async move {
                if let Err(e) = serve_dashboard(dashboard_port, router, cancel_for_dashboard).await
                {
                    tracing::error!("{}. Continuing without dashboard.", e);
                }
                tracing::debug!("Dashboard stopped");
            }))
        } else {
            None
        };

        tracing::info!("Room monitor started");
        self.cancel.cancelled().await;

        if let Some(session) = session {
            session.unmount().await;
        }
        if let Some(dashboard) = dashboard {
            if let Err(e) = dashboard.await {
                tracing::warn!("Dashboard task failed: {}", e);
            }
        }

        if let Err(e) = signal.await {
            tracing::warn!("Signal listener failed: {}", e);
        }

        tracing::info!("Room monitor stopped");
        Ok(())
    }
}

/// Bind the dashboard port and serve `router` until `cancel` fires
pub async fn serve_dashboard(
    port: u16,
    router: axum::Router,
    cancel: CancellationToken,
) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        RoomMonitorError::Dashboard(format!("Failed to bind port {}: {}", port, e))
    })?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| RoomMonitorError::Dashboard(e.to_string()))
}
