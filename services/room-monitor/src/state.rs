//! Shared state for one mounted dashboard view

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::video::VideoFeed;
use crate::zone::{UpdateEvent, ZoneState};

/// Identifier handed out to each mounted feed session
pub type SessionId = u64;

/// Health of the feed connection as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Connecting => write!(f, "Connecting"),
            LinkStatus::Connected => write!(f, "Connected"),
            LinkStatus::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// State owned by the dashboard view, read by the renderer and HTTP handlers
/// and written by the feed task
#[derive(Debug)]
pub struct DashboardView {
    pub zones: ZoneState,
    pub video: VideoFeed,
    pub link: LinkStatus,
    mounted_session: Option<SessionId>,
    next_session: SessionId,
}

impl DashboardView {
    pub fn new(zones: ZoneState, video: VideoFeed) -> Self {
        Self {
            zones,
            video,
            link: LinkStatus::Disconnected,
            mounted_session: None,
            next_session: 1,
        }
    }

    /// Register a new feed session, replacing any previously mounted one
    pub fn mount_session(&mut self) -> SessionId {
        let id = self.next_session;
        self.next_session += 1;
        if let Some(previous) = self.mounted_session.replace(id) {
            tracing::debug!("Feed session {} superseded by {}", previous, id);
        }
        self.link = LinkStatus::Connecting;
        id
    }

    /// Deregister a session. Returns false if it was not the mounted one.
    pub fn unmount_session(&mut self, id: SessionId) -> bool {
        if self.mounted_session != Some(id) {
            return false;
        }
        self.mounted_session = None;
        self.link = LinkStatus::Disconnected;
        true
    }

    pub fn is_mounted(&self, id: SessionId) -> bool {
        self.mounted_session == Some(id)
    }

    pub fn mounted_session(&self) -> Option<SessionId> {
        self.mounted_session
    }

    /// Merge an event received by session `id`. Events from a session that
    /// is no longer mounted are dropped and false is returned.
    pub fn apply_feed_update(&mut self, id: SessionId, event: UpdateEvent) -> bool {
        if !self.is_mounted(id) {
            return false;
        }
        self.zones.apply_update(event);
        true
    }

    /// Record a link status change reported by session `id`
    pub fn set_link(&mut self, id: SessionId, link: LinkStatus) -> bool {
        if !self.is_mounted(id) {
            return false;
        }
        self.link = link;
        true
    }
}

/// Thread-safe shared state handle
pub type StateHandle = Arc<RwLock<DashboardView>>;

pub fn new_state_handle(zones: ZoneState, video: VideoFeed) -> StateHandle {
    Arc::new(RwLock::new(DashboardView::new(zones, video)))
}
