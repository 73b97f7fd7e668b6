//! BDD test world for the room monitor service

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use cucumber::World;
use room_monitor::feed::FeedSession;
use room_monitor::state::StateHandle;
use tokio::sync::mpsc;

#[derive(Debug, Default, World)]
pub struct RoomMonitorWorld {
    // Store and renderer
    pub state: Option<StateHandle>,
    pub rendered: Vec<String>,

    // Feed session
    pub session: Option<FeedSession>,
    pub feed_tx: Option<mpsc::UnboundedSender<String>>,
    pub feed_polls: Arc<AtomicUsize>,
    pub messages_sent: usize,

    // Dashboard
    pub response_status: Option<u16>,
    pub response_body: Option<String>,
}

impl RoomMonitorWorld {
    pub fn state(&self) -> &StateHandle {
        self.state.as_ref().expect("state not set")
    }
}
