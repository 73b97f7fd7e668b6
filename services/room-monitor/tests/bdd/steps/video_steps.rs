//! BDD step definitions for the video feed toggle

use cucumber::{then, when};

use crate::world::RoomMonitorWorld;

#[when("the video feed is toggled")]
async fn video_feed_toggled(world: &mut RoomMonitorWorld) {
    world.state().write().await.video.toggle();
}

#[then("the video feed should be visible")]
async fn video_feed_visible(world: &mut RoomMonitorWorld) {
    assert!(world.state().read().await.video.is_visible());
}

#[then("the video feed should be hidden")]
async fn video_feed_hidden(world: &mut RoomMonitorWorld) {
    assert!(!world.state().read().await.video.is_visible());
}
