//! BDD step definitions for the zone store and grid renderer

use cucumber::{given, then, when};

use room_monitor::feed::decode_message;
use room_monitor::render::{cards, render_grid, Indicator};
use room_monitor::state::new_state_handle;
use room_monitor::video::VideoFeed;
use room_monitor::zone::ZoneState;

use crate::world::RoomMonitorWorld;

fn parse_indicator(s: &str) -> Indicator {
    match s {
        "active" => Indicator::Active,
        "inactive" => Indicator::Inactive,
        other => panic!("Unknown indicator: {}", other),
    }
}

fn parse_flags(s: &str) -> Vec<bool> {
    s.split(',')
        .map(|flag| match flag.trim() {
            "true" => true,
            "false" => false,
            other => panic!("Unknown flag: {}", other),
        })
        .collect()
}

#[given("the default zone state")]
fn default_zone_state(world: &mut RoomMonitorWorld) {
    world.state = Some(new_state_handle(
        ZoneState::default(),
        VideoFeed::new("http://camera.local:4747/video", 425, 319),
    ));
}

#[given(expr = "a zone state with defaults {string}")]
fn zone_state_with_defaults(world: &mut RoomMonitorWorld, defaults: String) {
    world.state = Some(new_state_handle(
        ZoneState::with_defaults(&parse_flags(&defaults)),
        VideoFeed::new("http://camera.local:4747/video", 425, 319),
    ));
}

#[when(expr = "the update {string} is applied")]
async fn update_is_applied(world: &mut RoomMonitorWorld, message: String) {
    if let Ok(event) = decode_message(&message) {
        world.state().write().await.zones.apply_update(event);
    }
}

#[when("the grid is rendered")]
async fn grid_is_rendered(world: &mut RoomMonitorWorld) {
    let snapshot = world.state().read().await.zones.snapshot();
    world.rendered.push(render_grid(&snapshot));
}

#[then(expr = "the snapshot should be {string}")]
async fn snapshot_should_be(world: &mut RoomMonitorWorld, expected: String) {
    let snapshot = world.state().read().await.zones.snapshot();
    let actual = snapshot
        .iter()
        .map(|z| format!("{}:{}", z.index, z.is_active))
        .collect::<Vec<_>>()
        .join(",");
    assert_eq!(actual, expected);
}

#[then(expr = "the grid should have {int} cards")]
async fn grid_should_have_cards(world: &mut RoomMonitorWorld, count: usize) {
    let snapshot = world.state().read().await.zones.snapshot();
    assert_eq!(cards(&snapshot).len(), count);
}

#[then(expr = "card {int} should read {string} on device {string} with the {word} indicator")]
async fn card_should_read(
    world: &mut RoomMonitorWorld,
    position: usize,
    label: String,
    device_id: String,
    indicator: String,
) {
    let snapshot = world.state().read().await.zones.snapshot();
    let cards = cards(&snapshot);
    let card = cards
        .get(position - 1)
        .unwrap_or_else(|| panic!("no card at position {}", position));
    assert_eq!(card.label, label);
    assert_eq!(card.device_id, device_id);
    assert_eq!(card.indicator, parse_indicator(&indicator));
}

#[then("every rendering should be identical")]
fn renderings_identical(world: &mut RoomMonitorWorld) {
    assert!(world.rendered.len() >= 2, "render the grid at least twice");
    assert!(world.rendered.windows(2).all(|w| w[0] == w[1]));
}
