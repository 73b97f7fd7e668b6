//! BDD step definitions for the dashboard HTTP surface

use axum::body::Body;
use axum::http::{Method, Request};
use cucumber::{then, when};
use tower::ServiceExt;

use room_monitor::dashboard::build_router;

use crate::world::RoomMonitorWorld;

async fn request(world: &mut RoomMonitorWorld, method: Method, uri: &str) {
    let app = build_router(world.state().clone(), 1000);
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    world.response_status = Some(response.status().as_u16());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    world.response_body = Some(String::from_utf8(body.to_vec()).unwrap());
}

#[when(expr = "the dashboard page {string} is requested")]
async fn page_requested(world: &mut RoomMonitorWorld, uri: String) {
    request(world, Method::GET, &uri).await;
}

#[when(expr = "a POST is sent to {string}")]
async fn post_sent(world: &mut RoomMonitorWorld, uri: String) {
    request(world, Method::POST, &uri).await;
}

#[then(expr = "the response status should be {int}")]
fn response_status(world: &mut RoomMonitorWorld, status: u16) {
    assert_eq!(world.response_status, Some(status));
}

#[then(expr = "the response should contain {string}")]
fn response_contains(world: &mut RoomMonitorWorld, expected: String) {
    let body = world.response_body.as_ref().expect("no response body");
    assert!(
        body.contains(&expected),
        "Expected response to contain '{}', but it didn't.\nResponse body:\n{}",
        expected,
        body
    );
}

#[then(expr = "the response should not contain {string}")]
fn response_not_contains(world: &mut RoomMonitorWorld, unexpected: String) {
    let body = world.response_body.as_ref().expect("no response body");
    assert!(
        !body.contains(&unexpected),
        "Expected response not to contain '{}'.\nResponse body:\n{}",
        unexpected,
        body
    );
}
