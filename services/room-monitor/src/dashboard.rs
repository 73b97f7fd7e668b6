//! Web dashboard serving the rendered zone grid and a JSON API

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;

use crate::render;
use crate::state::StateHandle;

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub state: StateHandle,
    pub refresh_interval_ms: u64,
}

/// Build the dashboard axum router
pub fn build_router(state: StateHandle, refresh_interval_ms: u64) -> Router {
    let dashboard_state = DashboardState {
        state,
        refresh_interval_ms,
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/grid", get(grid_handler))
        .route("/api/zones", get(zones_handler))
        .route("/api/status", get(status_handler))
        .route("/api/video/toggle", post(toggle_video_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let view = dashboard.state.read().await;
    Html(render::render_page(&view, dashboard.refresh_interval_ms))
}

async fn grid_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let snapshot = dashboard.state.read().await.zones.snapshot();
    Html(render::render_grid(&snapshot))
}

async fn zones_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let snapshot = dashboard.state.read().await.zones.snapshot();
    axum::Json(snapshot)
}

async fn status_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let view = dashboard.state.read().await;

    axum::Json(serde_json::json!({
        "link": view.link,
        "video_visible": view.video.is_visible(),
        "zones": view.zones.snapshot(),
    }))
}

async fn toggle_video_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let visible = dashboard.state.write().await.video.toggle();
    axum::Json(serde_json::json!({ "video_visible": visible }))
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
