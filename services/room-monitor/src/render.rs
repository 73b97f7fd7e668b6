//! HTML rendering of the zone grid and dashboard page
//!
//! Every function here is a pure function of its arguments: the same
//! snapshot always produces the same markup.

use crate::state::{DashboardView, LinkStatus};
use crate::video::VideoFeed;
use crate::zone::{ZoneIndex, ZoneStatus};

/// The two visual variants of a zone's status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Active,
    Inactive,
}

impl Indicator {
    pub fn from_active(is_active: bool) -> Self {
        if is_active {
            Indicator::Active
        } else {
            Indicator::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Active => "active",
            Indicator::Inactive => "inactive",
        }
    }

    fn colors(&self) -> (&'static str, &'static str) {
        match self {
            Indicator::Active => ("rgb(247, 197, 33)", "rgba(255, 255, 255, 0.4)"),
            Indicator::Inactive => ("rgba(255, 255, 255, 0.5)", "rgba(255, 255, 255, 0.05)"),
        }
    }
}

/// Everything shown on one zone card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCard {
    pub index: ZoneIndex,
    pub label: String,
    pub device_id: String,
    pub indicator: Indicator,
}

impl ZoneCard {
    pub fn from_status(status: &ZoneStatus) -> Self {
        Self {
            index: status.index,
            label: zone_label(status.index),
            device_id: device_label(status.index),
            indicator: Indicator::from_active(status.is_active),
        }
    }
}

/// 1-based display label, e.g. index 0 -> "Zone 1"
pub fn zone_label(index: ZoneIndex) -> String {
    format!("Zone {}", u64::from(index) + 1)
}

/// Physical device name, e.g. index 0 -> "ESP8266-1"
pub fn device_label(index: ZoneIndex) -> String {
    format!("ESP8266-{}", u64::from(index) + 1)
}

pub fn cards(snapshot: &[ZoneStatus]) -> Vec<ZoneCard> {
    snapshot.iter().map(ZoneCard::from_status).collect()
}

fn render_card(card: &ZoneCard) -> String {
    let (icon_color, bg) = card.indicator.colors();
    format!(
        r#"<div class="zone-card zone-{variant}" data-zone="{index}" style="padding: 1.5rem 1.75rem; border-radius: 1.5rem; background-color: {bg};">
    <span class="indicator indicator-{variant}" style="font-size: 3rem; color: {icon_color};">&#x1F4A1;</span>
    <h3 style="margin: 1.5rem 0 0; font-size: 1.25rem; font-weight: 600;">{label}</h3>
    <p style="margin: 0; font-size: 0.75rem; opacity: 0.4;">{device_id}</p>
</div>"#,
        variant = card.indicator.as_str(),
        index = card.index,
        bg = bg,
        icon_color = icon_color,
        label = card.label,
        device_id = card.device_id,
    )
}

/// Render the grid fragment: one card per zone, in snapshot order
pub fn render_grid(snapshot: &[ZoneStatus]) -> String {
    let body: String = cards(snapshot).iter().map(render_card).collect();
    format!(
        r#"<div id="zone-grid" style="display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1rem; padding: 1rem;">{body}</div>"#
    )
}

/// Render the video panel. The image is only emitted while visible.
pub fn render_video_panel(video: &VideoFeed) -> String {
    let image = if video.is_visible() {
        let (width, height) = video.dimensions();
        format!(
            r#"<img src="{}" alt="Live video feed" width="{}" height="{}" style="width: 100%; border-radius: 0.75rem; margin: 0.5rem 0;">"#,
            escape_html(video.stream_url()),
            width,
            height
        )
    } else {
        String::new()
    };
    format!(
        r#"<section id="video-panel" style="margin-top: 1.5rem; padding: 1rem 1.5rem; border-radius: 1.5rem; background-color: rgba(249, 250, 251, 0.1);">
    <h2 onclick="toggleVideoFeed()" style="cursor: pointer; font-size: 1.125rem; font-weight: 600;">Live Video Feed</h2>
    {image}
</section>"#
    )
}

pub fn render_link_banner(link: LinkStatus) -> String {
    let (color, bg) = match link {
        LinkStatus::Connected => ("#155724", "#d4edda"),
        LinkStatus::Connecting => ("#383d41", "#e2e3e5"),
        LinkStatus::Disconnected => ("#721c24", "#f8d7da"),
    };
    format!(
        r#"<p id="link-status" class="link-{}"><span style="display: inline-block; padding: 0.25em 0.6em; border-radius: 0.25rem; font-size: 0.85em; font-weight: 600; color: {}; background-color: {};">Feed: {}</span></p>"#,
        link.to_string().to_lowercase(),
        color,
        bg,
        link
    )
}

/// Render the complete dashboard document
pub fn render_page(view: &DashboardView, refresh_interval_ms: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Room Monitor</title>
    <script>
        function refreshGrid() {{
            fetch('/grid')
                .then(r => r.text())
                .then(html => {{
                    document.getElementById('zone-grid').outerHTML = html;
                }});
        }}
        function toggleVideoFeed() {{
            fetch('/api/video/toggle', {{ method: 'POST' }})
                .then(() => window.location.reload());
        }}
        setInterval(refreshGrid, {refresh_interval_ms});
    </script>
</head>
<body style="font-family: system-ui, sans-serif; color: white; min-height: 100vh; margin: 0; background: linear-gradient(135deg, #0e1c26, #2a454b, #294861);">
    <main style="max-width: 56rem; margin: 0 auto; padding: 5rem 1.5rem;">
        <h1 style="font-size: 1.875rem; font-weight: 600;">Room Monitor</h1>
        {banner}
        {grid}
        {video}
    </main>
</body>
</html>"#,
        refresh_interval_ms = refresh_interval_ms,
        banner = render_link_banner(view.link),
        grid = render_grid(&view.zones.snapshot()),
        video = render_video_panel(&view.video),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
