//! Live video feed visibility toggle

/// Visibility of the embedded camera stream. Independent of zone state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFeed {
    visible: bool,
    stream_url: String,
    width: u32,
    height: u32,
}

impl VideoFeed {
    /// Create a hidden feed pointing at `stream_url`
    pub fn new(stream_url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            visible: false,
            stream_url: stream_url.into(),
            width,
            height,
        }
    }

    /// Flip visibility, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        tracing::debug!("Video feed visibility set to {}", self.visible);
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
