//! Per-mount player options supplied by the embedding page.

/// Accessible label used when the page does not provide a title.
pub const DEFAULT_TITLE: &str = "Video player";

/// Options the page passes when it mounts a player.
///
/// The title is only used for the accessible label; the poster is shown by
/// the page until the first frame is available.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerOptions {
    pub poster: Option<String>,
    pub title: String,
    pub autoplay: bool,
    pub loop_playback: bool,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            poster: None,
            title: DEFAULT_TITLE.to_string(),
            autoplay: false,
            loop_playback: false,
        }
    }
}

impl PlayerOptions {
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn looping(mut self, loop_playback: bool) -> Self {
        self.loop_playback = loop_playback;
        self
    }

    /// Label announced by assistive technology. Blank titles fall back to
    /// the default label.
    pub fn accessible_label(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }
}
