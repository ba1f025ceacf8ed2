//! Quality-variant sources.
//!
//! A [`Source`] is one concrete encoded rendition of a logical video. Sources
//! are immutable once built; the controller only ever picks between them by
//! [`QualityLabel`].

use std::borrow::Borrow;
use std::fmt::{self, Display};

/// Human-facing quality label, e.g. `"1080p"` or `"auto"`.
///
/// Labels are compared verbatim; `"720p"` and `"720P"` are different.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QualityLabel(String);

impl QualityLabel {
    /// Build a label from anything string-like.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for QualityLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QualityLabel {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for QualityLabel {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for QualityLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QualityLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Container/MIME type of a source as declared by the page.
///
/// Unknown MIME types are kept verbatim so the backend can still decide
/// whether it is able to play them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", from = "String"))]
pub enum MediaFormat {
    Mp4,
    WebM,
    Ogg,
    Hls,
    Dash,
    Other(String),
}

impl MediaFormat {
    /// Parse a MIME type such as `video/mp4`. Parameters after `;` (codecs)
    /// are ignored for classification but preserved for `Other`.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "video/mp4" => MediaFormat::Mp4,
            "video/webm" => MediaFormat::WebM,
            "video/ogg" => MediaFormat::Ogg,
            "application/vnd.apple.mpegurl"
            | "application/x-mpegurl"
            | "audio/mpegurl" => MediaFormat::Hls,
            "application/dash+xml" => MediaFormat::Dash,
            _ => MediaFormat::Other(mime.trim().to_string()),
        }
    }

    /// Canonical MIME type for this format.
    pub fn mime(&self) -> &str {
        match self {
            MediaFormat::Mp4 => "video/mp4",
            MediaFormat::WebM => "video/webm",
            MediaFormat::Ogg => "video/ogg",
            MediaFormat::Hls => "application/vnd.apple.mpegurl",
            MediaFormat::Dash => "application/dash+xml",
            MediaFormat::Other(mime) => mime,
        }
    }

    /// Best-effort guess from a URL's file extension. Query strings and
    /// fragments are stripped first; defaults to MP4.
    pub fn guess_from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "webm" => MediaFormat::WebM,
            "ogv" | "ogg" => MediaFormat::Ogg,
            "m3u8" => MediaFormat::Hls,
            "mpd" => MediaFormat::Dash,
            _ => MediaFormat::Mp4,
        }
    }
}

impl Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl From<String> for MediaFormat {
    fn from(value: String) -> Self {
        MediaFormat::from_mime(&value)
    }
}

impl From<MediaFormat> for String {
    fn from(value: MediaFormat) -> Self {
        value.mime().to_string()
    }
}

/// One quality variant of the video.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    url: String,
    format: MediaFormat,
    quality: QualityLabel,
}

impl Source {
    pub fn new(
        url: impl Into<String>,
        format: MediaFormat,
        quality: impl Into<QualityLabel>,
    ) -> Self {
        Self {
            url: url.into(),
            format,
            quality: quality.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn format(&self) -> &MediaFormat {
        &self.format
    }

    pub fn quality(&self) -> &QualityLabel {
        &self.quality
    }
}
