use serde::Serialize;
use tracing::debug;

use crate::model::StreamSource;

/// Container/protocol of a stream, guessed from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Hls,
    Dash,
    Mp4,
    WebM,
    Unknown,
}

impl MediaKind {
    pub fn detect(url: &str) -> Self {
        let url = url.to_ascii_lowercase();
        if url.contains(".m3u8") {
            MediaKind::Hls
        } else if url.contains(".mpd") {
            MediaKind::Dash
        } else if url.contains(".mp4") {
            MediaKind::Mp4
        } else if url.contains(".webm") {
            MediaKind::WebM
        } else {
            MediaKind::Unknown
        }
    }

    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            MediaKind::Hls => Some("application/x-mpegURL"),
            MediaKind::Dash => Some("application/dash+xml"),
            MediaKind::Mp4 => Some("video/mp4"),
            MediaKind::WebM => Some("video/webm"),
            MediaKind::Unknown => None,
        }
    }
}

/// How the popup should present a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Playback {
    /// Hand the URL to the native video element.
    Native { url: String, kind: MediaKind },
    /// Load the URL into an embedded frame.
    Embed(String),
    /// Offer an "open in new tab" link instead of playing.
    OpenInNewTab(String),
}

impl StreamSource {
    pub fn media_kind(&self) -> MediaKind {
        MediaKind::detect(self.url())
    }

    /// Inline sources of an unknown kind fall back to an external link
    /// rather than failing silently.
    pub fn playback(&self) -> Playback {
        match self {
            StreamSource::Inline(url) => match self.media_kind() {
                MediaKind::Unknown => Playback::OpenInNewTab(url.clone()),
                kind => Playback::Native {
                    url: url.clone(),
                    kind,
                },
            },
            StreamSource::Embedded(url) => Playback::Embed(url.clone()),
            StreamSource::External(url) => Playback::OpenInNewTab(url.clone()),
        }
    }
}

/// Result of the user picking a server in the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The source is already active.
    Unchanged,
    /// Playback switched; `reload_key` changes on every switch so the
    /// player is rebuilt.
    Switched { playback: Playback, reload_key: u64 },
    /// External sources open elsewhere and leave the active source as is.
    OpenExternally(String),
    OutOfRange,
}

/// Active-source state of the stream popup.
#[derive(Debug, Clone)]
pub struct StreamSelector {
    sources: Vec<StreamSource>,
    active: usize,
    reload_key: u64,
}

impl StreamSelector {
    /// Returns `None` when the match has no usable source, in which case the
    /// popup closes itself.
    pub fn new(sources: Vec<StreamSource>) -> Option<Self> {
        let active = sources
            .iter()
            .position(|s| !s.is_external())
            .or_else(|| (!sources.is_empty()).then_some(0))?;
        debug!(count = sources.len(), active, "opening stream popup");
        Some(Self {
            sources,
            active,
            reload_key: 0,
        })
    }

    pub fn sources(&self) -> &[StreamSource] {
        &self.sources
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &StreamSource {
        &self.sources[self.active]
    }

    pub fn reload_key(&self) -> u64 {
        self.reload_key
    }

    pub fn playback(&self) -> Playback {
        self.active().playback()
    }

    pub fn select(&mut self, index: usize) -> SelectOutcome {
        let Some(source) = self.sources.get(index) else {
            return SelectOutcome::OutOfRange;
        };
        if index == self.active {
            return SelectOutcome::Unchanged;
        }
        if let StreamSource::External(url) = source {
            return SelectOutcome::OpenExternally(url.clone());
        }

        self.active = index;
        self.reload_key += 1;
        debug!(index, reload_key = self.reload_key, "switched stream source");
        SelectOutcome::Switched {
            playback: source.playback(),
            reload_key: self.reload_key,
        }
    }
}
