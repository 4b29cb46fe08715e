use serde::{Deserialize, Serialize};

/// One alternate video feed for a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum StreamSource {
    /// Played directly by the native video element (HLS, DASH, progressive).
    Inline(String),
    /// Rendered inside an embedded frame.
    Embedded(String),
    /// Only opened in a new browser tab.
    External(String),
}

impl StreamSource {
    pub fn url(&self) -> &str {
        match self {
            StreamSource::Inline(url) | StreamSource::Embedded(url) | StreamSource::External(url) => {
                url
            }
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, StreamSource::External(_))
    }

    /// Build the ordered source list from the four named server slots.
    ///
    /// The first two slots play inline, the third is embedded and the fourth
    /// is external. Blank slots are skipped and URLs are trimmed.
    pub fn from_slots(
        primary: Option<&str>,
        secondary: Option<&str>,
        tertiary: Option<&str>,
        fourth: Option<&str>,
    ) -> Vec<StreamSource> {
        let slots: [(Option<&str>, fn(String) -> StreamSource); 4] = [
            (primary, StreamSource::Inline),
            (secondary, StreamSource::Inline),
            (tertiary, StreamSource::Embedded),
            (fourth, StreamSource::External),
        ];
        slots
            .into_iter()
            .filter_map(|(url, make)| {
                let url = url?.trim();
                (!url.is_empty()).then(|| make(url.to_owned()))
            })
            .collect()
    }
}
