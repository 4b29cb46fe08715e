use serde::{Deserialize, Serialize};

/// Image shown when a team or competition logo is missing.
pub const PLACEHOLDER_LOGO_URL: &str = "https://via.placeholder.com/40?text=?";

/// Label shown when a team name is missing.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Colour scheme the app is rendered in.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Return `url` trimmed, or the placeholder logo when it is blank.
pub(crate) fn logo_or_placeholder(url: &str) -> &str {
    let url = url.trim();
    if url.is_empty() {
        PLACEHOLDER_LOGO_URL
    } else {
        url
    }
}
