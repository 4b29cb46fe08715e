use serde::{Deserialize, Serialize};

use super::common::{logo_or_placeholder, UNKNOWN_NAME};

/// One side of a fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "logo")]
    pub logo_url: String,
}

impl Team {
    pub fn new(name: impl Into<String>, logo_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo_url: logo_url.into(),
        }
    }

    /// The team name, or `"Unknown"` when the record has none.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            UNKNOWN_NAME
        } else {
            name
        }
    }

    /// The first word of the name, as shown in the live ticker.
    pub fn short_name(&self) -> &str {
        self.display_name()
            .split_whitespace()
            .next()
            .unwrap_or(UNKNOWN_NAME)
    }

    pub fn logo_or_placeholder(&self) -> &str {
        logo_or_placeholder(&self.logo_url)
    }
}
