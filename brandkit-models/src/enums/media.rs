use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error, Formatter},
    str::FromStr,
};

/// Upload category. Each kind maps to its own storage directory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[serde(alias = "logo")]
    Logos,
    #[serde(alias = "banner", alias = "banners")]
    Media,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Logos, MediaKind::Media];

    /// Directory and URL segment for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Logos => "logos",
            MediaKind::Media => "media",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logos" | "logo" => Ok(MediaKind::Logos),
            "media" | "banner" | "banners" => Ok(MediaKind::Media),
            other => Err(format!("unknown upload type `{other}`")),
        }
    }
}
