//! Image URL construction.

use std::fmt;
use std::str::FromStr;

use super::error::ParseParamError;

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org";

/// Image size tokens used by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSize {
    /// 500px wide (card posters).
    W500,
    /// 780px wide (card backdrops).
    W780,
    /// Source resolution (hero backdrop).
    #[default]
    Original,
}

impl ImageSize {
    /// Size token as it appears in the URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w500" => Ok(Self::W500),
            "w780" => Ok(Self::W780),
            "original" => Ok(Self::Original),
            _ => Err(ParseParamError {
                kind: "image size",
                value: String::from(s),
                expected: "w500, w780, original",
            }),
        }
    }
}

/// Builds an absolute image URL from a path fragment and size token.
///
/// Returns an empty string when `path` is absent or empty. The path is
/// appended verbatim (it already starts with `/`).
#[must_use]
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE_URL}/t/p/{}{p}", size.as_str()),
        _ => String::new(),
    }
}
