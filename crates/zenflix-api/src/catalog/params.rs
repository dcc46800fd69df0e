//! Typed query parameters for catalog endpoints.

use std::fmt;
use std::str::FromStr;

use super::error::ParseParamError;

/// Media type accepted by the `trending` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// Movies and TV shows (and people) mixed.
    #[default]
    All,
    /// Movies only.
    Movie,
    /// TV shows only.
    Tv,
}

impl MediaType {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            _ => Err(ParseParamError {
                kind: "media type",
                value: String::from(s),
                expected: "all, movie, tv",
            }),
        }
    }
}

/// A concrete media kind, used by endpoints keyed on movie or TV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    /// Movie.
    #[default]
    Movie,
    /// TV show.
    Tv,
}

impl MediaKind {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => Self::Movie,
            MediaKind::Tv => Self::Tv,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            _ => Err(ParseParamError {
                kind: "media kind",
                value: String::from(s),
                expected: "movie, tv",
            }),
        }
    }
}

/// Time window for the `trending` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    #[default]
    Week,
}

impl TimeWindow {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            _ => Err(ParseParamError {
                kind: "time window",
                value: String::from(s),
                expected: "day, week",
            }),
        }
    }
}

/// TMDB movie genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    /// Action (28).
    Action,
    /// Adventure (12).
    Adventure,
    /// Animation (16).
    Animation,
    /// Comedy (35).
    Comedy,
    /// Crime (80).
    Crime,
    /// Documentary (99).
    Documentary,
    /// Drama (18).
    Drama,
    /// Family (10751).
    Family,
    /// Fantasy (14).
    Fantasy,
    /// History (36).
    History,
    /// Horror (27).
    Horror,
    /// Music (10402).
    Music,
    /// Mystery (9648).
    Mystery,
    /// Romance (10749).
    Romance,
    /// Science Fiction (878).
    ScienceFiction,
    /// TV Movie (10770).
    TvMovie,
    /// Thriller (53).
    Thriller,
    /// War (10752).
    War,
    /// Western (37).
    Western,
}

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Self; 19] = [
        Self::Action,
        Self::Adventure,
        Self::Animation,
        Self::Comedy,
        Self::Crime,
        Self::Documentary,
        Self::Drama,
        Self::Family,
        Self::Fantasy,
        Self::History,
        Self::Horror,
        Self::Music,
        Self::Mystery,
        Self::Romance,
        Self::ScienceFiction,
        Self::TvMovie,
        Self::Thriller,
        Self::War,
        Self::Western,
    ];

    /// TMDB genre ID (`with_genres` value).
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Action => 28,
            Self::Adventure => 12,
            Self::Animation => 16,
            Self::Comedy => 35,
            Self::Crime => 80,
            Self::Documentary => 99,
            Self::Drama => 18,
            Self::Family => 10751,
            Self::Fantasy => 14,
            Self::History => 36,
            Self::Horror => 27,
            Self::Music => 10402,
            Self::Mystery => 9648,
            Self::Romance => 10749,
            Self::ScienceFiction => 878,
            Self::TvMovie => 10770,
            Self::Thriller => 53,
            Self::War => 10752,
            Self::Western => 37,
        }
    }

    /// Kebab-case name accepted by `FromStr`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Adventure => "adventure",
            Self::Animation => "animation",
            Self::Comedy => "comedy",
            Self::Crime => "crime",
            Self::Documentary => "documentary",
            Self::Drama => "drama",
            Self::Family => "family",
            Self::Fantasy => "fantasy",
            Self::History => "history",
            Self::Horror => "horror",
            Self::Music => "music",
            Self::Mystery => "mystery",
            Self::Romance => "romance",
            Self::ScienceFiction => "science-fiction",
            Self::TvMovie => "tv-movie",
            Self::Thriller => "thriller",
            Self::War => "war",
            Self::Western => "western",
        }
    }

    /// Looks up a genre by its TMDB ID.
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.id() == id)
    }
}

impl FromStr for Genre {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL
            .into_iter()
            .find(|g| g.slug() == normalized)
            .ok_or_else(|| ParseParamError {
                kind: "genre",
                value: String::from(s),
                expected: "action, adventure, animation, comedy, crime, documentary, drama, \
                           family, fantasy, history, horror, music, mystery, romance, \
                           science-fiction, tv-movie, thriller, war, western",
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_media_kind_into_media_type() {
        // Arrange & Act & Assert
        assert_eq!(MediaType::from(MediaKind::Movie), MediaType::Movie);
        assert_eq!(MediaType::from(MediaKind::Tv), MediaType::Tv);
    }

    #[test]
    fn test_parse_media_type_case_insensitive() {
        // Arrange & Act
        let parsed: MediaType = "ALL".parse().unwrap();

        // Assert
        assert_eq!(parsed, MediaType::All);
    }

    #[test]
    fn test_parse_media_kind_rejects_all() {
        // Arrange & Act
        let result = "all".parse::<MediaKind>();

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_match_trending_defaults() {
        // Arrange & Act & Assert
        assert_eq!(MediaType::default(), MediaType::All);
        assert_eq!(TimeWindow::default(), TimeWindow::Week);
        assert_eq!(MediaKind::default(), MediaKind::Movie);
    }

    #[test]
    fn test_genre_ids() {
        // Arrange & Act & Assert
        assert_eq!(Genre::Action.id(), 28);
        assert_eq!(Genre::Comedy.id(), 35);
        assert_eq!(Genre::Horror.id(), 27);
        assert_eq!(Genre::Romance.id(), 10749);
        assert_eq!(Genre::Documentary.id(), 99);
        assert_eq!(Genre::ScienceFiction.id(), 878);
    }

    #[test]
    fn test_genre_from_str_accepts_spaces() {
        // Arrange & Act
        let genre: Genre = "Science Fiction".parse().unwrap();

        // Assert
        assert_eq!(genre, Genre::ScienceFiction);
    }

    #[test]
    fn test_genre_from_id_roundtrips_every_variant() {
        // Arrange & Act & Assert
        for genre in Genre::ALL {
            assert_eq!(Genre::from_id(genre.id()), Some(genre));
        }
        assert_eq!(Genre::from_id(1), None);
    }
}
