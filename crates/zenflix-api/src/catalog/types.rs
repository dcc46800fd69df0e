//! Catalog API response types.

use serde::Deserialize;

// --- List endpoints ---

/// A paged list response (`trending`, `top_rated`, `popular`, `upcoming`,
/// `discover`, `search`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogPage {
    /// Current page number.
    pub page: u32,
    /// Result list. Absent or `null` when the body has an unexpected shape.
    pub results: Option<Vec<CatalogItem>>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl CatalogPage {
    /// Builds a single page from a result list.
    #[must_use]
    pub fn from_results(results: Vec<CatalogItem>) -> Self {
        let total = u32::try_from(results.len()).unwrap_or(u32::MAX);
        Self {
            page: 1,
            results: Some(results),
            total_pages: 1,
            total_results: total,
        }
    }

    /// Consumes the page and returns its results, empty when absent.
    #[must_use]
    pub fn into_results(self) -> Vec<CatalogItem> {
        self.results.unwrap_or_default()
    }

    /// Number of results on this page (0 when absent).
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    /// Whether the page carries no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single movie or TV record from a list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    /// TMDB ID.
    pub id: u64,
    /// Movie title.
    pub title: Option<String>,
    /// TV show name.
    pub name: Option<String>,
    /// Original TV show name.
    pub original_name: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Movie release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// TV first air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Adult flag.
    pub adult: bool,
    /// Media type (`movie`, `tv`, `person`); present on mixed endpoints.
    pub media_type: Option<String>,
    /// Genre IDs.
    pub genre_ids: Vec<u32>,
}

impl CatalogItem {
    /// Display title: `title`, then `name`, then `original_name`.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        [&self.title, &self.name, &self.original_name]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|s| !s.is_empty())
    }

    /// Release or first air date, whichever is present.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.first_air_date.as_deref().filter(|d| !d.is_empty()))
    }

    /// Whether this record is a TV show (by `media_type`, else by the
    /// presence of `name` without `title`).
    #[must_use]
    pub fn is_tv(&self) -> bool {
        self.media_type.as_deref().map_or_else(
            || self.title.is_none() && self.name.is_some(),
            |t| t == "tv",
        )
    }
}

// --- Details ---

/// Response from `{movie,tv}/{id}` with `append_to_response=videos,credits,similar`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaDetails {
    /// TMDB ID.
    pub id: u64,
    /// Movie title.
    pub title: Option<String>,
    /// TV show name.
    pub name: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Movie runtime in minutes.
    pub runtime: Option<u32>,
    /// TV episode runtimes in minutes.
    pub episode_run_time: Vec<u32>,
    /// Genres.
    pub genres: Vec<GenreEntry>,
    /// Movie release date.
    pub release_date: Option<String>,
    /// TV first air date.
    pub first_air_date: Option<String>,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Adult flag.
    pub adult: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Cast and crew.
    pub credits: Option<Credits>,
    /// Videos (trailers, teasers).
    pub videos: Option<Videos>,
    /// Similar titles.
    pub similar: Option<CatalogPage>,
}

/// Genre entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenreEntry {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Credits block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credits {
    /// Cast, in billing order.
    pub cast: Vec<CastMember>,
    /// Crew.
    pub crew: Vec<CrewMember>,
}

/// Cast member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CastMember {
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
}

/// Crew member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrewMember {
    /// Person name.
    pub name: String,
    /// Job title (e.g. "Director").
    pub job: String,
}

/// Videos block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Videos {
    /// Video list.
    pub results: Vec<Video>,
}

/// A video entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Video {
    /// Site-specific key (YouTube video ID).
    pub key: String,
    /// Video name.
    pub name: String,
    /// Hosting site (e.g. "YouTube").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub kind: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    /// Error message.
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_parse_trending_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/trending_all_week.json");

        // Act
        let page: CatalogPage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.len(), 4);
        let results = page.into_results();
        assert_eq!(results[0].id, 533_535);
        assert_eq!(results[0].display_title(), Some("Deadpool & Wolverine"));
        assert!(results[1].is_tv());
        assert_eq!(results[1].display_title(), Some("The Bear"));
    }

    #[test]
    fn test_missing_results_defaults_to_empty() {
        // Arrange
        let json = r#"{"page":1,"total_pages":0,"total_results":0}"#;

        // Act
        let page: CatalogPage = serde_json::from_str(json).unwrap();

        // Assert
        assert!(page.results.is_none());
        assert!(page.is_empty());
        assert!(page.into_results().is_empty());
    }

    #[test]
    fn test_item_with_only_id_parses() {
        // Arrange
        let json = r#"{"id":7}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.id, 7);
        assert_eq!(item.vote_average, 0.0);
        assert_eq!(item.display_title(), None);
        assert!(item.genre_ids.is_empty());
    }

    #[test]
    fn test_date_prefers_release_date() {
        // Arrange
        let item = CatalogItem {
            release_date: Some(String::new()),
            first_air_date: Some(String::from("2022-06-23")),
            ..CatalogItem::default()
        };

        // Act & Assert
        assert_eq!(item.date(), Some("2022-06-23"));
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/movie_details_533535.json");

        // Act
        let details: MediaDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 533_535);
        assert_eq!(details.runtime, Some(128));
        assert_eq!(details.genres.len(), 3);
        let credits = details.credits.unwrap();
        assert_eq!(credits.cast[0].name, "Ryan Reynolds");
        assert!(credits.crew.iter().any(|c| c.job == "Director"));
        let videos = details.videos.unwrap();
        assert_eq!(videos.results[0].kind, "Trailer");
        assert_eq!(details.similar.unwrap().len(), 2);
    }
}
