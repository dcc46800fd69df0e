//! Featured banner.
//!
//! The hero tries the weekly trending list first and falls back to popular
//! movies once. One qualifying item is picked at random; the banner fades in
//! shortly after the data arrives.

use std::time::{Duration, Instant};

use rand::Rng;
use thiserror::Error;
use zenflix_api::catalog::{
    CatalogApi, CatalogError, CatalogItem, ImageSize, MediaKind, MediaType, TimeWindow, image_url,
};

use crate::load::{Generation, LoadTicket};

/// Delay between data arrival and the banner being fully shown.
pub const REVEAL_DELAY: Duration = Duration::from_millis(100);

/// Placeholder runtime shown on the banner.
const PLACEHOLDER_DURATION: &str = "2h 15m";

/// Placeholder genre chips shown on the banner.
const PLACEHOLDER_GENRES: [&str; 2] = ["Trending", "Popular"];

/// Why the hero could not be shown.
#[derive(Debug, Error)]
pub enum HeroError {
    /// Both lists came back empty.
    #[error("No movies found")]
    NoMovies,
    /// No item had a backdrop and a title.
    #[error("No movies with valid images found")]
    NoValidImages,
    /// The fallback request failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Banner content derived from one catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSelection {
    /// TMDB ID.
    pub id: u64,
    /// Movie or TV.
    pub kind: MediaKind,
    /// Display title.
    pub title: String,
    /// Overview text.
    pub description: String,
    /// Full-size backdrop.
    pub backdrop_url: String,
    /// Full-size poster.
    pub poster_url: String,
    /// `round(vote_average * 10)`.
    pub match_score: u8,
    /// Release year, empty when unknown.
    pub year: String,
    /// `"R"` for adult titles, else `"PG-13"`.
    pub rating: &'static str,
    /// Placeholder runtime.
    pub duration: &'static str,
    /// Placeholder genre chips.
    pub genres: Vec<&'static str>,
    /// Average vote.
    pub vote_average: f64,
}

impl HeroSelection {
    /// Builds the banner content for `item`.
    #[must_use]
    pub fn from_item(item: &CatalogItem) -> Self {
        let year = item
            .date()
            .and_then(|d| d.split('-').next())
            .map_or_else(String::new, String::from);
        Self {
            id: item.id,
            kind: if item.is_tv() {
                MediaKind::Tv
            } else {
                MediaKind::Movie
            },
            title: item.display_title().map_or_else(String::new, String::from),
            description: item.overview.clone().unwrap_or_default(),
            backdrop_url: image_url(item.backdrop_path.as_deref(), ImageSize::Original),
            poster_url: image_url(item.poster_path.as_deref(), ImageSize::Original),
            match_score: match_score(item.vote_average),
            year,
            rating: if item.adult { "R" } else { "PG-13" },
            duration: PLACEHOLDER_DURATION,
            genres: PLACEHOLDER_GENRES.to_vec(),
            vote_average: item.vote_average,
        }
    }
}

/// Percentage match derived from a 0-10 average.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn match_score(vote_average: f64) -> u8 {
    (vote_average * 10.0).round().clamp(0.0, 100.0) as u8
}

/// Fetches candidates: trending first, popular movies once on failure.
///
/// # Errors
///
/// Returns the popular-list error when both requests fail.
pub async fn fetch_candidates<C: CatalogApi>(api: &C) -> Result<Vec<CatalogItem>, HeroError> {
    match api.trending(MediaType::All, TimeWindow::Week).await {
        Ok(page) => Ok(page.into_results()),
        Err(e) => {
            tracing::warn!("trending failed, falling back to popular: {e}");
            let page = api.popular(MediaKind::Movie).await?;
            Ok(page.into_results())
        }
    }
}

/// Picks one item with a backdrop and a title, uniformly at random.
///
/// # Errors
///
/// Returns [`HeroError::NoMovies`] for an empty list and
/// [`HeroError::NoValidImages`] when nothing qualifies.
pub fn select_hero<R: Rng + ?Sized>(
    items: &[CatalogItem],
    rng: &mut R,
) -> Result<HeroSelection, HeroError> {
    if items.is_empty() {
        return Err(HeroError::NoMovies);
    }
    let valid: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| {
            item.backdrop_path.as_deref().is_some_and(|p| !p.is_empty())
                && item.title.as_deref().is_some_and(|t| !t.is_empty())
        })
        .collect();
    if valid.is_empty() {
        return Err(HeroError::NoValidImages);
    }
    let index = rng.gen_range(0..valid.len());
    valid
        .get(index)
        .map(|item| HeroSelection::from_item(item))
        .ok_or(HeroError::NoValidImages)
}

/// Runs the full sequence with the given random source.
///
/// # Errors
///
/// See [`fetch_candidates`] and [`select_hero`].
pub async fn load_hero_with<C, R>(api: &C, rng: &mut R) -> Result<HeroSelection, HeroError>
where
    C: CatalogApi,
    R: Rng + Send + ?Sized,
{
    let items = fetch_candidates(api).await?;
    select_hero(&items, rng)
}

/// Runs the full sequence with the thread-local random source.
///
/// # Errors
///
/// See [`fetch_candidates`] and [`select_hero`].
pub async fn load_hero<C: CatalogApi>(api: &C) -> Result<HeroSelection, HeroError> {
    let items = fetch_candidates(api).await?;
    select_hero(&items, &mut rand::thread_rng())
}

/// Hero view state.
#[derive(Debug, Clone, PartialEq)]
pub enum HeroState {
    /// Fetch outstanding.
    Loading,
    /// Load failed; holds the error message.
    Error(String),
    /// Selection ready since `ready_at`.
    Ready {
        /// Chosen item.
        selection: HeroSelection,
        /// When the data arrived.
        ready_at: Instant,
    },
}

/// Hero state machine.
#[derive(Debug)]
pub struct HeroLoader {
    state: HeroState,
    generation: Generation,
    reveal_delay: Duration,
}

impl Default for HeroLoader {
    fn default() -> Self {
        Self::new(REVEAL_DELAY)
    }
}

impl HeroLoader {
    /// Loader in the `Loading` state.
    #[must_use]
    pub fn new(reveal_delay: Duration) -> Self {
        Self {
            state: HeroState::Loading,
            generation: Generation::default(),
            reveal_delay,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &HeroState {
        &self.state
    }

    /// Enters `Loading` and issues a ticket for the new fetch.
    pub fn start(&mut self) -> LoadTicket {
        self.state = HeroState::Loading;
        self.generation.next()
    }

    /// Re-runs the whole sequence. Same as [`Self::start`].
    pub fn retry(&mut self) -> LoadTicket {
        tracing::info!("retrying featured content");
        self.start()
    }

    /// Drops any outstanding fetch.
    pub const fn unmount(&mut self) {
        self.generation.invalidate();
    }

    /// Applies a load result at `now`. Stale tickets are ignored.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<HeroSelection, HeroError>,
        now: Instant,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("discarding stale hero result");
            return false;
        }
        self.state = match result {
            Ok(selection) => HeroState::Ready {
                selection,
                ready_at: now,
            },
            Err(e) => {
                tracing::error!("Error fetching hero content: {e}");
                HeroState::Error(e.to_string())
            }
        };
        true
    }

    /// Ready selection, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<&HeroSelection> {
        match &self.state {
            HeroState::Ready { selection, .. } => Some(selection),
            _ => None,
        }
    }

    /// Whether the entrance transition has finished at `now`.
    #[must_use]
    pub fn is_revealed(&self, now: Instant) -> bool {
        match &self.state {
            HeroState::Ready { ready_at, .. } => {
                now.saturating_duration_since(*ready_at) >= self.reveal_delay
            }
            _ => false,
        }
    }

    /// `"Failed to load: <message>"` in the error state.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            HeroState::Error(message) => Some(format!("Failed to load: {message}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::testing::{MockCatalog, movie, page};

    #[tokio::test]
    async fn test_trending_single_item_is_selected() {
        // Arrange
        let api = MockCatalog {
            trending: Some(page(vec![movie(1, "A", Some("/a.jpg"), 8.0)])),
            ..MockCatalog::default()
        };
        let mut rng = StdRng::seed_from_u64(7);

        // Act
        let selection = load_hero_with(&api, &mut rng).await.unwrap();

        // Assert
        assert_eq!(selection.title, "A");
        assert_eq!(selection.match_score, 80);
        assert_eq!(
            selection.backdrop_url,
            "https://image.tmdb.org/t/p/original/a.jpg"
        );
        assert_eq!(api.calls(), vec!["trending"]);
    }

    #[tokio::test]
    async fn test_trending_failure_falls_back_to_popular_once() {
        // Arrange
        let api = MockCatalog {
            popular: Some(page(vec![movie(2, "B", Some("/b.jpg"), 6.4)])),
            ..MockCatalog::default()
        };
        let mut rng = StdRng::seed_from_u64(7);

        // Act
        let selection = load_hero_with(&api, &mut rng).await.unwrap();

        // Assert
        assert_eq!(selection.id, 2);
        assert_eq!(selection.match_score, 64);
        assert_eq!(api.calls(), vec!["trending", "popular"]);
    }

    #[tokio::test]
    async fn test_empty_fallback_reports_no_movies() {
        // Arrange
        let api = MockCatalog {
            popular: Some(page(Vec::new())),
            ..MockCatalog::default()
        };

        // Act
        let err = load_hero(&api).await.unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "No movies found");
        assert_eq!(api.calls(), vec!["trending", "popular"]);
    }

    #[tokio::test]
    async fn test_fallback_failure_carries_catalog_message() {
        // Arrange
        let api = MockCatalog::default();

        // Act
        let err = load_hero(&api).await.unwrap_err();

        // Assert
        assert!(matches!(err, HeroError::Catalog(_)));
        assert_eq!(err.to_string(), "Request failed with status code 500");
        assert_eq!(api.calls(), vec!["trending", "popular"]);
    }

    #[tokio::test]
    async fn test_empty_trending_does_not_fall_back() {
        // Arrange
        let api = MockCatalog {
            trending: Some(page(Vec::new())),
            ..MockCatalog::default()
        };

        // Act
        let err = load_hero(&api).await.unwrap_err();

        // Assert
        assert!(matches!(err, HeroError::NoMovies));
        assert_eq!(api.calls(), vec!["trending"]);
    }

    #[test]
    fn test_select_skips_items_without_backdrop_or_title() {
        // Arrange
        let mut untitled = movie(3, "", Some("/c.jpg"), 9.0);
        untitled.name = Some(String::from("Named Only"));
        let items = vec![
            movie(1, "No Backdrop", None, 9.0),
            untitled,
            movie(4, "Good", Some("/d.jpg"), 7.0),
            movie(5, "Empty Backdrop", Some(""), 9.0),
        ];

        // Act & Assert
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select_hero(&items, &mut rng).unwrap();
            assert_eq!(selection.id, 4);
        }
    }

    #[test]
    fn test_select_without_valid_images() {
        // Arrange
        let items = vec![movie(1, "No Backdrop", None, 9.0)];
        let mut rng = StdRng::seed_from_u64(1);

        // Act
        let err = select_hero(&items, &mut rng).unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "No movies with valid images found");
    }

    #[test]
    fn test_seeded_selection_is_deterministic() {
        // Arrange
        let items: Vec<CatalogItem> = (1..=5)
            .map(|i| movie(i, "T", Some("/t.jpg"), 5.0))
            .collect();

        // Act
        let first = select_hero(&items, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = select_hero(&items, &mut StdRng::seed_from_u64(42)).unwrap();

        // Assert
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_selection_fields() {
        // Arrange
        let mut item = movie(9, "Adult Title", Some("/x.jpg"), 7.25);
        item.adult = true;
        item.release_date = Some(String::from("2024-07-24"));
        item.poster_path = Some(String::from("/p.jpg"));

        // Act
        let selection = HeroSelection::from_item(&item);

        // Assert
        assert_eq!(selection.year, "2024");
        assert_eq!(selection.rating, "R");
        assert_eq!(selection.duration, "2h 15m");
        assert_eq!(selection.genres, vec!["Trending", "Popular"]);
        assert_eq!(selection.match_score, 73);
        assert_eq!(
            selection.poster_url,
            "https://image.tmdb.org/t/p/original/p.jpg"
        );
    }

    #[test]
    fn test_missing_date_gives_empty_year() {
        // Arrange
        let item = movie(9, "Undated", Some("/x.jpg"), 1.0);

        // Act
        let selection = HeroSelection::from_item(&item);

        // Assert
        assert_eq!(selection.year, "");
        assert_eq!(selection.rating, "PG-13");
    }

    #[test]
    fn test_loader_reveal_after_delay() {
        // Arrange
        let mut loader = HeroLoader::default();
        let ticket = loader.start();
        let now = Instant::now();
        let selection = HeroSelection::from_item(&movie(1, "A", Some("/a.jpg"), 8.0));

        // Act
        loader.complete(ticket, Ok(selection), now);

        // Assert
        assert!(loader.selection().is_some());
        assert!(!loader.is_revealed(now));
        assert!(!loader.is_revealed(now + Duration::from_millis(99)));
        assert!(loader.is_revealed(now + REVEAL_DELAY));
    }

    #[test]
    fn test_loader_error_message() {
        // Arrange
        let mut loader = HeroLoader::default();
        let ticket = loader.start();

        // Act
        loader.complete(ticket, Err(HeroError::NoMovies), Instant::now());

        // Assert
        assert_eq!(
            loader.error_message().as_deref(),
            Some("Failed to load: No movies found")
        );
    }

    #[test]
    fn test_retry_discards_earlier_result() {
        // Arrange
        let mut loader = HeroLoader::default();
        let first = loader.start();
        loader.complete(first, Err(HeroError::NoMovies), Instant::now());

        // Act
        let second = loader.retry();
        let applied = loader.complete(first, Err(HeroError::NoValidImages), Instant::now());

        // Assert
        assert!(!applied);
        assert_eq!(*loader.state(), HeroState::Loading);
        assert_ne!(first, second);
    }
}
