//! Details page loader.

use chrono::NaiveDate;
use thiserror::Error;
use zenflix_api::catalog::{
    CatalogApi, CatalogError, CatalogItem, ImageSize, MediaDetails, MediaKind, image_url,
};

use crate::load::{Generation, LoadTicket};

/// Number of cast members shown.
const CAST_LIMIT: usize = 10;

/// Public title page used when a title has no trailer.
const TMDB_WEB_URL: &str = "https://www.themoviedb.org";

/// Why details could not be loaded.
#[derive(Debug, Error)]
pub enum DetailsError {
    /// The request failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One credited actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastLine {
    /// Actor name.
    pub name: String,
    /// Character played, empty when unknown.
    pub character: String,
}

/// Display projection of [`MediaDetails`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    /// TMDB ID.
    pub id: u64,
    /// Movie or TV.
    pub kind: MediaKind,
    /// Title (movies) or name (shows).
    pub title: String,
    /// Tagline, empty when absent.
    pub tagline: String,
    /// One-decimal average vote.
    pub score: String,
    /// Release year.
    pub year: String,
    /// Long-form release date such as `July 24, 2024`.
    pub release_date: String,
    /// `"R"` for adult titles, else `"PG-13"`.
    pub rating: &'static str,
    /// Runtime such as `2h 8m`, empty when unknown.
    pub duration: String,
    /// Genre names.
    pub genres: Vec<String>,
    /// Overview text.
    pub synopsis: String,
    /// Director, empty when not credited.
    pub director: String,
    /// Leading cast.
    pub cast: Vec<CastLine>,
    /// First YouTube trailer, else the TMDB title page.
    pub trailer_url: String,
    /// Full-size backdrop.
    pub backdrop_url: String,
    /// Similar titles for the "More Like This" row.
    pub similar: Vec<CatalogItem>,
}

impl DetailsView {
    /// Projects a details response.
    #[must_use]
    pub fn from_details(kind: MediaKind, details: MediaDetails) -> Self {
        let date = details
            .release_date
            .as_deref()
            .or(details.first_air_date.as_deref())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        let runtime = details
            .runtime
            .or_else(|| details.episode_run_time.first().copied());
        let credits = details.credits.unwrap_or_default();
        let director = credits
            .crew
            .iter()
            .find(|c| c.job == "Director")
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let cast = credits
            .cast
            .into_iter()
            .take(CAST_LIMIT)
            .map(|c| CastLine {
                name: c.name,
                character: c.character.unwrap_or_default(),
            })
            .collect();
        let trailer_url = details
            .videos
            .as_ref()
            .and_then(|v| {
                v.results
                    .iter()
                    .find(|v| v.site == "YouTube" && v.kind == "Trailer")
            })
            .map_or_else(
                || format!("{TMDB_WEB_URL}/{kind}/{}", details.id),
                |v| format!("https://www.youtube.com/watch?v={}", v.key),
            );

        Self {
            id: details.id,
            kind,
            title: details
                .title
                .or(details.name)
                .unwrap_or_default(),
            tagline: details.tagline.unwrap_or_default(),
            score: format!("{:.1}", details.vote_average),
            year: date.map(|d| d.format("%Y").to_string()).unwrap_or_default(),
            release_date: date
                .map(|d| d.format("%B %-d, %Y").to_string())
                .unwrap_or_default(),
            rating: if details.adult { "R" } else { "PG-13" },
            duration: runtime.map(format_runtime).unwrap_or_default(),
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            synopsis: details.overview.unwrap_or_default(),
            director,
            cast,
            trailer_url,
            backdrop_url: image_url(details.backdrop_path.as_deref(), ImageSize::Original),
            similar: details.similar.map(|p| p.into_results()).unwrap_or_default(),
        }
    }
}

/// `128` → `"2h 8m"`, `45` → `"45m"`.
#[must_use]
pub fn format_runtime(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Fetches and projects details.
///
/// # Errors
///
/// Returns the catalog error unchanged.
pub async fn load_details<C: CatalogApi>(
    api: &C,
    kind: MediaKind,
    id: u64,
) -> Result<DetailsView, DetailsError> {
    let details = api.details(kind, id).await?;
    Ok(DetailsView::from_details(kind, details))
}

/// Details view state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsState {
    /// Fetch outstanding.
    Loading,
    /// Load failed; holds the error message.
    Error(String),
    /// Details ready.
    Ready(Box<DetailsView>),
}

/// Details state machine for one entry into the page.
#[derive(Debug)]
pub struct DetailsLoader {
    kind: MediaKind,
    id: u64,
    state: DetailsState,
    generation: Generation,
}

impl DetailsLoader {
    /// Loader for one title, in the `Loading` state.
    #[must_use]
    pub fn new(kind: MediaKind, id: u64) -> Self {
        Self {
            kind,
            id,
            state: DetailsState::Loading,
            generation: Generation::default(),
        }
    }

    /// Title kind.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Title ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DetailsState {
        &self.state
    }

    /// Ready view, if any.
    #[must_use]
    pub fn view(&self) -> Option<&DetailsView> {
        match &self.state {
            DetailsState::Ready(view) => Some(view),
            _ => None,
        }
    }

    /// Enters `Loading` and issues a ticket.
    pub fn start(&mut self) -> LoadTicket {
        self.state = DetailsState::Loading;
        self.generation.next()
    }

    /// Drops any outstanding fetch.
    pub const fn unmount(&mut self) {
        self.generation.invalidate();
    }

    /// Applies a load result. Stale tickets are ignored.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<DetailsView, DetailsError>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(id = self.id, "discarding stale details result");
            return false;
        }
        self.state = match result {
            Ok(view) => DetailsState::Ready(Box::new(view)),
            Err(e) => {
                tracing::error!(id = self.id, "Error fetching details: {e}");
                DetailsState::Error(e.to_string())
            }
        };
        true
    }
}
