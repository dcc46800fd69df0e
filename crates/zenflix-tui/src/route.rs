//! In-app routing.
//!
//! Pages are addressed by query-style paths such as `/MovieDetails?id=42`.

use url::form_urlencoded;
use zenflix_api::catalog::MediaKind;

/// Page name of the details view.
const DETAILS_PAGE: &str = "MovieDetails";

/// A resolved page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: hero and rows.
    Home,
    /// `/MovieDetails?id=<id>[&type=tv]`.
    Details {
        /// Movie or TV.
        kind: MediaKind,
        /// TMDB ID.
        id: u64,
    },
    /// `/Browse`: fixture-backed catalog grid.
    Browse,
    /// `/Profiles`: fixture-backed profile picker.
    Profiles,
    /// Anything else. Holds the unmatched path.
    NotFound(String),
}

impl Route {
    /// Resolves a path.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let (page, query) = path.split_once('?').unwrap_or((path, ""));
        let page = page.trim_end_matches('/');

        match page {
            "" | "/Home" => Self::Home,
            "/Browse" => Self::Browse,
            "/Profiles" => Self::Profiles,
            p if p.strip_prefix('/') == Some(DETAILS_PAGE) => {
                let id = query_value(query, "id").and_then(|v| v.parse::<u64>().ok());
                let kind = match query_value(query, "type").as_deref() {
                    Some("tv") => MediaKind::Tv,
                    _ => MediaKind::Movie,
                };
                id.map_or_else(
                    || Self::NotFound(String::from(path)),
                    |id| Self::Details { kind, id },
                )
            }
            _ => Self::NotFound(String::from(path)),
        }
    }

    /// Path that resolves back to this route.
    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => String::from("/"),
            Self::Details { kind, id } => details_path(*kind, *id),
            Self::Browse => create_page_url("Browse"),
            Self::Profiles => create_page_url("Profiles"),
            Self::NotFound(path) => path.clone(),
        }
    }
}

/// Builds a page URL: `/` followed by the page name with spaces as dashes.
#[must_use]
pub fn create_page_url(page_name: &str) -> String {
    format!("/{}", page_name.replace(' ', "-"))
}

/// Link to the details view of an item.
#[must_use]
pub fn details_path(kind: MediaKind, id: u64) -> String {
    match kind {
        MediaKind::Movie => create_page_url(&format!("{DETAILS_PAGE}?id={id}")),
        MediaKind::Tv => create_page_url(&format!("{DETAILS_PAGE}?id={id}&type=tv")),
    }
}

/// First percent-decoded value of `key` in an `a=1&b=2` query string.
fn query_value(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
