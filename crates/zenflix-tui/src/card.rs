//! Card view model.
//!
//! A card is a pure projection of one [`CatalogItem`]; it holds no state
//! beyond what the renderer passes in (focus).

use zenflix_api::catalog::{CatalogItem, ImageSize, MediaKind, image_url};

use crate::route::details_path;

/// Card width in terminal columns.
pub const CARD_WIDTH: u16 = 18;

/// Card height in terminal rows.
pub const CARD_HEIGHT: u16 = 6;

/// Gap between cards.
pub const CARD_GAP: u16 = 1;

/// Votes needed before a card may carry the trending badge.
const TRENDING_MIN_VOTES: u32 = 1000;

/// Average vote a card must exceed to carry the trending badge.
const TRENDING_MIN_AVERAGE: f64 = 7.5;

/// Display data for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// TMDB ID.
    pub id: u64,
    /// Movie or TV.
    pub kind: MediaKind,
    /// Full display title.
    pub title: String,
    /// Poster URL (`w500`), empty when the item has no poster.
    pub poster_url: String,
    /// Backdrop URL (`w780`), empty when the item has no backdrop.
    pub backdrop_url: String,
    /// One-decimal rating label, absent when the item has no votes.
    pub rating: Option<String>,
    /// Trending badge.
    pub is_trending: bool,
    /// Link to the details page.
    pub details_link: String,
}

impl CardView {
    /// Projects an item into a card.
    #[must_use]
    pub fn from_item(item: &CatalogItem) -> Self {
        let kind = if item.is_tv() {
            MediaKind::Tv
        } else {
            MediaKind::Movie
        };
        Self {
            id: item.id,
            kind,
            title: item
                .title
                .as_deref()
                .or(item.name.as_deref())
                .map_or_else(String::new, String::from),
            poster_url: image_url(item.poster_path.as_deref(), ImageSize::W500),
            backdrop_url: image_url(item.backdrop_path.as_deref(), ImageSize::W780),
            rating: rating_label(item.vote_average),
            is_trending: is_trending(item),
            details_link: details_path(kind, item.id),
        }
    }

    /// Title cut to `width` characters, ending in `…` when shortened.
    #[must_use]
    pub fn truncated_title(&self, width: usize) -> String {
        truncate(&self.title, width)
    }
}

/// Trending heuristic: many votes and a high average.
#[must_use]
pub fn is_trending(item: &CatalogItem) -> bool {
    item.vote_count > TRENDING_MIN_VOTES && item.vote_average > TRENDING_MIN_AVERAGE
}

/// `"7.7"` for a non-zero average.
fn rating_label(vote_average: f64) -> Option<String> {
    (vote_average.abs() > f64::EPSILON).then(|| format!("{vote_average:.1}"))
}

/// Truncates by characters, reserving one for the ellipsis.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return String::from(text);
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        out.push('\u{2026}');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(vote_count: u32, vote_average: f64) -> CatalogItem {
        CatalogItem {
            id: 10,
            title: Some(String::from("Inside Out 2")),
            poster_path: Some(String::from("/p.jpg")),
            backdrop_path: Some(String::from("/b.jpg")),
            vote_count,
            vote_average,
            ..CatalogItem::default()
        }
    }

    #[test]
    fn test_from_item_builds_urls_and_link() {
        // Arrange & Act
        let card = CardView::from_item(&item(10, 7.6));

        // Assert
        assert_eq!(card.poster_url, "https://image.tmdb.org/t/p/w500/p.jpg");
        assert_eq!(card.backdrop_url, "https://image.tmdb.org/t/p/w780/b.jpg");
        assert_eq!(card.details_link, "/MovieDetails?id=10");
        assert_eq!(card.rating.as_deref(), Some("7.6"));
    }

    #[test]
    fn test_tv_card_links_with_type() {
        // Arrange
        let show = CatalogItem {
            id: 136_315,
            name: Some(String::from("The Bear")),
            media_type: Some(String::from("tv")),
            ..CatalogItem::default()
        };

        // Act
        let card = CardView::from_item(&show);

        // Assert
        assert_eq!(card.title, "The Bear");
        assert_eq!(card.kind, MediaKind::Tv);
        assert_eq!(card.details_link, "/MovieDetails?id=136315&type=tv");
        assert!(card.poster_url.is_empty());
    }

    #[test]
    fn test_trending_badge_requires_both_thresholds() {
        // Arrange & Act & Assert
        assert!(is_trending(&item(1001, 7.6)));
        assert!(!is_trending(&item(1000, 9.0)));
        assert!(!is_trending(&item(5000, 7.5)));
    }

    #[test]
    fn test_zero_average_has_no_rating() {
        // Arrange & Act
        let card = CardView::from_item(&item(0, 0.0));

        // Assert
        assert_eq!(card.rating, None);
    }

    #[test]
    fn test_truncate() {
        // Arrange & Act & Assert
        assert_eq!(truncate("Deadpool & Wolverine", 10), "Deadpool \u{2026}");
        assert_eq!(truncate("Up", 10), "Up");
        assert_eq!(truncate("すずめの戸締まり", 4), "すずめ\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }
}
