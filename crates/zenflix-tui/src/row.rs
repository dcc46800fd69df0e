//! Horizontally scrollable row of cards.
//!
//! A [`RowLoader`] runs one fetch per mount and keeps the resulting items
//! together with the row's scroll position and card cursor. Failures are
//! logged and leave the row empty; an empty row is not rendered.

use std::fmt::Display;
use std::future::Future;

use zenflix_api::catalog::{
    CatalogApi, CatalogError, CatalogItem, CatalogPage, Genre, MediaKind, MediaType, TimeWindow,
};

use crate::card::{CARD_GAP, CARD_WIDTH, CardView};
use crate::load::{Generation, LoadTicket};

/// Columns reserved before each card of a ranked row.
pub const RANK_GUTTER: usize = 4;

/// Columns within which the right edge counts as reached.
pub const EDGE_SLACK: usize = 2;

/// Scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Towards the first card.
    Left,
    /// Towards the last card.
    Right,
}

/// Horizontal scroll position and edge-arrow flags, in terminal columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    target: usize,
    content_width: usize,
    viewport_width: usize,
    show_left: bool,
    show_right: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            target: 0,
            content_width: 0,
            viewport_width: 0,
            show_left: false,
            show_right: true,
        }
    }
}

impl ScrollState {
    /// Visible offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Offset the animation is heading to.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Whether the left arrow is shown.
    #[must_use]
    pub const fn show_left(&self) -> bool {
        self.show_left
    }

    /// Whether the right arrow is shown.
    #[must_use]
    pub const fn show_right(&self) -> bool {
        self.show_right
    }

    /// Whether the visible offset still differs from the target.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.offset != self.target
    }

    const fn max_offset(&self) -> usize {
        self.content_width.saturating_sub(self.viewport_width)
    }

    /// Moves the target by 80 % of the viewport width.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let step = (self.viewport_width.saturating_mul(4) / 5).max(1);
        self.target = match direction {
            ScrollDirection::Left => self.target.saturating_sub(step),
            ScrollDirection::Right => self.target.saturating_add(step).min(self.max_offset()),
        };
    }

    /// Moves the target just enough to show columns `start..end`.
    pub fn scroll_to_reveal(&mut self, start: usize, end: usize) {
        if start < self.target {
            self.target = start;
        } else if end > self.target.saturating_add(self.viewport_width) {
            self.target = end.saturating_sub(self.viewport_width);
        }
        self.target = self.target.min(self.max_offset());
    }

    /// Advances one animation frame: half the remaining distance, at least
    /// one column. Returns whether the offset moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let step = self.offset.abs_diff(self.target).div_ceil(2);
        if self.target > self.offset {
            self.offset = self.offset.saturating_add(step);
        } else {
            self.offset = self.offset.saturating_sub(step);
        }
        self.update_arrows();
        true
    }

    /// Records a new viewport width.
    pub fn set_viewport(&mut self, width: usize) {
        if self.viewport_width == width {
            return;
        }
        self.viewport_width = width;
        self.clamp();
        self.update_arrows();
    }

    /// Records a new content width.
    pub fn set_extent(&mut self, width: usize) {
        self.content_width = width;
        self.clamp();
        self.update_arrows();
    }

    /// Recomputes arrow visibility from the visible offset.
    pub const fn update_arrows(&mut self) {
        self.show_left = self.offset > 0;
        self.show_right = self.offset.saturating_add(EDGE_SLACK) < self.max_offset();
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        self.target = self.target.min(max);
        self.offset = self.offset.min(max);
    }
}

/// Catalog query backing a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowQuery {
    /// `trending/{media}/{window}`.
    Trending(MediaType, TimeWindow),
    /// `{kind}/top_rated`.
    TopRated(MediaKind),
    /// `{kind}/popular`.
    Popular(MediaKind),
    /// `movie/upcoming`.
    Upcoming,
    /// `discover/movie?with_genres=`.
    Genre(Genre),
    /// `search/multi?query=`.
    Search(String),
}

impl RowQuery {
    /// Runs the query.
    ///
    /// # Errors
    ///
    /// Returns the catalog error unchanged.
    pub async fn fetch<C: CatalogApi>(&self, api: &C) -> Result<CatalogPage, CatalogError> {
        match self {
            Self::Trending(media, window) => api.trending(*media, *window).await,
            Self::TopRated(kind) => api.top_rated(*kind).await,
            Self::Popular(kind) => api.popular(*kind).await,
            Self::Upcoming => api.upcoming().await,
            Self::Genre(genre) => api.discover_by_genre(genre.id()).await,
            Self::Search(query) => api.search(query).await,
        }
    }
}

/// Invokes `fetch` once and returns its items.
///
/// A failure is logged and yields no items.
pub async fn load_items<F, Fut, E>(title: &str, fetch: F) -> Vec<CatalogItem>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<CatalogPage, E>>,
    E: Display,
{
    match fetch().await {
        Ok(page) => {
            let items = page.into_results();
            tracing::debug!(row = title, count = items.len(), "row loaded");
            items
        }
        Err(e) => {
            tracing::error!(row = title, "Error fetching movies: {e}");
            Vec::new()
        }
    }
}

/// One row: title, items, scroll state and card cursor.
#[derive(Debug)]
pub struct RowLoader {
    title: String,
    query: Option<RowQuery>,
    show_rank: bool,
    items: Vec<CatalogItem>,
    scroll: ScrollState,
    cursor: usize,
    generation: Generation,
    loading: bool,
}

impl RowLoader {
    /// Row backed by a catalog query.
    #[must_use]
    pub fn new(title: impl Into<String>, query: RowQuery) -> Self {
        Self {
            title: title.into(),
            query: Some(query),
            show_rank: false,
            items: Vec::new(),
            scroll: ScrollState::default(),
            cursor: 0,
            generation: Generation::default(),
            loading: false,
        }
    }

    /// Row with fixed items and no query.
    #[must_use]
    pub fn with_items(title: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        let mut row = Self {
            query: None,
            ..Self::new(title, RowQuery::Upcoming)
        };
        row.set_items(items);
        row
    }

    /// Renders a 1-based rank before each card.
    #[must_use]
    pub fn ranked(mut self) -> Self {
        self.show_rank = true;
        self
    }

    /// Row title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Backing query, if any.
    #[must_use]
    pub const fn query(&self) -> Option<&RowQuery> {
        self.query.as_ref()
    }

    /// Whether ranks are shown.
    #[must_use]
    pub const fn show_rank(&self) -> bool {
        self.show_rank
    }

    /// Loaded items.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Scroll state.
    #[must_use]
    pub const fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Mutable scroll state.
    pub const fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// Index of the focused card.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rows without items are not rendered.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    /// Mounts the row: clears it and issues a ticket for one fetch.
    ///
    /// Returns `None` for rows without a query.
    pub fn start(&mut self) -> Option<LoadTicket> {
        self.query.as_ref()?;
        self.items.clear();
        self.cursor = 0;
        self.scroll = ScrollState::default();
        self.loading = true;
        Some(self.generation.next())
    }

    /// Drops any outstanding fetch.
    pub const fn unmount(&mut self) {
        self.generation.invalidate();
        self.loading = false;
    }

    /// Applies a fetch result. Stale tickets are ignored; returns whether
    /// the result was applied.
    pub fn complete(&mut self, ticket: LoadTicket, items: Vec<CatalogItem>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(row = %self.title, "discarding stale row result");
            return false;
        }
        self.loading = false;
        self.set_items(items);
        true
    }

    fn set_items(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
        self.cursor = 0;
        let width = self.content_width();
        self.scroll.set_extent(width);
    }

    /// Columns taken by one card including its gap and rank gutter.
    #[must_use]
    pub fn stride(&self) -> usize {
        let base = usize::from(CARD_WIDTH.saturating_add(CARD_GAP));
        if self.show_rank {
            base.saturating_add(RANK_GUTTER)
        } else {
            base
        }
    }

    /// Total width of all cards.
    #[must_use]
    pub fn content_width(&self) -> usize {
        self.items
            .len()
            .saturating_mul(self.stride())
            .saturating_sub(usize::from(CARD_GAP))
    }

    /// Moves the cursor one card and keeps the focused card visible.
    pub fn move_cursor(&mut self, direction: ScrollDirection) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = match direction {
            ScrollDirection::Left => self.cursor.saturating_sub(1),
            ScrollDirection::Right => self
                .cursor
                .saturating_add(1)
                .min(self.items.len().saturating_sub(1)),
        };
        let start = self.cursor.saturating_mul(self.stride());
        let end = start
            .saturating_add(self.stride())
            .saturating_sub(usize::from(CARD_GAP));
        self.scroll.scroll_to_reveal(start, end);
    }

    /// Focused item.
    #[must_use]
    pub fn focused(&self) -> Option<&CatalogItem> {
        self.items.get(self.cursor)
    }

    /// Card views for every item.
    #[must_use]
    pub fn cards(&self) -> Vec<CardView> {
        self.items.iter().map(CardView::from_item).collect()
    }
}
