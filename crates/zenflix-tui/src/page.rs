//! Page composition.
//!
//! Each page owns its loaders. Mounting a page returns the fetches it needs;
//! the event loop runs them and routes results back by ticket.

use std::time::Duration;

use zenflix_api::catalog::{CatalogItem, Genre, MediaKind, MediaType, TimeWindow};

use crate::details::DetailsLoader;
use crate::fixtures::{self, CATEGORIES, PROFILES, SampleTitle};
use crate::hero::HeroLoader;
use crate::load::LoadTicket;
use crate::route::Route;
use crate::row::{RowLoader, RowQuery, ScrollDirection};

/// Footer text on the home page.
pub const FOOTER: &str = "ZenFlix - A Netflix Clone Project";

/// Title of the navbar search row.
pub const SEARCH_ROW_TITLE: &str = "Search Results";

/// Title of the similar-titles row on the details page.
pub const SIMILAR_ROW_TITLE: &str = "More Like This";

/// A fetch a page needs run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    /// Hero candidates and selection.
    Hero(LoadTicket),
    /// One row.
    Row {
        /// Which row.
        slot: RowSlot,
        /// Ticket issued by the row.
        ticket: LoadTicket,
        /// Row title, for logging.
        title: String,
        /// Query to run.
        query: RowQuery,
    },
    /// Details of one title.
    Details {
        /// Ticket issued by the details loader.
        ticket: LoadTicket,
        /// Movie or TV.
        kind: MediaKind,
        /// TMDB ID.
        id: u64,
    },
}

/// Addresses a row on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSlot {
    /// Navbar search results.
    Search,
    /// Fixed home row by index.
    Home(usize),
}

/// What has focus on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    /// The featured banner.
    Hero,
    /// A row.
    Row(RowSlot),
}

/// Keyboard input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys.
    Normal,
    /// Typing into the navbar search box.
    Search,
}

/// Home page: hero, optional search row, and the fixed rows.
#[derive(Debug)]
pub struct HomePage {
    /// Featured banner.
    pub hero: HeroLoader,
    rows: Vec<RowLoader>,
    search: Option<RowLoader>,
    /// Focused element.
    pub focus: HomeFocus,
    /// Navbar input mode.
    pub input_mode: InputMode,
    /// Navbar search text.
    pub query: String,
}

impl HomePage {
    /// Home page with the default rows.
    #[must_use]
    pub fn new(reveal_delay: Duration) -> Self {
        Self {
            hero: HeroLoader::new(reveal_delay),
            rows: default_rows(),
            search: None,
            focus: HomeFocus::Hero,
            input_mode: InputMode::Normal,
            query: String::new(),
        }
    }

    /// Starts the hero and every row.
    pub fn mount(&mut self) -> Vec<Fetch> {
        let mut fetches = vec![Fetch::Hero(self.hero.start())];
        for (index, row) in self.rows.iter_mut().enumerate() {
            if let Some(fetch) = start_row(row, RowSlot::Home(index)) {
                fetches.push(fetch);
            }
        }
        if let Some(row) = self.search.as_mut()
            && let Some(fetch) = start_row(row, RowSlot::Search)
        {
            fetches.push(fetch);
        }
        self.focus = HomeFocus::Hero;
        fetches
    }

    /// Drops all outstanding fetches.
    pub fn unmount(&mut self) {
        self.hero.unmount();
        for row in &mut self.rows {
            row.unmount();
        }
        if let Some(row) = self.search.as_mut() {
            row.unmount();
        }
    }

    /// Fixed rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[RowLoader] {
        &self.rows
    }

    /// Search row, if a search was issued.
    #[must_use]
    pub const fn search_row(&self) -> Option<&RowLoader> {
        self.search.as_ref()
    }

    /// Row addressed by `slot`.
    #[must_use]
    pub fn row(&self, slot: RowSlot) -> Option<&RowLoader> {
        match slot {
            RowSlot::Search => self.search.as_ref(),
            RowSlot::Home(index) => self.rows.get(index),
        }
    }

    /// Mutable row addressed by `slot`.
    pub fn row_mut(&mut self, slot: RowSlot) -> Option<&mut RowLoader> {
        match slot {
            RowSlot::Search => self.search.as_mut(),
            RowSlot::Home(index) => self.rows.get_mut(index),
        }
    }

    /// Every row, search first.
    pub fn all_rows_mut(&mut self) -> impl Iterator<Item = &mut RowLoader> {
        self.search.iter_mut().chain(self.rows.iter_mut())
    }

    /// Slots of rows that currently render, search first.
    #[must_use]
    pub fn visible_slots(&self) -> Vec<RowSlot> {
        let search = self
            .search
            .as_ref()
            .filter(|row| row.is_visible())
            .map(|_| RowSlot::Search);
        let home = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_visible())
            .map(|(index, _)| RowSlot::Home(index));
        search.into_iter().chain(home).collect()
    }

    /// Moves focus to the next element below.
    pub fn focus_down(&mut self) {
        let slots = self.visible_slots();
        self.focus = match self.focus {
            HomeFocus::Hero => slots.first().map_or(HomeFocus::Hero, |s| HomeFocus::Row(*s)),
            HomeFocus::Row(current) => {
                let next = slots
                    .iter()
                    .position(|s| *s == current)
                    .and_then(|i| slots.get(i.saturating_add(1)))
                    .or_else(|| slots.last());
                next.map_or(HomeFocus::Hero, |s| HomeFocus::Row(*s))
            }
        };
    }

    /// Moves focus to the next element above.
    pub fn focus_up(&mut self) {
        let slots = self.visible_slots();
        self.focus = match self.focus {
            HomeFocus::Hero => HomeFocus::Hero,
            HomeFocus::Row(current) => match slots.iter().position(|s| *s == current) {
                Some(0) | None => HomeFocus::Hero,
                Some(i) => slots
                    .get(i.saturating_sub(1))
                    .map_or(HomeFocus::Hero, |s| HomeFocus::Row(*s)),
            },
        };
    }

    /// Moves the card cursor of the focused row.
    pub fn move_cursor(&mut self, direction: ScrollDirection) {
        if let HomeFocus::Row(slot) = self.focus
            && let Some(row) = self.row_mut(slot)
        {
            row.move_cursor(direction);
        }
    }

    /// Pages the focused row by 80 % of its viewport.
    pub fn scroll_row(&mut self, direction: ScrollDirection) {
        if let HomeFocus::Row(slot) = self.focus
            && let Some(row) = self.row_mut(slot)
        {
            row.scroll_mut().scroll(direction);
        }
    }

    /// Route opened by Enter on the focused element.
    #[must_use]
    pub fn activate(&self) -> Option<Route> {
        match self.focus {
            HomeFocus::Hero => self.hero.selection().map(|s| Route::Details {
                kind: s.kind,
                id: s.id,
            }),
            HomeFocus::Row(slot) => self.row(slot).and_then(RowLoader::focused).map(details_route),
        }
    }

    /// Replaces the search row with results for the typed query.
    ///
    /// Returns `None` and removes the row when the query is blank.
    pub fn submit_search(&mut self) -> Option<Fetch> {
        self.input_mode = InputMode::Normal;
        let query = self.query.trim();
        if query.is_empty() {
            self.clear_search();
            return None;
        }
        let mut row = RowLoader::new(SEARCH_ROW_TITLE, RowQuery::Search(String::from(query)));
        let fetch = start_row(&mut row, RowSlot::Search);
        if let Some(old) = self.search.as_mut() {
            old.unmount();
        }
        self.search = Some(row);
        fetch
    }

    /// Removes the search row and clears the query.
    pub fn clear_search(&mut self) {
        if let Some(mut row) = self.search.take() {
            row.unmount();
        }
        self.query.clear();
        if self.focus == HomeFocus::Row(RowSlot::Search) {
            self.focus = HomeFocus::Hero;
        }
    }
}

/// The seven home rows.
#[must_use]
pub fn default_rows() -> Vec<RowLoader> {
    vec![
        RowLoader::new(
            "Trending Now",
            RowQuery::Trending(MediaType::All, TimeWindow::Week),
        )
        .ranked(),
        RowLoader::new("Top Rated", RowQuery::TopRated(MediaKind::Movie)),
        RowLoader::new("Action Movies", RowQuery::Genre(Genre::Action)),
        RowLoader::new("Comedy Movies", RowQuery::Genre(Genre::Comedy)),
        RowLoader::new("Horror Movies", RowQuery::Genre(Genre::Horror)),
        RowLoader::new("Romance Movies", RowQuery::Genre(Genre::Romance)),
        RowLoader::new("Documentaries", RowQuery::Genre(Genre::Documentary)),
    ]
}

fn start_row(row: &mut RowLoader, slot: RowSlot) -> Option<Fetch> {
    let ticket = row.start()?;
    let query = row.query()?.clone();
    Some(Fetch::Row {
        slot,
        ticket,
        title: String::from(row.title()),
        query,
    })
}

fn details_route(item: &CatalogItem) -> Route {
    Route::Details {
        kind: if item.is_tv() {
            MediaKind::Tv
        } else {
            MediaKind::Movie
        },
        id: item.id,
    }
}

/// Details page: loader plus the "More Like This" row once ready.
#[derive(Debug)]
pub struct DetailsPage {
    /// Details loader.
    pub loader: DetailsLoader,
    similar: RowLoader,
}

impl DetailsPage {
    /// Page for one title.
    #[must_use]
    pub fn new(kind: MediaKind, id: u64) -> Self {
        Self {
            loader: DetailsLoader::new(kind, id),
            similar: RowLoader::with_items(SIMILAR_ROW_TITLE, Vec::new()),
        }
    }

    /// Starts (or restarts) the details fetch.
    pub fn mount(&mut self) -> Fetch {
        self.similar = RowLoader::with_items(SIMILAR_ROW_TITLE, Vec::new());
        Fetch::Details {
            ticket: self.loader.start(),
            kind: self.loader.kind(),
            id: self.loader.id(),
        }
    }

    /// Rebuilds the similar row from the loaded view.
    pub fn sync_similar(&mut self) {
        let items = self
            .loader
            .view()
            .map(|v| v.similar.clone())
            .unwrap_or_default();
        self.similar = RowLoader::with_items(SIMILAR_ROW_TITLE, items);
    }

    /// Similar-titles row.
    #[must_use]
    pub const fn similar(&self) -> &RowLoader {
        &self.similar
    }

    /// Mutable similar-titles row.
    pub const fn similar_mut(&mut self) -> &mut RowLoader {
        &mut self.similar
    }

    /// Route opened by Enter: the focused similar title.
    #[must_use]
    pub fn activate(&self) -> Option<Route> {
        self.similar.focused().map(details_route)
    }

    /// URL opened by Play.
    #[must_use]
    pub fn trailer_url(&self) -> Option<&str> {
        self.loader.view().map(|v| v.trailer_url.as_str())
    }
}

/// Browse page over the fixture catalog.
#[derive(Debug, Default)]
pub struct BrowsePage {
    category: usize,
    /// Index of the focused title within the filtered list.
    pub cursor: usize,
}

impl BrowsePage {
    /// Selected category name.
    #[must_use]
    pub fn category(&self) -> &'static str {
        CATEGORIES
            .get(self.category)
            .copied()
            .unwrap_or(fixtures::ALL_CATEGORY)
    }

    /// Index of the selected category.
    #[must_use]
    pub const fn category_index(&self) -> usize {
        self.category
    }

    /// Titles in the selected category.
    #[must_use]
    pub fn titles(&self) -> Vec<&'static SampleTitle> {
        fixtures::filter_by_category(self.category())
    }

    /// Focused title.
    #[must_use]
    pub fn focused(&self) -> Option<&'static SampleTitle> {
        self.titles().get(self.cursor).copied()
    }

    /// Cycles the category and resets the cursor.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn cycle_category(&mut self, direction: ScrollDirection) {
        let count = CATEGORIES.len();
        self.category = match direction {
            ScrollDirection::Right => (self.category + 1) % count,
            ScrollDirection::Left => (self.category + count - 1) % count,
        };
        self.cursor = 0;
    }

    /// Moves the title cursor.
    pub fn move_cursor(&mut self, down: bool) {
        let len = self.titles().len();
        if down {
            self.cursor = self.cursor.saturating_add(1).min(len.saturating_sub(1));
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}

/// "Who's Watching?" page over the fixture profiles.
#[derive(Debug, Default)]
pub struct ProfilesPage {
    /// Index of the focused profile.
    pub cursor: usize,
    /// Manage mode.
    pub editing: bool,
}

impl ProfilesPage {
    /// Moves the profile cursor.
    pub fn move_cursor(&mut self, direction: ScrollDirection) {
        self.cursor = match direction {
            ScrollDirection::Left => self.cursor.saturating_sub(1),
            ScrollDirection::Right => self
                .cursor
                .saturating_add(1)
                .min(PROFILES.len().saturating_sub(1)),
        };
    }

    /// Toggles manage mode.
    pub const fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }
}
