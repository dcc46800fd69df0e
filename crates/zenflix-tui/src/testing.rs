//! Mock catalog for loader tests.
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use zenflix_api::catalog::{
    CatalogApi, CatalogError, CatalogItem, CatalogPage, MediaDetails, MediaKind, MediaType,
    TimeWindow,
};

/// Canned answers per endpoint; `None` answers with a 500.
#[derive(Debug, Default)]
pub struct MockCatalog {
    pub trending: Option<CatalogPage>,
    pub popular: Option<CatalogPage>,
    pub details: Option<MediaDetails>,
    pub listing: Option<CatalogPage>,
    pub call_log: Mutex<Vec<&'static str>>,
}

impl MockCatalog {
    /// Endpoints called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.call_log.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) {
        self.call_log.lock().unwrap().push(name);
    }

    fn answer<T: Clone>(canned: Option<&T>) -> Result<T, CatalogError> {
        canned.cloned().ok_or_else(|| CatalogError::Api {
            status: 500,
            message: String::from("Request failed with status code 500"),
        })
    }
}

impl CatalogApi for MockCatalog {
    async fn trending(
        &self,
        _media: MediaType,
        _window: TimeWindow,
    ) -> Result<CatalogPage, CatalogError> {
        self.record("trending");
        Self::answer(self.trending.as_ref())
    }

    async fn top_rated(&self, _kind: MediaKind) -> Result<CatalogPage, CatalogError> {
        self.record("top_rated");
        Self::answer(self.listing.as_ref())
    }

    async fn popular(&self, _kind: MediaKind) -> Result<CatalogPage, CatalogError> {
        self.record("popular");
        Self::answer(self.popular.as_ref())
    }

    async fn upcoming(&self) -> Result<CatalogPage, CatalogError> {
        self.record("upcoming");
        Self::answer(self.listing.as_ref())
    }

    async fn details(&self, _kind: MediaKind, _id: u64) -> Result<MediaDetails, CatalogError> {
        self.record("details");
        Self::answer(self.details.as_ref())
    }

    async fn search(&self, _query: &str) -> Result<CatalogPage, CatalogError> {
        self.record("search");
        Self::answer(self.listing.as_ref())
    }

    async fn discover_by_genre(&self, _genre_id: u32) -> Result<CatalogPage, CatalogError> {
        self.record("discover_by_genre");
        Self::answer(self.listing.as_ref())
    }
}

/// Movie with a title, backdrop and average.
pub fn movie(id: u64, title: &str, backdrop: Option<&str>, vote_average: f64) -> CatalogItem {
    CatalogItem {
        id,
        title: Some(String::from(title)),
        backdrop_path: backdrop.map(String::from),
        vote_average,
        ..CatalogItem::default()
    }
}

/// Page wrapping `items`.
pub fn page(items: Vec<CatalogItem>) -> CatalogPage {
    CatalogPage::from_results(items)
}
