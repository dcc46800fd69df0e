//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::CatalogError;
use super::params::{MediaKind, MediaType, TimeWindow};
use super::types::{CatalogPage, MediaDetails};

/// Catalog API trait.
///
/// Abstracts catalog queries for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches trending titles (`trending/{media}/{window}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers non-2xx, or
    /// the body cannot be decoded.
    async fn trending(
        &self,
        media: MediaType,
        window: TimeWindow,
    ) -> Result<CatalogPage, CatalogError>;

    /// Fetches top-rated titles (`{kind}/top_rated`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers non-2xx, or
    /// the body cannot be decoded.
    async fn top_rated(&self, kind: MediaKind) -> Result<CatalogPage, CatalogError>;

    /// Fetches popular titles (`{kind}/popular`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers non-2xx, or
    /// the body cannot be decoded.
    async fn popular(&self, kind: MediaKind) -> Result<CatalogPage, CatalogError>;

    /// Fetches upcoming movies (`movie/upcoming`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers non-2xx, or
    /// the body cannot be decoded.
    async fn upcoming(&self) -> Result<CatalogPage, CatalogError>;

    /// Fetches full details with videos, credits and similar titles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers non-2xx, or
    /// the body cannot be decoded.
    async fn details(&self, kind: MediaKind, id: u64) -> Result<MediaDetails, CatalogError>;

    /// Searches movies, shows and people (`search/multi`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers non-2xx, or
    /// the body cannot be decoded.
    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError>;

    /// Discovers movies with the given genre (`discover/movie?with_genres=`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers non-2xx, or
    /// the body cannot be decoded.
    async fn discover_by_genre(&self, genre_id: u32) -> Result<CatalogPage, CatalogError>;
}
