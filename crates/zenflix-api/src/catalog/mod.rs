//! Catalog API client module.
//!
//! Issues requests against the TMDB API v3 list, discover, search and
//! details endpoints and builds image URLs from path fragments.

mod api;
mod client;
mod error;
mod image;
mod params;
mod relay;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder, DEFAULT_BASE_URL};
#[allow(clippy::module_name_repetitions)]
pub use error::{CatalogError, ParseParamError};
pub use image::{IMAGE_BASE_URL, ImageSize, image_url};
pub use params::{Genre, MediaKind, MediaType, TimeWindow};
pub use relay::{DEFAULT_RELAY_URL, Relay};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    CastMember, CatalogItem, CatalogPage, Credits, CrewMember, GenreEntry, MediaDetails, Video,
    Videos,
};
