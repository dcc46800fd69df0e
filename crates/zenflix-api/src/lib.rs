//! Catalog API client library for zenflix.
//!
//! Provides a client for the TMDB v3 catalog, routed through an
//! outbound relay.

/// TMDB catalog client.
pub mod catalog;
