//! Concrete metadata scraper implementations.
//!
//! Each submodule wraps a single external API and implements the
//! [`RemoteMetadataProvider`](super::RemoteMetadataProvider) trait.

pub mod tmdb;

pub use tmdb::TmdbScraper;
