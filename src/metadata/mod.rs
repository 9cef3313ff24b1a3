//! Remote metadata resolution for movie titles.
//!
//! This module defines a generic [`RemoteMetadataProvider`] trait and the
//! value records a media-server host consumes, plus the concrete TMDB
//! implementation.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition and host-facing data types.
//! - [`providers`] -- Concrete scraper implementations (TMDB).

pub mod provider;
pub mod providers;

pub use provider::{
    PersonInfo, PersonKind, RemoteMetadataProvider, ResolvedMetadata, SearchCandidate,
};
pub use providers::TmdbScraper;
