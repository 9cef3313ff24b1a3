//! Trait definition and host-facing types for remote metadata providers.
//!
//! This module defines the [`RemoteMetadataProvider`] trait that scraper
//! backends implement, along with the value records handed back to the host:
//! [`ResolvedMetadata`] for a full resolution and [`SearchCandidate`] for the
//! lightweight search pathway.
//!
//! The two lookup methods deliberately differ in their failure contracts:
//! [`resolve`](RemoteMetadataProvider::resolve) returns a `Result` the caller
//! must handle, while [`search`](RemoteMetadataProvider::search) returns a
//! plain (possibly empty) list and never propagates transport errors.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

/// The role a person plays in relation to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    Actor,
    Director,
}

/// A person associated with a resolved movie (cast or crew).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonInfo {
    /// Display name of the person.
    pub name: String,
    /// Role text, e.g. the character an actor plays. Absent for directors.
    pub role: Option<String>,
    /// Whether this entry is an actor or a director.
    pub kind: PersonKind,
    /// Fully-qualified profile image URL, if the provider has one.
    pub image_url: Option<String>,
    /// External provider IDs keyed by provider name (e.g. `{"tmdb": "819"}`).
    pub provider_ids: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Resolution output
// ---------------------------------------------------------------------------

/// Enriched metadata for a single movie, produced by a full resolution.
///
/// Constructed fresh per call and owned by the caller. A resolution that
/// found no matching title yields `ResolvedMetadata::default()` with
/// `has_metadata == false`; that is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    /// Localised movie title.
    pub name: String,
    /// Synopsis / overview text.
    pub overview: Option<String>,
    /// Release date, when the provider supplied a parsable one.
    pub premiere_date: Option<NaiveDate>,
    /// Year component of `premiere_date`.
    pub production_year: Option<i32>,
    /// Fully-qualified poster image URL.
    pub primary_image_url: Option<String>,
    /// Fully-qualified backdrop image URL.
    pub backdrop_image_url: Option<String>,
    /// Cast members in the provider's billing order.
    pub cast: Vec<PersonInfo>,
    /// Directors in the provider's crew order.
    pub directors: Vec<PersonInfo>,
    /// `true` once the record has been populated from a matched title.
    pub has_metadata: bool,
}

// ---------------------------------------------------------------------------
// Search candidates
// ---------------------------------------------------------------------------

/// A lightweight search hit, not yet enriched with detail or credits.
///
/// Ordering follows the remote API's relevance order; the first candidate is
/// the one a full resolution would pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Display title of the candidate.
    pub name: String,
    /// Fully-qualified poster image URL, if available.
    pub image_url: Option<String>,
    /// Short synopsis / overview text.
    pub overview: Option<String>,
    /// Release date, when the provider supplied a parsable one.
    pub premiere_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait implemented by remote metadata scrapers.
///
/// A provider wraps a single external metadata API and exposes the three
/// operations a media-server host drives: full resolution of one title,
/// lightweight candidate search, and a raw image fetch pass-through.
///
/// Implementations hold no mutable state, so one instance can be shared
/// across concurrent lookups (wrap in an `Arc` if the host needs to).
#[async_trait]
pub trait RemoteMetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider has been configured with credentials.
    ///
    /// This is a hint for hosts that register several providers; lookups on
    /// an unconfigured provider are not blocked here and simply fail at the
    /// remote API's authentication check.
    fn is_available(&self) -> bool;

    /// Resolve one title into an enriched [`ResolvedMetadata`] record.
    ///
    /// A title with no remote matches resolves to
    /// `Ok(ResolvedMetadata::default())`. Transport and parse failures are
    /// logged and propagated to the caller.
    async fn resolve(&self, title: &str) -> anyhow::Result<ResolvedMetadata>;

    /// Search for candidate titles without detail or credits enrichment.
    ///
    /// Transport and parse failures are logged and swallowed; the caller
    /// sees an empty list.
    async fn search(&self, title: &str) -> Vec<SearchCandidate>;

    /// Fetch an arbitrary URL (typically an image) and return the raw
    /// response, with no interpretation of status, content type, or size.
    async fn image_response(&self, url: &str) -> anyhow::Result<reqwest::Response>;
}
