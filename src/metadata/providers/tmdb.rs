//! TMDB (The Movie Database) movie scraper.
//!
//! Implements [`RemoteMetadataProvider`] by querying the TMDB v3 REST API:
//! one search call to pick a candidate, one detail call, one credits call,
//! all strictly sequential. Requests use the client defaults -- no retry, no
//! timeout override, no extra headers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error};

use crate::config::PluginSettings;
use crate::metadata::provider::{
    PersonInfo, PersonKind, RemoteMetadataProvider, ResolvedMetadata, SearchCandidate,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const TMDB_BASE_URL: &str = "https://api.tmdb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MovieSearchResponse {
    results: Option<Vec<MovieData>>,
}

/// Search candidates and the detail endpoint share this shape; the detail
/// response is simply the authoritative version for one id.
#[derive(Debug, Deserialize)]
struct MovieData {
    id: u64,
    title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    cast: Option<Vec<CastMember>>,
    crew: Option<Vec<CrewMember>>,
}

#[derive(Debug, Deserialize)]
struct CastMember {
    id: u64,
    name: Option<String>,
    character: Option<String>,
    profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrewMember {
    id: u64,
    name: Option<String>,
    job: Option<String>,
    profile_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Scraper implementation
// ---------------------------------------------------------------------------

/// TMDB movie metadata scraper.
///
/// Holds the API key and preferred language captured at construction; both
/// are read-only afterwards, so a single instance can serve concurrent
/// lookups.
///
/// # Examples
///
/// ```no_run
/// use tmdb_scraper::metadata::providers::TmdbScraper;
///
/// let scraper = TmdbScraper::new("your-api-key".into(), "zh-CN".into());
/// ```
pub struct TmdbScraper {
    client: reqwest::Client,
    api_key: String,
    language: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbScraper {
    /// Create a new scraper with the given API key and preferred language.
    ///
    /// The `language` parameter is a BCP-47 tag such as `"zh-CN"`; it is
    /// forwarded to the search and detail endpoints.
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            language,
            base_url: TMDB_BASE_URL.to_string(),
            image_base_url: TMDB_IMAGE_BASE.to_string(),
        }
    }

    /// Create a scraper from host-managed [`PluginSettings`].
    pub fn from_settings(settings: &PluginSettings) -> Self {
        Self::new(
            settings.api_key.clone(),
            settings.preferred_language.clone(),
        )
    }

    /// Override the API and image base URLs. Intended for tests that point
    /// the scraper at a local mock server.
    pub fn with_base_urls(
        mut self,
        base_url: impl Into<String>,
        image_base_url: impl Into<String>,
    ) -> Self {
        self.base_url = base_url.into();
        self.image_base_url = image_base_url.into();
        self
    }

    /// Execute a GET request and deserialize the JSON body.
    ///
    /// Fails on network errors, non-2xx statuses, and body shape mismatches;
    /// callers decide whether the failure propagates or is swallowed.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "TMDB GET");

        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("TMDB request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("TMDB request returned error: {url}"))?
            .json()
            .await
            .with_context(|| format!("failed to parse TMDB response: {url}"))
    }

    /// The three-call resolution chain. Each call needs the previous one's
    /// result, so there is nothing to parallelize.
    async fn resolve_inner(&self, title: &str) -> Result<ResolvedMetadata> {
        // 1. Search; the remote's relevance order picks the winner.
        let search_url = format!(
            "{}/search/movie?api_key={}&query={}&language={}",
            self.base_url,
            self.api_key,
            percent_encode(title),
            self.language
        );
        let search: MovieSearchResponse = self.fetch_json(&search_url).await?;

        let candidate = match search.results.unwrap_or_default().into_iter().next() {
            Some(movie) => movie,
            // No matches is a valid outcome, not an error.
            None => return Ok(ResolvedMetadata::default()),
        };

        // 2. Authoritative detail record for the chosen id.
        let detail_url = format!(
            "{}/movie/{}?api_key={}&language={}",
            self.base_url, candidate.id, self.api_key, self.language
        );
        let detail: MovieData = self.fetch_json(&detail_url).await?;

        // 3. Credits. This endpoint is queried without a language parameter.
        let credits_url = format!(
            "{}/movie/{}/credits?api_key={}",
            self.base_url, candidate.id, self.api_key
        );
        let credits: CreditsResponse = self.fetch_json(&credits_url).await?;

        let premiere_date = parse_release_date(detail.release_date.as_deref());

        let cast: Vec<PersonInfo> = credits
            .cast
            .unwrap_or_default()
            .into_iter()
            .map(|member| PersonInfo {
                name: member.name.unwrap_or_default(),
                role: member.character,
                kind: PersonKind::Actor,
                image_url: self.profile_image_url(member.profile_path.as_deref()),
                provider_ids: tmdb_provider_ids(member.id),
            })
            .collect();

        // Job must equal "Director" exactly; "director" or "Co-Director"
        // entries stay out.
        let directors: Vec<PersonInfo> = credits
            .crew
            .unwrap_or_default()
            .into_iter()
            .filter(|member| member.job.as_deref() == Some("Director"))
            .map(|member| PersonInfo {
                name: member.name.unwrap_or_default(),
                role: None,
                kind: PersonKind::Director,
                image_url: self.profile_image_url(member.profile_path.as_deref()),
                provider_ids: tmdb_provider_ids(member.id),
            })
            .collect();

        Ok(ResolvedMetadata {
            name: detail.title.unwrap_or_default(),
            overview: detail.overview,
            premiere_date,
            production_year: premiere_date.map(|date| date.year()),
            primary_image_url: self.artwork_url(detail.poster_path.as_deref()),
            backdrop_image_url: self.artwork_url(detail.backdrop_path.as_deref()),
            cast,
            directors,
            has_metadata: true,
        })
    }

    async fn search_inner(&self, title: &str) -> Result<Vec<SearchCandidate>> {
        let search_url = format!(
            "{}/search/movie?api_key={}&query={}&language={}",
            self.base_url,
            self.api_key,
            percent_encode(title),
            self.language
        );
        let search: MovieSearchResponse = self.fetch_json(&search_url).await?;

        Ok(search
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|movie| SearchCandidate {
                name: movie.title.unwrap_or_default(),
                image_url: self.artwork_url(movie.poster_path.as_deref()),
                overview: movie.overview,
                premiere_date: parse_release_date(movie.release_date.as_deref()),
            })
            .collect())
    }

    /// Full image URL for a poster/backdrop path fragment, skipping absent
    /// and empty fragments.
    fn artwork_url(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", self.image_base_url, p))
    }

    /// Full image URL for a person's profile path; empty paths map to no
    /// image, never to an empty-string URL.
    fn profile_image_url(&self, path: Option<&str>) -> Option<String> {
        self.artwork_url(path)
    }
}

#[async_trait]
impl RemoteMetadataProvider for TmdbScraper {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn resolve(&self, title: &str) -> Result<ResolvedMetadata> {
        match self.resolve_inner(title).await {
            Ok(metadata) => Ok(metadata),
            Err(err) => {
                error!(title = title, error = %err, "TMDB metadata resolution failed");
                Err(err)
            }
        }
    }

    async fn search(&self, title: &str) -> Vec<SearchCandidate> {
        match self.search_inner(title).await {
            Ok(candidates) => candidates,
            Err(err) => {
                error!(title = title, error = %err, "TMDB search failed");
                Vec::new()
            }
        }
    }

    async fn image_response(&self, url: &str) -> Result<reqwest::Response> {
        // Raw pass-through: the response goes back untouched, whatever the
        // status or content type.
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("image request failed: {url}"))
    }
}

/// Provider-id map carried by every mapped person.
fn tmdb_provider_ids(id: u64) -> HashMap<String, String> {
    let mut ids = HashMap::new();
    ids.insert("tmdb".to_string(), id.to_string());
    ids
}

/// Parse a TMDB release date (`"2010-07-16"`). Anything else -- empty,
/// partial, malformed -- maps to `None` rather than an error.
fn parse_release_date(date: Option<&str>) -> Option<NaiveDate> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// Percent-encoding for query parameter values (RFC 3986 unreserved set).
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0f) as usize]));
            }
        }
    }
    out
}

const HEX: [u8; 16] = *b"0123456789ABCDEF";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_parsing() {
        assert_eq!(
            parse_release_date(Some("2010-07-16")),
            NaiveDate::from_ymd_opt(2010, 7, 16)
        );
        assert_eq!(parse_release_date(Some("")), None);
        assert_eq!(parse_release_date(Some("2010-07")), None);
        assert_eq!(parse_release_date(Some("not a date")), None);
        assert_eq!(parse_release_date(None), None);
    }

    #[test]
    fn production_year_matches_parsed_date() {
        let date = parse_release_date(Some("1999-12-31")).unwrap();
        assert_eq!(date.year(), 1999);
    }

    #[test]
    fn percent_encoding() {
        assert_eq!(percent_encode("Inception"), "Inception");
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("foo&bar=baz"), "foo%26bar%3Dbaz");
        assert_eq!(percent_encode("盗梦空间"), "%E7%9B%97%E6%A2%A6%E7%A9%BA%E9%97%B4");
        assert_eq!(percent_encode("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn artwork_url_construction() {
        let scraper = TmdbScraper::new("key".into(), "zh-CN".into());
        assert_eq!(
            scraper.artwork_url(Some("/abc123.jpg")),
            Some("https://image.tmdb.org/t/p/original/abc123.jpg".to_string())
        );
        assert_eq!(scraper.artwork_url(None), None);
    }

    #[test]
    fn empty_profile_path_maps_to_no_image() {
        let scraper = TmdbScraper::new("key".into(), "zh-CN".into());
        assert_eq!(scraper.profile_image_url(Some("")), None);
        assert_eq!(scraper.profile_image_url(None), None);
        assert_eq!(
            scraper.profile_image_url(Some("/p.jpg")),
            Some("https://image.tmdb.org/t/p/original/p.jpg".to_string())
        );
    }

    #[test]
    fn provider_id_map() {
        let ids = tmdb_provider_ids(27205);
        assert_eq!(ids.get("tmdb").map(String::as_str), Some("27205"));
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn search_response_deserializes() {
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 27205,
                "title": "Inception",
                "overview": "A thief who steals corporate secrets...",
                "release_date": "2010-07-16",
                "poster_path": "/poster.jpg",
                "backdrop_path": "/backdrop.jpg",
                "vote_average": 8.4
            }],
            "total_results": 1
        }"#;
        let parsed: MovieSearchResponse = serde_json::from_str(json).unwrap();
        let results = parsed.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 27205);
        assert_eq!(results[0].title.as_deref(), Some("Inception"));
    }

    #[test]
    fn search_response_tolerates_missing_results() {
        let parsed: MovieSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_none());
    }

    #[test]
    fn credits_deserialize_with_partial_fields() {
        let json = r#"{
            "cast": [{"id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb"}],
            "crew": [{"id": 525, "name": "Christopher Nolan", "job": "Director", "profile_path": null}]
        }"#;
        let parsed: CreditsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.cast.unwrap()[0].profile_path, None);
        assert_eq!(parsed.crew.unwrap()[0].job.as_deref(), Some("Director"));
    }

    #[test]
    fn scraper_is_available() {
        let scraper = TmdbScraper::new("test-key".into(), "zh-CN".into());
        assert!(scraper.is_available());

        let empty = TmdbScraper::new(String::new(), "zh-CN".into());
        assert!(!empty.is_available());
    }

    #[test]
    fn scraper_name() {
        let scraper = TmdbScraper::new("key".into(), "zh-CN".into());
        assert_eq!(scraper.name(), "tmdb");
    }

    #[test]
    fn from_settings_copies_both_fields() {
        let settings = PluginSettings {
            api_key: "k".to_string(),
            preferred_language: "en-US".to_string(),
        };
        let scraper = TmdbScraper::from_settings(&settings);
        assert_eq!(scraper.api_key, "k");
        assert_eq!(scraper.language, "en-US");
    }
}
