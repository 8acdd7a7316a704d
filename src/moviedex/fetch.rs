//! # Metadata Lookup
//!
//! Adding a movie resolves its canonical title, year, rating and poster from
//! an external source. Every failure mode (transport error, non-success
//! status, an explicit "no match", an unparsable body) collapses into `None`:
//! callers only ever learn that the movie could not be found.
//!
//! Lookups are a single blocking attempt with no retry.

use crate::config::MovieConfig;
use crate::error::{MovieError, Result};
use crate::model::{parse_rating, parse_year, MovieInfo};
use serde::Deserialize;
use std::collections::HashMap;

/// A source of movie metadata keyed by free-text title.
pub trait MetadataSource {
    fn lookup(&self, title: &str) -> Option<MovieInfo>;
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// OMDb-style HTTP lookup (`GET <url>?t=<title>&apikey=<key>`).
pub struct OmdbSource {
    client: reqwest::blocking::Client,
    request_url: String,
    api_key: Option<String>,
}

impl OmdbSource {
    pub fn new(config: &MovieConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("moviedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MovieError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            request_url: config.request_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl MetadataSource for OmdbSource {
    fn lookup(&self, title: &str) -> Option<MovieInfo> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("no API key configured, skipping lookup for {:?}", title);
            return None;
        };

        let resp = match self
            .client
            .get(&self.request_url)
            .query(&[("t", title), ("apikey", api_key)])
            .send()
        {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!("lookup for {:?} failed: {}", title, err);
                return None;
            }
        };
        if !resp.status().is_success() {
            tracing::warn!("lookup for {:?} returned HTTP {}", title, resp.status());
            return None;
        }
        let body = match resp.text() {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!("lookup for {:?}: unreadable body: {}", title, err);
                return None;
            }
        };

        parse_omdb_body(&body)
    }
}

/// Extracts a [`MovieInfo`] from an OMDb response body.
pub fn parse_omdb_body(body: &str) -> Option<MovieInfo> {
    let parsed: OmdbResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!("lookup response did not parse: {}", err);
            return None;
        }
    };

    if !parsed.response.eq_ignore_ascii_case("true") {
        tracing::debug!(
            "lookup reported no match: {}",
            parsed.error.as_deref().unwrap_or("unknown reason")
        );
        return None;
    }

    let title = parsed.title.filter(|t| !t.trim().is_empty())?;
    let release_year = parsed.year.as_deref().and_then(parse_year)?;
    let rating = parsed.imdb_rating.as_deref().and_then(parse_rating)?;
    let poster = parsed
        .poster
        .filter(|p| !p.trim().eq_ignore_ascii_case("n/a"))
        .unwrap_or_default();

    Some(MovieInfo {
        title,
        release_year,
        rating,
        poster,
    })
}

/// Offline source answering from a fixed table.
///
/// Matching ignores case and surrounding whitespace, like a remote lookup
/// would.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    entries: HashMap<String, MovieInfo>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, info: MovieInfo) -> Self {
        self.entries.insert(query.trim().to_lowercase(), info);
        self
    }
}

impl MetadataSource for StaticSource {
    fn lookup(&self, title: &str) -> Option<MovieInfo> {
        self.entries.get(&title.trim().to_lowercase()).cloned()
    }
}
