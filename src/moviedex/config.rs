use crate::error::{MovieError, Result};
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "API_KEY";
pub const REQUEST_URL_VAR: &str = "REQUEST_URL";
pub const TEMPLATE_VAR: &str = "MOVIEDEX_TEMPLATE";

const DEFAULT_REQUEST_URL: &str = "https://www.omdbapi.com/";

/// Runtime configuration, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieConfig {
    /// Key for the metadata lookup. Lookups report "not found" without it.
    pub api_key: Option<String>,

    /// Endpoint queried with `t=<title>&apikey=<key>`.
    pub request_url: String,

    /// Website template; `None` falls back to the default lookup order.
    pub template_path: Option<PathBuf>,
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            request_url: DEFAULT_REQUEST_URL.to_string(),
            template_path: None,
        }
    }
}

impl MovieConfig {
    /// Load config from the process environment (after `.env` has been applied).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Build config from `(name, value)` pairs. Blank values count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value: String = value.into();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                API_KEY_VAR => config.api_key = Some(value.to_string()),
                REQUEST_URL_VAR => config.set_request_url(value)?,
                TEMPLATE_VAR => config.template_path = Some(PathBuf::from(value)),
                _ => {}
            }
        }

        Ok(config)
    }

    /// Set the lookup endpoint (must be an http or https URL)
    pub fn set_request_url(&mut self, url: &str) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(MovieError::Config(format!(
                "{} must be an http(s) URL, got {:?}",
                REQUEST_URL_VAR, url
            )));
        }
        self.request_url = url.to_string();
        Ok(())
    }

    pub fn with_template_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.template_path = path;
        }
        self
    }
}
