use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://gateway.marvel.com/v1/public";
pub const DEFAULT_PAGE_LIMIT: u32 = 14;
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.33;
pub const DEFAULT_MAX_FETCH_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            public_key: None,
            private_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Tunables for every listing view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Page size requested for the first page of a listing.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Minimum intersection ratio of the sentinel before the next page is requested.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Attempts per page before a retryable failure stalls the view.
    #[serde(default = "default_max_fetch_attempts")]
    pub max_fetch_attempts: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            max_fetch_attempts: DEFAULT_MAX_FETCH_ATTEMPTS,
        }
    }
}

impl PagingConfig {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.page_limit == 0 {
            return Err(CatalogError::Config(
                "paging.page_limit must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(CatalogError::Config(format!(
                "paging.visibility_threshold must be within [0, 1], got {}",
                self.visibility_threshold
            )));
        }
        if self.max_fetch_attempts == 0 {
            return Err(CatalogError::Config(
                "paging.max_fetch_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_visibility_threshold() -> f64 {
    DEFAULT_VISIBILITY_THRESHOLD
}

fn default_max_fetch_attempts() -> u32 {
    DEFAULT_MAX_FETCH_ATTEMPTS
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/catalog/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("catalog/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("catalog\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Loads the platform config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable config");
                    }
                }
            }
        }
        Self::default()
    }

    /// Loads an explicitly requested config file. Unlike [`AppConfig::load`],
    /// a missing or malformed file is an error.
    pub fn load_from(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CatalogError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn with_api_overrides(
        mut self,
        base_url: Option<String>,
        public_key: Option<String>,
        private_key: Option<String>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if public_key.is_some() {
            self.api.public_key = public_key;
        }
        if private_key.is_some() {
            self.api.private_key = private_key;
        }
        self
    }

    /// Both keys are required to sign Marvel API requests.
    pub fn credentials(&self) -> CatalogResult<(&str, &str)> {
        match (
            self.api.public_key.as_deref(),
            self.api.private_key.as_deref(),
        ) {
            (Some(public), Some(private)) if !public.is_empty() && !private.is_empty() => {
                Ok((public, private))
            }
            _ => Err(CatalogError::Config(
                "api.public_key and api.private_key are required (or set MARVEL_PUBLIC_KEY / MARVEL_PRIVATE_KEY)"
                    .to_string(),
            )),
        }
    }
}
