use anyhow::Context as _;
use catalog_api::MarvelClient;
use catalog_core::{AppConfig, ControllerSettings, MemorySource, PageSource};
use catalog_domain::{CatalogItem, ListingHeader};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, SourceArgs};

pub struct CliContext {
    pub config: AppConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl CliContext {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let (config, config_path) = match &cli.config {
            Some(path) => (AppConfig::load_from(path)?, Some(path.clone())),
            None => (
                AppConfig::load(),
                AppConfig::config_path().filter(|p| p.exists()),
            ),
        };
        let config = config.with_api_overrides(
            cli.api_url.clone(),
            cli.public_key.clone(),
            cli.private_key.clone(),
        );
        config.paging.validate()?;
        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn settings(&self) -> ControllerSettings {
        self.config.paging.into()
    }

    pub fn page_limit(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.config.paging.page_limit)
    }

    pub fn client(&self) -> anyhow::Result<MarvelClient> {
        Ok(MarvelClient::from_config(&self.config)?)
    }

    /// The API listing, or the fixture file when one is given.
    pub fn open_source<T: CatalogItem>(
        &self,
        args: &SourceArgs,
    ) -> anyhow::Result<Box<dyn PageSource<T>>> {
        match &args.fixture {
            Some(path) => {
                let items = load_fixture::<T>(path)?;
                tracing::debug!(path = %path.display(), items = items.len(), "serving listing from fixture");
                Ok(Box::new(MemorySource::new(items)))
            }
            None => Ok(Box::new(self.client()?.listing::<T>(args.listing)?)),
        }
    }

    /// Header for a sub-listing. Fixtures have no parent to look up.
    pub async fn listing_header(&self, args: &SourceArgs) -> anyhow::Result<Option<ListingHeader>> {
        if args.fixture.is_some() {
            return Ok(None);
        }
        Ok(self.client()?.fetch_header(args.listing).await?)
    }
}

fn load_fixture<T: CatalogItem>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| {
        format!(
            "fixture {} is not a JSON array of {} items",
            path.display(),
            T::KIND
        )
    })
}
