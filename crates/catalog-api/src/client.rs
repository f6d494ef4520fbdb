use catalog_core::{AppConfig, CatalogError, CatalogResult, Page, PageRequest};
use catalog_domain::{CatalogItem, Character, Comic, Event, ItemKind, Listing, ListingHeader};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::auth::{timestamp, Credentials};
use crate::envelope::{DataContainer, DataWrapper, ErrorBody};
use crate::source::ListingSource;

/// Largest page the API will serve.
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct MarvelClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl MarvelClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Internal(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_config(config: &AppConfig) -> CatalogResult<Self> {
        Self::new(
            config.api.base_url.clone(),
            Credentials::from_config(config)?,
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    /// Fetches `[offset, offset + limit)` of `listing`.
    pub async fn fetch_page<T: CatalogItem>(
        &self,
        listing: Listing,
        request: PageRequest,
    ) -> CatalogResult<Page<T>> {
        ensure_kind::<T>(&listing)?;
        if request.limit == 0 || request.limit > MAX_PAGE_LIMIT {
            return Err(CatalogError::Validation(format!(
                "limit must be within 1..={}, got {}",
                MAX_PAGE_LIMIT, request.limit
            )));
        }

        let query = [
            ("offset", request.offset.to_string()),
            ("limit", request.limit.to_string()),
        ];
        let container: DataContainer<T> = self.get(&listing.path(), &query).await?;
        tracing::debug!(
            listing = %listing,
            offset = container.offset,
            count = container.count,
            total = container.total,
            "fetched listing page"
        );
        Ok(container.into())
    }

    /// Fetches a single item by id.
    pub async fn fetch_detail<T: CatalogItem>(&self, id: u64) -> CatalogResult<T> {
        let path = T::KIND.detail_path(id);
        let container: DataContainer<T> = self.get(&path, &[]).await?;
        container
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(format!("{} {}", T::KIND, id)))
    }

    /// Detail of the comic or event a sub-listing belongs to. Top-level
    /// listings have no header.
    pub async fn fetch_header(&self, listing: Listing) -> CatalogResult<Option<ListingHeader>> {
        let Some((kind, id)) = listing.parent() else {
            return Ok(None);
        };
        let header = match kind {
            ItemKind::Character => ListingHeader::from_item(&self.fetch_detail::<Character>(id).await?),
            ItemKind::Comic => ListingHeader::from_item(&self.fetch_detail::<Comic>(id).await?),
            ItemKind::Event => ListingHeader::from_item(&self.fetch_detail::<Event>(id).await?),
        };
        Ok(Some(header))
    }

    /// A page source bound to one listing, for use by a listing view.
    pub fn listing<T: CatalogItem>(&self, listing: Listing) -> CatalogResult<ListingSource<T>> {
        ensure_kind::<T>(&listing)?;
        Ok(ListingSource::new(self.clone(), listing))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> CatalogResult<DataContainer<T>> {
        let url = format!("{}/{}", self.base_url, path);
        let ts = timestamp();

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&self.credentials.query(&ts))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let err = map_status(status, &body, path);
            tracing::warn!(path, status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }

        let wrapper: DataWrapper<T> = serde_json::from_slice(&body).map_err(|e| {
            CatalogError::Serialization(format!("unexpected response from {}: {}", path, e))
        })?;
        Ok(wrapper.data)
    }
}

fn ensure_kind<T: CatalogItem>(listing: &Listing) -> CatalogResult<()> {
    if listing.item_kind() != T::KIND {
        return Err(CatalogError::Validation(format!(
            "listing {} yields {} items, not {}",
            listing,
            listing.item_kind(),
            T::KIND
        )));
    }
    Ok(())
}

fn map_transport_error(err: reqwest::Error) -> CatalogError {
    if err.is_decode() {
        CatalogError::Serialization(err.to_string())
    } else {
        CatalogError::Network(err.to_string())
    }
}

fn map_status(status: StatusCode, body: &[u8], path: &str) -> CatalogError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.describe())
        .unwrap_or_else(|_| {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            if text.is_empty() {
                status.to_string()
            } else {
                text.chars().take(200).collect()
            }
        });
    let message = format!("{} ({})", path, detail);

    match status {
        StatusCode::NOT_FOUND => CatalogError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CatalogError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => {
            CatalogError::Network(message)
        }
        s if s.is_server_error() => CatalogError::Network(message),
        _ => CatalogError::Validation(message),
    }
}
