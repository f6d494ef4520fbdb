use async_trait::async_trait;
use catalog_core::{CatalogResult, Page, PageRequest, PageSource};
use catalog_domain::{CatalogItem, Listing};
use std::marker::PhantomData;

use crate::client::MarvelClient;

/// Page source that serves every page of one listing from its own endpoint.
#[derive(Debug, Clone)]
pub struct ListingSource<T> {
    client: MarvelClient,
    listing: Listing,
    _item: PhantomData<fn() -> T>,
}

impl<T: CatalogItem> ListingSource<T> {
    pub(crate) fn new(client: MarvelClient, listing: Listing) -> Self {
        Self {
            client,
            listing,
            _item: PhantomData,
        }
    }

    /// First page of the listing, used to mount a view.
    pub async fn first_page(&self, limit: u32) -> CatalogResult<Page<T>> {
        self.fetch_page(PageRequest::new(0, limit)).await
    }
}

#[async_trait]
impl<T: CatalogItem> PageSource<T> for ListingSource<T> {
    async fn fetch_page(&self, request: PageRequest) -> CatalogResult<Page<T>> {
        self.client.fetch_page(self.listing, request).await
    }
}
