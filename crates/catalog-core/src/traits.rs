use crate::pagination::{Page, PageRequest};
use crate::CatalogResult;
use async_trait::async_trait;
use std::fmt::Debug;
use std::hash::Hash;

/// Items rendered in a listing need a stable key for the rendering shell.
pub trait Keyed {
    type Key: Eq + Hash + Clone + Debug;

    fn key(&self) -> Self::Key;
}

/// Anything that can serve `[offset, offset + limit)` of a listing.
///
/// Implementations must return disjoint ranges for distinct offsets; the
/// controller appends results without deduplicating.
#[async_trait]
pub trait PageSource<T: Send + 'static>: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> CatalogResult<Page<T>>;
}

#[async_trait]
impl<T, S> PageSource<T> for Box<S>
where
    T: Send + 'static,
    S: PageSource<T> + ?Sized,
{
    async fn fetch_page(&self, request: PageRequest) -> CatalogResult<Page<T>> {
        (**self).fetch_page(request).await
    }
}

#[cfg(test)]
mockall::mock! {
    pub PageSource<T: Send + Sync + 'static> {}

    #[async_trait]
    impl<T: Send + Sync + 'static> PageSource<T> for PageSource<T> {
        async fn fetch_page(&self, request: PageRequest) -> CatalogResult<Page<T>>;
    }
}
