use crate::pagination::{Page, PageRequest};
use crate::traits::PageSource;
use crate::{CatalogError, CatalogResult};
use async_trait::async_trait;

/// Serves pages out of an in-memory list. Used for fixtures and offline runs.
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    items: Vec<T>,
}

impl<T: Clone> MemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn total(&self) -> u32 {
        self.items.len() as u32
    }

    pub fn page(&self, request: PageRequest) -> CatalogResult<Page<T>> {
        if request.limit == 0 {
            return Err(CatalogError::Validation(
                "limit must be greater than zero".to_string(),
            ));
        }
        let total = self.total();
        let range = request.range(total);
        let results = self.items[range.start as usize..range.end as usize].to_vec();
        Ok(Page::new(request.offset, request.limit, total, results))
    }
}

#[async_trait]
impl<T> PageSource<T> for MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> CatalogResult<Page<T>> {
        self.page(request)
    }
}
