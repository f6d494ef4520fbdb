use catalog_core::Keyed;
use serde::Serialize;

use crate::item::{CatalogItem, ItemKind};
use crate::thumbnail::PORTRAIT_UNCANNY;

/// The parent comic or event shown above a sub-listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingHeader {
    pub kind: ItemKind,
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl ListingHeader {
    pub fn from_item<T: CatalogItem>(item: &T) -> Self {
        Self {
            kind: T::KIND,
            id: item.key(),
            title: item.display_name().to_string(),
            description: item.description().map(str::to_string),
            banner: item.thumbnail().map(|t| t.url(PORTRAIT_UNCANNY)),
        }
    }
}
