use catalog_core::Keyed;
use serde::{Deserialize, Serialize};

use crate::item::{empty_as_none, CatalogItem, ItemKind};
use crate::thumbnail::Thumbnail;

pub type ComicId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    pub id: ComicId,
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub issue_number: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl Keyed for Comic {
    type Key = ComicId;

    fn key(&self) -> ComicId {
        self.id
    }
}

impl CatalogItem for Comic {
    const KIND: ItemKind = ItemKind::Comic;

    fn display_name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }
}
