use catalog_core::Keyed;
use serde::{Deserialize, Serialize};

use crate::item::{empty_as_none, CatalogItem, ItemKind};
use crate::thumbnail::Thumbnail;

pub type EventId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl Keyed for Event {
    type Key = EventId;

    fn key(&self) -> EventId {
        self.id
    }
}

impl CatalogItem for Event {
    const KIND: ItemKind = ItemKind::Event;

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
