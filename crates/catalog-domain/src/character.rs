use catalog_core::Keyed;
use serde::{Deserialize, Serialize};

use crate::item::{empty_as_none, CatalogItem, ItemKind};
use crate::thumbnail::Thumbnail;

pub type CharacterId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl Keyed for Character {
    type Key = CharacterId;

    fn key(&self) -> CharacterId {
        self.id
    }
}

impl CatalogItem for Character {
    const KIND: ItemKind = ItemKind::Character;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }
}
