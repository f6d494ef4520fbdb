use catalog_core::Keyed;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::thumbnail::Thumbnail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Character,
    Comic,
    Event,
}

impl ItemKind {
    /// Collection segment of the API path for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Character => "characters",
            Self::Comic => "comics",
            Self::Event => "events",
        }
    }

    pub fn detail_path(&self, id: u64) -> String {
        format!("{}/{}", self.collection(), id)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Character => "character",
            Self::Comic => "comic",
            Self::Event => "event",
        };
        f.write_str(name)
    }
}

/// An entry that can appear in a catalog listing.
pub trait CatalogItem:
    Keyed<Key = u64> + DeserializeOwned + Serialize + Clone + Send + Sync + 'static
{
    const KIND: ItemKind;

    fn display_name(&self) -> &str;

    fn description(&self) -> Option<&str>;

    fn thumbnail(&self) -> Option<&Thumbnail>;
}

/// The API sends `""` or `null` for missing descriptions.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
