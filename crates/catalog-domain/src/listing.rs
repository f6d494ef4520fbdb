//! Listing endpoints of the catalog.
//!
//! A listing is an offset/limit addressable collection. Every page of a
//! listing, including the pages after the first, comes from the same
//! endpoint.

use catalog_core::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::comic::ComicId;
use crate::event::EventId;
use crate::item::ItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "listing", content = "id", rename_all = "snake_case")]
pub enum Listing {
    Characters,
    Comics,
    Events,
    ComicCharacters(ComicId),
    ComicEvents(ComicId),
    EventCharacters(EventId),
}

impl Listing {
    pub fn item_kind(&self) -> ItemKind {
        match self {
            Self::Characters | Self::ComicCharacters(_) | Self::EventCharacters(_) => {
                ItemKind::Character
            }
            Self::Comics => ItemKind::Comic,
            Self::Events | Self::ComicEvents(_) => ItemKind::Event,
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Self::Characters => "characters".to_string(),
            Self::Comics => "comics".to_string(),
            Self::Events => "events".to_string(),
            Self::ComicCharacters(id) => format!("comics/{}/characters", id),
            Self::ComicEvents(id) => format!("comics/{}/events", id),
            Self::EventCharacters(id) => format!("events/{}/characters", id),
        }
    }

    /// The item whose detail heads this listing, if it is a sub-listing.
    pub fn parent(&self) -> Option<(ItemKind, u64)> {
        match self {
            Self::ComicCharacters(id) | Self::ComicEvents(id) => Some((ItemKind::Comic, *id)),
            Self::EventCharacters(id) => Some((ItemKind::Event, *id)),
            _ => None,
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Listing {
    type Err = CatalogError;

    fn from_str(s: &str) -> CatalogResult<Self> {
        let segments: Vec<&str> = s.trim().trim_matches('/').split('/').collect();
        let parse_id = |raw: &str| {
            raw.parse::<u64>()
                .map_err(|_| CatalogError::Validation(format!("invalid id '{}' in listing '{}'", raw, s)))
        };

        match segments.as_slice() {
            ["characters"] => Ok(Self::Characters),
            ["comics"] => Ok(Self::Comics),
            ["events"] => Ok(Self::Events),
            ["comics", id, "characters"] => Ok(Self::ComicCharacters(parse_id(*id)?)),
            ["comics", id, "events"] => Ok(Self::ComicEvents(parse_id(*id)?)),
            ["events", id, "characters"] => Ok(Self::EventCharacters(parse_id(*id)?)),
            _ => Err(CatalogError::Validation(format!(
                "unknown listing '{}' (expected characters, comics, events, comics/<id>/characters, comics/<id>/events or events/<id>/characters)",
                s
            ))),
        }
    }
}
