pub mod character;
pub mod comic;
pub mod event;
pub mod header;
pub mod item;
pub mod listing;
pub mod thumbnail;

pub use character::{Character, CharacterId};
pub use comic::{Comic, ComicId};
pub use event::{Event, EventId};
pub use item::{CatalogItem, ItemKind};
pub use header::ListingHeader;
pub use listing::Listing;
pub use thumbnail::Thumbnail;
