pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod memory;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod view;

pub use config::{AppConfig, ApiConfig, PagingConfig};
pub use controller::{ControllerSettings, Effect, Input, PaginationController, Phase};
pub use error::CatalogError;
pub use logging::{LogEntry, Loggable};
pub use memory::MemorySource;
pub use pagination::{Page, PageRequest, PagingState, VisibilitySignal};
pub use result::CatalogResult;
pub use traits::{Keyed, PageSource};
pub use view::{ListingView, ViewSnapshot};
