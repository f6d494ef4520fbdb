pub mod auth;
pub mod client;
pub mod envelope;
pub mod source;

pub use auth::Credentials;
pub use client::{MarvelClient, MAX_PAGE_LIMIT};
pub use source::ListingSource;
