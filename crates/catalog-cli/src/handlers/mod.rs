pub mod config;
pub mod page;
pub mod scroll;
pub mod show;
