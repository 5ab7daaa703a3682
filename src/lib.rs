//! This is the library of the labelbot GitHub app.
pub mod bot;
pub mod config;
pub mod github;
pub mod permissions;
pub mod utils;
