//! Chronicling America newspaper search integration
//!
//! Client for the Library of Congress Chronicling America title search API
//! (<https://chroniclingamerica.loc.gov>). No API key required.

mod client;
mod config;
mod error;
mod models;

pub use client::{ChroniclingAmericaClient, NewsClient};
pub use config::NewsConfig;
pub use error::NewsError;
pub use models::{NewsTitle, TitleSearchResults};
