// ABOUTME: Agent catalog client with payload normalization and selection state
// ABOUTME: Fetches agent metadata, filters hidden entries, sorts by usage

pub mod client;
pub mod error;
pub mod selection;
pub mod types;

pub use client::{CatalogClient, CatalogConfig};
pub use error::CatalogError;
pub use selection::SelectionSet;
pub use types::{recommended, Agent};
