use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog fetch errors
///
/// These stay internal to the soft-fail surface of
/// [`CatalogClient::fetch_agents`](crate::client::CatalogClient::fetch_agents);
/// callers that need them use `try_fetch_agents` instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog endpoint returned status {0}")]
    Http(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
