use thiserror::Error;

pub type ProvisionerResult<T> = Result<T, ProvisionerError>;

/// Provisioner operation errors
///
/// Every failure is fatal to the call that raised it; the caller decides
/// how to surface it.
#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Provisioner API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProvisionerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
