use thiserror::Error;

/// Failures a single search can end with.
///
/// None of these is fatal to the process: each one maps to a failure for
/// the request that produced it.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The geocoder returned no candidates for the address.
    #[error("address not found: {address}")]
    AddressNotFound { address: String },

    /// Missing coordinates, out-of-range values or a non-positive distance.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Transport, HTTP or decoding failure from one of the collaborators.
    #[error("{collaborator} is unavailable: {source:#}")]
    UpstreamUnavailable {
        collaborator: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SearchError {
    pub fn invalid_filter<S: Into<String>>(message: S) -> Self {
        Self::InvalidFilter(message.into())
    }

    /// Wrap a collaborator failure.
    ///
    /// # Arguments
    /// * `collaborator` - Name of the failing service (e.g., "overpass")
    /// * `source` - Underlying transport or decoding error
    pub fn upstream<S: Into<String>>(collaborator: S, source: anyhow::Error) -> Self {
        Self::UpstreamUnavailable {
            collaborator: collaborator.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
