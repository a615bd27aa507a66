//! Error taxonomy for lookups.
//!
//! The controller and the lookup client return [`LookupError`] so callers can
//! tell a rejected input from a failed service call or a storage failure.
//! Application edges (config, CLI) keep using `anyhow`.

use thiserror::Error;

/// Which inference service a network error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Gender,
    Age,
    Nationality,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Service::Gender => "gender",
            Service::Age => "age",
            Service::Nationality => "nationality",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("{service} service request failed: {source}")]
    Network {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} service returned HTTP {status}")]
    Status {
        service: Service,
        status: reqwest::StatusCode,
    },

    #[error("{service} service returned a malformed response: {source}")]
    Decode {
        service: Service,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl LookupError {
    /// True for failures of the remote services (as opposed to input or storage).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            LookupError::Network { .. } | LookupError::Status { .. } | LookupError::Decode { .. }
        )
    }
}
