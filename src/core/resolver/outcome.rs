use crate::core::error::{SkinPackError, SkinPackResult};
use crate::core::username::Username;

/// Terminal result of one username → skin resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Raw image bytes, never empty.
    Ok(Vec<u8>),
    NotFound,
    UpstreamFailure,
    NetworkFailure,
}

impl ResolutionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::Ok(_) => "ok",
            ResolutionOutcome::NotFound => "not_found",
            ResolutionOutcome::UpstreamFailure => "upstream_failure",
            ResolutionOutcome::NetworkFailure => "network_failure",
        }
    }

    /// Fold into the crate error type, for callers that prefer `?`.
    pub fn into_result(self, username: &Username) -> SkinPackResult<Vec<u8>> {
        match self {
            ResolutionOutcome::Ok(bytes) => Ok(bytes),
            ResolutionOutcome::NotFound => {
                Err(SkinPackError::UsernameNotFound(username.to_string()))
            }
            ResolutionOutcome::UpstreamFailure => {
                Err(SkinPackError::UpstreamFailure(username.to_string()))
            }
            ResolutionOutcome::NetworkFailure => {
                Err(SkinPackError::NetworkFailure(username.to_string()))
            }
        }
    }
}
