//! Error taxonomy for a registration run.
//!
//! Every failure is terminal for the invocation. Each category maps to its
//! own process exit code so callers can tell them apart.

use crate::store::StoreError;
use crate::upstream::AddressError;
use std::process::ExitCode;

/// Why a registration failed
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    /// Missing or unrecognised command-line arguments
    #[error("usage error")]
    Usage(#[source] clap::Error),

    /// The address argument could not be parsed
    #[error("invalid upstream address")]
    Argument(#[from] AddressError),

    /// The store was unreachable or refused the write
    #[error("storage error")]
    Storage(#[from] StoreError),

    /// The record could not be encoded
    #[error("failed to encode upstream record")]
    Encode(#[from] serde_json::Error),

    /// The confirmation could not be written to stdout
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

impl RegistrarError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            RegistrarError::Usage(_) => 2,
            RegistrarError::Argument(_) => 3,
            RegistrarError::Storage(_) => 4,
            RegistrarError::Encode(_) | RegistrarError::Output(_) => 1,
        }
    }
}

impl From<clap::Error> for RegistrarError {
    fn from(err: clap::Error) -> Self {
        RegistrarError::Usage(err)
    }
}

impl From<&RegistrarError> for ExitCode {
    fn from(err: &RegistrarError) -> Self {
        ExitCode::from(err.exit_code())
    }
}
