//! Update-Location error types

use testcore_diameter::s6a::exp_result;
use testcore_diameter::{DiameterError, ResultCode};
use thiserror::Error;

use crate::store::StoreError;
use crate::ulr::UlrField;

/// Outcome code carried by a failure answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCode {
    /// Base protocol Result-Code
    Result(ResultCode),
    /// 3GPP Experimental-Result-Code
    Experimental(u32),
}

impl FailureCode {
    pub fn value(self) -> u32 {
        match self {
            FailureCode::Result(rc) => rc.code(),
            FailureCode::Experimental(code) => code,
        }
    }
}

/// Reasons a ULR is not answered with DIAMETER_SUCCESS
#[derive(Error, Debug)]
pub enum UlaError {
    #[error("Missing {0} in message")]
    MissingAvp(UlrField),

    #[error("ULR decode failed: {0}")]
    Decode(#[source] DiameterError),

    #[error("Unknown user {imsi}: {source}")]
    UserUnknown {
        imsi: String,
        #[source]
        source: StoreError,
    },

    #[error("Unknown subscriber profile: {profile} and default profile was not initialized")]
    UnknownEpsSubscription { profile: String },
}

impl UlaError {
    pub fn failure_code(&self) -> FailureCode {
        match self {
            UlaError::MissingAvp(_) => FailureCode::Result(ResultCode::MissingAvp),
            UlaError::Decode(_) => FailureCode::Result(ResultCode::UnableToComply),
            UlaError::UserUnknown { .. } => {
                FailureCode::Experimental(exp_result::ERROR_USER_UNKNOWN)
            }
            UlaError::UnknownEpsSubscription { .. } => {
                FailureCode::Experimental(exp_result::ERROR_UNKNOWN_EPS_SUBSCRIPTION)
            }
        }
    }

    /// Severity the ULR handler logs this error at
    pub fn log_level(&self) -> log::Level {
        match self {
            // Provisioning defect on our side, not a peer problem
            UlaError::UnknownEpsSubscription { .. } => log::Level::Error,
            _ => log::Level::Warn,
        }
    }
}
