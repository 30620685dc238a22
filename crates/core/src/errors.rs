use thiserror::Error;

use crate::dialog::SlotName;

/// Failures that end the invocation. Bad user input is not one of them; it is
/// answered with an `ElicitSlot` response instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Intent with name {intent_name} not supported")]
    UnsupportedIntent { intent_name: String },
    #[error("no portfolio recommendation for risk level `{risk_level}`")]
    UnmappedRiskLevel { risk_level: String },
    #[error("slot `{slot}` is required at fulfillment")]
    MissingSlot { slot: SlotName },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("event is not a valid intent request: {0}")]
    InvalidEvent(String),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("response could not be encoded: {0}")]
    Encode(String),
}

impl HandlerError {
    /// Stable identifier reported to the caller's runtime.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::InvalidEvent(_) => "invalid_event",
            Self::Dispatch(DispatchError::UnsupportedIntent { .. }) => "unsupported_intent",
            Self::Dispatch(DispatchError::UnmappedRiskLevel { .. }) => "unmapped_risk_level",
            Self::Dispatch(DispatchError::MissingSlot { .. }) => "missing_slot",
            Self::Encode(_) => "encode",
        }
    }
}
