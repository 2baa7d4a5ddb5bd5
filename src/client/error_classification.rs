//! Error classification logic

use crate::error::ApiErrorKind;

/// Outcome class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    UserError,
    ServerError,
    /// Outside `[200, 600)`: informational codes, the `0` some transports
    /// report for a dead connection, or nonsense.
    Unknown,
}

impl StatusClass {
    /// The error kind to raise for this class, `None` for success.
    pub fn error_kind(self) -> Option<ApiErrorKind> {
        match self {
            Self::Success => None,
            Self::UserError => Some(ApiErrorKind::UserError),
            Self::ServerError => Some(ApiErrorKind::ServerError),
            Self::Unknown => Some(ApiErrorKind::UnknownStatus),
        }
    }
}

pub fn classify(status: u16) -> StatusClass {
    match status {
        200..=399 => StatusClass::Success,
        400..=499 => StatusClass::UserError,
        500..=599 => StatusClass::ServerError,
        _ => StatusClass::Unknown,
    }
}
