//! Client-facing error taxonomy.
//!
//! Whatever the transport reports, callers only ever see one of the five
//! [`ServiceError`] kinds.

use crate::service::{StatusCode, TransportFailure};
use thiserror::Error;

/// Errors delivered by the service adapter.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The resource does not exist, already exists, or a server-side
    /// precondition failed.
    #[error("{0}")]
    Invalid(String),

    /// Missing permission or credentials.
    #[error("{0}")]
    Restricted(String),

    /// Transient or internal failure on the remote side.
    #[error("{0}")]
    ServerError(String),

    /// The request itself was malformed.
    #[error("{0}")]
    BadArgument(String),

    /// Anything else, including local encode and decode failures.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl ServiceError {
    /// Short kind name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "invalid",
            Self::Restricted(_) => "restricted",
            Self::ServerError(_) => "server_error",
            Self::BadArgument(_) => "bad_argument",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::Invalid(msg)
            | Self::Restricted(msg)
            | Self::ServerError(msg)
            | Self::BadArgument(msg)
            | Self::Unknown(msg) => msg,
        }
    }
}

impl From<TransportFailure> for ServiceError {
    fn from(failure: TransportFailure) -> Self {
        let TransportFailure { code, message } = failure;
        match code {
            StatusCode::Cancelled
            | StatusCode::DeadlineExceeded
            | StatusCode::ResourceExhausted
            | StatusCode::Unimplemented
            | StatusCode::Internal
            | StatusCode::DataLoss => Self::ServerError(message),

            StatusCode::NotFound
            | StatusCode::AlreadyExists
            | StatusCode::FailedPrecondition
            | StatusCode::Aborted
            | StatusCode::OutOfRange
            | StatusCode::Unavailable => Self::Invalid(message),

            StatusCode::PermissionDenied | StatusCode::Unauthenticated => {
                Self::Restricted(message)
            }

            StatusCode::InvalidArgument => Self::BadArgument(message),

            StatusCode::Unknown => Self::Unknown(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: StatusCode) -> ServiceError {
        TransportFailure::new(code, "msg").into()
    }

    #[test]
    fn permission_failures_are_restricted() {
        assert_eq!(
            map(StatusCode::PermissionDenied),
            ServiceError::Restricted("msg".into())
        );
        assert_eq!(
            map(StatusCode::Unauthenticated),
            ServiceError::Restricted("msg".into())
        );
    }

    #[test]
    fn mapping_covers_every_code() {
        let expected = [
            (StatusCode::Cancelled, "server_error"),
            (StatusCode::Unknown, "unknown"),
            (StatusCode::InvalidArgument, "bad_argument"),
            (StatusCode::DeadlineExceeded, "server_error"),
            (StatusCode::NotFound, "invalid"),
            (StatusCode::AlreadyExists, "invalid"),
            (StatusCode::PermissionDenied, "restricted"),
            (StatusCode::Unauthenticated, "restricted"),
            (StatusCode::ResourceExhausted, "server_error"),
            (StatusCode::FailedPrecondition, "invalid"),
            (StatusCode::Aborted, "invalid"),
            (StatusCode::OutOfRange, "invalid"),
            (StatusCode::Unimplemented, "server_error"),
            (StatusCode::Internal, "server_error"),
            (StatusCode::Unavailable, "invalid"),
            (StatusCode::DataLoss, "server_error"),
        ];
        assert_eq!(expected.len(), StatusCode::ALL.len());

        for (code, kind) in expected {
            assert_eq!(map(code).kind(), kind, "code {code}");
        }
    }

    #[test]
    fn mapping_is_deterministic() {
        for code in StatusCode::ALL {
            assert_eq!(map(code), map(code));
        }
    }

    #[test]
    fn message_is_preserved() {
        let err: ServiceError =
            TransportFailure::new(StatusCode::NotFound, "Page not found").into();
        assert_eq!(err.message(), "Page not found");
        assert_eq!(err.to_string(), "Page not found");
    }
}
