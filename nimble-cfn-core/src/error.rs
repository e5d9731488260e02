//! Error types and the static remote-error mapping table.
//!
//! Remote clients raise [`ServiceError`]. The handler never inspects error
//! messages; it looks the error's [`ServiceErrorKind`] up in [`classify`] and
//! either retries (transient kinds) or fails with the mapped [`ErrorKind`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a remote Nimble Studio client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal server error: {0}")]
    InternalServerError(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("service quota exceeded: {0}")]
    ServiceQuotaExceeded(String),

    #[error("throttled: {0}")]
    Throttling(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("validation failed: {0}")]
    Validation(String),

    /// Modeled service error without a more specific kind.
    #[error("service error: {0}")]
    Service(String),

    /// Anything the client could not classify (transport, decoding, ...).
    #[error("unexpected error: {0}")]
    Other(String),
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::AccessDenied(_) => ServiceErrorKind::AccessDenied,
            ServiceError::Conflict(_) => ServiceErrorKind::Conflict,
            ServiceError::InternalServerError(_) => ServiceErrorKind::InternalServerError,
            ServiceError::ResourceNotFound(_) => ServiceErrorKind::ResourceNotFound,
            ServiceError::ServiceQuotaExceeded(_) => ServiceErrorKind::ServiceQuotaExceeded,
            ServiceError::Throttling(_) => ServiceErrorKind::Throttling,
            ServiceError::ServiceUnavailable(_) => ServiceErrorKind::ServiceUnavailable,
            ServiceError::Validation(_) => ServiceErrorKind::Validation,
            ServiceError::Service(_) => ServiceErrorKind::Service,
            ServiceError::Other(_) => ServiceErrorKind::Other,
        }
    }

    /// Message reported by the service, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::AccessDenied(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::InternalServerError(msg)
            | ServiceError::ResourceNotFound(msg)
            | ServiceError::ServiceQuotaExceeded(msg)
            | ServiceError::Throttling(msg)
            | ServiceError::ServiceUnavailable(msg)
            | ServiceError::Validation(msg)
            | ServiceError::Service(msg)
            | ServiceError::Other(msg) => msg,
        }
    }

    /// Build an error of the given kind. Used by fault injection.
    pub fn from_kind(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ServiceErrorKind::AccessDenied => ServiceError::AccessDenied(message),
            ServiceErrorKind::Conflict => ServiceError::Conflict(message),
            ServiceErrorKind::InternalServerError => ServiceError::InternalServerError(message),
            ServiceErrorKind::ResourceNotFound => ServiceError::ResourceNotFound(message),
            ServiceErrorKind::ServiceQuotaExceeded => ServiceError::ServiceQuotaExceeded(message),
            ServiceErrorKind::Throttling => ServiceError::Throttling(message),
            ServiceErrorKind::ServiceUnavailable => ServiceError::ServiceUnavailable(message),
            ServiceErrorKind::Validation => ServiceError::Validation(message),
            ServiceErrorKind::Service => ServiceError::Service(message),
            ServiceErrorKind::Other => ServiceError::Other(message),
        }
    }
}

/// Fieldless mirror of [`ServiceError`], used as the mapping table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceErrorKind {
    AccessDenied,
    Conflict,
    InternalServerError,
    ResourceNotFound,
    ServiceQuotaExceeded,
    Throttling,
    ServiceUnavailable,
    Validation,
    Service,
    Other,
}

impl ServiceErrorKind {
    pub const ALL: [ServiceErrorKind; 10] = [
        ServiceErrorKind::AccessDenied,
        ServiceErrorKind::Conflict,
        ServiceErrorKind::InternalServerError,
        ServiceErrorKind::ResourceNotFound,
        ServiceErrorKind::ServiceQuotaExceeded,
        ServiceErrorKind::Throttling,
        ServiceErrorKind::ServiceUnavailable,
        ServiceErrorKind::Validation,
        ServiceErrorKind::Service,
        ServiceErrorKind::Other,
    ];
}

/// Error kinds reported in a failed progress event.
///
/// Serialized as the CloudFormation handler error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "NotFound")]
    NotFound,
    #[serde(rename = "Throttling")]
    Throttled,
    #[serde(rename = "ServiceInternalError")]
    ServiceInternal,
    #[serde(rename = "ServiceTimeout")]
    ServiceUnavailable,
    #[serde(rename = "InvalidRequest")]
    InvalidRequest,
    #[serde(rename = "AccessDenied")]
    AccessDenied,
    #[serde(rename = "ResourceConflict")]
    ResourceConflict,
    #[serde(rename = "ServiceLimitExceeded")]
    ServiceLimitExceeded,
    #[serde(rename = "GeneralServiceException")]
    GeneralService,
    #[serde(rename = "NotStabilized")]
    NotStabilized,
    #[serde(rename = "InternalFailure")]
    GenericInternal,
}

impl ErrorKind {
    /// Wire error code, as it appears in `errorCode`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Throttled => "Throttling",
            ErrorKind::ServiceInternal => "ServiceInternalError",
            ErrorKind::ServiceUnavailable => "ServiceTimeout",
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::AccessDenied => "AccessDenied",
            ErrorKind::ResourceConflict => "ResourceConflict",
            ErrorKind::ServiceLimitExceeded => "ServiceLimitExceeded",
            ErrorKind::GeneralService => "GeneralServiceException",
            ErrorKind::NotStabilized => "NotStabilized",
            ErrorKind::GenericInternal => "InternalFailure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// What the handler does with a remote error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Return `IN_PROGRESS` with backoff; the kind is reported if the
    /// orchestrator gives up.
    Retry(ErrorKind),
    /// Terminate with `FAILED`.
    Fail(ErrorKind),
}

impl Disposition {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Disposition::Retry(kind) | Disposition::Fail(kind) => *kind,
        }
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, Disposition::Retry(_))
    }
}

/// Static remote-error table. Every remote error kind maps to exactly one
/// disposition.
pub fn classify(kind: ServiceErrorKind) -> Disposition {
    match kind {
        ServiceErrorKind::AccessDenied => Disposition::Fail(ErrorKind::AccessDenied),
        ServiceErrorKind::Conflict => Disposition::Fail(ErrorKind::ResourceConflict),
        ServiceErrorKind::InternalServerError => Disposition::Fail(ErrorKind::ServiceInternal),
        ServiceErrorKind::ResourceNotFound => Disposition::Fail(ErrorKind::NotFound),
        ServiceErrorKind::ServiceQuotaExceeded => {
            Disposition::Fail(ErrorKind::ServiceLimitExceeded)
        }
        ServiceErrorKind::Throttling => Disposition::Retry(ErrorKind::Throttled),
        ServiceErrorKind::ServiceUnavailable => Disposition::Retry(ErrorKind::ServiceUnavailable),
        ServiceErrorKind::Validation => Disposition::Fail(ErrorKind::InvalidRequest),
        ServiceErrorKind::Service => Disposition::Fail(ErrorKind::GeneralService),
        ServiceErrorKind::Other => Disposition::Fail(ErrorKind::GenericInternal),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be at least 1 second")]
    ZeroDelay(&'static str),

    #[error("transient max delay ({max}s) is below the base delay ({base}s)")]
    InvertedBackoff { base: u32, max: u32 },
}
