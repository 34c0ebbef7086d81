//! Shared error type across hostgate crates.

use thiserror::Error;

use crate::host::{HostId, ListKind};

/// Which side of a two-party request failed a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// The host whose policy is being read or changed.
    This,
    /// The referenced host (friend, banned host).
    Other,
}

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Host already registered.
    Conflict,
    /// The addressed host has no record.
    NotFoundThis,
    /// The referenced host has no record.
    NotFoundOther,
    /// Removal target is not on the list.
    NotListed,
    /// Invalid input (self reference, empty id, bad config).
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Conflict => "CONFLICT",
            ClientCode::NotFoundThis => "NOT_FOUND_THIS",
            ClientCode::NotFoundOther => "NOT_FOUND_OTHER",
            ClientCode::NotListed => "NOT_LISTED",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HostgateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum HostgateError {
    #[error("host already exists: {0}")]
    AlreadyExists(HostId),
    #[error("host not found: {id}")]
    NotFound { party: Party, id: HostId },
    #[error("{member} is not in {list} of {host}")]
    NotListed {
        list: ListKind,
        host: HostId,
        member: HostId,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("storage: {0}")]
    Storage(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl HostgateError {
    pub(crate) fn not_found_this(id: &HostId) -> Self {
        HostgateError::NotFound { party: Party::This, id: id.clone() }
    }

    pub(crate) fn not_found_other(id: &HostId) -> Self {
        HostgateError::NotFound { party: Party::Other, id: id.clone() }
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HostgateError::AlreadyExists(_) => ClientCode::Conflict,
            HostgateError::NotFound { party: Party::This, .. } => ClientCode::NotFoundThis,
            HostgateError::NotFound { party: Party::Other, .. } => ClientCode::NotFoundOther,
            HostgateError::NotListed { .. } => ClientCode::NotListed,
            HostgateError::InvalidArgument(_)
            | HostgateError::Config(_)
            | HostgateError::UnsupportedVersion => ClientCode::BadRequest,
            HostgateError::Storage(_) | HostgateError::Internal(_) => ClientCode::Internal,
        }
    }
}
