//! Terminal failures of a lookup.

use thiserror::Error;

use crate::platform::error::{ApiError, TransportError};

#[derive(Debug, Error)]
pub enum LookupError {
    /// A resolver stage failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The org/space owning a group of routes could not be resolved.
    #[error("cannot find the space with GUID={space_guid}: {source}")]
    Target {
        space_guid: String,
        #[source]
        source: ApiError,
    },

    /// Switching the active context failed.
    #[error("error targeting {org}/{space}: {source}")]
    Retarget {
        org: String,
        space: String,
        #[source]
        source: TransportError,
    },
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
