// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error as StdError;

use thiserror::Error;

use crate::{UserId, WorkspaceId};

/// Errors returned by the workspace repository.
///
/// `G` and `U` are the error types of the graph and the user store.
#[derive(Debug, Error)]
pub enum WorkspaceError<G, U>
where
    G: StdError,
    U: StdError,
{
    /// The acting user lacks WRITE access on the workspace they tried to change.
    #[error("user {user} is not allowed to change workspace {resource_id}")]
    AccessDenied {
        user: UserId,
        resource_id: WorkspaceId,
    },

    /// The workspace does not exist or is not visible to the requester.
    #[error("workspace {0} not found")]
    NotFound(WorkspaceId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("graph store error: {0}")]
    Graph(G),

    #[error("user store error: {0}")]
    Users(U),
}
