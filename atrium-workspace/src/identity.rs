// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use atrium_graph::{ElementId, Label};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every workspace id.
///
/// Workspace ids double as the per-workspace visibility label, the prefix keeps them apart from
/// all other labels a user might hold.
pub const WORKSPACE_ID_PREFIX: &str = "WORKSPACE_";

/// Number of random bytes in a generated workspace id.
pub const WORKSPACE_ID_RANDOM_LEN: usize = 16;

/// Unique identifier of a workspace.
///
/// New ids are only ever generated by the repository, callers can parse existing ids from their
/// string representation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Generates a new id from 128 bits of the thread-local CSPRNG.
    pub(crate) fn generate() -> Self {
        let bytes: [u8; WORKSPACE_ID_RANDOM_LEN] = rand::random();
        Self(format!("{WORKSPACE_ID_PREFIX}{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The per-workspace visibility label.
    pub fn label(&self) -> Label {
        Label::new(self.0.as_str())
    }

    pub(crate) fn element_id(&self) -> ElementId {
        ElementId::new(self.0.as_str())
    }

    /// Id of the membership edge between this workspace and a user.
    ///
    /// Deriving it from both ends makes every write to that edge an upsert.
    pub(crate) fn membership_edge_id(&self, user_id: &UserId) -> ElementId {
        ElementId::new(format!("{}_to_{}", self.0, user_id.as_str()))
    }

    /// Id of the edge between this workspace and an entity.
    ///
    /// Never equal to a membership edge id, whatever the entity id is.
    pub(crate) fn entity_edge_id(&self, entity_id: &str) -> ElementId {
        ElementId::new(format!("{}_entity_{}", self.0, entity_id))
    }
}

impl Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkspaceId {
    type Err = WorkspaceIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some(suffix) = value.strip_prefix(WORKSPACE_ID_PREFIX) else {
            return Err(WorkspaceIdError::MissingPrefix(value.to_owned()));
        };

        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(WorkspaceIdError::InvalidSuffix(value.to_owned()));
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for WorkspaceId {
    type Error = WorkspaceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WorkspaceId> for String {
    fn from(value: WorkspaceId) -> Self {
        value.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceIdError {
    #[error("workspace id {0} does not start with the WORKSPACE_ prefix")]
    MissingPrefix(String),

    #[error("workspace id {0} contains invalid characters or is empty after the prefix")]
    InvalidSuffix(String),
}

/// Identifier of a user, as handed out by the user store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn element_id(&self) -> ElementId {
        ElementId::new(self.0.as_str())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
