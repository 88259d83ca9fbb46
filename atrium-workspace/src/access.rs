// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two access levels a workspace member can hold. `Write` is assumed to also contain `Read`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceAccess {
    /// Permission to see the workspace, its members and its entities.
    Read,

    /// Permission to change the workspace, including who has access to it.
    Write,
}

impl WorkspaceAccess {
    /// Access level is Read.
    pub fn is_read(&self) -> bool {
        matches!(self, WorkspaceAccess::Read)
    }

    /// Access level is Write.
    pub fn is_write(&self) -> bool {
        matches!(self, WorkspaceAccess::Write)
    }

    /// Returns `true` if this access level covers the required one.
    pub fn allows(&self, required: WorkspaceAccess) -> bool {
        *self >= required
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceAccess::Read => "read",
            WorkspaceAccess::Write => "write",
        }
    }
}

impl Display for WorkspaceAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkspaceAccess {
    type Err = AccessParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(WorkspaceAccess::Read),
            "write" => Ok(WorkspaceAccess::Write),
            _ => Err(AccessParseError(value.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown workspace access level: {0}")]
pub struct AccessParseError(String);

#[cfg(test)]
mod tests {
    use super::WorkspaceAccess;

    #[test]
    fn write_contains_read() {
        assert!(WorkspaceAccess::Write > WorkspaceAccess::Read);
        assert!(WorkspaceAccess::Write.allows(WorkspaceAccess::Read));
        assert!(WorkspaceAccess::Write.allows(WorkspaceAccess::Write));
        assert!(WorkspaceAccess::Read.allows(WorkspaceAccess::Read));
        assert!(!WorkspaceAccess::Read.allows(WorkspaceAccess::Write));
    }

    #[test]
    fn parse_access_level() {
        assert_eq!("read".parse::<WorkspaceAccess>().unwrap(), WorkspaceAccess::Read);
        assert_eq!("write".parse::<WorkspaceAccess>().unwrap(), WorkspaceAccess::Write);
        assert!("WRITE".parse::<WorkspaceAccess>().is_err());
        assert!("manage".parse::<WorkspaceAccess>().is_err());
        assert_eq!(WorkspaceAccess::Write.to_string(), "write");
    }
}
