// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces of the collaborators a workspace repository relies on.
use std::error::Error;
use std::fmt::Display;

use atrium_graph::{Authorizations, Label};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Stable identifier of an ontology concept, used as vertex type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptId(String);

impl ConceptId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ConceptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of an ontology relationship type, used as edge type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipId(String);

impl RelationshipId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplies stable type identifiers for concepts and relationships.
///
/// Both methods are idempotent: calling them again with the same arguments returns the identifier
/// created by the first call.
pub trait OntologyStore {
    type Error: Error;

    fn get_or_create_concept(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<ConceptId, Self::Error>>;

    fn get_or_create_relationship_type(
        &self,
        from: &ConceptId,
        to: &ConceptId,
        name: &str,
    ) -> impl Future<Output = Result<RelationshipId, Self::Error>>;
}

/// A user known to the user store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
}

impl User {
    pub fn new(id: UserId, display_name: &str) -> Self {
        Self {
            id,
            display_name: display_name.to_owned(),
        }
    }
}

/// Manages users and the authorization tokens they hold.
pub trait UserStore {
    type Error: Error;

    /// Returns the user with this id, if known.
    fn user(&self, id: &UserId) -> impl Future<Output = Result<Option<User>, Self::Error>>;

    /// Grants a token to a user. Granting a token which is already held is a no-op.
    fn add_authorization(
        &self,
        id: &UserId,
        label: &Label,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Takes a token away from a user.
    ///
    /// Returns `false` if the user did not hold it.
    fn remove_authorization(
        &self,
        id: &UserId,
        label: &Label,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Returns every token the user holds.
    ///
    /// Unknown users hold no tokens.
    fn authorizations(
        &self,
        id: &UserId,
    ) -> impl Future<Output = Result<Authorizations, Self::Error>>;
}
