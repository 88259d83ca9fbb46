// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory ontology and user stores.
//!
//! This does not persist data permamently, all changes are lost when the process ends. Use this
//! only in development or test contexts.
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use atrium_graph::{Authorizations, Label};
use tokio::sync::RwLock;
use tracing::trace;

use crate::UserId;
use crate::traits::{ConceptId, OntologyStore, RelationshipId, User, UserStore};

#[derive(Debug, Default)]
struct OntologyMemoryStoreInner {
    concepts: HashMap<String, ConceptId>,
    relationships: HashMap<(ConceptId, ConceptId, String), RelationshipId>,
}

/// In-memory ontology handing out name-derived identifiers.
#[derive(Clone, Debug, Default)]
pub struct OntologyMemoryStore {
    inner: Arc<RwLock<OntologyMemoryStoreInner>>,
}

impl OntologyMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct concepts and relationship types created so far.
    pub async fn len(&self) -> (usize, usize) {
        let inner = self.inner.read().await;
        (inner.concepts.len(), inner.relationships.len())
    }
}

impl OntologyStore for OntologyMemoryStore {
    type Error = Infallible;

    async fn get_or_create_concept(&self, name: &str) -> Result<ConceptId, Self::Error> {
        let mut inner = self.inner.write().await;
        let concept = inner
            .concepts
            .entry(name.to_owned())
            .or_insert_with(|| ConceptId::new(name));
        Ok(concept.clone())
    }

    async fn get_or_create_relationship_type(
        &self,
        from: &ConceptId,
        to: &ConceptId,
        name: &str,
    ) -> Result<RelationshipId, Self::Error> {
        let mut inner = self.inner.write().await;
        let relationship = inner
            .relationships
            .entry((from.clone(), to.clone(), name.to_owned()))
            .or_insert_with(|| RelationshipId::new(name));
        Ok(relationship.clone())
    }
}

#[derive(Debug, Default)]
struct UserMemoryStoreInner {
    users: HashMap<UserId, User>,
    authorizations: HashMap<UserId, Authorizations>,
}

/// In-memory user store keeping users and their authorization tokens.
#[derive(Clone, Debug, Default)]
pub struct UserMemoryStore {
    inner: Arc<RwLock<UserMemoryStoreInner>>,
}

impl UserMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user, returns `false` if a user with the same id existed and got replaced.
    pub async fn insert_user(&self, user: User) -> bool {
        let mut inner = self.inner.write().await;
        inner.users.insert(user.id.clone(), user).is_none()
    }
}

impl UserStore for UserMemoryStore {
    type Error = Infallible;

    async fn user(&self, id: &UserId) -> Result<Option<User>, Self::Error> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(id).cloned())
    }

    async fn add_authorization(&self, id: &UserId, label: &Label) -> Result<(), Self::Error> {
        let mut inner = self.inner.write().await;
        let inserted = inner
            .authorizations
            .entry(id.clone())
            .or_default()
            .insert(label.clone());
        if inserted {
            trace!(user_id = %id, %label, "granted authorization");
        }
        Ok(())
    }

    async fn remove_authorization(&self, id: &UserId, label: &Label) -> Result<bool, Self::Error> {
        let mut inner = self.inner.write().await;
        let removed = inner
            .authorizations
            .get_mut(id)
            .is_some_and(|authorizations| authorizations.remove(label));
        if removed {
            trace!(user_id = %id, %label, "removed authorization");
        }
        Ok(removed)
    }

    async fn authorizations(&self, id: &UserId) -> Result<Authorizations, Self::Error> {
        let inner = self.inner.read().await;
        Ok(inner.authorizations.get(id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use atrium_graph::{Authorizations, Label};

    use crate::UserId;
    use crate::traits::{OntologyStore, User, UserStore};

    use super::{OntologyMemoryStore, UserMemoryStore};

    #[tokio::test]
    async fn ontology_is_idempotent() {
        let ontology = OntologyMemoryStore::new();

        let workspace = ontology.get_or_create_concept("workspace").await.unwrap();
        let entity = ontology.get_or_create_concept("entity").await.unwrap();
        assert_eq!(ontology.get_or_create_concept("workspace").await.unwrap(), workspace);

        let relationship = ontology
            .get_or_create_relationship_type(&workspace, &entity, "workspaceToUser")
            .await
            .unwrap();
        let again = ontology
            .get_or_create_relationship_type(&workspace, &entity, "workspaceToUser")
            .await
            .unwrap();
        assert_eq!(relationship, again);
        assert_eq!(ontology.len().await, (2, 1));
    }

    #[tokio::test]
    async fn grant_and_remove_authorizations() {
        let users = UserMemoryStore::new();
        let alice = UserId::new("USER_alice");
        assert!(users.insert_user(User::new(alice.clone(), "Alice")).await);

        users.add_authorization(&alice, &Label::new("workspace")).await.unwrap();
        users.add_authorization(&alice, &Label::new("workspace")).await.unwrap();
        users.add_authorization(&alice, &Label::new("WORKSPACE_a")).await.unwrap();

        assert_eq!(
            users.authorizations(&alice).await.unwrap(),
            Authorizations::new([Label::new("workspace"), Label::new("WORKSPACE_a")])
        );

        assert!(users.remove_authorization(&alice, &Label::new("WORKSPACE_a")).await.unwrap());
        assert!(!users.remove_authorization(&alice, &Label::new("WORKSPACE_a")).await.unwrap());
        assert_eq!(users.authorizations(&alice).await.unwrap().len(), 1);

        let unknown = UserId::new("USER_unknown");
        assert!(users.authorizations(&unknown).await.unwrap().is_empty());
        assert_eq!(users.user(&unknown).await.unwrap(), None);
    }
}
