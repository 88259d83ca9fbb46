// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use atrium_graph::{Authorizations, GraphMemoryStore, GraphStore, Label};
use thiserror::Error;

use crate::memory::{OntologyMemoryStore, UserMemoryStore};
use crate::traits::{User, UserStore};
use crate::{Config, UserId, WorkspaceRepository};

pub type TestRepository<U = UserMemoryStore> = WorkspaceRepository<GraphMemoryStore, U>;

pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Repository on in-memory stores with two registered users.
pub struct Fixture<U = UserMemoryStore> {
    pub graph: GraphMemoryStore,
    pub users: U,
    pub repository: TestRepository<U>,
    pub user_1: UserId,
    pub user_2: UserId,
}

impl Fixture<UserMemoryStore> {
    pub async fn new() -> Self {
        let users = UserMemoryStore::new();
        Self::with_users(users.clone(), users).await
    }
}

impl Fixture<FaultyUserStore> {
    pub async fn faulty() -> Self {
        let inner = UserMemoryStore::new();
        Self::with_users(FaultyUserStore::new(inner.clone()), inner).await
    }
}

impl<U> Fixture<U>
where
    U: UserStore + Clone,
{
    async fn with_users(users: U, registry: UserMemoryStore) -> Self {
        setup_logging();

        let user_1 = UserId::new("USER_testUser1");
        let user_2 = UserId::new("USER_testUser2");
        registry
            .insert_user(User::new(user_1.clone(), "Test User 1"))
            .await;
        registry
            .insert_user(User::new(user_2.clone(), "Test User 2"))
            .await;

        let graph = GraphMemoryStore::new();
        let repository = WorkspaceRepository::new(
            graph.clone(),
            users.clone(),
            &OntologyMemoryStore::new(),
            Config::default(),
        )
        .await
        .unwrap_or_else(|err| match err {});

        Self {
            graph,
            users,
            repository,
            user_1,
            user_2,
        }
    }

    /// Current number of vertices and edges in the graph.
    pub async fn counts(&self) -> (usize, usize) {
        (
            self.graph.vertices_len().await.unwrap(),
            self.graph.edges_len().await.unwrap(),
        )
    }
}

#[derive(Debug, Error)]
#[error("user store is unavailable")]
pub struct UserStoreUnavailable;

/// User store which can be switched into failing every token grant and removal.
#[derive(Clone, Debug)]
pub struct FaultyUserStore {
    inner: UserMemoryStore,
    failing: Arc<AtomicBool>,
}

impl FaultyUserStore {
    pub fn new(inner: UserMemoryStore) -> Self {
        Self {
            inner,
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), UserStoreUnavailable> {
        if self.failing.load(Ordering::SeqCst) {
            Err(UserStoreUnavailable)
        } else {
            Ok(())
        }
    }
}

impl UserStore for FaultyUserStore {
    type Error = UserStoreUnavailable;

    async fn user(&self, id: &UserId) -> Result<Option<User>, Self::Error> {
        Ok(self.inner.user(id).await.unwrap_or_else(|err| match err {}))
    }

    async fn add_authorization(&self, id: &UserId, label: &Label) -> Result<(), Self::Error> {
        self.check()?;
        self.inner
            .add_authorization(id, label)
            .await
            .unwrap_or_else(|err| match err {});
        Ok(())
    }

    async fn remove_authorization(&self, id: &UserId, label: &Label) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(self
            .inner
            .remove_authorization(id, label)
            .await
            .unwrap_or_else(|err| match err {}))
    }

    async fn authorizations(&self, id: &UserId) -> Result<Authorizations, Self::Error> {
        Ok(self
            .inner
            .authorizations(id)
            .await
            .unwrap_or_else(|err| match err {}))
    }
}
