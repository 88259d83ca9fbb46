// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-user workspaces on top of a labelled property graph.
//!
//! A workspace is a vertex in an [`atrium_graph`] store, owned by the user who created it and
//! selectively shared with other users at [`WorkspaceAccess::Read`] or
//! [`WorkspaceAccess::Write`] level. Who may see a workspace is decided purely by visibility
//! labels: every workspace element is tagged with a global workspace label and with the
//! workspace id, users are issued both as authorization tokens when a workspace is created by or
//! shared with them. Who may change a workspace is decided by membership edges between the
//! workspace and its users.
//!
//! ```rust
//! # use atrium_graph::GraphMemoryStore;
//! # use atrium_workspace::memory::{OntologyMemoryStore, UserMemoryStore};
//! # use atrium_workspace::{Config, User, UserId, WorkspaceAccess, WorkspaceRepository};
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let users = UserMemoryStore::new();
//! let alice = UserId::new("USER_alice");
//! let bob = UserId::new("USER_bob");
//! users.insert_user(User::new(alice.clone(), "Alice")).await;
//! users.insert_user(User::new(bob.clone(), "Bob")).await;
//!
//! let repository = WorkspaceRepository::new(
//!     GraphMemoryStore::new(),
//!     users,
//!     &OntologyMemoryStore::new(),
//!     Config::default(),
//! )
//! .await
//! .unwrap();
//!
//! let workspace = repository.add("Investigation", &alice).await.unwrap();
//!
//! // Bob can't see the workspace until Alice shares it with him.
//! assert!(repository.find_by_id(workspace.id(), &bob).await.unwrap().is_none());
//!
//! repository
//!     .update_user_on_workspace(&workspace, &bob, WorkspaceAccess::Read, &alice)
//!     .await
//!     .unwrap();
//! assert!(repository.find_by_id(workspace.id(), &bob).await.unwrap().is_some());
//! # }
//! ```
//!
//! The graph store, the user store holding authorization tokens and the ontology handing out type
//! identifiers are collaborators behind the [`GraphStore`](atrium_graph::GraphStore),
//! [`UserStore`] and [`OntologyStore`] traits. In-memory implementations are available behind
//! the `memory` feature flag which is enabled by default.
mod access;
mod config;
mod error;
mod identity;
#[cfg(feature = "memory")]
pub mod memory;
mod repository;
#[cfg(all(any(test, feature = "test_utils"), feature = "memory"))]
pub mod test_utils;
pub mod traits;
mod workspace;

pub use access::{AccessParseError, WorkspaceAccess};
pub use config::{Config, DEFAULT_VISIBILITY_LABEL};
pub use error::WorkspaceError;
pub use identity::{UserId, WORKSPACE_ID_PREFIX, WorkspaceId, WorkspaceIdError};
pub use repository::{RepositoryError, WorkspaceRepository};
pub use traits::{ConceptId, OntologyStore, RelationshipId, User, UserStore};
pub use workspace::{GraphPosition, Workspace, WorkspaceEntity, WorkspaceUser};
