// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workspace creation, sharing and authorization-filtered queries.
use atrium_graph::{Authorizations, Edge, ElementId, GraphStore, Visibility, Vertex};
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::WorkspaceError;
use crate::identity::WORKSPACE_ID_PREFIX;
use crate::traits::{ConceptId, OntologyStore, RelationshipId, UserStore};
use crate::workspace::{
    ACCESS_PROPERTY, GRAPH_POSITION_X_PROPERTY, GRAPH_POSITION_Y_PROPERTY, TITLE_PROPERTY,
    VISIBLE_PROPERTY,
};
use crate::{
    GraphPosition, UserId, Workspace, WorkspaceAccess, WorkspaceEntity, WorkspaceId, WorkspaceUser,
};

/// Error returned by [`WorkspaceRepository`] for the given graph and user store.
pub type RepositoryError<G, U> =
    WorkspaceError<<G as GraphStore>::Error, <U as UserStore>::Error>;

/// Type identifiers resolved through the ontology once, when the repository is created.
#[derive(Clone, Debug)]
struct WorkspaceTypes {
    workspace_concept: ConceptId,
    workspace_to_user: RelationshipId,
    workspace_to_entity: RelationshipId,
}

/// Creates workspaces, manages who can access them and answers queries on behalf of a requester.
///
/// Every workspace vertex and every edge starting at it carries two visibility labels: the global
/// workspace label and the workspace id itself. Users are granted both as authorization tokens
/// when they create a workspace or when it gets shared with them. Reads are executed with the
/// requester's own tokens, so a workspace which exists but is not shared with the requester is
/// reported exactly like a workspace which does not exist.
///
/// Changes to a workspace require a membership edge with WRITE access and fail with
/// [`WorkspaceError::AccessDenied`] otherwise.
///
/// The repository holds no locks. Every call to a store is expected to be atomic on its own and
/// edges are keyed by (workspace, target) so concurrent writes to the same pair converge on one
/// edge.
#[derive(Clone, Debug)]
pub struct WorkspaceRepository<G, U> {
    graph: G,
    users: U,
    config: Config,
    types: WorkspaceTypes,
}

impl<G, U> WorkspaceRepository<G, U>
where
    G: GraphStore,
    U: UserStore,
{
    /// Creates a repository, resolving the concept and relationship types it needs through the
    /// ontology.
    pub async fn new<O>(graph: G, users: U, ontology: &O, config: Config) -> Result<Self, O::Error>
    where
        O: OntologyStore,
    {
        let workspace_concept = ontology
            .get_or_create_concept(&config.workspace_concept)
            .await?;
        let entity_concept = ontology.get_or_create_concept(&config.entity_concept).await?;
        let workspace_to_user = ontology
            .get_or_create_relationship_type(
                &workspace_concept,
                &entity_concept,
                &config.workspace_to_user_relationship,
            )
            .await?;
        let workspace_to_entity = ontology
            .get_or_create_relationship_type(
                &workspace_concept,
                &entity_concept,
                &config.workspace_to_entity_relationship,
            )
            .await?;

        Ok(Self {
            graph,
            users,
            config,
            types: WorkspaceTypes {
                workspace_concept,
                workspace_to_user,
                workspace_to_entity,
            },
        })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates a new workspace owned by `creator`.
    ///
    /// The creator receives a membership edge with WRITE access and the tokens to read the
    /// workspace. When granting the tokens fails, the workspace is removed again.
    pub async fn add(
        &self,
        title: &str,
        creator: &UserId,
    ) -> Result<Workspace, RepositoryError<G, U>> {
        let title = Self::validate_title(title)?;
        let id = WorkspaceId::generate();

        let vertex = Vertex::new(
            id.element_id(),
            self.types.workspace_concept.as_str(),
            self.visibility(&id),
        )
        .with_property(TITLE_PROPERTY, title);
        self.graph
            .add_vertex(vertex)
            .await
            .map_err(WorkspaceError::Graph)?;

        let edge = self.membership_edge(&id, creator, WorkspaceAccess::Write);
        if let Err(err) = self.graph.put_edge(edge).await {
            self.remove_workspace_vertex(&id).await;
            return Err(WorkspaceError::Graph(err));
        }

        if let Err(err) = self.grant(&id, creator).await {
            self.remove_workspace_vertex(&id).await;
            return Err(WorkspaceError::Users(err));
        }

        debug!(workspace_id = %id, %creator, "created workspace");
        Ok(Workspace::new(id, title))
    }

    /// Returns the workspace if it exists and the requester is allowed to read it.
    ///
    /// `None` is returned in both other cases, they are deliberately indistinguishable.
    pub async fn find_by_id(
        &self,
        id: &WorkspaceId,
        requester: &UserId,
    ) -> Result<Option<Workspace>, RepositoryError<G, U>> {
        let authorizations = self.workspace_authorizations(id, requester).await?;
        let vertex = self
            .graph
            .vertex(&id.element_id(), &authorizations)
            .await
            .map_err(WorkspaceError::Graph)?;

        trace!(workspace_id = %id, %requester, found = vertex.is_some(), "find workspace");
        Ok(vertex
            .filter(|vertex| vertex.vertex_type == self.types.workspace_concept.as_str())
            .as_ref()
            .and_then(Workspace::from_vertex))
    }

    /// Returns all workspaces the requester is allowed to read, in no particular order.
    pub async fn find_all(
        &self,
        requester: &UserId,
    ) -> Result<Vec<Workspace>, RepositoryError<G, U>> {
        let held = self
            .users
            .authorizations(requester)
            .await
            .map_err(WorkspaceError::Users)?;
        let global = self.config.visibility_label();
        let authorizations = held
            .restrict(|label| label == global || label.as_str().starts_with(WORKSPACE_ID_PREFIX));

        let vertices = self
            .graph
            .vertices_by_type(self.types.workspace_concept.as_str(), &authorizations)
            .await
            .map_err(WorkspaceError::Graph)?;

        trace!(%requester, count = vertices.len(), "find all workspaces");
        Ok(vertices.iter().filter_map(Workspace::from_vertex).collect())
    }

    /// Gives a user the given access level on a workspace.
    ///
    /// The acting user needs WRITE access. An existing membership of the user is updated in
    /// place, calling this repeatedly with the same arguments has the same effect as calling it
    /// once. Either both the membership edge and the user's tokens are in place afterwards or,
    /// on error, the membership is left as it was.
    pub async fn update_user_on_workspace(
        &self,
        workspace: &Workspace,
        user_id: &UserId,
        access: WorkspaceAccess,
        acting_user: &UserId,
    ) -> Result<(), RepositoryError<G, U>> {
        let authorizations = self.ensure_write_access(workspace, acting_user).await?;

        let user = self
            .users
            .user(user_id)
            .await
            .map_err(WorkspaceError::Users)?;
        if user.is_none() {
            return Err(WorkspaceError::InvalidArgument(format!(
                "unknown user {user_id}"
            )));
        }

        if !access.is_write() {
            self.ensure_remaining_writer(workspace, user_id, &authorizations)
                .await?;
        }

        let edge = self.membership_edge(workspace.id(), user_id, access);
        let edge_id = edge.id.clone();
        let previous = self
            .graph
            .put_edge(edge)
            .await
            .map_err(WorkspaceError::Graph)?;

        if !access.is_write() {
            self.ensure_writer_after_change(workspace, &edge_id, previous.clone(), &authorizations)
                .await?;
        }

        if let Err(err) = self.grant(workspace.id(), user_id).await {
            self.restore_edge(&edge_id, previous).await;
            return Err(WorkspaceError::Users(err));
        }

        debug!(
            workspace_id = %workspace.id(),
            %user_id,
            %access,
            %acting_user,
            "updated user on workspace"
        );
        Ok(())
    }

    /// Takes away a user's access to a workspace.
    ///
    /// The acting user needs WRITE access. Removes the membership edge together with the user's
    /// token for this workspace, if removing the token fails the edge is restored. Removing a user
    /// who is not a member does nothing. The last member with WRITE access can not be removed.
    pub async fn delete_user_from_workspace(
        &self,
        workspace: &Workspace,
        user_id: &UserId,
        acting_user: &UserId,
    ) -> Result<(), RepositoryError<G, U>> {
        let authorizations = self.ensure_write_access(workspace, acting_user).await?;
        self.ensure_remaining_writer(workspace, user_id, &authorizations)
            .await?;

        let edge_id = workspace.id().membership_edge_id(user_id);
        let Some(previous) = self
            .graph
            .remove_edge(&edge_id)
            .await
            .map_err(WorkspaceError::Graph)?
        else {
            return Ok(());
        };
        self.ensure_writer_after_change(workspace, &edge_id, Some(previous.clone()), &authorizations)
            .await?;

        if let Err(err) = self
            .users
            .remove_authorization(user_id, &workspace.id().label())
            .await
        {
            self.restore_edge(&edge_id, Some(previous)).await;
            return Err(WorkspaceError::Users(err));
        }

        debug!(
            workspace_id = %workspace.id(),
            %user_id,
            %acting_user,
            "deleted user from workspace"
        );
        Ok(())
    }

    /// Returns every user with access to the workspace and their access level.
    ///
    /// Fails with [`WorkspaceError::NotFound`] if the requester can not read the workspace.
    pub async fn find_users_with_access(
        &self,
        workspace: &Workspace,
        requester: &UserId,
    ) -> Result<Vec<WorkspaceUser>, RepositoryError<G, U>> {
        let authorizations = self.ensure_read_access(workspace, requester).await?;
        self.memberships(workspace.id(), &authorizations)
            .await
            .map_err(WorkspaceError::Graph)
    }

    /// Renames a workspace. The acting user needs WRITE access.
    pub async fn set_title(
        &self,
        workspace: &Workspace,
        title: &str,
        acting_user: &UserId,
    ) -> Result<Workspace, RepositoryError<G, U>> {
        let authorizations = self.ensure_write_access(workspace, acting_user).await?;
        let title = Self::validate_title(title)?;

        let updated = self
            .graph
            .set_vertex_property(
                &workspace.id().element_id(),
                TITLE_PROPERTY,
                title.into(),
                &authorizations,
            )
            .await
            .map_err(WorkspaceError::Graph)?;
        if !updated {
            return Err(WorkspaceError::NotFound(workspace.id().clone()));
        }

        debug!(workspace_id = %workspace.id(), %acting_user, "set workspace title");
        Ok(Workspace::new(workspace.id().clone(), title))
    }

    /// Adds an entity to a workspace or updates how it is shown there.
    ///
    /// The acting user needs WRITE access. There is at most one entry per entity and workspace.
    pub async fn update_entity_on_workspace(
        &self,
        workspace: &Workspace,
        entity_id: &str,
        visible: bool,
        graph_position: Option<GraphPosition>,
        acting_user: &UserId,
    ) -> Result<(), RepositoryError<G, U>> {
        if entity_id.trim().is_empty() {
            return Err(WorkspaceError::InvalidArgument(
                "entity id must not be empty".to_owned(),
            ));
        }
        self.ensure_write_access(workspace, acting_user).await?;

        let id = workspace.id();
        let mut edge = Edge::new(
            id.entity_edge_id(entity_id),
            id.element_id(),
            ElementId::new(entity_id),
            self.types.workspace_to_entity.as_str(),
            self.visibility(id),
        )
        .with_property(VISIBLE_PROPERTY, visible);
        if let Some(position) = graph_position {
            edge = edge
                .with_property(GRAPH_POSITION_X_PROPERTY, position.x)
                .with_property(GRAPH_POSITION_Y_PROPERTY, position.y);
        }

        self.graph
            .put_edge(edge)
            .await
            .map_err(WorkspaceError::Graph)?;

        debug!(workspace_id = %id, entity_id, visible, "updated entity on workspace");
        Ok(())
    }

    /// Returns all entities of a workspace.
    ///
    /// Fails with [`WorkspaceError::NotFound`] if the requester can not read the workspace.
    pub async fn find_entities(
        &self,
        workspace: &Workspace,
        requester: &UserId,
    ) -> Result<Vec<WorkspaceEntity>, RepositoryError<G, U>> {
        let authorizations = self.ensure_read_access(workspace, requester).await?;
        let edges = self
            .graph
            .edges_from(&workspace.id().element_id(), &authorizations)
            .await
            .map_err(WorkspaceError::Graph)?;

        Ok(edges
            .iter()
            .filter(|edge| edge.edge_type == self.types.workspace_to_entity.as_str())
            .map(WorkspaceEntity::from_edge)
            .collect())
    }

    /// Returns `true` if the user holds a membership with WRITE access on the workspace.
    pub async fn has_write_permissions(
        &self,
        workspace: &Workspace,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError<G, U>> {
        let authorizations = self.workspace_authorizations(workspace.id(), user_id).await?;
        let access = self
            .access(workspace.id(), user_id, &authorizations)
            .await
            .map_err(WorkspaceError::Graph)?;
        Ok(access.is_some_and(|access| access.allows(WorkspaceAccess::Write)))
    }

    /// Returns `true` if the user is allowed to read the workspace.
    pub async fn has_read_permissions(
        &self,
        workspace: &Workspace,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError<G, U>> {
        Ok(self.find_by_id(workspace.id(), user_id).await?.is_some())
    }

    fn validate_title(title: &str) -> Result<&str, RepositoryError<G, U>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WorkspaceError::InvalidArgument(
                "workspace title must not be empty".to_owned(),
            ));
        }
        Ok(title)
    }

    fn visibility(&self, id: &WorkspaceId) -> Visibility {
        Visibility::new([self.config.visibility_label.clone(), id.label()])
    }

    fn membership_edge(&self, id: &WorkspaceId, user_id: &UserId, access: WorkspaceAccess) -> Edge {
        Edge::new(
            id.membership_edge_id(user_id),
            id.element_id(),
            user_id.element_id(),
            self.types.workspace_to_user.as_str(),
            self.visibility(id),
        )
        .with_property(ACCESS_PROPERTY, access.as_str())
    }

    /// The user's tokens restricted to the ones relevant for reading this workspace.
    async fn workspace_authorizations(
        &self,
        id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Authorizations, RepositoryError<G, U>> {
        let held = self
            .users
            .authorizations(user_id)
            .await
            .map_err(WorkspaceError::Users)?;
        let global = self.config.visibility_label();
        let label = id.label();
        Ok(held.restrict(|held_label| held_label == global || *held_label == label))
    }

    async fn grant(&self, id: &WorkspaceId, user_id: &UserId) -> Result<(), U::Error> {
        self.users
            .add_authorization(user_id, self.config.visibility_label())
            .await?;
        self.users.add_authorization(user_id, &id.label()).await
    }

    async fn access(
        &self,
        id: &WorkspaceId,
        user_id: &UserId,
        authorizations: &Authorizations,
    ) -> Result<Option<WorkspaceAccess>, G::Error> {
        let edge = self
            .graph
            .edge(&id.membership_edge_id(user_id), authorizations)
            .await?;
        Ok(edge
            .filter(|edge| edge.edge_type == self.types.workspace_to_user.as_str())
            .as_ref()
            .and_then(WorkspaceUser::from_edge)
            .map(|member| member.access))
    }

    async fn memberships(
        &self,
        id: &WorkspaceId,
        authorizations: &Authorizations,
    ) -> Result<Vec<WorkspaceUser>, G::Error> {
        let edges = self
            .graph
            .edges_from(&id.element_id(), authorizations)
            .await?;
        Ok(edges
            .iter()
            .filter(|edge| edge.edge_type == self.types.workspace_to_user.as_str())
            .filter_map(WorkspaceUser::from_edge)
            .collect())
    }

    /// Returns the acting user's authorizations for this workspace if they have WRITE access.
    async fn ensure_write_access(
        &self,
        workspace: &Workspace,
        acting_user: &UserId,
    ) -> Result<Authorizations, RepositoryError<G, U>> {
        let authorizations = self
            .workspace_authorizations(workspace.id(), acting_user)
            .await?;
        let access = self
            .access(workspace.id(), acting_user, &authorizations)
            .await
            .map_err(WorkspaceError::Graph)?;

        match access {
            Some(access) if access.allows(WorkspaceAccess::Write) => Ok(authorizations),
            _ => {
                debug!(workspace_id = %workspace.id(), %acting_user, "access denied");
                Err(WorkspaceError::AccessDenied {
                    user: acting_user.clone(),
                    resource_id: workspace.id().clone(),
                })
            }
        }
    }

    /// Returns the requester's authorizations for this workspace if they can read it.
    async fn ensure_read_access(
        &self,
        workspace: &Workspace,
        requester: &UserId,
    ) -> Result<Authorizations, RepositoryError<G, U>> {
        let authorizations = self
            .workspace_authorizations(workspace.id(), requester)
            .await?;
        let vertex = self
            .graph
            .vertex(&workspace.id().element_id(), &authorizations)
            .await
            .map_err(WorkspaceError::Graph)?;

        match vertex {
            Some(_) => Ok(authorizations),
            None => Err(WorkspaceError::NotFound(workspace.id().clone())),
        }
    }

    /// Number of members with WRITE access, leaving out `excluding`.
    async fn writers(
        &self,
        id: &WorkspaceId,
        excluding: Option<&UserId>,
        authorizations: &Authorizations,
    ) -> Result<usize, G::Error> {
        let members = self.memberships(id, authorizations).await?;
        Ok(members
            .iter()
            .filter(|member| member.access.is_write() && Some(&member.user_id) != excluding)
            .count())
    }

    fn last_writer_error(workspace: &Workspace) -> RepositoryError<G, U> {
        WorkspaceError::InvalidArgument(format!(
            "workspace {} needs at least one user with write access",
            workspace.id()
        ))
    }

    /// Fails if taking WRITE access away from this user leaves nobody with WRITE access.
    async fn ensure_remaining_writer(
        &self,
        workspace: &Workspace,
        user_id: &UserId,
        authorizations: &Authorizations,
    ) -> Result<(), RepositoryError<G, U>> {
        let remaining = self
            .writers(workspace.id(), Some(user_id), authorizations)
            .await
            .map_err(WorkspaceError::Graph)?;
        if remaining == 0 {
            return Err(Self::last_writer_error(workspace));
        }
        Ok(())
    }

    /// Checks again after a membership edge lost its WRITE access and restores the edge when no
    /// writer is left.
    ///
    /// A concurrent change to another membership can pass `ensure_remaining_writer` at the same
    /// time as this one. Both then see the other's write here and at least one of them is undone.
    async fn ensure_writer_after_change(
        &self,
        workspace: &Workspace,
        edge_id: &ElementId,
        previous: Option<Edge>,
        authorizations: &Authorizations,
    ) -> Result<(), RepositoryError<G, U>> {
        match self.writers(workspace.id(), None, authorizations).await {
            Ok(0) => {
                debug!(workspace_id = %workspace.id(), %edge_id, "undo change removing last writer");
                self.restore_edge(edge_id, previous).await;
                Err(Self::last_writer_error(workspace))
            }
            Ok(_) => Ok(()),
            Err(err) => {
                self.restore_edge(edge_id, previous).await;
                Err(WorkspaceError::Graph(err))
            }
        }
    }

    async fn remove_workspace_vertex(&self, id: &WorkspaceId) {
        if let Err(err) = self.graph.remove_vertex(&id.element_id()).await {
            warn!(workspace_id = %id, "failed to remove workspace after failed creation: {err}");
        }
    }

    async fn restore_edge(&self, edge_id: &ElementId, previous: Option<Edge>) {
        let result = match previous {
            Some(edge) => self.graph.put_edge(edge).await.map(|_| ()),
            None => self.graph.remove_edge(edge_id).await.map(|_| ()),
        };
        if let Err(err) = result {
            warn!(%edge_id, "failed to restore edge: {err}");
        }
    }
}
