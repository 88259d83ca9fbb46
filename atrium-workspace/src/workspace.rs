// SPDX-License-Identifier: MIT OR Apache-2.0

use atrium_graph::{Edge, Vertex};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{UserId, WorkspaceAccess, WorkspaceId};

pub(crate) const TITLE_PROPERTY: &str = "title";
pub(crate) const ACCESS_PROPERTY: &str = "access";
pub(crate) const VISIBLE_PROPERTY: &str = "visible";
pub(crate) const GRAPH_POSITION_X_PROPERTY: &str = "graphPositionX";
pub(crate) const GRAPH_POSITION_Y_PROPERTY: &str = "graphPositionY";

/// A workspace as seen by a requester who is allowed to read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    title: String,
}

impl Workspace {
    pub(crate) fn new(id: WorkspaceId, title: &str) -> Self {
        Self {
            id,
            title: title.to_owned(),
        }
    }

    pub fn id(&self) -> &WorkspaceId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn from_vertex(vertex: &Vertex) -> Option<Self> {
        let id = match vertex.id.as_str().parse() {
            Ok(id) => id,
            Err(err) => {
                warn!(id = %vertex.id, "ignoring workspace vertex with invalid id: {err}");
                return None;
            }
        };
        let title = vertex
            .property(TITLE_PROPERTY)
            .and_then(|value| value.as_str())
            .unwrap_or_default();
        Some(Self::new(id, title))
    }
}

/// A user with access to a workspace.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkspaceUser {
    pub user_id: UserId,
    pub access: WorkspaceAccess,
}

impl WorkspaceUser {
    pub fn new(user_id: UserId, access: WorkspaceAccess) -> Self {
        Self { user_id, access }
    }

    pub(crate) fn from_edge(edge: &Edge) -> Option<Self> {
        let access = edge
            .property(ACCESS_PROPERTY)
            .and_then(|value| value.as_str())
            .and_then(|value| value.parse().ok());
        match access {
            Some(access) => Some(Self::new(UserId::new(edge.to.as_str()), access)),
            None => {
                warn!(id = %edge.id, "ignoring membership edge without valid access level");
                None
            }
        }
    }
}

/// Position of an entity on the workspace canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPosition {
    pub x: i64,
    pub y: i64,
}

impl GraphPosition {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// An entity which was added to a workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntity {
    pub entity_id: String,
    pub visible: bool,
    pub graph_position: Option<GraphPosition>,
}

impl WorkspaceEntity {
    pub(crate) fn from_edge(edge: &Edge) -> Self {
        let visible = edge
            .property(VISIBLE_PROPERTY)
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        let x = edge
            .property(GRAPH_POSITION_X_PROPERTY)
            .and_then(|value| value.as_integer());
        let y = edge
            .property(GRAPH_POSITION_Y_PROPERTY)
            .and_then(|value| value.as_integer());
        let graph_position = match (x, y) {
            (Some(x), Some(y)) => Some(GraphPosition::new(x, y)),
            _ => None,
        };

        Self {
            entity_id: edge.to.to_string(),
            visible,
            graph_position,
        }
    }
}
