// SPDX-License-Identifier: MIT OR Apache-2.0

use atrium_graph::Label;
use serde::{Deserialize, Serialize};

/// Label carried by every workspace element, next to the per-workspace label.
pub const DEFAULT_VISIBILITY_LABEL: &str = "workspace";

/// Configuration for a workspace repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global visibility label shared by all workspace vertices and edges.
    pub(crate) visibility_label: Label,

    /// Ontology name of the workspace concept.
    pub(crate) workspace_concept: String,

    /// Ontology name of the concept users and workspace entities belong to.
    pub(crate) entity_concept: String,

    /// Ontology name of the workspace to user relationship (membership edges).
    pub(crate) workspace_to_user_relationship: String,

    /// Ontology name of the workspace to entity relationship.
    pub(crate) workspace_to_entity_relationship: String,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visibility_label(mut self, label: impl Into<Label>) -> Self {
        self.visibility_label = label.into();
        self
    }

    pub fn with_workspace_concept(mut self, name: &str) -> Self {
        self.workspace_concept = name.to_owned();
        self
    }

    pub fn with_entity_concept(mut self, name: &str) -> Self {
        self.entity_concept = name.to_owned();
        self
    }

    pub fn with_workspace_to_user_relationship(mut self, name: &str) -> Self {
        self.workspace_to_user_relationship = name.to_owned();
        self
    }

    pub fn with_workspace_to_entity_relationship(mut self, name: &str) -> Self {
        self.workspace_to_entity_relationship = name.to_owned();
        self
    }

    pub fn visibility_label(&self) -> &Label {
        &self.visibility_label
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            visibility_label: Label::new(DEFAULT_VISIBILITY_LABEL),
            workspace_concept: "workspace".to_owned(),
            entity_concept: "entity".to_owned(),
            workspace_to_user_relationship: "workspaceToUser".to_owned(),
            workspace_to_entity_relationship: "workspaceToEntity".to_owned(),
        }
    }
}
