// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory graph store.
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::trace;

use crate::{Authorizations, Edge, ElementId, GraphStore, Value, Vertex};

#[derive(Debug, Default)]
struct GraphMemoryStoreInner {
    vertices: HashMap<ElementId, Vertex>,
    edges: BTreeMap<ElementId, Edge>,
}

/// In-memory graph store.
///
/// State is shared between clones and guarded by a `RwLock`, every trait method holds the lock
/// for its whole duration. This does not persist data permamently, all changes are lost when the
/// process ends. Use this only in development or test contexts.
#[derive(Clone, Debug, Default)]
pub struct GraphMemoryStore {
    inner: Arc<RwLock<GraphMemoryStoreInner>>,
}

impl GraphMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphStore for GraphMemoryStore {
    type Error = Infallible;

    async fn add_vertex(&self, vertex: Vertex) -> Result<(), Self::Error> {
        trace!(id = %vertex.id, visibility = %vertex.visibility, "add vertex");
        let mut inner = self.inner.write().await;
        inner.vertices.insert(vertex.id.clone(), vertex);
        Ok(())
    }

    async fn remove_vertex(&self, id: &ElementId) -> Result<bool, Self::Error> {
        let mut inner = self.inner.write().await;
        if inner.vertices.remove(id).is_none() {
            return Ok(false);
        }
        inner.edges.retain(|_, edge| &edge.from != id && &edge.to != id);
        trace!(%id, "removed vertex");
        Ok(true)
    }

    async fn set_vertex_property(
        &self,
        id: &ElementId,
        key: &str,
        value: Value,
        authorizations: &Authorizations,
    ) -> Result<bool, Self::Error> {
        let mut inner = self.inner.write().await;
        match inner.vertices.get_mut(id) {
            Some(vertex) if authorizations.can_read(&vertex.visibility) => {
                vertex.properties.insert(key.to_owned(), value);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn put_edge(&self, edge: Edge) -> Result<Option<Edge>, Self::Error> {
        trace!(id = %edge.id, from = %edge.from, to = %edge.to, "put edge");
        let mut inner = self.inner.write().await;
        Ok(inner.edges.insert(edge.id.clone(), edge))
    }

    async fn remove_edge(&self, id: &ElementId) -> Result<Option<Edge>, Self::Error> {
        let mut inner = self.inner.write().await;
        Ok(inner.edges.remove(id))
    }

    async fn vertex(
        &self,
        id: &ElementId,
        authorizations: &Authorizations,
    ) -> Result<Option<Vertex>, Self::Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .vertices
            .get(id)
            .filter(|vertex| authorizations.can_read(&vertex.visibility))
            .cloned())
    }

    async fn vertices_by_type(
        &self,
        vertex_type: &str,
        authorizations: &Authorizations,
    ) -> Result<Vec<Vertex>, Self::Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .vertices
            .values()
            .filter(|vertex| {
                vertex.vertex_type == vertex_type && authorizations.can_read(&vertex.visibility)
            })
            .cloned()
            .collect())
    }

    async fn edge(
        &self,
        id: &ElementId,
        authorizations: &Authorizations,
    ) -> Result<Option<Edge>, Self::Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .edges
            .get(id)
            .filter(|edge| authorizations.can_read(&edge.visibility))
            .cloned())
    }

    async fn edges_from(
        &self,
        id: &ElementId,
        authorizations: &Authorizations,
    ) -> Result<Vec<Edge>, Self::Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .edges
            .values()
            .filter(|edge| &edge.from == id && authorizations.can_read(&edge.visibility))
            .cloned()
            .collect())
    }

    async fn vertices_len(&self) -> Result<usize, Self::Error> {
        Ok(self.inner.read().await.vertices.len())
    }

    async fn edges_len(&self) -> Result<usize, Self::Error> {
        Ok(self.inner.read().await.edges.len())
    }
}
