// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;

use crate::{Authorizations, Edge, ElementId, Value, Vertex};

/// Interface for persisting and querying a labelled property graph.
///
/// Every read takes the caller's [`Authorizations`]. Implementations must only return elements
/// for which [`Authorizations::can_read`] holds and must treat all other elements exactly like
/// missing ones.
///
/// Each method is expected to be atomic on its own. Callers combining several writes are
/// responsible for undoing earlier ones when a later one fails.
pub trait GraphStore {
    type Error: Error;

    /// Inserts a vertex, replacing any existing vertex with the same id.
    fn add_vertex(&self, vertex: Vertex) -> impl Future<Output = Result<(), Self::Error>>;

    /// Removes a vertex together with all edges starting or ending at it.
    ///
    /// Returns `false` if no vertex with this id exists.
    fn remove_vertex(&self, id: &ElementId) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Sets a property on a vertex the caller can read.
    ///
    /// Returns `false` if the vertex does not exist or is not visible to the caller.
    fn set_vertex_property(
        &self,
        id: &ElementId,
        key: &str,
        value: Value,
        authorizations: &Authorizations,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Inserts an edge or replaces the edge with the same id.
    ///
    /// Returns the replaced edge, if there was one. Deriving edge ids from their endpoints turns
    /// this into an upsert keyed by the pair of vertices.
    fn put_edge(&self, edge: Edge) -> impl Future<Output = Result<Option<Edge>, Self::Error>>;

    /// Removes an edge, returning it if it existed.
    fn remove_edge(&self, id: &ElementId)
    -> impl Future<Output = Result<Option<Edge>, Self::Error>>;

    /// Returns a vertex if it exists and is visible to the caller.
    fn vertex(
        &self,
        id: &ElementId,
        authorizations: &Authorizations,
    ) -> impl Future<Output = Result<Option<Vertex>, Self::Error>>;

    /// Returns all vertices of the given type which are visible to the caller.
    fn vertices_by_type(
        &self,
        vertex_type: &str,
        authorizations: &Authorizations,
    ) -> impl Future<Output = Result<Vec<Vertex>, Self::Error>>;

    /// Returns an edge if it exists and is visible to the caller.
    fn edge(
        &self,
        id: &ElementId,
        authorizations: &Authorizations,
    ) -> impl Future<Output = Result<Option<Edge>, Self::Error>>;

    /// Returns all edges starting at the given vertex which are visible to the caller.
    fn edges_from(
        &self,
        id: &ElementId,
        authorizations: &Authorizations,
    ) -> impl Future<Output = Result<Vec<Edge>, Self::Error>>;

    /// Number of all stored vertices, regardless of their visibility.
    fn vertices_len(&self) -> impl Future<Output = Result<usize, Self::Error>>;

    /// Number of all stored edges, regardless of their visibility.
    fn edges_len(&self) -> impl Future<Output = Result<usize, Self::Error>>;
}
