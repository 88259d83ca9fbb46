// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{Authorizations, Edge, ElementId, GraphMemoryStore, GraphStore, Label, Vertex, Visibility};

fn visibility(labels: &[&str]) -> Visibility {
    Visibility::new(labels.iter().map(|label| Label::new(*label)))
}

fn authorizations(labels: &[&str]) -> Authorizations {
    Authorizations::new(labels.iter().map(|label| Label::new(*label)))
}

#[tokio::test]
async fn hidden_vertex_looks_like_missing_vertex() {
    let store = GraphMemoryStore::new();
    let id = ElementId::new("WORKSPACE_a");

    store
        .add_vertex(Vertex::new(
            id.clone(),
            "workspace",
            visibility(&["workspace", "WORKSPACE_a"]),
        ))
        .await
        .unwrap();

    assert_eq!(store.vertex(&id, &Authorizations::empty()).await.unwrap(), None);
    assert_eq!(
        store.vertex(&id, &authorizations(&["workspace"])).await.unwrap(),
        None
    );
    assert_eq!(
        store
            .vertex(&ElementId::new("WORKSPACE_missing"), &authorizations(&["workspace"]))
            .await
            .unwrap(),
        None
    );

    let vertex = store
        .vertex(&id, &authorizations(&["workspace", "WORKSPACE_a"]))
        .await
        .unwrap()
        .expect("vertex is visible");
    assert_eq!(vertex.id, id);
}

#[tokio::test]
async fn vertices_by_type_filters_type_and_visibility() {
    let store = GraphMemoryStore::new();

    for (id, vertex_type) in [
        ("WORKSPACE_a", "workspace"),
        ("WORKSPACE_b", "workspace"),
        ("WORKSPACE_c", "workspace"),
        ("entity_1", "entity"),
    ] {
        store
            .add_vertex(Vertex::new(
                ElementId::new(id),
                vertex_type,
                visibility(&["workspace", id]),
            ))
            .await
            .unwrap();
    }

    let mut ids: Vec<String> = store
        .vertices_by_type(
            "workspace",
            &authorizations(&["workspace", "WORKSPACE_a", "WORKSPACE_c", "entity_1"]),
        )
        .await
        .unwrap()
        .into_iter()
        .map(|vertex| vertex.id.to_string())
        .collect();
    ids.sort();

    assert_eq!(ids, vec!["WORKSPACE_a", "WORKSPACE_c"]);
}

#[tokio::test]
async fn put_edge_upserts_by_id() {
    let store = GraphMemoryStore::new();
    let edge_id = ElementId::new("WORKSPACE_a_to_user_1");
    let edge = |access: &str| {
        Edge::new(
            edge_id.clone(),
            ElementId::new("WORKSPACE_a"),
            ElementId::new("user_1"),
            "workspaceToUser",
            visibility(&["workspace", "WORKSPACE_a"]),
        )
        .with_property("access", access)
    };

    assert_eq!(store.put_edge(edge("read")).await.unwrap(), None);
    let replaced = store.put_edge(edge("write")).await.unwrap();
    assert_eq!(replaced, Some(edge("read")));
    assert_eq!(store.edges_len().await.unwrap(), 1);

    let stored = store
        .edge(&edge_id, &authorizations(&["workspace", "WORKSPACE_a"]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.property("access").and_then(|value| value.as_str()), Some("write"));

    assert_eq!(store.remove_edge(&edge_id).await.unwrap(), Some(edge("write")));
    assert_eq!(store.edges_len().await.unwrap(), 0);
}

#[tokio::test]
async fn edges_from_respects_visibility() {
    let store = GraphMemoryStore::new();
    let from = ElementId::new("WORKSPACE_a");

    store
        .put_edge(Edge::new(
            ElementId::new("WORKSPACE_a_to_user_1"),
            from.clone(),
            ElementId::new("user_1"),
            "workspaceToUser",
            visibility(&["workspace", "WORKSPACE_a"]),
        ))
        .await
        .unwrap();
    store
        .put_edge(Edge::new(
            ElementId::new("WORKSPACE_b_to_user_1"),
            ElementId::new("WORKSPACE_b"),
            ElementId::new("user_1"),
            "workspaceToUser",
            visibility(&["workspace", "WORKSPACE_b"]),
        ))
        .await
        .unwrap();

    let all = authorizations(&["workspace", "WORKSPACE_a", "WORKSPACE_b"]);
    assert_eq!(store.edges_from(&from, &all).await.unwrap().len(), 1);
    assert!(
        store
            .edges_from(&from, &authorizations(&["workspace"]))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn remove_vertex_removes_incident_edges() {
    let store = GraphMemoryStore::new();
    let workspace = ElementId::new("WORKSPACE_a");

    store
        .add_vertex(Vertex::new(workspace.clone(), "workspace", Visibility::default()))
        .await
        .unwrap();
    store
        .put_edge(Edge::new(
            ElementId::new("WORKSPACE_a_to_user_1"),
            workspace.clone(),
            ElementId::new("user_1"),
            "workspaceToUser",
            Visibility::default(),
        ))
        .await
        .unwrap();
    store
        .put_edge(Edge::new(
            ElementId::new("WORKSPACE_b_to_user_1"),
            ElementId::new("WORKSPACE_b"),
            ElementId::new("user_1"),
            "workspaceToUser",
            Visibility::default(),
        ))
        .await
        .unwrap();

    assert!(store.remove_vertex(&workspace).await.unwrap());
    assert!(!store.remove_vertex(&workspace).await.unwrap());
    assert_eq!(store.vertices_len().await.unwrap(), 0);
    assert_eq!(store.edges_len().await.unwrap(), 1);
}

#[tokio::test]
async fn set_property_requires_visibility() {
    let store = GraphMemoryStore::new();
    let id = ElementId::new("WORKSPACE_a");

    store
        .add_vertex(
            Vertex::new(id.clone(), "workspace", visibility(&["workspace", "WORKSPACE_a"]))
                .with_property("title", "before"),
        )
        .await
        .unwrap();

    let updated = store
        .set_vertex_property(&id, "title", "hidden".into(), &authorizations(&["workspace"]))
        .await
        .unwrap();
    assert!(!updated);

    let full = authorizations(&["workspace", "WORKSPACE_a"]);
    let updated = store
        .set_vertex_property(&id, "title", "after".into(), &full)
        .await
        .unwrap();
    assert!(updated);

    let vertex = store.vertex(&id, &full).await.unwrap().unwrap();
    assert_eq!(vertex.property("title").and_then(|value| value.as_str()), Some("after"));
}

#[tokio::test]
async fn clones_share_state() {
    let store = GraphMemoryStore::new();
    let other = store.clone();

    store
        .add_vertex(Vertex::new(ElementId::new("a"), "workspace", Visibility::default()))
        .await
        .unwrap();

    assert_eq!(other.vertices_len().await.unwrap(), 1);
}
