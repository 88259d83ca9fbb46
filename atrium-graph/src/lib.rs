// SPDX-License-Identifier: MIT OR Apache-2.0

//! A labelled property graph where every read is filtered by the caller's authorizations.
//!
//! Vertices and edges carry a [`Visibility`], a set of [`Label`]s. A caller presents their
//! [`Authorizations`], the set of labels they hold, with every query and only sees elements whose
//! whole label set is contained in it. Elements which are not visible are indistinguishable from
//! elements which do not exist: queries return `None` or leave them out of the result.
//!
//! ```rust
//! # use atrium_graph::{Authorizations, Label, Visibility};
//! let visibility = Visibility::new([Label::new("workspace"), Label::new("WORKSPACE_1")]);
//!
//! // Holding only one of the two labels is not enough.
//! let partial = Authorizations::new([Label::new("workspace")]);
//! assert!(!partial.can_read(&visibility));
//!
//! let full = Authorizations::new([Label::new("workspace"), Label::new("WORKSPACE_1")]);
//! assert!(full.can_read(&visibility));
//! ```
//!
//! Persistence is abstracted by the [`GraphStore`] trait. An in-memory implementation,
//! [`GraphMemoryStore`], is available behind the `memory` feature flag which is enabled by
//! default.
mod element;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(all(test, feature = "memory"))]
mod tests;
mod traits;
mod visibility;

pub use element::{Edge, ElementId, Properties, Value, Vertex};
#[cfg(feature = "memory")]
pub use memory::GraphMemoryStore;
pub use traits::GraphStore;
pub use visibility::{Authorizations, Label, Visibility};
