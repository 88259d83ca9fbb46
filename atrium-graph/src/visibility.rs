// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Opaque capability string.
///
/// The same type is used on both sides of the visibility check: as a tag on a graph element and as
/// an authorization token held by a user.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Set of labels attached to a vertex or edge.
///
/// An element with an empty visibility is readable by everyone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility(BTreeSet<Label>);

impl Visibility {
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self(labels.into_iter().collect())
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.0.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(Label::as_str).collect();
        write!(f, "{}", labels.join("&"))
    }
}

/// Set of labels held by a requester.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorizations(BTreeSet<Label>);

impl Authorizations {
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self(labels.into_iter().collect())
    }

    /// Authorizations which can only read elements with an empty visibility.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if every label of the given visibility is held.
    ///
    /// This is the only place where read access to graph elements is decided.
    pub fn can_read(&self, visibility: &Visibility) -> bool {
        visibility.0.is_subset(&self.0)
    }

    /// Returns a copy holding only the labels matching the predicate.
    pub fn restrict<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Label) -> bool,
    {
        Self(
            self.0
                .iter()
                .filter(|label| predicate(label))
                .cloned()
                .collect(),
        )
    }

    /// Adds a label, returns `false` if it was already held.
    pub fn insert(&mut self, label: Label) -> bool {
        self.0.insert(label)
    }

    /// Removes a label, returns `false` if it was not held.
    pub fn remove(&mut self, label: &Label) -> bool {
        self.0.remove(label)
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.0.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Label> for Authorizations {
    fn from_iter<T: IntoIterator<Item = Label>>(iter: T) -> Self {
        Self::new(iter)
    }
}
