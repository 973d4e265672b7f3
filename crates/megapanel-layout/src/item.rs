#![forbid(unsafe_code)]

//! Input shapes: the menu tree a host hands in, and the flat weighted items
//! the layout stages consume.
//!
//! Only one level of depth matters. A child's weight is itself plus its
//! direct children; grandchildren never influence the layout.

use serde::{Deserialize, Serialize};

/// A node of the source menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Identifier, unique among its siblings.
    pub id: String,
    /// Display label. Carried through for hosts, never used for layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = MenuNode>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Weight of this node when laid out as a child: 1 for itself plus one
    /// per direct child.
    #[must_use]
    pub fn weight(&self) -> u64 {
        1 + self.children.len() as u64
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The ordered children of this node as weighted items.
    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        self.children
            .iter()
            .map(|child| Item::new(child.id.clone(), child.weight()))
            .collect()
    }

    /// Find a direct child by id.
    #[must_use]
    pub fn child(&self, id: &str) -> Option<&MenuNode> {
        self.children.iter().find(|child| child.id == id)
    }
}

/// A weighted entry in a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Always at least 1.
    pub weight: u64,
}

impl Item {
    /// Create an item. A zero weight is raised to 1.
    pub fn new(id: impl Into<String>, weight: u64) -> Self {
        Self {
            id: id.into(),
            weight: weight.max(1),
        }
    }
}
