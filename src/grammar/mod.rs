// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::merge::{merge_lists, Mergeable};
use crate::VyosError;

mod document;

/// Kind of a grammar or configuration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Container,
    Leaf,
    Tag,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Root => "root",
            NodeKind::Container => "node",
            NodeKind::Leaf => "leafNode",
            NodeKind::Tag => "tagNode",
        };
        f.write_str(s)
    }
}

/// One node of the configuration grammar.
///
/// Flags that are fixed by kind are not stored: a container never repeats and
/// never takes a value, a tag always does both. Only leaves carry them.
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarNode {
    Container {
        name: String,
        children: Vec<Arc<GrammarNode>>,
    },
    Leaf {
        name: String,
        multi: bool,
        has_value: bool,
    },
    Tag {
        name: String,
        children: Vec<Arc<GrammarNode>>,
    },
}

impl GrammarNode {
    pub fn container(name: impl Into<String>, children: Vec<GrammarNode>) -> Self {
        GrammarNode::Container {
            name: name.into(),
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn tag(name: impl Into<String>, children: Vec<GrammarNode>) -> Self {
        GrammarNode::Tag {
            name: name.into(),
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    /// A single-valued leaf.
    pub fn leaf(name: impl Into<String>) -> Self {
        GrammarNode::Leaf { name: name.into(), multi: false, has_value: true }
    }

    /// A leaf that may be repeated with different values.
    pub fn multi_leaf(name: impl Into<String>) -> Self {
        GrammarNode::Leaf { name: name.into(), multi: true, has_value: true }
    }

    /// A flag leaf such as `disable`.
    pub fn valueless_leaf(name: impl Into<String>) -> Self {
        GrammarNode::Leaf { name: name.into(), multi: false, has_value: false }
    }

    pub fn name(&self) -> &str {
        match self {
            GrammarNode::Container { name, .. }
            | GrammarNode::Leaf { name, .. }
            | GrammarNode::Tag { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            GrammarNode::Container { .. } => NodeKind::Container,
            GrammarNode::Leaf { .. } => NodeKind::Leaf,
            GrammarNode::Tag { .. } => NodeKind::Tag,
        }
    }

    pub fn is_repeatable(&self) -> bool {
        match self {
            GrammarNode::Container { .. } => false,
            GrammarNode::Leaf { multi, .. } => *multi,
            GrammarNode::Tag { .. } => true,
        }
    }

    pub fn has_value(&self) -> bool {
        match self {
            GrammarNode::Container { .. } => false,
            GrammarNode::Leaf { has_value, .. } => *has_value,
            GrammarNode::Tag { .. } => true,
        }
    }

    pub fn children(&self) -> &[Arc<GrammarNode>] {
        match self {
            GrammarNode::Container { children, .. } | GrammarNode::Tag { children, .. } => children,
            GrammarNode::Leaf { .. } => &[],
        }
    }

    /// First direct child called `name`.
    pub fn find_child_by_name(&self, name: &str) -> Option<&Arc<GrammarNode>> {
        self.children().iter().find(|child| child.name() == name)
    }

    /// Names of the direct children, in grammar order.
    pub fn child_names(&self) -> Vec<String> {
        self.children().iter().map(|child| child.name().to_string()).collect()
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Arc<GrammarNode>>> {
        match self {
            GrammarNode::Container { children, .. } | GrammarNode::Tag { children, .. } => Some(children),
            GrammarNode::Leaf { .. } => None,
        }
    }

    fn into_children(self) -> Vec<Arc<GrammarNode>> {
        match self {
            GrammarNode::Container { children, .. } | GrammarNode::Tag { children, .. } => children,
            GrammarNode::Leaf { .. } => Vec::new(),
        }
    }
}

impl Mergeable for Arc<GrammarNode> {
    fn matches(&self, other: &Self) -> bool {
        self.name() == other.name()
    }

    fn merge_from(&mut self, other: Self) {
        let incoming = Arc::unwrap_or_clone(other).into_children();
        if incoming.is_empty() {
            return;
        }
        if let Some(children) = Arc::make_mut(self).children_mut() {
            merge_lists(children, incoming);
        }
    }
}

/// A complete grammar. The root is a nameless container.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    root: Arc<GrammarNode>,
}

impl Grammar {
    pub fn new(children: Vec<GrammarNode>) -> Self {
        Self { root: Arc::new(GrammarNode::container("", children)) }
    }

    pub fn root(&self) -> &Arc<GrammarNode> {
        &self.root
    }

    pub fn find_child_by_name(&self, name: &str) -> Option<&Arc<GrammarNode>> {
        self.root.find_child_by_name(name)
    }

    /// Walk a path of node names from the root.
    ///
    /// ```ignore
    /// let port = grammar.lookup_path(&["service", "ssh", "port"]);
    /// ```
    pub fn lookup_path(&self, path: &[&str]) -> Option<&Arc<GrammarNode>> {
        let mut node = &self.root;
        for name in path {
            node = node.find_child_by_name(name)?;
        }
        Some(node)
    }

    /// Merge another grammar fragment into this one, matching children by name.
    pub fn merge(&mut self, other: Grammar) {
        self.root.merge_from(other.root);
    }

    /// Parse a grammar from its persisted JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, VyosError> {
        document::grammar_from_json(json)
    }

    /// Load a grammar from a JSON file. A leading `~/` is expanded to the
    /// home directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VyosError> {
        document::grammar_from_file(path.as_ref())
    }

    /// Load from `primary`, falling back to `fallback` when the primary file
    /// cannot be read.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, VyosError> {
        match Self::from_file(&primary) {
            Ok(grammar) => Ok(grammar),
            Err(VyosError::FileError { .. }) => {
                Self::from_file(&fallback).map_err(|e| match e {
                    VyosError::FileError { message, .. } => VyosError::FileError {
                        message: format!(
                            "Failed to load grammar from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the grammar files exists".into()),
                        code: Some(301),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests;
