// Author: Dustin Pilgrim
// License: MIT

use std::cmp::Ordering;
use std::sync::Arc;

use crate::grammar::{GrammarNode, NodeKind};
use crate::merge::{merge_lists, Mergeable};
use crate::VyosError;

/// One parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: ConfigNode,
}

/// A node of the parsed configuration.
///
/// Every node except the root points back at the grammar node that allowed
/// it. The grammar is shared, so a tree can outlive the `Grammar` it was
/// parsed with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNode {
    grammar: Option<Arc<GrammarNode>>,
    kind: NodeKind,
    value: Option<String>,
    children: Vec<ConfigNode>,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    pub fn new() -> Self {
        Self {
            root: ConfigNode { grammar: None, kind: NodeKind::Root, value: None, children: Vec::new() },
        }
    }

    pub fn root(&self) -> &ConfigNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ConfigNode {
        &mut self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Total node count, root included.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Recursively order every node's children by `(name, value)`.
    /// Missing values sort before present ones.
    pub fn canonical_sort(&mut self) {
        self.root.canonical_sort();
    }

    /// Merge another tree into this one. Entries are matched by name, and by
    /// value as well for repeatable nodes. Unmatched entries are appended.
    pub fn merge(&mut self, other: ConfigTree) {
        merge_lists(&mut self.root.children, other.root.children);
    }
}

impl ConfigNode {
    fn new(grammar: &Arc<GrammarNode>, value: Option<String>) -> Self {
        Self {
            grammar: Some(Arc::clone(grammar)),
            kind: grammar.kind(),
            value,
            children: Vec::new(),
        }
    }

    /// Grammar name of the node; empty for the root.
    pub fn name(&self) -> &str {
        self.grammar.as_deref().map_or("", GrammarNode::name)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    pub fn grammar(&self) -> Option<&Arc<GrammarNode>> {
        self.grammar.as_ref()
    }

    pub fn is_repeatable(&self) -> bool {
        self.grammar.as_ref().is_some_and(|g| g.is_repeatable())
    }

    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ConfigNode::size).sum::<usize>()
    }

    /// Add a child, reusing an existing sibling where the grammar says it is
    /// the same entry.
    ///
    /// A non-repeatable node exists at most once per parent; inserting it
    /// again overwrites its value (when one is given) and returns the existing
    /// node. A repeatable node is reused only when the non-empty values match.
    /// The returned node is the one further path segments belong under.
    pub fn insert_or_update(
        &mut self,
        grammar: &Arc<GrammarNode>,
        value: Option<String>,
    ) -> Result<&mut ConfigNode, VyosError> {
        self.check_child(grammar, value.as_deref())?;

        let repeatable = grammar.is_repeatable();
        let existing = self.children.iter().position(|child| {
            child.name() == grammar.name() && (!repeatable || same_value(child.value(), value.as_deref()))
        });

        match existing {
            Some(idx) => {
                let node = &mut self.children[idx];
                if !repeatable && value.is_some() {
                    node.value = value;
                }
                Ok(node)
            }
            None => Ok(self.push(ConfigNode::new(grammar, value))),
        }
    }

    /// Add a child without looking for an existing sibling.
    pub fn append(
        &mut self,
        grammar: &Arc<GrammarNode>,
        value: Option<String>,
    ) -> Result<&mut ConfigNode, VyosError> {
        self.check_child(grammar, value.as_deref())?;
        Ok(self.push(ConfigNode::new(grammar, value)))
    }

    fn push(&mut self, node: ConfigNode) -> &mut ConfigNode {
        let idx = self.children.len();
        self.children.push(node);
        &mut self.children[idx]
    }

    fn check_child(&self, grammar: &GrammarNode, value: Option<&str>) -> Result<(), VyosError> {
        if self.kind == NodeKind::Leaf {
            return Err(VyosError::StructureError {
                message: format!("Leaf '{}' cannot contain '{}'", self.name(), grammar.name()),
                line: 0,
                hint: None,
                code: Some(601),
            });
        }
        if value.is_some() && !grammar.has_value() {
            return Err(VyosError::SyntaxError {
                message: format!("'{}' does not take a value", grammar.name()),
                line: 0,
                column: 0,
                hint: Some("Remove the value after the node name".into()),
                code: Some(602),
            });
        }
        if grammar.kind() == NodeKind::Tag && value.is_none_or(str::is_empty) {
            return Err(VyosError::SyntaxError {
                message: format!("Tag node '{}' requires a value", grammar.name()),
                line: 0,
                column: 0,
                hint: Some(format!("Write '{} <value>'", grammar.name())),
                code: Some(603),
            });
        }
        Ok(())
    }

    fn canonical_sort(&mut self) {
        self.children.sort_by(compare_entries);
        for child in &mut self.children {
            child.canonical_sort();
        }
    }
}

/// Values only identify repeated entries when both are present and non-empty.
fn same_value(a: Option<&str>, b: Option<&str>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if !a.is_empty() && a == b)
}

fn compare_entries(a: &ConfigNode, b: &ConfigNode) -> Ordering {
    a.name().cmp(b.name()).then_with(|| a.value.cmp(&b.value))
}

impl Mergeable for ConfigNode {
    fn matches(&self, other: &Self) -> bool {
        self.name() == other.name() && (!self.is_repeatable() || same_value(self.value(), other.value()))
    }

    fn merge_from(&mut self, other: Self) {
        if !self.is_repeatable() && other.value.is_some() {
            self.value = other.value;
        }
        merge_lists(&mut self.children, other.children);
    }
}
