// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{Grammar, GrammarNode};
use crate::VyosError;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Root,
    Node,
    LeafNode,
    TagNode,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type", default)]
    kind: Option<RawKind>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    children: RawChildren,
    #[serde(default)]
    multi: Option<bool>,
    #[serde(default)]
    has_value: Option<bool>,
}

/// Children are stored either as one list where every entry names its own
/// type, or grouped by kind the way the XML interface definitions are.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChildren {
    List(Vec<RawNode>),
    Grouped {
        #[serde(rename = "LeafNodes", default)]
        leaf_nodes: Vec<RawNode>,
        #[serde(rename = "Nodes", default)]
        nodes: Vec<RawNode>,
        #[serde(rename = "TagNodes", default)]
        tag_nodes: Vec<RawNode>,
    },
}

impl Default for RawChildren {
    fn default() -> Self {
        RawChildren::List(Vec::new())
    }
}

impl RawChildren {
    fn into_nodes(self) -> Result<Vec<GrammarNode>, VyosError> {
        match self {
            RawChildren::List(nodes) => nodes.into_iter().map(|n| n.into_node(None)).collect(),
            RawChildren::Grouped { leaf_nodes, nodes, tag_nodes } => {
                let mut out = Vec::with_capacity(leaf_nodes.len() + nodes.len() + tag_nodes.len());
                for (group, kind) in [
                    (leaf_nodes, RawKind::LeafNode),
                    (nodes, RawKind::Node),
                    (tag_nodes, RawKind::TagNode),
                ] {
                    for node in group {
                        out.push(node.into_node(Some(kind))?);
                    }
                }
                Ok(out)
            }
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            RawChildren::List(nodes) => nodes.is_empty(),
            RawChildren::Grouped { leaf_nodes, nodes, tag_nodes } => {
                leaf_nodes.is_empty() && nodes.is_empty() && tag_nodes.is_empty()
            }
        }
    }
}

impl RawNode {
    fn into_node(self, implied: Option<RawKind>) -> Result<GrammarNode, VyosError> {
        let kind = self.kind.or(implied).ok_or_else(|| VyosError::GrammarError {
            message: format!("Node '{}' has no type", self.name),
            hint: Some("Set \"type\" to one of node, leafnode or tagnode".into()),
            code: Some(402),
        })?;

        match kind {
            RawKind::Root => Err(VyosError::GrammarError {
                message: format!("Node '{}' is typed root below the top level", self.name),
                hint: None,
                code: Some(403),
            }),
            RawKind::Node => Ok(GrammarNode::container(self.name, self.children.into_nodes()?)),
            RawKind::TagNode => Ok(GrammarNode::tag(self.name, self.children.into_nodes()?)),
            RawKind::LeafNode => {
                if !self.children.is_empty() {
                    return Err(VyosError::GrammarError {
                        message: format!("Leaf node '{}' has children", self.name),
                        hint: Some("Only node and tagnode entries may have children".into()),
                        code: Some(404),
                    });
                }
                Ok(GrammarNode::Leaf {
                    name: self.name,
                    multi: self.multi.unwrap_or(false),
                    has_value: self.has_value.unwrap_or(true),
                })
            }
        }
    }
}

pub(super) fn grammar_from_json(json: &str) -> Result<Grammar, VyosError> {
    let raw: RawNode = serde_json::from_str(json).map_err(|e| VyosError::GrammarError {
        message: format!("Invalid grammar JSON: {}", e),
        hint: None,
        code: Some(401),
    })?;

    if !matches!(raw.kind, None | Some(RawKind::Root) | Some(RawKind::Node)) {
        return Err(VyosError::GrammarError {
            message: "Top-level grammar node must be the root".into(),
            hint: Some("Use \"type\": \"root\" for the outermost object".into()),
            code: Some(403),
        });
    }

    Ok(Grammar::new(raw.children.into_nodes()?))
}

pub(super) fn grammar_from_file(path: &Path) -> Result<Grammar, VyosError> {
    let path = expand_home(path)?;
    tracing::debug!(path = %path.display(), "loading grammar");

    let content = fs::read_to_string(&path).map_err(|e| VyosError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string_lossy().to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })?;

    grammar_from_json(&content)
}

/// Expand "~/" to the home directory.
fn expand_home(path: &Path) -> Result<PathBuf, VyosError> {
    let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir().ok_or_else(|| VyosError::FileError {
        message: "Could not determine home directory for ~ expansion".into(),
        path: path.to_string_lossy().to_string(),
        hint: Some("Set HOME or use an absolute grammar path".into()),
        code: Some(300),
    })?;
    Ok(home.join(rest))
}
