// Author: Dustin Pilgrim
// License: MIT

//! The `config.boot` format VyOS stores on disk.
//!
//! ```text
//! interfaces {
//!     ethernet eth0 {
//!         address "dhcp"
//!     }
//! }
//! // vyos-config-version: "..."
//! ```
//!
//! The file is written by VyOS itself and assumed free of duplicates, so
//! every statement becomes a new node.

use crate::ast::ConfigTree;
use crate::grammar::{Grammar, NodeKind};
use crate::quoting::double_quote;
use crate::VyosError;

use super::block::{join_lines, parse_block, write_block, BlockReader, Insertion};

pub fn parse(text: &str, grammar: &Grammar) -> Result<ConfigTree, VyosError> {
    let mut tree = ConfigTree::new();
    let mut reader = BlockReader::new(text);
    parse_block(&mut reader, tree.root_mut(), grammar.root(), Insertion::Append, 0, 0)?;

    tracing::debug!(dialect = "boot", lines = reader.line(), nodes = tree.size(), "parsed configuration");
    Ok(tree)
}

pub fn serialize(tree: &ConfigTree) -> Result<String, VyosError> {
    let mut lines = Vec::new();
    write_block(tree.root(), 0, render_value, &mut lines)?;

    tracing::debug!(dialect = "boot", lines = lines.len(), "serialized configuration");
    Ok(join_lines(lines))
}

/// Leaf values are always double-quoted; tag values are written bare.
fn render_value(kind: NodeKind, value: &str) -> String {
    match kind {
        NodeKind::Leaf => double_quote(value),
        _ => value.to_string(),
    }
}
