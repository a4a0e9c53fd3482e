// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::{ConfigNode, ConfigTree};
use crate::grammar::{Grammar, NodeKind};
use crate::codec::Dialect;
use crate::VyosError;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonNode {
    Value(String),
    Values(Vec<String>),
    Map(IndexMap<String, JsonNode>),
}

/// Export a configuration tree to JSON, in the shape VyOS itself uses for
/// `config to json`.
///
/// - Containers → objects keyed by child name
/// - Tag nodes → an object keyed by tag value, one entry per instance
/// - Multi-value leaves → arrays of strings
/// - Other leaves → strings, or `{}` when they carry no value
///
/// Keys keep the order of the tree.
///
/// # Examples
/// ```no_run
/// use vyos_cfg::{Dialect, Grammar, export};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let grammar = Grammar::from_file("grammar.json")?;
/// let tree = Dialect::Set.parse("set service ssh port '22'", &grammar)?;
/// println!("{}", export::export_tree_to_json(&tree)?);
/// # Ok(())
/// # }
/// ```
pub fn export_tree_to_json(tree: &ConfigTree) -> Result<String, VyosError> {
    let map = children_to_json(tree.root().children())?;
    serde_json::to_string_pretty(&map).map_err(|e| VyosError::RuntimeError {
        message: format!("Failed to serialize configuration: {}", e),
        hint: None,
        code: Some(700),
    })
}

fn children_to_json(children: &[ConfigNode]) -> Result<IndexMap<String, JsonNode>, VyosError> {
    let mut map = IndexMap::new();

    for child in children {
        let name = child.name().to_string();
        match child.kind() {
            NodeKind::Tag => {
                let value = child
                    .value()
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| crate::codec::missing_tag_value(child))?;
                let slot = map.entry(name).or_insert_with(|| JsonNode::Map(IndexMap::new()));
                if let JsonNode::Map(instances) = slot {
                    instances.insert(value.to_string(), JsonNode::Map(children_to_json(child.children())?));
                }
            }
            NodeKind::Leaf if child.is_repeatable() => {
                let slot = map.entry(name).or_insert_with(|| JsonNode::Values(Vec::new()));
                if let (JsonNode::Values(values), Some(value)) = (slot, child.value()) {
                    values.push(value.to_string());
                }
            }
            NodeKind::Leaf => {
                let node = match child.value() {
                    Some(value) => JsonNode::Value(value.to_string()),
                    None => JsonNode::Map(IndexMap::new()),
                };
                map.insert(name, node);
            }
            NodeKind::Container | NodeKind::Root => {
                map.insert(name, JsonNode::Map(children_to_json(child.children())?));
            }
        }
    }

    Ok(map)
}

/// Parse configuration text and export it straight to JSON.
///
/// The format is detected from the text.
///
/// # Errors
/// Returns an error if the text is empty, matches no format, or does not
/// fit the grammar.
pub fn export_config_text(text: &str, grammar: &Grammar) -> Result<String, VyosError> {
    let dialect = Dialect::detect(text).ok_or_else(|| VyosError::RuntimeError {
        message: "Could not detect the configuration format".into(),
        hint: Some("The input has no configuration lines".into()),
        code: Some(701),
    })?;
    let tree = dialect.parse(text, grammar)?;
    export_tree_to_json(&tree)
}
