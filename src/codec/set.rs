// Author: Dustin Pilgrim
// License: MIT

//! The flat command format printed by `show | commands`.
//!
//! ```text
//! set firewall ipv4 forward filter default-action 'accept'
//! set protocols static route 16.0.0.0/8 next-hop 10.250.0.1
//! set service ssh port '22'
//! ```
//!
//! Leaf values are always single-quoted; tag values only when they contain
//! something outside the safe set. Both use the same backslash escapes.
//! Every line walks the grammar from the root again.

use std::sync::Arc;

use crate::ast::{ConfigNode, ConfigTree};
use crate::grammar::{Grammar, GrammarNode, NodeKind};
use crate::lexer::split_words;
use crate::quoting::{set_quote_if_needed, single_quote};
use crate::VyosError;

use super::block::{join_lines, missing_tag_value};

pub fn parse(text: &str, grammar: &Grammar) -> Result<ConfigTree, VyosError> {
    let mut tree = ConfigTree::new();
    let mut lines = 0;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        lines = lineno;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let words = split_words(line, lineno)?;
        parse_line(&mut tree, &words, grammar, lineno)?;
    }

    tracing::debug!(dialect = "set", lines, nodes = tree.size(), "parsed configuration");
    Ok(tree)
}

/// Apply one tokenized `set` command to the tree.
fn parse_line(tree: &mut ConfigTree, words: &[String], grammar: &Grammar, lineno: usize) -> Result<(), VyosError> {
    match words.first() {
        Some(first) if first == "set" => {}
        first => {
            return Err(VyosError::SyntaxError {
                message: format!("Expected 'set', found '{}'", first.map_or("", String::as_str)),
                line: lineno,
                column: 0,
                hint: Some("Every line must be a set command or a comment starting with # or //".into()),
                code: Some(520),
            });
        }
    }
    if words.len() == 1 {
        return Err(VyosError::SyntaxError {
            message: "'set' without a configuration path".into(),
            line: lineno,
            column: 0,
            hint: None,
            code: Some(521),
        });
    }

    let mut context: Arc<GrammarNode> = Arc::clone(grammar.root());
    let mut node: &mut ConfigNode = tree.root_mut();
    let mut trail: Vec<String> = Vec::new();
    let mut pos = 1;

    while pos < words.len() {
        let token = &words[pos];
        let matched = context
            .find_child_by_name(token)
            .cloned()
            .ok_or_else(|| VyosError::GrammarMismatch {
                token: token.clone(),
                line: lineno,
                path: Some(trail.join(".")),
                expected: context.child_names(),
                hint: None,
                code: Some(522),
            })?;

        let value = if matched.has_value() {
            pos += 1;
            words.get(pos).cloned()
        } else {
            None
        };

        if value.is_none() && matched.kind() == NodeKind::Tag {
            return Err(VyosError::SyntaxError {
                message: format!("Missing value for '{}'", token),
                line: lineno,
                column: 0,
                hint: Some(format!("Write '{} <value>'", token)),
                code: Some(523),
            });
        }

        trail.push(match &value {
            Some(v) => format!("{} {}", token, v),
            None => token.clone(),
        });
        node = node.insert_or_update(&matched, value).map_err(|e| e.at_line(lineno))?;
        context = matched;
        pos += 1;
    }

    tracing::trace!(line = lineno, path = %trail.join("."), "applied set command");
    Ok(())
}

pub fn serialize(tree: &ConfigTree) -> Result<String, VyosError> {
    let mut lines = Vec::new();
    if !tree.is_empty() {
        write_node(tree.root(), "set", &mut lines)?;
    }

    tracing::debug!(dialect = "set", lines = lines.len(), "serialized configuration");
    Ok(join_lines(lines))
}

/// Emit one line per node without children, carrying the path so far.
fn write_node(node: &ConfigNode, context: &str, out: &mut Vec<String>) -> Result<(), VyosError> {
    let mut context = context.to_string();
    if node.kind() != NodeKind::Root {
        context.push(' ');
        context.push_str(node.name());
    }

    match (node.kind(), node.value()) {
        (NodeKind::Leaf, Some(value)) => {
            context.push(' ');
            context.push_str(&single_quote(value));
        }
        (NodeKind::Tag, Some(value)) if !value.is_empty() => {
            context.push(' ');
            context.push_str(&set_quote_if_needed(value));
        }
        (NodeKind::Tag, _) => return Err(missing_tag_value(node)),
        _ => {}
    }

    if node.children().is_empty() {
        out.push(context);
        return Ok(());
    }
    for child in node.children() {
        write_node(child, &context, out)?;
    }
    Ok(())
}
