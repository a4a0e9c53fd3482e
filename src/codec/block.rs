// Author: Dustin Pilgrim
// License: MIT

//! Line reader and writer for the brace-delimited formats (`config.boot`
//! and `show`). Both use `name [value] {` to open a block, a bare `}` to
//! close it, and `/` to start a comment line.

use std::str::Lines;
use std::sync::Arc;

use crate::ast::ConfigNode;
use crate::grammar::{GrammarNode, NodeKind};
use crate::quoting::unquote_double;
use crate::VyosError;

/// How a parsed statement is attached to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// Always create a new node.
    Append,
    /// Reuse a matching sibling so repeated sections merge.
    Merge,
}

/// Line cursor threaded through the recursive parse.
pub(crate) struct BlockReader<'a> {
    lines: Lines<'a>,
    line: usize,
}

enum Statement<'a> {
    Close,
    Entry { name: &'a str, raw_value: &'a str, opens: bool },
}

impl<'a> BlockReader<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { lines: text.lines(), line: 0 }
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Next significant statement, skipping blanks and comments.
    fn next_statement(&mut self) -> Option<Statement<'a>> {
        for raw in self.lines.by_ref() {
            self.line += 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('/') {
                continue;
            }
            if line == "}" {
                return Some(Statement::Close);
            }

            let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            let opens = line.ends_with('{');
            let raw_value = if opens {
                rest.strip_suffix('{').unwrap_or(rest)
            } else {
                rest
            };
            return Some(Statement::Entry { name, raw_value: raw_value.trim(), opens });
        }
        None
    }
}

/// Parse statements into `parent` until the matching `}` or end of input.
///
/// `depth` is 0 for the document itself, where a `}` has nothing to close
/// and running out of input is the normal end. `opened_at` is the line of
/// the statement that opened the current block.
pub(crate) fn parse_block(
    reader: &mut BlockReader,
    parent: &mut ConfigNode,
    grammar: &GrammarNode,
    insertion: Insertion,
    depth: usize,
    opened_at: usize,
) -> Result<(), VyosError> {
    while let Some(statement) = reader.next_statement() {
        let (name, raw_value, opens) = match statement {
            Statement::Close if depth == 0 => {
                return Err(VyosError::StructureError {
                    message: "Unmatched '}'".into(),
                    line: reader.line(),
                    hint: Some("Remove the extra closing brace".into()),
                    code: Some(501),
                });
            }
            Statement::Close => return Ok(()),
            Statement::Entry { name, raw_value, opens } => (name, raw_value, opens),
        };

        let lineno = reader.line();
        let matched: Arc<GrammarNode> = grammar
            .find_child_by_name(name)
            .cloned()
            .ok_or_else(|| VyosError::GrammarMismatch {
                token: name.to_string(),
                line: lineno,
                path: None,
                expected: Vec::new(),
                hint: None,
                code: Some(510),
            })?;

        if opens && matched.kind() == NodeKind::Leaf {
            return Err(VyosError::StructureError {
                message: format!("Leaf '{}' cannot open a block", name),
                line: lineno,
                hint: None,
                code: Some(502),
            });
        }

        let value = decode_value(raw_value, lineno)?;
        let node = match insertion {
            Insertion::Append => parent.append(&matched, value),
            Insertion::Merge => parent.insert_or_update(&matched, value),
        }
        .map_err(|e| e.at_line(lineno))?;

        if opens {
            parse_block(reader, node, &matched, insertion, depth + 1, lineno)?;
        }
    }

    if depth > 0 {
        return Err(VyosError::StructureError {
            message: format!("Block opened at line {} is never closed", opened_at),
            line: reader.line(),
            hint: Some("Add the missing '}'".into()),
            code: Some(503),
        });
    }
    Ok(())
}

/// A value starting with `"` is unescaped, anything else is taken as-is.
fn decode_value(raw: &str, lineno: usize) -> Result<Option<String>, VyosError> {
    if raw.is_empty() {
        return Ok(None);
    }
    if raw.starts_with('"') {
        return unquote_double(raw).map(Some).map_err(|message| VyosError::SyntaxError {
            message,
            line: lineno,
            column: 0,
            hint: Some("Check the quoting of the value".into()),
            code: Some(504),
        });
    }
    Ok(Some(raw.to_string()))
}

/// Render `node` and its subtree as brace-delimited lines.
///
/// `render_value` formats a non-empty value for the node kind. The root has
/// no line of its own, so its children are written at `indent`.
pub(crate) fn write_block(
    node: &ConfigNode,
    indent: usize,
    render_value: fn(NodeKind, &str) -> String,
    out: &mut Vec<String>,
) -> Result<(), VyosError> {
    if node.kind() == NodeKind::Root {
        for child in node.children() {
            write_block(child, indent, render_value, out)?;
        }
        return Ok(());
    }

    let mut line = format!("{:indent$}{}", "", node.name(), indent = indent);
    match node.value() {
        Some(value) if !value.is_empty() => {
            line.push(' ');
            line.push_str(&render_value(node.kind(), value));
        }
        _ if node.kind() == NodeKind::Tag => return Err(missing_tag_value(node)),
        _ => {}
    }

    if node.kind() == NodeKind::Leaf {
        out.push(line);
        return Ok(());
    }

    line.push_str(" {");
    out.push(line);
    for child in node.children() {
        write_block(child, indent + 4, render_value, out)?;
    }
    out.push(format!("{:indent$}}}", "", indent = indent));
    Ok(())
}

pub(crate) fn missing_tag_value(node: &ConfigNode) -> VyosError {
    VyosError::StructureError {
        message: format!("Tag node '{}' has no value", node.name()),
        line: 0,
        hint: None,
        code: Some(505),
    }
}

/// Join output lines, with a trailing newline unless there is nothing.
pub(crate) fn join_lines(lines: Vec<String>) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
