// Author: Dustin Pilgrim
// License: MIT

//! The format printed by `show` in configuration mode.
//!
//! Same braces as `config.boot`, but values are double-quoted only when
//! they need it and the whole document is indented by one space. Some
//! tooling prints the running configuration in fragments, so the same path
//! can appear in more than one block; those blocks are merged while
//! parsing.

use crate::ast::ConfigTree;
use crate::grammar::{Grammar, NodeKind};
use crate::quoting::show_quote_if_needed;
use crate::VyosError;

use super::block::{join_lines, parse_block, write_block, BlockReader, Insertion};

pub fn parse(text: &str, grammar: &Grammar) -> Result<ConfigTree, VyosError> {
    let mut tree = ConfigTree::new();
    let mut reader = BlockReader::new(text);
    parse_block(&mut reader, tree.root_mut(), grammar.root(), Insertion::Merge, 0, 0)?;

    tracing::debug!(dialect = "show", lines = reader.line(), nodes = tree.size(), "parsed configuration");
    Ok(tree)
}

pub fn serialize(tree: &ConfigTree) -> Result<String, VyosError> {
    let mut lines = Vec::new();
    write_block(tree.root(), 1, render_value, &mut lines)?;

    tracing::debug!(dialect = "show", lines = lines.len(), "serialized configuration");
    Ok(join_lines(lines))
}

fn render_value(_kind: NodeKind, value: &str) -> String {
    show_quote_if_needed(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{grammar, SHOW_FIXTURE};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_fixture() {
        let tree = parse(SHOW_FIXTURE, &grammar()).expect("Failed to parse config.show.1");
        assert_eq!(tree.size(), 57);
    }

    #[test]
    fn test_round_trip() {
        let tree = parse(SHOW_FIXTURE, &grammar()).unwrap();
        assert_eq!(serialize(&tree).unwrap(), SHOW_FIXTURE);
    }

    #[test]
    fn test_repeated_sections_merge() {
        let text = r#" firewall {
     ipv4 {
         forward {
             filter {
                 default-action accept
                 rule 10 {
                     action drop
                 }
             }
         }
     }
 }
 system {
     name-server 8.8.8.8
 }
 firewall {
     ipv4 {
         forward {
             filter {
                 default-action drop
                 rule 10 {
                     description "Block telnet"
                 }
                 rule 20 {
                     action accept
                 }
             }
         }
     }
 }
 system {
     name-server 1.1.1.1
     name-server 8.8.8.8
 }
"#;
        let tree = parse(text, &grammar()).unwrap();
        assert_eq!(tree.root().children().len(), 2);

        let expected = r#" firewall {
     ipv4 {
         forward {
             filter {
                 default-action drop
                 rule 10 {
                     action drop
                     description "Block telnet"
                 }
                 rule 20 {
                     action accept
                 }
             }
         }
     }
 }
 system {
     name-server 8.8.8.8
     name-server 1.1.1.1
 }
"#;
        assert_eq!(serialize(&tree).unwrap(), expected);
    }

    #[test]
    fn test_quoted_values() {
        let text = " nat {\n     source {\n         rule 100 {\n             description \"Outbound NAT\"\n         }\n     }\n }\n";
        let tree = parse(text, &grammar()).unwrap();
        let rule = &tree.root().children()[0].children()[0].children()[0];
        assert_eq!(rule.children()[0].value(), Some("Outbound NAT"));
        assert_eq!(serialize(&tree).unwrap(), text);
    }

    #[test]
    fn test_tag_value_with_space_is_quoted() {
        let text = " firewall {\n     group {\n         address-group \"LAN HOSTS\" {\n             address 10.0.0.1\n         }\n     }\n }\n";
        let tree = parse(text, &grammar()).unwrap();
        let group = &tree.root().children()[0].children()[0].children()[0];
        assert_eq!(group.value(), Some("LAN HOSTS"));
        assert_eq!(serialize(&tree).unwrap(), text);
    }

    #[test]
    fn test_unknown_token() {
        let err = parse(" service {\n     telnet {\n     }\n }\n", &grammar()).unwrap_err();
        assert!(matches!(err, VyosError::GrammarMismatch { ref token, line: 2, .. } if token == "telnet"));
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let text = "/* generated */\n service {\n     ssh {\n         port 22\n     }\n }\n";
        let tree = parse(text, &grammar()).unwrap();
        assert_eq!(tree.size(), 4);
    }
}
