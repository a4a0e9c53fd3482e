#[cfg(test)]
use super::*;
use std::io::Write;

use crate::testutil::grammar;

#[test]
fn test_load_fixture_grammar() {
    let grammar = grammar();
    let names = grammar.root().child_names();
    assert_eq!(names, vec!["firewall", "interfaces", "nat", "protocols", "service", "system"]);
}

#[test]
fn test_find_child_by_name() {
    let grammar = grammar();
    let interfaces = grammar.find_child_by_name("interfaces").expect("interfaces missing");
    assert_eq!(interfaces.kind(), NodeKind::Container);

    let ethernet = interfaces.find_child_by_name("ethernet").expect("ethernet missing");
    assert_eq!(ethernet.kind(), NodeKind::Tag);
    assert!(ethernet.is_repeatable());
    assert!(ethernet.has_value());

    assert!(interfaces.find_child_by_name("bogus").is_none());
}

#[test]
fn test_kind_flags() {
    let grammar = grammar();

    let system = grammar.lookup_path(&["system"]).unwrap();
    assert!(!system.is_repeatable());
    assert!(!system.has_value());

    let name_server = grammar.lookup_path(&["system", "name-server"]).unwrap();
    assert_eq!(name_server.kind(), NodeKind::Leaf);
    assert!(name_server.is_repeatable());
    assert!(name_server.has_value());

    let disable = grammar.lookup_path(&["interfaces", "ethernet", "disable"]).unwrap();
    assert!(!disable.has_value());
    assert!(!disable.is_repeatable());
    assert!(disable.children().is_empty());
}

#[test]
fn test_lookup_path_miss() {
    let grammar = grammar();
    assert!(grammar.lookup_path(&["service", "ssh", "nope"]).is_none());
    assert!(grammar.lookup_path(&[]).is_some());
}

#[test]
fn test_grouped_children_document() {
    let json = r#"{
        "name": "",
        "children": {
            "Nodes": [
                {
                    "name": "service",
                    "children": {
                        "TagNodes": [ { "name": "dhcp", "children": {} } ],
                        "LeafNodes": [ { "name": "enable", "has_value": false } ]
                    }
                }
            ]
        }
    }"#;
    let grammar = Grammar::from_json_str(json).expect("Failed to parse grouped grammar");

    let service = grammar.find_child_by_name("service").unwrap();
    assert_eq!(service.kind(), NodeKind::Container);
    // leaves come before tags in grouped documents
    assert_eq!(service.child_names(), vec!["enable", "dhcp"]);
    assert_eq!(service.find_child_by_name("dhcp").unwrap().kind(), NodeKind::Tag);
    assert!(!service.find_child_by_name("enable").unwrap().has_value());
}

#[test]
fn test_leaf_defaults_to_single_value() {
    let json = r#"{"type":"root","children":[{"type":"leafnode","name":"host-name"}]}"#;
    let grammar = Grammar::from_json_str(json).unwrap();
    let leaf = grammar.find_child_by_name("host-name").unwrap();
    assert!(leaf.has_value());
    assert!(!leaf.is_repeatable());
}

#[test]
fn test_leaf_with_children_is_rejected() {
    let json = r#"{"children":[{"type":"leafnode","name":"x","children":[{"type":"leafnode","name":"y"}]}]}"#;
    let err = Grammar::from_json_str(json).unwrap_err();
    assert!(matches!(err, VyosError::GrammarError { code: Some(404), .. }));
}

#[test]
fn test_untyped_list_child_is_rejected() {
    let json = r#"{"children":[{"name":"x"}]}"#;
    let err = Grammar::from_json_str(json).unwrap_err();
    assert!(matches!(err, VyosError::GrammarError { code: Some(402), .. }));
}

#[test]
fn test_invalid_json() {
    let err = Grammar::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, VyosError::GrammarError { code: Some(401), .. }));
}

#[test]
fn test_merge_grammar_fragments() {
    let mut base = Grammar::new(vec![GrammarNode::container(
        "service",
        vec![GrammarNode::container("ssh", vec![GrammarNode::leaf("port")])],
    )]);
    let fragment = Grammar::new(vec![
        GrammarNode::container(
            "service",
            vec![
                GrammarNode::container("ssh", vec![GrammarNode::multi_leaf("listen-address")]),
                GrammarNode::container("ntp", vec![]),
            ],
        ),
        GrammarNode::container("system", vec![GrammarNode::leaf("host-name")]),
    ]);

    base.merge(fragment);

    assert_eq!(base.root().child_names(), vec!["service", "system"]);
    let service = base.find_child_by_name("service").unwrap();
    assert_eq!(service.child_names(), vec!["ssh", "ntp"]);
    let ssh = service.find_child_by_name("ssh").unwrap();
    assert_eq!(ssh.child_names(), vec!["port", "listen-address"]);
}

#[test]
fn test_merge_does_not_touch_shared_fragment() {
    let fragment = Grammar::new(vec![GrammarNode::container(
        "service",
        vec![GrammarNode::leaf("x")],
    )]);
    let mut a = fragment.clone();
    a.merge(Grammar::new(vec![GrammarNode::container("service", vec![GrammarNode::leaf("y")])]));

    assert_eq!(a.lookup_path(&["service"]).unwrap().child_names(), vec!["x", "y"]);
    assert_eq!(fragment.lookup_path(&["service"]).unwrap().child_names(), vec!["x"]);
}

#[test]
fn test_from_file_and_fallback() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(include_str!("../../testdata/grammar.json").as_bytes())
        .expect("Failed to write grammar");

    let grammar = Grammar::from_file(file.path()).expect("Failed to load grammar file");
    assert!(grammar.find_child_by_name("nat").is_some());

    let missing = std::path::PathBuf::from("/nonexistent/grammar.json");
    let grammar = Grammar::from_file_with_fallback(missing.as_path(), file.path())
        .expect("Fallback grammar should load");
    assert!(grammar.find_child_by_name("system").is_some());

    let err = Grammar::from_file_with_fallback(missing.as_path(), missing.as_path()).unwrap_err();
    assert!(matches!(err, VyosError::FileError { .. }));
}
