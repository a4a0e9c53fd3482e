pub mod ast;
pub mod codec;
pub mod error;
pub mod export;
pub mod grammar;
pub mod lexer;
pub mod merge;
pub mod quoting;

pub use ast::{ConfigNode, ConfigTree};
pub use codec::Dialect;
pub use error::VyosError;
pub use grammar::{Grammar, GrammarNode, NodeKind};

#[cfg(test)]
pub(crate) mod testutil {
    use crate::Grammar;

    pub const BOOT_FIXTURE: &str = include_str!("../testdata/config.boot.1");
    pub const SHOW_FIXTURE: &str = include_str!("../testdata/config.show.1");
    pub const SET_FIXTURE: &str = include_str!("../testdata/config.set.1");

    pub fn grammar() -> Grammar {
        Grammar::from_json_str(include_str!("../testdata/grammar.json"))
            .expect("Failed to load testdata/grammar.json")
    }

    /// Drop `//` comment lines and blank lines, which the writers never emit.
    pub fn strip_comments(text: &str) -> String {
        text.split_inclusive('\n')
            .filter(|line| !line.starts_with("//") && *line != "\n")
            .collect()
    }
}
