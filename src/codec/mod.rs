// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use crate::ast::ConfigTree;
use crate::grammar::Grammar;
use crate::VyosError;

pub mod boot;
pub mod set;
pub mod show;

mod block;

pub(crate) use block::missing_tag_value;

/// The three text formats a VyOS configuration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `/config/config.boot`
    Boot,
    /// `show` in configuration mode.
    Show,
    /// `show | commands`
    Set,
}

impl Dialect {
    pub fn parse(self, text: &str, grammar: &Grammar) -> Result<ConfigTree, VyosError> {
        match self {
            Dialect::Boot => boot::parse(text, grammar),
            Dialect::Show => show::parse(text, grammar),
            Dialect::Set => set::parse(text, grammar),
        }
    }

    pub fn serialize(self, tree: &ConfigTree) -> Result<String, VyosError> {
        match self {
            Dialect::Boot => boot::serialize(tree),
            Dialect::Show => show::serialize(tree),
            Dialect::Set => set::serialize(tree),
        }
    }

    /// Guess the format from the first line that is not blank or a comment.
    /// Returns `None` when there is no such line.
    pub fn detect(text: &str) -> Option<Dialect> {
        let line = text.lines().find(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('/') && !trimmed.starts_with('#')
        })?;

        if line.trim_start().starts_with("set ") {
            Some(Dialect::Set)
        } else if line.starts_with(char::is_whitespace) {
            Some(Dialect::Show)
        } else {
            Some(Dialect::Boot)
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dialect::Boot => "boot",
            Dialect::Show => "show",
            Dialect::Set => "set",
        };
        f.write_str(s)
    }
}

impl FromStr for Dialect {
    type Err = VyosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boot" | "config.boot" => Ok(Dialect::Boot),
            "show" => Ok(Dialect::Show),
            "set" | "commands" => Ok(Dialect::Set),
            other => Err(VyosError::RuntimeError {
                message: format!("Unknown configuration format '{}'", other),
                hint: Some("Use boot, show or set".into()),
                code: Some(530),
            }),
        }
    }
}
