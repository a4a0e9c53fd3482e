// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;
use crate::VyosError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// One shell word, quotes removed.
    Word(String),
    Eof,
}

/// Splits one `set` command line into shell words.
///
/// Whitespace separates words. Single- and double-quoted runs are kept
/// together with their quotes removed, and adjacent runs join into one
/// word, so `'a b'c` is the single word `a bc`.
pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Lex `input`, reporting errors against line `line`.
    pub fn new(input: &'a str, line: usize) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line,
            column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn next_token(&mut self) -> Result<Token, VyosError> {
        tokenizer::next_token(self)
    }

    /// Drain the input into its words.
    pub fn words(mut self) -> Result<Vec<String>, VyosError> {
        let mut words = Vec::new();
        while let Token::Word(word) = self.next_token()? {
            words.push(word);
        }
        Ok(words)
    }
}

/// Split a single line into shell words.
pub fn split_words(line: &str, lineno: usize) -> Result<Vec<String>, VyosError> {
    Lexer::new(line, lineno).words()
}
