use super::*;
use super::scanner::{bump, skip_whitespace};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, VyosError> {
    skip_whitespace(lexer);

    if lexer.peek.is_none() {
        return Ok(Token::Eof);
    }

    let mut word = String::new();
    while let Some(ch) = lexer.peek {
        match ch {
            c if c.is_whitespace() => break,
            '\'' => tokenize_single_quoted(lexer, &mut word)?,
            '"' => tokenize_double_quoted(lexer, &mut word)?,
            '\\' => tokenize_escape(lexer, &mut word)?,
            c => {
                word.push(c);
                bump(lexer);
            }
        }
    }

    Ok(Token::Word(word))
}

/// `'...'`: backslash escapes follow the `set` writer, which emits `\'`,
/// `\\` and the Go-style control escapes (`\t`, `\x1b`, `\u0085`, ...).
/// A backslash before anything else is literal.
fn tokenize_single_quoted(lexer: &mut Lexer, word: &mut String) -> Result<(), VyosError> {
    let start = lexer.column + 1;
    bump(lexer); // consume opening quote

    loop {
        match bump(lexer) {
            Some('\'') => return Ok(()),
            Some('\\') => single_quoted_escape(lexer, word),
            Some(ch) => word.push(ch),
            None => return Err(unclosed('\'', lexer.line, start)),
        }
    }
}

fn single_quoted_escape(lexer: &mut Lexer, word: &mut String) {
    let decoded = match lexer.peek {
        Some('\'') => '\'',
        Some('\\') => '\\',
        Some('a') => '\u{07}',
        Some('b') => '\u{08}',
        Some('f') => '\u{0c}',
        Some('n') => '\n',
        Some('r') => '\r',
        Some('t') => '\t',
        Some('v') => '\u{0b}',
        Some('x') => return hex_escape(lexer, word, 'x', 2),
        Some('u') => return hex_escape(lexer, word, 'u', 4),
        _ => {
            word.push('\\');
            return;
        }
    };
    bump(lexer);
    word.push(decoded);
}

/// `\x` and `\u` with exactly `digits` hex digits; a short or invalid run is
/// kept as written.
fn hex_escape(lexer: &mut Lexer, word: &mut String, marker: char, digits: usize) {
    bump(lexer); // consume marker
    let mut raw = String::with_capacity(digits);
    while raw.len() < digits {
        match lexer.peek {
            Some(c) if c.is_ascii_hexdigit() => {
                raw.push(c);
                bump(lexer);
            }
            _ => break,
        }
    }

    let decoded = Some(&raw)
        .filter(|raw| raw.len() == digits)
        .and_then(|raw| u32::from_str_radix(raw, 16).ok())
        .and_then(char::from_u32);
    match decoded {
        Some(c) => word.push(c),
        None => {
            word.push('\\');
            word.push(marker);
            word.push_str(&raw);
        }
    }
}

/// `"..."`: backslash escapes `"`, `\`, `$` and backtick, as in a shell.
fn tokenize_double_quoted(lexer: &mut Lexer, word: &mut String) -> Result<(), VyosError> {
    let start = lexer.column + 1;
    bump(lexer); // consume opening quote

    loop {
        match bump(lexer) {
            Some('"') => return Ok(()),
            Some('\\') if matches!(lexer.peek, Some('"' | '\\' | '$' | '`')) => {
                if let Some(escaped) = bump(lexer) {
                    word.push(escaped);
                }
            }
            Some(ch) => word.push(ch),
            None => return Err(unclosed('"', lexer.line, start)),
        }
    }
}

/// A bare backslash takes the next character literally.
fn tokenize_escape(lexer: &mut Lexer, word: &mut String) -> Result<(), VyosError> {
    bump(lexer); // consume '\'
    match bump(lexer) {
        Some(ch) => {
            word.push(ch);
            Ok(())
        }
        None => Err(VyosError::SyntaxError {
            message: "Trailing backslash".into(),
            line: lexer.line,
            column: lexer.column,
            hint: Some("Quote the value or remove the backslash".into()),
            code: Some(103),
        }),
    }
}

fn unclosed(quote: char, line: usize, column: usize) -> VyosError {
    VyosError::UnclosedString {
        quote,
        line,
        column,
        hint: Some("String literal not closed".into()),
        code: Some(102),
    }
}
