//! Tokenizer and block parser for the configuration grammar.
//!
//! ```text
//! conf      = *directive
//! directive = word *word ( ";" / "{" conf "}" )
//! word      = bare / "'" chars "'" / DQUOTE chars DQUOTE
//! ```
//!
//! `#` starts a comment running to the end of the line.

use crate::conf::{ConfError, Directive};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Semicolon,
    BlockStart,
    BlockEnd,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { chars: src.chars().peekable(), line: 1 }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.chars.peek() {
            match c {
                '\n' => {
                    self.line += 1;
                    self.chars.next();
                }
                '#' => {
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.chars.next();
                    }
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                _ => return,
            }
        }
    }

    /// Returns the next token together with the line it started on.
    fn next_token(&mut self) -> Result<Option<(Token, usize)>, ConfError> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let Some(c) = self.chars.next() else {
            return Ok(None);
        };

        let token = match c {
            ';' => Token::Semicolon,
            '{' => Token::BlockStart,
            '}' => Token::BlockEnd,
            '"' | '\'' => Token::Word(self.quoted(c)?),
            c => Token::Word(self.bare(c)),
        };

        Ok(Some((token, line)))
    }

    fn quoted(&mut self, quote: char) -> Result<String, ConfError> {
        let mut word = String::new();
        loop {
            match self.chars.next() {
                None => return Err(ConfError::UnexpectedEof { expected: "closing quote" }),
                Some(c) if c == quote => return Ok(word),
                Some('\\') => match self.chars.next() {
                    None => return Err(ConfError::UnexpectedEof { expected: "closing quote" }),
                    Some('n') => word.push('\n'),
                    Some('t') => word.push('\t'),
                    Some('r') => word.push('\r'),
                    Some(c) => word.push(c),
                },
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    word.push(c);
                }
            }
        }
    }

    fn bare(&mut self, first: char) -> String {
        let mut word = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, ';' | '{' | '}') {
                break;
            }
            word.push(c);
            self.chars.next();
        }
        word
    }
}

/// Parses a whole configuration source into its top level directives.
pub(crate) fn parse(src: &str) -> Result<Vec<Directive>, ConfError> {
    let mut lexer = Lexer::new(src);
    parse_block(&mut lexer, false)
}

fn parse_block(lexer: &mut Lexer<'_>, nested: bool) -> Result<Vec<Directive>, ConfError> {
    let mut directives = vec![];

    loop {
        match lexer.next_token()? {
            None if nested => return Err(ConfError::UnexpectedEof { expected: "\"}\"" }),
            None => return Ok(directives),
            Some((Token::BlockEnd, _)) if nested => return Ok(directives),
            Some((Token::Word(name), line)) => directives.push(parse_directive(lexer, name, line)?),
            Some((token, line)) => return Err(unexpected(&token, line)),
        }
    }
}

fn parse_directive(lexer: &mut Lexer<'_>, name: String, line: usize) -> Result<Directive, ConfError> {
    let mut args = vec![];

    loop {
        match lexer.next_token()? {
            None => return Err(ConfError::UnexpectedEof { expected: "\";\" or \"}\"" }),
            Some((Token::Word(arg), _)) => args.push(arg),
            Some((Token::Semicolon, _)) => return Ok(Directive::new(name, args, line, None)),
            Some((Token::BlockStart, _)) => {
                let block = parse_block(lexer, true)?;
                return Ok(Directive::new(name, args, line, Some(block)));
            }
            Some((token @ Token::BlockEnd, line)) => return Err(unexpected(&token, line)),
        }
    }
}

fn unexpected(token: &Token, line: usize) -> ConfError {
    let token = match token {
        Token::Word(word) => word.as_str(),
        Token::Semicolon => ";",
        Token::BlockStart => "{",
        Token::BlockEnd => "}",
    };
    ConfError::UnexpectedToken { token: token.to_string(), line }
}
