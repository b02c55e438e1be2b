use crate::frontend::token::{Position, Token, TokenKind};
use crate::utils::config::lexer::{COMMENT_CLOSE, COMMENT_OPEN};
use crate::utils::diagnostics::Diagnostic;
use std::{iter::Peekable, str::Chars};

/// Lazy scanner over one source buffer.
///
/// Yields `Ok(token)` for every token, `Err(diagnostic)` for every character
/// it cannot classify (scanning then resumes at the next character), and
/// finishes with exactly one `Eof` token.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Rewind to the start of the buffer.
    pub fn reset(&mut self) {
        *self = Lexer::new(self.source);
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn at_pair(&mut self, pair: (char, char)) -> bool {
        self.chars.peek() == Some(&pair.0) && self.peek_second() == Some(pair.1)
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), Diagnostic> {
        loop {
            let next = self.chars.peek().copied();
            match next {
                Some(ch) if is_whitespace(ch) => self.scan_whitespace(),
                Some(_) if self.at_pair(COMMENT_OPEN) => self.scan_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if !is_whitespace(ch) {
                break;
            }
            self.bump();
        }
    }

    fn scan_comment(&mut self) -> Result<(), Diagnostic> {
        let start = self.current_position();
        self.bump(); // Consume '('
        self.bump(); // Consume '*'
        let mut depth = 1usize;
        while depth > 0 {
            if self.at_pair(COMMENT_OPEN) {
                self.bump();
                self.bump();
                depth += 1;
            } else if self.at_pair(COMMENT_CLOSE) {
                self.bump();
                self.bump();
                depth -= 1;
            } else if self.bump().is_none() {
                return Err(Diagnostic::UnterminatedConstruct {
                    construct: "comment",
                    expected: vec!["*)"],
                    position: start,
                });
            }
        }
        Ok(())
    }

    fn scan_token(&mut self, ch: char, position: Position) -> Result<Token, Diagnostic> {
        match ch {
            c if is_identifier_head(c) => Ok(self.scan_identifier(position)),
            c if c.is_ascii_digit() => Ok(self.scan_number(position)),
            ':' => Ok(self.scan_colon(position)),
            '<' => Ok(self.scan_less_than(position)),
            '>' => Ok(self.scan_greater_than(position)),
            c => self.scan_single_char_token(c, position),
        }
    }

    fn scan_identifier(&mut self, position: Position) -> Token {
        let mut identifier = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !is_identifier_body(ch) {
                break;
            }
            identifier.push(ch);
            self.bump();
        }
        let kind = TokenKind::keyword(&identifier).unwrap_or(TokenKind::Identifier);
        Token::new(kind, identifier, position)
    }

    fn scan_number(&mut self, position: Position) -> Token {
        let mut digits = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.bump();
        }
        Token::new(TokenKind::IntegerLiteral, digits, position)
    }

    fn scan_colon(&mut self, position: Position) -> Token {
        self.bump(); // Consume ':'
        if self.chars.peek() == Some(&'=') {
            self.bump();
            Token::new(TokenKind::ColonEqual, ":=", position)
        } else {
            Token::new(TokenKind::Colon, ":", position)
        }
    }

    fn scan_less_than(&mut self, position: Position) -> Token {
        self.bump(); // Consume '<'
        if self.chars.peek() == Some(&'=') {
            self.bump();
            Token::new(TokenKind::LessEqual, "<=", position)
        } else {
            Token::new(TokenKind::Less, "<", position)
        }
    }

    fn scan_greater_than(&mut self, position: Position) -> Token {
        self.bump(); // Consume '>'
        if self.chars.peek() == Some(&'=') {
            self.bump();
            Token::new(TokenKind::GreaterEqual, ">=", position)
        } else {
            Token::new(TokenKind::Greater, ">", position)
        }
    }

    fn scan_single_char_token(&mut self, ch: char, position: Position) -> Result<Token, Diagnostic> {
        self.bump(); // Consume the character
        let kind = match ch {
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Period,
            '=' => TokenKind::Equal,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '#' => TokenKind::Hash,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            _ => return Err(Diagnostic::LexicalError { position, ch }),
        };
        Ok(Token::new(kind, ch.to_string(), position))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Err(diagnostic) = self.skip_whitespace_and_comments() {
            return Some(Err(diagnostic));
        }
        let position = self.current_position();
        match self.chars.peek().copied() {
            Some(ch) => Some(self.scan_token(ch, position)),
            None => {
                self.finished = true;
                Some(Ok(Token::eof(position)))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

fn is_identifier_head(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_body(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Scan a whole buffer, splitting tokens from lexical diagnostics.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    for item in Lexer::new(source) {
        match item {
            Ok(token) => tokens.push(token),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }
    (tokens, diagnostics)
}
