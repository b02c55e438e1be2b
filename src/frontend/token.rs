use std::fmt;

/// 1-based source location of a token or diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // keywords
    Module,
    From,
    Import,
    Begin,
    End,
    Const,
    Var,
    Procedure,
    Return,
    If,
    Then,
    Else,
    While,
    Do,
    Or,
    Div,
    Mod,
    And,
    Not,
    // punctuation
    Semicolon,
    Period,
    Equal,
    Colon,
    LParen,
    RParen,
    ColonEqual,
    Comma,
    Hash,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    // literals
    Identifier,
    IntegerLiteral,
    Eof,
}

impl TokenKind {
    /// Exact, case-sensitive keyword lookup.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "MODULE" => TokenKind::Module,
            "FROM" => TokenKind::From,
            "IMPORT" => TokenKind::Import,
            "BEGIN" => TokenKind::Begin,
            "END" => TokenKind::End,
            "CONST" => TokenKind::Const,
            "VAR" => TokenKind::Var,
            "PROCEDURE" => TokenKind::Procedure,
            "RETURN" => TokenKind::Return,
            "IF" => TokenKind::If,
            "THEN" => TokenKind::Then,
            "ELSE" => TokenKind::Else,
            "WHILE" => TokenKind::While,
            "DO" => TokenKind::Do,
            "OR" => TokenKind::Or,
            "DIV" => TokenKind::Div,
            "MOD" => TokenKind::Mod,
            "AND" => TokenKind::And,
            "NOT" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical spelling used in diagnostics and by the pretty-printer.
    pub fn spelling(&self) -> &'static str {
        match self {
            TokenKind::Module => "MODULE",
            TokenKind::From => "FROM",
            TokenKind::Import => "IMPORT",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Const => "CONST",
            TokenKind::Var => "VAR",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::Or => "OR",
            TokenKind::Div => "DIV",
            TokenKind::Mod => "MOD",
            TokenKind::And => "AND",
            TokenKind::Not => "NOT",
            TokenKind::Semicolon => ";",
            TokenKind::Period => ".",
            TokenKind::Equal => "=",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::ColonEqual => ":=",
            TokenKind::Comma => ",",
            TokenKind::Hash => "#",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Identifier => "Identifier",
            TokenKind::IntegerLiteral => "IntegerLiteral",
            TokenKind::Eof => "end of input",
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Module
                | TokenKind::From
                | TokenKind::Import
                | TokenKind::Begin
                | TokenKind::End
                | TokenKind::Const
                | TokenKind::Var
                | TokenKind::Procedure
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Then
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Or
                | TokenKind::Div
                | TokenKind::Mod
                | TokenKind::And
                | TokenKind::Not
        )
    }

    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::Hash
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
        )
    }

    /// Tokens that can begin an expression.
    pub fn starts_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::LParen
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Not
                | TokenKind::Identifier
                | TokenKind::IntegerLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::IntegerLiteral => write!(f, "{}", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}
