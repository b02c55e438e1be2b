// Lexer constants
pub mod lexer {
    pub const COMMENT_OPEN: (char, char) = ('(', '*');
    pub const COMMENT_CLOSE: (char, char) = ('*', ')');
}

// Parser synchronizing sets used by panic-mode recovery
pub mod parser {
    use crate::frontend::token::TokenKind;

    /// Where a broken declaration resumes: next declaration or the block body.
    pub const DECLARATION_SYNC: &[TokenKind] = &[
        TokenKind::Semicolon,
        TokenKind::Const,
        TokenKind::Var,
        TokenKind::Procedure,
        TokenKind::Begin,
        TokenKind::End,
    ];

    /// Tokens that close a statement sequence; a broken statement resumes at
    /// the next `;` or at one of these.
    pub const SEQUENCE_END: &[TokenKind] = &[TokenKind::End];
    pub const THEN_BRANCH_END: &[TokenKind] = &[TokenKind::Else, TokenKind::End];

    pub const STATEMENT_START: &[TokenKind] = &[
        TokenKind::Identifier,
        TokenKind::If,
        TokenKind::While,
        TokenKind::Return,
    ];

    pub const IMPORT_SYNC: &[TokenKind] = &[
        TokenKind::Semicolon,
        TokenKind::From,
        TokenKind::Import,
        TokenKind::Const,
        TokenKind::Var,
        TokenKind::Procedure,
        TokenKind::Begin,
        TokenKind::End,
    ];

    /// Where a broken module header resumes.
    pub const HEADER_SYNC: &[TokenKind] = &[
        TokenKind::Module,
        TokenKind::Semicolon,
        TokenKind::From,
        TokenKind::Import,
        TokenKind::Const,
        TokenKind::Var,
        TokenKind::Procedure,
        TokenKind::Begin,
        TokenKind::End,
    ];

    pub const FORMAL_PARAMETER_SYNC: &[TokenKind] = &[
        TokenKind::Semicolon,
        TokenKind::RParen,
        TokenKind::Const,
        TokenKind::Procedure,
        TokenKind::Begin,
        TokenKind::End,
    ];

    /// Tokens that may legally follow a complete expression.
    pub const EXPRESSION_FOLLOW: &[&str] = &[";", ")", ",", "THEN", "DO", "ELSE", "END"];
}

// Pretty-printer layout
pub mod printer {
    pub const INDENT: &str = "  ";
    pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
}

// Command-line driver
pub mod driver {
    pub const SOURCE_EXTENSION: &str = "mod";
}
