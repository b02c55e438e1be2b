pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use parser::Parser;
pub use token::{Position, Token, TokenKind};
