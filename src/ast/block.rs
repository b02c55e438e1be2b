use crate::ast::declarations::Declaration;
use crate::ast::statements::Statement;

/// Declarations followed by an optional `BEGIN` section, closed by `END`.
///
/// `statements` is empty when there is no `BEGIN` section, and also when
/// every statement after `BEGIN` failed to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(declarations: Vec<Declaration>, statements: Vec<Statement>) -> Self {
        Self {
            declarations,
            statements,
        }
    }
}
