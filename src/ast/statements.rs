use crate::ast::expressions::{Expression, Qualident};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Assign {
        target: Qualident,
        value: Expression,
    },
    Call {
        target: Qualident,
        args: Vec<Expression>,
    },
    /// A qualident with neither `:=` nor an argument list after it.
    BareRef {
        target: Qualident,
    },
    If {
        cond: Expression,
        then_body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
    },
    While {
        cond: Expression,
        body: Vec<Statement>,
    },
    Return {
        value: Option<Expression>,
    },
}

impl Statement {
    pub fn assign(target: &str, value: impl Into<Expression>) -> Self {
        Statement::Assign {
            target: Qualident::path(target),
            value: value.into(),
        }
    }

    pub fn call(target: &str, args: Vec<Expression>) -> Self {
        Statement::Call {
            target: Qualident::path(target),
            args,
        }
    }

    pub fn bare_ref(target: &str) -> Self {
        Statement::BareRef {
            target: Qualident::path(target),
        }
    }
}
