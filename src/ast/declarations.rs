use crate::ast::block::Block;
use crate::ast::expressions::{Expression, Ident, Qualident};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Const(ConstDecl),
    Var(VarDecl),
    Procedure(ProcedureDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub name: Ident,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub names: Vec<Ident>,
    pub type_name: Qualident,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDecl {
    pub name: Ident,
    pub params: Option<FormalParameters>,
    pub body: Block,
    /// Closing name; equality with `name` is left to semantic analysis.
    pub end_name: Ident,
}

/// `( [param {; param}] ) [: qualident]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormalParameters {
    pub params: Vec<FormalParameter>,
    pub return_type: Option<Qualident>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalParameter {
    pub is_var: bool,
    pub names: Vec<Ident>,
    pub type_name: Qualident,
}

impl Declaration {
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Const(decl) => Some(&decl.name),
            Declaration::Procedure(decl) => Some(&decl.name),
            Declaration::Var(_) => None,
        }
    }

    pub fn as_procedure(&self) -> Option<&ProcedureDecl> {
        match self {
            Declaration::Procedure(decl) => Some(decl),
            _ => None,
        }
    }
}

impl VarDecl {
    pub fn new(names: &[&str], type_name: &str) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            type_name: Qualident::path(type_name),
        }
    }
}

impl FormalParameter {
    pub fn new(is_var: bool, names: &[&str], type_name: &str) -> Self {
        Self {
            is_var,
            names: names.iter().map(|n| n.to_string()).collect(),
            type_name: Qualident::path(type_name),
        }
    }
}
