use crate::ast::block::Block;
use crate::ast::expressions::Ident;

/// Root of the tree: `MODULE name; imports block endName.`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub name: Ident,
    pub imports: Vec<Import>,
    pub block: Block,
    /// Closing name; equality with `name` is left to semantic analysis.
    pub end_name: Ident,
}

/// `[FROM module] IMPORT a, b;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub from_module: Option<Ident>,
    pub names: Vec<Ident>,
}

impl Import {
    pub fn new(from_module: Option<&str>, names: &[&str]) -> Self {
        Self {
            from_module: from_module.map(str::to_string),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}
