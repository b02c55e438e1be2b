
// Abstract Syntax Tree definitions for the Aman front end.
// Every node family is a closed enum or plain struct; the tree is owned
// by the caller from the root `CompilationUnit` down.

mod block;
mod declarations;
mod expressions;
mod program;
mod statements;
pub mod printer;

pub use block::Block;
pub use declarations::{ConstDecl, Declaration, FormalParameter, FormalParameters, ProcedureDecl, VarDecl};
pub use expressions::{AddOp, Expression, Factor, Ident, MulOp, Qualident, RelOp, Sign, SimpleExpr, Term};
pub use program::{CompilationUnit, Import};
pub use statements::Statement;
