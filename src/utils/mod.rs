pub mod config;
pub mod diagnostics;
pub mod errors;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use errors::{AmanError, AmanResult};
