use std::{fs::File, io::Read, path::Path};

pub mod ast;
pub mod frontend;
pub mod utils;

pub const VERSION: &str = "0.1.0";

use crate::ast::CompilationUnit;
use crate::frontend::Parser;
use crate::utils::config::driver::SOURCE_EXTENSION;
use crate::utils::diagnostics::Diagnostic;
use crate::utils::errors::{AmanError, AmanResult};

/// Scan and parse one module. The tree is best-effort when diagnostics are returned.
pub fn parse_source(source: &str) -> (CompilationUnit, Vec<Diagnostic>) {
    Parser::new(source).parse()
}

/// Like [`parse_source`], but any diagnostic turns into an error.
pub fn parse_strict(source: &str) -> AmanResult<CompilationUnit> {
    let (unit, diagnostics) = parse_source(source);
    if diagnostics.is_empty() {
        Ok(unit)
    } else {
        Err(AmanError::SyntaxErrors {
            count: diagnostics.len(),
        })
    }
}

pub fn read(filename: &Path) -> AmanResult<String> {
    match filename.extension() {
        Some(ext) if ext == SOURCE_EXTENSION => {}
        _ => {
            return Err(AmanError::file_read_error(format!(
                "File must have a .{} extension",
                SOURCE_EXTENSION
            )));
        }
    }
    // Open the path in read-only mode, returns `io::Result<File>`
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
