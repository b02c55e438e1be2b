//! Canonical source rendering of a tree.
//!
//! The output re-parses to a structurally equal tree, so the printer refuses
//! names that would not scan back as a single identifier.

use crate::ast::{
    Block, CompilationUnit, Declaration, Expression, Factor, FormalParameters, Import, Qualident,
    SimpleExpr, Statement, Term,
};
use crate::frontend::token::TokenKind;
use crate::utils::config::printer::{IDENTIFIER_PATTERN, INDENT};
use crate::utils::errors::{AmanError, AmanResult};
use regex::Regex;
use std::fmt::{self, Write};
use std::sync::OnceLock;

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"))
}

/// True if `name` scans as one identifier token.
pub fn is_printable_identifier(name: &str) -> bool {
    identifier_regex().is_match(name) && TokenKind::keyword(name).is_none()
}

pub fn print_unit(unit: &CompilationUnit) -> AmanResult<String> {
    let mut printer = Printer::new();
    printer.unit(unit)?;
    Ok(printer.finish())
}

pub fn print_expression(expr: &Expression) -> AmanResult<String> {
    Printer::new().expression(expr)
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn new() -> Self {
        Self::default()
    }

    fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    /// Write one indented, newline-terminated line.
    fn line(&mut self, level: usize, args: fmt::Arguments) -> AmanResult<()> {
        self.indent(level);
        self.out.write_fmt(args)?;
        self.out.push('\n');
        Ok(())
    }

    fn ident<'n>(&self, name: &'n str) -> AmanResult<&'n str> {
        if is_printable_identifier(name) {
            Ok(name)
        } else {
            Err(AmanError::invalid_identifier(name))
        }
    }

    fn ident_list(&self, names: &[String]) -> AmanResult<String> {
        let checked = names
            .iter()
            .map(|n| self.ident(n))
            .collect::<AmanResult<Vec<_>>>()?;
        Ok(checked.join(", "))
    }

    fn qualident(&self, q: &Qualident) -> AmanResult<String> {
        if q.segments.is_empty() {
            return Err(AmanError::invalid_identifier(""));
        }
        let checked = q
            .segments
            .iter()
            .map(|s| self.ident(s))
            .collect::<AmanResult<Vec<_>>>()?;
        Ok(checked.join("."))
    }

    fn unit(&mut self, unit: &CompilationUnit) -> AmanResult<()> {
        let name = self.ident(&unit.name)?;
        self.line(0, format_args!("MODULE {};", name))?;
        for import in &unit.imports {
            self.import(import)?;
        }
        self.block(&unit.block, 0)?;
        let end_name = self.ident(&unit.end_name)?;
        self.line(0, format_args!("END {}.", end_name))
    }

    fn import(&mut self, import: &Import) -> AmanResult<()> {
        let names = self.ident_list(&import.names)?;
        match &import.from_module {
            Some(module) => {
                let module = self.ident(module)?;
                self.line(0, format_args!("FROM {} IMPORT {};", module, names))
            }
            None => self.line(0, format_args!("IMPORT {};", names)),
        }
    }

    fn block(&mut self, block: &Block, level: usize) -> AmanResult<()> {
        for decl in &block.declarations {
            self.declaration(decl, level + 1)?;
        }
        if !block.statements.is_empty() {
            self.line(level, format_args!("BEGIN"))?;
            self.statements(&block.statements, level + 1)?;
        }
        Ok(())
    }

    fn declaration(&mut self, decl: &Declaration, level: usize) -> AmanResult<()> {
        match decl {
            Declaration::Const(c) => {
                let name = self.ident(&c.name)?;
                let value = self.expression(&c.value)?;
                self.line(level, format_args!("CONST {} = {};", name, value))
            }
            Declaration::Var(v) => {
                let names = self.ident_list(&v.names)?;
                let type_name = self.qualident(&v.type_name)?;
                self.line(level, format_args!("VAR {}: {};", names, type_name))
            }
            Declaration::Procedure(p) => {
                let name = self.ident(&p.name)?;
                let params = match &p.params {
                    Some(params) => self.formal_parameters(params)?,
                    None => String::new(),
                };
                self.line(level, format_args!("PROCEDURE {}{};", name, params))?;
                self.block(&p.body, level)?;
                let end_name = self.ident(&p.end_name)?;
                self.line(level, format_args!("END {};", end_name))
            }
        }
    }

    fn formal_parameters(&self, params: &FormalParameters) -> AmanResult<String> {
        let mut rendered = Vec::with_capacity(params.params.len());
        for param in &params.params {
            let names = self.ident_list(&param.names)?;
            let type_name = self.qualident(&param.type_name)?;
            let prefix = if param.is_var { "VAR " } else { "" };
            rendered.push(format!("{}{}: {}", prefix, names, type_name));
        }
        let mut out = format!("({})", rendered.join("; "));
        if let Some(ret) = &params.return_type {
            out.push_str(": ");
            out.push_str(&self.qualident(ret)?);
        }
        Ok(out)
    }

    fn statements(&mut self, stmts: &[Statement], level: usize) -> AmanResult<()> {
        for (i, stmt) in stmts.iter().enumerate() {
            self.statement(stmt, level)?;
            if i + 1 < stmts.len() {
                self.out.push(';');
            }
            self.out.push('\n');
        }
        Ok(())
    }

    // Leaves the last line of the statement open so the caller can add ';'.
    fn statement(&mut self, stmt: &Statement, level: usize) -> AmanResult<()> {
        match stmt {
            Statement::Assign { target, value } => {
                let text = format!("{} := {}", self.qualident(target)?, self.expression(value)?);
                self.indent(level);
                self.out.push_str(&text);
            }
            Statement::Call { target, args } => {
                let text = format!("{}({})", self.qualident(target)?, self.expression_list(args)?);
                self.indent(level);
                self.out.push_str(&text);
            }
            Statement::BareRef { target } => {
                let text = self.qualident(target)?;
                self.indent(level);
                self.out.push_str(&text);
            }
            Statement::If {
                cond,
                then_body,
                else_body,
            } => {
                let cond = self.expression(cond)?;
                self.line(level, format_args!("IF {} THEN", cond))?;
                self.statements(then_body, level + 1)?;
                if let Some(else_body) = else_body {
                    self.line(level, format_args!("ELSE"))?;
                    self.statements(else_body, level + 1)?;
                }
                self.indent(level);
                self.out.push_str("END");
            }
            Statement::While { cond, body } => {
                let cond = self.expression(cond)?;
                self.line(level, format_args!("WHILE {} DO", cond))?;
                self.statements(body, level + 1)?;
                self.indent(level);
                self.out.push_str("END");
            }
            Statement::Return { value } => {
                let text = match value {
                    Some(value) => format!("RETURN {}", self.expression(value)?),
                    None => "RETURN".to_string(),
                };
                self.indent(level);
                self.out.push_str(&text);
            }
        }
        Ok(())
    }

    fn expression_list(&self, exprs: &[Expression]) -> AmanResult<String> {
        let rendered = exprs
            .iter()
            .map(|e| self.expression(e))
            .collect::<AmanResult<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    fn expression(&self, expr: &Expression) -> AmanResult<String> {
        match expr {
            Expression::Relational { op, left, right } => Ok(format!(
                "{} {} {}",
                self.simple_expression(left)?,
                op.token(),
                self.simple_expression(right)?
            )),
            Expression::Simple(simple) => self.simple_expression(simple),
        }
    }

    fn simple_expression(&self, simple: &SimpleExpr) -> AmanResult<String> {
        let mut out = String::new();
        if let Some(sign) = simple.sign {
            out.push_str(sign.token().spelling());
        }
        out.push_str(&self.term(&simple.first)?);
        for (op, term) in &simple.rest {
            write!(out, " {} {}", op.token(), self.term(term)?)?;
        }
        Ok(out)
    }

    fn term(&self, term: &Term) -> AmanResult<String> {
        let mut out = self.factor(&term.first)?;
        for (op, factor) in &term.rest {
            write!(out, " {} {}", op.token(), self.factor(factor)?)?;
        }
        Ok(out)
    }

    fn factor(&self, factor: &Factor) -> AmanResult<String> {
        match factor {
            Factor::IntLit(value) => Ok(value.to_string()),
            Factor::Paren(inner) => Ok(format!("({})", self.expression(inner)?)),
            Factor::Not(operand) => Ok(format!("NOT {}", self.factor(operand)?)),
            Factor::Ref { target, args } => {
                let target = self.qualident(target)?;
                match args {
                    Some(args) => Ok(format!("{}({})", target, self.expression_list(args)?)),
                    None => Ok(target),
                }
            }
        }
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = print_unit(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = print_expression(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
