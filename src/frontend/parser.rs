use crate::ast::{
    AddOp, Block, CompilationUnit, ConstDecl, Declaration, Expression, Factor, FormalParameter,
    FormalParameters, Ident, Import, MulOp, ProcedureDecl, Qualident, RelOp, Sign, SimpleExpr,
    Statement, Term, VarDecl,
};
use crate::frontend::lexer::tokenize;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::config::parser::{
    DECLARATION_SYNC, EXPRESSION_FOLLOW, FORMAL_PARAMETER_SYNC, HEADER_SYNC,
    IMPORT_SYNC, SEQUENCE_END, STATEMENT_START, THEN_BRANCH_END,
};
use crate::utils::diagnostics::{Diagnostic, Diagnostics};

const FACTOR_START: &[&str] = &["IntegerLiteral", "(", "NOT", "Identifier"];

/// Recursive-descent parser, one method per grammar rule.
///
/// Grammar rules return `Option`: `None` means the construct was malformed,
/// a diagnostic has been reported, and the caller decides where to resume.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Diagnostics,
    last_error_at: Option<usize>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let (tokens, lexical) = tokenize(source);
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(lexical);
        Self::with_diagnostics(tokens, diagnostics)
    }

    /// Parse an already scanned stream; a missing trailing `Eof` is added.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::with_diagnostics(tokens, Diagnostics::new())
    }

    fn with_diagnostics(mut tokens: Vec<Token>, diagnostics: Diagnostics) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let position = tokens.last().map(|t| t.position).unwrap_or_default();
            tokens.push(Token::eof(position));
        }
        Self {
            tokens,
            pos: 0,
            diagnostics,
            last_error_at: None,
        }
    }

    /// Parse one compilation unit. A non-empty diagnostics list means the
    /// returned tree may be missing the constructs that failed.
    pub fn parse(mut self) -> (CompilationUnit, Vec<Diagnostic>) {
        let unit = self.compilation_unit();
        (unit, self.diagnostics.into_vec())
    }

    // ---- token cursor -------------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is(TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, rule: &'static str) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            self.report_unexpected(rule, &[kind.spelling()]);
            None
        }
    }

    fn identifier(&mut self, rule: &'static str) -> Option<Ident> {
        self.expect(TokenKind::Identifier, rule).map(|t| t.lexeme)
    }

    // ---- diagnostics and recovery ------------------------------------

    fn report_at(&mut self, index: usize, diagnostic: Diagnostic) {
        // one diagnostic per token keeps a single mistake from cascading
        if self.last_error_at == Some(index) {
            return;
        }
        self.last_error_at = Some(index);
        self.diagnostics.report(diagnostic);
    }

    fn report_unexpected(&mut self, rule: &'static str, expected: &[&'static str]) {
        let token = self.current();
        let diagnostic = if token.is(TokenKind::Eof) {
            Diagnostic::UnterminatedConstruct {
                construct: rule,
                expected: expected.to_vec(),
                position: token.position,
            }
        } else {
            Diagnostic::UnexpectedToken {
                rule,
                expected: expected.to_vec(),
                found: token.to_string(),
                position: token.position,
            }
        };
        self.report_at(self.pos, diagnostic);
    }

    fn skip_until(&mut self, sync: &[TokenKind]) {
        while !self.at(TokenKind::Eof) && !self.current().is_one_of(sync) {
            self.advance();
        }
    }

    /// Require `kind`; otherwise report, skip to `sync` and take `kind` if it is there.
    fn terminate(&mut self, kind: TokenKind, rule: &'static str, sync: &[TokenKind]) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.report_unexpected(rule, &[kind.spelling()]);
        self.skip_until(sync);
        self.eat(kind);
        false
    }

    /// `;` after a declaration entry. A missing `;` directly before the next
    /// entry or the next section is reported and parsing continues there.
    fn entry_terminator(&mut self, rule: &'static str) {
        if self.eat(TokenKind::Semicolon) {
            return;
        }
        self.report_unexpected(rule, &[TokenKind::Semicolon.spelling()]);
        if self.at(TokenKind::Identifier) || self.current().is_one_of(DECLARATION_SYNC) {
            return;
        }
        self.recover_declaration();
    }

    fn recover_declaration(&mut self) {
        self.skip_until(DECLARATION_SYNC);
        self.eat(TokenKind::Semicolon);
    }

    // ---- modules ------------------------------------------------------

    /**
     * compilationUnit = "MODULE" ident ";" { import } block ident "." .
     */
    fn compilation_unit(&mut self) -> CompilationUnit {
        const RULE: &str = "compilation unit";
        let mut name = Ident::new();
        if self.eat(TokenKind::Module) || self.recover_module_keyword() {
            name = self.identifier(RULE).unwrap_or_default();
            self.terminate(TokenKind::Semicolon, RULE, HEADER_SYNC);
        }

        let mut imports = Vec::new();
        while matches!(self.kind(), TokenKind::From | TokenKind::Import) {
            if let Some(import) = self.import() {
                imports.push(import);
            }
        }

        let block = self.block();
        let end_name = self.identifier(RULE).unwrap_or_default();
        if self.expect(TokenKind::Period, RULE).is_some() && !self.at(TokenKind::Eof) {
            self.report_unexpected(RULE, &[TokenKind::Eof.spelling()]);
        }

        CompilationUnit {
            name,
            imports,
            block,
            end_name,
        }
    }

    fn recover_module_keyword(&mut self) -> bool {
        self.report_unexpected("compilation unit", &[TokenKind::Module.spelling()]);
        self.skip_until(HEADER_SYNC);
        if self.eat(TokenKind::Module) {
            return true;
        }
        self.eat(TokenKind::Semicolon);
        false
    }

    /**
     * import = [ "FROM" ident ] "IMPORT" identList ";" .
     */
    fn import(&mut self) -> Option<Import> {
        const RULE: &str = "import";
        let from_module = if self.eat(TokenKind::From) {
            match self.identifier(RULE) {
                Some(module) => Some(module),
                None => return self.recover_import(),
            }
        } else {
            None
        };
        if self.expect(TokenKind::Import, RULE).is_none() {
            return self.recover_import();
        }
        let Some(names) = self.ident_list(RULE) else {
            return self.recover_import();
        };
        self.terminate(TokenKind::Semicolon, RULE, IMPORT_SYNC);
        Some(Import { from_module, names })
    }

    fn recover_import(&mut self) -> Option<Import> {
        self.skip_until(IMPORT_SYNC);
        self.eat(TokenKind::Semicolon);
        None
    }

    // ---- declarations -------------------------------------------------

    /**
     * block = { declaration } [ "BEGIN" statementSequence ] "END" .
     * declaration = "CONST" { constDecl ";" }
     *             | "VAR" { varDecl ";" }
     *             | procedureDecl ";" .
     */
    fn block(&mut self) -> Block {
        let mut declarations = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Const => self.const_group(&mut declarations),
                TokenKind::Var => self.var_group(&mut declarations),
                TokenKind::Procedure => {
                    if let Some(procedure) = self.procedure_declaration() {
                        declarations.push(Declaration::Procedure(procedure));
                    }
                    self.entry_terminator("procedure declaration");
                }
                TokenKind::Begin | TokenKind::End | TokenKind::Eof => break,
                _ => {
                    self.report_unexpected("block", &["CONST", "VAR", "PROCEDURE", "BEGIN", "END"]);
                    self.recover_declaration();
                }
            }
        }

        let statements = if self.eat(TokenKind::Begin) {
            self.statement_sequence(SEQUENCE_END)
        } else {
            Vec::new()
        };
        self.terminate(TokenKind::End, "block", SEQUENCE_END);
        Block::new(declarations, statements)
    }

    fn const_group(&mut self, declarations: &mut Vec<Declaration>) {
        self.advance(); // Consume CONST
        while self.at(TokenKind::Identifier) {
            match self.const_declaration() {
                Some(decl) => {
                    declarations.push(Declaration::Const(decl));
                    self.entry_terminator("constant declaration");
                }
                None => self.recover_declaration(),
            }
        }
    }

    fn var_group(&mut self, declarations: &mut Vec<Declaration>) {
        self.advance(); // Consume VAR
        while self.at(TokenKind::Identifier) {
            match self.var_declaration() {
                Some(decl) => {
                    declarations.push(Declaration::Var(decl));
                    self.entry_terminator("variable declaration");
                }
                None => self.recover_declaration(),
            }
        }
    }

    /**
     * constDecl = ident "=" expression .
     */
    fn const_declaration(&mut self) -> Option<ConstDecl> {
        const RULE: &str = "constant declaration";
        let name = self.identifier(RULE)?;
        self.expect(TokenKind::Equal, RULE)?;
        let value = self.expression()?;
        Some(ConstDecl { name, value })
    }

    /**
     * varDecl = identList ":" qualident .
     */
    fn var_declaration(&mut self) -> Option<VarDecl> {
        const RULE: &str = "variable declaration";
        let names = self.ident_list(RULE)?;
        self.expect(TokenKind::Colon, RULE)?;
        let type_name = self.qualident(RULE)?;
        Some(VarDecl { names, type_name })
    }

    /**
     * procedureDecl = "PROCEDURE" ident [ formalParameters ] ";" block ident .
     *
     * The nested block recurses back into `block`, so procedures nest to any depth.
     * The heading, body and closing name are always consumed so the token
     * stream stays balanced; the declaration is dropped if any part failed.
     */
    fn procedure_declaration(&mut self) -> Option<ProcedureDecl> {
        const RULE: &str = "procedure declaration";
        self.advance(); // Consume PROCEDURE
        let name = self.identifier(RULE);
        let params = if self.at(TokenKind::LParen) {
            self.formal_parameters().map(Some)
        } else {
            Some(None)
        };
        if !self.eat(TokenKind::Semicolon) {
            self.report_unexpected(RULE, &[TokenKind::Semicolon.spelling()]);
        }
        let body = self.block();
        let end_name = self.identifier(RULE);
        Some(ProcedureDecl {
            name: name?,
            params: params?,
            body,
            end_name: end_name?,
        })
    }

    /**
     * formalParameters = "(" [ formalParameter { ";" formalParameter } ] ")" [ ":" qualident ] .
     */
    fn formal_parameters(&mut self) -> Option<FormalParameters> {
        const RULE: &str = "formal parameters";
        self.advance(); // Consume '('
        let mut params = Vec::new();
        let mut complete = true;
        if matches!(self.kind(), TokenKind::Var | TokenKind::Identifier) {
            loop {
                match self.formal_parameter() {
                    Some(param) => params.push(param),
                    None => {
                        complete = false;
                        self.skip_until(FORMAL_PARAMETER_SYNC);
                    }
                }
                if !self.eat(TokenKind::Semicolon) {
                    break;
                }
            }
        }
        if self.expect(TokenKind::RParen, RULE).is_none() {
            self.skip_until(DECLARATION_SYNC);
            return None;
        }
        let return_type = if self.eat(TokenKind::Colon) {
            match self.qualident(RULE) {
                Some(ret) => Some(ret),
                None => {
                    self.skip_until(DECLARATION_SYNC);
                    return None;
                }
            }
        } else {
            None
        };
        complete.then_some(FormalParameters {
            params,
            return_type,
        })
    }

    /**
     * formalParameter = [ "VAR" ] identList ":" qualident .
     */
    fn formal_parameter(&mut self) -> Option<FormalParameter> {
        const RULE: &str = "formal parameter";
        let is_var = self.eat(TokenKind::Var);
        let names = self.ident_list(RULE)?;
        self.expect(TokenKind::Colon, RULE)?;
        let type_name = self.qualident(RULE)?;
        Some(FormalParameter {
            is_var,
            names,
            type_name,
        })
    }

    // ---- statements ---------------------------------------------------

    /**
     * statementSequence = statement { ";" statement } .
     *
     * `terminators` are the tokens that close this particular sequence. Any
     * other token after a statement is skipped up to the next `;` or terminator,
     * so an enclosing construct never sees an `END` that is not its own.
     */
    fn statement_sequence(&mut self, terminators: &[TokenKind]) -> Vec<Statement> {
        let mut sync = vec![TokenKind::Semicolon];
        sync.extend_from_slice(terminators);

        let mut statements = Vec::new();
        loop {
            match self.statement() {
                Some(stmt) => statements.push(stmt),
                None => self.skip_until(&sync),
            }
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.current().is_one_of(STATEMENT_START) {
                self.report_unexpected("statement sequence", &[TokenKind::Semicolon.spelling()]);
                continue;
            }
            if self.at(TokenKind::Eof) || self.current().is_one_of(terminators) {
                break;
            }
            let expected: Vec<&'static str> = sync.iter().map(TokenKind::spelling).collect();
            self.report_unexpected("statement sequence", &expected);
            self.advance();
            self.skip_until(&sync);
            if !self.eat(TokenKind::Semicolon) {
                break;
            }
        }
        statements
    }

    /**
     * statement = qualident ( ":=" expression | [ "(" [ expList ] ")" ] )
     *           | ifStatement | whileStatement | "RETURN" [ expression ] .
     */
    fn statement(&mut self) -> Option<Statement> {
        match self.kind() {
            TokenKind::Identifier => self.designator_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Return => self.return_statement(),
            _ => {
                self.report_unexpected("statement", &["Identifier", "IF", "WHILE", "RETURN"]);
                None
            }
        }
    }

    // The qualident is parsed first; the token after it decides the form.
    fn designator_statement(&mut self) -> Option<Statement> {
        const RULE: &str = "statement";
        let target = self.qualident(RULE)?;
        match self.kind() {
            TokenKind::ColonEqual => {
                self.advance();
                let value = self.expression()?;
                Some(Statement::Assign { target, value })
            }
            TokenKind::LParen => {
                let args = self.actual_parameters(RULE)?;
                Some(Statement::Call { target, args })
            }
            _ => Some(Statement::BareRef { target }),
        }
    }

    /**
     * ifStatement = "IF" expression "THEN" statementSequence
     *               [ "ELSE" statementSequence ] "END" .
     */
    fn if_statement(&mut self) -> Option<Statement> {
        const RULE: &str = "if statement";
        self.advance(); // Consume IF
        let cond = self.condition(TokenKind::Then, RULE);
        let then_body = self.statement_sequence(THEN_BRANCH_END);
        let else_body = if self.eat(TokenKind::Else) {
            Some(self.statement_sequence(SEQUENCE_END))
        } else {
            None
        };
        self.expect(TokenKind::End, RULE)?;
        Some(Statement::If {
            cond: cond?,
            then_body,
            else_body,
        })
    }

    /**
     * whileStatement = "WHILE" expression "DO" statementSequence "END" .
     */
    fn while_statement(&mut self) -> Option<Statement> {
        const RULE: &str = "while statement";
        self.advance(); // Consume WHILE
        let cond = self.condition(TokenKind::Do, RULE);
        let body = self.statement_sequence(SEQUENCE_END);
        self.expect(TokenKind::End, RULE)?;
        Some(Statement::While { cond: cond?, body })
    }

    fn return_statement(&mut self) -> Option<Statement> {
        self.advance(); // Consume RETURN
        let value = if self.kind().starts_expression() {
            Some(self.expression()?)
        } else {
            None
        };
        Some(Statement::Return { value })
    }

    // Guard expression plus its keyword; a missing keyword is reported and assumed.
    fn condition(&mut self, keyword: TokenKind, rule: &'static str) -> Option<Expression> {
        let cond = self.expression();
        if cond.is_none() {
            self.skip_until(&[keyword, TokenKind::Semicolon, TokenKind::End]);
        }
        if !self.eat(keyword) {
            self.report_unexpected(rule, &[keyword.spelling()]);
        }
        cond
    }

    fn actual_parameters(&mut self, rule: &'static str) -> Option<Vec<Expression>> {
        self.advance(); // Consume '('
        let args = if self.kind().starts_expression() {
            self.expression_list()?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::RParen, rule)?;
        Some(args)
    }

    // ---- expressions --------------------------------------------------

    /**
     * expression = simpleExpression [ relation simpleExpression ] .
     */
    fn expression(&mut self) -> Option<Expression> {
        let left = self.simple_expression()?;
        let Some(op) = RelOp::from_token(self.kind()) else {
            return Some(Expression::Simple(left));
        };
        self.advance();
        let right = self.simple_expression()?;
        if self.kind().is_relation() {
            // relations do not chain
            self.report_unexpected("expression", EXPRESSION_FOLLOW);
            return None;
        }
        Some(Expression::Relational { op, left, right })
    }

    /**
     * simpleExpression = [ "+" | "-" ] term { ( "+" | "-" | "OR" ) term } .
     */
    fn simple_expression(&mut self) -> Option<SimpleExpr> {
        let sign = Sign::from_token(self.kind());
        if sign.is_some() {
            self.advance();
        }
        let first = self.term()?;
        let mut rest = Vec::new();
        while let Some(op) = AddOp::from_token(self.kind()) {
            self.advance();
            rest.push((op, self.term()?));
        }
        Some(SimpleExpr { sign, first, rest })
    }

    /**
     * term = factor { ( "*" | "/" | "DIV" | "MOD" | "AND" ) factor } .
     */
    fn term(&mut self) -> Option<Term> {
        let first = self.factor()?;
        let mut rest = Vec::new();
        while let Some(op) = MulOp::from_token(self.kind()) {
            self.advance();
            rest.push((op, self.factor()?));
        }
        Some(Term { first, rest })
    }

    /**
     * factor = integer | "(" expression ")" | "NOT" factor
     *        | qualident [ "(" [ expList ] ")" ] .
     */
    fn factor(&mut self) -> Option<Factor> {
        match self.kind() {
            TokenKind::IntegerLiteral => {
                let index = self.pos;
                let token = self.advance();
                match token.lexeme.parse::<i64>() {
                    Ok(value) => Some(Factor::IntLit(value)),
                    Err(_) => {
                        self.report_at(
                            index,
                            Diagnostic::InvalidInteger {
                                lexeme: token.lexeme,
                                position: token.position,
                            },
                        );
                        None
                    }
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "factor")?;
                Some(Factor::Paren(Box::new(inner)))
            }
            TokenKind::Not => {
                self.advance();
                let operand = self.factor()?;
                Some(Factor::Not(Box::new(operand)))
            }
            TokenKind::Identifier => {
                let target = self.qualident("factor")?;
                let args = if self.at(TokenKind::LParen) {
                    Some(self.actual_parameters("factor")?)
                } else {
                    None
                };
                Some(Factor::Ref { target, args })
            }
            _ => {
                self.report_unexpected("factor", FACTOR_START);
                None
            }
        }
    }

    /**
     * expList = expression { "," expression } .
     */
    fn expression_list(&mut self) -> Option<Vec<Expression>> {
        let mut exprs = vec![self.expression()?];
        while self.eat(TokenKind::Comma) {
            exprs.push(self.expression()?);
        }
        Some(exprs)
    }

    /**
     * qualident = ident { "." ident } .
     *
     * Two-token lookahead: a '.' only continues the name when an identifier follows.
     */
    fn qualident(&mut self, rule: &'static str) -> Option<Qualident> {
        let mut segments = vec![self.identifier(rule)?];
        while self.at(TokenKind::Period) && self.peek_kind(1) == TokenKind::Identifier {
            self.advance();
            segments.push(self.identifier(rule)?);
        }
        Some(Qualident::new(segments))
    }

    /**
     * identList = ident { "," ident } .
     */
    fn ident_list(&mut self, rule: &'static str) -> Option<Vec<Ident>> {
        let mut names = vec![self.identifier(rule)?];
        while self.eat(TokenKind::Comma) {
            names.push(self.identifier(rule)?);
        }
        Some(names)
    }
}
