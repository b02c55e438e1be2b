#[cfg(test)]
mod tests {
    use amanc::ast::{
        AddOp, Block, CompilationUnit, ConstDecl, Declaration, Expression, Factor,
        FormalParameter, FormalParameters, Import, MulOp, Qualident, RelOp, Sign, SimpleExpr,
        Statement, Term, VarDecl,
    };
    use amanc::frontend::lexer::tokenize;
    use amanc::frontend::parser::Parser;
    use amanc::utils::diagnostics::Diagnostic;
    use amanc::utils::errors::{AmanError, AmanResult};
    use amanc::{parse_source, parse_strict};

    // Helper: parse a module body wrapped as `MODULE M; <body> END M.`
    fn parse_block(body: &str) -> AmanResult<Block> {
        let source = format!("MODULE M;\n{}\nEND M.", body);
        Ok(parse_strict(&source)?.block)
    }

    fn first_const(body: &str) -> AmanResult<Expression> {
        let block = parse_block(body)?;
        match block.declarations.into_iter().next() {
            Some(Declaration::Const(decl)) => Ok(decl.value),
            other => panic!("expected a constant declaration, got {:?}", other),
        }
    }

    // Test the canonical end-to-end module
    // Purpose: Ensure the whole pipeline builds the expected tree with no diagnostics
    #[test]
    fn test_demo_module() {
        let source = "
        MODULE Demo;
        VAR x: INTEGER;
        BEGIN
          x := 1 + 2 * 3
        END Demo.
        ";
        let (unit, diagnostics) = parse_source(source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);

        let value = SimpleExpr::new(None, Factor::int(1)).then(
            AddOp::Plus,
            Term::new(Factor::int(2)).then(MulOp::Times, Factor::int(3)),
        );
        let expected = CompilationUnit {
            name: "Demo".to_string(),
            imports: vec![],
            block: Block::new(
                vec![Declaration::Var(VarDecl::new(&["x"], "INTEGER"))],
                vec![Statement::assign("x", value)],
            ),
            end_name: "Demo".to_string(),
        };
        assert_eq!(unit, expected);
    }

    #[test]
    fn test_minimal_module() -> AmanResult<()> {
        let unit = parse_strict("MODULE Empty; END Empty.")?;
        assert_eq!(unit.name, "Empty");
        assert!(unit.imports.is_empty());
        assert_eq!(unit.block, Block::default());
        assert_eq!(unit.end_name, "Empty");
        Ok(())
    }

    // Test multiplication binding tighter than addition
    #[test]
    fn test_operator_precedence() -> AmanResult<()> {
        let value = first_const("CONST c = 2 + 3 * 4;")?;
        let expected = SimpleExpr::new(None, Factor::int(2)).then(
            AddOp::Plus,
            Term::new(Factor::int(3)).then(MulOp::Times, Factor::int(4)),
        );
        assert_eq!(value, Expression::Simple(expected));

        let value = first_const("CONST c = (2 + 3) * 4;")?;
        let inner = SimpleExpr::new(None, Factor::int(2)).then(AddOp::Plus, Factor::int(3));
        let expected = Term::new(Factor::paren(inner)).then(MulOp::Times, Factor::int(4));
        assert_eq!(value, Expression::from(expected));
        Ok(())
    }

    // Test that operators of equal precedence fold left to right
    #[test]
    fn test_left_associative_chains() -> AmanResult<()> {
        let value = first_const("CONST c = a - b OR c;")?;
        let expected = SimpleExpr::new(None, Factor::var("a"))
            .then(AddOp::Minus, Factor::var("b"))
            .then(AddOp::Or, Factor::var("c"));
        assert_eq!(value, Expression::Simple(expected));

        let value = first_const("CONST c = a DIV b MOD c AND d / e;")?;
        let expected = Term::new(Factor::var("a"))
            .then(MulOp::Div, Factor::var("b"))
            .then(MulOp::Mod, Factor::var("c"))
            .then(MulOp::And, Factor::var("d"))
            .then(MulOp::Slash, Factor::var("e"));
        assert_eq!(value, Expression::from(expected));
        Ok(())
    }

    #[test]
    fn test_leading_sign() -> AmanResult<()> {
        let value = first_const("CONST c = -a + b;")?;
        let expected =
            SimpleExpr::new(Some(Sign::Minus), Factor::var("a")).then(AddOp::Plus, Factor::var("b"));
        assert_eq!(value, Expression::Simple(expected));

        let value = first_const("CONST c = +5;")?;
        assert_eq!(
            value,
            Expression::Simple(SimpleExpr::new(Some(Sign::Plus), Factor::int(5)))
        );
        Ok(())
    }

    #[test]
    fn test_double_negation() -> AmanResult<()> {
        let value = first_const("CONST c = NOT NOT x;")?;
        assert_eq!(
            value,
            Expression::from(Factor::not(Factor::not(Factor::var("x"))))
        );
        Ok(())
    }

    // Test every relation operator
    #[test]
    fn test_relations() -> AmanResult<()> {
        let cases = [
            ("=", RelOp::Equal),
            ("#", RelOp::NotEqual),
            ("<", RelOp::Less),
            ("<=", RelOp::LessEqual),
            (">", RelOp::Greater),
            (">=", RelOp::GreaterEqual),
        ];
        for (spelling, op) in cases {
            let value = first_const(&format!("CONST c = a {} b + 1;", spelling))?;
            let right = SimpleExpr::new(None, Factor::var("b")).then(AddOp::Plus, Factor::int(1));
            assert_eq!(value, Expression::relational(op, Factor::var("a"), right));
        }
        Ok(())
    }

    #[test]
    fn test_chained_relation_is_rejected() {
        let (_, diagnostics) = parse_source("MODULE M; CONST c = a < b < c; END M.");
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Diagnostic::UnexpectedToken { rule: "expression", found, .. } if found == "<"
        ));
    }

    // Test the statement forms that all begin with a qualident
    // Purpose: Ensure the token after the name picks assignment, call or bare reference
    #[test]
    fn test_statement_disambiguation() -> AmanResult<()> {
        let block = parse_block(
            "BEGIN
               foo;
               foo();
               foo(1, x);
               foo := 1;
               InOut.WriteLn;
               InOut.WriteInt(x)
             ",
        )?;
        assert_eq!(
            block.statements,
            vec![
                Statement::bare_ref("foo"),
                Statement::call("foo", vec![]),
                Statement::call("foo", vec![Factor::int(1).into(), Factor::var("x").into()]),
                Statement::assign("foo", Factor::int(1)),
                Statement::bare_ref("InOut.WriteLn"),
                Statement::call("InOut.WriteInt", vec![Factor::var("x").into()]),
            ]
        );
        Ok(())
    }

    // Test calls and references inside expressions
    #[test]
    fn test_factor_references() -> AmanResult<()> {
        let value = first_const("CONST c = f() + g + Lib.h(1, 2);")?;
        let expected = SimpleExpr::new(None, Factor::call("f", vec![]))
            .then(AddOp::Plus, Factor::var("g"))
            .then(
                AddOp::Plus,
                Factor::call("Lib.h", vec![Factor::int(1).into(), Factor::int(2).into()]),
            );
        assert_eq!(value, Expression::Simple(expected));
        Ok(())
    }

    #[test]
    fn test_qualident_segments() -> AmanResult<()> {
        let block = parse_block("VAR v: Lib.Types.Counter;")?;
        let Declaration::Var(decl) = &block.declarations[0] else {
            panic!("expected a variable declaration");
        };
        assert_eq!(
            decl.type_name,
            Qualident::new(vec![
                "Lib".to_string(),
                "Types".to_string(),
                "Counter".to_string()
            ])
        );
        assert!(decl.type_name.is_qualified());
        assert_eq!(decl.type_name.to_string(), "Lib.Types.Counter");
        Ok(())
    }

    #[test]
    fn test_imports() -> AmanResult<()> {
        let unit = parse_strict(
            "MODULE Main;
             FROM InOut IMPORT WriteInt, WriteLn;
             IMPORT Storage;
             END Main.",
        )?;
        assert_eq!(
            unit.imports,
            vec![
                Import::new(Some("InOut"), &["WriteInt", "WriteLn"]),
                Import::new(None, &["Storage"]),
            ]
        );
        Ok(())
    }

    // Test declaration groups, including empty ones
    #[test]
    fn test_declaration_groups() -> AmanResult<()> {
        let block = parse_block(
            "CONST
             VAR
             CONST n = 10; m = n * 2;
             VAR a, b: INTEGER; c: BOOLEAN;",
        )?;
        assert_eq!(
            block.declarations,
            vec![
                Declaration::Const(ConstDecl {
                    name: "n".to_string(),
                    value: Factor::int(10).into(),
                }),
                Declaration::Const(ConstDecl {
                    name: "m".to_string(),
                    value: Term::new(Factor::var("n")).then(MulOp::Times, Factor::int(2)).into(),
                }),
                Declaration::Var(VarDecl::new(&["a", "b"], "INTEGER")),
                Declaration::Var(VarDecl::new(&["c"], "BOOLEAN")),
            ]
        );
        assert!(block.statements.is_empty());
        Ok(())
    }

    #[test]
    fn test_formal_parameters() -> AmanResult<()> {
        let block = parse_block(
            "PROCEDURE Max(VAR a, b: INTEGER; c: Lib.Num): INTEGER;
             BEGIN
               RETURN a
             END Max;
             PROCEDURE Tick();
             BEGIN
               RETURN
             END Tick;
             PROCEDURE Reset;
             END Reset;",
        )?;
        let procedures: Vec<_> = block
            .declarations
            .iter()
            .filter_map(Declaration::as_procedure)
            .collect();
        assert_eq!(procedures.len(), 3);

        assert_eq!(
            procedures[0].params,
            Some(FormalParameters {
                params: vec![
                    FormalParameter::new(true, &["a", "b"], "INTEGER"),
                    FormalParameter::new(false, &["c"], "Lib.Num"),
                ],
                return_type: Some(Qualident::simple("INTEGER")),
            })
        );
        assert_eq!(
            procedures[0].body.statements,
            vec![Statement::Return {
                value: Some(Factor::var("a").into())
            }]
        );

        assert_eq!(procedures[1].params, Some(FormalParameters::default()));
        assert_eq!(procedures[1].body.statements, vec![Statement::Return { value: None }]);

        assert_eq!(procedures[2].params, None);
        assert_eq!(procedures[2].body, Block::default());
        Ok(())
    }

    // Test procedures declared inside procedures
    // Purpose: Ensure blocks nest recursively
    #[test]
    fn test_nested_procedures() -> AmanResult<()> {
        let unit = parse_strict(
            "MODULE Nest;
             PROCEDURE Outer;
               PROCEDURE Inner;
               BEGIN
                 RETURN
               END Inner;
             BEGIN
               Inner
             END Outer;
             BEGIN
               Outer
             END Nest.",
        )?;
        let outer = unit.block.declarations[0]
            .as_procedure()
            .expect("Outer is a procedure");
        assert_eq!(outer.name, "Outer");
        assert_eq!(outer.end_name, "Outer");

        let inner = outer.body.declarations[0]
            .as_procedure()
            .expect("Inner is a procedure");
        assert_eq!(inner.name, "Inner");
        assert_eq!(inner.body.statements, vec![Statement::Return { value: None }]);
        assert_eq!(outer.body.statements, vec![Statement::bare_ref("Inner")]);
        assert_eq!(unit.block.statements, vec![Statement::bare_ref("Outer")]);
        Ok(())
    }

    #[test]
    fn test_if_and_while() -> AmanResult<()> {
        let block = parse_block(
            "BEGIN
               IF x > 0 THEN
                 y := 1
               ELSE
                 y := 2;
                 z := 3
               END;
               IF done THEN RETURN END;
               WHILE i < 10 DO
                 i := i + 1
               END
             ",
        )?;
        assert_eq!(
            block.statements,
            vec![
                Statement::If {
                    cond: Expression::relational(RelOp::Greater, Factor::var("x"), Factor::int(0)),
                    then_body: vec![Statement::assign("y", Factor::int(1))],
                    else_body: Some(vec![
                        Statement::assign("y", Factor::int(2)),
                        Statement::assign("z", Factor::int(3)),
                    ]),
                },
                Statement::If {
                    cond: Factor::var("done").into(),
                    then_body: vec![Statement::Return { value: None }],
                    else_body: None,
                },
                Statement::While {
                    cond: Expression::relational(RelOp::Less, Factor::var("i"), Factor::int(10)),
                    body: vec![Statement::assign(
                        "i",
                        SimpleExpr::new(None, Factor::var("i")).then(AddOp::Plus, Factor::int(1)),
                    )],
                },
            ]
        );
        Ok(())
    }

    // Test that closing names are recorded but not compared
    #[test]
    fn test_mismatched_end_name_is_accepted() -> AmanResult<()> {
        let unit = parse_strict(
            "MODULE A;
             PROCEDURE P;
             END Q;
             END B.",
        )?;
        assert_eq!(unit.name, "A");
        assert_eq!(unit.end_name, "B");
        let procedure = unit.block.declarations[0]
            .as_procedure()
            .expect("P is a procedure");
        assert_eq!(procedure.name, "P");
        assert_eq!(procedure.end_name, "Q");
        Ok(())
    }

    #[test]
    fn test_comments_between_tokens() -> AmanResult<()> {
        let unit = parse_strict(
            "(* header *) MODULE M; (* a (* nested *) note *)
             BEGIN x (* target *) := 1 END M.",
        )?;
        assert_eq!(unit.block.statements, vec![Statement::assign("x", Factor::int(1))]);
        Ok(())
    }

    #[test]
    fn test_parse_strict_reports_count() {
        let result = parse_strict("MODULE M; BEGIN x := END M.");
        assert!(matches!(result, Err(AmanError::SyntaxErrors { count: 1 })));
    }

    // Test parsing a token stream scanned separately
    #[test]
    fn test_parse_from_tokens() {
        let (mut tokens, lexical) = tokenize("MODULE T; BEGIN go END T.");
        assert!(lexical.is_empty());
        tokens.pop(); // drop Eof; the parser restores it
        let (unit, diagnostics) = Parser::from_tokens(tokens).parse();
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
        assert_eq!(unit.block.statements, vec![Statement::bare_ref("go")]);
    }
}
