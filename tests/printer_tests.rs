#[cfg(test)]
mod tests {
    use amanc::ast::printer::{is_printable_identifier, print_expression, print_unit};
    use amanc::ast::{AddOp, CompilationUnit, Expression, Factor, MulOp, Sign, SimpleExpr, Term};
    use amanc::parse_strict;
    use amanc::utils::errors::{AmanError, AmanResult};

    const CORPUS: &[&str] = &[
        "MODULE Demo;
         VAR x: INTEGER;
         BEGIN
           x := 1 + 2 * 3
         END Demo.",
        "MODULE Imports;
         FROM InOut IMPORT WriteInt, WriteLn;
         IMPORT Storage;
         CONST limit = 10; half = limit DIV 2;
         VAR i, sum: INTEGER; flag: Lib.Bool;
         BEGIN
           i := 0;
           WHILE (i < limit) AND NOT flag DO
             sum := sum + i MOD 3;
             i := i + 1
           END;
           InOut.WriteInt(sum, 4);
           WriteLn
         END Imports.",
        "MODULE Procs;
         PROCEDURE Max(VAR a, b: INTEGER; c: INTEGER): INTEGER;
           CONST zero = 0;
           PROCEDURE Helper();
           BEGIN
             RETURN
           END Helper;
         BEGIN
           IF a >= b THEN
             RETURN a
           ELSE
             IF c # zero THEN Helper() END;
             RETURN -b + c
           END
         END Max;
         PROCEDURE Noop;
         END Noop;
         BEGIN
           x := Max(1, 2, f());
           Noop
         END Procs.",
        "MODULE Odd; CONST c = +(a - 1) / 2; BEGIN RETURN END Other.",
    ];

    // Test the exact canonical layout
    #[test]
    fn test_canonical_output() -> AmanResult<()> {
        let unit = parse_strict(CORPUS[0])?;
        let expected = "\
MODULE Demo;
  VAR x: INTEGER;
BEGIN
  x := 1 + 2 * 3
END Demo.
";
        assert_eq!(print_unit(&unit)?, expected);
        assert_eq!(unit.to_string(), expected);
        Ok(())
    }

    #[test]
    fn test_nested_layout() -> AmanResult<()> {
        let unit = parse_strict(
            "MODULE N; PROCEDURE P(x: T): T; BEGIN IF x = 0 THEN RETURN 1 ELSE RETURN x END END P; END N.",
        )?;
        let expected = "\
MODULE N;
  PROCEDURE P(x: T): T;
  BEGIN
    IF x = 0 THEN
      RETURN 1
    ELSE
      RETURN x
    END
  END P;
END N.
";
        assert_eq!(print_unit(&unit)?, expected);
        Ok(())
    }

    // Test printing then re-parsing every corpus module
    // Purpose: Ensure the printed source parses back to an equal tree
    #[test]
    fn test_round_trip_corpus() -> AmanResult<()> {
        for source in CORPUS {
            let first = parse_strict(source)?;
            let printed = print_unit(&first)?;
            let second = parse_strict(&printed)?;
            assert_eq!(first, second, "round trip changed the tree for:\n{}", printed);
            assert_eq!(print_unit(&second)?, printed);
        }
        Ok(())
    }

    #[test]
    fn test_expression_rendering() -> AmanResult<()> {
        let expr: Expression = SimpleExpr::new(Some(Sign::Minus), Factor::var("a"))
            .then(
                AddOp::Or,
                Term::new(Factor::not(Factor::var("b"))).then(MulOp::And, Factor::call("f", vec![])),
            )
            .into();
        assert_eq!(print_expression(&expr)?, "-a OR NOT b AND f()");
        assert_eq!(expr.to_string(), "-a OR NOT b AND f()");
        Ok(())
    }

    #[test]
    fn test_printable_identifiers() {
        assert!(is_printable_identifier("x"));
        assert!(is_printable_identifier("_tmp1"));
        assert!(is_printable_identifier("begin"));
        assert!(!is_printable_identifier("BEGIN"));
        assert!(!is_printable_identifier("1x"));
        assert!(!is_printable_identifier("a.b"));
        assert!(!is_printable_identifier(""));
    }

    // Test a hand-built tree with names that would not scan back
    #[test]
    fn test_rejects_unprintable_names() {
        let unit = CompilationUnit {
            name: "END".to_string(),
            end_name: "END".to_string(),
            ..CompilationUnit::default()
        };
        assert!(matches!(
            print_unit(&unit),
            Err(AmanError::InvalidIdentifier { identifier }) if identifier == "END"
        ));

        let unit = CompilationUnit::default();
        assert!(matches!(
            print_unit(&unit),
            Err(AmanError::InvalidIdentifier { .. })
        ));

        let expr = Expression::from(Factor::var("two words"));
        assert!(print_expression(&expr).is_err());
    }
}
