//! End-to-end parser tests over whole scripts.
//!
//! These exercise the public `parse` entry point on realistic multi-clause
//! statements and scripts, complementing the inline unit tests in each
//! submodule.

use tsql_ast::{
    BinaryQueryExpressionType, BooleanExpression, Literal, QualifiedJoinType,
    QueryExpression, QuerySpecification, ScalarExpression, SelectElement, Statement,
    TableHintKind, TableReference, WindowDelimiterType, WindowFrameType,
};
use tsql_parser::{parse, parse_with_options, ParseError, ParserOptions};

fn select(src: &str) -> tsql_ast::SelectStatement {
    let script = parse(src).expect("script should parse");
    assert_eq!(script.batches.len(), 1, "expected a single batch");
    let Statement::Select(select) = script.batches[0].statements[0].clone() else {
        panic!("expected SELECT");
    };
    *select
}

fn spec(src: &str) -> QuerySpecification {
    let QueryExpression::Specification(spec) = select(src).query else {
        panic!("expected a plain query specification");
    };
    *spec
}

// ===========================================================================
// 1. BASIC SELECT
// ===========================================================================

#[test]
fn minimal_select() {
    let spec = spec("SELECT 1");
    assert_eq!(spec.select_elements.len(), 1);
    assert!(spec.from.is_none());
}

#[test]
fn aliases_hints_and_where() {
    let spec = spec(
        "SELECT u.name, total = u.amount * 2, u.id ident \
         FROM dbo.users AS u WITH (NOLOCK) \
         WHERE u.active = 1",
    );
    assert_eq!(spec.select_elements.len(), 3);
    let SelectElement::Scalar(total) = &spec.select_elements[1] else {
        panic!("expected a scalar element");
    };
    assert_eq!(total.column_name.as_ref().map(|c| c.value.as_str()), Some("total"));
    let SelectElement::Scalar(ident) = &spec.select_elements[2] else {
        panic!("expected a scalar element");
    };
    assert_eq!(ident.column_name.as_ref().map(|c| c.value.as_str()), Some("ident"));

    let from = spec.from.expect("FROM should be present");
    let TableReference::Named(named) = &from.table_references[0] else {
        panic!("expected a named table");
    };
    assert_eq!(named.alias.as_ref().map(|a| a.value.as_str()), Some("u"));
    assert_eq!(named.table_hints.len(), 1);
    assert_eq!(named.table_hints[0].kind, TableHintKind::NoLock);
    assert!(spec.where_clause.is_some());
}

#[test]
fn top_percent_with_ties() {
    let spec = spec("SELECT TOP (10) PERCENT WITH TIES name FROM t ORDER BY name");
    let top = spec.top_row_filter.expect("TOP should be present");
    assert!(top.percent);
    assert!(top.with_ties);
    assert!(spec.order_by.is_some());
}

// ===========================================================================
// 2. JOINS AND SET OPERATORS
// ===========================================================================

#[test]
fn left_join_union_all_with_outer_order_by() {
    let select = select(
        "SELECT a.id FROM a LEFT JOIN b ON a.id = b.a_id \
         UNION ALL \
         SELECT c.id FROM c \
         ORDER BY 1",
    );
    let QueryExpression::Binary(binary) = select.query else {
        panic!("expected a set-operator chain");
    };
    assert_eq!(binary.op, BinaryQueryExpressionType::Union);
    assert!(binary.all);
    // ORDER BY binds to the whole chain, not the second SELECT.
    assert!(binary.order_by.is_some());
    let QueryExpression::Specification(first) = binary.first else {
        panic!("expected a specification on the left");
    };
    assert!(first.order_by.is_none());
    let from = first.from.expect("FROM should be present");
    let TableReference::QualifiedJoin(join) = &from.table_references[0] else {
        panic!("expected a join");
    };
    assert_eq!(join.join_type, QualifiedJoinType::LeftOuter);
}

#[test]
fn into_is_hoisted_to_the_chain() {
    let select = select("SELECT id INTO #all FROM a EXCEPT SELECT id FROM b");
    let QueryExpression::Binary(binary) = select.query else {
        panic!("expected a set-operator chain");
    };
    let into = binary.into.expect("INTO should be on the outermost node");
    assert_eq!(into.target.identifiers[0].value, "#all");
    let QueryExpression::Specification(first) = binary.first else {
        panic!("expected a specification on the left");
    };
    assert!(first.into.is_none());
}

// ===========================================================================
// 3. EXPRESSIONS
// ===========================================================================

#[test]
fn searched_case_with_null_test() {
    let spec = spec("SELECT CASE WHEN email IS NULL THEN 'none' ELSE email END FROM u");
    let SelectElement::Scalar(element) = &spec.select_elements[0] else {
        panic!("expected a scalar element");
    };
    let ScalarExpression::SearchedCase(case) = &element.expression else {
        panic!("expected a searched CASE");
    };
    assert_eq!(case.when_clauses.len(), 1);
    let BooleanExpression::IsNull(is_null) = &case.when_clauses[0].when_expression else {
        panic!("expected IS NULL");
    };
    assert!(!is_null.is_not);
    assert!(case.else_expression.is_some());
}

#[test]
fn window_function_with_frame() {
    let spec = spec(
        "SELECT ROW_NUMBER() OVER (PARTITION BY dept ORDER BY salary DESC \
         ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM emp",
    );
    let SelectElement::Scalar(element) = &spec.select_elements[0] else {
        panic!("expected a scalar element");
    };
    let ScalarExpression::FunctionCall(call) = &element.expression else {
        panic!("expected a function call");
    };
    let over = call.over_clause.as_ref().expect("OVER should be present");
    assert_eq!(over.partitions.len(), 1);
    let frame = over.window_frame.as_ref().expect("frame should be present");
    assert_eq!(frame.frame_type, WindowFrameType::Rows);
    assert_eq!(frame.top.delimiter_type, WindowDelimiterType::UnboundedPreceding);
    assert_eq!(
        frame.bottom.as_ref().map(|d| d.delimiter_type),
        Some(WindowDelimiterType::CurrentRow)
    );
}

#[test]
fn national_strings_record_the_prefix() {
    let spec = spec("SELECT N'wide', n'also wide', 'narrow'");
    let national: Vec<bool> = spec
        .select_elements
        .iter()
        .map(|e| {
            let SelectElement::Scalar(element) = e else {
                panic!("expected a scalar element");
            };
            let ScalarExpression::Literal(Literal::String { national, .. }, _) =
                &element.expression
            else {
                panic!("expected a string literal");
            };
            *national
        })
        .collect();
    assert_eq!(national, vec![true, true, false]);
}

// ===========================================================================
// 4. SCRIPTS AND BATCHES
// ===========================================================================

#[test]
fn multi_batch_procedure_script() {
    let script = parse(
        "CREATE TABLE dbo.audit (id INT IDENTITY PRIMARY KEY, note NVARCHAR(400))\n\
         GO\n\
         CREATE PROCEDURE dbo.log_note @note NVARCHAR(400) AS\n\
         BEGIN\n\
             INSERT INTO dbo.audit (note) VALUES (@note)\n\
         END\n\
         GO\n\
         EXEC dbo.log_note @note = N'first'\n\
         GO 2\n",
    )
    .expect("script should parse");
    assert_eq!(script.batches.len(), 3);
    assert!(matches!(
        script.batches[0].statements[0],
        Statement::CreateTable(_)
    ));
    assert!(matches!(
        script.batches[1].statements[0],
        Statement::CreateProcedure(_)
    ));
    assert!(matches!(script.batches[2].statements[0], Statement::Execute(_)));
    assert_eq!(script.batches[2].go_count, Some(2));
}

#[test]
fn cte_merge_inside_try_catch() {
    let script = parse(
        "BEGIN TRY\n\
             WITH fresh AS (SELECT id, name FROM staging)\n\
             MERGE dbo.users AS u\n\
             USING fresh ON u.id = fresh.id\n\
             WHEN MATCHED THEN UPDATE SET u.name = fresh.name\n\
             WHEN NOT MATCHED THEN INSERT (id, name) VALUES (fresh.id, fresh.name);\n\
         END TRY\n\
         BEGIN CATCH\n\
             THROW;\n\
         END CATCH",
    )
    .expect("script should parse");
    let Statement::TryCatch(tc) = &script.batches[0].statements[0] else {
        panic!("expected TRY/CATCH");
    };
    let Statement::Merge(merge) = &tc.try_statements[0] else {
        panic!("expected MERGE");
    };
    assert!(merge.with.is_some());
    assert_eq!(merge.when_clauses.len(), 2);
}

// ===========================================================================
// 5. ERRORS AND RECOVERY
// ===========================================================================

#[test]
fn missing_select_list_is_an_error() {
    assert!(parse("SELECT FROM t").is_err());
}

#[test]
fn order_without_by_is_an_error() {
    assert!(parse("SELECT 1 ORDER").is_err());
}

#[test]
fn unterminated_string_reports_a_lex_error() {
    let err = parse("SELECT 'x").expect_err("should fail to lex");
    assert!(matches!(err, ParseError::Lex(_)));
}

#[test]
fn errors_carry_line_and_column() {
    let err = parse("SELECT 1\nFROM").expect_err("should fail to parse");
    let ParseError::Unexpected { line, .. } = err else {
        panic!("expected an unexpected-token error");
    };
    assert_eq!(line, 2);
}

#[test]
fn lenient_from_skips_a_broken_tail() {
    let options = ParserOptions { lenient_from: true };
    let script = parse_with_options("SELECT id FROM t, WHERE id = 1", options)
        .expect("lenient parse should succeed");
    let Statement::Select(select) = &script.batches[0].statements[0] else {
        panic!("expected SELECT");
    };
    let QueryExpression::Specification(spec) = &select.query else {
        panic!("expected a specification");
    };
    assert!(spec.from.is_some());
    assert!(spec.where_clause.is_some());
}
