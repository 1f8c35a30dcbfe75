//! Data modification statements: INSERT, UPDATE, DELETE, MERGE, and the
//! shared OUTPUT clause.

use tsql_ast::{
    AssignmentTarget, DeleteStatement, DmlTarget, InsertSource, InsertStatement,
    MergeAction, MergeCondition, MergeStatement, MergeWhenClause, NamedTableReference,
    OutputClause, OutputIntoClause, ScalarExpression, SetClause, Statement,
    TopRowFilter, WhereClause, WithClause,
};

use crate::parser::{PResult, Parser};
use crate::token::TokenKind;

impl Parser {
    // -- INSERT -------------------------------------------------------------

    pub(crate) fn parse_insert_statement(
        &mut self,
        with: Option<WithClause>,
    ) -> PResult<Statement> {
        self.expect(&TokenKind::KwInsert, "INSERT")?;
        let top_row_filter = self.try_dml_top()?;
        self.eat(&TokenKind::KwInto);
        let target = self.parse_dml_target()?;

        let mut columns = Vec::new();
        if self.check(&TokenKind::LParen) && !self.starts_query_expression() {
            self.advance();
            columns = self.parse_comma_sep(|p| p.parse_name_part())?;
            self.expect(&TokenKind::RParen, "')'")?;
        }

        let output = self.try_output_clause()?;
        let source = self.parse_insert_source()?;
        let optimizer_hints = self.parse_optional_option_clause()?;
        Ok(Statement::Insert(Box::new(InsertStatement {
            with,
            top_row_filter,
            target,
            columns,
            output,
            source,
            optimizer_hints,
        })))
    }

    fn parse_insert_source(&mut self) -> PResult<InsertSource> {
        match self.peek_kind() {
            TokenKind::KwValues => {
                self.advance();
                let rows = self.parse_comma_sep(|p| {
                    p.expect(&TokenKind::LParen, "'('")?;
                    let row = p.parse_comma_sep(|p| p.parse_insert_value())?;
                    p.expect(&TokenKind::RParen, "')'")?;
                    Ok(row)
                })?;
                Ok(InsertSource::Values(rows))
            }
            TokenKind::KwDefault => {
                self.advance();
                self.expect(&TokenKind::KwValues, "VALUES")?;
                Ok(InsertSource::DefaultValues)
            }
            TokenKind::KwExec | TokenKind::KwExecute => {
                let exec = self.parse_execute_statement()?;
                Ok(InsertSource::Execute(Box::new(exec)))
            }
            _ => Ok(InsertSource::Query(self.parse_query_expression()?)),
        }
    }

    /// A VALUES row element: an expression or the `DEFAULT` placeholder.
    fn parse_insert_value(&mut self) -> PResult<ScalarExpression> {
        if self.check(&TokenKind::KwDefault) {
            let span = self.advance().span;
            return Ok(ScalarExpression::Literal(tsql_ast::Literal::Default, span));
        }
        self.parse_scalar_expression()
    }

    // -- UPDATE -------------------------------------------------------------

    pub(crate) fn parse_update_statement(
        &mut self,
        with: Option<WithClause>,
    ) -> PResult<Statement> {
        self.expect(&TokenKind::KwUpdate, "UPDATE")?;
        let top_row_filter = self.try_dml_top()?;
        let target = self.parse_dml_target()?;
        self.expect(&TokenKind::KwSet, "SET")?;
        let set_clauses = self.parse_comma_sep(|p| p.parse_set_clause())?;
        let output = self.try_output_clause()?;
        let from = if self.check(&TokenKind::KwFrom) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };
        let where_clause = self.try_where_clause()?;
        let optimizer_hints = self.parse_optional_option_clause()?;
        Ok(Statement::Update(Box::new(tsql_ast::UpdateStatement {
            with,
            top_row_filter,
            target,
            set_clauses,
            output,
            from,
            where_clause,
            optimizer_hints,
        })))
    }

    fn parse_set_clause(&mut self) -> PResult<SetClause> {
        let target = if self.peek_is_variable() {
            AssignmentTarget::Variable(self.parse_variable_reference()?)
        } else {
            AssignmentTarget::Column(self.parse_dotted_column()?)
        };
        let assignment_kind = self
            .try_assignment_kind()
            .ok_or_else(|| self.err_expected("an assignment operator"))?;
        let value = self.parse_scalar_expression()?;
        Ok(SetClause {
            target,
            assignment_kind,
            value,
        })
    }

    // -- DELETE -------------------------------------------------------------

    pub(crate) fn parse_delete_statement(
        &mut self,
        with: Option<WithClause>,
    ) -> PResult<Statement> {
        self.expect(&TokenKind::KwDelete, "DELETE")?;
        let top_row_filter = self.try_dml_top()?;
        self.eat(&TokenKind::KwFrom);
        let target = self.parse_dml_target()?;
        let output = self.try_output_clause()?;
        let from = if self.check(&TokenKind::KwFrom) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };
        let where_clause = self.try_where_clause()?;
        let optimizer_hints = self.parse_optional_option_clause()?;
        Ok(Statement::Delete(Box::new(DeleteStatement {
            with,
            top_row_filter,
            target,
            output,
            from,
            where_clause,
            optimizer_hints,
        })))
    }

    // -- MERGE --------------------------------------------------------------

    pub(crate) fn parse_merge_statement(
        &mut self,
        with: Option<WithClause>,
    ) -> PResult<Statement> {
        self.expect(&TokenKind::KwMerge, "MERGE")?;
        let top_row_filter = self.try_dml_top()?;
        self.eat(&TokenKind::KwInto);
        let schema_object = self.parse_schema_object_name()?;
        let alias = self.parse_table_alias()?;
        let mut table_hints = Vec::new();
        if self.check(&TokenKind::KwWith) && *self.peek_nth(1) == TokenKind::LParen {
            self.advance();
            self.advance();
            table_hints = self.parse_table_hint_list()?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        let target = NamedTableReference {
            schema_object,
            alias,
            table_hints,
        };

        self.expect(&TokenKind::KwUsing, "USING")?;
        let using = self.parse_table_reference()?;
        self.expect(&TokenKind::KwOn, "ON")?;
        let on = self.parse_boolean_expression()?;

        let mut when_clauses = Vec::new();
        while self.check(&TokenKind::KwWhen) {
            when_clauses.push(self.parse_merge_when_clause()?);
        }
        let output = self.try_output_clause()?;
        let optimizer_hints = self.parse_optional_option_clause()?;
        Ok(Statement::Merge(Box::new(MergeStatement {
            with,
            top_row_filter,
            target,
            using,
            on,
            when_clauses,
            output,
            optimizer_hints,
        })))
    }

    fn parse_merge_when_clause(&mut self) -> PResult<MergeWhenClause> {
        self.expect(&TokenKind::KwWhen, "WHEN")?;
        let not = self.eat(&TokenKind::KwNot);
        self.expect(&TokenKind::KwMatched, "MATCHED")?;
        let condition = if not {
            if self.eat(&TokenKind::KwBy) {
                if self.eat(&TokenKind::KwSource) {
                    MergeCondition::NotMatchedBySource
                } else if self.eat(&TokenKind::KwTarget) {
                    MergeCondition::NotMatchedByTarget
                } else {
                    return Err(self.err_expected("TARGET or SOURCE"));
                }
            } else {
                MergeCondition::NotMatchedByTarget
            }
        } else {
            MergeCondition::Matched
        };
        let and_predicate = if self.eat(&TokenKind::KwAnd) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::KwThen, "THEN")?;
        let action = self.parse_merge_action()?;
        Ok(MergeWhenClause {
            condition,
            and_predicate,
            action,
        })
    }

    fn parse_merge_action(&mut self) -> PResult<MergeAction> {
        if self.eat(&TokenKind::KwDelete) {
            return Ok(MergeAction::Delete);
        }
        if self.eat(&TokenKind::KwUpdate) {
            self.expect(&TokenKind::KwSet, "SET")?;
            let set_clauses = self.parse_comma_sep(|p| p.parse_set_clause())?;
            return Ok(MergeAction::Update { set_clauses });
        }
        self.expect(&TokenKind::KwInsert, "INSERT")?;
        let mut columns = Vec::new();
        if self.eat(&TokenKind::LParen) {
            columns = self.parse_comma_sep(|p| p.parse_name_part())?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        let source = self.parse_insert_source()?;
        Ok(MergeAction::Insert { columns, source })
    }

    // -- shared pieces ------------------------------------------------------

    /// `TOP` in a DML statement; the parenthesized form is required by the
    /// server but the bare literal form is accepted here too.
    fn try_dml_top(&mut self) -> PResult<Option<TopRowFilter>> {
        if !self.check(&TokenKind::KwTop) {
            return Ok(None);
        }
        self.parse_top_row_filter().map(Some)
    }

    /// The write target: a table variable or a dotted name with optional
    /// `WITH (hints)`.
    fn parse_dml_target(&mut self) -> PResult<DmlTarget> {
        if self.peek_is_variable() {
            return Ok(DmlTarget::Variable(self.parse_variable_reference()?));
        }
        let schema_object = self.parse_schema_object_name()?;
        let mut table_hints = Vec::new();
        if self.check(&TokenKind::KwWith) && *self.peek_nth(1) == TokenKind::LParen {
            self.advance();
            self.advance();
            table_hints = self.parse_table_hint_list()?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        Ok(DmlTarget::Table(NamedTableReference {
            schema_object,
            alias: None,
            table_hints,
        }))
    }

    fn try_where_clause(&mut self) -> PResult<Option<WhereClause>> {
        if !self.eat(&TokenKind::KwWhere) {
            return Ok(None);
        }
        Ok(Some(WhereClause {
            search_condition: self.parse_boolean_expression()?,
        }))
    }

    pub(crate) fn try_output_clause(&mut self) -> PResult<Option<OutputClause>> {
        if !self.eat(&TokenKind::KwOutput) {
            return Ok(None);
        }
        let select_elements = self.parse_comma_sep(|p| p.parse_select_element())?;
        let into = if self.eat(&TokenKind::KwInto) {
            let target = self.parse_dml_target()?;
            let mut columns = Vec::new();
            if self.eat(&TokenKind::LParen) {
                columns = self.parse_comma_sep(|p| p.parse_name_part())?;
                self.expect(&TokenKind::RParen, "')'")?;
            }
            Some(OutputIntoClause { target, columns })
        } else {
            None
        };
        Ok(Some(OutputClause {
            select_elements,
            into,
        }))
    }
}

#[cfg(test)]
mod tests {
    use tsql_ast::{
        AssignmentKind, AssignmentTarget, DmlTarget, InsertSource, MergeAction,
        MergeCondition, Statement,
    };

    use crate::parser::parse;

    fn stmt(src: &str) -> Statement {
        let script = parse(src).expect("script should parse");
        script.batches[0].statements[0].clone()
    }

    #[test]
    fn insert_values_rows() {
        let Statement::Insert(insert) = stmt("INSERT INTO t (a, b) VALUES (1, 2), (3, 4)")
        else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.columns.len(), 2);
        let InsertSource::Values(rows) = insert.source else {
            panic!("expected VALUES");
        };
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn insert_without_into() {
        let Statement::Insert(insert) = stmt("INSERT t DEFAULT VALUES") else {
            panic!("expected INSERT");
        };
        assert!(matches!(insert.source, InsertSource::DefaultValues));
    }

    #[test]
    fn insert_from_select() {
        let Statement::Insert(insert) = stmt("INSERT INTO t SELECT a FROM u") else {
            panic!("expected INSERT");
        };
        assert!(matches!(insert.source, InsertSource::Query(_)));
    }

    #[test]
    fn insert_exec_source() {
        let Statement::Insert(insert) = stmt("INSERT INTO t EXEC dbo.get_rows @n = 1")
        else {
            panic!("expected INSERT");
        };
        assert!(matches!(insert.source, InsertSource::Execute(_)));
    }

    #[test]
    fn insert_into_table_variable() {
        let Statement::Insert(insert) = stmt("INSERT INTO @t VALUES (1)") else {
            panic!("expected INSERT");
        };
        assert!(matches!(insert.target, DmlTarget::Variable(_)));
    }

    #[test]
    fn update_with_compound_assignment() {
        let Statement::Update(update) = stmt("UPDATE t SET a += 1, b = 2 WHERE c = 3")
        else {
            panic!("expected UPDATE");
        };
        assert_eq!(update.set_clauses.len(), 2);
        assert_eq!(update.set_clauses[0].assignment_kind, AssignmentKind::AddEquals);
        assert!(update.where_clause.is_some());
    }

    #[test]
    fn update_with_from_clause() {
        let Statement::Update(update) =
            stmt("UPDATE a SET a.x = b.x FROM a JOIN b ON a.id = b.id")
        else {
            panic!("expected UPDATE");
        };
        assert!(update.from.is_some());
        assert!(matches!(
            update.set_clauses[0].target,
            AssignmentTarget::Column(_)
        ));
    }

    #[test]
    fn update_variable_assignment() {
        let Statement::Update(update) = stmt("UPDATE t SET @n = a") else {
            panic!("expected UPDATE");
        };
        assert!(matches!(
            update.set_clauses[0].target,
            AssignmentTarget::Variable(_)
        ));
    }

    #[test]
    fn delete_with_top() {
        let Statement::Delete(delete) = stmt("DELETE TOP (100) FROM t WHERE a = 1")
        else {
            panic!("expected DELETE");
        };
        assert!(delete.top_row_filter.is_some());
        assert!(delete.where_clause.is_some());
    }

    #[test]
    fn delete_with_second_from() {
        let Statement::Delete(delete) =
            stmt("DELETE t FROM t JOIN u ON t.id = u.id WHERE u.gone = 1")
        else {
            panic!("expected DELETE");
        };
        assert!(delete.from.is_some());
    }

    #[test]
    fn output_clause_with_into() {
        let Statement::Update(update) =
            stmt("UPDATE t SET a = 1 OUTPUT deleted.a, inserted.a INTO @log (old_a, new_a)")
        else {
            panic!("expected UPDATE");
        };
        let output = update.output.expect("output clause");
        assert_eq!(output.select_elements.len(), 2);
        let into = output.into.expect("output into");
        assert_eq!(into.columns.len(), 2);
    }

    #[test]
    fn merge_when_arms() {
        let Statement::Merge(merge) = stmt(
            "MERGE INTO target AS t USING source AS s ON t.id = s.id \
             WHEN MATCHED AND s.qty = 0 THEN DELETE \
             WHEN MATCHED THEN UPDATE SET t.qty = s.qty \
             WHEN NOT MATCHED THEN INSERT (id, qty) VALUES (s.id, s.qty) \
             WHEN NOT MATCHED BY SOURCE THEN DELETE;",
        ) else {
            panic!("expected MERGE");
        };
        assert_eq!(merge.when_clauses.len(), 4);
        assert_eq!(merge.when_clauses[0].condition, MergeCondition::Matched);
        assert!(merge.when_clauses[0].and_predicate.is_some());
        assert!(matches!(merge.when_clauses[0].action, MergeAction::Delete));
        assert_eq!(
            merge.when_clauses[2].condition,
            MergeCondition::NotMatchedByTarget
        );
        assert!(matches!(
            merge.when_clauses[2].action,
            MergeAction::Insert { .. }
        ));
        assert_eq!(
            merge.when_clauses[3].condition,
            MergeCondition::NotMatchedBySource
        );
    }

    #[test]
    fn merge_target_alias_and_hints() {
        let Statement::Merge(merge) = stmt(
            "MERGE t WITH (HOLDLOCK) USING u ON t.id = u.id \
             WHEN MATCHED THEN DELETE;",
        ) else {
            panic!("expected MERGE");
        };
        assert_eq!(merge.target.table_hints.len(), 1);
    }
}
