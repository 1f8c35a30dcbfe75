//! Table references: the FROM clause, joins, derived tables, table hints,
//! PIVOT/UNPIVOT, and the table-valued built-ins (OPENROWSET, CHANGETABLE,
//! CONTAINSTABLE, FREETEXTTABLE, PREDICT, semantic functions).

use tsql_ast::{
    ChangeTableKind, ChangeTableReference, FromClause, FullTextFunctionKind,
    FullTextTableReference, Identifier, IdentifierOrValue, InlineDerivedTable, Literal,
    MultiPartIdentifier, NamedTableReference, OpenRowsetTableReference,
    PivotedTableReference, PredictTableReference, QualifiedJoin, QualifiedJoinType,
    QueryDerivedTable, SchemaObjectFunctionTableReference, SemanticFunctionKind,
    SemanticTableReference, TableHint, TableHintKind, TableReference, UnpivotedTableReference,
    UnqualifiedJoin, UnqualifiedJoinType, VariableTableReference,
};

use crate::parser::{PResult, Parser};
use crate::token::TokenKind;

impl Parser {
    // -- FROM clause --------------------------------------------------------

    pub(crate) fn parse_from_clause(&mut self) -> PResult<FromClause> {
        self.expect(&TokenKind::KwFrom, "FROM")?;
        let mut table_references = vec![self.parse_table_reference()?];
        while self.check(&TokenKind::Comma) {
            let saved = self.save();
            self.advance();
            match self.parse_table_reference() {
                Ok(reference) => table_references.push(reference),
                Err(err) => {
                    if !self.options.lenient_from {
                        return Err(err);
                    }
                    // Lenient mode: drop the broken tail of the list and
                    // resume at the next clause boundary.
                    self.restore(saved);
                    self.skip_to_clause_boundary();
                    break;
                }
            }
        }
        Ok(FromClause { table_references })
    }

    /// Advance past tokens that cannot start a clause, tracking paren depth
    /// so a `)` that closes an enclosing subquery is left in place.
    fn skip_to_clause_boundary(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek_kind() {
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::KwGo => return,
                TokenKind::KwWhere
                | TokenKind::KwGroup
                | TokenKind::KwHaving
                | TokenKind::KwOrder
                | TokenKind::KwOption
                | TokenKind::KwUnion
                | TokenKind::KwExcept
                | TokenKind::KwIntersect
                | TokenKind::KwFor
                    if depth == 0 =>
                {
                    return;
                }
                TokenKind::LParen => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RParen => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // -- joins --------------------------------------------------------------

    pub(crate) fn parse_table_reference(&mut self) -> PResult<TableReference> {
        let mut reference = self.parse_table_reference_with_modifiers()?;
        loop {
            match self.peek_kind() {
                TokenKind::KwCross => {
                    self.advance();
                    let join_type = if self.eat(&TokenKind::KwJoin) {
                        UnqualifiedJoinType::CrossJoin
                    } else if self.eat(&TokenKind::KwApply) {
                        UnqualifiedJoinType::CrossApply
                    } else {
                        return Err(self.err_expected("JOIN or APPLY"));
                    };
                    let second = self.parse_table_reference_with_modifiers()?;
                    reference = TableReference::UnqualifiedJoin(Box::new(UnqualifiedJoin {
                        join_type,
                        first: reference,
                        second,
                    }));
                }
                TokenKind::KwOuter if *self.peek_nth(1) == TokenKind::KwApply => {
                    self.advance();
                    self.advance();
                    let second = self.parse_table_reference_with_modifiers()?;
                    reference = TableReference::UnqualifiedJoin(Box::new(UnqualifiedJoin {
                        join_type: UnqualifiedJoinType::OuterApply,
                        first: reference,
                        second,
                    }));
                }
                TokenKind::KwJoin
                | TokenKind::KwInner
                | TokenKind::KwLeft
                | TokenKind::KwRight
                | TokenKind::KwFull => {
                    let join_type = self.parse_qualified_join_type()?;
                    let second = self.parse_table_reference_with_modifiers()?;
                    self.expect(&TokenKind::KwOn, "ON")?;
                    let search_condition = self.parse_boolean_expression()?;
                    reference = TableReference::QualifiedJoin(Box::new(QualifiedJoin {
                        join_type,
                        first: reference,
                        second,
                        search_condition,
                    }));
                }
                _ => return Ok(reference),
            }
        }
    }

    fn parse_qualified_join_type(&mut self) -> PResult<QualifiedJoinType> {
        let join_type = match self.peek_kind() {
            TokenKind::KwJoin => {
                self.advance();
                return Ok(QualifiedJoinType::Inner);
            }
            TokenKind::KwInner => QualifiedJoinType::Inner,
            TokenKind::KwLeft => QualifiedJoinType::LeftOuter,
            TokenKind::KwRight => QualifiedJoinType::RightOuter,
            TokenKind::KwFull => QualifiedJoinType::FullOuter,
            _ => return Err(self.err_expected("a join")),
        };
        self.advance();
        self.eat(&TokenKind::KwOuter);
        self.expect(&TokenKind::KwJoin, "JOIN")?;
        Ok(join_type)
    }

    // -- PIVOT / UNPIVOT ----------------------------------------------------

    fn parse_table_reference_with_modifiers(&mut self) -> PResult<TableReference> {
        let mut reference = self.parse_table_reference_primary()?;
        loop {
            if self.eat(&TokenKind::KwPivot) {
                reference = self.parse_pivot_tail(reference)?;
            } else if self.eat(&TokenKind::KwUnpivot) {
                reference = self.parse_unpivot_tail(reference)?;
            } else {
                return Ok(reference);
            }
        }
    }

    fn parse_pivot_tail(&mut self, table: TableReference) -> PResult<TableReference> {
        self.expect(&TokenKind::LParen, "'('")?;
        let aggregate = self.parse_scalar_expression()?;
        self.expect(&TokenKind::KwFor, "FOR")?;
        let pivot_column = self.parse_dotted_column()?;
        self.expect(&TokenKind::KwIn, "IN")?;
        self.expect(&TokenKind::LParen, "'('")?;
        let in_columns = self.parse_comma_sep(|p| p.parse_name_part())?;
        self.expect(&TokenKind::RParen, "')'")?;
        self.expect(&TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(TableReference::Pivoted(Box::new(PivotedTableReference {
            table,
            aggregate,
            pivot_column,
            in_columns,
            alias,
        })))
    }

    fn parse_unpivot_tail(&mut self, table: TableReference) -> PResult<TableReference> {
        self.expect(&TokenKind::LParen, "'('")?;
        let value_column = self.parse_name_part()?;
        self.expect(&TokenKind::KwFor, "FOR")?;
        let pivot_column = self.parse_name_part()?;
        self.expect(&TokenKind::KwIn, "IN")?;
        self.expect(&TokenKind::LParen, "'('")?;
        let in_columns = self.parse_comma_sep(|p| p.parse_name_part())?;
        self.expect(&TokenKind::RParen, "')'")?;
        self.expect(&TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(TableReference::Unpivoted(Box::new(UnpivotedTableReference {
            table,
            value_column,
            pivot_column,
            in_columns,
            alias,
        })))
    }

    pub(crate) fn parse_dotted_column(&mut self) -> PResult<MultiPartIdentifier> {
        let mut parts = vec![self.parse_name_part()?];
        while self.eat(&TokenKind::Dot) {
            parts.push(self.parse_name_part()?);
        }
        Ok(MultiPartIdentifier::new(parts))
    }

    // -- primary table references -------------------------------------------

    fn parse_table_reference_primary(&mut self) -> PResult<TableReference> {
        if self.check(&TokenKind::LParen) {
            return self.parse_parenthesized_source();
        }
        if self.peek_is_variable() {
            let variable = self.parse_variable_reference()?;
            let alias = self.parse_table_alias()?;
            return Ok(TableReference::Variable(VariableTableReference {
                variable,
                alias,
            }));
        }
        match self.peek_kind().clone() {
            TokenKind::KwOpenrowset => self.parse_openrowset(),
            TokenKind::KwContainstable => {
                self.parse_full_text_table(FullTextFunctionKind::Contains)
            }
            TokenKind::KwFreetexttable => {
                self.parse_full_text_table(FullTextFunctionKind::FreeText)
            }
            TokenKind::KwChangetable => self.parse_change_table(),
            TokenKind::KwPredict => self.parse_predict_table(),
            TokenKind::Ident(name) if semantic_function_kind(&name).is_some() => {
                self.parse_semantic_table()
            }
            _ => self.parse_named_or_function_source(),
        }
    }

    /// `(` already pending: a derived query, a VALUES constructor, a DML
    /// statement with OUTPUT, or a parenthesized join.
    fn parse_parenthesized_source(&mut self) -> PResult<TableReference> {
        if self.starts_query_expression() {
            self.expect(&TokenKind::LParen, "'('")?;
            let query = self.parse_query_expression()?;
            self.expect(&TokenKind::RParen, "')'")?;
            let (alias, columns) = self.parse_derived_alias()?;
            return Ok(TableReference::QueryDerived(Box::new(QueryDerivedTable {
                query,
                alias,
                columns,
            })));
        }
        self.expect(&TokenKind::LParen, "'('")?;
        match self.peek_kind() {
            TokenKind::KwValues => {
                self.advance();
                let rows = self.parse_comma_sep(|p| {
                    p.expect(&TokenKind::LParen, "'('")?;
                    let row = p.parse_comma_sep(|p| p.parse_scalar_expression())?;
                    p.expect(&TokenKind::RParen, "')'")?;
                    Ok(row)
                })?;
                self.expect(&TokenKind::RParen, "')'")?;
                let (alias, columns) = self.parse_derived_alias()?;
                Ok(TableReference::InlineDerived(Box::new(InlineDerivedTable {
                    rows,
                    alias,
                    columns,
                })))
            }
            TokenKind::KwInsert
            | TokenKind::KwUpdate
            | TokenKind::KwDelete
            | TokenKind::KwMerge => {
                let statement = self.parse_statement()?;
                self.expect(&TokenKind::RParen, "')'")?;
                let (alias, columns) = self.parse_derived_alias()?;
                Ok(TableReference::DmlTable(Box::new(
                    tsql_ast::DmlTableReference {
                        statement,
                        alias,
                        columns,
                    },
                )))
            }
            _ => {
                let inner = self.parse_table_reference()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(TableReference::JoinParenthesis(Box::new(inner)))
            }
        }
    }

    /// A dotted name followed by either a table-valued function call, a
    /// legacy parenthesized hint list, or nothing.
    fn parse_named_or_function_source(&mut self) -> PResult<TableReference> {
        let schema_object = self.parse_schema_object_name()?;

        if self.check(&TokenKind::LParen) {
            // `t (NOLOCK)` and `f(@x)` both follow a name with `(`; try the
            // hint reading first and back out if it does not close.
            let saved = self.save();
            self.advance();
            if let Ok(table_hints) = self.parse_table_hint_list() {
                if self.eat(&TokenKind::RParen) {
                    let alias = self.parse_table_alias()?;
                    return Ok(TableReference::Named(NamedTableReference {
                        schema_object,
                        alias,
                        table_hints,
                    }));
                }
            }
            self.restore(saved);

            self.expect(&TokenKind::LParen, "'('")?;
            let mut parameters = Vec::new();
            if !self.check(&TokenKind::RParen) {
                parameters = self.parse_comma_sep(|p| p.parse_scalar_expression())?;
            }
            self.expect(&TokenKind::RParen, "')'")?;
            let (alias, columns) = self.parse_derived_alias()?;
            return Ok(TableReference::SchemaObjectFunction(Box::new(
                SchemaObjectFunctionTableReference {
                    schema_object,
                    parameters,
                    alias,
                    columns,
                },
            )));
        }

        let alias = self.parse_table_alias()?;
        let mut table_hints = Vec::new();
        if self.check(&TokenKind::KwWith) && *self.peek_nth(1) == TokenKind::LParen {
            self.advance();
            self.advance();
            table_hints = self.parse_table_hint_list()?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        Ok(TableReference::Named(NamedTableReference {
            schema_object,
            alias,
            table_hints,
        }))
    }

    // -- table-valued built-ins ---------------------------------------------

    fn parse_openrowset(&mut self) -> PResult<TableReference> {
        self.expect(&TokenKind::KwOpenrowset, "OPENROWSET")?;
        self.expect(&TokenKind::LParen, "'('")?;
        let bulk = self.eat(&TokenKind::KwBulk);
        let mut arguments = Vec::new();
        let mut options = Vec::new();
        loop {
            if let TokenKind::Ident(name) = self.peek_kind() {
                if !name.starts_with('@') && *self.peek_nth(1) == TokenKind::Eq {
                    let option_name = Identifier::new(name.clone());
                    self.advance();
                    self.advance();
                    options.push(IdentifierOrValue::Identifier(option_name));
                    options.push(IdentifierOrValue::Value(self.parse_literal_value()?));
                    if self.eat(&TokenKind::Comma) {
                        continue;
                    }
                    break;
                }
                if !name.starts_with('@') && is_bare_openrowset_option(name) {
                    let option_name = Identifier::new(name.clone());
                    self.advance();
                    options.push(IdentifierOrValue::Identifier(option_name));
                    if self.eat(&TokenKind::Comma) {
                        continue;
                    }
                    break;
                }
            }
            arguments.push(self.parse_scalar_expression()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(TableReference::OpenRowset(Box::new(
            OpenRowsetTableReference {
                bulk,
                arguments,
                options,
                alias,
            },
        )))
    }

    fn parse_full_text_table(
        &mut self,
        kind: FullTextFunctionKind,
    ) -> PResult<TableReference> {
        self.advance();
        self.expect(&TokenKind::LParen, "'('")?;
        let table = self.parse_schema_object_name()?;
        self.expect(&TokenKind::Comma, "','")?;
        let columns = self.parse_full_text_columns()?;
        self.expect(&TokenKind::Comma, "','")?;
        let condition = self.parse_scalar_expression()?;
        let mut language = None;
        let mut top_n = None;
        while self.eat(&TokenKind::Comma) {
            if self.eat(&TokenKind::KwLanguage) {
                language = Some(self.parse_scalar_expression()?);
            } else {
                top_n = Some(self.parse_scalar_expression()?);
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(TableReference::FullTextTable(Box::new(
            FullTextTableReference {
                kind,
                table,
                columns,
                condition,
                language,
                top_n,
                alias,
            },
        )))
    }

    fn parse_change_table(&mut self) -> PResult<TableReference> {
        self.expect(&TokenKind::KwChangetable, "CHANGETABLE")?;
        self.expect(&TokenKind::LParen, "'('")?;
        let kind = match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("CHANGES") => {
                self.advance();
                ChangeTableKind::Changes
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("VERSION") => {
                self.advance();
                ChangeTableKind::Version
            }
            _ => return Err(self.err_expected("CHANGES or VERSION")),
        };
        let target = self.parse_schema_object_name()?;
        let mut parameters = Vec::new();
        while self.eat(&TokenKind::Comma) {
            // The VERSION form passes parenthesized column and value lists;
            // flatten them into the parameter list.
            if self.eat(&TokenKind::LParen) {
                parameters.extend(self.parse_comma_sep(|p| p.parse_scalar_expression())?);
                self.expect(&TokenKind::RParen, "')'")?;
            } else {
                parameters.push(self.parse_scalar_expression()?);
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(TableReference::ChangeTable(Box::new(ChangeTableReference {
            kind,
            target,
            parameters,
            alias,
        })))
    }

    fn parse_predict_table(&mut self) -> PResult<TableReference> {
        self.expect(&TokenKind::KwPredict, "PREDICT")?;
        self.expect(&TokenKind::LParen, "'('")?;
        self.expect_ident_text("MODEL")?;
        self.expect(&TokenKind::Eq, "'='")?;
        let model = self.parse_scalar_expression()?;
        self.expect(&TokenKind::Comma, "','")?;
        self.expect_ident_text("DATA")?;
        self.expect(&TokenKind::Eq, "'='")?;
        let data = self.parse_table_reference_with_modifiers()?;
        let runtime = if self.eat(&TokenKind::Comma) {
            self.expect_ident_text("RUNTIME")?;
            self.expect(&TokenKind::Eq, "'='")?;
            Some(self.parse_identifier("a runtime name")?)
        } else {
            None
        };
        self.expect(&TokenKind::RParen, "')'")?;
        self.expect(&TokenKind::KwWith, "WITH")?;
        self.expect(&TokenKind::LParen, "'('")?;
        let with_columns = self.parse_comma_sep(|p| p.parse_column_definition())?;
        self.expect(&TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(TableReference::Predict(Box::new(PredictTableReference {
            model,
            data,
            runtime,
            with_columns,
            alias,
        })))
    }

    fn parse_semantic_table(&mut self) -> PResult<TableReference> {
        let kind = match self.peek_kind() {
            TokenKind::Ident(name) => match semantic_function_kind(name) {
                Some(kind) => kind,
                None => return Err(self.err_expected("a semantic table function")),
            },
            _ => return Err(self.err_expected("a semantic table function")),
        };
        self.advance();
        self.expect(&TokenKind::LParen, "'('")?;
        let table = self.parse_schema_object_name()?;
        self.expect(&TokenKind::Comma, "','")?;
        let columns = self.parse_full_text_columns()?;
        let mut arguments = Vec::new();
        while self.eat(&TokenKind::Comma) {
            arguments.push(self.parse_scalar_expression()?);
        }
        self.expect(&TokenKind::RParen, "')'")?;
        let alias = self.parse_table_alias()?;
        Ok(TableReference::SemanticTable(Box::new(
            SemanticTableReference {
                kind,
                table,
                columns,
                arguments,
                alias,
            },
        )))
    }

    fn expect_ident_text(&mut self, text: &str) -> PResult<()> {
        match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case(text) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.err_expected(text)),
        }
    }

    // -- aliases ------------------------------------------------------------

    /// Optional `[AS] alias` after a table source. A bare word is rejected
    /// when it would begin the next clause or join.
    pub(crate) fn parse_table_alias(&mut self) -> PResult<Option<Identifier>> {
        if self.eat(&TokenKind::KwAs) {
            return self.parse_identifier("an alias").map(Some);
        }
        match self.peek_kind() {
            TokenKind::Ident(s) if !s.starts_with('@') && !s.starts_with('$') => {
                let ident = Identifier::new(s.clone());
                self.advance();
                Ok(Some(ident))
            }
            TokenKind::BracketedIdent(s) => {
                let ident = Identifier::quoted(s.clone(), tsql_ast::QuoteType::SquareBracket);
                self.advance();
                Ok(Some(ident))
            }
            TokenKind::QuotedIdent(s) => {
                let ident = Identifier::quoted(s.clone(), tsql_ast::QuoteType::DoubleQuote);
                self.advance();
                Ok(Some(ident))
            }
            kind if kind.is_nonreserved_kw()
                && !matches!(
                    kind,
                    TokenKind::KwUsing
                        | TokenKind::KwOutput
                        | TokenKind::KwGo
                        | TokenKind::KwWindow
                        | TokenKind::KwOffset
                        | TokenKind::KwMatched
                ) =>
            {
                let ident = Identifier::new(kind.kw_to_str().unwrap_or_default());
                self.advance();
                Ok(Some(ident))
            }
            _ => Ok(None),
        }
    }

    /// `[AS] alias [(col [, col ...])]` after a derived table.
    fn parse_derived_alias(&mut self) -> PResult<(Option<Identifier>, Vec<Identifier>)> {
        let alias = self.parse_table_alias()?;
        let mut columns = Vec::new();
        if alias.is_some() && self.eat(&TokenKind::LParen) {
            columns = self.parse_comma_sep(|p| p.parse_identifier("a column name"))?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        Ok((alias, columns))
    }

    // -- table hints --------------------------------------------------------

    pub(crate) fn parse_table_hint_list(&mut self) -> PResult<Vec<TableHint>> {
        self.parse_comma_sep(|p| p.parse_table_hint())
    }

    pub(crate) fn parse_table_hint(&mut self) -> PResult<TableHint> {
        if self.check(&TokenKind::KwIndex) {
            self.advance();
            let mut parameters = Vec::new();
            if self.eat(&TokenKind::Eq) {
                parameters.push(self.parse_hint_parameter()?);
            } else {
                self.expect(&TokenKind::LParen, "'('")?;
                parameters = self.parse_comma_sep(|p| p.parse_hint_parameter())?;
                self.expect(&TokenKind::RParen, "')'")?;
            }
            return Ok(TableHint {
                kind: TableHintKind::Index,
                parameters,
            });
        }
        if self.eat(&TokenKind::KwHoldlock) {
            return Ok(hint(TableHintKind::HoldLock));
        }
        if self.eat(&TokenKind::KwSerializable) {
            return Ok(hint(TableHintKind::Serializable));
        }
        if self.eat(&TokenKind::KwSnapshot) {
            return Ok(hint(TableHintKind::Snapshot));
        }
        let kind = match self.peek_kind() {
            TokenKind::Ident(s) if !s.starts_with('@') => match table_hint_kind(s) {
                Some(kind) => kind,
                None => return Err(self.err_expected("a table hint")),
            },
            _ => return Err(self.err_expected("a table hint")),
        };
        self.advance();
        let mut parameters = Vec::new();
        if kind == TableHintKind::ForceSeek && self.eat(&TokenKind::LParen) {
            // FORCESEEK(index (col [, col ...]))
            parameters.push(self.parse_hint_parameter()?);
            if self.eat(&TokenKind::LParen) {
                parameters.extend(self.parse_comma_sep(|p| p.parse_hint_parameter())?);
                self.expect(&TokenKind::RParen, "')'")?;
            }
            self.expect(&TokenKind::RParen, "')'")?;
        }
        Ok(TableHint { kind, parameters })
    }

    fn parse_hint_parameter(&mut self) -> PResult<IdentifierOrValue> {
        if let TokenKind::Integer(n) = self.peek_kind() {
            let n = n.clone();
            self.advance();
            return Ok(IdentifierOrValue::Value(Literal::Integer(n)));
        }
        Ok(IdentifierOrValue::Identifier(
            self.parse_identifier("an index name")?,
        ))
    }

    /// A literal token usable as an option value.
    pub(crate) fn parse_literal_value(&mut self) -> PResult<Literal> {
        let literal = match self.peek_kind().clone() {
            TokenKind::Integer(n) => Literal::Integer(n),
            TokenKind::Numeric(n) => Literal::Numeric(n),
            TokenKind::String(s) => Literal::String {
                value: s,
                national: false,
            },
            TokenKind::NationalString(s) => Literal::String {
                value: s,
                national: true,
            },
            TokenKind::Binary(s) => Literal::Binary(s),
            TokenKind::KwNull => Literal::Null,
            _ => return Err(self.err_expected("a literal")),
        };
        self.advance();
        Ok(literal)
    }
}

fn hint(kind: TableHintKind) -> TableHint {
    TableHint {
        kind,
        parameters: Vec::new(),
    }
}

fn table_hint_kind(name: &str) -> Option<TableHintKind> {
    let kind = match name.to_ascii_uppercase().as_str() {
        "NOLOCK" => TableHintKind::NoLock,
        "READUNCOMMITTED" => TableHintKind::ReadUncommitted,
        "READCOMMITTED" => TableHintKind::ReadCommitted,
        "READCOMMITTEDLOCK" => TableHintKind::ReadCommittedLock,
        "REPEATABLEREAD" => TableHintKind::RepeatableRead,
        "READPAST" => TableHintKind::ReadPast,
        "UPDLOCK" => TableHintKind::UpdLock,
        "XLOCK" => TableHintKind::XLock,
        "TABLOCK" => TableHintKind::TabLock,
        "TABLOCKX" => TableHintKind::TabLockX,
        "PAGLOCK" => TableHintKind::PagLock,
        "ROWLOCK" => TableHintKind::RowLock,
        "NOWAIT" => TableHintKind::NoWait,
        "NOEXPAND" => TableHintKind::NoExpand,
        "FORCESEEK" => TableHintKind::ForceSeek,
        "FORCESCAN" => TableHintKind::ForceScan,
        "FASTFIRSTROW" => TableHintKind::FastFirstRow,
        "KEEPIDENTITY" => TableHintKind::KeepIdentity,
        "KEEPDEFAULTS" => TableHintKind::KeepDefaults,
        "IGNORE_CONSTRAINTS" => TableHintKind::IgnoreConstraints,
        "IGNORE_TRIGGERS" => TableHintKind::IgnoreTriggers,
        _ => return None,
    };
    Some(kind)
}

fn semantic_function_kind(name: &str) -> Option<SemanticFunctionKind> {
    let kind = match name.to_ascii_uppercase().as_str() {
        "SEMANTICKEYPHRASETABLE" => SemanticFunctionKind::KeyPhraseTable,
        "SEMANTICSIMILARITYTABLE" => SemanticFunctionKind::SimilarityTable,
        "SEMANTICSIMILARITYDETAILSTABLE" => SemanticFunctionKind::SimilarityDetailsTable,
        _ => return None,
    };
    Some(kind)
}

fn is_bare_openrowset_option(name: &str) -> bool {
    matches!(
        name.to_ascii_uppercase().as_str(),
        "SINGLE_BLOB" | "SINGLE_CLOB" | "SINGLE_NCLOB"
    )
}

#[cfg(test)]
mod tests {
    use tsql_ast::{
        QualifiedJoinType, QueryExpression, Statement, TableHintKind, TableReference,
        UnqualifiedJoinType,
    };

    use crate::parser::{parse, parse_with_options, ParserOptions};

    fn from_refs(src: &str) -> Vec<TableReference> {
        let script = parse(src).expect("script should parse");
        let Statement::Select(select) = script.batches[0].statements[0].clone() else {
            panic!("expected a SELECT statement");
        };
        let QueryExpression::Specification(spec) = select.query else {
            panic!("expected a specification");
        };
        spec.from.expect("from clause").table_references
    }

    #[test]
    fn named_reference_with_alias() {
        let refs = from_refs("SELECT 1 FROM dbo.users AS u");
        let TableReference::Named(named) = &refs[0] else {
            panic!("expected a named reference");
        };
        assert_eq!(named.schema_object.base_identifier().value, "users");
        assert_eq!(named.alias.as_ref().expect("alias").value, "u");
    }

    #[test]
    fn legacy_hint_syntax() {
        let refs = from_refs("SELECT 1 FROM t (NOLOCK)");
        let TableReference::Named(named) = &refs[0] else {
            panic!("expected a named reference");
        };
        assert_eq!(named.table_hints[0].kind, TableHintKind::NoLock);
    }

    #[test]
    fn with_hint_syntax_after_alias() {
        let refs = from_refs("SELECT 1 FROM t x WITH (NOLOCK, INDEX(ix_a))");
        let TableReference::Named(named) = &refs[0] else {
            panic!("expected a named reference");
        };
        assert_eq!(named.alias.as_ref().expect("alias").value, "x");
        assert_eq!(named.table_hints.len(), 2);
        assert_eq!(named.table_hints[1].kind, TableHintKind::Index);
        assert_eq!(named.table_hints[1].parameters.len(), 1);
    }

    #[test]
    fn left_outer_join() {
        let refs = from_refs("SELECT 1 FROM a LEFT JOIN b ON a.id = b.id");
        let TableReference::QualifiedJoin(join) = &refs[0] else {
            panic!("expected a join");
        };
        assert_eq!(join.join_type, QualifiedJoinType::LeftOuter);
    }

    #[test]
    fn bare_join_means_inner() {
        let refs = from_refs("SELECT 1 FROM a JOIN b ON a.id = b.id");
        let TableReference::QualifiedJoin(join) = &refs[0] else {
            panic!("expected a join");
        };
        assert_eq!(join.join_type, QualifiedJoinType::Inner);
    }

    #[test]
    fn cross_apply() {
        let refs = from_refs("SELECT 1 FROM a CROSS APPLY dbo.fn(a.x) f");
        let TableReference::UnqualifiedJoin(join) = &refs[0] else {
            panic!("expected an unqualified join");
        };
        assert_eq!(join.join_type, UnqualifiedJoinType::CrossApply);
        assert!(matches!(
            join.second,
            TableReference::SchemaObjectFunction(_)
        ));
    }

    #[test]
    fn comma_separated_sources() {
        let refs = from_refs("SELECT 1 FROM a, b, c");
        assert_eq!(refs.len(), 3);
    }

    #[test]
    fn derived_query_table() {
        let refs = from_refs("SELECT 1 FROM (SELECT a FROM t) d (a)");
        let TableReference::QueryDerived(derived) = &refs[0] else {
            panic!("expected a derived table");
        };
        assert_eq!(derived.alias.as_ref().expect("alias").value, "d");
        assert_eq!(derived.columns.len(), 1);
    }

    #[test]
    fn inline_values_table() {
        let refs = from_refs("SELECT 1 FROM (VALUES (1, 'a'), (2, 'b')) v (id, name)");
        let TableReference::InlineDerived(inline) = &refs[0] else {
            panic!("expected an inline derived table");
        };
        assert_eq!(inline.rows.len(), 2);
        assert_eq!(inline.rows[0].len(), 2);
        assert_eq!(inline.columns.len(), 2);
    }

    #[test]
    fn table_variable_source() {
        let refs = from_refs("SELECT 1 FROM @rows r");
        let TableReference::Variable(variable) = &refs[0] else {
            panic!("expected a table variable");
        };
        assert_eq!(variable.variable.name, "@rows");
        assert_eq!(variable.alias.as_ref().expect("alias").value, "r");
    }

    #[test]
    fn pivoted_source() {
        let refs =
            from_refs("SELECT 1 FROM t PIVOT (SUM(v) FOR k IN ([a], [b])) p");
        let TableReference::Pivoted(pivoted) = &refs[0] else {
            panic!("expected a pivoted source");
        };
        assert_eq!(pivoted.in_columns.len(), 2);
        assert_eq!(pivoted.alias.as_ref().expect("alias").value, "p");
    }

    #[test]
    fn parenthesized_join() {
        let refs = from_refs("SELECT 1 FROM (a JOIN b ON a.id = b.id)");
        assert!(matches!(refs[0], TableReference::JoinParenthesis(_)));
    }

    #[test]
    fn join_keyword_is_not_an_alias() {
        let refs = from_refs("SELECT 1 FROM a INNER JOIN b ON a.x = b.x");
        let TableReference::QualifiedJoin(join) = &refs[0] else {
            panic!("expected a join");
        };
        let TableReference::Named(first) = &join.first else {
            panic!("expected a named first");
        };
        assert!(first.alias.is_none());
    }

    #[test]
    fn lenient_from_truncates_broken_tail() {
        let options = ParserOptions { lenient_from: true };
        let script = parse_with_options("SELECT a FROM t, 1 WHERE a = 1", options)
            .expect("lenient parse should succeed");
        let Statement::Select(select) = script.batches[0].statements[0].clone() else {
            panic!("expected a SELECT statement");
        };
        let QueryExpression::Specification(spec) = select.query else {
            panic!("expected a specification");
        };
        assert_eq!(spec.from.expect("from clause").table_references.len(), 1);
        assert!(spec.where_clause.is_some());
    }

    #[test]
    fn strict_from_propagates_the_error() {
        assert!(parse("SELECT a FROM t, 1").is_err());
    }
}
