//! Query expression grammar: SELECT statements, set operators, select
//! elements, and the clause family (ORDER BY, OFFSET, GROUP BY, HAVING,
//! WINDOW, OVER, FOR).

use tsql_ast::{
    BinaryQueryExpression, BinaryQueryExpressionType, ColumnReferenceExpression,
    CommonTableExpression, ExpressionWithSortOrder, ForClause, GroupByClause,
    GroupByOption, GroupingSpecification, HavingClause, Identifier, IntoClause,
    JsonForClause, JsonForClauseMode, JsonForClauseOption, JsonForClauseOptionKind,
    MultiPartIdentifier, OffsetClause, OrderByClause, OverClause,
    QueryExpression, QueryParenthesisExpression, QuerySpecification, ScalarExpression,
    SelectElement, SelectScalarExpression, SelectSetVariable, SelectStarExpression,
    SelectStatement, SortOrder, Statement, TopRowFilter, UniqueRowFilter, WhereClause,
    WindowClause, WindowDefinition, WindowDelimiter, WindowDelimiterType,
    WindowFrameClause, WindowFrameType, WithClause, XmlForClause, XmlForClauseMode,
    XmlForClauseOption, XmlForClauseOptionKind,
};

use crate::parser::{PResult, Parser};
use crate::token::TokenKind;

impl Parser {
    // -- statements ---------------------------------------------------------

    pub(crate) fn parse_select_statement(&mut self) -> PResult<Statement> {
        self.parse_select_statement_with(None)
    }

    pub(crate) fn parse_select_statement_with(
        &mut self,
        with: Option<WithClause>,
    ) -> PResult<Statement> {
        let query = self.parse_query_expression()?;
        let optimizer_hints = self.parse_optional_option_clause()?;
        Ok(Statement::Select(Box::new(SelectStatement {
            with,
            query,
            optimizer_hints,
        })))
    }

    /// A statement starting with `WITH`: CTEs followed by a DML verb.
    pub(crate) fn parse_with_dml_statement(&mut self) -> PResult<Statement> {
        let with = Some(self.parse_with_clause()?);
        match self.peek_kind() {
            TokenKind::KwSelect | TokenKind::LParen => {
                self.parse_select_statement_with(with)
            }
            TokenKind::KwInsert => self.parse_insert_statement(with),
            TokenKind::KwUpdate => self.parse_update_statement(with),
            TokenKind::KwDelete => self.parse_delete_statement(with),
            TokenKind::KwMerge => self.parse_merge_statement(with),
            _ => Err(self.err_expected("SELECT, INSERT, UPDATE, DELETE, or MERGE")),
        }
    }

    pub(crate) fn parse_with_clause(&mut self) -> PResult<WithClause> {
        self.expect(&TokenKind::KwWith, "WITH")?;
        let ctes = self.parse_comma_sep(|p| p.parse_common_table_expression())?;
        Ok(WithClause { ctes })
    }

    fn parse_common_table_expression(&mut self) -> PResult<CommonTableExpression> {
        let name = self.parse_identifier("a CTE name")?;
        let mut columns = Vec::new();
        if self.eat(&TokenKind::LParen) {
            columns = self.parse_comma_sep(|p| p.parse_identifier("a column name"))?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        self.expect(&TokenKind::KwAs, "AS")?;
        self.expect(&TokenKind::LParen, "'('")?;
        let query = self.parse_query_expression()?;
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(CommonTableExpression {
            name,
            columns,
            query,
        })
    }

    // -- query expressions --------------------------------------------------

    /// A full query expression: set-operator chain plus the outermost
    /// `ORDER BY` / `OFFSET` / `FOR` attachments.
    pub(crate) fn parse_query_expression(&mut self) -> PResult<QueryExpression> {
        let mut expr = self.parse_primary_query_expression()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::KwUnion => BinaryQueryExpressionType::Union,
                TokenKind::KwExcept => BinaryQueryExpressionType::Except,
                TokenKind::KwIntersect => BinaryQueryExpressionType::Intersect,
                _ => break,
            };
            self.advance();
            let all = self.eat(&TokenKind::KwAll);
            let second = self.parse_primary_query_expression()?;
            // INTO is legal only on the first primary; hoist it outward so
            // it always lives on the outermost node.
            let into = take_into(&mut expr);
            expr = QueryExpression::Binary(Box::new(BinaryQueryExpression {
                op,
                all,
                first: expr,
                second,
                into,
                order_by: None,
                offset: None,
                for_clause: None,
            }));
        }

        if self.check(&TokenKind::KwOrder) {
            let order_by = self.parse_order_by_clause()?;
            set_order_by(&mut expr, order_by);
            if self.check(&TokenKind::KwOffset) {
                let offset = self.parse_offset_clause()?;
                set_offset(&mut expr, offset);
            }
        }
        if self.check(&TokenKind::KwFor) {
            let for_clause = self.parse_for_clause()?;
            set_for_clause(&mut expr, for_clause);
        }
        Ok(expr)
    }

    fn parse_primary_query_expression(&mut self) -> PResult<QueryExpression> {
        if self.eat(&TokenKind::LParen) {
            let query = self.parse_query_expression()?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(QueryExpression::Parenthesis(Box::new(
                QueryParenthesisExpression {
                    query,
                    order_by: None,
                    offset: None,
                    for_clause: None,
                },
            )));
        }
        let spec = self.parse_query_specification()?;
        Ok(QueryExpression::Specification(Box::new(spec)))
    }

    fn parse_query_specification(&mut self) -> PResult<QuerySpecification> {
        self.expect(&TokenKind::KwSelect, "SELECT")?;
        let mut spec = QuerySpecification::default();

        if self.eat(&TokenKind::KwAll) {
            spec.unique_row_filter = UniqueRowFilter::All;
        } else if self.eat(&TokenKind::KwDistinct) {
            spec.unique_row_filter = UniqueRowFilter::Distinct;
        }
        if self.check(&TokenKind::KwTop) {
            spec.top_row_filter = Some(self.parse_top_row_filter()?);
        }

        spec.select_elements = self.parse_comma_sep(|p| p.parse_select_element())?;

        if self.eat(&TokenKind::KwInto) {
            let target = self.parse_schema_object_name()?;
            let on_filegroup = if self.eat(&TokenKind::KwOn) {
                Some(self.parse_identifier("a filegroup name")?)
            } else {
                None
            };
            spec.into = Some(IntoClause {
                target,
                on_filegroup,
            });
        }
        if self.check(&TokenKind::KwFrom) {
            spec.from = Some(self.parse_from_clause()?);
        }
        if self.eat(&TokenKind::KwWhere) {
            spec.where_clause = Some(WhereClause {
                search_condition: self.parse_boolean_expression()?,
            });
        }
        if self.check(&TokenKind::KwGroup) {
            spec.group_by = Some(self.parse_group_by_clause()?);
        }
        if self.eat(&TokenKind::KwHaving) {
            spec.having = Some(HavingClause {
                search_condition: self.parse_boolean_expression()?,
            });
        }
        if self.check(&TokenKind::KwWindow) && *self.peek_nth(1) != TokenKind::Colon {
            spec.window_clause = Some(self.parse_window_clause()?);
        }
        Ok(spec)
    }

    /// `TOP expr [PERCENT] [WITH TIES]`. The expression is restricted to a
    /// literal, a variable, or a parenthesized expression so that a
    /// following `*` select element is not misread as multiplication.
    pub(crate) fn parse_top_row_filter(&mut self) -> PResult<TopRowFilter> {
        self.expect(&TokenKind::KwTop, "TOP")?;
        let expression = self.parse_top_argument()?;
        let percent = self.eat(&TokenKind::KwPercent);
        let with_ties = if self.check(&TokenKind::KwWith) {
            self.advance();
            self.expect(&TokenKind::KwTies, "TIES")?;
            true
        } else {
            false
        };
        Ok(TopRowFilter {
            expression,
            percent,
            with_ties,
        })
    }

    fn parse_top_argument(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        match self.peek_kind().clone() {
            TokenKind::Integer(text) => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(
                    tsql_ast::Literal::Integer(text),
                    span,
                ))
            }
            TokenKind::Numeric(text) => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(
                    tsql_ast::Literal::Numeric(text),
                    span,
                ))
            }
            TokenKind::Ident(name) if name.starts_with("@@") => {
                Ok(ScalarExpression::GlobalVariable(self.parse_global_variable()?))
            }
            TokenKind::Ident(name) if name.starts_with('@') => {
                Ok(ScalarExpression::Variable(self.parse_variable_reference()?))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_scalar_expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(ScalarExpression::Parenthesis(
                    Box::new(inner),
                    start.merge(self.prev_span()),
                ))
            }
            _ => Err(self.err_expected("a TOP row count")),
        }
    }

    // -- select elements ----------------------------------------------------

    pub(crate) fn parse_select_element(&mut self) -> PResult<SelectElement> {
        if self.eat(&TokenKind::Star) {
            return Ok(SelectElement::Star(SelectStarExpression { qualifier: None }));
        }

        // `@v = expr` and compound assignments.
        if self.peek_is_variable() && !matches!(self.peek_kind(), TokenKind::Ident(s) if s.starts_with("@@"))
        {
            let saved = self.save();
            let variable = self.parse_variable_reference()?;
            if let Some(assignment_kind) = self.try_assignment_kind() {
                let expression = self.parse_scalar_expression()?;
                return Ok(SelectElement::SetVariable(SelectSetVariable {
                    variable,
                    assignment_kind,
                    expression,
                }));
            }
            self.restore(saved);
        }

        // `alias = expr` with the alias written first.
        if *self.peek_nth(1) == TokenKind::Eq {
            if let Some(column_name) = self.try_alias_first_name() {
                self.advance();
                let expression = self.parse_scalar_expression()?;
                return Ok(SelectElement::Scalar(SelectScalarExpression {
                    expression,
                    column_name: Some(column_name),
                }));
            }
        }

        let expression = self.parse_scalar_expression()?;

        // `qualifier.*` — the dot-run stops before `.*`, finish it here.
        if self.check(&TokenKind::Dot) && *self.peek_nth(1) == TokenKind::Star {
            if let ScalarExpression::ColumnReference(ColumnReferenceExpression {
                multi_part_identifier: Some(qualifier),
                ..
            }) = expression
            {
                self.advance();
                self.advance();
                return Ok(SelectElement::Star(SelectStarExpression {
                    qualifier: Some(qualifier),
                }));
            }
            return Err(self.err_expected("a column qualifier before '.*'"));
        }

        let column_name = self.try_select_alias()?;
        Ok(SelectElement::Scalar(SelectScalarExpression {
            expression,
            column_name,
        }))
    }

    /// A single token that can serve as the alias in `alias = expr`.
    fn try_alias_first_name(&mut self) -> Option<Identifier> {
        let ident = match self.peek_kind() {
            TokenKind::Ident(s) if !s.starts_with('@') && !s.starts_with('$') => {
                Identifier::new(s.clone())
            }
            TokenKind::BracketedIdent(s) => {
                Identifier::quoted(s.clone(), tsql_ast::QuoteType::SquareBracket)
            }
            TokenKind::QuotedIdent(s) => {
                Identifier::quoted(s.clone(), tsql_ast::QuoteType::DoubleQuote)
            }
            TokenKind::String(s) | TokenKind::NationalString(s) => {
                Identifier::new(s.clone())
            }
            kind if kind.is_nonreserved_kw() => {
                Identifier::new(kind.kw_to_str().unwrap_or_default())
            }
            _ => return None,
        };
        self.advance();
        Some(ident)
    }

    /// Optional alias after a select element. A bare identifier is rejected
    /// when it would begin the next clause.
    fn try_select_alias(&mut self) -> PResult<Option<Identifier>> {
        if self.eat(&TokenKind::KwAs) {
            return self.parse_alias_name().map(Some);
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
            TokenKind::String(s) | TokenKind::NationalString(s) => {
                let ident = Identifier::new(s.clone());
                self.advance();
                Ok(Some(ident))
            }
            // Non-reserved keywords may alias unless they begin the next
            // clause in this context.
            kind if kind.is_nonreserved_kw()
                && !matches!(kind, TokenKind::KwGo | TokenKind::KwWindow | TokenKind::KwOffset) =>
            {
                let ident = Identifier::new(kind.kw_to_str().unwrap_or_default());
                self.advance();
                Ok(Some(ident))
            }
            _ => Ok(None),
        }
    }

    /// The name after an explicit `AS`: identifier or string.
    pub(crate) fn parse_alias_name(&mut self) -> PResult<Identifier> {
        match self.peek_kind() {
            TokenKind::String(s) | TokenKind::NationalString(s) => {
                let ident = Identifier::new(s.clone());
                self.advance();
                Ok(ident)
            }
            _ => self.parse_identifier("an alias"),
        }
    }

    // -- ORDER BY / OFFSET --------------------------------------------------

    /// `ORDER BY expr [ASC|DESC] [, ...]`; consumes the leading keywords.
    pub(crate) fn parse_order_by_clause(&mut self) -> PResult<OrderByClause> {
        self.expect(&TokenKind::KwOrder, "ORDER")?;
        self.expect(&TokenKind::KwBy, "BY")?;
        let elements = self.parse_comma_sep(|p| {
            let expression = p.parse_scalar_expression()?;
            let sort_order = if p.eat(&TokenKind::KwAsc) {
                SortOrder::Ascending
            } else if p.eat(&TokenKind::KwDesc) {
                SortOrder::Descending
            } else {
                SortOrder::NotSpecified
            };
            Ok(ExpressionWithSortOrder {
                expression,
                sort_order,
            })
        })?;
        Ok(OrderByClause { elements })
    }

    pub(crate) fn parse_offset_clause(&mut self) -> PResult<OffsetClause> {
        self.expect(&TokenKind::KwOffset, "OFFSET")?;
        let offset_expression = self.parse_scalar_expression()?;
        if !self.eat(&TokenKind::KwRow) {
            self.eat(&TokenKind::KwRows);
        }
        let fetch_expression = if self.eat(&TokenKind::KwFetch) {
            if !self.eat(&TokenKind::KwFirst) && !self.eat(&TokenKind::KwNext) {
                return Err(self.err_expected("FIRST or NEXT"));
            }
            let expr = self.parse_scalar_expression()?;
            if !self.eat(&TokenKind::KwRow) {
                self.eat(&TokenKind::KwRows);
            }
            self.expect(&TokenKind::KwOnly, "ONLY")?;
            Some(expr)
        } else {
            None
        };
        Ok(OffsetClause {
            offset_expression,
            fetch_expression,
        })
    }

    // -- GROUP BY -----------------------------------------------------------

    pub(crate) fn parse_group_by_clause(&mut self) -> PResult<GroupByClause> {
        self.expect(&TokenKind::KwGroup, "GROUP")?;
        self.expect(&TokenKind::KwBy, "BY")?;
        let grouping_specifications =
            self.parse_comma_sep(|p| p.parse_grouping_specification())?;
        let mut group_by_option = GroupByOption::None;
        if self.check(&TokenKind::KwWith) {
            match self.peek_nth(1) {
                TokenKind::KwRollup => {
                    self.advance();
                    self.advance();
                    group_by_option = GroupByOption::Rollup;
                }
                TokenKind::KwCube => {
                    self.advance();
                    self.advance();
                    group_by_option = GroupByOption::Cube;
                }
                _ => {}
            }
        }
        Ok(GroupByClause {
            grouping_specifications,
            group_by_option,
        })
    }

    fn parse_grouping_specification(&mut self) -> PResult<GroupingSpecification> {
        match self.peek_kind() {
            TokenKind::KwRollup if *self.peek_nth(1) == TokenKind::LParen => {
                self.advance();
                self.advance();
                let items = self.parse_comma_sep(|p| p.parse_grouping_specification())?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(GroupingSpecification::Rollup(items))
            }
            TokenKind::KwCube if *self.peek_nth(1) == TokenKind::LParen => {
                self.advance();
                self.advance();
                let items = self.parse_comma_sep(|p| p.parse_grouping_specification())?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(GroupingSpecification::Cube(items))
            }
            TokenKind::KwGrouping if *self.peek_nth(1) == TokenKind::KwSets => {
                self.advance();
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let items = self.parse_comma_sep(|p| p.parse_grouping_specification())?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(GroupingSpecification::GroupingSets(items))
            }
            TokenKind::LParen => {
                self.advance();
                if self.eat(&TokenKind::RParen) {
                    return Ok(GroupingSpecification::GrandTotal);
                }
                let items = self.parse_comma_sep(|p| p.parse_grouping_specification())?;
                self.expect(&TokenKind::RParen, "')'")?;
                if items.len() == 1 && matches!(items[0], GroupingSpecification::Expression(_))
                {
                    // A single parenthesized expression is just an expression.
                    let mut items = items;
                    Ok(items.remove(0))
                } else {
                    Ok(GroupingSpecification::Composite(items))
                }
            }
            _ => Ok(GroupingSpecification::Expression(
                self.parse_scalar_expression()?,
            )),
        }
    }

    // -- WINDOW / OVER ------------------------------------------------------

    fn parse_window_clause(&mut self) -> PResult<WindowClause> {
        self.expect(&TokenKind::KwWindow, "WINDOW")?;
        let definitions = self.parse_comma_sep(|p| {
            let name = p.parse_identifier("a window name")?;
            p.expect(&TokenKind::KwAs, "AS")?;
            p.expect(&TokenKind::LParen, "'('")?;
            let (ref_window, partitions, order_by, window_frame) =
                p.parse_window_body()?;
            p.expect(&TokenKind::RParen, "')'")?;
            Ok(WindowDefinition {
                name,
                ref_window,
                partitions,
                order_by,
                window_frame,
            })
        })?;
        Ok(WindowClause { definitions })
    }

    /// `OVER name` or `OVER ( [name] [PARTITION BY ...] [ORDER BY ...]
    /// [frame] )`.
    pub(crate) fn parse_over_clause(&mut self) -> PResult<OverClause> {
        self.expect(&TokenKind::KwOver, "OVER")?;
        if !self.check(&TokenKind::LParen) {
            let window_name = self.parse_identifier("a window name")?;
            return Ok(OverClause {
                window_name: Some(window_name),
                ..OverClause::default()
            });
        }
        self.advance();
        let (window_name, partitions, order_by, window_frame) = self.parse_window_body()?;
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(OverClause {
            window_name,
            partitions,
            order_by,
            window_frame,
        })
    }

    #[allow(clippy::type_complexity)]
    fn parse_window_body(
        &mut self,
    ) -> PResult<(
        Option<Identifier>,
        Vec<ScalarExpression>,
        Option<OrderByClause>,
        Option<WindowFrameClause>,
    )> {
        let mut ref_window = None;
        if !self.check(&TokenKind::KwPartition)
            && !self.check(&TokenKind::KwOrder)
            && !self.check(&TokenKind::KwRows)
            && !self.check(&TokenKind::KwRange)
            && !self.check(&TokenKind::RParen)
        {
            ref_window = Some(self.parse_identifier("a window name")?);
        }
        let mut partitions = Vec::new();
        if self.check(&TokenKind::KwPartition) {
            self.advance();
            self.expect(&TokenKind::KwBy, "BY")?;
            partitions = self.parse_comma_sep(|p| p.parse_scalar_expression())?;
        }
        let order_by = if self.check(&TokenKind::KwOrder) {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };
        let window_frame = self.try_window_frame()?;
        Ok((ref_window, partitions, order_by, window_frame))
    }

    fn try_window_frame(&mut self) -> PResult<Option<WindowFrameClause>> {
        let frame_type = if self.check(&TokenKind::KwRows) {
            WindowFrameType::Rows
        } else if self.check(&TokenKind::KwRange) {
            WindowFrameType::Range
        } else {
            return Ok(None);
        };
        self.advance();
        if self.eat(&TokenKind::KwBetween) {
            let top = self.parse_window_delimiter()?;
            self.expect(&TokenKind::KwAnd, "AND")?;
            let bottom = self.parse_window_delimiter()?;
            return Ok(Some(WindowFrameClause {
                frame_type,
                top,
                bottom: Some(bottom),
            }));
        }
        let top = self.parse_window_delimiter()?;
        Ok(Some(WindowFrameClause {
            frame_type,
            top,
            bottom: None,
        }))
    }

    fn parse_window_delimiter(&mut self) -> PResult<WindowDelimiter> {
        if self.eat(&TokenKind::KwUnbounded) {
            if self.eat(&TokenKind::KwPreceding) {
                return Ok(delimiter(WindowDelimiterType::UnboundedPreceding, None));
            }
            self.expect(&TokenKind::KwFollowing, "PRECEDING or FOLLOWING")?;
            return Ok(delimiter(WindowDelimiterType::UnboundedFollowing, None));
        }
        if self.check(&TokenKind::KwCurrent) {
            self.advance();
            self.expect(&TokenKind::KwRow, "ROW")?;
            return Ok(delimiter(WindowDelimiterType::CurrentRow, None));
        }
        let value = self.parse_scalar_expression()?;
        if self.eat(&TokenKind::KwPreceding) {
            return Ok(delimiter(
                WindowDelimiterType::ValuePreceding,
                Some(value),
            ));
        }
        self.expect(&TokenKind::KwFollowing, "PRECEDING or FOLLOWING")?;
        Ok(delimiter(WindowDelimiterType::ValueFollowing, Some(value)))
    }

    // -- FOR clause ---------------------------------------------------------

    fn parse_for_clause(&mut self) -> PResult<ForClause> {
        self.expect(&TokenKind::KwFor, "FOR")?;
        if self.eat(&TokenKind::KwBrowse) {
            return Ok(ForClause::Browse);
        }
        if self.eat(&TokenKind::KwRead) {
            self.expect(&TokenKind::KwOnly, "ONLY")?;
            return Ok(ForClause::ReadOnly);
        }
        if self.eat(&TokenKind::KwUpdate) {
            let mut columns = Vec::new();
            if self.eat(&TokenKind::KwOf) {
                columns = self.parse_comma_sep(|p| {
                    let mut parts = vec![p.parse_name_part()?];
                    while p.eat(&TokenKind::Dot) {
                        parts.push(p.parse_name_part()?);
                    }
                    Ok(MultiPartIdentifier::new(parts))
                })?;
            }
            return Ok(ForClause::Update { columns });
        }
        if self.eat(&TokenKind::KwXml) {
            return self.parse_for_xml_clause();
        }
        if self.eat(&TokenKind::KwJson) {
            return self.parse_for_json_clause();
        }
        Err(self.err_expected("BROWSE, READ ONLY, UPDATE, XML, or JSON"))
    }

    fn parse_for_xml_clause(&mut self) -> PResult<ForClause> {
        let (mode, mode_element) = match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("AUTO") => {
                self.advance();
                (XmlForClauseMode::Auto, None)
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("RAW") => {
                self.advance();
                (XmlForClauseMode::Raw, self.try_paren_string()?)
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("EXPLICIT") => {
                self.advance();
                (XmlForClauseMode::Explicit, None)
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("PATH") => {
                self.advance();
                (XmlForClauseMode::Path, self.try_paren_string()?)
            }
            _ => return Err(self.err_expected("AUTO, RAW, EXPLICIT, or PATH")),
        };
        let mut options = Vec::new();
        while self.eat(&TokenKind::Comma) {
            options.push(self.parse_xml_for_option()?);
        }
        Ok(ForClause::Xml(XmlForClause {
            mode,
            mode_element,
            options,
        }))
    }

    fn parse_xml_for_option(&mut self) -> PResult<XmlForClauseOption> {
        let (kind, value) = match self.peek_kind().clone() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("ELEMENTS") => {
                self.advance();
                match self.peek_kind() {
                    TokenKind::Ident(w) if w.eq_ignore_ascii_case("XSINIL") => {
                        self.advance();
                        (XmlForClauseOptionKind::ElementsXsiNil, None)
                    }
                    TokenKind::Ident(w) if w.eq_ignore_ascii_case("ABSENT") => {
                        self.advance();
                        (XmlForClauseOptionKind::ElementsAbsent, None)
                    }
                    _ => (XmlForClauseOptionKind::Elements, None),
                }
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("ROOT") => {
                self.advance();
                (XmlForClauseOptionKind::Root, self.try_paren_string()?)
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("XMLDATA") => {
                self.advance();
                (XmlForClauseOptionKind::XmlData, None)
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("XMLSCHEMA") => {
                self.advance();
                (XmlForClauseOptionKind::XmlSchema, self.try_paren_string()?)
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("BINARY") => {
                self.advance();
                match self.peek_kind() {
                    TokenKind::Ident(w) if w.eq_ignore_ascii_case("BASE64") => {
                        self.advance();
                        (XmlForClauseOptionKind::BinaryBase64, None)
                    }
                    _ => return Err(self.err_expected("BASE64")),
                }
            }
            TokenKind::KwValue => {
                // TYPE lexes as a plain identifier; VALUE never appears here.
                return Err(self.err_expected("a FOR XML option"));
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("TYPE") => {
                self.advance();
                (XmlForClauseOptionKind::Type, None)
            }
            _ => return Err(self.err_expected("a FOR XML option")),
        };
        Ok(XmlForClauseOption { kind, value })
    }

    fn parse_for_json_clause(&mut self) -> PResult<ForClause> {
        let mode = match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("AUTO") => {
                self.advance();
                JsonForClauseMode::Auto
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("PATH") => {
                self.advance();
                JsonForClauseMode::Path
            }
            _ => return Err(self.err_expected("AUTO or PATH")),
        };
        let mut options = Vec::new();
        while self.eat(&TokenKind::Comma) {
            let option = match self.peek_kind().clone() {
                TokenKind::Ident(s) if s.eq_ignore_ascii_case("ROOT") => {
                    self.advance();
                    JsonForClauseOption {
                        kind: JsonForClauseOptionKind::Root,
                        value: self.try_paren_string()?,
                    }
                }
                TokenKind::Ident(s) if s.eq_ignore_ascii_case("INCLUDE_NULL_VALUES") => {
                    self.advance();
                    JsonForClauseOption {
                        kind: JsonForClauseOptionKind::IncludeNullValues,
                        value: None,
                    }
                }
                TokenKind::Ident(s)
                    if s.eq_ignore_ascii_case("WITHOUT_ARRAY_WRAPPER") =>
                {
                    self.advance();
                    JsonForClauseOption {
                        kind: JsonForClauseOptionKind::WithoutArrayWrapper,
                        value: None,
                    }
                }
                _ => return Err(self.err_expected("a FOR JSON option")),
            };
            options.push(option);
        }
        Ok(ForClause::Json(JsonForClause { mode, options }))
    }

    /// An optional `('string')` argument, as in `PATH('row')`.
    fn try_paren_string(&mut self) -> PResult<Option<String>> {
        if !self.eat(&TokenKind::LParen) {
            return Ok(None);
        }
        let value = match self.peek_kind().clone() {
            TokenKind::String(s) | TokenKind::NationalString(s) => {
                self.advance();
                s
            }
            _ => return Err(self.err_expected("a string literal")),
        };
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(Some(value))
    }
}

fn delimiter(
    delimiter_type: WindowDelimiterType,
    offset_value: Option<ScalarExpression>,
) -> WindowDelimiter {
    WindowDelimiter {
        delimiter_type,
        offset_value,
    }
}

/// Detach the `INTO` from the current outermost node, if any.
fn take_into(expr: &mut QueryExpression) -> Option<IntoClause> {
    match expr {
        QueryExpression::Specification(spec) => spec.into.take(),
        QueryExpression::Binary(binary) => binary.into.take(),
        QueryExpression::Parenthesis(_) => None,
    }
}

fn set_order_by(expr: &mut QueryExpression, order_by: OrderByClause) {
    match expr {
        QueryExpression::Specification(spec) => spec.order_by = Some(order_by),
        QueryExpression::Binary(binary) => binary.order_by = Some(order_by),
        QueryExpression::Parenthesis(paren) => paren.order_by = Some(order_by),
    }
}

fn set_offset(expr: &mut QueryExpression, offset: OffsetClause) {
    match expr {
        QueryExpression::Specification(spec) => spec.offset = Some(offset),
        QueryExpression::Binary(binary) => binary.offset = Some(offset),
        QueryExpression::Parenthesis(paren) => paren.offset = Some(offset),
    }
}

fn set_for_clause(expr: &mut QueryExpression, for_clause: ForClause) {
    match expr {
        QueryExpression::Specification(spec) => spec.for_clause = Some(for_clause),
        QueryExpression::Binary(binary) => binary.for_clause = Some(for_clause),
        QueryExpression::Parenthesis(paren) => paren.for_clause = Some(for_clause),
    }
}

#[cfg(test)]
mod tests {
    use tsql_ast::{
        BinaryQueryExpressionType, ForClause, GroupingSpecification, QueryExpression,
        SelectElement, SortOrder, Statement, UniqueRowFilter, WindowDelimiterType,
    };

    use crate::parser::parse;

    fn select(src: &str) -> tsql_ast::SelectStatement {
        let script = parse(src).expect("script should parse");
        let statement = script.batches[0].statements[0].clone();
        let Statement::Select(select) = statement else {
            panic!("expected a SELECT statement");
        };
        *select
    }

    #[test]
    fn minimal_select() {
        let stmt = select("SELECT 1");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        assert_eq!(spec.select_elements.len(), 1);
        assert!(spec.from.is_none());
    }

    #[test]
    fn select_element_alias_forms() {
        let stmt = select("SELECT a col1, b AS col2, col3 = c FROM t");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let names: Vec<_> = spec
            .select_elements
            .iter()
            .map(|e| match e {
                SelectElement::Scalar(s) => {
                    s.column_name.as_ref().map(|i| i.value.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                Some("col1".to_owned()),
                Some("col2".to_owned()),
                Some("col3".to_owned())
            ]
        );
    }

    #[test]
    fn from_is_never_taken_as_alias() {
        let stmt = select("SELECT a FROM t");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let SelectElement::Scalar(scalar) = &spec.select_elements[0] else {
            panic!("expected a scalar element");
        };
        assert!(scalar.column_name.is_none());
        assert!(spec.from.is_some());
    }

    #[test]
    fn qualified_star() {
        let stmt = select("SELECT t.* FROM t");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let SelectElement::Star(star) = &spec.select_elements[0] else {
            panic!("expected a star element");
        };
        let qualifier = star.qualifier.as_ref().expect("qualifier");
        assert_eq!(qualifier.identifiers[0].value, "t");
    }

    #[test]
    fn select_assigns_variable() {
        let stmt = select("SELECT @total = SUM(amount) FROM orders");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let SelectElement::SetVariable(set) = &spec.select_elements[0] else {
            panic!("expected a variable assignment element");
        };
        assert_eq!(set.variable.name, "@total");
    }

    #[test]
    fn distinct_and_top_percent_with_ties() {
        let stmt = select("SELECT DISTINCT TOP (10) PERCENT a FROM t ORDER BY a");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        assert_eq!(spec.unique_row_filter, UniqueRowFilter::Distinct);
        let top = spec.top_row_filter.expect("top");
        assert!(top.percent);
        assert!(!top.with_ties);

        let stmt = select("SELECT TOP 5 WITH TIES a FROM t ORDER BY a");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        assert!(spec.top_row_filter.expect("top").with_ties);
    }

    #[test]
    fn union_all_with_outermost_order_by() {
        let stmt = select("SELECT a FROM t UNION ALL SELECT a FROM u ORDER BY 1");
        let QueryExpression::Binary(binary) = stmt.query else {
            panic!("expected a binary query");
        };
        assert_eq!(binary.op, BinaryQueryExpressionType::Union);
        assert!(binary.all);
        assert!(binary.order_by.is_some());
        let QueryExpression::Specification(first) = &binary.first else {
            panic!("expected a leaf first");
        };
        assert!(first.order_by.is_none());
    }

    #[test]
    fn into_is_hoisted_over_set_operators() {
        let stmt = select("SELECT a INTO x FROM t EXCEPT SELECT a FROM u");
        let QueryExpression::Binary(binary) = stmt.query else {
            panic!("expected a binary query");
        };
        assert!(binary.into.is_some());
        let QueryExpression::Specification(first) = &binary.first else {
            panic!("expected a leaf first");
        };
        assert!(first.into.is_none());
    }

    #[test]
    fn offset_fetch() {
        let stmt =
            select("SELECT a FROM t ORDER BY a OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let offset = spec.offset.expect("offset");
        assert!(offset.fetch_expression.is_some());
    }

    #[test]
    fn group_by_rollup_and_having() {
        let stmt =
            select("SELECT a, COUNT(*) FROM t GROUP BY ROLLUP (a, b) HAVING COUNT(*) > 1");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let group_by = spec.group_by.expect("group by");
        assert!(matches!(
            group_by.grouping_specifications[0],
            GroupingSpecification::Rollup(_)
        ));
        assert!(spec.having.is_some());
    }

    #[test]
    fn grand_total_grouping_set() {
        let stmt = select("SELECT COUNT(*) FROM t GROUP BY GROUPING SETS (a, ())");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let GroupingSpecification::GroupingSets(sets) =
            &spec.group_by.expect("group by").grouping_specifications[0]
        else {
            panic!("expected grouping sets");
        };
        assert!(matches!(sets[1], GroupingSpecification::GrandTotal));
    }

    #[test]
    fn window_function_with_frame() {
        let stmt = select(
            "SELECT ROW_NUMBER() OVER (PARTITION BY a ORDER BY b \
             ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM t",
        );
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let SelectElement::Scalar(scalar) = &spec.select_elements[0] else {
            panic!("expected a scalar element");
        };
        let tsql_ast::ScalarExpression::FunctionCall(call) = &scalar.expression else {
            panic!("expected a function call");
        };
        let over = call.over_clause.as_ref().expect("over clause");
        assert_eq!(over.partitions.len(), 1);
        let frame = over.window_frame.as_ref().expect("frame");
        assert_eq!(frame.top.delimiter_type, WindowDelimiterType::UnboundedPreceding);
        assert_eq!(
            frame.bottom.as_ref().expect("bottom").delimiter_type,
            WindowDelimiterType::CurrentRow
        );
    }

    #[test]
    fn named_window_clause() {
        let stmt = select("SELECT SUM(x) OVER w FROM t WINDOW w AS (PARTITION BY a)");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let window = spec.window_clause.expect("window clause");
        assert_eq!(window.definitions[0].name.value, "w");
    }

    #[test]
    fn common_table_expression() {
        let stmt = select("WITH c (n) AS (SELECT 1) SELECT n FROM c");
        let with = stmt.with.expect("with clause");
        assert_eq!(with.ctes.len(), 1);
        assert_eq!(with.ctes[0].columns[0].value, "n");
    }

    #[test]
    fn for_json_path() {
        let stmt = select("SELECT a FROM t FOR JSON PATH, INCLUDE_NULL_VALUES");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let ForClause::Json(json) = spec.for_clause.expect("for clause") else {
            panic!("expected FOR JSON");
        };
        assert_eq!(json.options.len(), 1);
    }

    #[test]
    fn order_by_sort_directions() {
        let stmt = select("SELECT a FROM t ORDER BY a DESC, b");
        let QueryExpression::Specification(spec) = stmt.query else {
            panic!("expected a specification");
        };
        let order_by = spec.order_by.expect("order by");
        assert_eq!(order_by.elements[0].sort_order, SortOrder::Descending);
        assert_eq!(order_by.elements[1].sort_order, SortOrder::NotSpecified);
    }

    #[test]
    fn missing_select_list_is_an_error() {
        assert!(parse("SELECT FROM t").is_err());
    }

    #[test]
    fn order_without_by_is_an_error() {
        assert!(parse("SELECT 1 ORDER").is_err());
    }
}
