//! Scalar expression grammar.
//!
//! Precedence is expressed in the call graph, one function per level, from
//! lowest to highest: shifts, additive (including `||` concatenation and the
//! bitwise operators), multiplicative, then the postfix chain over a primary.
//! Unary sign and bitwise-not bind at the primary.

use tsql_ast::{
    AtTimeZoneCall, BinaryExpressionType, CallTarget, CastCall,
    ColumnReferenceExpression, ColumnType, ConvertCall, FunctionCall, Identifier,
    IdentityFunctionCall, IifCall, Literal, MultiPartIdentifier, NextValueForExpression,
    NullTreatment, OdbcLiteral, OdbcLiteralKind, ParseCall, PartitionFunctionCall,
    PropertyAccess, ScalarExpression, SearchedCaseExpression, SearchedWhenClause,
    SimpleCaseExpression, SimpleWhenClause, Span, TrimKind, UnaryExpressionType,
    UniqueRowFilter,
};

use crate::error::ParseError;
use crate::parser::{PResult, Parser};
use crate::token::TokenKind;

impl Parser {
    /// Entry point for a full scalar expression.
    pub(crate) fn parse_scalar_expression(&mut self) -> PResult<ScalarExpression> {
        self.parse_shift_expression()
    }

    fn parse_shift_expression(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        let mut left = self.parse_additive_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::ShiftLeft => BinaryExpressionType::LeftShift,
                TokenKind::ShiftRight => BinaryExpressionType::RightShift,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive_expression()?;
            left = self.make_binary(op, left, right, start);
        }
        Ok(left)
    }

    fn parse_additive_expression(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        let mut left = self.parse_multiplicative_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryExpressionType::Add,
                TokenKind::Minus => BinaryExpressionType::Subtract,
                TokenKind::Concat => BinaryExpressionType::Concat,
                TokenKind::Ampersand => BinaryExpressionType::BitwiseAnd,
                TokenKind::Pipe => BinaryExpressionType::BitwiseOr,
                TokenKind::Caret => BinaryExpressionType::BitwiseXor,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative_expression()?;
            left = self.make_binary(op, left, right, start);
        }
        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        let mut left = self.parse_postfix_expression()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryExpressionType::Multiply,
                TokenKind::Slash => BinaryExpressionType::Divide,
                TokenKind::PercentSign => BinaryExpressionType::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.parse_postfix_expression()?;
            left = self.make_binary(op, left, right, start);
        }
        Ok(left)
    }

    fn make_binary(
        &self,
        op: BinaryExpressionType,
        first: ScalarExpression,
        second: ScalarExpression,
        start: Span,
    ) -> ScalarExpression {
        ScalarExpression::Binary {
            op,
            first: Box::new(first),
            second: Box::new(second),
            span: start.merge(self.prev_span()),
        }
    }

    /// Postfix trailers after a primary: `.method(args)`, `.property`, and
    /// `AT TIME ZONE expr`.
    fn parse_postfix_expression(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        let mut expr = self.parse_primary_expression()?;
        loop {
            if self.check(&TokenKind::Dot) && {
                // Look past the dot without committing.
                let saved = self.save();
                self.advance();
                let ok = self.peek_is_name_part();
                self.restore(saved);
                ok
            } {
                self.advance();
                let name = self.parse_name_part()?;
                let target = CallTarget::Expression(Box::new(expr));
                if self.check(&TokenKind::LParen) {
                    expr = self.parse_function_call_tail(Some(target), name, start)?;
                } else {
                    expr = ScalarExpression::Property(Box::new(PropertyAccess {
                        target,
                        property: name,
                        span: start.merge(self.prev_span()),
                    }));
                }
            } else if self.check(&TokenKind::KwAt)
                && *self.peek_nth(1) == TokenKind::KwTime
                && *self.peek_nth(2) == TokenKind::KwZone
            {
                self.advance();
                self.advance();
                self.advance();
                let time_zone = self.parse_primary_expression()?;
                expr = ScalarExpression::AtTimeZone(Box::new(AtTimeZoneCall {
                    date_value: expr,
                    time_zone,
                    span: start.merge(self.prev_span()),
                }));
            } else {
                return Ok(expr);
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn parse_primary_expression(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        match self.peek_kind().clone() {
            TokenKind::Plus => {
                self.advance();
                let inner = self.parse_postfix_expression()?;
                Ok(self.make_unary(UnaryExpressionType::Positive, inner, start))
            }
            TokenKind::Minus => {
                self.advance();
                let inner = self.parse_postfix_expression()?;
                Ok(self.make_unary(UnaryExpressionType::Negative, inner, start))
            }
            TokenKind::Tilde => {
                self.advance();
                let inner = self.parse_postfix_expression()?;
                Ok(self.make_unary(UnaryExpressionType::BitwiseNot, inner, start))
            }
            TokenKind::KwNull => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(Literal::Null, span))
            }
            TokenKind::KwDefault => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(Literal::Default, span))
            }
            TokenKind::Integer(text) => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(Literal::Integer(text), span))
            }
            TokenKind::Numeric(text) => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(Literal::Numeric(text), span))
            }
            TokenKind::String(value) => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(
                    Literal::String {
                        value,
                        national: false,
                    },
                    span,
                ))
            }
            TokenKind::NationalString(value) => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(
                    Literal::String {
                        value,
                        national: true,
                    },
                    span,
                ))
            }
            TokenKind::Binary(text) => {
                let span = self.advance().span;
                Ok(ScalarExpression::Literal(Literal::Binary(text), span))
            }
            TokenKind::LBrace => self.parse_odbc_literal(),
            TokenKind::LParen => {
                self.advance();
                if self.starts_query_expression() {
                    let query = self.parse_query_expression()?;
                    self.expect(&TokenKind::RParen, "')'")?;
                    Ok(ScalarExpression::Subquery(
                        Box::new(query),
                        start.merge(self.prev_span()),
                    ))
                } else {
                    let inner = self.parse_scalar_expression()?;
                    self.expect(&TokenKind::RParen, "')'")?;
                    Ok(ScalarExpression::Parenthesis(
                        Box::new(inner),
                        start.merge(self.prev_span()),
                    ))
                }
            }
            TokenKind::KwCase => self.parse_case_expression(),
            TokenKind::KwIdentitycol => {
                let span = self.advance().span;
                Ok(pseudo_column(ColumnType::IdentityCol, span))
            }
            TokenKind::KwRowguidcol => {
                let span = self.advance().span;
                Ok(pseudo_column(ColumnType::RowGuidCol, span))
            }
            TokenKind::KwNext
                if *self.peek_nth(1) == TokenKind::KwValue
                    && *self.peek_nth(2) == TokenKind::KwFor =>
            {
                self.advance();
                self.advance();
                self.advance();
                let sequence = self.parse_schema_object_name()?;
                let over_clause = if self.check(&TokenKind::KwOver) {
                    Some(self.parse_over_clause()?)
                } else {
                    None
                };
                Ok(ScalarExpression::NextValueFor(Box::new(
                    NextValueForExpression {
                        sequence,
                        over_clause,
                        span: start.merge(self.prev_span()),
                    },
                )))
            }
            TokenKind::KwConvert => {
                self.advance();
                self.parse_convert_call(false, start)
            }
            TokenKind::KwIdentity if *self.peek_nth(1) == TokenKind::LParen => {
                self.advance();
                self.parse_identity_function(start)
            }
            TokenKind::Ident(name) if name.starts_with("@@") => {
                Ok(ScalarExpression::GlobalVariable(self.parse_global_variable()?))
            }
            TokenKind::Ident(name) if name.starts_with('@') => {
                Ok(ScalarExpression::Variable(self.parse_variable_reference()?))
            }
            TokenKind::Ident(name)
                if name.starts_with('$') && !name.eq_ignore_ascii_case("$PARTITION") =>
            {
                let span = self.advance().span;
                let column_type = match name.to_ascii_uppercase().as_str() {
                    "$ACTION" => ColumnType::PseudoColumnAction,
                    "$IDENTITY" => ColumnType::PseudoColumnIdentity,
                    "$ROWGUID" => ColumnType::PseudoColumnRowGuid,
                    "$CUID" => ColumnType::PseudoColumnCuid,
                    _ => {
                        return Ok(ScalarExpression::ColumnReference(
                            ColumnReferenceExpression {
                                column_type: ColumnType::Regular,
                                multi_part_identifier: Some(MultiPartIdentifier::new(
                                    vec![Identifier::new(name)],
                                )),
                                span,
                            },
                        ))
                    }
                };
                Ok(pseudo_column(column_type, span))
            }
            TokenKind::Ident(name) if *self.peek_nth(1) == TokenKind::LParen => {
                if let Some(expr) = self.try_special_callable(&name, start)? {
                    Ok(expr)
                } else {
                    self.parse_column_ref_or_function_call()
                }
            }
            _ => self.parse_column_ref_or_function_call(),
        }
    }

    fn make_unary(
        &self,
        op: UnaryExpressionType,
        expression: ScalarExpression,
        start: Span,
    ) -> ScalarExpression {
        ScalarExpression::Unary {
            op,
            expression: Box::new(expression),
            span: start.merge(self.prev_span()),
        }
    }

    /// `(` directly followed by something that begins a query expression.
    pub(crate) fn starts_query_expression(&self) -> bool {
        match self.peek_kind() {
            TokenKind::KwSelect => true,
            TokenKind::LParen => {
                // Scan through nested parens to the first non-paren token.
                let mut n = 1;
                while *self.peek_nth(n) == TokenKind::LParen {
                    n += 1;
                }
                *self.peek_nth(n) == TokenKind::KwSelect
            }
            _ => false,
        }
    }

    // -- CASE ---------------------------------------------------------------

    fn parse_case_expression(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        self.expect(&TokenKind::KwCase, "CASE")?;
        if self.check(&TokenKind::KwWhen) {
            let mut when_clauses = Vec::new();
            while self.eat(&TokenKind::KwWhen) {
                let when_expression = self.parse_boolean_expression()?;
                self.expect(&TokenKind::KwThen, "THEN")?;
                let then_expression = self.parse_scalar_expression()?;
                when_clauses.push(SearchedWhenClause {
                    when_expression,
                    then_expression,
                });
            }
            let else_expression = if self.eat(&TokenKind::KwElse) {
                Some(self.parse_scalar_expression()?)
            } else {
                None
            };
            self.expect(&TokenKind::KwEnd, "END")?;
            return Ok(ScalarExpression::SearchedCase(Box::new(
                SearchedCaseExpression {
                    when_clauses,
                    else_expression,
                    span: start.merge(self.prev_span()),
                },
            )));
        }

        let input_expression = self.parse_scalar_expression()?;
        let mut when_clauses = Vec::new();
        while self.eat(&TokenKind::KwWhen) {
            let when_expression = self.parse_scalar_expression()?;
            self.expect(&TokenKind::KwThen, "THEN")?;
            let then_expression = self.parse_scalar_expression()?;
            when_clauses.push(SimpleWhenClause {
                when_expression,
                then_expression,
            });
        }
        if when_clauses.is_empty() {
            return Err(self.err_expected("WHEN"));
        }
        let else_expression = if self.eat(&TokenKind::KwElse) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::KwEnd, "END")?;
        Ok(ScalarExpression::SimpleCase(Box::new(SimpleCaseExpression {
            input_expression,
            when_clauses,
            else_expression,
            span: start.merge(self.prev_span()),
        })))
    }

    // -- irregular callables ------------------------------------------------

    /// Callables whose argument syntax is not a plain expression list.
    /// Returns `None` when `name` is an ordinary function.
    fn try_special_callable(
        &mut self,
        name: &str,
        start: Span,
    ) -> PResult<Option<ScalarExpression>> {
        let upper = name.to_ascii_uppercase();
        let expr = match upper.as_str() {
            "CAST" | "TRY_CAST" => {
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let parameter = self.parse_scalar_expression()?;
                self.expect(&TokenKind::KwAs, "AS")?;
                let data_type = self.parse_data_type()?;
                self.expect(&TokenKind::RParen, "')'")?;
                ScalarExpression::Cast(Box::new(CastCall {
                    parameter,
                    data_type,
                    try_cast: upper == "TRY_CAST",
                    span: start.merge(self.prev_span()),
                }))
            }
            "TRY_CONVERT" => {
                self.advance();
                self.parse_convert_call(true, start)?
            }
            "PARSE" | "TRY_PARSE" => {
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let string_value = self.parse_scalar_expression()?;
                self.expect(&TokenKind::KwAs, "AS")?;
                let data_type = self.parse_data_type()?;
                let culture = if self.eat(&TokenKind::KwUsing) {
                    Some(self.parse_scalar_expression()?)
                } else {
                    None
                };
                self.expect(&TokenKind::RParen, "')'")?;
                ScalarExpression::Parse(Box::new(ParseCall {
                    string_value,
                    data_type,
                    culture,
                    try_parse: upper == "TRY_PARSE",
                    span: start.merge(self.prev_span()),
                }))
            }
            "IIF" => {
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let predicate = self.parse_boolean_expression()?;
                self.expect(&TokenKind::Comma, "','")?;
                let then_expression = self.parse_scalar_expression()?;
                self.expect(&TokenKind::Comma, "','")?;
                let else_expression = self.parse_scalar_expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                ScalarExpression::Iif(Box::new(IifCall {
                    predicate,
                    then_expression,
                    else_expression,
                    span: start.merge(self.prev_span()),
                }))
            }
            "TRIM" => {
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let trim_kind = match self.peek_kind() {
                    TokenKind::Ident(s) if s.eq_ignore_ascii_case("LEADING") => {
                        self.advance();
                        Some(TrimKind::Leading)
                    }
                    TokenKind::Ident(s) if s.eq_ignore_ascii_case("TRAILING") => {
                        self.advance();
                        Some(TrimKind::Trailing)
                    }
                    TokenKind::Ident(s) if s.eq_ignore_ascii_case("BOTH") => {
                        self.advance();
                        Some(TrimKind::Both)
                    }
                    _ => None,
                };
                let first = self.parse_scalar_expression()?;
                // `FROM` separates the characters-to-trim from the input.
                let mut parameters = vec![first];
                if self.eat(&TokenKind::KwFrom) {
                    parameters.push(self.parse_scalar_expression()?);
                }
                self.expect(&TokenKind::RParen, "')'")?;
                ScalarExpression::FunctionCall(Box::new(FunctionCall {
                    call_target: None,
                    function_name: Identifier::new("TRIM"),
                    parameters,
                    unique_row_filter: UniqueRowFilter::NotSpecified,
                    trim_kind,
                    within_group: None,
                    null_treatment: None,
                    over_clause: None,
                    collation: None,
                    span: start.merge(self.prev_span()),
                }))
            }
            _ => return Ok(None),
        };
        Ok(Some(expr))
    }

    /// `CONVERT(type, expr [, style])`; the leading keyword or `TRY_CONVERT`
    /// identifier is already consumed.
    fn parse_convert_call(
        &mut self,
        try_convert: bool,
        start: Span,
    ) -> PResult<ScalarExpression> {
        self.expect(&TokenKind::LParen, "'('")?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::Comma, "','")?;
        let parameter = self.parse_scalar_expression()?;
        let style = if self.eat(&TokenKind::Comma) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(ScalarExpression::Convert(Box::new(ConvertCall {
            data_type,
            parameter,
            style,
            try_convert,
            span: start.merge(self.prev_span()),
        })))
    }

    /// `IDENTITY(type [, seed, increment])`; the keyword is consumed.
    fn parse_identity_function(&mut self, start: Span) -> PResult<ScalarExpression> {
        self.expect(&TokenKind::LParen, "'('")?;
        let data_type = self.parse_data_type()?;
        let (mut seed, mut increment) = (None, None);
        if self.eat(&TokenKind::Comma) {
            seed = Some(self.parse_scalar_expression()?);
            self.expect(&TokenKind::Comma, "','")?;
            increment = Some(self.parse_scalar_expression()?);
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(ScalarExpression::IdentityFunction(Box::new(
            IdentityFunctionCall {
                data_type,
                seed,
                increment,
                span: start.merge(self.prev_span()),
            },
        )))
    }

    fn parse_odbc_literal(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        self.expect(&TokenKind::LBrace, "'{'")?;
        let kind = match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("GUID") => OdbcLiteralKind::Guid,
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("D") => OdbcLiteralKind::Date,
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("T") => OdbcLiteralKind::Time,
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("TS") => {
                OdbcLiteralKind::Timestamp
            }
            _ => return Err(self.err_expected("an ODBC literal prefix")),
        };
        self.advance();
        let (value, national) = match self.peek_kind().clone() {
            TokenKind::String(v) => {
                self.advance();
                (v, false)
            }
            TokenKind::NationalString(v) => {
                self.advance();
                (v, true)
            }
            _ => return Err(self.err_expected("a string literal")),
        };
        self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(ScalarExpression::OdbcLiteral(OdbcLiteral {
            kind,
            value,
            national,
            span: start.merge(self.prev_span()),
        }))
    }

    // -- column references and function calls -------------------------------

    /// The dot-run of identifier parts that becomes a column reference, a
    /// function call, a partition-function call, or a UDT member access.
    pub(crate) fn parse_column_ref_or_function_call(&mut self) -> PResult<ScalarExpression> {
        let start = self.peek().span;
        if !self.peek_is_name_part() {
            return Err(self.err_expected("an expression"));
        }
        if matches!(self.peek_kind(), TokenKind::Ident(s) if s.eq_ignore_ascii_case("$PARTITION"))
            && *self.peek_nth(1) == TokenKind::Dot
        {
            self.advance();
            return self.parse_partition_function(None, start);
        }
        let mut parts = vec![self.parse_name_part()?];
        loop {
            if !self.check(&TokenKind::Dot) {
                break;
            }
            // A trailing `.*` belongs to the select element, not to us.
            if *self.peek_nth(1) == TokenKind::Star {
                break;
            }
            if matches!(self.peek_nth(1), TokenKind::Ident(s) if s.eq_ignore_ascii_case("$PARTITION"))
            {
                self.advance();
                self.advance();
                return self.parse_partition_function(parts.pop(), start);
            }
            self.advance();
            if self.check(&TokenKind::Dot) {
                parts.push(Identifier::empty());
                continue;
            }
            parts.push(self.parse_name_part()?);
        }

        if self.check(&TokenKind::DoubleColon) {
            self.advance();
            let target = CallTarget::UserDefinedType(tsql_ast::SchemaObjectName::new(parts));
            let name = self.parse_name_part()?;
            if self.check(&TokenKind::LParen) {
                return self.parse_function_call_tail(Some(target), name, start);
            }
            return Ok(ScalarExpression::Property(Box::new(PropertyAccess {
                target,
                property: name,
                span: start.merge(self.prev_span()),
            })));
        }

        if self.check(&TokenKind::LParen) {
            let name = parts
                .pop()
                .ok_or_else(|| ParseError::internal("empty name run"))?;
            let target = if parts.is_empty() {
                None
            } else {
                Some(CallTarget::MultiPart(MultiPartIdentifier::new(parts)))
            };
            return self.parse_function_call_tail(target, name, start);
        }

        Ok(ScalarExpression::ColumnReference(ColumnReferenceExpression {
            column_type: ColumnType::Regular,
            multi_part_identifier: Some(MultiPartIdentifier::new(parts)),
            span: start.merge(self.prev_span()),
        }))
    }

    /// `$PARTITION.fn(args)`; the dotted `$PARTITION` is already consumed.
    fn parse_partition_function(
        &mut self,
        database: Option<Identifier>,
        start: Span,
    ) -> PResult<ScalarExpression> {
        self.expect(&TokenKind::Dot, "'.'")?;
        let function_name = self.parse_name_part()?;
        self.expect(&TokenKind::LParen, "'('")?;
        let parameters = if self.check(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_comma_sep(|p| p.parse_scalar_expression())?
        };
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(ScalarExpression::PartitionFunction(Box::new(
            PartitionFunctionCall {
                database,
                function_name,
                parameters,
                span: start.merge(self.prev_span()),
            },
        )))
    }

    /// The argument list and trailers of a function call; positioned at `(`.
    pub(crate) fn parse_function_call_tail(
        &mut self,
        call_target: Option<CallTarget>,
        function_name: Identifier,
        start: Span,
    ) -> PResult<ScalarExpression> {
        self.expect(&TokenKind::LParen, "'('")?;
        let mut unique_row_filter = UniqueRowFilter::NotSpecified;
        if self.eat(&TokenKind::KwAll) {
            unique_row_filter = UniqueRowFilter::All;
        } else if self.eat(&TokenKind::KwDistinct) {
            unique_row_filter = UniqueRowFilter::Distinct;
        }
        let mut parameters = Vec::new();
        if !self.check(&TokenKind::RParen) {
            parameters = self.parse_comma_sep(|p| {
                if p.check(&TokenKind::Star) {
                    let span = p.advance().span;
                    Ok(pseudo_column(ColumnType::Wildcard, span))
                } else {
                    p.parse_scalar_expression()
                }
            })?;
        }
        self.expect(&TokenKind::RParen, "')'")?;

        let within_group = if self.check(&TokenKind::KwWithin)
            && *self.peek_nth(1) == TokenKind::KwGroup
        {
            self.advance();
            self.advance();
            self.expect(&TokenKind::LParen, "'('")?;
            let order_by = self.parse_order_by_clause()?;
            self.expect(&TokenKind::RParen, "')'")?;
            Some(order_by)
        } else {
            None
        };

        let null_treatment = match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("RESPECT") => {
                self.advance();
                self.expect_nulls_word()?;
                Some(NullTreatment::RespectNulls)
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("IGNORE") => {
                self.advance();
                self.expect_nulls_word()?;
                Some(NullTreatment::IgnoreNulls)
            }
            _ => None,
        };

        let over_clause = if self.check(&TokenKind::KwOver) {
            Some(self.parse_over_clause()?)
        } else {
            None
        };

        let collation = if self.eat(&TokenKind::KwCollate) {
            Some(self.parse_identifier("a collation name")?)
        } else {
            None
        };

        Ok(ScalarExpression::FunctionCall(Box::new(FunctionCall {
            call_target,
            function_name,
            parameters,
            unique_row_filter,
            trim_kind: None,
            within_group,
            null_treatment,
            over_clause,
            collation,
            span: start.merge(self.prev_span()),
        })))
    }

    fn expect_nulls_word(&mut self) -> PResult<()> {
        match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("NULLS") => {
                self.advance();
                Ok(())
            }
            _ => Err(self.err_expected("NULLS")),
        }
    }
}

fn pseudo_column(column_type: ColumnType, span: Span) -> ScalarExpression {
    ScalarExpression::ColumnReference(ColumnReferenceExpression {
        column_type,
        multi_part_identifier: None,
        span,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tsql_ast::{BinaryExpressionType, ColumnType, Literal, ScalarExpression};

    use crate::lexer::tokenize;
    use crate::parser::{Parser, ParserOptions};

    fn expr(src: &str) -> ScalarExpression {
        let mut p = Parser::new(tokenize(src), ParserOptions::default());
        p.parse_scalar_expression().expect("expression should parse")
    }

    #[test]
    fn integer_literal() {
        let e = expr("42");
        assert!(matches!(e, ScalarExpression::Literal(Literal::Integer(n), _) if n == "42"));
    }

    #[test]
    fn precedence_multiplication_binds_tighter() {
        let e = expr("1 + 2 * 3");
        let ScalarExpression::Binary { op, second, .. } = e else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryExpressionType::Add);
        assert!(matches!(
            *second,
            ScalarExpression::Binary {
                op: BinaryExpressionType::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn unary_minus() {
        let e = expr("-x");
        assert!(matches!(e, ScalarExpression::Unary { .. }));
    }

    #[test]
    fn dotted_column_reference() {
        let ScalarExpression::ColumnReference(c) = expr("a.b.c") else {
            panic!("expected column reference");
        };
        let mpi = c.multi_part_identifier.expect("has parts");
        assert_eq!(mpi.count(), 3);
        assert_eq!(mpi.base().map(|i| i.value.as_str()), Some("c"));
    }

    #[test]
    fn empty_middle_part() {
        let ScalarExpression::ColumnReference(c) = expr("db..t") else {
            panic!("expected column reference");
        };
        let mpi = c.multi_part_identifier.expect("has parts");
        assert_eq!(mpi.identifiers[1].value, "");
    }

    #[test]
    fn function_call_with_wildcard_argument() {
        let ScalarExpression::FunctionCall(f) = expr("COUNT(*)") else {
            panic!("expected function call");
        };
        assert_eq!(f.function_name.value, "COUNT");
        assert_eq!(f.parameters.len(), 1);
        assert!(matches!(
            &f.parameters[0],
            ScalarExpression::ColumnReference(c) if c.column_type == ColumnType::Wildcard
        ));
    }

    #[test]
    fn count_distinct() {
        let ScalarExpression::FunctionCall(f) = expr("COUNT(DISTINCT a)") else {
            panic!("expected function call");
        };
        assert_eq!(f.unique_row_filter, tsql_ast::UniqueRowFilter::Distinct);
    }

    #[test]
    fn qualified_function_call() {
        let ScalarExpression::FunctionCall(f) = expr("dbo.fn(1)") else {
            panic!("expected function call");
        };
        assert!(f.call_target.is_some());
        assert_eq!(f.function_name.value, "fn");
    }

    #[test]
    fn cast_call() {
        let ScalarExpression::Cast(c) = expr("CAST(x AS int)") else {
            panic!("expected cast");
        };
        assert!(!c.try_cast);
        assert_eq!(c.data_type.name.base_identifier().value, "int");
    }

    #[test]
    fn try_cast_is_flagged() {
        let ScalarExpression::Cast(c) = expr("TRY_CAST(x AS int)") else {
            panic!("expected cast");
        };
        assert!(c.try_cast);
    }

    #[test]
    fn convert_with_style() {
        let ScalarExpression::Convert(c) = expr("CONVERT(varchar(10), d, 112)") else {
            panic!("expected convert");
        };
        assert!(c.style.is_some());
        assert!(!c.try_convert);
    }

    #[test]
    fn iif_takes_a_predicate() {
        let ScalarExpression::Iif(_) = expr("IIF(a > 1, 'y', 'n')") else {
            panic!("expected IIF");
        };
    }

    #[test]
    fn searched_case() {
        let ScalarExpression::SearchedCase(c) = expr("CASE WHEN a = 1 THEN 2 ELSE 3 END")
        else {
            panic!("expected searched case");
        };
        assert_eq!(c.when_clauses.len(), 1);
        assert!(c.else_expression.is_some());
    }

    #[test]
    fn simple_case() {
        let ScalarExpression::SimpleCase(c) = expr("CASE a WHEN 1 THEN 2 END") else {
            panic!("expected simple case");
        };
        assert_eq!(c.when_clauses.len(), 1);
        assert!(c.else_expression.is_none());
    }

    #[test]
    fn parenthesis_vs_subquery() {
        assert!(matches!(expr("(1 + 2)"), ScalarExpression::Parenthesis(..)));
        assert!(matches!(
            expr("(SELECT 1)"),
            ScalarExpression::Subquery(..)
        ));
    }

    #[test]
    fn global_variable() {
        let ScalarExpression::GlobalVariable(g) = expr("@@ROWCOUNT") else {
            panic!("expected global variable");
        };
        assert_eq!(g.name, "@@ROWCOUNT");
    }

    #[test]
    fn pseudo_columns() {
        assert!(matches!(
            expr("$ACTION"),
            ScalarExpression::ColumnReference(c)
                if c.column_type == ColumnType::PseudoColumnAction
        ));
        assert!(matches!(
            expr("IDENTITYCOL"),
            ScalarExpression::ColumnReference(c)
                if c.column_type == ColumnType::IdentityCol
        ));
    }

    #[test]
    fn at_time_zone_postfix() {
        assert!(matches!(
            expr("d AT TIME ZONE 'UTC'"),
            ScalarExpression::AtTimeZone(_)
        ));
    }

    #[test]
    fn method_call_on_expression() {
        assert!(matches!(
            expr("CAST(x AS xml).value('a', 'int')"),
            ScalarExpression::FunctionCall(_)
        ));
    }

    #[test]
    fn odbc_guid_literal() {
        let ScalarExpression::OdbcLiteral(l) =
            expr("{guid N'0E984725-C51C-4BF4-9960-E1C80E27ABA0'}")
        else {
            panic!("expected odbc literal");
        };
        assert_eq!(l.kind, tsql_ast::OdbcLiteralKind::Guid);
        assert!(l.national);
    }

    #[test]
    fn partition_function() {
        assert!(matches!(
            expr("db.$PARTITION.pf(col)"),
            ScalarExpression::PartitionFunction(_)
        ));
    }

    #[test]
    fn concat_operator() {
        let ScalarExpression::Binary { op, .. } = expr("a || b") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryExpressionType::Concat);
    }

    #[test]
    fn next_value_for() {
        assert!(matches!(
            expr("NEXT VALUE FOR dbo.seq"),
            ScalarExpression::NextValueFor(_)
        ));
    }
}
