//! Boolean expression (search condition) grammar.
//!
//! Precedence: `OR` below `AND` below `NOT` below the predicates. A
//! parenthesized operand is ambiguous between a boolean group and a scalar
//! subexpression (`IF (XACT_STATE()) = -1`); the parser first attempts the
//! scalar-then-predicate reading and falls back to a boolean group on
//! failure.

use tsql_ast::{
    BooleanBetweenExpression, BooleanBinaryExpression, BooleanBinaryExpressionType,
    BooleanComparisonExpression, BooleanComparisonType, BooleanExpression,
    BooleanInExpression, BooleanIsDistinctExpression, BooleanIsNullExpression,
    BooleanLikeExpression, DistinctFromOperand, ExistsPredicate, FullTextColumn,
    FullTextFunctionKind, FullTextPredicate, InPredicateSet, MultiPartIdentifier,
    ScalarExpression, SubqueryComparisonPredicate, SubqueryQuantifier,
};

use crate::parser::{PResult, Parser};
use crate::token::TokenKind;

impl Parser {
    /// Entry point for a full search condition.
    pub(crate) fn parse_boolean_expression(&mut self) -> PResult<BooleanExpression> {
        let mut left = self.parse_boolean_and()?;
        while self.eat(&TokenKind::KwOr) {
            let right = self.parse_boolean_and()?;
            left = BooleanExpression::Binary(Box::new(BooleanBinaryExpression {
                kind: BooleanBinaryExpressionType::Or,
                first: left,
                second: right,
            }));
        }
        Ok(left)
    }

    fn parse_boolean_and(&mut self) -> PResult<BooleanExpression> {
        let mut left = self.parse_boolean_not()?;
        while self.eat(&TokenKind::KwAnd) {
            let right = self.parse_boolean_not()?;
            left = BooleanExpression::Binary(Box::new(BooleanBinaryExpression {
                kind: BooleanBinaryExpressionType::And,
                first: left,
                second: right,
            }));
        }
        Ok(left)
    }

    fn parse_boolean_not(&mut self) -> PResult<BooleanExpression> {
        if self.eat(&TokenKind::KwNot) {
            let inner = self.parse_boolean_not()?;
            return Ok(BooleanExpression::Not(Box::new(inner)));
        }
        self.parse_boolean_primary()
    }

    fn parse_boolean_primary(&mut self) -> PResult<BooleanExpression> {
        match self.peek_kind() {
            TokenKind::KwExists => {
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let subquery = self.parse_query_expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                return Ok(BooleanExpression::Exists(Box::new(ExistsPredicate {
                    subquery,
                })));
            }
            TokenKind::KwContains if *self.peek_nth(1) == TokenKind::LParen => {
                return self.parse_full_text_predicate(FullTextFunctionKind::Contains);
            }
            TokenKind::KwFreetext if *self.peek_nth(1) == TokenKind::LParen => {
                return self.parse_full_text_predicate(FullTextFunctionKind::FreeText);
            }
            _ => {}
        }

        // Try the scalar-then-predicate reading first; `(cond)` groups only
        // when the interior cannot be a scalar.
        let saved = self.save();
        match self.parse_scalar_expression() {
            Ok(first) => self.parse_predicate_tail(first),
            Err(err) => {
                self.restore(saved);
                if self.eat(&TokenKind::LParen) {
                    let inner = self.parse_boolean_expression()?;
                    self.expect(&TokenKind::RParen, "')'")?;
                    Ok(BooleanExpression::Parenthesis(Box::new(inner)))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// The predicate that follows an already-parsed left-hand scalar.
    fn parse_predicate_tail(
        &mut self,
        first: ScalarExpression,
    ) -> PResult<BooleanExpression> {
        if self.eat(&TokenKind::KwIs) {
            let is_not = self.eat(&TokenKind::KwNot);
            if self.eat(&TokenKind::KwNull) {
                return Ok(BooleanExpression::IsNull(Box::new(
                    BooleanIsNullExpression {
                        expression: first,
                        is_not,
                    },
                )));
            }
            self.expect(&TokenKind::KwDistinct, "NULL or DISTINCT")?;
            self.expect(&TokenKind::KwFrom, "FROM")?;
            return self.parse_is_distinct_tail(first, is_not);
        }

        let not = self.eat(&TokenKind::KwNot);
        if self.eat(&TokenKind::KwIn) {
            self.expect(&TokenKind::LParen, "'('")?;
            let set = if self.starts_query_expression() {
                InPredicateSet::Subquery(self.parse_query_expression()?)
            } else {
                InPredicateSet::List(
                    self.parse_comma_sep(|p| p.parse_scalar_expression())?,
                )
            };
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(BooleanExpression::In(Box::new(BooleanInExpression {
                expression: first,
                not,
                set,
            })));
        }
        if self.eat(&TokenKind::KwLike) {
            let pattern = self.parse_scalar_expression()?;
            let escape = if self.eat(&TokenKind::KwEscape) {
                Some(self.parse_scalar_expression()?)
            } else {
                None
            };
            return Ok(BooleanExpression::Like(Box::new(BooleanLikeExpression {
                first,
                not,
                pattern,
                escape,
            })));
        }
        if self.eat(&TokenKind::KwBetween) {
            let lower = self.parse_scalar_expression()?;
            self.expect(&TokenKind::KwAnd, "AND")?;
            let upper = self.parse_scalar_expression()?;
            return Ok(BooleanExpression::Between(Box::new(
                BooleanBetweenExpression {
                    expression: first,
                    not,
                    lower,
                    upper,
                },
            )));
        }
        if not {
            return Err(self.err_expected("IN, LIKE, or BETWEEN"));
        }

        let comparison_type = self
            .try_comparison_type()
            .ok_or_else(|| self.err_expected("a comparison operator"))?;
        if let Some(quantifier) = self.try_subquery_quantifier() {
            self.expect(&TokenKind::LParen, "'('")?;
            let subquery = self.parse_query_expression()?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(BooleanExpression::SubqueryComparison(Box::new(
                SubqueryComparisonPredicate {
                    expression: first,
                    comparison_type,
                    quantifier,
                    subquery,
                },
            )));
        }
        let second = self.parse_scalar_expression()?;
        Ok(BooleanExpression::Comparison(Box::new(
            BooleanComparisonExpression {
                comparison_type,
                first,
                second,
            },
        )))
    }

    /// Right-hand side of `IS [NOT] DISTINCT FROM`. A literal `NULL` lowers
    /// the whole predicate to an IS NULL test with flipped polarity.
    fn parse_is_distinct_tail(
        &mut self,
        first: ScalarExpression,
        is_not: bool,
    ) -> PResult<BooleanExpression> {
        if self.eat(&TokenKind::KwNull) {
            return Ok(BooleanExpression::IsNull(Box::new(
                BooleanIsNullExpression {
                    expression: first,
                    is_not: !is_not,
                },
            )));
        }
        if let Some(quantifier) = self.try_subquery_quantifier() {
            self.expect(&TokenKind::LParen, "'('")?;
            let query = self.parse_query_expression()?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(BooleanExpression::IsDistinct(Box::new(
                BooleanIsDistinctExpression {
                    first,
                    is_not,
                    second: DistinctFromOperand::Subquery { quantifier, query },
                },
            )));
        }
        let second = self.parse_scalar_expression()?;
        Ok(BooleanExpression::IsDistinct(Box::new(
            BooleanIsDistinctExpression {
                first,
                is_not,
                second: DistinctFromOperand::Expression(second),
            },
        )))
    }

    pub(crate) fn try_comparison_type(&mut self) -> Option<BooleanComparisonType> {
        let kind = match self.peek_kind() {
            TokenKind::Eq => BooleanComparisonType::Equals,
            TokenKind::NotEqual => BooleanComparisonType::NotEqualToBrackets,
            TokenKind::BangEqual => BooleanComparisonType::NotEqualToExclamation,
            TokenKind::LessThan => BooleanComparisonType::LessThan,
            TokenKind::GreaterThan => BooleanComparisonType::GreaterThan,
            TokenKind::LessEqual => BooleanComparisonType::LessThanOrEqualTo,
            TokenKind::GreaterEqual => BooleanComparisonType::GreaterThanOrEqualTo,
            TokenKind::BangLess => BooleanComparisonType::NotLessThan,
            TokenKind::BangGreater => BooleanComparisonType::NotGreaterThan,
            _ => return None,
        };
        self.advance();
        Some(kind)
    }

    fn try_subquery_quantifier(&mut self) -> Option<SubqueryQuantifier> {
        let quantifier = match self.peek_kind() {
            TokenKind::KwSome => SubqueryQuantifier::Some,
            TokenKind::KwAny => SubqueryQuantifier::Any,
            TokenKind::KwAll => SubqueryQuantifier::All,
            _ => return None,
        };
        self.advance();
        Some(quantifier)
    }

    fn parse_full_text_predicate(
        &mut self,
        kind: FullTextFunctionKind,
    ) -> PResult<BooleanExpression> {
        self.advance();
        self.expect(&TokenKind::LParen, "'('")?;
        let columns = self.parse_full_text_columns()?;
        self.expect(&TokenKind::Comma, "','")?;
        let value = self.parse_scalar_expression()?;
        let language = if self.eat(&TokenKind::Comma) {
            self.expect(&TokenKind::KwLanguage, "LANGUAGE")?;
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(BooleanExpression::FullText(Box::new(FullTextPredicate {
            kind,
            columns,
            value,
            language,
        })))
    }

    /// The column argument of a full-text call: `*`, one column, or a
    /// parenthesized list.
    pub(crate) fn parse_full_text_columns(&mut self) -> PResult<Vec<FullTextColumn>> {
        if self.eat(&TokenKind::Star) {
            return Ok(vec![FullTextColumn::Wildcard]);
        }
        if self.eat(&TokenKind::LParen) {
            let columns = self.parse_comma_sep(|p| p.parse_full_text_column())?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(columns);
        }
        Ok(vec![self.parse_full_text_column()?])
    }

    fn parse_full_text_column(&mut self) -> PResult<FullTextColumn> {
        if self.eat(&TokenKind::Star) {
            return Ok(FullTextColumn::Wildcard);
        }
        let mut parts = vec![self.parse_name_part()?];
        while self.eat(&TokenKind::Dot) {
            parts.push(self.parse_name_part()?);
        }
        Ok(FullTextColumn::Column(MultiPartIdentifier::new(parts)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tsql_ast::{BooleanComparisonType, BooleanExpression};

    use crate::lexer::tokenize;
    use crate::parser::{Parser, ParserOptions};

    fn pred(src: &str) -> BooleanExpression {
        let mut p = Parser::new(tokenize(src), ParserOptions::default());
        p.parse_boolean_expression().expect("predicate should parse")
    }

    #[test]
    fn simple_comparison() {
        let BooleanExpression::Comparison(c) = pred("a = 1") else {
            panic!("expected comparison");
        };
        assert_eq!(c.comparison_type, BooleanComparisonType::Equals);
    }

    #[test]
    fn brackets_and_exclamation_not_equal_are_distinct() {
        let BooleanExpression::Comparison(c) = pred("a <> 1") else {
            panic!("expected comparison");
        };
        assert_eq!(c.comparison_type, BooleanComparisonType::NotEqualToBrackets);
        let BooleanExpression::Comparison(c) = pred("a != 1") else {
            panic!("expected comparison");
        };
        assert_eq!(
            c.comparison_type,
            BooleanComparisonType::NotEqualToExclamation
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let BooleanExpression::Binary(b) = pred("a = 1 OR b = 2 AND c = 3") else {
            panic!("expected binary");
        };
        assert_eq!(b.kind, tsql_ast::BooleanBinaryExpressionType::Or);
        assert!(matches!(b.second, BooleanExpression::Binary(_)));
    }

    #[test]
    fn not_predicate() {
        assert!(matches!(pred("NOT a = 1"), BooleanExpression::Not(_)));
    }

    #[test]
    fn is_null_and_is_not_null() {
        let BooleanExpression::IsNull(n) = pred("a IS NULL") else {
            panic!("expected is-null");
        };
        assert!(!n.is_not);
        let BooleanExpression::IsNull(n) = pred("a IS NOT NULL") else {
            panic!("expected is-null");
        };
        assert!(n.is_not);
    }

    #[test]
    fn is_distinct_from_null_lowers_to_is_null() {
        let BooleanExpression::IsNull(n) = pred("a IS DISTINCT FROM NULL") else {
            panic!("expected lowered is-null");
        };
        assert!(n.is_not);
        let BooleanExpression::IsNull(n) = pred("a IS NOT DISTINCT FROM NULL") else {
            panic!("expected lowered is-null");
        };
        assert!(!n.is_not);
    }

    #[test]
    fn is_distinct_from_expression() {
        assert!(matches!(
            pred("a IS DISTINCT FROM b"),
            BooleanExpression::IsDistinct(_)
        ));
    }

    #[test]
    fn in_list_and_in_subquery() {
        let BooleanExpression::In(i) = pred("a IN (1, 2, 3)") else {
            panic!("expected in");
        };
        assert!(matches!(i.set, tsql_ast::InPredicateSet::List(ref l) if l.len() == 3));
        let BooleanExpression::In(i) = pred("a NOT IN (SELECT b FROM t)") else {
            panic!("expected in");
        };
        assert!(i.not);
        assert!(matches!(i.set, tsql_ast::InPredicateSet::Subquery(_)));
    }

    #[test]
    fn like_with_escape() {
        let BooleanExpression::Like(l) = pred("a LIKE '%x!%%' ESCAPE '!'") else {
            panic!("expected like");
        };
        assert!(l.escape.is_some());
    }

    #[test]
    fn between() {
        let BooleanExpression::Between(b) = pred("a BETWEEN 1 AND 10") else {
            panic!("expected between");
        };
        assert!(!b.not);
    }

    #[test]
    fn exists() {
        assert!(matches!(
            pred("EXISTS (SELECT 1 FROM t)"),
            BooleanExpression::Exists(_)
        ));
    }

    #[test]
    fn parenthesized_group() {
        assert!(matches!(
            pred("(a = 1 OR b = 2) AND c = 3"),
            BooleanExpression::Binary(_)
        ));
    }

    #[test]
    fn parenthesized_scalar_on_the_left() {
        // The parenthesis wraps a scalar, not a boolean group.
        assert!(matches!(
            pred("(XACT_STATE()) = -1"),
            BooleanExpression::Comparison(_)
        ));
    }

    #[test]
    fn quantified_subquery_comparison() {
        let BooleanExpression::SubqueryComparison(s) = pred("a > ALL (SELECT b FROM t)")
        else {
            panic!("expected quantified comparison");
        };
        assert_eq!(s.quantifier, tsql_ast::SubqueryQuantifier::All);
    }

    #[test]
    fn contains_predicate() {
        assert!(matches!(
            pred("CONTAINS(doc, 'term')"),
            BooleanExpression::FullText(_)
        ));
    }
}
