//! The `OPTION (...)` clause: per-statement optimizer hints.

use tsql_ast::{
    Literal, OptimizeForPair, OptimizerHint, OptimizerHintKind,
};

use crate::parser::{PResult, Parser};
use crate::token::TokenKind;

impl Parser {
    /// `OPTION ( hint [, hint ...] )` if present, else an empty list.
    pub(crate) fn parse_optional_option_clause(&mut self) -> PResult<Vec<OptimizerHint>> {
        if !self.check(&TokenKind::KwOption) || *self.peek_nth(1) != TokenKind::LParen {
            return Ok(Vec::new());
        }
        self.advance();
        self.advance();
        let hints = self.parse_comma_sep(|p| p.parse_optimizer_hint())?;
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(hints)
    }

    fn parse_optimizer_hint(&mut self) -> PResult<OptimizerHint> {
        let word = self
            .try_hint_word()
            .ok_or_else(|| self.err_expected("an optimizer hint"))?;
        match word.as_str() {
            "RECOMPILE" => Ok(simple(OptimizerHintKind::Recompile)),
            "MAXRECURSION" => self.integer_hint(OptimizerHintKind::MaxRecursion),
            "FAST" => self.integer_hint(OptimizerHintKind::Fast),
            "MAXDOP" => self.integer_hint(OptimizerHintKind::MaxDop),
            "LABEL" => {
                self.expect(&TokenKind::Eq, "'='")?;
                let value = self.parse_literal_value()?;
                Ok(OptimizerHint::Literal {
                    kind: OptimizerHintKind::Label,
                    value,
                })
            }
            "MAX_GRANT_PERCENT" => {
                self.expect(&TokenKind::Eq, "'='")?;
                let value = self.parse_literal_value()?;
                Ok(OptimizerHint::Literal {
                    kind: OptimizerHintKind::MaxGrantPercent,
                    value,
                })
            }
            "MIN_GRANT_PERCENT" => {
                self.expect(&TokenKind::Eq, "'='")?;
                let value = self.parse_literal_value()?;
                Ok(OptimizerHint::Literal {
                    kind: OptimizerHintKind::MinGrantPercent,
                    value,
                })
            }
            "KEEP" => self.word_pair_hint("PLAN", OptimizerHintKind::KeepPlan),
            "KEEPFIXED" => self.word_pair_hint("PLAN", OptimizerHintKind::KeepFixedPlan),
            "ROBUST" => self.word_pair_hint("PLAN", OptimizerHintKind::RobustPlan),
            "EXPAND" => self.word_pair_hint("VIEWS", OptimizerHintKind::ExpandViews),
            "FORCE" => self.word_pair_hint("ORDER", OptimizerHintKind::ForceOrder),
            "ORDER" => self.word_pair_hint("GROUP", OptimizerHintKind::OrderGroup),
            "CONCAT" => self.word_pair_hint("UNION", OptimizerHintKind::ConcatUnion),
            "LOOP" => self.word_pair_hint("JOIN", OptimizerHintKind::LoopJoin),
            "HASH" => {
                let second = self
                    .try_hint_word()
                    .ok_or_else(|| self.err_expected("GROUP, UNION, or JOIN"))?;
                match second.as_str() {
                    "GROUP" => Ok(simple(OptimizerHintKind::HashGroup)),
                    "UNION" => Ok(simple(OptimizerHintKind::HashUnion)),
                    "JOIN" => Ok(simple(OptimizerHintKind::HashJoin)),
                    _ => Err(self.err_expected("GROUP, UNION, or JOIN")),
                }
            }
            "MERGE" => {
                let second = self
                    .try_hint_word()
                    .ok_or_else(|| self.err_expected("UNION or JOIN"))?;
                match second.as_str() {
                    "UNION" => Ok(simple(OptimizerHintKind::MergeUnion)),
                    "JOIN" => Ok(simple(OptimizerHintKind::MergeJoin)),
                    _ => Err(self.err_expected("UNION or JOIN")),
                }
            }
            "PARAMETERIZATION" => {
                let second = self
                    .try_hint_word()
                    .ok_or_else(|| self.err_expected("SIMPLE or FORCED"))?;
                match second.as_str() {
                    "SIMPLE" => Ok(simple(OptimizerHintKind::ParameterizationSimple)),
                    "FORCED" => Ok(simple(OptimizerHintKind::ParameterizationForced)),
                    _ => Err(self.err_expected("SIMPLE or FORCED")),
                }
            }
            "OPTIMIZE" => {
                // OPTIMIZE CORRELATED UNION ALL, else OPTIMIZE FOR.
                if matches!(
                    self.peek_kind(),
                    TokenKind::Ident(s) if s.eq_ignore_ascii_case("CORRELATED")
                ) {
                    self.advance();
                    self.expect(&TokenKind::KwUnion, "UNION")?;
                    self.expect(&TokenKind::KwAll, "ALL")?;
                    Ok(simple(OptimizerHintKind::OptimizeCorrelatedUnionAll))
                } else {
                    self.parse_optimize_for_hint()
                }
            }
            "USE" => self.parse_use_hint(),
            "TABLE" => self.parse_table_hint_option(),
            "CHECKCONSTRAINTS" => {
                if self.eat(&TokenKind::KwPlan) {
                    Ok(simple(OptimizerHintKind::CheckConstraintsPlan))
                } else {
                    Ok(simple(OptimizerHintKind::CheckConstraints))
                }
            }
            "OPTIMIZE_CORRELATED_UNION_ALL" => {
                Ok(simple(OptimizerHintKind::OptimizeCorrelatedUnionAll))
            }
            "IGNORE_NONCLUSTERED_COLUMNSTORE_INDEX" => Ok(simple(
                OptimizerHintKind::IgnoreNonClusteredColumnStoreIndex,
            )),
            "NO_PERFORMANCE_SPOOL" => Ok(simple(OptimizerHintKind::NoPerformanceSpool)),
            _ => {
                // Unrecognized hints pass through by name so new server
                // versions do not fail the parse. A trailing value is
                // accepted and dropped.
                if self.eat(&TokenKind::Eq) {
                    self.parse_literal_value()?;
                } else if matches!(
                    self.peek_kind(),
                    TokenKind::Integer(_) | TokenKind::Numeric(_)
                ) {
                    self.advance();
                }
                Ok(OptimizerHint::Generic {
                    kind_name: pascal_case(&word),
                })
            }
        }
    }

    fn integer_hint(&mut self, kind: OptimizerHintKind) -> PResult<OptimizerHint> {
        match self.peek_kind().clone() {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(OptimizerHint::Literal {
                    kind,
                    value: Literal::Integer(n),
                })
            }
            _ => Err(self.err_expected("an integer")),
        }
    }

    fn word_pair_hint(
        &mut self,
        second: &str,
        kind: OptimizerHintKind,
    ) -> PResult<OptimizerHint> {
        match self.try_hint_word() {
            Some(word) if word == second => Ok(simple(kind)),
            _ => Err(self.err_expected(second)),
        }
    }

    /// `OPTIMIZE FOR UNKNOWN` or `OPTIMIZE FOR (@v = literal | @v UNKNOWN, ...)`.
    fn parse_optimize_for_hint(&mut self) -> PResult<OptimizerHint> {
        self.expect(&TokenKind::KwFor, "FOR")?;
        if self.eat(&TokenKind::KwUnknown) {
            return Ok(OptimizerHint::OptimizeForUnknown);
        }
        self.expect(&TokenKind::LParen, "'('")?;
        let pairs = self.parse_comma_sep(|p| {
            let variable = p.parse_variable_reference()?;
            let value = if p.eat(&TokenKind::KwUnknown) {
                None
            } else {
                p.expect(&TokenKind::Eq, "'=' or UNKNOWN")?;
                Some(p.parse_literal_value()?)
            };
            Ok(OptimizeForPair { variable, value })
        })?;
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(OptimizerHint::OptimizeFor { pairs })
    }

    /// `USE PLAN 'xml'` or `USE HINT ('name', ...)`.
    fn parse_use_hint(&mut self) -> PResult<OptimizerHint> {
        if self.eat(&TokenKind::KwPlan) {
            let plan = self.parse_string_value()?;
            return Ok(OptimizerHint::UsePlan { plan });
        }
        match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("HINT") => {
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let hints = self.parse_comma_sep(|p| p.parse_string_value())?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(OptimizerHint::UseHint { hints })
            }
            _ => Err(self.err_expected("PLAN or HINT")),
        }
    }

    /// `TABLE HINT (object, hint [, hint ...])`.
    fn parse_table_hint_option(&mut self) -> PResult<OptimizerHint> {
        match self.peek_kind() {
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("HINT") => {
                self.advance();
            }
            _ => return Err(self.err_expected("HINT")),
        }
        self.expect(&TokenKind::LParen, "'('")?;
        let object = self.parse_schema_object_name()?;
        let mut hints = Vec::new();
        while self.eat(&TokenKind::Comma) {
            hints.push(self.parse_table_hint()?);
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(OptimizerHint::TableHints { object, hints })
    }

    /// The next token read as an uppercase hint word: a plain identifier or
    /// any keyword.
    fn try_hint_word(&mut self) -> Option<String> {
        let word = match self.peek_kind() {
            TokenKind::Ident(s) if !s.starts_with('@') && !s.starts_with('$') => {
                s.to_ascii_uppercase()
            }
            kind => kind.kw_to_str()?.to_owned(),
        };
        self.advance();
        Some(word)
    }

    fn parse_string_value(&mut self) -> PResult<String> {
        match self.peek_kind().clone() {
            TokenKind::String(s) | TokenKind::NationalString(s) => {
                self.advance();
                Ok(s)
            }
            _ => Err(self.err_expected("a string literal")),
        }
    }
}

fn simple(kind: OptimizerHintKind) -> OptimizerHint {
    OptimizerHint::Simple { kind }
}

/// `NO_PERFORMANCE_SPOOL` -> `NoPerformanceSpool`.
fn pascal_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for part in word.split('_') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use tsql_ast::{Literal, OptimizerHint, OptimizerHintKind, Statement, TableHintKind};

    use crate::parser::parse;

    fn hints(src: &str) -> Vec<OptimizerHint> {
        let script = parse(src).expect("script should parse");
        let Statement::Select(select) = script.batches[0].statements[0].clone() else {
            panic!("expected SELECT");
        };
        select.optimizer_hints
    }

    #[test]
    fn simple_and_valued_hints() {
        let hints = hints("SELECT 1 OPTION (RECOMPILE, MAXDOP 1, LABEL = 'load')");
        assert_eq!(hints.len(), 3);
        assert_eq!(
            hints[0],
            OptimizerHint::Simple {
                kind: OptimizerHintKind::Recompile
            }
        );
        let OptimizerHint::Literal { kind, value } = &hints[1] else {
            panic!("expected a valued hint");
        };
        assert_eq!(*kind, OptimizerHintKind::MaxDop);
        assert_eq!(*value, Literal::Integer("1".into()));
        assert!(matches!(
            &hints[2],
            OptimizerHint::Literal {
                kind: OptimizerHintKind::Label,
                ..
            }
        ));
    }

    #[test]
    fn two_word_hints() {
        let hints = hints("SELECT 1 OPTION (HASH JOIN, KEEP PLAN, FORCE ORDER)");
        let kinds: Vec<_> = hints
            .iter()
            .map(|h| {
                let OptimizerHint::Simple { kind } = h else {
                    panic!("expected a bare hint");
                };
                *kind
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                OptimizerHintKind::HashJoin,
                OptimizerHintKind::KeepPlan,
                OptimizerHintKind::ForceOrder,
            ]
        );
    }

    #[test]
    fn optimize_correlated_union_all() {
        let hints = hints("SELECT 1 OPTION (OPTIMIZE CORRELATED UNION ALL)");
        assert_eq!(
            hints[0],
            OptimizerHint::Simple {
                kind: OptimizerHintKind::OptimizeCorrelatedUnionAll
            }
        );
    }

    #[test]
    fn checkconstraints_with_and_without_plan() {
        let hints = hints("SELECT 1 OPTION (CHECKCONSTRAINTS PLAN, CHECKCONSTRAINTS)");
        assert_eq!(
            hints[0],
            OptimizerHint::Simple {
                kind: OptimizerHintKind::CheckConstraintsPlan
            }
        );
        assert_eq!(
            hints[1],
            OptimizerHint::Simple {
                kind: OptimizerHintKind::CheckConstraints
            }
        );
    }

    #[test]
    fn optimize_for_pairs_and_unknown() {
        let hints =
            hints("SELECT 1 OPTION (OPTIMIZE FOR (@a = 5, @b UNKNOWN), OPTIMIZE FOR UNKNOWN)");
        let OptimizerHint::OptimizeFor { pairs } = &hints[0] else {
            panic!("expected OPTIMIZE FOR");
        };
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].value, Some(Literal::Integer("5".into())));
        assert_eq!(pairs[1].value, None);
        assert_eq!(hints[1], OptimizerHint::OptimizeForUnknown);
    }

    #[test]
    fn use_plan_and_use_hint() {
        let hints = hints(
            "SELECT 1 OPTION (USE PLAN '<plan/>', USE HINT ('DISABLE_OPTIMIZER_ROWGOAL'))",
        );
        let OptimizerHint::UsePlan { plan } = &hints[0] else {
            panic!("expected USE PLAN");
        };
        assert_eq!(plan, "<plan/>");
        let OptimizerHint::UseHint { hints: names } = &hints[1] else {
            panic!("expected USE HINT");
        };
        assert_eq!(names, &["DISABLE_OPTIMIZER_ROWGOAL"]);
    }

    #[test]
    fn table_hint_option() {
        let hints = hints("SELECT 1 OPTION (TABLE HINT (dbo.t, NOLOCK, INDEX(ix_a)))");
        let OptimizerHint::TableHints { object, hints } = &hints[0] else {
            panic!("expected TABLE HINT");
        };
        assert_eq!(object.identifiers.len(), 2);
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[0].kind, TableHintKind::NoLock);
    }

    #[test]
    fn unknown_hint_passes_through() {
        let hints = hints("SELECT 1 OPTION (QUERYTRACEON 4199)");
        assert_eq!(
            hints[0],
            OptimizerHint::Generic {
                kind_name: "Querytraceon".into()
            }
        );
    }

    #[test]
    fn option_requires_parentheses() {
        assert!(parse("SELECT 1 OPTION RECOMPILE").is_err());
    }
}
