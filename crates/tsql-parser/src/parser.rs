//! Recursive-descent parser core: token navigation, script and batch
//! structure, statement dispatch, and the simple statement forms.
//!
//! The grammar is spread over sibling modules, each an `impl Parser` block:
//! `query` (query expressions), `expr` (scalar expressions), `boolean`
//! (search conditions), `from` (table references), `hints` (optimizer
//! hints), `dml`, and `ddl`.

use std::mem;

use tsql_ast::{
    Batch, DataTypeParameter, DataTypeReference, DeclareVariableElement,
    DeclareVariableStatement, ExecuteParameter, ExecuteStatement, ExecuteTarget,
    GlobalVariableExpression, Identifier, IsolationLevel, Literal, QuoteType,
    RaiserrorStatement, ScalarExpression, SchemaObjectName, Script, SetOnOffStatement,
    SetVariableStatement, Span, Statement, ThrowStatement, TryCatchStatement,
    VariableReference, WaitforKind, WaitforStatement, WhileStatement,
    BeginEndBlockStatement, IfStatement, AssignmentKind,
};

use crate::error::{LexError, ParseError};
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Knobs that change how strictly the parser treats malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// When set, a failure while parsing a second or later table reference
    /// in a FROM clause truncates the list instead of failing the
    /// statement. Off by default.
    pub lenient_from: bool,
}

/// Parse a complete T-SQL script with default options.
///
/// # Errors
///
/// Returns the first lexical or syntactic error found; no partial AST is
/// produced for a failed input.
pub fn parse(source: &str) -> Result<Script, ParseError> {
    parse_with_options(source, ParserOptions::default())
}

/// Parse a complete T-SQL script.
///
/// # Errors
///
/// Returns the first lexical or syntactic error found.
pub fn parse_with_options(
    source: &str,
    options: ParserOptions,
) -> Result<Script, ParseError> {
    let tokens = tokenize(source);
    for token in &tokens {
        if let TokenKind::Error(kind) = token.kind {
            return Err(ParseError::Lex(LexError {
                kind,
                offset: token.span.start,
                line: token.line,
                col: token.col,
            }));
        }
    }
    Parser::new(tokens, options).parse_script()
}

/// Single-token-lookahead recursive-descent parser over a materialized
/// token stream.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) options: ParserOptions,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>, options: ParserOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
        }
    }

    // -- navigation ---------------------------------------------------------

    pub(crate) fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or_else(|| unreachable!("token stream always ends with Eof"))
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(self.peek_kind()) == mem::discriminant(kind)
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, what: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.err_expected(what))
        }
    }

    pub(crate) fn save(&self) -> usize {
        self.pos
    }

    pub(crate) fn restore(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn err_expected(&self, what: &str) -> ParseError {
        let token = self.peek();
        ParseError::Unexpected {
            expected: Some(what.to_owned()),
            got: token.kind.to_string(),
            offset: token.span.start,
            line: token.line,
            col: token.col,
        }
    }

    /// The span of the token just consumed.
    pub(crate) fn prev_span(&self) -> Span {
        if self.pos == 0 {
            return Span::ZERO;
        }
        self.tokens
            .get(self.pos - 1)
            .map_or(Span::ZERO, |t| t.span)
    }

    pub(crate) fn parse_comma_sep<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = vec![f(self)?];
        while self.eat(&TokenKind::Comma) {
            items.push(f(self)?);
        }
        Ok(items)
    }

    // -- script and batches -------------------------------------------------

    pub(crate) fn parse_script(&mut self) -> PResult<Script> {
        let mut batches = Vec::new();
        while !self.check(&TokenKind::Eof) {
            let batch = self.parse_batch()?;
            // `GO` with nothing before it produces no batch.
            if !batch.statements.is_empty() {
                batches.push(batch);
            }
        }
        Ok(Script { batches })
    }

    fn parse_batch(&mut self) -> PResult<Batch> {
        let mut statements = Vec::new();
        let mut go_count = None;
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            match self.peek_kind() {
                TokenKind::Eof => break,
                // A batch separator only when it starts its line.
                TokenKind::KwGo if self.go_at_line_start() => {
                    self.advance();
                    if let TokenKind::Integer(n) = self.peek_kind() {
                        let count = n
                            .parse::<u64>()
                            .map_err(|_| self.err_expected("a batch repeat count"))?;
                        self.advance();
                        go_count = Some(count);
                    }
                    break;
                }
                _ => statements.push(self.parse_statement()?),
            }
        }
        Ok(Batch {
            statements,
            go_count,
        })
    }

    /// `GO` separates batches only as the first token on its line.
    fn go_at_line_start(&self) -> bool {
        if self.pos == 0 {
            return true;
        }
        self.tokens
            .get(self.pos - 1)
            .map_or(true, |t| t.line < self.peek().line)
    }

    // -- statement dispatch -------------------------------------------------

    pub(crate) fn parse_statement(&mut self) -> PResult<Statement> {
        match self.peek_kind().clone() {
            TokenKind::KwSelect | TokenKind::LParen => self.parse_select_statement(),
            TokenKind::KwWith => self.parse_with_dml_statement(),
            TokenKind::KwInsert => self.parse_insert_statement(None),
            TokenKind::KwUpdate => self.parse_update_statement(None),
            TokenKind::KwDelete => self.parse_delete_statement(None),
            TokenKind::KwMerge => self.parse_merge_statement(None),
            TokenKind::KwDeclare => self.parse_declare_statement(),
            TokenKind::KwSet => self.parse_set_statement(),
            TokenKind::KwIf => self.parse_if_statement(),
            TokenKind::KwWhile => self.parse_while_statement(),
            TokenKind::KwBegin => self.parse_begin_statement(),
            TokenKind::KwBreak => {
                self.advance();
                Ok(Statement::Break)
            }
            TokenKind::KwContinue => {
                self.advance();
                Ok(Statement::Continue)
            }
            TokenKind::KwReturn => self.parse_return_statement(),
            TokenKind::KwGoto => {
                self.advance();
                let name = self.parse_identifier("label name")?;
                Ok(Statement::Goto(name.value))
            }
            TokenKind::KwCommit => self.parse_commit_statement(),
            TokenKind::KwRollback => self.parse_rollback_statement(),
            TokenKind::KwSave => {
                self.advance();
                self.eat_tran_keyword("TRAN or TRANSACTION")?;
                let name = self.parse_identifier("savepoint name")?;
                Ok(Statement::SaveTransaction(name))
            }
            TokenKind::KwExec | TokenKind::KwExecute => {
                let exec = self.parse_execute_statement()?;
                Ok(Statement::Execute(Box::new(exec)))
            }
            TokenKind::KwPrint => {
                self.advance();
                Ok(Statement::Print(self.parse_scalar_expression()?))
            }
            TokenKind::KwThrow => self.parse_throw_statement(),
            TokenKind::KwRaiserror => self.parse_raiserror_statement(),
            TokenKind::KwWaitfor => self.parse_waitfor_statement(),
            TokenKind::KwCreate => self.parse_create_statement(),
            TokenKind::KwAlter => self.parse_alter_statement(),
            TokenKind::KwDrop => self.parse_drop_statement(),
            TokenKind::KwGrant | TokenKind::KwDeny | TokenKind::KwRevoke => {
                self.parse_security_statement()
            }
            TokenKind::KwTruncate => {
                self.advance();
                self.expect(&TokenKind::KwTable, "TABLE")?;
                let name = self.parse_schema_object_name()?;
                Ok(Statement::TruncateTable(name))
            }
            TokenKind::KwUse => {
                self.advance();
                let db = self.parse_identifier("database name")?;
                Ok(Statement::Use(db))
            }
            TokenKind::KwKill => {
                self.advance();
                Ok(Statement::Kill(self.parse_scalar_expression()?))
            }
            TokenKind::KwCheckpoint => {
                self.advance();
                let duration = if matches!(self.peek_kind(), TokenKind::Integer(_)) {
                    Some(self.parse_scalar_expression()?)
                } else {
                    None
                };
                Ok(Statement::Checkpoint(duration))
            }
            TokenKind::Ident(name)
                if !name.starts_with('@')
                    && !name.starts_with('$')
                    && *self.peek_nth(1) == TokenKind::Colon =>
            {
                self.advance();
                self.advance();
                Ok(Statement::Label(name))
            }
            _ => Err(self.err_expected("a statement")),
        }
    }

    // -- control of flow ----------------------------------------------------

    fn parse_if_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwIf, "IF")?;
        let predicate = self.parse_boolean_expression()?;
        let then_statement = self.parse_statement()?;
        while self.eat(&TokenKind::Semicolon) {}
        let else_statement = if self.eat(&TokenKind::KwElse) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(Statement::If(Box::new(IfStatement {
            predicate,
            then_statement,
            else_statement,
        })))
    }

    fn parse_while_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwWhile, "WHILE")?;
        let predicate = self.parse_boolean_expression()?;
        let statement = self.parse_statement()?;
        Ok(Statement::While(Box::new(WhileStatement {
            predicate,
            statement,
        })))
    }

    fn parse_begin_statement(&mut self) -> PResult<Statement> {
        match self.peek_nth(1) {
            TokenKind::KwTran | TokenKind::KwTransaction => {
                self.advance();
                self.advance();
                let name = self.try_identifier();
                Ok(Statement::BeginTransaction(name))
            }
            TokenKind::KwTry => self.parse_try_catch_statement(),
            _ => {
                self.advance();
                let statements = self.parse_statement_list_until_end()?;
                self.expect(&TokenKind::KwEnd, "END")?;
                Ok(Statement::Block(BeginEndBlockStatement { statements }))
            }
        }
    }

    fn parse_try_catch_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwBegin, "BEGIN")?;
        self.expect(&TokenKind::KwTry, "TRY")?;
        let try_statements = self.parse_statement_list_until_end()?;
        self.expect(&TokenKind::KwEnd, "END")?;
        self.expect(&TokenKind::KwTry, "TRY")?;
        self.expect(&TokenKind::KwBegin, "BEGIN")?;
        self.expect(&TokenKind::KwCatch, "CATCH")?;
        let catch_statements = self.parse_statement_list_until_end()?;
        self.expect(&TokenKind::KwEnd, "END")?;
        self.expect(&TokenKind::KwCatch, "CATCH")?;
        Ok(Statement::TryCatch(Box::new(TryCatchStatement {
            try_statements,
            catch_statements,
        })))
    }

    /// Statements up to (not including) a closing `END`.
    pub(crate) fn parse_statement_list_until_end(&mut self) -> PResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.check(&TokenKind::KwEnd) || self.check(&TokenKind::Eof) {
                return Ok(statements);
            }
            statements.push(self.parse_statement()?);
        }
    }

    fn parse_return_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwReturn, "RETURN")?;
        let value = if self.can_start_expression() {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        Ok(Statement::Return(value))
    }

    // -- transactions -------------------------------------------------------

    fn eat_tran_keyword(&mut self, what: &str) -> PResult<()> {
        if self.eat(&TokenKind::KwTran) || self.eat(&TokenKind::KwTransaction) {
            Ok(())
        } else {
            Err(self.err_expected(what))
        }
    }

    fn parse_commit_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwCommit, "COMMIT")?;
        let mut name = None;
        if self.eat(&TokenKind::KwTran) || self.eat(&TokenKind::KwTransaction) {
            name = self.try_identifier();
        }
        Ok(Statement::CommitTransaction(name))
    }

    fn parse_rollback_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwRollback, "ROLLBACK")?;
        let mut name = None;
        if self.eat(&TokenKind::KwTran) || self.eat(&TokenKind::KwTransaction) {
            name = self.try_identifier();
        }
        Ok(Statement::RollbackTransaction(name))
    }

    // -- DECLARE / SET ------------------------------------------------------

    fn parse_declare_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwDeclare, "DECLARE")?;
        let first = self.parse_variable_reference()?;
        if self.check(&TokenKind::KwTable) {
            self.advance();
            self.expect(&TokenKind::LParen, "'('")?;
            let columns =
                self.parse_comma_sep(|p| p.parse_column_definition())?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(Statement::DeclareTableVariable(Box::new(
                tsql_ast::DeclareTableVariableStatement {
                    variable: first,
                    columns,
                },
            )));
        }

        let mut declarations = vec![self.parse_declare_element(first)?];
        while self.eat(&TokenKind::Comma) {
            let variable = self.parse_variable_reference()?;
            declarations.push(self.parse_declare_element(variable)?);
        }
        Ok(Statement::Declare(DeclareVariableStatement { declarations }))
    }

    fn parse_declare_element(
        &mut self,
        variable: VariableReference,
    ) -> PResult<DeclareVariableElement> {
        self.eat(&TokenKind::KwAs);
        let data_type = self.parse_data_type()?;
        let value = if self.eat(&TokenKind::Eq) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        Ok(DeclareVariableElement {
            variable,
            data_type,
            value,
        })
    }

    fn parse_set_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwSet, "SET")?;
        if self.peek_is_variable() {
            let variable = self.parse_variable_reference()?;
            let assignment_kind = self
                .try_assignment_kind()
                .ok_or_else(|| self.err_expected("an assignment operator"))?;
            let expression = self.parse_scalar_expression()?;
            return Ok(Statement::SetVariable(Box::new(SetVariableStatement {
                variable,
                assignment_kind,
                expression,
            })));
        }
        if self.check(&TokenKind::KwTransaction) {
            self.advance();
            self.expect(&TokenKind::KwIsolation, "ISOLATION")?;
            self.expect(&TokenKind::KwLevel, "LEVEL")?;
            let level = self.parse_isolation_level()?;
            return Ok(Statement::SetTransactionIsolationLevel(level));
        }
        let options = self.parse_comma_sep(|p| p.parse_identifier("a session option"))?;
        let on = if self.eat(&TokenKind::KwOn) {
            true
        } else if self.eat(&TokenKind::KwOff) {
            false
        } else {
            return Err(self.err_expected("ON or OFF"));
        };
        Ok(Statement::SetOnOff(SetOnOffStatement { options, on }))
    }

    fn parse_isolation_level(&mut self) -> PResult<IsolationLevel> {
        if self.eat(&TokenKind::KwRead) {
            if self.eat(&TokenKind::KwCommitted) {
                return Ok(IsolationLevel::ReadCommitted);
            }
            if self.eat(&TokenKind::KwUncommitted) {
                return Ok(IsolationLevel::ReadUncommitted);
            }
            return Err(self.err_expected("COMMITTED or UNCOMMITTED"));
        }
        if self.eat(&TokenKind::KwRepeatable) {
            self.expect(&TokenKind::KwRead, "READ")?;
            return Ok(IsolationLevel::RepeatableRead);
        }
        if self.eat(&TokenKind::KwSnapshot) {
            return Ok(IsolationLevel::Snapshot);
        }
        if self.eat(&TokenKind::KwSerializable) {
            return Ok(IsolationLevel::Serializable);
        }
        Err(self.err_expected("an isolation level"))
    }

    /// Assignment operator at the current position, if one is present.
    pub(crate) fn try_assignment_kind(&mut self) -> Option<AssignmentKind> {
        let kind = match self.peek_kind() {
            TokenKind::Eq => AssignmentKind::Equals,
            TokenKind::PlusEq => AssignmentKind::AddEquals,
            TokenKind::MinusEq => AssignmentKind::SubtractEquals,
            TokenKind::StarEq => AssignmentKind::MultiplyEquals,
            TokenKind::SlashEq => AssignmentKind::DivideEquals,
            TokenKind::PercentEq => AssignmentKind::ModEquals,
            TokenKind::AmpEq => AssignmentKind::BitwiseAndEquals,
            TokenKind::PipeEq => AssignmentKind::BitwiseOrEquals,
            TokenKind::CaretEq => AssignmentKind::BitwiseXorEquals,
            _ => return None,
        };
        self.advance();
        Some(kind)
    }

    // -- EXECUTE and message statements -------------------------------------

    pub(crate) fn parse_execute_statement(&mut self) -> PResult<ExecuteStatement> {
        if !self.eat(&TokenKind::KwExec) && !self.eat(&TokenKind::KwExecute) {
            return Err(self.err_expected("EXEC or EXECUTE"));
        }
        if self.eat(&TokenKind::LParen) {
            let mut parts = vec![self.parse_scalar_expression()?];
            while self.eat(&TokenKind::Comma) {
                parts.push(self.parse_scalar_expression()?);
            }
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(ExecuteStatement {
                target: ExecuteTarget::StringCommand(parts),
                parameters: Vec::new(),
            });
        }

        let return_variable = if self.peek_is_variable()
            && *self.peek_nth(1) == TokenKind::Eq
        {
            let v = self.parse_variable_reference()?;
            self.advance();
            Some(v)
        } else {
            None
        };
        let name = self.parse_schema_object_name()?;
        let mut parameters = Vec::new();
        if self.can_start_expression() || self.peek_is_variable() {
            parameters = self.parse_comma_sep(|p| p.parse_execute_parameter())?;
        }
        Ok(ExecuteStatement {
            target: ExecuteTarget::Procedure {
                return_variable,
                name,
            },
            parameters,
        })
    }

    fn parse_execute_parameter(&mut self) -> PResult<ExecuteParameter> {
        let variable = if self.peek_is_variable() && *self.peek_nth(1) == TokenKind::Eq
        {
            let v = self.parse_variable_reference()?;
            self.advance();
            Some(v)
        } else {
            None
        };
        let value = if self.check(&TokenKind::KwDefault) {
            let span = self.advance().span;
            ScalarExpression::Literal(Literal::Default, span)
        } else {
            self.parse_scalar_expression()?
        };
        let mut output = self.eat(&TokenKind::KwOutput);
        if !output
            && matches!(self.peek_kind(), TokenKind::Ident(s) if s.eq_ignore_ascii_case("OUT"))
        {
            self.advance();
            output = true;
        }
        Ok(ExecuteParameter {
            variable,
            value,
            output,
        })
    }

    fn parse_throw_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwThrow, "THROW")?;
        if !self.can_start_expression() {
            return Ok(Statement::Throw(None));
        }
        let error_number = self.parse_scalar_expression()?;
        self.expect(&TokenKind::Comma, "','")?;
        let message = self.parse_scalar_expression()?;
        self.expect(&TokenKind::Comma, "','")?;
        let state = self.parse_scalar_expression()?;
        Ok(Statement::Throw(Some(Box::new(ThrowStatement {
            error_number,
            message,
            state,
        }))))
    }

    fn parse_raiserror_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwRaiserror, "RAISERROR")?;
        self.expect(&TokenKind::LParen, "'('")?;
        let first = self.parse_scalar_expression()?;
        self.expect(&TokenKind::Comma, "','")?;
        let severity = self.parse_scalar_expression()?;
        self.expect(&TokenKind::Comma, "','")?;
        let state = self.parse_scalar_expression()?;
        let mut parameters = Vec::new();
        while self.eat(&TokenKind::Comma) {
            parameters.push(self.parse_scalar_expression()?);
        }
        self.expect(&TokenKind::RParen, "')'")?;
        let mut options = Vec::new();
        if self.eat(&TokenKind::KwWith) {
            options = self.parse_comma_sep(|p| p.parse_identifier("a RAISERROR option"))?;
        }
        Ok(Statement::Raiserror(Box::new(RaiserrorStatement {
            first,
            severity,
            state,
            parameters,
            options,
        })))
    }

    fn parse_waitfor_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwWaitfor, "WAITFOR")?;
        let kind = if self.eat(&TokenKind::KwDelay) {
            WaitforKind::Delay
        } else if self.eat(&TokenKind::KwTime) {
            WaitforKind::Time
        } else {
            return Err(self.err_expected("DELAY or TIME"));
        };
        let parameter = self.parse_scalar_expression()?;
        Ok(Statement::Waitfor(Box::new(WaitforStatement {
            kind,
            parameter,
        })))
    }

    // -- identifiers, names, variables, types -------------------------------

    pub(crate) fn peek_is_variable(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Ident(s) if s.starts_with('@'))
    }

    /// A `@name` (not `@@name`) variable reference.
    pub(crate) fn parse_variable_reference(&mut self) -> PResult<VariableReference> {
        match self.peek_kind() {
            TokenKind::Ident(s) if s.starts_with('@') && !s.starts_with("@@") => {
                let token = self.advance();
                let TokenKind::Ident(name) = token.kind else {
                    return Err(ParseError::Internal("variable token vanished".into()));
                };
                Ok(VariableReference {
                    name,
                    span: token.span,
                })
            }
            _ => Err(self.err_expected("a variable")),
        }
    }

    pub(crate) fn parse_global_variable(&mut self) -> PResult<GlobalVariableExpression> {
        match self.peek_kind() {
            TokenKind::Ident(s) if s.starts_with("@@") => {
                let token = self.advance();
                let TokenKind::Ident(name) = token.kind else {
                    return Err(ParseError::Internal("variable token vanished".into()));
                };
                Ok(GlobalVariableExpression {
                    name,
                    span: token.span,
                })
            }
            _ => Err(self.err_expected("a global variable")),
        }
    }

    /// A plain identifier: bare, bracketed, double-quoted, or a
    /// non-reserved keyword.
    pub(crate) fn parse_identifier(&mut self, what: &str) -> PResult<Identifier> {
        self.try_identifier()
            .ok_or_else(|| self.err_expected(what))
    }

    pub(crate) fn try_identifier(&mut self) -> Option<Identifier> {
        let ident = match self.peek_kind() {
            TokenKind::Ident(s) if !s.starts_with('@') && !s.starts_with('$') => {
                Identifier::new(s.clone())
            }
            TokenKind::BracketedIdent(s) => {
                Identifier::quoted(s.clone(), QuoteType::SquareBracket)
            }
            TokenKind::QuotedIdent(s) => {
                Identifier::quoted(s.clone(), QuoteType::DoubleQuote)
            }
            kind if kind.is_nonreserved_kw() => {
                let s = kind.kw_to_str().unwrap_or_default();
                Identifier::new(s)
            }
            _ => return None,
        };
        self.advance();
        Some(ident)
    }

    /// Whether the current token could be a name part of a dotted object
    /// name. A handful of reserved keywords are legal here (`KEY`,
    /// `INDEX`, `USER`, ...).
    pub(crate) fn peek_is_name_part(&self) -> bool {
        match self.peek_kind() {
            TokenKind::Ident(s) => !s.starts_with('@'),
            TokenKind::BracketedIdent(_) | TokenKind::QuotedIdent(_) => true,
            kind if kind.is_nonreserved_kw() => true,
            TokenKind::KwKey
            | TokenKind::KwIndex
            | TokenKind::KwUser
            | TokenKind::KwDatabase
            | TokenKind::KwSchema
            | TokenKind::KwTable
            | TokenKind::KwView
            | TokenKind::KwLeft
            | TokenKind::KwRight
            | TokenKind::KwDefault => true,
            _ => false,
        }
    }

    /// One part of a dotted name, permitting the keyword-as-identifier set.
    pub(crate) fn parse_name_part(&mut self) -> PResult<Identifier> {
        let ident = match self.peek_kind() {
            TokenKind::Ident(s) if !s.starts_with('@') => Identifier::new(s.clone()),
            TokenKind::BracketedIdent(s) => {
                Identifier::quoted(s.clone(), QuoteType::SquareBracket)
            }
            TokenKind::QuotedIdent(s) => {
                Identifier::quoted(s.clone(), QuoteType::DoubleQuote)
            }
            kind => {
                if self.peek_is_name_part() {
                    let s = kind.kw_to_str().unwrap_or_default();
                    Identifier::new(s)
                } else {
                    return Err(self.err_expected("an identifier"));
                }
            }
        };
        self.advance();
        Ok(ident)
    }

    /// A 1- to 4-part dotted schema object name. Consecutive dots produce
    /// empty parts (`db..table`).
    pub(crate) fn parse_schema_object_name(&mut self) -> PResult<SchemaObjectName> {
        let mut parts = vec![self.parse_name_part()?];
        while self.check(&TokenKind::Dot) {
            self.advance();
            if self.check(&TokenKind::Dot) {
                parts.push(Identifier::empty());
                continue;
            }
            parts.push(self.parse_name_part()?);
        }
        if parts.len() > 4 {
            return Err(self.err_expected("a name with at most four parts"));
        }
        Ok(SchemaObjectName::new(parts))
    }

    /// A data type name with optional `(n [, m])` or `(MAX)` parameters.
    pub(crate) fn parse_data_type(&mut self) -> PResult<DataTypeReference> {
        let name = self.parse_schema_object_name()?;
        let mut parameters = Vec::new();
        if self.eat(&TokenKind::LParen) {
            parameters = self.parse_comma_sep(|p| {
                match p.peek_kind() {
                    TokenKind::Integer(n) => {
                        let n = n.clone();
                        p.advance();
                        Ok(DataTypeParameter::Number(n))
                    }
                    TokenKind::Ident(s) if s.eq_ignore_ascii_case("MAX") => {
                        p.advance();
                        Ok(DataTypeParameter::Max)
                    }
                    _ => Err(p.err_expected("a type length or MAX")),
                }
            })?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        Ok(DataTypeReference { name, parameters })
    }

    /// Whether the current token can begin a scalar expression.
    pub(crate) fn can_start_expression(&self) -> bool {
        match self.peek_kind() {
            TokenKind::Integer(_)
            | TokenKind::Numeric(_)
            | TokenKind::String(_)
            | TokenKind::NationalString(_)
            | TokenKind::Binary(_)
            | TokenKind::Ident(_)
            | TokenKind::BracketedIdent(_)
            | TokenKind::QuotedIdent(_)
            | TokenKind::LParen
            | TokenKind::LBrace
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Tilde
            | TokenKind::KwNull
            | TokenKind::KwDefault
            | TokenKind::KwCase
            | TokenKind::KwConvert
            | TokenKind::KwIdentity
            | TokenKind::KwIdentitycol
            | TokenKind::KwRowguidcol
            | TokenKind::KwLeft
            | TokenKind::KwRight
            | TokenKind::KwUser => true,
            kind => kind.is_nonreserved_kw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tsql_ast::{
        AssignmentKind, ExecuteTarget, IsolationLevel, Statement, WaitforKind,
    };

    use super::parse;

    fn stmt(src: &str) -> Statement {
        let script = parse(src).expect("script should parse");
        script.batches[0].statements[0].clone()
    }

    #[test]
    fn go_splits_batches_and_keeps_the_count() {
        let script = parse("SELECT 1\nGO 3\nSELECT 2\nGO").expect("script should parse");
        assert_eq!(script.batches.len(), 2);
        assert_eq!(script.batches[0].go_count, Some(3));
        assert_eq!(script.batches[1].go_count, None);
    }

    #[test]
    fn go_must_start_its_line() {
        assert!(parse("SELECT 1 GO").is_err());
        let script = parse("SELECT 1\n   GO\nSELECT 2").expect("script should parse");
        assert_eq!(script.batches.len(), 2);
    }

    #[test]
    fn go_count_too_large_is_an_error() {
        assert!(parse("SELECT 1\nGO 99999999999999999999").is_err());
    }

    #[test]
    fn empty_batches_are_dropped() {
        let script = parse("GO\nGO\nSELECT 1").expect("script should parse");
        assert_eq!(script.batches.len(), 1);
        assert_eq!(script.batches[0].statements.len(), 1);
    }

    #[test]
    fn if_else_statement() {
        let Statement::If(if_stmt) = stmt("IF @x = 1 SELECT 1 ELSE SELECT 2") else {
            panic!("expected IF");
        };
        assert!(matches!(if_stmt.then_statement, Statement::Select(_)));
        assert!(matches!(if_stmt.else_statement, Some(Statement::Select(_))));
    }

    #[test]
    fn while_with_break_and_continue() {
        let Statement::While(while_stmt) =
            stmt("WHILE @i < 10 BEGIN SET @i += 1 IF @i = 5 BREAK ELSE CONTINUE END")
        else {
            panic!("expected WHILE");
        };
        let Statement::Block(block) = while_stmt.statement else {
            panic!("expected a block body");
        };
        assert_eq!(block.statements.len(), 2);
    }

    #[test]
    fn begin_end_block() {
        let Statement::Block(block) = stmt("BEGIN SELECT 1; SELECT 2 END") else {
            panic!("expected a block");
        };
        assert_eq!(block.statements.len(), 2);
    }

    #[test]
    fn try_catch() {
        let Statement::TryCatch(tc) =
            stmt("BEGIN TRY SELECT 1 END TRY BEGIN CATCH PRINT 'oops' END CATCH")
        else {
            panic!("expected TRY/CATCH");
        };
        assert_eq!(tc.try_statements.len(), 1);
        assert_eq!(tc.catch_statements.len(), 1);
    }

    #[test]
    fn declare_scalar_variables() {
        let Statement::Declare(declare) =
            stmt("DECLARE @a INT = 1, @b NVARCHAR(50)")
        else {
            panic!("expected DECLARE");
        };
        assert_eq!(declare.declarations.len(), 2);
        assert!(declare.declarations[0].value.is_some());
        assert!(declare.declarations[1].value.is_none());
    }

    #[test]
    fn declare_table_variable() {
        let Statement::DeclareTableVariable(declare) =
            stmt("DECLARE @t TABLE (id INT NOT NULL, name NVARCHAR(10))")
        else {
            panic!("expected DECLARE TABLE");
        };
        assert_eq!(declare.variable.name, "@t");
        assert_eq!(declare.columns.len(), 2);
    }

    #[test]
    fn set_variable_compound_assignment() {
        let Statement::SetVariable(set) = stmt("SET @total += 5") else {
            panic!("expected SET");
        };
        assert_eq!(set.assignment_kind, AssignmentKind::AddEquals);
    }

    #[test]
    fn set_session_options() {
        let Statement::SetOnOff(set) = stmt("SET NOCOUNT, XACT_ABORT ON") else {
            panic!("expected SET ON/OFF");
        };
        assert!(set.on);
        assert_eq!(set.options.len(), 2);
    }

    #[test]
    fn set_transaction_isolation_level() {
        let Statement::SetTransactionIsolationLevel(level) =
            stmt("SET TRANSACTION ISOLATION LEVEL READ UNCOMMITTED")
        else {
            panic!("expected isolation level");
        };
        assert_eq!(level, IsolationLevel::ReadUncommitted);
    }

    #[test]
    fn execute_procedure_with_parameters() {
        let Statement::Execute(exec) =
            stmt("EXEC @rc = dbo.load_user @id = 7, @name OUTPUT")
        else {
            panic!("expected EXEC");
        };
        let ExecuteTarget::Procedure {
            return_variable,
            name,
        } = &exec.target
        else {
            panic!("expected a procedure target");
        };
        assert!(return_variable.is_some());
        assert_eq!(name.identifiers.len(), 2);
        assert_eq!(exec.parameters.len(), 2);
        assert!(exec.parameters[0].variable.is_some());
        assert!(exec.parameters[1].output);
    }

    #[test]
    fn execute_string_command() {
        let Statement::Execute(exec) = stmt("EXEC ('SELECT ' + @cols)") else {
            panic!("expected EXEC");
        };
        let ExecuteTarget::StringCommand(parts) = &exec.target else {
            panic!("expected a string command");
        };
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn throw_with_and_without_arguments() {
        assert!(matches!(stmt("THROW"), Statement::Throw(None)));
        let Statement::Throw(Some(throw)) = stmt("THROW 50000, 'bad', 1") else {
            panic!("expected THROW with arguments");
        };
        assert!(matches!(
            throw.message,
            tsql_ast::ScalarExpression::Literal(..)
        ));
    }

    #[test]
    fn raiserror_with_options() {
        let Statement::Raiserror(raise) =
            stmt("RAISERROR ('pct %d', 0, 1, @pct) WITH NOWAIT")
        else {
            panic!("expected RAISERROR");
        };
        assert_eq!(raise.parameters.len(), 1);
        assert_eq!(raise.options.len(), 1);
    }

    #[test]
    fn waitfor_delay() {
        let Statement::Waitfor(waitfor) = stmt("WAITFOR DELAY '00:00:05'") else {
            panic!("expected WAITFOR");
        };
        assert_eq!(waitfor.kind, WaitforKind::Delay);
    }

    #[test]
    fn labels_and_goto() {
        let script = parse("retry:\nSELECT 1\nGOTO retry").expect("script should parse");
        let statements = &script.batches[0].statements;
        assert_eq!(statements[0], Statement::Label("retry".into()));
        assert_eq!(statements[2], Statement::Goto("retry".into()));
    }

    #[test]
    fn transaction_statements() {
        let script = parse(
            "BEGIN TRAN outer_tx; SAVE TRANSACTION sp1; ROLLBACK TRAN sp1; COMMIT",
        )
        .expect("script should parse");
        let statements = &script.batches[0].statements;
        assert!(matches!(&statements[0], Statement::BeginTransaction(Some(_))));
        assert!(matches!(&statements[1], Statement::SaveTransaction(_)));
        assert!(matches!(&statements[2], Statement::RollbackTransaction(Some(_))));
        assert!(matches!(&statements[3], Statement::CommitTransaction(None)));
    }

    #[test]
    fn return_with_value() {
        assert!(matches!(stmt("RETURN"), Statement::Return(None)));
        assert!(matches!(stmt("RETURN 1"), Statement::Return(Some(_))));
    }

    #[test]
    fn session_statements() {
        assert!(matches!(stmt("PRINT 'hello'"), Statement::Print(_)));
        let Statement::Use(db) = stmt("USE tempdb") else {
            panic!("expected USE");
        };
        assert_eq!(db.value, "tempdb");
        let Statement::TruncateTable(name) = stmt("TRUNCATE TABLE dbo.staging") else {
            panic!("expected TRUNCATE");
        };
        assert_eq!(name.identifiers.len(), 2);
    }
}
