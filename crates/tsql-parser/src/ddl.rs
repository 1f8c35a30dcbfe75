//! DDL statements: CREATE/ALTER/DROP for tables, views, procedures,
//! functions, indexes, schemas, and sequences, plus GRANT/DENY/REVOKE.

use tsql_ast::{
    AlterTableAction, AlterTableStatement, ColumnDefinition, CreateFunctionStatement,
    CreateIndexStatement, CreateProcedureStatement, CreateSchemaStatement,
    CreateSequenceStatement, CreateTableStatement, CreateViewStatement, DdlAction,
    DropObjectType, DropStatement, FunctionBody, FunctionReturnType, Identifier,
    IdentityOptions, IndexColumn, ProcedureParameter, SecurityAction,
    SecurityStatement, SequenceOption, SortOrder, Statement, TableConstraint,
    TableConstraintKind,
};

use crate::parser::{PResult, Parser};
use crate::token::TokenKind;

impl Parser {
    // -- CREATE dispatch ----------------------------------------------------

    pub(crate) fn parse_create_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwCreate, "CREATE")?;
        let action = if self.eat(&TokenKind::KwOr) {
            self.expect(&TokenKind::KwAlter, "ALTER")?;
            DdlAction::CreateOrAlter
        } else {
            DdlAction::Create
        };
        match self.peek_kind() {
            TokenKind::KwTable => self.parse_create_table(),
            TokenKind::KwView => self.parse_create_view(action),
            TokenKind::KwProc | TokenKind::KwProcedure => {
                self.parse_create_procedure(action)
            }
            TokenKind::KwFunction => self.parse_create_function(action),
            TokenKind::KwUnique
            | TokenKind::KwClustered
            | TokenKind::KwNonclustered
            | TokenKind::KwIndex => self.parse_create_index(),
            TokenKind::KwSchema => self.parse_create_schema(),
            TokenKind::KwSequence => self.parse_create_sequence(),
            _ => Err(self.err_expected("a creatable object kind")),
        }
    }

    pub(crate) fn parse_alter_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwAlter, "ALTER")?;
        match self.peek_kind() {
            TokenKind::KwTable => self.parse_alter_table(),
            TokenKind::KwView => self.parse_create_view(DdlAction::Alter),
            TokenKind::KwProc | TokenKind::KwProcedure => {
                self.parse_create_procedure(DdlAction::Alter)
            }
            TokenKind::KwFunction => self.parse_create_function(DdlAction::Alter),
            _ => Err(self.err_expected("TABLE, VIEW, PROCEDURE, or FUNCTION")),
        }
    }

    // -- tables -------------------------------------------------------------

    fn parse_create_table(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwTable, "TABLE")?;
        let name = self.parse_schema_object_name()?;
        self.expect(&TokenKind::LParen, "'('")?;
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        loop {
            if self.starts_table_constraint() {
                constraints.push(self.parse_table_constraint()?);
            } else {
                columns.push(self.parse_column_definition()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(Statement::CreateTable(Box::new(CreateTableStatement {
            name,
            columns,
            constraints,
        })))
    }

    fn starts_table_constraint(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::KwConstraint
                | TokenKind::KwPrimary
                | TokenKind::KwForeign
                | TokenKind::KwCheck
                | TokenKind::KwUnique
        )
    }

    /// A column definition as used by CREATE TABLE, `DECLARE @t TABLE`, and
    /// the PREDICT schema clause.
    pub(crate) fn parse_column_definition(&mut self) -> PResult<ColumnDefinition> {
        let name = self.parse_name_part()?;
        let data_type = self.parse_data_type()?;
        let mut nullable = None;
        let mut identity = None;
        let mut default_value = None;
        let mut primary_key = false;
        let mut unique = false;
        loop {
            match self.peek_kind() {
                TokenKind::KwNot if *self.peek_nth(1) == TokenKind::KwNull => {
                    self.advance();
                    self.advance();
                    nullable = Some(false);
                }
                TokenKind::KwNull => {
                    self.advance();
                    nullable = Some(true);
                }
                TokenKind::KwIdentity => {
                    self.advance();
                    let mut seed = None;
                    let mut increment = None;
                    if self.eat(&TokenKind::LParen) {
                        seed = Some(self.parse_scalar_expression()?);
                        self.expect(&TokenKind::Comma, "','")?;
                        increment = Some(self.parse_scalar_expression()?);
                        self.expect(&TokenKind::RParen, "')'")?;
                    }
                    identity = Some(IdentityOptions { seed, increment });
                }
                TokenKind::KwDefault => {
                    self.advance();
                    default_value = Some(self.parse_scalar_expression()?);
                }
                TokenKind::KwPrimary => {
                    self.advance();
                    self.expect(&TokenKind::KwKey, "KEY")?;
                    self.eat(&TokenKind::KwClustered);
                    self.eat(&TokenKind::KwNonclustered);
                    primary_key = true;
                }
                TokenKind::KwUnique => {
                    self.advance();
                    unique = true;
                }
                // An inline constraint name applies to whatever follows it.
                TokenKind::KwConstraint => {
                    self.advance();
                    self.parse_identifier("a constraint name")?;
                }
                _ => break,
            }
        }
        Ok(ColumnDefinition {
            name,
            data_type,
            nullable,
            identity,
            default_value,
            primary_key,
            unique,
        })
    }

    fn parse_table_constraint(&mut self) -> PResult<TableConstraint> {
        let name = if self.eat(&TokenKind::KwConstraint) {
            Some(self.parse_identifier("a constraint name")?)
        } else {
            None
        };
        let kind = match self.peek_kind() {
            TokenKind::KwPrimary => {
                self.advance();
                self.expect(&TokenKind::KwKey, "KEY")?;
                self.eat(&TokenKind::KwClustered);
                self.eat(&TokenKind::KwNonclustered);
                TableConstraintKind::PrimaryKey {
                    columns: self.parse_key_column_list()?,
                }
            }
            TokenKind::KwUnique => {
                self.advance();
                self.eat(&TokenKind::KwClustered);
                self.eat(&TokenKind::KwNonclustered);
                TableConstraintKind::Unique {
                    columns: self.parse_key_column_list()?,
                }
            }
            TokenKind::KwForeign => {
                self.advance();
                self.expect(&TokenKind::KwKey, "KEY")?;
                let columns = self.parse_key_column_list()?;
                self.expect(&TokenKind::KwReferences, "REFERENCES")?;
                let references = self.parse_schema_object_name()?;
                let mut referenced_columns = Vec::new();
                if self.check(&TokenKind::LParen) {
                    referenced_columns = self.parse_key_column_list()?;
                }
                TableConstraintKind::ForeignKey {
                    columns,
                    references,
                    referenced_columns,
                }
            }
            TokenKind::KwCheck => {
                self.advance();
                self.expect(&TokenKind::LParen, "'('")?;
                let condition = self.parse_boolean_expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                TableConstraintKind::Check(condition)
            }
            _ => return Err(self.err_expected("a table constraint")),
        };
        Ok(TableConstraint { name, kind })
    }

    /// `(col [ASC|DESC] [, ...])` — sort markers are accepted and dropped.
    fn parse_key_column_list(&mut self) -> PResult<Vec<Identifier>> {
        self.expect(&TokenKind::LParen, "'('")?;
        let columns = self.parse_comma_sep(|p| {
            let column = p.parse_name_part()?;
            if !p.eat(&TokenKind::KwAsc) {
                p.eat(&TokenKind::KwDesc);
            }
            Ok(column)
        })?;
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(columns)
    }

    fn parse_alter_table(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwTable, "TABLE")?;
        let name = self.parse_schema_object_name()?;
        let action = match self.peek_kind() {
            TokenKind::KwAdd => {
                self.advance();
                if self.starts_table_constraint() {
                    AlterTableAction::AddConstraint(self.parse_table_constraint()?)
                } else {
                    AlterTableAction::AddColumn(self.parse_column_definition()?)
                }
            }
            TokenKind::KwDrop => {
                self.advance();
                self.expect(&TokenKind::KwColumn, "COLUMN")?;
                AlterTableAction::DropColumn(self.parse_name_part()?)
            }
            TokenKind::KwAlter => {
                self.advance();
                self.expect(&TokenKind::KwColumn, "COLUMN")?;
                AlterTableAction::AlterColumn(self.parse_column_definition()?)
            }
            _ => return Err(self.err_expected("ADD, DROP, or ALTER")),
        };
        Ok(Statement::AlterTable(Box::new(AlterTableStatement {
            name,
            action,
        })))
    }

    // -- views --------------------------------------------------------------

    fn parse_create_view(&mut self, action: DdlAction) -> PResult<Statement> {
        self.expect(&TokenKind::KwView, "VIEW")?;
        let name = self.parse_schema_object_name()?;
        let mut columns = Vec::new();
        if self.eat(&TokenKind::LParen) {
            columns = self.parse_comma_sep(|p| p.parse_identifier("a column name"))?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        // View attributes (SCHEMABINDING and friends) are accepted and
        // dropped.
        if self.eat(&TokenKind::KwWith) {
            self.parse_comma_sep(|p| p.parse_identifier("a view attribute"))?;
        }
        self.expect(&TokenKind::KwAs, "AS")?;
        let query = self.parse_query_expression()?;
        Ok(Statement::CreateView(Box::new(CreateViewStatement {
            action,
            name,
            columns,
            query,
        })))
    }

    // -- procedures and functions -------------------------------------------

    fn parse_create_procedure(&mut self, action: DdlAction) -> PResult<Statement> {
        self.advance();
        let name = self.parse_schema_object_name()?;
        let parenthesized = self.eat(&TokenKind::LParen);
        let mut parameters = Vec::new();
        if self.peek_is_variable() {
            parameters = self.parse_comma_sep(|p| p.parse_procedure_parameter())?;
        }
        if parenthesized {
            self.expect(&TokenKind::RParen, "')'")?;
        }
        self.expect(&TokenKind::KwAs, "AS")?;
        let body = self.parse_module_body()?;
        Ok(Statement::CreateProcedure(Box::new(
            CreateProcedureStatement {
                action,
                name,
                parameters,
                body,
            },
        )))
    }

    fn parse_procedure_parameter(&mut self) -> PResult<ProcedureParameter> {
        let variable = self.parse_variable_reference()?;
        self.eat(&TokenKind::KwAs);
        let data_type = self.parse_data_type()?;
        let default_value = if self.eat(&TokenKind::Eq) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        let mut output = self.eat(&TokenKind::KwOutput);
        if !output
            && matches!(self.peek_kind(), TokenKind::Ident(s) if s.eq_ignore_ascii_case("OUT"))
        {
            self.advance();
            output = true;
        }
        // READONLY on table-valued parameters.
        if matches!(self.peek_kind(), TokenKind::Ident(s) if s.eq_ignore_ascii_case("READONLY"))
        {
            self.advance();
        }
        Ok(ProcedureParameter {
            variable,
            data_type,
            default_value,
            output,
        })
    }

    /// Statements to the end of the batch; a module body owns everything up
    /// to the next `GO`.
    fn parse_module_body(&mut self) -> PResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.check(&TokenKind::Eof) || self.check(&TokenKind::KwGo) {
                return Ok(statements);
            }
            statements.push(self.parse_statement()?);
        }
    }

    fn parse_create_function(&mut self, action: DdlAction) -> PResult<Statement> {
        self.expect(&TokenKind::KwFunction, "FUNCTION")?;
        let name = self.parse_schema_object_name()?;
        self.expect(&TokenKind::LParen, "'('")?;
        let mut parameters = Vec::new();
        if self.peek_is_variable() {
            parameters = self.parse_comma_sep(|p| p.parse_procedure_parameter())?;
        }
        self.expect(&TokenKind::RParen, "')'")?;
        self.expect(&TokenKind::KwReturns, "RETURNS")?;

        if self.peek_is_variable() {
            // RETURNS @t TABLE (...) — multi-statement table-valued.
            let variable = self.parse_variable_reference()?;
            self.expect(&TokenKind::KwTable, "TABLE")?;
            self.expect(&TokenKind::LParen, "'('")?;
            let columns = self.parse_comma_sep(|p| p.parse_column_definition())?;
            self.expect(&TokenKind::RParen, "')'")?;
            self.expect(&TokenKind::KwAs, "AS")?;
            let body = self.parse_begin_end_body()?;
            return Ok(Statement::CreateFunction(Box::new(
                CreateFunctionStatement {
                    action,
                    name,
                    parameters,
                    return_type: FunctionReturnType::TableVariable { variable, columns },
                    body: FunctionBody::Statements(body),
                },
            )));
        }
        if self.eat(&TokenKind::KwTable) {
            // RETURNS TABLE — inline table-valued.
            self.expect(&TokenKind::KwAs, "AS")?;
            self.expect(&TokenKind::KwReturn, "RETURN")?;
            let query = if self.eat(&TokenKind::LParen) {
                let query = self.parse_query_expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                query
            } else {
                self.parse_query_expression()?
            };
            return Ok(Statement::CreateFunction(Box::new(
                CreateFunctionStatement {
                    action,
                    name,
                    parameters,
                    return_type: FunctionReturnType::Table,
                    body: FunctionBody::Return(query),
                },
            )));
        }
        let return_type = FunctionReturnType::Scalar(self.parse_data_type()?);
        self.expect(&TokenKind::KwAs, "AS")?;
        let body = self.parse_begin_end_body()?;
        Ok(Statement::CreateFunction(Box::new(CreateFunctionStatement {
            action,
            name,
            parameters,
            return_type,
            body: FunctionBody::Statements(body),
        })))
    }

    fn parse_begin_end_body(&mut self) -> PResult<Vec<Statement>> {
        self.expect(&TokenKind::KwBegin, "BEGIN")?;
        let statements = self.parse_statement_list_until_end()?;
        self.expect(&TokenKind::KwEnd, "END")?;
        Ok(statements)
    }

    // -- indexes, schemas, sequences ----------------------------------------

    fn parse_create_index(&mut self) -> PResult<Statement> {
        let unique = self.eat(&TokenKind::KwUnique);
        let clustered = if self.eat(&TokenKind::KwClustered) {
            Some(true)
        } else if self.eat(&TokenKind::KwNonclustered) {
            Some(false)
        } else {
            None
        };
        self.expect(&TokenKind::KwIndex, "INDEX")?;
        let name = self.parse_identifier("an index name")?;
        self.expect(&TokenKind::KwOn, "ON")?;
        let table = self.parse_schema_object_name()?;
        self.expect(&TokenKind::LParen, "'('")?;
        let columns = self.parse_comma_sep(|p| {
            let name = p.parse_name_part()?;
            let sort_order = if p.eat(&TokenKind::KwAsc) {
                SortOrder::Ascending
            } else if p.eat(&TokenKind::KwDesc) {
                SortOrder::Descending
            } else {
                SortOrder::NotSpecified
            };
            Ok(IndexColumn { name, sort_order })
        })?;
        self.expect(&TokenKind::RParen, "')'")?;
        let mut include_columns = Vec::new();
        if self.eat(&TokenKind::KwInclude) {
            self.expect(&TokenKind::LParen, "'('")?;
            include_columns = self.parse_comma_sep(|p| p.parse_name_part())?;
            self.expect(&TokenKind::RParen, "')'")?;
        }
        let filter = if self.eat(&TokenKind::KwWhere) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        Ok(Statement::CreateIndex(Box::new(CreateIndexStatement {
            unique,
            clustered,
            name,
            table,
            columns,
            include_columns,
            filter,
        })))
    }

    fn parse_create_schema(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwSchema, "SCHEMA")?;
        let name = self.parse_identifier("a schema name")?;
        let authorization = if self.eat(&TokenKind::KwAuthorization) {
            Some(self.parse_identifier("an owner name")?)
        } else {
            None
        };
        Ok(Statement::CreateSchema(CreateSchemaStatement {
            name,
            authorization,
        }))
    }

    fn parse_create_sequence(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwSequence, "SEQUENCE")?;
        let name = self.parse_schema_object_name()?;
        let data_type = if self.eat(&TokenKind::KwAs) {
            Some(self.parse_data_type()?)
        } else {
            None
        };
        let mut options = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::KwStart => {
                    self.advance();
                    self.expect(&TokenKind::KwWith, "WITH")?;
                    options.push(SequenceOption::StartWith(self.parse_scalar_expression()?));
                }
                TokenKind::KwIncrement => {
                    self.advance();
                    self.expect(&TokenKind::KwBy, "BY")?;
                    options
                        .push(SequenceOption::IncrementBy(self.parse_scalar_expression()?));
                }
                TokenKind::KwCycle => {
                    self.advance();
                    options.push(SequenceOption::Cycle(true));
                }
                TokenKind::KwCache => {
                    self.advance();
                    let size = if matches!(self.peek_kind(), TokenKind::Integer(_)) {
                        Some(self.parse_scalar_expression()?)
                    } else {
                        None
                    };
                    options.push(SequenceOption::Cache(size));
                }
                TokenKind::Ident(s) if s.eq_ignore_ascii_case("MINVALUE") => {
                    self.advance();
                    options.push(SequenceOption::MinValue(Some(
                        self.parse_scalar_expression()?,
                    )));
                }
                TokenKind::Ident(s) if s.eq_ignore_ascii_case("MAXVALUE") => {
                    self.advance();
                    options.push(SequenceOption::MaxValue(Some(
                        self.parse_scalar_expression()?,
                    )));
                }
                TokenKind::Ident(s) if s.eq_ignore_ascii_case("NO") => {
                    self.advance();
                    let option = match self.peek_kind() {
                        TokenKind::KwCycle => SequenceOption::Cycle(false),
                        TokenKind::KwCache => SequenceOption::Cache(None),
                        TokenKind::Ident(w) if w.eq_ignore_ascii_case("MINVALUE") => {
                            SequenceOption::MinValue(None)
                        }
                        TokenKind::Ident(w) if w.eq_ignore_ascii_case("MAXVALUE") => {
                            SequenceOption::MaxValue(None)
                        }
                        _ => {
                            return Err(self.err_expected(
                                "MINVALUE, MAXVALUE, CYCLE, or CACHE",
                            ))
                        }
                    };
                    self.advance();
                    options.push(option);
                }
                _ => break,
            }
        }
        Ok(Statement::CreateSequence(Box::new(CreateSequenceStatement {
            name,
            data_type,
            options,
        })))
    }

    // -- DROP ---------------------------------------------------------------

    pub(crate) fn parse_drop_statement(&mut self) -> PResult<Statement> {
        self.expect(&TokenKind::KwDrop, "DROP")?;
        let object_type = match self.peek_kind() {
            TokenKind::KwTable => DropObjectType::Table,
            TokenKind::KwView => DropObjectType::View,
            TokenKind::KwProc | TokenKind::KwProcedure => DropObjectType::Procedure,
            TokenKind::KwFunction => DropObjectType::Function,
            TokenKind::KwIndex => DropObjectType::Index,
            TokenKind::KwSchema => DropObjectType::Schema,
            TokenKind::KwSequence => DropObjectType::Sequence,
            _ => return Err(self.err_expected("a droppable object kind")),
        };
        self.advance();
        let if_exists = if self.check(&TokenKind::KwIf) {
            self.advance();
            self.expect(&TokenKind::KwExists, "EXISTS")?;
            true
        } else {
            false
        };
        let mut names = self.parse_comma_sep(|p| p.parse_schema_object_name())?;
        // `DROP INDEX name ON table` carries the table as a second name.
        if object_type == DropObjectType::Index && self.eat(&TokenKind::KwOn) {
            names.push(self.parse_schema_object_name()?);
        }
        Ok(Statement::Drop(DropStatement {
            object_type,
            if_exists,
            names,
        }))
    }

    // -- security -----------------------------------------------------------

    pub(crate) fn parse_security_statement(&mut self) -> PResult<Statement> {
        let action = match self.peek_kind() {
            TokenKind::KwGrant => SecurityAction::Grant,
            TokenKind::KwDeny => SecurityAction::Deny,
            TokenKind::KwRevoke => SecurityAction::Revoke,
            _ => return Err(self.err_expected("GRANT, DENY, or REVOKE")),
        };
        self.advance();
        let permissions = self.parse_comma_sep(|p| p.parse_permission())?;
        let securable = if self.eat(&TokenKind::KwOn) {
            // An optional securable class: `OBJECT::dbo.t`, `SCHEMA::dbo`.
            if *self.peek_nth(1) == TokenKind::DoubleColon {
                self.advance();
                self.advance();
            }
            Some(self.parse_schema_object_name()?)
        } else {
            None
        };
        if !self.eat(&TokenKind::KwTo) {
            self.expect(&TokenKind::KwFrom, "TO or FROM")?;
        }
        let principals = self.parse_comma_sep(|p| p.parse_identifier("a principal"))?;
        let with_grant_option = if self.check(&TokenKind::KwWith) {
            self.advance();
            self.expect(&TokenKind::KwGrant, "GRANT")?;
            self.expect(&TokenKind::KwOption, "OPTION")?;
            true
        } else {
            false
        };
        Ok(Statement::Security(Box::new(SecurityStatement {
            action,
            permissions,
            securable,
            principals,
            with_grant_option,
        })))
    }

    /// A possibly multi-word permission name (`ALTER ANY SCHEMA`), read up
    /// to the next comma or clause keyword.
    fn parse_permission(&mut self) -> PResult<String> {
        let mut words: Vec<String> = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::KwOn | TokenKind::KwTo | TokenKind::KwFrom => break,
                TokenKind::Ident(s) if !s.starts_with('@') && !s.starts_with('$') => {
                    words.push(s.to_ascii_uppercase());
                    self.advance();
                }
                kind => match kind.kw_to_str() {
                    Some(word) => {
                        words.push(word.to_owned());
                        self.advance();
                    }
                    None => break,
                },
            }
        }
        if words.is_empty() {
            return Err(self.err_expected("a permission"));
        }
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use tsql_ast::{
        AlterTableAction, DdlAction, DropObjectType, FunctionBody, FunctionReturnType,
        SecurityAction, SequenceOption, Statement, TableConstraintKind,
    };

    use crate::parser::parse;

    fn stmt(src: &str) -> Statement {
        let script = parse(src).expect("script should parse");
        script.batches[0].statements[0].clone()
    }

    #[test]
    fn create_table_with_columns_and_constraints() {
        let Statement::CreateTable(table) = stmt(
            "CREATE TABLE dbo.users (\
             id INT IDENTITY(1, 1) NOT NULL PRIMARY KEY,\
             name NVARCHAR(100) NOT NULL,\
             created DATETIME2 DEFAULT SYSUTCDATETIME(),\
             CONSTRAINT uq_name UNIQUE (name),\
             FOREIGN KEY (group_id) REFERENCES dbo.groups (id))",
        ) else {
            panic!("expected CREATE TABLE");
        };
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.constraints.len(), 2);
        let id = &table.columns[0];
        assert!(id.primary_key);
        assert_eq!(id.nullable, Some(false));
        assert!(id.identity.is_some());
        assert!(table.columns[2].default_value.is_some());
        assert!(matches!(
            table.constraints[1].kind,
            TableConstraintKind::ForeignKey { .. }
        ));
    }

    #[test]
    fn create_or_alter_view() {
        let Statement::CreateView(view) =
            stmt("CREATE OR ALTER VIEW dbo.v (a) AS SELECT a FROM t")
        else {
            panic!("expected CREATE VIEW");
        };
        assert_eq!(view.action, DdlAction::CreateOrAlter);
        assert_eq!(view.columns.len(), 1);
    }

    #[test]
    fn alter_view_reuses_the_view_grammar() {
        let Statement::CreateView(view) = stmt("ALTER VIEW dbo.v AS SELECT 1") else {
            panic!("expected view statement");
        };
        assert_eq!(view.action, DdlAction::Alter);
    }

    #[test]
    fn create_procedure_with_parameters() {
        let Statement::CreateProcedure(proc) = stmt(
            "CREATE PROCEDURE dbo.audit @user NVARCHAR(50), @count INT = 0 OUTPUT AS \
             BEGIN SELECT @user END",
        ) else {
            panic!("expected CREATE PROCEDURE");
        };
        assert_eq!(proc.parameters.len(), 2);
        assert!(proc.parameters[1].output);
        assert!(proc.parameters[1].default_value.is_some());
        assert_eq!(proc.body.len(), 1);
    }

    #[test]
    fn create_scalar_function() {
        let Statement::CreateFunction(func) = stmt(
            "CREATE FUNCTION dbo.double_it (@x INT) RETURNS INT AS \
             BEGIN RETURN @x * 2 END",
        ) else {
            panic!("expected CREATE FUNCTION");
        };
        assert!(matches!(func.return_type, FunctionReturnType::Scalar(_)));
        assert!(matches!(func.body, FunctionBody::Statements(_)));
    }

    #[test]
    fn create_inline_table_function() {
        let Statement::CreateFunction(func) = stmt(
            "CREATE FUNCTION dbo.active (@since DATETIME) RETURNS TABLE AS \
             RETURN (SELECT id FROM users WHERE seen >= @since)",
        ) else {
            panic!("expected CREATE FUNCTION");
        };
        assert!(matches!(func.return_type, FunctionReturnType::Table));
        assert!(matches!(func.body, FunctionBody::Return(_)));
    }

    #[test]
    fn create_index_with_include_and_filter() {
        let Statement::CreateIndex(index) = stmt(
            "CREATE UNIQUE NONCLUSTERED INDEX ix_users_email ON dbo.users (email ASC) \
             INCLUDE (name) WHERE deleted = 0",
        ) else {
            panic!("expected CREATE INDEX");
        };
        assert!(index.unique);
        assert_eq!(index.clustered, Some(false));
        assert_eq!(index.include_columns.len(), 1);
        assert!(index.filter.is_some());
    }

    #[test]
    fn create_schema_with_authorization() {
        let Statement::CreateSchema(schema) =
            stmt("CREATE SCHEMA reporting AUTHORIZATION dbo")
        else {
            panic!("expected CREATE SCHEMA");
        };
        assert_eq!(schema.name.value, "reporting");
        assert!(schema.authorization.is_some());
    }

    #[test]
    fn create_sequence_options() {
        let Statement::CreateSequence(sequence) = stmt(
            "CREATE SEQUENCE dbo.order_ids AS BIGINT START WITH 1 INCREMENT BY 1 \
             MINVALUE 1 NO MAXVALUE CACHE 50 NO CYCLE",
        ) else {
            panic!("expected CREATE SEQUENCE");
        };
        assert!(sequence.data_type.is_some());
        assert_eq!(sequence.options.len(), 6);
        assert!(matches!(sequence.options[3], SequenceOption::MaxValue(None)));
        assert!(matches!(sequence.options[5], SequenceOption::Cycle(false)));
    }

    #[test]
    fn alter_table_actions() {
        let Statement::AlterTable(alter) = stmt("ALTER TABLE t ADD flag BIT NOT NULL")
        else {
            panic!("expected ALTER TABLE");
        };
        assert!(matches!(alter.action, AlterTableAction::AddColumn(_)));

        let Statement::AlterTable(alter) = stmt("ALTER TABLE t DROP COLUMN flag") else {
            panic!("expected ALTER TABLE");
        };
        assert!(matches!(alter.action, AlterTableAction::DropColumn(_)));

        let Statement::AlterTable(alter) =
            stmt("ALTER TABLE t ADD CONSTRAINT pk_t PRIMARY KEY (id)")
        else {
            panic!("expected ALTER TABLE");
        };
        assert!(matches!(alter.action, AlterTableAction::AddConstraint(_)));
    }

    #[test]
    fn drop_if_exists_with_multiple_names() {
        let Statement::Drop(drop) = stmt("DROP TABLE IF EXISTS dbo.a, dbo.b") else {
            panic!("expected DROP");
        };
        assert_eq!(drop.object_type, DropObjectType::Table);
        assert!(drop.if_exists);
        assert_eq!(drop.names.len(), 2);
    }

    #[test]
    fn drop_index_records_the_table() {
        let Statement::Drop(drop) = stmt("DROP INDEX ix_a ON dbo.t") else {
            panic!("expected DROP");
        };
        assert_eq!(drop.object_type, DropObjectType::Index);
        assert_eq!(drop.names.len(), 2);
    }

    #[test]
    fn grant_with_grant_option() {
        let Statement::Security(grant) = stmt(
            "GRANT SELECT, ALTER ANY SCHEMA ON dbo.users TO reporting_role WITH GRANT OPTION",
        ) else {
            panic!("expected GRANT");
        };
        assert_eq!(grant.action, SecurityAction::Grant);
        assert_eq!(grant.permissions, vec!["SELECT", "ALTER ANY SCHEMA"]);
        assert!(grant.securable.is_some());
        assert!(grant.with_grant_option);
    }

    #[test]
    fn revoke_uses_from() {
        let Statement::Security(revoke) = stmt("REVOKE SELECT ON t FROM app_user")
        else {
            panic!("expected REVOKE");
        };
        assert_eq!(revoke.action, SecurityAction::Revoke);
        assert_eq!(revoke.principals.len(), 1);
    }
}
