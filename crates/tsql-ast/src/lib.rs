//! Abstract syntax tree node types for the T-SQL dialect.
//!
//! This crate defines the complete AST type hierarchy produced by
//! `tsql-parser`. Every parsed script is a [`Script`] of [`Batch`]es, each a
//! sequence of [`Statement`]s. Scalar expression nodes carry a [`Span`] for
//! error reporting and source mapping.
//!
//! All node families are closed enums so that consumers can match
//! exhaustively and the compiler flags new variants.

use std::fmt;

// ---------------------------------------------------------------------------
// Span — source location tracking
// ---------------------------------------------------------------------------

/// A byte-offset range into the original SQL source text.
///
/// Expression nodes carry a `Span` so diagnostics can point back at the exact
/// source location.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character (inclusive).
    pub start: u32,
    /// Byte offset one past the last character (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from start (inclusive) to end (exclusive) byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-length span at position 0, used as a placeholder.
    pub const ZERO: Self = Self { start: 0, end: 0 };

    /// Merge two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Identifiers and multi-part names
// ---------------------------------------------------------------------------

/// How an identifier was quoted in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuoteType {
    /// Bare identifier.
    #[default]
    NotQuoted,
    /// `[name]` with `]]` escaping a literal `]`.
    SquareBracket,
    /// `"name"` with `""` escaping a literal `"`.
    DoubleQuote,
}

/// A single identifier with its quoting style.
///
/// The value is the unescaped literal. An empty value denotes an omitted
/// component of a multi-part name (`db..table`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
    pub quote_type: QuoteType,
}

impl Identifier {
    /// Create an unquoted identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_type: QuoteType::NotQuoted,
        }
    }

    /// Create an identifier with an explicit quote type.
    #[must_use]
    pub fn quoted(value: impl Into<String>, quote_type: QuoteType) -> Self {
        Self {
            value: value.into(),
            quote_type,
        }
    }

    /// The empty identifier, denoting an omitted name part.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_type {
            QuoteType::NotQuoted => f.write_str(&self.value),
            QuoteType::SquareBracket => write!(f, "[{}]", self.value.replace(']', "]]")),
            QuoteType::DoubleQuote => write!(f, "\"{}\"", self.value.replace('"', "\"\"")),
        }
    }
}

/// An ordered, dot-separated sequence of identifiers.
///
/// Parts may be empty: T-SQL permits `db..table` meaning `db.<omitted>.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MultiPartIdentifier {
    pub identifiers: Vec<Identifier>,
}

impl MultiPartIdentifier {
    #[must_use]
    pub fn new(identifiers: Vec<Identifier>) -> Self {
        Self { identifiers }
    }

    /// Number of parts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.identifiers.len()
    }

    /// The last (rightmost) part, if any.
    #[must_use]
    pub fn base(&self) -> Option<&Identifier> {
        self.identifiers.last()
    }
}

impl fmt::Display for MultiPartIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.identifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// A 1- to 4-part dotted name denoting a schema object
/// (`[server.][database.][schema.]object`).
///
/// Parts are assigned positionally right-to-left; the base identifier is
/// always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaObjectName {
    pub identifiers: Vec<Identifier>,
}

impl SchemaObjectName {
    #[must_use]
    pub fn new(identifiers: Vec<Identifier>) -> Self {
        debug_assert!(!identifiers.is_empty() && identifiers.len() <= 4);
        Self { identifiers }
    }

    /// Number of parts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.identifiers.len()
    }

    /// The object name itself. Always present.
    #[must_use]
    pub fn base_identifier(&self) -> &Identifier {
        self.identifiers
            .last()
            .expect("SchemaObjectName has at least one part")
    }

    /// The schema part, if the name has two or more parts.
    #[must_use]
    pub fn schema_identifier(&self) -> Option<&Identifier> {
        let n = self.identifiers.len();
        (n >= 2).then(|| &self.identifiers[n - 2])
    }

    /// The database part, if the name has three or more parts.
    #[must_use]
    pub fn database_identifier(&self) -> Option<&Identifier> {
        let n = self.identifiers.len();
        (n >= 3).then(|| &self.identifiers[n - 3])
    }

    /// The linked-server part, if the name has four parts.
    #[must_use]
    pub fn server_identifier(&self) -> Option<&Identifier> {
        (self.identifiers.len() == 4).then(|| &self.identifiers[0])
    }
}

impl fmt::Display for SchemaObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.identifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Either an identifier or a literal, for positions that accept both
/// (table hint arguments, some option values).
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierOrValue {
    Identifier(Identifier),
    Value(Literal),
}

// ---------------------------------------------------------------------------
// Script and batches
// ---------------------------------------------------------------------------

/// A parsed T-SQL script: the root of every parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub batches: Vec<Batch>,
}

/// A sequence of statements delimited by `GO`.
///
/// The optional `go_count` preserves the repeat count of a trailing `GO n`
/// separator; the parser records it without acting on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    pub statements: Vec<Statement>,
    pub go_count: Option<u64>,
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// A single top-level T-SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // DML
    Select(Box<SelectStatement>),
    Insert(Box<InsertStatement>),
    Update(Box<UpdateStatement>),
    Delete(Box<DeleteStatement>),
    Merge(Box<MergeStatement>),
    TruncateTable(SchemaObjectName),

    // Variables
    Declare(DeclareVariableStatement),
    DeclareTableVariable(Box<DeclareTableVariableStatement>),
    SetVariable(Box<SetVariableStatement>),
    SetOnOff(SetOnOffStatement),
    SetTransactionIsolationLevel(IsolationLevel),

    // Control of flow
    If(Box<IfStatement>),
    While(Box<WhileStatement>),
    Block(BeginEndBlockStatement),
    TryCatch(Box<TryCatchStatement>),
    Label(String),
    Goto(String),
    Break,
    Continue,
    Return(Option<ScalarExpression>),
    Waitfor(Box<WaitforStatement>),

    // Transactions
    BeginTransaction(Option<Identifier>),
    CommitTransaction(Option<Identifier>),
    RollbackTransaction(Option<Identifier>),
    SaveTransaction(Identifier),

    // Execution and messages
    Execute(Box<ExecuteStatement>),
    Print(ScalarExpression),
    Throw(Option<Box<ThrowStatement>>),
    Raiserror(Box<RaiserrorStatement>),

    // DDL
    CreateTable(Box<CreateTableStatement>),
    CreateView(Box<CreateViewStatement>),
    CreateProcedure(Box<CreateProcedureStatement>),
    CreateFunction(Box<CreateFunctionStatement>),
    CreateIndex(Box<CreateIndexStatement>),
    CreateSchema(CreateSchemaStatement),
    CreateSequence(Box<CreateSequenceStatement>),
    AlterTable(Box<AlterTableStatement>),
    Drop(DropStatement),

    // Security
    Security(Box<SecurityStatement>),

    // Session
    Use(Identifier),
    Kill(ScalarExpression),
    Checkpoint(Option<ScalarExpression>),
}

// ---------------------------------------------------------------------------
// SELECT statement and query expressions
// ---------------------------------------------------------------------------

/// A full SELECT statement: optional CTEs, a query expression, and optional
/// statement-level optimizer hints.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub query: QueryExpression,
    pub optimizer_hints: Vec<OptimizerHint>,
}

/// `WITH cte [, cte ...]` preceding a DML statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub ctes: Vec<CommonTableExpression>,
}

/// One common table expression: `name [(cols)] AS (query)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
    pub query: QueryExpression,
}

/// A query expression: a leaf specification, a set-operator combination, or a
/// parenthesized query.
///
/// `ORDER BY`, `OFFSET ... FETCH`, and `FOR` always attach to the outermost
/// node; when set operators are present they live on the binary expression,
/// never on a leaf specification.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpression {
    Specification(Box<QuerySpecification>),
    Binary(Box<BinaryQueryExpression>),
    Parenthesis(Box<QueryParenthesisExpression>),
}

impl QueryExpression {
    /// The order-by clause attached to this node, if any.
    #[must_use]
    pub fn order_by(&self) -> Option<&OrderByClause> {
        match self {
            Self::Specification(q) => q.order_by.as_ref(),
            Self::Binary(b) => b.order_by.as_ref(),
            Self::Parenthesis(p) => p.order_by.as_ref(),
        }
    }

    /// The for-clause attached to this node, if any.
    #[must_use]
    pub fn for_clause(&self) -> Option<&ForClause> {
        match self {
            Self::Specification(q) => q.for_clause.as_ref(),
            Self::Binary(b) => b.for_clause.as_ref(),
            Self::Parenthesis(p) => p.for_clause.as_ref(),
        }
    }
}

/// `SELECT ... [INTO ...] [FROM ...] [WHERE ...] [GROUP BY ...] [HAVING ...]
/// [WINDOW ...]` — one leaf query block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpecification {
    pub unique_row_filter: UniqueRowFilter,
    pub top_row_filter: Option<TopRowFilter>,
    pub select_elements: Vec<SelectElement>,
    pub into: Option<IntoClause>,
    pub from: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<GroupByClause>,
    pub having: Option<HavingClause>,
    pub window_clause: Option<WindowClause>,
    pub order_by: Option<OrderByClause>,
    pub offset: Option<OffsetClause>,
    pub for_clause: Option<ForClause>,
}

/// `first (UNION [ALL] | EXCEPT | INTERSECT) second`.
///
/// An `INTO` written on the first leaf query is hoisted here.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryQueryExpression {
    pub op: BinaryQueryExpressionType,
    pub all: bool,
    pub first: QueryExpression,
    pub second: QueryExpression,
    pub into: Option<IntoClause>,
    pub order_by: Option<OrderByClause>,
    pub offset: Option<OffsetClause>,
    pub for_clause: Option<ForClause>,
}

/// A parenthesized query expression.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParenthesisExpression {
    pub query: QueryExpression,
    pub order_by: Option<OrderByClause>,
    pub offset: Option<OffsetClause>,
    pub for_clause: Option<ForClause>,
}

/// Set operators between query expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryQueryExpressionType {
    Union,
    Except,
    Intersect,
}

/// `ALL` / `DISTINCT` row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UniqueRowFilter {
    #[default]
    NotSpecified,
    All,
    Distinct,
}

/// `TOP expr [PERCENT] [WITH TIES]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TopRowFilter {
    pub expression: ScalarExpression,
    pub percent: bool,
    pub with_ties: bool,
}

/// `INTO target [ON filegroup]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntoClause {
    pub target: SchemaObjectName,
    pub on_filegroup: Option<Identifier>,
}

/// `WHERE search_condition`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub search_condition: BooleanExpression,
}

/// `HAVING search_condition`.
#[derive(Debug, Clone, PartialEq)]
pub struct HavingClause {
    pub search_condition: BooleanExpression,
}

// ---------------------------------------------------------------------------
// Select elements
// ---------------------------------------------------------------------------

/// One element of a select list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectElement {
    /// `*` or `qualifier.*`.
    Star(SelectStarExpression),
    /// `expr [AS alias]` or `alias = expr`.
    Scalar(SelectScalarExpression),
    /// `@var = expr` or a compound assignment.
    SetVariable(SelectSetVariable),
}

/// `*` with an optional multi-part qualifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStarExpression {
    pub qualifier: Option<MultiPartIdentifier>,
}

/// A scalar select element with an optional output column name.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectScalarExpression {
    pub expression: ScalarExpression,
    pub column_name: Option<Identifier>,
}

/// `@var = expr` inside a select list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectSetVariable {
    pub variable: VariableReference,
    pub assignment_kind: AssignmentKind,
    pub expression: ScalarExpression,
}

/// Assignment operators (`=`, `+=`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentKind {
    Equals,
    AddEquals,
    SubtractEquals,
    MultiplyEquals,
    DivideEquals,
    ModEquals,
    BitwiseAndEquals,
    BitwiseOrEquals,
    BitwiseXorEquals,
}

// ---------------------------------------------------------------------------
// FROM clause and table references
// ---------------------------------------------------------------------------

/// `FROM t1, t2, ...` — a comma-separated list of table references.
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub table_references: Vec<TableReference>,
}

/// A table source in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableReference {
    Named(NamedTableReference),
    QualifiedJoin(Box<QualifiedJoin>),
    UnqualifiedJoin(Box<UnqualifiedJoin>),
    JoinParenthesis(Box<TableReference>),
    QueryDerived(Box<QueryDerivedTable>),
    InlineDerived(Box<InlineDerivedTable>),
    Variable(VariableTableReference),
    SchemaObjectFunction(Box<SchemaObjectFunctionTableReference>),
    Pivoted(Box<PivotedTableReference>),
    Unpivoted(Box<UnpivotedTableReference>),
    OpenRowset(Box<OpenRowsetTableReference>),
    FullTextTable(Box<FullTextTableReference>),
    SemanticTable(Box<SemanticTableReference>),
    ChangeTable(Box<ChangeTableReference>),
    Predict(Box<PredictTableReference>),
    DmlTable(Box<DmlTableReference>),
}

/// A schema-object-name-based table source with optional alias and hints.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTableReference {
    pub schema_object: SchemaObjectName,
    pub alias: Option<Identifier>,
    pub table_hints: Vec<TableHint>,
}

/// An `ON`-qualified join.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedJoin {
    pub join_type: QualifiedJoinType,
    pub first: TableReference,
    pub second: TableReference,
    pub search_condition: BooleanExpression,
}

/// Join kinds that require an `ON` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifiedJoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

/// A join without an `ON` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct UnqualifiedJoin {
    pub join_type: UnqualifiedJoinType,
    pub first: TableReference,
    pub second: TableReference,
}

/// Join kinds that take no condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnqualifiedJoinType {
    CrossJoin,
    CrossApply,
    OuterApply,
}

/// `(query) [AS] alias [(cols)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDerivedTable {
    pub query: QueryExpression,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

/// `(VALUES (..), (..)) [AS] alias [(cols)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineDerivedTable {
    pub rows: Vec<Vec<ScalarExpression>>,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

/// A table variable used as a source: `@t [AS] alias`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableTableReference {
    pub variable: VariableReference,
    pub alias: Option<Identifier>,
}

/// A table-valued function call used as a source.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObjectFunctionTableReference {
    pub schema_object: SchemaObjectName,
    pub parameters: Vec<ScalarExpression>,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

/// `source PIVOT (agg(...) FOR col IN (cols)) [AS] alias`.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotedTableReference {
    pub table: TableReference,
    pub aggregate: ScalarExpression,
    pub pivot_column: MultiPartIdentifier,
    pub in_columns: Vec<Identifier>,
    pub alias: Option<Identifier>,
}

/// `source UNPIVOT (value FOR pivot IN (cols)) [AS] alias`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpivotedTableReference {
    pub table: TableReference,
    pub value_column: Identifier,
    pub pivot_column: Identifier,
    pub in_columns: Vec<Identifier>,
    pub alias: Option<Identifier>,
}

/// `OPENROWSET(...)` in either provider or `BULK` form.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRowsetTableReference {
    pub bulk: bool,
    pub arguments: Vec<ScalarExpression>,
    pub options: Vec<IdentifierOrValue>,
    pub alias: Option<Identifier>,
}

/// `CONTAINSTABLE` / `FREETEXTTABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct FullTextTableReference {
    pub kind: FullTextFunctionKind,
    pub table: SchemaObjectName,
    pub columns: Vec<FullTextColumn>,
    pub condition: ScalarExpression,
    pub language: Option<ScalarExpression>,
    pub top_n: Option<ScalarExpression>,
    pub alias: Option<Identifier>,
}

/// Which full-text table function was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullTextFunctionKind {
    Contains,
    FreeText,
}

/// A column argument of a full-text function: `*` or a column reference.
#[derive(Debug, Clone, PartialEq)]
pub enum FullTextColumn {
    Wildcard,
    Column(MultiPartIdentifier),
}

/// `SEMANTICKEYPHRASETABLE` and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticTableReference {
    pub kind: SemanticFunctionKind,
    pub table: SchemaObjectName,
    pub columns: Vec<FullTextColumn>,
    pub arguments: Vec<ScalarExpression>,
    pub alias: Option<Identifier>,
}

/// Which semantic table function was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticFunctionKind {
    KeyPhraseTable,
    SimilarityTable,
    SimilarityDetailsTable,
}

/// `CHANGETABLE(CHANGES t, n)` / `CHANGETABLE(VERSION t, cols, values)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTableReference {
    pub kind: ChangeTableKind,
    pub target: SchemaObjectName,
    pub parameters: Vec<ScalarExpression>,
    pub alias: Option<Identifier>,
}

/// The mode of a `CHANGETABLE` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeTableKind {
    Changes,
    Version,
}

/// `PREDICT(MODEL = expr, DATA = source [AS alias]) WITH (schema)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictTableReference {
    pub model: ScalarExpression,
    pub data: TableReference,
    pub runtime: Option<Identifier>,
    pub with_columns: Vec<ColumnDefinition>,
    pub alias: Option<Identifier>,
}

/// A DML statement with an `OUTPUT` clause used as a table source.
#[derive(Debug, Clone, PartialEq)]
pub struct DmlTableReference {
    pub statement: Statement,
    pub alias: Option<Identifier>,
    pub columns: Vec<Identifier>,
}

// ---------------------------------------------------------------------------
// Table hints
// ---------------------------------------------------------------------------

/// A per-reference storage or locking directive.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHint {
    pub kind: TableHintKind,
    pub parameters: Vec<IdentifierOrValue>,
}

/// Recognized table hint names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableHintKind {
    NoLock,
    ReadUncommitted,
    ReadCommitted,
    ReadCommittedLock,
    RepeatableRead,
    Serializable,
    ReadPast,
    HoldLock,
    UpdLock,
    XLock,
    TabLock,
    TabLockX,
    PagLock,
    RowLock,
    NoWait,
    NoExpand,
    Index,
    ForceSeek,
    ForceScan,
    FastFirstRow,
    KeepIdentity,
    KeepDefaults,
    IgnoreConstraints,
    IgnoreTriggers,
    Snapshot,
}

// ---------------------------------------------------------------------------
// Scalar expressions
// ---------------------------------------------------------------------------

/// A scalar-valued expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarExpression {
    Literal(Literal, Span),
    OdbcLiteral(OdbcLiteral),
    ColumnReference(ColumnReferenceExpression),
    Variable(VariableReference),
    GlobalVariable(GlobalVariableExpression),
    Unary {
        op: UnaryExpressionType,
        expression: Box<Self>,
        span: Span,
    },
    Binary {
        op: BinaryExpressionType,
        first: Box<Self>,
        second: Box<Self>,
        span: Span,
    },
    Parenthesis(Box<Self>, Span),
    Subquery(Box<QueryExpression>, Span),
    FunctionCall(Box<FunctionCall>),
    PartitionFunction(Box<PartitionFunctionCall>),
    Property(Box<PropertyAccess>),
    SearchedCase(Box<SearchedCaseExpression>),
    SimpleCase(Box<SimpleCaseExpression>),
    Cast(Box<CastCall>),
    Convert(Box<ConvertCall>),
    Parse(Box<ParseCall>),
    Iif(Box<IifCall>),
    IdentityFunction(Box<IdentityFunctionCall>),
    NextValueFor(Box<NextValueForExpression>),
    AtTimeZone(Box<AtTimeZoneCall>),
}

impl ScalarExpression {
    /// The source span covered by this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(_, span)
            | Self::Parenthesis(_, span)
            | Self::Subquery(_, span)
            | Self::Unary { span, .. }
            | Self::Binary { span, .. } => *span,
            Self::OdbcLiteral(l) => l.span,
            Self::ColumnReference(c) => c.span,
            Self::Variable(v) => v.span,
            Self::GlobalVariable(v) => v.span,
            Self::FunctionCall(f) => f.span,
            Self::PartitionFunction(p) => p.span,
            Self::Property(p) => p.span,
            Self::SearchedCase(c) => c.span,
            Self::SimpleCase(c) => c.span,
            Self::Cast(c) => c.span,
            Self::Convert(c) => c.span,
            Self::Parse(p) => p.span,
            Self::Iif(i) => i.span,
            Self::IdentityFunction(i) => i.span,
            Self::NextValueFor(n) => n.span,
            Self::AtTimeZone(a) => a.span,
        }
    }
}

/// A literal constant. Numeric literals keep their source spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Integer literal text (`42`).
    Integer(String),
    /// Decimal or scientific literal text (`3.14`, `1e10`).
    Numeric(String),
    /// String literal; `national` records an `N` prefix.
    String { value: String, national: bool },
    /// Binary literal text including the `0x` prefix.
    Binary(String),
    /// The keyword `NULL`.
    Null,
    /// The keyword `DEFAULT` in value position.
    Default,
}

/// An ODBC brace literal such as `{guid N'...'}` or `{ts '...'}`.
#[derive(Debug, Clone, PartialEq)]
pub struct OdbcLiteral {
    pub kind: OdbcLiteralKind,
    pub value: String,
    pub national: bool,
    pub span: Span,
}

/// The recognized ODBC literal prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OdbcLiteralKind {
    Guid,
    Date,
    Time,
    Timestamp,
}

/// A column reference, including wildcard and pseudo-column forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReferenceExpression {
    pub column_type: ColumnType,
    pub multi_part_identifier: Option<MultiPartIdentifier>,
    pub span: Span,
}

/// What kind of column a reference denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Regular,
    Wildcard,
    IdentityCol,
    RowGuidCol,
    PseudoColumnAction,
    PseudoColumnIdentity,
    PseudoColumnRowGuid,
    PseudoColumnCuid,
}

/// A local variable reference: `@name`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableReference {
    /// Name including the `@` prefix.
    pub name: String,
    pub span: Span,
}

/// A global variable reference: `@@name`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalVariableExpression {
    /// Name including the `@@` prefix.
    pub name: String,
    pub span: Span,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryExpressionType {
    Positive,
    Negative,
    BitwiseNot,
}

/// Binary scalar operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryExpressionType {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    Concat,
}

impl fmt::Display for BinaryExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Concat => "||",
        })
    }
}

/// The receiver of a function call or property access.
#[derive(Debug, Clone, PartialEq)]
pub enum CallTarget {
    /// A dotted prefix: `schema.fn(...)`.
    MultiPart(MultiPartIdentifier),
    /// An expression receiver: `(expr).method(...)`.
    Expression(Box<ScalarExpression>),
    /// A user-defined type: `type::method(...)`.
    UserDefinedType(SchemaObjectName),
}

/// A function call with all its optional trailers.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub call_target: Option<CallTarget>,
    pub function_name: Identifier,
    pub parameters: Vec<ScalarExpression>,
    pub unique_row_filter: UniqueRowFilter,
    pub trim_kind: Option<TrimKind>,
    pub within_group: Option<OrderByClause>,
    pub null_treatment: Option<NullTreatment>,
    pub over_clause: Option<OverClause>,
    pub collation: Option<Identifier>,
    pub span: Span,
}

/// `TRIM(LEADING|TRAILING|BOTH ... FROM ...)` qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimKind {
    Leading,
    Trailing,
    Both,
}

/// `RESPECT NULLS` / `IGNORE NULLS` on a window function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullTreatment {
    RespectNulls,
    IgnoreNulls,
}

/// `$PARTITION.fn(args)`, optionally database-qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionFunctionCall {
    pub database: Option<Identifier>,
    pub function_name: Identifier,
    pub parameters: Vec<ScalarExpression>,
    pub span: Span,
}

/// `expr.property` or `type::property`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccess {
    pub target: CallTarget,
    pub property: Identifier,
    pub span: Span,
}

/// `CASE WHEN pred THEN expr ... [ELSE expr] END`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchedCaseExpression {
    pub when_clauses: Vec<SearchedWhenClause>,
    pub else_expression: Option<ScalarExpression>,
    pub span: Span,
}

/// One `WHEN pred THEN expr` arm of a searched CASE.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchedWhenClause {
    pub when_expression: BooleanExpression,
    pub then_expression: ScalarExpression,
}

/// `CASE input WHEN value THEN expr ... [ELSE expr] END`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCaseExpression {
    pub input_expression: ScalarExpression,
    pub when_clauses: Vec<SimpleWhenClause>,
    pub else_expression: Option<ScalarExpression>,
    pub span: Span,
}

/// One `WHEN value THEN expr` arm of a simple CASE.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleWhenClause {
    pub when_expression: ScalarExpression,
    pub then_expression: ScalarExpression,
}

/// `CAST(expr AS type)` / `TRY_CAST(expr AS type)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CastCall {
    pub parameter: ScalarExpression,
    pub data_type: DataTypeReference,
    pub try_cast: bool,
    pub span: Span,
}

/// `CONVERT(type, expr [, style])` / `TRY_CONVERT(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertCall {
    pub data_type: DataTypeReference,
    pub parameter: ScalarExpression,
    pub style: Option<ScalarExpression>,
    pub try_convert: bool,
    pub span: Span,
}

/// `PARSE(str AS type [USING culture])` / `TRY_PARSE(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseCall {
    pub string_value: ScalarExpression,
    pub data_type: DataTypeReference,
    pub culture: Option<ScalarExpression>,
    pub try_parse: bool,
    pub span: Span,
}

/// `IIF(pred, then, else)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IifCall {
    pub predicate: BooleanExpression,
    pub then_expression: ScalarExpression,
    pub else_expression: ScalarExpression,
    pub span: Span,
}

/// `IDENTITY(type [, seed, increment])` in SELECT INTO.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityFunctionCall {
    pub data_type: DataTypeReference,
    pub seed: Option<ScalarExpression>,
    pub increment: Option<ScalarExpression>,
    pub span: Span,
}

/// `NEXT VALUE FOR sequence [OVER (...)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NextValueForExpression {
    pub sequence: SchemaObjectName,
    pub over_clause: Option<OverClause>,
    pub span: Span,
}

/// `expr AT TIME ZONE tz`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtTimeZoneCall {
    pub date_value: ScalarExpression,
    pub time_zone: ScalarExpression,
    pub span: Span,
}

/// A data type name with optional length/precision parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTypeReference {
    pub name: SchemaObjectName,
    pub parameters: Vec<DataTypeParameter>,
}

/// One parameter of a parameterized data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataTypeParameter {
    /// A numeric length or precision, kept as source text.
    Number(String),
    /// The `MAX` keyword (`varchar(max)`).
    Max,
}

// ---------------------------------------------------------------------------
// Boolean expressions
// ---------------------------------------------------------------------------

/// A boolean-valued expression (search condition).
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanExpression {
    Comparison(Box<BooleanComparisonExpression>),
    Binary(Box<BooleanBinaryExpression>),
    Not(Box<BooleanExpression>),
    Parenthesis(Box<BooleanExpression>),
    IsNull(Box<BooleanIsNullExpression>),
    IsDistinct(Box<BooleanIsDistinctExpression>),
    Between(Box<BooleanBetweenExpression>),
    In(Box<BooleanInExpression>),
    Like(Box<BooleanLikeExpression>),
    Exists(Box<ExistsPredicate>),
    SubqueryComparison(Box<SubqueryComparisonPredicate>),
    FullText(Box<FullTextPredicate>),
}

/// `first op second`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanComparisonExpression {
    pub comparison_type: BooleanComparisonType,
    pub first: ScalarExpression,
    pub second: ScalarExpression,
}

/// Relational comparison operators. `<>` and `!=` are distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanComparisonType {
    Equals,
    NotEqualToBrackets,
    NotEqualToExclamation,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
    NotLessThan,
    NotGreaterThan,
}

/// `first AND second` / `first OR second`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanBinaryExpression {
    pub kind: BooleanBinaryExpressionType,
    pub first: BooleanExpression,
    pub second: BooleanExpression,
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanBinaryExpressionType {
    And,
    Or,
}

/// `expr IS [NOT] NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanIsNullExpression {
    pub expression: ScalarExpression,
    pub is_not: bool,
}

/// `first IS [NOT] DISTINCT FROM second`.
///
/// `IS [NOT] DISTINCT FROM NULL` is lowered to [`BooleanIsNullExpression`]
/// by the parser and never appears here.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanIsDistinctExpression {
    pub first: ScalarExpression,
    pub is_not: bool,
    pub second: DistinctFromOperand,
}

/// The right-hand side of `IS [NOT] DISTINCT FROM`.
#[derive(Debug, Clone, PartialEq)]
pub enum DistinctFromOperand {
    Expression(ScalarExpression),
    Subquery {
        quantifier: SubqueryQuantifier,
        query: QueryExpression,
    },
}

/// `expr [NOT] BETWEEN low AND high`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanBetweenExpression {
    pub expression: ScalarExpression,
    pub not: bool,
    pub lower: ScalarExpression,
    pub upper: ScalarExpression,
}

/// `expr [NOT] IN (values | subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanInExpression {
    pub expression: ScalarExpression,
    pub not: bool,
    pub set: InPredicateSet,
}

/// The membership set of an IN predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum InPredicateSet {
    List(Vec<ScalarExpression>),
    Subquery(QueryExpression),
}

/// `expr [NOT] LIKE pattern [ESCAPE e]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLikeExpression {
    pub first: ScalarExpression,
    pub not: bool,
    pub pattern: ScalarExpression,
    pub escape: Option<ScalarExpression>,
}

/// `EXISTS (subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsPredicate {
    pub subquery: QueryExpression,
}

/// `expr op {SOME|ANY|ALL} (subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryComparisonPredicate {
    pub expression: ScalarExpression,
    pub comparison_type: BooleanComparisonType,
    pub quantifier: SubqueryQuantifier,
    pub subquery: QueryExpression,
}

/// Subquery comparison quantifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubqueryQuantifier {
    Some,
    Any,
    All,
}

/// `CONTAINS(cols, value [, LANGUAGE lang])` / `FREETEXT(...)` as a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct FullTextPredicate {
    pub kind: FullTextFunctionKind,
    pub columns: Vec<FullTextColumn>,
    pub value: ScalarExpression,
    pub language: Option<ScalarExpression>,
}

// ---------------------------------------------------------------------------
// GROUP BY
// ---------------------------------------------------------------------------

/// `GROUP BY item [, item ...] [WITH ROLLUP | WITH CUBE]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause {
    pub grouping_specifications: Vec<GroupingSpecification>,
    pub group_by_option: GroupByOption,
}

/// One grouping item.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupingSpecification {
    Expression(ScalarExpression),
    Composite(Vec<GroupingSpecification>),
    Rollup(Vec<GroupingSpecification>),
    Cube(Vec<GroupingSpecification>),
    GroupingSets(Vec<GroupingSpecification>),
    /// `()` — the grand total group.
    GrandTotal,
}

/// Legacy trailing `WITH ROLLUP` / `WITH CUBE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupByOption {
    #[default]
    None,
    Rollup,
    Cube,
}

// ---------------------------------------------------------------------------
// ORDER BY, OFFSET, windows
// ---------------------------------------------------------------------------

/// `ORDER BY expr [ASC|DESC] [, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub elements: Vec<ExpressionWithSortOrder>,
}

/// One ordering element.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionWithSortOrder {
    pub expression: ScalarExpression,
    pub sort_order: SortOrder,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    NotSpecified,
    Ascending,
    Descending,
}

/// `OFFSET expr {ROW|ROWS} [FETCH {FIRST|NEXT} expr {ROW|ROWS} ONLY]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetClause {
    pub offset_expression: ScalarExpression,
    pub fetch_expression: Option<ScalarExpression>,
}

/// `OVER name` or `OVER ([name] [PARTITION BY ...] [ORDER BY ...] [frame])`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverClause {
    pub window_name: Option<Identifier>,
    pub partitions: Vec<ScalarExpression>,
    pub order_by: Option<OrderByClause>,
    pub window_frame: Option<WindowFrameClause>,
}

/// `{ROWS|RANGE} (delimiter | BETWEEN delimiter AND delimiter)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrameClause {
    pub frame_type: WindowFrameType,
    pub top: WindowDelimiter,
    pub bottom: Option<WindowDelimiter>,
}

/// `ROWS` or `RANGE` frame unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFrameType {
    Rows,
    Range,
}

/// One frame delimiter.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDelimiter {
    pub delimiter_type: WindowDelimiterType,
    /// Present only for `ValuePreceding` / `ValueFollowing`.
    pub offset_value: Option<ScalarExpression>,
}

/// Frame delimiter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowDelimiterType {
    UnboundedPreceding,
    UnboundedFollowing,
    CurrentRow,
    ValuePreceding,
    ValueFollowing,
}

/// `WINDOW name AS (...) [, ...]` on a query specification.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowClause {
    pub definitions: Vec<WindowDefinition>,
}

/// One named window definition.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDefinition {
    pub name: Identifier,
    pub ref_window: Option<Identifier>,
    pub partitions: Vec<ScalarExpression>,
    pub order_by: Option<OrderByClause>,
    pub window_frame: Option<WindowFrameClause>,
}

// ---------------------------------------------------------------------------
// FOR clause
// ---------------------------------------------------------------------------

/// The `FOR` clause of a query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ForClause {
    Browse,
    ReadOnly,
    Update { columns: Vec<MultiPartIdentifier> },
    Xml(XmlForClause),
    Json(JsonForClause),
}

/// `FOR XML mode (options)`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlForClause {
    pub mode: XmlForClauseMode,
    /// The optional element name of `RAW('name')` / `PATH('name')`.
    pub mode_element: Option<String>,
    pub options: Vec<XmlForClauseOption>,
}

/// FOR XML modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlForClauseMode {
    Auto,
    Raw,
    Explicit,
    Path,
}

/// One FOR XML option.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlForClauseOption {
    pub kind: XmlForClauseOptionKind,
    pub value: Option<String>,
}

/// FOR XML option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlForClauseOptionKind {
    Elements,
    ElementsXsiNil,
    ElementsAbsent,
    Root,
    Type,
    BinaryBase64,
    XmlData,
    XmlSchema,
}

/// `FOR JSON mode (options)`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonForClause {
    pub mode: JsonForClauseMode,
    pub options: Vec<JsonForClauseOption>,
}

/// FOR JSON modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonForClauseMode {
    Auto,
    Path,
}

/// One FOR JSON option.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonForClauseOption {
    pub kind: JsonForClauseOptionKind,
    pub value: Option<String>,
}

/// FOR JSON option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonForClauseOptionKind {
    Root,
    IncludeNullValues,
    WithoutArrayWrapper,
}

// ---------------------------------------------------------------------------
// Optimizer hints (OPTION clause)
// ---------------------------------------------------------------------------

/// A per-statement planner directive inside `OPTION (...)`.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizerHint {
    /// A bare hint such as `RECOMPILE` or `HASH JOIN`.
    Simple { kind: OptimizerHintKind },
    /// A hint with a value: `MAXDOP 4`, `LABEL = 'x'`.
    Literal {
        kind: OptimizerHintKind,
        value: Literal,
    },
    /// `USE PLAN 'xml'`.
    UsePlan { plan: String },
    /// `USE HINT ('a', 'b', ...)`.
    UseHint { hints: Vec<String> },
    /// `OPTIMIZE FOR (@v = val | @v UNKNOWN, ...)`.
    OptimizeFor { pairs: Vec<OptimizeForPair> },
    /// `OPTIMIZE FOR UNKNOWN`.
    OptimizeForUnknown,
    /// `TABLE HINT (obj, hint, ...)`.
    TableHints {
        object: SchemaObjectName,
        hints: Vec<TableHint>,
    },
    /// An unrecognized hint name passed through in PascalCase.
    Generic { kind_name: String },
}

/// One variable binding of `OPTIMIZE FOR`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeForPair {
    pub variable: VariableReference,
    /// `None` means `UNKNOWN`.
    pub value: Option<Literal>,
}

/// Recognized optimizer hint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizerHintKind {
    Recompile,
    MaxRecursion,
    Label,
    MaxGrantPercent,
    MinGrantPercent,
    Fast,
    MaxDop,
    CheckConstraints,
    CheckConstraintsPlan,
    ExpandViews,
    ForceOrder,
    KeepPlan,
    KeepFixedPlan,
    RobustPlan,
    OrderGroup,
    HashGroup,
    ConcatUnion,
    HashUnion,
    MergeUnion,
    LoopJoin,
    MergeJoin,
    HashJoin,
    ParameterizationSimple,
    ParameterizationForced,
    OptimizeCorrelatedUnionAll,
    IgnoreNonClusteredColumnStoreIndex,
    NoPerformanceSpool,
}

// ---------------------------------------------------------------------------
// INSERT / UPDATE / DELETE / MERGE
// ---------------------------------------------------------------------------

/// The write target of a DML statement.
#[derive(Debug, Clone, PartialEq)]
pub enum DmlTarget {
    Table(NamedTableReference),
    Variable(VariableReference),
}

/// `INSERT [TOP ...] [INTO] target [(cols)] [OUTPUT ...] source [OPTION ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub with: Option<WithClause>,
    pub top_row_filter: Option<TopRowFilter>,
    pub target: DmlTarget,
    pub columns: Vec<Identifier>,
    pub output: Option<OutputClause>,
    pub source: InsertSource,
    pub optimizer_hints: Vec<OptimizerHint>,
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Values(Vec<Vec<ScalarExpression>>),
    Query(QueryExpression),
    DefaultValues,
    Execute(Box<ExecuteStatement>),
}

/// `UPDATE [TOP ...] target SET ... [OUTPUT] [FROM ...] [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub with: Option<WithClause>,
    pub top_row_filter: Option<TopRowFilter>,
    pub target: DmlTarget,
    pub set_clauses: Vec<SetClause>,
    pub output: Option<OutputClause>,
    pub from: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub optimizer_hints: Vec<OptimizerHint>,
}

/// One `SET` assignment of an UPDATE or MERGE action.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub target: AssignmentTarget,
    pub assignment_kind: AssignmentKind,
    pub value: ScalarExpression,
}

/// The left side of a SET assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentTarget {
    Column(MultiPartIdentifier),
    Variable(VariableReference),
}

/// `DELETE [TOP ...] [FROM] target [OUTPUT] [FROM ...] [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub with: Option<WithClause>,
    pub top_row_filter: Option<TopRowFilter>,
    pub target: DmlTarget,
    pub output: Option<OutputClause>,
    pub from: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub optimizer_hints: Vec<OptimizerHint>,
}

/// `MERGE [TOP ...] [INTO] target USING source ON cond WHEN ... [OUTPUT]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStatement {
    pub with: Option<WithClause>,
    pub top_row_filter: Option<TopRowFilter>,
    pub target: NamedTableReference,
    pub using: TableReference,
    pub on: BooleanExpression,
    pub when_clauses: Vec<MergeWhenClause>,
    pub output: Option<OutputClause>,
    pub optimizer_hints: Vec<OptimizerHint>,
}

/// One `WHEN [NOT] MATCHED [...] THEN action` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeWhenClause {
    pub condition: MergeCondition,
    pub and_predicate: Option<BooleanExpression>,
    pub action: MergeAction,
}

/// The match condition of a MERGE arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeCondition {
    Matched,
    NotMatchedByTarget,
    NotMatchedBySource,
}

/// The action of a MERGE arm.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeAction {
    Insert {
        columns: Vec<Identifier>,
        source: InsertSource,
    },
    Update {
        set_clauses: Vec<SetClause>,
    },
    Delete,
}

/// `OUTPUT select_elements [INTO target [(cols)]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputClause {
    pub select_elements: Vec<SelectElement>,
    pub into: Option<OutputIntoClause>,
}

/// The `INTO` target of an OUTPUT clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputIntoClause {
    pub target: DmlTarget,
    pub columns: Vec<Identifier>,
}

// ---------------------------------------------------------------------------
// DECLARE / SET
// ---------------------------------------------------------------------------

/// `DECLARE @a type [= expr] [, @b type ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareVariableStatement {
    pub declarations: Vec<DeclareVariableElement>,
}

/// One scalar variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareVariableElement {
    pub variable: VariableReference,
    pub data_type: DataTypeReference,
    pub value: Option<ScalarExpression>,
}

/// `DECLARE @t TABLE (columns...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareTableVariableStatement {
    pub variable: VariableReference,
    pub columns: Vec<ColumnDefinition>,
}

/// `SET @v = expr` or a compound assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SetVariableStatement {
    pub variable: VariableReference,
    pub assignment_kind: AssignmentKind,
    pub expression: ScalarExpression,
}

/// `SET NOCOUNT, XACT_ABORT ON` — session option toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOnOffStatement {
    pub options: Vec<Identifier>,
    pub on: bool,
}

/// `SET TRANSACTION ISOLATION LEVEL ...` levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Snapshot,
    Serializable,
}

// ---------------------------------------------------------------------------
// Control of flow
// ---------------------------------------------------------------------------

/// `IF pred stmt [ELSE stmt]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub predicate: BooleanExpression,
    pub then_statement: Statement,
    pub else_statement: Option<Statement>,
}

/// `WHILE pred stmt`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub predicate: BooleanExpression,
    pub statement: Statement,
}

/// `BEGIN ... END`.
#[derive(Debug, Clone, PartialEq)]
pub struct BeginEndBlockStatement {
    pub statements: Vec<Statement>,
}

/// `BEGIN TRY ... END TRY BEGIN CATCH ... END CATCH`.
#[derive(Debug, Clone, PartialEq)]
pub struct TryCatchStatement {
    pub try_statements: Vec<Statement>,
    pub catch_statements: Vec<Statement>,
}

/// `WAITFOR DELAY expr` / `WAITFOR TIME expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitforStatement {
    pub kind: WaitforKind,
    pub parameter: ScalarExpression,
}

/// WAITFOR modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitforKind {
    Delay,
    Time,
}

// ---------------------------------------------------------------------------
// EXECUTE / messages
// ---------------------------------------------------------------------------

/// `EXEC proc args` or `EXEC ('sql' ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteStatement {
    pub target: ExecuteTarget,
    pub parameters: Vec<ExecuteParameter>,
}

/// What an EXEC invokes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteTarget {
    Procedure {
        return_variable: Option<VariableReference>,
        name: SchemaObjectName,
    },
    /// `EXEC ('string' [+ ...])` — concatenation parts in order.
    StringCommand(Vec<ScalarExpression>),
}

/// One argument of a procedure invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteParameter {
    /// Present for named arguments (`@p = 1`).
    pub variable: Option<VariableReference>,
    pub value: ScalarExpression,
    pub output: bool,
}

/// `THROW error_number, message, state`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub error_number: ScalarExpression,
    pub message: ScalarExpression,
    pub state: ScalarExpression,
}

/// `RAISERROR (msg_or_id, severity, state [, args...]) [WITH opts]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RaiserrorStatement {
    pub first: ScalarExpression,
    pub severity: ScalarExpression,
    pub state: ScalarExpression,
    pub parameters: Vec<ScalarExpression>,
    pub options: Vec<Identifier>,
}

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

/// Create / create-or-alter / alter distinction for module DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdlAction {
    Create,
    CreateOrAlter,
    Alter,
}

/// One column of a CREATE TABLE or table variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: Identifier,
    pub data_type: DataTypeReference,
    /// `NULL` / `NOT NULL` if written.
    pub nullable: Option<bool>,
    pub identity: Option<IdentityOptions>,
    pub default_value: Option<ScalarExpression>,
    pub primary_key: bool,
    pub unique: bool,
}

/// `IDENTITY [(seed, increment)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityOptions {
    pub seed: Option<ScalarExpression>,
    pub increment: Option<ScalarExpression>,
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    pub name: Option<Identifier>,
    pub kind: TableConstraintKind,
}

/// Table-level constraint kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    PrimaryKey { columns: Vec<Identifier> },
    Unique { columns: Vec<Identifier> },
    ForeignKey {
        columns: Vec<Identifier>,
        references: SchemaObjectName,
        referenced_columns: Vec<Identifier>,
    },
    Check(BooleanExpression),
}

/// `CREATE TABLE name (columns and constraints)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub name: SchemaObjectName,
    pub columns: Vec<ColumnDefinition>,
    pub constraints: Vec<TableConstraint>,
}

/// `CREATE [OR ALTER] VIEW name [(cols)] AS query`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    pub action: DdlAction,
    pub name: SchemaObjectName,
    pub columns: Vec<Identifier>,
    pub query: QueryExpression,
}

/// One parameter of a procedure or function.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureParameter {
    pub variable: VariableReference,
    pub data_type: DataTypeReference,
    pub default_value: Option<ScalarExpression>,
    pub output: bool,
}

/// `CREATE [OR ALTER] {PROC|PROCEDURE} name params AS body`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProcedureStatement {
    pub action: DdlAction,
    pub name: SchemaObjectName,
    pub parameters: Vec<ProcedureParameter>,
    pub body: Vec<Statement>,
}

/// `CREATE [OR ALTER] FUNCTION name (params) RETURNS ... AS body`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunctionStatement {
    pub action: DdlAction,
    pub name: SchemaObjectName,
    pub parameters: Vec<ProcedureParameter>,
    pub return_type: FunctionReturnType,
    pub body: FunctionBody,
}

/// The declared return type of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionReturnType {
    Scalar(DataTypeReference),
    /// `RETURNS TABLE` (inline table-valued).
    Table,
    /// `RETURNS @t TABLE (columns)` (multi-statement table-valued).
    TableVariable {
        variable: VariableReference,
        columns: Vec<ColumnDefinition>,
    },
}

/// The body of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// `AS RETURN (query)` for inline table-valued functions.
    Return(QueryExpression),
    /// `AS BEGIN ... END` statement body.
    Statements(Vec<Statement>),
}

/// `CREATE [UNIQUE] [CLUSTERED|NONCLUSTERED] INDEX name ON table (cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
    pub unique: bool,
    /// `None` when neither CLUSTERED nor NONCLUSTERED was written.
    pub clustered: Option<bool>,
    pub name: Identifier,
    pub table: SchemaObjectName,
    pub columns: Vec<IndexColumn>,
    pub include_columns: Vec<Identifier>,
    pub filter: Option<BooleanExpression>,
}

/// One key column of an index with its sort order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: Identifier,
    pub sort_order: SortOrder,
}

/// `CREATE SCHEMA name [AUTHORIZATION owner]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSchemaStatement {
    pub name: Identifier,
    pub authorization: Option<Identifier>,
}

/// `CREATE SEQUENCE name [AS type] [options]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSequenceStatement {
    pub name: SchemaObjectName,
    pub data_type: Option<DataTypeReference>,
    pub options: Vec<SequenceOption>,
}

/// One sequence option.
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceOption {
    StartWith(ScalarExpression),
    IncrementBy(ScalarExpression),
    MinValue(Option<ScalarExpression>),
    MaxValue(Option<ScalarExpression>),
    Cycle(bool),
    Cache(Option<ScalarExpression>),
}

/// `ALTER TABLE name action`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStatement {
    pub name: SchemaObjectName,
    pub action: AlterTableAction,
}

/// Supported ALTER TABLE actions.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    AddColumn(ColumnDefinition),
    AddConstraint(TableConstraint),
    DropColumn(Identifier),
    AlterColumn(ColumnDefinition),
}

/// `DROP object_type [IF EXISTS] name [, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropStatement {
    pub object_type: DropObjectType,
    pub if_exists: bool,
    pub names: Vec<SchemaObjectName>,
}

/// Droppable object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropObjectType {
    Table,
    View,
    Procedure,
    Function,
    Index,
    Schema,
    Sequence,
}

// ---------------------------------------------------------------------------
// Security (GRANT / DENY / REVOKE)
// ---------------------------------------------------------------------------

/// `GRANT|DENY|REVOKE permissions [ON securable] TO|FROM principals`.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityStatement {
    pub action: SecurityAction,
    /// Permission names, possibly multi-word (`ALTER ANY SCHEMA`).
    pub permissions: Vec<String>,
    pub securable: Option<SchemaObjectName>,
    pub principals: Vec<Identifier>,
    pub with_grant_option: bool,
}

/// Which security verb was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityAction {
    Grant,
    Deny,
    Revoke,
}
