//! Token definitions for the T-SQL lexer.

use tsql_ast::Span;

use crate::error::LexErrorKind;

/// A single lexed token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub col: u32,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, line: u32, col: u32) -> Self {
        Self {
            kind,
            span,
            line,
            col,
        }
    }
}

/// The kind of a lexed token.
///
/// Identifiers beginning with `@`, `@@`, or `$` are carried as [`Ident`]
/// with the prefix preserved; the parser decides what they denote.
/// Keywords get one variant each, found by upper-case lookup in
/// [`TokenKind::lookup_keyword`].
///
/// [`Ident`]: TokenKind::Ident
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals and names
    /// Integer literal text.
    Integer(String),
    /// Decimal or scientific literal text.
    Numeric(String),
    /// String literal, unescaped.
    String(String),
    /// `N'...'` national string literal, unescaped.
    NationalString(String),
    /// `0x...` binary literal, including the prefix.
    Binary(String),
    /// Bare identifier, or `@var` / `@@global` / `$pseudo` with prefix kept.
    Ident(String),
    /// `[...]` bracketed identifier, unescaped.
    BracketedIdent(String),
    /// `"..."` double-quoted identifier, unescaped.
    QuotedIdent(String),

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Dot,
    Colon,
    DoubleColon,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    PercentSign,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Concat,
    Eq,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    /// `<>`
    NotEqual,
    /// `!=`
    BangEqual,
    /// `!<`
    BangLess,
    /// `!>`
    BangGreater,
    ShiftLeft,
    ShiftRight,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,

    // Reserved keywords
    KwAdd,
    KwAll,
    KwAlter,
    KwAnd,
    KwAny,
    KwAs,
    KwAsc,
    KwAuthorization,
    KwBegin,
    KwBetween,
    KwBreak,
    KwBrowse,
    KwBulk,
    KwBy,
    KwCase,
    KwCheck,
    KwCheckpoint,
    KwClustered,
    KwCollate,
    KwColumn,
    KwCommit,
    KwConstraint,
    KwContains,
    KwContainstable,
    KwContinue,
    KwConvert,
    KwCreate,
    KwCross,
    KwCurrent,
    KwDatabase,
    KwDeclare,
    KwDefault,
    KwDelete,
    KwDeny,
    KwDesc,
    KwDistinct,
    KwDrop,
    KwElse,
    KwEnd,
    KwEscape,
    KwExcept,
    KwExec,
    KwExecute,
    KwExists,
    KwFetch,
    KwFor,
    KwForeign,
    KwFreetext,
    KwFreetexttable,
    KwFrom,
    KwFull,
    KwFunction,
    KwGoto,
    KwGrant,
    KwGroup,
    KwHaving,
    KwHoldlock,
    KwIdentity,
    KwIdentitycol,
    KwIf,
    KwIn,
    KwIndex,
    KwInner,
    KwInsert,
    KwIntersect,
    KwInto,
    KwIs,
    KwJoin,
    KwKey,
    KwKill,
    KwLeft,
    KwLike,
    KwMerge,
    KwNonclustered,
    KwNot,
    KwNull,
    KwOf,
    KwOff,
    KwOn,
    KwOpenrowset,
    KwOption,
    KwOr,
    KwOrder,
    KwOuter,
    KwOver,
    KwPercent,
    KwPivot,
    KwPlan,
    KwPrimary,
    KwPrint,
    KwProc,
    KwProcedure,
    KwRaiserror,
    KwRead,
    KwReferences,
    KwReturn,
    KwRevoke,
    KwRight,
    KwRollback,
    KwRowguidcol,
    KwSave,
    KwSchema,
    KwSelect,
    KwSet,
    KwSome,
    KwTable,
    KwThen,
    KwTo,
    KwTop,
    KwTran,
    KwTransaction,
    KwTruncate,
    KwUnion,
    KwUnique,
    KwUnpivot,
    KwUpdate,
    KwUse,
    KwUser,
    KwValues,
    KwView,
    KwWaitfor,
    KwWhen,
    KwWhere,
    KwWhile,
    KwWith,

    // Non-reserved keywords. These dispatch grammar but remain legal
    // in identifier position; see `is_nonreserved_kw`.
    KwApply,
    KwAt,
    KwCache,
    KwCatch,
    KwChangetable,
    KwCommitted,
    KwCube,
    KwCycle,
    KwDelay,
    KwFirst,
    KwFollowing,
    KwGo,
    KwGrouping,
    KwInclude,
    KwIncrement,
    KwIsolation,
    KwJson,
    KwLanguage,
    KwLevel,
    KwMatched,
    KwNext,
    KwOffset,
    KwOnly,
    KwOutput,
    KwPartition,
    KwPreceding,
    KwPredict,
    KwRange,
    KwRepeatable,
    KwReturns,
    KwRollup,
    KwRow,
    KwRows,
    KwSequence,
    KwSerializable,
    KwSets,
    KwSnapshot,
    KwSource,
    KwStart,
    KwTarget,
    KwThrow,
    KwTies,
    KwTime,
    KwTry,
    KwUnbounded,
    KwUncommitted,
    KwUnknown,
    KwUsing,
    KwValue,
    KwWindow,
    KwWithin,
    KwXml,
    KwZone,

    /// End of input. Emitted indefinitely once reached.
    Eof,
    /// A lexical error surfaced as a token so positions survive.
    Error(LexErrorKind),
}

impl TokenKind {
    /// Look up the keyword kind for an identifier, by upper-case spelling.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn lookup_keyword(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        let kind = match upper.as_str() {
            "ADD" => Self::KwAdd,
            "ALL" => Self::KwAll,
            "ALTER" => Self::KwAlter,
            "AND" => Self::KwAnd,
            "ANY" => Self::KwAny,
            "AS" => Self::KwAs,
            "ASC" => Self::KwAsc,
            "AUTHORIZATION" => Self::KwAuthorization,
            "BEGIN" => Self::KwBegin,
            "BETWEEN" => Self::KwBetween,
            "BREAK" => Self::KwBreak,
            "BROWSE" => Self::KwBrowse,
            "BULK" => Self::KwBulk,
            "BY" => Self::KwBy,
            "CASE" => Self::KwCase,
            "CHECK" => Self::KwCheck,
            "CHECKPOINT" => Self::KwCheckpoint,
            "CLUSTERED" => Self::KwClustered,
            "COLLATE" => Self::KwCollate,
            "COLUMN" => Self::KwColumn,
            "COMMIT" => Self::KwCommit,
            "CONSTRAINT" => Self::KwConstraint,
            "CONTAINS" => Self::KwContains,
            "CONTAINSTABLE" => Self::KwContainstable,
            "CONTINUE" => Self::KwContinue,
            "CONVERT" => Self::KwConvert,
            "CREATE" => Self::KwCreate,
            "CROSS" => Self::KwCross,
            "CURRENT" => Self::KwCurrent,
            "DATABASE" => Self::KwDatabase,
            "DECLARE" => Self::KwDeclare,
            "DEFAULT" => Self::KwDefault,
            "DELETE" => Self::KwDelete,
            "DENY" => Self::KwDeny,
            "DESC" => Self::KwDesc,
            "DISTINCT" => Self::KwDistinct,
            "DROP" => Self::KwDrop,
            "ELSE" => Self::KwElse,
            "END" => Self::KwEnd,
            "ESCAPE" => Self::KwEscape,
            "EXCEPT" => Self::KwExcept,
            "EXEC" => Self::KwExec,
            "EXECUTE" => Self::KwExecute,
            "EXISTS" => Self::KwExists,
            "FETCH" => Self::KwFetch,
            "FOR" => Self::KwFor,
            "FOREIGN" => Self::KwForeign,
            "FREETEXT" => Self::KwFreetext,
            "FREETEXTTABLE" => Self::KwFreetexttable,
            "FROM" => Self::KwFrom,
            "FULL" => Self::KwFull,
            "FUNCTION" => Self::KwFunction,
            "GOTO" => Self::KwGoto,
            "GRANT" => Self::KwGrant,
            "GROUP" => Self::KwGroup,
            "HAVING" => Self::KwHaving,
            "HOLDLOCK" => Self::KwHoldlock,
            "IDENTITY" => Self::KwIdentity,
            "IDENTITYCOL" => Self::KwIdentitycol,
            "IF" => Self::KwIf,
            "IN" => Self::KwIn,
            "INDEX" => Self::KwIndex,
            "INNER" => Self::KwInner,
            "INSERT" => Self::KwInsert,
            "INTERSECT" => Self::KwIntersect,
            "INTO" => Self::KwInto,
            "IS" => Self::KwIs,
            "JOIN" => Self::KwJoin,
            "KEY" => Self::KwKey,
            "KILL" => Self::KwKill,
            "LEFT" => Self::KwLeft,
            "LIKE" => Self::KwLike,
            "MERGE" => Self::KwMerge,
            "NONCLUSTERED" => Self::KwNonclustered,
            "NOT" => Self::KwNot,
            "NULL" => Self::KwNull,
            "OF" => Self::KwOf,
            "OFF" => Self::KwOff,
            "ON" => Self::KwOn,
            "OPENROWSET" => Self::KwOpenrowset,
            "OPTION" => Self::KwOption,
            "OR" => Self::KwOr,
            "ORDER" => Self::KwOrder,
            "OUTER" => Self::KwOuter,
            "OVER" => Self::KwOver,
            "PERCENT" => Self::KwPercent,
            "PIVOT" => Self::KwPivot,
            "PLAN" => Self::KwPlan,
            "PRIMARY" => Self::KwPrimary,
            "PRINT" => Self::KwPrint,
            "PROC" => Self::KwProc,
            "PROCEDURE" => Self::KwProcedure,
            "RAISERROR" => Self::KwRaiserror,
            "READ" => Self::KwRead,
            "REFERENCES" => Self::KwReferences,
            "RETURN" => Self::KwReturn,
            "REVOKE" => Self::KwRevoke,
            "RIGHT" => Self::KwRight,
            "ROLLBACK" => Self::KwRollback,
            "ROWGUIDCOL" => Self::KwRowguidcol,
            "SAVE" => Self::KwSave,
            "SCHEMA" => Self::KwSchema,
            "SELECT" => Self::KwSelect,
            "SET" => Self::KwSet,
            "SOME" => Self::KwSome,
            "TABLE" => Self::KwTable,
            "THEN" => Self::KwThen,
            "TO" => Self::KwTo,
            "TOP" => Self::KwTop,
            "TRAN" => Self::KwTran,
            "TRANSACTION" => Self::KwTransaction,
            "TRUNCATE" => Self::KwTruncate,
            "UNION" => Self::KwUnion,
            "UNIQUE" => Self::KwUnique,
            "UNPIVOT" => Self::KwUnpivot,
            "UPDATE" => Self::KwUpdate,
            "USE" => Self::KwUse,
            "USER" => Self::KwUser,
            "VALUES" => Self::KwValues,
            "VIEW" => Self::KwView,
            "WAITFOR" => Self::KwWaitfor,
            "WHEN" => Self::KwWhen,
            "WHERE" => Self::KwWhere,
            "WHILE" => Self::KwWhile,
            "WITH" => Self::KwWith,

            "APPLY" => Self::KwApply,
            "AT" => Self::KwAt,
            "CACHE" => Self::KwCache,
            "CATCH" => Self::KwCatch,
            "CHANGETABLE" => Self::KwChangetable,
            "COMMITTED" => Self::KwCommitted,
            "CUBE" => Self::KwCube,
            "CYCLE" => Self::KwCycle,
            "DELAY" => Self::KwDelay,
            "FIRST" => Self::KwFirst,
            "FOLLOWING" => Self::KwFollowing,
            "GO" => Self::KwGo,
            "GROUPING" => Self::KwGrouping,
            "INCLUDE" => Self::KwInclude,
            "INCREMENT" => Self::KwIncrement,
            "ISOLATION" => Self::KwIsolation,
            "JSON" => Self::KwJson,
            "LANGUAGE" => Self::KwLanguage,
            "LEVEL" => Self::KwLevel,
            "MATCHED" => Self::KwMatched,
            "NEXT" => Self::KwNext,
            "OFFSET" => Self::KwOffset,
            "ONLY" => Self::KwOnly,
            "OUTPUT" => Self::KwOutput,
            "PARTITION" => Self::KwPartition,
            "PRECEDING" => Self::KwPreceding,
            "PREDICT" => Self::KwPredict,
            "RANGE" => Self::KwRange,
            "REPEATABLE" => Self::KwRepeatable,
            "RETURNS" => Self::KwReturns,
            "ROLLUP" => Self::KwRollup,
            "ROW" => Self::KwRow,
            "ROWS" => Self::KwRows,
            "SEQUENCE" => Self::KwSequence,
            "SERIALIZABLE" => Self::KwSerializable,
            "SETS" => Self::KwSets,
            "SNAPSHOT" => Self::KwSnapshot,
            "SOURCE" => Self::KwSource,
            "START" => Self::KwStart,
            "TARGET" => Self::KwTarget,
            "THROW" => Self::KwThrow,
            "TIES" => Self::KwTies,
            "TIME" => Self::KwTime,
            "TRY" => Self::KwTry,
            "UNBOUNDED" => Self::KwUnbounded,
            "UNCOMMITTED" => Self::KwUncommitted,
            "UNKNOWN" => Self::KwUnknown,
            "USING" => Self::KwUsing,
            "VALUE" => Self::KwValue,
            "WINDOW" => Self::KwWindow,
            "WITHIN" => Self::KwWithin,
            "XML" => Self::KwXml,
            "ZONE" => Self::KwZone,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this keyword may also stand in identifier position.
    #[must_use]
    pub fn is_nonreserved_kw(&self) -> bool {
        matches!(
            self,
            Self::KwApply
                | Self::KwAt
                | Self::KwCache
                | Self::KwCatch
                | Self::KwChangetable
                | Self::KwCommitted
                | Self::KwCube
                | Self::KwCycle
                | Self::KwDelay
                | Self::KwFirst
                | Self::KwFollowing
                | Self::KwGo
                | Self::KwGrouping
                | Self::KwInclude
                | Self::KwIncrement
                | Self::KwIsolation
                | Self::KwJson
                | Self::KwLanguage
                | Self::KwLevel
                | Self::KwMatched
                | Self::KwNext
                | Self::KwOffset
                | Self::KwOnly
                | Self::KwOutput
                | Self::KwPartition
                | Self::KwPreceding
                | Self::KwPredict
                | Self::KwRange
                | Self::KwRepeatable
                | Self::KwReturns
                | Self::KwRollup
                | Self::KwRow
                | Self::KwRows
                | Self::KwSequence
                | Self::KwSerializable
                | Self::KwSets
                | Self::KwSnapshot
                | Self::KwSource
                | Self::KwStart
                | Self::KwTarget
                | Self::KwThrow
                | Self::KwTies
                | Self::KwTime
                | Self::KwTry
                | Self::KwUnbounded
                | Self::KwUncommitted
                | Self::KwUnknown
                | Self::KwUsing
                | Self::KwValue
                | Self::KwWindow
                | Self::KwWithin
                | Self::KwXml
                | Self::KwZone
        )
    }

    /// The canonical upper-case spelling of a keyword kind, if this is one.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn kw_to_str(&self) -> Option<&'static str> {
        let s = match self {
            Self::KwAdd => "ADD",
            Self::KwAll => "ALL",
            Self::KwAlter => "ALTER",
            Self::KwAnd => "AND",
            Self::KwAny => "ANY",
            Self::KwAs => "AS",
            Self::KwAsc => "ASC",
            Self::KwAuthorization => "AUTHORIZATION",
            Self::KwBegin => "BEGIN",
            Self::KwBetween => "BETWEEN",
            Self::KwBreak => "BREAK",
            Self::KwBrowse => "BROWSE",
            Self::KwBulk => "BULK",
            Self::KwBy => "BY",
            Self::KwCase => "CASE",
            Self::KwCheck => "CHECK",
            Self::KwCheckpoint => "CHECKPOINT",
            Self::KwClustered => "CLUSTERED",
            Self::KwCollate => "COLLATE",
            Self::KwColumn => "COLUMN",
            Self::KwCommit => "COMMIT",
            Self::KwConstraint => "CONSTRAINT",
            Self::KwContains => "CONTAINS",
            Self::KwContainstable => "CONTAINSTABLE",
            Self::KwContinue => "CONTINUE",
            Self::KwConvert => "CONVERT",
            Self::KwCreate => "CREATE",
            Self::KwCross => "CROSS",
            Self::KwCurrent => "CURRENT",
            Self::KwDatabase => "DATABASE",
            Self::KwDeclare => "DECLARE",
            Self::KwDefault => "DEFAULT",
            Self::KwDelete => "DELETE",
            Self::KwDeny => "DENY",
            Self::KwDesc => "DESC",
            Self::KwDistinct => "DISTINCT",
            Self::KwDrop => "DROP",
            Self::KwElse => "ELSE",
            Self::KwEnd => "END",
            Self::KwEscape => "ESCAPE",
            Self::KwExcept => "EXCEPT",
            Self::KwExec => "EXEC",
            Self::KwExecute => "EXECUTE",
            Self::KwExists => "EXISTS",
            Self::KwFetch => "FETCH",
            Self::KwFor => "FOR",
            Self::KwForeign => "FOREIGN",
            Self::KwFreetext => "FREETEXT",
            Self::KwFreetexttable => "FREETEXTTABLE",
            Self::KwFrom => "FROM",
            Self::KwFull => "FULL",
            Self::KwFunction => "FUNCTION",
            Self::KwGoto => "GOTO",
            Self::KwGrant => "GRANT",
            Self::KwGroup => "GROUP",
            Self::KwHaving => "HAVING",
            Self::KwHoldlock => "HOLDLOCK",
            Self::KwIdentity => "IDENTITY",
            Self::KwIdentitycol => "IDENTITYCOL",
            Self::KwIf => "IF",
            Self::KwIn => "IN",
            Self::KwIndex => "INDEX",
            Self::KwInner => "INNER",
            Self::KwInsert => "INSERT",
            Self::KwIntersect => "INTERSECT",
            Self::KwInto => "INTO",
            Self::KwIs => "IS",
            Self::KwJoin => "JOIN",
            Self::KwKey => "KEY",
            Self::KwKill => "KILL",
            Self::KwLeft => "LEFT",
            Self::KwLike => "LIKE",
            Self::KwMerge => "MERGE",
            Self::KwNonclustered => "NONCLUSTERED",
            Self::KwNot => "NOT",
            Self::KwNull => "NULL",
            Self::KwOf => "OF",
            Self::KwOff => "OFF",
            Self::KwOn => "ON",
            Self::KwOpenrowset => "OPENROWSET",
            Self::KwOption => "OPTION",
            Self::KwOr => "OR",
            Self::KwOrder => "ORDER",
            Self::KwOuter => "OUTER",
            Self::KwOver => "OVER",
            Self::KwPercent => "PERCENT",
            Self::KwPivot => "PIVOT",
            Self::KwPlan => "PLAN",
            Self::KwPrimary => "PRIMARY",
            Self::KwPrint => "PRINT",
            Self::KwProc => "PROC",
            Self::KwProcedure => "PROCEDURE",
            Self::KwRaiserror => "RAISERROR",
            Self::KwRead => "READ",
            Self::KwReferences => "REFERENCES",
            Self::KwReturn => "RETURN",
            Self::KwRevoke => "REVOKE",
            Self::KwRight => "RIGHT",
            Self::KwRollback => "ROLLBACK",
            Self::KwRowguidcol => "ROWGUIDCOL",
            Self::KwSave => "SAVE",
            Self::KwSchema => "SCHEMA",
            Self::KwSelect => "SELECT",
            Self::KwSet => "SET",
            Self::KwSome => "SOME",
            Self::KwTable => "TABLE",
            Self::KwThen => "THEN",
            Self::KwTo => "TO",
            Self::KwTop => "TOP",
            Self::KwTran => "TRAN",
            Self::KwTransaction => "TRANSACTION",
            Self::KwTruncate => "TRUNCATE",
            Self::KwUnion => "UNION",
            Self::KwUnique => "UNIQUE",
            Self::KwUnpivot => "UNPIVOT",
            Self::KwUpdate => "UPDATE",
            Self::KwUse => "USE",
            Self::KwUser => "USER",
            Self::KwValues => "VALUES",
            Self::KwView => "VIEW",
            Self::KwWaitfor => "WAITFOR",
            Self::KwWhen => "WHEN",
            Self::KwWhere => "WHERE",
            Self::KwWhile => "WHILE",
            Self::KwWith => "WITH",

            Self::KwApply => "APPLY",
            Self::KwAt => "AT",
            Self::KwCache => "CACHE",
            Self::KwCatch => "CATCH",
            Self::KwChangetable => "CHANGETABLE",
            Self::KwCommitted => "COMMITTED",
            Self::KwCube => "CUBE",
            Self::KwCycle => "CYCLE",
            Self::KwDelay => "DELAY",
            Self::KwFirst => "FIRST",
            Self::KwFollowing => "FOLLOWING",
            Self::KwGo => "GO",
            Self::KwGrouping => "GROUPING",
            Self::KwInclude => "INCLUDE",
            Self::KwIncrement => "INCREMENT",
            Self::KwIsolation => "ISOLATION",
            Self::KwJson => "JSON",
            Self::KwLanguage => "LANGUAGE",
            Self::KwLevel => "LEVEL",
            Self::KwMatched => "MATCHED",
            Self::KwNext => "NEXT",
            Self::KwOffset => "OFFSET",
            Self::KwOnly => "ONLY",
            Self::KwOutput => "OUTPUT",
            Self::KwPartition => "PARTITION",
            Self::KwPreceding => "PRECEDING",
            Self::KwPredict => "PREDICT",
            Self::KwRange => "RANGE",
            Self::KwRepeatable => "REPEATABLE",
            Self::KwReturns => "RETURNS",
            Self::KwRollup => "ROLLUP",
            Self::KwRow => "ROW",
            Self::KwRows => "ROWS",
            Self::KwSequence => "SEQUENCE",
            Self::KwSerializable => "SERIALIZABLE",
            Self::KwSets => "SETS",
            Self::KwSnapshot => "SNAPSHOT",
            Self::KwSource => "SOURCE",
            Self::KwStart => "START",
            Self::KwTarget => "TARGET",
            Self::KwThrow => "THROW",
            Self::KwTies => "TIES",
            Self::KwTime => "TIME",
            Self::KwTry => "TRY",
            Self::KwUnbounded => "UNBOUNDED",
            Self::KwUncommitted => "UNCOMMITTED",
            Self::KwUnknown => "UNKNOWN",
            Self::KwUsing => "USING",
            Self::KwValue => "VALUE",
            Self::KwWindow => "WINDOW",
            Self::KwWithin => "WITHIN",
            Self::KwXml => "XML",
            Self::KwZone => "ZONE",
            _ => return None,
        };
        Some(s)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(kw) = self.kw_to_str() {
            return write!(f, "keyword {kw}");
        }
        match self {
            Self::Integer(s) | Self::Numeric(s) | Self::Binary(s) => f.write_str(s),
            Self::String(s) => write!(f, "'{s}'"),
            Self::NationalString(s) => write!(f, "N'{s}'"),
            Self::Ident(s) => f.write_str(s),
            Self::BracketedIdent(s) => write!(f, "[{s}]"),
            Self::QuotedIdent(s) => write!(f, "\"{s}\""),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::LBrace => f.write_str("'{'"),
            Self::RBrace => f.write_str("'}'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Colon => f.write_str("':'"),
            Self::DoubleColon => f.write_str("'::'"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::PercentSign => f.write_str("'%'"),
            Self::Ampersand => f.write_str("'&'"),
            Self::Pipe => f.write_str("'|'"),
            Self::Caret => f.write_str("'^'"),
            Self::Tilde => f.write_str("'~'"),
            Self::Concat => f.write_str("'||'"),
            Self::Eq => f.write_str("'='"),
            Self::LessThan => f.write_str("'<'"),
            Self::GreaterThan => f.write_str("'>'"),
            Self::LessEqual => f.write_str("'<='"),
            Self::GreaterEqual => f.write_str("'>='"),
            Self::NotEqual => f.write_str("'<>'"),
            Self::BangEqual => f.write_str("'!='"),
            Self::BangLess => f.write_str("'!<'"),
            Self::BangGreater => f.write_str("'!>'"),
            Self::ShiftLeft => f.write_str("'<<'"),
            Self::ShiftRight => f.write_str("'>>'"),
            Self::PlusEq => f.write_str("'+='"),
            Self::MinusEq => f.write_str("'-='"),
            Self::StarEq => f.write_str("'*='"),
            Self::SlashEq => f.write_str("'/='"),
            Self::PercentEq => f.write_str("'%='"),
            Self::AmpEq => f.write_str("'&='"),
            Self::PipeEq => f.write_str("'|='"),
            Self::CaretEq => f.write_str("'^='"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(kind) => write!(f, "lex error: {kind}"),
            _ => f.write_str("keyword"),
        }
    }
}
