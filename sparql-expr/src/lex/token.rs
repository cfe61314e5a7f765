//! SPARQL Token types.
//!
//! Tokens are the input to the expression and path parsers. Each token
//! carries its kind, its text payload and its source span. The payload is
//! already normalized by the tokenizer: IRIs without angle brackets,
//! variables without their sigil, strings unescaped, language tags without
//! the `@`.

use crate::diag::TokenSummary;
use crate::span::SourceSpan;
use std::sync::Arc;

/// A token with its text and source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token kind
    pub kind: TokenKind,
    /// Token payload
    pub text: Arc<str>,
    /// Source location
    pub span: SourceSpan,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<Arc<str>>, span: SourceSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Check if this token is of a specific kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Summary used to point diagnostics at this token.
    pub fn summary(&self) -> TokenSummary {
        TokenSummary {
            kind: Arc::from(self.kind.name()),
            text: self.text.clone(),
            span: self.span,
        }
    }
}

/// Token kinds for SPARQL expressions and property paths.
///
/// Based on SPARQL 1.1 grammar terminals, restricted to what expressions,
/// paths and the bodies of `EXISTS` blocks need.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // Terms
    // =========================================================================
    /// Full IRI, text without brackets: `<http://example.org/>`
    Iri,
    /// Prefixed name, text `prefix:local` (either side may be empty)
    QName,
    /// Variable: `?name` or `$name` (text without the sigil)
    Var,
    /// Quoted string literal (text unescaped)
    StringLiteral,
    /// Unquoted numeric literal (with optional sign) or `true`/`false`
    PlainLiteral,
    /// Language tag, text without the `@`
    LangTag,
    /// Labeled blank node: `_:name` (text is the label)
    BlankNode,

    // =========================================================================
    // Keywords (case-insensitive in SPARQL, except `a`)
    // =========================================================================
    /// `a` (shorthand for rdf:type)
    KwA,

    // Expression keywords
    KwDistinct,
    KwAll,
    KwSeparator,
    KwNot,
    KwIn,
    KwExists,
    KwCall,

    // Aggregates
    KwCount,
    KwSum,
    KwAvg,
    KwMin,
    KwMax,
    KwGroupConcat,
    KwSample,
    KwMedian,
    KwMode,
    KwNMin,
    KwNMax,

    // Built-in functions
    KwAbs,
    KwBNode,
    KwBound,
    KwCeil,
    KwCoalesce,
    KwConcat,
    KwContains,
    KwDatatype,
    KwDay,
    KwEncodeForUri,
    KwFloor,
    KwHours,
    KwIf,
    KwIri,
    KwUri,
    KwIsBlank,
    KwIsIri,
    KwIsUri,
    KwIsLiteral,
    KwIsNumeric,
    KwLang,
    KwLangMatches,
    KwLcase,
    KwMd5,
    KwMinutes,
    KwMonth,
    KwNow,
    KwRand,
    KwRegex,
    KwReplace,
    KwRound,
    KwSameTerm,
    KwSeconds,
    KwSha1,
    KwSha224,
    KwSha256,
    KwSha384,
    KwSha512,
    KwStr,
    KwStrAfter,
    KwStrBefore,
    KwStrDt,
    KwStrEnds,
    KwStrLang,
    KwStrlen,
    KwStrStarts,
    KwStrUuid,
    KwSubstr,
    KwTimezone,
    KwTz,
    KwUcase,
    KwUuid,
    KwYear,

    // Graph pattern keywords (only carried through to EXISTS bodies)
    KwSelect,
    KwWhere,
    KwFilter,
    KwOptional,
    KwUnion,
    KwMinus,
    KwGraph,
    KwBind,
    KwAs,
    KwValues,
    KwService,
    KwGroup,
    KwBy,
    KwOrder,
    KwHaving,
    KwLimit,
    KwOffset,
    KwUndef,

    // =========================================================================
    // Punctuation / Operators
    // =========================================================================
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `^^` (datatype marker)
    DoubleCaret,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `!`
    Bang,
    /// `?` (in property paths)
    Question,
    /// `|` (in property paths)
    Pipe,
    /// `^` (inverse in property paths)
    Caret,
}

impl TokenKind {
    /// Check if this is a keyword token.
    pub fn is_keyword(&self) -> bool {
        self.keyword_str().is_some()
    }

    /// Check if this token names an IRI (full or prefixed).
    pub fn is_iri_like(&self) -> bool {
        matches!(self, TokenKind::Iri | TokenKind::QName)
    }

    /// Get the keyword string for this token kind.
    pub fn keyword_str(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::KwA => "a",
            TokenKind::KwDistinct => "DISTINCT",
            TokenKind::KwAll => "ALL",
            TokenKind::KwSeparator => "SEPARATOR",
            TokenKind::KwNot => "NOT",
            TokenKind::KwIn => "IN",
            TokenKind::KwExists => "EXISTS",
            TokenKind::KwCall => "CALL",
            TokenKind::KwCount => "COUNT",
            TokenKind::KwSum => "SUM",
            TokenKind::KwAvg => "AVG",
            TokenKind::KwMin => "MIN",
            TokenKind::KwMax => "MAX",
            TokenKind::KwGroupConcat => "GROUP_CONCAT",
            TokenKind::KwSample => "SAMPLE",
            TokenKind::KwMedian => "MEDIAN",
            TokenKind::KwMode => "MODE",
            TokenKind::KwNMin => "NMIN",
            TokenKind::KwNMax => "NMAX",
            TokenKind::KwAbs => "ABS",
            TokenKind::KwBNode => "BNODE",
            TokenKind::KwBound => "BOUND",
            TokenKind::KwCeil => "CEIL",
            TokenKind::KwCoalesce => "COALESCE",
            TokenKind::KwConcat => "CONCAT",
            TokenKind::KwContains => "CONTAINS",
            TokenKind::KwDatatype => "DATATYPE",
            TokenKind::KwDay => "DAY",
            TokenKind::KwEncodeForUri => "ENCODE_FOR_URI",
            TokenKind::KwFloor => "FLOOR",
            TokenKind::KwHours => "HOURS",
            TokenKind::KwIf => "IF",
            TokenKind::KwIri => "IRI",
            TokenKind::KwUri => "URI",
            TokenKind::KwIsBlank => "ISBLANK",
            TokenKind::KwIsIri => "ISIRI",
            TokenKind::KwIsUri => "ISURI",
            TokenKind::KwIsLiteral => "ISLITERAL",
            TokenKind::KwIsNumeric => "ISNUMERIC",
            TokenKind::KwLang => "LANG",
            TokenKind::KwLangMatches => "LANGMATCHES",
            TokenKind::KwLcase => "LCASE",
            TokenKind::KwMd5 => "MD5",
            TokenKind::KwMinutes => "MINUTES",
            TokenKind::KwMonth => "MONTH",
            TokenKind::KwNow => "NOW",
            TokenKind::KwRand => "RAND",
            TokenKind::KwRegex => "REGEX",
            TokenKind::KwReplace => "REPLACE",
            TokenKind::KwRound => "ROUND",
            TokenKind::KwSameTerm => "SAMETERM",
            TokenKind::KwSeconds => "SECONDS",
            TokenKind::KwSha1 => "SHA1",
            TokenKind::KwSha224 => "SHA224",
            TokenKind::KwSha256 => "SHA256",
            TokenKind::KwSha384 => "SHA384",
            TokenKind::KwSha512 => "SHA512",
            TokenKind::KwStr => "STR",
            TokenKind::KwStrAfter => "STRAFTER",
            TokenKind::KwStrBefore => "STRBEFORE",
            TokenKind::KwStrDt => "STRDT",
            TokenKind::KwStrEnds => "STRENDS",
            TokenKind::KwStrLang => "STRLANG",
            TokenKind::KwStrlen => "STRLEN",
            TokenKind::KwStrStarts => "STRSTARTS",
            TokenKind::KwStrUuid => "STRUUID",
            TokenKind::KwSubstr => "SUBSTR",
            TokenKind::KwTimezone => "TIMEZONE",
            TokenKind::KwTz => "TZ",
            TokenKind::KwUcase => "UCASE",
            TokenKind::KwUuid => "UUID",
            TokenKind::KwYear => "YEAR",
            TokenKind::KwSelect => "SELECT",
            TokenKind::KwWhere => "WHERE",
            TokenKind::KwFilter => "FILTER",
            TokenKind::KwOptional => "OPTIONAL",
            TokenKind::KwUnion => "UNION",
            TokenKind::KwMinus => "MINUS",
            TokenKind::KwGraph => "GRAPH",
            TokenKind::KwBind => "BIND",
            TokenKind::KwAs => "AS",
            TokenKind::KwValues => "VALUES",
            TokenKind::KwService => "SERVICE",
            TokenKind::KwGroup => "GROUP",
            TokenKind::KwBy => "BY",
            TokenKind::KwOrder => "ORDER",
            TokenKind::KwHaving => "HAVING",
            TokenKind::KwLimit => "LIMIT",
            TokenKind::KwOffset => "OFFSET",
            TokenKind::KwUndef => "UNDEF",
            _ => return None,
        })
    }

    /// Stable display name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Iri => "IRI",
            TokenKind::QName => "QNAME",
            TokenKind::Var => "VARIABLE",
            TokenKind::StringLiteral => "LITERAL",
            TokenKind::PlainLiteral => "PLAINLITERAL",
            TokenKind::LangTag => "LANGSPEC",
            TokenKind::BlankNode => "BLANKNODE",
            TokenKind::LBrace => "LEFTCURLYBRACKET",
            TokenKind::RBrace => "RIGHTCURLYBRACKET",
            TokenKind::LParen => "LEFTBRACKET",
            TokenKind::RParen => "RIGHTBRACKET",
            TokenKind::LBracket => "LEFTSQBRACKET",
            TokenKind::RBracket => "RIGHTSQBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Dot => "DOT",
            TokenKind::DoubleCaret => "HATHAT",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Eq => "EQUALS",
            TokenKind::Ne => "NOTEQUALS",
            TokenKind::Lt => "LESSTHAN",
            TokenKind::Gt => "GREATERTHAN",
            TokenKind::Le => "LESSTHANOREQUALTO",
            TokenKind::Ge => "GREATERTHANOREQUALTO",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Bang => "NEGATION",
            TokenKind::Question => "QUESTION",
            TokenKind::Pipe => "BITWISEOR",
            TokenKind::Caret => "HAT",
            TokenKind::KwA => "KEYWORDA",
            kw => kw.keyword_str().unwrap_or("KEYWORD"),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a string to its keyword token kind (case-insensitive).
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    // Note: SPARQL keywords are case-insensitive
    match s.to_ascii_uppercase().as_str() {
        "DISTINCT" => Some(TokenKind::KwDistinct),
        "ALL" => Some(TokenKind::KwAll),
        "SEPARATOR" => Some(TokenKind::KwSeparator),
        "NOT" => Some(TokenKind::KwNot),
        "IN" => Some(TokenKind::KwIn),
        "EXISTS" => Some(TokenKind::KwExists),
        "CALL" => Some(TokenKind::KwCall),
        "COUNT" => Some(TokenKind::KwCount),
        "SUM" => Some(TokenKind::KwSum),
        "AVG" => Some(TokenKind::KwAvg),
        "MIN" => Some(TokenKind::KwMin),
        "MAX" => Some(TokenKind::KwMax),
        "GROUP_CONCAT" => Some(TokenKind::KwGroupConcat),
        "SAMPLE" => Some(TokenKind::KwSample),
        "MEDIAN" => Some(TokenKind::KwMedian),
        "MODE" => Some(TokenKind::KwMode),
        "NMIN" => Some(TokenKind::KwNMin),
        "NMAX" => Some(TokenKind::KwNMax),
        "ABS" => Some(TokenKind::KwAbs),
        "BNODE" => Some(TokenKind::KwBNode),
        "BOUND" => Some(TokenKind::KwBound),
        "CEIL" => Some(TokenKind::KwCeil),
        "COALESCE" => Some(TokenKind::KwCoalesce),
        "CONCAT" => Some(TokenKind::KwConcat),
        "CONTAINS" => Some(TokenKind::KwContains),
        "DATATYPE" => Some(TokenKind::KwDatatype),
        "DAY" => Some(TokenKind::KwDay),
        "ENCODE_FOR_URI" => Some(TokenKind::KwEncodeForUri),
        "FLOOR" => Some(TokenKind::KwFloor),
        "HOURS" => Some(TokenKind::KwHours),
        "IF" => Some(TokenKind::KwIf),
        "IRI" => Some(TokenKind::KwIri),
        "URI" => Some(TokenKind::KwUri),
        "ISBLANK" => Some(TokenKind::KwIsBlank),
        "ISIRI" => Some(TokenKind::KwIsIri),
        "ISURI" => Some(TokenKind::KwIsUri),
        "ISLITERAL" => Some(TokenKind::KwIsLiteral),
        "ISNUMERIC" => Some(TokenKind::KwIsNumeric),
        "LANG" => Some(TokenKind::KwLang),
        "LANGMATCHES" => Some(TokenKind::KwLangMatches),
        "LCASE" => Some(TokenKind::KwLcase),
        "MD5" => Some(TokenKind::KwMd5),
        "MINUTES" => Some(TokenKind::KwMinutes),
        "MONTH" => Some(TokenKind::KwMonth),
        "NOW" => Some(TokenKind::KwNow),
        "RAND" => Some(TokenKind::KwRand),
        "REGEX" => Some(TokenKind::KwRegex),
        "REPLACE" => Some(TokenKind::KwReplace),
        "ROUND" => Some(TokenKind::KwRound),
        "SAMETERM" => Some(TokenKind::KwSameTerm),
        "SECONDS" => Some(TokenKind::KwSeconds),
        "SHA1" => Some(TokenKind::KwSha1),
        "SHA224" => Some(TokenKind::KwSha224),
        "SHA256" => Some(TokenKind::KwSha256),
        "SHA384" => Some(TokenKind::KwSha384),
        "SHA512" => Some(TokenKind::KwSha512),
        "STR" => Some(TokenKind::KwStr),
        "STRAFTER" => Some(TokenKind::KwStrAfter),
        "STRBEFORE" => Some(TokenKind::KwStrBefore),
        "STRDT" => Some(TokenKind::KwStrDt),
        "STRENDS" => Some(TokenKind::KwStrEnds),
        "STRLANG" => Some(TokenKind::KwStrLang),
        "STRLEN" => Some(TokenKind::KwStrlen),
        "STRSTARTS" => Some(TokenKind::KwStrStarts),
        "STRUUID" => Some(TokenKind::KwStrUuid),
        "SUBSTR" => Some(TokenKind::KwSubstr),
        "TIMEZONE" => Some(TokenKind::KwTimezone),
        "TZ" => Some(TokenKind::KwTz),
        "UCASE" => Some(TokenKind::KwUcase),
        "UUID" => Some(TokenKind::KwUuid),
        "YEAR" => Some(TokenKind::KwYear),
        "SELECT" => Some(TokenKind::KwSelect),
        "WHERE" => Some(TokenKind::KwWhere),
        "FILTER" => Some(TokenKind::KwFilter),
        "OPTIONAL" => Some(TokenKind::KwOptional),
        "UNION" => Some(TokenKind::KwUnion),
        "MINUS" => Some(TokenKind::KwMinus),
        "GRAPH" => Some(TokenKind::KwGraph),
        "BIND" => Some(TokenKind::KwBind),
        "AS" => Some(TokenKind::KwAs),
        "VALUES" => Some(TokenKind::KwValues),
        "SERVICE" => Some(TokenKind::KwService),
        "GROUP" => Some(TokenKind::KwGroup),
        "BY" => Some(TokenKind::KwBy),
        "ORDER" => Some(TokenKind::KwOrder),
        "HAVING" => Some(TokenKind::KwHaving),
        "LIMIT" => Some(TokenKind::KwLimit),
        "OFFSET" => Some(TokenKind::KwOffset),
        "UNDEF" => Some(TokenKind::KwUndef),
        // Special case: 'a' is only a keyword when lowercase
        _ if s == "a" => Some(TokenKind::KwA),
        _ => None,
    }
}
