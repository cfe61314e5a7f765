//! RDF literals, booleans and untyped numerics.

use super::ExpressionParser;
use crate::ast::Expression;
use crate::diag::{DiagCode, ParseError, ParseErrorKind};
use crate::lex::{Token, TokenKind};
use crate::parse::queue::TokenQueue;
use crate::parse::{resolve_iri_token, unexpected};
use crate::value::classify::is_valid_for_rank;
use crate::value::{numeric_rank, sniff_numeric, Literal, NumericRank};
use num_bigint::BigInt;
use sparql_vocab::xsd;
use std::str::FromStr;

impl ExpressionParser<'_> {
    /// A quoted string with an optional language tag or `^^datatype`.
    pub(super) fn parse_rdf_literal(
        &self,
        tokens: &mut TokenQueue,
    ) -> Result<Expression, ParseError> {
        let token = tokens.expect(TokenKind::StringLiteral, "a string literal")?;

        match tokens.peek_kind() {
            Some(TokenKind::LangTag) => {
                let lang = tokens.next_or_eof("a language tag")?;
                let literal = Literal::lang(token.text.clone(), &lang.text);
                Ok(Expression::constant(literal, token.span.union(lang.span)))
            }
            Some(TokenKind::DoubleCaret) => {
                tokens.dequeue();
                let datatype_token = tokens.next_or_eof("a datatype IRI after '^^'")?;
                if !datatype_token.kind.is_iri_like() {
                    return Err(unexpected(&datatype_token, "expected a datatype IRI after '^^'"));
                }
                let datatype = resolve_iri_token(self.config, &datatype_token)?;
                let span = token.span.union(datatype_token.span);
                let literal = self.typed_literal(&token, &datatype)?;
                Ok(Expression::constant(literal, span))
            }
            _ => Ok(Expression::constant(Literal::plain(token.text), token.span)),
        }
    }

    fn typed_literal(&self, token: &Token, datatype: &str) -> Result<Literal, ParseError> {
        let lexical = &*token.text;
        let rank = numeric_rank(datatype);

        if rank.is_numeric() {
            if !is_valid_for_rank(lexical, rank) && self.config.validate_typed_literals() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidLiteral,
                    DiagCode::InvalidTypedLiteral,
                    format!("The value '{lexical}' is not valid for the datatype <{datatype}>"),
                )
                .with_token(token.summary()));
            }
            return Ok(Literal::typed(token.text.clone(), datatype));
        }

        if datatype == xsd::BOOLEAN {
            return Ok(match lexical {
                "true" => Literal::boolean(true),
                "false" => Literal::boolean(false),
                _ => Literal::string(token.text.clone()),
            });
        }

        Ok(Literal::typed(token.text.clone(), datatype))
    }

    /// `true`, `false` or an unquoted number.
    pub(super) fn parse_plain_literal(
        &self,
        tokens: &mut TokenQueue,
    ) -> Result<Expression, ParseError> {
        let token = tokens.expect(TokenKind::PlainLiteral, "a literal")?;
        match &*token.text {
            "true" => Ok(Expression::constant(Literal::boolean(true), token.span)),
            "false" => Ok(Expression::constant(Literal::boolean(false), token.span)),
            _ => self.numeric_literal(&token),
        }
    }

    /// An unquoted number, typed by the first lexical grammar it fits.
    pub(super) fn numeric_literal(&self, token: &Token) -> Result<Expression, ParseError> {
        let literal = canonical_numeric(&token.text).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::InvalidLiteral,
                DiagCode::InvalidNumericLiteral,
                format!("'{}' is not a valid numeric literal", token.text),
            )
            .with_token(token.summary())
        })?;
        Ok(Expression::constant(literal, token.span))
    }
}

/// Type an untyped numeric lexical form and bring it into canonical shape.
///
/// `+5` becomes `5`, `.5` becomes `0.5` and `5.` becomes `5.0`. Doubles only
/// lose a leading `+`.
pub(crate) fn canonical_numeric(text: &str) -> Option<Literal> {
    let rank = sniff_numeric(text)?;
    let lexical = match rank {
        NumericRank::Integer => BigInt::from_str(text.strip_prefix('+').unwrap_or(text))
            .ok()?
            .to_string(),
        NumericRank::Decimal => canonical_decimal(text),
        _ => text.strip_prefix('+').unwrap_or(text).to_string(),
    };
    Some(Literal::typed(lexical, rank.datatype()?))
}

fn canonical_decimal(text: &str) -> String {
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => ("-", &text[1..]),
        Some(b'+') => ("", &text[1..]),
        _ => ("", text),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let int = if int.is_empty() { "0" } else { int };
    let frac = if frac.is_empty() { "0" } else { frac };
    format!("{sign}{int}.{frac}")
}
