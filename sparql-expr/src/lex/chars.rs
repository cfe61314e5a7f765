//! SPARQL character class predicates.
//!
//! Character productions from the SPARQL 1.1 grammar used for prefixed
//! names, blank node labels and variable names.

/// `PN_CHARS_BASE`: ASCII letters plus the Unicode letter ranges.
pub fn is_pn_chars_base(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c,
            '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{02FF}'
            | '\u{0370}'..='\u{037D}'
            | '\u{037F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}')
}

/// `PN_CHARS_U ::= PN_CHARS_BASE | '_'`
pub fn is_pn_chars_u(c: char) -> bool {
    c == '_' || is_pn_chars_base(c)
}

/// Combining marks allowed after the first character of names.
fn is_name_continuation(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

/// `PN_CHARS ::= PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]`
pub fn is_pn_chars(c: char) -> bool {
    c == '-' || is_pn_chars_u(c) || is_name_continuation(c)
}

/// First character of `PN_PREFIX`.
pub fn is_pn_prefix_start(c: char) -> bool {
    is_pn_chars_base(c)
}

/// First character of `PN_LOCAL` (PLX escapes are handled by the lexer).
pub fn is_pn_local_start(c: char) -> bool {
    c == ':' || c.is_ascii_digit() || is_pn_chars_u(c)
}

/// `WS ::= #x20 | #x9 | #xD | #xA`
pub fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Characters allowed unescaped inside `<...>`.
pub fn is_iri_char(c: char) -> bool {
    !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '\x00'..='\x20')
}

/// First character of `VARNAME`.
pub fn is_varname_start(c: char) -> bool {
    c.is_ascii_digit() || is_pn_chars_u(c)
}

/// Subsequent characters of `VARNAME` (no `-`, unlike `PN_CHARS`).
pub fn is_varname_char(c: char) -> bool {
    is_pn_chars_u(c) || is_name_continuation(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pn_chars_classes() {
        assert!(is_pn_chars_base('\u{00E9}'));
        assert!(!is_pn_chars_base('_'));
        assert!(is_pn_chars_u('_'));
        assert!(is_pn_chars('-'));
        assert!(is_pn_chars('7'));
        assert!(!is_pn_chars('.'));
        assert!(!is_pn_chars(':'));
    }

    #[test]
    fn test_varname_excludes_hyphen() {
        assert!(is_varname_start('0'));
        assert!(is_varname_char('x'));
        assert!(!is_varname_char('-'));
        assert!(!is_varname_start('-'));
    }

    #[test]
    fn test_iri_chars() {
        assert!(is_iri_char('#'));
        assert!(is_iri_char('\u{00E9}'));
        assert!(!is_iri_char(' '));
        assert!(!is_iri_char('>'));
    }
}
