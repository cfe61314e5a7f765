//! Prefixed-name expansion and relative IRI resolution.

use super::config::NamespaceResolver;
use sparql_vocab::{rdf, rdfs, xsd};
use std::collections::HashMap;

/// Prefix to namespace table.
///
/// The default map knows `rdf:`, `rdfs:` and `xsd:`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: HashMap<String, String>,
}

impl PrefixMap {
    /// An empty map.
    pub fn empty() -> Self {
        Self {
            prefixes: HashMap::new(),
        }
    }

    /// Bind `prefix` (without the colon) to `namespace`, replacing any
    /// existing binding.
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Builder form of [`PrefixMap::insert`].
    pub fn with(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.insert(prefix, namespace);
        self
    }

    /// Namespace bound to `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }
}

impl Default for PrefixMap {
    fn default() -> Self {
        Self::empty()
            .with("rdf", rdf::NS)
            .with("rdfs", rdfs::NS)
            .with("xsd", xsd::NS)
    }
}

impl NamespaceResolver for PrefixMap {
    fn resolve_qname(&self, qname: &str, base: Option<&str>) -> Option<String> {
        let (prefix, local) = qname.split_once(':')?;
        let local = unescape_local(local);
        match self.get(prefix) {
            Some(namespace) => Some(format!("{namespace}{local}")),
            // An unbound default prefix falls back to the base IRI
            None if prefix.is_empty() => base.map(|b| format!("{b}{local}")),
            None => None,
        }
    }

    fn resolve_iri(&self, iri: &str, base: Option<&str>) -> String {
        match base {
            Some(base) => resolve_reference(base, iri),
            None => iri.to_string(),
        }
    }
}

/// Drop `PN_LOCAL_ESC` backslashes (`ex:a\.b` names `a.b`).
fn unescape_local(local: &str) -> String {
    let mut out = String::with_capacity(local.len());
    let mut chars = local.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

// =============================================================================
// RFC 3986 reference resolution
// =============================================================================

/// Components of an IRI reference. Absent components are `None`; an empty
/// query (`?`) is `Some("")`.
#[derive(Debug, Default)]
struct IriParts<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fn split_iri(iri: &str) -> IriParts<'_> {
    let (rest, fragment) = match iri.split_once('#') {
        Some((r, f)) => (r, Some(f)),
        None => (iri, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((r, q)) => (r, Some(q)),
        None => (rest, None),
    };

    let (scheme, rest) = match rest.find(':') {
        Some(pos) if is_scheme(&rest[..pos]) => (Some(&rest[..pos]), &rest[pos + 1..]),
        _ => (None, rest),
    };

    let (authority, path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            (Some(&after[..end]), &after[end..])
        }
        None => (None, rest),
    };

    IriParts {
        scheme,
        authority,
        path,
        query,
        fragment,
    }
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve `reference` against an absolute `base` (RFC 3986 section 5.2.2).
pub fn resolve_reference(base: &str, reference: &str) -> String {
    let r = split_iri(reference);
    if r.scheme.is_some() {
        return recompose(r.scheme, r.authority, &remove_dot_segments(r.path), r.query, r.fragment);
    }

    let b = split_iri(base);
    let (authority, path, query) = if r.authority.is_some() {
        (r.authority, remove_dot_segments(r.path), r.query)
    } else if r.path.is_empty() {
        (b.authority, b.path.to_string(), r.query.or(b.query))
    } else if r.path.starts_with('/') {
        (b.authority, remove_dot_segments(r.path), r.query)
    } else {
        (b.authority, remove_dot_segments(&merge_paths(&b, r.path)), r.query)
    };

    recompose(b.scheme, authority, &path, query, r.fragment)
}

/// Section 5.2.3.
fn merge_paths(base: &IriParts<'_>, reference: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        return format!("/{reference}");
    }
    match base.path.rfind('/') {
        Some(pos) => format!("{}{reference}", &base.path[..=pos]),
        None => reference.to_string(),
    }
}

/// Section 5.2.4.
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let mut segments = path.split('/').peekable();
    let absolute = path.starts_with('/');
    if absolute {
        segments.next();
    }

    while let Some(segment) = segments.next() {
        let last = segments.peek().is_none();
        match segment {
            "." => {
                if last {
                    output.push("");
                }
            }
            ".." => {
                output.pop();
                if last {
                    output.push("");
                }
            }
            s => output.push(s),
        }
    }

    let joined = output.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

fn recompose(
    scheme: Option<&str>,
    authority: Option<&str>,
    path: &str,
    query: Option<&str>,
    fragment: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(scheme) = scheme {
        out.push_str(scheme);
        out.push(':');
    }
    if let Some(authority) = authority {
        out.push_str("//");
        out.push_str(authority);
    }
    out.push_str(path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://a/b/c/d;p?q";

    #[test]
    fn test_rfc3986_normal_examples() {
        let cases = [
            ("g:h", "g:h"),
            ("g", "http://a/b/c/g"),
            ("./g", "http://a/b/c/g"),
            ("g/", "http://a/b/c/g/"),
            ("/g", "http://a/g"),
            ("//g", "http://g"),
            ("?y", "http://a/b/c/d;p?y"),
            ("g?y", "http://a/b/c/g?y"),
            ("#s", "http://a/b/c/d;p?q#s"),
            ("g#s", "http://a/b/c/g#s"),
            ("", "http://a/b/c/d;p?q"),
            (".", "http://a/b/c/"),
            ("./", "http://a/b/c/"),
            ("..", "http://a/b/"),
            ("../", "http://a/b/"),
            ("../g", "http://a/b/g"),
            ("../..", "http://a/"),
            ("../../g", "http://a/g"),
        ];
        for (reference, expected) in cases {
            assert_eq!(resolve_reference(BASE, reference), expected, "{reference}");
        }
    }

    #[test]
    fn test_rfc3986_abnormal_examples() {
        assert_eq!(resolve_reference(BASE, "../../../g"), "http://a/g");
        assert_eq!(resolve_reference(BASE, "/./g"), "http://a/g");
        assert_eq!(resolve_reference(BASE, "/../g"), "http://a/g");
        assert_eq!(resolve_reference(BASE, "g."), "http://a/b/c/g.");
        assert_eq!(resolve_reference(BASE, "./../g"), "http://a/b/g");
        assert_eq!(resolve_reference(BASE, "g/./h"), "http://a/b/c/g/h");
    }

    #[test]
    fn test_prefix_map_defaults() {
        let map = PrefixMap::default();
        assert_eq!(
            map.resolve_qname("xsd:integer", None).as_deref(),
            Some(xsd::INTEGER)
        );
        assert_eq!(map.resolve_qname("ex:thing", None), None);
        assert_eq!(map.resolve_qname("nocolon", None), None);
    }

    #[test]
    fn test_qname_escapes_and_default_prefix() {
        let map = PrefixMap::empty().with("ex", "http://example.org/");
        assert_eq!(
            map.resolve_qname("ex:a\\.b", None).as_deref(),
            Some("http://example.org/a.b")
        );
        assert_eq!(
            map.resolve_qname(":local", Some("http://base.org/")).as_deref(),
            Some("http://base.org/local")
        );
        assert_eq!(map.resolve_qname(":local", None), None);
    }

    #[test]
    fn test_resolve_iri_without_base() {
        let map = PrefixMap::default();
        assert_eq!(map.resolve_iri("relative/path", None), "relative/path");
        assert_eq!(
            map.resolve_iri("relative", Some("http://example.org/dir/doc")),
            "http://example.org/dir/relative"
        );
    }
}
