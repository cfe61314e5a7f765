//! RDF Vocabulary Constants for SPARQL expression handling
//!
//! Centralizes the vocabulary IRIs the expression and path compiler needs:
//! datatype IRIs for literal construction and value comparison, the
//! `rdf:type` shorthand used by `a` in property paths, and the IRIs under
//! which the non-standard aggregates can be invoked as extension functions.
//!
//! # Organization
//!
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `agg` - extension aggregate IRIs (http://www.w3.org/ns/sparql#)

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace IRI
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// RDFS namespace IRI
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:byte IRI
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";

    /// xsd:unsignedLong IRI
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";

    /// xsd:unsignedInt IRI
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";

    /// xsd:unsignedShort IRI
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";

    /// xsd:unsignedByte IRI
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";

    /// xsd:nonNegativeInteger IRI
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";

    /// xsd:positiveInteger IRI
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";

    /// xsd:nonPositiveInteger IRI
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";

    /// xsd:negativeInteger IRI
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:duration IRI
    pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    /// xsd:base64Binary IRI
    pub const BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";

    /// xsd:hexBinary IRI
    pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";

    /// Datatypes derived from xsd:integer.
    pub const INTEGER_DERIVED: [&str; 12] = [
        BYTE,
        INT,
        LONG,
        NEGATIVE_INTEGER,
        NON_NEGATIVE_INTEGER,
        NON_POSITIVE_INTEGER,
        POSITIVE_INTEGER,
        SHORT,
        UNSIGNED_BYTE,
        UNSIGNED_INT,
        UNSIGNED_LONG,
        UNSIGNED_SHORT,
    ];

    /// Check if a datatype IRI is xsd:integer or one of its derived types
    #[inline]
    pub fn is_integer_family(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER
                | LONG
                | INT
                | SHORT
                | BYTE
                | UNSIGNED_LONG
                | UNSIGNED_INT
                | UNSIGNED_SHORT
                | UNSIGNED_BYTE
                | NON_NEGATIVE_INTEGER
                | POSITIVE_INTEGER
                | NON_POSITIVE_INTEGER
                | NEGATIVE_INTEGER
        )
    }

    /// Check if a datatype IRI is a numeric type
    #[inline]
    pub fn is_numeric_datatype(datatype_iri: &str) -> bool {
        is_integer_family(datatype_iri) || matches!(datatype_iri, DECIMAL | FLOAT | DOUBLE)
    }
}

/// Extension aggregate IRIs
///
/// Aggregates reachable through `<iri>(args)` call syntax in addition to
/// their keyword forms.
pub mod agg {
    /// Namespace for extension aggregates
    pub const NS: &str = "http://www.w3.org/ns/sparql#";

    /// Median of the numeric values in a group
    pub const MEDIAN: &str = "http://www.w3.org/ns/sparql#median";

    /// Most frequent value in a group
    pub const MODE: &str = "http://www.w3.org/ns/sparql#mode";

    /// Numeric minimum, ignoring non-numeric values
    pub const NMIN: &str = "http://www.w3.org/ns/sparql#nmin";

    /// Numeric maximum, ignoring non-numeric values
    pub const NMAX: &str = "http://www.w3.org/ns/sparql#nmax";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_family() {
        assert!(xsd::is_integer_family(xsd::INTEGER));
        assert!(xsd::is_integer_family(xsd::UNSIGNED_SHORT));
        for dt in xsd::INTEGER_DERIVED {
            assert!(xsd::is_integer_family(dt), "{dt} should be integer-derived");
        }
        assert!(!xsd::is_integer_family(xsd::DECIMAL));
    }

    #[test]
    fn test_numeric_datatype() {
        assert!(xsd::is_numeric_datatype(xsd::DOUBLE));
        assert!(xsd::is_numeric_datatype(xsd::FLOAT));
        assert!(!xsd::is_numeric_datatype(xsd::STRING));
        assert!(!xsd::is_numeric_datatype(xsd::DATE));
    }

    #[test]
    fn test_namespaces_prefix_constants() {
        assert!(rdf::TYPE.starts_with(rdf::NS));
        assert!(xsd::HEX_BINARY.starts_with(xsd::NS));
        assert!(agg::MEDIAN.starts_with(agg::NS));
    }
}
