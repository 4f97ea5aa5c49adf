//! Convert bibliographic citations between OpenURL context objects and structured records.
//!
//! `bibkev` maps the flat, multi-valued `key=value` encoding used by link resolvers
//! (OpenURL 0.1 and Z39.88-2004 KEV context objects) to a structured BibJSON-style
//! [`Citation`], and regenerates a canonical context object from a citation.
//!
//! # Key Features
//!
//! - **Tolerant input**: legacy bare keys (`atitle`, `aulast`, `issn`) and
//!   `rft.`-prefixed keys are both accepted, blank and malformed fragments are skipped
//! - **Type inference** from the format hint, the genre and the populated title fields
//! - **Identifier extraction**: DOI, PMID, ISSN, eISSN, ISBN and OCLC numbers, split,
//!   normalized and deduplicated
//! - **Author assembly** from full names or last/first/middle-initial parts
//! - **Pagination reconciliation** with `EOA`/`?` sentinels
//! - **Canonical output**: every parsed citation embeds a regenerated context object
//!
//! # Basic Usage
//!
//! ```rust
//! use bibkev::{CitationType, from_openurl, to_openurl};
//!
//! let query = "genre=article&atitle=Example+Article&title=Journal+of+Tests&date=2010-02-11&spage=538";
//! let citation = from_openurl(query);
//!
//! assert_eq!(citation.citation_type, CitationType::Article);
//! assert_eq!(citation.title, "Example Article");
//! assert_eq!(citation.journal.as_ref().unwrap().name, "Journal of Tests");
//! assert_eq!(citation.year.as_deref(), Some("2010"));
//! assert_eq!(citation.pages.as_deref(), Some("538 - EOA"));
//!
//! // Back to a context object
//! let kev = to_openurl(&citation);
//! assert!(kev.contains("rft.genre=article"));
//! ```
//!
//! # Structured Records
//!
//! Citations serialize to BibJSON with serde:
//!
//! ```rust
//! use bibkev::{Citation, from_openurl};
//!
//! let citation = from_openurl("rft.genre=book&rft.btitle=Staré+písemné+památky");
//! let json = citation.to_json().unwrap();
//! let back = Citation::from_json(&json).unwrap();
//! assert_eq!(back.title, "Staré písemné památky");
//! ```
//!
//! # Error Handling
//!
//! Conversions are total: missing or malformed keys degrade to defaults instead of
//! failing. The crate's [`Result`] and [`CitationError`] only surface at the JSON
//! and type-name boundaries.
//!
//! # Thread Safety
//!
//! Every conversion is a pure function of its input. Parsers are `Send + Sync` and
//! [`OpenUrlParser::parse_all`] runs batches in parallel with the `parallel` feature.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod openurl;
mod regex;
mod utils;

// Reexports
pub use openurl::{KeyValueStore, OpenUrlConfig, OpenUrlParser, from_openurl, to_openurl};

/// A specialized Result type for citation operations.
pub type Result<T> = std::result::Result<T, CitationError>;

/// Errors raised at the edges of the crate.
///
/// OpenURL conversion itself never fails; these cover structured-record
/// (de)serialization and type-name parsing.
#[derive(Error, Debug)]
pub enum CitationError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid field value: {field} - {message}")]
    InvalidFieldValue { field: String, message: String },
}

/// The kind of work a citation describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationType {
    /// A journal, newspaper or magazine article
    Article,
    /// A whole book
    Book,
    /// A chapter or other part of a book
    InBook,
    /// A thesis or dissertation
    Thesis,
    /// Anything the signals could not place
    #[default]
    Unknown,
}

impl CitationType {
    /// The lowercase BibJSON name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationType::Article => "article",
            CitationType::Book => "book",
            CitationType::InBook => "inbook",
            CitationType::Thesis => "thesis",
            CitationType::Unknown => "unknown",
        }
    }

    /// Whether works of this type are published inside a containing work
    /// (a journal or a book) whose name is recorded in [`Citation::journal`].
    pub fn has_container(&self) -> bool {
        matches!(self, CitationType::Article | CitationType::InBook)
    }
}

impl fmt::Display for CitationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationType {
    type Err = CitationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "article" => Ok(CitationType::Article),
            "book" => Ok(CitationType::Book),
            "inbook" => Ok(CitationType::InBook),
            "thesis" => Ok(CitationType::Thesis),
            "unknown" => Ok(CitationType::Unknown),
            other => Err(CitationError::InvalidFieldValue {
                field: "type".to_string(),
                message: format!("\"{other}\" is not a citation type"),
            }),
        }
    }
}

/// Identifier schemes carried by a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Doi,
    Pmid,
    Issn,
    Eissn,
    Isbn,
    Oclc,
}

/// A typed identifier such as `{doi, "doi:10.1039/b814549k"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: IdentifierType,
    pub id: String,
}

impl Identifier {
    pub fn new(kind: IdentifierType, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Represents an author of a citation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    /// Display name, either given verbatim or built as "Last, First"
    pub name: String,
    /// The author's family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    /// The author's given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_initial: Option<String>,
}

/// The work an article or chapter was published in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub name: String,
    /// Abbreviated title, e.g. "J Abnorm Psychol"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcode: Option<String>,
}

/// Represents a single citation with its metadata.
///
/// Field names follow BibJSON when serialized; the referrer and the canonical
/// context object are stored under `_rfr` and `_openurl`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Type of the citation
    #[serde(rename = "type", default)]
    pub citation_type: CitationType,
    /// Title of the work
    #[serde(default)]
    pub title: String,
    /// Containing journal or book, for articles and chapters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<Journal>,
    /// List of authors
    #[serde(rename = "author", default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    /// Identifiers, unique by (type, id)
    #[serde(rename = "identifier", default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_publication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    /// Publication year, the first four characters of the source date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Page range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<String>,
    /// System the citation was referred from
    #[serde(rename = "_rfr", default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Context object regenerated from the fields above
    #[serde(rename = "_openurl", default)]
    pub canonical_encoding: String,
}

impl Citation {
    /// Serializes the citation as compact BibJSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the citation as indented BibJSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a citation back from BibJSON.
    ///
    /// # Errors
    ///
    /// Returns [`CitationError::Json`] if the input is not a valid citation record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Regenerates a context object from this citation.
    pub fn to_openurl(&self) -> String {
        to_openurl(self)
    }
}

/// Trait for implementing citation parsers.
pub trait CitationParser {
    /// Parse a string containing one or more citations.
    ///
    /// # Arguments
    ///
    /// * `input` - The string containing citation data
    ///
    /// # Returns
    ///
    /// A Result containing a vector of parsed Citations or a CitationError
    fn parse(&self, input: &str) -> Result<Vec<Citation>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[test]
    fn test_citation_error_display() {
        let error = CitationError::InvalidFieldValue {
            field: "type".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid field value: type - bad");
    }

    #[rstest]
    #[case("article", CitationType::Article)]
    #[case("book", CitationType::Book)]
    #[case("inbook", CitationType::InBook)]
    #[case("thesis", CitationType::Thesis)]
    #[case("unknown", CitationType::Unknown)]
    fn test_citation_type_names(#[case] name: &str, #[case] expected: CitationType) {
        assert_eq!(name.parse::<CitationType>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_citation_type_rejects_other_names() {
        assert!(matches!(
            "bookitem".parse::<CitationType>(),
            Err(CitationError::InvalidFieldValue { .. })
        ));
    }

    #[test]
    fn test_author_equality() {
        let author1 = Author {
            name: "Smith, John".to_string(),
            lastname: Some("Smith".to_string()),
            firstname: Some("John".to_string()),
            middle_initial: None,
        };
        let author2 = author1.clone();
        assert_eq!(author1, author2);
    }

    #[test]
    fn test_bibjson_field_names() {
        let citation = Citation {
            citation_type: CitationType::InBook,
            title: "Chapter".to_string(),
            authors: vec![Author {
                name: "Miles, Matthew".to_string(),
                ..Default::default()
            }],
            identifiers: vec![Identifier::new(IdentifierType::Isbn, "9781402032899")],
            referrer: Some("sersol".to_string()),
            ..Default::default()
        };
        let value: serde_json::Value = serde_json::from_str(&citation.to_json().unwrap()).unwrap();

        assert_eq!(value["type"], "inbook");
        assert_eq!(value["author"][0]["name"], "Miles, Matthew");
        assert_eq!(value["identifier"][0]["type"], "isbn");
        assert_eq!(value["identifier"][0]["id"], "9781402032899");
        assert_eq!(value["_rfr"], "sersol");
        assert!(value.get("journal").is_none());
        assert!(value["author"][0].get("lastname").is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_unicode() {
        let citation = Citation {
            citation_type: CitationType::Book,
            title: "Das \"Orakel der Deisten\" : Shaftesbury und die deutsche Aufklärung"
                .to_string(),
            place_of_publication: Some("Göttingen".to_string()),
            ..Default::default()
        };
        let json = citation.to_json_pretty().unwrap();
        let back = Citation::from_json(&json).unwrap();
        assert_eq!(back, citation);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Citation::from_json("{\"type\": \"pamphlet\"}"),
            Err(CitationError::Json(_))
        ));
    }
}
