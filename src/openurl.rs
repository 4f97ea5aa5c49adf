//! OpenURL context object parser and generator.
//!
//! Reads the flat `key=value` encoding emitted by link resolvers and citation
//! managers (OpenURL 0.1 and Z39.88-2004 KEV) into [`Citation`] records, and
//! writes records back out as canonical context objects.
//!
//! # Example
//!
//! ```
//! use bibkev::{CitationParser, CitationType, OpenUrlConfig, OpenUrlParser};
//!
//! let input = "genre=book&isbn=0199256047&title=Reassembling+the+social&date=2005
//! rft.genre=article&rft.atitle=Where+Should+the+Money+Go%3F&rft.jtitle=Chronicle+of+Philanthropy&rft.spage=9";
//!
//! let mut config = OpenUrlConfig::new();
//! config.set_end_of_article("ff.");
//! let parser = OpenUrlParser::with_config(config);
//!
//! let citations = parser.parse(input).unwrap();
//! assert_eq!(citations[0].citation_type, CitationType::Book);
//! assert_eq!(citations[1].pages.as_deref(), Some("9 - ff."));
//! ```

use crate::{Citation, CitationParser, Result};
use std::collections::HashMap;

mod assemble;
mod authors;
mod classify;
mod config;
mod encode;
mod identifiers;
mod keys;
mod pages;
mod parse;
mod structure;
mod titles;

pub use config::{
    DEFAULT_END_OF_ARTICLE, DEFAULT_MISSING_START_PAGE, DEFAULT_TITLE_PLACEHOLDER, OpenUrlConfig,
};
pub use encode::to_openurl;
pub use structure::KeyValueStore;

/// Parser for OpenURL context objects.
///
/// Parsing never fails: unknown keys are ignored, blank values are dropped
/// and missing fields fall back to the configured placeholders.
#[derive(Debug, Default, Clone)]
pub struct OpenUrlParser {
    config: OpenUrlConfig,
}

impl OpenUrlParser {
    /// Creates a parser with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibkev::OpenUrlParser;
    /// let parser = OpenUrlParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: OpenUrlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OpenUrlConfig {
        &self.config
    }

    /// Parses a single percent-encoded query string.
    pub fn parse_query(&self, query: &str) -> Citation {
        self.parse_store(&KeyValueStore::from_query(query))
    }

    /// Parses parameters that were already decoded, e.g. by a web framework.
    pub fn parse_map(&self, params: HashMap<String, Vec<String>>) -> Citation {
        self.parse_store(&KeyValueStore::from(params))
    }

    /// Builds a citation from a populated store.
    pub fn parse_store(&self, store: &KeyValueStore) -> Citation {
        assemble::assemble(store, &self.config)
    }

    /// Parses a batch of query strings, preserving input order.
    #[cfg(feature = "parallel")]
    pub fn parse_all<S: AsRef<str> + Sync>(&self, queries: &[S]) -> Vec<Citation> {
        use rayon::prelude::*;

        queries
            .par_iter()
            .map(|query| self.parse_query(query.as_ref()))
            .collect()
    }

    /// Parses a batch of query strings, preserving input order.
    #[cfg(not(feature = "parallel"))]
    pub fn parse_all<S: AsRef<str> + Sync>(&self, queries: &[S]) -> Vec<Citation> {
        queries
            .iter()
            .map(|query| self.parse_query(query.as_ref()))
            .collect()
    }
}

impl CitationParser for OpenUrlParser {
    /// Parses one context object per non-empty line.
    fn parse(&self, input: &str) -> Result<Vec<Citation>> {
        let queries: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Ok(self.parse_all(&queries))
    }
}

/// Convert a context object to a citation using the default configuration.
///
/// # Examples
///
/// ```
/// use bibkev::{CitationType, IdentifierType, from_openurl};
///
/// let citation = from_openurl("rft_val_fmt=info:ofi/fmt:kev:mtx:journal&rft.atitle=Responses&rft_id=info:pmid/1757671");
/// assert_eq!(citation.citation_type, CitationType::Article);
/// assert_eq!(citation.identifiers[0].kind, IdentifierType::Pmid);
/// assert_eq!(citation.identifiers[0].id, "info:pmid/1757671");
/// ```
pub fn from_openurl(query: &str) -> Citation {
    OpenUrlParser::new().parse_query(query)
}
