//! Identifier extraction.
//!
//! Identifiers arrive through several channels: the generic `rft_id`/`id`
//! keys carrying `info:` URIs, bare `doi`/`pmid` keys from non-standard feeds,
//! ISBN/ISSN keys that may hold several numbers at once, and OCLC numbers
//! buried in FirstSearch/WorldCat private data.

use crate::openurl::keys::{
    DOI_PREFIX, INFO_DOI_PREFIX, INFO_PMID_PREFIX, KevField, URN_ISBN_PREFIX, URN_ISSN_PREFIX,
};
use crate::openurl::structure::KeyValueStore;
use crate::utils::{
    contains_ignore_case, first_digit_run, non_empty, pmid_digits, split_identifiers,
    strip_prefix_ignore_case,
};
use crate::{Identifier, IdentifierType};
use std::collections::HashSet;

/// Ordered identifier collection that refuses duplicate (type, id) pairs.
#[derive(Debug, Default)]
pub(crate) struct IdentifierSet {
    seen: HashSet<Identifier>,
    ordered: Vec<Identifier>,
}

impl IdentifierSet {
    /// Adds `identifier` unless an equal one is already present.
    pub(crate) fn insert(&mut self, identifier: Identifier) -> bool {
        if self.seen.contains(&identifier) {
            tracing::trace!(?identifier, "skipping duplicate identifier");
            return false;
        }
        self.seen.insert(identifier.clone());
        self.ordered.push(identifier);
        true
    }

    pub(crate) fn into_vec(self) -> Vec<Identifier> {
        self.ordered
    }
}

impl Extend<Identifier> for IdentifierSet {
    fn extend<T: IntoIterator<Item = Identifier>>(&mut self, iter: T) {
        for identifier in iter {
            self.insert(identifier);
        }
    }
}

/// Collect every identifier in the context object, deduplicated, in discovery order.
pub(crate) fn resolve_identifiers(store: &KeyValueStore) -> Vec<Identifier> {
    let mut identifiers = IdentifierSet::default();

    identifiers.extend(store.values(KevField::Identifier).filter_map(parse_generic_id));
    identifiers.extend(
        store
            .values(KevField::Pmid)
            .filter_map(non_empty)
            .map(|pmid| Identifier::new(IdentifierType::Pmid, pmid)),
    );
    identifiers.extend(store.values(KevField::Doi).filter_map(parse_bare_doi));

    for (field, kind) in [
        (KevField::Isbn, IdentifierType::Isbn),
        (KevField::Issn, IdentifierType::Issn),
        (KevField::Eissn, IdentifierType::Eissn),
    ] {
        identifiers.extend(
            store
                .values(field)
                .flat_map(split_identifiers)
                .map(|id| Identifier::new(kind, id)),
        );
    }

    if let Some(oclc) = pull_oclc(store) {
        identifiers.insert(Identifier::new(IdentifierType::Oclc, oclc));
    }

    identifiers.into_vec()
}

/// Interpret a value of the generic identifier keys.
fn parse_generic_id(value: &str) -> Option<Identifier> {
    let value = value.trim();

    if let Some(doi) = strip_prefix_ignore_case(value, INFO_DOI_PREFIX) {
        return doi_identifier(doi);
    }
    if let Some(doi) = strip_prefix_ignore_case(value, DOI_PREFIX) {
        // `id=doi:` with nothing after the prefix is common in FirstSearch links
        return doi_identifier(doi);
    }
    if strip_prefix_ignore_case(value, INFO_PMID_PREFIX).is_some() {
        return Some(Identifier::new(IdentifierType::Pmid, value));
    }
    if let Some(digits) = pmid_digits(value) {
        return Some(Identifier::new(
            IdentifierType::Pmid,
            format!("{INFO_PMID_PREFIX}{digits}"),
        ));
    }
    if let Some(isbn) = strip_prefix_ignore_case(value, URN_ISBN_PREFIX) {
        return non_empty(isbn).map(|isbn| Identifier::new(IdentifierType::Isbn, isbn));
    }
    if let Some(issn) = strip_prefix_ignore_case(value, URN_ISSN_PREFIX) {
        return non_empty(issn).map(|issn| Identifier::new(IdentifierType::Issn, issn));
    }
    None
}

/// A DOI from a dedicated `doi` key, with or without its `doi:` prefix.
fn parse_bare_doi(value: &str) -> Option<Identifier> {
    let value = non_empty(value)?;
    doi_identifier(strip_prefix_ignore_case(value, DOI_PREFIX).unwrap_or(value))
}

/// DOIs are stored under a lowercase `doi:` prefix whatever casing the input used.
fn doi_identifier(doi: &str) -> Option<Identifier> {
    non_empty(doi)
        .map(|doi| Identifier::new(IdentifierType::Doi, format!("{DOI_PREFIX}{doi}")))
}

/// Pull an OCLC number from FirstSearch/WorldCat style private data.
///
/// Rules are tried in order and the first one that yields digits wins:
/// 1. a FirstSearch referrer, reading the first accession-data value;
/// 2. a `pid` mentioning an accession number;
/// 3. an accession-data value with an `<accessionnumber>` element.
pub(crate) fn pull_oclc(store: &KeyValueStore) -> Option<String> {
    let from_firstsearch = || {
        store
            .get(KevField::Referrer.key())
            .and_then(|values| values.first())
            .is_some_and(|referrer| contains_ignore_case(referrer, "firstsearch"))
            .then(|| store.find_first(KevField::AccessionData))
            .flatten()
            .and_then(first_digit_run)
    };
    let from_pid = || {
        store
            .find_first(KevField::PrivateData)
            .filter(|pid| pid.contains("accession"))
            .and_then(first_digit_run)
    };
    let from_accession_data = || {
        store
            .values(KevField::AccessionData)
            .find(|data| data.contains("accessionnumber"))
            .and_then(first_digit_run)
    };

    let (rule, oclc) = from_firstsearch()
        .map(|oclc| ("firstsearch referrer", oclc))
        .or_else(|| from_pid().map(|oclc| ("pid accession", oclc)))
        .or_else(|| from_accession_data().map(|oclc| ("accession data", oclc)))?;
    tracing::debug!(rule, oclc, "extracted OCLC number");
    Some(oclc.to_string())
}
