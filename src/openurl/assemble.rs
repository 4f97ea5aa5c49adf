//! Citation assembly.
//!
//! Runs every resolver over a [`KeyValueStore`] and merges their results into
//! one [`Citation`]. The canonical context object is generated from the
//! finished record as the last step.

use crate::Citation;
use crate::openurl::authors::resolve_authors;
use crate::openurl::classify::classify;
use crate::openurl::config::OpenUrlConfig;
use crate::openurl::encode::to_openurl;
use crate::openurl::identifiers::resolve_identifiers;
use crate::openurl::keys::KevField;
use crate::openurl::pages::{Pages, resolve_pages};
use crate::openurl::structure::KeyValueStore;
use crate::openurl::titles::{Titles, resolve_titles};
use crate::utils::truncate_chars;

/// Number of leading date characters kept as the year.
const YEAR_LENGTH: usize = 4;

/// Build a citation from a parsed context object.
pub(crate) fn assemble(store: &KeyValueStore, config: &OpenUrlConfig) -> Citation {
    let citation_type = classify(store);
    let Titles { title, journal } = resolve_titles(store, citation_type);
    let Pages {
        pages,
        start_page,
        end_page,
    } = resolve_pages(store, config);
    let lookup = |field: KevField| present(store.find_first(field));

    let draft = Citation {
        citation_type,
        title: present(title.as_deref())
            .unwrap_or_else(|| config.title_placeholder().to_string()),
        journal: journal.filter(|journal| !journal.name.trim().is_empty()),
        authors: resolve_authors(store),
        identifiers: resolve_identifiers(store),
        publisher: lookup(KevField::Publisher),
        place_of_publication: lookup(KevField::Place),
        volume: lookup(KevField::Volume),
        issue: lookup(KevField::Issue),
        year: present(store.find_first(KevField::Date))
            .map(|date| truncate_chars(&date, YEAR_LENGTH)),
        pages: present(pages.as_deref()),
        start_page: present(start_page.as_deref()),
        end_page: present(end_page.as_deref()),
        referrer: lookup(KevField::Referrer),
        canonical_encoding: String::new(),
    };

    Citation {
        canonical_encoding: to_openurl(&draft),
        ..draft
    }
}

/// Keeps a value verbatim unless it is blank.
fn present(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

impl From<&KeyValueStore> for Citation {
    fn from(store: &KeyValueStore) -> Self {
        assemble(store, &OpenUrlConfig::default())
    }
}
