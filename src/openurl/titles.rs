//! Title and containing-work resolution.

use crate::openurl::keys::KevField;
use crate::openurl::structure::KeyValueStore;
use crate::{CitationType, Journal};

/// Title sources, highest priority first.
const TITLE_FIELDS: [KevField; 4] = [
    KevField::ArticleTitle,
    KevField::BookTitle,
    KevField::Title,
    KevField::ShortTitle,
];

/// Sources for the name of the containing journal or book.
const CONTAINER_FIELDS: [KevField; 3] =
    [KevField::JournalTitle, KevField::BookTitle, KevField::Title];

/// Resolved titles of a context object.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Titles {
    pub(crate) title: Option<String>,
    pub(crate) journal: Option<Journal>,
}

/// Resolve the primary title and, for articles and chapters, the containing work.
pub(crate) fn resolve_titles(store: &KeyValueStore, kind: CitationType) -> Titles {
    let title = store.find_first_of(&TITLE_FIELDS).map(str::to_string);

    let journal = if kind.has_container() {
        store
            .find_first_of(&CONTAINER_FIELDS)
            .map(|name| Journal {
                name: name.to_string(),
                shortcode: store.find_first(KevField::ShortTitle).map(str::to_string),
            })
    } else {
        None
    };

    Titles { title, journal }
}
