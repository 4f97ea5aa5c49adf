//! Citation type inference.
//!
//! Signals are consulted from most to least authoritative: the format hint
//! (`rft_val_fmt`), then the genre, then which title field is populated. Real
//! data often fills a title field while leaving the genre absent or
//! contradictory, so title inference only applies when both stronger signals
//! are missing.

use crate::CitationType;
use crate::openurl::keys::{GENRE_BOOK_ITEM, KevField};
use crate::openurl::structure::KeyValueStore;

/// Determine the citation type of a context object. Always returns a type.
pub(crate) fn classify(store: &KeyValueStore) -> CitationType {
    let genre = store.find_first(KevField::Genre);

    if let Some(format) = store.find_first(KevField::FormatHint) {
        if let Some(kind) = from_format(format, genre) {
            tracing::debug!(format, %kind, "citation type from format hint");
            return kind;
        }
    }

    if let Some(genre) = genre {
        let kind = from_genre(genre);
        tracing::debug!(genre, %kind, "citation type from genre");
        return kind;
    }

    let kind = if store.contains(KevField::ArticleTitle) {
        CitationType::Article
    } else {
        CitationType::Book
    };
    tracing::debug!(%kind, "citation type inferred from title fields");
    kind
}

/// A journal format is decisive. A book format is decisive unless the genre
/// narrows it to a chapter.
fn from_format(format: &str, genre: Option<&str>) -> Option<CitationType> {
    if format.contains("journal") {
        Some(CitationType::Article)
    } else if format.contains("book") && genre != Some(GENRE_BOOK_ITEM) {
        Some(CitationType::Book)
    } else {
        None
    }
}

/// Map a genre to a type, tolerating trailing garbage such as `book\`.
fn from_genre(genre: &str) -> CitationType {
    if genre == GENRE_BOOK_ITEM {
        CitationType::InBook
    } else if genre.contains("book") {
        CitationType::Book
    } else if genre.contains("article") {
        CitationType::Article
    } else if genre.contains("dissertation") {
        CitationType::Thesis
    } else {
        genre.parse().unwrap_or(CitationType::Unknown)
    }
}
