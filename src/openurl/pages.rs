//! Pagination reconciliation.

use crate::openurl::config::OpenUrlConfig;
use crate::openurl::keys::KevField;
use crate::openurl::structure::KeyValueStore;

/// Resolved pagination of a context object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Pages {
    pub(crate) pages: Option<String>,
    pub(crate) start_page: Option<String>,
    pub(crate) end_page: Option<String>,
}

/// Reconcile the page range with the start and end pages.
///
/// An explicit range is kept verbatim. Otherwise a known start page implies
/// an end-of-article end page, a known end page implies a missing start page,
/// and the range is synthesized as `"<start> - <end>"`.
pub(crate) fn resolve_pages(store: &KeyValueStore, config: &OpenUrlConfig) -> Pages {
    let start = store.find_first(KevField::StartPage).map(str::to_string);
    let end = store.find_first(KevField::EndPage).map(str::to_string);

    if let Some(pages) = store.find_first(KevField::Pages) {
        return Pages {
            pages: Some(pages.to_string()),
            start_page: start,
            end_page: end,
        };
    }

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, config.end_of_article().to_string()),
        (None, Some(end)) => (config.missing_start_page().to_string(), end),
        (None, None) => return Pages::default(),
    };

    Pages {
        pages: Some(format!("{start} - {end}")),
        start_page: Some(start),
        end_page: Some(end),
    }
}
