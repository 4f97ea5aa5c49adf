//! Author assembly.
//!
//! Context objects describe authors either by full name (`rft.au`) or by parts
//! (`rft.aulast`, `rft.aufirst`, `rft.auinitm`). The parts describe a single
//! person, so they are attached to every entry and a name is synthesized when
//! no full name was given.

use crate::Author;
use crate::openurl::keys::KevField;
use crate::openurl::structure::KeyValueStore;
use crate::utils::non_empty;
use std::collections::HashSet;

/// Name parts shared by every author entry of a context object.
#[derive(Debug, Default)]
struct NameParts<'a> {
    lastname: Option<&'a str>,
    firstname: Option<&'a str>,
    middle_initial: Option<&'a str>,
}

impl<'a> NameParts<'a> {
    fn from_store(store: &'a KeyValueStore) -> Self {
        Self {
            lastname: store.find_first(KevField::AuthorLast).and_then(non_empty),
            firstname: store.find_first(KevField::AuthorFirst).and_then(non_empty),
            middle_initial: store
                .find_first(KevField::AuthorMiddleInitial)
                .and_then(non_empty),
        }
    }

    /// Build an entry, using `full_name` when given and "Last, First" otherwise.
    fn author(&self, full_name: Option<&str>) -> Author {
        let name = match full_name {
            Some(name) => name.to_string(),
            None => format!(
                "{}, {}",
                self.lastname.unwrap_or_default(),
                self.firstname.unwrap_or_default()
            )
            .trim_end_matches([',', ' '])
            .to_string(),
        };
        Author {
            name,
            lastname: self.lastname.map(str::to_string),
            firstname: self.firstname.map(str::to_string),
            middle_initial: self.middle_initial.map(str::to_string),
        }
    }
}

/// Collect the authors of a context object, in order and without duplicates.
pub(crate) fn resolve_authors(store: &KeyValueStore) -> Vec<Author> {
    let parts = NameParts::from_store(store);

    let full_names = store.values(KevField::Author).map(Some);
    let from_parts = store.values(KevField::AuthorLast).map(|_| None);

    let mut seen = HashSet::new();
    let mut authors = Vec::new();
    for full_name in full_names.chain(from_parts) {
        let author = parts.author(full_name);
        if author.name.is_empty() {
            continue;
        }
        if seen.contains(&author) {
            tracing::trace!(name = %author.name, "skipping duplicate author");
            continue;
        }
        seen.insert(author.clone());
        authors.push(author);
    }
    authors
}
