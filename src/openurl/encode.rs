//! Citation to OpenURL conversion.
//!
//! Writes a Z39.88-2004 KEV context object. Keys always use their canonical
//! `rft.` form and come out in a fixed order, so the same citation always
//! encodes to the same string.
//!
//! Only the first usable author is written; context objects have no standard
//! way to pair several full names with their parts.

use crate::openurl::keys::{
    CONTEXT_VERSION, DOI_PREFIX, FORMAT_BOOK, FORMAT_JOURNAL, GENRE_BOOK_ITEM, INFO_DOI_PREFIX,
    INFO_PMID_PREFIX, KevField, SID_PREFIX, WORLDCAT_OCLC_URL,
};
use crate::utils::{strip_prefix_ignore_case, truncate_chars};
use crate::{Citation, CitationType, Identifier, IdentifierType};
use url::form_urlencoded;

/// Bare title key read by interlibrary loan systems such as ILLiad.
const PLAIN_TITLE_KEY: &str = "title";

/// Ordered key/value pairs of a context object under construction.
#[derive(Debug, Default)]
struct KevPairs {
    pairs: Vec<(&'static str, String)>,
}

impl KevPairs {
    /// Appends a pair unless the value is absent or empty.
    fn push<V: AsRef<str>>(&mut self, key: &'static str, value: Option<V>) {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.pairs.push((key, value.to_string()));
            }
        }
    }

    fn push_field<V: AsRef<str>>(&mut self, field: KevField, value: Option<V>) {
        self.push(field.key(), value);
    }

    fn finish(self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// Convert a citation to a percent-encoded OpenURL context object.
///
/// # Examples
///
/// ```
/// use bibkev::{Citation, CitationType, Journal, to_openurl};
///
/// let citation = Citation {
///     citation_type: CitationType::Article,
///     title: "Responses to depression".to_string(),
///     journal: Some(Journal {
///         name: "Journal of abnormal psychology".to_string(),
///         shortcode: Some("J Abnorm Psychol".to_string()),
///     }),
///     year: Some("1991".to_string()),
///     ..Default::default()
/// };
///
/// let kev = to_openurl(&citation);
/// assert!(kev.starts_with("ctx_ver=Z39.88-2004&rft_val_fmt=info%3Aofi%2Ffmt%3Akev%3Amtx%3Ajournal"));
/// assert!(kev.contains("&rft.stitle=J+Abnorm+Psychol&"));
/// ```
pub fn to_openurl(citation: &Citation) -> String {
    kev_pairs(citation).finish()
}

fn kev_pairs(citation: &Citation) -> KevPairs {
    let mut kev = KevPairs::default();
    let title = Some(citation.title.as_str());
    let journal_name = citation.journal.as_ref().map(|j| j.name.as_str());
    let shortcode = citation
        .journal
        .as_ref()
        .and_then(|j| j.shortcode.as_deref());

    kev.push_field(KevField::ContextVersion, Some(CONTEXT_VERSION));
    match citation.citation_type {
        CitationType::Article => {
            kev.push_field(KevField::FormatHint, Some(FORMAT_JOURNAL));
            kev.push_field(KevField::Referrer, referrer(citation));
            kev.push_field(KevField::Genre, Some("article"));
            kev.push_field(KevField::ArticleTitle, title);
            kev.push_field(KevField::JournalTitle, journal_name);
            kev.push_field(KevField::ShortTitle, shortcode);
        }
        CitationType::Book => {
            kev.push_field(KevField::FormatHint, Some(FORMAT_BOOK));
            kev.push_field(KevField::Referrer, referrer(citation));
            kev.push_field(KevField::Genre, Some("book"));
            kev.push_field(KevField::BookTitle, title);
        }
        CitationType::InBook => {
            kev.push_field(KevField::FormatHint, Some(FORMAT_BOOK));
            kev.push_field(KevField::Referrer, referrer(citation));
            kev.push_field(KevField::Genre, Some(GENRE_BOOK_ITEM));
            kev.push_field(KevField::BookTitle, journal_name);
            kev.push(PLAIN_TITLE_KEY, journal_name);
            kev.push_field(KevField::ArticleTitle, title);
        }
        CitationType::Thesis | CitationType::Unknown => {
            kev.push_field(KevField::Referrer, referrer(citation));
            kev.push_field(KevField::Genre, Some("unknown"));
            kev.push_field(KevField::Title, title);
            kev.push_field(KevField::JournalTitle, journal_name);
            kev.push_field(KevField::ShortTitle, shortcode);
        }
    }

    kev.push_field(
        KevField::Date,
        citation.year.as_deref().map(|year| truncate_chars(year, 4)),
    );
    push_author(&mut kev, citation);
    kev.push_field(KevField::Volume, citation.volume.as_deref());
    kev.push_field(KevField::Issue, citation.issue.as_deref());
    kev.push_field(KevField::StartPage, citation.start_page.as_deref());
    kev.push_field(KevField::EndPage, citation.end_page.as_deref());
    kev.push_field(KevField::Pages, citation.pages.as_deref());
    kev.push_field(KevField::Publisher, citation.publisher.as_deref());
    kev.push_field(KevField::Place, citation.place_of_publication.as_deref());

    for identifier in &citation.identifiers {
        let (field, value) = encode_identifier(identifier);
        kev.push_field(field, Some(value));
    }
    kev
}

/// `info:sid/<referrer>`, without doubling an existing prefix.
fn referrer(citation: &Citation) -> Option<String> {
    let referrer = citation.referrer.as_deref()?.trim();
    if referrer.is_empty() {
        None
    } else if referrer.starts_with(SID_PREFIX) {
        Some(referrer.to_string())
    } else {
        Some(format!("{SID_PREFIX}{referrer}"))
    }
}

/// Write the first author with a full name, else the first with a last name.
fn push_author(kev: &mut KevPairs, citation: &Citation) {
    if let Some(author) = citation.authors.iter().find(|a| !a.name.is_empty()) {
        kev.push_field(KevField::Author, Some(&author.name));
    } else if let Some(lastname) = citation
        .authors
        .iter()
        .find_map(|a| a.lastname.as_deref().filter(|last| !last.is_empty()))
    {
        kev.push_field(KevField::AuthorLast, Some(lastname));
    }
}

fn encode_identifier(identifier: &Identifier) -> (KevField, String) {
    let id = identifier.id.as_str();
    match identifier.kind {
        IdentifierType::Issn => (KevField::Issn, id.to_string()),
        IdentifierType::Isbn => (KevField::Isbn, id.to_string()),
        IdentifierType::Eissn => (KevField::Eissn, id.to_string()),
        IdentifierType::Doi => {
            let doi = strip_prefix_ignore_case(id, DOI_PREFIX).unwrap_or(id);
            (KevField::Identifier, format!("{INFO_DOI_PREFIX}{doi}"))
        }
        IdentifierType::Pmid => {
            if id.starts_with(INFO_PMID_PREFIX) {
                (KevField::Identifier, id.to_string())
            } else {
                (KevField::Identifier, format!("{INFO_PMID_PREFIX}{id}"))
            }
        }
        IdentifierType::Oclc => (KevField::Identifier, format!("{WORLDCAT_OCLC_URL}{id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Author, Journal};
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn pairs(citation: &Citation) -> Vec<(&'static str, String)> {
        kev_pairs(citation).pairs
    }

    fn pair(key: &'static str, value: &str) -> (&'static str, String) {
        (key, value.to_string())
    }

    fn article() -> Citation {
        Citation {
            citation_type: CitationType::Article,
            title: "The missing technology".to_string(),
            journal: Some(Journal {
                name: "Applied health economics and health policy".to_string(),
                shortcode: None,
            }),
            authors: vec![Author {
                name: "Frogner, BK".to_string(),
                lastname: Some("Frogner".to_string()),
                firstname: Some("BK".to_string()),
                middle_initial: None,
            }],
            identifiers: vec![
                Identifier::new(IdentifierType::Issn, "1175-5652"),
                Identifier::new(IdentifierType::Oclc, "678061209"),
            ],
            volume: Some("8".to_string()),
            issue: Some("6".to_string()),
            year: Some("2010".to_string()),
            pages: Some("361 - 71".to_string()),
            start_page: Some("361".to_string()),
            end_page: Some("71".to_string()),
            referrer: Some("FirstSearch:MEDLINE".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_article_pairs() {
        assert_eq!(
            pairs(&article()),
            vec![
                pair("ctx_ver", "Z39.88-2004"),
                pair("rft_val_fmt", "info:ofi/fmt:kev:mtx:journal"),
                pair("rfr_id", "info:sid/FirstSearch:MEDLINE"),
                pair("rft.genre", "article"),
                pair("rft.atitle", "The missing technology"),
                pair("rft.jtitle", "Applied health economics and health policy"),
                pair("rft.date", "2010"),
                pair("rft.au", "Frogner, BK"),
                pair("rft.volume", "8"),
                pair("rft.issue", "6"),
                pair("rft.spage", "361"),
                pair("rft.epage", "71"),
                pair("rft.pages", "361 - 71"),
                pair("rft.issn", "1175-5652"),
                pair("rft_id", "http://www.worldcat.org/oclc/678061209"),
            ]
        );
    }

    #[test]
    fn test_book_pairs() {
        let citation = Citation {
            citation_type: CitationType::Book,
            title: "Necessity for ruins".to_string(),
            publisher: Some("Univ Of Mass Press".to_string()),
            place_of_publication: Some("[S.l.]".to_string()),
            identifiers: vec![
                Identifier::new(IdentifierType::Isbn, "0870232924"),
                Identifier::new(IdentifierType::Isbn, "9780870232923"),
            ],
            ..Default::default()
        };
        assert_eq!(
            pairs(&citation),
            vec![
                pair("ctx_ver", "Z39.88-2004"),
                pair("rft_val_fmt", "info:ofi/fmt:kev:mtx:book"),
                pair("rft.genre", "book"),
                pair("rft.btitle", "Necessity for ruins"),
                pair("rft.pub", "Univ Of Mass Press"),
                pair("rft.place", "[S.l.]"),
                pair("rft.isbn", "0870232924"),
                pair("rft.isbn", "9780870232923"),
            ]
        );
    }

    #[test]
    fn test_chapter_pairs() {
        let citation = Citation {
            citation_type: CitationType::InBook,
            title: "Finding Keys to School Change".to_string(),
            journal: Some(Journal {
                name: "The roots of educational change".to_string(),
                shortcode: None,
            }),
            ..Default::default()
        };
        assert_eq!(
            pairs(&citation),
            vec![
                pair("ctx_ver", "Z39.88-2004"),
                pair("rft_val_fmt", "info:ofi/fmt:kev:mtx:book"),
                pair("rft.genre", "bookitem"),
                pair("rft.btitle", "The roots of educational change"),
                pair("title", "The roots of educational change"),
                pair("rft.atitle", "Finding Keys to School Change"),
            ]
        );
    }

    #[rstest]
    #[case(CitationType::Unknown)]
    #[case(CitationType::Thesis)]
    fn test_generic_pairs(#[case] kind: CitationType) {
        let citation = Citation {
            citation_type: kind,
            title: "A companion".to_string(),
            journal: Some(Journal {
                name: "Series".to_string(),
                shortcode: Some("Ser".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(
            pairs(&citation),
            vec![
                pair("ctx_ver", "Z39.88-2004"),
                pair("rft.genre", "unknown"),
                pair("rft.title", "A companion"),
                pair("rft.jtitle", "Series"),
                pair("rft.stitle", "Ser"),
            ]
        );
    }

    #[rstest]
    #[case(
        IdentifierType::Doi,
        "doi:10.1039/b814549k",
        KevField::Identifier,
        "info:doi/10.1039/b814549k"
    )]
    #[case(
        IdentifierType::Doi,
        "10.1039/b814549k",
        KevField::Identifier,
        "info:doi/10.1039/b814549k"
    )]
    #[case(IdentifierType::Doi, "DOI:10.1/x", KevField::Identifier, "info:doi/10.1/x")]
    #[case(IdentifierType::Pmid, "info:pmid/1757671", KevField::Identifier, "info:pmid/1757671")]
    #[case(IdentifierType::Pmid, "20934682", KevField::Identifier, "info:pmid/20934682")]
    #[case(
        IdentifierType::Oclc,
        "277200522",
        KevField::Identifier,
        "http://www.worldcat.org/oclc/277200522"
    )]
    #[case(IdentifierType::Issn, "0002-7820", KevField::Issn, "0002-7820")]
    #[case(IdentifierType::Eissn, "1551-2916", KevField::Eissn, "1551-2916")]
    #[case(IdentifierType::Isbn, "9781429233231", KevField::Isbn, "9781429233231")]
    fn test_encode_identifier(
        #[case] kind: IdentifierType,
        #[case] id: &str,
        #[case] field: KevField,
        #[case] expected: &str,
    ) {
        assert_eq!(
            encode_identifier(&Identifier::new(kind, id)),
            (field, expected.to_string())
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(Some("EBSCO:aph"), Some("info:sid/EBSCO:aph"))]
    #[case(Some("info:sid/pss.sagepub.com"), Some("info:sid/pss.sagepub.com"))]
    fn test_referrer(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        let citation = Citation {
            referrer: input.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(referrer(&citation).as_deref(), expected);
    }

    #[test]
    fn test_only_first_author_written() {
        let mut citation = article();
        citation.authors.push(Author {
            name: "Second, Author".to_string(),
            ..Default::default()
        });
        let authors: Vec<_> = pairs(&citation)
            .into_iter()
            .filter(|(key, _)| key.starts_with("rft.au"))
            .collect();
        assert_eq!(authors, vec![pair("rft.au", "Frogner, BK")]);
    }

    #[test]
    fn test_lastname_used_without_full_name() {
        let mut citation = article();
        citation.authors = vec![Author {
            name: String::new(),
            lastname: Some("Nolen-Hoeksema".to_string()),
            ..Default::default()
        }];
        assert!(pairs(&citation).contains(&pair("rft.aulast", "Nolen-Hoeksema")));
    }

    #[test]
    fn test_year_truncated() {
        let mut citation = article();
        citation.year = Some("2012-02-18".to_string());
        assert!(pairs(&citation).contains(&pair("rft.date", "2012")));
    }

    #[test]
    fn test_percent_encoding() {
        let citation = Citation {
            citation_type: CitationType::Book,
            title: "W H Freeman & Co: Genetics/Analysis".to_string(),
            ..Default::default()
        };
        assert_eq!(
            to_openurl(&citation),
            "ctx_ver=Z39.88-2004&rft_val_fmt=info%3Aofi%2Ffmt%3Akev%3Amtx%3Abook&rft.genre=book&rft.btitle=W+H+Freeman+%26+Co%3A+Genetics%2FAnalysis"
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let citation = article();
        assert_eq!(to_openurl(&citation), to_openurl(&citation.clone()));
    }
}
