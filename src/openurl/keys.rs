//! OpenURL keys and their legacy aliases.
//!
//! Link resolvers in the wild mix OpenURL 0.1 bare keys (`atitle`, `aulast`)
//! with Z39.88-2004 `rft.`-prefixed keys. Every field below lists its aliases in
//! lookup priority order; the first alias is the canonical key written on output.
//! See: https://www.niso.org/publications/z3988-2004-r2010

/// Format hint value for journal-shaped context objects.
pub(crate) const FORMAT_JOURNAL: &str = "info:ofi/fmt:kev:mtx:journal";
/// Format hint value for book-shaped context objects.
pub(crate) const FORMAT_BOOK: &str = "info:ofi/fmt:kev:mtx:book";
/// Context object version echoed on output.
pub(crate) const CONTEXT_VERSION: &str = "Z39.88-2004";
/// Genre marking a chapter inside a book.
pub(crate) const GENRE_BOOK_ITEM: &str = "bookitem";

pub(crate) const SID_PREFIX: &str = "info:sid/";
pub(crate) const INFO_DOI_PREFIX: &str = "info:doi/";
pub(crate) const INFO_PMID_PREFIX: &str = "info:pmid/";
pub(crate) const DOI_PREFIX: &str = "doi:";
pub(crate) const URN_ISBN_PREFIX: &str = "urn:ISBN:";
pub(crate) const URN_ISSN_PREFIX: &str = "urn:ISSN:";
pub(crate) const WORLDCAT_OCLC_URL: &str = "http://www.worldcat.org/oclc/";

/// Citation fields carried by a context object.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub(crate) enum KevField {
    /// rft_val_fmt - Metadata format of the referent
    FormatHint,
    /// ctx_ver - Context object version
    ContextVersion,
    /// rft.genre - Kind of work
    Genre,
    /// rft.atitle - Article or chapter title
    ArticleTitle,
    /// rft.btitle - Book title
    BookTitle,
    /// rft.title - Generic title
    Title,
    /// rft.jtitle - Journal title
    JournalTitle,
    /// rft.stitle - Abbreviated title
    ShortTitle,
    /// rft.au - Full author name
    Author,
    /// rft.aulast - Author family name
    AuthorLast,
    /// rft.aufirst - Author given name
    AuthorFirst,
    /// rft.auinitm - Author middle initial
    AuthorMiddleInitial,
    /// rft.pub - Publisher
    Publisher,
    /// rft.place - Place of publication
    Place,
    /// rft.volume - Volume
    Volume,
    /// rft.issue - Issue
    Issue,
    /// rft.date - Publication date
    Date,
    /// rft.pages - Page range
    Pages,
    /// rft.spage - Start page
    StartPage,
    /// rft.epage - End page
    EndPage,
    /// rft_id - Referent identifier URI (`info:doi/`, `info:pmid/`, ...)
    Identifier,
    /// doi - Bare DOI, found in non-standard feeds
    Doi,
    /// pmid - Bare PubMed ID, found in non-standard feeds
    Pmid,
    /// rft.issn - ISSN, possibly several separated by whitespace
    Issn,
    /// rft.eissn - Electronic ISSN
    Eissn,
    /// rft.isbn - ISBN, possibly several separated by whitespace
    Isbn,
    /// rfr_id - Referrer (source system)
    Referrer,
    /// pid - Private data of the referrer
    PrivateData,
    /// rfe_dat - Referring entity data, where FirstSearch puts accession numbers
    AccessionData,
}

impl KevField {
    pub(crate) const ALL: [KevField; 29] = [
        KevField::FormatHint,
        KevField::ContextVersion,
        KevField::Genre,
        KevField::ArticleTitle,
        KevField::BookTitle,
        KevField::Title,
        KevField::JournalTitle,
        KevField::ShortTitle,
        KevField::Author,
        KevField::AuthorLast,
        KevField::AuthorFirst,
        KevField::AuthorMiddleInitial,
        KevField::Publisher,
        KevField::Place,
        KevField::Volume,
        KevField::Issue,
        KevField::Date,
        KevField::Pages,
        KevField::StartPage,
        KevField::EndPage,
        KevField::Identifier,
        KevField::Doi,
        KevField::Pmid,
        KevField::Issn,
        KevField::Eissn,
        KevField::Isbn,
        KevField::Referrer,
        KevField::PrivateData,
        KevField::AccessionData,
    ];

    /// Input keys for this field, highest priority first.
    pub(crate) fn aliases(self) -> &'static [&'static str] {
        match self {
            KevField::FormatHint => &["rft_val_fmt"],
            KevField::ContextVersion => &["ctx_ver"],
            KevField::Genre => &["rft.genre", "genre"],
            KevField::ArticleTitle => &["rft.atitle", "atitle"],
            KevField::BookTitle => &["rft.btitle", "btitle"],
            KevField::Title => &["rft.title", "title"],
            KevField::JournalTitle => &["rft.jtitle", "jtitle"],
            KevField::ShortTitle => &["rft.stitle", "stitle"],
            KevField::Author => &["rft.au", "au"],
            KevField::AuthorLast => &["rft.aulast", "aulast"],
            KevField::AuthorFirst => &["rft.aufirst", "aufirst"],
            KevField::AuthorMiddleInitial => &["rft.auinitm", "auinitm"],
            KevField::Publisher => &["rft.pub", "pub", "rft.publisher", "publisher"],
            KevField::Place => &["rft.place", "place"],
            KevField::Volume => &["rft.volume", "volume"],
            KevField::Issue => &["rft.issue", "issue"],
            KevField::Date => &["rft.date", "date"],
            KevField::Pages => &["rft.pages", "pages"],
            KevField::StartPage => &["rft.spage", "spage"],
            KevField::EndPage => &["rft.epage", "epage"],
            KevField::Identifier => &["rft_id", "rft.id", "id"],
            KevField::Doi => &["doi"],
            KevField::Pmid => &["pmid"],
            KevField::Issn => &["rft.issn", "issn"],
            KevField::Eissn => &["rft.eissn", "eissn"],
            KevField::Isbn => &["rft.isbn", "isbn"],
            KevField::Referrer => &["rfr_id", "sid"],
            KevField::PrivateData => &["pid"],
            KevField::AccessionData => &["rfe_dat"],
        }
    }

    /// The canonical key written when encoding this field.
    pub(crate) fn key(self) -> &'static str {
        self.aliases()[0]
    }

    /// Find the field a raw key belongs to, if any.
    pub(crate) fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().iter().any(|alias| *alias == key))
    }
}
