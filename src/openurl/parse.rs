//! OpenURL query parsing implementation.
//!
//! This module handles the low-level decoding of `key=value&...` query strings.

use crate::openurl::keys::KevField;
use crate::openurl::structure::KeyValueStore;
use url::form_urlencoded;

/// Prefix left on keys when a query was HTML-escaped before being joined
/// (`a=1&amp;b=2`).
const HTML_ESCAPED_SEPARATOR: &str = "amp;";

/// Parse a percent-encoded context object into a [`KeyValueStore`].
///
/// Decoding follows `application/x-www-form-urlencoded` rules. Fragments
/// without a key or without a value are skipped.
pub(crate) fn kev_parse<S: AsRef<str>>(query: S) -> KeyValueStore {
    let query = query.as_ref().trim();
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut store = KeyValueStore::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let key = normalize_key(&key);
        if KevField::from_key(key).is_none() {
            tracing::trace!(key, "unrecognized OpenURL key");
        }
        store.add_data(key.to_string(), value.into_owned());
    }
    store
}

/// Strip the remains of an HTML-escaped separator from a key.
fn normalize_key(key: &str) -> &str {
    key.strip_prefix(HTML_ESCAPED_SEPARATOR).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("rft.atitle", "rft.atitle")]
    #[case("amp;rft.genre", "rft.genre")]
    #[case("ampersand", "ampersand")]
    fn test_normalize_key(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(key), expected);
    }

    #[test]
    fn test_parse_decodes_values() {
        let store = kev_parse(
            "rft.pub=W+H+Freeman+%26+Co&rft_val_fmt=info%3Aofi%2Ffmt%3Akev%3Amtx%3Abook",
        );
        assert_eq!(store.get("rft.pub").unwrap(), ["W H Freeman & Co"]);
        assert_eq!(
            store.get("rft_val_fmt").unwrap(),
            ["info:ofi/fmt:kev:mtx:book"]
        );
    }

    #[test]
    fn test_parse_keeps_repeated_keys() {
        let store = kev_parse("rft_id=info:oclcnum/228805805&rft_id=urn:ISBN:9783835302334");
        assert_eq!(
            store.get("rft_id").unwrap(),
            ["info:oclcnum/228805805", "urn:ISBN:9783835302334"]
        );
    }

    #[test]
    fn test_parse_drops_blank_and_malformed_fragments() {
        let store = kev_parse("volume=&part=&&issue=&=orphan&flag&date=2005");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("date").unwrap(), ["2005"]);
    }

    #[test]
    fn test_parse_leading_question_mark() {
        let store = kev_parse("?genre=book&isbn=0199256047");
        assert_eq!(store.get("genre").unwrap(), ["book"]);
        assert_eq!(store.get("isbn").unwrap(), ["0199256047"]);
    }

    #[test]
    fn test_parse_html_escaped_separators() {
        let store = kev_parse(
            "ctx_ver=Z39.88-2004&amp;rft.genre=news&amp;rft.atitle=The easy way to brighten your borders",
        );
        assert_eq!(store.get("rft.genre").unwrap(), ["news"]);
        assert_eq!(
            store.get("rft.atitle").unwrap(),
            ["The easy way to brighten your borders"]
        );
    }

    #[test]
    fn test_parse_unencoded_unicode() {
        let store = kev_parse("title=Staré písemné památky žen a dcer českých.&aulast=Dvorský");
        assert_eq!(
            store.get("title").unwrap(),
            ["Staré písemné památky žen a dcer českých."]
        );
        assert_eq!(store.get("aulast").unwrap(), ["Dvorský"]);
    }

    #[test]
    fn test_parse_percent_encoded_unicode() {
        let store = kev_parse("atitle=Targeting+%ce%b17+Nicotinic");
        assert_eq!(store.get("atitle").unwrap(), ["Targeting α7 Nicotinic"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(kev_parse("").is_empty());
        assert!(kev_parse("   ").is_empty());
    }
}
