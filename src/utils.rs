use crate::regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static PMID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^pmid[^0-9]*([0-9]+)").unwrap());

/// Returns the first run of ASCII digits in `text`, e.g. the OCLC number in
/// `<accessionnumber>277200522</accessionnumber>`.
pub(crate) fn first_digit_run(text: &str) -> Option<&str> {
    DIGIT_RUN_REGEX.find(text).map(|m| m.as_str())
}

/// Extracts the numeric part of a `pmid`-prefixed value such as `pmid:18539564`
/// or `pmid/18539564`.
pub(crate) fn pmid_digits(value: &str) -> Option<&str> {
    PMID_REGEX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Keeps at most `count` characters of `text`, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

/// Splits a field holding several identifiers, such as
/// `"0870232924 9780870232923"`, into one token per identifier.
pub(crate) fn split_identifiers(value: &str) -> impl Iterator<Item = &str> {
    value.split_whitespace()
}

/// Strips an ASCII `prefix` from `value`, ignoring case.
pub(crate) fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}

/// Whether `haystack` contains the ASCII `needle`, ignoring case.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Trims `value` and treats an empty result as absent.
pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
