//! Canonical tag storage.
//!
//! A recipe keeps its whole tag set in a single string of the form
//! `", breakfast, easy, vegan,"`: a leading `", "`, the tags sorted and
//! separated by `", "`, and a trailing `","`. Every stored tag is therefore
//! framed by `", "` on the left and `","` on the right, so a plain substring
//! search for `", <tag>,"` matches whole tags only (`"cat"` never matches a
//! stored `"category"`).
//!
//! Tags cannot contain commas, and tags differing only in case collapse into
//! one lowercased entry.

use std::collections::HashSet;

/// Leading frame of a canonical tag string.
pub const CANONICAL_PREFIX: &str = ", ";
/// Trailing frame of a canonical tag string.
pub const CANONICAL_SUFFIX: &str = ",";
/// Separator placed between two tags in a canonical tag string.
pub const SEPARATOR: &str = ", ";

/// Decodes a stored tag string into its tags.
///
/// `None` and the empty string both yield no tags. Anything else goes
/// through the same pipeline as [`normalize`], so legacy strings that were
/// never canonical (`"Soup,quick"`) decode just as well.
///
/// The order of the returned tags is unspecified.
pub fn decode(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) if !raw.is_empty() => normalize(raw),
        _ => Vec::new(),
    }
}

/// Normalizes comma-separated user input into a set of tags.
///
/// Each piece is trimmed and lowercased; empty pieces are dropped and
/// duplicates removed. The order of the returned tags is unspecified.
///
/// # Examples
///
/// ```
/// let tags = cookbook_store::tags::normalize("Soup, soup, SOUP ,  ");
/// assert_eq!(tags, vec!["soup".to_string()]);
/// ```
pub fn normalize(input: &str) -> Vec<String> {
    let unique: HashSet<String> = input
        .split(',')
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect();
    unique.into_iter().collect()
}

/// Encodes tags into the canonical stored form.
///
/// Tags are trimmed, empty ones dropped, and the rest sorted ascending.
/// Casing is kept as given, so callers normally pass the output of
/// [`normalize`].
///
/// An empty tag list encodes to `", ,"`. No tag query can match it: the
/// shortest query pattern, `", x,"`, is already one character longer.
///
/// # Examples
///
/// ```
/// use cookbook_store::tags::encode;
///
/// assert_eq!(encode(&["vegan", "easy"]), ", easy, vegan,");
/// assert_eq!(encode::<&str>(&[]), ", ,");
/// ```
pub fn encode<S: AsRef<str>>(tags: &[S]) -> String {
    let mut sorted: Vec<&str> = tags
        .iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .collect();
    sorted.sort_unstable();

    format!(
        "{}{}{}",
        CANONICAL_PREFIX,
        sorted.join(SEPARATOR),
        CANONICAL_SUFFIX
    )
}

/// Returns true if `raw` is framed like a canonical tag string.
pub fn is_canonical(raw: &str) -> bool {
    raw.starts_with(CANONICAL_PREFIX) && raw.ends_with(CANONICAL_SUFFIX)
}

/// Brings a stored tag string into canonical form.
///
/// Strings that are already framed canonically are returned unchanged;
/// everything else is decoded and re-encoded. Applying `migrate` twice gives
/// the same result as applying it once.
pub fn migrate(raw: &str) -> String {
    if is_canonical(raw) {
        return raw.to_string();
    }
    encode(&decode(Some(raw)))
}
