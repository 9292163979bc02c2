//! Sub-option string parsing

use indexmap::IndexMap;

/// Parsed sub-options, keyed by name. Bare keys have no value.
pub type SubOptions = IndexMap<String, Option<String>>;

/// Parse a `key=value,key,key=value` sub-option string
///
/// Segments are separated by commas, ignoring surrounding whitespace. The key ends at the first
/// `=`; a segment starting with `=` is kept whole as a bare key. Empty segments are skipped and
/// the last occurrence of a duplicate key wins.
///
/// ```
/// let opts = babelx::getsubopt("a=1, b ,c=3");
///
/// assert_eq!(opts["a"].as_deref(), Some("1"));
/// assert_eq!(opts["b"], None);
/// assert_eq!(opts["c"].as_deref(), Some("3"));
/// ```
pub fn getsubopt(s: &str) -> SubOptions {
    let mut rv = IndexMap::new();

    for kv in s.split(',').map(str::trim).filter(|kv| !kv.is_empty()) {
        match kv.find('=') {
            Some(i) if i > 0 => rv.insert(kv[..i].to_owned(), Some(kv[i + 1..].to_owned())),
            _ => rv.insert(kv.to_owned(), None),
        };
    }

    rv
}
