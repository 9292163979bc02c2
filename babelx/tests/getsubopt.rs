//! Sub-option parser tests

use pretty_assertions::assert_eq;

use babelx::getsubopt;

fn pairs(s: &str) -> Vec<(String, Option<String>)> {
    getsubopt(s).into_iter().collect()
}

fn kv(k: &str, v: Option<&str>) -> (String, Option<String>) {
    (k.to_owned(), v.map(str::to_owned))
}

#[test]
fn keys_and_values() {
    assert_eq!(
        pairs("a=1,b,c=3"),
        vec![kv("a", Some("1")), kv("b", None), kv("c", Some("3"))]
    );
}

#[test]
fn empty_string() {
    assert!(pairs("").is_empty());
    assert!(pairs(" , ,").is_empty());
}

#[test]
fn whitespace_is_trimmed() {
    assert_eq!(
        pairs(" loose , spec = true "),
        vec![kv("loose", None), kv("spec ", Some(" true"))]
    );
}

#[test]
fn value_keeps_further_equals() {
    assert_eq!(pairs("pragma=a=b"), vec![kv("pragma", Some("a=b"))]);
}

#[test]
fn empty_value() {
    assert_eq!(pairs("a="), vec![kv("a", Some(""))]);
}

#[test]
fn leading_equals_is_a_bare_key() {
    assert_eq!(pairs("=x"), vec![kv("=x", None)]);
}

#[test]
fn last_duplicate_wins() {
    assert_eq!(
        pairs("a=1,b,a=2"),
        vec![kv("a", Some("2")), kv("b", None)]
    );
}
