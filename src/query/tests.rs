use super::*;

fn present(name: &str) -> QueryConstraint {
    QueryConstraint::Present(name.to_string())
}

fn absent(name: &str) -> QueryConstraint {
    QueryConstraint::Absent(name.to_string())
}

fn equals(name: &str, expected: &str) -> QueryConstraint {
    QueryConstraint::Equals {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

fn not_equals(name: &str, expected: &str) -> QueryConstraint {
    QueryConstraint::NotEquals {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

#[test]
fn test_parse_query_string() {
    let q = QueryParams::parse("?a=1&flag&b=&c=x%20y&d=a+b");
    assert_eq!(q.len(), 5);
    assert_eq!(q.get("a"), Some("1"));
    assert_eq!(q.get("flag"), Some(""));
    assert_eq!(q.get("b"), Some(""));
    assert_eq!(q.get("c"), Some("x y"));
    assert_eq!(q.get("d"), Some("a b"));
    assert!(q.contains("flag"));
    assert!(!q.contains("missing"));
}

#[test]
fn test_parse_skips_empty_pieces() {
    let q = QueryParams::parse("&&a=1&");
    assert_eq!(q.len(), 1);
    assert!(QueryParams::parse("").is_empty());
}

#[test]
fn test_first_occurrence_wins() {
    let q = QueryParams::parse("a=1&a=2");
    assert_eq!(q.get("a"), Some("1"));
    let pairs: Vec<(&str, &str)> = q.iter().collect();
    assert_eq!(pairs, vec![("a", "1"), ("a", "2")]);
}

#[test]
fn test_decode_component() {
    assert_eq!(decode_component("%C3%A9t%C3%A9"), "été");
    assert_eq!(decode_component("a+b"), "a b");
    assert_eq!(decode_component("%20"), " ");
    assert_eq!(decode_component("plain"), "plain");
    assert_eq!(decode_component("bad%FF"), "bad%FF");
}

#[test]
fn test_presence() {
    let c = [present("qsParamA")];
    assert!(evaluate(&c, &QueryParams::parse("qsParamA")));
    assert!(evaluate(&c, &QueryParams::parse("qsParamA=")));
    assert!(evaluate(&c, &QueryParams::parse("qsParamA=abc")));
    assert!(!evaluate(&c, &QueryParams::parse("")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamB=abc")));
}

#[test]
fn test_absence() {
    let c = [absent("qsParamA")];
    assert!(evaluate(&c, &QueryParams::parse("")));
    assert!(evaluate(&c, &QueryParams::parse("qsParamB")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamA")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamA=")));
}

#[test]
fn test_empty_value_required() {
    let c = [equals("qsParamA", "")];
    assert!(evaluate(&c, &QueryParams::parse("qsParamA")));
    assert!(evaluate(&c, &QueryParams::parse("qsParamA=")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamA=abc")));
    assert!(!evaluate(&c, &QueryParams::parse("")));
}

#[test]
fn test_specific_value_required() {
    let c = [equals("qsParamA", "abc")];
    assert!(evaluate(&c, &QueryParams::parse("qsParamA=abc")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamA=ABC")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamA=")));
    assert!(!evaluate(&c, &QueryParams::parse("")));
}

#[test]
fn test_negated_value_requires_existence() {
    let c = [not_equals("qsParamA", "abc")];
    assert!(evaluate(&c, &QueryParams::parse("qsParamA=def")));
    assert!(evaluate(&c, &QueryParams::parse("qsParamA")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamA=abc")));
    assert!(!evaluate(&c, &QueryParams::parse("")));
}

#[test]
fn test_constraints_are_anded() {
    let c = [equals("qsParamA", "abc"), present("qsParamB")];
    assert!(evaluate(&c, &QueryParams::parse("qsParamA=abc&qsParamB")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamA=abc")));
    assert!(!evaluate(&c, &QueryParams::parse("qsParamB")));
    assert_eq!(
        first_violation(&c, &QueryParams::parse("qsParamA=abc")),
        Some(&c[1])
    );
}

#[test]
fn test_empty_constraint_list_always_passes() {
    assert!(evaluate(&[], &QueryParams::parse("")));
    assert!(evaluate(&[], &QueryParams::parse("anything=1")));
}

#[test]
fn test_constraint_display_and_name() {
    assert_eq!(present("a").to_string(), "a");
    assert_eq!(absent("a").to_string(), "!a");
    assert_eq!(equals("a", "b").to_string(), "a=b");
    assert_eq!(not_equals("a", "b").to_string(), "a!=b");
    assert_eq!(not_equals("a", "b").name(), "a");
    assert!(satisfies(&present("x"), &[("x", "")].into_iter().collect()));
}
