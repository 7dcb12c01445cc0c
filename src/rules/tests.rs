use super::parse::parse_line;
use super::*;
use crate::error::{LoadError, ParseErrorKind};
use crate::query::QueryConstraint;
use http::Method;

fn rule(line: &str) -> RouteRule {
    let mut rules = parse_routes("routes", line).unwrap();
    assert_eq!(rules.len(), 1);
    rules.remove(0)
}

fn error(line: &str) -> ParseErrorKind {
    parse_line(line).unwrap_err()
}

#[test]
fn test_simple_route() {
    let r = rule("GET /simpleaction myTestController.simpleAction");
    assert_eq!(r.method, RouteMethod::Only(Method::GET));
    assert_eq!(r.host, HostPattern::Any);
    assert_eq!(r.path.raw, "/simpleaction");
    assert_eq!(r.action, "myTestController.simpleAction");
    assert!(r.args.is_empty());
    assert!(r.constraints.is_empty());
    assert_eq!(r.index, 0);
    assert_eq!(r.origin.to_string(), "routes:1");
}

#[test]
fn test_blank_and_comment_lines_are_skipped() {
    let rules = parse_routes(
        "routes",
        "\n# a comment\n   \n  # indented comment\nGET /a a.b # trailing comment\n",
    )
    .unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].origin.line, 5);
    assert_eq!(rules[0].action, "a.b");
}

#[test]
fn test_method_tokens() {
    assert_eq!(rule("post /a a.b").method, RouteMethod::Only(Method::POST));
    assert_eq!(rule("PATCH /a a.b").method, RouteMethod::Only(Method::PATCH));
    assert_eq!(rule("* /a a.b").method, RouteMethod::Any);
    assert_eq!(
        error("FETCH /a a.b"),
        ParseErrorKind::UnknownMethod("FETCH".to_string())
    );
}

#[test]
fn test_host_column() {
    let r = rule("GET host:SampleHost.org /host myTestController.hostAction");
    assert_eq!(r.host, HostPattern::Exact("samplehost.org".to_string()));
    assert!(r.host.admits(Some("samplehost.org")));
    assert!(r.host.admits(Some("SAMPLEHOST.ORG:8080")));
    assert!(!r.host.admits(Some("otherhost.org")));
    assert!(!r.host.admits(None));
    assert!(HostPattern::Any.admits(None));
}

#[test]
fn test_host_with_port_in_pattern() {
    let host = HostPattern::parse("localhost:8080");
    assert!(host.admits(Some("localhost:8080")));
    assert!(!host.admits(Some("localhost:9090")));
    assert!(!host.admits(Some("localhost")));
}

#[test]
fn test_arguments() {
    let r = rule(r#"GET /param myTestController.paramAction(param:'default', other : "two words", esc:'it\'s')"#);
    assert_eq!(r.action, "myTestController.paramAction");
    assert_eq!(
        r.args,
        vec![
            ("param".to_string(), "default".to_string()),
            ("other".to_string(), "two words".to_string()),
            ("esc".to_string(), "it's".to_string()),
        ]
    );
    assert_eq!(r.arg("param"), Some("default"));
    assert_eq!(r.arg("missing"), None);
}

#[test]
fn test_argument_with_parenthesis_and_comma_in_quotes() {
    let r = rule("GET /quote a.b(msg:'So Long, and Thanks (for) All the Fish')");
    assert_eq!(r.arg("msg"), Some("So Long, and Thanks (for) All the Fish"));
}

#[test]
fn test_argument_defaults_flow_into_path() {
    let r = rule("GET /list/{page}? list.show(page:'1')");
    assert_eq!(r.path.params().next().unwrap().default.as_deref(), Some("1"));
}

#[test]
fn test_argument_errors() {
    assert!(matches!(error("GET /a a.b(param)"), ParseErrorKind::InvalidArgument(_)));
    assert!(matches!(error("GET /a a.b(param:bare)"), ParseErrorKind::InvalidArgument(_)));
    assert!(matches!(
        error("GET /a a.b(x:'1', x:'2')"),
        ParseErrorKind::InvalidArgument(name) if name == "x"
    ));
    assert_eq!(
        error("GET /a a.b(x:'1'"),
        ParseErrorKind::Unterminated { open: '(' }
    );
    assert_eq!(
        error("GET /a a.b(x:'1)"),
        ParseErrorKind::Unterminated { open: '\'' }
    );
}

#[test]
fn test_constraints_after_path_or_action() {
    let r = rule("GET /qsparampresence [qsParamA] myTestController.qsParamPresence");
    assert_eq!(r.constraints, vec![QueryConstraint::Present("qsParamA".to_string())]);

    let r = rule("GET /qs a.b(x:'1') [!qsParamA, qsParamB!=abc]");
    assert_eq!(
        r.constraints,
        vec![
            QueryConstraint::Absent("qsParamA".to_string()),
            QueryConstraint::NotEquals {
                name: "qsParamB".to_string(),
                expected: "abc".to_string(),
            },
        ]
    );
    assert_eq!(r.arg("x"), Some("1"));
}

#[test]
fn test_constraints_are_decoded_and_whitespace_separated() {
    let r = rule(
        "GET /qsparamencodedvalueandrandomspaces [ qsParamA=%20   qsParamB=a+b   qsParamC=%C3%A9t%C3%A9  ] a.b",
    );
    assert_eq!(
        r.constraints,
        vec![
            QueryConstraint::Equals {
                name: "qsParamA".to_string(),
                expected: " ".to_string(),
            },
            QueryConstraint::Equals {
                name: "qsParamB".to_string(),
                expected: "a b".to_string(),
            },
            QueryConstraint::Equals {
                name: "qsParamC".to_string(),
                expected: "été".to_string(),
            },
        ]
    );
}

#[test]
fn test_constraint_errors() {
    assert_eq!(
        error("GET /a [x] a.b [y]"),
        ParseErrorKind::DuplicateConstraintGroup
    );
    assert_eq!(error("GET /a [x a.b"), ParseErrorKind::Unterminated { open: '[' });
    assert!(matches!(error("GET /a [=abc] a.b"), ParseErrorKind::InvalidConstraint(_)));
    assert!(matches!(error("GET /a [!x=1] a.b"), ParseErrorKind::InvalidConstraint(_)));
}

#[test]
fn test_structural_errors() {
    assert_eq!(error("GET"), ParseErrorKind::MissingPath);
    assert_eq!(error("GET host:example.org"), ParseErrorKind::MissingPath);
    assert_eq!(error("GET /a"), ParseErrorKind::MissingAction);
    assert_eq!(
        error("GET a a.b"),
        ParseErrorKind::RelativePath("a".to_string())
    );
    assert_eq!(
        error("GET /a a.b extra"),
        ParseErrorKind::TrailingInput("extra".to_string())
    );
}

#[test]
fn test_path_with_spaces_inside_regex() {
    let r = rule("GET /words/{<[a-z ]+>words} a.b");
    assert_eq!(r.path.raw, "/words/{<[a-z ]+>words}");
}

#[test]
fn test_action_template() {
    let r = rule("GET /{controller}/{action} {controller}.{action}");
    assert_eq!(r.action, "{controller}.{action}");
}

#[test]
fn test_indices_run_across_sources() {
    let rules = parse_sources(&[
        RouteSource::new("routes", "GET /a a.a\nGET /b a.b"),
        RouteSource::new("additional.routes", "GET /additionalroute a.c"),
    ])
    .unwrap();
    let indices: Vec<usize> = rules.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(rules[2].origin.to_string(), "additional.routes:1");
}

#[test]
fn test_all_errors_are_collected() {
    let err = parse_sources(&[
        RouteSource::new("routes", "GET /ok a.b\nFETCH /x a.b\nGET /y"),
        RouteSource::new("more", "GET /z/{id a.b"),
    ])
    .unwrap_err();
    let errors = err.parse_errors();
    assert_eq!(errors.len(), 3);
    assert_eq!((errors[0].source_name.as_str(), errors[0].line), ("routes", 2));
    assert_eq!((errors[1].source_name.as_str(), errors[1].line), ("routes", 3));
    assert_eq!((errors[2].source_name.as_str(), errors[2].line), ("more", 1));
    assert!(matches!(err, LoadError::Aborted(_)));
    assert!(err.to_string().contains("3 error(s)"));
    assert_eq!(
        errors[1].to_string(),
        "routes:3: missing action identifier"
    );
}

#[test]
fn test_display_round_trips_shape() {
    let r = rule("GET host:samplehost.org /qs/{id} a.b(x:'1') [qsParamA=abc]");
    assert_eq!(
        r.to_string(),
        "GET host:samplehost.org /qs/{id} a.b(x:'1') [qsParamA=abc]"
    );
}

#[test]
fn test_action_eq_ignores_case() {
    assert!(action_eq("MyTestCONTROLLER.caseInsensitive", "mytestcontroller.caseinsensitive"));
    assert!(action_eq("Été.Action", "été.action"));
    assert!(!action_eq("a.b", "a.c"));
    assert!(!action_eq("a.b", "a.bb"));
}

#[test]
fn test_hash_inside_action_is_not_a_comment() {
    assert_eq!(rule("GET /x ctrl#act").action, "ctrl#act");
    assert_eq!(rule("GET /x ctrl.act # note").action, "ctrl.act");
    assert_eq!(
        error("GET /x ctrl.act(a:'1')#note"),
        ParseErrorKind::TrailingInput("#note".to_string())
    );
}

#[test]
fn test_constraint_group_directly_after_path() {
    let r = rule("GET /p[qsParamA] c.d");
    assert_eq!(r.path.raw, "/p");
    assert_eq!(r.constraints, vec![QueryConstraint::Present("qsParamA".to_string())]);
    assert_eq!(r.action, "c.d");
}

#[test]
fn test_brace_inside_regex_class() {
    let r = rule("GET /v/{<[^}]+>v} a.b");
    assert_eq!(r.path.raw, "/v/{<[^}]+>v}");
    let param = r.path.params().next().unwrap();
    assert_eq!(param.name, "v");
    assert_eq!(param.regex.as_deref(), Some("[^}]+"));
}
