use brrtrouter_dsl::cli::{run_cli, Cli};
use clap::Parser;

mod common;
use common::fixtures;
use common::temp_files;

#[test]
fn test_check_accepts_valid_routes() {
    let file = temp_files::create_temp_routes(fixtures::MAIN_ROUTES);
    let path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["brrtroute", "check", "--routes", path]).unwrap();
    assert!(run_cli(cli).is_ok());
}

#[test]
fn test_check_rejects_bad_routes() {
    let file = temp_files::create_temp_routes("GET /ok a.b\nGET /broken\n");
    let path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["brrtroute", "check", "--routes", path]).unwrap();
    let err = run_cli(cli).unwrap_err();
    assert!(err.to_string().contains("1 error(s)"));
}

#[test]
fn test_match_command_runs() {
    let file = temp_files::create_temp_routes(fixtures::MAIN_ROUTES);
    let path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from([
        "brrtroute",
        "match",
        "--routes",
        path,
        "--method",
        "POST",
        "--path",
        "/http",
        "-H",
        "x-http-method-override: PUT",
    ])
    .unwrap();
    assert!(run_cli(cli).is_ok());
}

#[test]
fn test_missing_routes_file_fails() {
    let cli = Cli::try_parse_from([
        "brrtroute",
        "check",
        "--routes",
        "/definitely/not/here.routes",
    ])
    .unwrap();
    assert!(run_cli(cli).is_err());
}

#[test]
fn test_check_expands_route_patterns() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("routes-a.conf"), fixtures::WILDCARD_A_ROUTES).unwrap();
    std::fs::write(dir.path().join("routes-b.conf"), fixtures::WILDCARD_B_ROUTES).unwrap();
    let pattern = dir.path().join("routes-*.conf");
    let cli = Cli::try_parse_from(["brrtroute", "check", "--routes", pattern.to_str().unwrap()])
        .unwrap();
    assert!(run_cli(cli).is_ok());
}

#[test]
fn test_check_fails_when_pattern_matches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("routes-*.conf");
    let cli = Cli::try_parse_from(["brrtroute", "check", "--routes", pattern.to_str().unwrap()])
        .unwrap();
    let err = run_cli(cli).unwrap_err();
    assert!(err.to_string().contains("matched no files"));
}
