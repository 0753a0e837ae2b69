#![expect(clippy::expect_used, reason = "tests surface failures through expect")]
//! End-to-end tests for the `search-query` binary.

use assert_cmd::Command;
use rstest::rstest;

const ENV_VARS: [&str; 3] = [
    "SEARCH_QUERY_LOG_LEVEL",
    "SEARCH_QUERY_MAX_DEPTH",
    "SEARCH_QUERY_DIALECT",
];

fn search_query() -> Command {
    let mut cmd = Command::cargo_bin("search-query").expect("binary exists");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn composes_positional_query() {
    search_query()
        .args(["compose", "--data-source", "`field`", "a AND NOT (b OR c)"])
        .assert()
        .success()
        .stdout("`field` LIKE '%a%' AND NOT (`field` LIKE '%b%' OR `field` LIKE '%c%')\n");
}

#[test]
fn composes_template_from_stdin() {
    search_query()
        .args(["compose", "--data-source", "(a LIKE '?' OR b LIKE '?')"])
        .args(["--placeholder", "?"])
        .write_stdin("x OR y\n")
        .assert()
        .success()
        .stdout("(a LIKE '%x%' OR b LIKE '%x%') OR (a LIKE '%y%' OR b LIKE '%y%')\n");
}

#[rstest]
#[case(None, "mysql", "c LIKE '%it\\'s%'\n")]
#[case(Some("ansi"), "mysql", "c LIKE '%it''s%'\n")]
#[case(None, "ansi", "c LIKE '%it''s%'\n")]
fn flag_overrides_environment_dialect(
    #[case] flag: Option<&str>,
    #[case] env: &str,
    #[case] expected: &str,
) {
    let mut cmd = search_query();
    cmd.env("SEARCH_QUERY_DIALECT", env)
        .args(["compose", "--data-source", "c", "it's"]);
    if let Some(dialect) = flag {
        cmd.args(["--dialect", dialect]);
    }
    cmd.assert().success().stdout(expected.to_string());
}

#[test]
fn tokenize_emits_json() {
    let output = search_query()
        .args(["tokenize", "--json", "a OR \"b c\""])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(
        json,
        serde_json::json!([
            {"type": "value", "value": "a"},
            {"type": "operator", "value": "OR"},
            {"type": "exact_value", "value": "b c"},
        ])
    );
}

#[test]
fn filter_prints_normalised_tree() {
    search_query()
        .args(["filter", "OR a NOT (b AND)"])
        .assert()
        .success()
        .stdout("value \"a\"\noperator AND NOT\ngroup\n  value \"b AND\"\n");
}

#[test]
fn reconstruct_normalises_on_request() {
    search_query()
        .args(["reconstruct", "--normalised", "AND NOT a  OR  OR b"])
        .assert()
        .success()
        .stdout("NOT a OR b\n");
}

#[test]
fn empty_query_prints_empty_line() {
    search_query()
        .args(["compose", "--data-source", "c"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn invalid_environment_exits_with_status_two() {
    let output = search_query()
        .env("SEARCH_QUERY_DIALECT", "oracle")
        .args(["tokenize", "a"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("unknown dialect"));
    assert!(output.stdout.is_empty());
}

#[test]
fn composition_failure_exits_with_status_one() {
    let output = search_query()
        .args(["compose", "--data-source", "c", "--placeholder", "{v}", "a"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("does not occur"));
}

#[test]
fn max_depth_flag_limits_nesting() {
    search_query()
        .args(["--max-depth", "1", "reconstruct", "a OR (b AND (c OR d))"])
        .assert()
        .success()
        .stdout("a OR (b AND (c OR d))\n");
}

#[rstest]
#[case(&["--max-depth", "1000000", "tokenize", "a"], None)]
#[case(&["--max-depth", "18446744073709551615", "tokenize", "a"], None)]
#[case(&["tokenize", "a"], Some("100000"))]
fn excessive_max_depth_exits_with_status_two(
    #[case] args: &[&str],
    #[case] env: Option<&str>,
) {
    let mut cmd = search_query();
    if let Some(depth) = env {
        cmd.env("SEARCH_QUERY_MAX_DEPTH", depth);
    }
    let output = cmd.args(args).output().expect("runs");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("exceeds the limit"));
    assert!(output.stdout.is_empty());
}

#[test]
fn deep_nesting_at_depth_ceiling_succeeds() {
    let query = format!("{}a{}", "(".repeat(5_000), ")".repeat(5_000));
    search_query()
        .args(["--max-depth", "256", "tokenize", "--json"])
        .write_stdin(query)
        .assert()
        .success();
}
