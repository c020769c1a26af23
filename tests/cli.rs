//! Command line behavior of the `plotscript` binary.

mod common;

use common::run_cli;

#[test]
fn test_version() {
    let out = run_cli(&["--version"], "");
    assert!(out.success());
    assert!(out.stdout.starts_with("Plotscript "));
}

#[test]
fn test_help() {
    let out = run_cli(&["-h"], "");
    assert!(out.success());
    assert!(out.stderr.contains("USAGE:"));
}

#[test]
fn test_unknown_option() {
    let out = run_cli(&["--frobnicate"], "");
    assert_eq!(out.exit_code, 1);
    assert!(out.stderr.contains("Unknown option"));
}

#[test]
fn test_eval_expression() {
    let out = run_cli(&["-e", "(+ 1 2)"], "");
    assert!(out.success(), "stderr: {}", out.stderr);
    assert_eq!(out.stdout.trim(), "(3)");
}

#[test]
fn test_eval_uses_startup_definitions() {
    let out = run_cli(&["-e", "(first (make-point 7 8))"], "");
    assert!(out.success(), "stderr: {}", out.stderr);
    assert_eq!(out.stdout.trim(), "(7)");
}

#[test]
fn test_eval_parse_failure() {
    let out = run_cli(&["-e", "(+ 1"], "");
    assert_eq!(out.exit_code, 1);
    assert!(out.stderr.contains("Invalid Program. Could not parse."));
}

#[test]
fn test_eval_semantic_error() {
    let out = run_cli(&["-e", "(first (list))"], "");
    assert_eq!(out.exit_code, 1);
    assert!(out.stderr.starts_with("Error: "));
}

#[test]
fn test_missing_file() {
    let out = run_cli(&["/no/such/program.pls"], "");
    assert_eq!(out.exit_code, 1);
    assert!(out.stderr.contains("Could not open file for reading"));
}

#[test]
fn test_eval_file() {
    let path = std::env::temp_dir().join(format!("plotscript-cli-file-{}.pls", std::process::id()));
    std::fs::write(
        &path,
        "; squares\n(begin\n  (define sq (lambda (x) (* x x)))\n  (map sq (list 1 2 3)))\n",
    )
    .unwrap();

    let out = run_cli(&[path.to_str().unwrap()], "");
    let _ = std::fs::remove_file(&path);

    assert!(out.success(), "stderr: {}", out.stderr);
    assert_eq!(out.stdout.trim(), "((1) (4) (9))");
}

#[test]
fn test_repl_session() {
    let out = run_cli(
        &[],
        "(define a 2)\n(* a 21)\n\n%reset\n(a)\n%stop\n%stop\n%start\n(+ 1 1)\n%exit\n",
    );
    assert!(out.success(), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("(42)"));
    assert!(out.stdout.contains("(2)"));
    // `a` is gone after the reset
    assert!(out.stdout.contains("Error: "));
    // The second %stop is reported, not fatal
    assert!(out.stderr.contains("no kernel worker is running"));
}
