//! End-to-end tests for the charonc binary

use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

const SUM_TREE: &str = r#"{
    "node": "Program",
    "globals": [
        {
            "node": "GlobalFunction",
            "decl": {
                "name": "sum",
                "arguments": [["n", {"kind": "integer", "bit_width": 32}]],
                "return_type": {"kind": "integer", "bit_width": 32}
            },
            "body": {
                "node": "StmtBlock",
                "statements": [
                    {
                        "node": "StmtDecl",
                        "type": {"kind": "integer", "bit_width": 32},
                        "name": "acc",
                        "initial": {"node": "ExprLiteralNumeric", "value": 0}
                    },
                    {
                        "node": "StmtWhile",
                        "condition": {"node": "ExprVar", "name": "n"},
                        "body": {
                            "node": "StmtBlock",
                            "statements": [
                                {
                                    "node": "ExprBinary",
                                    "op": "Assign",
                                    "left": {"node": "ExprVar", "name": "acc"},
                                    "right": {
                                        "node": "ExprBinary",
                                        "op": "Add",
                                        "left": {"node": "ExprVar", "name": "acc"},
                                        "right": {"node": "ExprVar", "name": "n"}
                                    }
                                },
                                {
                                    "node": "ExprBinary",
                                    "op": "Assign",
                                    "left": {"node": "ExprVar", "name": "n"},
                                    "right": {
                                        "node": "ExprBinary",
                                        "op": "Sub",
                                        "left": {"node": "ExprVar", "name": "n"},
                                        "right": {"node": "ExprLiteralNumeric", "value": 1}
                                    }
                                }
                            ]
                        }
                    },
                    {"node": "StmtReturn", "value": {"node": "ExprVar", "name": "acc"}}
                ]
            }
        }
    ]
}"#;

const DEREF_TREE: &str = r#"{
    "node": "Program",
    "globals": [
        {
            "node": "GlobalFunction",
            "decl": {"name": "f", "arguments": [], "return_type": {"kind": "void"}},
            "body": {
                "node": "StmtBlock",
                "statements": [
                    {
                        "node": "ExprUnary",
                        "op": "Deref",
                        "operand": {"node": "ExprLiteralNumeric", "value": 0},
                        "location": {"filename": "deref.ch", "line": 2, "column": 5}
                    }
                ]
            }
        }
    ]
}"#;

const UNRESOLVED_TREE: &str = r#"{
    "node": "Program",
    "globals": [
        {
            "node": "GlobalFunction",
            "decl": {"name": "f", "arguments": [], "return_type": {"kind": "integer", "bit_width": 8}},
            "body": {
                "node": "StmtBlock",
                "statements": [{"node": "StmtReturn", "value": {"node": "ExprVar", "name": "ghost"}}]
            }
        }
    ]
}"#;

fn charonc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_charonc"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to launch charonc")
}

fn write_tree(dir: &Path, name: &str, tree: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, tree).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_compile_writes_module() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), "sum.json", SUM_TREE);
    let output = dir.path().join("sum.ll");

    let result = charonc(&["compile", &input, "-o", &output.to_string_lossy()]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("; ModuleID = 'CharonModule'"));
    assert!(text.contains("define i32 @sum(i32 %0) {"));
    assert!(text.contains("L1:  ; cond"));
}

#[test]
fn test_compile_defaults_output_and_emits_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), "sum.json", SUM_TREE);
    let json = dir.path().join("sum.module.json");

    let result = charonc(&["compile", &input, "--print-ir", "--emit-json", &json.to_string_lossy()]);

    assert!(result.status.success());
    assert!(dir.path().join("sum.ll").exists());
    assert!(String::from_utf8_lossy(&result.stdout).contains("define i32 @sum"));
    let module: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(json).unwrap()).unwrap();
    assert_eq!(module["name"], "CharonModule");
    assert_eq!(module["functions"][0]["name"], "sum");
}

#[test]
fn test_run_executes_entry() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), "sum.json", SUM_TREE);

    let plain = charonc(&["run", &input, "--entry", "sum", "4"]);
    let optimized = charonc(&["run", &input, "--entry", "sum", "--passes", "default<O2>", "100"]);

    assert_eq!(String::from_utf8_lossy(&plain.stdout), "10\n");
    assert_eq!(String::from_utf8_lossy(&optimized.stdout), "5050\n");
}

#[test]
fn test_user_error_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), "deref.json", DEREF_TREE);

    let result = charonc(&["compile", &input]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("deref.ch:2:5: error: unimplemented unary operation `*`"));
    assert!(!dir.path().join("deref.ll").exists());
}

#[test]
fn test_internal_error_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), "ghost.json", UNRESOLVED_TREE);

    let result = charonc(&["compile", &input]);

    assert_eq!(result.status.code(), Some(70));
    assert!(String::from_utf8_lossy(&result.stderr).contains("internal compiler error"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let result = charonc(&["compile", &missing.to_string_lossy()]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to read"));
}

#[test]
fn test_unknown_pass_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), "sum.json", SUM_TREE);

    let result = charonc(&["compile", &input, "--passes", "inline"]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("inline"));
}
