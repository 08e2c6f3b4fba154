//! Run command specs
//!
//! Drive whole flows through the binary with signal scripts. Every gate is
//! resolved by the script, so no run waits on a stage timeout.

use crate::prelude::*;

#[test]
fn run_completes_with_full_script() {
    let temp = Project::empty();
    let script = temp.file("signals.jsonl", URGENT_SCRIPT);

    temp.sg()
        .args(&[
            "run",
            "v1",
            "--name",
            "Spring release",
            "--signals",
            script.to_str().unwrap(),
        ])
        .passes()
        .stdout_has("Run: upgrade-v1")
        .stdout_has("Status: completed")
        .stdout_has("Stage: completed")
        .stdout_has("upgrade flow completed")
        .stdout_lacks("[ ]");
}

#[test]
fn run_on_seeded_urgent_flow() {
    let temp = Project::empty();
    temp.sg().args(&["catalog", "seed"]).passes();
    let script = temp.file("signals.jsonl", URGENT_SCRIPT);

    temp.sg()
        .args(&[
            "run",
            "v2",
            "--flow",
            "urgent",
            "--signals",
            script.to_str().unwrap(),
        ])
        .passes()
        .stdout_has("Status: completed");
}

#[test]
fn run_json_reports_outcome_and_stages() {
    let temp = Project::empty();
    let script = temp.file("signals.jsonl", URGENT_SCRIPT);

    let out = temp
        .sg()
        .args(&[
            "run",
            "v3",
            "--item",
            "item-1",
            "--item",
            "item-2",
            "--signals",
            script.to_str().unwrap(),
            "--json",
        ])
        .passes()
        .stdout();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["outcome"]["status"], "completed");
    assert_eq!(value["outcome"]["state"]["item_ids"][1], "item-2");
    assert!(value.get("error").is_none());
}

#[test]
fn run_fails_when_test_round_fails() {
    let temp = Project::empty();
    let script = temp.file(
        "signals.jsonl",
        r#"
{"kind": "approval", "stage": "bte_confirm", "operator": "alice", "approved": true}
{"kind": "approval", "stage": "bte_finalize", "operator": "alice", "approved": true}
{"kind": "approval", "stage": "bte_prepare", "operator": "bob", "approved": true}
{"kind": "test", "stage": "bte_test", "all_passed": false}
"#,
    );

    temp.sg()
        .args(&["run", "v4", "--signals", script.to_str().unwrap()])
        .fails()
        .code(1)
        .stdout_has("Status: failed")
        .stdout_has("BTE Test did not pass")
        .stdout_has("Stage: bte_test");
}

#[test]
fn run_rejections_before_approval_still_complete() {
    let temp = Project::empty();
    let script = format!(
        "{}\n{}",
        r#"{"kind": "approval", "stage": "bte_confirm", "operator": "alice", "approved": false, "comment": "missing item"}"#,
        URGENT_SCRIPT
    );
    let script = temp.file("signals.jsonl", &script);

    temp.sg()
        .args(&["run", "v5", "--signals", script.to_str().unwrap()])
        .passes()
        .stdout_has("Status: completed");
}

#[test]
fn run_reports_failed_test_when_script_continues_past_it() {
    let temp = Project::empty();
    let mut script = String::from(
        r#"
{"kind": "approval", "stage": "bte_confirm", "operator": "alice", "approved": true}
{"kind": "approval", "stage": "bte_finalize", "operator": "alice", "approved": true}
{"kind": "approval", "stage": "bte_prepare", "operator": "bob", "approved": true}
{"kind": "test", "stage": "bte_test", "all_passed": false}
"#,
    );
    let rejection = r#"{"kind": "approval", "stage": "prod_finalize", "operator": "alice", "approved": false, "comment": "not yet"}"#;
    for _ in 0..200_000 {
        script.push_str(rejection);
        script.push('\n');
    }
    let script = temp.file("signals.jsonl", &script);

    temp.sg()
        .args(&["run", "v6", "--signals", script.to_str().unwrap()])
        .fails()
        .code(1)
        .stdout_has("Run: upgrade-v6")
        .stdout_has("Status: failed")
        .stdout_has("BTE Test did not pass");
}
