// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_approval_and_test_lines() {
    let script = r#"
# BTE round
{"kind": "approval", "stage": "bte_confirm", "operator": "alice", "approved": false, "comment": "missing item"}
{"kind": "approval", "stage": "bte_confirm", "operator": "alice", "approved": true}

{"kind": "test", "stage": "bte_test", "all_passed": true}
"#;
    let signals = parse_script(script).unwrap();
    assert_eq!(signals.len(), 3);

    let Signal::Approval(rejection) = &signals[0] else {
        panic!("expected approval, got {:?}", signals[0]);
    };
    assert!(!rejection.approved);
    assert_eq!(rejection.comment, "missing item");
    assert_eq!(signals[1].channel(), "bte_confirm-approval");
    assert_eq!(signals[2].channel(), "bte_test-test-complete");
}

#[test]
fn reports_line_of_bad_signal() {
    let err = parse_script("{\"kind\": \"test\", \"stage\": \"t\", \"all_passed\": true}\nnot json\n")
        .unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn empty_script_has_no_signals() {
    assert!(parse_script("\n# nothing\n").unwrap().is_empty());
}
