// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sg_core::{default_catalog, full_catalog, StageSpec};

#[test]
fn flow_table_lists_stages_in_order() {
    let table = format_flow_table(&default_catalog());
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("ORDER"));
    assert!(lines[1].contains("bte_confirm"));
    assert!(lines[1].contains("72h"));
    assert!(lines[9].contains("end_confirm"));
    assert!(lines[9].contains("yes"));
}

#[test]
fn record_list_marks_default() {
    let records = vec![
        FlowConfigRecord {
            id: "default".to_string(),
            name: "Standard upgrade".to_string(),
            description: String::new(),
            stages: full_catalog().into(),
            is_default: true,
        },
        FlowConfigRecord {
            id: "tiny".to_string(),
            name: "Tiny".to_string(),
            description: String::new(),
            stages: vec![StageSpec::approval("a", "A", 1, 1)],
            is_default: false,
        },
    ];
    let list = format_record_list(&records);
    let lines: Vec<_> = list.lines().collect();
    assert!(lines[1].starts_with("default"));
    assert!(lines[1].contains("13"));
    assert!(lines[1].ends_with('*'));
    assert!(!lines[2].ends_with('*'));
}

#[test]
fn empty_record_list() {
    assert_eq!(format_record_list(&[]), "No flow configs\n");
}

#[test]
fn markers_follow_timeline_status() {
    assert_eq!(timeline_marker(TimelineStatus::Completed), "[x]");
    assert_eq!(timeline_marker(TimelineStatus::InProgress), "[>]");
    assert_eq!(timeline_marker(TimelineStatus::Pending), "[ ]");
}
