//! Catalog command specs
//!
//! Verify listing, seeding and showing stored flow configs.

use crate::prelude::*;

#[test]
fn catalog_list_empty() {
    let temp = Project::empty();
    temp.sg()
        .args(&["catalog", "list"])
        .passes()
        .stdout_eq("No flow configs\n");
}

#[test]
fn catalog_seed_writes_builtin_flows() {
    let temp = Project::empty();
    temp.sg()
        .args(&["catalog", "seed"])
        .passes()
        .stdout_has("Seeded flow configs: default, urgent");
    assert!(temp.store_path().is_file());

    let list = temp.sg().args(&["catalog", "list"]).passes().stdout();
    let default = list
        .lines()
        .find(|l| l.starts_with("default"))
        .expect("default flow listed");
    assert!(default.contains("13"), "{default}");
    assert!(default.trim_end().ends_with('*'), "{default}");

    let urgent = list
        .lines()
        .find(|l| l.starts_with("urgent"))
        .expect("urgent flow listed");
    assert!(urgent.contains(" 9 "), "{urgent}");
}

#[test]
fn catalog_show_orders_stages() {
    let temp = Project::empty();
    temp.sg().args(&["catalog", "seed"]).passes();

    let table = temp
        .sg()
        .args(&["catalog", "show", "default"])
        .passes()
        .stdout_has("gray_confirm")
        .stdout();
    let keys: Vec<&str> = table
        .lines()
        .skip(1)
        .filter_map(|l| l.split_whitespace().nth(1))
        .collect();
    assert_eq!(keys.first(), Some(&"bte_confirm"));
    assert_eq!(keys.last(), Some(&"end_confirm"));
    assert_eq!(keys.len(), 13);
}

#[test]
fn catalog_show_json() {
    let temp = Project::empty();
    temp.sg().args(&["catalog", "seed"]).passes();

    let out = temp
        .sg()
        .args(&["catalog", "show", "urgent", "--json"])
        .passes()
        .stdout();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let stages = value.as_array().unwrap();
    assert_eq!(stages.len(), 9);
    assert_eq!(stages[0]["key"], "bte_confirm");
}

#[test]
fn catalog_show_unknown_falls_back_to_default() {
    let temp = Project::empty();
    temp.sg()
        .args(&["catalog", "show", "nonexistent"])
        .passes()
        .stderr_has("showing the default catalog")
        .stdout_has("bte_confirm")
        .stdout_lacks("gray_confirm");
}

#[test]
fn catalog_default_prints_fallback_catalog() {
    let temp = Project::empty();
    let out = temp
        .sg()
        .args(&["catalog", "default"])
        .passes()
        .stdout();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 9);
}
