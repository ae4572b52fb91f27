//! End-to-end tests for `rangde rules` command.

mod fixtures;
use fixtures::*;
use std::fs;

const FILL_RULES: &str = r#"{
  "rules": [
    {
      "id": "slate-fill",
      "name": "Slate fill to Indigo",
      "when": { "collection": "2 Fill emphasis", "group": "Slate" },
      "then": { "aliasTo": "2 Fill emphasis/Indigo" }
    },
    {
      "id": "off",
      "name": "Disabled",
      "enabled": false,
      "then": { "aliasTo": "9 Theme/Theme" }
    }
  ]
}"#;

fn rules_file(ws: &TempFile, content: &str) -> std::path::PathBuf {
    let path = ws.dir.path().join("rules.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_rules_dry_run_json() {
    let ws = temp_workspace(&workspace(), "tokens.json");
    let rules = rules_file(&ws, FILL_RULES);

    let output = run_cli(
        &[
            "rules",
            "--workspace",
            ws.path.to_str().unwrap(),
            "--rules",
            rules.to_str().unwrap(),
            "--json",
        ],
        &ws,
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["mode"], "dry-run");
    assert_eq!(result["steps"][0]["status"], "matched");
    assert_eq!(result["steps"][0]["aliasCount"], 8);
    assert_eq!(result["steps"][1]["status"], "skipped");
    assert_eq!(result["operations"].as_array().unwrap().len(), 0);
}

#[test]
fn test_rules_apply_text() {
    let ws = temp_workspace(&workspace(), "tokens.json");
    let rules = rules_file(&ws, FILL_RULES);

    let output = run_cli(
        &[
            "rules",
            "--workspace",
            ws.path.to_str().unwrap(),
            "--rules",
            rules.to_str().unwrap(),
            "--apply",
        ],
        &ws,
    );
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rules (apply):"));
    assert!(stdout.contains("✓ Slate fill to Indigo: 8 aliases"));
    assert!(stdout.contains("8 applied, 0 failed"));
}

#[test]
fn test_rules_export_normalizes() {
    let ws = temp_workspace(&workspace(), "tokens.json");
    let bare = r#"[{
        "id": "a",
        "name": "A",
        "when": {"group": "Jade"},
        "then": {"aliasTo": "9 Theme/Theme"}
    }]"#;
    let rules = rules_file(&ws, bare);
    let export = ws.dir.path().join("export.json");

    let output = run_cli(
        &[
            "rules",
            "--workspace",
            ws.path.to_str().unwrap(),
            "--rules",
            rules.to_str().unwrap(),
            "--export",
            export.to_str().unwrap(),
        ],
        &ws,
    );
    assert_eq!(output.status.code(), Some(0));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(exported["rules"][0]["id"], "a");
    assert_eq!(exported["rules"][0]["enabled"], true);
}

#[test]
fn test_rules_unresolvable_target_fails() {
    let ws = temp_workspace(&workspace(), "tokens.json");
    let rules = rules_file(
        &ws,
        r#"[{
            "id": "x",
            "name": "X",
            "when": {"group": "Jade"},
            "then": {"aliasTo": "Nowhere/Group"}
        }]"#,
    );

    let output = run_cli(
        &[
            "rules",
            "--workspace",
            ws.path.to_str().unwrap(),
            "--rules",
            rules.to_str().unwrap(),
        ],
        &ws,
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("collection 'Nowhere' not found"));
}

#[test]
fn test_rules_malformed_file() {
    let ws = temp_workspace(&workspace(), "tokens.json");
    let rules = rules_file(&ws, "{ not json");

    let output = run_cli(
        &[
            "rules",
            "--workspace",
            ws.path.to_str().unwrap(),
            "--rules",
            rules.to_str().unwrap(),
        ],
        &ws,
    );
    assert_eq!(output.status.code(), Some(2));
}
