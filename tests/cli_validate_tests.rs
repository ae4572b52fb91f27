//! End-to-end tests for `rangde validate` command.

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_valid_workspace() {
    let file = temp_workspace(&workspace(), "tokens.json");

    let output = run_cli(&["validate", "--workspace", file.path.to_str().unwrap()], &file);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Valid workspace should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"));
    assert!(stdout.contains("Chain depth: 9 / 9 layers"));
}

#[test]
fn test_validate_json_output() {
    let file = temp_workspace(&workspace(), "tokens.toml");

    let output = run_cli(
        &["validate", "--workspace", file.path.to_str().unwrap(), "--json"],
        &file,
    );
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], true);
    assert_eq!(result["errors"].as_array().unwrap().len(), 0);
    assert_eq!(result["statistics"]["palettesUsed"], 3);
    assert_eq!(result["statistics"]["maxChainDepth"], 9);
    assert!(result["paletteDigest"].as_str().is_some_and(|d| d.len() == 64));
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let file = temp_workspace(&workspace(), "tokens.json");

    // Unassigned roles produce warnings
    let output = run_cli(
        &["validate", "--workspace", file.path.to_str().unwrap(), "--strict"],
        &file,
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_validate_missing_primary_role() {
    let mut ws = workspace();
    ws.brands[1].roles.remove(&rangde::models::PaletteRole::Primary);
    let file = temp_workspace(&ws, "tokens.json");

    let output = run_cli(
        &["validate", "--workspace", file.path.to_str().unwrap(), "--json"],
        &file,
    );
    assert_eq!(output.status.code(), Some(1));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], false);
    let errors = result["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e["kind"] == "missing_palette_role" && e["layer"] == 6));
}

#[test]
fn test_validate_invalid_hex_reports_error() {
    let mut ws = workspace();
    ws.palettes[0].steps.insert("1400".to_string(), "#12345".to_string());
    let file = temp_workspace(&ws, "tokens.json");

    let output = run_cli(&["validate", "--workspace", file.path.to_str().unwrap()], &file);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("✗ Validation failed"));
}

#[test]
fn test_validate_missing_file() {
    let scratch = temp_text("", "unused.txt");
    let missing = scratch.dir.path().join("nope.json");

    let output = run_cli(&["validate", "--workspace", missing.to_str().unwrap()], &scratch);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load workspace"));
}

#[test]
fn test_validate_unsupported_extension() {
    let file = temp_text("palettes = []", "tokens.yaml");

    let output = run_cli(&["validate", "--workspace", file.path.to_str().unwrap()], &file);
    assert_eq!(output.status.code(), Some(2));
}
