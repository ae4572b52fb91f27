//! End-to-end tests for `rangde generate` command.

mod fixtures;
use fixtures::*;
use std::fs;

#[test]
fn test_generate_to_stdout() {
    let file = temp_workspace(&workspace(), "tokens.json");

    let output = run_cli(&["generate", "--workspace", file.path.to_str().unwrap()], &file);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    let variables = summary["variables"].as_array().unwrap();
    assert_eq!(variables.len(), summary["statistics"]["total"].as_u64().unwrap() as usize);
    assert!(variables
        .iter()
        .any(|v| v["name"] == "Brand/Primary/[Brand] Surface" && v["modeName"] == "Acme"));
    assert!(summary["generatedAt"].is_string());
}

#[test]
fn test_generate_to_file() {
    let file = temp_workspace(&workspace(), "tokens.toml");
    let out = file.dir.path().join("summary.json");

    let output = run_cli(
        &[
            "generate",
            "--workspace",
            file.path.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ],
        &file,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("✓ Wrote"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(summary["statistics"]["enabledLayers"], 9);
}

#[test]
fn test_generate_up_to_layer() {
    let file = temp_workspace(&workspace(), "tokens.json");

    let output = run_cli(
        &["generate", "--workspace", file.path.to_str().unwrap(), "--up-to", "2"],
        &file,
    );
    assert_eq!(output.status.code(), Some(0));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["statistics"]["enabledLayers"], 3);
    assert_eq!(summary["statistics"]["maxChainDepth"], 3);
}

#[test]
fn test_generate_rejects_unknown_layer() {
    let file = temp_workspace(&workspace(), "tokens.json");

    let output = run_cli(
        &["generate", "--workspace", file.path.to_str().unwrap(), "--up-to", "12"],
        &file,
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_generate_low_depth_ceiling_fails() {
    let file = temp_workspace(&workspace(), "tokens.json");

    let output = run_cli(
        &["generate", "--workspace", file.path.to_str().unwrap(), "--max-depth", "4"],
        &file,
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Chain Too Deep"));
}

#[test]
fn test_generate_trace_prints_chain() {
    let file = temp_workspace(&workspace(), "tokens.json");

    let output = run_cli(
        &[
            "generate",
            "--workspace",
            file.path.to_str().unwrap(),
            "--trace",
            "Brand/Primary/[Brand] High",
        ],
        &file,
    );
    assert_eq!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[L8] 10 Brand / Brand/Primary/[Brand] High (Acme)"));
    assert!(stderr.contains("[L0] 00_Primitives / Indigo/"));
}
