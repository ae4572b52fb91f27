//! Rule evaluation against a generated token graph.

mod fixtures;

use fixtures::*;
use rangde::models::{Pairing, Rule, RuleCondition, RuleSet};
use rangde::services::alias_graph::AliasGraph;
use rangde::services::pipeline::generate;
use rangde::services::rule_engine::{EvaluationMode, RuleEngine, StepStatus};

fn generated_graph() -> AliasGraph {
    let output = generate(&context());
    AliasGraph::from_entries(output.registry.collections(), output.registry.entries())
}

fn rule(id: &str, collection: &str, group: &str, alias_to: &str) -> Rule {
    let mut rule = Rule::new(
        id,
        RuleCondition {
            collection: Some(collection.to_string()),
            group: Some(group.to_string()),
        },
        alias_to,
    );
    rule.id = id.to_string();
    rule
}

#[test]
fn test_back_edges_into_higher_layer_are_refused() {
    let graph = generated_graph();
    let rules = RuleSet {
        rules: vec![rule("appearance-to-theme", "1 Appearance", "Acme", "9 Theme/Theme")],
    };
    let evaluation = RuleEngine::new(&graph).evaluate(&rules, EvaluationMode::Apply);
    let step = evaluation.step("appearance-to-theme").unwrap();

    assert_eq!(step.status, StepStatus::Matched);
    // The first theme target aliases exactly one Acme appearance variable
    let cycles = step.warnings.iter().filter(|w| w.contains("cycle")).count();
    assert_eq!(cycles, 1);
    assert_eq!(step.alias_count, 7);
    assert!(step.matches.iter().all(|op| op.pairing == Pairing::FallbackMatch));
    assert!(evaluation.report.is_valid());

    let mut applied = graph.clone();
    let failures = applied.apply_operations(&evaluation.operations);
    assert!(failures.is_empty(), "{failures:?}");
    assert!(applied.detect_circular_dependencies().is_empty());
}

#[test]
fn test_dry_run_plans_without_operations() {
    let graph = generated_graph();
    let rules = RuleSet {
        rules: vec![rule("fill", "2 Fill emphasis", "Slate", "2 Fill emphasis/Indigo")],
    };
    let evaluation = RuleEngine::new(&graph).evaluate(&rules, EvaluationMode::DryRun);
    let step = &evaluation.steps[0];

    // Leaf names match one to one across palettes
    assert_eq!(step.status, StepStatus::Matched);
    assert_eq!(step.alias_count, 8);
    assert!(step.matches.iter().all(|op| op.pairing == Pairing::ExactMatch));
    assert!(step
        .matches
        .iter()
        .all(|op| op.modes.iter().all(|m| m.pairing == Pairing::ExactMatch)));
    assert!(evaluation.operations.is_empty());
    assert_eq!(evaluation.alias_count(), 8);
}

#[test]
fn test_unknown_collection_is_an_error_step() {
    let graph = generated_graph();
    let rules = RuleSet {
        rules: vec![
            rule("bad", "1 Appearance", "Acme", "Nowhere/Theme"),
            rule("empty", "1 Appearance", "Nobody", "9 Theme/Theme"),
        ],
    };
    let evaluation = RuleEngine::new(&graph).evaluate(&rules, EvaluationMode::DryRun);

    assert_eq!(evaluation.step("bad").unwrap().status, StepStatus::Error);
    assert_eq!(evaluation.step("empty").unwrap().status, StepStatus::Skipped);
    assert!(!evaluation.report.is_valid());
    assert_eq!(evaluation.report.errors.len(), 1);
}

#[test]
fn test_rule_set_round_trips_through_json() {
    let rules = RuleSet {
        rules: vec![rule("fill", "2 Fill emphasis", "Slate", "2 Fill emphasis/Indigo")],
    };
    let json = rules.to_json().unwrap();
    assert!(json.contains("\"aliasTo\""));
    assert_eq!(RuleSet::from_json(&json).unwrap(), rules);
}
