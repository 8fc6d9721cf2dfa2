use quiztree::*;

fn load_example() -> Scenario {
    let _ = pretty_env_logger::try_init();

    Scenario::from_path("test_files/example.json").unwrap()
}

#[test]
fn every_node_becomes_exactly_one_graph_node() {
    let scenario = load_example();
    let graph = build_graph(&scenario);

    assert_eq!(graph.node_count(), scenario.len());
}

#[test]
fn options_without_next_produce_no_edge() {
    let scenario = load_example();
    let graph = build_graph(&scenario);

    // Five of the six options in the fixture carry a next target; the
    // "Restart" option does not.
    assert_eq!(graph.edge_count(), 5);
    assert!(!graph.source().contains("Restart"));
}

#[test]
fn source_contains_labels_shapes_and_density() {
    let scenario = load_example();
    let source = build_graph(&scenario).source();

    assert!(source.starts_with("// Decision Tree\ndigraph {"));
    assert!(source.contains("    dpi=\"600\";"));

    // Question nodes: box, "Question <text>".
    assert!(source.contains("\"1\" [label=\"Question Do you hear drums?\" shape=box];"));
    assert!(source.contains("\"3\" [label=\"Question Start over?\" shape=box];"));

    // Answer nodes: doubleoctagon, zeros stripped from the key tail.
    assert!(source.contains("\"a07\" [label=\"Answer 7\" shape=doubleoctagon];"));
    assert!(source.contains("\"a10\" [label=\"Answer 1\" shape=doubleoctagon];"));
    assert!(source.contains("\"a00\" [label=\"Answer \" shape=doubleoctagon];"));

    // Edge labels carry the choice text plus its joined action pieces.
    assert!(source.contains("\"1\" -> \"2\" [label=\"Yes +drums\"];"));
    assert!(source.contains("\"1\" -> \"3\" [label=\"No\"];"));
    assert!(source.contains("\"2\" -> \"a07\" [label=\"Steady +bass, -drums\"];"));
    assert!(source.contains("\"3\" -> \"a00\" [label=\"Give up\"];"));
}

#[test]
fn long_edge_labels_are_truncated_in_the_source() {
    let _ = pretty_env_logger::try_init();

    let json = r#"[{
        "1": {
            "question": "q",
            "options": [
                { "text": "This choice label is well over the forty character cap", "next": "2" }
            ]
        },
        "2": { "final": true }
    }]"#;
    let scenario = Scenario::from_json(json).unwrap();
    let source = build_graph(&scenario).source();

    assert!(source.contains("[label=\"This choice label is well over the forty...\"];"));
}

#[test]
fn only_the_first_tree_is_consumed() {
    let _ = pretty_env_logger::try_init();

    let json = r#"[
        { "1": { "final": true } },
        { "1": { "question": "ignored" }, "2": { "final": true } }
    ]"#;
    let scenario = Scenario::from_json(json).unwrap();

    assert_eq!(scenario.len(), 1);
    assert!(scenario.get("1").unwrap().is_final);
}

#[test]
fn empty_document_is_an_error() {
    let _ = pretty_env_logger::try_init();

    match Scenario::from_json("[]") {
        Err(QuizError::EmptyScenario) => {}
        other => panic!("expected EmptyScenario, got {:?}", other),
    }
}

#[test]
fn malformed_json_is_an_error() {
    let _ = pretty_env_logger::try_init();

    assert!(matches!(Scenario::from_json("{ not json"), Err(QuizError::Json(_))));
}

#[test]
fn lint_finds_dangling_and_unreachable_nodes() {
    let _ = pretty_env_logger::try_init();

    let json = r#"[{
        "1": {
            "question": "q",
            "options": [{ "text": "go", "next": "missing" }]
        },
        "9": { "final": true }
    }]"#;
    let scenario = Scenario::from_json(json).unwrap();
    let warnings = scenario.lint();

    assert!(warnings.contains(&LintWarning::DanglingNext {
        node: "1".to_string(),
        target: "missing".to_string(),
    }));
    assert!(warnings.contains(&LintWarning::Unreachable { node: "9".to_string() }));
}

#[test]
fn lint_reports_a_missing_start_node() {
    let _ = pretty_env_logger::try_init();

    let scenario = Scenario::from_json(r#"[{ "2": { "final": true } }]"#).unwrap();
    assert_eq!(scenario.lint(), vec![LintWarning::MissingStart]);
}

#[test]
fn lint_is_quiet_on_the_example() {
    let scenario = load_example();
    assert!(scenario.lint().is_empty());
}
