//! Tests for dependency resolution and single-pass evaluation.
mod common;
use common::*;
use tickflow::prelude::*;

#[test]
fn test_sum_of_two_numbers() {
    let program = load(create_sample_program());
    let engine = Engine::new();
    let ctx = EvalContext::default();

    let evaluation = engine.evaluate(&program, "3", &ctx).unwrap();
    assert_eq!(evaluation.value("3"), Some(5.0));
    assert!(evaluation.is_clean());
    assert_eq!(evaluation.order, vec!["1", "2", "3"]);
}

#[test]
fn test_evaluation_is_repeatable_and_read_only() {
    let program = load(create_sample_program());
    let engine = Engine::new();
    let ctx = EvalContext::default();

    let first = engine.evaluate(&program, "3", &ctx).unwrap();
    let second = engine.evaluate(&program, "3", &ctx).unwrap();
    assert_eq!(first.outputs("3"), second.outputs("3"));
    assert!(program.recent_ticks().is_empty());
    assert!(program.nodes().iter().all(|n| n.data.tick_entries.is_empty()));
}

#[test]
fn test_unset_inputs_yield_nan() {
    let program = load(create_sample_program());
    let engine = Engine::new();
    let ctx = EvalContext::default();

    let logic = engine.evaluate(&program, "4", &ctx).unwrap();
    assert!(logic.value("4").unwrap().is_nan());
    assert_eq!(logic.order, vec!["4"]);

    let transform = engine.evaluate(&program, "5", &ctx).unwrap();
    assert!(transform.value("5").unwrap().is_nan());
}

#[test]
fn test_diamond_evaluates_each_node_once() {
    let program = load(create_diamond_program());
    let evaluation = Engine::new()
        .evaluate(&program, "d", &EvalContext::default())
        .unwrap();

    assert_eq!(evaluation.order, vec!["a", "b", "c", "d"]);
    assert_eq!(evaluation.value("b"), Some(-4.0));
    assert_eq!(evaluation.value("c"), Some(4.0));
    assert_eq!(evaluation.value("d"), Some(8.0));
}

#[test]
fn test_only_upstream_nodes_are_evaluated() {
    let program = load(create_diamond_program());
    let evaluation = Engine::new()
        .evaluate(&program, "b", &EvalContext::default())
        .unwrap();

    assert_eq!(evaluation.order, vec!["a", "b"]);
    assert!(evaluation.outputs("d").is_none());
}

#[test]
fn test_cycle_is_rejected() {
    let program = load(create_cyclic_program());
    let engine = Engine::new();
    let ctx = EvalContext::default();

    let err = engine.evaluate(&program, "y", &ctx).unwrap_err();
    assert_eq!(
        err,
        EngineError::CycleDetected {
            nodes: vec!["x".to_string(), "y".to_string()]
        }
    );
    assert!(err.to_string().contains("x, y"));

    // The independent constant is still evaluable on its own.
    let z = engine.evaluate(&program, "z", &ctx).unwrap();
    assert_eq!(z.value("z"), Some(1.0));

    assert!(matches!(
        engine.evaluate_all(&program, &ctx),
        Err(EngineError::CycleDetected { .. })
    ));
}

#[test]
fn test_self_loop_is_a_cycle() {
    let mut definition = create_sample_program();
    definition.connections.push(wire("loop", "5", "5", "num1"));
    let program = load(definition);

    let err = Engine::new()
        .evaluate(&program, "5", &EvalContext::default())
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::CycleDetected {
            nodes: vec!["5".to_string()]
        }
    );
}

#[test]
fn test_dangling_source_warns_and_continues() {
    let definition = ProgramDefinition {
        nodes: vec![
            number_node("n", "Number 1", 7),
            math_node("m", "Math 1", "Add"),
            number_node("other", "Number 2", 9),
        ],
        connections: vec![wire("g", "ghost", "m", "num1"), wire("nm", "n", "m", "num2")],
        ..Default::default()
    };
    let program = load(definition);
    let engine = Engine::new();
    let ctx = EvalContext::default();

    let evaluation = engine.evaluate(&program, "m", &ctx).unwrap();
    assert!(evaluation.value("m").unwrap().is_nan());
    assert_eq!(
        evaluation.warnings,
        vec![EvaluationWarning::MissingSource {
            connection_id: "g".to_string(),
            source: "ghost".to_string(),
            target: "m".to_string(),
        }]
    );

    let all = engine.evaluate_all(&program, &ctx).unwrap();
    assert_eq!(all.value("other"), Some(9.0));
    assert_eq!(all.value("n"), Some(7.0));
    assert_eq!(all.warnings.len(), 1);
}

#[test]
fn test_dangling_target_warns_and_continues() {
    let mut definition = create_sample_program();
    definition.connections.push(wire("dangling", "1", "ghost", "num1"));
    let program = load(definition);
    let engine = Engine::new();
    let ctx = EvalContext::default();

    let expected = vec![EvaluationWarning::MissingTarget {
        connection_id: "dangling".to_string(),
        source: "1".to_string(),
        target: "ghost".to_string(),
    }];

    let single = engine.evaluate(&program, "1", &ctx).unwrap();
    assert_eq!(single.value("1"), Some(2.0));
    assert_eq!(single.warnings, expected);

    let all = engine.evaluate_all(&program, &ctx).unwrap();
    assert_eq!(all.value("3"), Some(5.0));
    assert_eq!(all.warnings, expected);
    assert!(all.warnings[0].to_string().contains("ghost"));

    let mut program = program;
    let tick = engine.advance_tick(&mut program, "tick-1", &ctx).unwrap();
    assert_eq!(tick.warnings, expected);
    assert_eq!(program.current_value("3"), Some("5"));
}

#[test]
fn test_unknown_ports_warn() {
    let definition = ProgramDefinition {
        nodes: vec![number_node("n", "Number 1", 1), number_node("k", "Number 2", 2)],
        connections: vec![
            Connection::new("bad-in", "n", "value", "k", "num1"),
            Connection::new("bad-out", "n", "level", "k", "num1"),
        ],
        ..Default::default()
    };
    let program = load(definition);

    let evaluation = Engine::new()
        .evaluate(&program, "k", &EvalContext::default())
        .unwrap();
    assert_eq!(evaluation.value("k"), Some(2.0));
    assert_eq!(evaluation.warnings.len(), 2);
    assert!(matches!(
        evaluation.warnings[0],
        EvaluationWarning::UndeclaredInput { .. }
    ));
    assert_eq!(evaluation.warnings[1].connection_id(), "bad-out");
}

#[test]
fn test_missing_source_output_warns() {
    let definition = ProgramDefinition {
        nodes: vec![number_node("n", "Number 1", 1), transform_node("t", "Transform 1", "Negation")],
        connections: vec![Connection::new("c", "n", "level", "t", "num1")],
        ..Default::default()
    };
    let program = load(definition);

    let evaluation = Engine::new()
        .evaluate(&program, "t", &EvalContext::default())
        .unwrap();
    assert!(evaluation.value("t").unwrap().is_nan());
    assert_eq!(
        evaluation.warnings,
        vec![EvaluationWarning::MissingSourceOutput {
            connection_id: "c".to_string(),
            source: "n".to_string(),
            port: "level".to_string(),
        }]
    );
}

#[test]
fn test_unknown_target_is_an_error() {
    let program = load(create_sample_program());
    let err = Engine::new()
        .evaluate(&program, "nope", &EvalContext::default())
        .unwrap_err();
    assert_eq!(err, EngineError::NodeNotFound("nope".to_string()));
}

#[test]
fn test_unsupported_node_type_rejected_at_load() {
    let mut definition = create_sample_program();
    definition.nodes.push(NodeDefinition::new("6", "Hologram"));

    let err = Engine::new().load(definition).unwrap_err();
    match err {
        ProgramError::UnsupportedNodeType { node_id, type_name } => {
            assert_eq!(node_id, "6");
            assert_eq!(type_name, "Hologram");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_duplicate_node_rejected_at_load() {
    let mut definition = create_sample_program();
    definition.nodes.push(number_node("1", "Number 3", 9));

    let err = Engine::new().load(definition).unwrap_err();
    assert!(matches!(err, ProgramError::DuplicateNode(id) if id == "1"));
}

#[test]
fn test_type_alias_resolves_to_builtin() {
    let definition = ProgramDefinition {
        nodes: vec![NodeDefinition::new("in", "Input").with_property("sensor", "temperature")],
        ..Default::default()
    };
    assert!(Engine::new().load(definition.clone()).is_err());

    let engine = Engine::builder().with_type_alias("Input", "Sensor").build();
    let program = engine.load(definition).unwrap();
    assert_eq!(program.node("in").unwrap().kind, NodeKind::Sensor);

    let ctx = EvalContext::new(0).with_reading("temperature", 21.5);
    let evaluation = engine.evaluate(&program, "in", &ctx).unwrap();
    assert_eq!(evaluation.value("in"), Some(21.5));
}

#[test]
fn test_sensor_without_reading_is_nan() {
    let program = load(create_sensor_chain("Absolute Value"));
    let engine = Engine::new();

    let missing = engine
        .evaluate(&program, "t", &EvalContext::default())
        .unwrap();
    assert!(missing.value("t").unwrap().is_nan());

    let ctx = EvalContext::new(0).with_reading("probe", -3.0);
    let present = engine.evaluate(&program, "t", &ctx).unwrap();
    assert_eq!(present.value("t"), Some(3.0));
}

#[test]
fn test_sensor_defaults_to_node_id_channel() {
    let definition = ProgramDefinition {
        nodes: vec![NodeDefinition::new("probe-7", "Sensor")],
        ..Default::default()
    };
    let program = load(definition);
    let ctx = EvalContext::new(0).with_reading("probe-7", 12.0);

    let evaluation = Engine::new().evaluate(&program, "probe-7", &ctx).unwrap();
    assert_eq!(evaluation.value("probe-7"), Some(12.0));
}

#[test]
fn test_relay_reports_active_state() {
    let definition = ProgramDefinition {
        nodes: vec![
            sensor_node("s", "Sensor 1", "switch"),
            NodeDefinition::new("r", "Relay").with_display_name("Relay 1"),
        ],
        connections: vec![wire("sr", "s", "r", "num1")],
        ..Default::default()
    };
    let program = load(definition);
    let engine = Engine::new();

    let on = engine
        .evaluate(&program, "r", &EvalContext::new(0).with_reading("switch", 5.0))
        .unwrap();
    assert_eq!(on.value("r"), Some(1.0));
    assert_eq!(
        on.outputs("r").unwrap().get("active"),
        Some(&PortValue::Boolean(true))
    );

    let off = engine
        .evaluate(&program, "r", &EvalContext::new(0).with_reading("switch", 0.0))
        .unwrap();
    assert_eq!(off.value("r"), Some(0.0));
    assert_eq!(
        off.outputs("r").unwrap().get("active"),
        Some(&PortValue::Boolean(false))
    );

    let unset = engine
        .evaluate(&program, "r", &EvalContext::default())
        .unwrap();
    assert!(unset.value("r").unwrap().is_nan());
}

#[test]
fn test_logic_feeds_math_as_number() {
    let definition = ProgramDefinition {
        nodes: vec![
            number_node("a", "Number 1", 5),
            number_node("b", "Number 2", 2),
            logic_node("gt", "Logic 1", "Greater Than"),
            math_node("m", "Math 1", "Multiply"),
        ],
        connections: vec![
            wire("a-gt", "a", "gt", "num1"),
            wire("b-gt", "b", "gt", "num2"),
            wire("gt-m", "gt", "m", "num1"),
            wire("a-m", "a", "m", "num2"),
        ],
        ..Default::default()
    };
    let program = load(definition);

    let evaluation = Engine::new()
        .evaluate(&program, "m", &EvalContext::default())
        .unwrap();
    assert_eq!(evaluation.value("gt"), Some(1.0));
    assert_eq!(evaluation.value("m"), Some(5.0));
}
