//! Unit tests for ports, values and node contracts.
mod common;
use tickflow::nodes::{MathOperator, TransformOperator};
use tickflow::port::{format_number, parse_number, BooleanPort, NumberPort, StringPort};
use tickflow::prelude::*;

#[test]
fn test_port_value_display() {
    assert_eq!(format!("{}", PortValue::Number(42.0)), "42");
    assert_eq!(format!("{}", PortValue::Number(-0.5)), "-0.5");
    assert_eq!(format!("{}", PortValue::Boolean(true)), "true");
    assert_eq!(format!("{}", PortValue::String("on".into())), "on");
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(5.0), "5");
    assert_eq!(format_number(2.25), "2.25");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn test_format_number_extreme_magnitudes() {
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(-2.5e22), "-2.5e+22");
    assert_eq!(format_number(1e20), "100000000000000000000");
    assert_eq!(format_number(1e-7), "1e-7");
    assert_eq!(format_number(-3.25e-9), "-3.25e-9");
    assert_eq!(format_number(0.000001), "0.000001");
    assert_eq!(parse_number("1e+21"), 1e21);
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number(" 12 "), 12.0);
    assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    assert!(parse_number("NaN").is_nan());
    assert!(parse_number("twelve").is_nan());
}

#[test]
fn test_port_value_coercion() {
    assert_eq!(
        PortValue::Boolean(true).coerce(PortType::Number),
        Some(PortValue::Number(1.0))
    );
    assert_eq!(
        PortValue::Number(0.0).coerce(PortType::Boolean),
        Some(PortValue::Boolean(false))
    );
    assert_eq!(PortValue::Number(f64::NAN).coerce(PortType::Boolean), None);
    assert_eq!(
        PortValue::Number(3.0).coerce(PortType::String),
        Some(PortValue::String("3".into()))
    );
    assert_eq!(PortValue::String("3".into()).coerce(PortType::Number), None);
    assert_eq!(PortValue::String("3".into()).as_number(), 3.0);
}

#[test]
fn test_port_values_have_one_slot_per_port() {
    let mut values = PortValues::new(NodeKind::Relay.outputs());
    let names: Vec<&str> = values.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["value", "active"]);
    assert!(values.iter().all(|(_, v)| v.is_none()));

    assert!(!values.set("level", PortValue::Number(1.0)));
    assert!(values.set("active", PortValue::Number(1.0)));
    assert_eq!(values.get("active"), Some(&PortValue::Boolean(true)));
    assert_eq!(values.port_type("active"), Some(PortType::Boolean));
    assert!(!values.is_set("value"));
}

#[test]
fn test_typed_port_access() {
    let mut values = PortValues::new(NodeKind::Relay.outputs());
    assert!(values.set_typed::<NumberPort>("value", 2.5));
    assert!(values.set_typed::<BooleanPort>("active", false));

    assert_eq!(values.get_typed::<NumberPort>("value"), Some(2.5));
    assert_eq!(values.get_typed::<BooleanPort>("active"), Some(false));
    assert_eq!(values.get_typed::<StringPort>("value"), None);
    assert_eq!(values.number("active"), Some(0.0));
}

#[test]
fn test_node_kind_ports() {
    let names = |ports: tickflow::port::PortMap| ports.iter().map(|p| p.name).collect::<Vec<_>>();

    assert!(NodeKind::Number.inputs().is_empty());
    assert_eq!(names(NodeKind::Number.outputs()), vec!["value"]);
    assert_eq!(names(NodeKind::Math.inputs()), vec!["num1", "num2"]);
    assert_eq!(names(NodeKind::Logic.inputs()), vec!["num1", "num2"]);
    assert_eq!(names(NodeKind::Transform.inputs()), vec!["num1"]);
    assert!(NodeKind::Sensor.inputs().is_empty());
    assert_eq!(names(NodeKind::Control.inputs()), vec!["num1", "num2"]);
    assert!(
        NodeKind::ALL
            .iter()
            .all(|k| k.outputs().iter().any(|p| p.name == "value"))
    );
}

#[test]
fn test_registry_knows_builtin_types() {
    let registry = NodeRegistry::new();
    let mut names: Vec<&str> = registry.type_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec!["Control", "Generator", "Logic", "Math", "Number", "Relay", "Sensor", "Timer", "Transform"]
    );
    assert_eq!(NodeKind::Transform.to_string(), "Transform");
}

#[test]
fn test_operator_names() {
    assert_eq!(MathOperator::from_name("Multiply"), Some(MathOperator::Multiply));
    assert_eq!(MathOperator::from_name("Modulo"), None);
    assert_eq!(MathOperator::Divide.apply(1.0, 0.0), f64::INFINITY);
    assert_eq!(
        TransformOperator::from_name("Absolute Value"),
        Some(TransformOperator::AbsoluteValue)
    );
}

#[test]
fn test_node_labels_fall_back_to_name() {
    let engine = Engine::new();
    let program = engine
        .load(ProgramDefinition {
            nodes: vec![
                common::number_node("a", "Number 7", 1),
                NodeDefinition::new("b", "Timer"),
            ],
            ..Default::default()
        })
        .unwrap();
    assert_eq!(program.node("a").unwrap().label(), "Number:Number 7");
    assert_eq!(program.node("b").unwrap().label(), "Timer:Timer");
}
