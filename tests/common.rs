//! Common test utilities for building program definitions.
use tickflow::prelude::*;

#[allow(dead_code)]
pub fn number_node(id: &str, display_name: &str, value: impl Into<serde_json::Value>) -> NodeDefinition {
    NodeDefinition::new(id, "Number")
        .with_display_name(display_name)
        .with_property("value", value)
}

#[allow(dead_code)]
pub fn math_node(id: &str, display_name: &str, operator: &str) -> NodeDefinition {
    NodeDefinition::new(id, "Math")
        .with_display_name(display_name)
        .with_property("mathOperator", operator)
}

#[allow(dead_code)]
pub fn logic_node(id: &str, display_name: &str, operator: &str) -> NodeDefinition {
    NodeDefinition::new(id, "Logic")
        .with_display_name(display_name)
        .with_property("logicOperator", operator)
}

#[allow(dead_code)]
pub fn transform_node(id: &str, display_name: &str, operator: &str) -> NodeDefinition {
    NodeDefinition::new(id, "Transform")
        .with_display_name(display_name)
        .with_property("transformOperator", operator)
}

#[allow(dead_code)]
pub fn sensor_node(id: &str, display_name: &str, channel: &str) -> NodeDefinition {
    NodeDefinition::new(id, "Sensor")
        .with_display_name(display_name)
        .with_property("sensor", channel)
}

#[allow(dead_code)]
pub fn control_node(id: &str, display_name: &str, operator: &str) -> NodeDefinition {
    NodeDefinition::new(id, "Control")
        .with_display_name(display_name)
        .with_property("controlOperator", operator)
}

/// Connects `source.value` to `target.<input>`.
#[allow(dead_code)]
pub fn wire(id: &str, source: &str, target: &str, input: &str) -> Connection {
    Connection::new(id, source, "value", target, input)
}

/// The reference program:
///
/// `Number 1 (2)` and `Number 2 (3)` feed `Math 1 (Add)`; `Logic 1 (Greater Than)` and
/// `Transform 1 (Absolute Value)` have no inputs connected.
#[allow(dead_code)]
pub fn create_sample_program() -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            number_node("1", "Number 1", 2),
            number_node("2", "Number 2", 3),
            math_node("3", "Math 1", "Add"),
            logic_node("4", "Logic 1", "Greater Than"),
            transform_node("5", "Transform 1", "Absolute Value"),
        ],
        connections: vec![wire("c1", "1", "3", "num1"), wire("c2", "2", "3", "num2")],
        ..Default::default()
    }
}

/// A diamond: `a (4)` feeds both `b = -(a)` and `c = |a|`, and `d = c - b`.
#[allow(dead_code)]
pub fn create_diamond_program() -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            number_node("a", "Number 1", 4),
            transform_node("b", "Transform 1", "Negation"),
            transform_node("c", "Transform 2", "Absolute Value"),
            math_node("d", "Math 1", "Subtract"),
        ],
        connections: vec![
            wire("ab", "a", "b", "num1"),
            wire("ac", "a", "c", "num1"),
            wire("cd", "c", "d", "num1"),
            wire("bd", "b", "d", "num2"),
        ],
        ..Default::default()
    }
}

/// `x` and `y` feed each other; `z` is an independent constant feeding `x`.
#[allow(dead_code)]
pub fn create_cyclic_program() -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            math_node("x", "Math 1", "Add"),
            math_node("y", "Math 2", "Add"),
            number_node("z", "Number 1", 1),
        ],
        connections: vec![
            wire("xy", "x", "y", "num1"),
            wire("yx", "y", "x", "num1"),
            wire("zx", "z", "x", "num2"),
        ],
        ..Default::default()
    }
}

/// A sensor on channel `probe` feeding a transform with the given operator.
#[allow(dead_code)]
pub fn create_sensor_chain(operator: &str) -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            sensor_node("s", "Sensor 1", "probe"),
            transform_node("t", "Transform 1", operator),
        ],
        connections: vec![wire("st", "s", "t", "num1")],
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn load(definition: ProgramDefinition) -> Program {
    Engine::new().load(definition).expect("fixture programs load")
}

/// A hold node `h` gated by sensor `g` (channel `gate`) over sensor `s` (channel `signal`).
#[allow(dead_code)]
pub fn create_hold_program(operator: &str) -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            sensor_node("g", "Sensor 1", "gate"),
            sensor_node("s", "Sensor 2", "signal"),
            control_node("h", "Control 1", operator),
        ],
        connections: vec![wire("gh", "g", "h", "num1"), wire("sh", "s", "h", "num2")],
        ..Default::default()
    }
}
