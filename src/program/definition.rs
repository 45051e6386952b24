use super::history::{RecentValues, TickEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete, canonical definition of a dataflow program, as supplied by a host.
/// This is the target structure for any snapshot format conversion.
#[derive(Debug, Clone, Default)]
pub struct ProgramDefinition {
    /// Host-assigned program id, carried through unchanged.
    pub id: Option<String>,
    pub nodes: Vec<NodeDefinition>,
    pub connections: Vec<Connection>,
    pub recent_ticks: Vec<String>,
}

/// Defines a single node of the program.
#[derive(Debug, Clone, Default)]
pub struct NodeDefinition {
    pub id: String,
    /// Selects the evaluator contract, e.g. `"Math"`.
    pub type_name: String,
    /// Human name of the node type, used when no ordered display name is set.
    pub name: String,
    /// Editor-assigned display name, e.g. `"Number 1"`.
    pub ordered_display_name: Option<String>,
    pub position: Position,
    /// Scalar configuration in insertion order.
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub tick_entries: BTreeMap<String, TickEntry>,
    pub recent_values: RecentValues,
    pub held_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A directed edge from one node's output port to another node's input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub source_output: String,
    pub target: String,
    pub target_input: String,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        source_output: impl Into<String>,
        target: impl Into<String>,
        target_input: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            source_output: source_output.into(),
            target: target.into(),
            target_input: target_input.into(),
        }
    }
}

impl NodeDefinition {
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            id: id.into(),
            name: type_name.clone(),
            type_name,
            ..Default::default()
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.ordered_display_name = Some(name.into());
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }
}
