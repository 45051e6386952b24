use super::PortValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The primitive types a port can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Number,
    String,
    Boolean,
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortType::Number => write!(f, "number"),
            PortType::String => write!(f, "string"),
            PortType::Boolean => write!(f, "boolean"),
        }
    }
}

/// A named, typed slot on a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortSpec {
    pub name: &'static str,
    pub port_type: PortType,
}

impl PortSpec {
    pub const fn new(name: &'static str, port_type: PortType) -> Self {
        Self { name, port_type }
    }
}

/// A fixed, per-node-type mapping from port name to port type.
pub type PortMap = &'static [PortSpec];

/// Maps a declared port type to the Rust type its runtime values take.
///
/// Node contracts read and write their ports through these markers, so a
/// `number` port can only ever produce or accept an `f64`.
pub trait PortKind {
    type Value;
    const PORT_TYPE: PortType;

    fn into_value(value: Self::Value) -> PortValue;
    fn from_value(value: &PortValue) -> Option<Self::Value>;
}

pub struct NumberPort;
pub struct StringPort;
pub struct BooleanPort;

impl PortKind for NumberPort {
    type Value = f64;
    const PORT_TYPE: PortType = PortType::Number;

    fn into_value(value: f64) -> PortValue {
        PortValue::Number(value)
    }

    fn from_value(value: &PortValue) -> Option<f64> {
        match value {
            PortValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl PortKind for StringPort {
    type Value = String;
    const PORT_TYPE: PortType = PortType::String;

    fn into_value(value: String) -> PortValue {
        PortValue::String(value)
    }

    fn from_value(value: &PortValue) -> Option<String> {
        match value {
            PortValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl PortKind for BooleanPort {
    type Value = bool;
    const PORT_TYPE: PortType = PortType::Boolean;

    fn into_value(value: bool) -> PortValue {
        PortValue::Boolean(value)
    }

    fn from_value(value: &PortValue) -> Option<bool> {
        match value {
            PortValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}
