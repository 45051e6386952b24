use super::{PortKind, PortMap, PortType};
use std::fmt;

/// A runtime value flowing through a port.
#[derive(Debug, Clone, PartialEq)]
pub enum PortValue {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl PortValue {
    pub fn port_type(&self) -> PortType {
        match self {
            PortValue::Number(_) => PortType::Number,
            PortValue::String(_) => PortType::String,
            PortValue::Boolean(_) => PortType::Boolean,
        }
    }

    /// Numeric view of the value. Booleans read as 1/0, strings are parsed.
    pub fn as_number(&self) -> f64 {
        match self {
            PortValue::Number(n) => *n,
            PortValue::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            PortValue::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Converts the value to `target`, if a lossless-enough conversion exists.
    pub fn coerce(self, target: PortType) -> Option<PortValue> {
        match (self, target) {
            (v, t) if v.port_type() == t => Some(v),
            (PortValue::Boolean(b), PortType::Number) => Some(PortValue::Number(b as u8 as f64)),
            (PortValue::Number(n), PortType::Boolean) if !n.is_nan() => {
                Some(PortValue::Boolean(n != 0.0))
            }
            (v, PortType::String) => Some(PortValue::String(v.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortValue::Number(n) => write!(f, "{}", format_number(*n)),
            PortValue::String(s) => write!(f, "{}", s),
            PortValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Formats a number the way node values are recorded in tick entries.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // Avoids rendering negative zero as "-0".
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else {
        format!("{}", n)
    }
}

/// Shortest exponent notation with an explicit sign on positive exponents, e.g. `1e+21`, `2.5e-7`.
fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// Parses a recorded node value back into a number. Unparseable text is `NaN`.
pub fn parse_number(text: &str) -> f64 {
    match text.trim() {
        "Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        other => other.parse().unwrap_or(f64::NAN),
    }
}

/// The values object for one side of a node: exactly one optional slot per declared port.
#[derive(Debug, Clone, PartialEq)]
pub struct PortValues {
    ports: PortMap,
    values: Vec<Option<PortValue>>,
}

impl PortValues {
    pub fn new(ports: PortMap) -> Self {
        Self {
            ports,
            values: vec![None; ports.len()],
        }
    }

    pub fn ports(&self) -> PortMap {
        self.ports
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }

    pub fn port_type(&self, name: &str) -> Option<PortType> {
        self.index_of(name).map(|i| self.ports[i].port_type)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Stores `value` in the named slot, coercing it to the declared type.
    ///
    /// Returns `false` when the port is not declared or the value cannot be coerced.
    pub fn set(&mut self, name: &str, value: PortValue) -> bool {
        let Some(idx) = self.index_of(name) else {
            return false;
        };
        match value.coerce(self.ports[idx].port_type) {
            Some(coerced) => {
                self.values[idx] = Some(coerced);
                true
            }
            None => false,
        }
    }

    pub fn set_typed<P: PortKind>(&mut self, name: &str, value: P::Value) -> bool {
        self.set(name, P::into_value(value))
    }

    pub fn get(&self, name: &str) -> Option<&PortValue> {
        self.index_of(name).and_then(|i| self.values[i].as_ref())
    }

    pub fn get_typed<P: PortKind>(&self, name: &str) -> Option<P::Value> {
        self.get(name).and_then(P::from_value)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).map(PortValue::as_number)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&PortValue>)> {
        self.ports
            .iter()
            .zip(self.values.iter())
            .map(|(spec, value)| (spec.name, value.as_ref()))
    }
}
