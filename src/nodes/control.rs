use super::{BINARY_INPUTS, NodeEvaluator, VALUE_OUTPUT, number_output};
use crate::engine::EvalContext;
use crate::port::{PortMap, PortValues};
use crate::program::Node;

pub const CONTROL_OPERATOR: &str = "controlOperator";

/// What a hold node outputs while its gate is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlOperator {
    /// Latches the signal seen when the gate opened.
    HoldCurrent,
    /// Latches the node's own value from the tick before the gate opened.
    HoldPrior,
    OutputZero,
}

impl ControlOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Hold Current" => Some(ControlOperator::HoldCurrent),
            "Hold Prior" => Some(ControlOperator::HoldPrior),
            // Older snapshots use the display name.
            "Output Zero" | "Hold 0" => Some(ControlOperator::OutputZero),
            _ => None,
        }
    }

    pub fn of(node: &Node) -> Option<Self> {
        node.str_property(CONTROL_OPERATOR).and_then(Self::from_name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ControlOperator::HoldCurrent => "Hold Current",
            ControlOperator::HoldPrior => "Hold Prior",
            ControlOperator::OutputZero => "Output Zero",
        }
    }

    /// One tick of the gate. Returns the output and the value held into the next tick.
    ///
    /// A closed gate passes the signal through and releases any held value. A `NaN`
    /// signal also releases it.
    pub fn step(
        self,
        gate_on: bool,
        signal: f64,
        held: Option<f64>,
        previous: Option<f64>,
    ) -> (f64, Option<f64>) {
        let held = if signal.is_nan() { None } else { held };
        if !gate_on {
            return (signal, None);
        }
        match self {
            ControlOperator::OutputZero => (0.0, None),
            ControlOperator::HoldCurrent => {
                let held = held.unwrap_or(signal);
                (held, Some(held))
            }
            ControlOperator::HoldPrior => {
                let held = held.or(previous);
                (held.unwrap_or(0.0), held)
            }
        }
    }
}

/// Gates `num2` (the signal) on `num1` (binary: exactly 1 means on).
///
/// An unconnected signal reads as 0.
pub struct ControlNode;

impl ControlNode {
    fn step(node: &Node, inputs: &PortValues) -> (f64, Option<f64>) {
        let Some(op) = ControlOperator::of(node) else {
            return (f64::NAN, None);
        };
        let gate_on = inputs.number("num1") == Some(1.0);
        let signal = inputs.number("num2").unwrap_or(0.0);
        op.step(gate_on, signal, node.data.held_value, node.previous_value())
    }
}

impl NodeEvaluator for ControlNode {
    fn type_name(&self) -> &'static str {
        "Control"
    }

    fn inputs(&self) -> PortMap {
        BINARY_INPUTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, inputs: &PortValues, _ctx: &EvalContext) -> PortValues {
        number_output(Self::step(node, inputs).0)
    }

    fn held_value(&self, node: &Node, inputs: &PortValues) -> Option<f64> {
        Self::step(node, inputs).1
    }
}
