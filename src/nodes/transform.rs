use super::{NodeEvaluator, UNARY_INPUTS, VALUE_OUTPUT, number_output, truthy};
use crate::engine::EvalContext;
use crate::port::{PortMap, PortValues};
use crate::program::Node;

pub const TRANSFORM_OPERATOR: &str = "transformOperator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformOperator {
    AbsoluteValue,
    Negation,
    Not,
    Round,
    Floor,
    Ceil,
    Ramp,
}

impl TransformOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Absolute Value" => Some(TransformOperator::AbsoluteValue),
            "Negation" => Some(TransformOperator::Negation),
            "Not" => Some(TransformOperator::Not),
            "Round" => Some(TransformOperator::Round),
            "Floor" => Some(TransformOperator::Floor),
            "Ceil" => Some(TransformOperator::Ceil),
            "Ramp" => Some(TransformOperator::Ramp),
            _ => None,
        }
    }

    pub fn of(node: &Node) -> Option<Self> {
        node.str_property(TRANSFORM_OPERATOR).and_then(Self::from_name)
    }

    /// The operator written around `operand`, including its result symbol.
    pub fn sentence(self, operand: &str) -> String {
        match self {
            TransformOperator::AbsoluteValue => format!("|{}| =", operand),
            TransformOperator::Negation => format!("-({}) =", operand),
            TransformOperator::Not => format!("!{} ⇒", operand),
            TransformOperator::Round => format!("round({}) =", operand),
            TransformOperator::Floor => format!("floor({}) =", operand),
            TransformOperator::Ceil => format!("ceil({}) =", operand),
            TransformOperator::Ramp => format!("{} →", operand),
        }
    }

    /// Applies the operator. `previous` is the node's last recorded value, used by `Ramp`.
    pub fn apply(self, n: f64, previous: Option<f64>) -> f64 {
        match self {
            TransformOperator::AbsoluteValue => n.abs(),
            TransformOperator::Negation => 0.0 - n,
            TransformOperator::Not => {
                if truthy(n) {
                    0.0
                } else {
                    1.0
                }
            }
            TransformOperator::Round => round_half_up(n),
            TransformOperator::Floor => n.floor(),
            TransformOperator::Ceil => n.ceil(),
            TransformOperator::Ramp => ramp(n, previous),
        }
    }
}

/// Rounds halfway cases toward positive infinity (`-2.5` becomes `-2`).
fn round_half_up(n: f64) -> f64 {
    let floor = n.floor();
    if n - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Moves toward `n`, limiting steep changes to 10% steps from the previous value.
fn ramp(n: f64, previous: Option<f64>) -> f64 {
    let Some(prev) = previous.filter(|p| p.is_finite()) else {
        return n;
    };
    let delta = n - prev;
    let steep = delta.abs() > 0.1 * prev;
    if delta > 0.0 {
        if steep { prev + n * 0.1 } else { n }
    } else if delta < 0.0 {
        if steep { prev - prev * 0.1 } else { n }
    } else {
        n
    }
}

pub struct TransformNode;

impl NodeEvaluator for TransformNode {
    fn type_name(&self) -> &'static str {
        "Transform"
    }

    fn inputs(&self) -> PortMap {
        UNARY_INPUTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, inputs: &PortValues, _ctx: &EvalContext) -> PortValues {
        let value = match (inputs.number("num1"), TransformOperator::of(node)) {
            (Some(n), Some(op)) => op.apply(n, node.previous_value()),
            _ => f64::NAN,
        };
        number_output(value)
    }
}
