use super::{BINARY_INPUTS, NodeEvaluator, VALUE_OUTPUT, number_output};
use crate::engine::EvalContext;
use crate::port::{PortMap, PortValues};
use crate::program::Node;

/// Config property selecting the arithmetic operator.
pub const MATH_OPERATOR: &str = "mathOperator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl MathOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Add" => Some(MathOperator::Add),
            "Subtract" => Some(MathOperator::Subtract),
            "Multiply" => Some(MathOperator::Multiply),
            "Divide" => Some(MathOperator::Divide),
            _ => None,
        }
    }

    /// The operator configured on `node`, if it names a known one.
    pub fn of(node: &Node) -> Option<Self> {
        node.str_property(MATH_OPERATOR).and_then(Self::from_name)
    }

    pub fn name(self) -> &'static str {
        match self {
            MathOperator::Add => "Add",
            MathOperator::Subtract => "Subtract",
            MathOperator::Multiply => "Multiply",
            MathOperator::Divide => "Divide",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MathOperator::Add => "+",
            MathOperator::Subtract => "-",
            MathOperator::Multiply => "×",
            MathOperator::Divide => "÷",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            MathOperator::Add => a + b,
            MathOperator::Subtract => a - b,
            MathOperator::Multiply => a * b,
            MathOperator::Divide => a / b,
        }
    }
}

pub struct MathNode;

impl NodeEvaluator for MathNode {
    fn type_name(&self) -> &'static str {
        "Math"
    }

    fn inputs(&self) -> PortMap {
        BINARY_INPUTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, inputs: &PortValues, _ctx: &EvalContext) -> PortValues {
        let value = match (inputs.number("num1"), inputs.number("num2"), MathOperator::of(node)) {
            (Some(a), Some(b), Some(op)) => op.apply(a, b),
            _ => f64::NAN,
        };
        number_output(value)
    }
}
