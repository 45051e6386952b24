use super::{BINARY_INPUTS, NodeEvaluator, VALUE_OUTPUT, bool_to_number, number_output, truthy};
use crate::engine::EvalContext;
use crate::port::{PortMap, PortValues};
use crate::program::Node;

pub const LOGIC_OPERATOR: &str = "logicOperator";

/// Comparison and boolean operators. Results are numeric: 1 for true, 0 for false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOperator {
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
    Equal,
    NotEqual,
    And,
    Or,
    Nand,
    Xor,
}

impl LogicOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "Greater Than" => LogicOperator::GreaterThan,
            "Less Than" => LogicOperator::LessThan,
            "Greater Than Or Equal To" => LogicOperator::GreaterThanOrEqualTo,
            "Less Than Or Equal To" => LogicOperator::LessThanOrEqualTo,
            "Equal" => LogicOperator::Equal,
            "Not Equal" => LogicOperator::NotEqual,
            "And" => LogicOperator::And,
            "Or" => LogicOperator::Or,
            "Nand" => LogicOperator::Nand,
            "Xor" => LogicOperator::Xor,
            _ => return None,
        };
        Some(op)
    }

    pub fn of(node: &Node) -> Option<Self> {
        node.str_property(LOGIC_OPERATOR).and_then(Self::from_name)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LogicOperator::GreaterThan => ">",
            LogicOperator::LessThan => "<",
            LogicOperator::GreaterThanOrEqualTo => ">=",
            LogicOperator::LessThanOrEqualTo => "<=",
            LogicOperator::Equal => "==",
            LogicOperator::NotEqual => "!=",
            LogicOperator::And => "&&",
            LogicOperator::Or => "||",
            LogicOperator::Nand => "nand",
            LogicOperator::Xor => "xor",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        let result = match self {
            LogicOperator::GreaterThan => a > b,
            LogicOperator::LessThan => a < b,
            LogicOperator::GreaterThanOrEqualTo => a >= b,
            LogicOperator::LessThanOrEqualTo => a <= b,
            LogicOperator::Equal => a == b,
            LogicOperator::NotEqual => a != b,
            LogicOperator::And => truthy(a) && truthy(b),
            LogicOperator::Or => truthy(a) || truthy(b),
            LogicOperator::Nand => !(truthy(a) && truthy(b)),
            LogicOperator::Xor => truthy(a) != truthy(b),
        };
        bool_to_number(result)
    }
}

pub struct LogicNode;

impl NodeEvaluator for LogicNode {
    fn type_name(&self) -> &'static str {
        "Logic"
    }

    fn inputs(&self) -> PortMap {
        BINARY_INPUTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, inputs: &PortValues, _ctx: &EvalContext) -> PortValues {
        let value = match (inputs.number("num1"), inputs.number("num2"), LogicOperator::of(node)) {
            (Some(a), Some(b), Some(op)) => op.apply(a, b),
            _ => f64::NAN,
        };
        number_output(value)
    }
}
