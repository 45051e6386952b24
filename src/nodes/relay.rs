use super::{NodeEvaluator, UNARY_INPUTS, VALUE_PORT, bool_to_number};
use crate::engine::EvalContext;
use crate::port::{BooleanPort, NumberPort, PortMap, PortSpec, PortType, PortValues};
use crate::program::Node;

pub const RELAY_OUTPUTS: PortMap = &[
    PortSpec::new("value", PortType::Number),
    PortSpec::new("active", PortType::Boolean),
];

/// Switches on when its input is non-zero.
pub struct RelayNode;

impl NodeEvaluator for RelayNode {
    fn type_name(&self) -> &'static str {
        "Relay"
    }

    fn inputs(&self) -> PortMap {
        UNARY_INPUTS
    }

    fn outputs(&self) -> PortMap {
        RELAY_OUTPUTS
    }

    fn data(&self, _node: &Node, inputs: &PortValues, _ctx: &EvalContext) -> PortValues {
        let mut out = PortValues::new(RELAY_OUTPUTS);
        match inputs.number("num1").filter(|n| !n.is_nan()) {
            Some(n) => {
                out.set_typed::<NumberPort>(VALUE_PORT, bool_to_number(n != 0.0));
                out.set_typed::<BooleanPort>("active", n != 0.0);
            }
            None => {
                out.set_typed::<NumberPort>(VALUE_PORT, f64::NAN);
                out.set_typed::<BooleanPort>("active", false);
            }
        }
        out
    }
}
