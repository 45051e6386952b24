//! Node evaluator contracts.
//!
//! Every node type declares fixed input and output port maps and a pure `data`
//! function from one to the other. Hold nodes also carry a held value between ticks. The set of types is closed: a type name is
//! resolved to a [`NodeKind`] when a program is loaded.

pub mod control;
pub mod logic;
pub mod math;
pub mod registry;
pub mod relay;
pub mod sources;
pub mod transform;

pub use control::{ControlNode, ControlOperator};
pub use logic::{LogicNode, LogicOperator};
pub use math::{MathNode, MathOperator};
pub use registry::{NodeKind, NodeRegistry};
pub use relay::RelayNode;
pub use sources::{GeneratorNode, GeneratorType, NumberNode, SensorNode, TimerNode};
pub use transform::{TransformNode, TransformOperator};

use crate::engine::EvalContext;
use crate::port::{NumberPort, PortMap, PortSpec, PortType, PortValues};
use crate::program::Node;

/// Defines the contract for computing a node type's outputs from its inputs.
pub trait NodeEvaluator: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn inputs(&self) -> PortMap;
    fn outputs(&self) -> PortMap;

    /// Computes the output values. `inputs` is shaped by [`NodeEvaluator::inputs`];
    /// the result must be shaped by [`NodeEvaluator::outputs`].
    fn data(&self, node: &Node, inputs: &PortValues, ctx: &EvalContext) -> PortValues;

    /// The value a stateful node carries into its next tick. Stateless nodes hold nothing.
    fn held_value(&self, _node: &Node, _inputs: &PortValues) -> Option<f64> {
        None
    }
}

pub const NO_PORTS: PortMap = &[];
pub const VALUE_OUTPUT: PortMap = &[PortSpec::new("value", PortType::Number)];
pub const UNARY_INPUTS: PortMap = &[PortSpec::new("num1", PortType::Number)];
pub const BINARY_INPUTS: PortMap = &[
    PortSpec::new("num1", PortType::Number),
    PortSpec::new("num2", PortType::Number),
];

/// The port every node type reports its primary value on.
pub const VALUE_PORT: &str = "value";

pub(crate) fn number_output(value: f64) -> PortValues {
    let mut out = PortValues::new(VALUE_OUTPUT);
    out.set_typed::<NumberPort>(VALUE_PORT, value);
    out
}

/// Numeric truthiness: zero and NaN are false.
pub(crate) fn truthy(n: f64) -> bool {
    n != 0.0 && !n.is_nan()
}

pub(crate) fn bool_to_number(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
