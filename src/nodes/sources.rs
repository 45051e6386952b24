use super::{NO_PORTS, NodeEvaluator, VALUE_OUTPUT, number_output};
use crate::engine::EvalContext;
use crate::port::{PortMap, PortValues};
use crate::program::Node;
use std::f64::consts::PI;

pub struct NumberNode;

impl NodeEvaluator for NumberNode {
    fn type_name(&self) -> &'static str {
        "Number"
    }

    fn inputs(&self) -> PortMap {
        NO_PORTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, _inputs: &PortValues, _ctx: &EvalContext) -> PortValues {
        number_output(node.number_property("value").unwrap_or(0.0))
    }
}

/// Periodic waveform shapes. `t` and `period` are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorType {
    Sine,
    Square,
    Triangle,
}

impl GeneratorType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Sine" => Some(GeneratorType::Sine),
            "Square" => Some(GeneratorType::Square),
            "Triangle" => Some(GeneratorType::Triangle),
            _ => None,
        }
    }

    pub fn sample(self, t: f64, period: f64, amplitude: f64) -> f64 {
        match self {
            GeneratorType::Sine => {
                ((t * PI / (period / 2.0)).sin() * amplitude * 100.0).round() / 100.0
            }
            GeneratorType::Square => {
                if t % period < period / 2.0 {
                    amplitude
                } else {
                    0.0
                }
            }
            GeneratorType::Triangle => (2.0 * amplitude / period) * (t % period - period / 2.0).abs(),
        }
    }
}

pub struct GeneratorNode;

impl NodeEvaluator for GeneratorNode {
    fn type_name(&self) -> &'static str {
        "Generator"
    }

    fn inputs(&self) -> PortMap {
        NO_PORTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, _inputs: &PortValues, ctx: &EvalContext) -> PortValues {
        let shape = node.str_property("generatorType").and_then(GeneratorType::from_name);
        let period = configured(node, "period");
        let amplitude = configured(node, "amplitude");
        let value = match (shape, period, amplitude) {
            (Some(shape), Some(period), Some(amplitude)) => {
                shape.sample(ctx.time_ms() as f64, period * 1000.0, amplitude)
            }
            _ => f64::NAN,
        };
        number_output(value)
    }
}

/// Square wave that is 1 for `timeOn` seconds, then 0 for `timeOff` seconds.
pub struct TimerNode;

impl TimerNode {
    pub fn sample(t: f64, on_ms: f64, off_ms: f64) -> f64 {
        if t % (on_ms + off_ms) < on_ms { 1.0 } else { 0.0 }
    }
}

impl NodeEvaluator for TimerNode {
    fn type_name(&self) -> &'static str {
        "Timer"
    }

    fn inputs(&self) -> PortMap {
        NO_PORTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, _inputs: &PortValues, ctx: &EvalContext) -> PortValues {
        let value = match (configured(node, "timeOn"), configured(node, "timeOff")) {
            (Some(on), Some(off)) => Self::sample(ctx.time_ms() as f64, on * 1000.0, off * 1000.0),
            _ => f64::NAN,
        };
        number_output(value)
    }
}

/// Reads the sample the evaluation context holds for the node's channel.
pub struct SensorNode;

impl SensorNode {
    /// The channel a sensor node listens on: its `sensor` property, or its own id.
    pub fn channel(node: &Node) -> &str {
        node.str_property("sensor").unwrap_or(&node.id)
    }
}

impl NodeEvaluator for SensorNode {
    fn type_name(&self) -> &'static str {
        "Sensor"
    }

    fn inputs(&self) -> PortMap {
        NO_PORTS
    }

    fn outputs(&self) -> PortMap {
        VALUE_OUTPUT
    }

    fn data(&self, node: &Node, _inputs: &PortValues, ctx: &EvalContext) -> PortValues {
        number_output(ctx.reading(Self::channel(node)).unwrap_or(f64::NAN))
    }
}

// Zero and missing both count as unconfigured.
fn configured(node: &Node, key: &str) -> Option<f64> {
    node.number_property(key).filter(|v| *v != 0.0 && !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_high_for_first_half_period() {
        assert_eq!(GeneratorType::Square.sample(0.0, 2000.0, 5.0), 5.0);
        assert_eq!(GeneratorType::Square.sample(999.0, 2000.0, 5.0), 5.0);
        assert_eq!(GeneratorType::Square.sample(1000.0, 2000.0, 5.0), 0.0);
    }

    #[test]
    fn sine_is_rounded_to_hundredths() {
        // Quarter period: sin(pi / 2) = 1.
        assert_eq!(GeneratorType::Sine.sample(500.0, 2000.0, 3.0), 3.0);
        assert_eq!(GeneratorType::Sine.sample(0.0, 2000.0, 3.0), 0.0);
    }

    #[test]
    fn triangle_peaks_at_period_edges() {
        assert_eq!(GeneratorType::Triangle.sample(0.0, 2000.0, 4.0), 4.0);
        assert_eq!(GeneratorType::Triangle.sample(1000.0, 2000.0, 4.0), 0.0);
    }

    #[test]
    fn timer_cycles_on_then_off() {
        assert_eq!(TimerNode::sample(0.0, 1000.0, 3000.0), 1.0);
        assert_eq!(TimerNode::sample(1500.0, 1000.0, 3000.0), 0.0);
        assert_eq!(TimerNode::sample(4200.0, 1000.0, 3000.0), 1.0);
    }
}
