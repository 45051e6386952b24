//! Human-readable formulas for operator nodes.
//!
//! A formula has two renderings: a symbolic one naming the predecessors
//! (`Number:Number 1 + Number:Number 2 = nodeValue`) and one with their current
//! values substituted (`2 + 3 = 5`). Only Math, Logic and Transform nodes have formulas.

use crate::graph::node_labels;
use crate::nodes::{LogicOperator, MathOperator, NodeKind, TransformOperator};
use crate::program::{Node, Program};
use ahash::AHashMap;

/// Shown on the right-hand side of a symbolic formula.
const RESULT_PLACEHOLDER: &str = "nodeValue";
const MISSING_VALUE: &str = "NaN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub symbolic: String,
    pub with_values: String,
}

/// One side of a formula operand: the predecessor's label and its current value.
struct Operand {
    name: String,
    value: String,
}

impl Operand {
    fn unset(port: &str) -> Self {
        let placeholder = format!("unset_{}", port);
        Self {
            name: placeholder.clone(),
            value: placeholder,
        }
    }
}

/// Renders formulas against one program, labelling predecessors the same way graph descriptions do.
pub struct FormulaRenderer<'a> {
    program: &'a Program,
    labels: AHashMap<String, String>,
}

impl<'a> FormulaRenderer<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self::with_labels(program, node_labels(program))
    }

    pub(crate) fn with_labels(program: &'a Program, labels: AHashMap<String, String>) -> Self {
        Self { program, labels }
    }

    /// Renders the formula of `node_id`, or `None` when the node type defines no formula.
    pub fn render(&self, node_id: &str) -> Option<Formula> {
        let node = self.program.node(node_id)?;
        match node.kind {
            NodeKind::Math => {
                let symbol = MathOperator::of(node).map_or("?", MathOperator::symbol);
                Some(self.binary(node, symbol, "="))
            }
            NodeKind::Logic => {
                let symbol = LogicOperator::of(node).map_or("?", LogicOperator::symbol);
                Some(self.binary(node, symbol, "⇒"))
            }
            NodeKind::Transform => {
                let op = TransformOperator::of(node);
                let sentence = |operand: &str| match op {
                    Some(op) => op.sentence(operand),
                    None => format!("unknownTransform({}) =", operand),
                };
                let n1 = self.operand(node, "num1");
                Some(Formula {
                    symbolic: format!("{} {}", sentence(&n1.name), RESULT_PLACEHOLDER),
                    with_values: format!("{} {}", sentence(&n1.value), self.node_value(node)),
                })
            }
            _ => None,
        }
    }

    fn binary(&self, node: &Node, symbol: &str, result_symbol: &str) -> Formula {
        let n1 = self.operand(node, "num1");
        let n2 = self.operand(node, "num2");
        Formula {
            symbolic: format!(
                "{} {} {} {} {}",
                n1.name, symbol, n2.name, result_symbol, RESULT_PLACEHOLDER
            ),
            with_values: format!(
                "{} {} {} {} {}",
                n1.value,
                symbol,
                n2.value,
                result_symbol,
                self.node_value(node)
            ),
        }
    }

    fn operand(&self, node: &Node, port: &str) -> Operand {
        let source = self
            .program
            .connected_inputs(&node.id)
            .into_iter()
            .find(|(p, _)| *p == port)
            .map(|(_, source)| source);

        match source {
            Some(source) => Operand {
                name: self.label(source),
                value: self.node_value(source),
            },
            None => Operand::unset(port),
        }
    }

    fn label(&self, node: &Node) -> String {
        self.labels
            .get(&node.id)
            .cloned()
            .unwrap_or_else(|| node.label())
    }

    fn node_value(&self, node: &Node) -> String {
        self.program
            .current_value(&node.id)
            .unwrap_or(MISSING_VALUE)
            .to_string()
    }
}
