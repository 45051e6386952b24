use crate::port::PortValues;
use crate::program::{Node, Program};
use ahash::AHashMap;
use std::fmt;

/// A connection that could not supply a value. The affected input is left unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationWarning {
    /// The connection's source node does not exist.
    MissingSource {
        connection_id: String,
        source: String,
        target: String,
    },
    /// The connection's target node does not exist, so the source's value goes nowhere.
    MissingTarget {
        connection_id: String,
        source: String,
        target: String,
    },
    /// The source exists but did not produce a value on the named output.
    MissingSourceOutput {
        connection_id: String,
        source: String,
        port: String,
    },
    /// The target node type does not declare the named input.
    UndeclaredInput {
        connection_id: String,
        target: String,
        port: String,
    },
    /// The source value cannot be converted to the input's declared type.
    IncompatibleValue {
        connection_id: String,
        target: String,
        port: String,
    },
}

impl EvaluationWarning {
    pub fn connection_id(&self) -> &str {
        match self {
            EvaluationWarning::MissingSource { connection_id, .. }
            | EvaluationWarning::MissingTarget { connection_id, .. }
            | EvaluationWarning::MissingSourceOutput { connection_id, .. }
            | EvaluationWarning::UndeclaredInput { connection_id, .. }
            | EvaluationWarning::IncompatibleValue { connection_id, .. } => connection_id,
        }
    }
}

impl fmt::Display for EvaluationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationWarning::MissingSource {
                connection_id,
                source,
                target,
            } => write!(
                f,
                "connection '{}' into '{}' references missing node '{}'",
                connection_id, target, source
            ),
            EvaluationWarning::MissingTarget {
                connection_id,
                source,
                target,
            } => write!(
                f,
                "connection '{}' from '{}' references missing node '{}'",
                connection_id, source, target
            ),
            EvaluationWarning::MissingSourceOutput {
                connection_id,
                source,
                port,
            } => write!(
                f,
                "connection '{}': node '{}' has no value on output '{}'",
                connection_id, source, port
            ),
            EvaluationWarning::UndeclaredInput {
                connection_id,
                target,
                port,
            } => write!(
                f,
                "connection '{}': node '{}' has no input '{}'",
                connection_id, target, port
            ),
            EvaluationWarning::IncompatibleValue {
                connection_id,
                target,
                port,
            } => write!(
                f,
                "connection '{}': value does not fit input '{}' of node '{}'",
                connection_id, port, target
            ),
        }
    }
}

/// Builds a node's input values from the outputs computed so far in this pass.
pub(crate) fn assemble_inputs(
    program: &Program,
    node: &Node,
    computed: &AHashMap<String, PortValues>,
    warnings: &mut Vec<EvaluationWarning>,
) -> PortValues {
    let mut inputs = PortValues::new(node.kind.inputs());

    for connection in program.incoming(&node.id) {
        let warning = if !inputs.declares(&connection.target_input) {
            Some(EvaluationWarning::UndeclaredInput {
                connection_id: connection.id.clone(),
                target: node.id.clone(),
                port: connection.target_input.clone(),
            })
        } else if !program.contains_node(&connection.source) {
            Some(EvaluationWarning::MissingSource {
                connection_id: connection.id.clone(),
                source: connection.source.clone(),
                target: node.id.clone(),
            })
        } else {
            match computed
                .get(&connection.source)
                .and_then(|outputs| outputs.get(&connection.source_output))
            {
                Some(value) => {
                    if inputs.set(&connection.target_input, value.clone()) {
                        None
                    } else {
                        Some(EvaluationWarning::IncompatibleValue {
                            connection_id: connection.id.clone(),
                            target: node.id.clone(),
                            port: connection.target_input.clone(),
                        })
                    }
                }
                None => Some(EvaluationWarning::MissingSourceOutput {
                    connection_id: connection.id.clone(),
                    source: connection.source.clone(),
                    port: connection.source_output.clone(),
                }),
            }
        };

        if let Some(warning) = warning {
            record(node, warning, warnings);
        }
    }

    inputs
}

/// Reports the outgoing connections of `node` whose target is not in the program.
pub(crate) fn check_outgoing(
    program: &Program,
    node: &Node,
    warnings: &mut Vec<EvaluationWarning>,
) {
    for connection in program.outgoing(&node.id) {
        if !program.contains_node(&connection.target) {
            let warning = EvaluationWarning::MissingTarget {
                connection_id: connection.id.clone(),
                source: node.id.clone(),
                target: connection.target.clone(),
            };
            record(node, warning, warnings);
        }
    }
}

fn record(node: &Node, warning: EvaluationWarning, warnings: &mut Vec<EvaluationWarning>) {
    tracing::warn!(
        node_id = %node.id,
        connection_id = %warning.connection_id(),
        "{}",
        warning
    );
    warnings.push(warning);
}
