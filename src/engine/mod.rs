use crate::error::{EngineError, ProgramError};
use crate::nodes::{NodeKind, NodeRegistry, VALUE_PORT};
use crate::port::{PortValues, PortValue};
use crate::program::{IntoProgram, MAX_NODE_VALUES, Program};
use ahash::AHashMap;

mod context;
mod inputs;
mod resolver;
mod tick;

pub use context::EvalContext;
pub use inputs::EvaluationWarning;

use inputs::{assemble_inputs, check_outgoing};
use resolver::{topological_order, upstream_of};

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Capacity of every node's recent-values buffer.
    pub max_node_values: usize,
    /// Number of ticks kept in the tick log and in tick entries. `None` keeps all.
    pub tick_retention: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_node_values: MAX_NODE_VALUES,
            tick_retention: None,
        }
    }
}

/// The outcome of one evaluation pass.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Ids of the evaluated nodes, in the order they were evaluated.
    pub order: Vec<String>,
    /// Connections that could not supply a value during the pass.
    pub warnings: Vec<EvaluationWarning>,
    results: AHashMap<String, PortValues>,
    held: AHashMap<String, f64>,
}

impl Evaluation {
    /// The computed outputs of a node evaluated in this pass.
    pub fn outputs(&self, node_id: &str) -> Option<&PortValues> {
        self.results.get(node_id)
    }

    /// The numeric `value` output of a node evaluated in this pass.
    pub fn value(&self, node_id: &str) -> Option<f64> {
        self.outputs(node_id)?
            .get(VALUE_PORT)
            .map(PortValue::as_number)
    }

    /// The value a hold node latched in this pass, if any.
    pub fn held_value(&self, node_id: &str) -> Option<f64> {
        self.held.get(node_id).copied()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub struct EngineBuilder {
    config: EngineConfig,
    registry: NodeRegistry,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            registry: NodeRegistry::default(),
        }
    }

    pub fn max_node_values(mut self, capacity: usize) -> Self {
        self.config.max_node_values = capacity.max(1);
        self
    }

    pub fn tick_retention(mut self, ticks: usize) -> Self {
        self.config.tick_retention = Some(ticks.max(1));
        self
    }

    /// Lets snapshots use `user_type_name` for the built-in `builtin_type_name` contract.
    /// Unknown built-in names are ignored.
    pub fn with_type_alias(mut self, user_type_name: &str, builtin_type_name: &str) -> Self {
        if let Some(kind) = NodeKind::from_type_name(builtin_type_name) {
            self.registry.register_alias(user_type_name, kind);
        }
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            config: self.config,
            registry: self.registry,
        }
    }
}

/// Evaluates loaded programs: single targets on demand, or the whole graph once per tick.
#[derive(Default)]
pub struct Engine {
    config: EngineConfig,
    registry: NodeRegistry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Loads a program from any convertible source, resolving node types with this engine's registry.
    pub fn load(&self, source: impl IntoProgram) -> Result<Program, ProgramError> {
        let definition = source.into_program()?;
        let mut program = Program::load(definition, &self.registry)?;
        for node in program.nodes_mut() {
            node.data
                .recent_values
                .set_capacity(self.config.max_node_values);
        }
        tracing::debug!(
            nodes = program.nodes().len(),
            connections = program.connections().len(),
            "Program loaded"
        );
        Ok(program)
    }

    /// Computes `target`'s outputs, evaluating each of its upstream nodes exactly once.
    ///
    /// The target's outputs are available through [`Evaluation::outputs`]. Nothing in
    /// the program is modified.
    pub fn evaluate(
        &self,
        program: &Program,
        target: &str,
        ctx: &EvalContext,
    ) -> Result<Evaluation, EngineError> {
        let target_idx = program
            .index_of(target)
            .ok_or_else(|| EngineError::NodeNotFound(target.to_string()))?;
        let members = upstream_of(program, target_idx);
        self.run_pass(program, &members, ctx)
    }

    /// Evaluates every node in the program once.
    pub fn evaluate_all(
        &self,
        program: &Program,
        ctx: &EvalContext,
    ) -> Result<Evaluation, EngineError> {
        let members: Vec<usize> = (0..program.nodes().len()).collect();
        self.run_pass(program, &members, ctx)
    }

    fn run_pass(
        &self,
        program: &Program,
        members: &[usize],
        ctx: &EvalContext,
    ) -> Result<Evaluation, EngineError> {
        let order = topological_order(program, members)?;
        let mut evaluation = Evaluation::default();

        for idx in order {
            let node = &program.nodes()[idx];
            let inputs = assemble_inputs(
                program,
                node,
                &evaluation.results,
                &mut evaluation.warnings,
            );
            let evaluator = node.kind.evaluator();
            let outputs = evaluator.data(node, &inputs, ctx);
            if let Some(held) = evaluator.held_value(node, &inputs) {
                evaluation.held.insert(node.id.clone(), held);
            }
            tracing::trace!(node_id = %node.id, kind = %node.kind, "Node evaluated");
            check_outgoing(program, node, &mut evaluation.warnings);
            evaluation.order.push(node.id.clone());
            evaluation.results.insert(node.id.clone(), outputs);
        }

        Ok(evaluation)
    }
}
