use super::{Engine, EvalContext, Evaluation};
use crate::error::EngineError;
use crate::port::format_number;
use crate::program::{Program, TickEntry};

impl Engine {
    /// Runs one tick: evaluates every node once, records each node's value under
    /// `tick_id`, pushes it into the node's recent values, stores any held value and
    /// appends the tick to the log.
    ///
    /// A cycle anywhere in the graph rejects the tick before anything is recorded.
    pub fn advance_tick(
        &self,
        program: &mut Program,
        tick_id: &str,
        ctx: &EvalContext,
    ) -> Result<Evaluation, EngineError> {
        let evaluation = self.evaluate_all(program, ctx)?;
        let capacity = self.config().max_node_values;

        for node in program.nodes_mut() {
            let value = evaluation.value(&node.id).unwrap_or(f64::NAN);
            node.data
                .tick_entries
                .insert(tick_id.to_string(), TickEntry::new(format_number(value)));
            if node.data.recent_values.capacity() != capacity {
                node.data.recent_values.set_capacity(capacity);
            }
            node.data.recent_values.push(value);
            node.data.held_value = evaluation.held_value(&node.id);
        }

        program.push_tick(tick_id);
        if let Some(keep) = self.config().tick_retention {
            program.retain_recent_ticks(keep);
        }

        tracing::debug!(
            tick = tick_id,
            nodes = evaluation.order.len(),
            warnings = evaluation.warnings.len(),
            "Tick recorded"
        );
        Ok(evaluation)
    }
}
