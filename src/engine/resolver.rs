use crate::error::EngineError;
use crate::program::Program;
use std::collections::VecDeque;

/// Table indices of `target` and every node it transitively depends on, in table order.
///
/// Connections whose source is missing from the program are skipped here; input
/// assembly reports them.
pub(crate) fn upstream_of(program: &Program, target: usize) -> Vec<usize> {
    let nodes = program.nodes();
    let mut member = vec![false; nodes.len()];
    let mut queue = VecDeque::from([target]);

    while let Some(idx) = queue.pop_front() {
        if member[idx] {
            continue;
        }
        member[idx] = true;
        for connection in program.incoming(&nodes[idx].id) {
            if let Some(source) = program.index_of(&connection.source) {
                if !member[source] {
                    queue.push_back(source);
                }
            }
        }
    }

    member
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| m.then_some(i))
        .collect()
}

/// Orders `members` so every node comes after all of its in-set predecessors (Kahn's algorithm).
///
/// Seeds are taken in table order and successors released in connection order, so
/// the result is deterministic. Members left unordered lie on or behind a cycle.
pub(crate) fn topological_order(
    program: &Program,
    members: &[usize],
) -> Result<Vec<usize>, EngineError> {
    let count = program.nodes().len();
    let mut in_set = vec![false; count];
    for &idx in members {
        in_set[idx] = true;
    }

    let mut in_degree = vec![0usize; count];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    for connection in program.connections() {
        let (Some(source), Some(target)) = (
            program.index_of(&connection.source),
            program.index_of(&connection.target),
        ) else {
            continue;
        };
        if in_set[source] && in_set[target] {
            in_degree[target] += 1;
            children[source].push(target);
        }
    }

    let mut queue: VecDeque<usize> = members
        .iter()
        .copied()
        .filter(|&i| in_degree[i] == 0)
        .collect();
    let mut order = Vec::with_capacity(members.len());

    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for &child in &children[idx] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    if order.len() != members.len() {
        let nodes = program
            .nodes()
            .iter()
            .enumerate()
            .filter(|(i, _)| in_set[*i] && in_degree[*i] > 0)
            .map(|(_, node)| node.id.clone())
            .collect();
        return Err(EngineError::CycleDetected { nodes });
    }

    Ok(order)
}
