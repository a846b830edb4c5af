use crate::{board::Position, execution::Execution, movegen::side_legal_executions_into};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Execution>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        side_legal_executions_into(pos, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for exec in buf.iter() {
            nodes += inner(&pos.simulate(exec), depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Perft split by root execution, for locating generator bugs.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Execution, u64)> {
    let mut roots = Vec::new();
    side_legal_executions_into(pos, &mut roots);
    roots
        .into_iter()
        .map(|exec| {
            let nodes = perft(&pos.simulate(&exec), depth.saturating_sub(1));
            (exec, nodes)
        })
        .collect()
}
