use std::collections::VecDeque;

use log::debug;

use crate::lattice::graph::Graph;

/// Proper two-coloring of a bipartite graph.
///
/// Returns one color (0 or 1) per site such that every bond joins sites of
/// different colors, or `None` if the graph contains an odd cycle (for example a
/// periodic chain of odd length) or a self loop. Components are colored by
/// breadth-first search from their lowest-indexed site, which gets color 0.
pub fn two_coloring(graph: &Graph) -> Option<Vec<u8>> {
    let mut color: Vec<Option<u8>> = vec![None; graph.num_sites()];
    let mut queue = VecDeque::new();

    for root in 0..graph.num_sites() {
        if color[root].is_some() {
            continue;
        }
        color[root] = Some(0);
        queue.push_back(root);
        while let Some(s) = queue.pop_front() {
            let c = color[s]?;
            for &t in graph.neighbors(s) {
                match color[t] {
                    None => {
                        color[t] = Some(1 - c);
                        queue.push_back(t);
                    }
                    Some(ct) if ct == c => {
                        debug!("two-coloring failed: sites {} and {} share color {}", s, t, c);
                        return None;
                    }
                    Some(_) => {}
                }
            }
        }
    }

    color.into_iter().collect()
}
