// src/graph/toposort.rs

use std::collections::HashMap;

use crate::errors::{Result, WavegraphError};
use crate::graph::Ancestors;
use crate::grid::GridPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current depth-first path; reaching it again closes a cycle.
    OnPath,
    /// Already emitted.
    Done,
}

/// Order all nodes so that every node comes after all of its ancestors.
///
/// Iterative depth-first search over the ancestor relation: each node is
/// emitted once all of its ancestors have been. Roots are taken in ascending
/// point order, so the result is reproducible for a given graph.
///
/// Fails with [`WavegraphError::DagCycle`] when a node is reachable from
/// itself.
pub fn topological_sort(ancestors: &Ancestors) -> Result<Vec<GridPoint>> {
    let mut marks: HashMap<GridPoint, Mark> = HashMap::with_capacity(ancestors.len());
    let mut order = Vec::with_capacity(ancestors.len());

    for &root in ancestors.keys() {
        if marks.contains_key(&root) {
            continue;
        }

        marks.insert(root, Mark::OnPath);
        let mut stack = vec![(root, direct_ancestors(ancestors, root))];

        while let Some((node, pending)) = stack.last_mut() {
            let node = *node;
            match pending.next().copied() {
                Some(ancestor) => match marks.get(&ancestor) {
                    Some(Mark::Done) => {}
                    Some(Mark::OnPath) => return Err(WavegraphError::DagCycle(ancestor)),
                    None => {
                        marks.insert(ancestor, Mark::OnPath);
                        stack.push((ancestor, direct_ancestors(ancestors, ancestor)));
                    }
                },
                None => {
                    marks.insert(node, Mark::Done);
                    order.push(node);
                    stack.pop();
                }
            }
        }
    }

    Ok(order)
}

fn direct_ancestors(ancestors: &Ancestors, node: GridPoint) -> impl Iterator<Item = &GridPoint> {
    ancestors.get(&node).into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn p(t: i64) -> GridPoint {
        GridPoint::new(0, t, 0)
    }

    fn ancestors(edges: &[(i64, i64)], nodes: &[i64]) -> Ancestors {
        let mut map = Ancestors::new();
        for &n in nodes {
            map.entry(p(n)).or_default();
        }
        for &(a, n) in edges {
            map.entry(p(a)).or_default();
            map.entry(p(n)).or_default().insert(p(a));
        }
        map
    }

    fn assert_topological(map: &Ancestors, order: &[GridPoint]) {
        assert_eq!(order.len(), map.len());
        let position: HashMap<_, _> = order.iter().enumerate().map(|(i, n)| (*n, i)).collect();
        assert_eq!(position.len(), order.len(), "duplicate node in order");
        for (node, parents) in map {
            for parent in parents {
                assert!(position[parent] < position[node], "{parent} after {node}");
            }
        }
    }

    #[test]
    fn empty_graph_sorts_to_nothing() {
        assert!(topological_sort(&Ancestors::new()).unwrap().is_empty());
    }

    #[test]
    fn chain_is_emitted_root_first() {
        let map = ancestors(&[(3, 2), (2, 1)], &[]);
        assert_eq!(topological_sort(&map).unwrap(), vec![p(3), p(2), p(1)]);
    }

    #[test]
    fn diamond_respects_all_edges() {
        let map = ancestors(&[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)], &[9]);
        let order = topological_sort(&map).unwrap();
        assert_topological(&map, &order);
    }

    #[test]
    fn two_node_cycle_is_rejected() {
        let map = ancestors(&[(0, 1), (1, 0)], &[]);
        let err = topological_sort(&map).unwrap_err();
        assert!(err.is_structural());
        assert!(matches!(err, WavegraphError::DagCycle(_)));
    }

    #[test]
    fn self_loop_is_rejected() {
        let map = ancestors(&[(5, 5)], &[]);
        assert!(matches!(
            topological_sort(&map),
            Err(WavegraphError::DagCycle(n)) if n == p(5)
        ));
    }

    #[test]
    fn cycle_reached_from_acyclic_prefix_is_rejected() {
        let map = ancestors(&[(0, 1), (1, 2), (2, 3), (3, 1)], &[]);
        assert!(topological_sort(&map).is_err());
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let len = 200_000;
        let mut map = Ancestors::new();
        map.insert(p(0), BTreeSet::new());
        for t in 1..len {
            map.insert(p(t), BTreeSet::from([p(t - 1)]));
        }
        let order = topological_sort(&map).unwrap();
        assert_eq!(order.len(), len as usize);
        assert_eq!(order[0], p(0));
        assert_eq!(order[order.len() - 1], p(len - 1));
    }
}
