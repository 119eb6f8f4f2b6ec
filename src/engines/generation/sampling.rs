use crate::engines::generation::program::subtree_span;
use crate::types::Node;
use rand::Rng;

/// Relative chance of picking a function node as a subtree root.
pub const FUNCTION_WEIGHT: f64 = 0.9;
/// Relative chance of picking a terminal node as a subtree root.
pub const TERMINAL_WEIGHT: f64 = 0.1;

/// Pick a subtree, biased towards internal nodes, and return its `(start, end)`
/// span. Empty input yields `(0, 0)`.
pub fn sample_subtree<R: Rng>(nodes: &[Node], rng: &mut R) -> (usize, usize) {
    if nodes.is_empty() {
        return (0, 0);
    }

    let weights: Vec<f64> = nodes
        .iter()
        .map(|n| if n.is_function() { FUNCTION_WEIGHT } else { TERMINAL_WEIGHT })
        .collect();
    let total: f64 = weights.iter().sum();

    let mut running = 0.0;
    let cumulative: Vec<f64> = weights
        .iter()
        .map(|w| {
            running += w / total;
            running
        })
        .collect();

    let draw: f64 = rng.gen();
    let start = cumulative
        .partition_point(|&c| c < draw)
        .min(nodes.len() - 1);

    (start, subtree_span(nodes, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::program::is_valid;
    use crate::functions::primitives::{Addition, Multiplication};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn sample() -> Vec<Node> {
        vec![
            Node::Function(Arc::new(Addition)),
            Node::Input(0),
            Node::Function(Arc::new(Multiplication)),
            Node::Constant(2.0),
            Node::Input(1),
        ]
    }

    #[test]
    fn test_sampled_spans_are_subtrees() {
        let nodes = sample();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let (start, end) = sample_subtree(&nodes, &mut rng);
            assert!(start < end && end <= nodes.len());
            assert!(is_valid(&nodes[start..end]));
        }
    }

    #[test]
    fn test_functions_are_preferred() {
        let nodes = sample();
        let mut rng = StdRng::seed_from_u64(9);
        let mut function_roots = 0;
        for _ in 0..1000 {
            let (start, _) = sample_subtree(&nodes, &mut rng);
            if nodes[start].is_function() {
                function_roots += 1;
            }
        }
        // Two functions at 0.9 vs three terminals at 0.1: about 86% function roots.
        assert!(function_roots > 750, "only {} function roots", function_roots);
    }

    #[test]
    fn test_single_node_and_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_subtree(&[Node::Constant(1.0)], &mut rng), (0, 1));
        assert_eq!(sample_subtree(&[], &mut rng), (0, 0));
    }
}
