//! Flat prefix encoding of expression trees.
//!
//! A program is a pre-order sequence of nodes: every function node is directly
//! followed by the encodings of its children, left to right. Child links are never
//! stored; they are recovered by counting arities, which makes every subtree a
//! contiguous slice that operators can copy and splice.

use crate::error::{EvotreeError, Result};
use crate::types::Node;
use std::fmt;

/// Check the terminal-counting invariant.
///
/// Starting with one required terminal, each node fills one open slot and opens
/// `arity` new ones. The sequence is valid when no node arrives after the slots are
/// exhausted and none remain open at the end. Partially built sequences simply
/// yield `false`.
pub fn is_valid(nodes: &[Node]) -> bool {
    if nodes.is_empty() {
        return false;
    }
    let mut open = 1usize;
    for node in nodes {
        if open == 0 {
            return false;
        }
        open = open - 1 + node.arity();
    }
    open == 0
}

/// Exclusive end index of the subtree rooted at `start`.
///
/// Truncated sequences are clamped to `nodes.len()`.
pub fn subtree_span(nodes: &[Node], start: usize) -> usize {
    let mut outstanding = 1usize;
    let mut end = start;
    while outstanding > 0 && end < nodes.len() {
        outstanding = outstanding + nodes[end].arity() - 1;
        end += 1;
    }
    end
}

/// A candidate program and its fitness.
#[derive(Debug, Clone)]
pub struct Program {
    nodes: Vec<Node>,
    fitness: Option<f64>,
}

impl Program {
    /// Wrap a node sequence without validating it.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            fitness: None,
        }
    }

    /// Wrap a node sequence, rejecting structurally invalid ones.
    pub fn try_new(nodes: Vec<Node>) -> Result<Self> {
        if !is_valid(&nodes) {
            return Err(EvotreeError::InvalidProgram(format!(
                "{} nodes do not form a complete prefix tree",
                nodes.len()
            )));
        }
        Ok(Self::new(nodes))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.nodes)
    }

    /// Longest root-to-leaf path in edges; a single node has depth 0.
    pub fn depth(&self) -> usize {
        let mut open: Vec<usize> = Vec::new();
        let mut deepest = 0;
        for node in &self.nodes {
            deepest = deepest.max(open.len());
            if node.arity() > 0 {
                open.push(node.arity());
                continue;
            }
            while let Some(last) = open.last_mut() {
                *last -= 1;
                if *last > 0 {
                    break;
                }
                open.pop();
            }
        }
        deepest
    }

    /// Current fitness, or `f64::INFINITY` while unevaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Replace the whole node sequence; the fitness no longer applies.
    pub(crate) fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.fitness = None;
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}

impl fmt::Display for Program {
    /// Fully parenthesised prefix form, e.g. `(+ x[0] (* 2.0 x[1]))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Remaining children per open function.
        let mut open: Vec<usize> = Vec::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            match node {
                Node::Function(function) => {
                    write!(f, "({}", function.symbol())?;
                    open.push(function.arity());
                }
                terminal => {
                    write!(f, "{}", terminal)?;
                    while let Some(last) = open.last_mut() {
                        *last -= 1;
                        if *last > 0 {
                            break;
                        }
                        open.pop();
                        write!(f, ")")?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::primitives::{Addition, Multiplication, Sine};
    use std::sync::Arc;

    fn add() -> Node {
        Node::Function(Arc::new(Addition))
    }

    fn mul() -> Node {
        Node::Function(Arc::new(Multiplication))
    }

    fn sample() -> Vec<Node> {
        // (+ x[0] (* 2.0 x[1]))
        vec![add(), Node::Input(0), mul(), Node::Constant(2.0), Node::Input(1)]
    }

    #[test]
    fn test_valid_sequences() {
        assert!(is_valid(&sample()));
        assert!(is_valid(&[Node::Constant(1.0)]));
        assert!(is_valid(&[Node::Function(Arc::new(Sine)), Node::Input(0)]));
    }

    #[test]
    fn test_invalid_sequences() {
        assert!(!is_valid(&[]));
        // Missing an argument.
        assert!(!is_valid(&[add(), Node::Input(0)]));
        // Trailing node after the tree is complete.
        assert!(!is_valid(&[Node::Input(0), Node::Input(1)]));
        let mut extra = sample();
        extra.push(Node::Constant(3.0));
        assert!(!is_valid(&extra));
    }

    #[test]
    fn test_subtree_span() {
        let nodes = sample();
        assert_eq!(subtree_span(&nodes, 0), 5);
        assert_eq!(subtree_span(&nodes, 1), 2);
        assert_eq!(subtree_span(&nodes, 2), 5);
        assert_eq!(subtree_span(&nodes, 3), 4);
    }

    #[test]
    fn test_subtree_span_clamps_truncated_sequences() {
        let nodes = vec![add(), Node::Input(0)];
        assert_eq!(subtree_span(&nodes, 0), 2);
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        assert!(Program::try_new(sample()).is_ok());
        assert!(matches!(
            Program::try_new(vec![mul(), Node::Input(0)]),
            Err(EvotreeError::InvalidProgram(_))
        ));
    }

    #[test]
    fn test_display_renders_s_expression() {
        let program = Program::new(sample());
        assert_eq!(program.to_string(), "(+ x[0] (* 2.0 x[1]))");
        assert_eq!(Program::new(vec![Node::Input(2)]).to_string(), "x[2]");
    }

    #[test]
    fn test_depth() {
        assert_eq!(Program::new(sample()).depth(), 2);
        assert_eq!(Program::new(vec![Node::Constant(1.0)]).depth(), 0);
    }

    #[test]
    fn test_fitness_sentinel() {
        let mut program = Program::new(sample());
        assert!(!program.is_evaluated());
        assert_eq!(program.fitness(), f64::INFINITY);
        program.set_fitness(0.25);
        assert_eq!(program.fitness(), 0.25);
        program.invalidate_fitness();
        assert!(!program.is_evaluated());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Program::new(sample());
        let mut copy = original.clone();
        copy.replace_nodes(vec![Node::Constant(0.0)]);
        assert_eq!(original.len(), 5);
        assert_eq!(copy.len(), 1);
    }
}
