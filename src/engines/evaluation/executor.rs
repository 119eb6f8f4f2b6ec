use crate::engines::generation::program::Program;
use crate::error::{EvotreeError, Result};
use crate::functions::Function;
use crate::types::Node;
use rayon::prelude::*;

/// A function waiting for its arguments.
struct Frame<'a> {
    function: &'a Function,
    args: Vec<f64>,
}

impl Frame<'_> {
    fn is_complete(&self) -> bool {
        self.args.len() == self.function.arity()
    }
}

fn resolve_terminal(node: &Node, features: &[f64]) -> Result<f64> {
    match node {
        Node::Constant(value) => Ok(*value),
        Node::Input(index) => features.get(*index).copied().ok_or_else(|| {
            EvotreeError::FeatureIndexOutOfRange {
                index: *index,
                len: features.len(),
            }
        }),
        Node::Function(function) => Err(EvotreeError::InvalidProgram(format!(
            "function '{}' used as a terminal",
            function.alias()
        ))),
    }
}

/// Evaluate a program against one feature vector.
///
/// The sequence is walked once with a stack of open frames. Terminals are resolved
/// into the top frame; a frame that has all its arguments is evaluated and its
/// result folded into its parent. The result of the outermost frame is returned as
/// soon as it completes.
///
/// Non-finite results are returned as-is. Errors are reserved for structurally
/// invalid sequences and out-of-range feature indices.
pub fn execute(program: &Program, features: &[f64]) -> Result<f64> {
    let nodes = program.nodes();
    let root = nodes
        .first()
        .ok_or_else(|| EvotreeError::InvalidProgram("empty program".to_string()))?;

    if root.is_terminal() {
        return resolve_terminal(root, features);
    }

    let mut stack: Vec<Frame> = Vec::new();
    for (idx, node) in nodes.iter().enumerate() {
        match node {
            Node::Function(function) => {
                stack.push(Frame {
                    function,
                    args: Vec::with_capacity(function.arity()),
                });
            }
            terminal => {
                let value = resolve_terminal(terminal, features)?;
                let top = stack.last_mut().ok_or_else(|| {
                    EvotreeError::InvalidProgram(format!(
                        "terminal at index {} has no enclosing function",
                        idx
                    ))
                })?;
                top.args.push(value);
            }
        }

        while stack.last().is_some_and(Frame::is_complete) {
            let Some(frame) = stack.pop() else { break };
            let result = frame.function.evaluate(&frame.args)?;
            match stack.last_mut() {
                Some(parent) => parent.args.push(result),
                None => return Ok(result),
            }
        }
    }

    Err(EvotreeError::InvalidProgram(format!(
        "sequence ended with {} unfinished function(s)",
        stack.len()
    )))
}

/// Evaluate a program against many feature vectors in parallel.
pub fn execute_cases(program: &Program, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
    inputs
        .par_iter()
        .map(|features| execute(program, features))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::primitives::{Addition, Division, Multiplication, Sine};
    use std::sync::Arc;

    fn f(function: impl crate::functions::Primitive + 'static) -> Node {
        Node::Function(Arc::new(function))
    }

    #[test]
    fn test_addition_tree() {
        let program = Program::new(vec![f(Addition), Node::Input(0), Node::Constant(2.0)]);
        assert_eq!(execute(&program, &[3.0]).unwrap(), 5.0);
    }

    #[test]
    fn test_protected_division_tree() {
        let program = Program::new(vec![f(Division), Node::Constant(4.0), Node::Constant(0.0)]);
        assert_eq!(execute(&program, &[]).unwrap(), 4.0);
    }

    #[test]
    fn test_single_terminal_programs() {
        let constant = Program::new(vec![Node::Constant(7.5)]);
        assert_eq!(execute(&constant, &[]).unwrap(), 7.5);
        assert_eq!(execute(&constant, &[1.0, 2.0]).unwrap(), 7.5);

        let input = Program::new(vec![Node::Input(1)]);
        assert_eq!(execute(&input, &[1.0, 2.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_nested_folding() {
        // (+ (* x[0] x[1]) (sin 0.0))
        let program = Program::new(vec![
            f(Addition),
            f(Multiplication),
            Node::Input(0),
            Node::Input(1),
            f(Sine),
            Node::Constant(0.0),
        ]);
        assert_eq!(execute(&program, &[3.0, 4.0]).unwrap(), 12.0);
    }

    #[test]
    fn test_feature_index_out_of_range() {
        let program = Program::new(vec![f(Addition), Node::Input(3), Node::Constant(1.0)]);
        let err = execute(&program, &[1.0]).unwrap_err();
        assert!(matches!(err, EvotreeError::FeatureIndexOutOfRange { index: 3, len: 1 }));

        let bare = Program::new(vec![Node::Input(1)]);
        assert!(execute(&bare, &[1.0]).is_err());
    }

    #[test]
    fn test_truncated_sequence_is_invalid() {
        let program = Program::new(vec![f(Addition), Node::Constant(1.0)]);
        assert!(matches!(execute(&program, &[]), Err(EvotreeError::InvalidProgram(_))));
        assert!(matches!(execute(&Program::new(vec![]), &[]), Err(EvotreeError::InvalidProgram(_))));
    }

    #[test]
    fn test_trailing_nodes_are_ignored() {
        let program = Program::new(vec![
            f(Addition),
            Node::Constant(1.0),
            Node::Constant(2.0),
            Node::Constant(9.0),
        ]);
        assert_eq!(execute(&program, &[]).unwrap(), 3.0);
    }

    #[test]
    fn test_non_finite_results_are_not_errors() {
        let program = Program::new(vec![f(Multiplication), Node::Constant(f64::MAX), Node::Constant(10.0)]);
        assert!(execute(&program, &[]).unwrap().is_infinite());
    }

    #[test]
    fn test_execute_cases() {
        let program = Program::new(vec![f(Addition), Node::Input(0), Node::Constant(2.0)]);
        let outputs = execute_cases(&program, &[vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        assert_eq!(outputs, vec![3.0, 4.0, 5.0]);
    }
}
