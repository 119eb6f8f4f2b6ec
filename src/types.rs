use crate::functions::Function;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single node of a program in its flattened prefix encoding.
#[derive(Clone)]
pub enum Node {
    /// Inner node applying a primitive to its children.
    Function(Function),
    /// Leaf holding a fixed value.
    Constant(f64),
    /// Leaf referencing a slot of the feature vector supplied at execution time.
    Input(usize),
}

impl Node {
    pub fn arity(&self) -> usize {
        match self {
            Node::Function(function) => function.arity(),
            Node::Constant(_) | Node::Input(_) => 0,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Node::Function(_))
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_function()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Function(a), Node::Function(b)) => {
                a.alias() == b.alias() && a.arity() == b.arity()
            }
            (Node::Constant(a), Node::Constant(b)) => a == b,
            (Node::Input(a), Node::Input(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Function(function) => write!(f, "Function({})", function.alias()),
            Node::Constant(value) => write!(f, "Constant({:?})", value),
            Node::Input(index) => write!(f, "Input({})", index),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Function(function) => write!(f, "{}", function.symbol()),
            Node::Constant(value) => write!(f, "{:?}", value),
            Node::Input(index) => write!(f, "x[{}]", index),
        }
    }
}

/// A named input variable of a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub value: f64,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One training example: ordered features and the expected output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub features: Vec<Feature>,
    pub output: f64,
}

impl Case {
    pub fn new(features: Vec<Feature>, output: f64) -> Self {
        Self { features, output }
    }

    /// Feature values in order, as consumed by the executor.
    pub fn values(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.value).collect()
    }
}

pub type Cases = Vec<Case>;

/// Predicted outputs of a program, one per case.
pub type Outputs = Vec<f64>;
