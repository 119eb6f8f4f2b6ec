use crate::types::Case;

/// Turns predicted outputs into a scalar cost (lower is better).
///
/// `outputs[i]` is the prediction for `cases[i]`. `program_length` is the node
/// count of the scored program, available for parsimony pressure.
pub trait Metric: Send + Sync {
    fn fitness(&self, cases: &[Case], outputs: &[f64], program_length: usize) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&[Case], &[f64], usize) -> f64 + Send + Sync,
{
    fn fitness(&self, cases: &[Case], outputs: &[f64], program_length: usize) -> f64 {
        self(cases, outputs, program_length)
    }
}

fn squared_errors<'a>(cases: &'a [Case], outputs: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    cases
        .iter()
        .zip(outputs)
        .map(|(case, predicted)| (predicted - case.output).powi(2))
}

pub struct SumSquaredError;

impl Metric for SumSquaredError {
    fn fitness(&self, cases: &[Case], outputs: &[f64], _program_length: usize) -> f64 {
        squared_errors(cases, outputs).sum()
    }
}

pub struct MeanSquaredError;

impl Metric for MeanSquaredError {
    fn fitness(&self, cases: &[Case], outputs: &[f64], _program_length: usize) -> f64 {
        if cases.is_empty() {
            return 0.0;
        }
        squared_errors(cases, outputs).sum::<f64>() / cases.len() as f64
    }
}

pub struct MeanAbsoluteError;

impl Metric for MeanAbsoluteError {
    fn fitness(&self, cases: &[Case], outputs: &[f64], _program_length: usize) -> f64 {
        if cases.is_empty() {
            return 0.0;
        }
        let total: f64 = cases
            .iter()
            .zip(outputs)
            .map(|(case, predicted)| (predicted - case.output).abs())
            .sum();
        total / cases.len() as f64
    }
}

/// Adds `coefficient * program_length` to an inner metric to counter bloat.
pub struct Parsimony<M> {
    inner: M,
    coefficient: f64,
}

impl<M: Metric> Parsimony<M> {
    pub fn new(inner: M, coefficient: f64) -> Self {
        Self { inner, coefficient }
    }
}

impl<M: Metric> Metric for Parsimony<M> {
    fn fitness(&self, cases: &[Case], outputs: &[f64], program_length: usize) -> f64 {
        self.inner.fitness(cases, outputs, program_length)
            + self.coefficient * program_length as f64
    }
}
