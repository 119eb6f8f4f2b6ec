//! Genetic operators.
//!
//! Every operator rewrites the receiving program in place by building a new node
//! sequence from slices of its sources; no other program's storage is touched.
//! Spans always cover whole subtrees, so a valid input stays valid.

use crate::engines::generation::generator::TreeGenerator;
use crate::engines::generation::program::Program;
use crate::engines::generation::sampling::sample_subtree;
use crate::types::Node;
use rand::seq::IteratorRandom;
use rand::Rng;
use rand_distr::StandardNormal;

/// Operator applied to an offspring during a generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Crossover,
    SubtreeMutation,
    HoistMutation,
    PointMutation,
    Reproduction,
}

fn splice(target: &[Node], start: usize, end: usize, donor: &[Node]) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(target.len() - (end - start) + donor.len());
    nodes.extend_from_slice(&target[..start]);
    nodes.extend_from_slice(donor);
    nodes.extend_from_slice(&target[end..]);
    nodes
}

impl Program {
    /// Replace a random subtree of `self` with a copy of a random subtree of `other`.
    pub fn crossover<R: Rng>(&mut self, other: &Program, rng: &mut R) {
        let (start, end) = sample_subtree(self.nodes(), rng);
        let (other_start, other_end) = sample_subtree(other.nodes(), rng);

        let nodes = splice(
            self.nodes(),
            start,
            end,
            &other.nodes()[other_start..other_end],
        );
        self.replace_nodes(nodes);
    }

    /// Crossover with freshly generated material.
    pub fn subtree_mutation<R: Rng>(&mut self, generator: &TreeGenerator, rng: &mut R) {
        let donor = generator.generate(rng);
        self.crossover(&donor, rng);
    }

    /// Replace a random subtree with one of its own subtrees. Never grows the program.
    pub fn hoist_mutation<R: Rng>(&mut self, rng: &mut R) {
        let (start, end) = sample_subtree(self.nodes(), rng);
        let subtree = &self.nodes()[start..end];
        let (sub_start, sub_end) = sample_subtree(subtree, rng);

        let nodes = splice(self.nodes(), start, end, &subtree[sub_start..sub_end]);
        self.replace_nodes(nodes);
    }

    /// Independently replace each node with probability `replacement_rate`.
    ///
    /// Functions are swapped for another function of the same arity; terminals are
    /// redrawn, with Gaussian jitter added to new constants. The length never changes.
    pub fn point_mutation<R: Rng>(
        &mut self,
        generator: &TreeGenerator,
        replacement_rate: f64,
        rng: &mut R,
    ) {
        let jitter = generator.config().constant_jitter;
        let mut changed = false;

        for node in self.nodes_mut() {
            if rng.gen::<f64>() >= replacement_rate {
                continue;
            }

            let replacement = match node {
                Node::Function(current) => {
                    let current_alias = current.alias().to_string();
                    generator
                        .functions_with_arity(current.arity())
                        .filter(|f| f.alias() != current_alias)
                        .choose(rng)
                        .map(|f| Node::Function(f.clone()))
                }
                _ => Some(match generator.random_terminal(rng) {
                    Node::Constant(value) if jitter > 0.0 => {
                        let noise: f64 = rng.sample(StandardNormal);
                        Node::Constant(value + noise * jitter)
                    }
                    terminal => terminal,
                }),
            };

            if let Some(replacement) = replacement {
                *node = replacement;
                changed = true;
            }
        }

        if changed {
            self.invalidate_fitness();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationMode, GeneratorConfig};
    use crate::functions::primitives::{Addition, Multiplication, Sine};
    use crate::functions::FunctionRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn generator() -> TreeGenerator {
        let functions = FunctionRegistry::new()
            .function_set(&["add", "sub", "mul", "div", "sin", "cos"])
            .unwrap();
        let config = GeneratorConfig {
            max_depth: 4,
            num_features: 2,
            constants: vec![-1.0, 1.0],
            mode: GenerationMode::RampedHalfAndHalf,
            constant_jitter: 0.5,
        };
        TreeGenerator::new(functions, config).unwrap()
    }

    fn sample() -> Program {
        Program::new(vec![
            Node::Function(Arc::new(Addition)),
            Node::Input(0),
            Node::Function(Arc::new(Multiplication)),
            Node::Constant(2.0),
            Node::Input(1),
        ])
    }

    #[test]
    fn test_crossover_keeps_validity_and_leaves_donor_untouched() {
        let mut rng = StdRng::seed_from_u64(21);
        let generator = generator();
        for _ in 0..200 {
            let mut a = generator.generate(&mut rng);
            let b = generator.generate(&mut rng);
            let donor_before = b.nodes().to_vec();
            a.crossover(&b, &mut rng);
            assert!(a.is_valid(), "invalid offspring: {}", a);
            assert_eq!(b.nodes(), donor_before.as_slice());
        }
    }

    fn spliced(target: &[Node], start: usize, end: usize, donor: &[Node]) -> Vec<Node> {
        let mut nodes = target[..start].to_vec();
        nodes.extend_from_slice(donor);
        nodes.extend_from_slice(&target[end..]);
        nodes
    }

    #[test]
    fn test_crossover_splices_recorded_donor_span() {
        let generator = generator();
        let donor = Program::new(vec![Node::Function(Arc::new(Sine)), Node::Constant(9.0)]);
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut program = generator.generate(&mut rng);
            let before = program.nodes().to_vec();

            let mut replay = rng.clone();
            let (start, end) = sample_subtree(&before, &mut replay);
            let (donor_start, donor_end) = sample_subtree(donor.nodes(), &mut replay);

            program.crossover(&donor, &mut rng);
            let expected = spliced(&before, start, end, &donor.nodes()[donor_start..donor_end]);
            assert_eq!(program.nodes(), expected.as_slice());
            assert!(program.nodes().contains(&Node::Constant(9.0)));
        }
    }

    #[test]
    fn test_subtree_mutation_splices_generated_material() {
        let generator = generator();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut program = generator.generate(&mut rng);
            let before = program.nodes().to_vec();

            let mut replay = rng.clone();
            let fresh = generator.generate(&mut replay);
            let (start, end) = sample_subtree(&before, &mut replay);
            let (fresh_start, fresh_end) = sample_subtree(fresh.nodes(), &mut replay);

            program.subtree_mutation(&generator, &mut rng);
            let expected = spliced(&before, start, end, &fresh.nodes()[fresh_start..fresh_end]);
            assert_eq!(program.nodes(), expected.as_slice());
        }
    }

    #[test]
    fn test_hoist_mutation_lifts_inner_subtree() {
        let generator = generator();
        let mut shrunk = 0;
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut program = generator.generate(&mut rng);
            let before = program.nodes().to_vec();

            let mut replay = rng.clone();
            let (start, end) = sample_subtree(&before, &mut replay);
            let subtree = &before[start..end];
            let (inner_start, inner_end) = sample_subtree(subtree, &mut replay);

            program.hoist_mutation(&mut rng);
            let expected = spliced(&before, start, end, &subtree[inner_start..inner_end]);
            assert_eq!(program.nodes(), expected.as_slice());

            if inner_end - inner_start < end - start {
                assert!(program.len() < before.len());
                shrunk += 1;
            }
        }
        assert!(shrunk > 0, "hoist never lifted a proper subtree");
    }

    #[test]
    fn test_crossover_resets_fitness() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut a = sample();
        a.set_fitness(1.0);
        a.crossover(&sample(), &mut rng);
        assert!(!a.is_evaluated());
    }

    #[test]
    fn test_subtree_mutation_keeps_validity() {
        let mut rng = StdRng::seed_from_u64(22);
        let generator = generator();
        for _ in 0..200 {
            let mut program = generator.generate(&mut rng);
            program.subtree_mutation(&generator, &mut rng);
            assert!(program.is_valid());
        }
    }

    #[test]
    fn test_hoist_mutation_never_grows() {
        let mut rng = StdRng::seed_from_u64(23);
        let generator = generator();
        for _ in 0..200 {
            let mut program = generator.generate(&mut rng);
            let before = program.len();
            program.hoist_mutation(&mut rng);
            assert!(program.is_valid());
            assert!(program.len() <= before);
        }
    }

    #[test]
    fn test_point_mutation_preserves_length_and_validity() {
        let mut rng = StdRng::seed_from_u64(24);
        let generator = generator();
        for _ in 0..200 {
            let mut program = generator.generate(&mut rng);
            let before = program.len();
            program.point_mutation(&generator, 0.5, &mut rng);
            assert!(program.is_valid());
            assert_eq!(program.len(), before);
        }
    }

    #[test]
    fn test_point_mutation_with_zero_rate_is_identity() {
        let mut rng = StdRng::seed_from_u64(25);
        let generator = generator();
        let mut program = generator.generate(&mut rng);
        program.set_fitness(3.0);
        let before = program.nodes().to_vec();
        program.point_mutation(&generator, 0.0, &mut rng);
        assert_eq!(program.nodes(), before.as_slice());
        assert!(program.is_evaluated());
    }

    #[test]
    fn test_point_mutation_swaps_function_for_same_arity() {
        let mut rng = StdRng::seed_from_u64(26);
        let generator = generator();
        let mut program = sample();
        program.point_mutation(&generator, 1.0, &mut rng);
        let nodes = program.nodes();
        assert_eq!(nodes[0].arity(), 2);
        assert_ne!(nodes[0], Node::Function(Arc::new(Addition)));
        assert_eq!(nodes[2].arity(), 2);
        assert_ne!(nodes[2], Node::Function(Arc::new(Multiplication)));
    }
}
