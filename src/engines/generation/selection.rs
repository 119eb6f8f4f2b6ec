use crate::engines::generation::program::Program;
use rand::Rng;

/// Tournament selection over program fitness (lower is better).
///
/// Each tournament draws `tournament_size + 1` contenders uniformly with
/// replacement. A positive tournament returns the fittest contender; a negative
/// one returns the least fit, used to pick a slot for replacement.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    pub fn new(tournament_size: usize) -> Self {
        Self { tournament_size }
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Index of the tournament winner (or loser when `negative`), `None` for an
    /// empty population.
    pub fn select_index<R: Rng>(
        &self,
        population: &[Program],
        negative: bool,
        rng: &mut R,
    ) -> Option<usize> {
        if population.is_empty() {
            return None;
        }

        let mut chosen = rng.gen_range(0..population.len());
        for _ in 0..self.tournament_size {
            let contender = rng.gen_range(0..population.len());
            let candidate = population[contender].fitness();
            let incumbent = population[chosen].fitness();
            let better = if negative {
                candidate > incumbent
            } else {
                candidate < incumbent
            };
            if better {
                chosen = contender;
            }
        }

        Some(chosen)
    }

    pub fn select<'a, R: Rng>(
        &self,
        population: &'a [Program],
        negative: bool,
        rng: &mut R,
    ) -> Option<&'a Program> {
        self.select_index(population, negative, rng)
            .map(|idx| &population[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Node;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_fitness(values: &[f64]) -> Vec<Program> {
        values
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut p = Program::new(vec![Node::Input(i)]);
                p.set_fitness(f);
                p
            })
            .collect()
    }

    #[test]
    fn test_tournament_prefers_fitter() {
        let mut rng = StdRng::seed_from_u64(42);
        let population = with_fitness(&[0.9, 0.5, 0.1, 0.8, 0.2]);
        let selector = TournamentSelection::new(3);

        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            counts[selector.select_index(&population, false, &mut rng).unwrap()] += 1;
        }

        // Index 2 has the lowest cost
        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| *c).unwrap().0;
        assert_eq!(max_idx, 2);
    }

    #[test]
    fn test_negative_tournament_prefers_worse() {
        let mut rng = StdRng::seed_from_u64(43);
        let population = with_fitness(&[0.9, 0.5, 0.1, 0.8, 0.2]);
        let selector = TournamentSelection::new(3);

        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            counts[selector.select_index(&population, true, &mut rng).unwrap()] += 1;
        }

        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| *c).unwrap().0;
        assert_eq!(max_idx, 0);
    }

    #[test]
    fn test_two_member_population() {
        let mut rng = StdRng::seed_from_u64(44);
        let population = with_fitness(&[1.0, 2.0]);
        let selector = TournamentSelection::new(1);
        for negative in [false, true] {
            for _ in 0..100 {
                let winner = selector.select(&population, negative, &mut rng).unwrap();
                assert!(population.iter().any(|p| std::ptr::eq(p, winner)));
            }
        }
    }

    #[test]
    fn test_unevaluated_programs_lose() {
        let mut rng = StdRng::seed_from_u64(45);
        let mut population = with_fitness(&[5.0]);
        population.push(Program::new(vec![Node::Constant(0.0)]));
        let selector = TournamentSelection::new(50);
        assert_eq!(selector.select_index(&population, false, &mut rng), Some(0));
        assert_eq!(selector.select_index(&population, true, &mut rng), Some(1));
    }

    #[test]
    fn test_empty_population() {
        let mut rng = StdRng::seed_from_u64(46);
        assert!(TournamentSelection::new(3).select_index(&[], false, &mut rng).is_none());
    }
}
