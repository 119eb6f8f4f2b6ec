/// Hooks invoked by [`EvolutionEngine::train`](super::EvolutionEngine::train).
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, best_length: usize);
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, best_length: usize) {
        (**self).on_generation_complete(generation, best_fitness, best_length);
    }
}

/// Reports progress through the `log` facade.
pub struct LoggingProgressCallback;

impl ProgressCallback for LoggingProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, best_length: usize) {
        log::info!(
            "Generation {} complete. Best fitness: {:.6}, best length: {}",
            generation + 1,
            best_fitness,
            best_length
        );
    }
}

/// Ignores all progress.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _best_length: usize) {}
}
