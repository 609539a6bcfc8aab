//! Evolutionary loop execution.
//!
//! [`Solver`] orchestrates the complete run: input pre-flight →
//! population initialization → (evaluate → track best → select +
//! recombine + repair + mutate) per generation → termination. The
//! best-ever candidate across all generations is returned, not
//! necessarily a member of the final population.
//!
//! The loop is single-threaded and cooperative: once per generation it
//! reports progress and checks the cancellation flag. With the
//! `parallel` feature, fitness evaluation fans out across a rayon pool;
//! scoring is pure, so results are identical either way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::EngineConfig;
use super::fitness;
use super::init::initialize_population;
use super::operators::{crossover, mutate, repair};
use super::problem::TimetableProblem;
use super::selection::tournament_select;
use crate::error::SolveError;
use crate::models::Timetable;
use crate::validation::validate_input;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Stagnation limit reached: no improvement for the configured
    /// number of generations.
    Converged,
    /// Generation limit reached.
    Exhausted,
    /// The caller raised the cancellation flag.
    Cancelled,
}

/// Per-generation progress signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProgress {
    /// One-based generation index.
    pub generation: usize,
    /// Best fitness seen so far across the whole run.
    pub best_fitness: f64,
}

/// Result of a completed synthesis run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Best timetable seen during the entire run.
    pub best: Timetable,
    /// Its fitness score.
    pub best_fitness: f64,
    /// Generations executed.
    pub generations: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Best-so-far fitness at the end of each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```no_run
/// use u_timetable::ga::{EngineConfig, Solver, TimetableProblem};
/// # let problem = TimetableProblem::new(vec![], vec![], vec![], Default::default());
///
/// let config = EngineConfig::default().with_seed(42);
/// let outcome = Solver::run(&problem, &config)?;
/// println!("best fitness: {}", outcome.best_fitness);
/// # Ok::<(), u_timetable::error::SolveError>(())
/// ```
pub struct Solver;

impl Solver {
    /// Runs the engine to completion.
    pub fn run(
        problem: &TimetableProblem,
        config: &EngineConfig,
    ) -> Result<SolveOutcome, SolveError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the engine with an optional cancellation token.
    ///
    /// When the flag is raised, the run stops at the next generation
    /// boundary and returns the best solution found so far.
    pub fn run_with_cancel(
        problem: &TimetableProblem,
        config: &EngineConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveOutcome, SolveError> {
        Self::run_with_progress(problem, config, cancel, |_| {})
    }

    /// Runs the engine, reporting progress once per generation.
    pub fn run_with_progress(
        problem: &TimetableProblem,
        config: &EngineConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut progress: impl FnMut(GenerationProgress),
    ) -> Result<SolveOutcome, SolveError> {
        config.validate().map_err(SolveError::InvalidConfig)?;
        preflight(problem)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        info!(
            "starting synthesis: {} modules, {} lecturers, {} rooms, population {}",
            problem.modules.len(),
            problem.lecturers.len(),
            problem.rooms.len(),
            config.population_size
        );

        let mut population = initialize_population(problem, config, &mut rng)?;

        let mut best: Option<Timetable> = None;
        let mut best_fitness = f64::NEG_INFINITY;
        let mut fitness_history = Vec::new();
        let mut stagnation = 0usize;
        let mut generations = 0usize;
        let mut termination = Termination::Exhausted;

        for gen in 0..config.max_generations {
            let scores = evaluate_population(problem, &population);

            let (gen_best_idx, gen_best) = scores
                .iter()
                .copied()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .expect("population is never empty");

            if gen_best > best_fitness {
                best_fitness = gen_best;
                best = Some(population[gen_best_idx].clone());
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            generations = gen + 1;
            fitness_history.push(best_fitness);
            progress(GenerationProgress {
                generation: generations,
                best_fitness,
            });

            if config.stagnation_limit > 0 && stagnation >= config.stagnation_limit {
                info!("converged after {generations} generations (stagnated)");
                termination = Termination::Converged;
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    info!("cancelled after {generations} generations");
                    termination = Termination::Cancelled;
                    break;
                }
            }
            if generations == config.max_generations {
                break;
            }

            population = breed(problem, config, &population, &scores, &mut rng);
        }

        let best = best.expect("at least one generation was evaluated");
        Ok(SolveOutcome {
            best,
            best_fitness,
            generations,
            termination,
            fitness_history,
        })
    }
}

/// Re-checks the input before searching; the caller should have
/// validated already, but the engine never loops on impossible data.
fn preflight(problem: &TimetableProblem) -> Result<(), SolveError> {
    if let Err(errors) = validate_input(problem) {
        let unteachable = problem.unteachable_modules();
        if !unteachable.is_empty() {
            return Err(SolveError::UnteachableModules {
                modules: unteachable,
            });
        }
        let unroomable = problem.unroomable_modules();
        if !unroomable.is_empty() {
            return Err(SolveError::UnroomableModules {
                modules: unroomable,
            });
        }
        let reasons: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(SolveError::InvalidInput(reasons.join("; ")));
    }
    Ok(())
}

/// Scores every individual. Non-finite scores (evaluation errors) are
/// normalized to the worst possible value instead of aborting the run.
fn evaluate_population(problem: &TimetableProblem, population: &[Timetable]) -> Vec<f64> {
    let normalize = |s: f64| if s.is_finite() { s } else { f64::NEG_INFINITY };

    #[cfg(feature = "parallel")]
    {
        population
            .par_iter()
            .map(|t| normalize(fitness::score(t, problem)))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        population
            .iter()
            .map(|t| normalize(fitness::score(t, problem)))
            .collect()
    }
}

/// Builds the next population: tournament parents → crossover → repair
/// → probabilistic mutation, until the target size is reached.
fn breed<R: Rng>(
    problem: &TimetableProblem,
    config: &EngineConfig,
    population: &[Timetable],
    scores: &[f64],
    rng: &mut R,
) -> Vec<Timetable> {
    let mut next = Vec::with_capacity(config.population_size);
    while next.len() < config.population_size {
        let p1 = tournament_select(scores, population.len(), config.tournament_size, rng);
        let p2 = tournament_select(scores, population.len(), config.tournament_size, rng);

        let mut child = crossover(&population[p1], &population[p2], problem, rng);
        repair(&mut child, problem, config.repair_attempts, rng);
        if rng.random_range(0.0..1.0) < config.mutation_rate {
            mutate(&mut child, problem, rng);
        }
        next.push(child);
    }
    next
}
