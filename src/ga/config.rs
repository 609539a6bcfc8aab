//! Engine configuration.
//!
//! [`EngineConfig`] holds every tunable of the evolutionary loop.
//! Defaults are the production values of the reference deployment.

/// Configuration for a timetable synthesis run.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_population_size(50)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of candidate timetables in the population.
    ///
    /// Larger populations increase diversity but slow down each
    /// generation. Typical range: 50–500.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Tournament size for parent selection.
    ///
    /// Higher values increase selection pressure; 3 is the typical
    /// default.
    pub tournament_size: usize,

    /// Generations without improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Placement attempts per module during initialization.
    pub placement_attempts: usize,

    /// Placement attempts per under-scheduled module during the
    /// post-crossover repair pass.
    pub repair_attempts: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            max_generations: 1000,
            mutation_rate: 0.15,
            tournament_size: 3,
            stagnation_limit: 20,
            placement_attempts: 200,
            repair_attempts: 20,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the per-module placement attempt budget.
    pub fn with_placement_attempts(mut self, attempts: usize) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Sets the post-crossover repair attempt budget.
    pub fn with_repair_attempts(mut self, attempts: usize) -> Self {
        self.repair_attempts = attempts;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        if self.placement_attempts == 0 {
            return Err("placement_attempts must be at least 1".into());
        }
        Ok(())
    }
}
