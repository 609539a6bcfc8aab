//! Tournament parent selection.
//!
//! Samples `k` distinct individuals uniformly and keeps the fittest
//! (highest score). Falls back to a uniform random pick when the
//! fitness list does not line up with the population; panics only on an
//! entirely empty population.
//!
//! # Reference
//! Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//! Used in Genetic Algorithms"

use rand::Rng;

/// Selects a parent index by k-way tournament.
///
/// Fitness values are maximized. Non-finite scores lose every
/// comparison, so broken individuals are never chosen over scored ones
/// within a tournament.
///
/// # Panics
/// Panics if `population_len` is zero.
pub fn tournament_select<R: Rng>(
    fitness: &[f64],
    population_len: usize,
    k: usize,
    rng: &mut R,
) -> usize {
    assert!(population_len > 0, "cannot select from empty population");

    // Malformed fitness list: fall back to uniform random choice.
    if fitness.len() != population_len {
        return rng.random_range(0..population_len);
    }

    let k = k.clamp(1, population_len);
    let contenders = rand::seq::index::sample(rng, population_len, k);

    contenders
        .into_iter()
        .max_by(|&a, &b| {
            fitness[a]
                .partial_cmp(&fitness[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("tournament has at least one contender")
}
