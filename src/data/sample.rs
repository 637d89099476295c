//! Synthetic league generation from latent team strengths.
//!
//! Each team is assigned a latent strength drawn from a normal distribution;
//! every pair then plays a fixed number of rounds with the observed margin
//! equal to the strength gap plus normal noise, rounded to whole points.
//! Useful for demos and for exercising the solvers on leagues larger than
//! the hand-written fixtures. Deterministic for a given seed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::League;
use crate::error::RatingError;

#[derive(Debug, Clone)]
pub struct SampleOptions {
    pub teams: usize,
    /// Games each pair of teams plays against each other.
    pub rounds: usize,
    pub seed: u64,
    /// Std dev of the latent strength distribution (points).
    pub strength_sigma: f64,
    /// Std dev of per-game margin noise (points).
    pub noise_sigma: f64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            teams: 12,
            rounds: 2,
            seed: 42,
            strength_sigma: 6.0,
            noise_sigma: 9.0,
        }
    }
}

/// Generate a seeded round-robin league.
pub fn generate_league(options: &SampleOptions) -> Result<League, RatingError> {
    if options.teams < 2 {
        return Err(RatingError::Input(
            "Sample league needs at least 2 teams.".to_string(),
        ));
    }
    if options.rounds == 0 {
        return Err(RatingError::Input(
            "Sample league needs at least 1 round.".to_string(),
        ));
    }
    if !(options.strength_sigma.is_finite() && options.strength_sigma > 0.0)
        || !(options.noise_sigma.is_finite() && options.noise_sigma >= 0.0)
    {
        return Err(RatingError::Input(
            "Sample sigmas must be finite and positive.".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let strength_dist = Normal::new(0.0, options.strength_sigma)
        .map_err(|e| RatingError::Input(format!("Strength distribution error: {e}")))?;
    let noise_dist = Normal::new(0.0, options.noise_sigma.max(f64::MIN_POSITIVE))
        .map_err(|e| RatingError::Input(format!("Noise distribution error: {e}")))?;

    let names: Vec<String> = (1..=options.teams)
        .map(|i| format!("team-{i:02}"))
        .collect();
    let strengths: Vec<f64> = names
        .iter()
        .map(|_| strength_dist.sample(&mut rng))
        .collect();

    let mut league = League::new();
    for i in 0..options.teams {
        for j in (i + 1)..options.teams {
            for _ in 0..options.rounds {
                let margin =
                    (strengths[i] - strengths[j] + noise_dist.sample(&mut rng)).round();
                league.record_game(&names[i], &names[j], margin);
            }
        }
    }

    Ok(league)
}
