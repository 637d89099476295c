//! Zero-mean normalization of a solved league.
//!
//! The rating definition is invariant under adding any constant to every
//! rating, so each solver's raw output is one member of an infinite family.
//! Subtracting the mean rating from every team selects the unique member
//! whose ratings sum to zero; margins are untouched, so the strength of
//! schedule shifts by the same constant.

use crate::domain::League;

/// Shift ratings (and strength of schedule) so ratings average to zero.
///
/// Idempotent: a second invocation on an already-zero-mean league changes
/// nothing beyond floating noise. Teams without a computed rating are left
/// alone.
pub fn normalize(league: &mut League) {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (_, team) in league.iter() {
        if let Some(rating) = team.rating {
            sum += rating;
            count += 1;
        }
    }
    if count == 0 {
        return;
    }
    let mean = sum / count as f64;

    for (_, team) in league.iter_mut() {
        if let Some(rating) = team.rating {
            let shifted = rating - mean;
            team.rating = Some(shifted);
            // Re-derive SOS from the shifted rating so the identity
            // `sos = rating - mov` stays exact after the shift.
            match team.margin_of_victory {
                Some(mov) => team.strength_of_schedule = Some(shifted - mov),
                None => {
                    team.strength_of_schedule = team.strength_of_schedule.map(|s| s - mean);
                }
            }
        }
    }
}
