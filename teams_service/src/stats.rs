//! Roster aggregates.
//!
//! Both aggregates answer `-1` when there is no roster to look at, whether the
//! team has no players or the roster could not be fetched.

use league_common::Player;

/// Returned when an aggregate has no players to work with.
pub const NO_DATA: i64 = -1;

/// Arithmetic mean of the players' ages, unrounded.
pub fn average_age(players: &[Player]) -> f64 {
    if players.is_empty() {
        return NO_DATA as f64;
    }

    // Widened so extreme ages cannot overflow the sum
    let total: i128 = players.iter().map(|p| i128::from(p.age)).sum();
    total as f64 / players.len() as f64
}

pub fn total_injured(players: &[Player]) -> i64 {
    if players.is_empty() {
        return NO_DATA;
    }

    players.iter().filter(|p| p.injured).count() as i64
}
