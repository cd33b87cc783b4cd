//! Fixed-point-free pairing of participants.
//!
//! Givers are walked in input order and each one draws a recipient from the
//! pool of people nobody has drawn yet. When a walk runs into a dead end the
//! whole walk is thrown away and started again from a full pool; partial
//! walks are never repaired.

use crate::domain::model::Assignment;
use crate::utils::error::{Result, SorteoError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Walks attempted before giving up on the restart strategies and falling
/// back to a single Sattolo pass. With `Uniform` a walk succeeds with
/// probability close to 1/e, so this is never reached in practice.
pub const MAX_ATTEMPTS: usize = 1_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DrawStrategy {
    /// Pick uniformly among the pool minus yourself; restart when the last
    /// giver is left holding only their own name. Fast, but some
    /// derangements come up more often than others.
    Restart,
    /// Pick uniformly from the whole pool; drawing yourself restarts the
    /// walk. Every derangement is equally likely.
    #[default]
    Uniform,
    /// Sattolo's shuffle: one pass, always a single gift-giving circle.
    Cycle,
}

/// A completed drawing plus how many walks it took to get there.
#[derive(Debug, Clone)]
pub struct Draw<T: Eq + Hash> {
    pub assignment: Assignment<T>,
    pub attempts: usize,
}

/// Pairs every participant with someone else, using the default strategy and
/// the thread-local RNG.
pub fn generate_derangement<T>(participants: &[T]) -> Result<Assignment<T>>
where
    T: Eq + Hash + Clone + Debug,
{
    draw_with_rng(participants, DrawStrategy::default(), &mut rand::rng())
        .map(|draw| draw.assignment)
}

pub fn draw_with_rng<T, R>(
    participants: &[T],
    strategy: DrawStrategy,
    rng: &mut R,
) -> Result<Draw<T>>
where
    T: Eq + Hash + Clone + Debug,
    R: Rng + ?Sized,
{
    check_participants(participants)?;
    let n = participants.len();

    let walk: fn(usize, &mut R) -> Option<Vec<usize>> = match strategy {
        DrawStrategy::Restart => restart_walk,
        DrawStrategy::Uniform => uniform_walk,
        DrawStrategy::Cycle => {
            let targets = sattolo_cycle(n, rng);
            return Ok(Draw {
                assignment: Assignment::from_targets(participants, &targets),
                attempts: 1,
            });
        }
    };

    for attempt in 1..=MAX_ATTEMPTS {
        if let Some(targets) = walk(n, rng) {
            tracing::debug!("Drawing for {} participants settled after {} attempt(s)", n, attempt);
            return Ok(Draw {
                assignment: Assignment::from_targets(participants, &targets),
                attempts: attempt,
            });
        }
    }

    tracing::warn!(
        "No valid drawing after {} attempts, falling back to a single cycle",
        MAX_ATTEMPTS
    );
    let targets = sattolo_cycle(n, rng);
    Ok(Draw {
        assignment: Assignment::from_targets(participants, &targets),
        attempts: MAX_ATTEMPTS + 1,
    })
}

fn check_participants<T: Eq + Hash + Debug>(participants: &[T]) -> Result<()> {
    if participants.len() < 2 {
        return Err(SorteoError::invalid_input(format!(
            "need at least 2 participants, got {}",
            participants.len()
        )));
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if !seen.insert(p) {
            return Err(SorteoError::invalid_input(format!(
                "participant {:?} appears more than once",
                p
            )));
        }
    }

    Ok(())
}

fn restart_walk<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Option<Vec<usize>> {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut targets = Vec::with_capacity(n);

    for giver in 0..n {
        let candidates: Vec<usize> = pool.iter().copied().filter(|&c| c != giver).collect();
        if candidates.is_empty() {
            return None;
        }
        let pick = candidates[rng.random_range(0..candidates.len())];
        pool.retain(|&c| c != pick);
        targets.push(pick);
    }

    Some(targets)
}

fn uniform_walk<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Option<Vec<usize>> {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut targets = Vec::with_capacity(n);

    for giver in 0..n {
        let idx = rng.random_range(0..pool.len());
        if pool[idx] == giver {
            return None;
        }
        targets.push(pool.swap_remove(idx));
    }

    Some(targets)
}

// targets[i] = successor of i on one cycle through all n indices.
fn sattolo_cycle<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut targets: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..i);
        targets.swap(i, j);
    }
    targets
}
