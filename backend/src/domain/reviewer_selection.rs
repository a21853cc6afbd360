//! Reviewer selection strategies.
//!
//! Selection is uniform random without replacement. Implementations must be
//! safe to share across request handlers.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{SeedableRng, thread_rng};

use super::identifier::UserId;

/// Picks reviewers from an eligible candidate pool.
#[cfg_attr(test, mockall::automock)]
pub trait ReviewerSelector: Send + Sync {
    /// Choose up to `limit` distinct candidates.
    ///
    /// Returns fewer than `limit` entries when the pool is smaller, and an
    /// empty list for an empty pool.
    fn select(&self, candidates: &[UserId], limit: usize) -> Vec<UserId>;
}

/// Uniform selection backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReviewerSelector;

impl ReviewerSelector for RandomReviewerSelector {
    fn select(&self, candidates: &[UserId], limit: usize) -> Vec<UserId> {
        candidates
            .choose_multiple(&mut thread_rng(), limit)
            .cloned()
            .collect()
    }
}

/// Uniform selection from a seeded generator, for reproducible assignment.
///
/// # Examples
/// ```
/// use pr_reviewer::domain::{ReviewerSelector, SeededReviewerSelector, UserId};
///
/// let pool: Vec<UserId> = ["u2", "u3", "u4"]
///     .into_iter()
///     .map(|id| UserId::new(id).expect("id"))
///     .collect();
/// let first = SeededReviewerSelector::new(7).select(&pool, 2);
/// let second = SeededReviewerSelector::new(7).select(&pool, 2);
/// assert_eq!(first, second);
/// ```
#[derive(Debug)]
pub struct SeededReviewerSelector {
    rng: Mutex<StdRng>,
}

impl SeededReviewerSelector {
    /// Create a selector seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ReviewerSelector for SeededReviewerSelector {
    fn select(&self, candidates: &[UserId], limit: usize) -> Vec<UserId> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        candidates
            .choose_multiple(&mut *rng, limit)
            .cloned()
            .collect()
    }
}

/// Deterministic selection taking candidates in the order given.
///
/// Candidate pools are ordered by user id, so this picks the lowest ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderedReviewerSelector;

impl ReviewerSelector for OrderedReviewerSelector {
    fn select(&self, candidates: &[UserId], limit: usize) -> Vec<UserId> {
        candidates.iter().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashSet;

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pool() -> Vec<UserId> {
        ["u2", "u3", "u4", "u5"]
            .into_iter()
            .map(|id| UserId::new(id).expect("id"))
            .collect()
    }

    fn assert_distinct_members(selected: &[UserId], pool: &[UserId]) {
        let unique: HashSet<&UserId> = selected.iter().collect();
        assert_eq!(unique.len(), selected.len(), "selection repeated a user");
        assert!(selected.iter().all(|id| pool.contains(id)));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(9, 4)]
    fn random_selection_is_bounded_and_distinct(
        pool: Vec<UserId>,
        #[case] limit: usize,
        #[case] expected: usize,
    ) {
        let selected = RandomReviewerSelector.select(&pool, limit);
        assert_eq!(selected.len(), expected);
        assert_distinct_members(&selected, &pool);
    }

    #[rstest]
    fn empty_pool_selects_nobody() {
        assert!(RandomReviewerSelector.select(&[], 2).is_empty());
        assert!(SeededReviewerSelector::new(1).select(&[], 2).is_empty());
    }

    #[rstest]
    fn seeded_selection_is_reproducible(pool: Vec<UserId>) {
        let a = SeededReviewerSelector::new(42);
        let b = SeededReviewerSelector::new(42);
        for _ in 0..5 {
            let left = a.select(&pool, 2);
            assert_eq!(left, b.select(&pool, 2));
            assert_distinct_members(&left, &pool);
        }
    }

    #[rstest]
    fn random_selection_reaches_every_candidate(pool: Vec<UserId>) {
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.extend(RandomReviewerSelector.select(&pool, 1));
        }
        assert_eq!(seen.len(), pool.len());
    }

    #[rstest]
    fn ordered_selection_takes_the_head(pool: Vec<UserId>) {
        let selected = OrderedReviewerSelector.select(&pool, 2);
        assert_eq!(selected, pool.get(..2).expect("two candidates").to_vec());
    }
}
