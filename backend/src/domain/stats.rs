//! Aggregate review statistics.

use super::identifier::{UserId, Username};

/// Number of pull requests a user currently reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerLoad {
    /// Reviewer.
    pub user_id: UserId,
    /// Reviewer display name.
    pub username: Username,
    /// Current assignment count.
    pub count: u64,
}

/// Pull request counts plus per-user review load.
///
/// Every known user appears in `assignments`, including users with no
/// reviews, ordered by count descending then user id ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewStats {
    /// All pull requests.
    pub total_prs: u64,
    /// Open pull requests.
    pub open_prs: u64,
    /// Merged pull requests.
    pub merged_prs: u64,
    /// Per-user load.
    pub assignments: Vec<ReviewerLoad>,
}

/// Sort loads by count descending, then user id ascending.
pub fn order_reviewer_loads(loads: &mut [ReviewerLoad]) {
    loads.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user_id.cmp(&b.user_id)));
}
