//! In-memory review store.
//!
//! Implements both repository ports over maps guarded by one async mutex.
//! Every operation holds the lock for its whole read-decide-write sequence,
//! which gives the same serialisation the PostgreSQL adapter gets from its
//! row locks. Used when no database is configured, and by handler tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::Mutex;

use crate::domain::assignment::{choose_replacement, ensure_reassignable, select_initial_reviewers};
use crate::domain::ports::{
    PullRequestRepository, PullRequestRepositoryError, TeamRepository, TeamRepositoryError,
};
use crate::domain::stats::order_reviewer_loads;
use crate::domain::{
    NewPullRequest, PullRequest, PullRequestId, PullRequestStatus, PullRequestSummary,
    Reassignment, ReviewStats, ReviewerLoad, ReviewerSelector, Team, TeamMember, TeamName, User,
    UserId,
};

#[derive(Debug)]
struct StoredPullRequest {
    pull_request: PullRequest,
    sequence: u64,
}

#[derive(Debug, Default)]
struct ReviewState {
    teams: BTreeSet<TeamName>,
    users: BTreeMap<UserId, User>,
    pull_requests: HashMap<PullRequestId, StoredPullRequest>,
    next_sequence: u64,
}

impl ReviewState {
    fn team_users(&self, team_name: &TeamName) -> Vec<User> {
        self.users
            .values()
            .filter(|user| &user.team_name == team_name)
            .cloned()
            .collect()
    }
}

/// Process-local store implementing [`TeamRepository`] and
/// [`PullRequestRepository`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pr_reviewer::domain::OrderedReviewerSelector;
/// use pr_reviewer::outbound::memory::InMemoryReviewStore;
///
/// let store = Arc::new(InMemoryReviewStore::new(Arc::new(OrderedReviewerSelector)));
/// # let _ = store;
/// ```
pub struct InMemoryReviewStore {
    state: Mutex<ReviewState>,
    selector: Arc<dyn ReviewerSelector>,
    clock: Arc<dyn Clock>,
}

impl InMemoryReviewStore {
    /// Create an empty store using `selector` and the system clock.
    pub fn new(selector: Arc<dyn ReviewerSelector>) -> Self {
        Self {
            state: Mutex::new(ReviewState::default()),
            selector,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the clock used for creation and merge timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl TeamRepository for InMemoryReviewStore {
    async fn create_team(&self, team: &Team) -> Result<(), TeamRepositoryError> {
        let mut state = self.state.lock().await;
        if state.teams.contains(team.team_name()) {
            return Err(TeamRepositoryError::team_exists(team.team_name().as_str()));
        }
        state.teams.insert(team.team_name().clone());
        for user in team.users() {
            state.users.insert(user.user_id.clone(), user);
        }
        Ok(())
    }

    async fn find_team(&self, team_name: &TeamName) -> Result<Option<Team>, TeamRepositoryError> {
        let state = self.state.lock().await;
        if !state.teams.contains(team_name) {
            return Ok(None);
        }
        let members = state
            .team_users(team_name)
            .into_iter()
            .map(TeamMember::from)
            .collect();
        Ok(Some(Team::from_stored(team_name.clone(), members)))
    }

    async fn set_user_active(
        &self,
        user_id: &UserId,
        is_active: bool,
    ) -> Result<Option<User>, TeamRepositoryError> {
        let mut state = self.state.lock().await;
        Ok(state.users.get_mut(user_id).map(|user| {
            user.is_active = is_active;
            user.clone()
        }))
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryReviewStore {
    async fn create(
        &self,
        draft: &NewPullRequest,
    ) -> Result<PullRequest, PullRequestRepositoryError> {
        let mut state = self.state.lock().await;
        if state.pull_requests.contains_key(&draft.id) {
            return Err(PullRequestRepositoryError::duplicate_pull_request(
                draft.id.as_str(),
            ));
        }
        let author = state.users.get(&draft.author_id).ok_or_else(|| {
            PullRequestRepositoryError::author_not_found(draft.author_id.as_str())
        })?;

        let teammates = state.team_users(&author.team_name);
        let reviewers =
            select_initial_reviewers(&draft.author_id, &teammates, self.selector.as_ref());
        let pull_request = PullRequest::open(draft.clone(), reviewers, self.clock.utc());

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.pull_requests.insert(
            draft.id.clone(),
            StoredPullRequest {
                pull_request: pull_request.clone(),
                sequence,
            },
        );
        Ok(pull_request)
    }

    async fn merge(&self, id: &PullRequestId) -> Result<PullRequest, PullRequestRepositoryError> {
        let mut state = self.state.lock().await;
        let stored = state
            .pull_requests
            .get_mut(id)
            .ok_or_else(|| PullRequestRepositoryError::pull_request_not_found(id.as_str()))?;
        stored.pull_request.merge(self.clock.utc());
        Ok(stored.pull_request.clone())
    }

    async fn reassign(
        &self,
        id: &PullRequestId,
        outgoing: &UserId,
    ) -> Result<Reassignment, PullRequestRepositoryError> {
        let mut state = self.state.lock().await;
        let current = state
            .pull_requests
            .get(id)
            .map(|stored| stored.pull_request.clone())
            .ok_or_else(|| PullRequestRepositoryError::pull_request_not_found(id.as_str()))?;
        ensure_reassignable(&current, outgoing)?;

        let outgoing_user = state
            .users
            .get(outgoing)
            .ok_or_else(|| PullRequestRepositoryError::user_not_found(outgoing.as_str()))?;
        let teammates = state.team_users(&outgoing_user.team_name);
        let replacement =
            choose_replacement(&current, outgoing, &teammates, self.selector.as_ref())?;

        let stored = state
            .pull_requests
            .get_mut(id)
            .ok_or_else(|| PullRequestRepositoryError::pull_request_not_found(id.as_str()))?;
        stored
            .pull_request
            .replace_reviewer(outgoing, replacement.clone());
        Ok(Reassignment {
            pull_request: stored.pull_request.clone(),
            replaced_by: replacement,
        })
    }

    async fn list_for_reviewer(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PullRequestSummary>, PullRequestRepositoryError> {
        let state = self.state.lock().await;
        if !state.users.contains_key(user_id) {
            return Err(PullRequestRepositoryError::user_not_found(user_id.as_str()));
        }
        let mut assigned: Vec<&StoredPullRequest> = state
            .pull_requests
            .values()
            .filter(|stored| stored.pull_request.assigned_reviewers.contains(user_id))
            .collect();
        assigned.sort_by(|a, b| {
            b.pull_request
                .created_at
                .cmp(&a.pull_request.created_at)
                .then_with(|| b.sequence.cmp(&a.sequence))
        });
        Ok(assigned
            .into_iter()
            .map(|stored| stored.pull_request.summary())
            .collect())
    }

    async fn stats(&self) -> Result<ReviewStats, PullRequestRepositoryError> {
        let state = self.state.lock().await;
        let mut stats = ReviewStats::default();
        let mut counts: HashMap<&UserId, u64> = HashMap::new();
        for stored in state.pull_requests.values() {
            stats.total_prs += 1;
            match stored.pull_request.status {
                PullRequestStatus::Open => stats.open_prs += 1,
                PullRequestStatus::Merged => stats.merged_prs += 1,
            }
            for reviewer in &stored.pull_request.assigned_reviewers {
                *counts.entry(reviewer).or_default() += 1;
            }
        }
        stats.assignments = state
            .users
            .values()
            .map(|user| ReviewerLoad {
                user_id: user.user_id.clone(),
                username: user.username.clone(),
                count: counts.get(&user.user_id).copied().unwrap_or_default(),
            })
            .collect();
        order_reviewer_loads(&mut stats.assignments);
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
