//! Reviewer assignment policy.
//!
//! Pure functions deciding who may review a pull request. Store adapters call
//! these inside their transactions after loading the locked rows, so every
//! backend enforces the same rules:
//!
//! - initial reviewers are active teammates of the author, never the author;
//! - reassignment is only possible on open pull requests, for a reviewer
//!   that is currently assigned;
//! - a replacement is an active member of the outgoing reviewer's team who is
//!   neither assigned already nor the author.

use super::identifier::UserId;
use super::pull_request::PullRequest;
use super::reviewer_selection::ReviewerSelector;
use super::team::User;

/// Maximum number of reviewers picked when a pull request is opened.
pub const MAX_INITIAL_REVIEWERS: usize = 2;

/// Business-rule rejections raised while reassigning reviewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// The pull request is merged.
    #[error("cannot reassign on merged PR")]
    PullRequestMerged,
    /// The outgoing user is not a current reviewer.
    #[error("reviewer is not assigned to this PR")]
    ReviewerNotAssigned,
    /// Nobody in the outgoing reviewer's team can step in.
    #[error("no active replacement candidate in team")]
    NoCandidate,
}

/// Active teammates of the author, in the order given, excluding the author.
#[must_use]
pub fn initial_candidates(author_id: &UserId, teammates: &[User]) -> Vec<UserId> {
    teammates
        .iter()
        .filter(|user| user.is_active && &user.user_id != author_id)
        .map(|user| user.user_id.clone())
        .collect()
}

/// Pick up to [`MAX_INITIAL_REVIEWERS`] reviewers for a new pull request.
///
/// An empty pool yields no reviewers; that is not an error.
#[must_use]
pub fn select_initial_reviewers(
    author_id: &UserId,
    teammates: &[User],
    selector: &dyn ReviewerSelector,
) -> Vec<UserId> {
    let candidates = initial_candidates(author_id, teammates);
    let mut reviewers = selector.select(&candidates, MAX_INITIAL_REVIEWERS);
    reviewers.sort();
    reviewers
}

/// Check that `outgoing` may be replaced on `pull_request`.
///
/// # Errors
///
/// [`AssignmentError::PullRequestMerged`] for merged pull requests, checked
/// first; [`AssignmentError::ReviewerNotAssigned`] when `outgoing` is not a
/// current reviewer.
pub fn ensure_reassignable(
    pull_request: &PullRequest,
    outgoing: &UserId,
) -> Result<(), AssignmentError> {
    if pull_request.is_merged() {
        return Err(AssignmentError::PullRequestMerged);
    }
    if !pull_request.assigned_reviewers.contains(outgoing) {
        return Err(AssignmentError::ReviewerNotAssigned);
    }
    Ok(())
}

/// Eligible replacements drawn from the outgoing reviewer's team.
#[must_use]
pub fn replacement_candidates(
    pull_request: &PullRequest,
    outgoing: &UserId,
    outgoing_teammates: &[User],
) -> Vec<UserId> {
    outgoing_teammates
        .iter()
        .filter(|user| user.is_active)
        .map(|user| &user.user_id)
        .filter(|id| *id != outgoing)
        .filter(|id| !pull_request.assigned_reviewers.contains(id))
        .filter(|id| **id != pull_request.author_id)
        .cloned()
        .collect()
}

/// Pick the replacement reviewer for `outgoing`.
///
/// # Errors
///
/// [`AssignmentError::NoCandidate`] when nobody is eligible.
pub fn choose_replacement(
    pull_request: &PullRequest,
    outgoing: &UserId,
    outgoing_teammates: &[User],
    selector: &dyn ReviewerSelector,
) -> Result<UserId, AssignmentError> {
    let candidates = replacement_candidates(pull_request, outgoing, outgoing_teammates);
    selector
        .select(&candidates, 1)
        .into_iter()
        .next()
        .ok_or(AssignmentError::NoCandidate)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::reviewer_selection::{MockReviewerSelector, OrderedReviewerSelector};
    use crate::domain::{
        NewPullRequest, PullRequestId, PullRequestName, PullRequestStatus, TeamName, Username,
    };

    fn id(value: &str) -> UserId {
        UserId::new(value).expect("user id")
    }

    fn user(user_id: &str, active: bool) -> User {
        User {
            user_id: id(user_id),
            username: Username::new(format!("name-{user_id}")).expect("username"),
            team_name: TeamName::new("backend").expect("team"),
            is_active: active,
        }
    }

    #[fixture]
    fn pull_request() -> PullRequest {
        let draft = NewPullRequest {
            id: PullRequestId::new("pr-1").expect("id"),
            name: PullRequestName::new("Add search").expect("name"),
            author_id: id("u1"),
        };
        PullRequest::open(draft, vec![id("u2"), id("u3")], Utc::now())
    }

    #[rstest]
    fn initial_candidates_skip_author_and_inactive_users() {
        let team = [user("u1", true), user("u2", true), user("u3", false), user("u4", true)];
        assert_eq!(initial_candidates(&id("u1"), &team), vec![id("u2"), id("u4")]);
    }

    #[rstest]
    #[case(&["u1"], 0)]
    #[case(&["u1", "u2"], 1)]
    #[case(&["u1", "u2", "u3"], 2)]
    #[case(&["u1", "u2", "u3", "u4", "u5"], 2)]
    fn initial_reviewer_count_is_capped(#[case] members: &[&str], #[case] expected: usize) {
        let team: Vec<User> = members.iter().map(|m| user(m, true)).collect();
        let reviewers = select_initial_reviewers(&id("u1"), &team, &OrderedReviewerSelector);
        assert_eq!(reviewers.len(), expected);
        assert!(!reviewers.contains(&id("u1")));
    }

    #[rstest]
    fn selector_receives_the_filtered_pool() {
        let team = [user("u1", true), user("u2", false), user("u3", true)];
        let mut selector = MockReviewerSelector::new();
        selector
            .expect_select()
            .withf(|candidates, limit| {
                *limit == MAX_INITIAL_REVIEWERS
                    && candidates.iter().map(UserId::as_str).eq(["u3"])
            })
            .times(1)
            .returning(|candidates, _| candidates.to_vec());

        let reviewers = select_initial_reviewers(&id("u1"), &team, &selector);
        assert_eq!(reviewers, vec![id("u3")]);
    }

    #[rstest]
    fn merged_pull_requests_are_rejected_before_membership(mut pull_request: PullRequest) {
        pull_request.status = PullRequestStatus::Merged;
        assert_eq!(
            ensure_reassignable(&pull_request, &id("u9")),
            Err(AssignmentError::PullRequestMerged)
        );
    }

    #[rstest]
    fn unassigned_reviewers_are_rejected(pull_request: PullRequest) {
        assert_eq!(
            ensure_reassignable(&pull_request, &id("u4")),
            Err(AssignmentError::ReviewerNotAssigned)
        );
        assert_eq!(ensure_reassignable(&pull_request, &id("u2")), Ok(()));
    }

    #[rstest]
    fn replacement_pool_excludes_outgoing_assigned_author_and_inactive(
        pull_request: PullRequest,
    ) {
        let team = [
            user("u1", true),
            user("u2", true),
            user("u3", true),
            user("u4", true),
            user("u5", false),
        ];
        let pool = replacement_candidates(&pull_request, &id("u2"), &team);
        assert_eq!(pool, vec![id("u4")]);
    }

    #[rstest]
    fn empty_replacement_pool_reports_no_candidate(pull_request: PullRequest) {
        let team = [user("u1", true), user("u2", true), user("u3", true)];
        assert_eq!(
            choose_replacement(&pull_request, &id("u2"), &team, &OrderedReviewerSelector),
            Err(AssignmentError::NoCandidate)
        );
    }

    #[rstest]
    fn replacement_is_taken_from_the_selector(pull_request: PullRequest) {
        let team = [user("u2", true), user("u4", true), user("u5", true)];
        let chosen = choose_replacement(&pull_request, &id("u2"), &team, &OrderedReviewerSelector)
            .expect("replacement");
        assert_eq!(chosen, id("u4"));
    }
}
