//! Tests for the pull request service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockPullRequestRepository;
use crate::domain::{ErrorCode, PullRequestName, PullRequestStatus};

fn make_service(repo: MockPullRequestRepository) -> PullRequestService<MockPullRequestRepository> {
    PullRequestService::new(Arc::new(repo))
}

fn user(id: &str) -> UserId {
    UserId::new(id).expect("user id")
}

#[fixture]
fn draft() -> NewPullRequest {
    NewPullRequest {
        id: PullRequestId::new("pr-1").expect("id"),
        name: PullRequestName::new("Add search").expect("name"),
        author_id: user("u1"),
    }
}

#[fixture]
fn opened(draft: NewPullRequest) -> PullRequest {
    PullRequest::open(draft, vec![user("u2"), user("u3")], Utc::now())
}

#[rstest]
#[tokio::test]
async fn create_returns_the_opened_pull_request(draft: NewPullRequest, opened: PullRequest) {
    let expected = opened.clone();
    let mut repo = MockPullRequestRepository::new();
    repo.expect_create()
        .withf(|candidate| candidate.id.as_str() == "pr-1")
        .times(1)
        .return_once(move |_| Ok(opened));

    let pull_request = make_service(repo)
        .create_pull_request(draft)
        .await
        .expect("created");
    assert_eq!(pull_request, expected);
}

#[rstest]
#[case(
    PullRequestRepositoryError::duplicate_pull_request("pr-1"),
    ErrorCode::PrExists,
    "PR id already exists"
)]
#[case(
    PullRequestRepositoryError::author_not_found("u1"),
    ErrorCode::NotFound,
    "author not found"
)]
#[case(
    PullRequestRepositoryError::connection("refused"),
    ErrorCode::Internal,
    "pull request repository unavailable: refused"
)]
#[tokio::test]
async fn create_maps_repository_failures(
    draft: NewPullRequest,
    #[case] failure: PullRequestRepositoryError,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut repo = MockPullRequestRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = make_service(repo)
        .create_pull_request(draft)
        .await
        .expect_err("failure");
    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
}

#[rstest]
#[tokio::test]
async fn merge_returns_the_merged_state(mut opened: PullRequest) {
    opened.merge(Utc::now());
    let expected = opened.clone();
    let mut repo = MockPullRequestRepository::new();
    repo.expect_merge().times(1).return_once(move |_| Ok(opened));

    let merged = make_service(repo)
        .merge_pull_request(&PullRequestId::new("pr-1").expect("id"))
        .await
        .expect("merged");
    assert_eq!(merged.status, PullRequestStatus::Merged);
    assert_eq!(merged.merged_at, expected.merged_at);
}

#[rstest]
#[tokio::test]
async fn merge_reports_missing_pull_requests() {
    let mut repo = MockPullRequestRepository::new();
    repo.expect_merge()
        .times(1)
        .return_once(|_| Err(PullRequestRepositoryError::pull_request_not_found("pr-9")));

    let err = make_service(repo)
        .merge_pull_request(&PullRequestId::new("pr-9").expect("id"))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "pull request not found");
}

#[rstest]
#[case(AssignmentError::PullRequestMerged, ErrorCode::PrMerged, "cannot reassign on merged PR")]
#[case(
    AssignmentError::ReviewerNotAssigned,
    ErrorCode::NotAssigned,
    "reviewer is not assigned to this PR"
)]
#[case(
    AssignmentError::NoCandidate,
    ErrorCode::NoCandidate,
    "no active replacement candidate in team"
)]
#[tokio::test]
async fn reassign_maps_policy_rejections(
    #[case] reason: AssignmentError,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut repo = MockPullRequestRepository::new();
    repo.expect_reassign()
        .times(1)
        .return_once(move |_, _| Err(reason.into()));

    let err = make_service(repo)
        .reassign_reviewer(&PullRequestId::new("pr-1").expect("id"), &user("u2"))
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
}

#[rstest]
#[tokio::test]
async fn reassign_returns_the_replacement(mut opened: PullRequest) {
    opened.replace_reviewer(&user("u2"), user("u4"));
    let reassignment = Reassignment {
        pull_request: opened,
        replaced_by: user("u4"),
    };
    let expected = reassignment.clone();
    let mut repo = MockPullRequestRepository::new();
    repo.expect_reassign()
        .withf(|id, outgoing| id.as_str() == "pr-1" && outgoing.as_str() == "u2")
        .times(1)
        .return_once(move |_, _| Ok(reassignment));

    let outcome = make_service(repo)
        .reassign_reviewer(&PullRequestId::new("pr-1").expect("id"), &user("u2"))
        .await
        .expect("reassigned");
    assert_eq!(outcome, expected);
}

#[rstest]
#[tokio::test]
async fn list_user_reviews_reports_unknown_users() {
    let mut repo = MockPullRequestRepository::new();
    repo.expect_list_for_reviewer()
        .times(1)
        .return_once(|_| Err(PullRequestRepositoryError::user_not_found("ghost")));

    let err = make_service(repo)
        .list_user_reviews(&user("ghost"))
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "user not found");
}

#[rstest]
#[tokio::test]
async fn review_stats_passes_through() {
    let stats = ReviewStats {
        total_prs: 3,
        open_prs: 2,
        merged_prs: 1,
        assignments: Vec::new(),
    };
    let expected = stats.clone();
    let mut repo = MockPullRequestRepository::new();
    repo.expect_stats().times(1).return_once(move || Ok(stats));

    let observed = make_service(repo).review_stats().await.expect("stats");
    assert_eq!(observed, expected);
}
