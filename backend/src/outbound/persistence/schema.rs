//! Diesel table definitions for the review schema.
//!
//! Kept in sync by hand with `backend/migrations`.

diesel::table! {
    teams (team_name) {
        team_name -> Text,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Text,
        username -> Text,
        team_name -> Text,
        is_active -> Bool,
    }
}

diesel::table! {
    pull_requests (pull_request_id) {
        pull_request_id -> Text,
        pull_request_name -> Text,
        author_id -> Text,
        status -> Text,
        created_at -> Timestamptz,
        merged_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    pr_reviewers (pull_request_id, user_id) {
        pull_request_id -> Text,
        user_id -> Text,
    }
}

diesel::joinable!(users -> teams (team_name));
diesel::joinable!(pull_requests -> users (author_id));
diesel::joinable!(pr_reviewers -> pull_requests (pull_request_id));
diesel::joinable!(pr_reviewers -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(teams, users, pull_requests, pr_reviewers);
