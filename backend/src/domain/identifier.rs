//! Validated string identifiers shared by teams, users, and pull requests.
//!
//! Every identifier is trimmed on construction and rejected when the trimmed
//! value is empty, so downstream code never sees blank keys.

/// Validation errors raised when constructing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The value was empty once trimmed of whitespace.
    #[error("{field} is required")]
    Empty {
        /// Name of the rejected field.
        field: &'static str,
    },
}

macro_rules! define_identifier {
    ($(#[$outer:meta])* $name:ident => $field:literal) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Field name reported in validation errors.
            pub const FIELD: &'static str = $field;

            /// Validate and construct the identifier.
            ///
            /// # Errors
            ///
            /// Returns [`IdentifierError::Empty`] when the trimmed value is
            /// empty.
            pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(IdentifierError::Empty { field: $field });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_identifier! {
    /// Unique, immutable team name.
    TeamName => "team_name"
}

define_identifier! {
    /// Unique user identifier.
    UserId => "user_id"
}

define_identifier! {
    /// Display name of a user.
    Username => "username"
}

define_identifier! {
    /// Unique pull request identifier.
    PullRequestId => "pull_request_id"
}

define_identifier! {
    /// Human-readable pull request title.
    PullRequestName => "pull_request_name"
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("u1", "u1")]
    #[case("  u1 ", "u1")]
    #[case("\tteam a\n", "team a")]
    fn identifiers_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
        let id = UserId::new(raw).expect("valid identifier");
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_identifiers_are_rejected(#[case] raw: &str) {
        let err = TeamName::new(raw).expect_err("blank identifier");
        assert_eq!(err, IdentifierError::Empty { field: "team_name" });
        assert_eq!(err.to_string(), "team_name is required");
    }

    #[rstest]
    fn identifiers_order_lexicographically() {
        let mut ids = vec![
            UserId::new("u3").expect("u3"),
            UserId::new("u1").expect("u1"),
            UserId::new("u2").expect("u2"),
        ];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(UserId::as_str).collect();
        assert_eq!(ordered, ["u1", "u2", "u3"]);
    }
}
