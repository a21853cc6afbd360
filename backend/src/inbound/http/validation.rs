//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies carry plain strings; these helpers trim and validate them
//! into domain identifiers, reporting failures as `BAD_REQUEST`.

use crate::domain::{Error, IdentifierError};

/// Parse a required string field into a domain identifier.
///
/// Blank values fail with a message naming the field, for example
/// `team_name is required`.
pub(crate) fn parse_required<T>(value: String) -> Result<T, Error>
where
    T: TryFrom<String, Error = IdentifierError>,
{
    T::try_from(value).map_err(|err| Error::bad_request(err.to_string()))
}

/// Parse a field that may arrive under either of two names.
///
/// The primary name wins when both are present and non-blank.
pub(crate) fn parse_either<T>(primary: Option<String>, alias: Option<String>) -> Result<T, Error>
where
    T: TryFrom<String, Error = IdentifierError>,
{
    let value = primary
        .filter(|value| !value.trim().is_empty())
        .or(alias)
        .unwrap_or_default();
    parse_required(value)
}
