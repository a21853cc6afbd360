//! Correlation id for one HTTP request.
//!
//! The `Trace` middleware mints a [`TraceId`] per request and runs the handler
//! inside [`TraceId::scope`]. Anything on that task, such as
//! [`crate::domain::Error`] constructors, can then read it back with
//! [`TraceId::current`]. Work spawned onto other tasks starts without one.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Name of the response header echoing the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request in logs, error bodies and response headers.
///
/// # Examples
/// ```
/// use pr_reviewer::TraceId;
///
/// fn log_prefix() -> String {
///     TraceId::current().map_or_else(|| "-".to_owned(), |id| id.to_string())
/// }
/// # assert_eq!(log_prefix(), "-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random (v4) id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request running on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` to completion with `trace_id` as the current id.
    ///
    /// # Examples
    /// ```
    /// use pr_reviewer::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
