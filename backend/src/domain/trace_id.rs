//! Correlation id shared by request logs and error bodies.
//!
//! The [`Trace`](crate::Trace) middleware puts one [`TraceId`] in task-local
//! storage per request. Blocking work (password hashing) re-enters the scope
//! with [`TraceId::run_sync`] because task-locals do not follow
//! `spawn_blocking`.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Identifier of one request, rendered as a hyphenated UUID.
///
/// # Examples
/// ```
/// use acquisitions::TraceId;
///
/// let upstream = "6f1c0a52-5a1e-4a55-9c1b-3f3a1d2b9e10";
/// assert_eq!(TraceId::adopt_or_generate(Some(upstream)).to_string(), upstream);
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a well-formed upstream id, otherwise mint a fresh one.
    pub fn adopt_or_generate(upstream: Option<&str>) -> Self {
        upstream
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Id of the request being served, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Await `fut` with `self` as the current id.
    pub async fn scope<Fut: Future>(self, fut: Fut) -> Fut::Output {
        CURRENT.scope(self, fut).await
    }

    /// Run a synchronous closure with `self` as the current id.
    pub fn run_sync<R>(self, f: impl FnOnce() -> R) -> R {
        CURRENT.sync_scope(self, f)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_sets_and_clears_current() {
        let id = TraceId::generate();

        assert_eq!(id.scope(async { TraceId::current() }).await, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    fn run_sync_exposes_id_to_closure() {
        let id = TraceId::generate();

        assert_eq!(id.run_sync(TraceId::current), Some(id));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("not-a-uuid"))]
    fn malformed_upstream_ids_are_replaced(#[case] upstream: Option<&str>) {
        let id = TraceId::adopt_or_generate(upstream);

        assert_ne!(Some(id.to_string().as_str()), upstream);
        assert!(id.to_string().parse::<TraceId>().is_ok());
    }

    #[rstest]
    fn upstream_id_is_trimmed_and_kept() {
        let id = TraceId::adopt_or_generate(Some(" 00000000-0000-0000-0000-000000000001 "));

        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
    }
}
