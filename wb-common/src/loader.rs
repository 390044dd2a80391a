//! Per-image load state and the capabilities used to load images
//!
//! Stale completions are filtered with a ticket: every `begin`/`retry`
//! bumps the attempt counter, and only a ticket from the current attempt
//! for the current `src` may settle the state.

use crate::error::LoadError;
use crate::timer::Sleeper;
use async_trait::async_trait;
use futures::future::{select, Either};
use std::time::Duration;

/// Result of asking the platform whether an image is already decoded/cached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub cached: bool,
}

/// Synchronous "is this already in the image cache" check
pub trait ImageProbe {
    fn check(&self, uri: &str) -> ProbeResult;
}

/// Loads one image. No cancellation; callers drop the future or ignore it.
#[async_trait(?Send)]
pub trait ImageFetcher {
    async fn fetch(&self, uri: &str) -> Result<(), LoadError>;
}

/// Fetch with an upper bound. A hung request becomes `LoadError::Timeout`,
/// never a permanent spinner.
pub async fn load_with_timeout<F, S>(
    fetcher: &F,
    sleeper: &S,
    uri: &str,
    timeout: Duration,
) -> Result<(), LoadError>
where
    F: ImageFetcher + ?Sized,
    S: Sleeper + ?Sized,
{
    match select(fetcher.fetch(uri), sleeper.sleep(timeout)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(LoadError::Timeout {
            src: uri.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Load state of one displayed image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageLoadState {
    #[default]
    Loading,
    Loaded,
    Error(LoadError),
}

impl ImageLoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ImageLoadState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ImageLoadState::Error(_))
    }
}

/// Identifies one load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub src: String,
    pub attempt: u64,
}

/// Loading → Loaded | Error, per attempt, with manual retry.
///
/// A lazy image sits in Loading without a request until it nears the
/// viewport. The timeout only runs against a requested attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageLoadTracker {
    src: String,
    state: ImageLoadState,
    attempt: u64,
    retries: u32,
    requested: bool,
}

impl ImageLoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start showing `src`. Skips straight to Loaded if the probe says the
    /// image is already cached, so no placeholder flashes.
    pub fn begin(&mut self, src: &str, probe: &dyn ImageProbe) -> LoadTicket {
        self.begin_with(src, probe, true)
    }

    /// Like `begin`, for an element the browser fetches only once it nears
    /// the viewport. Call `mark_requested` when that happens.
    pub fn begin_lazy(&mut self, src: &str, probe: &dyn ImageProbe) -> LoadTicket {
        self.begin_with(src, probe, false)
    }

    fn begin_with(&mut self, src: &str, probe: &dyn ImageProbe, requested: bool) -> LoadTicket {
        self.src = src.to_string();
        self.attempt += 1;
        self.retries = 0;
        self.requested = requested;
        self.state = if probe.check(src).cached {
            ImageLoadState::Loaded
        } else {
            ImageLoadState::Loading
        };
        self.ticket()
    }

    /// Re-request the current `src` after an error. The user is looking at
    /// the image, so the request starts right away.
    pub fn retry(&mut self) -> LoadTicket {
        self.attempt += 1;
        self.retries += 1;
        self.requested = true;
        self.state = ImageLoadState::Loading;
        self.ticket()
    }

    /// Record that the browser started fetching a lazy attempt. Returns
    /// true only on the transition, when the caller should start its timer.
    pub fn mark_requested(&mut self, ticket: &LoadTicket) -> bool {
        if self.requested || !self.accepts(ticket) {
            return false;
        }
        self.requested = true;
        true
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Whether a timer for this ticket may still fail it. Never true before
    /// the request started.
    pub fn can_time_out(&self, ticket: &LoadTicket) -> bool {
        self.requested && self.accepts(ticket)
    }

    /// Whether `complete` would accept this ticket right now
    pub fn accepts(&self, ticket: &LoadTicket) -> bool {
        self.is_current(ticket) && self.state.is_loading()
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.attempt == self.attempt && ticket.src == self.src
    }

    /// A request that outlived its timeout but then arrived
    fn is_late_success(&self, ticket: &LoadTicket, result: &Result<(), LoadError>) -> bool {
        result.is_ok()
            && self.is_current(ticket)
            && matches!(&self.state, ImageLoadState::Error(e) if e.is_timeout())
    }

    /// Settle an attempt. Returns false (and changes nothing) for stale
    /// tickets or attempts that already settled. A success for the current
    /// attempt still replaces a timeout error.
    pub fn complete(&mut self, ticket: &LoadTicket, result: Result<(), LoadError>) -> bool {
        if !self.accepts(ticket) && !self.is_late_success(ticket, &result) {
            return false;
        }
        self.state = match result {
            Ok(()) => ImageLoadState::Loaded,
            Err(e) => ImageLoadState::Error(e),
        };
        true
    }

    /// Ticket of the current attempt
    pub fn ticket(&self) -> LoadTicket {
        LoadTicket {
            src: self.src.clone(),
            attempt: self.attempt,
        }
    }

    pub fn state(&self) -> &ImageLoadState {
        &self.state
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Changes on every retry; use as the element key to force a re-request.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Probe(HashSet<String>);

    impl ImageProbe for Probe {
        fn check(&self, uri: &str) -> ProbeResult {
            ProbeResult {
                cached: self.0.contains(uri),
            }
        }
    }

    fn cold() -> Probe {
        Probe(HashSet::new())
    }

    fn network(src: &str) -> LoadError {
        LoadError::Network { src: src.into() }
    }

    #[test]
    fn test_begin_uncached_is_loading() {
        let mut t = ImageLoadTracker::new();
        let ticket = t.begin("a.jpg", &cold());
        assert_eq!(t.state(), &ImageLoadState::Loading);
        assert!(t.complete(&ticket, Ok(())));
        assert_eq!(t.state(), &ImageLoadState::Loaded);
    }

    #[test]
    fn test_begin_cached_skips_loading() {
        let mut t = ImageLoadTracker::new();
        let probe = Probe(HashSet::from(["a.jpg".to_string()]));
        let ticket = t.begin("a.jpg", &probe);
        assert_eq!(t.state(), &ImageLoadState::Loaded);
        // Late onload from the element changes nothing
        assert!(!t.complete(&ticket, Ok(())));
    }

    #[test]
    fn test_error_then_retry_then_loaded() {
        let mut t = ImageLoadTracker::new();
        let first = t.begin("404.jpg", &cold());
        assert!(t.complete(&first, Err(network("404.jpg"))));
        assert!(t.state().is_error());

        let second = t.retry();
        assert_eq!(t.state(), &ImageLoadState::Loading);
        assert_eq!(t.retries(), 1);
        assert!(t.attempt() > first.attempt);

        assert!(t.complete(&second, Ok(())));
        assert_eq!(t.state(), &ImageLoadState::Loaded);
    }

    #[test]
    fn test_stale_attempt_ignored() {
        let mut t = ImageLoadTracker::new();
        let first = t.begin("a.jpg", &cold());
        t.complete(&first, Err(network("a.jpg")));
        let second = t.retry();

        // The first attempt's element reports late
        assert!(!t.complete(&first, Ok(())));
        assert_eq!(t.state(), &ImageLoadState::Loading);
        assert!(t.complete(&second, Err(network("a.jpg"))));
    }

    #[test]
    fn test_src_change_drops_old_completion() {
        let mut t = ImageLoadTracker::new();
        let a = t.begin("a.jpg", &cold());
        let b = t.begin("b.jpg", &cold());
        assert!(!t.complete(&a, Err(network("a.jpg"))));
        assert_eq!(t.state(), &ImageLoadState::Loading);
        assert!(t.complete(&b, Ok(())));
    }

    #[test]
    fn test_same_src_reopened_ignores_previous_attempt() {
        let mut t = ImageLoadTracker::new();
        let old = t.begin("a.jpg", &cold());
        t.begin("b.jpg", &cold());
        t.begin("a.jpg", &cold());
        assert!(!t.complete(&old, Ok(())));
    }

    #[test]
    fn test_settled_attempt_is_monotonic() {
        let mut t = ImageLoadTracker::new();
        let ticket = t.begin("a.jpg", &cold());
        assert!(t.accepts(&ticket));
        assert!(t.complete(&ticket, Ok(())));
        assert!(!t.accepts(&ticket));
        assert!(!t.complete(&ticket, Err(network("a.jpg"))));
        assert_eq!(t.state(), &ImageLoadState::Loaded);
    }

    fn timeout(src: &str) -> LoadError {
        LoadError::Timeout {
            src: src.into(),
            timeout_ms: 10_000,
        }
    }

    #[test]
    fn test_lazy_attempt_cannot_time_out_before_request() {
        let mut t = ImageLoadTracker::new();
        let ticket = t.begin_lazy("far-below.jpg", &cold());
        assert_eq!(t.state(), &ImageLoadState::Loading);
        assert!(!t.is_requested());
        assert!(!t.can_time_out(&ticket));

        // Scrolled into view: the timer may start now, and only once
        assert!(t.mark_requested(&ticket));
        assert!(!t.mark_requested(&ticket));
        assert!(t.can_time_out(&ticket));
    }

    #[test]
    fn test_eager_attempt_is_requested_at_once() {
        let mut t = ImageLoadTracker::new();
        let ticket = t.begin("hero.jpg", &cold());
        assert!(t.is_requested());
        assert!(t.can_time_out(&ticket));
        assert!(!t.mark_requested(&ticket));
    }

    #[test]
    fn test_mark_requested_ignores_stale_ticket() {
        let mut t = ImageLoadTracker::new();
        let old = t.begin_lazy("a.jpg", &cold());
        let current = t.begin_lazy("b.jpg", &cold());
        assert!(!t.mark_requested(&old));
        assert!(!t.is_requested());
        assert!(t.mark_requested(&current));
    }

    #[test]
    fn test_retry_of_lazy_image_is_requested() {
        let mut t = ImageLoadTracker::new();
        let first = t.begin_lazy("a.jpg", &cold());
        t.mark_requested(&first);
        t.complete(&first, Err(network("a.jpg")));
        let second = t.retry();
        assert!(t.can_time_out(&second));
    }

    #[test]
    fn test_late_load_replaces_timeout() {
        let mut t = ImageLoadTracker::new();
        let ticket = t.begin("slow.jpg", &cold());
        assert!(t.complete(&ticket, Err(timeout("slow.jpg"))));
        assert!(!t.can_time_out(&ticket));

        assert!(t.complete(&ticket, Ok(())));
        assert_eq!(t.state(), &ImageLoadState::Loaded);
    }

    #[test]
    fn test_late_load_does_not_replace_network_error_or_cross_attempts() {
        let mut t = ImageLoadTracker::new();
        let first = t.begin("a.jpg", &cold());
        t.complete(&first, Err(network("a.jpg")));
        assert!(!t.complete(&first, Ok(())));
        assert!(t.state().is_error());

        let second = t.retry();
        t.complete(&second, Err(timeout("a.jpg")));
        assert!(!t.complete(&first, Ok(())));
        assert!(t.state().is_error());
    }
}
