use std::time::{Duration, Instant};

pub const DEFAULT_HOVER_DELAY: Duration = Duration::from_millis(200);

/// Debounces hover changes before secondary effects such as scrolling a
/// legend. The clock is passed in so callers (and tests) control time.
#[derive(Debug, Clone)]
pub struct HoverDebouncer {
    delay: Duration,
    pending: Option<(Option<String>, Instant)>,
}

impl Default for HoverDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_DELAY)
    }
}

impl HoverDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a hover change, restarting the timer
    pub fn hover(&mut self, label: Option<String>, now: Instant) {
        self.pending = Some((label, now));
    }

    /// Label to settle on once the delay has elapsed without a newer hover.
    /// Fires at most once per hover.
    pub fn poll(&mut self, now: Instant) -> Option<Option<String>> {
        let (_, since) = self.pending.as_ref()?;
        if now.saturating_duration_since(*since) < self.delay {
            return None;
        }
        self.pending.take().map(|(label, _)| label)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending effect, e.g. when the view goes away
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
