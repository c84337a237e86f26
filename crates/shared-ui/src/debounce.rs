use crate::timers::{Millis, TimerToken, Timers};

/// Quiet period before a typed query is searched.
pub const SEARCH_DEBOUNCE_MS: Millis = 500;

/// Single-slot coalescing timer.
///
/// Every trigger cancels the pending call and schedules a new one, so only
/// the last event of a burst fires. Nothing is queued.
#[derive(Debug)]
pub struct Debouncer {
    delay: Millis,
    pending: Option<TimerToken>,
}

impl Debouncer {
    pub fn new(delay: Millis) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn trigger<E>(&mut self, timers: &mut Timers<E>, now: Millis, event: E) -> TimerToken {
        self.cancel(timers);
        let token = timers.schedule(now, self.delay, event);
        self.pending = Some(token);
        token
    }

    pub fn cancel<E>(&mut self, timers: &mut Timers<E>) {
        if let Some(token) = self.pending.take() {
            timers.cancel(token);
        }
    }

    /// Mark `token` as fired. Returns false for tokens this debouncer no
    /// longer owns.
    pub fn settle(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE_MS)
    }
}
