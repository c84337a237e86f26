//! Virtual-time timer queue.
//!
//! Nothing here reads a clock: callers pass `now` in and pull due events out,
//! so the browser runtime and the tests drive time the same way.

/// Milliseconds on the caller's clock.
pub type Millis = u64;

/// Handle for cancelling a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Scheduled<E> {
    token: TimerToken,
    due: Millis,
    event: E,
}

#[derive(Debug)]
pub struct Timers<E> {
    next_token: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self {
            next_token: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Millis, delay: Millis, event: E) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Scheduled {
            token,
            due: now.saturating_add(delay),
            event,
        });
        token
    }

    /// Returns false if the token already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.token != token);
        self.pending.len() != before
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|s| s.token == token)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.pending.iter().map(|s| s.due).min()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest event due at or before `now`.
    ///
    /// Events sharing a due time come out in scheduling order.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerToken, E)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= now)
            .min_by_key(|(_, s)| (s.due, s.token))
            .map(|(i, _)| i)?;
        let fired = self.pending.swap_remove(index);
        Some((fired.token, fired.event))
    }
}
