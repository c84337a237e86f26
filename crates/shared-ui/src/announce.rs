use crate::timers::{Millis, Timers};

/// Delay between clearing the live region and writing the message.
pub const ANNOUNCE_SET_DELAY_MS: Millis = 100;
/// How long a message stays in the live region.
pub const ANNOUNCE_HOLD_MS: Millis = 2_000;

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Set(String),
    Clear,
}

/// Screen-reader live region text.
///
/// Each announcement clears the region, writes the message after a short
/// delay and clears it again later, so repeating the same text still
/// triggers assistive technology.
#[derive(Debug, Default)]
pub struct Announcer {
    text: String,
    timers: Timers<Step>,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn announce(&mut self, now: Millis, message: impl Into<String>) {
        self.timers.clear();
        self.text.clear();
        self.timers
            .schedule(now, ANNOUNCE_SET_DELAY_MS, Step::Set(message.into()));
        self.timers
            .schedule(now, ANNOUNCE_SET_DELAY_MS + ANNOUNCE_HOLD_MS, Step::Clear);
    }

    /// Apply due steps. Returns true if the text changed.
    pub fn advance(&mut self, now: Millis) -> bool {
        let mut changed = false;
        while let Some((_, step)) = self.timers.pop_due(now) {
            match step {
                Step::Set(message) => self.text = message,
                Step::Clear => self.text.clear(),
            }
            changed = true;
        }
        changed
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }
}
