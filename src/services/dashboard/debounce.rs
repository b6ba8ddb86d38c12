//! Search-input debouncing.

use std::time::Duration;

use tokio::time::Instant;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Holds the live search input until it has been quiet for the window.
#[derive(Debug, Clone)]
pub struct SearchDebounce {
    window: Duration,
    term: String,
    committed: String,
    deadline: Option<Instant>,
}

impl SearchDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            term: String::new(),
            committed: String::new(),
            deadline: None,
        }
    }

    /// Live input value.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Last value released to the backend filters.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Records a keystroke and restarts the window.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.term = term.into();
        self.deadline = Some(now + self.window);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Releases the live value once the window has elapsed.
    ///
    /// Returns the new committed term only when it differs from the previous
    /// one, so re-typing the same text does not restart pagination.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.term == self.committed {
                    None
                } else {
                    self.committed = self.term.clone();
                    Some(self.committed.clone())
                }
            }
            _ => None,
        }
    }

    /// Drops a pending commit.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rapid_typing_commits_once_with_last_value() {
        let start = Instant::now();
        let mut debounce = SearchDebounce::default();
        let mut commits = Vec::new();

        for (offset, term) in [(0, "a"), (120, "ab"), (250, "abc")] {
            let now = start + ms(offset);
            commits.extend(debounce.poll(now));
            debounce.input(term, now);
        }

        commits.extend(debounce.poll(start + ms(600)));
        assert!(commits.is_empty(), "committed while still typing");
        assert_eq!(debounce.committed(), "");

        commits.extend(debounce.poll(start + ms(650)));
        commits.extend(debounce.poll(start + ms(2_000)));
        assert_eq!(commits, vec!["abc".to_string()]);
        assert_eq!(debounce.term(), "abc");
        assert_eq!(debounce.deadline(), None);
    }

    #[test]
    fn same_value_does_not_commit_again() {
        let start = Instant::now();
        let mut debounce = SearchDebounce::default();
        debounce.input("smith", start);
        assert_eq!(debounce.poll(start + ms(400)), Some("smith".into()));

        debounce.input("smit", start + ms(500));
        debounce.input("smith", start + ms(550));
        assert_eq!(debounce.poll(start + ms(950)), None);
        assert_eq!(debounce.committed(), "smith");
    }

    #[test]
    fn clearing_the_input_commits_empty() {
        let start = Instant::now();
        let mut debounce = SearchDebounce::default();
        debounce.input("x", start);
        debounce.poll(start + ms(400));
        debounce.input("", start + ms(500));
        assert_eq!(debounce.poll(start + ms(900)), Some(String::new()));
    }

    #[test]
    fn cancel_drops_pending_commit() {
        let start = Instant::now();
        let mut debounce = SearchDebounce::default();
        debounce.input("abc", start);
        debounce.cancel();
        assert_eq!(debounce.poll(start + ms(1_000)), None);
    }
}
