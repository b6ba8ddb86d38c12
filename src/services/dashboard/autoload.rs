//! Viewport-driven loading of the next page.
//!
//! The sentinel must stay visible for the linger period before a fetch is
//! triggered, and a short cooldown follows every fetch so scroll jitter near
//! the boundary cannot fire back-to-back requests.

use std::time::Duration;

use tokio::time::Instant;

pub const LINGER: Duration = Duration::from_millis(700);
pub const COOLDOWN: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoLoadState {
    Idle,
    /// Sentinel visible; waiting to see if it stays.
    Lingering { deadline: Instant },
    /// A triggered fetch has not resolved yet.
    Pending,
    /// Fetch resolved; triggers are held back until `until`.
    Cooldown { until: Instant },
}

/// Inputs the trigger decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConditions {
    pub sentinel_visible: bool,
    pub has_next_page: bool,
    pub fetching_next_page: bool,
}

impl LoadConditions {
    fn ready(&self) -> bool {
        self.sentinel_visible && self.has_next_page && !self.fetching_next_page
    }
}

#[derive(Debug, Clone)]
pub struct AutoLoader {
    linger: Duration,
    cooldown: Duration,
    state: AutoLoadState,
}

impl Default for AutoLoader {
    fn default() -> Self {
        Self::new(LINGER, COOLDOWN)
    }
}

impl AutoLoader {
    pub fn new(linger: Duration, cooldown: Duration) -> Self {
        Self {
            linger,
            cooldown,
            state: AutoLoadState::Idle,
        }
    }

    pub fn state(&self) -> AutoLoadState {
        self.state
    }

    /// Next instant at which [`Self::update`] has something to do.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            AutoLoadState::Lingering { deadline } => Some(deadline),
            AutoLoadState::Cooldown { until } => Some(until),
            AutoLoadState::Idle | AutoLoadState::Pending => None,
        }
    }

    /// Advances the machine; returns `true` when the next page should be
    /// fetched now.
    ///
    /// Call after every change to `conditions` and whenever
    /// [`Self::deadline`] passes.
    pub fn update(&mut self, now: Instant, conditions: LoadConditions) -> bool {
        if let AutoLoadState::Cooldown { until } = self.state {
            if now < until {
                return false;
            }
            self.state = AutoLoadState::Idle;
        }

        match self.state {
            AutoLoadState::Idle => {
                if conditions.ready() {
                    self.state = AutoLoadState::Lingering {
                        deadline: now + self.linger,
                    };
                }
                false
            }
            AutoLoadState::Lingering { deadline } => {
                if !conditions.sentinel_visible {
                    // Left the viewport before the linger elapsed.
                    self.state = AutoLoadState::Idle;
                    false
                } else if now < deadline {
                    false
                } else if conditions.ready() {
                    self.state = AutoLoadState::Pending;
                    true
                } else {
                    self.state = AutoLoadState::Idle;
                    false
                }
            }
            AutoLoadState::Pending | AutoLoadState::Cooldown { .. } => false,
        }
    }

    /// Marks the triggered fetch as settled, successful or not.
    pub fn fetch_settled(&mut self, now: Instant) {
        if self.state == AutoLoadState::Pending {
            self.state = AutoLoadState::Cooldown {
                until: now + self.cooldown,
            };
        }
    }

    /// Clears any armed timer.
    pub fn reset(&mut self) {
        self.state = AutoLoadState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    const VISIBLE: LoadConditions = LoadConditions {
        sentinel_visible: true,
        has_next_page: true,
        fetching_next_page: false,
    };

    const HIDDEN: LoadConditions = LoadConditions {
        sentinel_visible: false,
        ..VISIBLE
    };

    #[test]
    fn brief_visibility_triggers_nothing() {
        let start = Instant::now();
        let mut loader = AutoLoader::default();

        assert!(!loader.update(start, VISIBLE));
        assert_eq!(loader.deadline(), Some(start + ms(700)));
        assert!(!loader.update(start + ms(300), HIDDEN));
        assert_eq!(loader.state(), AutoLoadState::Idle);
        assert!(!loader.update(start + ms(800), HIDDEN));
        assert_eq!(loader.deadline(), None);
    }

    #[test]
    fn lingering_visibility_triggers_once() {
        let start = Instant::now();
        let mut loader = AutoLoader::default();

        loader.update(start, VISIBLE);
        assert!(!loader.update(start + ms(699), VISIBLE));
        assert!(loader.update(start + ms(700), VISIBLE));
        assert_eq!(loader.state(), AutoLoadState::Pending);

        // Still pending: nothing else fires no matter how long we wait.
        assert!(!loader.update(start + ms(5_000), VISIBLE));
    }

    #[test]
    fn cooldown_holds_off_the_next_trigger() {
        let start = Instant::now();
        let mut loader = AutoLoader::default();
        loader.update(start, VISIBLE);
        assert!(loader.update(start + ms(700), VISIBLE));

        let resolved = start + ms(900);
        loader.fetch_settled(resolved);
        assert_eq!(loader.deadline(), Some(resolved + ms(100)));
        assert!(!loader.update(resolved + ms(50), VISIBLE));

        // Cooldown over; sentinel still visible so the linger re-arms.
        assert!(!loader.update(resolved + ms(100), VISIBLE));
        assert_eq!(
            loader.state(),
            AutoLoadState::Lingering {
                deadline: resolved + ms(800)
            }
        );
        assert!(loader.update(resolved + ms(800), VISIBLE));
    }

    #[test]
    fn conditions_are_rechecked_when_linger_ends() {
        let start = Instant::now();
        let mut loader = AutoLoader::default();
        loader.update(start, VISIBLE);

        let busy = LoadConditions {
            fetching_next_page: true,
            ..VISIBLE
        };
        assert!(!loader.update(start + ms(700), busy));
        assert_eq!(loader.state(), AutoLoadState::Idle);
    }

    #[test]
    fn nothing_arms_without_a_next_page() {
        let start = Instant::now();
        let mut loader = AutoLoader::default();
        let exhausted = LoadConditions {
            has_next_page: false,
            ..VISIBLE
        };
        assert!(!loader.update(start, exhausted));
        assert_eq!(loader.state(), AutoLoadState::Idle);
    }

    #[test]
    fn settling_without_a_trigger_is_ignored() {
        let start = Instant::now();
        let mut loader = AutoLoader::default();
        loader.fetch_settled(start);
        assert_eq!(loader.state(), AutoLoadState::Idle);
    }
}
