//! Page-growth stagnation detection
//!
//! Page height is the proxy for feed exhaustion: when scrolling stops
//! producing taller pages, the feed has run out. A single flat measurement
//! can be a transient render delay, so end-of-feed is only signaled after
//! `STALL_LIMIT` consecutive no-growth measurements.

/// Consecutive no-change measurements before end-of-feed is signaled
pub const STALL_LIMIT: u32 = 3;

/// Per-run scroll state, updated once per loop iteration
#[derive(Debug)]
pub struct ScrollState {
    last_height: i64,
    no_change_streak: u32,
}

impl ScrollState {
    /// Initialize from the page's initial measured height
    pub fn new(initial_height: i64) -> Self {
        Self {
            last_height: initial_height,
            no_change_streak: 0,
        }
    }

    /// Record a new height measurement; returns true when the feed is done
    ///
    /// An exactly-equal measurement extends the streak; any change resets
    /// it. The new height always becomes the baseline for the next round.
    pub fn update(&mut self, new_height: i64) -> bool {
        if new_height == self.last_height {
            self.no_change_streak += 1;
        } else {
            self.no_change_streak = 0;
        }
        self.last_height = new_height;
        self.no_change_streak >= STALL_LIMIT
    }

    /// Current no-change streak
    pub fn streak(&self) -> u32 {
        self.no_change_streak
    }

    /// Last recorded height
    pub fn last_height(&self) -> i64 {
        self.last_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_counts_consecutive_stalls() {
        let mut state = ScrollState::new(150);
        assert!(!state.update(150));
        assert_eq!(state.streak(), 1);
        assert!(!state.update(150));
        assert_eq!(state.streak(), 2);
        assert!(state.update(150));
        assert_eq!(state.streak(), 3);
    }

    #[test]
    fn test_growth_resets_streak() {
        let mut state = ScrollState::new(100);
        assert!(!state.update(100));
        assert!(!state.update(100));
        assert_eq!(state.streak(), 2);
        assert!(!state.update(150));
        assert_eq!(state.streak(), 0);
        assert_eq!(state.last_height(), 150);
    }

    #[test]
    fn test_shrink_also_resets_streak() {
        // Any change counts as movement, not just growth.
        let mut state = ScrollState::new(200);
        assert!(!state.update(200));
        assert!(!state.update(180));
        assert_eq!(state.streak(), 0);
    }

    #[test]
    fn test_single_stall_not_terminal() {
        let mut state = ScrollState::new(100);
        assert!(!state.update(100));
        assert!(!state.update(200));
        assert!(!state.update(200));
        assert!(!state.update(200));
        // Third consecutive stall after the last growth.
        assert!(state.update(200));
    }

    #[test]
    fn test_baseline_always_advances() {
        let mut state = ScrollState::new(100);
        state.update(120);
        assert_eq!(state.last_height(), 120);
        state.update(120);
        assert_eq!(state.last_height(), 120);
        state.update(90);
        assert_eq!(state.last_height(), 90);
    }
}
