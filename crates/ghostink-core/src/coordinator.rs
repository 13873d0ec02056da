//! Debounce and request coordination
//!
//! Gates how often a completion request goes out given a stream of edit
//! events. A pure state machine over injected instants: the session owns
//! the actual tokio timer and feeds `Instant::now()` in, which keeps every
//! window decision deterministic under test.

use std::time::{Duration, Instant};

use tracing::debug;

use ghostink_config::Settings;

/// Decision taken when the armed deadline elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireDecision {
    /// Issue exactly one request, stamped with this generation
    Fire { generation: u64 },
    /// Cycle dropped silently (no typing flag, or pause not reached)
    Drop,
    /// Deadline not reached yet
    Wait,
}

/// Transient request-window state for the active surface
///
/// Invariant: a request only fires while `typed_since_completion` is set;
/// accepting or dismissing a suggestion clears it. Responses are only
/// honored for the generation currently in flight.
#[derive(Debug)]
pub struct DebounceCoordinator {
    window: Duration,
    wait_for_pause: bool,
    last_edit: Option<Instant>,
    deadline: Option<Instant>,
    typed_since_completion: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl DebounceCoordinator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            window: settings.debounce_window(),
            wait_for_pause: settings.wait_for_pause,
            last_edit: None,
            deadline: None,
            typed_since_completion: true,
            generation: 0,
            in_flight: None,
        }
    }

    /// Record one qualifying edit and (re)arm the deadline
    pub fn note_edit(&mut self, now: Instant) {
        self.typed_since_completion = true;
        self.last_edit = Some(now);
        self.deadline = Some(now + self.window);
    }

    /// The armed deadline, if any, for the session's timer
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn typed_since_completion(&self) -> bool {
        self.typed_since_completion
    }

    /// Evaluate the window once the deadline elapses
    pub fn fire_due(&mut self, now: Instant) -> FireDecision {
        let deadline = match self.deadline {
            Some(deadline) => deadline,
            None => return FireDecision::Wait,
        };
        if now < deadline {
            return FireDecision::Wait;
        }
        self.deadline = None;

        if !self.typed_since_completion {
            debug!("dropping request cycle: nothing typed since last completion");
            return FireDecision::Drop;
        }
        if self.wait_for_pause {
            let quiet = self
                .last_edit
                .map(|last| now.duration_since(last) >= self.window)
                .unwrap_or(true);
            if !quiet {
                debug!("dropping request cycle: still typing within pause window");
                return FireDecision::Drop;
            }
        }
        FireDecision::Fire {
            generation: self.next_generation(),
        }
    }

    /// Force a request outside the debounce window (regenerate)
    pub fn force_fire(&mut self) -> u64 {
        self.deadline = None;
        self.typed_since_completion = true;
        self.next_generation()
    }

    /// Whether a response for `generation` is still current
    ///
    /// Stale generations — superseded by a newer request or orphaned by a
    /// cancel — are discarded rather than applied out of order.
    pub fn is_response_current(&self, generation: u64) -> bool {
        self.in_flight == Some(generation)
    }

    /// Mark the in-flight request as answered
    pub fn complete_response(&mut self, generation: u64) {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }
    }

    /// Clear the typing flag after an accept or dismiss
    pub fn clear_typed(&mut self) {
        self.typed_since_completion = false;
    }

    /// Synchronously cancel the armed deadline and orphan any in-flight
    /// request; its eventual response becomes stale
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.in_flight = None;
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(debounce_ms: u64, wait_for_pause: bool) -> Settings {
        Settings {
            debounce_time_ms: debounce_ms,
            wait_for_pause,
            ..Settings::default()
        }
    }

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_fires_after_window() {
        let base = Instant::now();
        let mut coordinator = DebounceCoordinator::new(&settings(300, false));
        coordinator.note_edit(base);
        assert_eq!(coordinator.fire_due(at(base, 100)), FireDecision::Wait);
        assert_eq!(
            coordinator.fire_due(at(base, 300)),
            FireDecision::Fire { generation: 1 }
        );
        // Deadline consumed; nothing further fires
        assert_eq!(coordinator.fire_due(at(base, 400)), FireDecision::Wait);
    }

    #[test]
    fn test_edit_rearms_deadline() {
        let base = Instant::now();
        let mut coordinator = DebounceCoordinator::new(&settings(300, false));
        coordinator.note_edit(base);
        coordinator.note_edit(at(base, 200));
        assert_eq!(coordinator.fire_due(at(base, 300)), FireDecision::Wait);
        assert!(matches!(
            coordinator.fire_due(at(base, 500)),
            FireDecision::Fire { .. }
        ));
    }

    #[test]
    fn test_cleared_flag_drops_cycle() {
        let base = Instant::now();
        let mut coordinator = DebounceCoordinator::new(&settings(300, false));
        coordinator.note_edit(base);
        coordinator.clear_typed();
        assert_eq!(coordinator.fire_due(at(base, 300)), FireDecision::Drop);
    }

    #[test]
    fn test_wait_for_pause_drops_when_typing_continued() {
        let base = Instant::now();
        let mut coordinator = DebounceCoordinator::new(&settings(300, true));
        coordinator.note_edit(base);
        // Simulate a late edit that did not re-arm (window already fired)
        coordinator.last_edit = Some(at(base, 200));
        assert_eq!(coordinator.fire_due(at(base, 300)), FireDecision::Drop);
    }

    #[test]
    fn test_stale_generation_discarded() {
        let base = Instant::now();
        let mut coordinator = DebounceCoordinator::new(&settings(300, false));
        coordinator.note_edit(base);
        let first = match coordinator.fire_due(at(base, 300)) {
            FireDecision::Fire { generation } => generation,
            other => panic!("expected fire, got {other:?}"),
        };
        // A newer request supersedes the first before it answers
        coordinator.note_edit(at(base, 400));
        let second = match coordinator.fire_due(at(base, 700)) {
            FireDecision::Fire { generation } => generation,
            other => panic!("expected fire, got {other:?}"),
        };
        assert!(!coordinator.is_response_current(first));
        assert!(coordinator.is_response_current(second));
    }

    #[test]
    fn test_cancel_orphans_in_flight() {
        let base = Instant::now();
        let mut coordinator = DebounceCoordinator::new(&settings(300, false));
        coordinator.note_edit(base);
        let generation = match coordinator.fire_due(at(base, 300)) {
            FireDecision::Fire { generation } => generation,
            other => panic!("expected fire, got {other:?}"),
        };
        coordinator.cancel();
        assert!(!coordinator.is_response_current(generation));
        assert!(coordinator.deadline().is_none());
    }

    #[test]
    fn test_force_fire_bypasses_window() {
        let mut coordinator = DebounceCoordinator::new(&settings(300, false));
        coordinator.clear_typed();
        let generation = coordinator.force_fire();
        assert!(coordinator.is_response_current(generation));
        assert!(coordinator.typed_since_completion());
    }
}
