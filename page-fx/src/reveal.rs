//! One-shot reveal-on-scroll bookkeeping.
//!
//! The visibility observer owns the threshold: it only calls back when an
//! element crosses it, so a report that says "intersecting" is enough to
//! reveal.

/// Lifecycle of a revealable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Registered with the visibility observer, not yet shown.
    Observed,
    /// Shown and unobserved. Terminal.
    Revealed,
}

/// Tracks every revealable element on the page by position.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    states: Vec<RevealState>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self {
            states: vec![RevealState::Observed; count],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<RevealState> {
        self.states.get(index).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == RevealState::Revealed)
            .count()
    }

    /// Feed one observer report. Returns `true` exactly once per element:
    /// the first time it is reported as intersecting. The caller then adds
    /// the visible class and unobserves it.
    pub fn report(&mut self, index: usize, is_intersecting: bool) -> bool {
        let Some(state) = self.states.get_mut(index) else {
            return false;
        };
        if *state == RevealState::Revealed || !is_intersecting {
            return false;
        }
        *state = RevealState::Revealed;
        true
    }
}
