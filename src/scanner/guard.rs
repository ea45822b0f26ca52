//! Duplicate-scan guard: single-flight admission for scan submissions.
//!
//! An explicit two-state machine (`Idle → Submitting → Idle`) guards the
//! decode callback. Admission is keyed on in-flight state plus the last
//! submitted payload, not on wall-clock debouncing: a decode is rejected
//! while a submission is outstanding, and the exact payload that was just
//! submitted is rejected until something different is scanned or the guard
//! is reset. The guard always returns to `Idle` after any outcome, success
//! or error, so the scanner can never wedge.

#[derive(Debug, Clone, PartialEq, Eq)]
enum GuardState {
    Idle,
    Submitting { payload: String },
}

#[derive(Debug)]
pub struct ScanGuard {
    state: GuardState,
    last_submitted: Option<String>,
}

impl ScanGuard {
    pub fn new() -> Self {
        Self {
            state: GuardState::Idle,
            last_submitted: None,
        }
    }

    /// Try to admit a decoded payload for submission.
    ///
    /// Returns true and transitions to `Submitting` when the payload may be
    /// sent; false when a submission is already in flight or the payload
    /// repeats the one just submitted.
    pub fn admit(&mut self, payload: &str) -> bool {
        if matches!(self.state, GuardState::Submitting { .. }) {
            return false;
        }
        if self.last_submitted.as_deref() == Some(payload) {
            return false;
        }

        self.state = GuardState::Submitting {
            payload: payload.to_string(),
        };
        true
    }

    /// Record that the in-flight submission resolved (success OR error) and
    /// release the single-flight lock. Must be called on every outcome.
    pub fn complete(&mut self) {
        if let GuardState::Submitting { payload } =
            std::mem::replace(&mut self.state, GuardState::Idle)
        {
            self.last_submitted = Some(payload);
        }
    }

    /// Forget the last payload so the same code may be resubmitted, used by
    /// the "try again" path after a retryable error.
    pub fn reset(&mut self) {
        self.state = GuardState::Idle;
        self.last_submitted = None;
    }

    pub fn is_idle(&self) -> bool {
        self.state == GuardState::Idle
    }
}

impl Default for ScanGuard {
    fn default() -> Self {
        Self::new()
    }
}
