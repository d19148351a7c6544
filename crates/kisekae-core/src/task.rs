//! Lifecycle of a single generation request.
//!
//! A [`GenerationTask`] moves `Idle -> InFlight -> Succeeded | Failed`,
//! and back from `Failed` to `InFlight` on a manual retry. Every start
//! hands out a [`Ticket`] stamped with the task's epoch. Tearing the
//! task down bumps the epoch, so a request that settles afterwards
//! presents a stale ticket and its result is dropped instead of being
//! written into state that has moved on.

use crate::asset::Asset;
use crate::gateway::GenerationError;

/// Observable state of a [`GenerationTask`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is outstanding.
    InFlight,
    /// The request produced an image.
    Succeeded(Asset),
    /// The request failed; a retry is possible.
    Failed(GenerationError),
}

impl TaskState {
    /// Returns `true` while a request is outstanding.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// The failure, if the last request failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&GenerationError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Proof of which invocation a settlement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    epoch: u64,
}

/// Illegal controller transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// Only one request may be in flight per task.
    #[error("a request is already in flight")]
    AlreadyInFlight,

    /// A succeeded task is finished; renew it first.
    #[error("the request already succeeded")]
    AlreadySucceeded,

    /// Retry needs a failed request to repeat.
    #[error("there is no failed request to retry")]
    NothingToRetry,
}

/// Controller for one generation attempt at a time.
#[derive(Debug, Default)]
pub struct GenerationTask {
    state: TaskState,
    epoch: u64,
}

impl GenerationTask {
    /// A fresh, idle task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &TaskState {
        &self.state
    }

    /// Returns `true` while a request is outstanding.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Whether `ticket` belongs to the outstanding request.
    #[must_use]
    pub const fn is_live(&self, ticket: Ticket) -> bool {
        self.state.is_in_flight() && ticket.epoch == self.epoch
    }

    /// Move from `Idle` or `Failed` to `InFlight`.
    ///
    /// # Errors
    ///
    /// [`TaskError::AlreadyInFlight`] while a request is outstanding and
    /// [`TaskError::AlreadySucceeded`] once one has succeeded.
    pub fn start(&mut self) -> Result<Ticket, TaskError> {
        match self.state {
            TaskState::InFlight => Err(TaskError::AlreadyInFlight),
            TaskState::Succeeded(_) => Err(TaskError::AlreadySucceeded),
            TaskState::Idle | TaskState::Failed(_) => Ok(self.launch()),
        }
    }

    /// Move from `Failed` back to `InFlight`.
    ///
    /// # Errors
    ///
    /// [`TaskError::NothingToRetry`] unless the last request failed.
    pub fn retry(&mut self) -> Result<Ticket, TaskError> {
        match self.state {
            TaskState::Failed(_) => Ok(self.launch()),
            _ => Err(TaskError::NothingToRetry),
        }
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket is
    /// stale.
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<Asset, GenerationError>) -> bool {
        if !self.is_live(ticket) {
            return false;
        }
        self.state = match outcome {
            Ok(asset) => TaskState::Succeeded(asset),
            Err(err) => TaskState::Failed(err),
        };
        true
    }

    /// Drop a displayed failure, returning to `Idle`.
    pub fn clear_failure(&mut self) {
        if matches!(self.state, TaskState::Failed(_)) {
            self.state = TaskState::Idle;
        }
    }

    /// Replace this task with a fresh one.
    ///
    /// Any outstanding request becomes stale; its eventual settlement is
    /// ignored.
    #[doc(alias = "renew")]
    pub fn teardown(&mut self) {
        self.epoch += 1;
        self.state = TaskState::Idle;
    }

    fn launch(&mut self) -> Ticket {
        self.epoch += 1;
        self.state = TaskState::InFlight;
        Ticket { epoch: self.epoch }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn image() -> Asset {
        Asset::new("image/png", "AAAA")
    }

    #[test]
    fn start_then_succeed() {
        let mut task = GenerationTask::new();
        let ticket = task.start().unwrap();
        assert!(task.is_in_flight());
        assert!(task.settle(ticket, Ok(image())));
        assert_eq!(task.state(), &TaskState::Succeeded(image()));
    }

    #[test]
    fn cannot_start_twice() {
        let mut task = GenerationTask::new();
        let _ticket = task.start().unwrap();
        assert_eq!(task.start(), Err(TaskError::AlreadyInFlight));
    }

    #[test]
    fn succeeded_is_terminal_until_teardown() {
        let mut task = GenerationTask::new();
        let ticket = task.start().unwrap();
        task.settle(ticket, Ok(image()));
        assert_eq!(task.start(), Err(TaskError::AlreadySucceeded));
        assert_eq!(task.retry(), Err(TaskError::NothingToRetry));

        task.teardown();
        assert!(task.start().is_ok());
    }

    #[test]
    fn failed_can_retry() {
        let mut task = GenerationTask::new();
        let first = task.start().unwrap();
        task.settle(first, Err(GenerationError::NoImageReturned));
        assert_eq!(
            task.state().failure(),
            Some(&GenerationError::NoImageReturned)
        );

        let second = task.retry().unwrap();
        assert_ne!(first, second);
        assert!(task.is_in_flight());
    }

    #[test]
    fn retry_requires_failure() {
        let mut task = GenerationTask::new();
        assert_eq!(task.retry(), Err(TaskError::NothingToRetry));
    }

    #[test]
    fn settlement_after_teardown_is_ignored() {
        let mut task = GenerationTask::new();
        let ticket = task.start().unwrap();
        task.teardown();

        assert!(!task.settle(ticket, Ok(image())));
        assert_eq!(task.state(), &TaskState::Idle);
    }

    #[test]
    fn settlement_from_previous_attempt_is_ignored() {
        let mut task = GenerationTask::new();
        let stale = task.start().unwrap();
        task.teardown();
        let current = task.start().unwrap();

        assert!(!task.settle(stale, Ok(image())));
        assert!(task.is_in_flight());
        assert!(task.settle(current, Err(GenerationError::NoImageReturned)));
    }

    #[test]
    fn second_settlement_is_ignored() {
        let mut task = GenerationTask::new();
        let ticket = task.start().unwrap();
        assert!(task.settle(ticket, Err(GenerationError::NoImageReturned)));
        assert!(!task.settle(ticket, Ok(image())));
        assert!(matches!(task.state(), TaskState::Failed(_)));
    }

    #[test]
    fn clear_failure_only_affects_failed() {
        let mut task = GenerationTask::new();
        let ticket = task.start().unwrap();
        task.clear_failure();
        assert!(task.is_in_flight());

        task.settle(ticket, Err(GenerationError::MissingCredential));
        task.clear_failure();
        assert_eq!(task.state(), &TaskState::Idle);
    }
}
