use crate::{error::Error, provider};

/// Terminal states of a single write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
  Confirmed,
  Rejected,
  Reverted,
  TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
  #[default]
  Idle,
  Submitting,
}

/// Tracks one submit control through `idle -> submitting -> terminal`.
///
/// A submission can only begin from idle, which is what keeps a button
/// disabled for the duration of its own in-flight call and swallows
/// duplicate clicks. Terminal states return the control to idle; only
/// [`SubmitOutcome::Confirmed`] should make the caller refresh campaign
/// data, so locally cached campaigns never reflect unconfirmed writes.
#[derive(Debug, Default)]
pub struct Submission {
  state: SubmitState,
  last_outcome: Option<SubmitOutcome>,
}

impl Submission {
  /// Attempts to transition idle -> submitting. Returns false while a
  /// call is already in flight.
  pub fn begin(&mut self) -> bool {
    match self.state {
      SubmitState::Idle => {
        self.state = SubmitState::Submitting;
        true
      }
      SubmitState::Submitting => false,
    }
  }

  /// Records the terminal outcome and returns the control to idle.
  pub fn finish(&mut self, outcome: SubmitOutcome) {
    self.state = SubmitState::Idle;
    self.last_outcome = Some(outcome);
  }

  pub fn in_flight(&self) -> bool {
    self.state == SubmitState::Submitting
  }

  pub fn state(&self) -> SubmitState {
    self.state
  }

  pub fn last_outcome(&self) -> Option<SubmitOutcome> {
    self.last_outcome
  }
}

/// Maps the result of a write operation onto its terminal state.
///
/// Failures that never reached the chain (validation, missing session,
/// declined signing) count as rejected; reverts and provider timeouts
/// keep their own states.
pub fn outcome_of<T>(result: &Result<T, Error>) -> SubmitOutcome {
  match result {
    Ok(_) => SubmitOutcome::Confirmed,
    Err(Error::TransactionFailed(provider::Error::Reverted(_))) => {
      SubmitOutcome::Reverted
    }
    Err(Error::TransactionFailed(provider::Error::Timeout)) => {
      SubmitOutcome::TimedOut
    }
    Err(_) => SubmitOutcome::Rejected,
  }
}
