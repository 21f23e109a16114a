//! Donation state machine.
//!
//! The machine owns the purse balance, the processing flag and the donation
//! history. All changes go through the pure [`reduce`] function; the machine
//! itself only decides *whether* a transition may happen.
//!
//! A submission is split in two halves so callers can await the simulated
//! processing delay without holding anything but the ticket:
//! [`DonationMachine::start`] guards and enters `Processing`,
//! [`DonationMachine::commit`] applies the donation and returns to `Idle`.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::Dollars;
use crate::model::{DonationCandidate, Transaction};

mod state;
pub use state::DonationState;

mod error;
pub use error::SubmitError;

/// Balance every new purse starts with.
pub const OPENING_BALANCE: Dollars = Dollars::new(200);

/// Fixed time a donation spends in `Processing`.
pub const PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Transitions understood by [`reduce`].
#[derive(Debug, Clone)]
pub enum Action {
    SetProcessing(bool),
    /// Deduct the amount and prepend the record to history.
    Commit(Transaction),
}

/// Pure transition function: `(state, action) -> state`.
///
/// `Commit` assumes the amount was checked against the balance; an overdraft
/// here is a caller bug and leaves the balance at zero rather than wrapping.
pub fn reduce(mut state: DonationState, action: Action) -> DonationState {
    match action {
        Action::SetProcessing(flag) => {
            state.is_processing = flag;
        }
        Action::Commit(tx) => {
            debug_assert!(tx.amount() <= state.purse_balance);
            state.purse_balance = state
                .purse_balance
                .checked_sub(tx.amount())
                .unwrap_or(Dollars::ZERO);
            state.transactions.push_front(tx);
        }
    }
    state
}

/// A candidate that passed the guard. Can only be committed once.
#[derive(Debug)]
#[must_use = "a started donation must be committed"]
pub struct PendingDonation {
    candidate: DonationCandidate,
}

impl PendingDonation {
    pub fn candidate(&self) -> &DonationCandidate {
        &self.candidate
    }
}

/// Guards submissions and applies them through [`reduce`].
#[derive(Debug, Default)]
pub struct DonationMachine {
    state: DonationState,
}

impl DonationMachine {
    pub fn new() -> Self {
        Self::with_balance(OPENING_BALANCE)
    }

    pub fn with_balance(opening_balance: Dollars) -> Self {
        Self {
            state: DonationState::new(opening_balance),
        }
    }

    pub fn state(&self) -> &DonationState {
        &self.state
    }

    /// Whether a new submission could currently pass the guard for some amount.
    pub fn accepts_submissions(&self) -> bool {
        !self.state.is_processing && !self.state.purse_balance.is_zero()
    }

    /// Guard a candidate and enter `Processing`:
    /// - Reject while another donation is processing
    /// - Reject outright once the purse is empty
    /// - Reject when the amount exceeds the balance
    ///
    /// A rejection leaves the state untouched.
    pub fn start(&mut self, candidate: DonationCandidate) -> Result<PendingDonation, SubmitError> {
        if self.state.is_processing {
            return Err(SubmitError::Busy);
        }
        if self.state.purse_balance.is_zero() {
            return Err(SubmitError::PurseEmpty);
        }
        if candidate.amount() > self.state.purse_balance {
            return Err(SubmitError::InsufficientFunds {
                balance: self.state.purse_balance,
                requested: candidate.amount(),
            });
        }

        self.dispatch(Action::SetProcessing(true));
        debug!(amount = %candidate.amount(), "donation processing");
        Ok(PendingDonation { candidate })
    }

    /// Commit a started donation and return to `Idle`.
    pub fn commit(&mut self, pending: PendingDonation) -> Transaction {
        let tx = pending.candidate.into_transaction(Utc::now());
        self.dispatch(Action::Commit(tx.clone()));
        self.dispatch(Action::SetProcessing(false));
        debug!(balance = %self.state.purse_balance, "donation committed");
        tx
    }

    /// Guard, wait out the processing delay, then commit.
    ///
    /// The delay is a timer, so other tasks keep running meanwhile. The
    /// future must be driven to completion: dropping it mid-delay leaves the
    /// machine `Processing`.
    pub async fn submit(&mut self, candidate: DonationCandidate) -> Result<Transaction, SubmitError> {
        let pending = self.start(candidate)?;
        tokio::time::sleep(PROCESSING_DELAY).await;
        Ok(self.commit(pending))
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;

    // test utils

    fn candidate(animal: &str, zoo: &str, amount: u32) -> DonationCandidate {
        DonationCandidate::new(animal, zoo, Dollars::new(amount)).unwrap()
    }

    fn donation(amount: u32) -> DonationCandidate {
        candidate("Cheetahs", "Memphis Zoo", amount)
    }

    #[test]
    fn new_machine() {
        let machine = DonationMachine::new();
        assert_eq!(machine.state().purse_balance(), Dollars::new(200));
        assert_eq!(machine.state().phase(), Phase::Idle);
        assert_eq!(machine.state().transactions().len(), 0);
        assert!(machine.accepts_submissions());
    }

    // reduce

    #[test]
    fn reduce_set_processing_only_touches_flag() {
        let before = DonationState::default();
        let after = reduce(before.clone(), Action::SetProcessing(true));
        assert!(after.is_processing());
        assert_eq!(after.purse_balance(), before.purse_balance());
        assert_eq!(after.transactions().len(), 0);

        let back = reduce(after, Action::SetProcessing(false));
        assert_eq!(back, before);
    }

    #[test]
    fn reduce_commit_prepends_and_deducts() {
        let first = donation(50).into_transaction(Utc::now());
        let second = candidate("Lion", "City Zoo", 30).into_transaction(Utc::now());

        let state = reduce(DonationState::default(), Action::Commit(first.clone()));
        let state = reduce(state, Action::Commit(second.clone()));

        assert_eq!(state.purse_balance(), Dollars::new(120));
        let history: Vec<_> = state.transactions().cloned().collect();
        assert_eq!(history, vec![second, first]);
    }

    // start / commit

    #[test]
    fn start_enters_processing_without_touching_balance() {
        let mut machine = DonationMachine::new();
        let pending = machine.start(donation(10)).unwrap();

        assert_eq!(machine.state().phase(), Phase::Processing);
        assert_eq!(machine.state().purse_balance(), Dollars::new(200));
        assert_eq!(pending.candidate().amount(), Dollars::new(10));
        assert!(!machine.accepts_submissions());

        let tx = machine.commit(pending);
        assert_eq!(tx.amount(), Dollars::new(10));
        assert_eq!(machine.state().phase(), Phase::Idle);
        assert_eq!(machine.state().purse_balance(), Dollars::new(190));
        assert_eq!(machine.state().latest(), Some(&tx));
    }

    #[test]
    fn start_while_processing_is_busy() {
        let mut machine = DonationMachine::new();
        let pending = machine.start(donation(150)).unwrap();

        // the second guard must not read the not-yet-decremented balance
        assert_eq!(machine.start(donation(100)).unwrap_err(), SubmitError::Busy);

        machine.commit(pending);
        assert!(matches!(
            machine.start(donation(100)),
            Err(SubmitError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn insufficient_funds_leaves_state_unchanged() {
        let mut machine = DonationMachine::new();
        let before = machine.state().clone();

        let err = machine.start(donation(250)).unwrap_err();
        assert_eq!(
            err,
            SubmitError::InsufficientFunds {
                balance: Dollars::new(200),
                requested: Dollars::new(250),
            }
        );
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn exact_balance_is_accepted() {
        let mut machine = DonationMachine::new();
        let pending = machine.start(donation(200)).unwrap();
        machine.commit(pending);

        assert_eq!(machine.state().purse_balance(), Dollars::ZERO);
        assert!(!machine.accepts_submissions());
    }

    #[test]
    fn empty_purse_fails_fast() {
        let mut machine = DonationMachine::with_balance(Dollars::new(10));
        let pending = machine.start(donation(10)).unwrap();
        machine.commit(pending);

        assert_eq!(machine.start(donation(10)).unwrap_err(), SubmitError::PurseEmpty);
        assert_eq!(machine.state().transactions().len(), 1);
    }

    // async submit

    #[tokio::test(start_paused = true)]
    async fn submit_commits_after_delay() {
        let mut machine = DonationMachine::new();
        let started = tokio::time::Instant::now();

        let tx = machine.submit(donation(10)).await.unwrap();

        assert!(started.elapsed() >= PROCESSING_DELAY);
        assert_eq!(tx.animal(), "Cheetahs");
        assert_eq!(machine.state().purse_balance(), Dollars::new(190));
        assert_eq!(machine.state().phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_rejection_is_immediate() {
        let mut machine = DonationMachine::new();
        let started = tokio::time::Instant::now();

        let result = machine.submit(donation(250)).await;

        assert!(matches!(result, Err(SubmitError::InsufficientFunds { .. })));
        assert!(started.elapsed() < PROCESSING_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_submissions_accumulate() {
        let mut machine = DonationMachine::new();
        machine.submit(donation(50)).await.unwrap();
        machine.submit(donation(30)).await.unwrap();

        assert_eq!(machine.state().purse_balance(), Dollars::new(120));
        let amounts: Vec<_> = machine.state().transactions().map(|t| t.amount()).collect();
        assert_eq!(amounts, vec![Dollars::new(30), Dollars::new(50)]);
    }
}
