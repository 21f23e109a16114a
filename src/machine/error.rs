//! Error types for donation submission.

use thiserror::Error;

use crate::Dollars;

/// Why [`DonationMachine::start`](super::DonationMachine::start) refused a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Insufficient balance. You only have {balance} available.")]
    InsufficientFunds { balance: Dollars, requested: Dollars },

    /// Fast-fail once the purse is spent; same outcome as insufficient funds.
    #[error("Insufficient balance. You only have {} available.", Dollars::ZERO)]
    PurseEmpty,

    #[error("a donation is already processing")]
    Busy,
}

impl SubmitError {
    /// Balance to report to the user, for the errors the user can act on.
    pub fn reported_balance(&self) -> Option<Dollars> {
        match self {
            SubmitError::InsufficientFunds { balance, .. } => Some(*balance),
            SubmitError::PurseEmpty => Some(Dollars::ZERO),
            SubmitError::Busy => None,
        }
    }
}
