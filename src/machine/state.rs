use std::collections::VecDeque;

use crate::Dollars;
use crate::model::{Phase, Transaction};

/// Purse balance, processing flag and donation history.
/// Only changed through [`reduce`](super::reduce).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationState {
    pub(super) purse_balance: Dollars,
    pub(super) opening_balance: Dollars,
    pub(super) is_processing: bool,
    /// Most recent first
    pub(super) transactions: VecDeque<Transaction>,
}

impl DonationState {
    pub fn new(opening_balance: Dollars) -> Self {
        Self {
            purse_balance: opening_balance,
            opening_balance,
            is_processing: false,
            transactions: VecDeque::new(),
        }
    }

    pub fn purse_balance(&self) -> Dollars {
        self.purse_balance
    }

    pub fn opening_balance(&self) -> Dollars {
        self.opening_balance
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn phase(&self) -> Phase {
        if self.is_processing {
            Phase::Processing
        } else {
            Phase::Idle
        }
    }

    /// Committed donations, most recent first.
    pub fn transactions(&self) -> impl ExactSizeIterator<Item = &Transaction> + '_ {
        self.transactions.iter()
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.transactions.front()
    }

    /// Placeholder rule: nothing committed and the purse still at its opening value.
    pub fn shows_no_history(&self) -> bool {
        self.transactions.is_empty() && self.purse_balance == self.opening_balance
    }
}

impl Default for DonationState {
    fn default() -> Self {
        Self::new(super::OPENING_BALANCE)
    }
}
