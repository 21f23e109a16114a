//! Core domain types for the donation page.

use chrono::{DateTime, Utc};

use crate::Dollars;
use crate::catalog::Field;
use crate::form::FormError;

/// A validated donation request that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationCandidate {
    animal: String,
    zoo: String,
    amount: Dollars,
}

impl DonationCandidate {
    /// Build a candidate, rejecting blank names and a zero amount.
    pub fn new(
        animal: impl Into<String>,
        zoo: impl Into<String>,
        amount: Dollars,
    ) -> Result<Self, FormError> {
        let animal = animal.into();
        let zoo = zoo.into();
        if animal.trim().is_empty() {
            return Err(FormError::MissingField(Field::Animal));
        }
        if zoo.trim().is_empty() {
            return Err(FormError::MissingField(Field::Zoo));
        }
        if amount.is_zero() {
            return Err(FormError::InvalidAmount(amount.get().to_string()));
        }
        Ok(Self {
            animal,
            zoo,
            amount,
        })
    }

    pub fn animal(&self) -> &str {
        &self.animal
    }

    pub fn zoo(&self) -> &str {
        &self.zoo
    }

    pub fn amount(&self) -> Dollars {
        self.amount
    }

    /// Stamp the candidate, turning it into a history record.
    pub(crate) fn into_transaction(self, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            animal: self.animal,
            zoo: self.zoo,
            amount: self.amount,
            timestamp,
        }
    }
}

/// A committed donation. Read-only once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    animal: String,
    zoo: String,
    amount: Dollars,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn animal(&self) -> &str {
        &self.animal
    }

    pub fn zoo(&self) -> &str {
        &self.zoo
    }

    pub fn amount(&self) -> Dollars {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Whether a donation is currently being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Processing,
}
