//! Success and error feedback shown to the donor.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::Dollars;
use crate::machine::SubmitError;
use crate::model::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => f.write_str("success"),
            NoticeKind::Error => f.write_str("error"),
        }
    }
}

/// Result of a settled submission, as the donor should hear about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    DonationAccepted(Transaction),
    InsufficientFunds { balance: Dollars },
}

impl Outcome {
    /// `None` for results the donor is never told about (a busy machine).
    pub fn from_result(result: &Result<Transaction, SubmitError>) -> Option<Self> {
        match result {
            Ok(tx) => Some(Outcome::DonationAccepted(tx.clone())),
            Err(e) => e
                .reported_balance()
                .map(|balance| Outcome::InsufficientFunds { balance }),
        }
    }

    pub fn kind(&self) -> NoticeKind {
        match self {
            Outcome::DonationAccepted(_) => NoticeKind::Success,
            Outcome::InsufficientFunds { .. } => NoticeKind::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::DonationAccepted(tx) => format!(
                "Thanks for donating {} to {} for {}. Want to donate again?",
                tx.amount(),
                tx.zoo(),
                tx.animal()
            ),
            Outcome::InsufficientFunds { balance } => {
                format!("Insufficient balance. You only have {balance} available.")
            }
        }
    }
}

/// Where notifications end up.
pub trait NotificationSink: Send {
    fn notify(&mut self, kind: NoticeKind, message: &str);
}

/// Writes one `<kind>: <message>` line per notification.
pub struct ConsoleSink<W> {
    out: W,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> NotificationSink for ConsoleSink<W> {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        // a closed stdout should not take the page down
        if let Err(e) = writeln!(self.out, "{kind}: {message}").and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write notification");
        }
    }
}

/// Keeps every notification in memory. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    notices: Arc<Mutex<Vec<(NoticeKind, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<(NoticeKind, String)> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, message.to_string()));
    }
}
