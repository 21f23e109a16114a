//! Text rendering of the donation page.

use std::fmt;

use crate::catalog::{Catalog, Field};
use crate::form::FormInputs;
use crate::machine::DonationState;

pub const TITLE: &str = "Animal Donation";
pub const NO_HISTORY: &str = "No transaction history";
const PLACEHOLDER: &str = "Select an option";

/// How the submit affordance is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton {
    Ready,
    Processing,
    Disabled,
}

impl fmt::Display for SubmitButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitButton::Ready => f.write_str("[Submit Donation]"),
            SubmitButton::Processing => f.write_str("[Processing...]"),
            SubmitButton::Disabled => f.write_str("[Submit Donation] (disabled)"),
        }
    }
}

/// Borrowed snapshot of everything the page shows.
pub struct PageView<'a> {
    pub state: &'a DonationState,
    pub form: &'a FormInputs,
    pub catalog: &'a Catalog,
    pub button: SubmitButton,
}

impl PageView<'_> {
    fn selection(&self, field: Field) -> &str {
        match self.form.get(field) {
            Some(value) => self
                .catalog
                .lookup(field, value)
                .map(|opt| opt.label)
                .unwrap_or(value),
            None => PLACEHOLDER,
        }
    }
}

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "Your current balance: {}", self.state.purse_balance())?;
        writeln!(f)?;

        writeln!(f, "Make a Donation")?;
        for field in [Field::Animal, Field::Zoo, Field::Amount] {
            writeln!(f, "  {field}: {}", self.selection(field))?;
        }
        writeln!(f, "  {}", self.button)?;
        writeln!(f)?;

        writeln!(f, "Transaction History")?;
        if self.state.shows_no_history() {
            writeln!(f, "  {NO_HISTORY}")?;
        } else {
            for tx in self.state.transactions() {
                writeln!(
                    f,
                    "  {:<16}{:<16}{:>6}  {}",
                    tx.animal(),
                    tx.zoo(),
                    tx.amount().to_string(),
                    tx.timestamp().format("%Y-%m-%d")
                )?;
            }
        }
        Ok(())
    }
}
