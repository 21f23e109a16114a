//! Form input capture.
//!
//! The form holds whatever the three selects currently show. Nothing is
//! trusted until [`FormInputs::capture`] turns it into a [`DonationCandidate`].

use thiserror::Error;

use crate::Dollars;
use crate::catalog::{Catalog, Field};
use crate::model::DonationCandidate;

/// Validation failures that block a submission before it reaches the machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("donation amount '{0}' is not a positive whole number")]
    InvalidAmount(String),

    #[error("{field}: '{value}' is not one of the offered options")]
    UnknownOption { field: Field, value: String },
}

/// Raw select values. `None` or a blank string means "Select an option".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub animal: Option<String>,
    pub zoo: Option<String>,
    pub amount: Option<String>,
}

impl FormInputs {
    pub fn new(
        animal: impl Into<String>,
        zoo: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            animal: Some(animal.into()),
            zoo: Some(zoo.into()),
            amount: Some(amount.into()),
        }
    }

    /// Currently selected value of a field, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Animal => self.animal.as_deref(),
            Field::Zoo => self.zoo.as_deref(),
            Field::Amount => self.amount.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Animal => &mut self.animal,
            Field::Zoo => &mut self.zoo,
            Field::Amount => &mut self.amount,
        };
        *slot = Some(value.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate all three fields against the catalog:
    /// - every field must be selected
    /// - the amount must parse as a positive integer
    /// - every value must be one the catalog offers
    pub fn capture(&self, catalog: &Catalog) -> Result<DonationCandidate, FormError> {
        let animal = self.required(Field::Animal)?;
        let zoo = self.required(Field::Zoo)?;
        let raw_amount = self.required(Field::Amount)?;

        let amount: Dollars = raw_amount
            .parse()
            .map_err(|_| FormError::InvalidAmount(raw_amount.to_string()))?;
        if amount.is_zero() {
            return Err(FormError::InvalidAmount(raw_amount.to_string()));
        }

        for (field, value) in [
            (Field::Animal, animal),
            (Field::Zoo, zoo),
            (Field::Amount, raw_amount),
        ] {
            if catalog.lookup(field, value).is_none() {
                return Err(FormError::UnknownOption {
                    field,
                    value: value.to_string(),
                });
            }
        }

        DonationCandidate::new(animal, zoo, amount)
    }

    fn required(&self, field: Field) -> Result<&str, FormError> {
        self.get(field).ok_or(FormError::MissingField(field))
    }
}
