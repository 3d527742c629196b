use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::Cadence;

use super::{is_valid_ym, parse_number_input, LifeEventDraft};

/// Which draft field an error message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum DraftField {
    Title,
    StartYm,
    AmountYen,
    Direction,
    Cadence,
    DurationMonths,
}

/// Outcome of validating a draft. An empty error map means submittable.
#[derive(Debug, Clone, Default)]
pub(crate) struct Validation {
    errors: BTreeMap<DraftField, &'static str>,
}

impl Validation {
    pub(crate) fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(&self, field: DraftField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors.len()
    }

    fn push(&mut self, field: DraftField, message: &'static str) {
        self.errors.insert(field, message);
    }
}

/// Validate every field independently, collecting all errors rather than
/// stopping at the first. Never panics; malformed input is a field error,
/// not a fault.
pub(crate) fn validate(draft: &LifeEventDraft) -> Validation {
    let mut v = Validation::default();

    if draft.title.trim().is_empty() {
        v.push(DraftField::Title, "required");
    }

    let start_ym = draft.start_ym.trim();
    if start_ym.is_empty() {
        v.push(DraftField::StartYm, "required");
    } else if !is_valid_ym(start_ym) {
        v.push(DraftField::StartYm, "use YYYY-MM");
    }

    if draft.direction.is_none() {
        v.push(DraftField::Direction, "required");
    }

    if draft.cadence.is_none() {
        v.push(DraftField::Cadence, "required");
    }

    match parse_number_input(&draft.amount_yen) {
        None => v.push(DraftField::AmountYen, "required"),
        Some(n) if !n.is_integer() => v.push(DraftField::AmountYen, "must be a whole number"),
        Some(n) if n <= Decimal::ZERO => v.push(DraftField::AmountYen, "must be 1 or more"),
        Some(_) => {}
    }

    // Duration only matters for monthly events; a one-off ignores whatever
    // is left in the field.
    if draft.cadence == Some(Cadence::Monthly) {
        match parse_number_input(&draft.duration_months) {
            None => v.push(DraftField::DurationMonths, "required"),
            Some(n) if !n.is_integer() => {
                v.push(DraftField::DurationMonths, "must be a whole number")
            }
            Some(n) if n < Decimal::ONE => v.push(DraftField::DurationMonths, "must be 1 or more"),
            Some(_) => {}
        }
    }

    v
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;
