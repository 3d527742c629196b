use rust_decimal::prelude::ToPrimitive;

use crate::models::Cadence;

use super::{is_valid_ym, parse_number_input, LifeEventDraft};

/// Values derived live from the draft for the form's preview line. Fields
/// stay `None` until enough of the draft is filled in to compute them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DraftPreview {
    /// Resolved occurrence count: 1 for a one-off, the parsed duration for
    /// a monthly event.
    pub(crate) duration_months: Option<i64>,
    /// Last month covered by a monthly event: start + duration - 1.
    pub(crate) end_ym: Option<String>,
    /// Amount over the whole span.
    pub(crate) total_amount_yen: Option<i64>,
}

/// Add `delta` months to a `YYYY-MM` value. Malformed input, or a result
/// that would land before year 0, yields `None` rather than an error.
pub(crate) fn add_months(ym: &str, delta: i32) -> Option<String> {
    if !is_valid_ym(ym) {
        return None;
    }
    let (year, month) = ym.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: i32 = month.parse().ok()?;
    let total = year * 12 + (month - 1) + delta;
    if total < 0 {
        return None;
    }
    Some(format!(
        "{:04}-{:02}",
        total.div_euclid(12),
        total.rem_euclid(12) + 1
    ))
}

fn parse_integer(raw: &str) -> Option<i64> {
    parse_number_input(raw)
        .filter(|n| n.is_integer())
        .and_then(|n| n.to_i64())
}

/// Recompute the preview from the current draft state. Pure; safe to call
/// on every keystroke.
pub(crate) fn preview(draft: &LifeEventDraft) -> DraftPreview {
    let duration_months = match draft.cadence {
        Some(Cadence::Once) => Some(1),
        Some(Cadence::Monthly) => parse_integer(&draft.duration_months),
        None => None,
    };

    let end_ym = match (draft.cadence, duration_months) {
        (Some(Cadence::Monthly), Some(d)) if d >= 1 => i32::try_from(d - 1)
            .ok()
            .and_then(|delta| add_months(draft.start_ym.trim(), delta)),
        _ => None,
    };

    let amount = parse_integer(&draft.amount_yen);
    let total_amount_yen = match (draft.cadence, amount) {
        (Some(Cadence::Monthly), Some(a)) => match duration_months {
            Some(d) if d > 0 => a.checked_mul(d),
            _ => Some(a),
        },
        (Some(Cadence::Once), Some(a)) => Some(a),
        _ => None,
    };

    DraftPreview {
        duration_months,
        end_ym,
        total_amount_yen,
    }
}

#[cfg(test)]
#[path = "derive_tests.rs"]
mod derive_tests;
