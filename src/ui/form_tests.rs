#![allow(clippy::unwrap_used)]

use super::form::*;
use crate::models::{Cadence, Direction};

fn type_into(form: &mut EventForm, text: &str) {
    for c in text.chars() {
        form.insert_char(c);
    }
}

fn clear_field(form: &mut EventForm) {
    for _ in 0..16 {
        form.backspace();
    }
}

/// Fill the form with a valid one-off draft: 10,000 yen starting 2026-04.
fn fill_valid_once(form: &mut EventForm) {
    type_into(form, "Buy a sofa"); // Title
    form.focus_next(); // Type (left blank)
    form.focus_next(); // Start
    clear_field(form);
    type_into(form, "2026-04");
    form.focus_next(); // Amount
    type_into(form, "10000");
}

#[test]
fn test_new_form_starts_invalid_with_defaults() {
    let form = EventForm::new("2026-04".into());
    assert!(!form.validation.is_valid());
    assert_eq!(form.draft.direction, Some(Direction::Expense));
    assert_eq!(form.draft.cadence, Some(Cadence::Once));
    assert!(form.field_error(EventField::Title).is_some());
    assert!(form.field_error(EventField::Amount).is_some());
    assert!(form.field_error(EventField::StartYm).is_none());
}

#[test]
fn test_typing_revalidates_live() {
    let mut form = EventForm::new("2026-04".into());
    assert!(form.field_error(EventField::Title).is_some());
    type_into(&mut form, "Trip");
    assert!(form.field_error(EventField::Title).is_none());
}

#[test]
fn test_cycling_cadence_changes_duration_requirement() {
    let mut form = EventForm::new("2026-04".into());
    fill_valid_once(&mut form);
    assert!(form.field_error(EventField::Duration).is_none());

    // Space on the cadence field flips once -> monthly; now a duration
    // is required.
    form.focus_next(); // Direction
    form.focus_next(); // Cadence
    form.insert_char(' ');
    assert_eq!(form.draft.cadence, Some(Cadence::Monthly));
    assert!(form.field_error(EventField::Duration).is_some());

    form.focus_next(); // Duration
    type_into(&mut form, "12");
    assert!(form.validation.is_valid());
}

#[test]
fn test_cycle_direction_both_ways() {
    let mut form = EventForm::new("2026-04".into());
    form.focus_next();
    form.focus_next();
    form.focus_next();
    form.focus_next(); // Direction
    form.cycle(1);
    assert_eq!(form.draft.direction, Some(Direction::Income));
    form.cycle(-1);
    assert_eq!(form.draft.direction, Some(Direction::Expense));
}

#[test]
fn test_preview_follows_draft() {
    let mut form = EventForm::new("2026-04".into());
    fill_valid_once(&mut form);
    assert_eq!(form.preview().total_amount_yen, Some(10_000));
    assert_eq!(form.preview().duration_months, Some(1));
}

// ── submit protocol ───────────────────────────────────────────

#[test]
fn test_submit_valid_once_builds_normalized_payload() {
    let mut form = EventForm::new("2026-04".into());
    fill_valid_once(&mut form);

    let event = form.begin_submit(Some(7)).unwrap();
    assert_eq!(event.version_id, 7);
    assert_eq!(event.cadence, Cadence::Once);
    assert_eq!(event.duration_months, 1);
    assert_eq!(event.amount_yen, 10_000);
    assert_eq!(event.start_ym, "2026-04");
    assert_eq!(event.event_type, "other");

    // Success resets the form for the next entry; no stale errors are
    // carried over from the submitted draft.
    form.finish_submit(true);
    assert!(!form.is_submitting());
    assert!(form.draft.title.is_empty());
    assert_eq!(form.draft.start_ym, "2026-04");
}

#[test]
fn test_submit_invalid_draft_is_blocked() {
    let mut form = EventForm::new("2026-04".into());
    assert_eq!(form.begin_submit(Some(1)).unwrap_err(), SubmitBlock::Invalid);
    assert!(!form.is_submitting());
}

#[test]
fn test_submit_without_current_version_is_blocked() {
    let mut form = EventForm::new("2026-04".into());
    fill_valid_once(&mut form);
    assert_eq!(
        form.begin_submit(None).unwrap_err(),
        SubmitBlock::NoCurrentVersion
    );
    assert!(!form.is_submitting());
}

#[test]
fn test_second_submit_suppressed_while_in_flight() {
    let mut form = EventForm::new("2026-04".into());
    fill_valid_once(&mut form);

    assert!(form.begin_submit(Some(1)).is_ok());
    assert!(form.is_submitting());
    // The first create has not settled; nothing may reach the repository.
    assert_eq!(form.begin_submit(Some(1)).unwrap_err(), SubmitBlock::InFlight);
}

#[test]
fn test_failed_submit_preserves_draft_for_retry() {
    let mut form = EventForm::new("2026-04".into());
    fill_valid_once(&mut form);

    assert!(form.begin_submit(Some(1)).is_ok());
    form.finish_submit(false);

    assert!(!form.is_submitting());
    assert_eq!(form.draft.title, "Buy a sofa");
    assert_eq!(form.draft.amount_yen, "10000");

    // And the retry goes through with the same payload.
    let event = form.begin_submit(Some(1)).unwrap();
    assert_eq!(event.title, "Buy a sofa");
}

// ── wizard numeric fields ─────────────────────────────────────

#[test]
fn test_numeric_field_error_cases() {
    assert_eq!(numeric_field_error("320000"), None);
    assert_eq!(numeric_field_error("0"), None);
    assert_eq!(numeric_field_error(""), Some("required"));
    assert_eq!(numeric_field_error("  "), Some("required"));
    assert_eq!(numeric_field_error("abc"), Some("required"));
    assert_eq!(numeric_field_error("12.5"), Some("must be a whole number"));
    assert_eq!(numeric_field_error("-1"), Some("must be 0 or more"));
}
