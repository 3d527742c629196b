#![allow(clippy::unwrap_used)]

use super::super::{is_valid_ym, LifeEventDraft};
use super::*;
use crate::models::{Cadence, Direction};

// ── add_months ────────────────────────────────────────────────

#[test]
fn test_add_months_within_year() {
    assert_eq!(add_months("2026-01", 0).unwrap(), "2026-01");
    assert_eq!(add_months("2026-04", 3).unwrap(), "2026-07");
}

#[test]
fn test_add_months_crosses_year() {
    assert_eq!(add_months("2026-04", 11).unwrap(), "2027-03");
    assert_eq!(add_months("2026-12", 1).unwrap(), "2027-01");
    assert_eq!(add_months("2025-11", 14).unwrap(), "2027-01");
}

#[test]
fn test_add_months_negative_delta() {
    assert_eq!(add_months("2026-01", -1).unwrap(), "2025-12");
    assert_eq!(add_months("2026-04", -16).unwrap(), "2024-12");
}

#[test]
fn test_add_months_pads_month() {
    assert_eq!(add_months("2026-08", 1).unwrap(), "2026-09");
}

#[test]
fn test_add_months_malformed_input_is_none() {
    assert_eq!(add_months("2026-4", 1), None);
    assert_eq!(add_months("", 1), None);
    assert_eq!(add_months("soon", 1), None);
    assert_eq!(add_months("2026-13", 1), None);
}

#[test]
fn test_add_months_underflow_is_none() {
    assert_eq!(add_months("0001-01", -13), None);
}

// ── is_valid_ym ───────────────────────────────────────────────

#[test]
fn test_is_valid_ym() {
    assert!(is_valid_ym("2026-04"));
    assert!(is_valid_ym("2026-12"));
    assert!(!is_valid_ym("2026-13"));
    assert!(!is_valid_ym("2026-0"));
    assert!(!is_valid_ym("2026-004"));
    assert!(!is_valid_ym("26-04"));
    assert!(!is_valid_ym(""));
}

// ── preview ───────────────────────────────────────────────────

fn monthly_draft() -> LifeEventDraft {
    LifeEventDraft {
        title: "Nursery fees".into(),
        event_type: "family".into(),
        start_ym: "2026-04".into(),
        amount_yen: "40000".into(),
        direction: Some(Direction::Expense),
        cadence: Some(Cadence::Monthly),
        duration_months: "24".into(),
    }
}

#[test]
fn test_preview_monthly_full() {
    let p = preview(&monthly_draft());
    assert_eq!(p.duration_months, Some(24));
    assert_eq!(p.end_ym.as_deref(), Some("2028-03"));
    assert_eq!(p.total_amount_yen, Some(960_000));
}

#[test]
fn test_preview_once_resolves_duration_one() {
    let mut draft = monthly_draft();
    draft.cadence = Some(Cadence::Once);
    draft.duration_months = String::new();
    let p = preview(&draft);
    assert_eq!(p.duration_months, Some(1));
    assert_eq!(p.end_ym, None);
    assert_eq!(p.total_amount_yen, Some(40_000));
}

#[test]
fn test_preview_single_month_span() {
    let mut draft = monthly_draft();
    draft.duration_months = "1".into();
    let p = preview(&draft);
    assert_eq!(p.end_ym.as_deref(), Some("2026-04"));
    assert_eq!(p.total_amount_yen, Some(40_000));
}

#[test]
fn test_preview_monthly_missing_duration_falls_back() {
    let mut draft = monthly_draft();
    draft.duration_months = String::new();
    let p = preview(&draft);
    assert_eq!(p.duration_months, None);
    assert_eq!(p.end_ym, None);
    // Total falls back to the per-month amount until a duration exists.
    assert_eq!(p.total_amount_yen, Some(40_000));
}

#[test]
fn test_preview_monthly_fractional_duration_unresolved() {
    let mut draft = monthly_draft();
    draft.duration_months = "2.5".into();
    let p = preview(&draft);
    assert_eq!(p.duration_months, None);
    assert_eq!(p.end_ym, None);
    assert_eq!(p.total_amount_yen, Some(40_000));
}

#[test]
fn test_preview_no_cadence_no_derivation() {
    let mut draft = monthly_draft();
    draft.cadence = None;
    let p = preview(&draft);
    assert_eq!(p, DraftPreview::default());
}

#[test]
fn test_preview_invalid_start_ym_blocks_end() {
    let mut draft = monthly_draft();
    draft.start_ym = "2026-4".into();
    let p = preview(&draft);
    assert_eq!(p.duration_months, Some(24));
    assert_eq!(p.end_ym, None);
    assert_eq!(p.total_amount_yen, Some(960_000));
}

#[test]
fn test_preview_fractional_amount_no_total() {
    let mut draft = monthly_draft();
    draft.amount_yen = "40000.5".into();
    let p = preview(&draft);
    assert_eq!(p.total_amount_yen, None);
}
