#![allow(clippy::unwrap_used)]

use super::*;

// ── Direction ─────────────────────────────────────────────────

#[test]
fn test_direction_parse() {
    assert_eq!(Direction::parse("expense"), Some(Direction::Expense));
    assert_eq!(Direction::parse("EXPENSE"), Some(Direction::Expense));
    assert_eq!(Direction::parse("income"), Some(Direction::Income));
    assert_eq!(Direction::parse(" income "), Some(Direction::Income));
    assert_eq!(Direction::parse("in"), None);
    assert_eq!(Direction::parse(""), None);
}

#[test]
fn test_direction_roundtrip() {
    for d in Direction::all() {
        assert_eq!(Direction::parse(d.as_str()), Some(*d));
    }
}

#[test]
fn test_direction_signum() {
    assert_eq!(Direction::Expense.signum(), -1);
    assert_eq!(Direction::Income.signum(), 1);
}

#[test]
fn test_direction_display() {
    assert_eq!(format!("{}", Direction::Expense), "expense");
    assert_eq!(format!("{}", Direction::Income), "income");
}

// ── Cadence ───────────────────────────────────────────────────

#[test]
fn test_cadence_parse() {
    assert_eq!(Cadence::parse("once"), Some(Cadence::Once));
    assert_eq!(Cadence::parse("Monthly"), Some(Cadence::Monthly));
    assert_eq!(Cadence::parse("weekly"), None);
    assert_eq!(Cadence::parse(""), None);
}

#[test]
fn test_cadence_roundtrip() {
    for c in Cadence::all() {
        assert_eq!(Cadence::parse(c.as_str()), Some(*c));
    }
}

#[test]
fn test_cadence_all() {
    assert_eq!(Cadence::all().len(), 2);
    assert_eq!(Direction::all().len(), 2);
}

// ── LifeEvent ─────────────────────────────────────────────────

fn make_event(amount_yen: i64, duration_months: i64, direction: Direction) -> LifeEvent {
    LifeEvent {
        id: None,
        version_id: 1,
        title: "Test".into(),
        event_type: "other".into(),
        start_ym: "2026-04".into(),
        cadence: if duration_months == 1 {
            Cadence::Once
        } else {
            Cadence::Monthly
        },
        duration_months,
        amount_yen,
        direction,
        created_at: String::new(),
    }
}

#[test]
fn test_event_direction_flags() {
    let e = make_event(10_000, 1, Direction::Expense);
    assert!(e.is_expense());
    assert!(!e.is_income());

    let e = make_event(10_000, 1, Direction::Income);
    assert!(e.is_income());
    assert!(!e.is_expense());
}

#[test]
fn test_event_total_once() {
    let e = make_event(10_000, 1, Direction::Expense);
    assert_eq!(e.total_yen(), 10_000);
    assert_eq!(e.signed_total_yen(), -10_000);
}

#[test]
fn test_event_total_monthly() {
    let e = make_event(40_000, 24, Direction::Expense);
    assert_eq!(e.total_yen(), 960_000);
    assert_eq!(e.signed_total_yen(), -960_000);

    let e = make_event(40_000, 24, Direction::Income);
    assert_eq!(e.signed_total_yen(), 960_000);
}

// ── Plan ──────────────────────────────────────────────────────

#[test]
fn test_plan_new_defaults() {
    let plan = Plan::new("Move to Osaka".into(), String::new());
    assert!(plan.id.is_none());
    assert_eq!(plan.name, "Move to Osaka");
    assert!(plan.note.is_empty());
    assert!(!plan.created_at.is_empty());
}

#[test]
fn test_plan_find_by_name() {
    let plans = vec![
        Plan::new("Baseline".into(), String::new()),
        Plan::new("Career change".into(), String::new()),
    ];
    assert!(Plan::find_by_name(&plans, "career change").is_some());
    assert!(Plan::find_by_name(&plans, "retire").is_none());
}

#[test]
fn test_plan_find_by_id() {
    let mut plan = Plan::new("Baseline".into(), String::new());
    plan.id = Some(7);
    let plans = vec![plan];
    assert!(Plan::find_by_id(&plans, 7).is_some());
    assert!(Plan::find_by_id(&plans, 8).is_none());
}

#[test]
fn test_plan_display() {
    let plan = Plan::new("Baseline".into(), String::new());
    assert_eq!(format!("{plan}"), "Baseline");
}

// ── PlanVersion ───────────────────────────────────────────────

#[test]
fn test_version_new_defaults() {
    let v = PlanVersion::new(3, "initial".into());
    assert!(v.id.is_none());
    assert_eq!(v.plan_id, 3);
    assert_eq!(v.label, "initial");
    assert!(!v.is_current);
    assert!(!v.created_at.is_empty());
}

// ── MonthlyAssumption ─────────────────────────────────────────

#[test]
fn test_assumption_signed_amount() {
    let salary = MonthlyAssumption::new(1, "Salary".into(), 320_000, Direction::Income);
    assert_eq!(salary.signed_amount_yen(), 320_000);

    let rent = MonthlyAssumption::new(1, "Living costs".into(), 180_000, Direction::Expense);
    assert_eq!(rent.signed_amount_yen(), -180_000);
}

// ── HousingPlan ───────────────────────────────────────────────

#[test]
fn test_housing_new() {
    let h = HousingPlan::new(1, "Rented flat".into(), 95_000, "2026-04".into());
    assert!(h.id.is_none());
    assert_eq!(h.version_id, 1);
    assert_eq!(h.monthly_cost_yen, 95_000);
    assert_eq!(h.start_ym, "2026-04");
}
