#![allow(clippy::unwrap_used)]

use super::*;

fn make_event(version_id: i64, title: &str, amount_yen: i64) -> LifeEvent {
    LifeEvent {
        id: None,
        version_id,
        title: title.into(),
        event_type: "other".into(),
        start_ym: "2026-04".into(),
        cadence: Cadence::Once,
        duration_months: 1,
        amount_yen,
        direction: Direction::Expense,
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Insert a plan with a current version and return both ids.
fn seed_plan(db: &Database, name: &str) -> (i64, i64) {
    let plan_id = db.insert_plan(&Plan::new(name.into(), String::new())).unwrap();
    let mut version = PlanVersion::new(plan_id, "initial".into());
    version.is_current = true;
    let version_id = db.insert_version(&version).unwrap();
    (plan_id, version_id)
}

// ── Plans ─────────────────────────────────────────────────────

#[test]
fn test_plan_crud() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_plan(&Plan::new("Baseline".into(), "first plan".into()))
        .unwrap();

    let fetched = db.get_plan_by_id(id).unwrap();
    assert!(fetched.is_some());
    let fetched = fetched.unwrap();
    assert_eq!(fetched.name, "Baseline");
    assert_eq!(fetched.note, "first plan");

    let all = db.get_plans().unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn test_plan_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_plan_by_id(99999).unwrap().is_none());
}

#[test]
fn test_delete_plan_cascades() {
    let mut db = Database::open_in_memory().unwrap();
    let (plan_id, version_id) = seed_plan(&db, "Baseline");
    db.insert_event(&make_event(version_id, "Car", 500_000)).unwrap();
    db.insert_assumption(&MonthlyAssumption::new(
        version_id,
        "Salary".into(),
        320_000,
        Direction::Income,
    ))
    .unwrap();
    db.insert_housing(&HousingPlan::new(
        version_id,
        "Flat".into(),
        95_000,
        "2026-04".into(),
    ))
    .unwrap();

    db.delete_plan(plan_id).unwrap();

    assert!(db.get_plan_by_id(plan_id).unwrap().is_none());
    assert!(db.get_versions(plan_id).unwrap().is_empty());
    assert!(db.get_events(version_id, None).unwrap().is_empty());
    assert!(db.get_assumptions(version_id).unwrap().is_empty());
    assert!(db.get_housing_plans(version_id).unwrap().is_empty());
}

// ── Versions ──────────────────────────────────────────────────

#[test]
fn test_current_version_lookup() {
    let db = Database::open_in_memory().unwrap();
    let (plan_id, version_id) = seed_plan(&db, "Baseline");

    let current = db.get_current_version(plan_id).unwrap();
    assert_eq!(current.unwrap().id, Some(version_id));
}

#[test]
fn test_no_current_version() {
    let db = Database::open_in_memory().unwrap();
    let plan_id = db
        .insert_plan(&Plan::new("Empty".into(), String::new()))
        .unwrap();
    assert!(db.get_current_version(plan_id).unwrap().is_none());
}

#[test]
fn test_set_current_version_is_exclusive() {
    let mut db = Database::open_in_memory().unwrap();
    let (plan_id, v1) = seed_plan(&db, "Baseline");
    let v2 = db
        .insert_version(&PlanVersion::new(plan_id, "alternative".into()))
        .unwrap();

    db.set_current_version(plan_id, v2).unwrap();

    let versions = db.get_versions(plan_id).unwrap();
    let current: Vec<_> = versions.iter().filter(|v| v.is_current).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, Some(v2));
    assert!(versions.iter().any(|v| v.id == Some(v1) && !v.is_current));
}

#[test]
fn test_set_current_version_rejects_foreign_version() {
    let mut db = Database::open_in_memory().unwrap();
    let (plan_a, _) = seed_plan(&db, "A");
    let (_, version_b) = seed_plan(&db, "B");
    assert!(db.set_current_version(plan_a, version_b).is_err());
}

#[test]
fn test_create_revision_snapshots_contents() {
    let mut db = Database::open_in_memory().unwrap();
    let (plan_id, v1) = seed_plan(&db, "Baseline");
    db.insert_event(&make_event(v1, "Car", 500_000)).unwrap();
    db.insert_assumption(&MonthlyAssumption::new(
        v1,
        "Salary".into(),
        320_000,
        Direction::Income,
    ))
    .unwrap();
    db.insert_housing(&HousingPlan::new(v1, "Flat".into(), 95_000, "2026-04".into()))
        .unwrap();

    let v2 = db.create_revision(plan_id, "second draft").unwrap();
    assert_ne!(v1, v2);

    // New revision is current and carries copies of everything.
    let current = db.get_current_version(plan_id).unwrap().unwrap();
    assert_eq!(current.id, Some(v2));
    assert_eq!(current.label, "second draft");
    assert_eq!(db.get_events(v2, None).unwrap().len(), 1);
    assert_eq!(db.get_assumptions(v2).unwrap().len(), 1);
    assert_eq!(db.get_housing_plans(v2).unwrap().len(), 1);

    // The old revision keeps its own rows.
    assert_eq!(db.get_events(v1, None).unwrap().len(), 1);

    // Copies are independent.
    db.delete_event(db.get_events(v2, None).unwrap()[0].id.unwrap())
        .unwrap();
    assert_eq!(db.get_events(v1, None).unwrap().len(), 1);
}

#[test]
fn test_create_revision_requires_current() {
    let mut db = Database::open_in_memory().unwrap();
    let plan_id = db
        .insert_plan(&Plan::new("Empty".into(), String::new()))
        .unwrap();
    assert!(db.create_revision(plan_id, "v2").is_err());
}

#[test]
fn test_delete_version_removes_contents() {
    let mut db = Database::open_in_memory().unwrap();
    let (plan_id, v1) = seed_plan(&db, "Baseline");
    let v2 = db.create_revision(plan_id, "scratch").unwrap();
    db.insert_event(&make_event(v2, "Car", 500_000)).unwrap();

    db.set_current_version(plan_id, v1).unwrap();
    db.delete_version(v2).unwrap();

    assert_eq!(db.get_versions(plan_id).unwrap().len(), 1);
    assert!(db.get_events(v2, None).unwrap().is_empty());
}

// ── Life events ───────────────────────────────────────────────

#[test]
fn test_event_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");

    let mut event = make_event(version_id, "Nursery fees", 40_000);
    event.cadence = Cadence::Monthly;
    event.duration_months = 24;
    event.direction = Direction::Expense;
    event.event_type = "family".into();
    db.insert_event(&event).unwrap();

    let events = db.get_events(version_id, None).unwrap();
    assert_eq!(events.len(), 1);
    let got = &events[0];
    assert_eq!(got.title, "Nursery fees");
    assert_eq!(got.event_type, "family");
    assert_eq!(got.cadence, Cadence::Monthly);
    assert_eq!(got.duration_months, 24);
    assert_eq!(got.amount_yen, 40_000);
    assert_eq!(got.direction, Direction::Expense);
    assert_eq!(got.total_yen(), 960_000);
}

#[test]
fn test_events_ordered_by_start() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");

    let mut late = make_event(version_id, "Late", 100);
    late.start_ym = "2027-01".into();
    let mut early = make_event(version_id, "Early", 100);
    early.start_ym = "2026-02".into();
    db.insert_event(&late).unwrap();
    db.insert_event(&early).unwrap();

    let events = db.get_events(version_id, None).unwrap();
    assert_eq!(events[0].title, "Early");
    assert_eq!(events[1].title, "Late");
}

#[test]
fn test_event_search_matches_title_and_type() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");
    db.insert_event(&make_event(version_id, "Buy a car", 500_000)).unwrap();
    let mut trip = make_event(version_id, "Okinawa trip", 120_000);
    trip.event_type = "travel".into();
    db.insert_event(&trip).unwrap();

    assert_eq!(db.get_events(version_id, Some("car")).unwrap().len(), 1);
    assert_eq!(db.get_events(version_id, Some("travel")).unwrap().len(), 1);
    assert_eq!(db.get_events(version_id, Some("boat")).unwrap().len(), 0);
}

#[test]
fn test_event_search_scoped_to_version() {
    let db = Database::open_in_memory().unwrap();
    let (_, v_a) = seed_plan(&db, "A");
    let (_, v_b) = seed_plan(&db, "B");
    db.insert_event(&make_event(v_a, "Car", 500_000)).unwrap();

    assert_eq!(db.get_events(v_b, Some("Car")).unwrap().len(), 0);
    assert_eq!(db.get_event_count(v_a).unwrap(), 1);
    assert_eq!(db.get_event_count(v_b).unwrap(), 0);
}

#[test]
fn test_event_totals_span_aware() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");

    let mut rent = make_event(version_id, "Side income", 50_000);
    rent.cadence = Cadence::Monthly;
    rent.duration_months = 12;
    rent.direction = Direction::Income;
    db.insert_event(&rent).unwrap();
    db.insert_event(&make_event(version_id, "Car", 500_000)).unwrap();

    let (income, expense) = db.get_event_totals(version_id).unwrap();
    assert_eq!(income, 600_000);
    assert_eq!(expense, 500_000);
}

#[test]
fn test_delete_event() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");
    let id = db.insert_event(&make_event(version_id, "Car", 500_000)).unwrap();
    db.delete_event(id).unwrap();
    assert!(db.get_events(version_id, None).unwrap().is_empty());
}

// ── Monthly assumptions ───────────────────────────────────────

#[test]
fn test_assumption_roundtrip_and_totals() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");

    db.insert_assumption(&MonthlyAssumption::new(
        version_id,
        "Salary".into(),
        320_000,
        Direction::Income,
    ))
    .unwrap();
    db.insert_assumption(&MonthlyAssumption::new(
        version_id,
        "Living costs".into(),
        180_000,
        Direction::Expense,
    ))
    .unwrap();

    let rows = db.get_assumptions(version_id).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|a| a.label == "Salary" && a.direction == Direction::Income));

    let (income, expense) = db.get_assumption_totals(version_id).unwrap();
    assert_eq!(income, 320_000);
    assert_eq!(expense, 180_000);
}

#[test]
fn test_delete_assumption() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");
    let id = db
        .insert_assumption(&MonthlyAssumption::new(
            version_id,
            "Salary".into(),
            320_000,
            Direction::Income,
        ))
        .unwrap();
    db.delete_assumption(id).unwrap();
    assert!(db.get_assumptions(version_id).unwrap().is_empty());
}

// ── Housing plans ─────────────────────────────────────────────

#[test]
fn test_housing_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");

    db.insert_housing(&HousingPlan::new(
        version_id,
        "Rented flat".into(),
        95_000,
        "2026-04".into(),
    ))
    .unwrap();

    let rows = db.get_housing_plans(version_id).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].monthly_cost_yen, 95_000);
    assert_eq!(rows[0].start_ym, "2026-04");

    db.delete_housing(rows[0].id.unwrap()).unwrap();
    assert!(db.get_housing_plans(version_id).unwrap().is_empty());
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_events_csv() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");
    let mut event = make_event(version_id, "Nursery fees", 40_000);
    event.cadence = Cadence::Monthly;
    event.duration_months = 24;
    db.insert_event(&event).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let count = db
        .export_events_csv(path.to_str().unwrap(), version_id)
        .unwrap();
    assert_eq!(count, 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert!(lines.next().unwrap().starts_with("title,"));
    let row = lines.next().unwrap();
    assert!(row.contains("Nursery fees"));
    assert!(row.contains("2028-03")); // end_ym = start + 23 months
    assert!(row.contains("960000"));
}

#[test]
fn test_export_empty_version() {
    let db = Database::open_in_memory().unwrap();
    let (_, version_id) = seed_plan(&db, "Baseline");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let count = db
        .export_events_csv(path.to_str().unwrap(), version_id)
        .unwrap();
    assert_eq!(count, 0);
}
