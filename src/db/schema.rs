pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plans (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    note        TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS plan_versions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    plan_id     INTEGER NOT NULL REFERENCES plans(id),
    label       TEXT NOT NULL,
    is_current  BOOLEAN NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS life_events (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    version_id      INTEGER NOT NULL REFERENCES plan_versions(id),
    title           TEXT NOT NULL,
    event_type      TEXT NOT NULL DEFAULT 'other',
    start_ym        TEXT NOT NULL,
    cadence         TEXT NOT NULL DEFAULT 'once',
    duration_months INTEGER NOT NULL DEFAULT 1,
    amount_yen      INTEGER NOT NULL,
    direction       TEXT NOT NULL DEFAULT 'expense',
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS monthly_assumptions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    version_id  INTEGER NOT NULL REFERENCES plan_versions(id),
    label       TEXT NOT NULL,
    amount_yen  INTEGER NOT NULL,
    direction   TEXT NOT NULL DEFAULT 'expense'
);

CREATE TABLE IF NOT EXISTS housing_plans (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    version_id       INTEGER NOT NULL REFERENCES plan_versions(id),
    label            TEXT NOT NULL,
    monthly_cost_yen INTEGER NOT NULL,
    start_ym         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_versions_plan ON plan_versions(plan_id);
CREATE INDEX IF NOT EXISTS idx_events_version ON life_events(version_id);
CREATE INDEX IF NOT EXISTS idx_events_start ON life_events(start_ym);
CREATE INDEX IF NOT EXISTS idx_assumptions_version ON monthly_assumptions(version_id);
CREATE INDEX IF NOT EXISTS idx_housing_version ON housing_plans(version_id);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[
    // Future migrations go here:
    // (1, "ALTER TABLE life_events ADD COLUMN note TEXT NOT NULL DEFAULT '';"),
];
