mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Plans ─────────────────────────────────────────────────

    pub(crate) fn insert_plan(&self, plan: &Plan) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO plans (name, note, created_at) VALUES (?1, ?2, ?3)",
            params![plan.name, plan.note, plan.created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_plans(&self) -> Result<Vec<Plan>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, note, created_at FROM plans ORDER BY created_at, id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Plan {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                note: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_plan_by_id(&self, id: i64) -> Result<Option<Plan>> {
        let result = self.conn.query_row(
            "SELECT id, name, note, created_at FROM plans WHERE id = ?1",
            params![id],
            |row| {
                Ok(Plan {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    note: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        );
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn update_plan_name(&self, id: i64, name: &str) -> Result<()> {
        self.conn
            .execute("UPDATE plans SET name = ?1 WHERE id = ?2", params![name, id])?;
        Ok(())
    }

    /// Delete a plan together with all of its versions and their contents.
    pub(crate) fn delete_plan(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM life_events WHERE version_id IN
               (SELECT id FROM plan_versions WHERE plan_id = ?1)",
            params![id],
        )?;
        tx.execute(
            "DELETE FROM monthly_assumptions WHERE version_id IN
               (SELECT id FROM plan_versions WHERE plan_id = ?1)",
            params![id],
        )?;
        tx.execute(
            "DELETE FROM housing_plans WHERE version_id IN
               (SELECT id FROM plan_versions WHERE plan_id = ?1)",
            params![id],
        )?;
        tx.execute("DELETE FROM plan_versions WHERE plan_id = ?1", params![id])?;
        tx.execute("DELETE FROM plans WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(())
    }

    // ── Plan versions ─────────────────────────────────────────

    pub(crate) fn insert_version(&self, version: &PlanVersion) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO plan_versions (plan_id, label, is_current, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                version.plan_id,
                version.label,
                version.is_current,
                version.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_versions(&self, plan_id: i64) -> Result<Vec<PlanVersion>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, plan_id, label, is_current, created_at
             FROM plan_versions WHERE plan_id = ?1 ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map(params![plan_id], |row| {
            Ok(PlanVersion {
                id: Some(row.get(0)?),
                plan_id: row.get(1)?,
                label: row.get(2)?,
                is_current: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_current_version(&self, plan_id: i64) -> Result<Option<PlanVersion>> {
        let result = self.conn.query_row(
            "SELECT id, plan_id, label, is_current, created_at
             FROM plan_versions WHERE plan_id = ?1 AND is_current = 1",
            params![plan_id],
            |row| {
                Ok(PlanVersion {
                    id: Some(row.get(0)?),
                    plan_id: row.get(1)?,
                    label: row.get(2)?,
                    is_current: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Move the current flag to `version_id`. Clearing and setting happen
    /// in one transaction so a plan never ends up with two current
    /// versions, or none.
    pub(crate) fn set_current_version(&mut self, plan_id: i64, version_id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE plan_versions SET is_current = 0 WHERE plan_id = ?1",
            params![plan_id],
        )?;
        let changed = tx.execute(
            "UPDATE plan_versions SET is_current = 1 WHERE id = ?1 AND plan_id = ?2",
            params![version_id, plan_id],
        )?;
        if changed == 0 {
            anyhow::bail!("Version {version_id} does not belong to plan {plan_id}");
        }
        tx.commit()?;
        Ok(())
    }

    /// Snapshot the plan's current version into a new revision and make
    /// the new revision current.
    pub(crate) fn create_revision(&mut self, plan_id: i64, label: &str) -> Result<i64> {
        let current = self
            .get_current_version(plan_id)?
            .ok_or_else(|| anyhow::anyhow!("Plan has no current version to branch from"))?;
        let from_id = current
            .id
            .ok_or_else(|| anyhow::anyhow!("Version has no ID"))?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO plan_versions (plan_id, label, is_current, created_at)
             VALUES (?1, ?2, 0, ?3)",
            params![plan_id, label, chrono::Utc::now().to_rfc3339()],
        )?;
        let new_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO life_events
               (version_id, title, event_type, start_ym, cadence, duration_months, amount_yen, direction, created_at)
             SELECT ?1, title, event_type, start_ym, cadence, duration_months, amount_yen, direction, created_at
             FROM life_events WHERE version_id = ?2",
            params![new_id, from_id],
        )?;
        tx.execute(
            "INSERT INTO monthly_assumptions (version_id, label, amount_yen, direction)
             SELECT ?1, label, amount_yen, direction
             FROM monthly_assumptions WHERE version_id = ?2",
            params![new_id, from_id],
        )?;
        tx.execute(
            "INSERT INTO housing_plans (version_id, label, monthly_cost_yen, start_ym)
             SELECT ?1, label, monthly_cost_yen, start_ym
             FROM housing_plans WHERE version_id = ?2",
            params![new_id, from_id],
        )?;

        tx.execute(
            "UPDATE plan_versions SET is_current = 0 WHERE plan_id = ?1",
            params![plan_id],
        )?;
        tx.execute(
            "UPDATE plan_versions SET is_current = 1 WHERE id = ?1",
            params![new_id],
        )?;
        tx.commit()?;
        Ok(new_id)
    }

    /// Delete a version and its contents. Callers must not delete the
    /// current version; the UI refuses before getting here.
    pub(crate) fn delete_version(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM life_events WHERE version_id = ?1", params![id])?;
        tx.execute(
            "DELETE FROM monthly_assumptions WHERE version_id = ?1",
            params![id],
        )?;
        tx.execute(
            "DELETE FROM housing_plans WHERE version_id = ?1",
            params![id],
        )?;
        tx.execute("DELETE FROM plan_versions WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(())
    }

    // ── Life events ───────────────────────────────────────────

    pub(crate) fn insert_event(&self, event: &LifeEvent) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO life_events
               (version_id, title, event_type, start_ym, cadence, duration_months, amount_yen, direction, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                event.version_id,
                event.title,
                event.event_type,
                event.start_ym,
                event.cadence.as_str(),
                event.duration_months,
                event.amount_yen,
                event.direction.as_str(),
                event.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_events(
        &self,
        version_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<LifeEvent>> {
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<LifeEvent> {
            let cadence: String = row.get(5)?;
            let direction: String = row.get(8)?;
            Ok(LifeEvent {
                id: Some(row.get(0)?),
                version_id: row.get(1)?,
                title: row.get(2)?,
                event_type: row.get(3)?,
                start_ym: row.get(4)?,
                cadence: Cadence::parse(&cadence).unwrap_or(Cadence::Once),
                duration_months: row.get(6)?,
                amount_yen: row.get(7)?,
                direction: Direction::parse(&direction).unwrap_or(Direction::Expense),
                created_at: row.get(9)?,
            })
        };

        let sql = "SELECT id, version_id, title, event_type, start_ym, cadence,
                          duration_months, amount_yen, direction, created_at
                   FROM life_events WHERE version_id = ?1";

        if let Some(s) = search {
            let mut stmt = self.conn.prepare(&format!(
                "{sql} AND (title LIKE ?2 OR event_type LIKE ?2) ORDER BY start_ym, id"
            ))?;
            let rows = stmt.query_map(params![version_id, format!("%{s}%")], map_row)?;
            Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
        } else {
            let mut stmt = self.conn.prepare(&format!("{sql} ORDER BY start_ym, id"))?;
            let rows = stmt.query_map(params![version_id], map_row)?;
            Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
        }
    }

    pub(crate) fn delete_event(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM life_events WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn get_event_count(&self, version_id: i64) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM life_events WHERE version_id = ?1",
            params![version_id],
            |row| row.get(0),
        )?)
    }

    /// Whole-span income/expense totals for a version's events
    /// (amount times occurrence count, summed per direction).
    pub(crate) fn get_event_totals(&self, version_id: i64) -> Result<(i64, i64)> {
        Ok(self.conn.query_row(
            "SELECT
               COALESCE(SUM(CASE WHEN direction = 'income'  THEN amount_yen * duration_months ELSE 0 END), 0),
               COALESCE(SUM(CASE WHEN direction = 'expense' THEN amount_yen * duration_months ELSE 0 END), 0)
             FROM life_events WHERE version_id = ?1",
            params![version_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
    }

    // ── Monthly assumptions ───────────────────────────────────

    pub(crate) fn insert_assumption(&self, assumption: &MonthlyAssumption) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO monthly_assumptions (version_id, label, amount_yen, direction)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                assumption.version_id,
                assumption.label,
                assumption.amount_yen,
                assumption.direction.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_assumptions(&self, version_id: i64) -> Result<Vec<MonthlyAssumption>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, version_id, label, amount_yen, direction
             FROM monthly_assumptions WHERE version_id = ?1 ORDER BY label, id",
        )?;
        let rows = stmt.query_map(params![version_id], |row| {
            let direction: String = row.get(4)?;
            Ok(MonthlyAssumption {
                id: Some(row.get(0)?),
                version_id: row.get(1)?,
                label: row.get(2)?,
                amount_yen: row.get(3)?,
                direction: Direction::parse(&direction).unwrap_or(Direction::Expense),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn delete_assumption(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM monthly_assumptions WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Per-month income/expense baseline for a version.
    pub(crate) fn get_assumption_totals(&self, version_id: i64) -> Result<(i64, i64)> {
        Ok(self.conn.query_row(
            "SELECT
               COALESCE(SUM(CASE WHEN direction = 'income'  THEN amount_yen ELSE 0 END), 0),
               COALESCE(SUM(CASE WHEN direction = 'expense' THEN amount_yen ELSE 0 END), 0)
             FROM monthly_assumptions WHERE version_id = ?1",
            params![version_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
    }

    // ── Housing plans ─────────────────────────────────────────

    pub(crate) fn insert_housing(&self, housing: &HousingPlan) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO housing_plans (version_id, label, monthly_cost_yen, start_ym)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                housing.version_id,
                housing.label,
                housing.monthly_cost_yen,
                housing.start_ym,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_housing_plans(&self, version_id: i64) -> Result<Vec<HousingPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, version_id, label, monthly_cost_yen, start_ym
             FROM housing_plans WHERE version_id = ?1 ORDER BY start_ym, id",
        )?;
        let rows = stmt.query_map(params![version_id], |row| {
            Ok(HousingPlan {
                id: Some(row.get(0)?),
                version_id: row.get(1)?,
                label: row.get(2)?,
                monthly_cost_yen: row.get(3)?,
                start_ym: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn delete_housing(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM housing_plans WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Export ────────────────────────────────────────────────

    /// Write a version's life events to CSV. Returns the row count.
    pub(crate) fn export_events_csv(&self, path: &str, version_id: i64) -> Result<usize> {
        let events = self.get_events(version_id, None)?;
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;
        wtr.write_record([
            "title",
            "event_type",
            "start_ym",
            "end_ym",
            "cadence",
            "duration_months",
            "amount_yen",
            "direction",
            "total_yen",
        ])?;
        for event in &events {
            let end_ym = crate::draft::add_months(
                &event.start_ym,
                i32::try_from(event.duration_months - 1).unwrap_or(0),
            )
            .unwrap_or_default();
            wtr.write_record([
                event.title.as_str(),
                event.event_type.as_str(),
                event.start_ym.as_str(),
                end_ym.as_str(),
                event.cadence.as_str(),
                &event.duration_months.to_string(),
                &event.amount_yen.to_string(),
                event.direction.as_str(),
                &event.total_yen().to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(events.len())
    }
}

#[cfg(test)]
mod tests;
