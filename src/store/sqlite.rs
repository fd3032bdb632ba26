use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use crate::hit_entry::fields::{Direction, MenOnBase, OutcomeCategory};
use crate::hit_entry::{FormRules, HitDraft, HitEvent};
use crate::store::{schema, HitStore, RowId, StorageError, StorageResult};

/// Rows are checked against the widest rule set when read back, so events
/// written under an extended form still load under a strict one.
const STORED_ROW_RULES: FormRules = FormRules {
    require_direction: false,
    extended_outcomes: true,
};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and bootstraps the schema.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| StorageError::Connection(format!("{}: {e}", path.display())))?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
        ",
        )?;
        debug!(path = %path.display(), "Opened database");

        schema::ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::ensure_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// A hit_events row as stored, before the labels are parsed back.
struct StoredRow {
    id: i64,
    batter: String,
    game_date: NaiveDate,
    inning: i64,
    plate_appearance: i64,
    outs: i64,
    men_on_base: String,
    balls: i64,
    strikes: i64,
    outcome_category: String,
    outcome_detail: Option<String>,
    direction: Option<String>,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            batter: row.get(1)?,
            game_date: row.get(2)?,
            inning: row.get(3)?,
            plate_appearance: row.get(4)?,
            outs: row.get(5)?,
            men_on_base: row.get(6)?,
            balls: row.get(7)?,
            strikes: row.get(8)?,
            outcome_category: row.get(9)?,
            outcome_detail: row.get(10)?,
            direction: row.get(11)?,
        })
    }

    fn invalid(&self, what: &str, value: &str) -> StorageError {
        StorageError::InvalidData(format!(
            "hit event {} has unrecognized {what} \"{value}\"",
            self.id
        ))
    }

    fn into_event(self) -> StorageResult<HitEvent> {
        let men_on_base = MenOnBase::from_str(&self.men_on_base)
            .map_err(|_| self.invalid("men on base", &self.men_on_base))?;
        let category = OutcomeCategory::from_str(&self.outcome_category)
            .map_err(|_| self.invalid("outcome category", &self.outcome_category))?;
        let outcome_detail = self
            .outcome_detail
            .as_deref()
            .map(|d| category.parse_detail(d).map_err(|_| self.invalid("outcome detail", d)))
            .transpose()?;
        let direction = self
            .direction
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| Direction::from_str(d).map_err(|_| self.invalid("direction", d)))
            .transpose()?;

        let draft = HitDraft {
            batter: self.batter,
            game_date: self.game_date,
            inning: self.inning,
            plate_appearance: self.plate_appearance,
            outs: self.outs,
            balls: self.balls,
            strikes: self.strikes,
            men_on_base,
            outcome_category: Some(category),
            outcome_detail,
            direction,
        };
        draft
            .validate(&STORED_ROW_RULES)
            .map_err(|e| StorageError::InvalidData(format!("hit event {}: {e}", self.id)))
    }
}

impl HitStore for SqliteStore {
    fn append_hit_event(&self, event: &HitEvent) -> StorageResult<RowId> {
        self.conn.execute(
            "INSERT INTO hit_events (batter, date, inning, pa_number, outs, men_on_base, balls, strikes, outcome_category, outcome_detail, direction)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                event.batter,
                event.game_date,
                event.inning.get(),
                event.plate_appearance.get(),
                event.outs.get(),
                event.men_on_base.to_string(),
                event.balls.get(),
                event.strikes.get(),
                event.outcome_category.to_string(),
                event.outcome_detail.as_ref().map(ToString::to_string),
                event.direction.map(|d| d.to_string()),
            ],
        )?;
        let row_id = RowId(self.conn.last_insert_rowid());
        debug!(%row_id, "Inserted hit event");
        Ok(row_id)
    }

    fn list_hit_events(&self, batter: &str, game_date: NaiveDate) -> StorageResult<Vec<HitEvent>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, batter, date, inning, pa_number, outs, men_on_base, balls, strikes, outcome_category, outcome_detail, direction
             FROM hit_events WHERE batter = ?1 AND date = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![batter, game_date], StoredRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(batter, date = %game_date, count = rows.len(), "Listed hit events");
        rows.into_iter().map(StoredRow::into_event).collect()
    }

    fn list_batter_names(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name FROM batters ORDER BY name COLLATE NOCASE, name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn add_batter(&self, name: &str) -> StorageResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidData("batter name is empty".to_string()));
        }
        self.conn
            .execute("INSERT INTO batters (name) VALUES (?1)", params![name])?;
        info!(name, "Added batter");
        Ok(())
    }
}
