use rusqlite::Connection;
use tracing::info;

use crate::store::StorageResult;

/// Creates the batters and hit_events tables when missing. Safe to run on every start.
pub fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS batters (
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS hit_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            batter TEXT NOT NULL,
            date DATE NOT NULL,
            inning INT,
            pa_number INT,
            outs INT,
            men_on_base TEXT,
            balls INT,
            strikes INT,
            outcome_category TEXT,
            outcome_detail TEXT,
            direction TEXT,
            recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_hit_events_batter_date
            ON hit_events(batter, date);
        ",
    )?;
    info!("Schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_creates_both_tables() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        assert_eq!(table_names(&conn), vec!["batters", "hit_events"]);
    }

    #[test]
    fn test_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute("INSERT INTO batters (name) VALUES ('Smith')", [])
            .unwrap();
        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM batters", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(table_names(&conn), vec!["batters", "hit_events"]);
    }
}
