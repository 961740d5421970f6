//! Key-value settings for the running condominium (name shown in the UI,
//! front-desk hours, and whatever else the front end wants to persist).

use std::collections::BTreeMap;

use anyhow::Result;
use rusqlite::OptionalExtension;

use super::Database;

impl Database {
    /// Get a setting by key.
    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        let value = conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// All settings, sorted by key.
    pub fn settings(&self) -> Result<BTreeMap<String, String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
        Ok(pairs)
    }

    /// Set a setting (upsert).
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a setting. Returns whether it existed.
    pub fn remove_setting(&self, key: &str) -> Result<bool> {
        let conn = self.conn();
        Ok(conn.execute("DELETE FROM settings WHERE key = ?1", [key])? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem_db() -> Database {
        Database::in_memory().unwrap()
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let db = mem_db();
        assert!(db.setting("nonexistent").unwrap().is_none());
    }

    #[test]
    fn set_overwrites_existing() {
        let db = mem_db();
        db.set_setting("portaria.horario", "6h-22h").unwrap();
        db.set_setting("portaria.horario", "24h").unwrap();
        assert_eq!(db.setting("portaria.horario").unwrap().unwrap(), "24h");
    }

    #[test]
    fn remove_reports_existence() {
        let db = mem_db();
        db.set_setting("tema", "escuro").unwrap();
        assert!(db.remove_setting("tema").unwrap());
        assert!(!db.remove_setting("tema").unwrap());
        assert!(db.setting("tema").unwrap().is_none());
    }

    #[test]
    fn settings_lists_sorted() {
        let db = mem_db();
        db.set_setting("b", "2").unwrap();
        db.set_setting("a", "1").unwrap();
        let all: Vec<_> = db.settings().unwrap().into_iter().collect();
        assert_eq!(
            all,
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings-test.db");
        let path_str = path.to_str().unwrap();

        {
            let db = Database::open(path_str).unwrap();
            db.set_setting("nome", "Residencial Domus").unwrap();
        }

        {
            let db = Database::open(path_str).unwrap();
            assert_eq!(db.setting("nome").unwrap().unwrap(), "Residencial Domus");
        }
    }
}
