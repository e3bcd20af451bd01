//! SQLite-backed [`PlayerStore`] implementation. Every method encapsulates
//! one statement so the rest of the codebase never sees SQL. Filtered reads
//! and deletes share a single WHERE-clause builder, which doubles as the
//! source of truth for the criteria semantics.

use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, params_from_iter, Connection, Row};

use super::{PlayerStore, StoreError};
use crate::models::{non_blank, Player, PlayerChanges, SearchCriteria};

/// Column list shared by every read so row mapping stays positional and
/// consistent. The surrogate `id` is deliberately not selected.
const PLAYER_SELECT_SQL: &str =
    "SELECT full_name, birth_date, team, home_city, squad, position FROM players";

/// Owns the embedded database connection for the lifetime of the store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wrap an already-bootstrapped connection (see [`super::open`] and
    /// friends).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Convenience constructor for a throwaway in-memory roster.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(super::open_in_memory()?))
    }

    fn query_players(&self, sql: &str, params: &[String]) -> Result<Vec<Player>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let players = stmt
            .query_map(params_from_iter(params.iter()), row_to_player)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }
}

impl PlayerStore for SqliteStore {
    fn add(&self, player: &Player) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO players (full_name, birth_date, team, home_city, squad, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                player.full_name,
                player.birth_date,
                player.team,
                player.home_city,
                player.squad,
                player.position,
            ],
        )?;
        Ok(())
    }

    fn all(&self) -> Result<Vec<Player>, StoreError> {
        self.query_players(PLAYER_SELECT_SQL, &[])
    }

    fn find(&self, criteria: &SearchCriteria) -> Result<Vec<Player>, StoreError> {
        let (clause, params) = filter_clause(criteria);
        self.query_players(&format!("{PLAYER_SELECT_SQL}{clause}"), &params)
    }

    fn delete(&self, criteria: &SearchCriteria) -> Result<usize, StoreError> {
        let (clause, params) = filter_clause(criteria);
        let deleted = self.conn.execute(
            &format!("DELETE FROM players{clause}"),
            params_from_iter(params.iter()),
        )?;
        debug!("deleted {deleted} player row(s)");
        Ok(deleted)
    }

    fn paginate(&self, offset: u64, limit: u64) -> Result<Vec<Player>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLAYER_SELECT_SQL} LIMIT ?1 OFFSET ?2"))?;
        let players = stmt
            .query_map(params![limit, offset], row_to_player)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(count)
    }

    fn replace(&self, original: &Player, changes: &PlayerChanges) -> Result<usize, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut assignments = Vec::new();
        let mut params: Vec<String> = Vec::new();
        let mut push = |column: &'static str, value: String| {
            assignments.push(format!("{column} = ?"));
            params.push(value);
        };
        if let Some(value) = &changes.full_name {
            push("full_name", value.clone());
        }
        if let Some(value) = changes.birth_date {
            push("birth_date", value.to_string());
        }
        if let Some(value) = &changes.team {
            push("team", value.clone());
        }
        if let Some(value) = &changes.home_city {
            push("home_city", value.clone());
        }
        if let Some(value) = &changes.squad {
            push("squad", value.clone());
        }
        if let Some(value) = &changes.position {
            push("position", value.clone());
        }

        // The original record is matched on its full field set, exact
        // equality rather than substring.
        let sql = format!(
            "UPDATE players SET {} WHERE full_name = ? AND birth_date = ? AND team = ? \
             AND home_city = ? AND squad = ? AND position = ?",
            assignments.join(", "),
        );
        params.extend([
            original.full_name.clone(),
            original.birth_date.to_string(),
            original.team.clone(),
            original.home_city.clone(),
            original.squad.clone(),
            original.position.clone(),
        ]);

        let updated = self.conn.execute(&sql, params_from_iter(params.iter()))?;
        debug!("rewrote {updated} player row(s)");
        Ok(updated)
    }

    fn clear(&self) -> Result<usize, StoreError> {
        let deleted = self.conn.execute("DELETE FROM players", [])?;
        debug!("cleared {deleted} player row(s)");
        Ok(deleted)
    }
}

/// Map one selected row back to a [`Player`]. The `birth_date` column is
/// ISO-8601 text; the chrono integration parses it straight into a
/// [`NaiveDate`].
fn row_to_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        full_name: row.get(0)?,
        birth_date: row.get::<_, NaiveDate>(1)?,
        team: row.get(2)?,
        home_city: row.get(3)?,
        squad: row.get(4)?,
        position: row.get(5)?,
    })
}

/// Build the shared WHERE clause for `find`/`delete`. Absent or blank
/// criteria contribute nothing; with no predicates at all the clause is empty
/// and the statement scans (or removes) every row.
fn filter_clause(criteria: &SearchCriteria) -> (String, Vec<String>) {
    let mut predicates = Vec::new();
    let mut params = Vec::new();

    let mut like = |column: &'static str, value: Option<&str>| {
        if let Some(value) = value {
            predicates.push(format!("{column} LIKE ?"));
            params.push(format!("%{value}%"));
        }
    };
    like("full_name", non_blank(&criteria.full_name));
    like("team", non_blank(&criteria.team));
    like("home_city", non_blank(&criteria.home_city));
    like("squad", non_blank(&criteria.squad));
    like("position", non_blank(&criteria.position));

    if let Some(date) = criteria.birth_date {
        predicates.push("birth_date = ?".to_string());
        params.push(date.to_string());
    }

    if predicates.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", predicates.join(" AND ")), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_produce_no_clause() {
        let (clause, params) = filter_clause(&SearchCriteria::default());
        assert!(clause.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn present_criteria_are_and_combined() {
        let criteria = SearchCriteria {
            team: Some("Team".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 25),
            ..SearchCriteria::default()
        };
        let (clause, params) = filter_clause(&criteria);
        assert_eq!(clause, " WHERE team LIKE ? AND birth_date = ?");
        assert_eq!(params, vec!["%Team%".to_string(), "1990-05-25".to_string()]);
    }
}
