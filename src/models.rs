//! Domain models shared by the persistence, interchange, and coordination
//! layers. The intent is that these types stay light-weight data holders so
//! other layers can focus on querying and orchestration logic.

use std::fmt;

use chrono::NaiveDate;

/// Separator used by the pipe-delimited display format. Kept as a constant
/// because the CLI and the `Display` impl both rely on the exact same string.
const DISPLAY_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One roster entry. Equality is field-for-field; the surrogate row id lives
/// only inside the SQLite store and is never surfaced here.
pub struct Player {
    /// Player's full name. Validated non-empty at the coordinator boundary.
    pub full_name: String,
    /// Birth date, persisted as ISO-8601 text (`YYYY-MM-DD`).
    pub birth_date: NaiveDate,
    /// Team the player belongs to. Free text, no enumerated domain.
    pub team: String,
    /// Player's home city.
    pub home_city: String,
    /// Squad within the team.
    pub squad: String,
    /// Playing position.
    pub position: String,
}

impl fmt::Display for Player {
    /// Render the pipe-delimited single-line form used by list output, for
    /// example `John Doe | 1990-05-25 | Team A | City X | Squad 1 | Forward`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.full_name,
            self.birth_date,
            self.team,
            self.home_city,
            self.squad,
            self.position,
            sep = DISPLAY_SEPARATOR,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Sparse filter used by `find` and `delete`. Each field is optional; `None`
/// (or an empty string for the text fields) means "ignore this field". Text
/// fields match by substring, `birth_date` by exact equality, and every
/// present criterion is AND-combined. The default value matches every row.
pub struct SearchCriteria {
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub team: Option<String>,
    pub home_city: Option<String>,
    pub squad: Option<String>,
    pub position: Option<String>,
}

impl SearchCriteria {
    /// True when no criterion would contribute a predicate, i.e. the filter
    /// matches every row. Empty strings count as absent so a blank form field
    /// behaves the same as one that was never filled in.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.full_name).is_none()
            && self.birth_date.is_none()
            && non_blank(&self.team).is_none()
            && non_blank(&self.home_city).is_none()
            && non_blank(&self.squad).is_none()
            && non_blank(&self.position).is_none()
    }
}

/// Normalize an optional text criterion: empty strings are treated as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Sparse set of replacement values for an update. Only the present fields
/// are overwritten on the matched row(s).
pub struct PlayerChanges {
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub team: Option<String>,
    pub home_city: Option<String>,
    pub squad: Option<String>,
    pub position: Option<String>,
}

impl PlayerChanges {
    /// True when no field would change, letting the store skip the SQL
    /// round-trip entirely.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.birth_date.is_none()
            && self.team.is_none()
            && self.home_city.is_none()
            && self.squad.is_none()
            && self.position.is_none()
    }
}
