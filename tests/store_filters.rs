//! Filter and persistence semantics of the SQLite-backed store, exercised
//! against a fresh in-memory database per test.

use chrono::NaiveDate;
use roster_manager::{Player, PlayerChanges, PlayerStore, SearchCriteria, SqliteStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn player(name: &str, birth: NaiveDate, team: &str, city: &str, squad: &str, pos: &str) -> Player {
    Player {
        full_name: name.to_string(),
        birth_date: birth,
        team: team.to_string(),
        home_city: city.to_string(),
        squad: squad.to_string(),
        position: pos.to_string(),
    }
}

fn seeded_store() -> (SqliteStore, Vec<Player>) {
    let store = SqliteStore::in_memory().unwrap();
    let players = vec![
        player(
            "John Doe",
            date(1990, 5, 25),
            "Team A",
            "City X",
            "Squad 1",
            "Forward",
        ),
        player(
            "Jane Smith",
            date(1995, 5, 15),
            "Team B",
            "Town",
            "Squad 2",
            "Midfielder",
        ),
        player(
            "Erik Larsson",
            date(1990, 5, 25),
            "Team A",
            "City Y",
            "Squad 2",
            "Goalkeeper",
        ),
    ];
    for p in &players {
        store.add(p).unwrap();
    }
    (store, players)
}

#[test]
fn all_returns_rows_in_insertion_order() {
    let (store, players) = seeded_store();
    assert_eq!(store.all().unwrap(), players);
}

#[test]
fn find_with_empty_criteria_equals_all() {
    let (store, _) = seeded_store();
    assert_eq!(
        store.find(&SearchCriteria::default()).unwrap(),
        store.all().unwrap()
    );
}

#[test]
fn blank_text_criteria_are_ignored() {
    let (store, _) = seeded_store();
    let criteria = SearchCriteria {
        full_name: Some(String::new()),
        team: Some(String::new()),
        ..SearchCriteria::default()
    };
    assert_eq!(store.find(&criteria).unwrap().len(), 3);
}

#[test]
fn text_criteria_match_by_substring() {
    let (store, players) = seeded_store();
    let criteria = SearchCriteria {
        full_name: Some("ohn".to_string()),
        ..SearchCriteria::default()
    };
    assert_eq!(store.find(&criteria).unwrap(), vec![players[0].clone()]);
}

#[test]
fn birth_date_matches_by_exact_equality() {
    let (store, _) = seeded_store();
    let criteria = SearchCriteria {
        birth_date: Some(date(1990, 5, 25)),
        ..SearchCriteria::default()
    };
    assert_eq!(store.find(&criteria).unwrap().len(), 2);

    let criteria = SearchCriteria {
        birth_date: Some(date(1990, 5, 26)),
        ..SearchCriteria::default()
    };
    assert!(store.find(&criteria).unwrap().is_empty());
}

#[test]
fn criteria_are_and_combined() {
    let (store, players) = seeded_store();
    let criteria = SearchCriteria {
        team: Some("Team A".to_string()),
        birth_date: Some(date(1990, 5, 25)),
        squad: Some("2".to_string()),
        ..SearchCriteria::default()
    };
    assert_eq!(store.find(&criteria).unwrap(), vec![players[2].clone()]);
}

#[test]
fn delete_returns_number_of_rows_removed() {
    let (store, _) = seeded_store();
    let criteria = SearchCriteria {
        team: Some("Team A".to_string()),
        ..SearchCriteria::default()
    };
    assert_eq!(store.delete(&criteria).unwrap(), 2);
    assert_eq!(store.count().unwrap(), 1);
    // Same criteria again: nothing left to remove.
    assert_eq!(store.delete(&criteria).unwrap(), 0);
}

#[test]
fn delete_with_empty_criteria_removes_every_row() {
    let (store, _) = seeded_store();
    assert_eq!(store.delete(&SearchCriteria::default()).unwrap(), 3);
    assert!(store.all().unwrap().is_empty());
}

#[test]
fn paginate_slices_in_storage_order() {
    let (store, players) = seeded_store();
    assert_eq!(
        store.paginate(0, 2).unwrap(),
        vec![players[0].clone(), players[1].clone()]
    );
    assert_eq!(store.paginate(2, 2).unwrap(), vec![players[2].clone()]);
    assert!(store.paginate(3, 2).unwrap().is_empty());
    // Count is independent of any slice.
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn replace_matches_the_full_field_set_exactly() {
    let (store, players) = seeded_store();
    let changes = PlayerChanges {
        team: Some("Team C".to_string()),
        ..PlayerChanges::default()
    };
    assert_eq!(store.replace(&players[0], &changes).unwrap(), 1);

    let rows = store.all().unwrap();
    assert_eq!(rows[0].team, "Team C");
    // Only the changed field moved; the rest of the row is intact.
    assert_eq!(rows[0].full_name, players[0].full_name);
    assert_eq!(rows[0].birth_date, players[0].birth_date);
    // Other rows sharing some field values are untouched.
    assert_eq!(rows[2].team, "Team A");
}

#[test]
fn replace_requires_exact_equality_not_substring() {
    let (store, mut original) = seeded_store();
    let mut near_miss = original.remove(0);
    near_miss.full_name = "John".to_string();
    let changes = PlayerChanges {
        position: Some("Defender".to_string()),
        ..PlayerChanges::default()
    };
    assert_eq!(store.replace(&near_miss, &changes).unwrap(), 0);
}

#[test]
fn replace_with_no_changes_is_a_no_op() {
    let (store, players) = seeded_store();
    assert_eq!(
        store.replace(&players[0], &PlayerChanges::default()).unwrap(),
        0
    );
    assert_eq!(store.all().unwrap(), players);
}

#[test]
fn clear_empties_the_table() {
    let (store, _) = seeded_store();
    assert_eq!(store.clear().unwrap(), 3);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn add_search_delete_scenario() {
    let store = SqliteStore::in_memory().unwrap();
    let john = player(
        "John Doe",
        date(1990, 5, 25),
        "Team A",
        "City X",
        "Squad 1",
        "Forward",
    );
    store.add(&john).unwrap();

    let by_team = SearchCriteria {
        team: Some("Team".to_string()),
        ..SearchCriteria::default()
    };
    assert_eq!(store.find(&by_team).unwrap(), vec![john.clone()]);

    let by_position = SearchCriteria {
        position: Some("Forward".to_string()),
        ..SearchCriteria::default()
    };
    assert_eq!(store.delete(&by_position).unwrap(), 1);
    assert!(store.all().unwrap().is_empty());
}
