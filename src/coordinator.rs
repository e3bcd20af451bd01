//! Orchestration layer between the presentation layer and the store and
//! interchange modules. The coordinator validates input before it touches
//! storage, translates low-level faults into the domain taxonomy in
//! [`crate::error`], and broadcasts change notifications to registered
//! listeners.

use std::path::Path;

use chrono::{Local, NaiveDate};
use log::warn;

use crate::db::PlayerStore;
use crate::error::Error;
use crate::models::{Player, PlayerChanges, SearchCriteria};
use crate::xml;

/// Event raised after a state-changing or query operation completes. Emission
/// is a synchronous, ordered broadcast to the listeners registered at that
/// moment.
#[derive(Debug, Clone)]
pub enum Notification {
    /// A record was added; carries the new record.
    Added(Player),
    /// A search completed with at least one match; carries the full list.
    Results(Vec<Player>),
    /// A delete completed; carries the number of rows removed.
    Deleted(usize),
    /// The roster changed (or was re-read) in a way not covered above.
    Updated,
}

/// Registered callback invoked for every notification.
pub type Listener = Box<dyn Fn(&Notification)>;

/// Mediates between the presentation layer and the store/interchange. Owns
/// the store (and through it the database connection) for its lifetime;
/// generic over [`PlayerStore`] so tests can substitute an in-memory double.
pub struct Coordinator<S: PlayerStore> {
    store: S,
    listeners: Vec<Listener>,
}

impl<S: PlayerStore> Coordinator<S> {
    /// Build a coordinator over an already-opened store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for all subsequent notifications. Listeners are
    /// invoked synchronously, in registration order, on the calling thread.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn emit(&self, notification: &Notification) {
        for listener in &self.listeners {
            listener(notification);
        }
    }

    /// Validate and persist a new roster entry, then broadcast
    /// [`Notification::Added`] with the record. Validation runs before any
    /// storage call: the name must be non-empty and the birth date must not
    /// be later than today.
    pub fn add_player(
        &self,
        full_name: &str,
        birth_date: NaiveDate,
        team: &str,
        home_city: &str,
        squad: &str,
        position: &str,
    ) -> Result<Player, Error> {
        if full_name.trim().is_empty() {
            return Err(Error::Validation("Full name cannot be empty.".to_string()));
        }
        if birth_date > Local::now().date_naive() {
            return Err(Error::Validation(
                "Birth date cannot be in the future.".to_string(),
            ));
        }

        let player = Player {
            full_name: full_name.to_string(),
            birth_date,
            team: team.to_string(),
            home_city: home_city.to_string(),
            squad: squad.to_string(),
            position: position.to_string(),
        };
        self.store
            .add(&player)
            .map_err(|err| Error::Persistence(err.message().to_string()))?;

        self.emit(&Notification::Added(player.clone()));
        Ok(player)
    }

    /// Run a filtered search. Zero matches is the distinct
    /// [`Error::NotFound`] outcome rather than an empty list, so display
    /// logic can tell "found nothing" apart from "not searched yet". On a hit
    /// the full match list is broadcast as [`Notification::Results`].
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Player>, Error> {
        let players = self
            .store
            .find(criteria)
            .map_err(|err| Error::Persistence(err.message().to_string()))?;
        if players.is_empty() {
            return Err(Error::NotFound);
        }
        self.emit(&Notification::Results(players.clone()));
        Ok(players)
    }

    /// Delete every record matching the criteria. Zero affected rows is the
    /// distinct [`Error::NothingDeleted`] outcome; otherwise the removed
    /// count is broadcast as [`Notification::Deleted`] and returned.
    pub fn delete_players(&self, criteria: &SearchCriteria) -> Result<usize, Error> {
        let deleted = self
            .store
            .delete(criteria)
            .map_err(|err| Error::Persistence(err.message().to_string()))?;
        if deleted == 0 {
            return Err(Error::NothingDeleted);
        }
        self.emit(&Notification::Deleted(deleted));
        Ok(deleted)
    }

    /// Fetch every record in storage order. Always broadcasts
    /// [`Notification::Updated`], even though nothing changed, so list views
    /// refresh unconditionally.
    pub fn list_all(&self) -> Result<Vec<Player>, Error> {
        let players = self
            .store
            .all()
            .map_err(|err| Error::Persistence(err.message().to_string()))?;
        self.emit(&Notification::Updated);
        Ok(players)
    }

    /// Fetch a page of records plus the total row count. The count comes from
    /// an independent store call, not from the returned page, so the two can
    /// disagree if rows change between the reads. Accepted as a known
    /// limitation of the single-user design.
    pub fn paginate(&self, offset: u64, limit: u64) -> Result<(Vec<Player>, u64), Error> {
        let page = self
            .store
            .paginate(offset, limit)
            .map_err(|err| Error::Persistence(err.message().to_string()))?;
        let total = self
            .store
            .count()
            .map_err(|err| Error::Persistence(err.message().to_string()))?;
        Ok((page, total))
    }

    /// Total row count, ignoring all filters.
    pub fn count(&self) -> Result<u64, Error> {
        self.store
            .count()
            .map_err(|err| Error::Persistence(err.message().to_string()))
    }

    /// First record whose name contains `full_name`, if any. Uses the same
    /// substring semantics as `search` but reports absence as `None` instead
    /// of a not-found error.
    pub fn get_player_by_name(&self, full_name: &str) -> Result<Option<Player>, Error> {
        let criteria = SearchCriteria {
            full_name: Some(full_name.to_string()),
            ..SearchCriteria::default()
        };
        let mut players = self
            .store
            .find(&criteria)
            .map_err(|err| Error::Persistence(err.message().to_string()))?;
        Ok(if players.is_empty() {
            None
        } else {
            Some(players.swap_remove(0))
        })
    }

    /// Bulk-import records from an interchange document. Any interchange
    /// fault wraps into [`Error::Import`] with the original message;
    /// [`Notification::Updated`] fires only on success. Records committed
    /// before a fault stay in place (no rollback).
    pub fn import_from_xml(&self, path: impl AsRef<Path>) -> Result<usize, Error> {
        let imported = xml::import_from_xml(&self.store, path).map_err(|err| {
            warn!("import failed: {err}");
            Error::Import(err.to_string())
        })?;
        self.emit(&Notification::Updated);
        Ok(imported)
    }

    /// Bulk-export records to an interchange document. With `None` the
    /// current contents of the store are fetched and exported; with a list
    /// exactly those records are written without touching storage. Any fault,
    /// including the fetch, wraps into [`Error::Export`].
    pub fn export_to_xml(
        &self,
        path: impl AsRef<Path>,
        players: Option<&[Player]>,
    ) -> Result<(), Error> {
        let result = match players {
            Some(players) => xml::export_to_xml(path, players),
            None => self
                .store
                .all()
                .map_err(xml::XmlError::from)
                .and_then(|all| xml::export_to_xml(path, &all)),
        };
        result.map_err(|err| {
            warn!("export failed: {err}");
            Error::Export(err.to_string())
        })
    }

    /// Export exactly the given records; never queries the store.
    pub fn export_selected_to_xml(
        &self,
        path: impl AsRef<Path>,
        players: &[Player],
    ) -> Result<(), Error> {
        self.export_to_xml(path, Some(players))
    }

    /// Overwrite the present `changes` fields on the stored record matching
    /// `original` exactly. Broadcasts [`Notification::Updated`] on success;
    /// storage faults wrap into [`Error::Update`].
    pub fn update_player(&self, original: &Player, changes: &PlayerChanges) -> Result<(), Error> {
        self.store
            .replace(original, changes)
            .map_err(|err| Error::Update(err.message().to_string()))?;
        self.emit(&Notification::Updated);
        Ok(())
    }

    /// Remove every record, broadcasting [`Notification::Updated`] on
    /// success. Returns the number of rows removed.
    pub fn clear_all(&self) -> Result<usize, Error> {
        let cleared = self
            .store
            .clear()
            .map_err(|err| Error::Persistence(err.message().to_string()))?;
        self.emit(&Notification::Updated);
        Ok(cleared)
    }
}
