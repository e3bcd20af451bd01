//! Bulk interchange between roster entries and the nested XML document used
//! for import/export. The document shape is one `<players>` root wrapping a
//! `<player>` container per record, each carrying exactly the six named
//! fields as text content:
//!
//! ```xml
//! <players>
//!     <player>
//!         <full_name>Jane Smith</full_name>
//!         <birth_date>1995-05-15</birth_date>
//!         <team>Team B</team>
//!         <home_city>Town</home_city>
//!         <squad>Squad 2</squad>
//!         <position>Midfielder</position>
//!     </player>
//! </players>
//! ```
//!
//! Import commits each record to the store as soon as its container is fully
//! read, so records added before a fault stay in place; there is no rollback.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

use crate::db::{PlayerStore, StoreError};
use crate::models::Player;

const ROOT_TAG: &str = "players";
const PLAYER_TAG: &str = "player";

/// Indentation used by the writer; purely cosmetic, the reader trims
/// inter-element whitespace.
const INDENT_CHAR: u8 = b' ';
const INDENT_SIZE: usize = 4;

/// Faults raised while reading or writing an interchange document. Import and
/// export both propagate these as structured errors; nothing is reported
/// through a side channel.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Reading or writing the file itself failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("malformed document: {0}")]
    Malformed(#[from] quick_xml::Error),

    /// A `<player>` container lacks text for one of the six required fields.
    /// Containers are numbered from 1 in document order.
    #[error("player {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// The `birth_date` text is not a valid ISO-8601 calendar date.
    #[error("player {index} has invalid birth date `{value}`")]
    InvalidDate { index: usize, value: String },

    /// Persisting an imported record failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse the document at `path` and add one roster entry per well-formed
/// `<player>` container, committing each record as it is read. Returns the
/// number of records imported. A fault aborts the remainder of the document
/// but leaves previously-added rows in place.
pub fn import_from_xml<S: PlayerStore>(store: &S, path: impl AsRef<Path>) -> Result<usize, XmlError> {
    let path = path.as_ref();
    let document = fs::read_to_string(path)?;
    let mut reader = Reader::from_str(&document);
    reader.config_mut().trim_text(true);

    let mut imported = 0usize;
    let mut current: Option<RawPlayer> = None;
    let mut field: Option<Vec<u8>> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if start.name().as_ref() == PLAYER_TAG.as_bytes() {
                    current = Some(RawPlayer::default());
                    field = None;
                } else if current.is_some() {
                    field = Some(start.name().as_ref().to_vec());
                }
            }
            Event::Text(text) => {
                if let (Some(raw), Some(tag)) = (current.as_mut(), field.as_deref()) {
                    if let Some(slot) = raw.slot(tag) {
                        let unescaped = text.unescape().map_err(quick_xml::Error::from)?;
                        *slot = Some(unescaped.into_owned());
                    }
                }
            }
            Event::End(end) => {
                if end.name().as_ref() == PLAYER_TAG.as_bytes() {
                    if let Some(raw) = current.take() {
                        let player = raw.into_player(imported + 1)?;
                        store.add(&player)?;
                        imported += 1;
                    }
                } else {
                    field = None;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    info!("imported {imported} player(s) from {}", path.display());
    Ok(imported)
}

/// Write the given roster entries to `path` as an interchange document,
/// overwriting any existing file. An empty list produces a root element with
/// zero children, which re-imports as zero records. No partial-file cleanup
/// is attempted on fault.
pub fn export_to_xml(path: impl AsRef<Path>, players: &[Player]) -> Result<(), XmlError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), INDENT_CHAR, INDENT_SIZE);

    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;
    for player in players {
        writer.write_event(Event::Start(BytesStart::new(PLAYER_TAG)))?;
        write_field(&mut writer, "full_name", &player.full_name)?;
        write_field(&mut writer, "birth_date", &player.birth_date.to_string())?;
        write_field(&mut writer, "team", &player.team)?;
        write_field(&mut writer, "home_city", &player.home_city)?;
        write_field(&mut writer, "squad", &player.squad)?;
        write_field(&mut writer, "position", &player.position)?;
        writer.write_event(Event::End(BytesEnd::new(PLAYER_TAG)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
    writer.into_inner().flush()?;

    info!("exported {} player(s) to {}", players.len(), path.display());
    Ok(())
}

fn write_field<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &str,
) -> Result<(), XmlError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Accumulates field text while a `<player>` container is being read.
/// Self-closing or empty field elements never produce a text event, so they
/// surface as a missing field, same as an absent element.
#[derive(Default)]
struct RawPlayer {
    full_name: Option<String>,
    birth_date: Option<String>,
    team: Option<String>,
    home_city: Option<String>,
    squad: Option<String>,
    position: Option<String>,
}

impl RawPlayer {
    /// The slot a child element's text belongs to, or `None` for tags outside
    /// the six-field schema (which are ignored, matching a lenient reader).
    fn slot(&mut self, tag: &[u8]) -> Option<&mut Option<String>> {
        match tag {
            b"full_name" => Some(&mut self.full_name),
            b"birth_date" => Some(&mut self.birth_date),
            b"team" => Some(&mut self.team),
            b"home_city" => Some(&mut self.home_city),
            b"squad" => Some(&mut self.squad),
            b"position" => Some(&mut self.position),
            _ => None,
        }
    }

    fn into_player(self, index: usize) -> Result<Player, XmlError> {
        let require = |field: &'static str, value: Option<String>| {
            value.ok_or(XmlError::MissingField { index, field })
        };

        let birth_text = require("birth_date", self.birth_date)?;
        let birth_date = NaiveDate::parse_from_str(&birth_text, "%Y-%m-%d").map_err(|_| {
            XmlError::InvalidDate {
                index,
                value: birth_text.clone(),
            }
        })?;

        Ok(Player {
            full_name: require("full_name", self.full_name)?,
            birth_date,
            team: require("team", self.team)?,
            home_city: require("home_city", self.home_city)?,
            squad: require("squad", self.squad)?,
            position: require("position", self.position)?,
        })
    }
}
