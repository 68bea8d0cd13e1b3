use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{ProgramError, Result};
use crate::io::{self, SheetRow};
use crate::model::authors::AuthorsRegistry;
use crate::model::session::{Session, SessionKind};
use crate::model::ParseOptions;

type RoomMap = BTreeMap<String, Session>;
type SlotMap = BTreeMap<NaiveTime, RoomMap>;

/// The full conference program: an ordered mapping of
/// day → start time → room → session.
///
/// The conference exclusively owns every session and contribution. After
/// construction (which ends with the one-time identifier pass) the whole
/// hierarchy is read-only; the query surface below is all there is.
#[derive(Debug, Serialize)]
pub struct Conference {
    days: BTreeMap<NaiveDate, SlotMap>,
    degraded_contributions: usize,
}

impl Conference {
    /// Reads the sessions spreadsheet and builds the model.
    pub fn load(
        sessions: &Path,
        authors: Option<&AuthorsRegistry>,
        options: &ParseOptions,
    ) -> Result<Self> {
        let rows = io::read_rows(sessions)?;
        Self::from_rows(&rows, authors, options)
    }

    /// Builds the model from already-read rows, rejecting room
    /// double-bookings and finishing with the identifier pass.
    pub fn from_rows(
        rows: &[SheetRow],
        authors: Option<&AuthorsRegistry>,
        options: &ParseOptions,
    ) -> Result<Self> {
        let mut days: BTreeMap<NaiveDate, SlotMap> = BTreeMap::new();
        let mut degraded_contributions = 0;

        for row in rows {
            let (session, degraded) = Session::from_row(row, authors, options)?;
            degraded_contributions += degraded;

            let day = session.day();
            let time = session.start_time();
            let room = session.room().to_string();
            let slot = days.entry(day).or_default().entry(time).or_default();
            if slot.contains_key(&room) {
                return Err(ProgramError::TimeConflict { day, time, room });
            }
            slot.insert(room, session);
        }

        let mut conference = Self {
            days,
            degraded_contributions,
        };
        conference.assign_identifiers();
        Ok(conference)
    }

    /// Assigns conference-wide contribution identifiers in traversal order
    /// (days, then times, then rooms, then session order).
    ///
    /// Talks and posters are numbered independently. At the start of each
    /// day the poster counter advances to the next multiple of 1000
    /// strictly above the current talk counter, so poster identifiers stay
    /// in a block numerically above the talks in progress. The counter
    /// never moves backwards.
    fn assign_identifiers(&mut self) {
        let mut talk_count: u32 = 0;
        let mut poster_count: u32 = 0;
        for slots in self.days.values_mut() {
            let block = (talk_count / 1000 + 1) * 1000;
            if poster_count < block {
                poster_count = block;
            }
            for rooms in slots.values_mut() {
                for session in rooms.values_mut() {
                    let poster = session.kind() == SessionKind::Poster;
                    for contribution in session.contributions_mut() {
                        if poster {
                            contribution.assign_id(poster_count);
                            poster_count += 1;
                        } else {
                            talk_count += 1;
                            contribution.assign_id(talk_count);
                        }
                    }
                }
            }
        }
    }

    /// The conference days, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    /// Slot start times of a day, ascending. Empty for an unknown day.
    pub fn times(&self, day: NaiveDate) -> Vec<NaiveTime> {
        self.days
            .get(&day)
            .map(|slots| slots.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Rooms in use during a slot, in order. Empty for an unknown slot.
    pub fn rooms(&self, day: NaiveDate, time: NaiveTime) -> Vec<&str> {
        self.days
            .get(&day)
            .and_then(|slots| slots.get(&time))
            .map(|rooms| rooms.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The session in a specific room, or `None` when the triple is not
    /// scheduled. Lookup misses never fail.
    pub fn session(&self, day: NaiveDate, time: NaiveTime, room: &str) -> Option<&Session> {
        self.days.get(&day)?.get(&time)?.get(room)
    }

    /// The latest end time across the parallel sessions of a slot. The
    /// rendered slot shows this outer bound.
    pub fn latest_end(&self, day: NaiveDate, time: NaiveTime) -> Option<NaiveDateTime> {
        self.days
            .get(&day)?
            .get(&time)?
            .values()
            .map(Session::end)
            .max()
    }

    /// All sessions of a day ordered by their minimum contained
    /// contribution identifier, which is numbering order rather than
    /// wall-clock order. Sessions without contributions sort first.
    pub fn sessions_at_day(&self, day: NaiveDate, include_posters: bool) -> Vec<&Session> {
        let mut sessions: Vec<&Session> = self
            .days
            .get(&day)
            .map(|slots| slots.values().flat_map(RoomMap::values).collect())
            .unwrap_or_default();
        sessions.sort_by_key(|session| session.min_contribution_id());
        if !include_posters {
            sessions.retain(|session| session.kind() != SessionKind::Poster);
        }
        sessions
    }

    /// The sorted set of distinct room names used across the conference.
    pub fn all_rooms(&self, include_posters: bool) -> Vec<String> {
        let mut rooms = BTreeSet::new();
        for day in self.days.keys() {
            for session in self.sessions_at_day(*day, include_posters) {
                rooms.insert(session.room().to_string());
            }
        }
        rooms.into_iter().collect()
    }

    /// Number of contributions whose time fields were malformed and kept
    /// without a time.
    pub fn degraded_contributions(&self) -> usize {
        self.degraded_contributions
    }

    /// Total number of contributions across the program.
    pub fn contribution_count(&self) -> usize {
        self.days
            .values()
            .flat_map(SlotMap::values)
            .flat_map(RoomMap::values)
            .map(|session| session.contributions().len())
            .sum()
    }
}
