use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{ProgramError, Result};
use crate::io::SheetRow;
use crate::model::authors::AuthorsRegistry;
use crate::model::contribution::{Contribution, ContributionKind, RawContribution};
use crate::model::ParseOptions;
use crate::text;

/// Short-code prefix marking a poster session.
pub const POSTER_PREFIX: &str = "Pos";

const SESSION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Oral,
    Poster,
    Symposium,
}

/// One time-slot-and-room block with its ordered contributions.
///
/// Built from a single spreadsheet row; immutable after construction except
/// for the contribution identifiers the owning conference assigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    start: NaiveDateTime,
    end: NaiveDateTime,
    room: String,
    chair: Option<String>,
    title: String,
    short: String,
    kind: SessionKind,
    organizer: Option<String>,
    contributions: Vec<Contribution>,
}

impl Session {
    /// Parses one session row, including its embedded contribution slots.
    /// Returns the session together with the number of contributions whose
    /// time fields were malformed and degraded to "no time".
    pub(crate) fn from_row(
        row: &SheetRow,
        authors: Option<&AuthorsRegistry>,
        options: &ParseOptions,
    ) -> Result<(Self, usize)> {
        let start = parse_session_time(row, "session_start")?;
        let end = parse_session_time(row, "session_end")?;
        let room = row.require("session_room")?.trim().to_string();
        let short = row.require("session_short")?.trim().to_string();
        let chair = non_empty(row.get("chair1"));
        let mut title = row.require("session_title")?.trim().to_string();

        // Symposia carry their organizer in a trailing parenthesis:
        // "Title (Organizer)".
        let mut organizer = None;
        let kind = if short.starts_with(POSTER_PREFIX) {
            SessionKind::Poster
        } else if let Some((stripped, name)) = extract_organizer(&title) {
            title = stripped;
            organizer = Some(name);
            SessionKind::Symposium
        } else {
            SessionKind::Oral
        };

        let contribution_kind = match kind {
            SessionKind::Poster => ContributionKind::Poster,
            SessionKind::Oral | SessionKind::Symposium => ContributionKind::Talk,
        };

        let mut contributions = Vec::new();
        let mut degraded = 0;
        for slot in 1..=options.max_slots {
            let slot_title = row.get(&format!("p{slot}_title")).trim();
            if slot_title.is_empty() {
                // First empty title ends the slot sequence.
                break;
            }

            let author_list = text::split_list(row.get(&format!("p{slot}_authors")), '\n');
            let mut organisations =
                text::split_list(row.get(&format!("p{slot}_organisations")), '\n');
            if organisations.is_empty() {
                if let Some(registry) = authors {
                    organisations = author_list
                        .iter()
                        .map(|name| {
                            registry
                                .organisations(name)
                                .map(|orgs| orgs.join("; "))
                                .unwrap_or_default()
                        })
                        .collect();
                }
            }
            let emails = text::split_list(row.get(&format!("p{slot}_emails")), '\n');

            let (slot_start, slot_end) = match parse_slot_times(row, slot) {
                Ok(times) => times,
                Err(()) => {
                    degraded += 1;
                    (None, None)
                }
            };

            contributions.push(Contribution::build(
                RawContribution {
                    title: slot_title.to_string(),
                    authors: author_list,
                    organisations,
                    abstract_text: row.get(&format!("p{slot}_abstract")).trim().to_string(),
                    emails,
                    start: slot_start,
                    end: slot_end,
                },
                contribution_kind,
                options,
            )?);
        }

        // Posters without a time keep their input order; the stable sort
        // only moves timed contributions.
        contributions.sort_by_key(Contribution::start);

        Ok((
            Self {
                start,
                end,
                room,
                chair,
                title,
                short,
                kind,
                organizer,
                contributions,
            },
            degraded,
        ))
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn chair(&self) -> Option<&str> {
        self.chair.as_deref()
    }

    /// The symposium organizer extracted from the title, when present.
    pub fn organizer(&self) -> Option<&str> {
        self.organizer.as_deref()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start.time()
    }

    pub fn start_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_label(&self) -> String {
        self.end.format("%H:%M").to_string()
    }

    pub fn weekday(&self) -> String {
        self.start.format("%A").to_string()
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    pub(crate) fn contributions_mut(&mut self) -> &mut [Contribution] {
        &mut self.contributions
    }

    /// Smallest contribution identifier in the session, used as the
    /// session's position in numbering order.
    pub fn min_contribution_id(&self) -> Option<u32> {
        self.contributions.iter().filter_map(Contribution::id).min()
    }

    pub fn max_contribution_id(&self) -> Option<u32> {
        self.contributions.iter().filter_map(Contribution::id).max()
    }
}

fn parse_session_time(row: &SheetRow, column: &str) -> Result<NaiveDateTime> {
    let value = row.require(column)?.trim();
    NaiveDateTime::parse_from_str(value, SESSION_TIME_FORMAT).map_err(|_| {
        ProgramError::InvalidSessionTime {
            column: column.to_string(),
            value: value.to_string(),
        }
    })
}

/// Parses a slot's start/end pair. Empty cells are a legitimate absence
/// (posters have no intra-session time); a malformed value degrades the
/// whole pair, signalled through `Err(())`.
fn parse_slot_times(
    row: &SheetRow,
    slot: usize,
) -> std::result::Result<(Option<NaiveDateTime>, Option<NaiveDateTime>), ()> {
    let start_raw = row.get(&format!("p{slot}_start")).trim();
    let end_raw = row.get(&format!("p{slot}_end")).trim();
    if start_raw.is_empty() && end_raw.is_empty() {
        return Ok((None, None));
    }
    let start = NaiveDateTime::parse_from_str(start_raw, SESSION_TIME_FORMAT).map_err(|_| ())?;
    let end = NaiveDateTime::parse_from_str(end_raw, SESSION_TIME_FORMAT).map_err(|_| ())?;
    Ok((Some(start), Some(end)))
}

/// Splits a symposium title into `(title, organizer)` when it ends with a
/// parenthesized suffix. A trailing `)` with no matching `(` is left alone.
fn extract_organizer(title: &str) -> Option<(String, String)> {
    let stripped = title.strip_suffix(')')?;
    let open = stripped.rfind('(')?;
    let organizer = stripped[open + 1..].trim().to_string();
    let remainder = stripped[..open].trim().to_string();
    Some((remainder, organizer))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_row(extra: Vec<(&'static str, &'static str)>) -> SheetRow {
        let mut pairs = vec![
            ("session_start", "2017-09-04 09:00"),
            ("session_end", "2017-09-04 10:30"),
            ("session_room", "Aula 1"),
            ("session_title", "Working Memory"),
            ("session_short", "WM-1"),
            ("chair1", "Smith, Anna"),
        ];
        pairs.extend(extra);
        SheetRow::from_pairs(pairs)
    }

    #[test]
    fn symposium_title_yields_organizer() {
        let row = base_row(vec![("session_title", "Memory and Aging (J. Smith)")]);
        let (session, _) = Session::from_row(&row, None, &ParseOptions::default())
            .expect("session parsed");
        assert_eq!(session.kind(), SessionKind::Symposium);
        assert_eq!(session.title(), "Memory and Aging");
        assert_eq!(session.organizer(), Some("J. Smith"));
    }

    #[test]
    fn plain_title_stays_oral() {
        let row = base_row(vec![]);
        let (session, _) = Session::from_row(&row, None, &ParseOptions::default())
            .expect("session parsed");
        assert_eq!(session.kind(), SessionKind::Oral);
        assert_eq!(session.title(), "Working Memory");
        assert_eq!(session.organizer(), None);
        assert_eq!(session.chair(), Some("Smith, Anna"));
    }

    #[test]
    fn poster_short_code_wins_over_title_suffix() {
        let row = base_row(vec![
            ("session_short", "Pos-1"),
            ("session_title", "Posters - Perception (ignored)"),
        ]);
        let (session, _) = Session::from_row(&row, None, &ParseOptions::default())
            .expect("session parsed");
        assert_eq!(session.kind(), SessionKind::Poster);
        assert_eq!(session.organizer(), None);
    }

    #[test]
    fn slot_parsing_stops_at_first_empty_title() {
        let row = base_row(vec![
            ("p1_title", "First"),
            ("p1_authors", "Smith, Anna"),
            ("p1_organisations", "Uni A"),
            ("p2_title", ""),
            ("p3_title", "Ghost slot"),
            ("p3_authors", "Jones, Ben"),
            ("p3_organisations", "Uni B"),
        ]);
        let (session, _) = Session::from_row(&row, None, &ParseOptions::default())
            .expect("session parsed");
        assert_eq!(session.contributions().len(), 1);
        assert_eq!(session.contributions()[0].title(), "First");
    }

    #[test]
    fn malformed_slot_time_degrades_to_untimed() {
        let row = base_row(vec![
            ("p1_title", "First"),
            ("p1_authors", "Smith, Anna"),
            ("p1_organisations", "Uni A"),
            ("p1_start", "not a time"),
            ("p1_end", "2017-09-04 09:20"),
        ]);
        let (session, degraded) = Session::from_row(&row, None, &ParseOptions::default())
            .expect("session parsed");
        assert_eq!(degraded, 1);
        assert_eq!(session.contributions()[0].start(), None);
        assert_eq!(session.contributions()[0].end(), None);
    }

    #[test]
    fn contributions_sort_by_start_with_untimed_first() {
        let row = base_row(vec![
            ("p1_title", "Late"),
            ("p1_authors", "Smith, Anna"),
            ("p1_organisations", "Uni A"),
            ("p1_start", "2017-09-04 09:40"),
            ("p1_end", "2017-09-04 10:00"),
            ("p2_title", "Untimed"),
            ("p2_authors", "Jones, Ben"),
            ("p2_organisations", "Uni B"),
            ("p3_title", "Early"),
            ("p3_authors", "Lee, Cara"),
            ("p3_organisations", "Uni C"),
            ("p3_start", "2017-09-04 09:00"),
            ("p3_end", "2017-09-04 09:20"),
        ]);
        let (session, _) = Session::from_row(&row, None, &ParseOptions::default())
            .expect("session parsed");
        let titles: Vec<&str> = session
            .contributions()
            .iter()
            .map(Contribution::title)
            .collect();
        assert_eq!(titles, vec!["Untimed", "Early", "Late"]);
    }

    #[test]
    fn malformed_session_time_is_fatal() {
        let row = base_row(vec![("session_start", "yesterday-ish")]);
        let error = Session::from_row(&row, None, &ParseOptions::default())
            .expect_err("bad session time must fail");
        assert!(matches!(error, ProgramError::InvalidSessionTime { .. }));
    }
}
