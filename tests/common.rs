#![allow(dead_code)]

use std::path::Path;

/// One `p{N}_*` contribution slot of a session row.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    pub title: String,
    pub authors: String,
    pub organisations: String,
    pub abstract_text: String,
    pub start: String,
    pub end: String,
    pub emails: String,
}

pub fn slot(title: &str, authors: &str, organisations: &str) -> Slot {
    Slot {
        title: title.to_string(),
        authors: authors.to_string(),
        organisations: organisations.to_string(),
        ..Slot::default()
    }
}

impl Slot {
    pub fn timed(mut self, start: &str, end: &str) -> Self {
        self.start = start.to_string();
        self.end = end.to_string();
        self
    }

    pub fn with_abstract(mut self, text: &str) -> Self {
        self.abstract_text = text.to_string();
        self
    }

    pub fn with_emails(mut self, emails: &str) -> Self {
        self.emails = emails.to_string();
        self
    }
}

/// One session row of the sessions spreadsheet.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub start: String,
    pub end: String,
    pub room: String,
    pub title: String,
    pub short: String,
    pub chair: String,
    pub slots: Vec<Slot>,
}

pub fn session_row(start: &str, end: &str, room: &str, title: &str, short: &str) -> SessionRow {
    SessionRow {
        start: start.to_string(),
        end: end.to_string(),
        room: room.to_string(),
        title: title.to_string(),
        short: short.to_string(),
        chair: String::new(),
        slots: Vec::new(),
    }
}

impl SessionRow {
    pub fn chair(mut self, chair: &str) -> Self {
        self.chair = chair.to_string();
        self
    }

    pub fn slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }
}

/// Writes a sessions spreadsheet covering as many `p{N}_*` column groups
/// as the widest row needs.
pub fn write_sessions_csv(path: &Path, rows: &[SessionRow]) {
    let max_slots = rows.iter().map(|row| row.slots.len()).max().unwrap_or(0);
    let mut writer = csv::Writer::from_path(path).expect("CSV writer");

    let mut header = vec![
        "session_start".to_string(),
        "session_end".to_string(),
        "session_room".to_string(),
        "session_title".to_string(),
        "session_short".to_string(),
        "chair1".to_string(),
    ];
    for n in 1..=max_slots {
        for field in [
            "title",
            "authors",
            "organisations",
            "abstract",
            "start",
            "end",
            "emails",
        ] {
            header.push(format!("p{n}_{field}"));
        }
    }
    writer.write_record(&header).expect("header written");

    for row in rows {
        let mut record = vec![
            row.start.clone(),
            row.end.clone(),
            row.room.clone(),
            row.title.clone(),
            row.short.clone(),
            row.chair.clone(),
        ];
        for n in 0..max_slots {
            match row.slots.get(n) {
                Some(slot) => record.extend([
                    slot.title.clone(),
                    slot.authors.clone(),
                    slot.organisations.clone(),
                    slot.abstract_text.clone(),
                    slot.start.clone(),
                    slot.end.clone(),
                    slot.emails.clone(),
                ]),
                None => record.extend((0..7).map(|_| String::new())),
            }
        }
        writer.write_record(&record).expect("row written");
    }
    writer.flush().expect("CSV flushed");
}

/// Writes an authors spreadsheet with `name` and `organisation` columns.
pub fn write_authors_csv(path: &Path, entries: &[(&str, &str)]) {
    let mut writer = csv::Writer::from_path(path).expect("CSV writer");
    writer
        .write_record(["name", "organisation"])
        .expect("header written");
    for (name, organisation) in entries {
        writer
            .write_record([*name, *organisation])
            .expect("row written");
    }
    writer.flush().expect("CSV flushed");
}
