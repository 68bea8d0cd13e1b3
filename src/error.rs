use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ProgramError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests a program export or emits the rendered documents.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the CSV reader fails on a malformed record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when serializing the model dump fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a spreadsheet lacks a column the schema requires.
    #[error("missing column '{0}' in spreadsheet")]
    MissingColumn(String),

    /// Raised when a session timestamp cannot be parsed. A session without
    /// a valid start or end cannot be placed in the schedule.
    #[error("invalid timestamp '{value}' in column {column}")]
    InvalidSessionTime { column: String, value: String },

    /// Raised when two session rows claim the same day, time, and room.
    #[error("time conflict: two sessions share {day} {time} in room '{room}'")]
    TimeConflict {
        day: NaiveDate,
        time: NaiveTime,
        room: String,
    },

    /// Raised when a contribution's author, organisation, and email lists
    /// disagree in length.
    #[error(
        "contribution '{title}': {authors} author(s) but {organisations} \
         organisation entr(ies) and {emails} email entr(ies)"
    )]
    AuthorFieldMismatch {
        title: String,
        authors: usize,
        organisations: usize,
        emails: usize,
    },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
