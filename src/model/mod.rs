//! The in-memory conference data model.
//!
//! [`Conference`] normalizes raw spreadsheet rows into a
//! day → time → room → session → contribution hierarchy, assigns stable
//! numeric identifiers, and exposes the ordered traversal queries the
//! renderers consume. Nothing outside this module mutates the hierarchy
//! once it is built.

pub mod authors;
pub mod conference;
pub mod contribution;
pub mod session;

pub use authors::AuthorsRegistry;
pub use conference::Conference;
pub use contribution::{Contribution, ContributionKind};
pub use session::{POSTER_PREFIX, Session, SessionKind};

/// Knobs controlling how session rows are interpreted.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Highest `p{N}_*` slot scanned per session row.
    pub max_slots: usize,
    /// Uppercase percentage above which a title counts as shouting.
    pub uppercase_threshold: f64,
    /// Rewrite all-lowercase and shouted titles to title case.
    pub fix_uppercase_titles: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_slots: 80,
            uppercase_threshold: 75.0,
            fix_uppercase_titles: true,
        }
    }
}
