use chrono::NaiveDateTime;
use indexmap::IndexSet;
use serde::Serialize;

use crate::error::{ProgramError, Result};
use crate::model::ParseOptions;
use crate::text;

/// Whether an entry is presented as a talk or sits in a poster session.
/// The kind is inherited from the parent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    Talk,
    Poster,
}

/// Field values of one contribution slot before validation. Built by the
/// session parser, consumed by [`Contribution::build`].
#[derive(Debug, Default)]
pub(crate) struct RawContribution {
    pub title: String,
    /// Raw `"surname, first-name"` strings, order preserved.
    pub authors: Vec<String>,
    /// One entry per author; multiple affiliations of one author are
    /// semicolon-separated inside the entry.
    pub organisations: Vec<String>,
    pub abstract_text: String,
    pub emails: Vec<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// One talk or poster with its authors, affiliations, and abstract.
///
/// Immutable after construction apart from the conference-wide identifier,
/// which the owning [`Conference`](crate::model::Conference) assigns exactly
/// once after the full schedule is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    authors: Vec<String>,
    title: String,
    organisations: Vec<Vec<String>>,
    unique_organisations: IndexSet<String>,
    affiliation_ids: Vec<Vec<usize>>,
    first_names: Vec<String>,
    last_names: Vec<String>,
    #[serde(rename = "abstract")]
    abstract_text: String,
    kind: ContributionKind,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    emails: Vec<String>,
    id: Option<u32>,
}

impl Contribution {
    pub(crate) fn build(
        raw: RawContribution,
        kind: ContributionKind,
        options: &ParseOptions,
    ) -> Result<Self> {
        let RawContribution {
            title,
            authors,
            organisations,
            abstract_text,
            emails,
            start,
            end,
        } = raw;

        // An absent emails column reads as one empty address per author so
        // the three lists stay aligned.
        let emails = if emails.is_empty() {
            vec![String::new(); authors.len()]
        } else {
            emails
        };

        if authors.len() != organisations.len() || authors.len() != emails.len() {
            return Err(ProgramError::AuthorFieldMismatch {
                title,
                authors: authors.len(),
                organisations: organisations.len(),
                emails: emails.len(),
            });
        }

        let title = if options.fix_uppercase_titles {
            text::normalize_title(&title, options.uppercase_threshold)
        } else {
            title
        };

        let mut unique_organisations = IndexSet::new();
        let mut organisation_groups = Vec::with_capacity(authors.len());
        for entry in &organisations {
            let group = text::split_list(entry, ';');
            for organisation in &group {
                unique_organisations.insert(organisation.clone());
            }
            organisation_groups.push(group);
        }

        let mut first_names = Vec::with_capacity(authors.len());
        let mut last_names = Vec::with_capacity(authors.len());
        let mut affiliation_ids = Vec::with_capacity(authors.len());
        for (author, group) in authors.iter().zip(&organisation_groups) {
            let (last, first) = split_author_name(author);
            last_names.push(last);
            first_names.push(first);
            let ids: Vec<usize> = group
                .iter()
                .filter_map(|organisation| unique_organisations.get_index_of(organisation))
                .map(|index| index + 1)
                .collect();
            affiliation_ids.push(ids);
        }

        Ok(Self {
            authors,
            title,
            organisations: organisation_groups,
            unique_organisations,
            affiliation_ids,
            first_names,
            last_names,
            abstract_text,
            kind,
            start,
            end,
            emails,
            id: None,
        })
    }

    /// Sets the conference-wide identifier. Called exactly once by the
    /// owning conference after all sessions are loaded.
    pub(crate) fn assign_id(&mut self, id: u32) {
        debug_assert!(self.id.is_none(), "identifier assigned twice");
        self.id = Some(id);
    }

    /// The sequential conference identifier, or `None` before finalization.
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn kind(&self) -> ContributionKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    /// Raw author strings as supplied, order preserved.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn first_names(&self) -> &[String] {
        &self.first_names
    }

    pub fn last_names(&self) -> &[String] {
        &self.last_names
    }

    /// Per-author affiliation groups, aligned with [`Self::authors`].
    pub fn organisations(&self) -> &[Vec<String>] {
        &self.organisations
    }

    /// Deduplicated affiliations in stable insertion order.
    pub fn unique_organisations(&self) -> impl ExactSizeIterator<Item = &str> {
        self.unique_organisations.iter().map(String::as_str)
    }

    /// Per-author 1-based indices into the unique-organisation set.
    pub fn affiliation_ids(&self) -> &[Vec<usize>] {
        &self.affiliation_ids
    }

    /// True when the contribution references more than one organisation,
    /// which is when affiliation marks carry information.
    pub fn multiple_affiliations(&self) -> bool {
        self.unique_organisations.len() > 1
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// The first author's email, treated as the contact address.
    pub fn contact_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str).filter(|e| !e.is_empty())
    }

    pub fn first_author_surname(&self) -> Option<&str> {
        self.last_names.first().map(String::as_str)
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    /// `HH:MM` label of the start time, if the slot carries one.
    pub fn start_label(&self) -> Option<String> {
        self.start.map(|t| t.format("%H:%M").to_string())
    }

    pub fn end_label(&self) -> Option<String> {
        self.end.map(|t| t.format("%H:%M").to_string())
    }

    /// Display names per author: full names, or surnames optionally
    /// followed by first-name initials.
    pub fn author_names(&self, full_names: bool, with_initials: bool) -> Vec<String> {
        self.last_names
            .iter()
            .zip(&self.first_names)
            .map(|(last, first)| {
                if full_names && !first.is_empty() {
                    format!("{first} {last}")
                } else if with_initials && !first.is_empty() {
                    format!("{last}, {}", text::initials(first))
                } else {
                    last.clone()
                }
            })
            .collect()
    }

    /// Surnames joined into one line, the short form used by the overview.
    pub fn author_line(&self) -> String {
        text::join_names(&self.author_names(false, false))
    }

    /// The affiliations as one plain-text line: a single organisation by
    /// itself, several prefixed by their footnote index.
    pub fn organisation_line(&self) -> String {
        match self.unique_organisations.len() {
            0 => String::new(),
            1 => self.unique_organisations[0].clone(),
            _ => self
                .unique_organisations
                .iter()
                .enumerate()
                .map(|(index, organisation)| format!("[{}] {organisation}", index + 1))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Splits `"surname, first-name"` on the first comma. A name without a
/// comma is kept whole as the surname.
fn split_author_name(author: &str) -> (String, String) {
    match author.split_once(',') {
        Some((last, first)) => (last.trim().to_string(), first.trim().to_string()),
        None => (author.trim().to_string(), String::new()),
    }
}
