use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::io;
use crate::model::{AuthorsRegistry, Conference, ParseOptions};
use crate::render::abstracts::AbstractsOptions;
use crate::render::{self, BlockOrder};

/// Documents the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Overview,
    Contributions,
    Abstracts,
    Tables,
}

impl Document {
    pub const ALL: [Document; 4] = [
        Document::Overview,
        Document::Contributions,
        Document::Abstracts,
        Document::Tables,
    ];

    /// File name of the rendered include document.
    pub fn file_name(self) -> &'static str {
        match self {
            Document::Overview => "contribution_overview.incl.tex",
            Document::Contributions => "contribution_list.incl.tex",
            Document::Abstracts => "abstracts.incl.tex",
            Document::Tables => "session_tables.incl.tex",
        }
    }
}

/// Options controlling parsing and rendering of the program documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub parse: ParseOptions,
    pub documents: Vec<Document>,
    pub order: BlockOrder,
    pub author_index: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            documents: Document::ALL.to_vec(),
            order: BlockOrder::default(),
            author_index: true,
        }
    }
}

/// Loads the spreadsheet inputs and builds the conference model.
#[instrument(level = "info", skip_all, fields(sessions = %sessions.display()))]
pub fn load_conference(
    sessions: &Path,
    authors: Option<&Path>,
    options: &ParseOptions,
) -> Result<Conference> {
    let registry = match authors {
        Some(path) => {
            let registry = AuthorsRegistry::load(path)?;
            info!(authors = registry.len(), "loaded authors registry");
            Some(registry)
        }
        None => None,
    };

    let rows = io::read_rows(sessions)?;
    let conference = Conference::from_rows(&rows, registry.as_ref(), options)?;
    info!(
        days = conference.days().len(),
        sessions = rows.len(),
        contributions = conference.contribution_count(),
        "conference model built"
    );
    if conference.degraded_contributions() > 0 {
        warn!(
            count = conference.degraded_contributions(),
            "contributions with malformed time fields were kept without a time"
        );
    }
    Ok(conference)
}

/// Renders the requested documents to strings, in the order requested.
pub fn build_documents(
    conference: &Conference,
    options: &RenderOptions,
) -> Vec<(&'static str, String)> {
    options
        .documents
        .iter()
        .map(|document| {
            let text = match document {
                Document::Overview => render::overview::render(conference),
                Document::Contributions => {
                    render::contributions::render(conference, options.order)
                }
                Document::Abstracts => render::abstracts::render(
                    conference,
                    &AbstractsOptions {
                        author_index: options.author_index,
                    },
                ),
                Document::Tables => render::tables::render(conference),
            };
            debug!(document = document.file_name(), bytes = text.len(), "document rendered");
            (document.file_name(), text)
        })
        .collect()
}

/// Full load-then-render run. Every document is rendered before the first
/// file is written, so a fatal error never leaves partial output behind.
#[instrument(
    level = "info",
    skip_all,
    fields(sessions = %sessions.display(), out_dir = %out_dir.display())
)]
pub fn write_program(
    sessions: &Path,
    authors: Option<&Path>,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<()> {
    let conference = load_conference(sessions, authors, &options.parse)?;
    let documents = build_documents(&conference, options);

    fs::create_dir_all(out_dir)?;
    for (name, text) in documents {
        let path = out_dir.join(name);
        fs::write(&path, text)?;
        info!(file = %path.display(), "document written");
    }
    Ok(())
}

/// Serializes the normalized model as JSON for inspection.
#[instrument(level = "info", skip_all, fields(sessions = %sessions.display()))]
pub fn dump_model(
    sessions: &Path,
    authors: Option<&Path>,
    options: &ParseOptions,
    pretty: bool,
) -> Result<String> {
    let conference = load_conference(sessions, authors, options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&conference)?
    } else {
        serde_json::to_string(&conference)?
    };
    Ok(json)
}
