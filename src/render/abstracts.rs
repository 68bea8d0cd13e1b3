use crate::latex;
use crate::model::{Conference, Contribution, ContributionKind};
use crate::render::{collect_contributions, id_label};
use crate::text;

/// Options for the abstracts booklet.
#[derive(Debug, Clone)]
pub struct AbstractsOptions {
    /// Emit `\index{}` annotations per author, keyed by accent-folded
    /// surname and initials.
    pub author_index: bool,
}

impl Default for AbstractsOptions {
    fn default() -> Self {
        Self { author_index: true }
    }
}

/// Renders the abstracts booklet, split into a talks section and a
/// posters section, each in identifier order.
pub fn render(conference: &Conference, options: &AbstractsOptions) -> String {
    let mut out = String::from("%% ABSTRACTS\n");

    for (kind, heading) in [
        (ContributionKind::Talk, "Talks"),
        (ContributionKind::Poster, "Posters"),
    ] {
        let entries = collect_contributions(conference, kind);
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("\n\\abstractsection{}\n", latex::args([heading])));
        for (_, contribution) in entries {
            out.push_str(&format!(
                "\n\\abstractentry{}\n",
                latex::args([
                    id_label(contribution),
                    latex::escape(contribution.title()),
                    author_block(contribution, options.author_index),
                    latex::escape(&contribution.organisation_line()),
                    latex::escape(contribution.abstract_text()),
                ])
            ));
            if let Some(email) = contribution.contact_email() {
                out.push_str(&format!(
                    "\\abstractcontact{}\n",
                    latex::args([latex::escape(email)])
                ));
            }
        }
    }
    out
}

/// The author line of one abstract: full names, affiliation marks when the
/// contribution spans several organisations, and optional index entries.
fn author_block(contribution: &Contribution, author_index: bool) -> String {
    let names = contribution.author_names(true, false);
    let mark = contribution.authors().len() > 1 && contribution.multiple_affiliations();

    let mut parts = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let mut part = latex::escape(name);
        if author_index {
            let key = latex::index_key(
                &contribution.last_names()[idx],
                &text::initials(&contribution.first_names()[idx]),
            );
            part.push_str(&format!("\\index{{{key}}}"));
        }
        if mark {
            let ids = contribution.affiliation_ids()[idx]
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            if !ids.is_empty() {
                part.push_str(&format!("[{ids}]"));
            }
        }
        parts.push(part);
    }

    // The parts already carry markup, so only the separator needs escaping.
    let mut line = String::new();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            line.push_str(if idx == parts.len() - 1 { " \\& " } else { ", " });
        }
        line.push_str(part);
    }
    line
}
