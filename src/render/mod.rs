//! Document renderers.
//!
//! Each renderer is a pure function over the [`Conference`] query surface:
//! it owns no state, mutates nothing, and emits one LaTeX include document
//! as a string. Free text is escaped through [`crate::latex`] before it
//! reaches the output.

pub mod abstracts;
pub mod contributions;
pub mod overview;
pub mod tables;

use crate::model::{Conference, Contribution, ContributionKind, Session};

/// Order of the talk and poster blocks in the flat contribution list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockOrder {
    #[default]
    TalksFirst,
    PostersFirst,
}

/// Collects every contribution of the given kind together with its session,
/// in identifier order.
fn collect_contributions<'a>(
    conference: &'a Conference,
    kind: ContributionKind,
) -> Vec<(&'a Session, &'a Contribution)> {
    let mut entries: Vec<(&Session, &Contribution)> = Vec::new();
    for day in conference.days() {
        for session in conference.sessions_at_day(day, true) {
            for contribution in session.contributions() {
                if contribution.kind() == kind {
                    entries.push((session, contribution));
                }
            }
        }
    }
    entries.sort_by_key(|(_, contribution)| contribution.id());
    entries
}

fn id_label(contribution: &Contribution) -> String {
    contribution
        .id()
        .map(|id| id.to_string())
        .unwrap_or_default()
}
