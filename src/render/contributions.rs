use crate::latex;
use crate::model::{Conference, ContributionKind};
use crate::render::{BlockOrder, collect_contributions, id_label};
use crate::text;

/// Renders the flat contribution list: one block of talks and one block of
/// posters, each in identifier order. The block order is configurable.
pub fn render(conference: &Conference, order: BlockOrder) -> String {
    let blocks: [(ContributionKind, &str); 2] = match order {
        BlockOrder::TalksFirst => [
            (ContributionKind::Talk, "Talks"),
            (ContributionKind::Poster, "Posters"),
        ],
        BlockOrder::PostersFirst => [
            (ContributionKind::Poster, "Posters"),
            (ContributionKind::Talk, "Talks"),
        ],
    };

    let mut out = String::from("%% CONTRIBUTION LIST\n");
    for (kind, heading) in blocks {
        let entries = collect_contributions(conference, kind);
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("\n\\contributionblock{}\n", latex::args([heading])));
        for (session, contribution) in entries {
            let authors = text::join_names(&contribution.author_names(false, true));
            let time_label = contribution
                .start_label()
                .unwrap_or_else(|| session.start_label());
            out.push_str(&format!(
                "\\contribution{}\n",
                latex::args([
                    id_label(contribution),
                    latex::escape(&authors),
                    latex::escape(contribution.title()),
                    session.day().format("%a %-d %b").to_string(),
                    time_label,
                    latex::escape(session.room()),
                ])
            ));
        }
    }
    out
}
