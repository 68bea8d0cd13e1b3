use crate::latex;
use crate::model::{Conference, ContributionKind, SessionKind};
use crate::render::id_label;

/// Renders the chronological program overview: days, time slots, the
/// sessions running in parallel, and one short line per contribution.
pub fn render(conference: &Conference) -> String {
    let mut out = String::from("%% CONTRIBUTION OVERVIEW");

    for day in conference.days() {
        out.push_str(&format!(
            "\n\n\\daybegin{}\n",
            latex::args([day.format("%A, %-d %B %Y").to_string()])
        ));

        for time in conference.times(day) {
            let mut slot_open = false;
            for room in conference.rooms(day, time) {
                let Some(session) = conference.session(day, time, room) else {
                    continue;
                };

                if !slot_open {
                    let end_label = conference
                        .latest_end(day, time)
                        .map(|end| end.format("%H:%M").to_string())
                        .unwrap_or_default();
                    let slot_title = if session.kind() == SessionKind::Poster {
                        poster_slot_label(session.title())
                    } else {
                        "Spoken Session".to_string()
                    };
                    out.push_str(&format!(
                        "\n\\timebegin{}\n",
                        latex::args([
                            time.format("%H:%M").to_string(),
                            end_label,
                            latex::escape(&slot_title),
                        ])
                    ));
                    slot_open = true;
                }

                if session.kind() == SessionKind::Poster {
                    out.push_str("\\postersessionstart{}\n");
                } else {
                    let heading = match session.kind() {
                        SessionKind::Symposium => format!("Symposium: {}", session.title()),
                        _ => session.title().to_string(),
                    };
                    let min = session
                        .min_contribution_id()
                        .map(|id| id.to_string())
                        .unwrap_or_default();
                    let max = session
                        .max_contribution_id()
                        .map(|id| id.to_string())
                        .unwrap_or_default();
                    out.push_str(&format!(
                        "\n\\talksessionstart{}\n",
                        latex::args([
                            latex::escape(&heading),
                            min,
                            max,
                            latex::escape(session.room()),
                        ])
                    ));
                }

                for contribution in session.contributions() {
                    let authors = latex::escape(&contribution.author_line());
                    let title = latex::escape(contribution.title());
                    match contribution.kind() {
                        ContributionKind::Poster => out.push_str(&format!(
                            "    \\postershort{}\n",
                            latex::args([id_label(contribution), authors, title])
                        )),
                        ContributionKind::Talk => out.push_str(&format!(
                            "    \\talkshort{}\n",
                            latex::args([
                                id_label(contribution),
                                contribution.start_label().unwrap_or_default(),
                                authors,
                                title,
                                contribution.end_label().unwrap_or_default(),
                            ])
                        )),
                    }
                }
                out.push_str("\\sessionend{}\n\n");
            }
            out.push_str("\n\\timeend{}\n");
        }
        out.push_str("\n\n\\dayend{}\n");
    }
    out
}

/// Poster slots label the time block with the part of the session title
/// before the first dash, e.g. "Posters 1 - Perception" becomes "Posters 1".
fn poster_slot_label(title: &str) -> String {
    match title.find('-') {
        Some(idx) => title[..idx].trim().to_string(),
        None => title.to_string(),
    }
}
