use crate::latex;
use crate::model::Conference;

/// Renders the command set for the program grid document: the rooms in
/// use, then one slot row per (day, time) with a cell command per
/// scheduled session, keyed by its day/time/room coordinates.
pub fn render(conference: &Conference) -> String {
    let mut out = String::from("%% SESSION TABLES\n");

    for room in conference.all_rooms(true) {
        out.push_str(&format!("\\tableroom{}\n", latex::args([latex::escape(&room)])));
    }

    for day in conference.days() {
        out.push_str(&format!(
            "\n\\tableday{}\n",
            latex::args([
                day.format("%Y-%m-%d").to_string(),
                day.format("%A, %-d %B %Y").to_string(),
            ])
        ));
        for time in conference.times(day) {
            let end_label = conference
                .latest_end(day, time)
                .map(|end| end.format("%H:%M").to_string())
                .unwrap_or_default();
            out.push_str(&format!(
                "\\tableslot{}\n",
                latex::args([time.format("%H:%M").to_string(), end_label])
            ));
            for room in conference.rooms(day, time) {
                let Some(session) = conference.session(day, time, room) else {
                    continue;
                };
                out.push_str(&format!(
                    "    \\tablecell{}\n",
                    latex::args([
                        day.format("%Y-%m-%d").to_string(),
                        time.format("%H:%M").to_string(),
                        latex::escape(room),
                        latex::escape(session.short()),
                        latex::escape(session.title()),
                    ])
                ));
            }
        }
    }
    out
}
