mod common;

use common::{SessionRow, session_row, slot, write_sessions_csv};
use conftex::model::ParseOptions;
use conftex::pipeline::{self, Document, RenderOptions};
use tempfile::tempdir;

fn fixture_rows() -> Vec<SessionRow> {
    vec![
        session_row("2017-09-04 09:00", "2017-09-04 10:30", "Aula 1", "Memory", "ME-1").slot(
            slot("A Talk", "Smith, Anna", "Uni A")
                .timed("2017-09-04 09:00", "2017-09-04 09:20")
                .with_abstract("An abstract."),
        ),
        session_row("2017-09-04 14:00", "2017-09-04 16:00", "Foyer", "Posters 1", "Pos-1")
            .slot(slot("A Poster", "Jones, Ben", "Uni B")),
    ]
}

#[test]
fn write_program_produces_every_document() {
    let dir = tempdir().expect("temporary directory");
    let sessions = dir.path().join("sessions.csv");
    write_sessions_csv(&sessions, &fixture_rows());

    let out_dir = dir.path().join("program");
    pipeline::write_program(&sessions, None, &out_dir, &RenderOptions::default())
        .expect("program written");

    for document in Document::ALL {
        let path = out_dir.join(document.file_name());
        let content = std::fs::read_to_string(&path).expect("document readable");
        assert!(!content.is_empty(), "{} is empty", document.file_name());
    }
}

#[test]
fn write_program_honours_document_selection() {
    let dir = tempdir().expect("temporary directory");
    let sessions = dir.path().join("sessions.csv");
    write_sessions_csv(&sessions, &fixture_rows());

    let out_dir = dir.path().join("program");
    let options = RenderOptions {
        documents: vec![Document::Overview],
        ..RenderOptions::default()
    };
    pipeline::write_program(&sessions, None, &out_dir, &options).expect("program written");

    assert!(out_dir.join(Document::Overview.file_name()).exists());
    assert!(!out_dir.join(Document::Abstracts.file_name()).exists());
    assert!(!out_dir.join(Document::Contributions.file_name()).exists());
    assert!(!out_dir.join(Document::Tables.file_name()).exists());
}

#[test]
fn time_conflict_leaves_no_output_behind() {
    let dir = tempdir().expect("temporary directory");
    let sessions = dir.path().join("sessions.csv");
    let row = session_row("2017-09-04 09:00", "2017-09-04 10:30", "Aula 1", "Memory", "ME-1");
    write_sessions_csv(&sessions, &[row.clone(), row]);

    let out_dir = dir.path().join("program");
    let result = pipeline::write_program(&sessions, None, &out_dir, &RenderOptions::default());

    assert!(result.is_err());
    assert!(!out_dir.exists(), "no output directory may be created");
}

#[test]
fn dump_model_serializes_the_hierarchy() {
    let dir = tempdir().expect("temporary directory");
    let sessions = dir.path().join("sessions.csv");
    write_sessions_csv(&sessions, &fixture_rows());

    let json = pipeline::dump_model(&sessions, None, &ParseOptions::default(), false)
        .expect("model dumped");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

    let day = value
        .get("days")
        .and_then(|days| days.get("2017-09-04"))
        .expect("day present");
    assert!(day.get("09:00:00").is_some(), "slot keyed by time");
    assert_eq!(
        value.get("degraded_contributions"),
        Some(&serde_json::Value::from(0))
    );
}
