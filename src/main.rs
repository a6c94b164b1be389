use std::sync::Arc;

use dotenvy::dotenv;
use mcqeditor::document::host::InMemoryDocument;
use mcqeditor::editor::ChoiceSetEditor;
use mcqeditor::focus::{FocusBus, FocusEvent};
use tokio::sync::broadcast;
use tracing::level_filters;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let rust_log = std::env::var("LOG_LEVEL").unwrap_or("info".into());
    tracing_subscriber::fmt()
        .with_max_level(level_filters::LevelFilter::from_level(
            rust_log.parse().expect("LOG_LEVEL can't be parsed."),
        ))
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_ansi(true)
        .with_line_number(true)
        .with_target(false)
        .init();

    let document = Arc::new(InMemoryDocument::new("Question 1", ["Red", "Green"]));
    let focus = FocusBus::new(16);
    let editor = Arc::new(ChoiceSetEditor::new(
        "Question 1",
        document.clone(),
        focus.clone(),
    ));

    let listener_events = focus.subscribe();
    let mut field_events = focus.subscribe();
    let listener = {
        let editor = editor.clone();
        tokio::spawn(async move {
            editor.listen_for_interaction_selected(listener_events).await;
        })
    };

    log::info!("Starting authoring session...");

    // Switching the question to multiple choice focuses the first choice.
    focus.new_interaction_selected("Question 1".into());
    let field_id = next_opened_field(&mut field_events).await;
    log::info!("Field '{}' opened for editing", field_id);

    editor.add_choice().await.expect("Failed to add a choice.");
    document.complete_render();
    let field_id = next_opened_field(&mut field_events).await;
    log::info!("Field '{}' opened for editing", field_id);

    editor
        .save_choice(2, "Blue".into())
        .await
        .expect("Failed to save the choice text.");
    editor
        .select_correct_answer(2)
        .await
        .expect("Failed to select the correct answer.");
    editor
        .save_correct_answer_feedback("Correct!".into())
        .await
        .expect("Failed to save the correct answer feedback.");
    editor
        .save_default_feedback("Not quite. Try again.".into())
        .await
        .expect("Failed to save the default feedback.");

    listener.abort();

    println!(
        "{}",
        serde_json::to_string_pretty(&document.snapshot())
            .expect("Failed to serialize the document.")
    );
}

async fn next_opened_field(events: &mut broadcast::Receiver<FocusEvent>) -> String {
    loop {
        match events.recv().await.expect("Focus bus closed.") {
            FocusEvent::OpenEditorField { field_id } => return field_id,
            _ => continue,
        }
    }
}
