//! Out-of-order asynchronous content updates.
//!
//! Responses are released in a controlled order through oneshot channels so
//! the race is deterministic.

use std::sync::{Arc, Mutex};

use poster_core::{ContentField, PosterDocument, PosterEditor};
use tokio::sync::oneshot;

#[tokio::test]
async fn test_newest_request_wins_even_when_it_resolves_first() {
    let editor = Arc::new(Mutex::new(PosterEditor::new(
        PosterDocument::default().with_verse("John 3:16", "For God so loved the world"),
    )));

    let (older_tx, older_rx) = oneshot::channel::<String>();
    let (newer_tx, newer_rx) = oneshot::channel::<String>();

    let older_ticket = editor
        .lock()
        .expect("lock")
        .begin_update(ContentField::VerseText);
    let newer_ticket = editor
        .lock()
        .expect("lock")
        .begin_update(ContentField::VerseText);

    let older = {
        let editor = Arc::clone(&editor);
        tokio::spawn(async move {
            let text = older_rx.await.expect("older response");
            editor
                .lock()
                .expect("lock")
                .complete_update(older_ticket, text)
        })
    };
    let newer = {
        let editor = Arc::clone(&editor);
        tokio::spawn(async move {
            let text = newer_rx.await.expect("newer response");
            editor
                .lock()
                .expect("lock")
                .complete_update(newer_ticket, text)
        })
    };

    newer_tx
        .send("Car Dieu a tant aimé le monde".to_string())
        .expect("send newer");
    assert!(newer.await.expect("join newer"));

    older_tx
        .send("Porque de tal manera amó Dios al mundo".to_string())
        .expect("send older");
    assert!(!older.await.expect("join older"));

    let editor = editor.lock().expect("lock");
    assert_eq!(editor.document().verse.text, "Car Dieu a tant aimé le monde");
    assert!(!editor.is_updating(ContentField::VerseText));
}

#[tokio::test]
async fn test_independent_fields_both_apply() {
    let mut editor = PosterEditor::default();
    let text = editor.begin_update(ContentField::VerseText);
    let reference = editor.begin_update(ContentField::VerseReference);

    let (text_value, reference_value) = tokio::join!(
        async { "Dios es amor".to_string() },
        async { "1 Juan 4:8".to_string() }
    );

    assert!(editor.complete_update(reference, reference_value));
    assert!(editor.complete_update(text, text_value));
    assert_eq!(editor.document().verse.reference, "1 Juan 4:8");
    assert_eq!(editor.document().verse.text, "Dios es amor");
}
