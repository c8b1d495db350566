//! End-to-end editing flows driven through the key handler, backed by an
//! in-memory store.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use tagpane::io::memory::MemoryStore;
use tagpane::io::store::TagStore;
use tagpane::model::{AppConfig, FieldName, TagSet};
use tagpane::ops::bulk::{self, BulkReview};
use tagpane::ops::EditCache;
use tagpane::tui::app::{App, Mode};
use tagpane::tui::input::handle_key;

fn tags(pairs: &[(FieldName, &str)]) -> TagSet {
    pairs.iter().map(|(f, v)| (*f, v.to_string())).collect()
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut App, c: char) {
    handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn library(seed: &[(&str, TagSet)]) -> App {
    let mut store = MemoryStore::new();
    for (name, tags) in seed {
        store.insert(*name, tags.clone());
    }
    let files = seed.iter().map(|(name, _)| PathBuf::from(name)).collect();
    App::new(files, Box::new(store), AppConfig::default())
}

fn stored_title(app: &App, name: &str) -> Option<String> {
    app.store
        .read(&PathBuf::from(name))
        .ok()
        .and_then(|t| t.get(&FieldName::Title).cloned())
}

#[test]
fn edit_then_save_then_save_again() {
    let mut app = library(&[("one.m4a", tags(&[(FieldName::Artist, "Ayler")]))]);

    // Move to the field pane, edit Title, commit
    press(&mut app, KeyCode::Char('l'));
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "Ghosts");
    press(&mut app, KeyCode::Enter);
    assert!(app.has_unsaved_changes());

    ctrl(&mut app, 's');
    assert_eq!(app.status_message.as_deref(), Some("Saved 1 file(s)."));
    assert_eq!(stored_title(&app, "one.m4a").as_deref(), Some("Ghosts"));

    // Untouched fields survive the write
    let stored = app.store.read(&PathBuf::from("one.m4a")).unwrap();
    assert_eq!(stored.get(&FieldName::Artist).map(String::as_str), Some("Ayler"));

    // A second save has nothing to do
    ctrl(&mut app, 's');
    assert_eq!(app.status_message.as_deref(), Some("No changes to save."));
}

#[test]
fn quit_gate_until_saved() {
    let mut app = library(&[("one.m4a", TagSet::new())]);
    press(&mut app, KeyCode::Char('l'));
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "x");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
    assert_eq!(
        app.status_message.as_deref(),
        Some("E37: No write since last change (add ! to override)")
    );

    ctrl(&mut app, 's');
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn batch_template_applies_only_nonempty_fields() {
    let mut app = library(&[
        ("a.m4a", tags(&[(FieldName::Title, "Keep A")])),
        ("b.m4a", tags(&[(FieldName::Title, "Keep B")])),
    ]);

    // Mark both files
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char(' '));
    assert!(app.selection.batch_mode());

    // Fill Album in the template, leave Title blank
    press(&mut app, KeyCode::Char('l'));
    press(&mut app, KeyCode::Char('j')); // Title -> Artist
    press(&mut app, KeyCode::Char('j')); // Artist -> Album
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "Spiritual Unity");
    press(&mut app, KeyCode::Enter);

    ctrl(&mut app, 's');
    assert_eq!(app.status_message.as_deref(), Some("Saved 2 file(s)."));

    for name in ["a.m4a", "b.m4a"] {
        let stored = app.store.read(&PathBuf::from(name)).unwrap();
        // Blank template fields never touch existing values
        assert!(stored.get(&FieldName::Title).unwrap().starts_with("Keep"));
        assert_eq!(
            stored.get(&FieldName::Album).map(String::as_str),
            Some("Spiritual Unity")
        );
    }
    assert!(!app.selection.batch_mode());
}

#[test]
fn per_file_empty_commit_deletes_on_save() {
    // Outside batch mode the same blank commit is a deletion, not a skip
    let mut app = library(&[("a.m4a", tags(&[(FieldName::Genre, "Jazz")]))]);

    press(&mut app, KeyCode::Char('l'));
    for _ in 0..6 {
        press(&mut app, KeyCode::Char('j')); // down to Genre (last field)
    }
    press(&mut app, KeyCode::Enter);
    for _ in 0..4 {
        press(&mut app, KeyCode::Backspace);
    }
    press(&mut app, KeyCode::Enter);

    ctrl(&mut app, 's');
    let stored = app.store.read(&PathBuf::from("a.m4a")).unwrap();
    assert!(stored.get(&FieldName::Genre).is_none());
}

#[test]
fn failed_write_stays_staged_and_retries() {
    let mut store = MemoryStore::new();
    store.fail_writes_for("a.m4a");
    let files = vec![PathBuf::from("a.m4a"), PathBuf::from("b.m4a")];
    let mut app = App::new(files, Box::new(store), AppConfig::default());

    app.cache.stage(&PathBuf::from("a.m4a"), FieldName::Title, "A");
    app.cache.stage(&PathBuf::from("b.m4a"), FieldName::Title, "B");

    ctrl(&mut app, 's');
    let status = app.status_message.clone().unwrap();
    assert!(status.starts_with("Saved 1 file(s). 1 write(s) failed: a.m4a"));
    assert!(app.has_unsaved_changes());

    // The gate still blocks quitting while a.m4a is staged
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
}

#[test]
fn bulk_round_trip_review_rules() {
    let mut store = MemoryStore::new();
    store.insert("a.m4a", tags(&[(FieldName::Title, "One")]));
    store.insert("b.m4a", tags(&[(FieldName::Title, "Two")]));
    let files = vec![PathBuf::from("a.m4a"), PathBuf::from("b.m4a")];
    let cache = EditCache::new();

    let original = bulk::compose_lines(&store, &cache, FieldName::Title, &files);
    assert_eq!(original, "One\nTwo\n");

    // Identical text cancels
    assert_eq!(bulk::review(&original, &original, 2), BulkReview::Unchanged);

    // Wrong line count cancels
    assert_eq!(
        bulk::review(&original, "One\n", 2),
        BulkReview::CountMismatch {
            expected: 2,
            actual: 1
        }
    );

    // A matching change stages per line, in order
    let review = bulk::review(&original, "Uno\nDos\n", 2);
    let BulkReview::Changed(values) = review else {
        panic!("expected Changed");
    };
    let mut cache = EditCache::new();
    bulk::apply(&mut cache, FieldName::Title, &files, &values);
    assert_eq!(
        cache
            .entry(&PathBuf::from("b.m4a"))
            .and_then(|t| t.get(&FieldName::Title))
            .map(String::as_str),
        Some("Dos")
    );
}

#[test]
fn colon_commands_drive_macros_end_to_end() {
    let mut app = library(&[
        ("01_intro.m4a", TagSet::new()),
        ("02_outro.m4a", TagSet::new()),
    ]);

    // Mark both, number tracks, then save everything with :wq
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char(' '));

    press(&mut app, KeyCode::Char(':'));
    type_str(&mut app, "num");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status_message.as_deref(), Some("Numbered 2 track(s)."));

    press(&mut app, KeyCode::Char(':'));
    type_str(&mut app, "wq");
    press(&mut app, KeyCode::Enter);
    assert!(app.should_quit);

    let stored = app.store.read(&PathBuf::from("02_outro.m4a")).unwrap();
    assert_eq!(stored.get(&FieldName::Track).map(String::as_str), Some("2/2"));
}
