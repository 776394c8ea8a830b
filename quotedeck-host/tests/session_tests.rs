use quotedeck_host::{QuoteSession, QuoteView};
use quotedeck_select::SelectorConfig;
use quotedeck_storage::{KeyValueStore, MemoryKeyValue, QUOTES_KEY};
use quotedeck_sync::RemoteConfig;
use quotedeck_types::{Error, Quote};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
enum Rendered {
    Quote(String),
    Empty(String),
    Notice(String),
}

#[derive(Default)]
struct RecordingView {
    events: Mutex<Vec<Rendered>>,
}

impl RecordingView {
    fn events(&self) -> Vec<Rendered> {
        self.events.lock().unwrap().clone()
    }

    fn last_quote(&self) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Rendered::Quote(text) => Some(text),
                _ => None,
            })
    }

    fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Rendered::Notice(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }
}

impl QuoteView for RecordingView {
    fn show_quote(&self, quote: &Quote) {
        self.events
            .lock()
            .unwrap()
            .push(Rendered::Quote(quote.text.clone()));
    }

    fn show_empty(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Rendered::Empty(message.to_string()));
    }

    fn notify(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Rendered::Notice(message.to_string()));
    }
}

fn session_over(
    mirror: Arc<MemoryKeyValue>,
) -> (QuoteSession, Arc<RecordingView>) {
    let view = Arc::new(RecordingView::default());
    let session = QuoteSession::new(mirror, view.clone(), SelectorConfig::default());
    (session, view)
}

fn fresh_session() -> (QuoteSession, Arc<RecordingView>) {
    session_over(Arc::new(MemoryKeyValue::new()))
}

// ── init ─────────────────────────────────────────────────────────

#[tokio::test]
async fn init_with_empty_mirror_notifies_and_hints() {
    let (session, view) = fresh_session();
    session.init().await;

    let events = view.events();
    assert!(matches!(events[0], Rendered::Notice(_)));
    assert!(matches!(events[1], Rendered::Empty(_)));
}

#[tokio::test]
async fn init_with_valid_mirror_is_quiet() {
    let mirror = Arc::new(MemoryKeyValue::new());
    mirror
        .put(QUOTES_KEY, r#"[{"text":"saved","category":"T"}]"#)
        .unwrap();

    let (session, view) = session_over(mirror);
    session.init().await;
    assert!(view.notices().is_empty());
}

#[tokio::test]
async fn init_renders_last_shown_when_still_present() {
    let mirror = Arc::new(MemoryKeyValue::new());
    mirror
        .put(
            QUOTES_KEY,
            r#"[{"id":"018f6f00-0000-7000-8000-0000000000aa","text":"only one","category":"T"}]"#,
        )
        .unwrap();

    let (session, view) = session_over(mirror);
    session.init().await;
    session.show_next().await;

    // A second init in the same session re-renders the last-shown record.
    session.init().await;
    assert_eq!(view.last_quote().unwrap(), "only one");
}

// ── show_next ────────────────────────────────────────────────────

#[tokio::test]
async fn show_next_renders_a_stored_quote() {
    let (session, view) = fresh_session();
    session.init().await;
    session.show_next().await;

    let shown = view.last_quote().unwrap();
    assert!(!shown.is_empty());
}

#[tokio::test]
async fn show_next_with_unmatched_filter_shows_empty() {
    let (mut session, view) = fresh_session();
    session.init().await;
    session.set_filter("NoSuchCategory").await;

    assert!(matches!(view.events().last(), Some(Rendered::Empty(_))));
}

// ── submit ───────────────────────────────────────────────────────

#[tokio::test]
async fn submit_renders_the_new_quote() {
    let (session, view) = fresh_session();
    session.init().await;

    let quote = session.submit("fresh words", "Testing").await.unwrap();
    assert_eq!(quote.text, "fresh words");
    assert_eq!(view.last_quote().unwrap(), "fresh words");
}

#[tokio::test]
async fn submit_validation_error_surfaces() {
    let (session, view) = fresh_session();
    session.init().await;
    let before = view.events().len();

    let err = session.submit("  ", "Testing").await.unwrap_err();
    assert!(matches!(err, Error::Validation { field: "text" }));
    // Nothing rendered for the failed submit.
    assert_eq!(view.events().len(), before);
}

#[tokio::test]
async fn submitted_quote_persists_to_mirror() {
    let mirror = Arc::new(MemoryKeyValue::new());
    let (session, _view) = session_over(mirror.clone());
    session.init().await;
    session.submit("durable", "Testing").await.unwrap();

    assert!(mirror.get(QUOTES_KEY).unwrap().unwrap().contains("durable"));
}

// ── import / export ──────────────────────────────────────────────

#[tokio::test]
async fn import_reports_counts_and_renders_first() {
    let (session, view) = fresh_session();
    session.init().await;

    let report = session
        .import_bytes(br#"[{"text":"imported","category":"T"},{"text":""}]"#)
        .await
        .unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.dropped, 1);
    assert_eq!(view.last_quote().unwrap(), "imported");
}

#[tokio::test]
async fn import_malformed_payload_surfaces() {
    let (session, _view) = fresh_session();
    session.init().await;
    assert!(session.import_bytes(b"not json").await.is_err());
}

#[tokio::test]
async fn export_then_import_round_trips() {
    let (session, _view) = fresh_session();
    session.init().await;
    session.submit("round trip", "Testing").await.unwrap();

    let exported = session.export_json().await;
    let (other, _other_view) = fresh_session();
    other.init().await;
    let report = other.import_bytes(exported.as_bytes()).await.unwrap();

    // The other session already holds different seeds, so everything from
    // the export is new to it.
    assert_eq!(report.dropped, 0);
    assert_eq!(report.added, 5);
}

#[tokio::test]
async fn export_file_name_shape() {
    let (session, _view) = fresh_session();
    let name = session.export_file_name();
    assert!(name.starts_with("quotes_export_"));
    assert!(name.ends_with(".json"));
}

// ── filtering ────────────────────────────────────────────────────

#[tokio::test]
async fn set_filter_constrains_rendering() {
    let (mut session, view) = fresh_session();
    session.init().await;
    session.submit("one", "Unique").await.unwrap();

    session.set_filter("Unique").await;
    assert_eq!(view.last_quote().unwrap(), "one");
}

#[tokio::test]
async fn categories_reflect_collection() {
    let (session, _view) = fresh_session();
    session.init().await;
    session.submit("a", "Zebra").await.unwrap();

    let categories = session.categories().await;
    assert!(categories.contains(&"Zebra".to_string()));
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);
}

// ── sync wiring ──────────────────────────────────────────────────

#[tokio::test]
async fn sync_pushes_submitted_quote_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (mut session, _view) = fresh_session();
    session.init().await;
    session.submit("outbound", "Sync").await.unwrap();

    session
        .start_sync(RemoteConfig::new(server.uri()), Duration::from_millis(10))
        .await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.stop_sync().await;
}

#[tokio::test]
async fn sync_conflicts_surface_as_notification() {
    let mirror = Arc::new(MemoryKeyValue::new());
    mirror
        .put(
            QUOTES_KEY,
            r#"[{"id":"018f6f00-0000-7000-8000-000000000001","text":"local","category":"T"}]"#,
        )
        .unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "018f6f00-0000-7000-8000-000000000001", "text": "remote wins", "category": "T"},
        ])))
        .mount(&server)
        .await;

    let (mut session, view) = session_over(mirror);
    session.init().await;
    session
        .start_sync(RemoteConfig::new(server.uri()), Duration::from_millis(10))
        .await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.stop_sync().await;

    assert!(view
        .notices()
        .iter()
        .any(|n| n.contains("conflict")));
}

#[tokio::test]
async fn starting_sync_twice_replaces_the_scheduler() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (mut session, _view) = fresh_session();
    session.init().await;

    session
        .start_sync(RemoteConfig::new(server.uri()), Duration::from_millis(10))
        .await;
    session
        .start_sync(RemoteConfig::new(server.uri()), Duration::from_millis(10))
        .await;
    assert!(session.sync_running());

    session.stop_sync().await;
    assert!(!session.sync_running());
}
