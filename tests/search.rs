//! Search against the in-memory store: server filter, client fallback and
//! response ordering.

use std::sync::Arc;
use std::time::{Duration, Instant};

use vetkoto_app::config::Settings;
use vetkoto_app::label_cache::LabelCache;
use vetkoto_app::search::run_search;
use vetkoto_app::table::TableRenderer;
use vetkoto_app::{AppState, Engine, Message};
use vetkoto_core::{Entity, SchemaRegistry};
use vetkoto_remote::test_utils::{alice_store, clinic_store};
use vetkoto_remote::{ColumnFilter, CsvConverter, MemoryStore, Operation};

fn renderer(store: MemoryStore) -> TableRenderer<MemoryStore> {
    renderer_over(Arc::new(store))
}

fn names(view: &vetkoto_app::table::TableView) -> Vec<String> {
    view.rows.iter().map(|row| row.cells[1].text().to_string()).collect()
}

#[tokio::test]
async fn test_server_filter_matches_substring() {
    let renderer = renderer(alice_store());

    let view = renderer
        .render(Entity::Owners, Some(ColumnFilter::new("owner_name", "ali")))
        .await
        .unwrap();

    assert_eq!(names(&view), vec!["Alice"]);
}

#[tokio::test]
async fn test_server_filter_with_trailing_space_finds_nothing() {
    let renderer = renderer(alice_store());

    let view = renderer
        .render(Entity::Owners, Some(ColumnFilter::new("owner_name", "Alice ")))
        .await
        .unwrap();

    assert!(view.is_empty());
}

#[tokio::test]
async fn test_search_uses_server_path_when_it_matches() {
    let renderer = renderer(alice_store());

    let view = run_search(&renderer, Entity::Owners, "ali").await.unwrap();

    assert_eq!(names(&view), vec!["Alice"]);
    assert_eq!(renderer.store().calls(Operation::FilteredList), 1);
    assert_eq!(renderer.store().calls(Operation::List), 0);
}

#[tokio::test]
async fn test_search_falls_back_to_client_match() {
    let renderer = renderer(alice_store());

    let view = run_search(&renderer, Entity::Owners, "Alice ").await.unwrap();

    assert_eq!(names(&view), vec!["Alice"]);
    assert_eq!(renderer.store().calls(Operation::FilteredList), 1);
    assert_eq!(renderer.store().calls(Operation::List), 1);
}

#[tokio::test]
async fn test_search_server_error_still_falls_back() {
    let store = alice_store();
    store.set_failing(Operation::FilteredList, true);
    let renderer = renderer(store);

    let view = run_search(&renderer, Entity::Owners, "ali").await.unwrap();

    assert_eq!(names(&view), vec!["Alice"]);
}

#[tokio::test]
async fn test_search_matches_related_pet_name() {
    let renderer = renderer(clinic_store());

    let view = run_search(&renderer, Entity::Visits, "Rex").await.unwrap();

    assert_eq!(names(&view), vec!["Rex", "Rex"]);
}

#[tokio::test]
async fn test_search_matches_related_owner_name() {
    let renderer = renderer(clinic_store());

    let view = run_search(&renderer, Entity::Patients, "Alice").await.unwrap();

    assert_eq!(names(&view), vec!["Rex", "Mimi"]);
}

async fn settle(engine: &mut Engine<MemoryStore>, done: impl Fn(&AppState) -> bool) {
    for _ in 0..50 {
        if done(&engine.state) {
            return;
        }
        let _ = tokio::time::timeout(Duration::from_millis(100), engine.process_next()).await;
    }
    panic!("engine did not settle");
}

#[tokio::test]
async fn test_only_latest_search_response_is_rendered() {
    let store = Arc::new(alice_store());
    let mut engine = Engine::new(
        Settings::default(),
        SchemaRegistry::clinic(),
        store.clone(),
        CsvConverter::Local,
    );
    engine.process_message(Message::OpenSection("owners".into()));
    settle(&mut engine, |s| s.table.is_some()).await;

    engine.process_message(Message::StartSearch);
    let now = Instant::now();
    engine.state.search.input("zzz", now);
    let first = engine.state.search.issue().unwrap();
    engine.state.search.input("ali", now);
    let second = engine.state.search.issue().unwrap();
    assert!(second.token > first.token);

    let renderer = renderer_over(store);
    let latest = run_search(&renderer, Entity::Owners, &second.query).await.unwrap();
    let stale = run_search(&renderer, Entity::Owners, &first.query).await.unwrap();
    assert!(stale.is_empty());

    // Latest arrives first, then the stale one
    engine.process_message(Message::SearchResults {
        entity: Entity::Owners,
        token: second.token,
        result: Ok(latest),
    });
    engine.process_message(Message::SearchResults {
        entity: Entity::Owners,
        token: first.token,
        result: Ok(stale),
    });

    let table = engine.state.table.as_ref().unwrap();
    assert_eq!(names(table), vec!["Alice"]);
}

fn renderer_over(store: Arc<MemoryStore>) -> TableRenderer<MemoryStore> {
    TableRenderer::new(store, SchemaRegistry::clinic(), LabelCache::new())
}
