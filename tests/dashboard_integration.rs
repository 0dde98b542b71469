//! End-to-end tests: HTTP fetch, polling, derivation, and rendering.

use std::sync::Arc;
use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::time::sleep;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pulse::api::{snapshot_fetcher, ApiError, DashboardClient};
use pulse::app::App;
use pulse::demo::{demo_fetcher, DEMO_SNAPSHOT_JSON};
use pulse::refresh::AutoRefresh;
use pulse::time_filter::TimeRange;
use pulse::ui;
use pulse::view_state::{section_view, status_totals};

async fn mock_dashboard(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/dashboard.json"))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_dashboard_parses_snapshot() {
    let server = MockServer::start().await;
    mock_dashboard(&server, 200, DEMO_SNAPSHOT_JSON).await;

    let client = DashboardClient::with_base_url(server.uri());
    let snapshot = client.fetch_dashboard(None).await.unwrap();

    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot[0].category, "Assets");
    assert_eq!(snapshot[0].items[0].name, "Gold Loan");
}

#[tokio::test]
async fn fetch_dashboard_forwards_time_range() {
    let server = MockServer::start().await;
    mock_dashboard(&server, 200, "[]").await;

    let client = DashboardClient::with_base_url(server.uri());
    let range = TimeRange::resolve("Last 1h");
    client.fetch_dashboard(Some(&range)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or("");
    assert!(query.contains("start_time="), "query: {}", query);
    assert!(query.contains("end_time="), "query: {}", query);
}

#[tokio::test]
async fn fetch_dashboard_server_error() {
    let server = MockServer::start().await;
    mock_dashboard(&server, 500, "boom").await;

    let client = DashboardClient::with_base_url(server.uri());
    let err = client.fetch_dashboard(None).await.unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_dashboard_malformed_body() {
    let server = MockServer::start().await;
    mock_dashboard(&server, 200, "{not json").await;

    let client = DashboardClient::with_base_url(server.uri());
    let err = client.fetch_dashboard(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Json(_)));
}

#[tokio::test]
async fn polling_pipeline_against_live_backend() {
    let server = MockServer::start().await;
    mock_dashboard(&server, 200, DEMO_SNAPSHOT_JSON).await;

    let client = Arc::new(DashboardClient::with_base_url(server.uri()));
    let engine = AutoRefresh::new(
        snapshot_fetcher(client, "Last 24h".to_string()),
        Duration::from_secs(60),
        vec!["Last 24h".to_string()],
    );

    sleep(Duration::from_millis(300)).await;
    let state = engine.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.last_refresh_time.is_some());

    let snapshot = state.data.expect("snapshot fetched");

    // Derivation over the fetched snapshot
    let totals = status_totals(&snapshot);
    assert_eq!(totals.stable, 6);
    assert_eq!(totals.degraded, 2);
    assert_eq!(totals.critical, 1);

    let assets = section_view(&snapshot[0]);
    assert_eq!(assets.default_item.unwrap().name, "Gold Loan");
    assert_eq!(assets.extra_items.len(), 2);
    assert!(!assets.shows_healthy_badge);

    let liabilities = section_view(&snapshot[2]);
    assert!(liabilities.shows_healthy_badge);
    assert_eq!(liabilities.default_item.unwrap().name, "Savings Account");
}

#[tokio::test]
async fn backend_failure_keeps_stale_snapshot() {
    let server = MockServer::start().await;
    mock_dashboard(&server, 200, DEMO_SNAPSHOT_JSON).await;

    let client = Arc::new(DashboardClient::with_base_url(server.uri()));
    let engine = AutoRefresh::new(
        snapshot_fetcher(client, "Last 24h".to_string()),
        Duration::from_millis(200),
        vec!["Last 24h".to_string()],
    );

    sleep(Duration::from_millis(120)).await;
    assert!(engine.state().data.is_some());

    // Backend starts failing; the next tick must surface the error text
    // while the last good snapshot stays in state
    server.reset().await;
    mock_dashboard(&server, 503, "maintenance window").await;

    sleep(Duration::from_millis(300)).await;
    let state = engine.state();
    assert!(state.data.is_some(), "stale snapshot survives");
    let error = state.error.expect("error surfaced");
    assert!(error.contains("503"), "error: {}", error);
}

#[tokio::test]
async fn render_smoke_test_over_demo_snapshot() {
    let engine = AutoRefresh::new(
        demo_fetcher(String::new()),
        Duration::from_secs(300),
        vec!["Last 24h".to_string()],
    );
    let mut app = App::new(engine, Box::new(demo_fetcher));

    // Let the immediate demo fetch land
    sleep(Duration::from_millis(50)).await;
    let state = app.refresh_state();
    let snapshot = state.data.clone().expect("demo data loaded");
    app.sync_with_snapshot(&snapshot);

    let backend = TestBackend::new(100, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::render(f, &app, &state)).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }

    assert!(text.contains("Journey Health Overview"));
    assert!(text.contains("Stable Journeys"));
    assert!(text.contains("Degraded Journeys"));
    assert!(text.contains("Critical Journeys"));
    assert!(text.contains("Assets"));
    assert!(text.contains("Gold Loan"));
    assert!(text.contains("Last 24h"));

    // Collapsed sections only show their default item
    assert!(!text.contains("Personal Loan"));
}

#[tokio::test]
async fn expanded_section_renders_extra_items() {
    let engine = AutoRefresh::new(
        demo_fetcher(String::new()),
        Duration::from_secs(300),
        vec!["Last 24h".to_string()],
    );
    let mut app = App::new(engine, Box::new(demo_fetcher));

    sleep(Duration::from_millis(50)).await;
    let state = app.refresh_state();
    let snapshot = state.data.clone().expect("demo data loaded");
    app.sync_with_snapshot(&snapshot);
    app.visibility.toggle("Assets");

    let backend = TestBackend::new(100, 50);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::render(f, &app, &state)).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }

    assert!(text.contains("Gold Loan"));
    assert!(text.contains("Personal Loan"));
    assert!(text.contains("Home Loan"));
}
