//! HTTP transport against an in-process mock game server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde_json::{Value, json};
use slide_client::{
    BOARD_ERROR_MESSAGE, BoardPanel, BoardSource, CellView, Command, Direction, GameTransport, HttpTransport, MoveOrchestrator,
    Muted, Reconciler, ScreenState, TransportErrorKind, ViewPort, bootstrap, lock_view, shared,
};

#[derive(Clone, Default)]
struct MockServer {
    moves: Arc<Mutex<Vec<String>>>,
}

async fn move_handler(
    State(server): State<MockServer>,
    Path(direction): Path<String>,
) -> Json<Value> {
    server.moves.lock().unwrap().push(direction);
    Json(json!({
        "board": [[0, 0], [2, 4]],
        "score": 4,
        "status": "Score: 4"
    }))
}

async fn reset_handler() -> Json<Value> {
    Json(json!({ "board": [[2, 0], [0, 0]], "score": 0 }))
}

async fn high_scores_handler() -> Json<Value> {
    Json(json!([
        { "score": 500, "date": "2024-01-01" },
        { "score": 12, "date": "2024-01-05" }
    ]))
}

async fn index_handler() -> Html<&'static str> {
    Html(r#"<html><body><div id="board" data-board="[[0, 2], [4, 0]]"></div></body></html>"#)
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn game_server() -> (String, MockServer) {
    let state = MockServer::default();
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/move/{direction}", post(move_handler))
        .route("/reset", post(reset_handler))
        .route("/high_scores", get(high_scores_handler))
        .with_state(state.clone());
    (spawn_server(router).await, state)
}

#[tokio::test]
async fn test_move_posts_direction_path() {
    let (url, server) = game_server().await;
    let transport = HttpTransport::new(&format!("{}/", url), None).unwrap();
    assert_eq!(transport.base_url(), url);

    let snapshot = transport.move_tiles(Direction::Left).await.unwrap();
    assert_eq!(snapshot.board().tiles().unwrap(), vec![vec![0, 0], vec![2, 4]]);
    assert_eq!(*snapshot.score(), 4);
    transport.move_tiles(Direction::Up).await.unwrap();

    assert_eq!(*server.moves.lock().unwrap(), vec!["left", "up"]);
}

#[tokio::test]
async fn test_reset_defaults_missing_status() {
    let (url, _) = game_server().await;
    let transport = HttpTransport::new(&url, None).unwrap();

    let snapshot = transport.reset().await.unwrap();
    assert_eq!(snapshot.status(), "");
    assert_eq!(*snapshot.score(), 0);
}

#[tokio::test]
async fn test_high_scores_and_index_page() {
    let (url, _) = game_server().await;
    let transport = HttpTransport::new(&url, None).unwrap();

    let scores = transport.high_scores().await.unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(*scores[0].score(), 500);
    assert_eq!(scores[1].date(), "2024-01-05");

    let html = transport.index_page().await.unwrap();
    assert!(html.contains("data-board"));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let router = Router::new().route(
        "/move/{direction}",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let url = spawn_server(router).await;
    let transport = HttpTransport::new(&url, None).unwrap();

    let err = transport.move_tiles(Direction::Down).await.unwrap_err();
    assert_eq!(*err.kind(), TransportErrorKind::Status);
    assert!(err.message().contains("500"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let router = Router::new().route("/reset", post(|| async { "not json" }));
    let url = spawn_server(router).await;
    let transport = HttpTransport::new(&url, None).unwrap();

    let err = transport.reset().await.unwrap_err();
    assert_eq!(*err.kind(), TransportErrorKind::Decode);
}

#[tokio::test]
async fn test_slow_server_hits_configured_timeout() {
    let router = Router::new().route(
        "/high_scores",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "[]"
        }),
    );
    let url = spawn_server(router).await;
    let transport = HttpTransport::new(&url, Some(Duration::from_millis(100))).unwrap();

    let err = transport.high_scores().await.unwrap_err();
    assert_eq!(*err.kind(), TransportErrorKind::Timeout);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let transport = HttpTransport::new(&format!("http://{}", addr), None).unwrap();

    let err = transport.move_tiles(Direction::Right).await.unwrap_err();
    assert_eq!(*err.kind(), TransportErrorKind::Network);
}

#[tokio::test]
async fn test_bootstrap_then_move_end_to_end() {
    let (url, server) = game_server().await;
    let transport = Arc::new(HttpTransport::new(&url, None).unwrap());
    let view = shared(ScreenState::new());
    let orchestrator =
        MoveOrchestrator::new(transport, Arc::clone(&view), Reconciler::new(Arc::new(Muted)));

    let _input = bootstrap(&orchestrator, &BoardSource::IndexPage, Duration::from_millis(300))
        .await
        .unwrap();
    {
        let screen = lock_view(&view);
        let BoardPanel::Grid(cells) = screen.board() else {
            panic!("expected a grid, got {:?}", screen.board());
        };
        assert_eq!(*cells[0][1].value(), 2);
        assert_eq!(*cells[1][0].value(), 4);
        assert_eq!(screen.high_score_banner(), "High Score: 500");
    }

    let outcome = orchestrator
        .submit(Command::Move(Direction::Down))
        .unwrap()
        .await
        .unwrap();
    assert!(outcome.result.is_ok());
    outcome.refresh.await.unwrap().unwrap();

    let screen = lock_view(&view);
    assert_eq!(screen.score(), "Score: 4");
    assert_eq!(*screen.status(), None);
    assert_eq!(*server.moves.lock().unwrap(), vec!["down"]);
}

#[tokio::test]
async fn test_malformed_board_from_server_renders_inline_error() {
    let router = Router::new().route(
        "/move/{direction}",
        post(|| async {
            Json(json!({ "board": [[0, -2], [4, 0]], "score": 8, "status": "" }))
        }),
    );
    let url = spawn_server(router).await;
    let transport = Arc::new(HttpTransport::new(&url, None).unwrap());
    let mut screen = ScreenState::new();
    screen
        .set_board(vec![vec![CellView::from_value(2)]])
        .unwrap();
    let view = shared(screen);
    let orchestrator =
        MoveOrchestrator::new(transport, Arc::clone(&view), Reconciler::new(Arc::new(Muted)));

    let outcome = orchestrator
        .submit(Command::Move(Direction::Left))
        .unwrap()
        .await
        .unwrap();
    assert!(outcome.result.is_ok());

    let screen = lock_view(&view);
    assert_eq!(
        *screen.board(),
        BoardPanel::Error(BOARD_ERROR_MESSAGE.to_string())
    );
    assert_eq!(screen.score(), "Score: 8");
    assert!(!orchestrator.gate().is_busy());
}
