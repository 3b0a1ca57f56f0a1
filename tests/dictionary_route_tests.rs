use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

fn temp_path(tag: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "lexicon-route-{tag}-{}-{}{ext}",
        std::process::id(),
        nanos
    ));
    temp_path
}

async fn spawn_app_with_static(
    tag: &str,
    static_dir: Option<&std::path::Path>,
) -> (Router, lexicon::db::DbActorHandle, PathBuf) {
    let temp_path = temp_path(tag, ".sqlite");
    let cfg = lexicon::config::DatabaseConfig::with_url(format!("sqlite:{}", temp_path.display()));
    let db = lexicon::db::spawn(&cfg).await.expect("db actor failed to start");
    let state = lexicon::server::router::LexiconState::new(db.clone());
    let app = lexicon::server::router::lexicon_router(state, static_dir);
    (app, db, temp_path)
}

async fn spawn_app(tag: &str) -> (Router, lexicon::db::DbActorHandle, PathBuf) {
    spawn_app_with_static(tag, None).await
}

async fn teardown(db: lexicon::db::DbActorHandle, path: PathBuf) {
    db.shutdown().await.expect("db actor failed to stop");
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let resp = app.clone().oneshot(request).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|v| v.to_string());
    let (status, bytes) = send(app, method, uri, body.as_deref()).await;
    let value = serde_json::from_slice(&bytes).expect("response is not JSON");
    (status, value)
}

fn wetiko() -> Value {
    json!({
        "word": "wetiko",
        "sentence": "The wetiko walks in the winter forest.",
        "sentenceSource": "lore",
        "definition": "malevolent spirit",
        "lexicalCategory": "noun",
        "region": "Great Lakes",
        "ethnicGroups": "Anishinaabe",
        "languageFamily": "Algonquian",
        "wordOrder": "SVO",
        "language": "Ojibwe",
        "ancestor": "Proto-Algonquian"
    })
}

#[tokio::test]
async fn dictionary_routes_add_find_search_delete() {
    let (app, db, path) = spawn_app("words").await;

    // 1) connection check is plain text
    let (status, body) = send(&app, "GET", "/check-db-connection", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"connected");

    // 2) add a context
    let (status, body) = send_json(&app, "POST", "/add-context", Some(wetiko())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    // 3) it shows up in the table dumps
    let (status, body) = send_json(&app, "GET", "/dictionary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [["wetiko", 6]] }));

    let (_, body) = send_json(&app, "GET", "/language", None).await;
    assert_eq!(body, json!({ "data": [["Ojibwe", "SVO", "Algonquian"]] }));

    // 4) definition lookup, surrounding whitespace ignored
    let (status, body) = send_json(
        &app,
        "POST",
        "/find-definition",
        Some(json!({ "word": " wetiko " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "definition": "malevolent spirit" })
    );

    let (status, body) = send_json(
        &app,
        "POST",
        "/find-definition",
        Some(json!({ "word": "windigo" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false }));

    // 5) search, numeric values may arrive as numbers
    let (status, body) = send_json(
        &app,
        "POST",
        "/search-words",
        Some(json!({ "queries": [
            { "attribute": "Spelling", "operation": "AND", "value": "tik" },
            { "attribute": "Num_characters", "value": 6 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "words": [["wetiko"]] }));

    let (status, body) = send_json(
        &app,
        "POST",
        "/search-words",
        Some(json!({ "queries": [
            { "attribute": "Num_characters", "value": "six; DROP TABLE OrthographicForm" }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].is_string());

    let (status, _) = send_json(
        &app,
        "POST",
        "/search-words",
        Some(json!({ "queries": [
            { "attribute": "Definition", "value": "spirit" }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, "POST", "/search-words", Some(json!({ "queries": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 6) delete
    let (status, body) = send_json(
        &app,
        "POST",
        "/delete-word",
        Some(json!({ "word": "windigo" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false }));

    let (status, body) = send_json(
        &app,
        "POST",
        "/delete-word",
        Some(json!({ "word": "wetiko" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = send_json(&app, "GET", "/dictionary", None).await;
    assert_eq!(body, json!({ "data": [] }));

    teardown(db, path).await;
}

#[tokio::test]
async fn add_context_rejects_incomplete_requests() {
    let (app, db, path) = spawn_app("add-invalid").await;

    // missing field -> 400
    let mut partial = wetiko();
    partial.as_object_mut().unwrap().remove("definition");
    let (status, body) = send_json(&app, "POST", "/add-context", Some(partial)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    // blank word -> 400
    let mut blank = wetiko();
    blank["word"] = json!("   ");
    let (status, _) = send_json(&app, "POST", "/add-context", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // not JSON at all -> 400
    let (status, _) = send(&app, "POST", "/add-context", Some("not-json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // duplicate word -> 500, nothing leaks to the client
    let (status, _) = send_json(&app, "POST", "/add-context", Some(wetiko())).await;
    assert_eq!(status, StatusCode::OK);
    let mut dup = wetiko();
    dup["region"] = json!("Lake Superior");
    let (status, body) = send_json(&app, "POST", "/add-context", Some(dup)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false }));

    // unknown path -> 404
    let (status, _) = send(&app, "GET", "/no-such-route", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    teardown(db, path).await;
}

#[tokio::test]
async fn language_routes_update_and_project() {
    let (app, db, path) = spawn_app("language").await;
    let (status, _) = send_json(&app, "POST", "/add-context", Some(wetiko())).await;
    assert_eq!(status, StatusCode::OK);

    // 1) only Word_order and Ancestor are updatable
    let (status, body) = send_json(
        &app,
        "POST",
        "/update-language-context",
        Some(json!({ "key": "Ojibwe", "updateAttribute": "Name", "newData": "Anishinaabemowin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    // 2) repeating an update is not an error
    for _ in 0..2 {
        let (status, body) = send_json(
            &app,
            "POST",
            "/update-language-context",
            Some(json!({ "key": "Ojibwe", "updateAttribute": "Word_order", "newData": "VOS" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    let (status, _) = send_json(
        &app,
        "POST",
        "/update-language-context",
        Some(json!({ "key": "Klingon", "updateAttribute": "Word_order", "newData": "OVS" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 3) projections
    let (status, body) = send_json(
        &app,
        "POST",
        "/language-context",
        Some(json!({ "attribute": "Name, Word_order" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": [["Ojibwe", "VOS"]] }));

    let (status, _) = send_json(
        &app,
        "POST",
        "/language-context",
        Some(json!({ "attribute": "Name; DROP TABLE Language_ancestor" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    teardown(db, path).await;
}

#[tokio::test]
async fn seeded_dictionary_reports() {
    let (app, db, path) = spawn_app("reports").await;

    let (status, body) = send_json(&app, "POST", "/initiate-dictionary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["failed"], json!(0));

    let (status, body) = send_json(&app, "GET", "/count-demotable", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "data": [
            ["English", 5], ["French", 6], ["German", 5], ["Spanish", 6]
        ] })
    );

    let (status, body) = send_json(&app, "GET", "/count-demotable1", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().expect("data is an array");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1][0], json!("French"));
    assert_eq!(rows[1][1].as_f64(), Some(5.5));

    let (status, body) = send_json(&app, "GET", "/count-demotable2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "data": [["French"], ["Spanish"]] })
    );

    // lengths may arrive as any whole JSON number
    for value in [json!(3.0), json!("3.0"), json!(3)] {
        let (status, body) = send_json(
            &app,
            "POST",
            "/search-words",
            Some(json!({ "queries": [
                { "attribute": "Num_characters", "operation": null, "value": value }
            ] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{value}");
        assert_eq!(
            body,
            json!({ "success": true, "words": [["cat"], ["run"], ["sol"]] })
        );
    }
    let (status, _) = send_json(
        &app,
        "POST",
        "/search-words",
        Some(json!({ "queries": [
            { "attribute": "Num_characters", "value": 3.5 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(&app, "GET", "/division-table", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "data": [["English"], ["Spanish"]] })
    );

    let (status, body) = send_json(
        &app,
        "POST",
        "/language-context",
        Some(json!({ "attribute": "DISTINCT Ancestor" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "data": [["Germanic"], ["Romance"]] })
    );

    teardown(db, path).await;
}

#[tokio::test]
async fn stopped_database_degrades_gracefully() {
    let (app, db, path) = spawn_app("stopped").await;
    let (status, _) = send_json(&app, "POST", "/add-context", Some(wetiko())).await;
    assert_eq!(status, StatusCode::OK);

    db.shutdown().await.expect("db actor failed to stop");

    // table dumps answer with an empty set
    for uri in ["/dictionary", "/language"] {
        let (status, body) = send_json(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({ "data": [] }), "{uri}");
    }

    let (status, body) = send(&app, "GET", "/check-db-connection", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"unable to connect");

    let (status, body) = send_json(&app, "GET", "/division-table", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false }));

    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[tokio::test]
async fn static_fallback_and_request_ids() {
    let static_dir = temp_path("static", "");
    std::fs::create_dir_all(&static_dir).expect("failed to create static dir");
    std::fs::write(static_dir.join("index.html"), "<h1>lexicon</h1>\n")
        .expect("failed to write index.html");

    let (app, db, path) = spawn_app_with_static("static", Some(&static_dir)).await;

    // 1) frontend files are served for paths outside the API
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/index.html")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id missing");
    assert_eq!(generated.len(), 16);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    assert_eq!(&body[..], b"<h1>lexicon</h1>\n");

    // 2) missing files are still 404
    let (status, _) = send(&app, "GET", "/missing.html", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 3) a caller-supplied request id is echoed back
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/check-db-connection")
                .header("x-request-id", "trace-42")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("trace-42")
    );

    // 4) each request without one gets a fresh id
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/index.html")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let second = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id missing");
    assert_ne!(second, generated);

    teardown(db, path).await;
    let _ = std::fs::remove_dir_all(&static_dir);
}
