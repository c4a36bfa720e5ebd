use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use stepwise_sssp::web::server::ServerConfig;
use stepwise_sssp::web::{create_router, AppState};
use tower::ServiceExt;

fn app(state: AppState) -> Router {
    create_router().with_state(state)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_example_graph(app: &Router) -> String {
    let (status, graph) = call(
        app,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": 4, "mode": "undirected" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = graph["id"].as_str().unwrap().to_string();

    for (from, to, weight) in [(0, 1, 2.0), (0, 2, 6.0), (1, 3, 5.0), (2, 3, 8.0)] {
        let (status, _) = call(
            app,
            Method::POST,
            &format!("/api/graphs/{}/edges", id),
            Some(json!({ "from": from, "to": to, "weight": weight })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    id
}

#[tokio::test]
async fn test_full_run_over_http() {
    let app = app(AppState::new());
    let id = create_example_graph(&app).await;

    let (status, snapshot) = call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/run", id),
        Some(json!({ "source": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["status"], "ready");
    assert_eq!(snapshot["distances"], json!([0.0, null, null, null]));

    let (_, first) = call(&app, Method::POST, &format!("/api/graphs/{}/step", id), None).await;
    assert_eq!(first["settled_vertex"], 0);
    assert_eq!(first["relaxed_edges"].as_array().unwrap().len(), 2);
    assert_eq!(first["status"], "running");

    let mut last = first;
    for _ in 0..10 {
        if last["status"] == "done" {
            break;
        }
        last = call(&app, Method::POST, &format!("/api/graphs/{}/step", id), None).await.1;
    }
    assert_eq!(last["status"], "done");

    let (_, snapshot) = call(
        &app,
        Method::GET,
        &format!("/api/graphs/{}/snapshot", id),
        None,
    )
    .await;
    assert_eq!(snapshot["distances"], json!([0.0, 2.0, 6.0, 7.0]));
    assert_eq!(snapshot["settled"], json!([0, 1, 2, 3]));
    assert_eq!(snapshot["frontier_empty"], true);

    assert_eq!(
        snapshot["tree_edges"],
        json!([
            { "from": 0, "to": 1, "weight": 2.0 },
            { "from": 0, "to": 2, "weight": 6.0 },
            { "from": 1, "to": 3, "weight": 5.0 },
        ])
    );

    let (status, path) = call(&app, Method::GET, &format!("/api/graphs/{}/path/3", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(path["vertices"], json!([0, 1, 3]));
    assert_eq!(path["total_distance"], 7.0);

    let (status, paths) = call(&app, Method::GET, &format!("/api/graphs/{}/paths", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let targets: Vec<&Value> = paths.as_array().unwrap().iter().map(|p| &p["target"]).collect();
    assert_eq!(targets, vec![&json!(0), &json!(1), &json!(2), &json!(3)]);
    assert_eq!(paths[2]["vertices"], json!([0, 2]));
}

#[tokio::test]
async fn test_graph_is_frozen_during_a_run() {
    let app = app(AppState::new());
    let id = create_example_graph(&app).await;

    call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/run", id),
        Some(json!({ "source": 0 })),
    )
    .await;
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/edges", id),
        Some(json!({ "from": 0, "to": 3, "weight": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "graph_frozen");

    let (status, graph) = call(
        &app,
        Method::DELETE,
        &format!("/api/graphs/{}/run", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graph["run_status"], Value::Null);

    let (status, graph) = call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/edges", id),
        Some(json!({ "from": 0, "to": 3, "weight": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graph["edges"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app(AppState::new());

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_size");

    let id = create_example_graph(&app).await;
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/edges", id),
        Some(json!({ "from": 0, "to": 1, "weight": -3.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "negative_weight");

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/run", id),
        Some(json!({ "source": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "vertex_out_of_range");

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/edges", id),
        Some(json!({ "from": 0, "to": 1, "weight": f64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "weight_too_large");

    let (status, body) = call(&app, Method::POST, &format!("/api/graphs/{}/step", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_active_run");

    let (status, body) = call(&app, Method::GET, &format!("/api/graphs/{}/paths", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_active_run");

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/graphs/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");
}

#[tokio::test]
async fn test_unreachable_and_unsettled_paths() {
    let app = app(AppState::new());
    let (_, graph) = call(
        &app,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": 2, "mode": "directed" })),
    )
    .await;
    let id = graph["id"].as_str().unwrap().to_string();

    call(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/run", id),
        Some(json!({ "source": 0 })),
    )
    .await;
    let (status, body) = call(&app, Method::GET, &format!("/api/graphs/{}/path/1", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "not_settled");

    let (_, step) = call(&app, Method::POST, &format!("/api/graphs/{}/step", id), None).await;
    assert_eq!(step["status"], "done");

    let (status, body) = call(&app, Method::GET, &format!("/api/graphs/{}/path/1", id), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unreachable");
}

#[tokio::test]
async fn test_oversized_graphs_are_rejected_without_allocating() {
    let default = app(AppState::new());
    let huge: usize = 1 << 60;

    let (status, body) = call(
        &default,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": huge })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "too_many_vertices");

    let config = ServerConfig {
        max_vertices: 8,
        ..Default::default()
    };
    let limited = app(AppState::with_config(&config));
    let (status, body) = call(
        &limited,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["max_vertices"], 8);

    let (status, _) = call(
        &limited,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, sessions) = call(&limited, Method::GET, "/api/sessions", None).await;
    assert_eq!(sessions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_session_limit() {
    let config = ServerConfig {
        max_sessions: 1,
        ..Default::default()
    };
    let app = app(AppState::with_config(&config));

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/graphs",
        Some(json!({ "vertex_count": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "too_many_sessions");

    let (_, sessions) = call(&app, Method::GET, "/api/sessions", None).await;
    assert_eq!(sessions.as_array().unwrap().len(), 1);

    let (status, health) = call(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
}
