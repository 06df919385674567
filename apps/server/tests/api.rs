use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use hbnb::domain::config::{ApiConfig, DeletePolicy};
use hbnb::kernel::storage::Storage;
use hbnb_server::Server;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    server: Server,
    cfg: ApiConfig,
    _dir: TempDir,
}

async fn spawn(policy: DeletePolicy) -> TestApp {
    let dir = tempdir().unwrap();
    let mut cfg = ApiConfig::default();
    cfg.storage.data_dir = dir.path().to_path_buf();
    cfg.storage.delete_policy = policy;

    let server = Server::builder().config(cfg.clone()).build().await.unwrap();
    TestApp { router: server.router(), server, cfg, _dir: dir }
}

impl TestApp {
    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map_or_else(Body::empty, |value| Body::from(value.to_string()));
        let request = Request::builder().method(method).uri(uri).body(body).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn create(&self, uri: &str, body: Value) -> String {
        let (status, created) = self.call(Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "POST {uri}: {created}");
        created["id"].as_str().unwrap().to_owned()
    }
}

#[tokio::test]
async fn system_routes_and_fallback() {
    let app = spawn(DeletePolicy::Orphan).await;

    let (status, body) = app.call(Method::GET, "/api/v1/status", None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "status": "OK" })));

    let (status, body) = app.call(Method::GET, "/api/v1/nowhere", None).await;
    assert_eq!((status, body), (StatusCode::NOT_FOUND, json!({ "error": "Not found" })));

    let (status, body) = app.call(Method::GET, "/status", None).await;
    assert_eq!((status, body), (StatusCode::NOT_FOUND, json!({ "error": "Not found" })));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = spawn(DeletePolicy::Orphan).await;
    let request = Request::get("/api/v1/states")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn booking_flow_is_persisted() {
    let app = spawn(DeletePolicy::Orphan).await;

    let state_id = app.create("/api/v1/states", json!({ "name": "California" })).await;
    let city_id = app
        .create(&format!("/api/v1/states/{state_id}/cities"), json!({ "name": "Fresno" }))
        .await;
    let user_id = app
        .create("/api/v1/users", json!({ "email": "host@hbnb.io", "password": "pw" }))
        .await;
    let place_id = app
        .create(
            &format!("/api/v1/cities/{city_id}/places"),
            json!({ "user_id": user_id, "name": "Farmhouse", "max_guest": 4 }),
        )
        .await;
    let amenity_id = app.create("/api/v1/amenities", json!({ "name": "Wifi" })).await;
    app.create(
        &format!("/api/v1/places/{place_id}/reviews"),
        json!({ "user_id": user_id, "text": "Lovely" }),
    )
    .await;
    app.create(&format!("/api/v1/places/{place_id}/amenities/{amenity_id}"), Value::Null).await;

    let (status, stats) = app.call(Method::GET, "/api/v1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({ "amenities": 1, "cities": 1, "places": 1, "reviews": 1, "states": 1, "users": 1 })
    );

    let (_, found) = app
        .call(
            Method::POST,
            "/api/v1/places_search",
            Some(json!({ "states": [state_id], "amenities": [amenity_id] })),
        )
        .await;
    assert_eq!(found.as_array().map(Vec::len), Some(1));
    assert_eq!(found[0]["id"], place_id.as_str());

    let snapshot = app.cfg.storage.data_dir.join(&app.cfg.storage.file_name);
    let persisted: Value = serde_json::from_slice(&std::fs::read(&snapshot).unwrap()).unwrap();
    assert_eq!(persisted[format!("State.{state_id}")]["name"], "California");
    assert_eq!(persisted[format!("User.{user_id}")]["password"], "pw");
    assert_eq!(persisted[format!("Place.{place_id}")]["amenity_ids"], json!([amenity_id]));

    app.server.state().storage.close().await.unwrap();
    let reopened = Storage::open(&app.cfg.storage).await.unwrap();
    assert_eq!(reopened.count(None), 6);
}

#[tokio::test]
async fn orphan_policy_keeps_dependents() {
    let app = spawn(DeletePolicy::Orphan).await;
    let state_id = app.create("/api/v1/states", json!({ "name": "Ohio" })).await;
    let city_id = app
        .create(&format!("/api/v1/states/{state_id}/cities"), json!({ "name": "Akron" }))
        .await;

    let (status, _) = app.call(Method::DELETE, &format!("/api/v1/states/{state_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, city) = app.call(Method::GET, &format!("/api/v1/cities/{city_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(city["state_id"], state_id.as_str());

    let (status, _) =
        app.call(Method::GET, &format!("/api/v1/states/{state_id}/cities"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cascade_policy_removes_dependents() {
    let app = spawn(DeletePolicy::Cascade).await;
    let state_id = app.create("/api/v1/states", json!({ "name": "Ohio" })).await;
    let city_id = app
        .create(&format!("/api/v1/states/{state_id}/cities"), json!({ "name": "Akron" }))
        .await;

    let (status, _) = app.call(Method::DELETE, &format!("/api/v1/states/{state_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.call(Method::GET, &format!("/api/v1/cities/{city_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, stats) = app.call(Method::GET, "/api/v1/stats", None).await;
    assert_eq!(stats["cities"], 0);
}
