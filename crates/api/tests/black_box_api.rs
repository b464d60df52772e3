use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = evpool_api::app::build_app().expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    async fn put_evs(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .put(format!("{}/evs", self.base_url))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn fleet(&self) -> serde_json::Value {
        self.client
            .get(format!("{}/fleet", self.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn status_reports_ready() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .get(format!("{}/status", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn register_evs_installs_the_fleet() {
    let srv = TestServer::spawn().await;

    let res = srv
        .put_evs(json!([{ "id": 1, "seats": 4 }, { "id": 2, "seats": 6 }]))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "EVs registered successfully");

    let fleet = srv.fleet().await;
    assert_eq!(fleet["vehicles"].as_array().unwrap().len(), 2);
    assert_eq!(fleet["vehicles"][1]["id"], 2);
    assert_eq!(fleet["vehicles"][1]["available_seats"], 6);
}

#[tokio::test]
async fn malformed_payloads_are_bad_requests() {
    let srv = TestServer::spawn().await;

    let res = srv.put_evs(json!({ "id": 1, "seats": 4 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_payload");

    let res = srv.put_evs(json!([{ "id": 1, "seats": -4 }])).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv.put_evs(json!([{ "id": 1, "seats": 4 }, { "id": 1, "seats": 2 }])).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv.post("/journey", json!({ "id": "one", "people": 2 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv.post("/journey", json!({ "id": 1, "people": 0 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv.post("/dropoff", json!({ "group": 1 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv
        .client
        .post(format!("{}/locate", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn journey_lifecycle_over_http() {
    let srv = TestServer::spawn().await;
    srv.put_evs(json!([{ "id": 1, "seats": 4 }])).await;

    // Seated on the only vehicle.
    let res = srv.post("/journey", json!({ "id": 1, "people": 3 })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Journey started");
    assert_eq!(body["car_id"], 1);

    // One seat left: queued.
    let res = srv.post("/journey", json!({ "id": 2, "people": 2 })).await;
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Added to waitlist");

    let res = srv.post("/locate", json!({ "id": 1 })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["car_id"], 1);

    let res = srv.post("/dropoff", json!({ "id": 1 })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Group dropped off");

    let fleet = srv.fleet().await;
    assert_eq!(fleet["vehicles"][0]["available_seats"], 4);
    assert_eq!(fleet["waiting"], json!([2]));
    assert_eq!(fleet["riding"], 0);

    // Neither the dropped group nor the still-waiting one has a car.
    let res = srv.post("/locate", json!({ "id": 1 })).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = srv.post("/locate", json!({ "id": 2 })).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn dropoff_of_unknown_group_is_not_found() {
    let srv = TestServer::spawn().await;
    srv.put_evs(json!([{ "id": 1, "seats": 4 }])).await;

    let res = srv.post("/dropoff", json!({ "id": 42 })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Group not found");
}

#[tokio::test]
async fn dropoff_of_queued_group_is_not_found() {
    let srv = TestServer::spawn().await;
    srv.put_evs(json!([{ "id": 1, "seats": 1 }])).await;

    let res = srv.post("/journey", json!({ "id": 2, "people": 3 })).await;
    assert_eq!(res.status(), StatusCode::ACCEPTED);

    let res = srv.post("/dropoff", json!({ "id": 2 })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Group not found");

    let fleet = srv.fleet().await;
    assert_eq!(fleet["waiting"], json!([2]));
    assert_eq!(fleet["vehicles"][0]["available_seats"], 1);
}

#[tokio::test]
async fn duplicate_journey_is_a_conflict() {
    let srv = TestServer::spawn().await;
    srv.put_evs(json!([{ "id": 1, "seats": 4 }])).await;

    let res = srv.post("/journey", json!({ "id": 5, "people": 1 })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv.post("/journey", json!({ "id": 5, "people": 1 })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn re_registering_evs_resets_journeys() {
    let srv = TestServer::spawn().await;
    srv.put_evs(json!([{ "id": 1, "seats": 4 }])).await;
    srv.post("/journey", json!({ "id": 1, "people": 4 })).await;
    srv.post("/journey", json!({ "id": 2, "people": 4 })).await;

    let res = srv.put_evs(json!([{ "id": 1, "seats": 4 }])).await;
    assert_eq!(res.status(), StatusCode::OK);

    let fleet = srv.fleet().await;
    assert_eq!(fleet["vehicles"][0]["available_seats"], 4);
    assert_eq!(fleet["waiting"], json!([]));
    assert_eq!(fleet["riding"], 0);

    let res = srv.post("/locate", json!({ "id": 1 })).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = srv.post("/dropoff", json!({ "id": 2 })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
