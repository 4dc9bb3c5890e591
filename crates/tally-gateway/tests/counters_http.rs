//! End-to-end tests of the `/counters/{name}` surface over real HTTP.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;

use futures_util::future::join_all;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use tally_gateway::{app_state::AppState, config, router};

struct TestServer {
    addr: SocketAddr,
    state: AppState,
    client: Client,
}

impl TestServer {
    /// Fresh registry per test, bound to an ephemeral port.
    async fn start() -> Self {
        let cfg = config::load_from_str("version: 1\ngateway:\n  listen: \"127.0.0.1:0\"\n").unwrap();
        let state = AppState::new(cfg).unwrap();
        let app = router::build_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state, client: Client::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn send(&self, method: reqwest::Method, path: &str) -> reqwest::Response {
        self.client.request(method, self.url(path)).send().await.unwrap()
    }

    async fn post(&self, path: &str) -> reqwest::Response {
        self.send(reqwest::Method::POST, path).await
    }

    async fn put(&self, path: &str) -> reqwest::Response {
        self.send(reqwest::Method::PUT, path).await
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.send(reqwest::Method::GET, path).await
    }

    async fn delete(&self, path: &str) -> reqwest::Response {
        self.send(reqwest::Method::DELETE, path).await
    }
}

#[tokio::test]
async fn create_a_counter() {
    let srv = TestServer::start().await;
    let res = srv.post("/counters/foo").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "foo": 0 }));
}

#[tokio::test]
async fn duplicate_a_counter() {
    let srv = TestServer::start().await;
    assert_eq!(srv.post("/counters/bar").await.status(), StatusCode::CREATED);

    let res = srv.post("/counters/bar").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "NAME_CONFLICT");
}

#[tokio::test]
async fn update_a_counter() {
    let srv = TestServer::start().await;
    let res = srv.post("/counters/cou").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap()["cou"], 0);

    let res = srv.put("/counters/cou").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "cou": 1 }));

    assert_eq!(srv.put("/counters/coo").await.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn read_a_counter() {
    let srv = TestServer::start().await;
    assert_eq!(srv.post("/counters/rea").await.status(), StatusCode::CREATED);

    let res = srv.get("/counters/rea").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "count": "0" }));

    srv.put("/counters/rea").await;
    let res = srv.get("/counters/rea").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap()["count"], "1");

    assert_eq!(srv.get("/counters/ree").await.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_a_counter() {
    let srv = TestServer::start().await;
    assert_eq!(srv.post("/counters/del").await.status(), StatusCode::CREATED);

    let res = srv.delete("/counters/del").await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    assert_eq!(srv.get("/counters/del").await.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_unknown_counter_succeeds() {
    let srv = TestServer::start().await;
    assert_eq!(srv.delete("/counters/nope").await.status(), StatusCode::NO_CONTENT);
    assert_eq!(srv.delete("/counters/nope").await.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn recreate_after_delete_resets_count() {
    let srv = TestServer::start().await;
    srv.post("/counters/again").await;
    srv.put("/counters/again").await;
    srv.put("/counters/again").await;
    srv.delete("/counters/again").await;

    let res = srv.post("/counters/again").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "again": 0 }));
}

#[tokio::test]
async fn concurrent_increments_are_all_counted() {
    let srv = TestServer::start().await;
    srv.post("/counters/hot").await;

    let n = 64;
    let puts = (0..n).map(|_| srv.put("/counters/hot"));
    for res in join_all(puts).await {
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = srv.get("/counters/hot").await;
    assert_eq!(res.json::<Value>().await.unwrap()["count"], n.to_string());
}

#[tokio::test]
async fn registries_are_isolated_per_state() {
    let a = TestServer::start().await;
    let b = TestServer::start().await;
    assert_eq!(a.post("/counters/shared").await.status(), StatusCode::CREATED);
    assert_eq!(b.post("/counters/shared").await.status(), StatusCode::CREATED);
    assert_eq!(a.state.registry().len(), 1);
    assert_eq!(b.state.registry().len(), 1);
}

#[tokio::test]
async fn unsupported_method_and_unknown_path() {
    let srv = TestServer::start().await;
    let res = srv.send(reqwest::Method::PATCH, "/counters/foo").await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    assert_eq!(srv.get("/counters").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(srv.get("/nowhere").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ops_endpoints() {
    let srv = TestServer::start().await;
    assert_eq!(srv.get("/healthz").await.text().await.unwrap(), "ok");

    let res = srv.get("/readyz").await;
    assert_eq!(res.status(), StatusCode::OK);

    srv.post("/counters/m").await;
    srv.post("/counters/m").await;
    let metrics = srv.get("/metrics").await.text().await.unwrap();
    assert!(metrics.contains("tally_requests_total{op=\"create\",outcome=\"ok\"} 1"));
    assert!(metrics.contains("tally_requests_total{op=\"create\",outcome=\"conflict\"} 1"));
    assert!(metrics.contains("tally_counters_live 1"));

    srv.state.set_draining();
    let res = srv.get("/readyz").await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.text().await.unwrap(), "draining");
}
