//! Live server tests over real sockets.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use action_router::admin::{setup_admin_router, AdminState};
use action_router::config::{build_router, parse_config};
use action_router::Shutdown;

mod common;

const CONFIG: &str = r#"
[[routes]]
path = "/message"
method = "POST"
handler = { kind = "echo" }

[[routes]]
path_prefix = "/static/"
method = "GET"
handler = { kind = "static", status = 200, body = "static content" }

[[routes]]
path_prefix = "/static/private/"
method = "GET"
handler = { kind = "static", status = 403, body = "forbidden" }
"#;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_configured_routes() {
    let addr: SocketAddr = "127.0.0.1:28481".parse().unwrap();
    let config = parse_config(CONFIG).unwrap();
    let routes = build_router(&config.routes).unwrap();
    let shutdown = common::start_server(addr, routes).await;
    let client = client();

    let res = client
        .post(format!("http://{addr}/message?draft=1"))
        .body("hello")
        .send()
        .await
        .expect("Router unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["pathname"], "/message");
    assert_eq!(body["body"], "hello");

    let res = client.get(format!("http://{addr}/static/app.js")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "static content");

    let res = client.get(format!("http://{addr}/static/private/key")).send().await.unwrap();
    assert_eq!(res.status(), 403);

    let res = client.head(format!("http://{addr}/static/app.js")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let res = client.get(format!("http://{addr}/message")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    assert!(res.text().await.unwrap().contains("/message"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_admin_route_listing() {
    let addr: SocketAddr = "127.0.0.1:28482".parse().unwrap();
    let config = parse_config(CONFIG).unwrap();
    let routes = Arc::new(build_router(&config.routes).unwrap());

    let shutdown = Shutdown::new();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let app = setup_admin_router(AdminState::new(routes, "test-key"));
    let mut stop = shutdown.subscribe();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop.recv().await;
            })
            .await
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client()
        .get(format!("http://{addr}/admin/routes"))
        .bearer_auth("test-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let listing: Vec<serde_json::Value> = res.json().await.unwrap();
    let rows: Vec<String> = listing
        .iter()
        .map(|r| format!("{} {}", r["method"].as_str().unwrap(), r["path"].as_str().unwrap()))
        .collect();
    assert_eq!(
        rows,
        ["POST /message", "GET /static/*", "GET /static/private/*"]
    );

    shutdown.trigger();
}
