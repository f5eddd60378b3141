//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use action_router::config::RouterConfig;
use action_router::dispatch::{
    handler_fn, ErrorPayload, HandlerError, HandlerRef, HostCodec, Request, Response,
};
use action_router::{HttpRouter, HttpServer, Shutdown};

/// A handler that records every request it receives and answers `200 <tag>`.
#[allow(dead_code)]
pub fn recording_handler(tag: &'static str) -> (HandlerRef, Arc<Mutex<Vec<Request>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let handler = handler_fn(move |req: Request| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(req);
            Ok::<_, HandlerError>(Response::text(200, tag))
        }
    });
    (handler, seen)
}

/// A host codec stub.
///
/// Decoding ignores the wire text and returns `request`; encoding renders the
/// response as `status|body` so tests can check it was passed through.
#[allow(dead_code)]
pub struct FakeCodec {
    pub request: Request,
    pub fail_decode: bool,
    pub fail_encode: bool,
    pub decoded: AtomicUsize,
    pub encoded: AtomicUsize,
}

#[allow(dead_code)]
impl FakeCodec {
    pub fn new(request: Request) -> Self {
        Self {
            request,
            fail_decode: false,
            fail_encode: false,
            decoded: AtomicUsize::new(0),
            encoded: AtomicUsize::new(0),
        }
    }

    pub fn render(response: &Response) -> String {
        format!("{}|{}", response.status, response.body.clone().unwrap_or_default())
    }
}

#[async_trait]
impl HostCodec for FakeCodec {
    async fn decode_request(&self, _raw: &str) -> Result<Request, ErrorPayload> {
        self.decoded.fetch_add(1, Ordering::SeqCst);
        if self.fail_decode {
            return Err(ErrorPayload::message("host could not decode request"));
        }
        Ok(self.request.clone())
    }

    async fn encode_response(&self, response: Response) -> Result<String, ErrorPayload> {
        self.encoded.fetch_add(1, Ordering::SeqCst);
        if self.fail_encode {
            return Err(ErrorPayload::Structured(serde_json::json!({"reason": "encode"})));
        }
        Ok(Self::render(&response))
    }
}

/// Start an `HttpServer` on `addr` and wait until it accepts connections.
#[allow(dead_code)]
pub async fn start_server(addr: SocketAddr, routes: HttpRouter) -> Shutdown {
    let mut config = RouterConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server = HttpServer::new(config, Arc::new(routes));
    let stop = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}
