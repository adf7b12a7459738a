//! demos/stub_service.rs
//! Run: cargo run --example stub_service -- <port> <jenkins|nginx>
//!
//! Serves a page shaped like the Jenkins login redirect or the Nginx welcome
//! page so `liveness-check` can be pointed at something local.

use hyper::{
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server, StatusCode,
};
use rand::Rng;
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;

const JENKINS_PAGE: &str = "<html><head><meta http-equiv='refresh' content='1;url=/login?from=%2F'/>\
<script>window.location.replace('/login?from=%2F');</script></head>\
<body>Authentication required. You will be redirected to the login page.</body></html>";

const NGINX_PAGE: &str = "<!DOCTYPE html><html><head><title>Welcome to nginx!</title></head>\
<body><h1>Welcome to nginx!</h1></body></html>";

#[derive(Clone, Copy, Debug)]
enum Flavor {
    Jenkins,
    Nginx,
}

#[derive(Clone)]
struct StubState {
    flavor:      Flavor,
    req_counter: Arc<AtomicU64>,
    delay_ms:    u64,
    fail_pct:    f64,
}

async fn handle(
    req: Request<Body>,
    state: StubState,
) -> Result<Response<Body>, Infallible> {
    let n = state.req_counter.fetch_add(1, Ordering::SeqCst) + 1;
    println!("[{:?}] #{} {} {}", state.flavor, n, req.method(), req.uri().path());

    // A delay above the checker timeout exercises the timeout path.
    if state.delay_ms > 0 {
        sleep(Duration::from_millis(state.delay_ms)).await;
    }

    if state.fail_pct > 0.0
        && rand::thread_rng().gen_bool((state.fail_pct / 100.0).min(1.0))
    {
        return Ok(Response::builder()
            .status(StatusCode::SERVICE_UNAVAILABLE)
            .body(Body::from("Service Unavailable"))
            .unwrap());
    }

    let page = match state.flavor {
        Flavor::Jenkins => JENKINS_PAGE,
        Flavor::Nginx => NGINX_PAGE,
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(Body::from(page))
        .unwrap())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port: u16 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "8080".into())
        .parse()?;
    let flavor = match std::env::args().nth(2).as_deref() {
        None | Some("jenkins") => Flavor::Jenkins,
        Some("nginx") => Flavor::Nginx,
        Some(other) => anyhow::bail!("unknown flavor: {other} (expected jenkins or nginx)"),
    };

    let delay_ms =
        std::env::var("DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(0);
    let fail_pct =
        std::env::var("FAIL_PCT").ok().and_then(|v| v.parse().ok()).unwrap_or(0.0);

    let state = StubState {
        flavor,
        req_counter: Arc::new(AtomicU64::new(0)),
        delay_ms,
        fail_pct,
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let make_svc = make_service_fn(move |_conn| {
        let st = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                handle(req, st.clone())
            }))
        }
    });

    println!(
        "Stub {:?} on http://{}  [delay={}ms fail={} %]",
        flavor, addr, delay_ms, fail_pct
    );

    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}
