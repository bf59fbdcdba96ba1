#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use presencesync_domain::AccessToken;
use presencesync_infra::{HttpClient, PaginatedFetcher, Throttle};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-bearer-token";

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct CountingThrottle {
    pauses: AtomicUsize,
    delays: Mutex<Vec<Duration>>,
}

impl CountingThrottle {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("delay log poisoned").clone()
    }
}

#[async_trait]
impl Throttle for CountingThrottle {
    async fn pause(&self, delay: Duration) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        self.delays.lock().expect("delay log poisoned").push(delay);
    }
}

pub fn token() -> AccessToken {
    AccessToken::new(TEST_TOKEN, 3599)
}

pub fn http() -> HttpClient {
    HttpClient::builder().timeout(Duration::from_secs(5)).build().expect("http client should build")
}

/// Fetcher against the mock server with a counting throttle and the
/// production 3 s delay (never actually slept).
pub fn fetcher() -> (PaginatedFetcher, Arc<CountingThrottle>) {
    let throttle = Arc::new(CountingThrottle::default());
    let fetcher =
        PaginatedFetcher::new(http(), Duration::from_secs(3)).with_throttle(throttle.clone());
    (fetcher, throttle)
}

/// Graph-like base URL (`{server}/v1.0`) on the mock server.
pub fn graph_base(server: &MockServer) -> String {
    format!("{}/v1.0", server.uri())
}

/// Base URL of a port nothing listens on; requests fail to connect.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port should bind");
    let addr = listener.local_addr().expect("bound listener has an address");
    drop(listener);
    format!("http://{addr}")
}
