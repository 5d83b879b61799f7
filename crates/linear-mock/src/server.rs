//! HTTP front end of the mock, backed by wiremock

use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use linear_core::GraphQLRequest;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::expectation::{Expectation, ExpectationQueue};
use crate::MockError;

const RELEASE_TIMEOUT: Duration = Duration::from_secs(5);
const RELEASE_POLL: Duration = Duration::from_millis(10);

/// A GraphQL server on an ephemeral local port that replays expectations in order
pub struct MockGraphServer {
    queue: Arc<Mutex<ExpectationQueue>>,
    server: Option<MockServer>,
}

/// Answers every POST from the shared queue
struct GraphResponder {
    queue: Arc<Mutex<ExpectationQueue>>,
}

impl Respond for GraphResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let authorization = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok());

        let mut queue = lock(&self.queue);
        match queue.match_body(&request.body, authorization) {
            Ok((status, response)) => {
                log::debug!(
                    "mock served expectation #{} ({} left)",
                    queue.served(),
                    queue.remaining()
                );
                ResponseTemplate::new(status).set_body_json(response)
            }
            Err(violation) => {
                log::warn!("mock contract violation: {}", violation);
                ResponseTemplate::new(violation.status()).set_body_json(violation.to_response())
            }
        }
    }
}

/// Block until `address` is free; the listener closes on the server's own thread
fn wait_for_release(address: SocketAddr) {
    let deadline = Instant::now() + RELEASE_TIMEOUT;
    loop {
        match TcpListener::bind(address) {
            Ok(_) => return,
            Err(_) if Instant::now() < deadline => thread::sleep(RELEASE_POLL),
            Err(e) => {
                log::warn!("mock GraphQL server port {} still bound after stop: {}", address, e);
                return;
            }
        }
    }
}

fn lock(queue: &Mutex<ExpectationQueue>) -> MutexGuard<'_, ExpectationQueue> {
    // A panicking test thread must not hide the queue from the others
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGraphServer {
    pub fn new(expectations: Vec<Expectation>) -> Self {
        Self::from_queue(ExpectationQueue::new(expectations))
    }

    /// Use an already built queue, e.g. one loaded from a fixture file
    pub fn from_queue(queue: ExpectationQueue) -> Self {
        Self {
            queue: Arc::new(Mutex::new(queue)),
            server: None,
        }
    }

    /// Bind an ephemeral port and start answering requests
    ///
    /// Returns once the listener accepts connections.
    pub async fn start(&mut self) -> Result<(), MockError> {
        if self.server.is_some() {
            return Err(MockError::AlreadyRunning);
        }

        // Built servers are not pooled, so dropping one releases its port
        let server = MockServer::builder().start().await;

        Mock::given(method("POST"))
            .respond_with(GraphResponder {
                queue: Arc::clone(&self.queue),
            })
            .named("graphql")
            .mount(&server)
            .await;

        log::debug!("mock GraphQL server listening on {}", server.uri());
        self.server = Some(server);
        Ok(())
    }

    /// Base URL (scheme, host and port) clients should post to
    pub fn endpoint(&self) -> Result<String, MockError> {
        self.server
            .as_ref()
            .map(MockServer::uri)
            .ok_or(MockError::NotStarted)
    }

    pub fn is_running(&self) -> bool {
        self.server.is_some()
    }

    /// Shut the listener down and wait until its port can be bound again
    ///
    /// A no-op when not running.
    pub fn stop(&mut self) {
        if let Some(server) = self.server.take() {
            let address = *server.address();
            log::debug!("stopping mock GraphQL server on {}", server.uri());
            drop(server);
            wait_for_release(address);
        }
    }

    pub fn is_exhausted(&self) -> bool {
        lock(&self.queue).is_exhausted()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.queue).remaining()
    }

    /// Decoded requests received so far, still available after `stop`
    pub fn received_requests(&self) -> Vec<GraphQLRequest> {
        lock(&self.queue).received().to_vec()
    }

    /// Panic if any expectation was never requested
    pub fn verify(&self) {
        let queue = lock(&self.queue);
        if !queue.is_exhausted() {
            let pending: Vec<&str> = queue
                .pending()
                .map(|e| e.operation_name.as_str())
                .collect();
            panic!(
                "mock GraphQL server: {} expectation(s) never requested: {:?}",
                pending.len(),
                pending
            );
        }
    }
}

impl Drop for MockGraphServer {
    fn drop(&mut self) {
        self.stop();
    }
}
