use linear_core::GraphQLRequest;

use crate::expectation::Expectation;
use crate::server::MockGraphServer;
use crate::MockError;

/// A started mock server that is stopped when the session goes out of scope
///
/// Dropping the session (including during a panic unwind) releases the port,
/// so a failing assertion never leaks a listener into the next test.
pub struct MockSession {
    server: MockGraphServer,
    endpoint: String,
}

impl MockSession {
    pub async fn start(expectations: Vec<Expectation>) -> Result<Self, MockError> {
        Self::from_server(MockGraphServer::new(expectations)).await
    }

    pub async fn from_server(mut server: MockGraphServer) -> Result<Self, MockError> {
        server.start().await?;
        let endpoint = server.endpoint()?;
        Ok(Self { server, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn server(&self) -> &MockGraphServer {
        &self.server
    }

    /// Stop the server, assert every expectation was used, and return what was received
    pub fn finish(mut self) -> Vec<GraphQLRequest> {
        self.server.stop();
        self.server.verify();
        self.server.received_requests()
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.server.stop();
    }
}
