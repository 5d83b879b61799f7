//! Mock Linear GraphQL server for contract testing
//!
//! The server answers each POST with the next scripted response from an
//! ordered list of expectations. A request whose operation name or variables
//! differ from the head of the list gets an HTTP error response describing
//! the mismatch, so a client under test fails loudly instead of receiving a
//! default answer.
//!
//! # Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), linear_mock::MockError> {
//! use linear_mock::{fixtures, MockSession};
//!
//! let session = MockSession::start(vec![fixtures::comment_created(
//!     "TEST-123",
//!     "This is a test comment.",
//!     "comment-123",
//! )])
//! .await?;
//!
//! // point the client at session.endpoint() ...
//!
//! let requests = session.finish();
//! assert_eq!(requests.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Fixture files
//!
//! Expectations can also be loaded from TOML:
//!
//! ```toml
//! [[expectations]]
//! operation_name = "CommentCreate"
//!
//! [expectations.variables]
//! issueId = "TEST-123"
//! body = "This is a test comment."
//!
//! [expectations.response.data.commentCreate]
//! success = true
//! comment = { id = "comment-123" }
//! ```

mod expectation;
pub mod fixtures;
mod harness;
mod server;

pub use expectation::{ContractViolation, Expectation, ExpectationQueue};
pub use harness::MockSession;
pub use server::MockGraphServer;

/// Lifecycle and loading errors of the mock server
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Mock server is already running")]
    AlreadyRunning,

    #[error("Mock server has not been started")]
    NotStarted,

    #[error("Failed to read expectations file {0}: {1}")]
    Io(std::path::PathBuf, std::io::Error),

    #[error("Failed to parse expectations file {0}: {1}")]
    Parse(std::path::PathBuf, toml::de::Error),
}
