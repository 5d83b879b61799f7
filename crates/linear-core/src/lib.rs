//! Core types and client for the Linear GraphQL API
//!
//! This crate holds the wire envelopes shared by the CLI and the mock server,
//! the `CommentCreate` mutation, and a blocking HTTP client that sends it.

pub mod client;
pub mod error;
pub mod graphql;
pub mod models;
pub mod traits;

#[cfg(test)]
mod client_tests;

pub use client::LinearClient;
pub use error::{LinearError, Result};
pub use graphql::{GraphQLError, GraphQLRequest, GraphQLResponse};
pub use models::{Comment, CommentCreatePayload, CommentCreateVariables, COMMENT_CREATE};
pub use traits::IssueTracker;

/// Production Linear GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";
