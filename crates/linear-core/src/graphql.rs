//! GraphQL request and response envelopes

use serde::{Deserialize, Serialize};

/// A GraphQL request as sent over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest<V = serde_json::Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub variables: V,
}

impl<V> GraphQLRequest<V> {
    pub fn new(operation_name: &str, query: &str, variables: V) -> Self {
        Self {
            operation_name: Some(operation_name.to_string()),
            query: query.to_string(),
            variables,
        }
    }
}

/// A GraphQL response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse<T = serde_json::Value> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> GraphQLResponse<T> {
    /// A successful response carrying `data`
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// A response with no data and one error per message
    pub fn errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            errors: Some(messages.into_iter().map(GraphQLError::new).collect()),
        }
    }

    /// Error messages, if the server reported any
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.message.clone())
            .collect()
    }
}

/// A single entry of the `errors` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }
}
