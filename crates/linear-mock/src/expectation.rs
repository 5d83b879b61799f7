//! Ordered, single-use expectations and request matching

use linear_core::{GraphQLError, GraphQLRequest, GraphQLResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::path::Path;

use crate::MockError;

/// One scripted request/response pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// GraphQL operation name the request must carry
    pub operation_name: String,

    /// Variables the request must carry, compared key for key
    #[serde(default)]
    pub variables: Map<String, Value>,

    /// Envelope returned when the request matches
    pub response: GraphQLResponse,

    /// HTTP status returned with the response
    #[serde(default = "default_status")]
    pub status: u16,

    /// Exact `Authorization` header value to require, if any
    #[serde(default)]
    pub authorization: Option<String>,
}

fn default_status() -> u16 {
    200
}

impl Expectation {
    /// Expect `operation_name` with `variables` (a JSON object) and answer with `response`
    pub fn new(operation_name: &str, variables: Value, response: GraphQLResponse) -> Self {
        let variables = match variables {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        Self {
            operation_name: operation_name.to_string(),
            variables,
            response,
            status: default_status(),
            authorization: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_authorization(mut self, value: &str) -> Self {
        self.authorization = Some(value.to_string());
        self
    }
}

/// Why a request did not match the head of the queue
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractViolation {
    #[error(
        "unexpected request `{}`: all {served} expectation(s) were already consumed",
        .actual.as_deref().unwrap_or("<anonymous>")
    )]
    Exhausted {
        actual: Option<String>,
        served: usize,
    },

    #[error(
        "expected operation `{expected}`, got `{}`",
        .actual.as_deref().unwrap_or("<anonymous>")
    )]
    OperationMismatch {
        expected: String,
        actual: Option<String>,
    },

    #[error("variables of `{operation}` differ: expected {expected}, got {actual}")]
    VariablesMismatch {
        operation: String,
        expected: Value,
        actual: Value,
    },

    #[error("authorization of `{operation}` differs: expected {expected:?}, got {actual:?}")]
    AuthorizationMismatch {
        operation: String,
        expected: String,
        actual: Option<String>,
    },

    #[error("malformed GraphQL request: {0}")]
    MalformedRequest(String),
}

impl ContractViolation {
    /// Error code placed in the response's `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            ContractViolation::MalformedRequest(_) => "MOCK_MALFORMED_REQUEST",
            _ => "MOCK_CONTRACT_VIOLATION",
        }
    }

    /// HTTP status the mock server answers with
    pub fn status(&self) -> u16 {
        match self {
            ContractViolation::MalformedRequest(_) => 400,
            _ => 500,
        }
    }

    /// Error envelope describing the mismatch, expected vs. actual
    pub fn to_response(&self) -> GraphQLResponse {
        let (expected, actual) = match self {
            ContractViolation::Exhausted { actual, .. } => (Value::Null, json!(actual)),
            ContractViolation::OperationMismatch { expected, actual } => {
                (json!(expected), json!(actual))
            }
            ContractViolation::VariablesMismatch {
                expected, actual, ..
            } => (expected.clone(), actual.clone()),
            ContractViolation::AuthorizationMismatch {
                expected, actual, ..
            } => (json!(expected), json!(actual)),
            ContractViolation::MalformedRequest(_) => (Value::Null, Value::Null),
        };

        GraphQLResponse {
            data: None,
            errors: Some(vec![GraphQLError {
                message: self.to_string(),
                extensions: Some(json!({
                    "code": self.code(),
                    "expected": expected,
                    "actual": actual,
                })),
            }]),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExpectationsFile {
    #[serde(default)]
    expectations: Vec<Expectation>,
}

/// Expectations still to be served, in registration order
#[derive(Debug, Default)]
pub struct ExpectationQueue {
    remaining: VecDeque<Expectation>,
    served: usize,
    received: Vec<GraphQLRequest>,
}

impl ExpectationQueue {
    pub fn new(expectations: Vec<Expectation>) -> Self {
        Self {
            remaining: expectations.into(),
            served: 0,
            received: Vec::new(),
        }
    }

    /// Load an ordered expectation list from a TOML file
    pub fn load(path: &Path) -> Result<Self, MockError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MockError::Io(path.to_path_buf(), e))?;

        let file: ExpectationsFile =
            toml::from_str(&content).map_err(|e| MockError::Parse(path.to_path_buf(), e))?;

        Ok(Self::new(file.expectations))
    }

    pub fn peek(&self) -> Option<&Expectation> {
        self.remaining.front()
    }

    /// Expectations not yet consumed, head first
    pub fn pending(&self) -> impl Iterator<Item = &Expectation> {
        self.remaining.iter()
    }

    /// Take the head expectation; an empty queue means an unexpected extra request
    pub fn consume(&mut self) -> Result<Expectation, ContractViolation> {
        let expectation = self
            .remaining
            .pop_front()
            .ok_or(ContractViolation::Exhausted {
                actual: None,
                served: self.served,
            })?;
        self.served += 1;
        Ok(expectation)
    }

    /// Consume the head expectation and check `request` against it
    ///
    /// The head is consumed whether or not it matches; later entries are
    /// never tried in its place.
    pub fn match_next(
        &mut self,
        request: &GraphQLRequest,
        authorization: Option<&str>,
    ) -> Result<(u16, GraphQLResponse), ContractViolation> {
        self.received.push(request.clone());

        let Some(expectation) = self.remaining.pop_front() else {
            return Err(ContractViolation::Exhausted {
                actual: request.operation_name.clone(),
                served: self.served,
            });
        };
        self.served += 1;

        if request.operation_name.as_deref() != Some(expectation.operation_name.as_str()) {
            return Err(ContractViolation::OperationMismatch {
                expected: expectation.operation_name,
                actual: request.operation_name.clone(),
            });
        }

        let actual = match &request.variables {
            Value::Null => Value::Object(Map::new()),
            other => other.clone(),
        };
        let expected = Value::Object(expectation.variables);
        if actual != expected {
            return Err(ContractViolation::VariablesMismatch {
                operation: expectation.operation_name,
                expected,
                actual,
            });
        }

        if let Some(required) = expectation.authorization {
            if authorization != Some(required.as_str()) {
                return Err(ContractViolation::AuthorizationMismatch {
                    operation: expectation.operation_name,
                    expected: required,
                    actual: authorization.map(String::from),
                });
            }
        }

        Ok((expectation.status, expectation.response))
    }

    /// Decode a raw request body, then match it
    ///
    /// An undecodable body still consumes one expectation and is recorded
    /// with the raw text as its query; against an empty queue it is reported
    /// as exhaustion.
    pub fn match_body(
        &mut self,
        body: &[u8],
        authorization: Option<&str>,
    ) -> Result<(u16, GraphQLResponse), ContractViolation> {
        match serde_json::from_slice::<GraphQLRequest>(body) {
            Ok(request) => self.match_next(&request, authorization),
            Err(e) => {
                self.received.push(GraphQLRequest {
                    operation_name: None,
                    query: String::from_utf8_lossy(body).into_owned(),
                    variables: Value::Null,
                });
                self.consume()?;
                Err(ContractViolation::MalformedRequest(e.to_string()))
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Number of expectations consumed so far
    pub fn served(&self) -> usize {
        self.served
    }

    /// Every decoded request, in arrival order
    pub fn received(&self) -> &[GraphQLRequest] {
        &self.received
    }
}
