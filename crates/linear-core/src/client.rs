use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq::Agent;

use crate::error::{LinearError, Result};
use crate::graphql::{GraphQLRequest, GraphQLResponse};
use crate::models::*;
use crate::traits::IssueTracker;

/// Linear GraphQL API client
pub struct LinearClient {
    agent: Agent,
    endpoint: String,
    api_key: String,
}

impl LinearClient {
    /// Create a client for `endpoint`, authenticating with `api_key`
    ///
    /// The key is sent verbatim as the `Authorization` header, so it should
    /// already carry its scheme (`Bearer <token>`).
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check response status and return error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // GraphQL servers usually explain failures in the errors list
        let message = match serde_json::from_str::<GraphQLResponse>(&body) {
            Ok(envelope) if envelope.errors.is_some() => envelope.error_messages().join("; "),
            _ if body.is_empty() => format!("HTTP {}", status),
            _ => body,
        };

        if status == 401 {
            Err(LinearError::Unauthorized)
        } else {
            Err(LinearError::Api { status, message })
        }
    }

    /// Send one GraphQL operation and decode its `data`
    pub fn execute<V, T>(&self, request: &GraphQLRequest<V>) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        log::debug!(
            "POST {} operation={}",
            self.endpoint,
            request.operation_name.as_deref().unwrap_or("<anonymous>")
        );

        let response = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("Accept", "application/json")
            .send_json(request)?;

        let mut response = self.check_response(response)?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| LinearError::InvalidResponse(e.to_string()))?;
        let envelope: GraphQLResponse<T> = serde_json::from_str(&body)?;

        let messages = envelope.error_messages();
        if !messages.is_empty() {
            return Err(LinearError::GraphQL(messages));
        }

        envelope
            .data
            .ok_or_else(|| LinearError::MissingData("data".to_string()))
    }
}

impl IssueTracker for LinearClient {
    fn create_comment(&self, issue_id: &str, body: &str) -> Result<CommentCreatePayload> {
        let request = GraphQLRequest::new(
            COMMENT_CREATE,
            COMMENT_CREATE_MUTATION,
            CommentCreateVariables {
                issue_id: issue_id.to_string(),
                body: body.to_string(),
            },
        );

        let data: CommentCreateData = self.execute(&request)?;

        // A null payload means nothing was created
        Ok(data.comment_create.unwrap_or(CommentCreatePayload {
            success: false,
            comment: None,
        }))
    }
}
