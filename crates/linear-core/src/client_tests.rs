//! Unit tests for LinearClient using wiremock

#[cfg(test)]
mod tests {
    use crate::client::LinearClient;
    use crate::error::LinearError;
    use crate::traits::IssueTracker;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn comment_created(id: &str) -> serde_json::Value {
        json!({
            "data": {
                "commentCreate": {
                    "success": true,
                    "comment": { "id": id }
                }
            }
        })
    }

    #[tokio::test]
    async fn test_create_comment_sends_mutation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_partial_json(json!({
                "operationName": "CommentCreate",
                "variables": { "issueId": "TEST-1", "body": "hello" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(comment_created("c-1")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LinearClient::new(&mock_server.uri(), "Bearer test-token");
        let payload = client.create_comment("TEST-1", "hello").unwrap();

        assert!(payload.success);
        assert_eq!(payload.created().unwrap().id, "c-1");
    }

    #[tokio::test]
    async fn test_create_comment_unsuccessful_is_ok() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "commentCreate": { "success": false, "comment": null } }
            })))
            .mount(&mock_server)
            .await;

        let client = LinearClient::new(&mock_server.uri(), "Bearer test-token");
        let payload = client.create_comment("TEST-1", "hello").unwrap();

        assert!(!payload.success);
        assert!(payload.created().is_none());
    }

    #[tokio::test]
    async fn test_null_payload_reads_as_unsuccessful() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "commentCreate": null } })),
            )
            .mount(&mock_server)
            .await;

        let client = LinearClient::new(&mock_server.uri(), "Bearer test-token");
        let payload = client.create_comment("TEST-1", "hello").unwrap();
        assert!(!payload.success);
    }

    #[tokio::test]
    async fn test_graphql_errors_are_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Entity not found: Issue" }]
            })))
            .mount(&mock_server)
            .await;

        let client = LinearClient::new(&mock_server.uri(), "Bearer test-token");
        let err = client.create_comment("NOPE-1", "hello").unwrap_err();

        match err {
            LinearError::GraphQL(messages) => {
                assert_eq!(messages, vec!["Entity not found: Issue".to_string()])
            }
            other => panic!("expected GraphQL error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = LinearClient::new(&mock_server.uri(), "Bearer wrong");
        let err = client.create_comment("TEST-1", "hello").unwrap_err();
        assert!(matches!(err, LinearError::Unauthorized));
    }

    #[tokio::test]
    async fn test_server_error_uses_graphql_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "errors": [{ "message": "boom" }]
            })))
            .mount(&mock_server)
            .await;

        let client = LinearClient::new(&mock_server.uri(), "Bearer test-token");
        let err = client.create_comment("TEST-1", "hello").unwrap_err();

        match err {
            LinearError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_not_a_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x7b]))
            .mount(&mock_server)
            .await;

        let client = LinearClient::new(&mock_server.uri(), "Bearer test-token");
        let err = client.create_comment("TEST-1", "hello").unwrap_err();

        assert!(
            matches!(err, LinearError::InvalidResponse(_)),
            "expected invalid response, got {:?}",
            err
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let client = LinearClient::new(&format!("http://127.0.0.1:{}", port), "Bearer t");
        let err = client.create_comment("TEST-1", "hello").unwrap_err();
        assert!(err.is_transport(), "expected transport error, got {:?}", err);
    }
}
