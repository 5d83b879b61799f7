//! Ready-made expectations for the `CommentCreate` mutation

use linear_core::{GraphQLResponse, COMMENT_CREATE};
use serde_json::json;

use crate::expectation::Expectation;

/// `CommentCreate` for `issue_id`/`body` answered with a created comment
pub fn comment_created(issue_id: &str, body: &str, comment_id: &str) -> Expectation {
    Expectation::new(
        COMMENT_CREATE,
        json!({ "issueId": issue_id, "body": body }),
        GraphQLResponse::data(json!({
            "commentCreate": {
                "success": true,
                "comment": { "id": comment_id }
            }
        })),
    )
}

/// `CommentCreate` for `issue_id`/`body` answered with `success: false`
pub fn comment_rejected(issue_id: &str, body: &str) -> Expectation {
    Expectation::new(
        COMMENT_CREATE,
        json!({ "issueId": issue_id, "body": body }),
        GraphQLResponse::data(json!({
            "commentCreate": {
                "success": false,
                "comment": null
            }
        })),
    )
}
