use serde::{Deserialize, Serialize};

/// Operation name of the comment mutation
pub const COMMENT_CREATE: &str = "CommentCreate";

pub(crate) const COMMENT_CREATE_MUTATION: &str = "mutation CommentCreate($issueId: String!, $body: String!) { commentCreate(input: { issueId: $issueId, body: $body }) { success comment { id } } }";

/// Variables for `CommentCreate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateVariables {
    pub issue_id: String,
    pub body: String,
}

/// `data` of the `CommentCreate` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentCreateData {
    pub comment_create: Option<CommentCreatePayload>,
}

/// Mutation payload: whether the comment was created and its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentCreatePayload {
    pub success: bool,
    #[serde(default)]
    pub comment: Option<Comment>,
}

impl CommentCreatePayload {
    /// The created comment, only when the server reported success
    pub fn created(&self) -> Option<&Comment> {
        if self.success {
            self.comment.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
}
