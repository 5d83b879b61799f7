use crate::error::Result;
use crate::models::CommentCreatePayload;

/// Operations the CLI needs from an issue tracker backend
pub trait IssueTracker: Send + Sync {
    /// Add a comment to an issue, returning the raw mutation payload
    ///
    /// A payload with `success: false` is returned as `Ok`; deciding what that
    /// means is left to the caller.
    fn create_comment(&self, issue_id: &str, body: &str) -> Result<CommentCreatePayload>;
}
