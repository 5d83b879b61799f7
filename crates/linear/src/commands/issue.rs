use crate::cli::{IssueCommands, OutputFormat};
use crate::config::Config;
use crate::context::IssueContext;
use crate::error::CommandError;
use crate::output::output_comment_created;
use anyhow::{Context, Result};
use linear_core::{Comment, IssueTracker, LinearClient};

/// Validated input of `issue comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    pub issue_id: String,
    pub body: String,
}

impl CommentRequest {
    /// Check arguments before any I/O
    ///
    /// The issue comes from the flag, then from `context`. Body words are
    /// joined with single spaces and must not be blank.
    pub fn resolve(
        issue: Option<&str>,
        body: &[String],
        context: &dyn IssueContext,
    ) -> std::result::Result<Self, CommandError> {
        let body = body.join(" ");
        if body.trim().is_empty() {
            return Err(CommandError::EmptyBody);
        }

        let issue_id = match issue.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => context.current_issue().ok_or(CommandError::MissingIssue)?,
        };

        Ok(Self { issue_id, body })
    }
}

/// Dispatch an issue subcommand
///
/// `load_config` runs only after the arguments were validated, so bad input
/// is reported without reading configuration or touching the network.
pub fn handle_issue(
    action: &IssueCommands,
    context: &dyn IssueContext,
    format: OutputFormat,
    load_config: impl FnOnce() -> Result<Config>,
) -> Result<()> {
    match action {
        IssueCommands::Comment { issue, body } => {
            let request = CommentRequest::resolve(issue.as_deref(), body, context)?;
            let config = load_config()?;
            run_comment(&config, &request, format).map(|_| ())
        }
    }
}

/// Connect with `config` and post the comment
pub fn run_comment(
    config: &Config,
    request: &CommentRequest,
    format: OutputFormat,
) -> Result<Comment> {
    let client = LinearClient::new(&config.graphql_endpoint, config.api_key()?);
    handle_comment(&client, request, format)
}

fn handle_comment(
    client: &dyn IssueTracker,
    request: &CommentRequest,
    format: OutputFormat,
) -> Result<Comment> {
    let payload = client
        .create_comment(&request.issue_id, &request.body)
        .with_context(|| format!("Failed to add comment to issue '{}'", request.issue_id))?;

    let comment = payload
        .created()
        .cloned()
        .ok_or_else(|| CommandError::CommentRejected(request.issue_id.clone()))?;

    output_comment_created(&request.issue_id, &comment, format);
    Ok(comment)
}
