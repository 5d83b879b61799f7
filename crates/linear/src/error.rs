use linear_core::LinearError;
use thiserror::Error;

/// Process exit codes
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_TRANSPORT: u8 = 3;
pub const EXIT_REJECTED: u8 = 4;

/// Failures detected by the CLI itself rather than the API client
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Comment body must not be empty")]
    EmptyBody,

    #[error("No issue given. Pass --issue <ID> or check out a branch named after an issue (e.g. eng-123-fix-login)")]
    MissingIssue,

    #[error("Linear API key not configured. Set LINEAR_API_KEY or api_key in the config file")]
    MissingApiKey,

    #[error("Comment was not created on {0}: the server reported success = false")]
    CommentRejected(String),
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::EmptyBody | CommandError::MissingIssue => EXIT_USAGE,
            CommandError::MissingApiKey => EXIT_FAILURE,
            CommandError::CommentRejected(_) => EXIT_REJECTED,
        }
    }
}

/// Pick the exit code for the innermost error we know about
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CommandError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<LinearError>() {
            return if e.is_transport() {
                EXIT_TRANSPORT
            } else {
                EXIT_FAILURE
            };
        }
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_command_errors_map_to_codes() {
        assert_eq!(exit_code(&CommandError::EmptyBody.into()), EXIT_USAGE);
        assert_eq!(exit_code(&CommandError::MissingIssue.into()), EXIT_USAGE);
        assert_eq!(exit_code(&CommandError::MissingApiKey.into()), EXIT_FAILURE);
        assert_eq!(
            exit_code(&CommandError::CommentRejected("A-1".into()).into()),
            EXIT_REJECTED
        );
    }

    #[test]
    fn test_context_does_not_hide_the_cause() {
        let result: Result<(), LinearError> = Err(LinearError::Api {
            status: 500,
            message: "boom".into(),
        });
        let err = result.context("Failed to add comment").unwrap_err();
        assert_eq!(exit_code(&err), EXIT_FAILURE);

        let result: Result<(), LinearError> =
            Err(LinearError::InvalidResponse("stream did not contain valid UTF-8".into()));
        let err = result.context("Failed to add comment").unwrap_err();
        assert_eq!(exit_code(&err), EXIT_FAILURE);

        let result: Result<(), LinearError> =
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into());
        let err = result.context("Failed to add comment").unwrap_err();
        assert_eq!(exit_code(&err), EXIT_TRANSPORT);
    }

    #[test]
    fn test_unknown_errors_are_generic_failures() {
        assert_eq!(exit_code(&anyhow::anyhow!("something else")), EXIT_FAILURE);
    }
}
