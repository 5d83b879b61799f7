use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linear", version, about = "CLI for the Linear issue tracker")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "LINEAR_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Issue operations
    #[command(visible_alias = "i")]
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Add a comment to an issue
    #[command(visible_alias = "cmt")]
    Comment {
        /// Issue ID (e.g., ENG-123). Defaults to the issue named by the current git branch
        #[arg(long, short = 'i', value_name = "ID")]
        issue: Option<String>,
        /// Comment text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1.., value_name = "TEXT")]
        body: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    fn parse_comment(args: &[&str]) -> (Option<String>, Vec<String>) {
        let cli = Cli::parse_from(args);
        match cli.command {
            Commands::Issue { action } => match action {
                IssueCommands::Comment { issue, body } => (issue, body),
            },
        }
    }

    #[test]
    fn parses_long_issue_flag() {
        let (issue, body) = parse_comment(&[
            "linear",
            "issue",
            "comment",
            "--issue",
            "TEST-123",
            "This is a test comment.",
        ]);
        assert_eq!(issue.as_deref(), Some("TEST-123"));
        assert_eq!(body, vec!["This is a test comment."]);
    }

    #[test]
    fn parses_short_issue_flag() {
        let (issue, body) = parse_comment(&[
            "linear",
            "issue",
            "comment",
            "-i",
            "PROJ-456",
            "Another comment with short flag.",
        ]);
        assert_eq!(issue.as_deref(), Some("PROJ-456"));
        assert_eq!(body, vec!["Another comment with short flag."]);
    }

    #[test]
    fn parses_unquoted_words_and_trailing_flag() {
        let (issue, body) = parse_comment(&[
            "linear", "i", "cmt", "looks", "good", "to", "me", "-i", "ENG-1",
        ]);
        assert_eq!(issue.as_deref(), Some("ENG-1"));
        assert_eq!(body, vec!["looks", "good", "to", "me"]);
    }

    #[test]
    fn issue_flag_is_optional() {
        let (issue, body) = parse_comment(&["linear", "issue", "comment", "hello"]);
        assert!(issue.is_none());
        assert_eq!(body, vec!["hello"]);
    }

    #[test]
    fn body_is_required() {
        let err = Cli::try_parse_from(["linear", "issue", "comment", "--issue", "ENG-1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = Cli::try_parse_from(["linear", "issue", "comment", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
