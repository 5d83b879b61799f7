use crate::cli::OutputFormat;
use colored::Colorize;
use linear_core::Comment;
use serde::Serialize;

#[derive(Serialize)]
struct CommentCreated<'a> {
    success: bool,
    issue_id: &'a str,
    comment_id: &'a str,
}

pub fn output_comment_created(issue_id: &str, comment: &Comment, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let created = CommentCreated {
                success: true,
                issue_id,
                comment_id: &comment.id,
            };
            if let Ok(json) = serde_json::to_string_pretty(&created) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!(
                "Comment {} added to {}",
                comment.id.dimmed(),
                issue_id.cyan().bold()
            );
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: u8,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, code: u8, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code,
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}
