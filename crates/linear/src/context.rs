//! Infer the issue being worked on from the surrounding workspace

use std::process::Command;

/// Source of a default issue identifier when none is given on the command line
pub trait IssueContext {
    fn current_issue(&self) -> Option<String>;
}

/// Reads the issue key from the checked-out git branch name
pub struct GitBranch;

impl IssueContext for GitBranch {
    fn current_issue(&self) -> Option<String> {
        let output = Command::new("git")
            .args(["rev-parse", "--abbrev-ref", "HEAD"])
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let branch = String::from_utf8_lossy(&output.stdout);
        let issue = issue_id_from_branch(branch.trim());
        log::debug!("branch {:?} names issue {:?}", branch.trim(), issue);
        issue
    }
}

/// Find the first `TEAM-123` style key in a branch name
///
/// `alice/eng-123-fix-login` yields `ENG-123`.
pub fn issue_id_from_branch(branch: &str) -> Option<String> {
    branch
        .split(['/', '_', '.'])
        .find_map(|segment| {
            let parts: Vec<&str> = segment.split('-').collect();
            parts.windows(2).find_map(|pair| {
                let (team, number) = (pair[0], pair[1]);
                let team_ok = team.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                    && team.chars().all(|c| c.is_ascii_alphanumeric());
                let number_ok =
                    !number.is_empty() && number.chars().all(|c| c.is_ascii_digit());
                (team_ok && number_ok).then(|| format!("{}-{}", team.to_ascii_uppercase(), number))
            })
        })
}
