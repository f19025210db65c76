//! Terminal decoration, applied only when printing.
//!
//! Every function takes plain text and returns the text to print, with ANSI
//! styling when `color` is set.

use crossterm::style::Stylize;
use oca_port_core::error::{BranchRole, CoreError};

pub fn bold(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

pub fn dim(text: &str, color: bool) -> String {
    if color {
        text.dim().to_string()
    } else {
        text.to_string()
    }
}

pub fn fail(text: &str, color: bool) -> String {
    if color {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

pub fn success(text: &str, color: bool) -> String {
    if color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

/// Message printed before fetching a branch in verbose mode
pub fn fetch_line(reference: &str, url: Option<&str>, color: bool) -> String {
    match url {
        Some(url) => format!("Fetch {} from {}", bold(reference, color), url),
        None => format!("Fetch {}", bold(reference, color)),
    }
}

/// Render a fatal error for stderr
pub fn render_error(err: &CoreError, color: bool) -> String {
    let body = match err {
        CoreError::UnknownRemote {
            remediation,
            fork_hint,
        } => {
            let mut text = format!(
                "No remote {} in the current repository.\n\
                 To add it:\n\
                 \t# This mode requires an SSH key in the GitHub account\n\
                 \t{}\n\
                 \x20  Or:\n\
                 \t# This will require to enter user/password each time\n\
                 \t{}",
                fail(&remediation.remote, color),
                dim(&format!("$ {}", remediation.ssh_command()), color),
                dim(&format!("$ {}", remediation.https_command()), color),
            );
            if *fork_hint {
                text.push_str(&format!(
                    "\n\nYou can change the GitHub organization with the {} option.",
                    dim("--user-org", color)
                ));
            }
            text
        }
        CoreError::UnresolvableBranch {
            role,
            name,
            reference,
        } => match role {
            BranchRole::Source => {
                format!("No source branch {} available.", bold(reference, color))
            }
            BranchRole::Target => format!(
                "No target branch {} or {} available locally.",
                bold(name, color),
                bold(reference, color)
            ),
        },
        CoreError::MissingAddonOnSource { addon, branch } => {
            format!("{} does not exist on {}", fail(addon, color), branch)
        }
        other => other.to_string(),
    };
    format!("{} {}", fail("Error:", color), body)
}
