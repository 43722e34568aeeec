//! Terminal output helpers
//!
//! Pure display functions; no prompts, no state. Styling goes through the
//! `console` crate so it degrades cleanly on non-tty output.

use console::style;

use crate::analyzer::ReleaseCalculationResult;

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display the outcome of a release analysis.
///
/// Shows the version transition and up to 10 analyzed commits; remaining
/// commits are summarized as a count.
pub fn display_release_analysis(result: &ReleaseCalculationResult) {
    println!(
        "\n{}",
        style(format!(
            "Analyzed {} commits since {}",
            result.commits.len(),
            result.current_version
        ))
        .bold()
    );

    for commit in result.commits.iter().take(10) {
        let marker = if commit.is_valid {
            commit.r#type.as_str()
        } else {
            "?"
        };
        println!("  {} {}", style(format!("[{}]", marker)).dim(), commit.subject);
    }

    if result.commits.len() > 10 {
        println!("  ... and {} more commits", result.commits.len() - 10);
    }

    println!(
        "\n  Current version: {}",
        style(&result.current_version).red()
    );
    println!("  Next version:    {}", style(&result.next_version).green());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_release_analysis() {
        // Visual verification test - output is printed to stdout
        let result = ReleaseCalculationResult {
            commits: Vec::new(),
            current_version: "1.0.8".to_string(),
            next_version: "1.0.9".to_string(),
        };
        display_release_analysis(&result);
    }
}
