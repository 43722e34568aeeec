use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::ChangelogConfig;
use crate::domain::CommitRecord;

/// Release-notes output format.
///
/// Formats are a closed set; an unrecognized configuration value falls
/// back to [Format::Plain].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Markdown,
    Slack,
    Plain,
}

impl Format {
    pub fn from_name(name: &str) -> Self {
        match name {
            "markdown" => Format::Markdown,
            "slack" => Format::Slack,
            _ => Format::Plain,
        }
    }

    fn title(&self, text: &str) -> String {
        match self {
            Format::Markdown => format!("## [{}]", text),
            Format::Slack => format!("*{}*", text),
            Format::Plain => text.to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        match self {
            Format::Markdown => format!("### {}", text),
            Format::Slack => format!("*{}*", text),
            Format::Plain => format!("{}:", text),
        }
    }

    fn bold(&self, text: &str) -> String {
        match self {
            Format::Markdown => format!("**{}**", text),
            Format::Slack => format!("*{}*", text),
            Format::Plain => text.to_string(),
        }
    }

    fn commit_link(&self, url: &str, short_hash: &str) -> String {
        match self {
            Format::Markdown => format!("[{}]({})", short_hash, url),
            Format::Slack => format!("<{}|{}>", url, short_hash),
            Format::Plain => url.to_string(),
        }
    }
}

/// Renders grouped release notes from classified commits.
///
/// Each render call is a single deterministic pass; nothing is retained
/// between calls.
pub struct ChangelogRenderer {
    format: Format,
    order: Vec<String>,
    sections: HashMap<String, String>,
    title: Option<String>,
    commit_url: String,
    display_title: bool,
    display_links: bool,
    display_author: bool,
}

impl ChangelogRenderer {
    pub fn new(config: &ChangelogConfig) -> Self {
        ChangelogRenderer {
            format: Format::from_name(&config.format),
            order: config.order.clone(),
            sections: config.sections.clone(),
            title: config.title.clone(),
            commit_url: config.commit_url.clone(),
            display_title: config.display_title,
            display_links: config.display_links,
            display_author: config.display_author,
        }
    }

    /// Build release notes for `commits` under the heading `version`.
    ///
    /// Sections follow the configured order and are skipped entirely when
    /// no commit carries their type. Merge commits are suppressed in type
    /// sections but still listed under BREAKING CHANGES when they break.
    /// `date` is stamped into the title line; the binary passes today's
    /// date, tests pass a fixed one.
    pub fn render(&self, commits: &[CommitRecord], version: &str, date: NaiveDate) -> String {
        let mut result = String::new();

        if self.display_title {
            let mut title = self.format.title(version);
            if let Some(text) = &self.title {
                title.push_str(&format!(" - {}", text));
            }
            title.push_str(&format!(" - ({})", date));

            result.push_str(&title);
            result.push_str("\n\n");
        }

        for type_key in &self.order {
            // write the section only if there is at least one commit
            if !commits.iter().any(|c| &c.r#type == type_key) {
                continue;
            }

            let section_title = self
                .sections
                .get(type_key)
                .cloned()
                .unwrap_or_else(|| type_key.clone());
            result.push_str(&self.format.heading(&section_title));
            result.push_str("\n\n");

            for commit in commits {
                if &commit.r#type != type_key || commit.is_merge {
                    continue;
                }

                result.push('-');

                if let Some(scope) = &commit.scope {
                    result.push(' ');
                    result.push_str(&self.format.bold(&format!("{}:", scope)));
                }

                result.push(' ');
                result.push_str(&commit.subject);
                self.push_line_suffix(&mut result, commit);
                result.push('\n');
            }

            result.push('\n');
        }

        if commits.iter().any(|c| c.is_breaking_change) {
            result.push_str(&self.format.heading("BREAKING CHANGES"));
            result.push_str("\n\n");

            for commit in commits {
                if !commit.is_breaking_change {
                    continue;
                }

                // Marker-only breaks carry no body text; fall back to the
                // commit's own subject as the description.
                let description = commit.breaking_change.as_deref().unwrap_or(&commit.subject);
                result.push_str(&format!("- {}", description));
                self.push_line_suffix(&mut result, commit);
                result.push('\n');
            }

            result.push('\n');
        }

        result.trim_end().to_string()
    }

    fn push_line_suffix(&self, result: &mut String, commit: &CommitRecord) {
        if self.display_links {
            if let Some(hash) = &commit.hash {
                let url = format!("{}/{}", self.commit_url, hash);
                let short_hash = commit.short_hash.as_deref().unwrap_or(hash);
                result.push_str(&format!(
                    " ({})",
                    self.format.commit_link(&url, short_hash)
                ));
            }
        }

        if self.display_author {
            if let Some(author) = &commit.author {
                result.push_str(&format!(" - {}", author));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commit::{default_releases, DEFAULT_COMMIT_PATTERN};
    use regex::Regex;

    fn commits(lines: &[&str]) -> Vec<CommitRecord> {
        let pattern = Regex::new(DEFAULT_COMMIT_PATTERN).unwrap();
        let releases = default_releases();
        lines
            .iter()
            .map(|line| CommitRecord::parse(line, &pattern, &releases))
            .collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 5, 25).unwrap()
    }

    #[test]
    fn test_format_from_name_falls_back_to_plain() {
        assert_eq!(Format::from_name("markdown"), Format::Markdown);
        assert_eq!(Format::from_name("slack"), Format::Slack);
        assert_eq!(Format::from_name("plain"), Format::Plain);
        assert_eq!(Format::from_name("asciidoc"), Format::Plain);
    }

    #[test]
    fn test_markdown_styling_tokens() {
        let format = Format::Markdown;
        assert_eq!(format.title("1.0.2"), "## [1.0.2]");
        assert_eq!(format.heading("Bug fixes"), "### Bug fixes");
        assert_eq!(format.bold("test:"), "**test:**");
        assert_eq!(format.commit_link("/H", "h"), "[h](/H)");
    }

    #[test]
    fn test_slack_styling_tokens() {
        let format = Format::Slack;
        assert_eq!(format.title("1.0.2"), "*1.0.2*");
        assert_eq!(format.heading("Bug fixes"), "*Bug fixes*");
        assert_eq!(format.bold("test:"), "*test:*");
        assert_eq!(format.commit_link("/H", "h"), "</H|h>");
    }

    #[test]
    fn test_plain_styling_tokens() {
        let format = Format::Plain;
        assert_eq!(format.title("1.0.2"), "1.0.2");
        assert_eq!(format.heading("Bug fixes"), "Bug fixes:");
        assert_eq!(format.bold("test:"), "test:");
        assert_eq!(format.commit_link("/H", "h"), "/H");
    }

    #[test]
    fn test_markdown_output_has_no_slack_markers() {
        let commits = commits(&["fix: sub||H|h|A|t", "feat(ui): add||H2|h2|A|t"]);

        let mut config = ChangelogConfig::default();
        config.format = "markdown".to_string();
        let markdown = ChangelogRenderer::new(&config).render(&commits, "1.0.2", date());
        assert!(!markdown.contains('*') || markdown.contains("**"));
        assert!(markdown.contains("### "));

        config.format = "slack".to_string();
        let slack = ChangelogRenderer::new(&config).render(&commits, "1.0.2", date());
        assert!(!slack.contains("### "));
        assert!(!slack.contains("## ["));
        assert!(!slack.contains("**"));
    }

    #[test]
    fn test_release_title_with_free_text() {
        let mut config = ChangelogConfig::default();
        config.title = Some("Spring cleaning".to_string());
        let output = ChangelogRenderer::new(&config).render(
            &commits(&["fix: sub||H|h|A|t"]),
            "1.0.2",
            date(),
        );

        assert!(output.starts_with("## [1.0.2] - Spring cleaning - (2019-05-25)\n\n"));
    }

    #[test]
    fn test_unknown_section_key_uses_key_as_title() {
        let mut config = ChangelogConfig::default();
        config.order = vec!["perf".to_string()];
        config.sections.clear();
        let output = ChangelogRenderer::new(&config).render(
            &commits(&["perf: cache results||H|h|A|t"]),
            "1.0.2",
            date(),
        );

        assert!(output.contains("### perf"));
    }

    #[test]
    fn test_types_missing_from_order_are_not_rendered() {
        let mut config = ChangelogConfig::default();
        config.order = vec!["fix".to_string()];
        let output = ChangelogRenderer::new(&config).render(
            &commits(&["fix: kept||H|h|A|t", "docs: dropped||H|h|A|t"]),
            "1.0.2",
            date(),
        );

        assert!(output.contains("kept"));
        assert!(!output.contains("dropped"));
    }

    #[test]
    fn test_link_skipped_when_hash_absent() {
        let output = ChangelogRenderer::new(&ChangelogConfig::default()).render(
            &commits(&["fix: sub|"]),
            "1.0.2",
            date(),
        );

        assert!(output.contains("- sub"));
        assert!(!output.contains('('), "no link parens expected: {}", output);
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let output = ChangelogRenderer::new(&ChangelogConfig::default()).render(
            &commits(&["fix: sub||H|h|A|t"]),
            "1.0.2",
            date(),
        );

        assert_eq!(output, output.trim_end());
    }
}
