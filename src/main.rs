use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};

use git_release::analyzer::ReleaseAnalyzer;
use git_release::changelog::ChangelogRenderer;
use git_release::config::{self, Config};
use git_release::git::{self, Git2Repository, Repository};
use git_release::ui;

#[derive(Parser)]
#[command(
    name = "git-release",
    about = "Compute the next semantic version and release notes from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze commits since the last release tag and decide whether a new
    /// release is warranted
    Analyze {
        #[arg(short, long, help = "Glob used to select release tags")]
        r#match: Option<String>,
    },

    /// Render release notes for the commits of a release range
    Changelog {
        #[arg(short, long, help = "Output format: markdown, slack or plain")]
        format: Option<String>,

        #[arg(
            long,
            help = "Cover the previously released range instead of the unreleased one"
        )]
        released: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // Initialize git operations
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let outcome = match args.command {
        Command::Analyze { r#match } => {
            if let Some(pattern) = r#match {
                config.tags.r#match = pattern;
            }
            run_analyze(&repo, &config)
        }
        Command::Changelog { format, released } => {
            if let Some(format) = format {
                config.changelog.format = format;
            }
            run_changelog(&repo, &config, released)
        }
    };

    if let Err(e) = outcome {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

/// Decide the next version from the commits since the latest release tag.
fn run_analyze<R: Repository>(repo: &R, config: &Config) -> git_release::Result<()> {
    let tags = repo.list_tags_matching(&config.tags.r#match, 1)?;
    let stream = repo.commit_log(tags.first().map(String::as_str), None)?;
    let records = git::split_records(&stream);

    let analyzer = ReleaseAnalyzer::from_config(config)?;
    let result = analyzer.scan(&tags, &records)?;

    ui::display_release_analysis(&result);

    if result.is_releasable() {
        ui::display_success(&format!(
            "Next version ({}) is higher than last version ({}). This version should be released.",
            result.next_version, result.current_version
        ));
    } else {
        ui::display_status("No releasable changes found.");
    }

    Ok(())
}

/// Render release notes to stdout.
///
/// The unreleased range covers latest tag to HEAD; `--released` covers the
/// previous tag to the latest tag, falling back to HEAD when only one tag
/// exists.
fn run_changelog<R: Repository>(
    repo: &R,
    config: &Config,
    released: bool,
) -> git_release::Result<()> {
    let tags;
    let from;
    let to;

    if released {
        tags = repo.list_tags_matching(&config.tags.r#match, 2)?;
        if tags.len() >= 2 {
            from = Some(tags[1].clone());
            to = Some(tags[0].clone());
        } else {
            from = tags.first().cloned();
            to = None;
        }
    } else {
        tags = repo.list_tags_matching(&config.tags.r#match, 1)?;
        from = tags.first().cloned();
        to = None;
    }

    let stream = repo.commit_log(from.as_deref(), to.as_deref())?;
    let records = git::split_records(&stream);

    let analyzer = ReleaseAnalyzer::from_config(config)?;
    let result = analyzer.scan(&tags, &records)?;

    let renderer = ChangelogRenderer::new(&config.changelog);
    let notes = renderer.render(
        &result.commits,
        &result.current_version,
        Local::now().date_naive(),
    );

    println!("{}", notes);

    Ok(())
}
