//! CLI entry point for mrguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `mrguard-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use mrguard_app::{
    ReviewInput, decision_exit_code, list_rules, owned_ranges, render_markdown, resolve_settings,
    run_review, runtime_error_report, write_report, write_text,
};
use mrguard_gitlab::GitLabClient;
use mrguard_settings::Overrides;
use mrguard_types::RepoPath;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mrguard",
    version,
    about = "Automated merge request reviewer for data product descriptors"
)]
struct Cli {
    /// Path to mrguard config TOML (missing file means defaults).
    #[arg(long, default_value = "mrguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|permissive|locked).
    #[arg(long)]
    profile: Option<String>,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Review a merge request and write artifacts. Token is read from GITLAB_TOKEN.
    Review {
        /// Target project id.
        #[arg(long)]
        project: u64,

        /// Merge request iid within the project.
        #[arg(long)]
        mr: u64,

        /// GitLab instance base URL.
        #[arg(long, default_value = "https://gitlab.com")]
        gitlab_url: String,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/mrguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown comment alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown comment (if enabled).
        #[arg(long, default_value = "artifacts/mrguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// List the rules the effective config registers.
    Rules,

    /// Show the line ranges each rule claims in a local file.
    Owned {
        /// File to inspect; its path decides which rules govern it.
        file: Utf8PathBuf,
    },

    /// Print the JSON schema of the config file.
    ConfigSchema,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Review {
            project,
            mr,
            ref gitlab_url,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_review(
            &cli,
            project,
            mr,
            gitlab_url,
            report_out,
            write_markdown.then_some(markdown_out),
        ),
        Commands::Rules => cmd_rules(&cli),
        Commands::Owned { ref file } => cmd_owned(&cli, file),
        Commands::ConfigSchema => cmd_config_schema(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
    }
}

fn read_config(cli: &Cli) -> String {
    std::fs::read_to_string(&cli.config).unwrap_or_default()
}

fn cmd_review(
    cli: &Cli,
    project: u64,
    mr: u64,
    gitlab_url: &str,
    report_out: &camino::Utf8Path,
    markdown_out: Option<&Utf8PathBuf>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(cli);
        let token = std::env::var("GITLAB_TOKEN").ok().filter(|t| !t.is_empty());
        if token.is_none() {
            tracing::warn!("GITLAB_TOKEN is not set; requests are unauthenticated");
        }
        let client = GitLabClient::new(gitlab_url, token).context("create GitLab client")?;

        let input = ReviewInput {
            project_id: project,
            mr_iid: mr,
            config_text: &cfg_text,
            overrides: overrides(cli),
        };
        let output = run_review(input, Arc::new(client))?;

        write_report(report_out, &output.report).context("write report json")?;
        if let Some(path) = markdown_out {
            write_text(path, &render_markdown(&output.report)).context("write markdown")?;
        }

        println!(
            "mrguard: {} ({})",
            output.report.decision.as_str(),
            output.report.reason
        );
        Ok(decision_exit_code(output.report.decision))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(Some(project), Some(mr), &format!("{err:#}"));
            let _ = write_report(report_out, &report);
            if let Some(path) = markdown_out {
                let _ = write_text(path, &render_markdown(&report));
            }
            eprintln!("mrguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_rules(cli: &Cli) -> anyhow::Result<()> {
    let resolved = resolve_settings(&read_config(cli), overrides(cli))?;
    for rule in list_rules(&resolved.effective)? {
        println!("{}\t{}", rule.id, rule.description);
    }
    Ok(())
}

fn cmd_owned(cli: &Cli, file: &camino::Utf8Path) -> anyhow::Result<()> {
    let resolved = resolve_settings(&read_config(cli), overrides(cli))?;
    let text = std::fs::read_to_string(file).with_context(|| format!("read file: {file}"))?;
    let path = RepoPath::from(file);

    let rules = owned_ranges(&resolved.effective, &path, &text)?;
    if rules.is_empty() {
        println!("no rule governs {path}");
        return Ok(());
    }
    for rule in rules {
        let spans: Vec<String> = rule.owned.iter().map(|r| r.to_string()).collect();
        if spans.is_empty() {
            println!("{}: (no lines)", rule.id);
        } else {
            println!("{}: {}", rule.id, spans.join(", "));
        }
    }
    Ok(())
}

fn cmd_config_schema() -> anyhow::Result<()> {
    let schema = mrguard_settings::config_schema();
    let json = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{json}");
    Ok(())
}
