use crate::cli::StatsArgs;
use crate::github::GitHubClient;
use crate::model::{OrgStats, RepoSummary, StatsOutput, SCHEMA_VERSION};
use crate::stats::{get_organization_stats, StatsOptions};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(args: StatsArgs) -> anyhow::Result<()> {
    let client = GitHubClient::new()
        .context("Failed to build HTTP client")?
        .with_base_url(&args.api_url);

    let options = StatsOptions {
        top_repos: args.top_repos,
        top_contributors: args.top_contributors,
        show_progress: args.progress,
    };

    let stats = get_organization_stats(&client, &args.organization, &options)
        .with_context(|| format!("Failed to collect stats for organization '{}'", args.organization))?;

    if args.json {
        output_json(&stats)?;
    } else if args.ndjson {
        output_ndjson(&stats)?;
    } else {
        output_report(&stats, &options);
    }

    Ok(())
}

fn output_json(stats: &OrgStats) -> anyhow::Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        stats: stats.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(stats: &OrgStats) -> anyhow::Result<()> {
    for summary in summaries(stats) {
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

fn output_report(stats: &OrgStats, options: &StatsOptions) {
    print!("{}", render_report(stats, options));
}

/// Plain-text report: repository count, then each ranked repository with its
/// biggest contributors.
pub fn render_report(stats: &OrgStats, options: &StatsOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "The organization {} has {} repositories\n",
        style(&stats.organization).bold(),
        style(stats.repository_count).cyan()
    ));
    out.push_str(&format!(
        "{}\n",
        style(format!(
            "Top {} repositories with more commits for {} and top {} contributors per repository:",
            options.top_repos, stats.organization, options.top_contributors
        ))
        .bold()
    ));

    for summary in summaries(stats) {
        out.push_str(&format!(
            "Repository {} has {} commits\n",
            style(&summary.repository).green(),
            style(summary.commits).cyan()
        ));
        out.push_str("  Biggest contributors:\n");
        for c in &summary.contributors {
            out.push_str(&format!(
                "    {} ({} commits)\n",
                c.contributor, c.number_of_commits
            ));
        }
    }
    out
}

fn summaries(stats: &OrgStats) -> Vec<RepoSummary> {
    stats
        .repos_with_more_commits
        .iter()
        .map(|repo| RepoSummary {
            repository: repo.name.clone(),
            commits: repo.commits,
            contributors: stats
                .contributors_for(&repo.name)
                .map(<[_]>::to_vec)
                .unwrap_or_default(),
        })
        .collect()
}
