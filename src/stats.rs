use crate::error::{OrgStatError, Result};
use crate::github::{path_segment, GitHubClient};
use crate::http::HttpTransport;
use crate::model::{OrgStats, RepoCommits, RepoContributors};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

#[derive(Debug, Clone)]
pub struct StatsOptions {
    pub top_repos: usize,
    pub top_contributors: usize,
    pub show_progress: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_repos: 5,
            top_contributors: 5,
            show_progress: false,
        }
    }
}

pub fn validate_organization(organization: &str) -> Result<&str> {
    let trimmed = organization.trim();
    if trimmed.is_empty() {
        return Err(OrgStatError::invalid_organization());
    }
    path_segment("organization", trimmed)
}

/// Rank the organization's repositories by commit count and collect the
/// biggest contributors of the top ones. Any failed request aborts the run.
pub fn get_organization_stats<T: HttpTransport>(
    client: &GitHubClient<T>,
    organization: &str,
    options: &StatsOptions,
) -> Result<OrgStats> {
    let organization = validate_organization(organization)?;

    let repos = client.list_org_repos(organization)?;
    let repository_count = repos.len();

    let counts = count_commits_with_progress(client, organization, &repos, options.show_progress)?;
    let top = rank_repositories(counts, options.top_repos);

    let mut biggest_contributors_per_repo = Vec::with_capacity(top.len());
    for repo in &top {
        let contributors = client.top_contributors(organization, &repo.name, options.top_contributors)?;
        biggest_contributors_per_repo.push(RepoContributors {
            repository: repo.name.clone(),
            contributors,
        });
    }

    info!(organization, ranked = top.len(), "collected organization stats");

    Ok(OrgStats {
        organization: organization.to_string(),
        repository_count,
        repos_with_more_commits: top,
        biggest_contributors_per_repo,
    })
}

pub fn count_commits_with_progress<T: HttpTransport>(
    client: &GitHubClient<T>,
    organization: &str,
    repos: &[String],
    show_progress: bool,
) -> Result<Vec<RepoCommits>> {
    let pb = if show_progress {
        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut counts = Vec::with_capacity(repos.len());
    for name in repos {
        pb.set_message(name.clone());
        let commits = match client.count_commits(organization, name) {
            Ok(c) => c,
            Err(e) => {
                pb.abandon_with_message(format!("Failed on {name}"));
                return Err(e);
            }
        };
        counts.push(RepoCommits {
            name: name.clone(),
            commits,
        });
        pb.inc(1);
    }
    pb.finish_with_message("Commits counted");

    Ok(counts)
}

/// Sort by descending commits and keep the first `limit`. The sort is stable,
/// so repositories with equal counts stay in listing order.
pub fn rank_repositories(mut counts: Vec<RepoCommits>, limit: usize) -> Vec<RepoCommits> {
    counts.sort_by(|a, b| b.commits.cmp(&a.commits));
    counts.truncate(limit);
    counts
}
