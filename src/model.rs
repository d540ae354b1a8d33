use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Entry of `GET /orgs/{org}/repos`. Only the name is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub name: String,
}

/// Entry of `GET /repos/{org}/{repo}/contributors`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContributor {
    pub login: String,
    pub contributions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoCommits {
    pub name: String,
    pub commits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorStats {
    pub contributor: String,
    pub number_of_commits: u64,
}

impl From<ApiContributor> for ContributorStats {
    fn from(c: ApiContributor) -> Self {
        Self {
            contributor: c.login,
            number_of_commits: c.contributions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoContributors {
    pub repository: String,
    pub contributors: Vec<ContributorStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgStats {
    pub organization: String,
    pub repository_count: usize,
    /// Sorted by descending commit count.
    pub repos_with_more_commits: Vec<RepoCommits>,
    /// Same order as `repos_with_more_commits`.
    pub biggest_contributors_per_repo: Vec<RepoContributors>,
}

impl OrgStats {
    pub fn commits_for(&self, repository: &str) -> Option<u64> {
        self.repos_with_more_commits
            .iter()
            .find(|r| r.name == repository)
            .map(|r| r.commits)
    }

    pub fn contributors_for(&self, repository: &str) -> Option<&[ContributorStats]> {
        self.biggest_contributors_per_repo
            .iter()
            .find(|r| r.repository == repository)
            .map(|r| r.contributors.as_slice())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: OrgStats,
}

/// One NDJSON line: a ranked repository with its contributors.
#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    pub repository: String,
    pub commits: u64,
    pub contributors: Vec<ContributorStats>,
}
