pub mod cli;
pub mod error;
pub mod github;
pub mod http;
pub mod model;
pub mod pagination;
pub mod report;
pub mod stats;

pub use error::{OrgStatError, Result};
pub use github::GitHubClient;
pub use model::OrgStats;
pub use stats::{get_organization_stats, StatsOptions};
