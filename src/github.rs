use crate::error::{OrgStatError, Result};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::model::{ApiContributor, ApiRepository, ContributorStats};
use crate::pagination::{parse_link_header, total_item_count};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

const USER_AGENT: &str = concat!("orgstat/", env!("CARGO_PKG_VERSION"));

/// Read-only client for the handful of GitHub REST endpoints the tool needs.
pub struct GitHubClient<T: HttpTransport> {
    transport: T,
    base_url: String,
}

impl GitHubClient<ReqwestTransport> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::with_defaults()?))
    }
}

impl<T: HttpTransport> GitHubClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Names of the organization's public repositories.
    ///
    /// Only the first page is read, so organizations with more than
    /// [`MAX_PAGE_SIZE`] repositories are truncated. Ranking them correctly
    /// would need every page anyway since the API cannot sort by commits.
    pub fn list_org_repos(&self, org: &str) -> Result<Vec<String>> {
        let org = path_segment("organization", org)?;
        let url = format!(
            "{}/orgs/{}/repos?type=public&per_page={}",
            self.base_url, org, MAX_PAGE_SIZE
        );
        let (repos, _) = self.get_json::<Vec<ApiRepository>>(&url)?;
        info!(organization = org, count = repos.len(), "listed repositories");
        Ok(repos.into_iter().map(|r| r.name).collect())
    }

    /// Total number of commits on the default branch of `org/repo`.
    ///
    /// Reads the first page and, when the listing spans several pages, the
    /// last one. Never more than two requests.
    pub fn count_commits(&self, org: &str, repo: &str) -> Result<u64> {
        let org = path_segment("organization", org)?;
        let repo = path_segment("repository", repo)?;
        let url = format!(
            "{}/repos/{}/{}/commits?per_page={}",
            self.base_url, org, repo, MAX_PAGE_SIZE
        );
        let (first_page, response) = self.get_json::<Vec<serde_json::Value>>(&url)?;

        let pagination = response
            .header("link")
            .map(parse_link_header)
            .unwrap_or_default();

        let count = match pagination.last {
            Some(last) => {
                let last_page = last.page.filter(|p| *p > 0).ok_or_else(|| {
                    OrgStatError::Pagination(format!("last page link without a page number: {}", last.url))
                })?;
                debug!(repository = repo, last_page, "following last page link");
                let (last_items, _) = self.get_json::<Vec<serde_json::Value>>(&last.url)?;
                total_item_count(last_page, MAX_PAGE_SIZE, last_items.len())
            }
            None => first_page.len() as u64,
        };

        info!(repository = repo, commits = count, "counted commits");
        Ok(count)
    }

    /// Up to `limit` contributors of `org/repo`, in the API's order
    /// (descending by contributions).
    pub fn top_contributors(&self, org: &str, repo: &str, limit: usize) -> Result<Vec<ContributorStats>> {
        let org = path_segment("organization", org)?;
        let repo = path_segment("repository", repo)?;
        if limit == 0 {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/repos/{}/{}/contributors?per_page={}",
            self.base_url, org, repo, limit
        );
        let (contributors, _) = self.get_json::<Vec<ApiContributor>>(&url)?;
        debug!(repository = repo, count = contributors.len(), "fetched contributors");

        Ok(contributors
            .into_iter()
            .take(limit)
            .map(ContributorStats::from)
            .collect())
    }

    /// GET `url` and decode its JSON body. Any non-2xx status is an error.
    ///
    /// An empty body decodes as `D::default()`: the contributors endpoint
    /// answers `204 No Content` for an empty repository.
    fn get_json<D: DeserializeOwned + Default>(&self, url: &str) -> Result<(D, HttpResponse)> {
        debug!(url, "GET");
        let request = HttpRequest::get(url)
            .with_header("Accept", "application/vnd.github+json")
            .with_header("User-Agent", USER_AGENT);
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(OrgStatError::Upstream {
                status: response.status,
                reason: response.reason().to_string(),
                url: url.to_string(),
            });
        }

        let data = if response.body.iter().all(u8::is_ascii_whitespace) {
            D::default()
        } else {
            serde_json::from_slice(&response.body)?
        };
        Ok((data, response))
    }
}

/// Check that a name can be used verbatim as one URL path segment.
///
/// GitHub logins and repository names never contain these characters, so a
/// name that does would address a different endpoint.
pub fn path_segment<'a>(kind: &str, name: &'a str) -> Result<&'a str> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control());
    if bad {
        return Err(OrgStatError::InvalidArgument(format!(
            "{kind} name '{name}' is not a valid GitHub name"
        )));
    }
    Ok(name)
}
