//! Link header pagination.
//!
//! GitHub advertises pagination through the `Link` response header:
//! `<https://api.github.com/repositories/1/commits?per_page=100&page=2>; rel="next", <...&page=34>; rel="last"`

/// One pointer from a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub url: String,
    /// The `page` query parameter, if the URL carries a parseable one.
    pub page: Option<u32>,
}

/// The pointers the commit counter needs. Other relations are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPagination {
    pub last: Option<PageLink>,
}

pub fn parse_link_header(link_header: &str) -> LinkPagination {
    let mut info = LinkPagination::default();

    for part in link_header.split(',') {
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(rel_value) = segment.strip_prefix("rel=") {
                rel = Some(rel_value.trim_matches('"'));
            }
        }

        if let (Some(url), Some(rel)) = (url, rel) {
            let link = PageLink {
                url: url.to_string(),
                page: extract_page_from_url(url),
            };
            // rel may hold several space-separated relation types
            if rel.split_whitespace().any(|r| r == "last") {
                info.last = Some(link);
            }
        }
    }

    info
}

/// Extract the `page` query parameter from a URL. `per_page` does not match.
pub fn extract_page_from_url(url: &str) -> Option<u32> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);

    query
        .split('&')
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// Total number of items in a listing given its last page.
///
/// Every page before the last one is full, so only the last page needs to be
/// fetched to know the total.
pub fn total_item_count(last_page: u32, page_size: u32, items_on_last_page: usize) -> u64 {
    u64::from(last_page.saturating_sub(1)) * u64::from(page_size) + items_on_last_page as u64
}
