use crate::http::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrgStatError>;

#[derive(Error, Debug)]
pub enum OrgStatError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{status} {reason} for url: {url}")]
    Upstream {
        status: u16,
        reason: String,
        url: String,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Pagination error: {0}")]
    Pagination(String),
}

impl OrgStatError {
    pub fn invalid_organization() -> Self {
        OrgStatError::InvalidArgument("organization is required and must be a string".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_organization_message_names_the_requirement() {
        let err = OrgStatError::invalid_organization();
        assert!(err
            .to_string()
            .contains("organization is required and must be a string"));
        assert!(matches!(err, OrgStatError::InvalidArgument(_)));
    }

    #[test]
    fn upstream_message_carries_status_and_reason() {
        let err = OrgStatError::Upstream {
            status: 404,
            reason: "Not Found".to_string(),
            url: "https://api.github.com/orgs/nope/repos".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "404 Not Found for url: https://api.github.com/orgs/nope/repos"
        );
    }
}
