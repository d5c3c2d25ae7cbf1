use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::pagination::{follow_json_pages, ApiToken, FollowJsonPagesError};

/// A fork as returned by the GitHub forks endpoint. Only the fields the
/// report reads are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct Fork {
    pub name: String,
    pub html_url: String,
    pub pushed_at: Option<DateTime<Utc>>,
    pub owner: ForkOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForkOwner {
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct BranchRecord {
    name: String,
}

/// Fetches every branch name of `owner/repo`, following pagination to
/// exhaustion. GitHub returns branches in its default alphabetical order and
/// that order is preserved here.
pub async fn fetch_repo_branches(
    owner: &str,
    repo: &str,
    token: Option<&ApiToken>,
) -> Result<Vec<String>, FetchRepoBranchesError> {
    let url = format!("https://api.github.com/repos/{owner}/{repo}/branches");

    let records: Vec<BranchRecord> = follow_json_pages(&url, token)
        .await
        .map_err(|source| FetchRepoBranchesError::FollowJsonPages { source })?;

    Ok(records.into_iter().map(|record| record.name).collect())
}

#[derive(Debug, Error)]
pub enum FetchRepoBranchesError {
    #[error("FollowJsonPages: {source}")]
    FollowJsonPages {
        source: FollowJsonPagesError,
    },
}

/// Fetches every fork of `owner/repo`, following pagination to exhaustion.
pub async fn fetch_repo_forks(
    owner: &str,
    repo: &str,
    token: Option<&ApiToken>,
) -> Result<Vec<Fork>, FetchRepoForksError> {
    let url = format!("https://api.github.com/repos/{owner}/{repo}/forks");

    follow_json_pages(&url, token)
        .await
        .map_err(|source| FetchRepoForksError::FollowJsonPages { source })
}

#[derive(Debug, Error)]
pub enum FetchRepoForksError {
    #[error("FollowJsonPages: {source}")]
    FollowJsonPages {
        source: FollowJsonPagesError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_deserializes_from_api_record() {
        let fork: Fork = serde_json::from_str(
            r#"{
                "name": "somerepo",
                "html_url": "https://github.com/someone/somerepo",
                "pushed_at": "2024-03-01T12:00:00Z",
                "owner": {"login": "someone"},
                "full_name": "someone/somerepo",
                "fork": true
            }"#,
        )
        .unwrap();

        assert_eq!(fork.name, "somerepo");
        assert_eq!(fork.owner.login, "someone");
        assert_eq!(fork.html_url, "https://github.com/someone/somerepo");
        assert!(fork.pushed_at.is_some());
    }

    #[test]
    fn fork_tolerates_null_pushed_at() {
        let fork: Fork = serde_json::from_str(
            r#"{
                "name": "empty",
                "html_url": "https://github.com/someone/empty",
                "pushed_at": null,
                "owner": {"login": "someone"}
            }"#,
        )
        .unwrap();

        assert!(fork.pushed_at.is_none());
    }
}
