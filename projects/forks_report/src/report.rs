use interfaces_github_repos::index::{
    fetch_repo_branches, fetch_repo_forks, FetchRepoBranchesError, FetchRepoForksError, Fork,
};
use interfaces_github_repos::pagination::ApiToken;
use thiserror::Error;
use tracing::info;

use crate::diff::interesting_branches;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("FetchOriginBranches: {source}")]
    FetchOriginBranches {
        source: FetchRepoBranchesError,
    },

    #[error("FetchForks: {source}")]
    FetchForks {
        source: FetchRepoForksError,
    },

    #[error("FetchForkBranches for {fork}: {source}")]
    FetchForkBranches {
        fork: String,
        source: FetchRepoBranchesError,
    },
}

/// Fetches origin branches and forks, then reports each selected fork's
/// interesting branches to stdout.
///
/// Forks are processed strictly one at a time: the next fork's branch fetch
/// starts only after the previous fork's block has been written. A failure
/// on any fork aborts the remaining iteration.
pub async fn run(
    username: &str,
    repo: &str,
    max_forks: usize,
    token: Option<&ApiToken>,
) -> Result<(), ReportError> {
    let origin_branches = fetch_repo_branches(username, repo, token)
        .await
        .map_err(|source| ReportError::FetchOriginBranches { source })?;
    info!(count = origin_branches.len(), "fetched origin branches");

    let forks = fetch_repo_forks(username, repo, token)
        .await
        .map_err(|source| ReportError::FetchForks { source })?;
    info!(count = forks.len(), "fetched forks");

    let forks = select_forks(forks, max_forks);

    for fork in &forks {
        let branches = fetch_repo_branches(&fork.owner.login, &fork.name, token)
            .await
            .map_err(|source| ReportError::FetchForkBranches {
                fork: fork.html_url.clone(),
                source,
            })?;

        let interesting = interesting_branches(&branches, &origin_branches);
        print!("{}", fork_report(&fork.html_url, &interesting));
    }

    Ok(())
}

/// Keeps the `max_forks` most recently pushed forks. The sort is stable and
/// descending by push timestamp; forks that never saw a push sort last.
pub fn select_forks(mut forks: Vec<Fork>, max_forks: usize) -> Vec<Fork> {
    forks.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));
    forks.truncate(max_forks);
    forks
}

/// One report block: the fork's URL, its interesting branches, and a blank
/// separator line.
pub fn fork_report(html_url: &str, interesting: &[String]) -> String {
    format!(
        "{html_url}\nInteresting branches: {}\n\n",
        interesting.join(" ")
    )
}
