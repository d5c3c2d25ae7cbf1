use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use interfaces_github_repos::pagination::ApiToken;
use tracing::{debug, warn};

const TOKEN_FILE_NAME: &str = ".ghtoken";

/// Resolves the API credential once at startup. The first existing candidate
/// file wins: `./.ghtoken`, then `~/.ghtoken`, then `.ghtoken` next to the
/// executable. No file means unauthenticated requests.
pub fn discover_api_token() -> Option<ApiToken> {
    let path = candidate_paths().into_iter().find(|path| path.is_file())?;

    match read_token_file(&path) {
        Ok(Some(token)) => {
            debug!(path = %path.display(), "loaded API credential");
            Some(token)
        }
        Ok(None) => {
            warn!(
                path = %path.display(),
                "credential file lacks the username:token separator; ignoring"
            );
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring credential file");
            None
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(TOKEN_FILE_NAME)];

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(TOKEN_FILE_NAME));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(TOKEN_FILE_NAME));
        }
    }

    candidates
}

/// Reads a credential file and parses its `username:token` contents, after
/// stripping newlines, carriage returns, and tabs.
pub fn read_token_file(path: &Path) -> Result<Option<ApiToken>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading credential file {}", path.display()))?;

    let raw: String = raw
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect();

    Ok(ApiToken::parse(&raw))
}
