use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::link_header::parse_link_header;

const USER_AGENT: &str = "forks-report";

/// Delay before following a "next" link, to avoid hammering the API.
const PAGE_DELAY: Duration = Duration::from_millis(50);

/// A `username:token` credential attached as basic auth to every request in a
/// pagination chain.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub username: String,
    pub token: String,
}

impl ApiToken {
    /// Parses a raw `username:token` credential string. Returns `None` when
    /// the separator is missing.
    pub fn parse(raw: &str) -> Option<Self> {
        let (username, token) = raw.split_once(':')?;
        Some(Self {
            username: username.to_string(),
            token: token.to_string(),
        })
    }
}

/// One decoded page: its records plus the URL of the next page, if any.
pub struct PageChunk<T> {
    pub records: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Error)]
pub enum FollowJsonPagesError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("HTTP error {status} while fetching {url}: {body}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        body: String,
    },

    #[error("DeserializeBody: {source}")]
    DeserializeBody {
        source: serde_json::Error,
    },
}

/// Fetches `start_url` and every page linked from it via `Link: rel="next"`,
/// decoding each body as a JSON array of records and concatenating the pages
/// in link order. The full sequence is returned exactly once; any non-200
/// response is fatal and no partial result reaches the caller.
///
/// Requests run strictly one at a time, with a short fixed delay between
/// pages. No retries, no timeout.
pub async fn follow_json_pages<T: DeserializeOwned>(
    start_url: &str,
    token: Option<&ApiToken>,
) -> Result<Vec<T>, FollowJsonPagesError> {
    let client = Client::new();
    let mut records: Vec<T> = Vec::new();
    let mut url = start_url.to_string();

    loop {
        let mut request = client.get(&url).header(header::USER_AGENT, USER_AGENT);
        if let Some(token) = token {
            request = request.basic_auth(&token.username, Some(&token.token));
        }

        let response = request
            .send()
            .await
            .map_err(|source| FollowJsonPagesError::RequestSend { source })?;

        let status = response.status();
        let link = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|source| FollowJsonPagesError::ResponseRead { source })?;

        let page = parse_page_response(status, link.as_deref(), &body, &url)?;
        records.extend(page.records);
        debug!(total = records.len(), %url, "fetched page");

        match page.next {
            Some(next) => {
                tokio::time::sleep(PAGE_DELAY).await;
                url = next;
            }
            None => return Ok(records),
        }
    }
}

/// Decodes one response of a pagination chain: non-200 is fatal, a 200 body
/// must be a JSON array, and the "next" relation of the `Link` header (when
/// present) points at the following page.
pub fn parse_page_response<T: DeserializeOwned>(
    status: StatusCode,
    link_header: Option<&str>,
    body: &str,
    url: &str,
) -> Result<PageChunk<T>, FollowJsonPagesError> {
    if status != StatusCode::OK {
        return Err(FollowJsonPagesError::HttpStatus {
            status,
            url: url.to_string(),
            body: body.to_string(),
        });
    }

    let records = serde_json::from_str(body)
        .map_err(|source| FollowJsonPagesError::DeserializeBody { source })?;

    let next = link_header.and_then(|value| parse_link_header(value).remove("next"));

    Ok(PageChunk { records, next })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn drive_pages(pages: &[(Option<&str>, &str)]) -> Result<Vec<Value>, FollowJsonPagesError> {
        // Same accumulation the network loop performs, minus the transport.
        let mut records = Vec::new();
        for (i, (link, body)) in pages.iter().enumerate() {
            let page: PageChunk<Value> =
                parse_page_response(StatusCode::OK, *link, body, &format!("page-{i}"))?;
            records.extend(page.records);
            if i + 1 < pages.len() {
                assert!(page.next.is_some(), "chain ended before the last page");
            } else {
                assert!(page.next.is_none(), "last page still advertises a next link");
            }
        }
        Ok(records)
    }

    #[test]
    fn concatenates_pages_in_link_order() {
        let records = drive_pages(&[
            (Some(r#"<https://example.com/?page=2>; rel="next""#), r#"[{"name":"A"}]"#),
            (None, r#"[{"name":"B"}]"#),
        ])
        .unwrap();

        assert_eq!(records, vec![json!({"name": "A"}), json!({"name": "B"})]);
    }

    #[test]
    fn link_header_without_next_terminates() {
        let page: PageChunk<Value> = parse_page_response(
            StatusCode::OK,
            Some(r#"<https://example.com/?page=64>; rel="last""#),
            "[]",
            "url",
        )
        .unwrap();

        assert!(page.next.is_none());
    }

    #[test]
    fn non_200_is_fatal() {
        let result: Result<PageChunk<Value>, _> = parse_page_response(
            StatusCode::FORBIDDEN,
            None,
            "rate limit exceeded",
            "https://api.github.com/repos/a/b/forks",
        );

        match result {
            Err(FollowJsonPagesError::HttpStatus { status, url, body }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(url, "https://api.github.com/repos/a/b/forks");
                assert_eq!(body, "rate limit exceeded");
            }
            _ => panic!("expected HttpStatus error"),
        }
    }

    #[test]
    fn malformed_body_is_fatal() {
        let result: Result<PageChunk<Value>, _> =
            parse_page_response(StatusCode::OK, None, "not json", "url");

        assert!(matches!(
            result,
            Err(FollowJsonPagesError::DeserializeBody { .. })
        ));
    }

    #[test]
    fn token_parsing_splits_on_first_colon() {
        let token = ApiToken::parse("alice:ghp_abc:def").unwrap();
        assert_eq!(token.username, "alice");
        assert_eq!(token.token, "ghp_abc:def");

        assert!(ApiToken::parse("no-separator-here").is_none());
    }
}
