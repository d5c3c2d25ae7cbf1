use std::collections::HashMap;

use tracing::warn;

/// Parses the value of an HTTP `Link` header into a relation-name -> URL map.
///
/// The header is a comma-separated list of `<url>; rel="name"` entries, where
/// the URL itself may contain commas. Entries that do not match that shape are
/// skipped with a diagnostic; callers treat a missing "next" key as the end of
/// pagination, not as an error.
pub fn parse_link_header(value: &str) -> HashMap<String, String> {
    let mut links = HashMap::new();

    for entry in split_top_level_commas(value) {
        match parse_link_entry(entry) {
            Some((rel, url)) => {
                links.insert(rel.to_string(), url.to_string());
            }
            None => {
                warn!(entry, "didn't understand a Link header entry");
            }
        }
    }

    links
}

/// Splits on commas that are not inside `<...>` brackets.
fn split_top_level_commas(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_brackets = false;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            '<' => in_brackets = true,
            '>' => in_brackets = false,
            ',' if !in_brackets => {
                entries.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&value[start..]);

    entries
        .into_iter()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}

/// Extracts `(rel, url)` from one `<url>; rel="name"` entry.
fn parse_link_entry(entry: &str) -> Option<(&str, &str)> {
    let rest = entry.strip_prefix('<')?;
    let (url, params) = rest.split_once('>')?;

    let params = params.trim_start().strip_prefix(';')?;
    let rel = params
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("rel="))?;
    let rel = rel.strip_prefix('"')?.strip_suffix('"')?;

    if rel.is_empty() {
        return None;
    }

    Some((rel, url))
}
