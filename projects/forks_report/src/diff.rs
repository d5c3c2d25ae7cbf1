use std::collections::HashSet;

use tracing::warn;

/// Returns every fork branch absent from the origin branch list, preserving
/// the fork list's order.
///
/// Both lists normally arrive in the host API's default alphabetical order,
/// which lets a two-pointer merge scan find the difference in one pass. That
/// ordering is the API's convention, not a guarantee, so it is validated
/// here: if either list is out of order (or carries duplicates) the merge
/// would silently drop branches, and a hash-set difference is used instead.
pub fn interesting_branches(fork_branches: &[String], origin_branches: &[String]) -> Vec<String> {
    if is_strictly_ascending(fork_branches) && is_strictly_ascending(origin_branches) {
        merge_difference(fork_branches, origin_branches)
    } else {
        warn!("branch lists are not strictly ascending; using set difference");
        set_difference(fork_branches, origin_branches)
    }
}

fn is_strictly_ascending(branches: &[String]) -> bool {
    branches.windows(2).all(|pair| pair[0] < pair[1])
}

/// Two-pointer scan over two strictly ascending sequences.
fn merge_difference(fork_branches: &[String], origin_branches: &[String]) -> Vec<String> {
    let mut interesting = Vec::new();
    let mut i_origin = 0;

    for branch in fork_branches {
        while i_origin < origin_branches.len() && origin_branches[i_origin] < *branch {
            i_origin += 1;
        }
        if i_origin >= origin_branches.len() || origin_branches[i_origin] > *branch {
            interesting.push(branch.clone());
        }
    }

    interesting
}

fn set_difference(fork_branches: &[String], origin_branches: &[String]) -> Vec<String> {
    let origin: HashSet<&str> = origin_branches.iter().map(String::as_str).collect();

    fork_branches
        .iter()
        .filter(|branch| !origin.contains(branch.as_str()))
        .cloned()
        .collect()
}
