use std::collections::HashSet;

use itertools::{Either, Itertools};

/// Result of matching requested label removals against the labels of an issue.
#[derive(Debug, PartialEq)]
pub struct LabelDiff {
    /// Labels that stay on the issue, in their original order.
    pub remaining: Vec<String>,
    /// Requested labels that are attached to the issue.
    pub removed: Vec<String>,
    /// Requested labels that are not attached to the issue, in the order in which they were
    /// requested. Duplicates are kept.
    pub missing: Vec<String>,
}

/// Computes which of the `requested` labels can be removed from an issue with `current` labels.
pub fn diff_labels(current: &[String], requested: &[String]) -> LabelDiff {
    let existing_labels: HashSet<&str> = current.iter().map(|s| s.as_str()).collect();
    let (removed, missing): (Vec<&String>, Vec<String>) =
        requested.iter().partition_map(|label| {
            if existing_labels.contains(label.as_str()) {
                Either::Left(label)
            } else {
                Either::Right(label.clone())
            }
        });
    let removed: Vec<String> = removed.into_iter().unique().cloned().collect();

    let removed_labels: HashSet<&str> = removed.iter().map(|s| s.as_str()).collect();
    let remaining: Vec<String> = current
        .iter()
        .filter(|label| !removed_labels.contains(label.as_str()))
        .cloned()
        .collect();
    tracing::debug!(
        "Label diff: current = {current:?}, requested = {requested:?}, remaining = {remaining:?}, missing = {missing:?}"
    );

    LabelDiff {
        remaining,
        removed,
        missing,
    }
}
