use crate::github::Issue;
use crate::utils::text::{pluralize, quoted_list};

/// A comment that can be posted to an issue.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn render(&self) -> &str {
        &self.text
    }
}

/// A comment that was accepted by GitHub.
#[derive(Clone, Debug, PartialEq)]
pub struct PostedComment {
    pub body: String,
}

/// Reports labels that were requested to be removed from `issue`, but which are not attached
/// to it.
///
/// `template` may contain the following placeholders:
/// - `{labels}`: `Label` or `Labels`
/// - `{label_list}`: the quoted label names, separated by commas
/// - `{exist}`: `does not exist` or `do not exist`
/// - `{be_state}`: `was` or `were`
/// - `{action}`: what was attempted with the labels
/// - `{type}`: `pull request` or `issue`
pub fn missing_labels_comment(template: &str, issue: &Issue, missing: &[String]) -> Comment {
    let singular = missing.len() == 1;
    let label_list = quoted_list(missing);

    // `{label_list}` goes last, label names must not be treated as placeholders.
    let text = template
        .replace("{labels}", &pluralize("Label", missing.len()))
        .replace(
            "{exist}",
            if singular {
                "does not exist"
            } else {
                "do not exist"
            },
        )
        .replace("{be_state}", if singular { "was" } else { "were" })
        .replace("{action}", "removed from")
        .replace("{type}", issue.kind())
        .replace("{label_list}", &label_list);
    Comment::new(text)
}
