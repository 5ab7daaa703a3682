use serde::{Deserialize, Deserializer};

use crate::github::Issue;

/// Who may remove labels with the bot, as configured in `issues.commands.label.self`.
///
/// In the configuration file, the policy is written either as a boolean or as a table with
/// an explicit list of users:
///
/// ```toml
/// [issues.commands.label]
/// self = { users = ["octocat"] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelfLabelPolicy {
    /// `self = false`: no restriction is applied.
    #[default]
    Disabled,
    /// `self = true`: only the author of the issue may modify its labels.
    AllowAll,
    /// `self = { users = [...] }`: only the listed users may modify labels.
    AllowList(Vec<String>),
}

impl SelfLabelPolicy {
    /// Returns `true` if `commenter` is allowed to modify labels of the given `issue`.
    pub fn permits(&self, commenter: &str, issue: &Issue) -> bool {
        match self {
            SelfLabelPolicy::Disabled => true,
            SelfLabelPolicy::AllowAll => commenter == issue.author,
            SelfLabelPolicy::AllowList(users) => users.iter().any(|user| user == commenter),
        }
    }
}

impl<'de> Deserialize<'de> for SelfLabelPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPolicy {
            Flag(bool),
            Users { users: Vec<String> },
        }

        let policy = match RawPolicy::deserialize(deserializer)? {
            RawPolicy::Flag(false) => SelfLabelPolicy::Disabled,
            RawPolicy::Flag(true) => SelfLabelPolicy::AllowAll,
            RawPolicy::Users { users } => SelfLabelPolicy::AllowList(users),
        };
        Ok(policy)
    }
}
