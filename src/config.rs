use serde::Deserialize;
use thiserror::Error;

use crate::permissions::SelfLabelPolicy;

pub const CONFIG_FILE_PATH: &str = "labelbot.toml";

/// Template used when some of the requested labels could not be found on an issue.
pub const DEFAULT_LABEL_ERROR_TEMPLATE: &str =
    "{labels} {label_list} {exist} {be_state} {action} {type}.";

/// Configuration of a repository loaded from a `labelbot.toml`
/// file located in the root of the repository file tree.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub issues: IssuesConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

impl RepositoryConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Policy for the `remove` command.
    pub fn self_label_policy(&self) -> &SelfLabelPolicy {
        &self.issues.commands.label.self_label
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct IssuesConfig {
    #[serde(default)]
    pub commands: CommandsConfig,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default)]
    pub label: LabelCommandConfig,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct LabelCommandConfig {
    #[serde(default, rename = "self")]
    pub self_label: SelfLabelPolicy,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TemplatesConfig {
    #[serde(default = "default_label_error_template")]
    pub label_error: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            label_error: default_label_error_template(),
        }
    }
}

fn default_label_error_template() -> String {
    DEFAULT_LABEL_ERROR_TEMPLATE.to_string()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot parse labelbot.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Cannot decode the content of labelbot.toml")]
    InvalidContent,
}
