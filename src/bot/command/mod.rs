mod parser;
pub use parser::{parse_label_list, CommandParseError, CommandParser};

/// Bot command specified by a user.
#[derive(Debug, PartialEq)]
pub enum BotCommand {
    /// Remove labels from an issue.
    RemoveLabels {
        /// Raw text after the command name, expected to contain quoted label names.
        args: String,
    },
}
