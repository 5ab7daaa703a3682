//! Defines parsers for bot commands.

use crate::bot::command::BotCommand;

#[derive(Debug, PartialEq)]
pub enum CommandParseError {
    MissingCommand,
    UnknownCommand(String),
}

pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: String) -> Self {
        Self { prefix }
    }

    /// Prefix of the bot, used to invoke commands from issue comments.
    /// For example `@labelbot`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parses bot commands from the given string.
    ///
    /// Assumes that each command spans at most one line and that there are not more commands on
    /// each line.
    pub fn parse_commands(&self, text: &str) -> Vec<Result<BotCommand, CommandParseError>> {
        text.lines()
            .filter_map(|line| match line.find(&self.prefix) {
                Some(index) => {
                    let input = &line[index + self.prefix.len()..];
                    parse_command(input)
                }
                None => None,
            })
            .collect()
    }
}

type ParseResult<T = BotCommand> = Option<Result<T, CommandParseError>>;

fn parse_command(input: &str) -> ParseResult {
    // The prefix has to be followed by whitespace, otherwise it is a different mention,
    // e.g. `@labelbot-test`.
    if !input.is_empty() && !input.starts_with(char::is_whitespace) {
        return None;
    }
    let input = input.trim_start();
    let (command, args) = match input.find(char::is_whitespace) {
        Some(index) => (&input[..index], &input[index..]),
        None => (input, ""),
    };

    match command {
        "" => Some(Err(CommandParseError::MissingCommand)),
        "remove" => Some(Ok(BotCommand::RemoveLabels {
            args: args.trim().to_string(),
        })),
        _ => Some(Err(CommandParseError::UnknownCommand(command.to_string()))),
    }
}

/// Extracts double-quoted label names from command arguments, e.g.
/// `"bug" "help wanted"` yields `bug` and `help wanted`.
///
/// Text outside of quotes is ignored. Only the quotes are stripped, whitespace inside
/// them is kept. Empty quotes produce an empty label, an unterminated quote produces nothing.
pub fn parse_label_list(args: &str) -> Vec<String> {
    let mut labels = vec![];
    let mut label = String::new();
    let mut in_quotes = false;

    for c in args.chars() {
        match (c, in_quotes) {
            ('"', false) => in_quotes = true,
            ('"', true) => {
                in_quotes = false;
                labels.push(std::mem::take(&mut label));
            }
            (c, true) => label.push(c),
            (_, false) => {}
        }
    }
    labels
}
