use crate::bot::command::CommandParser;

pub struct BotContext {
    pub parser: CommandParser,
}

impl BotContext {
    pub fn new(parser: CommandParser) -> Self {
        Self { parser }
    }
}
