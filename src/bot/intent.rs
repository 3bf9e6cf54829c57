//! Classification of incoming text into bot intents

use teloxide::utils::command::BotCommands;

use super::commands::Command;

/// What the user asked for with a text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Help,
    Random,
    Favorites,
    Top,
    /// Anything that is not a known command is a title search
    Search(String),
}

impl Intent {
    /// Classify `text`; `bot_username` lets `/cmd@botname` forms match
    pub fn parse(text: &str, bot_username: &str) -> Self {
        match Command::parse(text.trim(), bot_username) {
            Ok(Command::Start) => Intent::Start,
            Ok(Command::Help) => Intent::Help,
            Ok(Command::Random) => Intent::Random,
            Ok(Command::Top) => Intent::Top,
            Ok(Command::Favorites) => Intent::Favorites,
            Err(_) => Intent::Search(text.trim().to_string()),
        }
    }
}
