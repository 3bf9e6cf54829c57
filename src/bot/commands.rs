//! Slash commands understood by the bot

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Movie Bot commands:")]
pub enum Command {
    #[command(description = "greeting and main menu")]
    Start,
    #[command(description = "list the commands")]
    Help,
    #[command(description = "get a random movie")]
    Random,
    #[command(description = "show the best rated movies")]
    Top,
    #[command(description = "show your favorite movies")]
    Favorites,
}
