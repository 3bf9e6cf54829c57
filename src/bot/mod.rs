//! Bot module for handling Telegram interactions
//!
//! - `commands`: the slash commands shown in the Telegram menu
//! - `intent`: classifies incoming text into intents
//! - `message_handler`: answers text messages
//! - `callback_handler`: applies favorite buttons
//! - `ui_builder`: movie cards and keyboards

pub mod callback_handler;
pub mod commands;
pub mod intent;
pub mod message_handler;
pub mod ui_builder;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

pub use callback_handler::{answer_for_callback, callback_handler};
pub use commands::Command;
pub use intent::Intent;
pub use message_handler::{message_handler, replies_for_intent};
pub use ui_builder::{render_movie, MovieCard, Reply};

/// Update routing: messages and callback queries go to their handlers
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}
