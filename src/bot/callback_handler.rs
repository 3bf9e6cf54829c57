//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error, warn};

use crate::callback::CallbackAction;
use crate::db::MovieStore;
use crate::localization::t_lang;
use crate::movie_model::{AddOutcome, RemoveOutcome};

use super::message_handler::store_error_notice;
use super::ui_builder::{truncate_utf16, CALLBACK_ANSWER_LIMIT};

/// Text to answer a callback query with, after applying its action
///
/// Malformed payloads and store failures produce a notice instead of an
/// error, so one bad button never breaks the dispatcher.
pub async fn answer_for_callback(
    store: &MovieStore,
    user_id: i64,
    data: Option<&str>,
    language_code: Option<&str>,
) -> String {
    let data = data.unwrap_or_default();
    let action = match data.parse::<CallbackAction>() {
        Ok(action) => action,
        Err(e) => {
            warn!(user_id, data = %data, error = %e, "Ignoring malformed callback payload");
            return t_lang("callback-invalid", language_code);
        }
    };

    let answer = match action {
        CallbackAction::AddFavorite(movie_id) => match store.add_favorite(user_id, movie_id).await {
            Ok(AddOutcome::Added) => t_lang("favorite-added", language_code),
            Ok(AddOutcome::AlreadyPresent) => t_lang("favorite-already-present", language_code),
            Err(e) => {
                error!(user_id, movie_id, error = %e, "Failed to add favorite");
                store_error_notice(&e, language_code)
            }
        },
        CallbackAction::RemoveFavorite(movie_id) => {
            match store.remove_favorite(user_id, movie_id).await {
                Ok(RemoveOutcome::Removed) => t_lang("favorite-removed", language_code),
                Ok(RemoveOutcome::NotPresent) => t_lang("favorite-not-present", language_code),
                Err(e) => {
                    error!(user_id, movie_id, error = %e, "Failed to remove favorite");
                    store_error_notice(&e, language_code)
                }
            }
        }
    };

    truncate_utf16(&answer, CALLBACK_ANSWER_LIMIT)
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    store: Arc<MovieStore>,
) -> Result<()> {
    let user_id = q.from.id.0 as i64;
    debug!(user_id, data = ?q.data, "Received callback query from user");

    let answer = answer_for_callback(
        &store,
        user_id,
        q.data.as_deref(),
        q.from.language_code.as_deref(),
    )
    .await;

    bot.answer_callback_query(q.id.clone()).text(answer).await?;

    Ok(())
}
