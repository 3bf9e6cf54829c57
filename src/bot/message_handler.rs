//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, Me};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::db::MovieStore;
use crate::errors::StoreError;
use crate::localization::{t_args_lang, t_lang};

use super::intent::Intent;
use super::ui_builder::{main_menu, render_movie, MovieCard, Reply};

/// Build the replies for one intent
///
/// Store failures are turned into a single error notice here, so callers
/// only ever see replies.
pub async fn replies_for_intent(
    store: &MovieStore,
    intent: Intent,
    user_id: i64,
    top_limit: u32,
    language_code: Option<&str>,
) -> Vec<Reply> {
    match lookup_replies(store, &intent, user_id, top_limit, language_code).await {
        Ok(replies) => replies,
        Err(e) => {
            error!(user_id, intent = ?intent, error = %e, "Store lookup failed");
            vec![Reply::text(store_error_notice(&e, language_code))]
        }
    }
}

async fn lookup_replies(
    store: &MovieStore,
    intent: &Intent,
    user_id: i64,
    top_limit: u32,
    language_code: Option<&str>,
) -> Result<Vec<Reply>, StoreError> {
    let replies = match intent {
        Intent::Start => vec![Reply::text_with_menu(t_lang("welcome", language_code))],
        Intent::Help => vec![Reply::text(t_lang("help", language_code))],
        Intent::Random => match store.random_movie().await? {
            Some(movie) => vec![Reply::Movie(render_movie(&movie, true, language_code))],
            None => vec![Reply::text(t_lang("catalog-empty", language_code))],
        },
        Intent::Favorites => {
            let movies = store.list_favorites(user_id).await?;
            if movies.is_empty() {
                vec![Reply::text(t_lang("favorites-empty", language_code))]
            } else {
                let mut replies = vec![Reply::text(t_lang("favorites-header", language_code))];
                replies.extend(
                    movies
                        .iter()
                        .map(|movie| Reply::Movie(render_movie(movie, true, language_code))),
                );
                replies
            }
        }
        Intent::Top => {
            let movies = store.top_movies(top_limit).await?;
            if movies.is_empty() {
                vec![Reply::text(t_lang("catalog-empty", language_code))]
            } else {
                let count = movies.len().to_string();
                let mut replies = vec![Reply::text(t_args_lang(
                    "top-header",
                    &[("count", count.as_str())],
                    language_code,
                ))];
                replies.extend(
                    movies
                        .iter()
                        .map(|movie| Reply::Movie(render_movie(movie, true, language_code))),
                );
                replies
            }
        }
        Intent::Search(query) if query.trim().is_empty() => {
            vec![Reply::text(t_lang("search-empty-query", language_code))]
        }
        Intent::Search(query) => match store.search_by_title(query).await? {
            Some(movie) => vec![
                Reply::text(t_lang("search-found", language_code)),
                Reply::Movie(render_movie(&movie, true, language_code)),
            ],
            None => vec![Reply::text(t_lang("search-not-found", language_code))],
        },
    };

    Ok(replies)
}

/// Generic failure notice with the underlying error appended
pub fn store_error_notice(error: &StoreError, language_code: Option<&str>) -> String {
    let detail = error.to_string();
    t_args_lang("error-store", &[("error", detail.as_str())], language_code)
}

/// Poster reference as a Telegram input: http(s) URLs are fetched by
/// Telegram, anything else is treated as an already uploaded file id.
pub fn poster_input_file(photo: &str) -> InputFile {
    match reqwest::Url::parse(photo) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => InputFile::url(url),
        _ => InputFile::file_id(FileId(photo.to_string())),
    }
}

async fn send_movie_card(bot: &Bot, chat_id: ChatId, card: MovieCard) -> Result<()> {
    let mut request = bot
        .send_photo(chat_id, poster_input_file(&card.photo))
        .caption(card.caption.clone());
    if let Some(keyboard) = card.keyboard.clone() {
        request = request.reply_markup(keyboard);
    }

    if let Err(e) = request.await {
        // Broken poster references still get the card, as plain text
        warn!(
            chat_id = %chat_id,
            movie_id = card.movie_id,
            error = %e,
            "Failed to send movie poster, falling back to text"
        );
        let mut fallback = bot.send_message(chat_id, card.caption);
        if let Some(keyboard) = card.keyboard {
            fallback = fallback.reply_markup(keyboard);
        }
        fallback.await?;
    }

    Ok(())
}

pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> Result<()> {
    for reply in replies {
        match reply {
            Reply::Text { text, with_menu } => {
                let request = bot.send_message(chat_id, text);
                if with_menu {
                    request.reply_markup(main_menu()).await?;
                } else {
                    request.await?;
                }
            }
            Reply::Movie(card) => send_movie_card(bot, chat_id, card).await?,
        }
    }
    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    me: Me,
    store: Arc<MovieStore>,
    config: Arc<Config>,
) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());
    let user_id = msg
        .from
        .as_ref()
        .map(|user| user.id.0 as i64)
        .unwrap_or(msg.chat.id.0);

    let Some(text) = msg.text() else {
        debug!(chat_id = %msg.chat.id, "Received unsupported message type");
        bot.send_message(msg.chat.id, t_lang("unsupported-message", language_code))
            .await?;
        return Ok(());
    };

    let intent = Intent::parse(text, me.username());
    debug!(user_id, chat_id = %msg.chat.id, intent = ?intent, "Received text message");

    let replies = replies_for_intent(
        &store,
        intent,
        user_id,
        config.top_movies_limit,
        language_code,
    )
    .await;

    send_replies(&bot, msg.chat.id, replies).await
}

