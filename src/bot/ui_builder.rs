//! UI Builder module for creating keyboards and formatting movie cards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::callback::CallbackAction;
use crate::localization::{t_args_lang, t_lang};
use crate::movie_model::Movie;

/// Telegram's limit on photo captions, in UTF-16 code units
pub const CAPTION_LIMIT: usize = 1024;

/// Telegram's limit on callback query answers, in UTF-16 code units
pub const CALLBACK_ANSWER_LIMIT: usize = 200;

/// Everything needed to send one movie as a photo message
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub movie_id: i64,
    pub photo: String,
    pub caption: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

/// One outgoing message
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text {
        text: String,
        /// Attach the persistent command keyboard
        with_menu: bool,
    },
    Movie(MovieCard),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            with_menu: false,
        }
    }

    pub fn text_with_menu(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            with_menu: true,
        }
    }
}

/// Render a movie as a card, with favorite buttons when `with_controls`
pub fn render_movie(movie: &Movie, with_controls: bool, language_code: Option<&str>) -> MovieCard {
    MovieCard {
        movie_id: movie.id,
        photo: movie.photo.clone(),
        caption: format_movie_caption(movie, language_code),
        keyboard: with_controls.then(|| create_favorite_keyboard(movie.id, language_code)),
    }
}

/// Caption for a movie card, shortened to fit `CAPTION_LIMIT`
///
/// Only the description is cut; the other fields are kept whole.
pub fn format_movie_caption(movie: &Movie, language_code: Option<&str>) -> String {
    let caption = caption_with_description(movie, &movie.description, language_code);
    let caption_len = utf16_len(&caption);
    if caption_len <= CAPTION_LIMIT {
        return caption;
    }

    let overhead = caption_len - utf16_len(&movie.description);
    let budget = CAPTION_LIMIT.saturating_sub(overhead);
    let description = truncate_utf16(&movie.description, budget);
    let caption = caption_with_description(movie, &description, language_code);

    truncate_utf16(&caption, CAPTION_LIMIT)
}

fn caption_with_description(movie: &Movie, description: &str, language_code: Option<&str>) -> String {
    t_args_lang(
        "movie-caption",
        &[
            ("title", movie.title.as_str()),
            ("year", movie.year.as_str()),
            ("genre", movie.genre.as_str()),
            ("rating", movie.imdb_rating.as_str()),
            ("description", description),
        ],
        language_code,
    )
}

/// Inline keyboard with add/remove favorite buttons for one movie
pub fn create_favorite_keyboard(movie_id: i64, language_code: Option<&str>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            t_lang("button-add-favorite", language_code),
            CallbackAction::AddFavorite(movie_id).to_string(),
        )],
        vec![InlineKeyboardButton::callback(
            t_lang("button-remove-favorite", language_code),
            CallbackAction::RemoveFavorite(movie_id).to_string(),
        )],
    ])
}

/// Persistent reply keyboard with the main commands
pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new("/random"), KeyboardButton::new("/top")],
        vec![KeyboardButton::new("/favorites"), KeyboardButton::new("/help")],
    ])
    .resize_keyboard()
    .persistent()
}

pub(crate) fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Cut `text` to at most `max` UTF-16 units, ending with an ellipsis when cut
pub(crate) fn truncate_utf16(text: &str, max: usize) -> String {
    if utf16_len(text) <= max {
        return text.to_string();
    }

    let budget = max.saturating_sub(1);
    let mut used = 0;
    let mut result = String::new();
    for ch in text.chars() {
        used += ch.len_utf16();
        if used > budget {
            break;
        }
        result.push(ch);
    }
    if max > 0 {
        result.push('…');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn sample_movie(description: &str) -> Movie {
        Movie {
            id: 7,
            photo: "https://example.com/matrix.jpg".to_string(),
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            genre: "Sci-Fi".to_string(),
            imdb_rating: "8.7".to_string(),
            description: description.to_string(),
        }
    }

    fn callback_payloads(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
        keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_caption_contains_every_field() {
        let movie = sample_movie("A hacker learns the truth.");
        let caption = format_movie_caption(&movie, Some("en"));

        assert!(caption.contains("The Matrix"));
        assert!(caption.contains("1999"));
        assert!(caption.contains("Sci-Fi"));
        assert!(caption.contains("8.7"));
        assert!(caption.contains("A hacker learns the truth."));
    }

    #[test]
    fn test_caption_uses_user_language() {
        let movie = sample_movie("Описание");
        let caption = format_movie_caption(&movie, Some("ru"));
        assert!(caption.contains("Название: The Matrix"));
        assert!(caption.contains("Рейтинг IMDB: 8.7"));
    }

    #[test]
    fn test_long_description_is_shortened() {
        let movie = sample_movie(&"word ".repeat(600));
        let caption = format_movie_caption(&movie, Some("en"));

        assert!(utf16_len(&caption) <= CAPTION_LIMIT);
        assert!(caption.contains("The Matrix"));
        assert!(caption.ends_with('…'));
    }

    #[test]
    fn test_render_with_controls() {
        let card = render_movie(&sample_movie("x"), true, Some("en"));
        assert_eq!(card.movie_id, 7);
        assert_eq!(card.photo, "https://example.com/matrix.jpg");

        let keyboard = card.keyboard.expect("controls requested");
        assert_eq!(callback_payloads(&keyboard), vec!["favorite_7", "delete_7"]);
    }

    #[test]
    fn test_render_without_controls() {
        let card = render_movie(&sample_movie("x"), false, None);
        assert!(card.keyboard.is_none());
    }

    #[test]
    fn test_truncate_utf16() {
        assert_eq!(truncate_utf16("short", 10), "short");
        assert_eq!(truncate_utf16("abcdef", 4), "abc…");
        // Emoji take two UTF-16 units
        assert_eq!(truncate_utf16("🎬🎬🎬", 4), "🎬…");
    }

    #[test]
    fn test_main_menu_has_commands() {
        let menu = main_menu();
        let labels: Vec<&str> = menu
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();
        assert_eq!(labels, vec!["/random", "/top", "/favorites", "/help"]);
    }
}
