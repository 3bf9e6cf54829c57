//! # Localization Tests
//!
//! Message lookup, language resolution and bundle completeness.

use movie_bot::localization::{init_localization, t_args_lang, t_lang, LocalizationManager};
use std::collections::{BTreeSet, HashMap};

fn setup_localization() -> LocalizationManager {
    LocalizationManager::new().expect("Failed to create localization manager")
}

fn message_keys(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .filter(|line| line.starts_with(|c: char| c.is_ascii_lowercase()))
        .filter_map(|line| line.split_once(" =").map(|(key, _)| key.trim().to_string()))
        .collect()
}

#[test]
fn test_get_message_existing_key() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("help", "en", None);
    assert!(message.contains("/random"));
}

#[test]
fn test_get_message_nonexistent_key() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("nonexistent-key", "en", None);
    assert_eq!(message, "Missing translation: nonexistent-key");
}

#[test]
fn test_get_message_unsupported_language_falls_back() {
    let manager = setup_localization();

    let fallback = manager.get_message_in_language("search-not-found", "xx", None);
    let english = manager.get_message_in_language("search-not-found", "en", None);
    assert_eq!(fallback, english);
}

#[test]
fn test_get_message_with_args() {
    let manager = setup_localization();

    let mut args = HashMap::new();
    args.insert("count", "5");

    let message = manager.get_message_in_language("top-header", "en", Some(&args));
    assert_eq!(message, "🏆 Top 5 movies by IMDb rating:");
}

#[test]
fn test_resolve_language() {
    let manager = setup_localization();

    assert_eq!(manager.resolve_language(Some("ru")), "ru");
    assert_eq!(manager.resolve_language(Some("ru-RU")), "ru");
    assert_eq!(manager.resolve_language(Some("EN-us")), "en");
    assert_eq!(manager.resolve_language(Some("de")), "en");
    assert_eq!(manager.resolve_language(None), "en");
    assert!(manager.is_language_supported("ru"));
    assert!(!manager.is_language_supported("de"));
}

#[test]
fn test_global_helpers() {
    init_localization().expect("bundles load");

    assert_eq!(t_lang("search-found", Some("ru")), "Конечно! Я знаю этот фильм 😌");
    assert_eq!(
        t_args_lang("error-store", &[("error", "disk I/O error")], Some("en")),
        "Something went wrong, please try again later 😢 Details: disk I/O error"
    );
}

#[test]
fn test_caption_has_no_isolation_marks() {
    let caption = t_args_lang(
        "movie-caption",
        &[
            ("title", "Heat"),
            ("year", "1995"),
            ("genre", "Crime"),
            ("rating", "8.3"),
            ("description", "Cops and robbers."),
        ],
        Some("en"),
    );

    assert!(caption.starts_with("📍 Title: Heat\n"));
    assert!(caption.ends_with("Cops and robbers."));
    assert!(!caption.contains('\u{2068}'));
}

#[test]
fn test_every_language_has_the_same_keys() {
    let english = message_keys(include_str!("../locales/en/main.ftl"));
    let russian = message_keys(include_str!("../locales/ru/main.ftl"));

    assert!(english.contains("movie-caption"));
    assert_eq!(english, russian);
}
