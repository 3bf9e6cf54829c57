//! # Movie Telegram Bot
//!
//! A Telegram bot over a SQLite movie catalog: title search, a random
//! pick, the top rated titles and a personal favorites list.

pub mod bot;
pub mod callback;
pub mod config;
pub mod db;
pub mod errors;
pub mod localization;
pub mod movie_model;
