//! Inline-button payloads carried in Telegram callback queries.

use std::fmt;
use std::str::FromStr;

use crate::errors::CallbackError;

const ADD_FAVORITE_ACTION: &str = "favorite";
const REMOVE_FAVORITE_ACTION: &str = "delete";

/// Action requested by an inline button, tagged with the movie it targets
///
/// Encoded on the wire as `"<action>_<movieId>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    AddFavorite(i64),
    RemoveFavorite(i64),
}

impl CallbackAction {
    pub fn movie_id(&self) -> i64 {
        match self {
            CallbackAction::AddFavorite(id) | CallbackAction::RemoveFavorite(id) => *id,
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::AddFavorite(id) => write!(f, "{ADD_FAVORITE_ACTION}_{id}"),
            CallbackAction::RemoveFavorite(id) => write!(f, "{REMOVE_FAVORITE_ACTION}_{id}"),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = CallbackError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        // The movie id is everything after the first underscore
        let (action, movie_id) = data
            .split_once('_')
            .ok_or_else(|| CallbackError::MissingSeparator(data.to_string()))?;

        let movie_id: i64 = movie_id
            .trim()
            .parse()
            .map_err(|_| CallbackError::InvalidMovieId(movie_id.to_string()))?;

        match action {
            ADD_FAVORITE_ACTION => Ok(CallbackAction::AddFavorite(movie_id)),
            REMOVE_FAVORITE_ACTION => Ok(CallbackAction::RemoveFavorite(movie_id)),
            other => Err(CallbackError::UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_favorite_actions() {
        assert_eq!("favorite_7".parse::<CallbackAction>(), Ok(CallbackAction::AddFavorite(7)));
        assert_eq!("delete_42".parse::<CallbackAction>(), Ok(CallbackAction::RemoveFavorite(42)));
    }

    #[test]
    fn test_encoding_matches_parsing() {
        let action = CallbackAction::RemoveFavorite(1234);
        assert_eq!(action.to_string(), "delete_1234");
        assert_eq!(action.to_string().parse::<CallbackAction>(), Ok(action));
        assert_eq!(action.movie_id(), 1234);
    }

    #[test]
    fn test_parse_malformed_payloads() {
        assert_eq!(
            "favorite".parse::<CallbackAction>(),
            Err(CallbackError::MissingSeparator("favorite".to_string()))
        );
        assert_eq!(
            "favorite_abc".parse::<CallbackAction>(),
            Err(CallbackError::InvalidMovieId("abc".to_string()))
        );
        assert_eq!(
            "share_7".parse::<CallbackAction>(),
            Err(CallbackError::UnknownAction("share".to_string()))
        );
        // Only the first underscore separates the action
        assert_eq!(
            "favorite_7_8".parse::<CallbackAction>(),
            Err(CallbackError::InvalidMovieId("7_8".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_payload() {
        assert!("".parse::<CallbackAction>().is_err());
    }
}
