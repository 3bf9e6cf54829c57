//! # Movie Store
//!
//! Data access for the `movies` catalog and the per-user `favorites` table.
//! The catalog is filled by an external ingestion process and is read-only
//! here; `favorites` is created on demand.

use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use crate::errors::{StoreError, StoreResult};
use crate::movie_model::{AddOutcome, Movie, RemoveOutcome};

/// Columns of a `Movie`, normalized to text so numeric and textual years and
/// ratings decode the same way.
const MOVIE_COLUMNS: &str = "movies.id AS id, \
    COALESCE(movies.photo, '') AS photo, \
    COALESCE(movies.title, '') AS title, \
    COALESCE(CAST(movies.year AS TEXT), '') AS year, \
    COALESCE(movies.genre, '') AS genre, \
    COALESCE(CAST(movies.imdb_rating AS TEXT), '') AS imdb_rating, \
    COALESCE(movies.description, '') AS description";

const CREATE_FAVORITES_TABLE: &str = "CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    movie_id INTEGER NOT NULL,
    UNIQUE(user_id, movie_id)
)";

/// Handle to the movie database
///
/// Cloning is cheap: clones share the same connection pool. Every operation
/// checks a connection out of the pool for its own duration only.
#[derive(Debug, Clone)]
pub struct MovieStore {
    pool: SqlitePool,
}

impl MovieStore {
    /// Open a pool on `database_url`, creating the database file if missing
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|source| StoreError::InvalidDatabaseUrl {
                url: database_url.to_string(),
                source,
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!(database_url = %database_url, max_connections, "Connected to movie database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `favorites` table if it does not exist yet
    pub async fn init_database_schema(&self) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        ensure_favorites_table(&mut conn).await?;
        info!("Database schema initialized successfully");
        Ok(())
    }

    /// Number of movies in the catalog
    pub async fn count_movies(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Pick one movie uniformly at random, `None` on an empty catalog
    pub async fn random_movie(&self) -> StoreResult<Option<Movie>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY RANDOM() LIMIT 1");
        let movie = sqlx::query_as::<_, Movie>(&sql)
            .fetch_optional(&self.pool)
            .await?;

        debug!(found = movie.is_some(), "Random movie lookup finished");
        Ok(movie)
    }

    /// First movie, in catalog order, whose title contains `query`
    ///
    /// Matching ignores case (Unicode-aware, so Cyrillic titles fold too) and
    /// is unanchored. A blank query matches nothing.
    pub async fn search_by_title(&self, query: &str) -> StoreResult<Option<Movie>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY movies.id");
        let mut rows = sqlx::query_as::<_, Movie>(&sql).fetch(&self.pool);

        while let Some(movie) = rows.try_next().await? {
            if movie.title.to_lowercase().contains(&needle) {
                debug!(query = %query, movie_id = movie.id, "Title search matched");
                return Ok(Some(movie));
            }
        }

        debug!(query = %query, "Title search found nothing");
        Ok(None)
    }

    /// Up to `limit` movies by rating, best first
    ///
    /// Ratings compare as numbers whether they were stored as text or as
    /// reals; ties keep catalog order.
    pub async fn top_movies(&self, limit: u32) -> StoreResult<Vec<Movie>> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies \
             ORDER BY CAST(movies.imdb_rating AS REAL) DESC, movies.id \
             LIMIT ?1"
        );
        let movies = sqlx::query_as::<_, Movie>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        debug!(limit, returned = movies.len(), "Top movies lookup finished");
        Ok(movies)
    }

    /// Record `movie_id` as a favorite of `user_id`
    ///
    /// A single conflict-ignoring insert, so concurrent identical requests
    /// leave exactly one row and the loser sees `AlreadyPresent`.
    pub async fn add_favorite(&self, user_id: i64, movie_id: i64) -> StoreResult<AddOutcome> {
        let mut conn = self.pool.acquire().await?;
        ensure_favorites_table(&mut conn).await?;

        let result = sqlx::query(
            "INSERT INTO favorites (user_id, movie_id) VALUES (?1, ?2)
             ON CONFLICT(user_id, movie_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(&mut *conn)
        .await?;

        let outcome = AddOutcome::from_rows_affected(result.rows_affected());
        info!(user_id, movie_id, outcome = ?outcome, "Add favorite finished");
        Ok(outcome)
    }

    /// Delete the `(user_id, movie_id)` favorite if it exists
    pub async fn remove_favorite(&self, user_id: i64, movie_id: i64) -> StoreResult<RemoveOutcome> {
        let mut conn = self.pool.acquire().await?;
        ensure_favorites_table(&mut conn).await?;

        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ?1 AND movie_id = ?2")
            .bind(user_id)
            .bind(movie_id)
            .execute(&mut *conn)
            .await?;

        let outcome = RemoveOutcome::from_rows_affected(result.rows_affected());
        info!(user_id, movie_id, outcome = ?outcome, "Remove favorite finished");
        Ok(outcome)
    }

    /// Movies favorited by `user_id`, in the order they were added
    pub async fn list_favorites(&self, user_id: i64) -> StoreResult<Vec<Movie>> {
        let mut conn = self.pool.acquire().await?;
        ensure_favorites_table(&mut conn).await?;

        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies \
             JOIN favorites ON movies.id = favorites.movie_id \
             WHERE favorites.user_id = ?1 \
             ORDER BY favorites.id"
        );
        let movies = sqlx::query_as::<_, Movie>(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

        debug!(user_id, count = movies.len(), "Listed favorites");
        Ok(movies)
    }
}

async fn ensure_favorites_table(conn: &mut SqliteConnection) -> StoreResult<()> {
    sqlx::query(CREATE_FAVORITES_TABLE).execute(conn).await?;
    Ok(())
}
