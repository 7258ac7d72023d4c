#![forbid(unsafe_code)]

mod error;
mod fridge;
mod gamification;
mod menu;
mod quiz;
mod requests;
mod rows;
mod seed;
mod social;
mod users;

pub use error::StoreError;
pub use menu::RngCoursePicker;
pub use requests::*;
pub use rows::*;

use rusqlite::{Connection, ErrorCode, OptionalExtension, Transaction, params};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const V1_SCHEMA_VERSION: i64 = 1;
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("plateful.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        preflight_gate(&conn)?;
        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
    )?;
    let mut rows = stmt.query([])?;
    let mut tables = BTreeSet::new();
    while let Some(row) = rows.next()? {
        tables.insert(row.get::<_, String>(0)?);
    }

    if tables.is_empty() {
        return Ok(());
    }

    let required: BTreeSet<&str> = [
        "app_state",
        "users",
        "user_preferences",
        "questions",
        "user_answers",
        "profiles",
        "user_profiles",
        "achievements",
        "user_achievements",
        "xp_history",
        "streaks",
        "meals",
        "daily_menus",
        "posts",
        "likes",
        "comments",
        "follows",
        "fridge_items",
    ]
    .into_iter()
    .collect();

    if tables
        .iter()
        .any(|table| !required.contains(table.as_str()))
    {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: unsupported tables detected",
        ));
    }

    for table in required {
        if !tables.contains(table) {
            return Err(StoreError::InvalidInput(
                "RESET_REQUIRED: required table is missing",
            ));
        }
    }

    let version = conn.query_row(
        "SELECT schema_version FROM app_state WHERE singleton=1",
        [],
        |row| row.get::<_, i64>(0),
    );
    match version {
        Ok(v) if v == V1_SCHEMA_VERSION => Ok(()),
        Ok(_) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema version mismatch",
        )),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema state row is missing",
        )),
        Err(err) => Err(StoreError::Sql(err)),
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    let now_ms = now_ms();

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS app_state (
          singleton INTEGER PRIMARY KEY CHECK(singleton = 1),
          schema_version INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
          id TEXT PRIMARY KEY,
          email TEXT NOT NULL UNIQUE,
          username TEXT NOT NULL UNIQUE,
          password_hash TEXT NOT NULL,
          level INTEGER NOT NULL DEFAULT 1,
          total_xp INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          CHECK(level >= 1),
          CHECK(total_xp >= 0)
        );

        CREATE TABLE IF NOT EXISTS user_preferences (
          user_id TEXT PRIMARY KEY,
          diet TEXT NOT NULL DEFAULT 'omnivore',
          allergens_json TEXT NOT NULL DEFAULT '[]',
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS questions (
          id TEXT PRIMARY KEY,
          text TEXT NOT NULL,
          category TEXT NOT NULL,
          tags TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS user_answers (
          user_id TEXT NOT NULL,
          question_id TEXT NOT NULL,
          liked INTEGER NOT NULL,
          PRIMARY KEY(user_id, question_id),
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
          FOREIGN KEY(question_id) REFERENCES questions(id)
        );

        CREATE TABLE IF NOT EXISTS profiles (
          id TEXT PRIMARY KEY,
          name TEXT NOT NULL,
          description TEXT NOT NULL,
          tags TEXT NOT NULL,
          rarity TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS user_profiles (
          user_id TEXT PRIMARY KEY,
          profile_id TEXT NOT NULL,
          score INTEGER NOT NULL,
          assigned_at_ms INTEGER NOT NULL,
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
          FOREIGN KEY(profile_id) REFERENCES profiles(id)
        );

        CREATE TABLE IF NOT EXISTS achievements (
          id TEXT PRIMARY KEY,
          name TEXT NOT NULL,
          description TEXT NOT NULL,
          category TEXT NOT NULL,
          condition_type TEXT NOT NULL,
          condition_value INTEGER NOT NULL,
          xp_reward INTEGER NOT NULL,
          rarity TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS user_achievements (
          user_id TEXT NOT NULL,
          achievement_id TEXT NOT NULL,
          unlocked_at_ms INTEGER NOT NULL,
          PRIMARY KEY(user_id, achievement_id),
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
          FOREIGN KEY(achievement_id) REFERENCES achievements(id)
        );

        CREATE TABLE IF NOT EXISTS xp_history (
          user_id TEXT NOT NULL,
          amount INTEGER NOT NULL,
          reason TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_xp_history_user_created
          ON xp_history(user_id, created_at_ms);

        CREATE TABLE IF NOT EXISTS streaks (
          user_id TEXT PRIMARY KEY,
          current_streak INTEGER NOT NULL,
          longest_streak INTEGER NOT NULL,
          last_quiz_date TEXT,
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
          CHECK(longest_streak >= current_streak)
        );

        CREATE TABLE IF NOT EXISTS meals (
          id TEXT PRIMARY KEY,
          type TEXT NOT NULL CHECK(type IN ('starter','main','dessert','cheese','wine')),
          name TEXT NOT NULL,
          description TEXT NOT NULL,
          tags TEXT NOT NULL,
          cuisine TEXT NOT NULL,
          prep_time_min INTEGER NOT NULL DEFAULT 0,
          cook_time_min INTEGER NOT NULL DEFAULT 0,
          difficulty INTEGER NOT NULL DEFAULT 1,
          budget TEXT NOT NULL DEFAULT 'medium',
          calories INTEGER NOT NULL DEFAULT 0,
          servings INTEGER NOT NULL DEFAULT 1,
          wine_pairing TEXT,
          cheese_pairing TEXT,
          season TEXT NOT NULL DEFAULT 'all',
          is_vegetarian INTEGER NOT NULL DEFAULT 0,
          is_vegan INTEGER NOT NULL DEFAULT 0,
          is_gluten_free INTEGER NOT NULL DEFAULT 0,
          ingredients_json TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_meals_type ON meals(type);

        CREATE TABLE IF NOT EXISTS daily_menus (
          user_id TEXT NOT NULL,
          menu_date TEXT NOT NULL,
          budget TEXT,
          starter_id TEXT,
          main_id TEXT,
          dessert_id TEXT,
          cheese_id TEXT,
          wine_id TEXT,
          alternates_json TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY(user_id, menu_date),
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS posts (
          id TEXT PRIMARY KEY,
          user_id TEXT NOT NULL,
          caption TEXT NOT NULL,
          meal_id TEXT,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_posts_user_created
          ON posts(user_id, created_at_ms);

        CREATE TABLE IF NOT EXISTS likes (
          user_id TEXT NOT NULL,
          post_id TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY(user_id, post_id),
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
          FOREIGN KEY(post_id) REFERENCES posts(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS comments (
          id TEXT PRIMARY KEY,
          post_id TEXT NOT NULL,
          user_id TEXT NOT NULL,
          content TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(post_id) REFERENCES posts(id) ON DELETE CASCADE,
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS follows (
          follower_id TEXT NOT NULL,
          following_id TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY(follower_id, following_id),
          FOREIGN KEY(follower_id) REFERENCES users(id) ON DELETE CASCADE,
          FOREIGN KEY(following_id) REFERENCES users(id) ON DELETE CASCADE,
          CHECK(follower_id <> following_id)
        );

        CREATE TABLE IF NOT EXISTS fridge_items (
          id TEXT PRIMARY KEY,
          user_id TEXT NOT NULL,
          name TEXT NOT NULL,
          quantity REAL NOT NULL DEFAULT 1,
          unit TEXT NOT NULL DEFAULT 'unit',
          category TEXT NOT NULL DEFAULT 'other',
          expiry_date TEXT,
          FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_fridge_items_user ON fridge_items(user_id);
        "#,
    )?;

    conn.execute(
        "INSERT INTO app_state(singleton, schema_version, created_at_ms, updated_at_ms) \
         VALUES (1, ?1, ?2, ?2) \
         ON CONFLICT(singleton) DO UPDATE SET schema_version=excluded.schema_version, updated_at_ms=excluded.updated_at_ms",
        params![V1_SCHEMA_VERSION, now_ms],
    )?;

    Ok(())
}

fn ensure_user_exists_tx(tx: &Transaction<'_>, user_id: &str) -> Result<(), StoreError> {
    let exists = tx
        .query_row(
            "SELECT 1 FROM users WHERE id=?1",
            params![user_id],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if exists { Ok(()) } else { Err(StoreError::UnknownUser) }
}

/// Balance increment plus optional history entry; the caller's transaction
/// keeps the pair atomic.
fn award_xp_tx(
    tx: &Transaction<'_>,
    user_id: &str,
    amount: i64,
    reason: Option<&str>,
    now_ms: i64,
) -> Result<(), StoreError> {
    let updated = tx.execute(
        "UPDATE users SET total_xp = total_xp + ?2 WHERE id = ?1",
        params![user_id, amount],
    )?;
    if updated == 0 {
        return Err(StoreError::UnknownUser);
    }
    if let Some(reason) = reason {
        tx.execute(
            "INSERT INTO xp_history(user_id, amount, reason, created_at_ms) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, amount, reason, now_ms],
        )?;
    }
    Ok(())
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}

fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

fn date_to_text(date: Date) -> String {
    date.format(&DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn date_from_text(value: &str) -> Result<Date, StoreError> {
    Date::parse(value, &DATE_FORMAT)
        .map_err(|_| StoreError::InvalidInput("invalid stored calendar date"))
}

fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration,
        Err(_) => return 0,
    };

    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}
