#![forbid(unsafe_code)]

use super::{RegisterUserRequest, SetPreferencesRequest, SqliteStore, StoreError};
use super::{PreferencesRow, is_constraint_violation};
use rusqlite::{OptionalExtension, params};
use tracing::debug;

impl SqliteStore {
    /// Creates the user row plus its zeroed per-user state (preferences,
    /// streak) in one transaction. Level starts at 1 with 0 XP.
    pub fn register_user(&mut self, request: RegisterUserRequest) -> Result<(), StoreError> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_lowercase();
        if email.is_empty() || username.is_empty() {
            return Err(StoreError::InvalidInput("email and username are required"));
        }

        let tx = self.conn.transaction()?;

        let insert = tx.execute(
            "INSERT INTO users(id, email, username, password_hash, level, total_xp, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, 1, 0, ?5)",
            params![
                request.user_id,
                email,
                username,
                request.password_hash,
                request.created_at_ms,
            ],
        );
        if let Err(err) = insert {
            if is_constraint_violation(&err) {
                return Err(StoreError::UserAlreadyExists);
            }
            return Err(StoreError::Sql(err));
        }

        tx.execute(
            "INSERT INTO user_preferences(user_id) VALUES (?1)",
            params![request.user_id],
        )?;
        tx.execute(
            "INSERT INTO streaks(user_id, current_streak, longest_streak, last_quiz_date) \
             VALUES (?1, 0, 0, NULL)",
            params![request.user_id],
        )?;

        tx.commit()?;
        debug!(user = %request.user_id, "registered user");
        Ok(())
    }

    pub fn set_preferences(&mut self, request: SetPreferencesRequest) -> Result<(), StoreError> {
        let allergens: Vec<String> = request
            .allergens
            .iter()
            .map(|allergen| allergen.trim().to_lowercase())
            .filter(|allergen| !allergen.is_empty())
            .collect();
        let allergens_json = serde_json::to_string(&allergens)
            .map_err(|_| StoreError::InvalidInput("invalid allergens payload"))?;

        let tx = self.conn.transaction()?;
        super::ensure_user_exists_tx(&tx, &request.user_id)?;
        tx.execute(
            r#"
            INSERT INTO user_preferences(user_id, diet, allergens_json)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET diet=excluded.diet, allergens_json=excluded.allergens_json
            "#,
            params![request.user_id, request.diet.as_str(), allergens_json],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn preferences(&self, user_id: &str) -> Result<Option<PreferencesRow>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT diet, allergens_json FROM user_preferences WHERE user_id=?1",
                params![user_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((diet, allergens_json)) => Ok(Some(PreferencesRow {
                diet,
                allergens: serde_json::from_str(&allergens_json)
                    .map_err(|_| StoreError::InvalidInput("invalid allergens row"))?,
            })),
            None => Ok(None),
        }
    }
}
