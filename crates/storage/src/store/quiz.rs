#![forbid(unsafe_code)]

use super::{
    AssignedProfile, ListQuestionsRequest, ProfileRow, QuestionRow, QuizOutcome,
    SqliteStore, StoreError, SubmitQuizRequest, award_xp_tx, ensure_user_exists_tx,
    to_sqlite_i64,
};
use plateful_core::level::QUIZ_XP;
use plateful_core::quiz::{ProfileCard, best_profile, tag_counts};
use plateful_core::tags::TagSet;
use rusqlite::{OptionalExtension, Transaction, params};
use tracing::debug;

impl SqliteStore {
    pub fn list_questions(
        &self,
        request: ListQuestionsRequest,
    ) -> Result<Vec<QuestionRow>, StoreError> {
        let limit = to_sqlite_i64(request.count)?;

        let mut out = Vec::new();
        match request.category.as_deref() {
            Some(category) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, text, category, tags FROM questions \
                     WHERE category=?1 ORDER BY RANDOM() LIMIT ?2",
                )?;
                let mut rows = stmt.query(params![category, limit])?;
                while let Some(row) = rows.next()? {
                    out.push(read_question(row)?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, text, category, tags FROM questions ORDER BY RANDOM() LIMIT ?1",
                )?;
                let mut rows = stmt.query(params![limit])?;
                while let Some(row) = rows.next()? {
                    out.push(read_question(row)?);
                }
            }
        }
        Ok(out)
    }

    /// Persists the answers, recomputes the tag profile from every liked
    /// answer, assigns the best-matching archetype and awards the quiz XP —
    /// all in one transaction.
    pub fn submit_quiz(&mut self, request: SubmitQuizRequest) -> Result<QuizOutcome, StoreError> {
        if request.answers.is_empty() {
            return Err(StoreError::InvalidInput("answers array must not be empty"));
        }

        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, &request.user_id)?;

        for answer in &request.answers {
            ensure_question_exists_tx(&tx, &answer.question_id)?;
            tx.execute(
                r#"
                INSERT INTO user_answers(user_id, question_id, liked)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(user_id, question_id) DO UPDATE SET liked=excluded.liked
                "#,
                params![request.user_id, answer.question_id, answer.liked as i64],
            )?;
        }

        let liked_tags = liked_tag_sets_tx(&tx, &request.user_id)?;
        let counts = tag_counts(&liked_tags);

        let catalog = profile_catalog_tx(&tx)?;
        let cards: Vec<ProfileCard> = catalog
            .iter()
            .map(|profile| ProfileCard {
                id: profile.id.clone(),
                tags: TagSet::parse(&profile.tags),
            })
            .collect();
        let Some((winner, score)) = best_profile(&cards, &counts) else {
            return Err(StoreError::InvalidInput("profile catalog is empty"));
        };
        let score = i64::from(score);

        tx.execute(
            r#"
            INSERT INTO user_profiles(user_id, profile_id, score, assigned_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
              profile_id=excluded.profile_id,
              score=excluded.score,
              assigned_at_ms=excluded.assigned_at_ms
            "#,
            params![request.user_id, winner.id, score, request.now_ms],
        )?;

        award_xp_tx(&tx, &request.user_id, QUIZ_XP, Some("quiz_completed"), request.now_ms)?;
        tx.commit()?;

        let profile = catalog
            .into_iter()
            .find(|profile| profile.id == winner.id)
            .ok_or(StoreError::UnknownId)?;
        debug!(user = %request.user_id, profile = %profile.id, score, "assigned culinary profile");

        Ok(QuizOutcome {
            profile,
            score,
            xp_gained: QUIZ_XP,
        })
    }

    pub fn assigned_profile(&self, user_id: &str) -> Result<Option<AssignedProfile>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT p.id, p.name, p.description, p.tags, p.rarity, up.score, up.assigned_at_ms \
                 FROM user_profiles up \
                 JOIN profiles p ON up.profile_id = p.id \
                 WHERE up.user_id=?1",
                params![user_id],
                |row| {
                    Ok(AssignedProfile {
                        profile: ProfileRow {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            description: row.get(2)?,
                            tags: row.get(3)?,
                            rarity: row.get(4)?,
                        },
                        score: row.get(5)?,
                        assigned_at_ms: row.get(6)?,
                    })
                },
            )
            .optional()?)
    }

    pub fn list_profiles(&self) -> Result<Vec<ProfileRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, tags, rarity FROM profiles ORDER BY name ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(ProfileRow {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                tags: row.get(3)?,
                rarity: row.get(4)?,
            });
        }
        Ok(out)
    }
}

fn read_question(row: &rusqlite::Row<'_>) -> Result<QuestionRow, StoreError> {
    Ok(QuestionRow {
        id: row.get(0)?,
        text: row.get(1)?,
        category: row.get(2)?,
        tags: row.get(3)?,
    })
}

fn ensure_question_exists_tx(tx: &Transaction<'_>, question_id: &str) -> Result<(), StoreError> {
    let exists = tx
        .query_row(
            "SELECT 1 FROM questions WHERE id=?1",
            params![question_id],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if exists { Ok(()) } else { Err(StoreError::UnknownId) }
}

fn liked_tag_sets_tx(tx: &Transaction<'_>, user_id: &str) -> Result<Vec<TagSet>, StoreError> {
    let mut stmt = tx.prepare(
        "SELECT q.tags FROM user_answers ua \
         JOIN questions q ON ua.question_id = q.id \
         WHERE ua.user_id=?1 AND ua.liked=1",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(TagSet::parse(&row.get::<_, String>(0)?));
    }
    Ok(out)
}

/// Catalog insertion order; the scorer's tie-break depends on it.
fn profile_catalog_tx(tx: &Transaction<'_>) -> Result<Vec<ProfileRow>, StoreError> {
    let mut stmt = tx.prepare(
        "SELECT id, name, description, tags, rarity FROM profiles ORDER BY rowid ASC",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(ProfileRow {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            tags: row.get(3)?,
            rarity: row.get(4)?,
        });
    }
    Ok(out)
}
