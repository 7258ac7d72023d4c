#![forbid(unsafe_code)]

use super::{
    AddCommentRequest, CommentRow, CreatePostRequest, PostRow, SqliteStore, StoreError,
    award_xp_tx, ensure_user_exists_tx,
};
use plateful_core::level::POST_XP;
use rusqlite::{OptionalExtension, Transaction, params};
use tracing::debug;

impl SqliteStore {
    pub fn create_post(&mut self, request: CreatePostRequest) -> Result<(), StoreError> {
        let caption = request.caption.trim();
        if caption.is_empty() {
            return Err(StoreError::InvalidInput("post caption is empty"));
        }

        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, &request.user_id)?;
        if let Some(meal_id) = &request.meal_id {
            let known = tx
                .query_row(
                    "SELECT 1 FROM meals WHERE id=?1",
                    params![meal_id],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?
                .is_some();
            if !known {
                return Err(StoreError::UnknownId);
            }
        }

        tx.execute(
            "INSERT INTO posts(id, user_id, caption, meal_id, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                request.post_id,
                request.user_id,
                caption,
                request.meal_id,
                request.now_ms,
            ],
        )?;
        award_xp_tx(&tx, &request.user_id, POST_XP, None, request.now_ms)?;
        tx.commit()?;
        debug!(user = %request.user_id, post = %request.post_id, "created post");
        Ok(())
    }

    /// Only the author may delete; likes and comments go with the post
    /// through the cascade.
    pub fn delete_post(&mut self, user_id: &str, post_id: &str) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let owner = tx
            .query_row(
                "SELECT user_id FROM posts WHERE id=?1",
                params![post_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .ok_or(StoreError::UnknownId)?;
        if owner != user_id {
            return Err(StoreError::InvalidInput("post belongs to another user"));
        }
        tx.execute("DELETE FROM posts WHERE id=?1", params![post_id])?;
        tx.commit()?;
        Ok(())
    }

    /// Returns true when the post ends up liked, false when the call
    /// removed an existing like.
    pub fn toggle_like(
        &mut self,
        user_id: &str,
        post_id: &str,
        now_ms: i64,
    ) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, user_id)?;
        ensure_post_exists_tx(&tx, post_id)?;

        let removed = tx.execute(
            "DELETE FROM likes WHERE user_id=?1 AND post_id=?2",
            params![user_id, post_id],
        )?;
        let liked = if removed == 0 {
            tx.execute(
                "INSERT INTO likes(user_id, post_id, created_at_ms) VALUES (?1, ?2, ?3)",
                params![user_id, post_id, now_ms],
            )?;
            true
        } else {
            false
        };
        tx.commit()?;
        Ok(liked)
    }

    pub fn add_comment(&mut self, request: AddCommentRequest) -> Result<(), StoreError> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(StoreError::InvalidInput("comment content is empty"));
        }

        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, &request.user_id)?;
        ensure_post_exists_tx(&tx, &request.post_id)?;
        tx.execute(
            "INSERT INTO comments(id, post_id, user_id, content, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                request.comment_id,
                request.post_id,
                request.user_id,
                content,
                request.now_ms,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn list_comments(&self, post_id: &str) -> Result<Vec<CommentRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, post_id, user_id, content, created_at_ms FROM comments \
             WHERE post_id=?1 ORDER BY created_at_ms ASC, rowid ASC",
        )?;
        let mut rows = stmt.query(params![post_id])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(CommentRow {
                id: row.get(0)?,
                post_id: row.get(1)?,
                user_id: row.get(2)?,
                content: row.get(3)?,
                created_at_ms: row.get(4)?,
            });
        }
        Ok(out)
    }

    /// Returns true when the follow relation ends up present.
    pub fn toggle_follow(
        &mut self,
        follower_id: &str,
        following_id: &str,
        now_ms: i64,
    ) -> Result<bool, StoreError> {
        if follower_id == following_id {
            return Err(StoreError::InvalidInput("cannot follow yourself"));
        }

        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, follower_id)?;
        ensure_user_exists_tx(&tx, following_id)?;

        let removed = tx.execute(
            "DELETE FROM follows WHERE follower_id=?1 AND following_id=?2",
            params![follower_id, following_id],
        )?;
        let following = if removed == 0 {
            tx.execute(
                "INSERT INTO follows(follower_id, following_id, created_at_ms) \
                 VALUES (?1, ?2, ?3)",
                params![follower_id, following_id, now_ms],
            )?;
            true
        } else {
            false
        };
        tx.commit()?;
        Ok(following)
    }

    pub fn follower_count(&self, user_id: &str) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE following_id=?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    pub fn following_count(&self, user_id: &str) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE follower_id=?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    pub fn post_count(&self, user_id: &str) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE user_id=?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    pub fn list_posts(&self, user_id: &str, limit: usize) -> Result<Vec<PostRow>, StoreError> {
        let limit = super::to_sqlite_i64(limit)?;
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.user_id, p.caption, p.meal_id, p.created_at_ms, \
               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id), \
               (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) \
             FROM posts p WHERE p.user_id=?1 \
             ORDER BY p.created_at_ms DESC, p.rowid DESC LIMIT ?2",
        )?;
        let mut rows = stmt.query(params![user_id, limit])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(PostRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                caption: row.get(2)?,
                meal_id: row.get(3)?,
                created_at_ms: row.get(4)?,
                likes: row.get(5)?,
                comments: row.get(6)?,
            });
        }
        Ok(out)
    }
}

fn ensure_post_exists_tx(tx: &Transaction<'_>, post_id: &str) -> Result<(), StoreError> {
    let exists = tx
        .query_row("SELECT 1 FROM posts WHERE id=?1", params![post_id], |row| {
            row.get::<_, i64>(0)
        })
        .optional()?
        .is_some();
    if exists { Ok(()) } else { Err(StoreError::UnknownId) }
}
