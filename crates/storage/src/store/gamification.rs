#![forbid(unsafe_code)]

use super::menu::streak_state_tx;
use super::{
    AchievementCheck, AchievementRow, LeaderboardEntry, LeaderboardKind, SqliteStore, StoreError,
    StreakSummary, UnlockedAchievement, UserAchievements, UserStats, XpEvent, award_xp_tx,
    date_to_text, ensure_user_exists_tx,
};
use plateful_core::achievement::{ActivityCounters, ConditionKind, condition_met};
use plateful_core::level::{level_after, xp_for_level};
use rusqlite::{OptionalExtension, Transaction, params};
use tracing::debug;

impl SqliteStore {
    /// Evaluates every locked achievement against fresh activity counters
    /// and unlocks the ones whose threshold is met. Unlock XP may in turn
    /// raise the level; a single transaction covers the whole sweep.
    pub fn check_achievements(
        &mut self,
        user_id: &str,
        now_ms: i64,
    ) -> Result<AchievementCheck, StoreError> {
        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, user_id)?;

        let counters = activity_counters_tx(&tx, user_id)?;

        let locked = {
            let mut stmt = tx.prepare(
                "SELECT id, name, description, category, condition_type, condition_value, \
                 xp_reward, rarity FROM achievements \
                 WHERE id NOT IN (SELECT achievement_id FROM user_achievements WHERE user_id=?1) \
                 ORDER BY rowid ASC",
            )?;
            let mut rows = stmt.query(params![user_id])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(read_achievement_row(row)?);
            }
            out
        };

        let mut newly_unlocked = Vec::new();
        for achievement in locked {
            let Some(kind) = ConditionKind::parse(&achievement.condition_type) else {
                continue;
            };
            if !condition_met(kind, achievement.condition_value, &counters) {
                continue;
            }
            // INSERT OR IGNORE keeps a concurrent unlock of the same pair
            // from double-awarding the reward.
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO user_achievements(user_id, achievement_id, unlocked_at_ms) \
                 VALUES (?1, ?2, ?3)",
                params![user_id, achievement.id, now_ms],
            )?;
            if inserted == 0 {
                continue;
            }
            award_xp_tx(&tx, user_id, achievement.xp_reward, None, now_ms)?;
            newly_unlocked.push(achievement);
        }

        let (level, total_xp) = level_row_tx(&tx, user_id)?;
        let next_level = level_after(level, total_xp);
        let new_level = if next_level > level {
            tx.execute(
                "UPDATE users SET level=?2 WHERE id=?1",
                params![user_id, next_level],
            )?;
            Some(next_level)
        } else {
            None
        };

        tx.commit()?;
        if !newly_unlocked.is_empty() {
            debug!(
                user = %user_id,
                unlocked = newly_unlocked.len(),
                level = next_level,
                "achievement sweep"
            );
        }
        Ok(AchievementCheck {
            newly_unlocked,
            new_level,
        })
    }

    pub fn user_stats(&self, user_id: &str) -> Result<UserStats, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        ensure_user_exists_tx(&tx, user_id)?;

        let (level, total_xp) = level_row_tx(&tx, user_id)?;
        let streak = match streak_state_tx(&tx, user_id)? {
            Some(state) => StreakSummary {
                current: state.current,
                longest: state.longest,
                last_quiz_date: state.last_quiz_date.map(date_to_text),
            },
            None => StreakSummary {
                current: 0,
                longest: 0,
                last_quiz_date: None,
            },
        };
        tx.commit()?;

        // Thresholds are absolute XP totals, so the current level's
        // threshold is the floor of the progress window.
        let floor = xp_for_level(level);
        let xp_needed = xp_for_level(level + 1) - floor;
        let xp_progress = total_xp - floor;
        let progress_percent = if xp_needed > 0 {
            (xp_progress * 100 / xp_needed).clamp(0, 100)
        } else {
            0
        };

        Ok(UserStats {
            level,
            total_xp,
            xp_progress,
            xp_needed,
            progress_percent,
            streak,
        })
    }

    pub fn xp_history(&self, user_id: &str, limit: usize) -> Result<Vec<XpEvent>, StoreError> {
        let limit = super::to_sqlite_i64(limit)?;
        let mut stmt = self.conn.prepare(
            "SELECT amount, reason, created_at_ms FROM xp_history \
             WHERE user_id=?1 ORDER BY created_at_ms DESC, rowid DESC LIMIT ?2",
        )?;
        let mut rows = stmt.query(params![user_id, limit])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(XpEvent {
                amount: row.get(0)?,
                reason: row.get(1)?,
                created_at_ms: row.get(2)?,
            });
        }
        Ok(out)
    }

    pub fn leaderboard(
        &self,
        kind: LeaderboardKind,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let limit = super::to_sqlite_i64(limit)?;
        let sql = match kind {
            LeaderboardKind::Xp => {
                "SELECT id, username, level, total_xp FROM users \
                 ORDER BY total_xp DESC, username ASC LIMIT ?1"
            }
            LeaderboardKind::Streak => {
                "SELECT u.id, u.username, u.level, s.current_streak \
                 FROM users u JOIN streaks s ON s.user_id = u.id \
                 ORDER BY s.current_streak DESC, u.username ASC LIMIT ?1"
            }
            LeaderboardKind::Achievements => {
                "SELECT u.id, u.username, u.level, \
                   (SELECT COUNT(*) FROM user_achievements ua WHERE ua.user_id = u.id) AS unlocked \
                 FROM users u ORDER BY unlocked DESC, u.username ASC LIMIT ?1"
            }
        };
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params![limit])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(LeaderboardEntry {
                user_id: row.get(0)?,
                username: row.get(1)?,
                level: row.get(2)?,
                value: row.get(3)?,
            });
        }
        Ok(out)
    }

    pub fn list_achievements(&self) -> Result<Vec<AchievementRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, category, condition_type, condition_value, \
             xp_reward, rarity FROM achievements ORDER BY xp_reward ASC, rowid ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(read_achievement_row(row)?);
        }
        Ok(out)
    }

    pub fn user_achievements(&self, user_id: &str) -> Result<UserAchievements, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        ensure_user_exists_tx(&tx, user_id)?;

        let unlocked = {
            let mut stmt = tx.prepare(
                "SELECT a.id, a.name, a.description, a.category, a.condition_type, \
                 a.condition_value, a.xp_reward, a.rarity, ua.unlocked_at_ms \
                 FROM user_achievements ua JOIN achievements a ON a.id = ua.achievement_id \
                 WHERE ua.user_id=?1 ORDER BY ua.unlocked_at_ms ASC, a.id ASC",
            )?;
            let mut rows = stmt.query(params![user_id])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(UnlockedAchievement {
                    achievement: read_achievement_row(row)?,
                    unlocked_at_ms: row.get(8)?,
                });
            }
            out
        };

        let locked = {
            let mut stmt = tx.prepare(
                "SELECT id, name, description, category, condition_type, condition_value, \
                 xp_reward, rarity FROM achievements \
                 WHERE id NOT IN (SELECT achievement_id FROM user_achievements WHERE user_id=?1) \
                 ORDER BY xp_reward ASC, rowid ASC",
            )?;
            let mut rows = stmt.query(params![user_id])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(read_achievement_row(row)?);
            }
            out
        };

        tx.commit()?;
        Ok(UserAchievements { unlocked, locked })
    }
}

fn read_achievement_row(row: &rusqlite::Row<'_>) -> Result<AchievementRow, StoreError> {
    Ok(AchievementRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        condition_type: row.get(4)?,
        condition_value: row.get(5)?,
        xp_reward: row.get(6)?,
        rarity: row.get(7)?,
    })
}

fn level_row_tx(tx: &Transaction<'_>, user_id: &str) -> Result<(i64, i64), StoreError> {
    tx.query_row(
        "SELECT level, total_xp FROM users WHERE id=?1",
        params![user_id],
        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
    )
    .optional()?
    .ok_or(StoreError::UnknownUser)
}

fn activity_counters_tx(
    tx: &Transaction<'_>,
    user_id: &str,
) -> Result<ActivityCounters, StoreError> {
    let menus_generated = tx.query_row(
        "SELECT COUNT(*) FROM daily_menus WHERE user_id=?1",
        params![user_id],
        |row| row.get::<_, i64>(0),
    )?;
    let current_streak = streak_state_tx(tx, user_id)?
        .map(|state| state.current)
        .unwrap_or(0);
    let followers = tx.query_row(
        "SELECT COUNT(*) FROM follows WHERE following_id=?1",
        params![user_id],
        |row| row.get::<_, i64>(0),
    )?;
    let posts = tx.query_row(
        "SELECT COUNT(*) FROM posts WHERE user_id=?1",
        params![user_id],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(ActivityCounters {
        menus_generated,
        current_streak,
        followers,
        posts,
    })
}
