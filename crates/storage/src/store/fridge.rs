#![forbid(unsafe_code)]

use super::menu::read_meal_row;
use super::{
    AddFridgeItemRequest, DishSuggestion, FridgeItemRow, SqliteStore, StoreError, date_to_text,
    ensure_user_exists_tx,
};
use plateful_core::fridge::match_ingredients;
use rusqlite::params;
use time::Date;

const MAX_SUGGESTIONS: usize = 20;

impl SqliteStore {
    pub fn add_fridge_item(&mut self, request: AddFridgeItemRequest) -> Result<(), StoreError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("fridge item name is empty"));
        }
        if !request.quantity.is_finite() || request.quantity <= 0.0 {
            return Err(StoreError::InvalidInput("fridge item quantity must be positive"));
        }

        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, &request.user_id)?;
        tx.execute(
            "INSERT INTO fridge_items(id, user_id, name, quantity, unit, category, expiry_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             ON CONFLICT(id) DO UPDATE SET name=excluded.name, quantity=excluded.quantity, \
               unit=excluded.unit, category=excluded.category, expiry_date=excluded.expiry_date",
            params![
                request.item_id,
                request.user_id,
                name,
                request.quantity,
                request.unit,
                request.category,
                request.expiry_date.map(date_to_text),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn list_fridge_items(&self, user_id: &str) -> Result<Vec<FridgeItemRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, quantity, unit, category, expiry_date FROM fridge_items \
             WHERE user_id=?1 ORDER BY category ASC, name ASC",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(read_fridge_row(row)?);
        }
        Ok(out)
    }

    pub fn remove_fridge_item(&mut self, user_id: &str, item_id: &str) -> Result<bool, StoreError> {
        let removed = self.conn.execute(
            "DELETE FROM fridge_items WHERE id=?1 AND user_id=?2",
            params![item_id, user_id],
        )?;
        Ok(removed > 0)
    }

    /// Items whose expiry date falls inside `today..=today+within_days`.
    /// Already-expired items are included so the caller can surface them.
    pub fn expiring_items(
        &self,
        user_id: &str,
        within_days: i64,
        today: Date,
    ) -> Result<Vec<FridgeItemRow>, StoreError> {
        let horizon = today
            .checked_add(time::Duration::days(within_days))
            .ok_or(StoreError::InvalidInput("expiry horizon out of range"))?;
        let mut stmt = self.conn.prepare(
            "SELECT id, name, quantity, unit, category, expiry_date FROM fridge_items \
             WHERE user_id=?1 AND expiry_date IS NOT NULL AND expiry_date <= ?2 \
             ORDER BY expiry_date ASC, name ASC",
        )?;
        let mut rows = stmt.query(params![user_id, date_to_text(horizon)])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(read_fridge_row(row)?);
        }
        Ok(out)
    }

    /// Scores the cookable catalog (starter, main, dessert) against the
    /// fridge contents. Zero-match dishes are dropped and results come back
    /// best match first, capped at twenty.
    pub fn fridge_suggestions(&self, user_id: &str) -> Result<Vec<DishSuggestion>, StoreError> {
        let fridge: Vec<String> = {
            let mut stmt = self
                .conn
                .prepare("SELECT name FROM fridge_items WHERE user_id=?1")?;
            let mut rows = stmt.query(params![user_id])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(row.get::<_, String>(0)?);
            }
            out
        };
        if fridge.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, type, name, description, tags, cuisine, prep_time_min, cook_time_min, \
             difficulty, budget, calories, servings, wine_pairing, cheese_pairing, season, \
             is_vegetarian, is_vegan, is_gluten_free, ingredients_json \
             FROM meals WHERE type IN ('starter','main','dessert') ORDER BY rowid ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut suggestions = Vec::new();
        while let Some(row) = rows.next()? {
            let meal = read_meal_row(row)?;
            let ingredient_names: Vec<String> = meal
                .ingredients
                .iter()
                .map(|ingredient| ingredient.name.clone())
                .collect();
            let matched = match_ingredients(&ingredient_names, &fridge);
            if matched.count() == 0 {
                continue;
            }
            suggestions.push(DishSuggestion {
                match_count: matched.count(),
                match_percent: matched.percent(),
                matched_ingredients: matched.matched,
                meal,
            });
        }

        suggestions.sort_by(|a, b| {
            b.match_percent
                .cmp(&a.match_percent)
                .then(b.match_count.cmp(&a.match_count))
                .then(a.meal.id.cmp(&b.meal.id))
        });
        suggestions.truncate(MAX_SUGGESTIONS);
        Ok(suggestions)
    }
}

fn read_fridge_row(row: &rusqlite::Row<'_>) -> Result<FridgeItemRow, StoreError> {
    Ok(FridgeItemRow {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
        category: row.get(4)?,
        expiry_date: row.get(5)?,
    })
}
