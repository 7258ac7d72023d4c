#![forbid(unsafe_code)]

use super::{
    DailyMenu, DailyMenuOutcome, DailyMenuRequest, Ingredient, MealRow, MenuSlot,
    SqliteStore, StoreError, SwapMenuSlotRequest, award_xp_tx, date_from_text, date_to_text,
    ensure_user_exists_tx,
};
use plateful_core::menu::{Budget, Course, CoursePicker, Diet, draw_with_alternates};
use plateful_core::streak::{StreakState, daily_xp};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rusqlite::{OptionalExtension, Transaction, params};
use std::collections::BTreeMap;
use tracing::debug;

/// Production adapter for the core picker seam; seedable for tests.
pub struct RngCoursePicker<R: Rng> {
    rng: R,
}

impl RngCoursePicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> CoursePicker for RngCoursePicker<R> {
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

#[derive(Clone, Copy, Debug)]
struct MenuFilter {
    diet: Diet,
    gluten_free: bool,
    budget: Option<Budget>,
}

impl SqliteStore {
    /// One menu per user per calendar day. A repeat invocation on the same
    /// day returns the stored menu unchanged; a fresh draw also advances the
    /// streak and awards the daily XP, all inside one transaction.
    pub fn generate_daily_menu(
        &mut self,
        request: DailyMenuRequest,
        picker: &mut dyn CoursePicker,
    ) -> Result<DailyMenuOutcome, StoreError> {
        let day_text = date_to_text(request.day);
        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, &request.user_id)?;

        if let Some(menu) = load_menu_tx(&tx, &request.user_id, &day_text)? {
            let current_streak = streak_state_tx(&tx, &request.user_id)?
                .map(|state| state.current)
                .unwrap_or(0);
            tx.commit()?;
            return Ok(DailyMenuOutcome {
                menu,
                freshly_generated: false,
                current_streak,
                xp_gained: 0,
            });
        }

        let filter = menu_filter_tx(&tx, &request.user_id, request.budget)?;

        let mut alternate_ids: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut draw = |tx: &Transaction<'_>, course: Course| -> Result<MenuSlot, StoreError> {
            let candidates = eligible_meals_tx(tx, course, &filter)?;
            match draw_with_alternates(candidates.len(), picker) {
                Some((chosen, alternates)) => {
                    let meal = candidates[chosen].clone();
                    let alternates: Vec<MealRow> = alternates
                        .into_iter()
                        .map(|index| candidates[index].clone())
                        .collect();
                    alternate_ids.insert(
                        course.as_str().to_string(),
                        alternates.iter().map(|meal| meal.id.clone()).collect(),
                    );
                    Ok(MenuSlot {
                        meal: Some(meal),
                        alternates,
                    })
                }
                None => Ok(MenuSlot::default()),
            }
        };

        let starter = draw(&tx, Course::Starter)?;
        let main = draw(&tx, Course::Main)?;
        let dessert = draw(&tx, Course::Dessert)?;
        let cheese = if request.include_cheese {
            draw(&tx, Course::Cheese)?
        } else {
            MenuSlot::default()
        };
        let wine = if request.include_wine {
            draw(&tx, Course::Wine)?
        } else {
            MenuSlot::default()
        };

        let alternates_json = serde_json::to_string(&alternate_ids)
            .map_err(|_| StoreError::InvalidInput("invalid alternates payload"))?;
        tx.execute(
            "INSERT INTO daily_menus(user_id, menu_date, budget, starter_id, main_id, dessert_id, \
             cheese_id, wine_id, alternates_json, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                request.user_id,
                day_text,
                request.budget.map(Budget::as_str),
                starter.meal.as_ref().map(|meal| meal.id.clone()),
                main.meal.as_ref().map(|meal| meal.id.clone()),
                dessert.meal.as_ref().map(|meal| meal.id.clone()),
                cheese.meal.as_ref().map(|meal| meal.id.clone()),
                wine.meal.as_ref().map(|meal| meal.id.clone()),
                alternates_json,
                request.now_ms,
            ],
        )?;

        // Streak row is created at registration; with no row the streak
        // stays implicitly 0 and only the base XP applies.
        let current_streak = match streak_state_tx(&tx, &request.user_id)? {
            Some(state) => {
                let next = state.advance(request.day);
                tx.execute(
                    "UPDATE streaks SET current_streak=?2, longest_streak=?3, last_quiz_date=?4 \
                     WHERE user_id=?1",
                    params![
                        request.user_id,
                        next.current,
                        next.longest,
                        date_to_text(request.day),
                    ],
                )?;
                next.current
            }
            None => 0,
        };

        let xp_gained = daily_xp(current_streak);
        award_xp_tx(&tx, &request.user_id, xp_gained, None, request.now_ms)?;
        tx.commit()?;
        debug!(
            user = %request.user_id,
            day = %day_text,
            streak = current_streak,
            xp = xp_gained,
            "generated daily menu"
        );

        Ok(DailyMenuOutcome {
            menu: DailyMenu {
                menu_date: day_text,
                starter,
                main,
                dessert,
                cheese,
                wine,
            },
            freshly_generated: true,
            current_streak,
            xp_gained,
        })
    }

    pub fn daily_menu(
        &self,
        user_id: &str,
        day: time::Date,
    ) -> Result<Option<DailyMenu>, StoreError> {
        let day_text = date_to_text(day);
        let tx = self.conn.unchecked_transaction()?;
        let menu = load_menu_tx(&tx, user_id, &day_text)?;
        tx.commit()?;
        Ok(menu)
    }

    /// Replaces one slot of today's stored menu with the caller's choice.
    /// The replacement is trusted: no filter re-validation happens here.
    pub fn swap_menu_slot(&mut self, request: SwapMenuSlotRequest) -> Result<MealRow, StoreError> {
        let day_text = date_to_text(request.day);
        let tx = self.conn.transaction()?;
        ensure_user_exists_tx(&tx, &request.user_id)?;

        let meal = meal_by_id_tx(&tx, &request.meal_id)?.ok_or(StoreError::UnknownId)?;

        let column = match request.course {
            Course::Starter => "starter_id",
            Course::Main => "main_id",
            Course::Dessert => "dessert_id",
            Course::Cheese => "cheese_id",
            Course::Wine => "wine_id",
        };
        let updated = tx.execute(
            &format!("UPDATE daily_menus SET {column}=?3 WHERE user_id=?1 AND menu_date=?2"),
            params![request.user_id, day_text, request.meal_id],
        )?;
        if updated == 0 {
            return Err(StoreError::UnknownId);
        }

        tx.commit()?;
        Ok(meal)
    }

    pub fn meal_by_id(&self, meal_id: &str) -> Result<Option<MealRow>, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let meal = meal_by_id_tx(&tx, meal_id)?;
        tx.commit()?;
        Ok(meal)
    }
}

const MEAL_COLUMNS: &str = "id, type, name, description, tags, cuisine, prep_time_min, \
    cook_time_min, difficulty, budget, calories, servings, wine_pairing, cheese_pairing, \
    season, is_vegetarian, is_vegan, is_gluten_free, ingredients_json";

pub(super) fn read_meal_row(row: &rusqlite::Row<'_>) -> Result<MealRow, StoreError> {
    let ingredients_json: String = row.get(18)?;
    let ingredients: Vec<Ingredient> = serde_json::from_str(&ingredients_json)
        .map_err(|_| StoreError::InvalidInput("invalid ingredients row"))?;
    Ok(MealRow {
        id: row.get(0)?,
        course: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        tags: row.get(4)?,
        cuisine: row.get(5)?,
        prep_time_min: row.get(6)?,
        cook_time_min: row.get(7)?,
        difficulty: row.get(8)?,
        budget: row.get(9)?,
        calories: row.get(10)?,
        servings: row.get(11)?,
        wine_pairing: row.get(12)?,
        cheese_pairing: row.get(13)?,
        season: row.get(14)?,
        is_vegetarian: row.get::<_, i64>(15)? != 0,
        is_vegan: row.get::<_, i64>(16)? != 0,
        is_gluten_free: row.get::<_, i64>(17)? != 0,
        ingredients,
    })
}

pub(super) fn meal_by_id_tx(
    tx: &Transaction<'_>,
    meal_id: &str,
) -> Result<Option<MealRow>, StoreError> {
    let mut stmt = tx.prepare(&format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id=?1"))?;
    let mut rows = stmt.query(params![meal_id])?;
    match rows.next()? {
        Some(row) => Ok(Some(read_meal_row(row)?)),
        None => Ok(None),
    }
}

fn menu_filter_tx(
    tx: &Transaction<'_>,
    user_id: &str,
    budget: Option<Budget>,
) -> Result<MenuFilter, StoreError> {
    let row = tx
        .query_row(
            "SELECT diet, allergens_json FROM user_preferences WHERE user_id=?1",
            params![user_id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    let (diet, gluten_free) = match row {
        Some((diet, allergens_json)) => {
            let allergens: Vec<String> = serde_json::from_str(&allergens_json)
                .map_err(|_| StoreError::InvalidInput("invalid allergens row"))?;
            (
                Diet::parse(&diet),
                allergens.iter().any(|allergen| allergen == "gluten"),
            )
        }
        None => (Diet::Omnivore, false),
    };

    Ok(MenuFilter {
        diet,
        gluten_free,
        budget,
    })
}

/// Deterministic candidate order (rowid) so the picker indices are stable.
fn eligible_meals_tx(
    tx: &Transaction<'_>,
    course: Course,
    filter: &MenuFilter,
) -> Result<Vec<MealRow>, StoreError> {
    let mut sql = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE type=?1");
    let mut bindings: Vec<String> = vec![course.as_str().to_string()];

    match filter.diet {
        Diet::Vegetarian => sql.push_str(" AND is_vegetarian=1"),
        Diet::Vegan => sql.push_str(" AND is_vegan=1"),
        Diet::Omnivore => {}
    }
    if filter.gluten_free {
        sql.push_str(" AND is_gluten_free=1");
    }
    if let Some(budget) = filter.budget {
        bindings.push(budget.as_str().to_string());
        sql.push_str(&format!(" AND budget=?{}", bindings.len()));
    }
    sql.push_str(" ORDER BY rowid ASC");

    let mut stmt = tx.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(bindings))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(read_meal_row(row)?);
    }
    Ok(out)
}

fn load_menu_tx(
    tx: &Transaction<'_>,
    user_id: &str,
    day_text: &str,
) -> Result<Option<DailyMenu>, StoreError> {
    let row = tx
        .query_row(
            "SELECT starter_id, main_id, dessert_id, cheese_id, wine_id, alternates_json \
             FROM daily_menus WHERE user_id=?1 AND menu_date=?2",
            params![user_id, day_text],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    let Some((starter_id, main_id, dessert_id, cheese_id, wine_id, alternates_json)) = row else {
        return Ok(None);
    };

    let alternate_ids: BTreeMap<String, Vec<String>> = serde_json::from_str(&alternates_json)
        .map_err(|_| StoreError::InvalidInput("invalid alternates row"))?;

    let slot = |course: Course, meal_id: Option<String>| -> Result<MenuSlot, StoreError> {
        let meal = match meal_id {
            Some(id) => meal_by_id_tx(tx, &id)?,
            None => None,
        };
        let mut alternates = Vec::new();
        if let Some(ids) = alternate_ids.get(course.as_str()) {
            for id in ids {
                if let Some(alternate) = meal_by_id_tx(tx, id)? {
                    alternates.push(alternate);
                }
            }
        }
        Ok(MenuSlot { meal, alternates })
    };

    Ok(Some(DailyMenu {
        menu_date: day_text.to_string(),
        starter: slot(Course::Starter, starter_id)?,
        main: slot(Course::Main, main_id)?,
        dessert: slot(Course::Dessert, dessert_id)?,
        cheese: slot(Course::Cheese, cheese_id)?,
        wine: slot(Course::Wine, wine_id)?,
    }))
}

pub(super) fn streak_state_tx(
    tx: &Transaction<'_>,
    user_id: &str,
) -> Result<Option<StreakState>, StoreError> {
    let row = tx
        .query_row(
            "SELECT current_streak, longest_streak, last_quiz_date FROM streaks WHERE user_id=?1",
            params![user_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((current, longest, last)) => Ok(Some(StreakState {
            current,
            longest,
            last_quiz_date: last.as_deref().map(date_from_text).transpose()?,
        })),
        None => Ok(None),
    }
}
