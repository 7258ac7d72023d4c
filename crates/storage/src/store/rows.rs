#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionRow {
    pub id: String,
    pub text: String,
    pub category: String,
    pub tags: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: String,
    pub rarity: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssignedProfile {
    pub profile: ProfileRow,
    pub score: i64,
    pub assigned_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub profile: ProfileRow,
    pub score: i64,
    pub xp_gained: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AchievementRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub condition_type: String,
    pub condition_value: i64,
    pub xp_reward: i64,
    pub rarity: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnlockedAchievement {
    pub achievement: AchievementRow,
    pub unlocked_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserAchievements {
    pub unlocked: Vec<UnlockedAchievement>,
    pub locked: Vec<AchievementRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AchievementCheck {
    pub newly_unlocked: Vec<AchievementRow>,
    pub new_level: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MealRow {
    pub id: String,
    #[serde(rename = "type")]
    pub course: String,
    pub name: String,
    pub description: String,
    pub tags: String,
    pub cuisine: String,
    pub prep_time_min: i64,
    pub cook_time_min: i64,
    pub difficulty: i64,
    pub budget: String,
    pub calories: i64,
    pub servings: i64,
    pub wine_pairing: Option<String>,
    pub cheese_pairing: Option<String>,
    pub season: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MenuSlot {
    pub meal: Option<MealRow>,
    pub alternates: Vec<MealRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyMenu {
    pub menu_date: String,
    pub starter: MenuSlot,
    pub main: MenuSlot,
    pub dessert: MenuSlot,
    pub cheese: MenuSlot,
    pub wine: MenuSlot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyMenuOutcome {
    pub menu: DailyMenu,
    pub freshly_generated: bool,
    pub current_streak: i64,
    pub xp_gained: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub current: i64,
    pub longest: i64,
    pub last_quiz_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub level: i64,
    pub total_xp: i64,
    pub xp_progress: i64,
    pub xp_needed: i64,
    pub progress_percent: i64,
    pub streak: StreakSummary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct XpEvent {
    pub amount: i64,
    pub reason: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaderboardKind {
    Xp,
    Streak,
    Achievements,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub level: i64,
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreferencesRow {
    pub diet: String,
    pub allergens: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostRow {
    pub id: String,
    pub user_id: String,
    pub caption: String,
    pub meal_id: Option<String>,
    pub created_at_ms: i64,
    pub likes: i64,
    pub comments: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FridgeItemRow {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub expiry_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DishSuggestion {
    pub meal: MealRow,
    pub matched_ingredients: Vec<String>,
    pub match_count: usize,
    pub match_percent: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub questions: usize,
    pub profiles: usize,
    pub achievements: usize,
    pub meals: usize,
}
