#![forbid(unsafe_code)]

use plateful_core::menu::{Budget, Course, Diet};
use time::Date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetPreferencesRequest {
    pub user_id: String,
    pub diet: Diet,
    pub allergens: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizAnswer {
    pub question_id: String,
    pub liked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitQuizRequest {
    pub user_id: String,
    pub answers: Vec<QuizAnswer>,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuestionsRequest {
    pub count: usize,
    pub category: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyMenuRequest {
    pub user_id: String,
    pub day: Date,
    pub budget: Option<Budget>,
    pub include_cheese: bool,
    pub include_wine: bool,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapMenuSlotRequest {
    pub user_id: String,
    pub day: Date,
    pub course: Course,
    pub meal_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub post_id: String,
    pub user_id: String,
    pub caption: String,
    pub meal_id: Option<String>,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub comment_id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AddFridgeItemRequest {
    pub item_id: String,
    pub user_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub expiry_date: Option<Date>,
}
