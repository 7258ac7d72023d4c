#![forbid(unsafe_code)]

use plateful_core::menu::{Course, Diet};
use plateful_storage::{
    DailyMenuRequest, MenuSlot, RegisterUserRequest, RngCoursePicker, SetPreferencesRequest,
    SqliteStore, StoreError, SwapMenuSlotRequest,
};
use rusqlite::{Connection, params};
use std::path::PathBuf;
use time::Date;
use time::macros::date;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("plateful_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn raw(storage_dir: &PathBuf) -> Connection {
    Connection::open(storage_dir.join("plateful.db")).expect("open raw connection")
}

fn register(store: &mut SqliteStore, user_id: &str) {
    store
        .register_user(RegisterUserRequest {
            user_id: user_id.to_string(),
            email: format!("{user_id}@example.com"),
            username: user_id.to_string(),
            password_hash: "x".to_string(),
            created_at_ms: 1_000,
        })
        .expect("register user");
}

fn menu_request(user_id: &str, day: Date) -> DailyMenuRequest {
    DailyMenuRequest {
        user_id: user_id.to_string(),
        day,
        budget: None,
        include_cheese: false,
        include_wine: false,
        now_ms: 5_000,
    }
}

fn insert_meal(conn: &Connection, id: &str, course: &str, vegan: bool) {
    conn.execute(
        "INSERT INTO meals(id, type, name, description, tags, cuisine, is_vegetarian, is_vegan) \
         VALUES (?1, ?2, ?3, 'test meal', 'test', 'french', ?4, ?4)",
        params![id, course, format!("Meal {id}"), vegan],
    )
    .expect("insert meal");
}

fn slot_is_vegan(slot: &MenuSlot) -> bool {
    slot.meal.iter().all(|meal| meal.is_vegan)
        && slot.alternates.iter().all(|meal| meal.is_vegan)
}

#[test]
fn same_day_request_returns_the_stored_menu() {
    let storage_dir = temp_dir("same_day_request_returns_the_stored_menu");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    store.seed_reference_data().expect("seed");

    let day = date!(2025 - 06 - 01);
    let mut picker = RngCoursePicker::seeded(7);
    let first = store
        .generate_daily_menu(menu_request("alice", day), &mut picker)
        .expect("first generation");
    assert!(first.freshly_generated);
    assert_eq!(first.current_streak, 1);
    assert_eq!(first.xp_gained, 25);

    let mut picker = RngCoursePicker::seeded(999);
    let second = store
        .generate_daily_menu(menu_request("alice", day), &mut picker)
        .expect("same-day replay");
    assert!(!second.freshly_generated);
    assert_eq!(second.xp_gained, 0);
    assert_eq!(
        second.menu.main.meal.as_ref().map(|meal| meal.id.clone()),
        first.menu.main.meal.as_ref().map(|meal| meal.id.clone())
    );

    // The replay changed neither XP nor streak.
    let stats = store.user_stats("alice").expect("stats");
    assert_eq!(stats.total_xp, 25);
    assert_eq!(stats.streak.current, 1);
}

#[test]
fn consecutive_days_build_the_streak_and_xp() {
    let storage_dir = temp_dir("consecutive_days_build_the_streak_and_xp");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    // The streak accounting is independent of the catalog; an empty meal
    // table just yields empty slots.
    let mut day = date!(2025 - 06 - 01);
    let mut expected_xp = 0;
    for streak in 1..=8 {
        let mut picker = RngCoursePicker::seeded(streak as u64);
        let outcome = store
            .generate_daily_menu(menu_request("alice", day), &mut picker)
            .expect("generate");
        assert_eq!(outcome.current_streak, streak);
        let bonus = if streak > 1 { 5 * streak.min(10) } else { 0 };
        assert_eq!(outcome.xp_gained, 25 + bonus);
        expected_xp += 25 + bonus;
        day = day.next_day().expect("next day");
    }

    let stats = store.user_stats("alice").expect("stats");
    assert_eq!(stats.streak.current, 8);
    assert_eq!(stats.streak.longest, 8);
    assert_eq!(stats.total_xp, expected_xp);
    // 25 + sum over days 2..=8 of (25 + 5n).
    assert_eq!(expected_xp, 375);
}

#[test]
fn a_skipped_day_resets_the_streak() {
    let storage_dir = temp_dir("a_skipped_day_resets_the_streak");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    let mut picker = RngCoursePicker::seeded(1);
    store
        .generate_daily_menu(menu_request("alice", date!(2025 - 06 - 01)), &mut picker)
        .expect("day one");
    store
        .generate_daily_menu(menu_request("alice", date!(2025 - 06 - 02)), &mut picker)
        .expect("day two");
    let outcome = store
        .generate_daily_menu(menu_request("alice", date!(2025 - 06 - 10)), &mut picker)
        .expect("after gap");

    assert_eq!(outcome.current_streak, 1);
    let stats = store.user_stats("alice").expect("stats");
    assert_eq!(stats.streak.current, 1);
    assert_eq!(stats.streak.longest, 2);
}

#[test]
fn vegan_preference_filters_every_slot_and_alternate() {
    let storage_dir = temp_dir("vegan_preference_filters_every_slot_and_alternate");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    store.seed_reference_data().expect("seed");
    store
        .set_preferences(SetPreferencesRequest {
            user_id: "alice".to_string(),
            diet: Diet::Vegan,
            allergens: vec![],
        })
        .expect("set preferences");

    for seed in 0..20 {
        let storage_day = date!(2025 - 06 - 01)
            .checked_add(time::Duration::days(seed))
            .expect("date");
        let mut picker = RngCoursePicker::seeded(seed as u64);
        let outcome = store
            .generate_daily_menu(menu_request("alice", storage_day), &mut picker)
            .expect("generate");
        for slot in [
            &outcome.menu.starter,
            &outcome.menu.main,
            &outcome.menu.dessert,
        ] {
            assert!(slot.meal.is_some(), "vegan candidates exist in the catalog");
            assert!(slot_is_vegan(slot), "non-vegan meal leaked through");
        }
        // Cheese and wine were not requested.
        assert!(outcome.menu.cheese.meal.is_none());
        assert!(outcome.menu.wine.meal.is_none());
    }
}

#[test]
fn alternates_exclude_the_chosen_meal() {
    let storage_dir = temp_dir("alternates_exclude_the_chosen_meal");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    {
        let conn = raw(&storage_dir);
        for index in 0..6 {
            insert_meal(&conn, &format!("main_{index}"), "main", false);
        }
    }

    let mut picker = RngCoursePicker::seeded(42);
    let outcome = store
        .generate_daily_menu(menu_request("alice", date!(2025 - 06 - 01)), &mut picker)
        .expect("generate");
    let chosen = outcome.menu.main.meal.expect("chosen main");
    assert_eq!(outcome.menu.main.alternates.len(), 3);
    assert!(
        outcome
            .menu
            .main
            .alternates
            .iter()
            .all(|alternate| alternate.id != chosen.id)
    );

    // The stored menu reloads with the same alternates.
    let reloaded = store
        .daily_menu("alice", date!(2025 - 06 - 01))
        .expect("load")
        .expect("menu exists");
    let reloaded_ids: Vec<&str> = reloaded
        .main
        .alternates
        .iter()
        .map(|meal| meal.id.as_str())
        .collect();
    let original_ids: Vec<&str> = outcome
        .menu
        .main
        .alternates
        .iter()
        .map(|meal| meal.id.as_str())
        .collect();
    assert_eq!(reloaded_ids, original_ids);
}

#[test]
fn empty_candidate_set_yields_empty_slots() {
    let storage_dir = temp_dir("empty_candidate_set_yields_empty_slots");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    let mut picker = RngCoursePicker::seeded(3);
    let outcome = store
        .generate_daily_menu(menu_request("alice", date!(2025 - 06 - 01)), &mut picker)
        .expect("generate");
    assert!(outcome.freshly_generated);
    assert!(outcome.menu.starter.meal.is_none());
    assert!(outcome.menu.starter.alternates.is_empty());
    assert!(outcome.menu.main.meal.is_none());
    assert_eq!(outcome.xp_gained, 25);
}

#[test]
fn swap_replaces_one_slot_without_revalidation() {
    let storage_dir = temp_dir("swap_replaces_one_slot_without_revalidation");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    {
        let conn = raw(&storage_dir);
        insert_meal(&conn, "main_a", "main", false);
        insert_meal(&conn, "main_b", "main", false);
    }

    let day = date!(2025 - 06 - 01);
    let mut picker = RngCoursePicker::seeded(11);
    store
        .generate_daily_menu(menu_request("alice", day), &mut picker)
        .expect("generate");

    let swapped = store
        .swap_menu_slot(SwapMenuSlotRequest {
            user_id: "alice".to_string(),
            day,
            course: Course::Main,
            meal_id: "main_b".to_string(),
        })
        .expect("swap");
    assert_eq!(swapped.id, "main_b");

    let menu = store
        .daily_menu("alice", day)
        .expect("load")
        .expect("menu exists");
    assert_eq!(menu.main.meal.expect("main slot").id, "main_b");
}

#[test]
fn swap_requires_an_existing_menu_and_meal() {
    let storage_dir = temp_dir("swap_requires_an_existing_menu_and_meal");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    {
        let conn = raw(&storage_dir);
        insert_meal(&conn, "main_a", "main", false);
    }

    // No menu generated for this day.
    let err = store
        .swap_menu_slot(SwapMenuSlotRequest {
            user_id: "alice".to_string(),
            day: date!(2025 - 06 - 01),
            course: Course::Main,
            meal_id: "main_a".to_string(),
        })
        .expect_err("expected missing menu");
    assert!(matches!(err, StoreError::UnknownId));

    let day = date!(2025 - 06 - 02);
    let mut picker = RngCoursePicker::seeded(1);
    store
        .generate_daily_menu(menu_request("alice", day), &mut picker)
        .expect("generate");
    let err = store
        .swap_menu_slot(SwapMenuSlotRequest {
            user_id: "alice".to_string(),
            day,
            course: Course::Main,
            meal_id: "no_such_meal".to_string(),
        })
        .expect_err("expected missing meal");
    assert!(matches!(err, StoreError::UnknownId));
}

#[test]
fn unknown_user_cannot_generate_a_menu() {
    let storage_dir = temp_dir("unknown_user_cannot_generate_a_menu");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let mut picker = RngCoursePicker::seeded(1);
    let err = store
        .generate_daily_menu(menu_request("ghost", date!(2025 - 06 - 01)), &mut picker)
        .expect_err("expected unknown user");
    assert!(matches!(err, StoreError::UnknownUser));
}
