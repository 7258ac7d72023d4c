#![forbid(unsafe_code)]

use plateful_storage::{
    AddCommentRequest, AddFridgeItemRequest, CreatePostRequest, RegisterUserRequest, SqliteStore,
    StoreError,
};
use rusqlite::{Connection, params};
use std::path::PathBuf;
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

fn post(store: &mut SqliteStore, user_id: &str, post_id: &str) {
    store
        .create_post(CreatePostRequest {
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            caption: "tonight's plate".to_string(),
            meal_id: None,
            now_ms: 5_000,
        })
        .expect("create post");
}

fn fridge_item(user_id: &str, item_id: &str, name: &str) -> AddFridgeItemRequest {
    AddFridgeItemRequest {
        item_id: item_id.to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        quantity: 1.0,
        unit: "unit".to_string(),
        category: "other".to_string(),
        expiry_date: None,
    }
}

#[test]
fn posting_awards_xp_without_a_history_entry() {
    let storage_dir = temp_dir("posting_awards_xp_without_a_history_entry");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    post(&mut store, "alice", "p1");
    assert_eq!(store.user_stats("alice").expect("stats").total_xp, 10);
    assert!(store.xp_history("alice", 10).expect("history").is_empty());
    assert_eq!(store.post_count("alice").expect("count"), 1);
}

#[test]
fn only_the_author_can_delete_a_post() {
    let storage_dir = temp_dir("only_the_author_can_delete_a_post");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    register(&mut store, "bob");
    post(&mut store, "alice", "p1");

    let err = store
        .delete_post("bob", "p1")
        .expect_err("expected ownership check");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    store
        .toggle_like("bob", "p1", 6_000)
        .expect("like before delete");
    store
        .add_comment(AddCommentRequest {
            comment_id: "c1".to_string(),
            post_id: "p1".to_string(),
            user_id: "bob".to_string(),
            content: "looks great".to_string(),
            now_ms: 6_000,
        })
        .expect("comment before delete");

    store.delete_post("alice", "p1").expect("author delete");
    assert_eq!(store.post_count("alice").expect("count"), 0);

    // Likes and comments cascade with the post.
    let conn = raw(&storage_dir);
    let likes: i64 = conn
        .query_row("SELECT COUNT(*) FROM likes", [], |row| row.get(0))
        .expect("count likes");
    let comments: i64 = conn
        .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))
        .expect("count comments");
    assert_eq!(likes, 0);
    assert_eq!(comments, 0);
}

#[test]
fn likes_and_follows_toggle() {
    let storage_dir = temp_dir("likes_and_follows_toggle");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    register(&mut store, "bob");
    post(&mut store, "alice", "p1");

    assert!(store.toggle_like("bob", "p1", 6_000).expect("first toggle"));
    assert!(!store.toggle_like("bob", "p1", 6_500).expect("second toggle"));
    assert!(store.toggle_like("bob", "p1", 7_000).expect("third toggle"));

    assert!(store.toggle_follow("bob", "alice", 6_000).expect("follow"));
    assert_eq!(store.follower_count("alice").expect("followers"), 1);
    assert_eq!(store.following_count("bob").expect("following"), 1);
    assert!(!store.toggle_follow("bob", "alice", 7_000).expect("unfollow"));
    assert_eq!(store.follower_count("alice").expect("followers"), 0);

    let err = store
        .toggle_follow("alice", "alice", 8_000)
        .expect_err("expected self-follow rejection");
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[test]
fn posts_list_with_like_and_comment_counts() {
    let storage_dir = temp_dir("posts_list_with_like_and_comment_counts");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    register(&mut store, "bob");
    post(&mut store, "alice", "p1");
    store.toggle_like("bob", "p1", 6_000).expect("like");
    store
        .add_comment(AddCommentRequest {
            comment_id: "c1".to_string(),
            post_id: "p1".to_string(),
            user_id: "bob".to_string(),
            content: "recipe please".to_string(),
            now_ms: 6_000,
        })
        .expect("comment");

    let posts = store.list_posts("alice", 10).expect("list posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].likes, 1);
    assert_eq!(posts[0].comments, 1);

    let comments = store.list_comments("p1").expect("list comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "recipe please");
}

#[test]
fn blank_comments_are_rejected() {
    let storage_dir = temp_dir("blank_comments_are_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    post(&mut store, "alice", "p1");

    let err = store
        .add_comment(AddCommentRequest {
            comment_id: "c1".to_string(),
            post_id: "p1".to_string(),
            user_id: "alice".to_string(),
            content: "   ".to_string(),
            now_ms: 6_000,
        })
        .expect_err("expected rejection");
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[test]
fn fridge_items_round_trip_and_expire() {
    let storage_dir = temp_dir("fridge_items_round_trip_and_expire");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    let mut milk = fridge_item("alice", "f1", "milk");
    milk.expiry_date = Some(date!(2025 - 06 - 03));
    store.add_fridge_item(milk).expect("add milk");
    let mut rice = fridge_item("alice", "f2", "rice");
    rice.expiry_date = Some(date!(2025 - 12 - 01));
    store.add_fridge_item(rice).expect("add rice");

    let items = store.list_fridge_items("alice").expect("list");
    assert_eq!(items.len(), 2);

    let expiring = store
        .expiring_items("alice", 3, date!(2025 - 06 - 01))
        .expect("expiring");
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].name, "milk");

    assert!(store.remove_fridge_item("alice", "f1").expect("remove"));
    assert!(!store.remove_fridge_item("alice", "f1").expect("remove again"));
    assert_eq!(store.list_fridge_items("alice").expect("list").len(), 1);
}

#[test]
fn suggestions_rank_by_ingredient_overlap() {
    let storage_dir = temp_dir("suggestions_rank_by_ingredient_overlap");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    {
        let conn = raw(&storage_dir);
        conn.execute(
            "INSERT INTO meals(id, type, name, description, tags, cuisine, ingredients_json) \
             VALUES ('omelette', 'main', 'Omelette', 'd', 't', 'french', \
             '[{\"name\":\"egg\"},{\"name\":\"butter\"}]')",
            [],
        )
        .expect("insert omelette");
        conn.execute(
            "INSERT INTO meals(id, type, name, description, tags, cuisine, ingredients_json) \
             VALUES ('carbonara', 'main', 'Carbonara', 'd', 't', 'italian', \
             '[{\"name\":\"egg\"},{\"name\":\"pasta\"},{\"name\":\"guanciale\"},{\"name\":\"pecorino\"}]')",
            [],
        )
        .expect("insert carbonara");
        conn.execute(
            "INSERT INTO meals(id, type, name, description, tags, cuisine, ingredients_json) \
             VALUES ('ceviche', 'starter', 'Ceviche', 'd', 't', 'peruvian', \
             '[{\"name\":\"sea bass\"},{\"name\":\"lime\"}]')",
            [],
        )
        .expect("insert ceviche");
    }

    store
        .add_fridge_item(fridge_item("alice", "f1", "eggs"))
        .expect("add eggs");
    store
        .add_fridge_item(fridge_item("alice", "f2", "butter"))
        .expect("add butter");

    let suggestions = store.fridge_suggestions("alice").expect("suggestions");
    // The ceviche shares nothing with the fridge and is dropped.
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].meal.id, "omelette");
    assert_eq!(suggestions[0].match_percent, 100);
    assert_eq!(suggestions[1].meal.id, "carbonara");
    assert_eq!(suggestions[1].match_count, 1);
}

#[test]
fn empty_fridge_yields_no_suggestions() {
    let storage_dir = temp_dir("empty_fridge_yields_no_suggestions");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");
    store.seed_reference_data().expect("seed");

    assert!(store.fridge_suggestions("alice").expect("suggestions").is_empty());
}
