#![forbid(unsafe_code)]

use plateful_storage::{
    QuizAnswer, RegisterUserRequest, SqliteStore, StoreError, SubmitQuizRequest,
};
use rusqlite::{Connection, params};
use std::path::PathBuf;

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

fn insert_question(conn: &Connection, id: &str, tags: &str) {
    conn.execute(
        "INSERT INTO questions(id, text, category, tags) VALUES (?1, ?2, 'taste', ?3)",
        params![id, format!("question {id}"), tags],
    )
    .expect("insert question");
}

fn insert_profile(conn: &Connection, id: &str, tags: &str) {
    conn.execute(
        "INSERT INTO profiles(id, name, description, tags, rarity) \
         VALUES (?1, ?2, 'profile', ?3, 'common')",
        params![id, format!("Profile {id}"), tags],
    )
    .expect("insert profile");
}

fn liked(question_id: &str) -> QuizAnswer {
    QuizAnswer {
        question_id: question_id.to_string(),
        liked: true,
    }
}

#[test]
fn duplicate_email_is_rejected() {
    let storage_dir = temp_dir("duplicate_email_is_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    let err = store
        .register_user(RegisterUserRequest {
            user_id: "alice2".to_string(),
            email: "ALICE@example.com".to_string(),
            username: "someone_else".to_string(),
            password_hash: "x".to_string(),
            created_at_ms: 2_000,
        })
        .expect_err("expected conflict");
    assert!(matches!(err, StoreError::UserAlreadyExists));
}

#[test]
fn highest_tag_overlap_wins() {
    let storage_dir = temp_dir("highest_tag_overlap_wins");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    {
        let conn = raw(&storage_dir);
        insert_question(&conn, "q1", "spicy,thai");
        insert_question(&conn, "q2", "spicy,sweet");
        insert_profile(&conn, "adventurer", "spicy,exotic");
        insert_profile(&conn, "dessert_fan", "sweet");
    }

    let outcome = store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![liked("q1"), liked("q2")],
            now_ms: 5_000,
        })
        .expect("submit quiz");

    // Counts are {spicy: 2, thai: 1, sweet: 1}; adventurer scores 2,
    // dessert_fan scores 1.
    assert_eq!(outcome.profile.id, "adventurer");
    assert_eq!(outcome.score, 2);
    assert_eq!(outcome.xp_gained, 50);
}

#[test]
fn ties_break_to_catalog_order() {
    let storage_dir = temp_dir("ties_break_to_catalog_order");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    {
        let conn = raw(&storage_dir);
        insert_question(&conn, "q1", "spicy");
        insert_profile(&conn, "first", "spicy");
        insert_profile(&conn, "second", "spicy");
    }

    let outcome = store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![liked("q1")],
            now_ms: 5_000,
        })
        .expect("submit quiz");
    assert_eq!(outcome.profile.id, "first");
    assert_eq!(outcome.score, 1);
}

#[test]
fn zero_liked_answers_assign_the_first_profile() {
    let storage_dir = temp_dir("zero_liked_answers_assign_the_first_profile");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    {
        let conn = raw(&storage_dir);
        insert_question(&conn, "q1", "spicy");
        insert_profile(&conn, "first", "spicy");
        insert_profile(&conn, "second", "sweet");
    }

    let outcome = store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![QuizAnswer {
                question_id: "q1".to_string(),
                liked: false,
            }],
            now_ms: 5_000,
        })
        .expect("submit quiz");
    assert_eq!(outcome.profile.id, "first");
    assert_eq!(outcome.score, 0);
}

#[test]
fn resubmission_overwrites_answers_and_assignment() {
    let storage_dir = temp_dir("resubmission_overwrites_answers_and_assignment");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    {
        let conn = raw(&storage_dir);
        insert_question(&conn, "q1", "spicy");
        insert_question(&conn, "q2", "sweet");
        insert_profile(&conn, "hot", "spicy");
        insert_profile(&conn, "sugar", "sweet");
    }

    store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![liked("q1")],
            now_ms: 5_000,
        })
        .expect("first submission");

    // Flip the first answer and like the second; the profile recomputes
    // from the full updated answer set.
    let outcome = store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![
                QuizAnswer {
                    question_id: "q1".to_string(),
                    liked: false,
                },
                liked("q2"),
            ],
            now_ms: 6_000,
        })
        .expect("second submission");
    assert_eq!(outcome.profile.id, "sugar");

    let assigned = store
        .assigned_profile("alice")
        .expect("assigned profile")
        .expect("assignment exists");
    assert_eq!(assigned.profile.id, "sugar");
    assert_eq!(assigned.assigned_at_ms, 6_000);

    // One user_profiles row, not two.
    let conn = raw(&storage_dir);
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM user_profiles WHERE user_id='alice'",
            [],
            |row| row.get(0),
        )
        .expect("count assignments");
    assert_eq!(rows, 1);
}

#[test]
fn quiz_awards_xp_with_history_entry() {
    let storage_dir = temp_dir("quiz_awards_xp_with_history_entry");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    {
        let conn = raw(&storage_dir);
        insert_question(&conn, "q1", "spicy");
        insert_profile(&conn, "hot", "spicy");
    }

    store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![liked("q1")],
            now_ms: 5_000,
        })
        .expect("submit quiz");

    let stats = store.user_stats("alice").expect("stats");
    assert_eq!(stats.total_xp, 50);
    assert_eq!(stats.level, 1);

    let history = store.xp_history("alice", 10).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, 50);
    assert_eq!(history[0].reason, "quiz_completed");
}

#[test]
fn empty_answers_are_rejected_before_any_write() {
    let storage_dir = temp_dir("empty_answers_are_rejected_before_any_write");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    let err = store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![],
            now_ms: 5_000,
        })
        .expect_err("expected rejection");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let stats = store.user_stats("alice").expect("stats");
    assert_eq!(stats.total_xp, 0);
}

#[test]
fn unknown_question_rolls_the_submission_back() {
    let storage_dir = temp_dir("unknown_question_rolls_the_submission_back");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    register(&mut store, "alice");

    {
        let conn = raw(&storage_dir);
        insert_question(&conn, "q1", "spicy");
        insert_profile(&conn, "hot", "spicy");
    }

    let err = store
        .submit_quiz(SubmitQuizRequest {
            user_id: "alice".to_string(),
            answers: vec![liked("q1"), liked("q_missing")],
            now_ms: 5_000,
        })
        .expect_err("expected unknown question");
    assert!(matches!(err, StoreError::UnknownId));

    // Nothing persisted, including the valid first answer.
    let conn = raw(&storage_dir);
    let answers: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM user_answers WHERE user_id='alice'",
            [],
            |row| row.get(0),
        )
        .expect("count answers");
    assert_eq!(answers, 0);
    assert_eq!(store.user_stats("alice").expect("stats").total_xp, 0);
}
