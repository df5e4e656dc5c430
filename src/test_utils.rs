use crate::*;
use crate::models::{Board, BoardDraft, Store, User};
use chrono::NaiveDate;
use diesel::sql_types::Text;
use diesel::prelude::*;
use diesel::QueryableByName;
use proptest::prelude::*;
use std::ops::Range;
use std::sync::Arc;

/// Sets up a test database with migrations applied
///
/// Each call gets its own shared in-memory database, so every connection in
/// the returned pool sees the same schema while tests stay isolated.
pub fn setup_test_db() -> Arc<db::DbPool> {
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");

    Arc::new(pool)
}

/// Sets up a file-backed test database inside `dir`
///
/// Shared-cache memory databases use table locks that ignore the busy
/// timeout, so tests that race writers need a real file.
pub fn setup_file_db(dir: &std::path::Path) -> Arc<db::DbPool> {
    let database_url = dir.join("test.sqlite3");
    let pool = db::init_pool(&database_url.to_string_lossy()).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");

    Arc::new(pool)
}

/// Inserts a user with the given nickname
pub async fn seed_user(pool: &db::DbPool, nickname: &str) -> User {
    repo::create_user(pool, nickname.to_string(), format!("{} name", nickname), None)
        .await
        .unwrap()
}

/// Inserts a store with the given name
pub async fn seed_store(pool: &db::DbPool, name: &str) -> Store {
    repo::create_store(pool, name.to_string()).await.unwrap()
}

/// A board draft in `region` meeting on 2024-03-09
pub fn sample_draft(region: &str) -> BoardDraft {
    BoardDraft {
        store_id: None,
        title: format!("Meetup in {}", region),
        content: "Anyone around?".to_string(),
        meet_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        region: region.to_string(),
    }
}

/// Inserts a board owned by `user_id` in `region`
pub async fn seed_board(pool: &db::DbPool, user_id: &str, region: &str) -> Board {
    let board = Board::new(
        user_id.to_string(),
        sample_draft(region),
        "/uploads/seed.png".to_string(),
    );
    repo::create_board(pool, board).await.unwrap()
}

#[derive(QueryableByName, Debug)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

#[tokio::test]
async fn test_setup_test_db() {
    let pool = setup_test_db();
    let mut conn = pool.get().unwrap();

    let table_names: Vec<TableName> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type='table'")
            .load(&mut conn)
            .expect("Failed to load table names");

    let expected_tables = [
        "users",
        "stores",
        "boards",
        "comments",
        "reviews",
        "__diesel_schema_migrations",
    ];
    for table in expected_tables {
        assert!(
            table_names.iter().any(|t| t.name == table),
            "Table '{}' not found in database",
            table
        );
    }
}

#[tokio::test]
async fn test_setup_test_db_is_isolated() {
    let first = setup_test_db();
    let second = setup_test_db();

    seed_user(&first, "only-here").await;

    let mut conn = second.get().unwrap();
    let count: i64 = crate::schema::users::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 0);
}

/// Generates a valid star grade
pub fn arb_grade() -> impl Strategy<Value = i32> {
    rating::MIN_GRADE..=rating::MAX_GRADE
}

/// Generates a list of valid star grades with a length in `size`
pub fn arb_grades(size: Range<usize>) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(arb_grade(), size)
}

/// Generates strings that mix plain text, whitespace, punctuation and
/// non-ASCII characters
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 ]{0,20}",
        "[-_./:\\\\ ]{0,10}",
        "\\PC{0,20}",
    ]
}
