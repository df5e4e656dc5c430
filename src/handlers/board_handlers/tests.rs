use super::*;
use crate::models::BoardChanges;
use crate::repo::create_comment;
use crate::test_utils::{seed_board, seed_user, setup_test_db};
use chrono::NaiveDate;

fn listing() -> ListingDefaults {
    ListingDefaults { count_per_page: 10 }
}

fn page_query(page_no: Option<i64>, count_per_page: Option<i64>) -> Result<Query<PageQuery>, QueryRejection> {
    Ok(Query(PageQuery { page_no, count_per_page }))
}

#[tokio::test]
async fn test_get_board_detail_formats_dates() {
    let pool = setup_test_db();
    let owner = seed_user(&pool, "rabbit").await;
    let board = seed_board(&pool, &owner.get_id(), "Seoul").await;
    create_comment(&pool, "u2".to_string(), board.get_id(), "me too".to_string())
        .await
        .unwrap();

    let Json(detail) = get_board_detail_handler(State(pool.clone()), Path(board.get_id()))
        .await
        .unwrap();

    assert_eq!(detail.board.id, board.get_id());
    assert_eq!(detail.board.created_at, format_date(board.get_created_at()));
    assert_eq!(detail.board.owner.unwrap().nickname, "rabbit");
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].created_at.len(), "YYYY-MM-DD".len());
    assert!(detail.comments[0].owner.is_none());
}

#[tokio::test]
async fn test_get_missing_board_detail() {
    let pool = setup_test_db();
    let result = get_board_detail_handler(State(pool), Path("missing".to_string())).await;
    assert!(matches!(result, Err(ApiError::NotFound("Board"))));
}

#[tokio::test]
async fn test_search_without_value_matches_nothing() {
    let pool = setup_test_db();
    seed_board(&pool, "u1", "Seoul").await;

    let Json(found) = search_boards_handler(State(pool.clone()), Ok(Query(SearchQuery { value: None })))
        .await
        .unwrap();
    assert!(found.is_empty());

    let query = SearchQuery { value: Some("Seoul".to_string()) };
    let Json(found) = search_boards_handler(State(pool), Ok(Query(query))).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_list_boards_pages() {
    let pool = setup_test_db();
    for _ in 0..25 {
        seed_board(&pool, "u1", "Seoul").await;
    }

    let Json(page) = list_boards_handler(State(pool.clone()), State(listing()), page_query(Some(3), None))
        .await
        .unwrap();
    assert!(page.success);
    assert_eq!(page.current_page, 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_count, 25);
    assert_eq!(page.data.len(), 5);

    // Past the end: the last full page, still reported as the requested page
    let Json(page) = list_boards_handler(State(pool), State(listing()), page_query(Some(9), Some(10)))
        .await
        .unwrap();
    assert_eq!(page.current_page, 9);
    assert_eq!(page.data.len(), 10);
}

#[tokio::test]
async fn test_list_boards_on_empty_store() {
    let pool = setup_test_db();
    let Json(page) = list_boards_handler(State(pool), State(listing()), page_query(None, None))
        .await
        .unwrap();
    assert_eq!(page.total_pages, 0);
    assert!(page.data.is_empty());
    assert_eq!(page.current_page, 1);
}

#[tokio::test]
async fn test_list_boards_rejects_zero_page() {
    let pool = setup_test_db();
    let result = list_boards_handler(State(pool), State(listing()), page_query(Some(0), None)).await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[tokio::test]
async fn test_edit_board_by_owner() {
    let pool = setup_test_db();
    let board = seed_board(&pool, "owner", "Seoul").await;
    let payload = UpdateBoardDto {
        region: Some("Busan".to_string()),
        meet_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        ..Default::default()
    };

    let Json(updated) = edit_board_handler(
        State(pool),
        CurrentUser(Some("owner".to_string())),
        Path(board.get_id()),
        Ok(Json(payload)),
    )
    .await
    .unwrap();

    assert_eq!(updated.get_region(), "Busan");
    assert_eq!(updated.get_title(), board.get_title());
}

#[tokio::test]
async fn test_edit_board_by_stranger_is_forbidden() {
    let pool = setup_test_db();
    let board = seed_board(&pool, "owner", "Seoul").await;
    let payload = UpdateBoardDto {
        title: Some("Hijacked".to_string()),
        ..Default::default()
    };

    let result = edit_board_handler(
        State(pool.clone()),
        CurrentUser(Some("stranger".to_string())),
        Path(board.get_id()),
        Ok(Json(payload)),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Forbidden(_))));

    let stored = repo::get_board(&pool, &board.get_id()).unwrap().unwrap();
    assert_eq!(stored.get_title(), board.get_title());
}

#[tokio::test]
async fn test_edit_missing_board() {
    let pool = setup_test_db();
    let result = edit_board_handler(
        State(pool),
        CurrentUser(None),
        Path("missing".to_string()),
        Ok(Json(UpdateBoardDto::default())),
    )
    .await;
    assert!(matches!(result, Err(ApiError::NotFound("Board"))));
}

#[tokio::test]
async fn test_delete_board_requires_owner() {
    let pool = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let uploads = Arc::new(UploadStore::new(dir.path()));
    let board = seed_board(&pool, "owner", "Seoul").await;

    for user in [None, Some("stranger".to_string())] {
        let result = delete_board_handler(
            State(pool.clone()),
            State(uploads.clone()),
            CurrentUser(user),
            Path(board.get_id()),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }
    assert!(repo::get_board(&pool, &board.get_id()).unwrap().is_some());

    let status = delete_board_handler(
        State(pool.clone()),
        State(uploads),
        CurrentUser(Some("owner".to_string())),
        Path(board.get_id()),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(repo::get_board(&pool, &board.get_id()).unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_board_is_forbidden() {
    let pool = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let result = delete_board_handler(
        State(pool),
        State(Arc::new(UploadStore::new(dir.path()))),
        CurrentUser(Some("owner".to_string())),
        Path("missing".to_string()),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Forbidden(_))));
}

#[test]
fn test_update_dto_converts_to_changes() {
    let changes: BoardChanges = UpdateBoardDto {
        content: Some(String::new()),
        ..Default::default()
    }
    .into();
    assert_eq!(changes.content, Some(String::new()));
    assert!(changes.title.is_none());
}
