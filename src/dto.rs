use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::models::{Board, BoardChanges, BoardDraft, Comment, UserSummary};
use crate::rating::validate_grade;

/// Formats a timestamp as a calendar date (`YYYY-MM-DD`)
pub fn format_date(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Formats a timestamp the way raw records serialize it
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

// ── Requests ─────────────────────────────────────────────────────────

/// Query parameters of the paged board listing
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// The 1-based page to show; defaults to 1
    pub page_no: Option<i64>,
    /// Boards per page; defaults to the configured page size
    pub count_per_page: Option<i64>,
}

/// Query parameters of the region search
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SearchQuery {
    pub value: Option<String>,
}

/// An image received with a board post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// The client-side file name, used only for its extension
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// The fields of a multipart board post as they arrive
#[derive(Debug, Default)]
pub struct BoardForm {
    pub region: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub meet_date: Option<String>,
    pub store_id: Option<String>,
    pub image: Option<UploadedImage>,
}

impl BoardForm {
    /// Records a text field by its form name; unknown names are ignored
    pub fn set_text(&mut self, name: &str, value: String) {
        match name {
            "region" => self.region = Some(value),
            "title" => self.title = Some(value),
            "content" => self.content = Some(value),
            "meetDate" => self.meet_date = Some(value),
            "storeId" => self.store_id = Some(value),
            _ => {}
        }
    }

    /// Checks that the post is complete and splits it into owner, draft and image
    ///
    /// ### Errors
    ///
    /// - `MissingFields` listing every absent or empty required field,
    ///   including the owner and the image
    /// - `InvalidInput` if `meetDate` is not a `YYYY-MM-DD` date
    pub fn into_parts(
        self,
        user_id: Option<String>,
    ) -> Result<(String, BoardDraft, UploadedImage), ApiError> {
        let mut missing = Vec::new();
        if !present(&user_id) {
            missing.push("userId");
        }
        if !present(&self.region) {
            missing.push("region");
        }
        if !present(&self.title) {
            missing.push("title");
        }
        if !present(&self.content) {
            missing.push("content");
        }
        if !present(&self.meet_date) {
            missing.push("meetDate");
        }
        if !self.image.as_ref().is_some_and(|image| !image.bytes.is_empty()) {
            missing.push("image");
        }
        if !missing.is_empty() {
            return Err(ApiError::MissingFields(missing.join(", ")));
        }

        let (Some(user_id), Some(region), Some(title), Some(content), Some(meet_date), Some(image)) =
            (user_id, self.region, self.title, self.content, self.meet_date, self.image)
        else {
            return Err(ApiError::MissingFields("board".to_string()));
        };

        let meet_date = NaiveDate::parse_from_str(&meet_date, "%Y-%m-%d").map_err(|_| {
            ApiError::InvalidInput(format!("meetDate must be YYYY-MM-DD, got {:?}", meet_date))
        })?;

        let draft = BoardDraft {
            store_id: self.store_id.filter(|id| !id.is_empty()),
            title,
            content,
            meet_date,
            region,
        };
        Ok((user_id, draft, image))
    }
}

/// Partial board update; a key that is left out is not changed, a key that
/// is supplied is written as given (including empty strings)
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl From<UpdateBoardDto> for BoardChanges {
    fn from(dto: UpdateBoardDto) -> Self {
        BoardChanges {
            title: dto.title,
            content: dto.content,
            meet_date: dto.meet_date,
            region: dto.region,
        }
    }
}

/// Data transfer object for posting a comment under a board
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreateCommentDto {
    pub content: Option<String>,
}

/// Data transfer object for creating or editing a review
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ReviewDto {
    /// Star grade between 1 and 5
    pub grade: Option<i32>,
    pub content: Option<String>,
}

impl ReviewDto {
    /// Returns the grade and content once both are present and the grade is in range
    pub fn validate(self) -> Result<(i32, String), ApiError> {
        let mut missing = Vec::new();
        if self.grade.is_none() {
            missing.push("grade");
        }
        if !present(&self.content) {
            missing.push("content");
        }
        match (self.grade, self.content) {
            (Some(grade), Some(content)) if missing.is_empty() => {
                let grade = validate_grade(grade).map_err(ApiError::InvalidInput)?;
                Ok((grade, content))
            }
            _ => Err(ApiError::MissingFields(missing.join(", "))),
        }
    }
}

/// Data transfer object for registering a store
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateStoreDto {
    pub name: String,
}

/// Data transfer object for registering a user profile
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub nickname: String,
    pub name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

// ── Responses ────────────────────────────────────────────────────────

/// A board with its owner populated
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub id: String,
    #[serde(rename = "userId")]
    pub owner: Option<UserSummary>,
    pub store_id: Option<String>,
    pub title: String,
    pub content: String,
    pub meet_date: NaiveDate,
    pub region: String,
    pub image: String,
    pub created_at: String,
}

impl BoardView {
    /// Builds the view with `created_at` rendered by `render`
    pub fn new(
        board: &Board,
        owner: Option<UserSummary>,
        render: fn(NaiveDateTime) -> String,
    ) -> Self {
        Self {
            id: board.get_id(),
            owner,
            store_id: board.get_store_id(),
            title: board.get_title(),
            content: board.get_content(),
            meet_date: board.get_meet_date(),
            region: board.get_region(),
            image: board.get_image(),
            created_at: render(board.get_created_at()),
        }
    }
}

/// A comment with its owner populated
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    #[serde(rename = "userId")]
    pub owner: Option<UserSummary>,
    pub board_id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: NaiveDateTime,
}

impl CommentView {
    /// Builds the view with `created_at` rendered by `render`
    pub fn new(
        comment: &Comment,
        owner: Option<UserSummary>,
        render: fn(NaiveDateTime) -> String,
    ) -> Self {
        Self {
            id: comment.get_id(),
            owner,
            board_id: comment.get_board_id(),
            content: comment.get_content(),
            created_at: render(comment.get_created_at()),
            updated_at: comment.get_updated_at(),
        }
    }
}

/// Response of the board detail endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoardDetail {
    pub board: BoardView,
    pub comments: Vec<CommentView>,
}

/// Response of the paged board listing
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BoardPage {
    pub success: bool,
    pub data: Vec<BoardView>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}
