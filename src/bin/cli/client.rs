use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use std::path::Path;
use storeboard::auth::USER_ID_HEADER;
use storeboard::dto::{
    BoardDetail, BoardPage, CommentView, CreateCommentDto, CreateStoreDto, CreateUserDto,
    ReviewDto, UpdateBoardDto,
};
use storeboard::models::{Board, Review, Store, User};
use thiserror::Error;

/// Error type for CLI client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server returned an error status with a message body
    #[error("Server error ({}): {message}", status.as_u16())]
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    #[error(transparent)]
    Request(reqwest::Error),
    /// A local file could not be read
    #[error(transparent)]
    Io(std::io::Error),
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// The text fields of a new board
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub region: String,
    pub title: String,
    pub content: String,
    pub meet_date: String,
    pub store_id: Option<String>,
}

/// HTTP client wrapper for communicating with the Storeboard server
pub struct StoreboardClient {
    /// The base URL of the server (e.g. "http://localhost:3000")
    base_url: String,
    /// User id forwarded in the authentication header, if any
    user_id: Option<String>,
    /// The underlying HTTP client
    client: Client,
}

impl StoreboardClient {
    /// Creates a new client acting as `user_id` when one is given
    pub fn new(base_url: String, user_id: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.user_id {
            Some(user_id) => builder.header(USER_ID_HEADER, user_id),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        builder.send().await.map_err(ClientError::Request)?.check().await
    }

    // ── Board endpoints ──────────────────────────────────────────────

    /// Fetches one page of the board listing
    pub async fn list_boards(
        &self,
        page_no: Option<i64>,
        count_per_page: Option<i64>,
    ) -> Result<BoardPage, ClientError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(page_no) = page_no {
            params.push(("pageNo", page_no.to_string()));
        }
        if let Some(count_per_page) = count_per_page {
            params.push(("countPerPage", count_per_page.to_string()));
        }
        let response = Self::send(self.request(Method::GET, "/boards").query(&params)).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Finds the boards in a region
    pub async fn search_boards(&self, region: &str) -> Result<Vec<Board>, ClientError> {
        let builder = self
            .request(Method::GET, "/boards/search")
            .query(&[("value", region)]);
        let response = Self::send(builder).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Fetches a board with its comments
    pub async fn get_board(&self, id: &str) -> Result<BoardDetail, ClientError> {
        let response = Self::send(self.request(Method::GET, &format!("/boards/{}", id))).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Posts a board with the image at `image_path`
    pub async fn create_board(&self, board: NewBoard, image_path: &Path) -> Result<Board, ClientError> {
        let bytes = tokio::fs::read(image_path).await.map_err(ClientError::Io)?;
        let file_name = image_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        let mut form = Form::new()
            .text("region", board.region)
            .text("title", board.title)
            .text("content", board.content)
            .text("meetDate", board.meet_date)
            .part("image", Part::bytes(bytes).file_name(file_name));
        if let Some(store_id) = board.store_id {
            form = form.text("storeId", store_id);
        }

        let response = Self::send(self.request(Method::POST, "/boards").multipart(form)).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Changes the given fields of a board
    pub async fn edit_board(&self, id: &str, changes: &UpdateBoardDto) -> Result<Board, ClientError> {
        let builder = self
            .request(Method::PATCH, &format!("/boards/{}", id))
            .json(changes);
        let response = Self::send(builder).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Deletes a board
    pub async fn delete_board(&self, id: &str) -> Result<(), ClientError> {
        Self::send(self.request(Method::DELETE, &format!("/boards/{}", id))).await?;
        Ok(())
    }

    // ── Comment endpoints ────────────────────────────────────────────

    /// Comments on a board
    pub async fn create_comment(&self, board_id: &str, content: String) -> Result<CommentView, ClientError> {
        let dto = CreateCommentDto {
            content: Some(content),
        };
        let builder = self
            .request(Method::POST, &format!("/boards/{}/comments", board_id))
            .json(&dto);
        let response = Self::send(builder).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Fetches a comment
    pub async fn get_comment(&self, id: &str) -> Result<CommentView, ClientError> {
        let response = Self::send(self.request(Method::GET, &format!("/comments/{}", id))).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Deletes a comment
    pub async fn delete_comment(&self, id: &str) -> Result<(), ClientError> {
        Self::send(self.request(Method::DELETE, &format!("/comments/{}", id))).await?;
        Ok(())
    }

    // ── Review endpoints ─────────────────────────────────────────────

    /// Fetches a review; `None` if it does not exist
    pub async fn get_review(&self, id: &str) -> Result<Option<Review>, ClientError> {
        let response = Self::send(self.request(Method::GET, &format!("/reviews/{}", id))).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Lists the reviews of a store
    pub async fn list_store_reviews(&self, store_id: &str) -> Result<Vec<Review>, ClientError> {
        let path = format!("/stores/{}/reviews", store_id);
        let response = Self::send(self.request(Method::GET, &path)).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Reviews a store
    pub async fn create_review(&self, store_id: &str, grade: i32, content: String) -> Result<Review, ClientError> {
        let dto = ReviewDto {
            grade: Some(grade),
            content: Some(content),
        };
        let builder = self
            .request(Method::POST, &format!("/stores/{}/reviews", store_id))
            .json(&dto);
        let response = Self::send(builder).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Changes a review, returning the store with its adjusted rating
    pub async fn edit_review(&self, id: &str, grade: i32, content: String) -> Result<Store, ClientError> {
        let dto = ReviewDto {
            grade: Some(grade),
            content: Some(content),
        };
        let builder = self
            .request(Method::PUT, &format!("/reviews/{}", id))
            .json(&dto);
        let response = Self::send(builder).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Deletes a review
    pub async fn delete_review(&self, id: &str) -> Result<(), ClientError> {
        Self::send(self.request(Method::DELETE, &format!("/reviews/{}", id))).await?;
        Ok(())
    }

    // ── Store and user endpoints ─────────────────────────────────────

    /// Registers a store
    pub async fn create_store(&self, name: String) -> Result<Store, ClientError> {
        let builder = self
            .request(Method::POST, "/stores")
            .json(&CreateStoreDto { name });
        let response = Self::send(builder).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Fetches a store
    pub async fn get_store(&self, id: &str) -> Result<Store, ClientError> {
        let response = Self::send(self.request(Method::GET, &format!("/stores/{}", id))).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Registers a user profile
    pub async fn create_user(
        &self,
        nickname: String,
        name: String,
        profile_image: Option<String>,
    ) -> Result<User, ClientError> {
        let dto = CreateUserDto {
            nickname,
            name,
            profile_image,
        };
        let response = Self::send(self.request(Method::POST, "/users").json(&dto)).await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Fetches a user profile
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        let response = Self::send(self.request(Method::GET, &format!("/users/{}", id))).await?;
        response.json().await.map_err(ClientError::Request)
    }
}
