use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header the authentication gateway uses to forward the verified user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller's user id, if the request was authenticated
///
/// Authentication happens upstream; this extractor only reads the id the
/// gateway forwarded. A missing, empty or non-UTF-8 header yields `None`, and
/// each handler decides whether an anonymous caller is acceptable.
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user_id): CurrentUser) -> String {
///     user_id.unwrap_or_else(|| "anonymous".to_string())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Option<String>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(CurrentUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> CurrentUser {
        let (mut parts, _) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_reads_forwarded_user_id() {
        let request = Request::builder()
            .header("X-User-Id", "user-1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, CurrentUser(Some("user-1".to_string())));
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_is_anonymous() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, CurrentUser(None));

        let request = Request::builder().header("X-User-Id", "  ").body(()).unwrap();
        assert_eq!(extract(request).await, CurrentUser(None));
    }
}
