use axum::extract::Request;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use gridgate_core::{AccessToken, AppError};

use crate::error::ApiResult;

/// Requires a bearer token on the request and exposes it to handlers.
///
/// The token is not validated here; it is forwarded to the remote API, which
/// is the authority on token validity.
pub async fn require_bearer_token(mut request: Request, next: Next) -> ApiResult<Response> {
    let token = bearer_token(request.headers())?;
    request.extensions_mut().insert(token);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<AccessToken, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("bearer token required".to_owned()))?;

    let raw = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("authorization scheme must be Bearer".to_owned()))?;

    AccessToken::new(raw)
        .map_err(|_| AppError::Unauthorized("bearer token must not be empty".to_owned()))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use axum::http::header::AUTHORIZATION;

    use super::bearer_token;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(parsed) = value.parse() {
            headers.insert(AUTHORIZATION, parsed);
        }
        headers
    }

    #[test]
    fn accepts_bearer_scheme() {
        let token = bearer_token(&headers_with("Bearer abc123"));
        assert_eq!(token.ok().as_ref().map(|t| t.as_str()), Some("abc123"));
    }

    #[test]
    fn rejects_missing_header() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_other_schemes_and_blank_tokens() {
        assert!(bearer_token(&headers_with("Basic abc123")).is_err());
        assert!(bearer_token(&headers_with("Bearer    ")).is_err());
    }
}
