use axum::{middleware::Next, response::Response};
use sqlx::PgPool;
use tracing::debug;

use crate::domains::auth::Key;

/// Authenticated credential resolved from the x-apikey header
#[derive(Clone, Debug)]
pub struct AuthKey {
    pub apikey: String,
    pub email: String,
}

/// API key authentication middleware
///
/// Reads the `x-apikey` header, resolves it against the keys table, and adds
/// an [`AuthKey`] to the request extensions. With no header or an unknown
/// key the request continues unauthenticated; handlers that need identity
/// reject it themselves.
pub async fn api_key_auth_middleware(
    pool: PgPool,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_api_key(&request) {
        Some(apikey) => match Key::find_by_apikey(&apikey, &pool).await {
            Ok(Some(key)) => {
                debug!(email = %key.email, "Authenticated API key");
                request.extensions_mut().insert(AuthKey {
                    apikey: key.apikey,
                    email: key.email,
                });
            }
            Ok(None) => debug!("Unknown API key"),
            Err(e) => tracing::error!(error = %e, "API key lookup failed"),
        },
        None => debug!("No API key header"),
    }

    next.run(request).await
}

/// Extract the raw API key from the request headers
fn extract_api_key(request: &axum::http::Request<axum::body::Body>) -> Option<String> {
    let header = request.headers().get("x-apikey")?;
    let value = header.to_str().ok()?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_api_key_present() {
        let request = axum::http::Request::builder()
            .header("x-apikey", "abc123")
            .body(axum::body::Body::empty())
            .unwrap();

        assert_eq!(extract_api_key(&request), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_api_key_missing() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert_eq!(extract_api_key(&request), None);
    }

    #[test]
    fn test_extract_api_key_empty_value() {
        let request = axum::http::Request::builder()
            .header("x-apikey", "")
            .body(axum::body::Body::empty())
            .unwrap();

        assert_eq!(extract_api_key(&request), None);
    }
}
