use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Controls bearer-token authentication for the checklist routes.
///
/// When `token` is `None` the middleware is a transparent no-op and every
/// request passes through.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
}

/// Axum middleware that requires `Authorization: Bearer <token>` when the
/// server was started with a token.
pub async fn auth_middleware(
    State(config): State<AuthConfig>,
    req: Request,
    next: Next,
) -> Response {
    let Some(token) = config.token.as_deref() else {
        return next.run(req).await;
    };

    let presented = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);
    if presented == Some(token) {
        return next.run(req).await;
    }

    tracing::debug!(path = %req.uri().path(), "rejecting request without valid bearer token");
    Response::builder()
        .status(401)
        .header("Content-Type", "application/json")
        .header("WWW-Authenticate", "Bearer")
        .body(Body::from(r#"{"error":"unauthorized"}"#))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, value) = header.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| value.trim())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn test_app(token: Option<&str>) -> Router {
        let config = AuthConfig {
            token: token.map(str::to_string),
        };
        Router::new()
            .route("/api/checklists/u1", get(ok_handler))
            .layer(middleware::from_fn_with_state(config, auth_middleware))
    }

    async fn status_with(app: Router, auth: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri("/api/checklists/u1");
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn no_token_passes_through() {
        assert_eq!(status_with(test_app(None), None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn matching_bearer_passes() {
        let status = status_with(test_app(Some("secret")), Some("Bearer secret")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn scheme_is_case_insensitive() {
        let status = status_with(test_app(Some("secret")), Some("bearer secret")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_is_401_json() {
        let resp = test_app(Some("secret"))
            .oneshot(
                Request::builder()
                    .uri("/api/checklists/u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let ct = resp
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(ct.contains("application/json"));
    }

    #[tokio::test]
    async fn wrong_token_is_401() {
        let status = status_with(test_app(Some("secret")), Some("Bearer nope")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn basic_auth_is_401() {
        let status = status_with(test_app(Some("secret")), Some("Basic c2VjcmV0")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Token abc"), None);
    }
}
