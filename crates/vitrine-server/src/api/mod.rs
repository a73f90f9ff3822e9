mod catalog;
mod recommendations;
mod sentiment;
mod summary;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use vitrine_heuristics::Engine;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    remote: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Reject `value` unless its trimmed length is within `min..=max` characters.
pub(super) fn validate_length(
    request_id: &str,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ApiError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!("{field} must be between {min} and {max} characters (got {len})"),
        ));
    }
    Ok(())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/sentiment", post(sentiment::analyze_sentiment))
        .route("/api/v1/summary", post(summary::summarize_text))
        .route(
            "/api/v1/recommendations",
            post(recommendations::recommend_products),
        )
        .route("/api/v1/catalog", get(catalog::list_catalog))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let remote = if state.engine.has_remote() {
        "configured"
    } else {
        "disabled"
    };

    ApiResponse::new(
        HealthData {
            status: "ok",
            remote,
        },
        req_id.0,
    )
}

pub fn rate_limit_state(max_requests: usize, window_secs: u64) -> RateLimitState {
    RateLimitState::new(max_requests, Duration::from_secs(window_secs))
}

#[cfg(test)]
pub(crate) fn default_rate_limit_state() -> RateLimitState {
    rate_limit_state(120, 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use vitrine_heuristics::{Catalog, MAX_CONFIDENCE, MAX_RECOMMENDATIONS};

    fn local_app() -> Router {
        build_app(
            AppState {
                engine: Arc::new(Engine::local()),
            },
            AuthState::disabled(),
            default_rate_limit_state(),
        )
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "boom", "unexpected").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validate_length_counts_characters_not_bytes() {
        // 10 characters, 20 bytes
        assert!(validate_length("r", "text", "éééééééééé", 10, 10).is_ok());
        let err = validate_length("r", "text", "  ab  ", 3, 10).unwrap_err();
        assert_eq!(err.error.code, "validation_error");
        assert!(err.error.message.contains("got 2"));
    }

    #[tokio::test]
    async fn health_reports_remote_disabled() {
        let response = local_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["remote"], "disabled");
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let response = local_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("req-abc")
        );
        let json = body_json(response).await;
        assert_eq!(json["meta"]["request_id"], "req-abc");
    }

    #[tokio::test]
    async fn sentiment_returns_rating_and_confidence() {
        let response = local_app()
            .oneshot(post_json(
                "/api/v1/sentiment",
                &json!({"text": "J'adore, c'est excellent et génial"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let rating = json["data"]["rating"].as_u64().expect("rating");
        let confidence = json["data"]["confidence"].as_f64().expect("confidence");
        assert!(rating >= 4);
        assert!((0.0..=MAX_CONFIDENCE).contains(&confidence));
        assert_eq!(json["data"]["source"], "local");
    }

    #[tokio::test]
    async fn sentiment_rejects_blank_text() {
        let response = local_app()
            .oneshot(post_json("/api/v1/sentiment", &json!({"text": "   "})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn sentiment_rejects_oversized_text() {
        let text = "a".repeat(5001);
        let response = local_app()
            .oneshot(post_json("/api/v1/sentiment", &json!({ "text": text })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_returns_short_text_verbatim() {
        let text = "Ce casque est confortable et léger. La batterie dure longtemps. Le son est clair.";
        let response = local_app()
            .oneshot(post_json("/api/v1/summary", &json!({ "text": text })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["summary"], text);
    }

    #[tokio::test]
    async fn summary_rejects_short_text() {
        let response = local_app()
            .oneshot(post_json("/api/v1/summary", &json!({"text": "Trop court."})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recommendations_are_drawn_from_named_categories() {
        let response = local_app()
            .oneshot(post_json(
                "/api/v1/recommendations",
                &json!({"description": "Je cherche un téléphone avec bon appareil photo"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let picks = json["data"]["recommendations"]
            .as_array()
            .expect("recommendations array");
        assert!(!picks.is_empty() && picks.len() <= MAX_RECOMMENDATIONS);

        let catalog = Catalog::builtin();
        let allowed: Vec<&String> = ["téléphone", "photo"]
            .iter()
            .filter_map(|name| catalog.category(name))
            .flat_map(|entry| entry.products.iter())
            .collect();
        for pick in picks {
            let pick = pick.as_str().expect("string product");
            assert!(allowed.iter().any(|p| p.as_str() == pick), "unexpected {pick}");
        }
    }

    #[tokio::test]
    async fn recommendations_reject_short_description() {
        let response = local_app()
            .oneshot(post_json(
                "/api/v1/recommendations",
                &json!({"description": "photo"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn catalog_lists_builtin_categories() {
        let response = local_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/catalog")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let categories = json["data"].as_array().expect("data array");
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[0]["category"], "téléphone");
    }

    #[tokio::test]
    async fn protected_routes_require_bearer_token_when_enabled() {
        let auth = AuthState::from_raw("k1", false).expect("auth");
        let app = build_app(
            AppState {
                engine: Arc::new(Engine::local()),
            },
            auth,
            default_rate_limit_state(),
        );

        let unauthorized = app
            .clone()
            .oneshot(post_json("/api/v1/sentiment", &json!({"text": "bon"})))
            .await
            .expect("response");
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let mut request = post_json("/api/v1/sentiment", &json!({"text": "bon"}));
        request.headers_mut().insert(
            header::AUTHORIZATION,
            "Bearer k1".parse().expect("header value"),
        );
        let authorized = app.oneshot(request).await.expect("response");
        assert_eq!(authorized.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rate_limit_rejects_requests_over_the_window_limit() {
        let app = build_app(
            AppState {
                engine: Arc::new(Engine::local()),
            },
            AuthState::disabled(),
            rate_limit_state(1, 60),
        );

        let first = app
            .clone()
            .oneshot(post_json("/api/v1/sentiment", &json!({"text": "bon"})))
            .await
            .expect("response");
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(post_json("/api/v1/sentiment", &json!({"text": "bon"})))
            .await
            .expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
