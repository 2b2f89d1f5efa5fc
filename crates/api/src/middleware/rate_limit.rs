//! Fixed-window rate limiting as `axum::middleware::from_fn_with_state` layers.
//!
//! Every limited response carries `X-RateLimit-Limit`, `X-RateLimit-Remaining`
//! and `X-RateLimit-Reset` (Unix milliseconds). Rejected calls get 429 with
//! `Retry-After` and never reach the handler.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shifa_core::rate_limit::{client_identifier, RateLimitDecision, RateLimitPolicy};

use crate::error::AppError;
use crate::state::AppState;

pub const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const RESET_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Public form submissions.
pub async fn form(State(state): State<AppState>, request: Request, next: Next) -> Response {
    apply(&state, &RateLimitPolicy::FORM, request, next).await
}

/// Login attempts.
pub async fn auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    apply(&state, &RateLimitPolicy::AUTH, request, next).await
}

/// Media uploads.
pub async fn upload(State(state): State<AppState>, request: Request, next: Next) -> Response {
    apply(&state, &RateLimitPolicy::UPLOAD, request, next).await
}

async fn apply(
    state: &AppState,
    policy: &RateLimitPolicy,
    request: Request,
    next: Next,
) -> Response {
    let identifier = caller(request.headers());
    let decision = state.rate_limiter.check(&identifier, policy);

    let mut response = if decision.success {
        next.run(request).await
    } else {
        tracing::warn!(
            policy = policy.name,
            client = %identifier,
            "Rate limit exceeded"
        );
        AppError::TooManyRequests {
            retry_after_secs: decision.retry_after_secs(Utc::now()),
        }
        .into_response()
    };

    attach_headers(response.headers_mut(), &decision);
    response
}

fn caller(headers: &HeaderMap) -> String {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    client_identifier(header("x-forwarded-for"), header("x-real-ip"))
}

fn attach_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(LIMIT_HEADER, HeaderValue::from(decision.limit));
    headers.insert(REMAINING_HEADER, HeaderValue::from(decision.remaining));
    headers.insert(
        RESET_HEADER,
        HeaderValue::from(decision.reset.timestamp_millis()),
    );
}
