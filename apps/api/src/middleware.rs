use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use backoffice_core::{AppError, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the identity provider subject, set by the session proxy.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the signed-in email, set by the session proxy.
pub const USER_EMAIL_HEADER: &str = "x-user-email";
/// Header carrying the secret shared between the session proxy and this API.
pub const PROXY_SECRET_HEADER: &str = "x-proxy-secret";

pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers(), &state.proxy_secret)?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = header_text(headers, header::ORIGIN.as_str()).unwrap_or_default();
        let referer = header_text(headers, header::REFERER.as_str()).unwrap_or_default();

        let allowed_origin = state.frontend_url.as_str();
        if origin != allowed_origin && !referer.starts_with(allowed_origin) {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

/// Reads the forwarded identity, trusting it only when the proxy secret matches.
pub(crate) fn identity_from_headers(
    headers: &HeaderMap,
    proxy_secret: &str,
) -> Result<UserIdentity, AppError> {
    let presented = header_text(headers, PROXY_SECRET_HEADER).unwrap_or_default();
    if proxy_secret.is_empty() || !secrets_match(presented.as_bytes(), proxy_secret.as_bytes()) {
        return Err(AppError::Unauthorized("authentication required".to_owned()));
    }

    let subject = header_text(headers, USER_ID_HEADER)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let email = header_text(headers, USER_EMAIL_HEADER)
        .map(str::trim)
        .unwrap_or_default();

    Ok(UserIdentity::new(subject, email))
}

// Compares every byte so the time taken does not depend on the matching prefix.
fn secrets_match(presented: &[u8], expected: &[u8]) -> bool {
    presented.len() == expected.len()
        && presented
            .iter()
            .zip(expected)
            .fold(0_u8, |diff, (left, right)| diff | (left ^ right))
            == 0
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
