//! Authentication endpoints

use axum::{extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::{AppError, AppResult},
    models::LoginRequest,
    services::session::SessionPair,
    AppState,
};

use super::ValidatedJson;

/// Cookie holding the branca access token
pub const ACCESS_COOKIE: &str = "access";
/// Cookie holding the signed refresh token
pub const REFRESH_COOKIE: &str = "refresh";

const COOKIE_PATH: &str = "/api";

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path(COOKIE_PATH)
        .secure(secure)
        .build()
}

/// Add both session cookies to the jar
fn with_session(jar: CookieJar, pair: SessionPair, state: &AppState) -> CookieJar {
    let secure = state.config.server.cookie_secure;
    let max_age = state.services.session.refresh_ttl_secs();

    let access = session_cookie(ACCESS_COOKIE, pair.access, secure);
    let mut refresh = session_cookie(REFRESH_COOKIE, pair.refresh, secure);
    refresh.set_max_age(time::Duration::seconds(max_age as i64));

    jar.add(access).add(refresh)
}

/// Removal cookie for `name`, sent whether or not the client presented it
fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), secure);
    cookie.make_removal();
    cookie
}

/// Expire both session cookies
fn without_session(jar: CookieJar, state: &AppState) -> CookieJar {
    let secure = state.config.server.cookie_secure;
    jar.add(expired_cookie(ACCESS_COOKIE, secure))
        .add(expired_cookie(REFRESH_COOKIE, secure))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookies set"),
        (status = 400, description = "Missing username or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, StatusCode)> {
    let pair = state.services.auth.login(&request).await?;
    Ok((with_session(jar, pair, &state), StatusCode::OK))
}

/// Exchange the refresh cookie for a new session
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookies renewed"),
        (status = 401, description = "Refresh token missing, forged, expired or revoked", body = crate::error::ErrorResponse)
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Authentication("missing refresh token".to_string()))?;

    let pair = state.services.auth.refresh(&token).await?;
    Ok((with_session(jar, pair, &state), StatusCode::OK))
}

/// Revoke the refresh token and clear session cookies
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out")
    )
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let token = jar.get(REFRESH_COOKIE).map(|cookie| cookie.value().to_string());

    if let Err(e) = state.services.auth.logout(token.as_deref()).await {
        tracing::warn!("Failed to revoke refresh token on logout: {}", e);
    }

    (without_session(jar, &state), StatusCode::OK)
}
