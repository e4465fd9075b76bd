//! Page routing gate. Redirects on the presence of a `token` cookie; the
//! cookie's signature is not checked here.

use axum::{
    extract::Request,
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

pub const SESSION_COOKIE: &str = "token";

const PROTECTED_PREFIXES: [&str; 2] = ["/dashboard", "/paths"];
const AUTH_PAGE_PREFIXES: [&str; 2] = ["/signin", "/signup"];

pub async fn session_gate(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let has_session = has_session_cookie(request.headers());

    if !has_session && PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return Redirect::to("/signin").into_response();
    }
    if has_session && AUTH_PAGE_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return Redirect::to("/dashboard").into_response();
    }

    next.run(request).await
}

fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == SESSION_COOKIE && !value.is_empty())
}
