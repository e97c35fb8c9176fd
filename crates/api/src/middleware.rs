use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::Duration;

use stockroom_core::OwnerId;

use crate::context::OwnerContext;

/// Cookie carrying the anonymous owner token.
pub const OWNER_COOKIE: &str = "user_id";

const MAX_TOKEN_LEN: usize = 128;

#[derive(Debug, Clone, Copy)]
pub struct OwnerCookieState {
    pub max_age: Duration,
}

/// Resolve (or issue) the anonymous owner for this browser.
///
/// The token is refreshed on every response so the cookie lifetime slides
/// with activity.
pub async fn owner_cookie_middleware(
    State(state): State<OwnerCookieState>,
    mut req: Request,
    next: Next,
) -> Response {
    let owner_id = match owner_from_cookies(req.headers()) {
        Some(owner_id) => owner_id,
        None => {
            let issued = OwnerId::issue();
            tracing::debug!(owner_id = %issued, "issued anonymous owner");
            issued
        }
    };

    req.extensions_mut().insert(OwnerContext::new(owner_id.clone()));

    let mut res = next.run(req).await;
    match HeaderValue::from_str(&set_cookie_value(&owner_id, state.max_age)) {
        Ok(value) => {
            res.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::warn!("owner cookie not set: {e}"),
    }
    res
}

/// Extract the owner token from the `Cookie` header(s).
///
/// Blank or malformed tokens count as absent.
pub fn owner_from_cookies(headers: &HeaderMap) -> Option<OwnerId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == OWNER_COOKIE)
        .map(|(_, token)| token.trim().trim_matches('"'))
        .filter(|token| is_valid_token(token))
        .map(OwnerId::from)
}

fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LEN
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn set_cookie_value(owner_id: &OwnerId, max_age: Duration) -> String {
    format!(
        "{OWNER_COOKIE}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        owner_id,
        max_age.num_seconds()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        h
    }

    #[test]
    fn reads_owner_among_other_cookies() {
        let owner = owner_from_cookies(&headers("theme=dark; user_id=abc-123; lang=en")).unwrap();
        assert_eq!(owner.as_str(), "abc-123");
    }

    #[test]
    fn missing_blank_or_malformed_tokens_are_absent() {
        assert!(owner_from_cookies(&HeaderMap::new()).is_none());
        assert!(owner_from_cookies(&headers("theme=dark")).is_none());
        assert!(owner_from_cookies(&headers("user_id=")).is_none());
        assert!(owner_from_cookies(&headers("user_id=a,b")).is_none());
    }

    #[test]
    fn does_not_match_cookie_name_prefixes() {
        assert!(owner_from_cookies(&headers("old_user_id=abc")).is_none());
    }

    #[test]
    fn set_cookie_uses_fourteen_day_lifetime() {
        let value = set_cookie_value(&OwnerId::new("abc"), Duration::days(14));
        assert_eq!(value, "user_id=abc; Max-Age=1209600; Path=/; HttpOnly; SameSite=Lax");
    }
}
