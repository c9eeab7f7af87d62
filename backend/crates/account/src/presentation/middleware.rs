//! Auth Middleware
//!
//! Bearer-token gate for protected routes. The verified [`Principal`] is
//! stored in request extensions and read back by its extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::{Principal, TokenCodec};
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::handlers::AccountAppState;

/// Middleware that requires a valid access token
///
/// - no `authorization` header → `Unauthenticated`
/// - unreadable, empty or non-Bearer header → `InvalidArgument`
/// - bad, expired or refresh token → `InvalidToken`
pub async fn require_bearer<R>(
    State(state): State<AccountAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccountError>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let principal = authenticate(req.headers(), &state.codec)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Resolve the principal from request headers
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> AccountResult<Principal> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AccountError::Unauthenticated)?;

    let value = value.to_str().map_err(|_| {
        AccountError::InvalidArgument("authorization header must be visible ASCII".to_string())
    })?;

    let token = bearer_token(value)?;
    let claims = codec.verify(token)?;
    Principal::from_claims(&claims)
}

/// Accepts `Bearer <token>` (scheme is case-insensitive) or a bare token
fn bearer_token(value: &str) -> AccountResult<&str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AccountError::InvalidArgument(
            "authorization header is empty".to_string(),
        ));
    }

    match value.split_once(char::is_whitespace) {
        // "Bearer " arrives here with its trailing space already stripped
        None if value.eq_ignore_ascii_case("bearer") => Err(AccountError::InvalidArgument(
            "bearer token is empty".to_string(),
        )),
        None => Ok(value),
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                Err(AccountError::InvalidArgument(
                    "bearer token is empty".to_string(),
                ))
            } else {
                Ok(token)
            }
        }
        Some(_) => Err(AccountError::InvalidArgument(
            "unsupported authorization scheme".to_string(),
        )),
    }
}

/// Fails closed: a handler reached without the gate sees `Unauthenticated`
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AccountError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AccountConfig;
    use crate::domain::value_object::role::Role;
    use axum::http::HeaderValue;
    use kernel::id::AccountId;

    fn headers(value: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_forms() {
        assert_eq!(bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token("bearer   abc ").unwrap(), "abc");
        assert_eq!(bearer_token("abc").unwrap(), "abc");
        assert!(matches!(
            bearer_token("Basic dXNlcjpwYXNz"),
            Err(AccountError::InvalidArgument(_))
        ));
        assert!(matches!(bearer_token("  "), Err(AccountError::InvalidArgument(_))));
        assert!(matches!(
            bearer_token("Bearer "),
            Err(AccountError::InvalidArgument(_))
        ));
        assert!(matches!(
            bearer_token("BEARER"),
            Err(AccountError::InvalidArgument(_))
        ));
        assert_eq!(bearer_token("Bearer\tabc").unwrap(), "abc");
    }

    #[test]
    fn test_scheme_without_credential_is_bad_request() {
        let codec = TokenCodec::new(&AccountConfig::development());
        let values: [&[u8]; 3] = [b"Bearer", b"Bearer ", b"bearer   "];
        for value in values {
            assert!(matches!(
                authenticate(&headers(value), &codec),
                Err(AccountError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_authenticate_outcomes() {
        let codec = TokenCodec::new(&AccountConfig::development());
        let id = AccountId::new();
        let pair = codec.sign_pair(&id, Role::User).unwrap();

        assert!(matches!(
            authenticate(&HeaderMap::new(), &codec),
            Err(AccountError::Unauthenticated)
        ));
        assert!(matches!(
            authenticate(&headers(b"Bearer \xff\xfe"), &codec),
            Err(AccountError::InvalidArgument(_))
        ));
        assert!(matches!(
            authenticate(&headers(b"Bearer not.a.jwt"), &codec),
            Err(AccountError::InvalidToken)
        ));

        let refresh = format!("Bearer {}", pair.refresh_token);
        assert!(matches!(
            authenticate(&headers(refresh.as_bytes()), &codec),
            Err(AccountError::InvalidToken)
        ));

        let access = format!("Bearer {}", pair.access_token);
        let principal = authenticate(&headers(access.as_bytes()), &codec).unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.role, Role::User);

        // Bare token, as sent by older clients
        let principal = authenticate(&headers(pair.access_token.as_bytes()), &codec).unwrap();
        assert_eq!(principal.id, id);
    }
}
