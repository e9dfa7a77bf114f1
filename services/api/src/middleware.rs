//! Authentication middleware and the ownership guard
//!
//! Authentication (who the caller is) happens here, before any handler
//! runs. Ownership (whether the caller may touch a given resource) is a
//! separate per-handler concern, funneled through [`require_owner`] so the
//! comparison exists in exactly one place.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::{error::ApiError, jwt::TokenError, state::AppState};

/// Name of the session cookie
pub const TOKEN_COOKIE: &str = "token";

/// Verified caller identity, attached to the request by [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

/// Reject the request with 401 unless it carries a valid session cookie
///
/// On success the resolved [`AuthUser`] is inserted into the request
/// extensions for handlers to consume.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.jwt_service.verify(&token).map_err(|e| {
        match e {
            TokenError::Expired => debug!("Rejected expired session token"),
            TokenError::Invalid => debug!("Rejected invalid session token"),
        }
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser {
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Reject with 403 unless the authenticated caller owns `owner_email`
///
/// Every private handler calls this with the resource's declared owner
/// field before touching the database.
pub fn require_owner(user: &AuthUser, owner_email: &str) -> Result<(), ApiError> {
    if user.email != owner_email {
        return Err(ApiError::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_match_is_allowed() {
        let user = AuthUser {
            email: "a@x.com".to_string(),
        };
        assert!(require_owner(&user, "a@x.com").is_ok());
    }

    #[test]
    fn owner_mismatch_is_forbidden() {
        let user = AuthUser {
            email: "b@x.com".to_string(),
        };
        assert!(matches!(
            require_owner(&user, "a@x.com"),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let user = AuthUser {
            email: "A@x.com".to_string(),
        };
        assert!(require_owner(&user, "a@x.com").is_err());
    }
}
