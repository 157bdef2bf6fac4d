//! `AuthAccount` extractor: validates the bearer token and yields the caller.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use gatekeep_auth::jwt::decoder::UNAUTHENTICATED_MESSAGE;
use gatekeep_core::error::AppError;
use gatekeep_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available to handlers that take it.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub RequestContext);

impl AuthAccount {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthAccount {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::authentication(UNAUTHENTICATED_MESSAGE))?;

        let claims = state.jwt_decoder.decode_access_token(bearer.token())?;

        Ok(AuthAccount(RequestContext::new(claims.sub, claims.login)))
    }
}
