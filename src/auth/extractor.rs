use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::AppState;
use crate::db::models::{Role, User};
use crate::db::repository::UserRepository;
use crate::error::AppError;

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// The token's subject is looked up again on every request so deleted users
/// lose access immediately.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl CurrentUser {
    pub fn role(&self) -> Role {
        self.user.role()
    }

    /// Reject the request unless the caller holds one of `allowed`.
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role()) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            parts.extract::<TypedHeader<Authorization<Bearer>>>().await
        else {
            return Err(AppError::Unauthorized("Not authenticated".to_string()));
        };

        let claims = state.tokens.verify(bearer.token())?;

        let user = UserRepository::get_by_email(state.db.pool(), &claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(Self { user })
    }
}
