//! Credit metering for generation actions.
//!
//! Subscribers generate for free; everyone else spends one credit per
//! persisted model output. The check here is only a fast path that keeps
//! broke users away from the provider. The authoritative decrement happens in
//! the repository write (`Charge::Credit`).

use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::generation::Generated;
use crate::models::user::User;
use crate::store::Charge;

/// Decides how a generation for `user` will be charged, or refuses it.
pub fn ensure_can_generate(user: &User) -> Result<Charge, AppError> {
    if user.has_active_subscription() {
        return Ok(Charge::Free);
    }
    if user.credits <= 0 {
        info!("User {} has no credits left; generation refused", user.id);
        return Err(AppError::PaymentRequired);
    }
    Ok(Charge::Credit)
}

/// Mock output is never billed.
pub fn charge_for<T>(charge: Charge, generated: &Generated<T>) -> Charge {
    if generated.is_mock() {
        Charge::Free
    } else {
        charge
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub credits: i32,
    pub subscription_status: String,
    pub has_active_subscription: bool,
}

/// GET /api/v1/account
pub async fn handle_get_account(CurrentUser(user): CurrentUser) -> Result<Json<AccountResponse>, AppError> {
    Ok(Json(AccountResponse {
        has_active_subscription: user.has_active_subscription(),
        id: user.id,
        email: user.email,
        credits: user.credits,
        subscription_status: user.subscription_status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::OutputSource;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(credits: i32, status: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "sam@example.com".to_string(),
            credits,
            subscription_status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_subscriber_generates_free_even_without_credits() {
        assert_eq!(ensure_can_generate(&user(0, "active")).unwrap(), Charge::Free);
    }

    #[test]
    fn test_user_with_credits_is_charged() {
        assert_eq!(ensure_can_generate(&user(3, "none")).unwrap(), Charge::Credit);
    }

    #[test]
    fn test_user_without_credits_or_subscription_is_refused() {
        assert!(matches!(
            ensure_can_generate(&user(0, "canceled")),
            Err(AppError::PaymentRequired)
        ));
    }

    #[test]
    fn test_mock_output_is_not_charged() {
        let mock = Generated {
            content: (),
            source: OutputSource::Mock,
        };
        let model = Generated {
            content: (),
            source: OutputSource::Model,
        };
        assert_eq!(charge_for(Charge::Credit, &mock), Charge::Free);
        assert_eq!(charge_for(Charge::Credit, &model), Charge::Credit);
    }
}
