//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Current User Handler
///
/// Returns the authenticated caller's own account.
#[endpoint(
    tags("users"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state
        .app
        .users
        .get_user(actor.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hilo_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{TEST_ACTOR, TestApp, make_user};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("users/me").get(handler))
    }

    #[tokio::test]
    async fn test_me_returns_caller() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .withf(|u| *u == TEST_ACTOR.user)
            .return_once(|u| Ok(make_user(u)));

        let app = TestApp {
            users,
            ..TestApp::default()
        };

        let mut res = TestClient::get("http://example.com/users/me")
            .send(&make_service(app))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, TEST_ACTOR.user.into_uuid());
        assert_eq!(body.role, "customer");

        Ok(())
    }

    #[tokio::test]
    async fn test_me_for_deleted_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let app = TestApp {
            users,
            ..TestApp::default()
        };

        let res = TestClient::get("http://example.com/users/me")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
