//! User Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use hilo_app::access::{Action, Resource};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    /// Users, newest first
    pub users: Vec<UserResponse>,
}

/// User Index Handler
///
/// Global admins only.
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let page = state.pagination.page(skip.into_inner(), limit.into_inner())?;

    authorize(state, actor, Action::ManageUsers, Resource::Platform).await?;

    let users = state
        .app
        .users
        .list_users(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hilo_app::{
        domain::users::{MockUsersService, records::UserUuid},
        pagination::Page,
    };

    use crate::test_helpers::{TEST_ADMIN, TestApp, deny_access, expect_access, make_user};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("users").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_users_for_admin() -> TestResult {
        let uuid = UserUuid::new();

        let mut users = MockUsersService::new();

        users
            .expect_list_users()
            .once()
            .withf(|page| *page == Page::new(0, 20))
            .return_once(move |_| Ok(vec![make_user(uuid)]));

        let app = TestApp {
            users,
            access: expect_access(Action::ManageUsers, Resource::Platform),
            actor: TEST_ADMIN,
            ..TestApp::default()
        };

        let response: UsersResponse = TestClient::get("http://example.com/users")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        assert_eq!(
            response.users.first().map(|user| user.uuid),
            Some(uuid.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_for_non_admin_returns_403() -> TestResult {
        let app = TestApp {
            access: deny_access(),
            ..TestApp::default()
        };

        let res = TestClient::get("http://example.com/users")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
