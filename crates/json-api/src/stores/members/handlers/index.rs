//! Member Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::stores::records::StoreUuid,
};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    stores::members::{MemberResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MembersResponse {
    pub members: Vec<MemberResponse>,
}

/// Member Index Handler
///
/// Lists the live members of a store.
#[endpoint(
    tags("stores"),
    summary = "List Store Members",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MembersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let store = StoreUuid::from_uuid(store.into_inner());

    authorize(state, actor, Action::ReadStore, Resource::Store(store)).await?;

    let members = state
        .app
        .memberships
        .list_members(store)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MembersResponse {
        members: members.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hilo_app::{
        access::StoreRole,
        domain::{memberships::MockMembershipsService, users::records::UserUuid},
    };

    use crate::test_helpers::{TestApp, deny_access, expect_access, make_membership};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("stores/{store}/members").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_members() -> TestResult {
        let store = StoreUuid::new();
        let owner = UserUuid::new();

        let mut memberships = MockMembershipsService::new();

        memberships
            .expect_list_members()
            .once()
            .withf(move |s| *s == store)
            .return_once(move |_| Ok(vec![make_membership(store, owner, StoreRole::Owner)]));

        let app = TestApp {
            memberships,
            access: expect_access(Action::ReadStore, Resource::Store(store)),
            ..TestApp::default()
        };

        let response: MembersResponse =
            TestClient::get(format!("http://example.com/stores/{store}/members"))
                .send(&make_service(app))
                .await
                .take_json()
                .await?;

        let member = response.members.first();

        assert_eq!(member.map(|m| m.user_uuid), Some(owner.into_uuid()));
        assert_eq!(member.map(|m| m.role.as_str()), Some("owner"));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_for_non_member_returns_403() -> TestResult {
        let store = StoreUuid::new();

        let app = TestApp {
            access: deny_access(),
            ..TestApp::default()
        };

        let res = TestClient::get(format!("http://example.com/stores/{store}/members"))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
