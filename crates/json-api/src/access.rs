//! Access checks for handlers.

use hilo_app::access::{AccessServiceError, Action, Actor, Resource};
use salvo::prelude::StatusError;
use tracing::error;

use crate::state::State;

/// Ask the access service whether `actor` may perform `action`.
pub(crate) async fn authorize(
    state: &State,
    actor: Actor,
    action: Action,
    resource: Resource,
) -> Result<(), StatusError> {
    state
        .app
        .access
        .authorize(actor, action, resource)
        .await
        .map_err(|error| match error {
            AccessServiceError::Forbidden => StatusError::forbidden()
                .brief("You do not have permission to perform this action"),
            AccessServiceError::Sql(source) => {
                error!("failed to resolve store membership: {source}");

                StatusError::internal_server_error()
            }
        })
}

#[cfg(test)]
mod tests {
    use hilo_app::{access::MockAccessService, domain::stores::records::StoreUuid};
    use salvo::http::StatusCode;

    use crate::test_helpers::{TEST_ACTOR, TestApp};

    use super::*;

    fn state(access: MockAccessService) -> std::sync::Arc<State> {
        TestApp {
            access,
            ..TestApp::default()
        }
        .state()
    }

    #[tokio::test]
    async fn forbidden_maps_to_403() {
        let mut access = MockAccessService::new();

        access
            .expect_authorize()
            .once()
            .return_once(|_, _, _| Err(AccessServiceError::Forbidden));

        let result = authorize(
            &state(access),
            TEST_ACTOR,
            Action::DeleteStore,
            Resource::Store(StoreUuid::new()),
        )
        .await;

        assert_eq!(
            result.err().map(|status| status.code),
            Some(StatusCode::FORBIDDEN),
            "expected forbidden"
        );
    }

    #[tokio::test]
    async fn storage_failure_maps_to_500() {
        let mut access = MockAccessService::new();

        access
            .expect_authorize()
            .once()
            .return_once(|_, _, _| Err(AccessServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let result = authorize(&state(access), TEST_ACTOR, Action::CreateStore, Resource::Platform).await;

        assert_eq!(
            result.err().map(|status| status.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR),
            "expected internal server error"
        );
    }
}
