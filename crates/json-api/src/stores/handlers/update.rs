//! Update Store Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::stores::{data::StoreUpdate, records::StoreUuid},
};

use crate::{
    access::authorize,
    extensions::*,
    state::State,
    stores::{errors::into_status_error, get::StoreResponse},
};

/// Update Store Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStoreRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateStoreRequest> for StoreUpdate {
    fn from(request: UpdateStoreRequest) -> Self {
        StoreUpdate {
            name: request.name,
            description: request.description,
            address: request.address,
            phone: request.phone,
            email: request.email,
            is_active: request.is_active,
        }
    }
}

/// Update Store Handler
///
/// Managers and staff may only change the description, phone and email.
#[endpoint(
    tags("stores"),
    summary = "Update Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not change these fields"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    json: JsonBody<UpdateStoreRequest>,
    depot: &mut Depot,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let store = StoreUuid::from_uuid(store.into_inner());
    let update: StoreUpdate = json.into_inner().into();

    if update.is_empty() {
        return Err(StatusError::bad_request().brief("Update contains no fields"));
    }

    authorize(
        state,
        actor,
        Action::UpdateStore {
            fields: update.fields(),
        },
        Resource::Store(store),
    )
    .await?;

    let store = state
        .app
        .stores
        .update_store(store, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(store.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use hilo_app::domain::stores::{MockStoresService, StoresServiceError, data::StoreField};

    use crate::test_helpers::{TestApp, deny_access, expect_access, make_store};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("stores/{store}").patch(handler))
    }

    #[tokio::test]
    async fn test_update_checks_touched_fields() -> TestResult {
        let uuid = StoreUuid::new();

        let mut stores = MockStoresService::new();

        stores
            .expect_update_store()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == StoreUpdate {
                            phone: Some("+51 1 555 0199".to_string()),
                            ..StoreUpdate::default()
                        }
            })
            .return_once(move |_, _| {
                let mut store = make_store(uuid);
                store.phone = "+51 1 555 0199".to_string();

                Ok(store)
            });

        let app = TestApp {
            stores,
            access: expect_access(
                Action::UpdateStore {
                    fields: vec![StoreField::Phone],
                },
                Resource::Store(uuid),
            ),
            ..TestApp::default()
        };

        let mut res = TestClient::patch(format!("http://example.com/stores/{uuid}"))
            .json(&json!({ "phone": "+51 1 555 0199" }))
            .send(&make_service(app))
            .await;

        let body: StoreResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.phone, "+51 1 555 0199");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_restricted_field_returns_403() -> TestResult {
        let uuid = StoreUuid::new();

        let app = TestApp {
            access: deny_access(),
            ..TestApp::default()
        };

        let res = TestClient::patch(format!("http://example.com/stores/{uuid}"))
            .json(&json!({ "phone": "+51 1 555 0199", "name": "Otro nombre" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_fields_returns_400() -> TestResult {
        let uuid = StoreUuid::new();

        let res = TestClient::patch(format!("http://example.com/stores/{uuid}"))
            .json(&json!({}))
            .send(&make_service(TestApp::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_store_returns_404() -> TestResult {
        let uuid = StoreUuid::new();

        let mut stores = MockStoresService::new();

        stores
            .expect_update_store()
            .once()
            .return_once(|_, _| Err(StoresServiceError::NotFound));

        let app = TestApp {
            stores,
            access: expect_access(
                Action::UpdateStore {
                    fields: vec![StoreField::IsActive],
                },
                Resource::Store(uuid),
            ),
            ..TestApp::default()
        };

        let res = TestClient::patch(format!("http://example.com/stores/{uuid}"))
            .json(&json!({ "is_active": false }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
