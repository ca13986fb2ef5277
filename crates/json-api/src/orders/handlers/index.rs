//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::{
    access::{Action, Resource},
    domain::{
        orders::{data::OrderFilter, status::OrderStatus},
        stores::records::StoreUuid,
    },
};

use crate::{
    access::authorize,
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// With `store_id` the caller must own or administer the store. Without it
/// non-admins only see orders they placed.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    store_id: QueryParam<Uuid, false>,
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let page = state.pagination.page(skip.into_inner(), limit.into_inner())?;

    let status = status
        .into_inner()
        .map(|status| status.parse::<OrderStatus>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?;

    let filter = match store_id.into_inner().map(StoreUuid::from_uuid) {
        Some(store) => {
            authorize(state, actor, Action::ListOrders, Resource::Store(store)).await?;

            OrderFilter {
                placed_by: None,
                store: Some(store),
                status,
            }
        }
        None => OrderFilter {
            placed_by: (!actor.is_admin()).then_some(actor.user),
            store: None,
            status,
        },
    };

    let orders = state
        .app
        .orders
        .list_orders(filter, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hilo_app::{
        domain::orders::{MockOrdersService, records::OrderUuid},
        pagination::Page,
    };

    use crate::test_helpers::{
        TEST_ACTOR, TEST_ADMIN, TestApp, deny_access, expect_access, make_order,
    };

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_unfiltered_listing_is_scoped_to_own_orders() -> TestResult {
        let store = StoreUuid::new();
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|filter, page| {
                *filter
                    == OrderFilter {
                        placed_by: Some(TEST_ACTOR.user),
                        ..OrderFilter::default()
                    }
                    && *page == Page::new(0, 20)
            })
            .return_once(move |_, _| Ok(vec![make_order(uuid, store, Some(TEST_ACTOR.user))]));

        let app = TestApp {
            orders,
            ..TestApp::default()
        };

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        assert_eq!(
            response.orders.first().map(|order| order.uuid),
            Some(uuid.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_sees_all_orders_with_status_filter() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|filter, _| {
                *filter
                    == OrderFilter {
                        status: Some(OrderStatus::Shipped),
                        ..OrderFilter::default()
                    }
            })
            .return_once(|_, _| Ok(vec![]));

        let app = TestApp {
            orders,
            actor: TEST_ADMIN,
            ..TestApp::default()
        };

        let res = TestClient::get("http://example.com/orders?status=shipped")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_store_listing_requires_store_access() -> TestResult {
        let store = StoreUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(move |filter, page| {
                filter.store == Some(store) && filter.placed_by.is_none() && *page == Page::new(20, 10)
            })
            .return_once(|_, _| Ok(vec![]));

        let app = TestApp {
            orders,
            access: expect_access(Action::ListOrders, Resource::Store(store)),
            ..TestApp::default()
        };

        let res = TestClient::get(format!(
            "http://example.com/orders?store_id={store}&skip=20&limit=10"
        ))
        .send(&make_service(app))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_store_listing_denied_returns_403() -> TestResult {
        let store = StoreUuid::new();

        let app = TestApp {
            access: deny_access(),
            ..TestApp::default()
        };

        let res = TestClient::get(format!("http://example.com/orders?store_id={store}"))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/orders?status=lost")
            .send(&make_service(TestApp::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
