//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hilo_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns active products, optionally for a single store.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    store_uuid: QueryParam<Uuid, false>,
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = state.pagination.page(skip.into_inner(), limit.into_inner())?;

    let filter = ProductFilter {
        store: store_uuid.into_inner().map(Into::into),
        include_inactive: false,
    };

    let products = state
        .app
        .products
        .list_products(filter, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hilo_app::{
        domain::{
            products::{MockProductsService, ProductsServiceError, records::ProductUuid},
            stores::records::StoreUuid,
        },
        pagination::Page,
    };

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products_in_order() -> TestResult {
        let store = StoreUuid::new();
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter, page| *filter == ProductFilter::default() && *page == Page::new(0, 20))
            .return_once(move |_, _| {
                Ok(vec![make_product(uuid_a, store), make_product(uuid_b, store)])
            });

        let app = TestApp {
            products,
            ..TestApp::default()
        };

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        let uuids: Vec<Uuid> = response.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![uuid_a.into_uuid(), uuid_b.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_store_filter_and_page() -> TestResult {
        let store = StoreUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(move |filter, page| {
                filter.store == Some(store) && !filter.include_inactive && *page == Page::new(5, 100)
            })
            .return_once(|_, _| Ok(vec![]));

        let app = TestApp {
            products,
            ..TestApp::default()
        };

        let res = TestClient::get(format!(
            "http://example.com/products?store_uuid={store}&skip=5&limit=1000"
        ))
        .send(&make_service(app))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let app = TestApp {
            products,
            ..TestApp::default()
        };

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
