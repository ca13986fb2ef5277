//! App Router

use salvo::Router;

use crate::{auth, orders, products, stores, users};

/// Routes that require a bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("stores")
                .get(stores::index::handler)
                .post(stores::create::handler)
                .push(
                    Router::with_path("{store}")
                        .get(stores::get::handler)
                        .patch(stores::update::handler)
                        .delete(stores::delete::handler)
                        .push(
                            Router::with_path("members")
                                .get(stores::members::index::handler)
                                .post(stores::members::create::handler)
                                .push(
                                    Router::with_path("{user}")
                                        .patch(stores::members::update::handler)
                                        .delete(stores::members::delete::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .patch(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("stock").post(products::stock::handler)),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").patch(orders::status::handler)),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .push(Router::with_path("me").get(users::me::handler))
                .push(
                    Router::with_path("{user}")
                        .get(users::get::handler)
                        .patch(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
}
