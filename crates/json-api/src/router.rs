//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    auth, carts, healthcheck,
    observability::{metrics_handler, request_logging},
    orders, products,
    state::State,
};

/// Routes that require a bearer token.
pub(crate) fn api_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("stock").post(products::stock::handler)),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("lines")
                        .post(carts::lines::create::handler)
                        .push(
                            Router::with_path("{line}")
                                .put(carts::lines::update::handler)
                                .delete(carts::lines::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}

/// The full application router with shared middleware and state.
pub(crate) fn app_router(state: Arc<State>) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(api_router())
}
