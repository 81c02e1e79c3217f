//! App Router

use salvo::Router;

use crate::{carts, offers};

pub(crate) fn app_router() -> Router {
    Router::with_path("api/v1")
        .push(Router::with_path("offer").post(offers::register::handler))
        .push(Router::with_path("cart/apply_offer").post(carts::apply_offer::handler))
        .push(
            Router::with_path("restaurants/{restaurant_id}/offers").get(offers::list::handler),
        )
}
