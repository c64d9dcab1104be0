//! HTTP surface of the storefront.
//!
//! | Method | Path                        | Purpose                          |
//! |--------|-----------------------------|----------------------------------|
//! | GET    | `/`                         | Shop info and featured products  |
//! | GET    | `/products`                 | Catalog, optionally by category  |
//! | GET    | `/products/{id}`            | Product detail                   |
//! | GET    | `/cart`                     | Cart with pricing breakdown      |
//! | POST   | `/cart/add`                 | Add a product                    |
//! | POST   | `/cart/update`              | Change a line's quantity         |
//! | POST   | `/cart/remove`              | Remove a line                    |
//! | POST   | `/cart/promotion`           | Apply a promotion code           |
//! | POST   | `/cart/promotion/remove`    | Remove the promotion             |
//! | GET    | `/checkout`                 | Checkout summary                 |
//! | POST   | `/checkout`                 | Place the order                  |
//! | POST   | `/auth/login`               | Sign in                          |
//! | POST   | `/auth/register`            | Create an account and sign in    |
//! | POST   | `/auth/logout`              | Sign out (cart survives)         |
//! | GET    | `/auth/me`                  | Session user, if any             |
//! | GET    | `/account`                  | Fresh profile from the backend   |
//! | GET    | `/account/orders`           | Order history                    |
//! | GET    | `/account/orders/{id}`      | One historical order             |
//! | POST   | `/account/password`         | Change password                  |

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::middleware;
use crate::state::AppState;

/// Assemble the full storefront application.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::session::layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(home::routes())
        .merge(products::routes())
        .merge(cart::routes())
        .merge(checkout::routes())
        .merge(auth::routes())
        .merge(account::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
