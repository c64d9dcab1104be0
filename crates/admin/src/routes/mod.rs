//! HTTP surface of the console.
//!
//! Apart from `/health` and `/auth/*`, every route extracts
//! [`Authorized`](crate::middleware::auth::Authorized), so the permission
//! gate runs before any page logic.
//!
//! | Method | Path                       | Purpose                            |
//! |--------|----------------------------|------------------------------------|
//! | POST   | `/auth/login`              | Staff sign-in (back office only)   |
//! | POST   | `/auth/logout`             | Sign out                           |
//! | GET    | `/auth/me`                 | Session staff member, if any       |
//! | GET    | `/navigation`              | Sidebar entries for this role      |
//! | GET    | `/dashboard`               | Today's summary numbers            |
//! | GET/POST | `/products` + `/{id}`    | Catalog management                 |
//! | GET    | `/inventory`               | Stock levels                       |
//! | POST   | `/inventory/adjust`        | Stock adjustment                   |
//! | GET    | `/orders[?status=]`        | Order list                         |
//! | GET    | `/orders/{id}`             | Order detail                       |
//! | POST   | `/orders/{id}/status`      | Guarded status transition          |
//! | GET/POST | `/staff` + role/deactivate | Staff account management         |
//! | GET/POST/PUT | `/tables`            | Floor table management             |
//! | GET/POST/DELETE | `/promotions`     | Promotion management               |
//! | GET/PUT | `/settings`               | Shop settings                      |
//! | GET    | `/pos`                     | Sellable products for the register |
//! | POST   | `/pos/orders`              | Place an on-site order             |

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod pos;
pub mod products;
pub mod promotions;
pub mod settings;
pub mod staff;
pub mod tables;

use axum::routing::get;
use axum::{Json, Router};
use robusta_core::permissions::MenuEntry;
use tower_http::trace::TraceLayer;

use crate::middleware::{self, auth::Authorized};
use crate::navigation;
use crate::state::AppState;

/// Assemble the full console application.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::session::layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/navigation", get(navigation_entries))
        .merge(auth::routes())
        .merge(dashboard::routes())
        .merge(products::routes())
        .merge(inventory::routes())
        .merge(orders::routes())
        .merge(staff::routes())
        .merge(tables::routes())
        .merge(promotions::routes())
        .merge(settings::routes())
        .merge(pos::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// The sidebar, filtered to what this staff member may open.
async fn navigation_entries(Authorized(staff): Authorized) -> Json<Vec<MenuEntry>> {
    Json(navigation::entries_for(staff.role))
}
