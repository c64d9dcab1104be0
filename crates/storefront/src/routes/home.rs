//! Landing page data.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::api::types::ShopSettings;
use crate::error::AppError;
use crate::middleware::auth::OptionalUser;
use crate::models::views::{ProductView, UserView};
use crate::state::AppState;

const FEATURED_COUNT: usize = 8;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

#[derive(Serialize)]
struct HomeView {
    shop: ShopSettings,
    featured: Vec<ProductView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserView>,
}

async fn home(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<Json<HomeView>, AppError> {
    let shop = state.api().settings().await?;
    let products = state.api().list_products(None).await?;

    let featured = products
        .iter()
        .filter(|product| product.available)
        .take(FEATURED_COUNT)
        .map(ProductView::from)
        .collect();

    Ok(Json(HomeView {
        shop,
        featured,
        user: user.as_ref().map(UserView::from),
    }))
}
