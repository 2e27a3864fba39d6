//! services/api/src/web/cart.rs
//!
//! Shopping cart handlers. One line per product; re-adding a product bumps
//! its quantity.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use persona_cart_core::domain::{CartAddition, CartItem};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::state::{AppState, CurrentUser};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<String>,
    pub quantity: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub product_id: String,
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            owner_id: item.owner_id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// List the signed-in account's cart.
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart lines", body = [CartItemResponse]),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_cart_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<CartItemResponse>>, ApiError> {
    let items = state.db.list_cart(user.user_id).await?;
    Ok(Json(items.into_iter().map(CartItemResponse::from).collect()))
}

/// Add a product to the cart, or increase its quantity if already present.
#[utoipa::path(
    post,
    path = "/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "New cart line", body = CartItemResponse),
        (status = 200, description = "Existing line incremented", body = CartItemResponse),
        (status = 400, description = "Product and positive quantity required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_cart_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<AddToCartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (product_id, quantity) = match (req.product_id, req.quantity) {
        (Some(product_id), Some(quantity)) if !product_id.is_empty() => (product_id, quantity),
        _ => return Err(ApiError::BadRequest("Product and quantity required".to_string())),
    };
    if quantity <= 0 {
        return Err(ApiError::BadRequest("Quantity must be positive".to_string()));
    }

    let addition = state.db.add_to_cart(user.user_id, &product_id, quantity).await?;
    let status = match addition {
        CartAddition::Created(_) => StatusCode::CREATED,
        CartAddition::Incremented(_) => StatusCode::OK,
    };
    info!(owner_id = %user.user_id, %product_id, quantity, "Added to cart");
    Ok((status, Json(CartItemResponse::from(addition.into_item()))))
}

/// Remove one cart line.
#[utoipa::path(
    delete,
    path = "/cart/{id}",
    params(("id" = Uuid, Path, description = "Cart line id")),
    responses((status = 200, description = "Line removed", body = SuccessResponse))
)]
pub async fn remove_cart_item_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db.remove_cart_item(user.user_id, id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Empty the cart.
#[utoipa::path(
    delete,
    path = "/cart",
    responses((status = 200, description = "Cart cleared", body = SuccessResponse))
)]
pub async fn clear_cart_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db.clear_cart(user.user_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
