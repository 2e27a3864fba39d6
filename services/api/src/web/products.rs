//! services/api/src/web/products.rs
//!
//! Catalog endpoints. Listing applies the search term, the category and, when
//! a profile is named, that profile's personalization gates.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use persona_cart_core::domain::{Product, ProductCategory, ProductGender};
use persona_cart_core::personalization::{browse, CatalogQuery};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::state::{AppState, CurrentUser};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductsQuery {
    /// Personalize the listing for this profile of the signed-in account.
    pub profile_id: Option<Uuid>,
    /// One of `clothing`, `footwear`, `personal-care`.
    pub category: Option<String>,
    /// Case-insensitive substring of the product name or brand.
    pub search: Option<String>,
}

impl ProductsQuery {
    fn catalog_query(&self) -> Result<CatalogQuery, ApiError> {
        let category = match self.category.as_deref().filter(|c| !c.is_empty() && *c != "all") {
            Some(raw) => Some(
                raw.parse::<ProductCategory>()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            ),
            None => None,
        };
        Ok(CatalogQuery {
            search: self.search.clone(),
            category,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[schema(value_type = String, example = "clothing")]
    pub category: ProductCategory,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 24.99)]
    pub price: Decimal,
    pub sizes: Option<Vec<String>>,
    #[schema(value_type = String, example = "Unisex")]
    pub gender: ProductGender,
    pub brand: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category,
            price: p.price,
            sizes: p.sizes,
            gender: p.gender,
            brand: p.brand,
        }
    }
}

/// List catalog products, optionally personalized for one of the account's profiles.
#[utoipa::path(
    get,
    path = "/products",
    params(ProductsQuery),
    responses(
        (status = 200, description = "Matching products in catalog order", body = [ProductResponse]),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let query = params.catalog_query()?;

    let profile = match params.profile_id {
        Some(profile_id) => Some(state.db.get_profile(user.user_id, profile_id).await?),
        None => None,
    };

    let products = state.db.list_products().await?;
    let total = products.len();
    let visible = browse(&query, profile.as_ref(), products);
    debug!(total, visible = visible.len(), profile_id = ?params.profile_id, "Catalog listed");

    Ok(Json(visible.into_iter().map(ProductResponse::from).collect()))
}

/// Get a single product by id.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.db.get_product(&id).await?;
    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_empty_category_mean_no_filter() {
        for raw in ["all", ""] {
            let params = ProductsQuery {
                category: Some(raw.to_string()),
                ..Default::default()
            };
            assert_eq!(params.catalog_query().unwrap().category, None);
        }
    }

    #[test]
    fn unknown_category_is_a_bad_request() {
        let params = ProductsQuery {
            category: Some("toys".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.catalog_query(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn price_serializes_as_a_number() {
        let product = persona_cart_core::catalog::sample_products().remove(0);
        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();
        let price = json["price"].as_f64().unwrap();
        assert!((price - 24.99).abs() < 1e-9);
        assert_eq!(json["category"], "clothing");
    }
}
