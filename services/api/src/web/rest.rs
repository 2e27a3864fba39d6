//! services/api/src/web/rest.rs
//!
//! Contains the master definition for the OpenAPI specification and assembles
//! the REST router from the individual handler modules.

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiError;
use crate::web::{auth, cart, middleware::require_auth, products, profiles, state::AppState};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_handler,
        auth::login_handler,
        auth::logout_handler,
        profiles::list_profiles_handler,
        profiles::get_profile_handler,
        profiles::create_profile_handler,
        profiles::update_profile_handler,
        profiles::delete_profile_handler,
        products::list_products_handler,
        products::get_product_handler,
        cart::list_cart_handler,
        cart::add_to_cart_handler,
        cart::remove_cart_item_handler,
        cart::clear_cart_handler,
    ),
    components(
        schemas(
            auth::SignupRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            profiles::ProfilePayload,
            profiles::ProfileResponse,
            profiles::DeleteProfileResponse,
            products::ProductResponse,
            cart::AddToCartRequest,
            cart::CartItemResponse,
            cart::SuccessResponse,
        )
    ),
    tags(
        (name = "PersonaCart API", description = "Family profiles, personalized catalog and cart.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, ApiError> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid ALLOWED_ORIGIN '{}': {}", allowed_origin, e))
    })?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]))
}

/// Builds the complete application: public auth routes, protected resource
/// routes, CORS, request tracing and the Swagger UI.
pub fn build_router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let cors = cors_layer(&app_state.config.allowed_origin)?;

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route(
            "/profiles",
            get(profiles::list_profiles_handler).post(profiles::create_profile_handler),
        )
        .route(
            "/profiles/{id}",
            get(profiles::get_profile_handler)
                .put(profiles::update_profile_handler)
                .delete(profiles::delete_profile_handler),
        )
        .route("/products", get(products::list_products_handler))
        .route("/products/{id}", get(products::get_product_handler))
        .route(
            "/cart",
            get(cart::list_cart_handler)
                .post(cart::add_to_cart_handler)
                .delete(cart::clear_cart_handler),
        )
        .route("/cart/{id}", axum::routing::delete(cart::remove_cart_item_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Ok(Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/auth/signup", "/profiles", "/profiles/{id}", "/products", "/cart", "/cart/{id}"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn invalid_origin_is_reported() {
        assert!(cors_layer("bad\norigin").is_err());
        assert!(cors_layer("http://localhost:3000").is_ok());
    }
}
